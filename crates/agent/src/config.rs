/// Agent configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the sitewatch backend (default: `http://localhost:3000`).
    pub api_url: String,
    /// Bearer token for an `agent`-role account.
    pub token: String,
    /// Per-client unique site name this host reports as.
    pub sitename: String,
    /// Seconds between collection ticks (default: 60).
    pub interval_secs: u64,
    /// Mount point measured for disk usage (default: `/`).
    pub disk_path: String,
}

/// Default collection interval in seconds.
const DEFAULT_INTERVAL_SECS: u64 = 60;

impl AgentConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                  |
    /// |-----------------------|----------|--------------------------|
    /// | `API_URL`             | no       | `http://localhost:3000`  |
    /// | `AGENT_TOKEN`         | **yes**  | --                       |
    /// | `SITENAME`            | **yes**  | --                       |
    /// | `AGENT_INTERVAL_SECS` | no       | `60`                     |
    /// | `DISK_PATH`           | no       | `/`                      |
    ///
    /// # Panics
    ///
    /// Panics if `AGENT_TOKEN` or `SITENAME` is not set.
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let token =
            std::env::var("AGENT_TOKEN").expect("AGENT_TOKEN must be set in the environment");

        let sitename = std::env::var("SITENAME").expect("SITENAME must be set in the environment");

        let interval_secs: u64 = std::env::var("AGENT_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_INTERVAL_SECS.to_string())
            .parse()
            .expect("AGENT_INTERVAL_SECS must be a valid u64");

        let disk_path = std::env::var("DISK_PATH").unwrap_or_else(|_| "/".into());

        Self {
            api_url,
            token,
            sitename,
            interval_secs,
            disk_path,
        }
    }
}
