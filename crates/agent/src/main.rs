use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitewatch_agent::collector::{cpu_percent, disk_usage, memory_usage, CpuTimes};
use sitewatch_agent::config::AgentConfig;
use sitewatch_agent::sender::MetricsClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitewatch_agent=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AgentConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        sitename = %config.sitename,
        interval_secs = config.interval_secs,
        "Agent starting"
    );

    let client = MetricsClient::new(&config);
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(config.interval_secs));

    // CPU usage needs a previous sample; the first tick only primes it.
    let mut prev_cpu: Option<CpuTimes> = None;

    loop {
        interval.tick().await;

        let curr_cpu = match CpuTimes::sample() {
            Ok(times) => times,
            Err(err) => {
                tracing::error!(error = %err, "CPU sample failed, skipping tick");
                continue;
            }
        };
        let Some(prev) = prev_cpu.replace(curr_cpu) else {
            tracing::debug!("Primed CPU counters, first report on next tick");
            continue;
        };
        let cpu = cpu_percent(prev, curr_cpu);

        let memory = match memory_usage() {
            Ok(pct) => pct,
            Err(err) => {
                tracing::error!(error = %err, "Memory sample failed, skipping tick");
                continue;
            }
        };

        let disk = match disk_usage(&config.disk_path) {
            Ok(pct) => pct,
            Err(err) => {
                tracing::error!(error = %err, "Disk sample failed, skipping tick");
                continue;
            }
        };

        match client.report(cpu, memory, disk).await {
            Ok(()) => {
                tracing::debug!(cpu, memory, disk, "Sample reported");
            }
            Err(err) => {
                tracing::error!(error = %err, "Report failed, will retry next tick");
            }
        }
    }
}
