//! Alert lifecycle rules: when rows open, when they resolve, and when
//! notifications actually go out.
//!
//! Runs synchronously inside the ingestion request. Store failures abort
//! the request; notification failures are logged and swallowed so a broken
//! SMTP relay never loses alert bookkeeping.

use std::sync::Arc;

use chrono::Utc;
use sitewatch_core::alert::{should_notify, AlertKind};
use sitewatch_core::observation::Observation;
use sitewatch_db::models::alert::{NewAlert, ObservationRef};
use sitewatch_db::models::website::Website;
use sitewatch_events::{AlertEvent, AlertNotifier};

use super::store::AlertStore;

/// Reconciles evaluation verdicts against persisted alert state.
pub struct AlertEngine<S: AlertStore> {
    store: S,
    notifier: Arc<dyn AlertNotifier>,
}

impl<S: AlertStore> AlertEngine<S> {
    pub fn new(store: S, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Reconcile one observation against its violated kinds.
    ///
    /// Walks the observation's monitored universe (status kinds for status
    /// checks, metric kinds for resource samples). A violated kind opens or
    /// continues an episode; a compliant kind resolves any open episode.
    pub async fn reconcile(
        &self,
        website: &Website,
        observation: &Observation,
        observation_ref: ObservationRef,
        violated: &[AlertKind],
    ) -> Result<(), sqlx::Error> {
        for kind in observation.monitored_kinds() {
            if violated.contains(kind) {
                self.open_or_continue(website, observation, observation_ref, *kind)
                    .await?;
            } else {
                self.resolve_if_open(website, observation, *kind).await?;
            }
        }
        Ok(())
    }

    /// Record a violation: always insert a new unresolved row, then decide
    /// whether to notify.
    ///
    /// The throttle looks at the most recent *other* unresolved episode of
    /// the same kind: if it opened less than 24h ago, a notification already
    /// went out recently and this one is suppressed.
    async fn open_or_continue(
        &self,
        website: &Website,
        observation: &Observation,
        observation_ref: ObservationRef,
        kind: AlertKind,
    ) -> Result<(), sqlx::Error> {
        let alert = self
            .store
            .open(&NewAlert {
                website_id: website.id,
                kind: kind.as_str().to_string(),
                observation: observation_ref,
            })
            .await?;

        let prior = self
            .store
            .latest_unresolved_excluding(website.id, kind.as_str(), alert.id)
            .await?;

        let now = Utc::now();
        if should_notify(prior.map(|a| a.created_at), now) {
            let event = self.event_for(website, observation, kind);
            if let Err(err) = self.notifier.send_alert(&event).await {
                tracing::error!(
                    website_id = website.id,
                    kind = %kind,
                    error = %err,
                    "Alert notification failed"
                );
            }
        } else {
            tracing::info!(
                website_id = website.id,
                kind = %kind,
                alert_id = alert.id,
                "Alert notification suppressed, prior episode within throttle window"
            );
        }
        Ok(())
    }

    /// Record a recovery: resolve every open episode of the kind and send
    /// one recovery notification for the batch. No-op when nothing is open.
    async fn resolve_if_open(
        &self,
        website: &Website,
        observation: &Observation,
        kind: AlertKind,
    ) -> Result<(), sqlx::Error> {
        let open_alerts = self.store.find_unresolved(website.id, kind.as_str()).await?;
        if open_alerts.is_empty() {
            return Ok(());
        }

        let resolved = self
            .store
            .resolve_all_unresolved(website.id, kind.as_str(), Utc::now())
            .await?;
        tracing::info!(
            website_id = website.id,
            kind = %kind,
            resolved,
            "Alert episodes resolved"
        );

        let event = self.event_for(website, observation, kind);
        if let Err(err) = self.notifier.send_recovery(&event).await {
            tracing::error!(
                website_id = website.id,
                kind = %kind,
                error = %err,
                "Recovery notification failed"
            );
        }
        Ok(())
    }

    fn event_for(
        &self,
        website: &Website,
        observation: &Observation,
        kind: AlertKind,
    ) -> AlertEvent {
        AlertEvent {
            website_id: website.id,
            client_id: website.client_id,
            sitename: website.name.clone(),
            url: website.url.clone(),
            kind,
            checked_at: observation.checked_at(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use sitewatch_core::observation::{MetricsSample, StatusSample};
    use sitewatch_core::types::{DbId, Timestamp};
    use sitewatch_db::models::alert::Alert;

    use super::*;

    /// In-memory alert store mirroring the repository queries.
    #[derive(Default)]
    struct MemoryStore {
        alerts: Mutex<Vec<Alert>>,
        next_id: Mutex<DbId>,
    }

    impl MemoryStore {
        /// Seed a pre-existing unresolved episode with a chosen open time.
        fn seed_unresolved(&self, website_id: DbId, kind: AlertKind, created_at: Timestamp) {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            self.alerts.lock().unwrap().push(Alert {
                id: *next_id,
                website_id,
                kind: kind.as_str().to_string(),
                status_check_id: Some(1),
                resource_metric_id: None,
                is_resolved: false,
                created_at,
                resolved_at: None,
            });
        }

        fn all(&self) -> Vec<Alert> {
            self.alerts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AlertStore for MemoryStore {
        async fn open(&self, alert: &NewAlert) -> Result<Alert, sqlx::Error> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let (status_check_id, resource_metric_id) = match alert.observation {
                ObservationRef::StatusCheck(id) => (Some(id), None),
                ObservationRef::ResourceMetric(id) => (None, Some(id)),
            };
            let row = Alert {
                id: *next_id,
                website_id: alert.website_id,
                kind: alert.kind.clone(),
                status_check_id,
                resource_metric_id,
                is_resolved: false,
                created_at: Utc::now(),
                resolved_at: None,
            };
            self.alerts.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn latest_unresolved_excluding(
            &self,
            website_id: DbId,
            kind: &str,
            exclude_id: DbId,
        ) -> Result<Option<Alert>, sqlx::Error> {
            let alerts = self.alerts.lock().unwrap();
            Ok(alerts
                .iter()
                .filter(|a| {
                    a.website_id == website_id
                        && a.kind == kind
                        && !a.is_resolved
                        && a.id != exclude_id
                })
                .max_by_key(|a| a.created_at)
                .cloned())
        }

        async fn find_unresolved(
            &self,
            website_id: DbId,
            kind: &str,
        ) -> Result<Vec<Alert>, sqlx::Error> {
            let alerts = self.alerts.lock().unwrap();
            Ok(alerts
                .iter()
                .filter(|a| a.website_id == website_id && a.kind == kind && !a.is_resolved)
                .cloned()
                .collect())
        }

        async fn resolve_all_unresolved(
            &self,
            website_id: DbId,
            kind: &str,
            resolved_at: Timestamp,
        ) -> Result<u64, sqlx::Error> {
            let mut alerts = self.alerts.lock().unwrap();
            let mut count = 0;
            for a in alerts.iter_mut() {
                if a.website_id == website_id && a.kind == kind && !a.is_resolved {
                    a.is_resolved = true;
                    a.resolved_at = Some(resolved_at);
                    count += 1;
                }
            }
            Ok(count)
        }
    }

    /// Store whose `open` always fails, for error propagation tests.
    struct BrokenStore;

    #[async_trait]
    impl AlertStore for BrokenStore {
        async fn open(&self, _alert: &NewAlert) -> Result<Alert, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }

        async fn latest_unresolved_excluding(
            &self,
            _website_id: DbId,
            _kind: &str,
            _exclude_id: DbId,
        ) -> Result<Option<Alert>, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }

        async fn find_unresolved(
            &self,
            _website_id: DbId,
            _kind: &str,
        ) -> Result<Vec<Alert>, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }

        async fn resolve_all_unresolved(
            &self,
            _website_id: DbId,
            _kind: &str,
            _resolved_at: Timestamp,
        ) -> Result<u64, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }
    }

    /// Notifier that records every delivery instead of sending it.
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(AlertKind, &'static str)>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn deliveries(&self) -> Vec<(AlertKind, &'static str)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AlertNotifier for RecordingNotifier {
        async fn send_alert(
            &self,
            event: &AlertEvent,
        ) -> Result<(), sitewatch_events::NotifyError> {
            self.sent.lock().unwrap().push((event.kind, "alert"));
            if self.fail {
                return Err(sitewatch_events::NotifyError::Build("boom".into()));
            }
            Ok(())
        }

        async fn send_recovery(
            &self,
            event: &AlertEvent,
        ) -> Result<(), sitewatch_events::NotifyError> {
            self.sent.lock().unwrap().push((event.kind, "recovery"));
            if self.fail {
                return Err(sitewatch_events::NotifyError::Build("boom".into()));
            }
            Ok(())
        }
    }

    fn test_website() -> Website {
        Website {
            id: 10,
            client_id: 3,
            name: "prod-web".to_string(),
            url: "https://example.com".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn status_observation() -> Observation {
        Observation::Status(StatusSample {
            website_id: 10,
            status_code: 500,
            response_time: 120.0,
            page_load: 1.0,
            page_size: 1024.0,
            is_up: true,
            checked_at: Utc::now(),
        })
    }

    fn metrics_observation() -> Observation {
        Observation::Metrics(MetricsSample {
            website_id: 10,
            cpu_usage: 95.0,
            memory_usage: 40.0,
            disk_usage: 50.0,
            checked_at: Utc::now(),
        })
    }

    fn engine_with(
        store: MemoryStore,
    ) -> (AlertEngine<MemoryStore>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = AlertEngine::new(store, notifier.clone() as Arc<dyn AlertNotifier>);
        (engine, notifier)
    }

    #[tokio::test]
    async fn fresh_violation_opens_row_and_notifies() {
        let (engine, notifier) = engine_with(MemoryStore::default());
        let website = test_website();
        let observation = status_observation();

        engine
            .reconcile(
                &website,
                &observation,
                ObservationRef::StatusCheck(1),
                &[AlertKind::StatusAlive],
            )
            .await
            .unwrap();

        let alerts = engine.store.all();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, "status_alive");
        assert!(!alerts[0].is_resolved);
        assert_eq!(notifier.deliveries(), vec![(AlertKind::StatusAlive, "alert")]);
    }

    #[tokio::test]
    async fn repeat_violation_within_window_suppresses_notification() {
        let store = MemoryStore::default();
        store.seed_unresolved(10, AlertKind::StatusAlive, Utc::now() - Duration::hours(1));
        let (engine, notifier) = engine_with(store);
        let website = test_website();
        let observation = status_observation();

        engine
            .reconcile(
                &website,
                &observation,
                ObservationRef::StatusCheck(2),
                &[AlertKind::StatusAlive],
            )
            .await
            .unwrap();

        // A second row is always opened, but no email goes out.
        assert_eq!(engine.store.all().len(), 2);
        assert!(notifier.deliveries().is_empty());
    }

    #[tokio::test]
    async fn repeat_violation_after_window_notifies_again() {
        let store = MemoryStore::default();
        store.seed_unresolved(10, AlertKind::StatusAlive, Utc::now() - Duration::hours(25));
        let (engine, notifier) = engine_with(store);
        let website = test_website();
        let observation = status_observation();

        engine
            .reconcile(
                &website,
                &observation,
                ObservationRef::StatusCheck(2),
                &[AlertKind::StatusAlive],
            )
            .await
            .unwrap();

        assert_eq!(notifier.deliveries(), vec![(AlertKind::StatusAlive, "alert")]);
    }

    #[tokio::test]
    async fn recovery_resolves_all_rows_with_one_notification() {
        let store = MemoryStore::default();
        store.seed_unresolved(10, AlertKind::MaxCpu, Utc::now() - Duration::hours(3));
        store.seed_unresolved(10, AlertKind::MaxCpu, Utc::now() - Duration::hours(2));
        store.seed_unresolved(10, AlertKind::MaxCpu, Utc::now() - Duration::hours(1));
        let (engine, notifier) = engine_with(store);
        let website = test_website();
        let observation = metrics_observation();

        // Compliant metrics sample: no violated kinds.
        engine
            .reconcile(&website, &observation, ObservationRef::ResourceMetric(5), &[])
            .await
            .unwrap();

        let alerts = engine.store.all();
        assert!(alerts.iter().all(|a| a.is_resolved));
        assert!(alerts.iter().all(|a| a.resolved_at.is_some()));
        assert_eq!(notifier.deliveries(), vec![(AlertKind::MaxCpu, "recovery")]);
    }

    #[tokio::test]
    async fn compliant_kind_with_no_open_episode_is_a_noop() {
        let (engine, notifier) = engine_with(MemoryStore::default());
        let website = test_website();
        let observation = metrics_observation();

        engine
            .reconcile(&website, &observation, ObservationRef::ResourceMetric(5), &[])
            .await
            .unwrap();

        assert!(engine.store.all().is_empty());
        assert!(notifier.deliveries().is_empty());
    }

    #[tokio::test]
    async fn mixed_verdicts_open_and_resolve_in_one_pass() {
        let store = MemoryStore::default();
        store.seed_unresolved(10, AlertKind::MaxRam, Utc::now() - Duration::hours(2));
        let (engine, notifier) = engine_with(store);
        let website = test_website();
        let observation = metrics_observation();

        engine
            .reconcile(
                &website,
                &observation,
                ObservationRef::ResourceMetric(5),
                &[AlertKind::MaxCpu],
            )
            .await
            .unwrap();

        let alerts = engine.store.all();
        let cpu: Vec<_> = alerts.iter().filter(|a| a.kind == "max_cpu").collect();
        let ram: Vec<_> = alerts.iter().filter(|a| a.kind == "max_ram").collect();
        assert_eq!(cpu.len(), 1);
        assert!(!cpu[0].is_resolved);
        assert_eq!(cpu[0].resource_metric_id, Some(5));
        assert_eq!(ram.len(), 1);
        assert!(ram[0].is_resolved);

        assert_eq!(
            notifier.deliveries(),
            vec![
                (AlertKind::MaxCpu, "alert"),
                (AlertKind::MaxRam, "recovery"),
            ]
        );
    }

    #[tokio::test]
    async fn notifier_failure_is_swallowed() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let engine = AlertEngine::new(
            MemoryStore::default(),
            notifier.clone() as Arc<dyn AlertNotifier>,
        );
        let website = test_website();
        let observation = status_observation();

        let result = engine
            .reconcile(
                &website,
                &observation,
                ObservationRef::StatusCheck(1),
                &[AlertKind::ResponseTime],
            )
            .await;

        // The row is still opened even though delivery blew up.
        assert!(result.is_ok());
        assert_eq!(engine.store.all().len(), 1);
        assert_eq!(notifier.deliveries().len(), 1);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = AlertEngine::new(BrokenStore, notifier.clone() as Arc<dyn AlertNotifier>);
        let website = test_website();
        let observation = status_observation();

        let result = engine
            .reconcile(
                &website,
                &observation,
                ObservationRef::StatusCheck(1),
                &[AlertKind::StatusAlive],
            )
            .await;

        assert!(result.is_err());
        assert!(notifier.deliveries().is_empty());
    }
}
