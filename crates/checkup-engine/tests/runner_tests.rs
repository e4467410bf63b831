//! End-to-end tests for the check runner: event sequencing, filtering,
//! cancellation, and scope lifecycle.

use async_trait::async_trait;
use checkup_core::{
    from_fn, Cancelled, CheckContext, CheckOutcome, CheckRegistration, CheckScope, HealthCheck,
    HealthStatus, ScopeProvider,
};
use checkup_engine::{CheckRunner, EventSink, RegistryBuilder};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    ProcessingBegin,
    ProcessingEnd(HealthStatus),
    CheckBegin(String),
    CheckEnd(String, HealthStatus),
    CheckError(String),
    CheckData(String),
}

/// Sink that records every event in arrival order.
#[derive(Debug, Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

impl EventSink for RecordingSink {
    fn processing_begin(&self) {
        self.events.lock().push(Event::ProcessingBegin);
    }

    fn processing_end(&self, status: HealthStatus, _duration: Duration) {
        self.events.lock().push(Event::ProcessingEnd(status));
    }

    fn check_begin(&self, name: &str) {
        self.events.lock().push(Event::CheckBegin(name.to_string()));
    }

    fn check_end(
        &self,
        name: &str,
        status: HealthStatus,
        _duration: Duration,
        _description: Option<&str>,
    ) {
        self.events
            .lock()
            .push(Event::CheckEnd(name.to_string(), status));
    }

    fn check_error(&self, name: &str, _error: &anyhow::Error, _duration: Duration) {
        self.events.lock().push(Event::CheckError(name.to_string()));
    }

    fn check_data(&self, name: &str, _data: &IndexMap<String, Value>) {
        self.events.lock().push(Event::CheckData(name.to_string()));
    }
}

#[tokio::test]
async fn test_event_sequence_for_a_full_run() {
    let registry = RegistryBuilder::new()
        .add(
            "db",
            from_fn(|| async { Ok(CheckOutcome::healthy().with_data("pool", json!(4))) }),
        )
        .add(
            "cache",
            from_fn(|| async { Ok(CheckOutcome::degraded().with_description("evicting")) }),
        )
        .build()
        .unwrap();

    let sink = RecordingSink::default();
    let runner = CheckRunner::new(registry).with_sink(sink.clone());
    let report = runner.run(&CancellationToken::new()).await.unwrap();

    assert_eq!(report.status(), HealthStatus::Degraded);
    assert_eq!(
        sink.events(),
        vec![
            Event::ProcessingBegin,
            Event::CheckBegin("db".to_string()),
            Event::CheckEnd("db".to_string(), HealthStatus::Healthy),
            Event::CheckData("db".to_string()),
            Event::CheckBegin("cache".to_string()),
            Event::CheckEnd("cache".to_string(), HealthStatus::Degraded),
            Event::ProcessingEnd(HealthStatus::Degraded),
        ]
    );
}

#[tokio::test]
async fn test_no_check_data_event_for_empty_payload() {
    let registry = RegistryBuilder::new()
        .add("db", from_fn(|| async { Ok(CheckOutcome::healthy()) }))
        .build()
        .unwrap();

    let sink = RecordingSink::default();
    let runner = CheckRunner::new(registry).with_sink(sink.clone());
    runner.run(&CancellationToken::new()).await.unwrap();

    assert!(!sink
        .events()
        .iter()
        .any(|event| matches!(event, Event::CheckData(_))));
}

#[tokio::test]
async fn test_filtered_checks_emit_no_events() {
    let registry = RegistryBuilder::new()
        .add("a", from_fn(|| async { Ok(CheckOutcome::healthy()) }))
        .add("b", from_fn(|| async { Ok(CheckOutcome::unhealthy()) }))
        .build()
        .unwrap();

    let sink = RecordingSink::default();
    let runner = CheckRunner::new(registry).with_sink(sink.clone());
    let report = runner
        .run_filtered(|reg| reg.name() != "b", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.status(), HealthStatus::Healthy);

    let events = sink.events();
    assert!(events.contains(&Event::CheckBegin("a".to_string())));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::CheckBegin(name) if name == "b")));
}

#[tokio::test]
async fn test_faulting_check_emits_check_error() {
    let registry = RegistryBuilder::new()
        .add("flaky", from_fn(|| async { Err(anyhow::anyhow!("boom")) }))
        .build()
        .unwrap();

    let sink = RecordingSink::default();
    let runner = CheckRunner::new(registry).with_sink(sink.clone());
    let report = runner.run(&CancellationToken::new()).await.unwrap();

    assert_eq!(report.get("flaky").unwrap().status, HealthStatus::Unhealthy);
    assert_eq!(
        sink.events(),
        vec![
            Event::ProcessingBegin,
            Event::CheckBegin("flaky".to_string()),
            Event::CheckError("flaky".to_string()),
            Event::ProcessingEnd(HealthStatus::Unhealthy),
        ]
    );
}

#[tokio::test]
async fn test_cancellation_mid_run_emits_no_processing_end() {
    let cancel = CancellationToken::new();
    let trip = cancel.clone();

    let registry = RegistryBuilder::new()
        .add(
            "first",
            from_fn(move || {
                let trip = trip.clone();
                async move {
                    trip.cancel();
                    Ok(CheckOutcome::healthy())
                }
            }),
        )
        .add("second", from_fn(|| async { Ok(CheckOutcome::healthy()) }))
        .build()
        .unwrap();

    let sink = RecordingSink::default();
    let runner = CheckRunner::new(registry).with_sink(sink.clone());
    let err = runner.run(&cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    let events = sink.events();
    // The first check completed; the run aborted before the second began.
    assert!(events.contains(&Event::CheckEnd("first".to_string(), HealthStatus::Healthy)));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::CheckBegin(name) if name == "second")));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::ProcessingEnd(_))));
}

#[tokio::test]
async fn test_probe_raised_cancellation_records_nothing() {
    let registry = RegistryBuilder::new()
        .add("aborts", from_fn(|| async { Err(Cancelled.into()) }))
        .build()
        .unwrap();

    let sink = RecordingSink::default();
    let runner = CheckRunner::new(registry).with_sink(sink.clone());
    let err = runner.run(&CancellationToken::new()).await.unwrap_err();

    assert!(err.is_cancelled());
    let events = sink.events();
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::CheckEnd(..) | Event::CheckError(_))));
}

/// Resource whose drop is observable, for asserting scope release.
#[derive(Debug)]
struct DropGuard {
    drops: Arc<AtomicUsize>,
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
struct GuardedScopeProvider {
    drops: Arc<AtomicUsize>,
}

impl ScopeProvider for GuardedScopeProvider {
    fn create_scope(&self) -> CheckScope {
        let mut scope = CheckScope::new();
        scope.insert(
            "guard",
            DropGuard {
                drops: self.drops.clone(),
            },
        );
        scope.insert("dsn", "postgres://db.internal".to_string());
        scope
    }
}

#[tokio::test]
async fn test_scope_released_once_per_run() {
    let drops = Arc::new(AtomicUsize::new(0));
    let provider = GuardedScopeProvider {
        drops: drops.clone(),
    };

    let registry = RegistryBuilder::new()
        .add("ok", from_fn(|| async { Ok(CheckOutcome::healthy()) }))
        .build()
        .unwrap();
    let runner = CheckRunner::new(registry).with_scope_provider(provider);

    runner.run(&CancellationToken::new()).await.unwrap();
    assert_eq!(drops.load(Ordering::SeqCst), 1);

    // The cancelled path releases the scope too.
    let cancel = CancellationToken::new();
    cancel.cancel();
    runner.run(&cancel).await.unwrap_err();
    assert_eq!(drops.load(Ordering::SeqCst), 2);
}

/// Probe that resolves a dependency from the per-run scope.
#[derive(Debug)]
struct DsnProbe;

#[async_trait]
impl HealthCheck for DsnProbe {
    async fn check(
        &self,
        cx: &CheckContext<'_>,
        _cancel: CancellationToken,
    ) -> anyhow::Result<CheckOutcome> {
        match cx.scope().get::<String>("dsn") {
            Some(dsn) => Ok(CheckOutcome::healthy().with_data("dsn", json!(dsn))),
            None => Ok(CheckOutcome::unhealthy().with_description("dsn not configured")),
        }
    }
}

#[tokio::test]
async fn test_checks_resolve_dependencies_from_scope() {
    let provider = GuardedScopeProvider {
        drops: Arc::new(AtomicUsize::new(0)),
    };

    let registry = RegistryBuilder::new()
        .register(CheckRegistration::new("db", DsnProbe))
        .build()
        .unwrap();
    let runner = CheckRunner::new(registry).with_scope_provider(provider);

    let report = runner.run(&CancellationToken::new()).await.unwrap();
    let entry = report.get("db").unwrap();
    assert_eq!(entry.status, HealthStatus::Healthy);
    assert_eq!(entry.data["dsn"], json!("postgres://db.internal"));
}

#[tokio::test]
async fn test_concurrent_runs_share_a_registry() {
    let registry = RegistryBuilder::new()
        .add("a", from_fn(|| async { Ok(CheckOutcome::healthy()) }))
        .add("b", from_fn(|| async { Ok(CheckOutcome::degraded()) }))
        .build()
        .unwrap();
    let runner = CheckRunner::new(registry);

    let token_first = CancellationToken::new();
    let token_second = CancellationToken::new();
    let (first, second) = tokio::join!(
        runner.run(&token_first),
        runner.run(&token_second),
    );

    assert_eq!(first.unwrap().status(), HealthStatus::Degraded);
    assert_eq!(second.unwrap().status(), HealthStatus::Degraded);
}
