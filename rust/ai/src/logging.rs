use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

/// One captured event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Collects events in memory so tests can assert on what the advisor logged.
#[derive(Debug, Clone)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Default for TestLogSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Entries whose message contains `needle`.
    pub fn matching(&self, needle: &str) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.message.contains(needle))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn into_layer<S>(self) -> TestLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        TestLayer {
            subscriber: self,
            _phantom: PhantomData,
        }
    }
}

pub struct TestLayer<S> {
    subscriber: TestLogSubscriber,
    _phantom: PhantomData<S>,
}

impl<S> Layer<S> for TestLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.subscriber.lock().push(LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default
/// `info,tablesight_ai=debug` filter.
pub fn init_logging() -> Result<(), SetGlobalDefaultError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tablesight_ai=debug"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Installs a process-wide capture subscriber once and returns it cleared.
pub fn init_test_logging() -> TestLogSubscriber {
    static SUBSCRIBER: OnceLock<TestLogSubscriber> = OnceLock::new();
    static REGISTERED: OnceLock<()> = OnceLock::new();

    let subscriber = SUBSCRIBER.get_or_init(TestLogSubscriber::new);

    REGISTERED.get_or_init(|| {
        let layer = subscriber.clone().into_layer::<Registry>();
        let registry = Registry::default().with(layer);
        // Another subscriber may already own the global slot.
        let _ = tracing::subscriber::set_global_default(registry);
    });

    subscriber.clear();
    subscriber.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info, warn};

    fn capture(f: impl FnOnce()) -> TestLogSubscriber {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());
        tracing::subscriber::with_default(registry, f);
        subscriber
    }

    #[test]
    fn captures_levels_in_order() {
        let subscriber = capture(|| {
            debug!("debug message");
            info!("info message");
            warn!("warn message");
        });

        let entries = subscriber.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, Level::DEBUG);
        assert_eq!(entries[1].level, Level::INFO);
        assert_eq!(entries[2].level, Level::WARN);
        assert!(entries[2].message.contains("warn message"));
    }

    #[test]
    fn captures_structured_fields() {
        let subscriber = capture(|| {
            debug!(win_pct = 64u8, sampler = "rejection", "equity simulation finished");
        });

        let entries = subscriber.matching("equity simulation");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field("win_pct"), Some("64"));
        assert_eq!(entries[0].field("sampler"), Some("rejection"));
    }

    #[test]
    fn clear_drops_entries() {
        let subscriber = capture(|| info!("first message"));
        assert_eq!(subscriber.entries().len(), 1);
        subscriber.clear();
        assert!(subscriber.entries().is_empty());
    }
}
