//! Process-wide collector for completed scopes

use crate::clock::current_thread_id;
use crate::error::{TimingError, TimingResult};
use crate::scope::ScopeRecord;
use crate::trace::{TraceDocument, TraceEvent};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Global instrumentor instance
static GLOBAL_INSTRUMENTOR: OnceLock<Instrumentor> = OnceLock::new();

/// Explicitly initialise the global instrumentor with `config`.
///
/// Returns `true` if this call created it, `false` if it already existed
/// (in which case `config` is ignored).
pub fn init_global(config: InstrumentorConfig) -> bool {
    let mut created = false;
    GLOBAL_INSTRUMENTOR.get_or_init(|| {
        created = true;
        Instrumentor::new(config)
    });
    created
}

/// Which thread id is stamped on exported events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThreadAttribution {
    /// Every event carries the id of the thread that created the collector
    #[default]
    Collector,
    /// Every event carries the id of the thread its scope ran on
    PerRecord,
}

/// Instrumentor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentorConfig {
    /// Records reserved up front. A capacity hint only.
    pub initial_capacity: usize,
    /// Whether the collector starts out retaining records
    pub enabled: bool,
    /// Thread id source for exported events
    pub thread_attribution: ThreadAttribution,
}

impl InstrumentorConfig {
    /// Set the initial buffer capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set whether the collector starts enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the thread attribution mode.
    pub fn with_thread_attribution(mut self, attribution: ThreadAttribution) -> Self {
        self.thread_attribution = attribution;
        self
    }
}

impl Default for InstrumentorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            enabled: false,
            thread_attribution: ThreadAttribution::Collector,
        }
    }
}

/// Collects [`ScopeRecord`]s from any thread and renders them as a trace.
///
/// Records are kept in submission order, which is the order scopes ended.
/// While disabled, submissions are dropped.
///
/// Use [`Instrumentor::global`] for the process-wide instance, or construct
/// one and hand it to [`InstrumentationData::with_instrumentor`].
///
/// [`InstrumentationData::with_instrumentor`]: crate::InstrumentationData::with_instrumentor
#[derive(Debug)]
pub struct Instrumentor {
    records: Mutex<Vec<ScopeRecord>>,
    enabled: AtomicBool,
    /// Id of the thread that constructed this collector
    thread_id: u64,
    config: InstrumentorConfig,
}

impl Instrumentor {
    /// Create a collector owned by the calling thread.
    pub fn new(config: InstrumentorConfig) -> Self {
        Self {
            records: Mutex::new(Vec::with_capacity(config.initial_capacity)),
            enabled: AtomicBool::new(config.enabled),
            thread_id: current_thread_id(),
            config,
        }
    }

    /// Get the global instrumentor, creating it with the default config on
    /// first use.
    pub fn global() -> &'static Instrumentor {
        GLOBAL_INSTRUMENTOR.get_or_init(|| Instrumentor::new(InstrumentorConfig::default()))
    }

    /// Start retaining submitted records.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
        tracing::debug!(target: "timing", "instrumentor enabled");
    }

    /// Stop retaining submitted records. Already buffered records are kept.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
        tracing::debug!(target: "timing", "instrumentor disabled");
    }

    /// Check if submitted records are retained.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Id of the thread that constructed this collector.
    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    /// The configuration this collector was built with.
    pub fn config(&self) -> &InstrumentorConfig {
        &self.config
    }

    /// Append a completed record if enabled.
    pub(crate) fn add(&self, record: ScopeRecord) {
        if !self.is_enabled() {
            return;
        }
        self.lock().push(record);
    }

    /// Number of buffered records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no records are buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the buffered records, in completion order.
    pub fn records(&self) -> Vec<ScopeRecord> {
        self.lock().clone()
    }

    /// Discard all buffered records.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Build a trace document from the buffer and clear it.
    pub fn take_trace(&self) -> TraceDocument {
        let mut records = self.lock();
        let events = records
            .iter()
            .map(|record| TraceEvent::complete(record, self.event_thread_id(record)))
            .collect();
        records.clear();
        TraceDocument::new(events)
    }

    /// Serialize the buffer as a trace document into `writer`.
    ///
    /// The buffer is cleared whether or not the write succeeds. Returns the
    /// number of events written.
    pub fn write_trace<W: Write>(&self, writer: W) -> TimingResult<usize> {
        let document = self.take_trace();
        write_document(writer, &document)?;
        Ok(document.len())
    }

    /// Write the buffer as a trace document to the file at `path`.
    ///
    /// The buffer is cleared even if the file cannot be created. Failures are
    /// logged and returned, never panicked on.
    pub fn print(&self, path: impl AsRef<Path>) -> TimingResult<usize> {
        let path = path.as_ref();
        let document = self.take_trace();

        let result = File::create(path)
            .map_err(TimingError::from)
            .and_then(|file| write_document(file, &document))
            .map(|()| document.len());

        match &result {
            Ok(count) => tracing::debug!(
                target: "timing",
                path = %path.display(),
                events = count,
                "trace written"
            ),
            Err(e) => tracing::warn!(
                target: "timing",
                path = %path.display(),
                "Failed to write trace: {}",
                e
            ),
        }
        result
    }

    fn event_thread_id(&self, record: &ScopeRecord) -> u64 {
        match self.config.thread_attribution {
            ThreadAttribution::Collector => self.thread_id,
            ThreadAttribution::PerRecord => record.thread_id,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ScopeRecord>> {
        // Records are plain data; a panic elsewhere cannot leave them torn.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Instrumentor {
    fn default() -> Self {
        Self::new(InstrumentorConfig::default())
    }
}

fn write_document<W: Write>(writer: W, document: &TraceDocument) -> TimingResult<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, document)?;
    writer.flush()?;
    Ok(())
}
