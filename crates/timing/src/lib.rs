//! Scope Timing Instrumentation
//!
//! This crate measures how long scopes take and exports the measurements as a
//! Trace Event Format document that generic trace viewers can import:
//! - [`Timer`]: one-shot microsecond timer, idempotent once stopped
//! - [`Stopwatch`]: pause/resume timer with an accumulated total
//! - [`InstrumentationData`]: RAII guard that submits a [`ScopeRecord`] on drop
//! - [`Instrumentor`]: thread-safe collector that renders the trace document
//!
//! # Feature Flags
//!
//! - `profile`: `profile_scope!` and `profile_fn!` instantiate guards
//! - `profile-deep`: `profile_scope_deep!` and `profile_fn_deep!` do as well
//!
//! Without either feature every profiling macro expands to nothing.
//!
//! # Example
//!
//! ```rust
//! use timing::{InstrumentationData, Instrumentor, InstrumentorConfig};
//!
//! let instrumentor = Instrumentor::new(InstrumentorConfig::default().with_enabled(true));
//!
//! fn load(instrumentor: &Instrumentor) {
//!     let _scope = InstrumentationData::with_instrumentor("load", instrumentor);
//!     // ... work ...
//! }
//!
//! load(&instrumentor);
//! let mut out = Vec::new();
//! let written = instrumentor.write_trace(&mut out).unwrap();
//! assert_eq!(written, 1);
//! ```

mod clock;
mod error;
mod instrumentor;
mod scope;
mod stopwatch;
mod timer;
pub mod trace;

pub use clock::{current_thread_id, now_micros};
pub use error::{TimingError, TimingResult};
pub use instrumentor::{init_global, Instrumentor, InstrumentorConfig, ThreadAttribution};
pub use scope::{InstrumentationData, ProfileLevel, ScopeRecord, PROFILE_LEVEL};
pub use stopwatch::Stopwatch;
pub use timer::Timer;
pub use trace::{TraceDocument, TraceEvent};

/// Re-export for convenience
pub use std::time::Duration;
