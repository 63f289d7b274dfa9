//! RAII scope measurement and the compile-time profiling macros

use crate::clock::current_thread_id;
use crate::instrumentor::Instrumentor;
use crate::timer::Timer;
use std::time::Duration;

/// Compile-time profiling verbosity, selected with cargo features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileLevel {
    /// No feature: every profiling macro expands to nothing
    Off,
    /// `profile`: shallow scopes are measured
    On,
    /// `profile-deep`: fine-grained scopes are measured as well
    Deep,
}

/// The level this crate was built with.
pub const PROFILE_LEVEL: ProfileLevel = if cfg!(feature = "profile-deep") {
    ProfileLevel::Deep
} else if cfg!(feature = "profile") {
    ProfileLevel::On
} else {
    ProfileLevel::Off
};

/// Snapshot of one completed scope, as stored by the [`Instrumentor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRecord {
    pub name: &'static str,
    /// Start tick in microseconds
    pub start_us: u64,
    pub duration_us: u64,
    /// Thread the scope ran on
    pub thread_id: u64,
}

/// Measures the scope it lives in.
///
/// The timer starts on construction. When the value is dropped (on every exit
/// path, including early returns, `?` and unwinding) the timer is stopped and
/// a [`ScopeRecord`] is submitted to the instrumentor.
///
/// The name must be `'static`, normally a string literal. Names are escaped
/// when the trace is serialized.
///
/// # Example
///
/// ```rust
/// use timing::InstrumentationData;
///
/// fn parse() {
///     let _scope = InstrumentationData::new("parse");
///     // ... parsing ...
/// } // record submitted here
/// ```
#[must_use = "the scope is measured until this value is dropped"]
#[derive(Debug)]
pub struct InstrumentationData<'a> {
    timer: Timer,
    name: &'static str,
    thread_id: u64,
    instrumentor: &'a Instrumentor,
}

impl InstrumentationData<'static> {
    /// Start measuring a scope that reports to [`Instrumentor::global`].
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self::with_instrumentor(name, Instrumentor::global())
    }
}

impl<'a> InstrumentationData<'a> {
    /// Start measuring a scope that reports to `instrumentor`.
    #[inline]
    pub fn with_instrumentor(name: &'static str, instrumentor: &'a Instrumentor) -> Self {
        Self {
            timer: Timer::new(),
            name,
            thread_id: current_thread_id(),
            instrumentor,
        }
    }

    /// Get the name of this scope.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Time spent in the scope so far.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }
}

impl Drop for InstrumentationData<'_> {
    fn drop(&mut self) {
        let duration = self.timer.stop();
        let record = ScopeRecord {
            name: self.name,
            start_us: self.timer.start(),
            duration_us: duration.as_micros() as u64,
            thread_id: self.thread_id,
        };

        tracing::trace!(
            target: "timing",
            name = record.name,
            duration_us = record.duration_us,
            "scope completed"
        );

        self.instrumentor.add(record);
    }
}

/// Path of the enclosing function, as a `&'static str`.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // Strip the trailing "::f"
        &name[..name.len() - 3]
    }};
}

/// Measure the rest of the enclosing scope when built with `profile`.
///
/// # Example
///
/// ```rust
/// use timing::profile_scope;
///
/// fn do_work() {
///     profile_scope!("work");
///     // ... work ...
/// } // record submitted here
/// ```
#[cfg(feature = "profile")]
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_scope = $crate::InstrumentationData::new($name);
    };
}

#[cfg(not(feature = "profile"))]
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Measure the enclosing function, named by its path, when built with `profile`.
#[cfg(feature = "profile")]
#[macro_export]
macro_rules! profile_fn {
    () => {
        let _profile_fn = $crate::InstrumentationData::new($crate::__function_name!());
    };
}

#[cfg(not(feature = "profile"))]
#[macro_export]
macro_rules! profile_fn {
    () => {};
}

/// Like [`profile_scope!`], but only active with `profile-deep`.
#[cfg(feature = "profile-deep")]
#[macro_export]
macro_rules! profile_scope_deep {
    ($name:expr) => {
        let _profile_scope = $crate::InstrumentationData::new($name);
    };
}

#[cfg(not(feature = "profile-deep"))]
#[macro_export]
macro_rules! profile_scope_deep {
    ($name:expr) => {};
}

/// Like [`profile_fn!`], but only active with `profile-deep`.
#[cfg(feature = "profile-deep")]
#[macro_export]
macro_rules! profile_fn_deep {
    () => {
        let _profile_fn = $crate::InstrumentationData::new($crate::__function_name!());
    };
}

#[cfg(not(feature = "profile-deep"))]
#[macro_export]
macro_rules! profile_fn_deep {
    () => {};
}
