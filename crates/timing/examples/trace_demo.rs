//! Writes a small trace file from a few instrumented scopes.
//!
//! ```text
//! RUST_LOG=timing=trace cargo run -p timing --example trace_demo --features profile-deep -- trace.json
//! ```
//!
//! Open the resulting file in any Trace Event Format viewer.

use std::thread::sleep;
use std::time::Duration;
use timing::{
    init_global, profile_fn, profile_scope, profile_scope_deep, Instrumentor, InstrumentorConfig,
    ThreadAttribution, PROFILE_LEVEL,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn load() {
    profile_fn!();
    for _ in 0..3 {
        profile_scope_deep!("load_chunk");
        sleep(Duration::from_millis(2));
    }
}

fn render() {
    profile_scope!("render");
    sleep(Duration::from_millis(5));
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "trace.json".to_string());

    init_global(
        InstrumentorConfig::default()
            .with_enabled(true)
            .with_thread_attribution(ThreadAttribution::PerRecord),
    );
    tracing::info!(level = ?PROFILE_LEVEL, "profiling");

    std::thread::scope(|s| {
        s.spawn(load);
        s.spawn(render);
    });

    match Instrumentor::global().print(&path) {
        Ok(count) => tracing::info!("Wrote {} events to {}", count, path),
        Err(e) => tracing::error!("Failed to write trace: {}", e),
    }
}
