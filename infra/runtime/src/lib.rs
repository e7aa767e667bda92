//! # Runtime
//!
//! Builds the multi-threaded [Tokio](https://tokio.rs) runtime that hosts the API server.
//!
//! The server binary keeps `main` synchronous: it loads configuration, builds the runtime
//! from it and then blocks on the async entry point.
//!
//! ```rust
//! use atelier_runtime::{RuntimeSettings, build_runtime};
//!
//! let runtime = build_runtime(&RuntimeSettings::default().with_worker_threads(2))?;
//! let answer = runtime.block_on(async { 21 * 2 });
//! assert_eq!(answer, 42);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use anyhow::Result;

use anyhow::Context;
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::info;

/// Used when the available parallelism cannot be detected.
const DEFAULT_WORKER_THREADS: usize = 4;
const MAX_WORKER_THREADS: usize = 1024;
const DEFAULT_STACK_SIZE: usize = 3 * 1024 * 1024;
const MIN_STACK_SIZE: usize = 1024 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
const DEFAULT_THREAD_NAME: &str = "atelier-worker";
const THREAD_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// Runtime sizing; out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            worker_threads: detected_worker_threads(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
        }
    }
}

impl RuntimeSettings {
    /// Builds settings from optional overrides, falling back to the detected parallelism.
    #[must_use]
    pub fn from_parts(worker_threads: Option<usize>, stack_size: usize, thread_name: &str) -> Self {
        Self::default()
            .with_worker_threads(worker_threads.unwrap_or_else(detected_worker_threads))
            .with_stack_size(stack_size)
            .with_thread_name(thread_name)
    }

    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name = if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }
}

fn detected_worker_threads() -> usize {
    available_parallelism().map_or(DEFAULT_WORKER_THREADS, std::num::NonZero::get)
}

/// Creates a multi-threaded runtime with every driver enabled.
///
/// # Errors
/// Fails when the OS refuses to spawn the worker threads.
pub fn build_runtime(settings: &RuntimeSettings) -> Result<Runtime> {
    info!(
        threads = settings.worker_threads,
        stack = settings.stack_size,
        name = %settings.thread_name,
        "Initializing server runtime"
    );

    Builder::new_multi_thread()
        .worker_threads(settings.worker_threads)
        .thread_name(&settings.thread_name)
        .thread_stack_size(settings.stack_size)
        .thread_keep_alive(THREAD_KEEP_ALIVE)
        .enable_all()
        .build()
        .context("Failed to initialize runtime")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_threads_are_clamped() {
        assert_eq!(RuntimeSettings::default().with_worker_threads(0).worker_threads, 1);
        assert_eq!(RuntimeSettings::default().with_worker_threads(2000).worker_threads, 1024);
    }

    #[test]
    fn stack_size_is_clamped() {
        assert_eq!(RuntimeSettings::default().with_stack_size(100).stack_size, MIN_STACK_SIZE);
        assert_eq!(
            RuntimeSettings::default().with_stack_size(100 * 1024 * 1024).stack_size,
            MAX_STACK_SIZE
        );
    }

    #[test]
    fn from_parts_applies_overrides() {
        let settings = RuntimeSettings::from_parts(Some(3), 2 * 1024 * 1024, " ");
        assert_eq!(settings.worker_threads, 3);
        assert_eq!(settings.stack_size, 2 * 1024 * 1024);
        assert_eq!(settings.thread_name, DEFAULT_THREAD_NAME);

        let detected = RuntimeSettings::from_parts(None, DEFAULT_STACK_SIZE, "api");
        assert!(detected.worker_threads >= 1);
        assert_eq!(detected.thread_name, "api");
    }

    #[test]
    fn runtime_executes_futures() {
        let runtime = build_runtime(&RuntimeSettings::default().with_worker_threads(1)).unwrap();
        assert_eq!(runtime.block_on(async { 7 }), 7);
    }
}
