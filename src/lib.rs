//! pagesnap
//!
//! Bulk full-page screenshot capture: a batch of URL targets is dispatched
//! across a fixed pool of concurrent workers, every attempt is raced against
//! a deadline, and failed or hung jobs are retried a bounded number of times
//! before the run reports one final outcome per submitted job.
//!
//! # Features
//!
//! - **CDP Backend** (default): captures through headless Chrome via the
//!   Chrome DevTools Protocol
//! - **Pluggable capture**: the pool only sees the [`Renderer`] trait, so
//!   tests drive it with scripted in-process renderers
//!
//! # Example
//!
//! ```no_run
//! use pagesnap::{CaptureConfig, CdpRenderer, Dispatcher, PoolConfig, Viewport};
//!
//! # #[tokio::main]
//! # async fn main() -> pagesnap::Result<()> {
//! let renderer = CdpRenderer::new(CaptureConfig::new("out".into()))?;
//! let sizes = vec![Viewport { width: 1280, height: 720 }];
//! let dispatcher = Dispatcher::new(renderer, sizes, PoolConfig::default());
//!
//! let targets = vec!["https://example.com".to_string()];
//! for outcome in dispatcher.run(&targets, 30).await {
//!     println!("{}: ok={}", outcome.target, outcome.is_success());
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub mod job;
pub mod naming;
pub mod pool;
pub mod renderer;

pub use job::{Job, JobOutcome};
pub use naming::{artifact_filename, NameOrder};
pub use pool::{Dispatcher, PoolConfig};
pub use renderer::Renderer;

#[cfg(feature = "cdp")]
pub use renderer::{CaptureConfig, CdpRenderer, DEFAULT_USER_AGENT};

/// Viewport dimensions, applied uniformly to every target
///
/// The size list is loaded once at startup and shared read-only by every
/// job and attempt; no job owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}
