//! Capture collaborators: the renderer contract and the CDP-backed
//! implementation

use crate::{Result, Viewport};

/// External capture capability invoked once per job attempt.
///
/// Implementations must be safe for concurrent use from many workers; the
/// pool takes no locking responsibility of its own. An attempt is
/// all-or-nothing: the first size that fails aborts the remaining sizes for
/// that attempt, and artifacts already written for earlier sizes are left in
/// place.
pub trait Renderer: Send + Sync {
    /// Capture one artifact per configured size for a single target.
    fn render(&self, target: &str, sizes: &[Viewport]) -> Result<()>;
}

#[cfg(feature = "cdp")]
pub use cdp::{CaptureConfig, CdpRenderer, DEFAULT_USER_AGENT};

#[cfg(feature = "cdp")]
mod cdp {
    use std::path::PathBuf;

    use headless_chrome::protocol::cdp::Page;
    use headless_chrome::{Browser, LaunchOptions};
    use tracing::debug;

    use super::Renderer;
    use crate::naming::{artifact_filename, NameOrder};
    use crate::{Error, Result, Viewport};

    /// User agent applied to every capture context
    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/84.0.4147.135 Safari/537.36";

    // Launch-time window size; individual captures clip to their viewport.
    const WINDOW_SIZE: (u32, u32) = (1920, 1200);

    /// Capture settings threaded explicitly through renderer construction
    #[derive(Debug, Clone)]
    pub struct CaptureConfig {
        /// Directory artifacts are written into
        pub out_dir: PathBuf,
        /// Filename ordering for the size token
        pub naming: NameOrder,
        /// User agent sent with every navigation
        pub user_agent: String,
    }

    impl CaptureConfig {
        pub fn new(out_dir: PathBuf) -> Self {
            Self {
                out_dir,
                naming: NameOrder::default(),
                user_agent: DEFAULT_USER_AGENT.to_string(),
            }
        }
    }

    /// CDP-based capture backend (uses the `headless_chrome` crate)
    ///
    /// One headless Chrome instance is shared by every worker; the
    /// `headless_chrome` browser handle is safe for concurrent use, which
    /// discharges the concurrency obligation the pool places on its
    /// renderer. Each (target, size) capture runs in a fresh tab.
    pub struct CdpRenderer {
        browser: Browser,
        config: CaptureConfig,
    }

    impl CdpRenderer {
        /// Launch headless Chrome. Failures here are setup-fatal and are
        /// never retried.
        pub fn new(config: CaptureConfig) -> Result<Self> {
            let launch_options = LaunchOptions::default_builder()
                .headless(true)
                .window_size(Some(WINDOW_SIZE))
                .build()
                .map_err(|e| Error::Setup(format!("could not build launch options: {e}")))?;

            let browser = Browser::new(launch_options)
                .map_err(|e| Error::Setup(format!("could not launch browser: {e}")))?;

            Ok(Self { browser, config })
        }
    }

    impl Renderer for CdpRenderer {
        fn render(&self, target: &str, sizes: &[Viewport]) -> Result<()> {
            for size in sizes {
                let tab = self
                    .browser
                    .new_tab()
                    .map_err(|e| Error::Capture(format!("could not create tab: {e}")))?;

                tab.set_user_agent(&self.config.user_agent, None, None)
                    .map_err(|e| Error::Capture(format!("could not set user agent: {e}")))?;

                tab.navigate_to(target).map_err(|e| Error::Navigation {
                    url: target.to_string(),
                    reason: e.to_string(),
                })?;

                tab.wait_until_navigated().map_err(|e| Error::Navigation {
                    url: target.to_string(),
                    reason: e.to_string(),
                })?;

                let clip = Page::Viewport {
                    x: 0.0,
                    y: 0.0,
                    width: size.width as f64,
                    height: size.height as f64,
                    scale: 1.0,
                };
                let png = tab
                    .capture_screenshot(
                        Page::CaptureScreenshotFormatOption::Png,
                        None,
                        Some(clip),
                        true,
                    )
                    .map_err(|e| Error::Capture(format!("screenshot failed for {target}: {e}")))?;

                let name = artifact_filename(target, *size, self.config.naming);
                debug!("writing {name}");
                let path = self.config.out_dir.join(&name);
                std::fs::write(&path, &png).map_err(|e| {
                    Error::Capture(format!("could not write {}: {e}", path.display()))
                })?;

                let _ = tab.close(true);
            }
            Ok(())
        }
    }
}
