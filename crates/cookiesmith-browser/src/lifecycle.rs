//! Browser lifecycle — one isolated Chromium process per request.

use std::time::Instant;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use cookiesmith_core::{Error, LaunchConfig, Result};

/// An owned Chromium process plus the page driving it.
///
/// Created at request entry and owned exclusively by that request.
/// [`HarvestSession::release`] consumes the session, so a second release
/// cannot be expressed; if the pipeline panics instead, dropping the
/// `Browser` kills the child process.
pub struct HarvestSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    started: Instant,
}

impl HarvestSession {
    /// Launch a Chromium process with the given immutable configuration and
    /// open a blank page.
    ///
    /// Fails with [`Error::Launch`] when the engine cannot start (missing
    /// executable, sandbox failure, resource exhaustion) or the initial page
    /// cannot be opened; in the latter case the already-running process is
    /// torn down before the error is returned.
    pub async fn launch(config: &LaunchConfig) -> Result<Self> {
        let started = Instant::now();

        let mut builder = BrowserConfig::builder().window_size(config.window.0, config.window.1);
        for arg in &config.hardening_args {
            builder = builder.arg(arg.as_str());
        }
        if let Some(path) = &config.executable {
            builder = builder.chrome_executable(path.clone());
        }

        let browser_config = builder.build().map_err(Error::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::Launch(e.to_string()))?;

        // Drive CDP events until the connection drops.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                teardown(browser, handler_task).await;
                return Err(Error::Launch(format!("could not open page: {}", e)));
            }
        };

        if let Some(ua) = &config.user_agent {
            if let Err(e) = page
                .execute(SetUserAgentOverrideParams::new(ua.clone()))
                .await
            {
                teardown(browser, handler_task).await;
                return Err(Error::Launch(format!(
                    "could not apply user-agent override: {}",
                    e
                )));
            }
        }

        debug!("browser session ready in {:?}", started.elapsed());
        Ok(Self {
            browser,
            page,
            handler_task,
            started,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Tear the session down: close the page, close the browser, wait for
    /// the process to exit, stop the event loop.
    ///
    /// Never fails. Secondary errors here are logged and swallowed, after
    /// the request's outcome has already been determined.
    pub async fn release(self) {
        let Self {
            browser,
            page,
            handler_task,
            started,
        } = self;

        if let Err(e) = page.close().await {
            warn!("page close failed during teardown: {}", e);
        }
        teardown(browser, handler_task).await;

        debug!("session released after {:?}", started.elapsed());
    }
}

async fn teardown(mut browser: Browser, handler_task: JoinHandle<()>) {
    if let Err(e) = browser.close().await {
        warn!("browser close failed during teardown: {}", e);
    }
    if let Err(e) = browser.wait().await {
        warn!("browser process wait failed during teardown: {}", e);
    }
    handler_task.abort();
}
