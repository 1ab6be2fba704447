//! Navigation driver — page load, wait condition, settle-wait.

use std::time::Duration;

use chromiumoxide::Page;
use tracing::debug;

use cookiesmith_core::{Error, NavigationConfig, Result, WaitStrategy};

/// Drive the page to the target URL and wait out the configured load
/// condition, then settle.
///
/// The whole load phase (navigation plus wait condition) runs under the
/// `timeout_ms` budget; exceeding it is an [`Error::NavigationTimeout`]. The
/// settle-wait runs after and is unconditional: cookie-setting scripts on
/// the target are asynchronous and not observable through the load event,
/// so a fixed delay stands in for "cookies have been set".
pub async fn navigate(page: &Page, config: &NavigationConfig) -> Result<()> {
    let budget = Duration::from_millis(config.timeout_ms);

    let load = async {
        page.goto(config.target_url.as_str())
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;

        match config.wait_strategy {
            WaitStrategy::DomContentLoaded => wait_dom_ready(page, config.timeout_ms).await,
            WaitStrategy::NetworkIdle => wait_network_idle(page, config.timeout_ms).await,
        }
    };

    tokio::time::timeout(budget, load)
        .await
        .map_err(|_| Error::NavigationTimeout(config.timeout_ms))??;

    debug!("load condition met, settling for {}ms", config.settle_ms);
    tokio::time::sleep(Duration::from_millis(config.settle_ms)).await;

    Ok(())
}

/// Resolve once `document.readyState` reaches interactive/complete, or
/// report failure after an in-page deadline so the promise cannot hang.
async fn wait_dom_ready(page: &Page, timeout_ms: u64) -> Result<()> {
    let script = format!(
        r#"
        new Promise((resolve) => {{
            if (document.readyState === 'complete' || document.readyState === 'interactive') {{
                resolve(true);
            }} else {{
                document.addEventListener('DOMContentLoaded', () => resolve(true));
                setTimeout(() => resolve(false), {timeout_ms});
            }}
        }})
        "#,
        timeout_ms = timeout_ms
    );

    let ready: bool = page
        .evaluate(script)
        .await
        .map_err(|e| Error::Navigation(format!("readiness check failed: {}", e)))?
        .into_value()
        .map_err(|e| Error::Navigation(format!("readiness result malformed: {}", e)))?;

    if ready {
        Ok(())
    } else {
        Err(Error::NavigationTimeout(timeout_ms))
    }
}

/// Poll the page's resource timeline until it has been network-quiet for a
/// full second with the document complete, or the deadline passes.
async fn wait_network_idle(page: &Page, timeout_ms: u64) -> Result<()> {
    let script = format!(
        r#"(async () => {{
            const timeoutMs = {timeout_ms};
            const idleMs = 1000;
            const interval = 250;

            const start = Date.now();
            let lastCount = 0;
            let stableMs = 0;

            try {{ lastCount = performance.getEntriesByType('resource').length; }} catch (_) {{ lastCount = 0; }}

            while (Date.now() - start < timeoutMs) {{
                await new Promise(r => setTimeout(r, interval));
                let curCount = lastCount;
                try {{ curCount = performance.getEntriesByType('resource').length; }} catch (_) {{ curCount = lastCount; }}

                if (document.readyState === 'complete' && curCount === lastCount) {{
                    stableMs += interval;
                    if (stableMs >= idleMs) {{
                        return true;
                    }}
                }} else {{
                    stableMs = 0;
                }}
                lastCount = curCount;
            }}
            return false;
        }})()"#,
        timeout_ms = timeout_ms
    );

    let idle: bool = page
        .evaluate(script)
        .await
        .map_err(|e| Error::Navigation(format!("network-idle check failed: {}", e)))?
        .into_value()
        .map_err(|e| Error::Navigation(format!("network-idle result malformed: {}", e)))?;

    if idle {
        Ok(())
    } else {
        Err(Error::NavigationTimeout(timeout_ms))
    }
}
