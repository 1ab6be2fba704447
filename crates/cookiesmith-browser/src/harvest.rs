//! Cookie harvester — session state extraction with a minimum-viability
//! gate.

use chromiumoxide::Page;
use tracing::debug;

use cookiesmith_core::{CookieRecord, Error, Result};

/// Read the page's full cookie jar and the runtime-reported user-agent.
///
/// Zero cookies is a hard failure: an empty jar means the target never
/// completed its normal session establishment, and the downstream caller
/// cannot use the result at all.
pub async fn harvest(page: &Page) -> Result<(Vec<CookieRecord>, String)> {
    let cookies: Vec<CookieRecord> = page
        .get_cookies()
        .await
        .map_err(|e| Error::Extraction(format!("cookie read failed: {}", e)))?
        .into_iter()
        .map(|c| CookieRecord {
            name: c.name,
            value: c.value,
        })
        .collect();

    if cookies.is_empty() {
        return Err(Error::EmptyCookieJar);
    }

    let user_agent: String = page
        .evaluate("navigator.userAgent")
        .await
        .map_err(|e| Error::Extraction(format!("user-agent read failed: {}", e)))?
        .into_value()
        .map_err(|e| Error::Extraction(format!("user-agent value malformed: {}", e)))?;

    debug!("harvested {} cookies", cookies.len());
    Ok((cookies, user_agent))
}
