use analytics::{AnalyticsError, AnalyticsPayload, Result};
use gloo_net::http::Request;

/// GET a fresh analytics payload from `url`.
///
/// Any non-2xx status is a failure. The body is parsed as an
/// [`AnalyticsPayload`]; `null` yields `Ok(None)`.
pub async fn fetch_analytics(url: &str) -> Result<Option<AnalyticsPayload>> {
    log::debug!("GET request to: {}", url);

    let response = Request::get(url).send().await.map_err(|e| {
        let error = AnalyticsError::Request(e.to_string());
        log::error!("GET {} - {}", url, error);
        error
    })?;

    if !response.ok() {
        let error = AnalyticsError::Http {
            status: response.status(),
        };
        log::warn!("GET {} - {}", url, error);
        return Err(error);
    }

    log::trace!("GET {} - Response received, parsing JSON", url);
    let body = response.text().await.map_err(|e| {
        let error = AnalyticsError::Request(e.to_string());
        log::error!("GET {} - Failed to read body: {}", url, error);
        error
    })?;

    let payload = AnalyticsPayload::from_json(&body).map_err(|e| {
        log::error!("GET {} - {}", url, e);
        e
    })?;

    log::info!("GET {} - Success", url);
    Ok(payload)
}
