use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::{Result, YtdError};

/// Initialize HTTP client bounded by a whole-request timeout
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()?;
    Ok(client)
}

/// The URL without its query string; the query may carry credentials
fn display_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

fn transport_error(e: reqwest::Error, url: &str) -> YtdError {
    if e.is_timeout() {
        YtdError::RequestTimeout(display_url(url).to_string())
    } else {
        YtdError::NetworkError(e.without_url())
    }
}

/// Execute POST request with JSON body and custom headers, returning the
/// response body as a generic JSON document.
///
/// Errors never echo the request query string.
pub async fn post_json<B: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
    headers: HeaderMap,
) -> Result<Value> {
    let payload = serde_json::to_vec(body)?;
    let request = client.post(url).headers(headers).body(payload);

    let response = request
        .send()
        .await
        .map_err(|e| transport_error(e, url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(YtdError::HttpError {
            status: status.as_u16(),
            url: display_url(url).to_string(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_error(e, url))?;
    let text = String::from_utf8(bytes.to_vec())?;
    Ok(serde_json::from_str(&text)?)
}
