//! API utilities for frontend-backend communication
//!
//! Every fetcher in the app goes through the helpers here: they build the
//! URL, attach the page's abort signal, and turn failures into
//! [`FetchError`] with the backend's `message` when it sent one.

use contracts::shared::api_error::FetchError;
use contracts::shared::query::ReportQuery;
use gloo_net::http::{Request, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use web_sys::{AbortController, AbortSignal, FormData};

use super::config::config;

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the config when set. Otherwise the URL is
/// built from the current window location with the configured backend
/// port, e.g. `http://localhost:8000`.
pub fn api_base() -> String {
    let api = config().api;
    if !api.base_url.is_empty() {
        return api.base_url;
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

/// Build a full API URL from a path starting with `/api/`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Full URL of a resource with its query string
pub fn resource_url(path: &str, query: &ReportQuery) -> String {
    format!("{}{}", api_base(), path_with_query(path, query))
}

fn path_with_query(path: &str, query: &ReportQuery) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    match serde_qs::to_string(query) {
        Ok(qs) => format!("{}?{}", path, qs),
        Err(e) => {
            log::warn!("could not encode query for {}: {}", path, e);
            path.to_string()
        }
    }
}

/// Aborts in-flight requests of a page when the page is unmounted.
///
/// Call from a component body. Returns `None` when the browser has no
/// `AbortController`, in which case requests simply run to completion.
pub fn abort_on_cleanup() -> Option<AbortSignal> {
    let controller = AbortController::new().ok()?;
    let signal = controller.signal();
    let stored = StoredValue::new_local(controller);
    on_cleanup(move || {
        let _ = stored.try_with_value(|c| c.abort());
    });
    Some(signal)
}

/// Abort slot for a request that is re-issued as its inputs change.
///
/// Each [`LatestRequest::next`] aborts the request started before it;
/// unmounting the component aborts the last one.
#[derive(Clone, Copy)]
pub struct LatestRequest {
    current: StoredValue<Option<AbortController>, LocalStorage>,
}

impl LatestRequest {
    /// Call from a component body.
    pub fn new() -> Self {
        let current = StoredValue::new_local(None::<AbortController>);
        on_cleanup(move || {
            let _ = current.try_with_value(|c| {
                if let Some(c) = c {
                    c.abort();
                }
            });
        });
        Self { current }
    }

    /// Signal for a new request, aborting the previous one
    pub fn next(&self) -> Option<AbortSignal> {
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(AbortController::signal);
        let previous = self
            .current
            .try_update_value(|slot| std::mem::replace(slot, controller))
            .flatten();
        if let Some(previous) = previous {
            previous.abort();
        }
        signal
    }
}

fn failure(e: gloo_net::Error, signal: Option<&AbortSignal>) -> FetchError {
    if signal.map(|s| s.aborted()).unwrap_or(false) {
        FetchError::Aborted
    } else {
        FetchError::Network(e.to_string())
    }
}

async fn check(
    response: Response,
    signal: Option<&AbortSignal>,
    fallback: &str,
) -> Result<Response, FetchError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.map_err(|e| failure(e, signal))?;
    let err = FetchError::from_response(status, &body, fallback);
    log::warn!("{} {}: {}", status, response.url(), err);
    Err(err)
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    signal: Option<&AbortSignal>,
    fallback: &str,
) -> Result<T, FetchError> {
    let response = check(response, signal, fallback).await?;
    response.json::<T>().await.map_err(|e| {
        if signal.map(|s| s.aborted()).unwrap_or(false) {
            FetchError::Aborted
        } else {
            FetchError::Decode(e.to_string())
        }
    })
}

/// GET and parse a JSON body
pub async fn get_json<T: DeserializeOwned>(
    url: &str,
    signal: Option<&AbortSignal>,
    fallback: &str,
) -> Result<T, FetchError> {
    let response = Request::get(url)
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| failure(e, signal))?;
    read_json(response, signal, fallback).await
}

/// GET a list resource. Accepts a bare array or a `{ "results": [...] }` /
/// `{ "data": [...] }` envelope.
pub async fn get_rows(
    url: &str,
    signal: Option<&AbortSignal>,
    fallback: &str,
) -> Result<Vec<Value>, FetchError> {
    let body: Value = get_json(url, signal, fallback).await?;
    into_rows(body)
}

fn into_rows(body: Value) -> Result<Vec<Value>, FetchError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for key in ["results", "data"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return Ok(items);
                }
            }
            Err(FetchError::Decode("expected a list of records".to_string()))
        }
        _ => Err(FetchError::Decode("expected a list of records".to_string())),
    }
}

/// PUT a JSON body and parse the JSON reply
pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    signal: Option<&AbortSignal>,
    fallback: &str,
) -> Result<T, FetchError> {
    let response = Request::put(url)
        .abort_signal(signal)
        .json(body)
        .map_err(|e| FetchError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| failure(e, signal))?;
    read_json(response, signal, fallback).await
}

/// DELETE a resource; the reply body is ignored
pub async fn delete(url: &str, signal: Option<&AbortSignal>, fallback: &str) -> Result<(), FetchError> {
    let response = Request::delete(url)
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| failure(e, signal))?;
    check(response, signal, fallback).await.map(|_| ())
}

/// POST a multipart form and parse the JSON reply
pub async fn post_form<T: DeserializeOwned>(
    url: &str,
    form: FormData,
    signal: Option<&AbortSignal>,
    fallback: &str,
) -> Result<T, FetchError> {
    let response = Request::post(url)
        .abort_signal(signal)
        .body(form)
        .map_err(|e| FetchError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| failure(e, signal))?;
    read_json(response, signal, fallback).await
}

/// GET a binary body together with the filename from `Content-Disposition`
pub async fn get_bytes(
    url: &str,
    signal: Option<&AbortSignal>,
    fallback: &str,
) -> Result<(Vec<u8>, Option<String>), FetchError> {
    let response = Request::get(url)
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| failure(e, signal))?;
    let response = check(response, signal, fallback).await?;
    let filename = response
        .headers()
        .get("content-disposition")
        .and_then(|h| disposition_filename(&h));
    let bytes = response.binary().await.map_err(|e| failure(e, signal))?;
    Ok((bytes, filename))
}

/// `attachment; filename="Stock_2024.xlsx"` -> `Stock_2024.xlsx`
fn disposition_filename(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        if let Some(encoded) = part.strip_prefix("filename*=") {
            let value = encoded.rsplit("''").next().unwrap_or(encoded);
            return urlencoding::decode(value).ok().map(|v| v.into_owned());
        }
        part.strip_prefix("filename=")
            .map(|v| v.trim_matches('"').to_string())
    })
    .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::shared::query::AssociateType;
    use serde_json::json;

    #[test]
    fn test_path_with_query() {
        assert_eq!(
            path_with_query("/api/inventory/low-stock/", &ReportQuery::default()),
            "/api/inventory/low-stock/"
        );
        let q = ReportQuery::with_range(
            NaiveDate::from_ymd_opt(2024, 4, 1),
            NaiveDate::from_ymd_opt(2024, 4, 30),
        );
        assert_eq!(
            path_with_query("/api/accounts/payables/", &q),
            "/api/accounts/payables/?from=2024-04-01&to=2024-04-30"
        );
        assert_eq!(
            path_with_query("/api/associates/", &ReportQuery::associates(AssociateType::Supplier)),
            "/api/associates/?type=supplier"
        );
    }

    #[test]
    fn test_into_rows_accepts_envelopes() {
        assert_eq!(into_rows(json!([{"a": 1}])).unwrap().len(), 1);
        assert_eq!(into_rows(json!({"results": [{"a": 1}, {"a": 2}]})).unwrap().len(), 2);
        assert_eq!(into_rows(json!({"data": []})).unwrap().len(), 0);
        assert!(matches!(into_rows(json!({"message": "x"})), Err(FetchError::Decode(_))));
        assert!(into_rows(json!("text")).is_err());
    }

    #[test]
    fn test_disposition_filename() {
        assert_eq!(
            disposition_filename("attachment; filename=\"Stock_2024-04-09.xlsx\""),
            Some("Stock_2024-04-09.xlsx".to_string())
        );
        assert_eq!(
            disposition_filename("attachment; filename*=UTF-8''Sales%20Report.xlsx"),
            Some("Sales Report.xlsx".to_string())
        );
        assert_eq!(disposition_filename("inline"), None);
        assert_eq!(disposition_filename("attachment; filename=\"\""), None);
    }
}
