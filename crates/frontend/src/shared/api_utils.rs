//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use contracts::shared::api_response::ApiResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use wasm_bindgen::JsCast;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Таймаут одного запроса. Истечение считается ошибкой элемента и не
/// повторяется: пакет не должен зависать на одном неотвечающем запросе.
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/supplier_product/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Ограничить future таймаутом; истечение — обычная ошибка элемента
pub async fn with_timeout<T>(
    fut: impl Future<Output = Result<T, String>>,
    ms: u32,
) -> Result<T, String> {
    race_with_deadline(fut, gloo_timers::future::TimeoutFuture::new(ms)).await
}

async fn race_with_deadline<T>(
    fut: impl Future<Output = Result<T, String>>,
    deadline: impl Future<Output = ()>,
) -> Result<T, String> {
    use futures::future::{select, Either};

    futures::pin_mut!(fut, deadline);
    match select(fut, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err("превышено время ожидания ответа".to_string()),
    }
}

async fn request(method: &str, path: &str, body: Option<String>) -> Result<Response, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    let has_body = body.is_some();
    if let Some(body) = body {
        opts.set_body(&wasm_bindgen::JsValue::from_str(&body));
    }

    let url = api_url(path);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;
    if has_body {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("{e:?}"))?;
    }

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;
    Ok(resp)
}

async fn read_text(resp: &Response) -> Result<String, String> {
    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string().ok_or_else(|| "bad text".to_string())
}

/// Не-2xx ответ: показать текст ошибки backend'а, если он есть в конверте
async fn status_error(resp: &Response) -> String {
    if let Ok(text) = read_text(resp).await {
        if let Ok(envelope) = serde_json::from_str::<ApiResponse>(&text) {
            if !envelope.is_success() {
                return envelope.error_message();
            }
        }
    }
    format!("HTTP {}", resp.status())
}

/// GET с десериализацией JSON
pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let resp = request("GET", path, None).await?;
    if !resp.ok() {
        return Err(status_error(&resp).await);
    }
    let text = read_text(&resp).await?;
    // Неожиданная форма ответа — ошибка элемента, а не паника
    serde_json::from_str(&text).map_err(|_| "некорректный ответ сервера".to_string())
}

/// POST с JSON-телом и десериализацией ответа
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let payload = serde_json::to_string(body).map_err(|e| format!("{e}"))?;
    let resp = request("POST", path, Some(payload)).await?;
    if !resp.ok() {
        return Err(status_error(&resp).await);
    }
    let text = read_text(&resp).await?;
    serde_json::from_str(&text).map_err(|_| "некорректный ответ сервера".to_string())
}

/// PUT с JSON-телом и десериализацией ответа
pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let payload = serde_json::to_string(body).map_err(|e| format!("{e}"))?;
    let resp = request("PUT", path, Some(payload)).await?;
    if !resp.ok() {
        return Err(status_error(&resp).await);
    }
    let text = read_text(&resp).await?;
    serde_json::from_str(&text).map_err(|_| "некорректный ответ сервера".to_string())
}

/// DELETE без тела ответа
pub async fn http_delete(path: &str) -> Result<(), String> {
    let resp = request("DELETE", path, None).await?;
    if !resp.ok() {
        return Err(status_error(&resp).await);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;

    #[test]
    fn test_result_wins_before_deadline() {
        let result = block_on(race_with_deadline(
            futures::future::ready(Ok(42)),
            futures::future::pending(),
        ));
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn test_deadline_turns_hang_into_item_error() {
        // Запрос, который никогда не ответит
        let (_tx, rx) = oneshot::channel::<()>();
        let hung = async move {
            let _ = rx.await;
            Ok(1)
        };
        let result = block_on(race_with_deadline(hung, futures::future::ready(())));
        assert_eq!(result, Err("превышено время ожидания ответа".to_string()));
    }
}
