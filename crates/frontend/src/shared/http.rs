//! JSON transport to the clinic backend.
//!
//! [`send`] is the bare request; [`ApiClient`] adds the global 401 handling
//! and logging and is what pages use.

use contracts::shared::api::{HttpMethod, ListPage};
use contracts::shared::error::ApiError;
use contracts::shared::form::controller::SubmitRequest;
use contracts::system::session::ExpiryDecision;
use gloo_net::http::Request;
use serde_json::Value;
use web_sys::{AbortSignal, RequestCredentials};

use crate::shared::api_utils::api_url;
use crate::system::auth::context::{use_session, SessionContext};

fn classify(err: gloo_net::Error) -> ApiError {
    let text = err.to_string();
    if text.contains("AbortError") {
        ApiError::Aborted
    } else {
        ApiError::Network(text)
    }
}

/// Sends one request with cookies included. Non-2xx statuses become
/// [`ApiError::from_response`]; an empty success body is `Value::Null`.
pub async fn send(
    method: HttpMethod,
    path: &str,
    body: Option<&Value>,
    abort: Option<&AbortSignal>,
) -> Result<Value, ApiError> {
    let url = api_url(path);
    let builder = match method {
        HttpMethod::Get => Request::get(&url),
        HttpMethod::Post => Request::post(&url),
        HttpMethod::Patch => Request::patch(&url),
        HttpMethod::Delete => Request::delete(&url),
    }
    .credentials(RequestCredentials::Include)
    .abort_signal(abort);

    let request = match body {
        Some(body) => builder
            .json(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?,
        None => builder.build().map_err(classify)?,
    };

    let response = request.send().await.map_err(classify)?;
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await.map_err(classify)?;

    if !ok {
        return Err(ApiError::from_response(path, status, &text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[derive(Clone, Copy)]
pub struct ApiClient {
    session: SessionContext,
}

impl ApiClient {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        abort: Option<&AbortSignal>,
    ) -> Result<Value, ApiError> {
        let result = send(method, path, body, abort).await;
        match &result {
            Err(ApiError::Unauthorized) => {
                if self.session.handle_unauthorized(path) == ExpiryDecision::AlreadyExpiring {
                    log::debug!("{} {}: 401 while session expiry is running", method.as_str(), path);
                }
            }
            Err(ApiError::Aborted) => {
                log::debug!("{} {} aborted", method.as_str(), path);
            }
            Err(e) => {
                log::warn!("{} {} failed: {}", method.as_str(), path, e);
            }
            Ok(_) => {}
        }
        result
    }

    pub async fn get_list(&self, path: &str, abort: Option<&AbortSignal>) -> Result<ListPage, ApiError> {
        let body = self.request(HttpMethod::Get, path, None, abort).await?;
        ListPage::from_json(&body).inspect_err(|e| {
            log::error!("GET {}: {}", path, e);
        })
    }

    pub async fn submit(&self, request: &SubmitRequest) -> Result<Value, ApiError> {
        self.request(request.method, &request.url, Some(&request.body), None)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(HttpMethod::Delete, path, None, None)
            .await
            .map(|_| ())
    }
}

/// Client bound to the session in context.
pub fn use_api() -> ApiClient {
    ApiClient::new(use_session())
}
