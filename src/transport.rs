//! Network access for the dashboard actions.

use crate::config::{REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE};
use crate::outcome::ActionError;
use futures::future::LocalBoxFuture;
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// Issues requests and hands back the raw response body.
///
/// Interpreting the body is left to the caller, so a response that arrived
/// but cannot be parsed stays distinguishable from one that never arrived.
pub trait ActionTransport {
    fn post(&self, path: &str) -> LocalBoxFuture<'static, Result<String, ActionError>>;

    fn get(&self, path: &str) -> LocalBoxFuture<'static, Result<String, ActionError>>;
}

/// [`ActionTransport`] over the browser `fetch` API.
#[derive(Debug, Clone, Default)]
pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every path with `base_url` (no trailing slash expected).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(
        &self,
        method: &'static str,
        path: &str,
    ) -> LocalBoxFuture<'static, Result<String, ActionError>> {
        let url = self.url(path);
        Box::pin(async move {
            fetch_text(method, &url)
                .await
                .map_err(|e| ActionError::Transport(describe_js_error(&e)))
        })
    }
}

impl ActionTransport for FetchTransport {
    fn post(&self, path: &str) -> LocalBoxFuture<'static, Result<String, ActionError>> {
        self.send("POST", path)
    }

    fn get(&self, path: &str) -> LocalBoxFuture<'static, Result<String, ActionError>> {
        self.send("GET", path)
    }
}

async fn fetch_text(method: &str, url: &str) -> Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(method);

    let headers = Headers::new()?;
    headers.set(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)?;
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts)?;
    let response: Response = JsFuture::from(gloo_utils::window().fetch_with_request(&request))
        .await?
        .dyn_into()?;
    debug!("{} {} -> {}", method, url, response.status());

    // Non-2xx bodies still carry `{success, msg}`; let the parser decide
    let body = JsFuture::from(response.text()?).await?;
    Ok(body.as_string().unwrap_or_default())
}

fn describe_js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err))
}
