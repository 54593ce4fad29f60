//! Non-blocking HTTP client for the storefront backend.
//!
//! Requests run on a small background tokio runtime; results come back as
//! [`ApiEvent`]s that the UI drains once per frame.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    DeliveryAddress, DeliveryAddressInput, DeliveryAddressPatch, SessionUser, SignInRequest,
    SignInResponse, UpdateManyResult,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl ApiClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiClientError::Status { status: 401, .. })
    }
}

/// Which call an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRequest {
    SignIn,
    WhoAmI,
    SignOut,
    ListAddresses,
    CreateAddress,
    UpdateAddresses,
}

/// Completed request
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    SignedIn(SignInResponse),
    SessionRestored(SessionUser),
    /// Stored token is no longer valid
    SessionRejected,
    SignedOut,
    AddressesLoaded(Vec<DeliveryAddress>),
    AddressCreated(DeliveryAddress),
    AddressesUpdated(Vec<UpdateManyResult>),
    Failed { request: ApiRequest, message: String },
}

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    tx: UnboundedSender<ApiEvent>,
    rx: UnboundedReceiver<ApiEvent>,
    repaint: Option<egui::Context>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("stylecrop-api")
            .enable_all()
            .build()?;
        let (tx, rx) = unbounded_channel();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            http: reqwest::Client::new(),
            runtime,
            tx,
            rx,
            repaint: None,
        })
    }

    /// Wake the UI when a response arrives
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn endpoint(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    /// Drain completed requests
    pub fn poll(&mut self) -> Vec<ApiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ── Requests ──────────────────────────────────────────────

    pub fn sign_in(&self, request: SignInRequest) {
        let builder = self.http.post(self.endpoint("/api/auth/signin")).json(&request);
        self.dispatch(ApiRequest::SignIn, async move {
            fetch_json::<SignInResponse>(builder).await.map(ApiEvent::SignedIn)
        });
    }

    pub fn who_am_i(&self) {
        let builder = self.authed(self.http.get(self.endpoint("/api/user/whoami")));
        self.dispatch(ApiRequest::WhoAmI, async move {
            match fetch_json::<SessionUser>(builder).await {
                Ok(user) => Ok(ApiEvent::SessionRestored(user)),
                Err(e) if e.is_unauthorized() => Ok(ApiEvent::SessionRejected),
                Err(e) => Err(e),
            }
        });
    }

    pub fn sign_out(&self) {
        let builder = self.authed(self.http.post(self.endpoint("/api/auth/signout")));
        self.dispatch(ApiRequest::SignOut, async move {
            fetch_empty(builder).await.map(|_| ApiEvent::SignedOut)
        });
    }

    pub fn list_addresses(&self) {
        let builder = self.authed(self.http.get(self.endpoint("/api/delivery-addresses")));
        self.dispatch(ApiRequest::ListAddresses, async move {
            fetch_json(builder).await.map(ApiEvent::AddressesLoaded)
        });
    }

    pub fn create_address(&self, input: DeliveryAddressInput) {
        let builder = self
            .authed(self.http.post(self.endpoint("/api/delivery-addresses")))
            .json(&input);
        self.dispatch(ApiRequest::CreateAddress, async move {
            fetch_json(builder).await.map(ApiEvent::AddressCreated)
        });
    }

    pub fn update_addresses(&self, patches: Vec<DeliveryAddressPatch>) {
        let builder = self
            .authed(self.http.patch(self.endpoint("/api/delivery-addresses")))
            .json(&patches);
        self.dispatch(ApiRequest::UpdateAddresses, async move {
            fetch_json(builder).await.map(ApiEvent::AddressesUpdated)
        });
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn dispatch<F>(&self, request: ApiRequest, fut: F)
    where
        F: std::future::Future<Output = Result<ApiEvent, ApiClientError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let event = match fut.await {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("API {request:?} failed: {e}");
                    ApiEvent::Failed {
                        request,
                        message: e.to_string(),
                    }
                }
            };
            // Receiver only goes away on shutdown
            let _ = tx.send(event);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

async fn fetch_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiClientError> {
    let response = check_status(builder.send().await?).await?;
    Ok(response.json().await?)
}

async fn fetch_empty(builder: RequestBuilder) -> Result<(), ApiClientError> {
    check_status(builder.send().await?).await?;
    Ok(())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body: Option<serde_json::Value> = response.json().await.ok();
    Err(ApiClientError::Status {
        status: status.as_u16(),
        message: error_message(status, body.as_ref()),
    })
}

/// Server errors carry `{"error": "..."}`; fall back to the reason phrase
fn error_message(status: StatusCode, body: Option<&serde_json::Value>) -> String {
    body.and_then(|b| b.get("error"))
        .and_then(|e| e.as_str())
        .map(str::to_owned)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string())
}
