//! REST implementation of [`DashboardApi`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use dash_domain::config::ApiConfig;
use dash_domain::error::{Error, Result};
use dash_domain::trace::TraceEvent;
use dash_domain::{Account, Chatbot, User};

use super::provider::DashboardApi;
use super::types::{ChatbotList, Credentials, LoginResponse};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone)]
pub struct RestDashboardApi {
    http: Client,
    base_url: String,
}

impl RestDashboardApi {
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request and sort the outcome.  401/403 become
    /// [`Error::Auth`], as does any 4xx when `refusal_on_4xx` is set; every
    /// other non-success status is [`Error::Http`].
    async fn execute(
        &self,
        endpoint: &str,
        rb: RequestBuilder,
        refusal_on_4xx: bool,
    ) -> Result<Response> {
        let start = Instant::now();
        let result = rb.header("X-Client-Type", "dashctl").send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                TraceEvent::ApiCall {
                    endpoint: endpoint.to_owned(),
                    status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    duration_ms,
                }
                .emit();
                return Err(from_reqwest(e));
            }
        };

        let status = resp.status();
        TraceEvent::ApiCall {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            duration_ms,
        }
        .emit();

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let refused = status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
            || (refusal_on_4xx && status.is_client_error());
        if refused {
            return Err(Error::Auth(format!("{endpoint} rejected ({status}): {body}")));
        }
        Err(Error::Http(format!("{endpoint} returned {status}: {body}")))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl DashboardApi for RestDashboardApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(User, Account)> {
        let url = self.url("/auth/login");
        let resp = self
            .execute("POST /auth/login", self.http.post(&url).json(credentials), true)
            .await?;

        let body = resp.text().await.map_err(from_reqwest)?;
        let parsed: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Http(format!("failed to parse login response: {e}")))?;
        Ok((parsed.user, parsed.account))
    }

    async fn list_chatbots(&self, account: &Account) -> Result<Vec<Chatbot>> {
        let url = self.url("/chatbots");
        let resp = self
            .execute(
                "GET /chatbots",
                self.http.get(&url).query(&[("accountId", account.id.as_str())]),
                false,
            )
            .await?;

        let body = resp.text().await.map_err(from_reqwest)?;
        let list: ChatbotList = serde_json::from_str(&body)
            .map_err(|e| Error::Http(format!("failed to parse chatbot list: {e}: {body}")))?;
        Ok(list.into_vec())
    }
}

pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Http(format!("request timed out: {e}"))
    } else if e.is_connect() {
        Error::Http(format!("connection failed: {e}"))
    } else {
        Error::Http(e.to_string())
    }
}
