//! Endpoint dispatch for the record API

use std::collections::HashMap;

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{
    AuthRequest, OAuthResponse, Record, RecordDraft, RecordPage, RefreshRequest, RemovedResponse,
};

/// The record operations a client can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateRecord,
    RemoveRecord,
    UpdateRecord,
    ListRecords,
    SearchRecords,
}

/// Wire-level description of one operation: HTTP verb, path template, and
/// the parameter keys the template consumes.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub template: &'static str,
    pub required: &'static [&'static str],
}

impl Operation {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Operation::CreateRecord => Endpoint {
                method: Method::POST,
                template: "/record",
                required: &[],
            },
            Operation::RemoveRecord => Endpoint {
                method: Method::DELETE,
                template: "/record/remove?ids={ids}",
                required: &["ids"],
            },
            Operation::UpdateRecord => Endpoint {
                method: Method::PUT,
                template: "/record/{id}",
                required: &["id"],
            },
            Operation::ListRecords => Endpoint {
                method: Method::GET,
                template: "/record/list?offset={offset}&limit={limit}",
                required: &["offset", "limit"],
            },
            Operation::SearchRecords => Endpoint {
                method: Method::GET,
                template: "/record/search?keyword={keyword}",
                required: &["keyword"],
            },
        }
    }

    /// Renders the request path, substituting each `{key}` placeholder with
    /// the percent-encoded parameter value. A missing required key is an
    /// explicit error, not a panic.
    pub fn render_path(&self, params: &HashMap<String, String>) -> Result<String, ClientError> {
        let endpoint = self.endpoint();
        let mut path = endpoint.template.to_string();

        for &key in endpoint.required {
            let value = params.get(key).ok_or(ClientError::MissingParameter {
                operation: *self,
                key,
            })?;
            path = path.replace(
                &format!("{{{}}}", key),
                urlencoding::encode(value).as_ref(),
            );
        }

        Ok(path)
    }
}

/// HTTP client for the record API.
///
/// Every request carries the configured bearer token and user-agent header;
/// POST and PUT operations serialize their payload as JSON.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Swap the bearer token, e.g. after a login or refresh.
    pub fn set_bearer_token(&mut self, bearer_token: impl Into<String>) {
        self.config.bearer_token = bearer_token.into();
    }

    /// Dispatch one operation and hand back the raw response. Status
    /// checking is left to the caller; the typed wrappers below do it.
    pub async fn request<P>(
        &self,
        operation: Operation,
        payload: Option<&P>,
        params: &HashMap<String, String>,
    ) -> Result<Response, ClientError>
    where
        P: Serialize + ?Sized,
    {
        let endpoint = operation.endpoint();
        let url = format!("{}{}", self.config.base_url, operation.render_path(params)?);

        debug!(operation = ?operation, url = %url, "Dispatching API request");

        let mut request = self
            .http
            .request(endpoint.method.clone(), &url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.bearer_token),
            )
            .header(USER_AGENT, &self.config.user_agent);

        if matches!(endpoint.method, Method::POST | Method::PUT) {
            if let Some(payload) = payload {
                request = request.json(payload);
            }
        }

        Ok(request.send().await?)
    }

    // ------------------------------------------------------------------
    // Auth flows. These run before or outside the record operation set,
    // so they dispatch on fixed paths rather than through `Operation`.
    // ------------------------------------------------------------------

    pub async fn login(&self, request: &AuthRequest) -> Result<OAuthResponse, ClientError> {
        self.post_json("/auth/login", request).await
    }

    pub async fn login_mobile(&self, request: &AuthRequest) -> Result<OAuthResponse, ClientError> {
        self.post_json("/auth/mobile", request).await
    }

    pub async fn refresh(&self, request: &RefreshRequest) -> Result<OAuthResponse, ClientError> {
        self.post_json("/auth/refresh", request).await
    }

    // ------------------------------------------------------------------
    // Typed record operations
    // ------------------------------------------------------------------

    pub async fn create_record(&self, draft: &RecordDraft) -> Result<Record, ClientError> {
        let response = self
            .request(Operation::CreateRecord, Some(draft), &HashMap::new())
            .await?;
        Self::decode(response).await
    }

    pub async fn remove_records(&self, ids: &[i64]) -> Result<RemovedResponse, ClientError> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let params = HashMap::from([("ids".to_string(), joined)]);

        let response = self
            .request::<()>(Operation::RemoveRecord, None, &params)
            .await?;
        Self::decode(response).await
    }

    pub async fn update_record(
        &self,
        id: i64,
        draft: &RecordDraft,
    ) -> Result<Record, ClientError> {
        let params = HashMap::from([("id".to_string(), id.to_string())]);

        let response = self
            .request(Operation::UpdateRecord, Some(draft), &params)
            .await?;
        Self::decode(response).await
    }

    pub async fn list_records(&self, offset: i64, limit: i64) -> Result<RecordPage, ClientError> {
        let params = HashMap::from([
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.to_string()),
        ]);

        let response = self
            .request::<()>(Operation::ListRecords, None, &params)
            .await?;
        Self::decode(response).await
    }

    pub async fn search_records(&self, keyword: &str) -> Result<Vec<Record>, ClientError> {
        let params = HashMap::from([("keyword".to_string(), keyword.to_string())]);

        let response = self
            .request::<()>(Operation::SearchRecords, None, &params)
            .await?;
        Self::decode(response).await
    }

    async fn post_json<P, T>(&self, path: &str, payload: &P) -> Result<T, ClientError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .http
            .post(&url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.bearer_token),
            )
            .header(USER_AGENT, &self.config.user_agent)
            .json(payload)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus(status));
        }
        Ok(response.json::<T>().await?)
    }
}
