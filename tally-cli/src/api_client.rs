use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use tally_core::agent_registry::Agent;
use tally_core::expression_store::ExpressionRecord;
use tally_http::models::{
    ListAgentsResponse, ListExpressionsResponse, RegisterAgentRequest, SubmitExpressionRequest,
    SubmitExpressionResponse,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Thin HTTP client for the coordinator API.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit an expression for asynchronous evaluation.
    pub async fn submit_expression(&self, expr: &str) -> ApiResult<SubmitExpressionResponse> {
        let url = format!("{}/compute", self.base_url);
        let request = SubmitExpressionRequest {
            expr: expr.to_string(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        Self::parse(response).await
    }

    /// Fetch the current record of an expression, whatever its status.
    pub async fn get_status(&self, task_id: &str) -> ApiResult<ExpressionRecord> {
        let url = format!("{}/status", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("task_id", task_id)])
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Fetch the final record of an expression. The coordinator rejects
    /// this until the expression has finished.
    pub async fn get_result(&self, task_id: &str) -> ApiResult<ExpressionRecord> {
        let url = format!("{}/result", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("task_id", task_id)])
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn list_expressions(&self) -> ApiResult<ListExpressionsResponse> {
        let url = format!("{}/expressions", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::parse(response).await
    }

    pub async fn register_agent(&self, id: &str, address: &str) -> ApiResult<Agent> {
        let url = format!("{}/agents/register", self.base_url);
        let request = RegisterAgentRequest {
            id: id.to_string(),
            address: address.to_string(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        Self::parse(response).await
    }

    pub async fn list_agents(&self) -> ApiResult<ListAgentsResponse> {
        let url = format!("{}/agents", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::parse(response).await
    }

    pub async fn health_check(&self) -> ApiResult<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Api {
                status,
                message: response.text().await.unwrap_or_default(),
            })
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Api { status, message })
        }
    }
}
