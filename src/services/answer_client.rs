// src/services/answer_client.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    error::{AppError, AskError},
    message::{AnswerResponse, AskRequest},
};

/// Anything that can turn a query into an answer.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, query: &str) -> Result<AnswerResponse, AskError>;
}

/// Posts `{"query": ...}` to the answer endpoint and decodes `{"answer": ...}`.
#[derive(Clone, Debug)]
pub struct HttpAnswerClient {
    client: Client,
    endpoint: Url,
}

impl HttpAnswerClient {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AppError::Client)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerService for HttpAnswerClient {
    async fn ask(&self, query: &str) -> Result<AnswerResponse, AskError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&AskRequest::new(query))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AskError::Status(status));
        }

        // Decode by hand so a bad body is a Decode error, not a Transport one.
        let body = resp.bytes().await?;
        let answer: AnswerResponse = serde_json::from_slice(&body)?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "answer received");
        Ok(answer)
    }
}
