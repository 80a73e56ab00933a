// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{GatewayResult, LedgerGateway, UpdateReply};
use crate::error::GatewayError;
use crate::models::{Record, RecordKind};
use crate::session::Session;

/// REST gateway: `POST /api/{kind}`, `GET /api/{kind}/all`,
/// `GET|PUT|DELETE /api/{kind}/{id}`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: String,
    session: Session,
}

impl HttpGateway {
    pub fn new(client: Client, base_url: &str, kind: RecordKind, session: Session) -> Self {
        let endpoint = format!("{}/api/{}", base_url.trim_end_matches('/'), kind.as_str());
        Self {
            client,
            endpoint,
            session,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url_for(&self, id: i64) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    async fn send(&self, req: RequestBuilder) -> GatewayResult<Response> {
        let req = match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await.map_err(classify_transport)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let url = resp.url().to_string();
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(%status, %url, "ledger request rejected");
        Err(classify_status(status, &url, &body))
    }

    async fn body_text(resp: Response) -> GatewayResult<String> {
        resp.text().await.map_err(classify_transport)
    }

    async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> GatewayResult<T> {
        let text = Self::body_text(resp).await?;
        serde_json::from_str(&text)
            .map_err(|e| GatewayError::server(format!("Malformed {} response: {}", what, e)))
    }
}

#[async_trait]
impl LedgerGateway for HttpGateway {
    async fn list(&self) -> GatewayResult<Vec<Record>> {
        let url = format!("{}/all", self.endpoint);
        tracing::debug!(%url, "GET");
        let resp = self.send(self.client.get(&url)).await?;
        Self::decode(resp, "listing").await
    }

    async fn get(&self, id: i64) -> GatewayResult<Record> {
        let url = self.url_for(id);
        tracing::debug!(%url, "GET");
        let resp = self.send(self.client.get(&url)).await?;
        Self::decode(resp, "record").await
    }

    async fn create(&self, candidate: &Record) -> GatewayResult<Record> {
        tracing::debug!(url = %self.endpoint, title = %candidate.title, "POST");
        let resp = self
            .send(self.client.post(&self.endpoint).json(candidate))
            .await?;
        Self::decode(resp, "create").await
    }

    async fn update(&self, id: i64, value: &Record) -> GatewayResult<UpdateReply> {
        let url = self.url_for(id);
        tracing::debug!(%url, "PUT");
        let resp = self.send(self.client.put(&url).json(value)).await?;
        // Some backends answer PUT with plain text or nothing at all. The
        // status already says the write was accepted, so an unreadable body
        // is an acknowledgement without content, not a failure.
        let text = resp.text().await.unwrap_or_else(|e| {
            tracing::warn!(%url, error = %e, "unreadable PUT body after success");
            String::new()
        });
        Ok(UpdateReply::from_body(&text))
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        let url = self.url_for(id);
        tracing::debug!(%url, "DELETE");
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

pub fn classify_status(status: StatusCode, url: &str, body: &str) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
        StatusCode::FORBIDDEN => GatewayError::Forbidden,
        StatusCode::NOT_FOUND => GatewayError::NotFound(url.to_string()),
        other => {
            let body = body.trim();
            let message = if body.is_empty() {
                other
                    .canonical_reason()
                    .unwrap_or("Server error occurred")
                    .to_string()
            } else {
                body.to_string()
            };
            GatewayError::ServerError {
                status: other.as_u16(),
                message,
            }
        }
    }
}

fn classify_transport(e: reqwest::Error) -> GatewayError {
    if e.is_connect() || e.is_timeout() || e.is_request() {
        return GatewayError::Unreachable(e.to_string());
    }
    match e.status() {
        Some(status) => classify_status(status, "", &e.to_string()),
        None => GatewayError::server(e.to_string()),
    }
}
