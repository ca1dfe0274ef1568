//! reqwest-backed [`StatusApi`].

use async_trait::async_trait;
use common::{EnvironmentReply, StatusReply};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::StatusApi;
use crate::error::{ClientError, ClientResult};

/// Queries a running status service over HTTP.
///
/// No timeout is configured; requests run until the transport gives up.
#[derive(Debug, Clone)]
pub struct HttpStatusApi {
    base_url: Url,
    client: Client,
}

impl HttpStatusApi {
    /// Creates a client for the service at `api_url` (e.g. `http://localhost:5000`).
    pub fn new(api_url: &str) -> ClientResult<Self> {
        Self::with_client(api_url, Client::new())
    }

    /// Creates a client using a preconfigured reqwest [`Client`].
    pub fn with_client(api_url: &str, client: Client) -> ClientResult<Self> {
        let mut base_url = Url::parse(api_url)?;
        // Routes are joined relative to the base, so keep any path prefix.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a route such as `/api/test` against the base URL.
    pub fn endpoint(&self, route: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(route.trim_start_matches('/'))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> ClientResult<T> {
        let url = self.endpoint(route)?;
        tracing::debug!(%url, "querying status service");

        let response = self.client.get(url).send().await.map_err(|err| {
            if err.is_connect() {
                ClientError::Unavailable(err.to_string())
            } else {
                ClientError::Request(err)
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // Decoded separately so a bad body is told apart from a bad transport.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl StatusApi for HttpStatusApi {
    async fn fetch_status(&self) -> ClientResult<StatusReply> {
        self.get_json(common::STATUS_PATH).await
    }

    async fn fetch_environment(&self) -> ClientResult<EnvironmentReply> {
        self.get_json(common::ENVIRONMENT_PATH).await
    }
}
