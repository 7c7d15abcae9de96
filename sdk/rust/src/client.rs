//! Async client for the purchase order node API.

use std::collections::BTreeMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
    pub me: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peers {
    pub peers: Vec<String>,
}

/// Response of the create endpoint. The proposal is returned as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal: Value,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("node returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid node url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// HTTP status, when the node answered with an error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub struct NodeClient {
    client: Client,
    base_url: String,
}

impl NodeClient {
    /// `base_url` is the node root, e.g. `http://localhost:10007` or `http://host/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn me(&self) -> Result<WhoAmI, ClientError> {
        let resp = self.client.get(self.url(&["example", "me"])?).send().await?;
        decode(resp).await
    }

    pub async fn peers(&self) -> Result<Peers, ClientError> {
        let resp = self.client.get(self.url(&["example", "peers"])?).send().await?;
        decode(resp).await
    }

    /// Vault contents keyed by linear id.
    pub async fn purchase_orders(&self) -> Result<BTreeMap<String, Value>, ClientError> {
        let resp = self.client.get(self.url(&["example", "purchase-orders"])?).send().await?;
        decode(resp).await
    }

    /// Ask the node to build a proposal with `party` as seller. `body` is ignored by the node.
    pub async fn create_purchase_order(
        &self,
        party: &str,
        body: impl Into<reqwest::Body>,
    ) -> Result<Proposal, ClientError> {
        let resp = self
            .client
            .put(self.url(&["example", party, "create-purchase-order"])?)
            .body(body)
            .send()
            .await?;
        decode(resp).await
    }

    /// Base URL with `segments` appended, each percent-encoded as a single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}
