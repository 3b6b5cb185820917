//! Record source: read-only, paginated access to the Blitnauts subgraph.
//!
//! [`RecordSource`] is the seam the driver depends on. [`SubgraphClient`] is the
//! production implementation, speaking GraphQL over HTTP POST.
//!
//! Pagination in [`RecordSource::get_all`] stops only when a page comes back
//! empty. A short final page therefore still costs one more request.

mod queries;

use crate::config::SubgraphConfig;
use crate::error::{Error, Result};
use crate::types::{Blitnaut, BlitnautId};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

/// Read-only access to the Blitnaut collection
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch one Blitnaut by numeric id
    ///
    /// Returns `Ok(None)` when the backend has no matching record.
    async fn get_by_id(&self, id: BlitnautId) -> Result<Option<Blitnaut>>;

    /// Fetch every Blitnaut with a numeric id strictly greater than `cursor`,
    /// ascending by id
    ///
    /// Issued as a single request. If the backend caps result size, records
    /// past the cap are not returned.
    async fn get_after_id(&self, cursor: BlitnautId) -> Result<Vec<Blitnaut>>;

    /// Fetch the whole collection, page by page, in backend order
    async fn get_all(&self) -> Result<Vec<Blitnaut>>;
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SingleData {
    blitnaut: Option<Blitnaut>,
}

#[derive(Debug, Deserialize)]
struct ListData {
    blitnauts: Vec<Blitnaut>,
}

/// [`RecordSource`] backed by the subgraph's GraphQL endpoint
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    http_client: reqwest::Client,
    url: String,
    page_size: u32,
}

impl SubgraphClient {
    /// Create a client for the configured endpoint
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &SubgraphConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("blitnaut-dl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(http_client, config))
    }

    /// Create a client sharing an existing `reqwest::Client`
    pub fn with_client(http_client: reqwest::Client, config: &SubgraphConfig) -> Self {
        Self {
            http_client,
            url: config.url.clone(),
            page_size: config.page_size,
        }
    }

    /// Records requested per page by [`RecordSource::get_all`]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Run one query and unwrap its `data`
    ///
    /// Any entry in `errors` fails the call, even alongside partial data.
    async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        let envelope: GraphQlResponse<T> = serde_json::from_slice(&body)?;

        // `errors: null` and `errors: []` both mean success
        if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQl(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| Error::GraphQl("response contained no data".to_string()))
    }
}

#[async_trait]
impl RecordSource for SubgraphClient {
    async fn get_by_id(&self, id: BlitnautId) -> Result<Option<Blitnaut>> {
        let data: SingleData = self
            .request(queries::GET_BY_ID, json!({ "blitnautId": id.get() }))
            .await?;
        Ok(data.blitnaut)
    }

    async fn get_after_id(&self, cursor: BlitnautId) -> Result<Vec<Blitnaut>> {
        let data: ListData = self
            .request(
                queries::GET_AFTER_ID,
                json!({ "mostRecentBlitnautId": cursor.get() }),
            )
            .await?;
        debug!(
            cursor = cursor.get(),
            returned = data.blitnauts.len(),
            "fetched blitnauts after cursor"
        );
        Ok(data.blitnauts)
    }

    async fn get_all(&self) -> Result<Vec<Blitnaut>> {
        let mut blitnauts = Vec::new();
        let mut skip: u64 = 0;

        loop {
            let page: ListData = self
                .request(
                    queries::GET_PAGE,
                    json!({ "first": self.page_size, "skip": skip }),
                )
                .await?;

            debug!(
                skip,
                first = self.page_size,
                returned = page.blitnauts.len(),
                "fetched page"
            );

            if page.blitnauts.is_empty() {
                return Ok(blitnauts);
            }

            blitnauts.extend(page.blitnauts);
            skip += u64::from(self.page_size);
        }
    }
}
