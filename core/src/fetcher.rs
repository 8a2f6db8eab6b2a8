use anyhow::Context;
use log::{debug, warn};
use reqwest::{Client, ClientBuilder};

use crate::api::{search_payload, ApiConfig, GraphQlResponse, HacktivityNode, SearchPage};

/// Largest page the search index will return.
pub const PAGE_SIZE: usize = 100;

/// Pages through hacktivity search one request at a time.
///
/// No retries and no timeout beyond the client default: the first failing
/// page aborts the whole fetch and nothing fetched so far is returned.
pub struct ReportFetcher {
    inner: Client,
    config: ApiConfig,
}

impl ReportFetcher {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let inner = ClientBuilder::new()
            .default_headers(config.header_map())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { inner, config })
    }

    /// Fetches up to `target` nodes, newest disclosure activity first.
    ///
    /// Stops after a page shorter than requested; the server's `total_count`
    /// is only used for diagnostics.
    pub async fn fetch(&self, category: &str, target: usize) -> anyhow::Result<Vec<HacktivityNode>> {
        let mut nodes: Vec<HacktivityNode> = Vec::with_capacity(target);
        let mut total_count = None;

        for from in (0..target).step_by(PAGE_SIZE) {
            let size = PAGE_SIZE.min(target - from);
            let page = self.fetch_page(category, from, size).await?;
            let received = page.nodes.len();
            total_count = page.total_count.or(total_count);

            debug!(
                "page from={} size={} returned {} node(s) (total_count={:?})",
                from, size, received, page.total_count
            );

            nodes.extend(page.nodes);
            if received < size {
                break;
            }
        }

        nodes.truncate(target);

        if let Some(total) = total_count {
            let total = usize::try_from(total).unwrap_or(usize::MAX);
            if nodes.len() < target && nodes.len() < total {
                warn!(
                    "search reported {} match(es) but only {} were returned",
                    total,
                    nodes.len()
                );
            }
        }

        Ok(nodes)
    }

    /// Requests a single page of `size` nodes starting at `from`.
    pub async fn fetch_page(&self, category: &str, from: usize, size: usize) -> anyhow::Result<SearchPage> {
        let payload = search_payload(category, from, size);

        let response = self
            .inner
            .post(self.config.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.config.endpoint))?
            .error_for_status()
            .context("search API returned an error status")?;

        let body: GraphQlResponse = response
            .json()
            .await
            .context("malformed search API response")?;

        body.into_page()
    }
}
