use std::time::Duration;

use reqwest::Client;
use url::Url;

use dsd_stats::Snapshot;
use dsd_types::Dataset;

use crate::{clients::http_client, error::ClientError, traits::SnapshotSource};

/// Client of the static snapshot API (`<base_url>/DSD-DAO.json`, ...).
pub struct SnapshotApiClient {
    http_client: Client,
    base_url: Url,
}

impl SnapshotApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        // `Url::join` replaces the last segment unless the base ends with a slash
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };

        Ok(Self {
            http_client: http_client(timeout)?,
            base_url,
        })
    }

    pub fn snapshot_url(&self, dataset: Dataset) -> Result<Url, ClientError> {
        Ok(self.base_url.join(dataset.file_name())?)
    }
}

#[async_trait::async_trait]
impl SnapshotSource for SnapshotApiClient {
    async fn fetch_snapshot(&self, dataset: Dataset) -> Result<Snapshot, ClientError> {
        let url = self.snapshot_url(dataset)?;
        tracing::debug!(%dataset, %url, "fetching snapshot");

        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.json::<Snapshot>().await?;
        Ok(body)
    }
}
