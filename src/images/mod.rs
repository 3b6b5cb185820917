//! Image cache: mirrors one PNG per Blitnaut into a local directory.
//!
//! A file at `{output_dir}/{numeric_id}.png` is taken as proof of an earlier
//! successful download. Contents are never inspected, refreshed or removed.

use crate::config::ImageConfig;
use crate::error::{Error, Result};
use crate::types::{BlitnautId, FetchOutcome};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Fetches Blitnaut images into the output directory, skipping ones already present
#[derive(Debug, Clone)]
pub struct ImageCache {
    http_client: reqwest::Client,
    base_url: String,
    output_dir: PathBuf,
}

impl ImageCache {
    /// Create an image cache for the configured endpoint and directory
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &ImageConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("blitnaut-dl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(http_client, config))
    }

    /// Create an image cache sharing an existing `reqwest::Client`
    pub fn with_client(http_client: reqwest::Client, config: &ImageConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            output_dir: config.output_dir.clone(),
        }
    }

    /// Directory images are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it does not exist yet
    ///
    /// Safe to call repeatedly.
    pub async fn ensure_output_dir(&self) -> Result<()> {
        if !tokio::fs::try_exists(&self.output_dir).await? {
            tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create output directory '{}': {}",
                        self.output_dir.display(),
                        e
                    ),
                ))
            })?;
        }
        Ok(())
    }

    /// Path of the image for `id`: `{output_dir}/{id}.png`
    #[must_use]
    pub fn image_path(&self, id: BlitnautId) -> PathBuf {
        self.output_dir.join(format!("{}.png", id))
    }

    /// URL the image for `id` is fetched from: `{base_url}/{id}`
    #[must_use]
    pub fn image_url(&self, id: BlitnautId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Whether an image for `id` is already on disk
    pub async fn image_exists(&self, id: BlitnautId) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.image_path(id)).await?)
    }

    /// Download the image for `id` unless it is already cached
    ///
    /// The body is streamed into the destination file, which is only created
    /// once the endpoint has answered with a success status. If the stream
    /// fails midway the partial file is left behind.
    ///
    /// # Errors
    /// Returns error on transport failure, a non-success status, or a failed
    /// write. No retry is attempted.
    pub async fn fetch_and_save(&self, id: BlitnautId) -> Result<FetchOutcome> {
        if self.image_exists(id).await? {
            info!(blitnaut_id = id.get(), "already have image, skipping");
            return Ok(FetchOutcome::Skipped);
        }

        let url = self.image_url(id);
        let mut response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url,
            });
        }

        let path = self.image_path(id);
        let mut file = tokio::fs::File::create(&path).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create image file '{}': {}", path.display(), e),
            ))
        })?;

        let mut bytes: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }
        file.flush().await?;

        info!(blitnaut_id = id.get(), bytes, path = %path.display(), "image saved");
        Ok(FetchOutcome::Saved { bytes })
    }

    /// Fetch every id concurrently and wait for all of them
    ///
    /// All downloads are driven together on the calling task, with no cap on
    /// how many are in flight. The first failure is returned immediately and
    /// the remaining downloads are dropped where they stand; files finished
    /// before that point stay on disk.
    pub async fn download_all<I>(&self, ids: I) -> Result<Vec<FetchOutcome>>
    where
        I: IntoIterator<Item = BlitnautId>,
    {
        try_join_all(ids.into_iter().map(|id| self.fetch_and_save(id))).await
    }
}
