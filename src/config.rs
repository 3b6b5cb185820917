//! Configuration types for blitnaut-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Subgraph (record source) settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphConfig {
    /// GraphQL endpoint URL
    #[serde(default = "default_subgraph_url")]
    pub url: String,

    /// Records requested per page when enumerating everything (default: 1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            url: default_subgraph_url(),
            page_size: default_page_size(),
        }
    }
}

/// Image endpoint and on-disk cache settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Base URL; images are fetched from `{base_url}/{numeric_id}`
    #[serde(default = "default_image_base_url")]
    pub base_url: String,

    /// Directory holding `{numeric_id}.png` files (default: "blitnaut_images")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base_url(),
            output_dir: default_output_dir(),
        }
    }
}

/// Main configuration, passed to [`SubgraphClient`](crate::subgraph::SubgraphClient)
/// and [`ImageCache`](crate::images::ImageCache) at construction
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Record source settings
    #[serde(default)]
    pub subgraph: SubgraphConfig,

    /// Image fetcher settings
    #[serde(default)]
    pub images: ImageConfig,
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults. The result is not validated;
    /// call [`Config::validate`] before use.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Check that endpoints are usable http(s) URLs and the page size is non-zero
    pub fn validate(&self) -> Result<()> {
        validate_http_url("subgraph.url", &self.subgraph.url)?;
        validate_http_url("images.base_url", &self.images.base_url)?;

        if self.subgraph.page_size == 0 {
            return Err(Error::config(
                "subgraph.page_size",
                "page size must be greater than zero",
            ));
        }

        if self.images.output_dir.as_os_str().is_empty() {
            return Err(Error::config(
                "images.output_dir",
                "output directory must not be empty",
            ));
        }

        Ok(())
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| Error::config(key, format!("invalid URL '{}': {}", value, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::config(
            key,
            format!("unsupported URL scheme '{}' in '{}'", other, value),
        )),
    }
}

fn default_subgraph_url() -> String {
    "https://api.thegraph.com/subgraphs/name/knav-eth/blitnauts".to_string()
}

fn default_page_size() -> u32 {
    1000
}

fn default_image_base_url() -> String {
    "https://blitnauts.blitmap.com/api/v1/img".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("blitnaut_images")
}
