//! Panorama image fetching
//!
//! Photo URLs are already rewritten onto same-origin proxy paths
//! (`/api/...`, `/s3-proxy/...`), so the HTTP fetcher resolves them against
//! the API origin before downloading.

use crate::config::Config;
use crate::constants::api::SKIP_BROWSER_WARNING_HEADER;
use crate::error::{Error, Result};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Downloaded image bytes, owned by the viewer while displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub source: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Source of panorama image bytes
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<ImageBlob>> + Send;
}

/// reqwest-backed fetcher resolving relative URLs against the API origin
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    origin: Url,
}

impl HttpImageFetcher {
    pub fn new(origin: &str, timeout: Duration) -> Result<Self> {
        let origin = Url::parse(origin)
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", origin, e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, origin })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api.base_url, config.timeout())
    }

    /// Absolute URL for a photo URL
    pub fn resolve(&self, url: &str) -> Result<Url> {
        self.origin
            .join(url)
            .map_err(|e| Error::Viewer(format!("Invalid image URL '{}': {}", url, e)))
    }
}

impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<ImageBlob> {
        let resolved = self.resolve(url)?;
        debug!("Fetching panorama image: {}", resolved);

        let response = self
            .client
            .get(resolved)
            .header(SKIP_BROWSER_WARNING_HEADER, "true")
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Image request for {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "Image {} returned status: {}",
                url,
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read image {}: {}", url, e)))?;

        // Tunnels answer with an HTML interstitial instead of the image
        if content_type.as_deref().is_some_and(|ct| ct.starts_with("text/html")) {
            return Err(Error::malformed(
                "expected image data",
                &String::from_utf8_lossy(&bytes),
            ));
        }

        Ok(ImageBlob {
            source: url.to_string(),
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory image source for viewer tests

    use super::{ImageBlob, ImageFetcher};
    use crate::error::{Error, Result};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct StaticImages {
        failing: Vec<String>,
        fetched: Mutex<Vec<String>>,
    }

    impl StaticImages {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail every fetch of `url`
        pub fn with_failure(mut self, url: &str) -> Self {
            self.failing.push(url.to_string());
            self
        }

        pub fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    impl ImageFetcher for StaticImages {
        async fn fetch(&self, url: &str) -> Result<ImageBlob> {
            self.fetched.lock().unwrap().push(url.to_string());
            if self.failing.iter().any(|u| u == url) {
                return Err(Error::Transport(format!("Image {} returned status: 404", url)));
            }
            Ok(ImageBlob::new(url, vec![0xFF, 0xD8, 0xFF]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_proxy_paths_against_origin() {
        let fetcher =
            HttpImageFetcher::new("http://localhost:3000/api", Duration::from_secs(5)).unwrap();

        assert_eq!(
            fetcher.resolve("/api/photos/a.jpg").unwrap().as_str(),
            "http://localhost:3000/api/photos/a.jpg"
        );
        assert_eq!(
            fetcher.resolve("/s3-proxy/g/b.jpg").unwrap().as_str(),
            "http://localhost:3000/s3-proxy/g/b.jpg"
        );
        assert_eq!(
            fetcher.resolve("https://via.placeholder.com/800x400").unwrap().as_str(),
            "https://via.placeholder.com/800x400"
        );
    }

    #[test]
    fn test_invalid_origin() {
        let result = HttpImageFetcher::new("not a url", Duration::from_secs(5));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    #[ignore = "Requires network access to a running photo backend"]
    async fn test_fetch_from_local_backend() {
        let fetcher =
            HttpImageFetcher::new("http://localhost:3000/api", Duration::from_secs(5)).unwrap();
        let blob = fetcher.fetch("/api/photos/sample.jpg").await.unwrap();
        assert!(!blob.is_empty());
    }
}
