//! Search clients for the photo and house endpoints
//!
//! Both clients share the same flow: build the query, fetch the body as
//! text through an `ApiTransport`, parse and shape-check the JSON, map items
//! into records and post-filter them by distance from the query center.
//!
//! ## Flex Point
//! The transport is a trait so the clients can run against the real backend
//! (`HttpTransport`) or an in-memory double in tests.

pub mod houses;
pub mod photos;
pub mod proxy;
pub mod response;

pub use houses::HouseSearch;
pub use photos::PhotoSearch;

use crate::config::Config;
use crate::constants::api::SKIP_BROWSER_WARNING_HEADER;
use crate::error::{Error, Result};
use crate::model::Coordinates;
use std::time::Duration;
use tracing::debug;

/// Something that can GET a path below the API root and hand back the body
pub trait ApiTransport: Send + Sync {
    /// GET `path` with the given query pairs and return the raw body text
    ///
    /// Network failures and non-success statuses are `Error::Transport`.
    fn get_text(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// reqwest-backed transport against the configured API root
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` (e.g. `http://localhost:3000/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a transport from the `[api]` config section
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api.base_url.clone(), config.timeout())
    }

    /// Full request URL for a path and query
    fn endpoint(&self, path: &str, query: &[(&'static str, String)]) -> String {
        let query_string = query
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if query_string.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query_string)
        }
    }
}

impl ApiTransport for HttpTransport {
    async fn get_text(&self, path: &str, query: &[(&'static str, String)]) -> Result<String> {
        let url = self.endpoint(path, query);
        debug!("API call: {}", url);

        let response = self
            .client
            .get(&url)
            .header(SKIP_BROWSER_WARNING_HEADER, "true")
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Request to {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "{} returned status: {}",
                path,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read {} response: {}", path, e)))
    }
}

/// Lets the photo and house clients share one transport
impl<T: ApiTransport> ApiTransport for std::sync::Arc<T> {
    fn get_text(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> impl std::future::Future<Output = Result<String>> + Send {
        (**self).get_text(path, query)
    }
}

/// Query parameters for a search around `center`
///
/// The radius falls back to `default_radius` when the center carries none.
pub(crate) fn search_params(
    center: &Coordinates,
    default_radius: f64,
) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", center.latitude.to_string()),
        ("longitude", center.longitude.to_string()),
        ("radius", center.radius.unwrap_or(default_radius).to_string()),
    ]
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for search and explorer tests

    use super::ApiTransport;
    use crate::error::{Error, Result};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned answer for one path
    #[derive(Debug, Clone)]
    pub enum Canned {
        Body(String),
        Fail(String),
    }

    /// Transport that answers from a path → response table and records calls
    #[derive(Debug, Default)]
    pub struct StaticTransport {
        responses: HashMap<String, Canned>,
        calls: Mutex<Vec<(String, Vec<(&'static str, String)>)>>,
    }

    impl StaticTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_body(mut self, path: &str, body: impl Into<String>) -> Self {
            self.responses
                .insert(path.to_string(), Canned::Body(body.into()));
            self
        }

        pub fn with_failure(mut self, path: &str, message: &str) -> Self {
            self.responses
                .insert(path.to_string(), Canned::Fail(message.to_string()));
            self
        }

        pub fn calls(&self) -> Vec<(String, Vec<(&'static str, String)>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ApiTransport for StaticTransport {
        async fn get_text(&self, path: &str, query: &[(&'static str, String)]) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), query.to_vec()));

            match self.responses.get(path) {
                Some(Canned::Body(body)) => Ok(body.clone()),
                Some(Canned::Fail(message)) => Err(Error::Transport(message.clone())),
                None => Err(Error::Transport(format!("{} returned status: 404", path))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_default_radius() {
        let params = search_params(&Coordinates::new(40.4406, -79.9959), 10_000.0);
        assert_eq!(
            params,
            vec![
                ("latitude", "40.4406".to_string()),
                ("longitude", "-79.9959".to_string()),
                ("radius", "10000".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_explicit_radius() {
        let center = Coordinates::new(1.0, 2.0).with_radius(250.0);
        let params = search_params(&center, 10_000.0);
        assert_eq!(params[2], ("radius", "250".to_string()));
    }

    #[test]
    fn test_endpoint_building() {
        let transport =
            HttpTransport::new("http://localhost:3000/api/", Duration::from_secs(1)).unwrap();
        let url = transport.endpoint(
            "/photos",
            &[("latitude", "40.5".to_string()), ("longitude", "-79.9".to_string())],
        );
        assert_eq!(url, "http://localhost:3000/api/photos?latitude=40.5&longitude=-79.9");
        assert_eq!(transport.endpoint("/houses", &[]), "http://localhost:3000/api/houses");
    }

    #[test]
    fn test_from_config() {
        let transport = HttpTransport::from_config(&Config::default()).unwrap();
        assert_eq!(transport.base_url, "http://localhost:3000/api");
    }
}
