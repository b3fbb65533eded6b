//! Image URL rewriting onto same-origin proxy paths
//!
//! Rules:
//! - tunnel host (`*.ngrok-free.app`) → `/api{path}{query}`
//! - object storage host (`*.s3.us-east-2.amazonaws.com`) → `/s3-proxy{path}{query}`
//! - any other absolute URL is left alone
//! - relative paths get `/api` prefixed unless already under `/api` or `/assets`

use crate::constants::api::{
    API_PROXY_PREFIX, ASSETS_PREFIX, OBJECT_STORAGE_HOST, S3_PROXY_PREFIX, TUNNEL_HOST,
};
use reqwest::Url;
use tracing::debug;

/// Rewrite an image URL so the browser loads it through the proxy
pub fn rewrite_image_url(url: &str) -> String {
    let rewritten = match Url::parse(url) {
        Ok(parsed) => match proxy_prefix(&parsed) {
            Some(prefix) => format!("{}{}{}", prefix, parsed.path(), query_suffix(&parsed)),
            None => url.to_string(),
        },
        Err(_) => prefix_relative(url),
    };

    if rewritten != url {
        debug!("Rewrote image URL for proxy: {} -> {}", url, rewritten);
    }
    rewritten
}

/// Proxy prefix for an absolute URL on a known external origin
fn proxy_prefix(url: &Url) -> Option<&'static str> {
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;

    if host_matches(host, TUNNEL_HOST) {
        Some(API_PROXY_PREFIX)
    } else if host_matches(host, OBJECT_STORAGE_HOST) {
        Some(S3_PROXY_PREFIX)
    } else {
        None
    }
}

/// `host` is `domain` itself or one of its subdomains
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|rest| rest.ends_with('.'))
}

fn query_suffix(url: &Url) -> String {
    url.query().map(|q| format!("?{}", q)).unwrap_or_default()
}

fn prefix_relative(path: &str) -> String {
    if path.starts_with(API_PROXY_PREFIX) || path.starts_with(ASSETS_PREFIX) {
        return path.to_string();
    }

    let separator = if path.starts_with('/') { "" } else { "/" };
    format!("{}{}{}", API_PROXY_PREFIX, separator, path)
}
