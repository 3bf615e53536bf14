use crate::domain::ports::DocumentSource;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Chrome-like headers; several of the investor sites sit behind CDNs
/// that 403 plain library user agents.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "User-Agent",
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
             AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/124.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        "Accept",
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert("Accept-Language", HeaderValue::from_static("en-GB,en;q=0.9"));
    headers.insert("Cache-Control", HeaderValue::from_static("no-cache"));
    headers.insert("Pragma", HeaderValue::from_static("no-cache"));
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("document"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("navigate"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("none"));
    headers.insert("Sec-Fetch-User", HeaderValue::from_static("?1"));
    headers
}

/// The Robert Walters site caches listing pages aggressively.
pub fn cache_busted(url: &str) -> String {
    if url.contains("robertwaltersplc.com") && !url.contains("nocache") {
        if url.contains('?') {
            format!("{}&nocache=1", url)
        } else {
            format!("{}?nocache=1", url)
        }
    } else {
        url.to_string()
    }
}

/// Production `DocumentSource`. HTML fetches walk a two-client ladder:
/// the default client first, then one pinned to HTTP/1.1 and TLS 1.2 for
/// hosts running old TLS stacks.
pub struct HttpSource {
    primary: Client,
    legacy_tls: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let primary = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()?;

        let legacy_tls = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .http1_only()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .max_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()?;

        Ok(Self {
            primary,
            legacy_tls,
        })
    }

    fn clients(&self) -> [(&'static str, &Client); 2] {
        [("primary", &self.primary), ("legacy-tls", &self.legacy_tls)]
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let mut last_error = String::new();

        for (label, client) in self.clients() {
            tracing::debug!("GET {} via {} client", url, label);
            let attempt = async {
                let response = client.get(url).send().await?;
                tracing::debug!("{} responded {}", url, response.status());
                let response = response.error_for_status()?;
                response.text().await
            };
            match attempt.await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::debug!("{} client failed for {}: {}", label, url, e);
                    last_error = e.to_string();
                }
            }
        }

        Err(ApiError::Network {
            url: url.to_string(),
            message: last_error,
        })
    }

    async fn fetch_pdf(&self, url: &str) -> Result<Vec<u8>> {
        let response =
            self.primary
                .get(url)
                .send()
                .await
                .map_err(|e| ApiError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();
        if !content_type.contains("pdf") && !url.to_lowercase().ends_with(".pdf") {
            return Err(ApiError::NotAPdf);
        }

        let bytes = response.bytes().await.map_err(|e| ApiError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!("downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
