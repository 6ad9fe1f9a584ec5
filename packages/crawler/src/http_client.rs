//! Blocking HTTP GET with capped, cycle-checked redirect following.
//!
//! The underlying `reqwest` client disables its own redirect policy so
//! every hop is followed here, where it can be checked against the list
//! of URLs already visited in this chain and capped at `MAX_REDIRECTS`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use search_core::NetworkError;

const MAX_REDIRECTS: u32 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Self {
        let timeout = Duration::from_secs(if timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        });
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .expect("static reqwest client config is always valid");
        Self { client, timeout }
    }

    /// Fetches `url`, following up to `MAX_REDIRECTS` redirects manually.
    /// Returns the final response body, or a `NetworkError` if the fetch
    /// times out, fails outright, cycles, or exceeds the redirect cap.
    pub fn get(&self, url: &str) -> Result<String, NetworkError> {
        self.get_with_history(url, &mut Vec::new(), 0)
    }

    fn get_with_history(
        &self,
        url: &str,
        visited: &mut Vec<String>,
        redirect_count: u32,
    ) -> Result<String, NetworkError> {
        if redirect_count >= MAX_REDIRECTS {
            return Err(NetworkError::TooManyRedirects {
                url: url.to_string(),
                count: redirect_count,
            });
        }
        if visited.iter().any(|seen| seen == url) {
            return Err(NetworkError::TooManyRedirects {
                url: url.to_string(),
                count: redirect_count,
            });
        }
        visited.push(url.to_string());

        let response = self.client.get(url).send().map_err(|source| {
            if source.is_timeout() {
                NetworkError::Timeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                NetworkError::Request {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        let status = response.status();

        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let Some(location) = location else {
                return response.text().map_err(|source| NetworkError::Request {
                    url: url.to_string(),
                    source,
                });
            };

            let redirect_url = resolve_redirect_target(url, &location);
            return self.get_with_history(&redirect_url, visited, redirect_count + 1);
        }

        if status == StatusCode::OK || status.is_success() {
            return response.text().map_err(|source| NetworkError::Request {
                url: url.to_string(),
                source,
            });
        }

        Err(NetworkError::Request {
            url: url.to_string(),
            source: response.error_for_status().unwrap_err(),
        })
    }
}

fn resolve_redirect_target(current_url: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_string();
    }
    search_core::html::resolve_url(location, current_url)
}
