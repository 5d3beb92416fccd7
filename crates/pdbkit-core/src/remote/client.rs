use super::config::RemoteConfig;
use super::error::RemoteError;
use reqwest::blocking::Client;
use tracing::debug;

/// A source of text documents addressed by URL.
///
/// Workflows talk to the structure database only through this trait, so they
/// can run against an in-memory source in tests.
pub trait HttpSource {
    /// Endpoint templates used to build request URLs.
    fn config(&self) -> &RemoteConfig;

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the server answers with
    /// a non-success status, or the body cannot be read.
    fn get_text(&self, url: &str) -> Result<String, RemoteError>;
}

/// Blocking `reqwest` client for the RCSB endpoints.
#[derive(Debug, Clone)]
pub struct RcsbClient {
    client: Client,
    config: RemoteConfig,
}

impl RcsbClient {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(RemoteError::ClientBuild)?;
        Ok(Self { client, config })
    }
}

impl HttpSource for RcsbClient {
    fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn get_text(&self, url: &str) -> Result<String, RemoteError> {
        debug!("Sending request to {}", url);
        let request_error = |e| RemoteError::Request {
            url: url.to_string(),
            source: e,
        };

        let response = self.client.get(url).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(request_error)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned bodies by URL and records every request.
    #[derive(Default)]
    pub struct StaticSource {
        pub config: RemoteConfig,
        pub responses: HashMap<String, String>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StaticSource {
        pub fn with(mut self, url: String, body: &str) -> Self {
            self.responses.insert(url, body.to_string());
            self
        }
    }

    impl HttpSource for StaticSource {
        fn config(&self) -> &RemoteConfig {
            &self.config
        }

        fn get_text(&self, url: &str) -> Result<String, RemoteError> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| RemoteError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_client_keeps_config() {
        let config = RemoteConfig {
            timeout: Duration::from_secs(3),
            ..RemoteConfig::default()
        };
        let client = RcsbClient::new(config.clone()).unwrap();
        assert_eq!(client.config(), &config);
    }

    #[test]
    fn unreachable_host_is_request_error() {
        let client = RcsbClient::new(RemoteConfig {
            timeout: Duration::from_secs(2),
            ..RemoteConfig::default()
        })
        .unwrap();
        let result = client.get_text("http://127.0.0.1:9/missing");
        assert!(matches!(result, Err(RemoteError::Request { .. })));
    }
}
