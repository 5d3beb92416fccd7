use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to '{url}' returned status {status}")]
    Status { url: String, status: u16 },
}
