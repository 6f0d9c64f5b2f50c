use thiserror::Error;

/// Failure of a single request/response round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response (fetch rejected, CORS, offline).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// The reply body was not the JSON shape the endpoint promises.
    #[error("malformed reply: {0}")]
    Decode(String),
    /// A request body could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
