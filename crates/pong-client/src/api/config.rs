/// Configuration for the client, with defaults matching the stock backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the game server (default: `http://localhost:5000`).
    pub api_url: String,
    /// Period of the state poll timer in milliseconds (default: 200).
    pub poll_interval_ms: f64,
    /// Period of the input send timer in milliseconds (default: 100).
    pub input_interval_ms: f64,
    /// Period of the browser interval that drives both timers (default: 25).
    pub tick_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            poll_interval_ms: 200.0,
            input_interval_ms: 100.0,
            tick_ms: 25,
        }
    }
}

impl ClientConfig {
    /// Point the client at a different server. A trailing slash is dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Join the base URL with an endpoint path (which starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}
