//! Client configuration

/// Connection settings for the record API.
///
/// Constructed by the embedding application and passed to
/// [`crate::ApiClient::new`]; there is no global instance. The bearer token
/// is whatever access token the application currently holds and can be
/// swapped after a login or refresh.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub bearer_token: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            bearer_token: bearer_token.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Returns a copy carrying a fresh access token, e.g. after a refresh.
    pub fn with_bearer_token(mut self, bearer_token: impl Into<String>) -> Self {
        self.bearer_token = bearer_token.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://api.example.com/", "token", "agent");
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn test_with_bearer_token_swaps_token() {
        let config = ClientConfig::new("https://api.example.com", "old", "agent")
            .with_bearer_token("new");
        assert_eq!(config.bearer_token, "new");
    }
}
