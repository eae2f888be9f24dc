use reqwest::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/query";

/// Environment variable overriding [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_ENV: &str = "MOVIX_QUERY_ENDPOINT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The query endpoint; the SQL text is appended as the `q` parameter.
    pub endpoint: Url,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::resolve(std::env::var(ENDPOINT_ENV).ok())
    }

    /// Build the config from an optional endpoint override.
    ///
    /// Blank overrides fall back to the default endpoint.
    pub fn resolve(endpoint: Option<String>) -> Result<Self, Error> {
        let value = endpoint
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let endpoint = Url::parse(&value).map_err(|e| Error::InvalidEndpoint {
            reason: e.to_string(),
            value: value.clone(),
        })?;

        match endpoint.scheme() {
            "http" | "https" => Ok(Self { endpoint }),
            scheme => Err(Error::UnsupportedScheme {
                scheme: scheme.to_string(),
                value,
            }),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid query endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("query endpoint {value:?} must use http or https, not {scheme}")]
    UnsupportedScheme { value: String, scheme: String },
}
