use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("missing {0} env var")]
    MissingApiKey(&'static str),

    #[error("image search not supported by the {provider} provider")]
    ImageSearchUnsupported { provider: &'static str },

    #[error("invalid endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
