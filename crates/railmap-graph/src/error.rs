#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown station: {shortcode}")]
    UnknownStation { shortcode: String },

    #[error("platform {platform} of station {from} leads to unknown station {to}")]
    DanglingPlatform {
        from: String,
        platform: String,
        to: String,
    },

    #[error("invalid network JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
