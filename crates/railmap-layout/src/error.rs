#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] railmap_graph::Error),

    #[error("invalid layout config: {key} {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("invalid layout config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
