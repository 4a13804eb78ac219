#![allow(missing_docs)]

pub mod app_config;
pub mod cli;
pub mod document;
pub mod merge;
pub mod shared;

pub use document::{Document, Format};
pub use merge::{deep_merge, deep_merge_in_place, DeepMerge};
pub use shared::{SharedNode, SharedTable};

#[derive(Debug, thiserror::Error)]
pub enum DeepMergeError {
    #[error("Failed to read {origin}: {source}")]
    Io { origin: String, source: std::io::Error },

    #[error("JSON parsing error in {origin}: {source}")]
    Json { origin: String, source: serde_json::Error },

    #[error("TOML parsing error in {origin}: {source}")]
    TomlParse { origin: String, source: toml::de::Error },

    #[error("{origin} is not a mapping at the top level")]
    NotAMapping { origin: String },

    #[error("{origin}: `{key}` is {value}, which has no JSON representation")]
    NonFiniteFloat { origin: String, key: String, value: f64 },

    #[error("JSON rendering error: {0}")]
    JsonRender(#[from] serde_json::Error),

    #[error("TOML rendering error: {0}")]
    TomlRender(#[from] toml::ser::Error),
}
