use thiserror::Error;

use crate::types::Violation;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid analysis: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    #[error("Wiki API error: {0}")]
    Wiki(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Mount error: {0}")]
    Mount(String),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
