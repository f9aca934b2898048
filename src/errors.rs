use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(importcrawl::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(importcrawl::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(importcrawl::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(importcrawl::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
