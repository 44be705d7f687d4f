use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Failures while turning rows into PDF bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to load report fonts: {0}")]
    Fonts(#[source] genpdf::error::Error),

    #[error("Failed to build PDF document: {0}")]
    Document(#[source] genpdf::error::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unsupported report locale '{0}'. Expected one of: pt-BR, en-US, de-DE")]
    Unsupported(String),
}
