use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or loading a site
///
/// Widgets themselves never fail; a missing element just means the control
/// has no effect.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page markup: {0}")]
    Markup(#[from] serde_json::Error),

    #[error("could not determine user data directory")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, SiteError>;
