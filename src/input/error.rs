use thiserror::Error;

/// Defines errors that may occur while discovering bundled resources
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The resource pattern is not a valid glob
    #[error("Invalid resource pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Underlying glob error
        #[source]
        source: globset::Error,
    },
    /// The resource directory does not exist
    #[error("Resource directory not found: {0}")]
    MissingDirectory(String),
}
