//! Error types and handling for the `TravelRecs` application

use thiserror::Error;

/// Main error type for the `TravelRecs` application
#[derive(Error, Debug)]
pub enum TravelRecsError {
    /// The dataset could not be fetched or parsed
    #[error("Dataset load error: {message}")]
    DatasetLoad { message: String },

    /// The user submitted a blank query
    #[error("Empty query")]
    EmptyQuery,

    /// A search was attempted before the dataset finished loading
    #[error("Dataset not ready")]
    DatasetNotReady,

    /// Every match tier came up empty
    #[error("No match for query '{query}'")]
    NoMatch { query: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelRecsError {
    /// Create a new dataset load error
    pub fn dataset_load<S: Into<String>>(message: S) -> Self {
        Self::DatasetLoad {
            message: message.into(),
        }
    }

    /// Create a new no-match error
    pub fn no_match<S: Into<String>>(query: S) -> Self {
        Self::NoMatch {
            query: query.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelRecsError::DatasetLoad { .. } => {
                "Unable to load travel recommendations right now.".to_string()
            }
            TravelRecsError::EmptyQuery => "Please enter a keyword to search.".to_string(),
            TravelRecsError::DatasetNotReady => {
                "Recommendations are still loading. Please try again in a moment.".to_string()
            }
            TravelRecsError::NoMatch { query } => {
                format!("No recommendations found for \"{query}\".")
            }
            TravelRecsError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TravelRecsError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
