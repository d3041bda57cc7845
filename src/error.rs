//! Error types for the harvester.
//!
//! `HarvestError` is the single error type exposed to library consumers;
//! transport and parsing errors are wrapped with enough context to identify
//! the article that failed.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Invalid PMCID format.
    #[error("Invalid PMCID: '{0}'. Expected digits with an optional PMC prefix (e.g., PMC3592458)")]
    InvalidPmcid(String),

    /// Invalid DOI format.
    #[error("Invalid DOI: '{0}'. Expected 10.<registrant>/<suffix> (e.g., 10.1093/nar/gks981)")]
    InvalidDoi(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// All retry attempts for a download were exhausted.
    #[error("Download failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// DOI lookup request failed.
    #[error("Failed to look up PMCID for DOI {doi}: {source}")]
    LookupFailed {
        doi: String,
        #[source]
        source: reqwest::Error,
    },

    /// DOI lookup returned no usable PMCID.
    #[error("No unique PMCID found for DOI {doi} ({candidates} candidates)")]
    PmcidNotFound { doi: String, candidates: usize },

    /// Failed to download article XML.
    #[error("Failed to fetch article XML for PMC{pmcid}: {source}")]
    FetchFailed {
        pmcid: String,
        #[source]
        source: reqwest::Error,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The source tree contains no article element.
    #[error("No <article> element found in source document")]
    MissingArticle,

    /// A numeric field failed to parse.
    #[error("Invalid page count '{value}': {source}")]
    InvalidPageCount {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
