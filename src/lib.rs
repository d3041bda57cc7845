//! PMC Harvester - Import scientific articles from PubMed Central.
//!
//! This crate downloads JATS article XML from the NCBI E-utilities API,
//! extracts it into a typed article record, and renders the record to HTML
//! with sentence-boundary markers for reader-side highlighting.
//!
//! # Example
//!
//! ```
//! use pmc_harvester::config;
//!
//! // Validate identifiers
//! assert!(config::normalize_pmcid("PMC3592458").is_ok());
//! assert!(config::validate_doi("10.1093/nar/gks981").is_ok());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration constants, URL builders, and validation
//! - [`types`]: Core data types (Article, Journal, Citation, etc.)
//! - [`node`]: Content tree nodes and sentence segmentation
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client with retry logic
//! - [`lookup`]: DOI to PMCID resolution via esearch
//! - [`fetch`]: Article XML download via efetch
//! - [`xml`]: XML utilities
//! - [`extract`]: JATS tree extraction into article records
//! - [`render`]: Sentence-annotated HTML rendering
//! - [`json`]: JSON persistence
//! - [`cli`]: Command-line interface
//! - [`importer`]: Main import service

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http;
pub mod importer;
pub mod json;
pub mod lookup;
pub mod node;
pub mod render;
pub mod types;
pub mod xml;

// Re-export main functions
pub use extract::extract_article;
pub use importer::{import_by_doi, import_by_pmcid, parse_article_xml};
pub use render::{render_article, render_region};

// Re-export commonly used items
pub use config::{normalize_pmcid, validate_doi};
pub use error::{HarvestError, Result};
pub use node::{ContentNode, Sentence};
pub use types::{Article, Citation, Contributor, Journal};
