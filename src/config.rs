//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvestError, Result};

/// Base URL for NCBI E-utilities.
pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Base URL for PMC article pages, used to address embedded article media.
pub const PMC_ARTICLE_URL: &str = "https://www.ncbi.nlm.nih.gov/pmc/articles";

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large article XML files and slow
/// connections.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// PMCID pattern: up to ten digits, optionally prefixed with "PMC".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PMCID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:PMC)?(\d{1,10})$").expect("valid regex"));

/// DOI pattern: directory indicator "10.", registrant code, then a suffix.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^10\.\d{4,9}/\S+$").expect("valid regex"));

/// Bare digits, the normalized PMCID form used in URLs.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGITS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,10}$").expect("valid regex"));

/// Validate and normalize a PMCID.
///
/// Accepts both the prefixed form ("PMC3592458") and bare digits
/// ("3592458"); returns the bare-digit form used by E-utilities.
///
/// # Examples
/// ```
/// use pmc_harvester::config::normalize_pmcid;
///
/// assert_eq!(normalize_pmcid("PMC3592458").unwrap(), "3592458");
/// assert_eq!(normalize_pmcid("3592458").unwrap(), "3592458");
/// assert!(normalize_pmcid("PMC").is_err());
/// ```
pub fn normalize_pmcid(pmcid: &str) -> Result<String> {
    PMCID_PATTERN
        .captures(pmcid)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| HarvestError::InvalidPmcid(pmcid.to_string()))
}

/// Validate DOI format.
///
/// # Examples
/// ```
/// use pmc_harvester::config::validate_doi;
///
/// assert!(validate_doi("10.1093/nar/gks981").is_ok());
/// assert!(validate_doi("not-a-doi").is_err());
/// ```
pub fn validate_doi(doi: &str) -> Result<()> {
    if DOI_PATTERN.is_match(doi) {
        Ok(())
    } else {
        Err(HarvestError::InvalidDoi(doi.to_string()))
    }
}

/// Build the E-utilities esearch URL resolving a DOI to a PMCID.
///
/// # Panics
/// Debug builds panic if the DOI was not validated first.
pub fn esearch_url(doi: &str) -> String {
    debug_assert!(
        DOI_PATTERN.is_match(doi),
        "doi should be validated before calling esearch_url"
    );
    format!("{EUTILS_BASE_URL}/esearch.fcgi?retmode=json&db=pmc&term={doi}")
}

/// Build the E-utilities efetch URL for an article's JATS XML.
///
/// # Panics
/// Debug builds panic if the PMCID was not normalized first.
pub fn efetch_url(pmcid: &str) -> String {
    debug_assert!(
        DIGITS_PATTERN.is_match(pmcid),
        "pmcid should be normalized before calling efetch_url"
    );
    format!("{EUTILS_BASE_URL}/efetch.fcgi?db=pmc&retmode=xml&id={pmcid}")
}

/// Build the base URL for media files embedded in an article.
///
/// Graphics referenced from article bodies resolve against this base, e.g.
/// `article_media_url("3592458") + "gks981i3.jpg"`.
pub fn article_media_url(pmcid: &str) -> String {
    format!("{PMC_ARTICLE_URL}/PMC{pmcid}/bin/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pmcid_valid() {
        assert_eq!(normalize_pmcid("PMC3592458").unwrap(), "3592458");
        assert_eq!(normalize_pmcid("3592458").unwrap(), "3592458");
        assert_eq!(normalize_pmcid("PMC1").unwrap(), "1");
    }

    #[test]
    fn test_normalize_pmcid_invalid() {
        assert!(normalize_pmcid("").is_err());
        assert!(normalize_pmcid("PMC").is_err());
        assert!(normalize_pmcid("pmc3592458").is_err()); // Lowercase prefix
        assert!(normalize_pmcid("PMC35924580000").is_err()); // Too long
        assert!(normalize_pmcid("PMC35a92").is_err());
    }

    #[test]
    fn test_validate_doi_valid() {
        assert!(validate_doi("10.1093/nar/gks981").is_ok());
        assert!(validate_doi("10.1234/x").is_ok());
        assert!(validate_doi("10.123456789/suffix.with.dots").is_ok());
    }

    #[test]
    fn test_validate_doi_invalid() {
        assert!(validate_doi("").is_err());
        assert!(validate_doi("10.123/x").is_err()); // Registrant too short
        assert!(validate_doi("11.1234/x").is_err()); // Wrong directory indicator
        assert!(validate_doi("10.1234/").is_err()); // Empty suffix
        assert!(validate_doi("10.1234/a b").is_err()); // Whitespace in suffix
    }

    #[test]
    fn test_esearch_url() {
        assert_eq!(
            esearch_url("10.1093/nar/gks981"),
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi?retmode=json&db=pmc&term=10.1093/nar/gks981"
        );
    }

    #[test]
    fn test_efetch_url() {
        assert_eq!(
            efetch_url("3592458"),
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi?db=pmc&retmode=xml&id=3592458"
        );
    }

    #[test]
    fn test_article_media_url() {
        assert_eq!(
            article_media_url("3592458"),
            "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC3592458/bin/"
        );
    }
}
