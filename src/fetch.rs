//! Article XML downloading from the E-utilities fetch service.

use reqwest::blocking::Client;

use crate::config::efetch_url;
use crate::error::{HarvestError, Result};
use crate::http::{bytes_to_string, download_bytes};

/// Download the JATS XML for an article.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `pmcid` - Normalized PMCID (bare digits, see [`crate::config::normalize_pmcid`])
///
/// # Returns
/// Raw XML content as a string
pub fn fetch_article_xml(client: &Client, pmcid: &str) -> Result<String> {
    let url = efetch_url(pmcid);
    let bytes = download_bytes(client, &url).map_err(|e| {
        if let HarvestError::Http(source) = e {
            HarvestError::FetchFailed {
                pmcid: pmcid.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    Ok(bytes_to_string(&bytes, &format!("article XML for PMC{pmcid}")))
}

#[cfg(test)]
mod tests {
    // Network access is exercised through the integration environment;
    // URL construction is covered in config.rs.
}
