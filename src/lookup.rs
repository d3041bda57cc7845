//! DOI to PMCID resolution via the E-utilities search service.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::{esearch_url, validate_doi};
use crate::error::{HarvestError, Result};
use crate::http::download_bytes;

/// Top-level esearch JSON reply.
#[derive(Debug, Deserialize)]
struct EutilsSearch {
    #[serde(default)]
    esearchresult: EutilsSearchResult,
}

/// The result block of an esearch reply.
#[derive(Debug, Default, Deserialize)]
struct EutilsSearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Resolve a DOI to the PMCID of its full-text deposit.
///
/// The DOI must resolve to exactly one PMC record; zero or multiple
/// candidates yield [`HarvestError::PmcidNotFound`].
pub fn pmcid_by_doi(client: &Client, doi: &str) -> Result<String> {
    validate_doi(doi)?;

    let url = esearch_url(doi);
    let bytes = download_bytes(client, &url).map_err(|e| {
        if let HarvestError::Http(source) = e {
            HarvestError::LookupFailed {
                doi: doi.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    let search: EutilsSearch = serde_json::from_slice(&bytes)?;
    pmcid_from_idlist(doi, search.esearchresult.idlist)
}

/// Pick the unique PMCID out of an esearch id list.
fn pmcid_from_idlist(doi: &str, idlist: Vec<String>) -> Result<String> {
    match idlist.as_slice() {
        [id] if !id.is_empty() => Ok(id.clone()),
        _ => Err(HarvestError::PmcidNotFound {
            doi: doi.to_string(),
            candidates: idlist.iter().filter(|id| !id.is_empty()).count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esearch_reply_parses() {
        let json = r#"{"header":{"type":"esearch"},"esearchresult":{"count":"1","idlist":["3592458"]}}"#;
        let search: EutilsSearch = serde_json::from_str(json).unwrap();
        assert_eq!(search.esearchresult.idlist, vec!["3592458"]);
    }

    #[test]
    fn test_esearch_reply_without_result_block() {
        let search: EutilsSearch = serde_json::from_str("{}").unwrap();
        assert!(search.esearchresult.idlist.is_empty());
    }

    #[test]
    fn test_unique_id_is_accepted() {
        let pmcid = pmcid_from_idlist("10.1093/nar/gks981", vec!["3592458".to_string()]).unwrap();
        assert_eq!(pmcid, "3592458");
    }

    #[test]
    fn test_empty_idlist_is_not_found() {
        let err = pmcid_from_idlist("10.1093/nar/gks981", Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            HarvestError::PmcidNotFound { candidates: 0, .. }
        ));
    }

    #[test]
    fn test_ambiguous_idlist_is_rejected() {
        let err = pmcid_from_idlist(
            "10.1093/nar/gks981",
            vec!["1".to_string(), "2".to_string()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HarvestError::PmcidNotFound { candidates: 2, .. }
        ));
    }

    #[test]
    fn test_blank_id_is_not_found() {
        let err = pmcid_from_idlist("10.1093/nar/gks981", vec![String::new()]).unwrap_err();
        assert!(matches!(
            err,
            HarvestError::PmcidNotFound { candidates: 0, .. }
        ));
    }
}
