//! Main importer service that ties all components together.

use chrono::Utc;
use reqwest::blocking::Client;
use roxmltree::Document;

use crate::config::normalize_pmcid;
use crate::error::Result;
use crate::extract::extract_article;
use crate::fetch::fetch_article_xml;
use crate::http::create_client;
use crate::lookup::pmcid_by_doi;
use crate::types::Article;

/// Import an article by PMCID.
///
/// Accepts the prefixed form ("PMC3592458") or bare digits. Downloads the
/// JATS XML from E-utilities and extracts it into an [`Article`].
pub fn import_by_pmcid(pmcid: &str) -> Result<Article> {
    let pmcid = normalize_pmcid(pmcid)?;
    let client = create_client()?;
    import_with_client(&client, &pmcid)
}

/// Import an article by DOI.
///
/// Resolves the DOI to a PMCID first, then imports as by PMCID.
pub fn import_by_doi(doi: &str) -> Result<Article> {
    let client = create_client()?;
    let pmcid = pmcid_by_doi(&client, doi)?;
    tracing::debug!(doi, pmcid, "DOI resolved");
    import_with_client(&client, &pmcid)
}

fn import_with_client(client: &Client, pmcid: &str) -> Result<Article> {
    let xml = fetch_article_xml(client, pmcid)?;
    let article = parse_article_xml(&xml)?;
    tracing::info!(
        pmcid,
        titles = article.titles.len(),
        contributors = article.contributors.len(),
        refs = article.refs.list.len(),
        "article imported"
    );
    Ok(article)
}

/// Parse and extract an article from raw JATS XML, stamping the import time.
pub fn parse_article_xml(xml: &str) -> Result<Article> {
    let doc = Document::parse(xml)?;
    let mut article = extract_article(doc.root())?;
    article.imported_date = Some(Utc::now());
    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_ARTICLE: &str = r#"<pmc-articleset>
<article article-type="research-article">
  <front><article-meta>
    <article-id pub-id-type="pmc">3592458</article-id>
    <title-group><article-title>Minimal</article-title></title-group>
  </article-meta></front>
</article>
</pmc-articleset>"#;

    #[test]
    fn test_parse_article_xml_stamps_import_date() {
        let article = parse_article_xml(MINIMAL_ARTICLE).unwrap();
        assert_eq!(article.pmc, "3592458");
        assert_eq!(article.titles, vec!["Minimal"]);
        assert!(article.imported_date.is_some());
    }

    #[test]
    fn test_parse_article_xml_rejects_malformed_xml() {
        assert!(parse_article_xml("<article>").is_err());
    }
}
