//! End-to-end integration tests for the harvester pipeline.
//!
//! Tests the complete pipeline from JATS XML parsing to HTML rendering and
//! JSON persistence using fixture data from article PMC3592458 (gks981).

use std::fs;
use std::path::Path;

use pmc_harvester::json::{load_json, save_json};
use pmc_harvester::node::ContentNode;
use pmc_harvester::parse_article_xml;
use pmc_harvester::render::render_article;
use pmc_harvester::types::Article;

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("gks981")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Run the extraction pipeline on the gks981 fixture.
fn run_pipeline() -> Article {
    let xml = load_fixture("article.xml");
    parse_article_xml(&xml).expect("Failed to extract article")
}

#[test]
fn test_article_metadata_extracted() {
    let article = run_pipeline();

    assert_eq!(article.article_type, "research-article");
    assert_eq!(article.pmid, "23193287");
    assert_eq!(article.pmc, "3592458");
    assert_eq!(article.doi, "10.1093/nar/gks981");
    assert_eq!(article.publisher_id, "gks981");
    assert!(article.imported_date.is_some());

    assert_eq!(article.journal.nlm_ta, "Nucleic Acids Res");
    assert_eq!(article.journal.iso_abbrev, "Nucleic Acids Res.");
    assert_eq!(article.journal.publisher_id, "nar");
    assert_eq!(article.journal.titles, vec!["Nucleic Acids Research"]);
    assert_eq!(article.journal.issn_print, "0305-1048");
    assert_eq!(article.journal.issn_electronic, "1362-4962");

    assert_eq!(article.categories.len(), 1);
    assert_eq!(article.categories[0].group, "heading");
    assert_eq!(article.categories[0].subject, "Computational Biology");

    assert_eq!(article.titles.len(), 1);
    assert!(article.titles[0].starts_with("Quantifying regulatory element"));

    assert_eq!(article.contributors.len(), 2);
    assert_eq!(article.contributors[0].surname, "Kinney");
    assert_eq!(article.contributors[0].given_names, "Justin B.");
    assert_eq!(article.contributors[1].surname, "Murugan");

    assert_eq!(article.aff.id, "AFF1");
    assert_eq!(article.author_notes.len(), 1);
    assert_eq!(article.author_notes[0].corresp_id, "COR1");

    assert_eq!(article.ppub.year, "2013");
    assert_eq!(article.ppub.month, "2");
    assert_eq!(article.epub.day, "28");
    assert_eq!(article.volume, "41");
    assert_eq!(article.issue, "4");
    assert_eq!(article.fpage, "2159");
    assert_eq!(article.lpage, "2170");

    assert_eq!(article.history.received.day, "24");
    assert_eq!(article.history.revised.month, "9");
    assert_eq!(article.history.accepted.year, "2012");

    assert!(article
        .permissions
        .copyright_statement
        .contains("Oxford University Press"));
    assert_eq!(article.permissions.copyright_year, "2012");
    assert_eq!(article.permissions.licenses, vec!["creative-commons"]);

    assert_eq!(article.page_count, Some(12));
    assert_eq!(article.metas.len(), 1);
    assert_eq!(article.metas[0].name, "cover-date");
}

#[test]
fn test_body_structure() {
    let article = run_pipeline();

    // Two top-level sections, materialized as span-free region roots.
    let secs: Vec<_> = article
        .body
        .iter()
        .filter_map(|n| match n {
            ContentNode::Element {
                tag,
                attrs,
                children,
                sentences,
            } if tag == "sec" => Some((attrs, children, sentences)),
            _ => None,
        })
        .collect();
    assert_eq!(secs.len(), 2);

    let (attrs, children, sentences) = &secs[0];
    assert_eq!(attrs.get("id").map(String::as_str), Some("SEC1"));
    assert!(sentences.is_empty());

    // The section's paragraph is segmented: its direct text splits into two
    // sentences around the inline citation.
    let p = children
        .iter()
        .find(|c| matches!(c, ContentNode::Element { tag, .. } if tag == "p"))
        .expect("paragraph in SEC1");
    let ContentNode::Element { sentences, .. } = p else {
        unreachable!();
    };
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].start, 0);
    assert!(sentences[0].end < sentences[1].end);
}

#[test]
fn test_abstract_sentences() {
    let article = run_pipeline();

    let p = article
        .abstract_content
        .iter()
        .find(|c| matches!(c, ContentNode::Element { tag, .. } if tag == "p"))
        .expect("abstract paragraph");
    let ContentNode::Element { sentences, .. } = p else {
        unreachable!();
    };
    assert_eq!(sentences.len(), 2);
}

#[test]
fn test_references_extracted() {
    let article = run_pipeline();

    assert_eq!(article.refs.title, "REFERENCES");
    assert_eq!(article.refs.list.len(), 2);

    let first = &article.refs.list[0];
    assert_eq!(first.id, "gks981-B1");
    assert_eq!(first.label, "1");
    assert!(first.title.starts_with("High-resolution analysis"));
    assert_eq!(first.source, "Nat. Biotechnol.");
    assert_eq!(first.year, "2009");
    assert_eq!(first.volume, "27");
    assert_eq!(first.fpage, "1173");
    assert_eq!(first.lpage, "1175");
    assert_eq!(first.pmid, "19915551");
    assert_eq!(first.groups.len(), 1);
    assert_eq!(first.groups[0].kind, "author");
    assert_eq!(first.groups[0].names.len(), 2);
    assert_eq!(
        first.groups[0].names[0].get("surname").map(String::as_str),
        Some("Patwardhan")
    );

    assert_eq!(article.refs.list[1].id, "gks981-B2");
    assert_eq!(article.refs.list[1].year, "2012");
}

#[test]
fn test_rendered_html() {
    let article = run_pipeline();
    let html = render_article(&article);

    // Sentence markers spliced into paragraph text.
    assert!(html.contains("<div class=\"ae-sentence\">"));
    assert!(html.contains("Promoter activity was measured across a synthetic library.</div>"));

    // Sections and paragraphs become ae-paragraph divs; section titles become
    // headings by nesting depth. Title text is itself one sentence.
    assert!(html.contains("<div class=\"ae-paragraph\">"));
    assert!(html.contains("<h2><div class=\"ae-sentence\">INTRODUCTION</div></h2>"));
    assert!(html.contains("<h3><div class=\"ae-sentence\">Library design</div></h3>"));

    // Cross-references render as bracketed javascript links.
    assert!(html.contains(
        "<a href=\"javascript:\" data-addition-id=\"citation\" class=\"article-additional\">\
         [<div class=\"ae-sentence\">1</div>]</a>"
    ));

    // Dangling citation parens around the xref are dropped.
    assert!(!html.contains("range ("));
    assert!(!html.contains(")."));

    // External links keep their text, not their URL.
    assert!(html.contains("class=\"long-word\"><div class=\"ae-sentence\">the data archive</div></a>"));

    // Figures are hidden; graphics point at the article media directory.
    assert!(html.contains("<fig style=\"display:none;\">"));
    assert!(html
        .contains("src=\"https://www.ncbi.nlm.nih.gov/pmc/articles/PMC3592458/bin/gks981f1p.jpg\""));

    // Acknowledgements render after the body.
    let ack_at = html.find("helpful discussions").expect("ack rendered");
    let body_at = html.find("INTRODUCTION").expect("body rendered");
    assert!(body_at < ack_at);
}

#[test]
fn test_json_round_trip() {
    let article = run_pipeline();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = save_json(&article, Some(dir.path())).expect("save");
    assert_eq!(path.file_name().unwrap(), "PMC3592458.json");

    let loaded = load_json(&path).expect("load");
    assert_eq!(loaded, article);

    // Rendering the reloaded record is identical to rendering the original.
    assert_eq!(render_article(&loaded), render_article(&article));
}
