//! Rendering of content regions as sentence-annotated HTML.
//!
//! The renderer walks a [`ContentNode`] sibling sequence, remapping JATS
//! tags to presentation tags and splicing sentence markers into text runs at
//! the byte offsets the segmenter recorded. The active sentence set for a
//! sibling sequence is always the one computed by the *parent* element over
//! these very siblings, threaded down explicitly by the caller; a region is
//! rendered from depth 0 with an empty active set, since top-level siblings
//! have no enclosing parent spans.

use std::collections::HashMap;

use crate::config::article_media_url;
use crate::node::{ContentNode, Sentence};
use crate::types::Article;

/// Opening marker spliced in at a sentence start.
const SENTENCE_OPEN: &str = "<div class=\"ae-sentence\">";

/// Closing marker spliced in after a sentence end.
const SENTENCE_CLOSE: &str = "</div>";

/// Render one extracted region (abstract, body, or acknowledgements).
#[must_use]
pub fn render_region(nodes: &[ContentNode], pmcid: &str) -> String {
    render_nodes(nodes, 0, &[], pmcid)
}

/// Render every region of an article, in reading order.
#[must_use]
pub fn render_article(article: &Article) -> String {
    let mut output = String::new();
    output.push_str(&render_region(&article.abstract_content, &article.pmc));
    output.push_str(&render_region(&article.body, &article.pmc));
    output.push_str(&render_region(&article.ack, &article.pmc));
    output
}

/// Render a sibling sequence.
///
/// `sentences` is the active span set of the parent element whose children
/// these siblings are. Rendering never fails and never mutates the nodes.
#[must_use]
pub fn render_nodes(
    nodes: &[ContentNode],
    depth: usize,
    sentences: &[Sentence],
    pmcid: &str,
) -> String {
    let depth = depth + 1;
    let mut output = String::new();
    // Running byte offset over this sibling sequence's original text.
    let mut offset = 0usize;

    for node in nodes {
        match node {
            ContentNode::Text { body } => {
                let mut spliced = splice_sentence_markers(body, offset, sentences);
                offset += body.len();
                trim_dangling_parens(&mut spliced);
                output.push_str(&spliced);
            }
            ContentNode::Element {
                tag,
                attrs,
                children,
                sentences: own_sentences,
            } => {
                let (out_tag, props) = remap_tag(tag, depth, attrs, pmcid);

                output.push('<');
                output.push_str(&out_tag);
                for (key, value) in &props {
                    output.push(' ');
                    output.push_str(key);
                    output.push_str("=\"");
                    output.push_str(value);
                    output.push('"');
                }
                output.push('>');

                // Cross-reference content is wrapped in literal brackets.
                if tag == "xref" {
                    output.push('[');
                }
                output.push_str(&render_nodes(children, depth, own_sentences, pmcid));
                if tag == "xref" {
                    output.push(']');
                }

                output.push_str("</");
                output.push_str(&out_tag);
                output.push('>');
            }
        }
    }

    output
}

/// Splice sentence markers into one text run.
///
/// `offset` is the running byte offset of this run within its sibling
/// sequence. Spans are applied in reverse insertion order, and within a span
/// the closing marker goes in before the opening one, so that an insertion
/// never shifts an offset still to be applied. A span boundary that falls
/// outside the run's original text length is a segmenter bug and fails fast.
fn splice_sentence_markers(body: &str, offset: usize, sentences: &[Sentence]) -> String {
    let mut out = body.to_string();
    let body_end = offset + body.len();

    for sent in sentences.iter().rev() {
        if sent.end >= offset && sent.end <= body_end {
            let end = sent.end - offset;
            debug_assert!(
                out.is_char_boundary(end),
                "sentence end {} off a char boundary",
                sent.end
            );
            out.insert_str(end, SENTENCE_CLOSE);
        }
        if sent.start >= offset && sent.start <= body_end {
            let start = sent.start - offset;
            debug_assert!(
                out.is_char_boundary(start),
                "sentence start {} off a char boundary",
                sent.start
            );
            out.insert_str(start, SENTENCE_OPEN);
        }
    }

    out
}

/// Repair citation-marker punctuation left dangling after inline-reference
/// removal upstream: a leading `)` or trailing `(` on a text run is dropped.
fn trim_dangling_parens(body: &mut String) {
    if body.starts_with(')') {
        body.remove(0);
    }
    if body.ends_with('(') {
        body.pop();
    }
}

/// Resolve the presentation tag and attribute set for a semantic tag.
///
/// Attributes on the source element are not carried over; only `xlink:href`
/// is consulted, to address embedded media. Unknown tags pass through with
/// no attributes added.
fn remap_tag(
    tag: &str,
    depth: usize,
    attrs: &HashMap<String, String>,
    pmcid: &str,
) -> (String, Vec<(&'static str, String)>) {
    let href = || attrs.get("xlink:href").cloned().unwrap_or_default();

    match tag {
        "title" => {
            let heading = if depth < 3 {
                "h2"
            } else if depth < 4 {
                "h3"
            } else {
                "h4"
            };
            (heading.to_string(), Vec::new())
        }
        "sec" | "p" => (
            "div".to_string(),
            vec![("class", "ae-paragraph".to_string())],
        ),
        "xref" => (
            "a".to_string(),
            vec![
                ("href", "javascript:".to_string()),
                ("data-addition-id", "citation".to_string()),
                ("class", "article-additional".to_string()),
            ],
        ),
        "ext-link" => (
            "a".to_string(),
            vec![
                ("href", "javascript:".to_string()),
                ("data-addition-id", "citation".to_string()),
                ("class", "long-word".to_string()),
            ],
        ),
        "inline-formula" => ("span".to_string(), Vec::new()),
        "disp-formula" => (
            "div".to_string(),
            vec![("class", "mobile-small ae-paragraph".to_string())],
        ),
        "inline-graphic" => (
            "img".to_string(),
            vec![("src", format!("{}{}", article_media_url(pmcid), href()))],
        ),
        "graphic" => (
            "img".to_string(),
            vec![("src", format!("{}{}.jpg", article_media_url(pmcid), href()))],
        ),
        // Figures are kept but hidden; a consumer relocates them out of band.
        "fig" => (
            "fig".to_string(),
            vec![("style", "display:none;".to_string())],
        ),
        other => (other.to_string(), Vec::new()),
    }
}
