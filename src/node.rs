//! Content nodes for free-form article regions.
//!
//! Abstracts, body sections, acknowledgements, and affiliation/author-note
//! bodies are stored as trees of [`ContentNode`], a generic text-or-element
//! node annotated with sentence spans. Sentence spans are computed once per
//! element, at build time, and never cross an element boundary: each element
//! owns the spans over the concatenation of its *direct* text children only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sentence delimiter scanned for by the segmenter.
const SENTENCE_DELIMITER: &str = ". ";

/// A sentence span inside an element's concatenated direct text.
///
/// Offsets are byte offsets into the concatenation of the element's direct
/// text children, `start` inclusive and `end` exclusive. The delimiter's
/// period is the last byte of its sentence; the following space opens the
/// next span, so the spans of one element tile its text exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
}

/// A node in a free-form content region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentNode {
    /// A text run, stored verbatim.
    Text { body: String },

    /// An element with attributes, ordered children, and sentence spans.
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "HashMap::is_empty")]
        attrs: HashMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<ContentNode>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        sentences: Vec<Sentence>,
    },
}

impl ContentNode {
    /// Create a text node.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text { body: body.into() }
    }

    /// Create an element node, computing its sentence spans from the
    /// children it is given.
    #[must_use]
    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<ContentNode>,
    ) -> Self {
        let sentences = segment_sentences(&children);
        Self::Element {
            tag: tag.into(),
            attrs,
            children,
            sentences,
        }
    }
}

/// Compute sentence spans over a sibling sequence's direct text children.
///
/// Concatenates the bodies of the `Text` children in order (text inside
/// nested elements is excluded) and scans left to right for `". "`. Each
/// occurrence closes a span just after the period; the scan then resumes at
/// the following space, which starts the next span. A final span always runs
/// to the end of the text, so `k` delimiters yield `k + 1` spans that cover
/// every byte exactly once. An empty concatenation yields one `{0, 0}` span.
#[must_use]
pub fn segment_sentences(children: &[ContentNode]) -> Vec<Sentence> {
    let mut text = String::new();
    for child in children {
        if let ContentNode::Text { body } = child {
            text.push_str(body);
        }
    }

    let mut sentences = Vec::new();
    let mut cursor = 0usize;
    let mut rest = text.as_str();
    loop {
        match rest.find(SENTENCE_DELIMITER) {
            Some(i) => {
                sentences.push(Sentence {
                    start: cursor,
                    end: cursor + i + 1,
                });
                rest = &rest[i + 1..];
                cursor += i + 1;
            }
            None => {
                sentences.push(Sentence {
                    start: cursor,
                    end: cursor + rest.len(),
                });
                break;
            }
        }
    }
    sentences
}
