//! Core data types for harvested articles.
//!
//! These types are the normalized representation of one PMC article,
//! matching the JATS substructures the extractor reads. Every field
//! defaults to empty/absent; a record is well-formed no matter which
//! substructures the source happened to contain. Empty defaults are
//! omitted from the JSON wire format.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::node::ContentNode;

/// Fully extracted representation of one PMC article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    /// Free-form provenance tag set by the importing collaborator.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub imported_by: String,

    /// When this record was imported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_date: Option<DateTime<Utc>>,

    /// Article type, from the `article-type` attribute.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub article_type: String,

    /// Journal the article appeared in.
    #[serde(skip_serializing_if = "Journal::is_empty")]
    pub journal: Journal,

    /// PubMed identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pmid: String,

    /// PubMed Central identifier (bare digits).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pmc: String,

    /// Digital Object Identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doi: String,

    /// Publisher-assigned identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub publisher_id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Contributor>,

    /// Affiliation block.
    #[serde(skip_serializing_if = "Affiliation::is_empty")]
    pub aff: Affiliation,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub author_notes: Vec<AuthorNote>,

    /// Print publication date.
    #[serde(skip_serializing_if = "ArticleDate::is_empty")]
    pub ppub: ArticleDate,

    /// Electronic publication date.
    #[serde(skip_serializing_if = "ArticleDate::is_empty")]
    pub epub: ArticleDate,

    /// Date the article was released into PMC.
    #[serde(skip_serializing_if = "ArticleDate::is_empty")]
    pub pmc_release: ArticleDate,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub volume: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub issue: String,

    /// First page.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fpage: String,

    /// Last page.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lpage: String,

    #[serde(skip_serializing_if = "History::is_empty")]
    pub history: History,

    #[serde(skip_serializing_if = "Permissions::is_empty")]
    pub permissions: Permissions,

    /// Abstract content nodes.
    #[serde(rename = "abstract", skip_serializing_if = "Vec::is_empty")]
    pub abstract_content: Vec<ContentNode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    /// Free-form custom metadata.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metas: Vec<CustomMeta>,

    /// Body content nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<ContentNode>,

    /// Acknowledgements content nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ack: Vec<ContentNode>,

    /// Bibliography.
    #[serde(skip_serializing_if = "RefList::is_empty")]
    pub refs: RefList,
}

/// Venue descriptor for the journal an article appeared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Journal {
    /// NLM Title Abbreviation.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nlm_ta: String,

    /// ISO abbreviated title.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub iso_abbrev: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub publisher_id: String,

    /// HighWire Press identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hwp: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,

    /// Print ISSN.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub issn_print: String,

    /// Electronic ISSN.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub issn_electronic: String,
}

impl Journal {
    /// True when no journal metadata was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A subject category, pairing the group type with the subject text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub group: String,
    pub subject: String,
}

/// One article contributor (author, editor, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contributor {
    /// Contributor type, from the `contrib-type` attribute.
    pub kind: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub surname: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub given_names: String,
}

/// Affiliation block with its free-form body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Affiliation {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl Affiliation {
    /// True when no affiliation was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.children.is_empty()
    }
}

/// A correspondence note with its free-form body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorNote {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub corresp_id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

/// A day/month/year triple, each part kept as source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleDate {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub day: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub month: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub year: String,
}

impl ArticleDate {
    /// True when no date parts were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.day.is_empty() && self.month.is_empty() && self.year.is_empty()
    }
}

/// Editorial history dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    #[serde(skip_serializing_if = "ArticleDate::is_empty")]
    pub received: ArticleDate,

    #[serde(skip_serializing_if = "ArticleDate::is_empty")]
    pub revised: ArticleDate,

    #[serde(skip_serializing_if = "ArticleDate::is_empty")]
    pub accepted: ArticleDate,
}

impl History {
    /// True when no history dates were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Copyright and licensing information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub copyright_statement: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub copyright_year: String,

    /// License identifiers, accumulated in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<String>,
}

impl Permissions {
    /// True when no permissions were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A custom metadata name/value pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomMeta {
    pub name: String,
    pub value: String,
}

/// The bibliography: its title and ordered entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefList {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<Citation>,
}

impl RefList {
    /// True when no bibliography was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.list.is_empty()
    }
}

/// One bibliography entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Citation {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,

    /// Contributor name groups (authors, editors, ...).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<NameGroup>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub year: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub volume: String,

    /// First page.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fpage: String,

    /// Last page.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lpage: String,

    /// PubMed identifier of the cited work.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pmid: String,
}

/// A typed collection of contributor names in one citation.
///
/// Each name maps a name-part label (surname, given-names, ...) to its
/// text value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameGroup {
    /// Group type, from the `person-group-type` attribute.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<HashMap<String, String>>,
}
