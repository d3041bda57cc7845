//! Extraction of a typed [`Article`] from a JATS source tree.
//!
//! The extractor walks the tree top-down, dispatching on tag name through a
//! family of mutually recursive handlers. Each dispatch level matches an
//! enumerated set of known element names; anything unknown is recursed into
//! unchanged until a known element is found beneath it. Missing substructures
//! are never an error, the corresponding record field simply keeps its
//! default. The only hard failure is an unparsable numeric field.

use std::collections::HashMap;

use roxmltree::Node;

use crate::error::{HarvestError, Result};
use crate::node::ContentNode;
use crate::types::{
    Affiliation, Article, ArticleDate, AuthorNote, Category, Citation, Contributor, CustomMeta,
    History, Journal, NameGroup, Permissions, RefList,
};
use crate::xml::{child_inner_text, element_children, get_tag_name, inner_text};

/// XLink namespace used by JATS media references.
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Known children of the article element.
enum ArticleElement {
    JournalMeta,
    ArticleMeta,
    Sec,
    Back,
}

impl ArticleElement {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "journal-meta" => Some(Self::JournalMeta),
            "article-meta" => Some(Self::ArticleMeta),
            "sec" => Some(Self::Sec),
            "back" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Known elements inside journal-meta.
enum JournalElement {
    JournalId,
    JournalTitle,
    Issn,
}

impl JournalElement {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "journal-id" => Some(Self::JournalId),
            "journal-title" => Some(Self::JournalTitle),
            "issn" => Some(Self::Issn),
            _ => None,
        }
    }
}

/// Known elements inside article-meta.
enum MetaElement {
    ArticleId,
    ArticleCategories,
    TitleGroup,
    ContribGroup,
    Aff,
    AuthorNotes,
    PubDate,
    Volume,
    Issue,
    Fpage,
    Lpage,
    History,
    Permissions,
    Abstract,
    PageCount,
    CustomMetaGroup,
}

impl MetaElement {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "article-id" => Some(Self::ArticleId),
            "article-categories" => Some(Self::ArticleCategories),
            "title-group" => Some(Self::TitleGroup),
            "contrib-group" => Some(Self::ContribGroup),
            "aff" => Some(Self::Aff),
            "author-notes" => Some(Self::AuthorNotes),
            "pub-date" => Some(Self::PubDate),
            "volume" => Some(Self::Volume),
            "issue" => Some(Self::Issue),
            "fpage" => Some(Self::Fpage),
            "lpage" => Some(Self::Lpage),
            "history" => Some(Self::History),
            "permissions" => Some(Self::Permissions),
            "abstract" => Some(Self::Abstract),
            "page-count" => Some(Self::PageCount),
            "custom-meta-group" => Some(Self::CustomMetaGroup),
            _ => None,
        }
    }
}

/// Known elements inside back matter.
enum BackElement {
    Ack,
    RefList,
}

impl BackElement {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "ack" => Some(Self::Ack),
            "ref-list" => Some(Self::RefList),
            _ => None,
        }
    }
}

/// Extract a typed [`Article`] from a source tree.
///
/// `root` may be the article element itself or any ancestor (efetch wraps
/// articles in a `<pmc-articleset>`); the first article element in document
/// order is extracted.
pub fn extract_article(root: Node<'_, '_>) -> Result<Article> {
    let article_el = root
        .descendants()
        .find(|n| n.is_element() && get_tag_name(*n) == "article")
        .ok_or(HarvestError::MissingArticle)?;

    let mut article = Article::default();
    parse_article(article_el, &mut article)?;
    tracing::debug!(
        article_type = %article.article_type,
        pmc = %article.pmc,
        "article extracted"
    );
    Ok(article)
}

fn parse_article(node: Node<'_, '_>, article: &mut Article) -> Result<()> {
    match ArticleElement::from_name(get_tag_name(node)) {
        Some(ArticleElement::JournalMeta) => parse_journal_meta(node, &mut article.journal),
        Some(ArticleElement::ArticleMeta) => parse_article_meta(node, article)?,
        Some(ArticleElement::Sec) => {
            // A top-level body section. The region root carries no sentence
            // spans of its own; the top-level render call supplies an empty
            // active set.
            let children = materialize_children(node);
            article.body.push(ContentNode::Element {
                tag: "sec".to_string(),
                attrs: attr_map(node),
                children,
                sentences: Vec::new(),
            });
        }
        Some(ArticleElement::Back) => parse_back(node, article),
        None => {
            if let Some(kind) = node.attribute("article-type") {
                article.article_type = kind.to_string();
            }
            for child in element_children(node) {
                parse_article(child, article)?;
            }
        }
    }
    Ok(())
}

fn parse_journal_meta(node: Node<'_, '_>, journal: &mut Journal) {
    match JournalElement::from_name(get_tag_name(node)) {
        Some(JournalElement::JournalId) => {
            if let Some(kind) = node.attribute("journal-id-type") {
                let value = inner_text(node);
                match kind {
                    "nlm-ta" => journal.nlm_ta = value,
                    "iso-abbrev" => journal.iso_abbrev = value,
                    "publisher-id" => journal.publisher_id = value,
                    "hwp" => journal.hwp = value,
                    _ => {}
                }
            }
        }
        Some(JournalElement::JournalTitle) => journal.titles.push(inner_text(node)),
        Some(JournalElement::Issn) => {
            if let Some(kind) = node.attribute("pub-type") {
                let value = inner_text(node);
                match kind {
                    "ppub" => journal.issn_print = value,
                    "epub" => journal.issn_electronic = value,
                    _ => {}
                }
            }
        }
        None => {}
    }

    for child in element_children(node) {
        parse_journal_meta(child, journal);
    }
}

fn parse_article_meta(node: Node<'_, '_>, article: &mut Article) -> Result<()> {
    match MetaElement::from_name(get_tag_name(node)) {
        Some(MetaElement::ArticleId) => {
            if let Some(kind) = node.attribute("pub-id-type") {
                let value = inner_text(node);
                match kind {
                    "pmid" => article.pmid = value,
                    "pmc" => article.pmc = value,
                    "doi" => article.doi = value,
                    "publisher-id" => article.publisher_id = value,
                    _ => {}
                }
            }
        }
        Some(MetaElement::ArticleCategories) => {
            parse_categories(node, &mut article.categories);
        }
        Some(MetaElement::TitleGroup) => parse_titles(node, &mut article.titles),
        Some(MetaElement::ContribGroup) => {
            parse_contributors(node, &mut article.contributors);
        }
        Some(MetaElement::Aff) => {
            article.aff = Affiliation {
                id: node.attribute("id").unwrap_or_default().to_string(),
                children: materialize_children(node),
            };
        }
        Some(MetaElement::AuthorNotes) => {
            parse_author_notes(node, &mut article.author_notes);
        }
        Some(MetaElement::PubDate) => parse_pub_date(node, article),
        Some(MetaElement::Volume) => article.volume = inner_text(node),
        Some(MetaElement::Issue) => article.issue = inner_text(node),
        Some(MetaElement::Fpage) => article.fpage = inner_text(node),
        Some(MetaElement::Lpage) => article.lpage = inner_text(node),
        Some(MetaElement::History) => parse_history(node, &mut article.history),
        Some(MetaElement::Permissions) => parse_permissions(node, &mut article.permissions),
        Some(MetaElement::Abstract) => {
            article.abstract_content = materialize_children(node);
        }
        Some(MetaElement::PageCount) => {
            if let Some(count) = node.attribute("count") {
                let parsed =
                    count
                        .parse::<u32>()
                        .map_err(|source| HarvestError::InvalidPageCount {
                            value: count.to_string(),
                            source,
                        })?;
                article.page_count = Some(parsed);
            }
        }
        Some(MetaElement::CustomMetaGroup) => parse_custom_meta(node, &mut article.metas),
        None => {
            for child in element_children(node) {
                parse_article_meta(child, article)?;
            }
        }
    }
    Ok(())
}

fn parse_back(node: Node<'_, '_>, article: &mut Article) {
    match BackElement::from_name(get_tag_name(node)) {
        Some(BackElement::Ack) => article.ack = materialize_children(node),
        Some(BackElement::RefList) => parse_refs(node, &mut article.refs),
        None => {}
    }

    for child in element_children(node) {
        parse_back(child, article);
    }
}

fn parse_categories(node: Node<'_, '_>, categories: &mut Vec<Category>) {
    if get_tag_name(node) == "subj-group" {
        if let Some(group) = node.attribute("subj-group-type") {
            categories.push(Category {
                group: group.to_string(),
                subject: child_inner_text(node, "subject"),
            });
        }
    }

    for child in element_children(node) {
        parse_categories(child, categories);
    }
}

fn parse_titles(node: Node<'_, '_>, titles: &mut Vec<String>) {
    if get_tag_name(node) == "article-title" {
        titles.push(inner_text(node));
    }

    for child in element_children(node) {
        parse_titles(child, titles);
    }
}

fn parse_contributors(node: Node<'_, '_>, contributors: &mut Vec<Contributor>) {
    if get_tag_name(node) == "contrib" {
        // A contrib without a contrib-type attribute is skipped.
        if let Some(kind) = node.attribute("contrib-type") {
            contributors.push(Contributor {
                kind: kind.to_string(),
                surname: child_inner_text(node, "surname"),
                given_names: child_inner_text(node, "given-names"),
            });
        }
    }

    for child in element_children(node) {
        parse_contributors(child, contributors);
    }
}

fn parse_author_notes(node: Node<'_, '_>, notes: &mut Vec<AuthorNote>) {
    if get_tag_name(node) == "corresp" {
        notes.push(AuthorNote {
            corresp_id: node.attribute("id").unwrap_or_default().to_string(),
            children: materialize_children(node),
        });
    }

    for child in element_children(node) {
        parse_author_notes(child, notes);
    }
}

fn parse_pub_date(node: Node<'_, '_>, article: &mut Article) {
    if let Some(kind) = node.attribute("pub-type") {
        let date = parse_date_parts(node);
        match kind {
            "ppub" => article.ppub = date,
            "epub" => article.epub = date,
            "pmc-release" => article.pmc_release = date,
            _ => {}
        }
    }
}

fn parse_history(node: Node<'_, '_>, history: &mut History) {
    if get_tag_name(node) == "date" {
        if let Some(kind) = node.attribute("date-type") {
            let date = parse_date_parts(node);
            match kind {
                "received" => history.received = date,
                "rev-recd" => history.revised = date,
                "accepted" => history.accepted = date,
                _ => {}
            }
        }
    }

    for child in element_children(node) {
        parse_history(child, history);
    }
}

fn parse_date_parts(node: Node<'_, '_>) -> ArticleDate {
    ArticleDate {
        day: child_inner_text(node, "day"),
        month: child_inner_text(node, "month"),
        year: child_inner_text(node, "year"),
    }
}

fn parse_permissions(node: Node<'_, '_>, permissions: &mut Permissions) {
    match get_tag_name(node) {
        "copyright-statement" => permissions.copyright_statement = inner_text(node),
        "copyright-year" => permissions.copyright_year = inner_text(node),
        "license" => {
            // Licenses accumulate in source order, one per occurrence.
            if let Some(kind) = node.attribute("license-type") {
                permissions.licenses.push(kind.to_string());
            }
        }
        _ => {}
    }

    for child in element_children(node) {
        parse_permissions(child, permissions);
    }
}

fn parse_custom_meta(node: Node<'_, '_>, metas: &mut Vec<CustomMeta>) {
    if get_tag_name(node) == "custom-meta" {
        metas.push(CustomMeta {
            name: child_inner_text(node, "meta-name"),
            value: child_inner_text(node, "meta-value"),
        });
    }

    for child in element_children(node) {
        parse_custom_meta(child, metas);
    }
}

fn parse_refs(node: Node<'_, '_>, refs: &mut RefList) {
    match get_tag_name(node) {
        "title" => refs.title = inner_text(node),
        "ref" => refs.list.push(parse_citation(node)),
        _ => {}
    }

    for child in element_children(node) {
        parse_refs(child, refs);
    }
}

fn parse_citation(node: Node<'_, '_>) -> Citation {
    let mut citation = Citation {
        id: node.attribute("id").unwrap_or_default().to_string(),
        label: child_inner_text(node, "label"),
        ..Citation::default()
    };
    parse_name_groups(node, &mut citation.groups);
    parse_element_citation(node, &mut citation);
    citation
}

fn parse_name_groups(node: Node<'_, '_>, groups: &mut Vec<NameGroup>) {
    if get_tag_name(node) == "person-group" {
        let mut group = NameGroup {
            kind: node
                .attribute("person-group-type")
                .unwrap_or_default()
                .to_string(),
            names: Vec::new(),
        };
        parse_names(node, &mut group.names);
        groups.push(group);
    }

    for child in element_children(node) {
        parse_name_groups(child, groups);
    }
}

fn parse_names(node: Node<'_, '_>, names: &mut Vec<HashMap<String, String>>) {
    if get_tag_name(node) == "name" {
        let mut name = HashMap::new();
        for part in element_children(node) {
            let value = inner_text(part);
            if !value.is_empty() {
                name.insert(get_tag_name(part).to_string(), value);
            }
        }
        names.push(name);
        return;
    }

    for child in element_children(node) {
        parse_names(child, names);
    }
}

fn parse_element_citation(node: Node<'_, '_>, citation: &mut Citation) {
    if get_tag_name(node) == "element-citation" {
        citation.title = child_inner_text(node, "article-title");
        citation.source = child_inner_text(node, "source");
        citation.year = child_inner_text(node, "year");
        citation.volume = child_inner_text(node, "volume");
        citation.fpage = child_inner_text(node, "fpage");
        citation.lpage = child_inner_text(node, "lpage");
        citation.pmid = child_inner_text(node, "pub-id");
        return;
    }

    for child in element_children(node) {
        parse_element_citation(child, citation);
    }
}

/// Materialize a free-form region from an element's children.
///
/// Text children are recorded verbatim; element children are materialized
/// recursively, keep their attributes, and get their sentence spans computed
/// immediately after their own children are built. Comments and processing
/// instructions are dropped.
pub fn materialize_children(node: Node<'_, '_>) -> Vec<ContentNode> {
    let mut children = Vec::new();
    for child in node.children() {
        if child.is_text() {
            children.push(ContentNode::text(child.text().unwrap_or_default()));
        } else if child.is_element() {
            children.push(ContentNode::element(
                get_tag_name(child),
                attr_map(child),
                materialize_children(child),
            ));
        }
    }
    children
}

fn attr_map(node: Node<'_, '_>) -> HashMap<String, String> {
    node.attributes()
        .map(|a| (attr_key(&a), a.value().to_string()))
        .collect()
}

/// Attribute key as written in the source, with the xlink prefix restored
/// for namespaced media references.
fn attr_key(attr: &roxmltree::Attribute<'_, '_>) -> String {
    match attr.namespace() {
        Some(XLINK_NS) => format!("xlink:{}", attr.name()),
        _ => attr.name().to_string(),
    }
}
