//! Helper functions for navigating and extracting data from JATS DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use pmc_harvester::xml::get_tag_name;
///
/// let xml = r#"<article><front>text</front></article>"#;
/// let doc = Document::parse(xml).unwrap();
/// let front = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(front), "front");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use pmc_harvester::xml::find_child;
///
/// let xml = r#"<ref><label/><element-citation/></ref>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "label").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get all element children of a node.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get the trimmed text content directly inside a node.
///
/// Only the node's leading text is read; text inside nested elements is
/// not collected.
pub fn inner_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get the inner text of a same-named descendant.
///
/// Searches the subtree rooted at `node` (including `node` itself) for
/// elements named `tag` and returns the last non-empty inner text in
/// document order, or an empty string when nothing matches.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use pmc_harvester::xml::child_inner_text;
///
/// let xml = r#"<contrib><name><surname>Curie</surname></name></contrib>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(child_inner_text(doc.root_element(), "surname"), "Curie");
/// assert_eq!(child_inner_text(doc.root_element(), "missing"), "");
/// ```
pub fn child_inner_text(node: Node<'_, '_>, tag: &str) -> String {
    node.descendants()
        .filter(|n| n.is_element() && get_tag_name(*n) == tag)
        .map(inner_text)
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name() {
        let xml = r#"<article><sec/></article>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "article");
    }

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<x:article xmlns:x="http://example.com"><x:sec/></x:article>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "article");
    }

    #[test]
    fn test_find_child() {
        let xml = r#"<root><a/><b/><c/></root>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert!(find_child(root, "a").is_some());
        assert!(find_child(root, "c").is_some());
        assert!(find_child(root, "d").is_none());
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<root><item>1</item><other/><item>2</item></root>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        let items: Vec<_> = find_children(root, "item").collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_element_children_skips_text() {
        let xml = r#"<root>text<a/>more<b/></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(element_children(doc.root_element()).count(), 2);
    }

    #[test]
    fn test_inner_text() {
        let xml = r#"<volume>  41  </volume>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(inner_text(doc.root_element()), "41");
    }

    #[test]
    fn test_inner_text_empty() {
        let xml = r#"<volume><nested/></volume>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(inner_text(doc.root_element()), "");
    }

    #[test]
    fn test_child_inner_text_nested() {
        let xml = r#"<contrib><name><surname>Curie</surname><given-names>Marie</given-names></name></contrib>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert_eq!(child_inner_text(root, "surname"), "Curie");
        assert_eq!(child_inner_text(root, "given-names"), "Marie");
    }

    #[test]
    fn test_child_inner_text_prefers_last_non_empty() {
        let xml = r#"<ref><year></year><citation><year>2012</year></citation></ref>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(child_inner_text(doc.root_element(), "year"), "2012");
    }
}
