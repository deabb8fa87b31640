//! XML utility functions for navigating and extracting data from DOM trees.
//!
//! CWB documents declare a default namespace
//! (`urn:cwb:gov:tw:cwbcommon:0.1`), so every comparison here uses the
//! local tag name only.

use roxmltree::{Document, Node};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use cwb_opendata::xml::get_tag_name;
///
/// let xml = r#"<cwbopendata xmlns="urn:cwb:gov:tw:cwbcommon:0.1"><location/></cwbopendata>"#;
/// let doc = Document::parse(xml).unwrap();
/// let location = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(location), "location");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use cwb_opendata::xml::find_child;
///
/// let xml = r#"<location><lat>24.9943</lat><lon>121.3150</lon></location>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "lat").is_some());
/// assert!(find_child(root, "stationId").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Find all descendant elements with the given tag name, in document order.
pub fn find_descendants<'a, 'input: 'a>(
    doc: &'a Document<'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.descendants().filter(move |n| has_tag(*n, tag))
}

/// Find a descendant element matching a path of tag names.
///
/// # Arguments
/// * `node` - Starting node
/// * `path` - Slash-separated path of tag names (e.g., "time/obsTime")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use cwb_opendata::xml::find_by_path;
///
/// let xml = r#"<location><time><obsTime>2016-07-17T21:10:00+08:00</obsTime></time></location>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let obs = find_by_path(doc.root_element(), "time/obsTime");
/// assert_eq!(obs.unwrap().text(), Some("2016-07-17T21:10:00+08:00"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    path.split('/')
        .try_fold(node, |current, part| find_child(current, part))
}

/// Get the text content of a node, trimmed.
///
/// Joins every text node below `node`, so comments or processing
/// instructions inside a value do not cut it short. Returns an empty string
/// if the node has no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    text.trim().to_string()
}

/// Get the trimmed text of the element at `path` below `node`.
pub fn text_at(node: Node<'_, '_>, path: &str) -> Option<String> {
    find_by_path(node, path).map(get_text)
}
