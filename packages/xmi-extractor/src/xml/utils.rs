//! XML utility functions for navigating and extracting data from XMI trees.
//!
//! Tags are matched on their local name. An element counts as a UML element
//! when it is either unqualified or bound to the UML 1.3 namespace, so both
//! `<UML:Actor>` and a bare `<Actor>` match `"Actor"`.

use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};

use crate::config::{tags, UML_NAMESPACE};
use crate::error::{ExtractorError, Result};

/// Parse normalized XMI text into a read-only tree.
///
/// DTD declarations are allowed because the exporter emits a `DOCTYPE`
/// line pointing at its own DTD file.
///
/// # Errors
/// [`ExtractorError::XmlMalformed`] carrying `path` when the text is not
/// well-formed XML.
pub fn parse_document<'input>(text: &'input str, path: &Path) -> Result<Document<'input>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options).map_err(|source| ExtractorError::XmlMalformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmi_extractor::xml::get_tag_name;
///
/// let xml = r#"<XMI xmlns:UML="omg.org/UML1.3"><UML:Actor name="Customer"/></XMI>"#;
/// let doc = Document::parse(xml).unwrap();
/// let actor = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(actor), "Actor");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element that is unqualified or in the UML namespace.
pub fn is_uml_element(node: Node<'_, '_>) -> bool {
    node.is_element()
        && node
            .tag_name()
            .namespace()
            .map_or(true, |ns| ns == UML_NAMESPACE)
}

/// Check if a node is a UML element with the given local tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    is_uml_element(node) && get_tag_name(node) == tag
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmi_extractor::xml::find_child;
///
/// let xml = r#"<root><child1/><child2/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "child1").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find a descendant element matching a path of tag names.
///
/// Each step only looks at direct children of the previous match.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmi_extractor::xml::find_by_path;
///
/// let xml = r#"<Guard><Guard.expression><BooleanExpression body="x > 0"/></Guard.expression></Guard>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let expr = find_by_path(doc.root_element(), "Guard.expression/BooleanExpression");
/// assert_eq!(expr.and_then(|n| n.attribute("body")), Some("x > 0"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;
    for part in path.split('/') {
        current = find_child(current, part)?;
    }
    Some(current)
}

/// Find the first descendant (excluding `node` itself) with the given tag.
pub fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| has_tag(*n, tag))
}

/// All descendants of `node` (including itself) with the given tag, in document order.
pub fn descendants_with_tag<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().filter(move |n| has_tag(*n, tag))
}

/// Get a non-empty attribute value from a node.
///
/// The exporter writes empty strings for unset names, so an empty value is
/// treated the same as a missing one.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|v| !v.is_empty())
}

/// Find the element whose `ModelElement.taggedValue` block directly holds `node`.
///
/// Returns `None` when `node` is not inside such a block. Elements nested
/// deeper belong to their own enclosing block, never to an outer element.
pub fn owning_element<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.parent_element()
        .filter(|p| has_tag(*p, tags::TAGGED_VALUE_CONTAINER))?
        .parent_element()
}
