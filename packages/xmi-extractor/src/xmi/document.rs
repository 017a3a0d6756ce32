//! Parsed XMI document bundled with its tagged-value table.

use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::{attrs, tagged, tags};
use crate::error::Result;
use crate::xml::{descendants_with_tag, find_descendant, get_attribute, parse_document};

use super::TaggedValues;

/// Read-only view over one XMI export.
///
/// Owned solely by one extraction run and never mutated after construction.
pub struct XmiDocument<'input> {
    doc: Document<'input>,
    tagged: TaggedValues,
}

impl<'input> XmiDocument<'input> {
    /// Parse normalized text and build the tagged-value table.
    ///
    /// # Errors
    /// [`crate::ExtractorError::XmlMalformed`] if the text is not well-formed.
    pub fn parse(text: &'input str, path: &Path) -> Result<Self> {
        let doc = parse_document(text, path)?;
        let tagged = TaggedValues::from_document(&doc);
        Ok(Self { doc, tagged })
    }

    /// The underlying tree.
    #[must_use]
    pub fn tree(&self) -> &Document<'input> {
        &self.doc
    }

    /// The tagged-value side table.
    #[must_use]
    pub fn tagged(&self) -> &TaggedValues {
        &self.tagged
    }

    /// All elements with the given local tag name, in document order.
    pub fn nodes_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = Node<'a, 'input>> {
        descendants_with_tag(self.doc.root_element(), tag)
    }

    /// The element's `xmi.id`.
    #[must_use]
    pub fn xmi_id<'a>(&self, node: Node<'a, '_>) -> Option<&'a str> {
        get_attribute(node, attrs::XMI_ID)
    }

    /// Identity used in element tables: `xmi.id`, or a position-based key for
    /// the rare element exported without one.
    #[must_use]
    pub fn element_key(&self, node: Node<'_, '_>) -> String {
        match self.xmi_id(node) {
            Some(id) => id.to_string(),
            None => format!("#node{}", node.id().get()),
        }
    }

    /// The element's display name.
    #[must_use]
    pub fn name<'a>(&self, node: Node<'a, '_>) -> Option<&'a str> {
        get_attribute(node, attrs::NAME)
    }

    /// Look up a tagged value owned by `node`.
    #[must_use]
    pub fn tagged_value(&self, node: Node<'_, '_>, tag: &str) -> Option<&str> {
        self.xmi_id(node).and_then(|id| self.tagged.get(id, tag))
    }

    /// The element's stereotype.
    ///
    /// Prefers a nested `Stereotype` element; falls back to the `stereotype`
    /// tagged value.
    #[must_use]
    pub fn stereotype<'a>(&'a self, node: Node<'a, 'input>) -> Option<&'a str> {
        find_descendant(node, tags::STEREOTYPE)
            .and_then(|s| get_attribute(s, attrs::NAME))
            .or_else(|| self.tagged_value(node, tagged::STEREOTYPE))
    }
}
