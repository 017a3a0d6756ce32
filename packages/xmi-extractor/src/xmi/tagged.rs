//! Tagged-value side table.
//!
//! The exporter encodes most semantic typing (`ea_stype`, `ea_sourceName`,
//! `stereotype`, ...) as `TaggedValue` elements instead of plain attributes.
//! A tagged value belongs to the element named by its `modelElement`
//! attribute. Otherwise it belongs to the element whose own
//! `ModelElement.taggedValue` block holds it, provided that element has an
//! `xmi.id`. Each owner holds at most one value per tag; later occurrences
//! in document order overwrite earlier ones.

use std::collections::HashMap;

use roxmltree::Document;

use crate::config::{attrs, tags};
use crate::xml::{descendants_with_tag, get_attribute, owning_element};

/// Mapping from owning element id to its tag/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedValues {
    by_owner: HashMap<String, HashMap<String, String>>,
}

impl TaggedValues {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `TaggedValue` in the document.
    ///
    /// Tagged values without a `tag` attribute or without a resolvable owner
    /// are skipped.
    #[must_use]
    pub fn from_document(doc: &Document<'_>) -> Self {
        let mut table = Self::new();
        let mut orphans = 0usize;

        for node in descendants_with_tag(doc.root_element(), tags::TAGGED_VALUE) {
            let Some(tag) = get_attribute(node, attrs::TAG) else {
                continue;
            };
            let owner = get_attribute(node, attrs::MODEL_ELEMENT).or_else(|| {
                owning_element(node).and_then(|owner| get_attribute(owner, attrs::XMI_ID))
            });
            let Some(owner) = owner else {
                orphans += 1;
                continue;
            };
            let value = node.attribute(attrs::VALUE).unwrap_or_default();
            table.insert(owner, tag, value);
        }

        tracing::debug!(
            owners = table.by_owner.len(),
            orphans,
            "Collected tagged values"
        );
        table
    }

    /// Set `tag` for `owner`, replacing any earlier value.
    pub fn insert(
        &mut self,
        owner: impl Into<String>,
        tag: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.by_owner
            .entry(owner.into())
            .or_default()
            .insert(tag.into(), value.into());
    }

    /// Look up a tag for an owner.
    ///
    /// A missing owner, a missing tag and an empty value all read as `None`.
    #[must_use]
    pub fn get(&self, owner: &str, tag: &str) -> Option<&str> {
        self.by_owner
            .get(owner)
            .and_then(|tags| tags.get(tag))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// All tags recorded for an owner.
    #[must_use]
    pub fn tags_of(&self, owner: &str) -> Option<&HashMap<String, String>> {
        self.by_owner.get(owner)
    }

    /// Number of owners with at least one tag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_owner.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_owner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XMI: &str = r#"<XMI xmlns:UML="omg.org/UML1.3"><XMI.content>
        <UML:ClassifierRole xmi.id="C1" name="Vending Machine">
            <UML:ModelElement.taggedValue>
                <UML:TaggedValue tag="ea_stype" value="Boundary"/>
                <UML:TaggedValue tag="note" value="first"/>
                <UML:TaggedValue tag="note" value="second"/>
                <UML:TaggedValue value="no tag"/>
            </UML:ModelElement.taggedValue>
        </UML:ClassifierRole>
        <UML:TaggedValue tag="id" value="REQ-001" modelElement="R1"/>
        <UML:TaggedValue tag="text" value="" modelElement="R1"/>
        <UML:TaggedValue tag="lost" value="x"/>
    </XMI.content></XMI>"#;

    #[test]
    fn test_nested_values_belong_to_enclosing_element() {
        let doc = Document::parse(XMI).unwrap();
        let table = TaggedValues::from_document(&doc);
        assert_eq!(table.get("C1", "ea_stype"), Some("Boundary"));
    }

    #[test]
    fn test_id_less_child_does_not_overwrite_parent() {
        let xml = r#"<XMI xmlns:UML="omg.org/UML1.3"><XMI.content>
            <UML:ClassifierRole xmi.id="B1" name="Kiosk">
                <UML:ModelElement.taggedValue>
                    <UML:TaggedValue tag="ea_stype" value="Boundary"/>
                </UML:ModelElement.taggedValue>
                <UML:ClassifierRole name="Sticky note">
                    <UML:ModelElement.taggedValue>
                        <UML:TaggedValue tag="ea_stype" value="Note"/>
                    </UML:ModelElement.taggedValue>
                </UML:ClassifierRole>
            </UML:ClassifierRole>
        </XMI.content></XMI>"#;
        let doc = Document::parse(xml).unwrap();
        let table = TaggedValues::from_document(&doc);
        assert_eq!(table.get("B1", "ea_stype"), Some("Boundary"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_later_duplicates_overwrite() {
        let doc = Document::parse(XMI).unwrap();
        let table = TaggedValues::from_document(&doc);
        assert_eq!(table.get("C1", "note"), Some("second"));
        assert_eq!(table.tags_of("C1").map(HashMap::len), Some(2));
    }

    #[test]
    fn test_model_element_reference() {
        let doc = Document::parse(XMI).unwrap();
        let table = TaggedValues::from_document(&doc);
        assert_eq!(table.get("R1", "id"), Some("REQ-001"));
    }

    #[test]
    fn test_missing_lookups_are_none() {
        let doc = Document::parse(XMI).unwrap();
        let table = TaggedValues::from_document(&doc);
        assert_eq!(table.get("R1", "text"), None);
        assert_eq!(table.get("R1", "absent"), None);
        assert_eq!(table.get("nobody", "id"), None);
        assert_eq!(table.len(), 2);
    }
}
