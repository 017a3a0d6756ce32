//! Requirement diagram extraction: requirements with their external id and
//! text, plus the labelled relationships between them.

use serde::Serialize;

use super::{DiagramKind, Extractor};
use crate::config::{tagged, tags, MEMO_PREFIX, REQUIREMENT_STEREOTYPE};
use crate::model::{Element, ElementKind, ElementTable, Relationship, RelationshipSet};
use crate::xmi::XmiDocument;

/// The single element kind a requirement diagram contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RequirementKind {
    Requirement,
}

impl ElementKind for RequirementKind {
    fn as_str(&self) -> &'static str {
        "Requirement"
    }
}

/// Payload carried by a requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequirementData {
    /// Requirement number assigned in the modeling tool (the `id` tag).
    pub external_id: Option<String>,

    /// Requirement text with the notes marker removed.
    pub text: String,
}

/// A classified requirement.
pub type Requirement = Element<RequirementKind, RequirementData>;

/// Result of a requirement extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequirementModel {
    /// Requirements in discovery order.
    pub requirements: ElementTable<RequirementKind, RequirementData>,

    /// Relationships between elements, labelled by kind.
    pub relationships: RelationshipSet,
}

impl RequirementModel {
    /// Requirements ordered by external id; a missing id sorts as empty and
    /// ties keep discovery order.
    #[must_use]
    pub fn sorted_requirements(&self) -> Vec<&Requirement> {
        let mut requirements: Vec<_> = self.requirements.iter().collect();
        requirements.sort_by(|a, b| {
            let key = |r: &Requirement| r.data.external_id.clone().unwrap_or_default();
            key(a).cmp(&key(b))
        });
        requirements
    }
}

/// Strip the tool's notes marker from a requirement text and trim it.
///
/// # Examples
/// ```
/// use xmi_extractor::extract::requirement::clean_text;
///
/// assert_eq!(clean_text("<memo>#NOTES#  Accept 100 yen coins "), "Accept 100 yen coins");
/// assert_eq!(clean_text("plain"), "plain");
/// ```
#[must_use]
pub fn clean_text(value: &str) -> String {
    value
        .strip_prefix(MEMO_PREFIX)
        .unwrap_or(value)
        .trim()
        .to_string()
}

/// Extractor for requirement diagrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementExtractor;

impl RequirementExtractor {
    /// Collect ClassifierRoles stereotyped `requirement` that have both an
    /// `xmi.id` and a name.
    #[must_use]
    pub fn classify(&self, doc: &XmiDocument<'_>) -> ElementTable<RequirementKind, RequirementData> {
        let mut table = ElementTable::new();

        for node in doc.nodes_with_tag(tags::CLASSIFIER_ROLE) {
            if doc.stereotype(node) != Some(REQUIREMENT_STEREOTYPE) {
                continue;
            }
            let (Some(id), Some(name)) = (doc.xmi_id(node), doc.name(node)) else {
                tracing::debug!("Skipping requirement without id or name");
                continue;
            };

            let data = RequirementData {
                external_id: doc
                    .tagged_value(node, tagged::REQUIREMENT_ID)
                    .map(String::from),
                text: doc
                    .tagged_value(node, tagged::REQUIREMENT_TEXT)
                    .map(clean_text)
                    .unwrap_or_default(),
            };
            table.insert(Element::new(
                id,
                Some(name.to_string()),
                RequirementKind::Requirement,
                data,
            ));
        }

        tracing::debug!(requirements = table.len(), "Classified requirements");
        table
    }

    /// Resolve Dependency and Association edges by endpoint name.
    ///
    /// The kind label is the edge's stereotype, else its `ea_type`. Edges
    /// without a label or without both endpoint names are dropped.
    #[must_use]
    pub fn resolve(&self, doc: &XmiDocument<'_>) -> RelationshipSet {
        let mut relationships = RelationshipSet::new();

        let edges = doc
            .nodes_with_tag(tags::DEPENDENCY)
            .chain(doc.nodes_with_tag(tags::ASSOCIATION));

        for node in edges {
            let id = doc.xmi_id(node).unwrap_or_default();
            let Some(label) = doc
                .stereotype(node)
                .or_else(|| doc.tagged_value(node, tagged::EDGE_TYPE))
            else {
                tracing::warn!(id, "Dropping relationship without a kind label");
                continue;
            };
            let source = doc.tagged_value(node, tagged::SOURCE_NAME);
            let target = doc.tagged_value(node, tagged::TARGET_NAME);

            match (source, target) {
                (Some(source), Some(target)) => {
                    relationships.insert(Relationship::new(source, target, Some(label.to_string())));
                }
                _ => tracing::warn!(id, kind = label, "Relationship is missing an endpoint name"),
            }
        }

        relationships
    }
}

impl Extractor for RequirementExtractor {
    type Model = RequirementModel;

    fn kind(&self) -> DiagramKind {
        DiagramKind::Requirement
    }

    fn extract(&self, doc: &XmiDocument<'_>) -> RequirementModel {
        let requirements = self.classify(doc);
        let relationships = self.resolve(doc);

        tracing::debug!(
            requirements = requirements.len(),
            relationships = relationships.len(),
            "Extracted requirement diagram"
        );
        RequirementModel {
            requirements,
            relationships,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn requirement(id: &str, name: &str) -> String {
        format!(
            r#"<UML:ClassifierRole xmi.id="{id}" name="{name}">
                <UML:ModelElement.stereotype><UML:Stereotype name="requirement"/></UML:ModelElement.stereotype>
            </UML:ClassifierRole>"#
        )
    }

    fn tag(owner: &str, tag: &str, value: &str) -> String {
        format!(r#"<UML:TaggedValue tag="{tag}" value="{value}" modelElement="{owner}"/>"#)
    }

    fn dependency(id: &str, stereotype: &str, source: &str, target: &str) -> String {
        format!(
            r#"<UML:Dependency xmi.id="{id}">
                <UML:ModelElement.stereotype><UML:Stereotype name="{stereotype}"/></UML:ModelElement.stereotype>
                <UML:ModelElement.taggedValue>
                    <UML:TaggedValue tag="ea_sourceName" value="{source}"/>
                    <UML:TaggedValue tag="ea_targetName" value="{target}"/>
                </UML:ModelElement.taggedValue>
            </UML:Dependency>"#
        )
    }

    fn association(id: &str, ea_type: Option<&str>, source: &str, target: &str) -> String {
        let ea_type = ea_type
            .map(|t| format!(r#"<UML:TaggedValue tag="ea_type" value="{t}"/>"#))
            .unwrap_or_default();
        format!(
            r#"<UML:Association xmi.id="{id}">
                <UML:ModelElement.taggedValue>
                    {ea_type}
                    <UML:TaggedValue tag="ea_sourceName" value="{source}"/>
                    <UML:TaggedValue tag="ea_targetName" value="{target}"/>
                </UML:ModelElement.taggedValue>
            </UML:Association>"#
        )
    }

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<XMI xmi.version="1.1" xmlns:UML="omg.org/UML1.3"><XMI.content><UML:Model xmi.id="M">
{body}
</UML:Model></XMI.content></XMI>"#
        )
    }

    fn extract(xml: &str) -> RequirementModel {
        let doc = XmiDocument::parse(xml, Path::new("req.xml")).unwrap();
        RequirementExtractor.extract(&doc)
    }

    #[test]
    fn test_requirements_need_stereotype_and_name() {
        let xml = wrap(
            &[
                requirement("R1", "Sell drinks"),
                requirement("R2", ""),
                r#"<UML:ClassifierRole xmi.id="C1" name="Panel"/>"#.to_string(),
            ]
            .concat(),
        );
        let model = extract(&xml);
        assert_eq!(model.requirements.len(), 1);
        assert_eq!(model.requirements.get("R1").map(Element::label), Some("Sell drinks"));
    }

    #[test]
    fn test_payload_from_model_element_tags() {
        let xml = wrap(
            &[
                requirement("R1", "Accept coins"),
                tag("R1", "id", "REQ-002"),
                tag("R1", "text", "&lt;memo&gt;#NOTES#  Accept 10, 50, 100 yen  "),
            ]
            .concat(),
        );
        let model = extract(&xml);
        let req = model.requirements.get("R1").unwrap();
        assert_eq!(req.data.external_id.as_deref(), Some("REQ-002"));
        assert_eq!(req.data.text, "Accept 10, 50, 100 yen");
    }

    #[test]
    fn test_missing_payload_defaults() {
        let model = extract(&wrap(&requirement("R1", "Sell drinks")));
        let req = model.requirements.get("R1").unwrap();
        assert_eq!(req.data.external_id, None);
        assert_eq!(req.data.text, "");
    }

    #[test]
    fn test_sorted_by_external_id() {
        let xml = wrap(
            &[
                requirement("R1", "Third"),
                tag("R1", "id", "3"),
                requirement("R2", "Unnumbered"),
                requirement("R3", "First"),
                tag("R3", "id", "1"),
            ]
            .concat(),
        );
        let model = extract(&xml);
        let names: Vec<_> = model.sorted_requirements().iter().map(|r| r.label()).collect();
        assert_eq!(names, vec!["Unnumbered", "First", "Third"]);
    }

    #[test]
    fn test_relationship_labels() {
        let xml = wrap(
            &[
                dependency("D1", "deriveReqt", "Sell drinks", "Accept coins"),
                association("E1", Some("Nesting"), "Sell drinks", "Give change"),
                association("E2", None, "Sell drinks", "Orphan"),
            ]
            .concat(),
        );
        let model = extract(&xml);
        let groups = model.relationships.by_kind();

        assert_eq!(model.relationships.len(), 2);
        assert_eq!(groups["deriveReqt"][0].target, "Accept coins");
        assert_eq!(groups["Nesting"][0].target, "Give change");
    }

    #[test]
    fn test_edge_without_endpoint_name_is_dropped() {
        let xml = wrap(
            r#"<UML:Association xmi.id="E1">
                <UML:ModelElement.taggedValue>
                    <UML:TaggedValue tag="ea_type" value="Nesting"/>
                    <UML:TaggedValue tag="ea_sourceName" value="Sell drinks"/>
                </UML:ModelElement.taggedValue>
            </UML:Association>"#,
        );
        assert!(extract(&xml).relationships.is_empty());
    }

    #[test]
    fn test_identical_edges_merge() {
        let xml = wrap(
            &[
                dependency("D1", "refine", "A", "B"),
                dependency("D2", "refine", "A", "B"),
                dependency("D3", "trace", "A", "B"),
            ]
            .concat(),
        );
        assert_eq!(extract(&xml).relationships.len(), 2);
    }
}
