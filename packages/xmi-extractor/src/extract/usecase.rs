//! Use-case diagram extraction: actors, use cases, the system boundary, and
//! actor/use-case associations.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{DiagramKind, Extractor};
use crate::config::{tagged, tags, BOUNDARY_STYPE};
use crate::model::{Element, ElementKind, ElementTable, Relationship, RelationshipSet};
use crate::xmi::XmiDocument;
use crate::xml::{get_tag_name, is_uml_element};

/// Element kinds a use-case diagram contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UseCaseKind {
    Actor,
    UseCase,
    Boundary,
}

impl UseCaseKind {
    /// Classify by element tag. `None` means the tag is not of interest.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            tags::ACTOR => Some(Self::Actor),
            tags::USE_CASE => Some(Self::UseCase),
            _ => None,
        }
    }

    /// Classify an `ea_sourceType`/`ea_targetType` value.
    #[must_use]
    pub fn from_endpoint_type(value: &str) -> Option<Self> {
        match value {
            "Actor" => Some(Self::Actor),
            "UseCase" => Some(Self::UseCase),
            _ => None,
        }
    }
}

impl ElementKind for UseCaseKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Actor => "Actor",
            Self::UseCase => "UseCase",
            Self::Boundary => "Boundary",
        }
    }
}

/// Result of a use-case extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UseCaseModel {
    /// Name of the system boundary, if one is drawn.
    pub boundary: Option<String>,

    /// Distinct actor names, sorted.
    pub actors: Vec<String>,

    /// Distinct use-case names, sorted.
    pub use_cases: Vec<String>,

    /// Associations as (actor, use case) pairs.
    pub associations: RelationshipSet,
}

/// Extractor for use-case diagrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseCaseExtractor;

impl UseCaseExtractor {
    /// Collect named Actor and UseCase elements, plus the first named
    /// ClassifierRole tagged as a boundary.
    #[must_use]
    pub fn classify(&self, doc: &XmiDocument<'_>) -> ElementTable<UseCaseKind> {
        let mut table = ElementTable::new();

        for node in doc.tree().descendants().filter(|n| is_uml_element(*n)) {
            let Some(kind) = UseCaseKind::from_tag(get_tag_name(node)) else {
                continue;
            };
            match doc.name(node) {
                Some(name) => {
                    table.insert(Element::new(
                        doc.element_key(node),
                        Some(name.to_string()),
                        kind,
                        (),
                    ));
                }
                None => tracing::debug!(kind = kind.as_str(), "Skipping unnamed element"),
            }
        }

        let mut boundaries = doc
            .nodes_with_tag(tags::CLASSIFIER_ROLE)
            .filter(|n| doc.tagged_value(*n, tagged::STYPE) == Some(BOUNDARY_STYPE))
            .filter_map(|n| doc.name(n).map(|name| (doc.element_key(n), name)));

        if let Some((id, name)) = boundaries.next() {
            table.insert(Element::new(
                id,
                Some(name.to_string()),
                UseCaseKind::Boundary,
                (),
            ));
        }
        for (_, ignored) in boundaries {
            tracing::warn!(boundary = ignored, "Ignoring additional system boundary");
        }

        table
    }

    /// Resolve associations between an actor and a use case.
    ///
    /// Edges are read from the association's own tagged values. Either
    /// direction is accepted and normalized to (actor, use case); any other
    /// endpoint pairing is skipped.
    #[must_use]
    pub fn resolve(&self, doc: &XmiDocument<'_>) -> RelationshipSet {
        let mut associations = RelationshipSet::new();

        for node in doc.nodes_with_tag(tags::ASSOCIATION) {
            let value = move |tag: &str| doc.tagged_value(node, tag);
            let source_type = value(tagged::SOURCE_TYPE).and_then(UseCaseKind::from_endpoint_type);
            let target_type = value(tagged::TARGET_TYPE).and_then(UseCaseKind::from_endpoint_type);
            let source_name = value(tagged::SOURCE_NAME);
            let target_name = value(tagged::TARGET_NAME);

            let (actor, use_case) = match (source_type, target_type) {
                (Some(UseCaseKind::Actor), Some(UseCaseKind::UseCase)) => (source_name, target_name),
                (Some(UseCaseKind::UseCase), Some(UseCaseKind::Actor)) => (target_name, source_name),
                _ => continue,
            };

            match (actor, use_case) {
                (Some(actor), Some(use_case)) => {
                    if !associations.insert(Relationship::new(actor, use_case, None)) {
                        tracing::debug!(actor, use_case, "Merged duplicate association");
                    }
                }
                _ => tracing::warn!(
                    id = doc.xmi_id(node).unwrap_or_default(),
                    "Association is missing an endpoint name"
                ),
            }
        }

        associations
    }
}

impl Extractor for UseCaseExtractor {
    type Model = UseCaseModel;

    fn kind(&self) -> DiagramKind {
        DiagramKind::UseCase
    }

    fn extract(&self, doc: &XmiDocument<'_>) -> UseCaseModel {
        let table = self.classify(doc);
        let associations = self.resolve(doc);

        let distinct = |kind| -> Vec<String> {
            table
                .of_kind(kind)
                .map(|e| e.label().to_string())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        let model = UseCaseModel {
            boundary: table
                .of_kind(UseCaseKind::Boundary)
                .next()
                .and_then(|e| e.name.clone()),
            actors: distinct(UseCaseKind::Actor),
            use_cases: distinct(UseCaseKind::UseCase),
            associations,
        };

        tracing::debug!(
            actors = model.actors.len(),
            use_cases = model.use_cases.len(),
            associations = model.associations.len(),
            "Extracted use-case diagram"
        );
        model
    }
}
