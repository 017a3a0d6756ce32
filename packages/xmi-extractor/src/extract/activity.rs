//! Activity diagram extraction: partitions and their actions, decisions, and
//! the control flow between nodes.

use serde::Serialize;

use super::{DiagramKind, Extractor};
use crate::config::{attrs, tagged, tags, UNKNOWN_ID_LABEL};
use crate::model::{Element, ElementKind, ElementTable, Relationship, RelationshipSet};
use crate::xmi::XmiDocument;
use crate::xml::{find_by_path, find_descendant, get_attribute, get_tag_name, has_tag, is_uml_element};

/// Element kinds an activity diagram contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActivityKind {
    Action,
    Decision,
    Partition,
    ObjectNode,
    ActionPin,
    StateNode,
    MergeNode,
}

impl ActivityKind {
    /// Map an `ea_stype` value onto a kind. `None` marks a node kind this
    /// extractor does not report.
    ///
    /// # Examples
    /// ```
    /// use xmi_extractor::extract::ActivityKind;
    ///
    /// assert_eq!(ActivityKind::from_stype("Activity"), Some(ActivityKind::Action));
    /// assert_eq!(ActivityKind::from_stype("ActivityPartition"), Some(ActivityKind::Partition));
    /// assert_eq!(ActivityKind::from_stype("Note"), None);
    /// ```
    #[must_use]
    pub fn from_stype(value: &str) -> Option<Self> {
        match value {
            "ActivityPartition" => Some(Self::Partition),
            "Action" | "Activity" => Some(Self::Action),
            "Decision" => Some(Self::Decision),
            "ObjectNode" => Some(Self::ObjectNode),
            "ActionPin" => Some(Self::ActionPin),
            "StateNode" => Some(Self::StateNode),
            "MergeNode" => Some(Self::MergeNode),
            _ => None,
        }
    }
}

impl ElementKind for ActivityKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Decision => "Decision",
            Self::Partition => "Partition",
            Self::ObjectNode => "ObjectNode",
            Self::ActionPin => "ActionPin",
            Self::StateNode => "StateNode",
            Self::MergeNode => "MergeNode",
        }
    }
}

/// Payload carried by activity elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeData {
    /// Id of the owning partition (actions only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// A partition with the names of the actions it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub id: String,
    pub name: String,
    /// Named actions owned by this partition, in discovery order.
    pub actions: Vec<String>,
}

/// Result of an activity extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityModel {
    /// Every classified node.
    pub elements: ElementTable<ActivityKind, NodeData>,

    /// Partitions in discovery order.
    pub partitions: Vec<Partition>,

    /// Transitions as (source label, target label, guard).
    pub flows: RelationshipSet,
}

impl ActivityModel {
    /// Labels of all decision nodes, in discovery order.
    pub fn decisions(&self) -> impl Iterator<Item = &str> {
        self.elements
            .of_kind(ActivityKind::Decision)
            .map(Element::label)
    }
}

/// Extractor for activity diagrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityExtractor;

impl ActivityExtractor {
    /// Classify ActionState, PseudoState and ClassifierRole nodes by their
    /// `ea_stype` tagged value.
    #[must_use]
    pub fn classify(&self, doc: &XmiDocument<'_>) -> ElementTable<ActivityKind, NodeData> {
        let mut table = ElementTable::new();
        let mut skipped = 0usize;

        let candidates = doc.tree().descendants().filter(|n| {
            is_uml_element(*n)
                && matches!(
                    get_tag_name(*n),
                    tags::ACTION_STATE | tags::PSEUDO_STATE | tags::CLASSIFIER_ROLE
                )
        });

        for node in candidates {
            let Some(id) = doc.xmi_id(node) else {
                continue;
            };
            let Some(kind) = doc
                .tagged_value(node, tagged::STYPE)
                .and_then(ActivityKind::from_stype)
            else {
                skipped += 1;
                continue;
            };

            let name = match kind {
                ActivityKind::Partition => doc
                    .tagged_value(node, tagged::CLASSNAME)
                    .or_else(|| doc.name(node)),
                _ => doc.name(node),
            };
            let data = NodeData {
                owner: match kind {
                    ActivityKind::Action => doc.tagged_value(node, tagged::OWNER).map(String::from),
                    _ => None,
                },
            };

            table.insert(Element::new(id, name.map(String::from), kind, data));
        }

        tracing::debug!(elements = table.len(), skipped, "Classified activity nodes");
        table
    }

    /// Group named actions under the partition named by their owner tag.
    ///
    /// Actions whose owner is missing or is not a partition stay in the
    /// element table but belong to no partition.
    #[must_use]
    pub fn partitions(&self, table: &ElementTable<ActivityKind, NodeData>) -> Vec<Partition> {
        let mut partitions: Vec<Partition> = table
            .of_kind(ActivityKind::Partition)
            .map(|p| Partition {
                id: p.id.clone(),
                name: p.label().to_string(),
                actions: Vec::new(),
            })
            .collect();

        for action in table.of_kind(ActivityKind::Action) {
            let Some(owner) = action.data.owner.as_deref() else {
                continue;
            };
            match partitions.iter_mut().find(|p| p.id == owner) {
                Some(partition) => {
                    if let Some(name) = &action.name {
                        partition.actions.push(name.clone());
                    }
                }
                None => tracing::debug!(action = action.label(), owner, "Action owner is not a partition"),
            }
        }

        partitions
    }

    /// Resolve transitions listed under `StateMachine.transitions`.
    ///
    /// Endpoint ids are looked up in the classified table. An id with no
    /// element renders as `unknown id(<id>)` so one broken edge does not
    /// hide the rest of the flow.
    #[must_use]
    pub fn resolve(
        &self,
        doc: &XmiDocument<'_>,
        table: &ElementTable<ActivityKind, NodeData>,
    ) -> RelationshipSet {
        let mut flows = RelationshipSet::new();

        let transitions = doc
            .nodes_with_tag(tags::TRANSITION)
            .filter(|n| n.parent().is_some_and(|p| has_tag(p, tags::TRANSITIONS)));

        for node in transitions {
            let endpoint = |attr: &str| {
                let id = get_attribute(node, attr);
                match id.and_then(|id| table.get(id)) {
                    Some(element) => element.label().to_string(),
                    None => {
                        let id = id.unwrap_or_default();
                        tracing::warn!(id, endpoint = attr, "Unresolved transition endpoint");
                        format!("{UNKNOWN_ID_LABEL}({id})")
                    }
                }
            };
            let source = endpoint(attrs::SOURCE);
            let target = endpoint(attrs::TARGET);
            let guard = find_descendant(node, tags::GUARD)
                .and_then(|g| find_by_path(g, tags::GUARD_EXPRESSION_PATH))
                .and_then(|expr| get_attribute(expr, attrs::BODY))
                .map(String::from);

            flows.insert(Relationship::new(source, target, guard));
        }

        flows
    }
}

impl Extractor for ActivityExtractor {
    type Model = ActivityModel;

    fn kind(&self) -> DiagramKind {
        DiagramKind::Activity
    }

    fn extract(&self, doc: &XmiDocument<'_>) -> ActivityModel {
        let elements = self.classify(doc);
        let partitions = self.partitions(&elements);
        let flows = self.resolve(doc, &elements);

        tracing::debug!(
            partitions = partitions.len(),
            flows = flows.len(),
            "Extracted activity diagram"
        );
        ActivityModel {
            elements,
            partitions,
            flows,
        }
    }
}
