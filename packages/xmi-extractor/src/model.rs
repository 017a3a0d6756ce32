//! Core data types shared by the extractors.
//!
//! Elements are keyed by their document-local id and kept in discovery order.
//! Relationships are stored by display name, not id, so two elements sharing a
//! name are indistinguishable once resolved.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Closed per-extractor set of domain kinds.
pub trait ElementKind: Copy + Eq + Debug {
    /// Literal used in reports and as the fallback display name.
    fn as_str(&self) -> &'static str;
}

/// A classified model element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element<K, D = ()> {
    /// Document-local id.
    pub id: String,

    /// Display name; absent for anonymous nodes such as unlabeled decisions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Domain kind.
    pub kind: K,

    /// Extractor-specific payload.
    pub data: D,
}

impl<K: ElementKind, D> Element<K, D> {
    /// Create an element.
    #[must_use]
    pub fn new(id: impl Into<String>, name: Option<String>, kind: K, data: D) -> Self {
        Self {
            id: id.into(),
            name,
            kind,
            data,
        }
    }

    /// Name used in reports: the display name, or the kind literal when unnamed.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.kind.as_str())
    }
}

/// Classified elements keyed by id, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTable<K, D = ()> {
    elements: IndexMap<String, Element<K, D>>,
}

impl<K: ElementKind, D> ElementTable<K, D> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: IndexMap::new(),
        }
    }

    /// Add an element. Returns `false` and keeps the first element when the
    /// id is already present.
    pub fn insert(&mut self, element: Element<K, D>) -> bool {
        if self.elements.contains_key(&element.id) {
            tracing::debug!(id = %element.id, "Duplicate element id ignored");
            return false;
        }
        self.elements.insert(element.id.clone(), element);
        true
    }

    /// Look up an element by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element<K, D>> {
        self.elements.get(id)
    }

    /// Whether an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// All elements in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Element<K, D>> {
        self.elements.values()
    }

    /// Elements of one kind, in discovery order.
    pub fn of_kind(&self, kind: K) -> impl Iterator<Item = &Element<K, D>> {
        self.elements.values().filter(move |e| e.kind == kind)
    }

    /// Elements of one kind sorted by label (case-sensitive), ties kept in
    /// discovery order.
    #[must_use]
    pub fn sorted_of_kind(&self, kind: K) -> Vec<&Element<K, D>> {
        let mut elements: Vec<_> = self.of_kind(kind).collect();
        elements.sort_by(|a, b| a.label().cmp(b.label()));
        elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<K: ElementKind, D> Default for ElementTable<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Serialize, D: Serialize> Serialize for ElementTable<K, D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.elements.values())
    }
}

/// A resolved edge between two named elements.
///
/// Ordering is (source, target, kind), which is also the report order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Relationship {
    /// Source display name.
    pub source: String,

    /// Target display name.
    pub target: String,

    /// Relationship kind label, or guard condition for flows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Relationship {
    /// Create a relationship.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: Option<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }
}

/// Ordered set of relationships, de-duplicated on (source, target, kind).
///
/// Two distinct edge nodes resolving to the same displayed triple collapse
/// into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelationshipSet {
    relationships: BTreeSet<Relationship>,
}

impl RelationshipSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship. Returns `false` if an identical one was present.
    pub fn insert(&mut self, relationship: Relationship) -> bool {
        self.relationships.insert(relationship)
    }

    /// Relationships in (source, target, kind) order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// Group by source name; groups and members are sorted.
    #[must_use]
    pub fn by_source(&self) -> BTreeMap<&str, Vec<&Relationship>> {
        let mut groups: BTreeMap<&str, Vec<&Relationship>> = BTreeMap::new();
        for rel in &self.relationships {
            groups.entry(rel.source.as_str()).or_default().push(rel);
        }
        groups
    }

    /// Group by kind label; relationships without a label are left out.
    #[must_use]
    pub fn by_kind(&self) -> BTreeMap<&str, Vec<&Relationship>> {
        let mut groups: BTreeMap<&str, Vec<&Relationship>> = BTreeMap::new();
        for rel in &self.relationships {
            if let Some(kind) = rel.kind.as_deref() {
                groups.entry(kind).or_default().push(rel);
            }
        }
        groups
    }

    /// Number of relationships.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

impl FromIterator<Relationship> for RelationshipSet {
    fn from_iter<I: IntoIterator<Item = Relationship>>(iter: I) -> Self {
        Self {
            relationships: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    enum Kind {
        Node,
        Gate,
    }

    impl ElementKind for Kind {
        fn as_str(&self) -> &'static str {
            match self {
                Self::Node => "Node",
                Self::Gate => "Gate",
            }
        }
    }

    #[test]
    fn test_label_falls_back_to_kind() {
        let named = Element::new("1", Some("Start".to_string()), Kind::Node, ());
        let anonymous = Element::new("2", None, Kind::Gate, ());
        assert_eq!(named.label(), "Start");
        assert_eq!(anonymous.label(), "Gate");
    }

    #[test]
    fn test_table_keeps_first_duplicate_id() {
        let mut table = ElementTable::new();
        assert!(table.insert(Element::new("1", Some("a".to_string()), Kind::Node, ())));
        assert!(!table.insert(Element::new("1", Some("b".to_string()), Kind::Node, ())));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("1").and_then(|e| e.name.as_deref()), Some("a"));
    }

    #[test]
    fn test_sorted_of_kind_is_stable() {
        let mut table = ElementTable::new();
        table.insert(Element::new("1", Some("b".to_string()), Kind::Node, 1));
        table.insert(Element::new("2", Some("a".to_string()), Kind::Node, 2));
        table.insert(Element::new("3", Some("b".to_string()), Kind::Node, 3));
        table.insert(Element::new("4", Some("B".to_string()), Kind::Node, 4));
        table.insert(Element::new("5", Some("a".to_string()), Kind::Gate, 5));

        let order: Vec<i32> = table.sorted_of_kind(Kind::Node).iter().map(|e| e.data).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_relationship_set_dedups_triples() {
        let mut set = RelationshipSet::new();
        assert!(set.insert(Relationship::new("A", "B", Some("trace".to_string()))));
        assert!(!set.insert(Relationship::new("A", "B", Some("trace".to_string()))));
        assert!(set.insert(Relationship::new("A", "B", Some("refine".to_string()))));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_by_source_groups_sorted() {
        let set: RelationshipSet = [
            Relationship::new("Maintainer", "RefillStock", None),
            Relationship::new("Customer", "BuyItem", None),
            Relationship::new("Customer", "AskRefund", None),
        ]
        .into_iter()
        .collect();

        let groups = set.by_source();
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["Customer", "Maintainer"]);
        let customer: Vec<_> = groups["Customer"].iter().map(|r| r.target.as_str()).collect();
        assert_eq!(customer, vec!["AskRefund", "BuyItem"]);
    }

    #[test]
    fn test_by_kind_skips_unlabelled() {
        let set: RelationshipSet = [
            Relationship::new("A", "B", Some("deriveReqt".to_string())),
            Relationship::new("C", "D", None),
        ]
        .into_iter()
        .collect();
        let groups = set.by_kind();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["deriveReqt"].len(), 1);
    }

    #[test]
    fn test_table_serializes_as_sequence() {
        let mut table = ElementTable::new();
        table.insert(Element::new("1", Some("Start".to_string()), Kind::Node, ()));
        let json = serde_json::to_value(&table).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Start");
        assert_eq!(json[0]["kind"], "Node");
    }
}
