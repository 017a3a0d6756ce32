//! Format constants and small helpers shared by the extractors.
//!
//! The exporter targeted here writes XMI 1.3 with a fixed legacy encoding and
//! a tool-specific tagged-value vocabulary. All of those names live here so
//! the extractors never spell a raw string twice.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::Regex;

/// Encoding the exporter writes, regardless of what the XML header claims.
pub static SOURCE_ENCODING: &Encoding = &encoding_rs::SHIFT_JIS_INIT;

/// Encoding value written into the rewritten XML declaration.
pub const CANONICAL_ENCODING: &str = "UTF-8";

/// Namespace URI bound to the `UML:` prefix in XMI 1.3 exports.
pub const UML_NAMESPACE: &str = "omg.org/UML1.3";

/// First `encoding="..."` (or single-quoted) occurrence in the document.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static ENCODING_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"encoding=['"].*?['"]"#).expect("valid regex"));

/// Marker the exporter prepends to memo-typed tagged values.
pub const MEMO_PREFIX: &str = "<memo>#NOTES#";

/// Stereotype name marking a ClassifierRole as a requirement.
pub const REQUIREMENT_STEREOTYPE: &str = "requirement";

/// `ea_stype` value marking a ClassifierRole as the system boundary.
pub const BOUNDARY_STYPE: &str = "Boundary";

/// Prefix of the label rendered for transition endpoints with no element.
pub const UNKNOWN_ID_LABEL: &str = "unknown id";

/// Element tag names (local part, `UML:` prefix stripped).
pub mod tags {
    pub const ACTOR: &str = "Actor";
    pub const USE_CASE: &str = "UseCase";
    pub const CLASSIFIER_ROLE: &str = "ClassifierRole";
    pub const ACTION_STATE: &str = "ActionState";
    pub const PSEUDO_STATE: &str = "PseudoState";
    pub const ASSOCIATION: &str = "Association";
    pub const DEPENDENCY: &str = "Dependency";
    pub const TRANSITION: &str = "Transition";
    pub const TRANSITIONS: &str = "StateMachine.transitions";
    pub const GUARD: &str = "Guard";
    pub const GUARD_EXPRESSION_PATH: &str = "Guard.expression/BooleanExpression";
    pub const TAGGED_VALUE: &str = "TaggedValue";
    pub const TAGGED_VALUE_CONTAINER: &str = "ModelElement.taggedValue";
    pub const STEREOTYPE: &str = "Stereotype";
}

/// XML attribute names.
pub mod attrs {
    pub const XMI_ID: &str = "xmi.id";
    pub const NAME: &str = "name";
    pub const TAG: &str = "tag";
    pub const VALUE: &str = "value";
    pub const MODEL_ELEMENT: &str = "modelElement";
    pub const SOURCE: &str = "source";
    pub const TARGET: &str = "target";
    pub const BODY: &str = "body";
}

/// Tagged-value keys written by the exporter.
pub mod tagged {
    pub const STYPE: &str = "ea_stype";
    pub const SOURCE_NAME: &str = "ea_sourceName";
    pub const TARGET_NAME: &str = "ea_targetName";
    pub const SOURCE_TYPE: &str = "ea_sourceType";
    pub const TARGET_TYPE: &str = "ea_targetType";
    pub const EDGE_TYPE: &str = "ea_type";
    pub const STEREOTYPE: &str = "stereotype";
    pub const CLASSNAME: &str = "classname";
    pub const OWNER: &str = "owner";
    pub const REQUIREMENT_ID: &str = "id";
    pub const REQUIREMENT_TEXT: &str = "text";
}

/// Build the default report path next to the input file.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use xmi_extractor::config::default_output_path;
///
/// let out = default_output_path(Path::new("diagrams/usecase.xml"), "elements", "md");
/// assert_eq!(out, Path::new("diagrams/usecase_elements.md"));
/// ```
#[must_use]
pub fn default_output_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    input.with_file_name(format!("{stem}_{suffix}.{extension}"))
}
