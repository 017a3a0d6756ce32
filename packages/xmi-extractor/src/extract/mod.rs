//! The three diagram extractors and the pipeline that drives them.
//!
//! Every extractor runs the same stages: normalize the legacy bytes, parse the
//! tree, classify domain elements through the tagged-value table, and resolve
//! edges against the classified elements. Rendering lives in [`crate::report`].

pub mod activity;
pub mod requirement;
pub mod usecase;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::encoding::read_source;
use crate::error::Result;
use crate::xmi::XmiDocument;

pub use activity::{ActivityExtractor, ActivityKind, ActivityModel};
pub use requirement::{Requirement, RequirementExtractor, RequirementKind, RequirementModel};
pub use usecase::{UseCaseExtractor, UseCaseKind, UseCaseModel};

/// One diagram-specific classification and relationship schema.
pub trait Extractor {
    /// Extracted elements and relationships.
    type Model: Serialize;

    /// Which diagram this extractor reads.
    fn kind(&self) -> DiagramKind;

    /// Classify elements and resolve relationships in a parsed document.
    fn extract(&self, doc: &XmiDocument<'_>) -> Self::Model;
}

/// Run an extractor over a file on disk.
///
/// # Errors
/// Fails with the file path attached when the file is missing, cannot be
/// decoded, or is not well-formed after normalization. No partial model is
/// returned.
pub fn extract_file<E: Extractor>(extractor: &E, path: &Path) -> Result<E::Model> {
    let text = read_source(path)?;
    extract_str(extractor, &text, path)
}

/// Run an extractor over already-normalized text.
///
/// `path` is only used for error reporting.
///
/// # Errors
/// [`crate::ExtractorError::XmlMalformed`] if the text is not well-formed.
pub fn extract_str<E: Extractor>(extractor: &E, text: &str, path: &Path) -> Result<E::Model> {
    let doc = XmiDocument::parse(text, path)?;
    tracing::debug!(
        path = %path.display(),
        diagram = %extractor.kind(),
        tagged_owners = doc.tagged().len(),
        "Parsed XMI document"
    );
    Ok(extractor.extract(&doc))
}

/// Diagram types this crate extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    /// Actors, use cases, system boundary.
    UseCase,
    /// Partitions, actions, decisions, flows.
    Activity,
    /// Requirements and their relationships.
    Requirement,
}

impl DiagramKind {
    /// Short identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UseCase => "usecase",
            Self::Activity => "activity",
            Self::Requirement => "requirement",
        }
    }

    /// Suffix appended to the input stem for the default report path.
    #[must_use]
    pub fn output_suffix(&self) -> &'static str {
        match self {
            Self::UseCase | Self::Requirement => "elements",
            Self::Activity => "activity",
        }
    }

    /// Report title used when the caller does not supply one.
    #[must_use]
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::UseCase => "Use Case Analysis",
            Self::Activity => "Activity Diagram",
            Self::Requirement => "Requirement Analysis",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
