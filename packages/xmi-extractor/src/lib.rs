//! XMI Extractor - Recover model elements from legacy UML/XMI diagram exports.
//!
//! This crate reads XMI 1.3 exports written by a UML modeling tool in a fixed
//! legacy encoding, recovers typed elements and relationships from the
//! tool's tagged-value metadata, and renders them as Markdown or JSON reports
//! used as input for document review.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use xmi_extractor::{extract_str, Render, ReportOptions, UseCaseExtractor};
//!
//! let xmi = r#"<XMI xmlns:UML="omg.org/UML1.3"><XMI.content>
//!     <UML:Actor xmi.id="A1" name="Customer"/>
//!     <UML:UseCase xmi.id="U1" name="BuyItem"/>
//! </XMI.content></XMI>"#;
//!
//! let model = extract_str(&UseCaseExtractor, xmi, Path::new("usecase.xml")).unwrap();
//! assert_eq!(model.actors, vec!["Customer"]);
//!
//! let report = model.render(&ReportOptions::default());
//! assert!(report.contains("## Use Cases (1)"));
//! ```
//!
//! # Architecture
//!
//! Each diagram extractor runs the same four stages:
//!
//! - [`encoding`]: Decode the legacy bytes and repair the XML declaration
//! - [`extract`]: Classify elements and resolve relationships per diagram kind
//! - [`report`]: Assemble the Markdown report
//! - [`output`]: Format selection and report file writing
//!
//! Supporting modules:
//!
//! - [`config`]: Format constants and default paths
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities
//! - [`xmi`]: Parsed document and tagged-value table
//! - [`model`]: Elements and relationships shared by the extractors
//! - [`catalog`]: Verification-option catalog
//! - [`cli`]: Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod report;
pub mod xmi;
pub mod xml;

// Re-export main functions
pub use extract::{extract_file, extract_str};
pub use output::{generate, write_report, OutputFormat};

// Re-export commonly used items
pub use error::{ExtractorError, Result};
pub use extract::{
    ActivityExtractor, ActivityModel, DiagramKind, Extractor, RequirementExtractor,
    RequirementModel, UseCaseExtractor, UseCaseModel,
};
pub use report::{Render, ReportOptions};
