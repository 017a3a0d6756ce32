//! Markdown report assembly.
//!
//! Rendering is a pure function of an extracted model: no file access, no
//! logging side effects. Every section heading is always emitted, and the
//! count in a heading always equals the number of entries rendered under it.

mod activity;
mod markdown;
mod requirement;
mod usecase;

pub use markdown::{escape_table_cell, MarkdownWriter, NONE_FOUND};

/// Caller overrides for report rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Report title; each diagram kind has its own default.
    pub title: Option<String>,
}

impl ReportOptions {
    /// Options with a custom title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// The configured title, or `default` when none was given.
    #[must_use]
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(default)
    }
}

/// A model that can be rendered as a Markdown report.
pub trait Render {
    /// Title used when [`ReportOptions::title`] is not set.
    fn default_title(&self) -> &'static str;

    /// Assemble the report.
    fn render(&self, options: &ReportOptions) -> String;
}
