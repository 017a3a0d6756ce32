//! Markdown report for requirement diagrams.

use super::{MarkdownWriter, Render, ReportOptions};
use crate::extract::{DiagramKind, RequirementModel};

/// Table cell for a requirement without an external id.
const MISSING_ID: &str = "N/A";

impl Render for RequirementModel {
    fn default_title(&self) -> &'static str {
        DiagramKind::Requirement.default_title()
    }

    /// Sections: a requirement table sorted by external id, then
    /// relationships grouped by kind label.
    fn render(&self, options: &ReportOptions) -> String {
        let mut out = MarkdownWriter::with_title(options.title_or(self.default_title()));

        let requirements = self.sorted_requirements();
        out.section("Requirements", requirements.len());
        if requirements.is_empty() {
            out.none_found();
        } else {
            out.table_header(&["ID", "Name", "Text"]);
        }
        for requirement in requirements {
            out.table_row(&[
                requirement.data.external_id.as_deref().unwrap_or(MISSING_ID),
                requirement.label(),
                requirement.data.text.as_str(),
            ]);
        }

        out.section("Relationships", self.relationships.len());
        if self.relationships.is_empty() {
            out.none_found();
        }
        for (kind, relationships) in self.relationships.by_kind() {
            out.heading(3, &format!("Type: `{kind}`"));
            for rel in relationships {
                out.bullet(&format!("**{}** → **{}**", rel.source, rel.target));
            }
        }

        out.finish()
    }
}
