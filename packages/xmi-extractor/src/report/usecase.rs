//! Markdown report for use case diagrams.

use super::{MarkdownWriter, Render, ReportOptions};
use crate::extract::{DiagramKind, UseCaseModel};

impl Render for UseCaseModel {
    fn default_title(&self) -> &'static str {
        DiagramKind::UseCase.default_title()
    }

    /// Sections: System Boundary, Actors, Use Cases, Associations grouped
    /// by actor.
    fn render(&self, options: &ReportOptions) -> String {
        let mut out = MarkdownWriter::with_title(options.title_or(self.default_title()));

        out.section("System Boundary", usize::from(self.boundary.is_some()));
        match &self.boundary {
            Some(name) => out.bullet(name),
            None => out.none_found(),
        };

        out.section("Actors", self.actors.len());
        if self.actors.is_empty() {
            out.none_found();
        }
        for actor in &self.actors {
            out.bullet(actor);
        }

        out.section("Use Cases", self.use_cases.len());
        if self.use_cases.is_empty() {
            out.none_found();
        }
        for use_case in &self.use_cases {
            out.bullet(use_case);
        }

        out.section("Associations", self.associations.len());
        if self.associations.is_empty() {
            out.none_found();
        }
        for (actor, associations) in self.associations.by_source() {
            out.heading(3, &format!("Actor: {actor}"));
            for association in associations {
                out.bullet(&association.target);
            }
        }

        out.finish()
    }
}
