//! Markdown report for activity diagrams: partitions, decisions and flows.

use super::{MarkdownWriter, Render, ReportOptions};
use crate::extract::{ActivityKind, ActivityModel, DiagramKind};

/// Line under a partition that owns no named action.
const NO_NAMED_ACTIONS: &str = "(no named actions)";

impl Render for ActivityModel {
    fn default_title(&self) -> &'static str {
        DiagramKind::Activity.default_title()
    }

    fn render(&self, options: &ReportOptions) -> String {
        let mut out = MarkdownWriter::with_title(options.title_or(self.default_title()));

        let mut partitions: Vec<_> = self.partitions.iter().collect();
        partitions.sort_by(|a, b| a.name.cmp(&b.name));

        out.section("Partitions", partitions.len());
        if partitions.is_empty() {
            out.none_found();
        }
        for partition in partitions {
            out.heading(3, &format!("Partition: {}", partition.name));
            if partition.actions.is_empty() {
                out.line(NO_NAMED_ACTIONS);
            }
            let mut actions: Vec<_> = partition.actions.iter().collect();
            actions.sort();
            for action in actions {
                out.bullet(action);
            }
        }

        let decisions = self.elements.sorted_of_kind(ActivityKind::Decision);
        out.section("Decisions", decisions.len());
        if decisions.is_empty() {
            out.none_found();
        }
        for decision in decisions {
            out.bullet(decision.label());
        }

        out.section("Flows", self.flows.len());
        if self.flows.is_empty() {
            out.none_found();
        }
        for flow in self.flows.iter() {
            let mut line = format!("- Flow: \"{}\" → \"{}\"", flow.source, flow.target);
            if let Some(guard) = &flow.kind {
                line.push_str(&format!(" [guard: {guard}]"));
            }
            out.line(line);
        }

        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::activity::{NodeData, Partition};
    use crate::model::{Element, Relationship};
    use pretty_assertions::assert_eq;

    fn model() -> ActivityModel {
        let mut model = ActivityModel::default();
        for (id, name, kind) in [
            ("P2", Some("Machine"), ActivityKind::Partition),
            ("P1", Some("Customer"), ActivityKind::Partition),
            ("D1", None, ActivityKind::Decision),
            ("D2", Some("Enough money?"), ActivityKind::Decision),
        ] {
            model.elements.insert(Element::new(
                id,
                name.map(String::from),
                kind,
                NodeData::default(),
            ));
        }
        model.partitions = vec![
            Partition {
                id: "P2".to_string(),
                name: "Machine".to_string(),
                actions: Vec::new(),
            },
            Partition {
                id: "P1".to_string(),
                name: "Customer".to_string(),
                actions: vec!["Select item".to_string(), "Insert coin".to_string()],
            },
        ];
        model.flows = [
            Relationship::new("Insert coin", "Enough money?", None),
            Relationship::new("Enough money?", "Dispense", Some("yes".to_string())),
        ]
        .into_iter()
        .collect();
        model
    }

    #[test]
    fn test_render_full_report() {
        assert_eq!(
            model().render(&ReportOptions::default()),
            "# Activity Diagram

## Partitions (2)

### Partition: Customer

- Insert coin
- Select item

### Partition: Machine

(no named actions)

## Decisions (2)

- Decision
- Enough money?

## Flows (2)

- Flow: \"Enough money?\" → \"Dispense\" [guard: yes]
- Flow: \"Insert coin\" → \"Enough money?\"
"
        );
    }

    #[test]
    fn test_empty_model_keeps_every_section() {
        let report = ActivityModel::default().render(&ReportOptions::default());
        assert!(report.contains("## Partitions (0)\n\n_None found._"));
        assert!(report.contains("## Decisions (0)\n\n_None found._"));
        assert!(report.contains("## Flows (0)\n\n_None found._"));
    }
}
