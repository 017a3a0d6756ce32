//! Small line-oriented Markdown builder shared by the report renderers.

/// Line emitted under a section heading that has no entries.
pub const NONE_FOUND: &str = "_None found._";

/// Accumulates report lines and joins them once at the end.
#[derive(Debug, Default)]
pub struct MarkdownWriter {
    lines: Vec<String>,
}

impl MarkdownWriter {
    /// Start a document with a top-level title.
    #[must_use]
    pub fn with_title(title: &str) -> Self {
        let mut writer = Self::default();
        writer.heading(1, title);
        writer
    }

    /// Add a heading, separated from preceding content by a blank line.
    pub fn heading(&mut self, level: usize, text: &str) -> &mut Self {
        if !self.lines.is_empty() {
            self.blank();
        }
        self.lines.push(format!("{} {text}", "#".repeat(level)));
        self.blank()
    }

    /// Add a section heading with its entry count, e.g. `## Actors (2)`.
    pub fn section(&mut self, text: &str, count: usize) -> &mut Self {
        self.heading(2, &format!("{text} ({count})"))
    }

    /// Add a raw line.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    /// Add a `- item` bullet.
    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.line(format!("- {text}"))
    }

    /// Add a blank line unless the previous line is already blank.
    pub fn blank(&mut self) -> &mut Self {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
        self
    }

    /// Add the placeholder line for an empty section.
    pub fn none_found(&mut self) -> &mut Self {
        self.line(NONE_FOUND)
    }

    /// Add a table header row and its separator.
    pub fn table_header(&mut self, columns: &[&str]) -> &mut Self {
        self.line(format!("| {} |", columns.join(" | ")));
        self.line(format!(
            "|{}|",
            columns.iter().map(|_| "----").collect::<Vec<_>>().join("|")
        ))
    }

    /// Add a table row; cells are escaped so each row stays on one line.
    pub fn table_row(&mut self, cells: &[&str]) -> &mut Self {
        let cells: Vec<String> = cells.iter().map(|c| escape_table_cell(c)).collect();
        self.line(format!("| {} |", cells.join(" | ")))
    }

    /// Join all lines, ending with exactly one newline.
    #[must_use]
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
        out
    }
}

/// Escape text for a Markdown table cell: pipes are escaped and line breaks
/// become `<br>`.
///
/// # Examples
/// ```
/// use xmi_extractor::report::escape_table_cell;
///
/// assert_eq!(escape_table_cell("a|b\r\nc"), "a\\|b<br>c");
/// ```
#[must_use]
pub fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headings_are_spaced() {
        let mut writer = MarkdownWriter::with_title("Report");
        writer.section("Actors", 1);
        writer.bullet("Customer");
        writer.heading(3, "Detail");
        writer.none_found();

        assert_eq!(
            writer.finish(),
            "# Report\n\n## Actors (1)\n\n- Customer\n\n### Detail\n\n_None found._\n"
        );
    }

    #[test]
    fn test_table_rows_escaped() {
        let mut writer = MarkdownWriter::default();
        writer.table_header(&["ID", "Name"]);
        writer.table_row(&["1", "in|out\nnext"]);

        assert_eq!(writer.finish(), "| ID | Name |\n|----|----|\n| 1 | in\\|out<br>next |\n");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_table_cell("自動販売機"), "自動販売機");
    }
}
