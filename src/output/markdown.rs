//! Markdown rendering of reports.
//!
//! Tables render as pipe-separated markdown with padded cells: text columns
//! left-aligned, numeric columns right-aligned with a `---:` separator.
//! Tree reports render with box-drawing connectors. Numbers get thousands
//! separators in both forms so byte counts stay readable.

use std::fs;
use std::path::Path;

use log::info;

use crate::report::{ColumnKind, Report, ReportBody, Row, TreeNode, Value};
use crate::utils::error::OutputError;

/// Render a report to a markdown string, table or tree depending on its body.
pub fn render(report: &Report) -> String {
    match &report.body {
        ReportBody::Rows(rows) => render_table(report, rows),
        ReportBody::Tree(roots) => render_tree(roots),
    }
}

/// Render `report` and write it to `path`, creating parent directories as
/// needed.
pub fn write_report(report: &Report, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    validate_output_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|err| {
                OutputError::InvalidPath(format!(
                    "cannot create directory {}: {err}",
                    parent.display()
                ))
            })?;
        }
    }

    fs::write(path, render(report))?;
    info!("Report written to: {}", path.display());
    Ok(())
}

/// Format with thousands separators: 1234567 becomes "1,234,567".
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, digit) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("output path is empty".into()));
    }
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "output path is a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

fn render_table(report: &Report, rows: &[Row]) -> String {
    let formatted: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(format_value).collect())
        .collect();

    // Every column is as wide as its widest cell, header included.
    let mut widths: Vec<usize> = report.columns.iter().map(|col| col.name.len()).collect();
    for row in &formatted {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() {
                widths[index] = widths[index].max(cell.len());
            }
        }
    }

    let mut out = String::new();

    let header: Vec<String> = report
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, &width)| pad(&col.name, width, col.kind))
        .collect();
    out.push_str(&header.join(" | "));
    out.push('\n');

    let separator: Vec<String> = report
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, &width)| match col.kind {
            ColumnKind::Numeric => format!("{}:", "-".repeat(width.saturating_sub(1))),
            ColumnKind::Text => "-".repeat(width),
        })
        .collect();
    out.push_str(&separator.join(" | "));
    out.push('\n');

    for row in &formatted {
        let cells: Vec<String> = report
            .columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (col, &width))| {
                let cell = row.get(index).map(String::as_str).unwrap_or("");
                pad(cell, width, col.kind)
            })
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }

    out
}

fn render_tree(roots: &[TreeNode]) -> String {
    let mut out = String::new();
    // Frames are (siblings, next index, line prefix). Retention chains can
    // be as deep as the heap is linked, so this walks with its own stack
    // instead of recursing.
    let mut stack: Vec<(&[TreeNode], usize, String)> = vec![(roots, 0, String::new())];
    while let Some((siblings, index, prefix)) = stack.pop() {
        if index >= siblings.len() {
            continue;
        }
        let node = &siblings[index];
        let last = index == siblings.len() - 1;
        let top_level = prefix.is_empty();

        // Top-level entries always get the tee connector: they are separate
        // chains, not siblings under a common parent.
        let connector = if top_level || !last {
            "├── "
        } else {
            "└── "
        };
        out.push_str(&prefix);
        out.push_str(connector);
        out.push_str(&node.label);
        if let Some(value) = node.value {
            out.push_str(&format!(" (Count: {})", format_number(value)));
        }
        out.push('\n');

        let child_prefix = if node.children.is_empty() {
            None
        } else {
            let continuation = if top_level || !last { "│   " } else { "    " };
            Some(format!("{prefix}{continuation}"))
        };

        stack.push((siblings, index + 1, prefix));
        if let Some(child_prefix) = child_prefix {
            stack.push((&node.children, 0, child_prefix));
        }
    }
    out
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        Value::Number(number) => format_number(*number),
    }
}

fn pad(value: &str, width: usize, kind: ColumnKind) -> String {
    match kind {
        ColumnKind::Numeric => format!("{value:>width$}"),
        ColumnKind::Text => format!("{value:<width$}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Column;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_table_alignment_and_separators() {
        let report = Report::table(
            vec![Column::text("Object Type"), Column::numeric("Count")],
            vec![
                vec![Value::Text("System.String".into()), Value::Number(1200)],
                vec![Value::Text("Gen2".into()), Value::Number(3)],
            ],
        );

        let expected = "\
Object Type   | Count
------------- | ----:
System.String | 1,200
Gen2          |     3
";
        assert_eq!(render(&report), expected);
    }

    #[test]
    fn test_wide_cell_stretches_column() {
        let report = Report::table(
            vec![Column::text("T"), Column::numeric("N")],
            vec![vec![Value::Text("ab".into()), Value::Number(123456)]],
        );

        let expected = "\
T  |       N
-- | ------:
ab | 123,456
";
        assert_eq!(render(&report), expected);
    }

    #[test]
    fn test_empty_table_renders_header_and_separator() {
        let report = Report::table(
            vec![Column::text("Object Type"), Column::numeric("Count")],
            vec![],
        );

        let expected = "\
Object Type | Count
----------- | ----:
";
        assert_eq!(render(&report), expected);
    }

    #[test]
    fn test_tree_connectors_and_nesting() {
        let mut root_a = TreeNode::new("RootA", Some(3));
        let mut child1 = TreeNode::new("Child1", Some(2));
        child1.children.push(TreeNode::new("Leaf", Some(1)));
        root_a.children.push(child1);
        root_a.children.push(TreeNode::new("Child2", Some(1)));
        let root_b = TreeNode::new("RootB", Some(1));

        let report = Report::tree(vec![Column::text("Object Type")], vec![root_a, root_b]);

        let expected = "\
├── RootA (Count: 3)
│   ├── Child1 (Count: 2)
│   │   └── Leaf (Count: 1)
│   └── Child2 (Count: 1)
├── RootB (Count: 1)
";
        assert_eq!(render(&report), expected);
    }

    #[test]
    fn test_tree_node_without_value_has_no_suffix() {
        let report = Report::tree(
            vec![Column::text("Object Type")],
            vec![TreeNode::new("Standalone", None)],
        );
        assert_eq!(render(&report), "├── Standalone\n");
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let report = Report::tree(vec![Column::text("Object Type")], vec![]);
        assert_eq!(render(&report), "");
    }

    #[test]
    fn test_tree_counts_use_thousands_separators() {
        let report = Report::tree(
            vec![Column::text("Object Type")],
            vec![TreeNode::new("Busy", Some(12000))],
        );
        assert_eq!(render(&report), "├── Busy (Count: 12,000)\n");
    }

    #[test]
    fn test_write_report_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.md");

        let report = Report::table(
            vec![Column::text("Object Type"), Column::numeric("Count")],
            vec![vec![Value::Text("A".into()), Value::Number(1)]],
        );
        write_report(&report, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&report));
    }

    #[test]
    fn test_write_report_rejects_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        let report = Report::table(vec![Column::text("Object Type")], vec![]);
        let err = write_report(&report, dir.path()).unwrap_err();
        assert!(matches!(err, OutputError::InvalidPath(_)));
    }
}
