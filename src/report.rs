//! Report data model handed to the rendering layer.
//!
//! A report is an ordered list of typed columns plus exactly one body:
//! flat rows for the tabular reports, or a forest of labeled nodes for the
//! retention-path tree. Column kinds drive alignment and separator style in
//! the renderer; the analysis layer itself never formats numbers.

use std::fmt;

/// How a column's cells are aligned and formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Left-aligned, rendered as-is
    Text,
    /// Right-aligned, rendered with thousands separators
    Numeric,
}

/// An ordered column descriptor
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
        }
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Number(u64),
}

/// One table row, cells ordered to match the report's columns
pub type Row = Vec<Value>;

/// A labeled node in a tree-form report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    /// Count shown next to the label, if any
    pub value: Option<u64>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>, value: Option<u64>) -> Self {
        Self {
            label: label.into(),
            value,
            children: Vec::new(),
        }
    }
}

/// Report body: flat rows or a forest, never both
#[derive(Debug, Clone)]
pub enum ReportBody {
    Rows(Vec<Row>),
    Tree(Vec<TreeNode>),
}

/// A complete report ready for rendering
#[derive(Debug, Clone)]
pub struct Report {
    pub columns: Vec<Column>,
    pub body: ReportBody,
}

impl Report {
    pub fn table(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            body: ReportBody::Rows(rows),
        }
    }

    pub fn tree(columns: Vec<Column>, roots: Vec<TreeNode>) -> Self {
        Self {
            columns,
            body: ReportBody::Tree(roots),
        }
    }

    /// Number of data rows (zero for tree reports).
    pub fn row_count(&self) -> usize {
        match &self.body {
            ReportBody::Rows(rows) => rows.len(),
            ReportBody::Tree(_) => 0,
        }
    }

    /// True when the body carries no rows and no tree nodes.
    pub fn is_empty(&self) -> bool {
        match &self.body {
            ReportBody::Rows(rows) => rows.is_empty(),
            ReportBody::Tree(roots) => roots.is_empty(),
        }
    }

    /// Keep at most `rows` data rows. Tree reports are left untouched.
    pub fn truncate_rows(&mut self, rows: usize) {
        if let ReportBody::Rows(body) = &mut self.body {
            body.truncate(rows);
        }
    }

    /// The flat rows, if this is a tabular report.
    pub fn rows(&self) -> Option<&[Row]> {
        match &self.body {
            ReportBody::Rows(rows) => Some(rows),
            ReportBody::Tree(_) => None,
        }
    }

    /// The root nodes, if this is a tree report.
    pub fn tree_roots(&self) -> Option<&[TreeNode]> {
        match &self.body {
            ReportBody::Rows(_) => None,
            ReportBody::Tree(roots) => Some(roots),
        }
    }
}

impl fmt::Display for Report {
    /// Renders the report as markdown, table or tree depending on the body.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::output::markdown::render(self))
    }
}
