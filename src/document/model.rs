//! The document structure the engine reads: paragraphs of runs, and tables of
//! rows of cells, each cell itself holding paragraphs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stretch of text with uniform formatting. Hyperlinks and bookmark anchors
/// attach at this granularity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark_id: Option<String>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Run {
        Run {
            text: text.into(),
            link: None,
            bookmark_id: None,
        }
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Run {
        self.link = Some(url.into());
        self
    }

    pub fn with_bookmark(mut self, id: impl Into<String>) -> Run {
        self.bookmark_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Paragraph {
        Paragraph { runs }
    }

    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|run| {
                run.text
                    .as_str()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn new(paragraphs: Vec<Paragraph>) -> Cell {
        Cell { paragraphs }
    }

    /// A cell with one paragraph of runs.
    pub fn from_runs(runs: Vec<Run>) -> Cell {
        Cell {
            paragraphs: vec![Paragraph::new(runs)],
        }
    }

    /// A cell whose whole text is hyperlinked.
    pub fn linked(text: &str, url: &str) -> Cell {
        Cell::from_runs(vec![Run::new(text).with_link(url)])
    }

    /// The text of every paragraph, joined by a space and trimmed.
    pub fn text(&self) -> String {
        let text = self
            .paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join(" ");
        text.trim()
            .to_string()
    }

    /// Map from the (trimmed) text of each hyperlinked run to its URL.
    pub fn text_with_url(&self) -> BTreeMap<String, String> {
        let mut result = BTreeMap::new();
        for run in self.runs() {
            if let Some(url) = &run.link {
                let key = run
                    .text
                    .trim()
                    .to_string();
                if !key.is_empty() {
                    result.insert(key, url.clone());
                }
            }
        }
        result
    }

    /// Ids of the bookmarks this cell refers to, in order of appearance and
    /// without repetition.
    pub fn bookmark_ids(&self) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        for run in self.runs() {
            if let Some(id) = &run.bookmark_id {
                if !result.contains(id) {
                    result.push(id.clone());
                }
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.text()
            .is_empty()
    }

    fn runs(&self) -> impl Iterator<Item = &Run> {
        self.paragraphs
            .iter()
            .flat_map(|paragraph| {
                paragraph
                    .runs
                    .iter()
            })
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Cell {
        Cell::from_runs(vec![Run::new(text)])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Row {
        Row { cells }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Table {
        Table { rows }
    }

    /// Build a table of plain text cells.
    pub fn from_text(rows: &[&[&str]]) -> Table {
        Table {
            rows: rows
                .iter()
                .map(|row| {
                    Row::new(
                        row.iter()
                            .map(|text| Cell::from(*text))
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
            .len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .len()
            })
            .max()
            .unwrap_or(0)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows
            .get(row)?
            .cells
            .get(column)
    }
}

/// Read access to a document. The engine only ever reads through this trait,
/// so any source of paragraphs and tables can be plugged in.
pub trait DocumentSource {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn revision_id(&self) -> &str;
    fn paragraphs(&self) -> &[Paragraph];
    fn tables(&self) -> &[Table];

    /// Label of the bookmark with the given id, if the document has one.
    fn bookmark(&self, id: &str) -> Option<&str>;
}

/// A document held entirely in memory, as loaded from its JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub revision_id: String,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub bookmarks: BTreeMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Document {
        Document {
            id: id.into(),
            title: title.into(),
            ..Document::default()
        }
    }

    pub fn with_table(mut self, table: Table) -> Document {
        self.tables
            .push(table);
        self
    }

    pub fn with_bookmark(mut self, id: impl Into<String>, label: impl Into<String>) -> Document {
        self.bookmarks
            .insert(id.into(), label.into());
        self
    }
}

impl DocumentSource for Document {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn revision_id(&self) -> &str {
        &self.revision_id
    }

    fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    fn tables(&self) -> &[Table] {
        &self.tables
    }

    fn bookmark(&self, id: &str) -> Option<&str> {
        self.bookmarks
            .get(id)
            .map(String::as_str)
    }
}
