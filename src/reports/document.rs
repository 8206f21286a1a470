use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("report has no columns")]
    NoColumns,
    #[error("row {row} has {found} cells, expected {expected}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    pub page_size: &'static str,
    pub page_orientation: &'static str,
    pub page_margins: [u32; 4],
    pub content: Vec<Block>,
    pub styles: Styles,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Block {
    Text {
        text: String,
        style: &'static str,
    },
    Table {
        style: &'static str,
        layout: &'static str,
        table: Table,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub header_rows: u32,
    pub widths: Vec<&'static str>,
    pub body: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Plain(String),
    Styled { text: String, style: &'static str },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Styles {
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub table: TextStyle,
    #[serde(rename = "tableHeader")]
    pub table_header: TextStyle,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<&'static str>,
    pub margin: [u32; 4],
}

impl Default for Styles {
    fn default() -> Self {
        Styles {
            title: TextStyle {
                font_size: 18,
                bold: true,
                alignment: Some("center"),
                margin: [0, 0, 0, 4],
            },
            subtitle: TextStyle {
                font_size: 10,
                bold: false,
                alignment: Some("center"),
                margin: [0, 0, 0, 12],
            },
            table: TextStyle {
                font_size: 9,
                bold: false,
                alignment: None,
                margin: [0, 4, 0, 0],
            },
            table_header: TextStyle {
                font_size: 10,
                bold: true,
                alignment: None,
                margin: [0, 0, 0, 0],
            },
        }
    }
}

/// Collects the title, date, columns and rows of one report.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    title: String,
    generated_on: Option<NaiveDate>,
    landscape: bool,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReportBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        ReportBuilder {
            title: title.into(),
            generated_on: None,
            landscape: false,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Defaults to today in local time.
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn landscape(mut self, landscape: bool) -> Self {
        self.landscape = landscape;
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn rows<R, I, S>(self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        rows.into_iter().fold(self, |builder, cells| builder.row(cells))
    }

    pub fn build(self) -> Result<DocumentDefinition, ReportError> {
        if self.columns.is_empty() {
            return Err(ReportError::NoColumns);
        }

        let expected = self.columns.len();
        if let Some((row, cells)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(ReportError::ColumnMismatch {
                row,
                expected,
                found: cells.len(),
            });
        }

        let date = self
            .generated_on
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let header: Vec<Cell> = self
            .columns
            .into_iter()
            .map(|text| Cell::Styled {
                text,
                style: "tableHeader",
            })
            .collect();
        let mut body = Vec::with_capacity(self.rows.len() + 1);
        body.push(header);
        body.extend(
            self.rows
                .into_iter()
                .map(|cells| cells.into_iter().map(Cell::Plain).collect()),
        );

        Ok(DocumentDefinition {
            page_size: "A4",
            page_orientation: if self.landscape { "landscape" } else { "portrait" },
            page_margins: [30, 40, 30, 40],
            content: vec![
                Block::Text {
                    text: self.title,
                    style: "title",
                },
                Block::Text {
                    text: format!("Generated on {}", date.format("%Y-%m-%d")),
                    style: "subtitle",
                },
                Block::Table {
                    style: "table",
                    layout: "lightHorizontalLines",
                    table: Table {
                        header_rows: 1,
                        widths: vec!["*"; expected],
                        body,
                    },
                },
            ],
            styles: Styles::default(),
        })
    }
}
