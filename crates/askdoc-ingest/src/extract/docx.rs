use std::fs;
use std::path::Path;

use askdoc_core::config::ExtractionSettings;
use askdoc_core::error::{Error, Result};
use askdoc_core::traits::TextExtractor;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};
use tracing::debug;

use super::{cap_text, has_extension};

/// DOCX extractor: paragraph text in document order, then table cells
/// flattened into pipe-delimited rows appended as extra lines.
pub struct DocxExtractor {
    settings: ExtractionSettings,
}

impl DocxExtractor {
    pub fn new(settings: ExtractionSettings) -> Self {
        Self { settings }
    }
}

impl TextExtractor for DocxExtractor {
    fn can_extract(&self, path: &Path) -> bool {
        has_extension(path, "docx")
    }

    fn extract(&self, path: &Path) -> Result<String> {
        debug!(path = %path.display(), "extracting docx");
        let bytes = fs::read(path).map_err(|e| Error::extraction(path.display(), e.to_string()))?;
        let docx = docx_rs::read_docx(&bytes)
            .map_err(|e| Error::extraction(path.display(), format!("invalid docx: {e:?}")))?;

        let mut paragraphs = Vec::new();
        let mut table_rows = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let text = paragraph_text(p);
                    if !text.is_empty() {
                        paragraphs.push(text);
                    }
                }
                DocumentChild::Table(t) => table_rows.extend(flatten_table(t)),
                _ => {}
            }
        }
        paragraphs.extend(table_rows);

        let text = paragraphs.join("\n");
        if text.trim().is_empty() {
            return Err(Error::extraction(path.display(), "no readable text found in docx"));
        }
        Ok(cap_text(text, self.settings.max_text_bytes, path))
    }
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut out = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Tab(_) => out.push(' '),
                    _ => {}
                }
            }
        }
    }
    out.trim().to_string()
}

fn flatten_table(table: &docx_rs::Table) -> Vec<String> {
    let mut rows = Vec::new();
    for row in &table.rows {
        let TableChild::TableRow(table_row) = row;
        let mut cells = Vec::new();
        for cell in &table_row.cells {
            let TableRowChild::TableCell(table_cell) = cell;
            let mut parts = Vec::new();
            for content in &table_cell.children {
                if let TableCellContent::Paragraph(p) = content {
                    let text = paragraph_text(p);
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
            }
            if !parts.is_empty() {
                cells.push(parts.join(" "));
            }
        }
        if !cells.is_empty() {
            rows.push(cells.join(" | "));
        }
    }
    rows
}
