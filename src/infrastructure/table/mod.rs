// ============================================================
// TABLE EXPORT
// ============================================================
// Spreadsheet / CSV export and console preview of structured records

use std::path::Path;

use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;

use crate::domain::country::{StructuredCountryRecord, COLUMN_LABELS};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::storage::ensure_parent_dir;

/// Table exporter
pub struct TableExporter {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for TableExporter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write a header row plus one row per record. Columns follow the
    /// record field order; no row index column is written.
    ///
    /// A `.xlsx` path gets a spreadsheet with numeric cells for the numeric
    /// columns; any other path gets delimited text.
    pub fn export(&self, records: &[StructuredCountryRecord], path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;

        let is_xlsx = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
            .unwrap_or(false);

        if is_xlsx {
            export_xlsx(records, path)?;
        } else {
            self.export_delimited(records, path)?;
        }

        tracing::info!(path = %path.display(), rows = records.len(), "Exported table");
        Ok(())
    }

    fn export_delimited(&self, records: &[StructuredCountryRecord], path: &Path) -> Result<()> {

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)
            .map_err(|e| {
                AppError::IoError(format!("Failed to create {}: {}", path.display(), e))
            })?;

        writer.write_record(COLUMN_LABELS)?;
        for record in records {
            writer.write_record(record.cells())?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Columns written as numbers in the spreadsheet
const NUMERIC_COLUMNS: [usize; 3] = [1, 2, 3];

fn export_xlsx(records: &[StructuredCountryRecord], path: &Path) -> Result<()> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| {
        AppError::IoError(format!("Spreadsheet export to {} failed: {}", path.display(), e))
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, label) in COLUMN_LABELS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *label).map_err(xlsx_err)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        let numbers = [
            record.population() as f64,
            record.area_km2(),
            record.density(),
        ];

        for (col, cell) in record.cells().iter().enumerate() {
            let written = match NUMERIC_COLUMNS.iter().position(|c| *c == col) {
                Some(slot) => worksheet.write_number(row, col as u16, numbers[slot]),
                None => worksheet.write_string(row, col as u16, cell.as_str()),
            };
            written.map_err(xlsx_err)?;
        }
    }

    workbook.save(path).map_err(xlsx_err)?;
    Ok(())
}

/// First `rows` records as an aligned text table
pub fn preview(records: &[StructuredCountryRecord], rows: usize) -> String {
    let shown: Vec<[String; 8]> = records.iter().take(rows).map(|r| r.cells()).collect();

    let widths: Vec<usize> = COLUMN_LABELS
        .iter()
        .enumerate()
        .map(|(col, label)| {
            shown
                .iter()
                .map(|cells| cells[col].chars().count())
                .chain(std::iter::once(label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(COLUMN_LABELS.to_vec())];
    for cells in &shown {
        lines.push(format_row(cells.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
