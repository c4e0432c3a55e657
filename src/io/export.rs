use anyhow::Result;
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::ExportScope;

/// Output formats understood by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Exporter for writing contribution rows to spreadsheet-friendly formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export in the given format, returning the number of rows written
    pub async fn export<W: Write>(
        &self,
        scope: ExportScope,
        format: ExportFormat,
        writer: W,
    ) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_csv(scope, writer).await,
            ExportFormat::Json => self.export_json(scope, writer).await,
        }
    }

    /// Export rows to CSV, header first
    pub async fn export_csv<W: Write>(&self, scope: ExportScope, writer: W) -> Result<usize> {
        let rows = self.service.export_rows(scope).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(scope.header())?;
        for row in &rows {
            csv_writer.write_record(row.fields())?;
        }

        csv_writer.flush()?;
        Ok(rows.len())
    }

    /// Export rows as a JSON array of objects keyed by column name
    pub async fn export_json<W: Write>(&self, scope: ExportScope, mut writer: W) -> Result<usize> {
        let rows = self.service.export_rows(scope).await?;

        let json = serde_json::to_string_pretty(&rows)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(rows.len())
    }
}
