use serde::{Deserialize, Serialize};

/// Widest sheet Excel accepts.
pub const MAX_EXPORT_COLUMNS: usize = 16_384;
/// Excel's row limit less the header row.
pub const MAX_EXPORT_ROWS: usize = 1_048_575;

/// Table handed to the export endpoints: headers plus already formatted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.columns.is_empty() {
            return Err("Export needs at least one column".to_string());
        }
        if self.columns.len() > MAX_EXPORT_COLUMNS {
            return Err(format!(
                "Export has {} columns, at most {} are supported",
                self.columns.len(),
                MAX_EXPORT_COLUMNS
            ));
        }
        if self.rows.len() > MAX_EXPORT_ROWS {
            return Err(format!(
                "Export has {} rows, at most {} are supported",
                self.rows.len(),
                MAX_EXPORT_ROWS
            ));
        }
        if let Some((index, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.columns.len())
        {
            return Err(format!(
                "Row {} has {} cells, expected {}",
                index + 1,
                row.len(),
                self.columns.len()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Local endpoint the front end posts to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "/api/export/xlsx",
            ExportFormat::Pdf => "/api/export/pdf",
        }
    }
}

/// `Material Receipt` + `20240131_154500` -> `Material_Receipt_20240131_154500.xlsx`.
pub fn export_file_name(title: &str, timestamp: &str, format: ExportFormat) -> String {
    let stem: String = title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    let stem = if stem.is_empty() { "export".to_string() } else { stem };
    format!("{}_{}.{}", stem, timestamp, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_embed_timestamp() {
        assert_eq!(
            export_file_name("Material Receipt", "20240131_154500", ExportFormat::Xlsx),
            "Material_Receipt_20240131_154500.xlsx"
        );
        assert_eq!(
            export_file_name("FG / Label: Printing", "t", ExportFormat::Pdf),
            "FG_Label_Printing_t.pdf"
        );
        assert_eq!(export_file_name("///", "t", ExportFormat::Pdf), "export_t.pdf");
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let req = ExportRequest {
            title: "t".into(),
            columns: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        };
        assert_eq!(req.validate(), Err("Row 2 has 1 cells, expected 2".to_string()));

        let empty = ExportRequest {
            title: "t".into(),
            columns: vec![],
            rows: vec![],
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn sheets_wider_than_excel_are_rejected() {
        let widest = ExportRequest {
            title: "t".into(),
            columns: vec![String::new(); MAX_EXPORT_COLUMNS],
            rows: vec![],
        };
        assert_eq!(widest.validate(), Ok(()));

        let too_wide = ExportRequest {
            columns: vec![String::new(); MAX_EXPORT_COLUMNS + 1],
            ..widest
        };
        assert_eq!(
            too_wide.validate(),
            Err("Export has 16385 columns, at most 16384 are supported".to_string())
        );
    }
}
