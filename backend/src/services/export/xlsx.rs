use common::model::export::ExportRequest;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Excel limits sheet names to 31 characters and forbids `[]:*?/\`.
pub fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

fn column_index(col: usize) -> Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

/// One worksheet: bold header row, then the rows exactly as shown in the table.
pub fn render(request: &ExportRequest) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(&request.title))?;
    for (col, title) in request.columns.iter().enumerate() {
        sheet.write_string_with_format(0, column_index(col)?, title, &header)?;
    }
    for (row_index, row) in request.rows.iter().enumerate() {
        let sheet_row = u32::try_from(row_index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, cell) in row.iter().enumerate() {
            sheet.write_string(sheet_row, column_index(col)?, cell)?;
        }
    }
    sheet.autofit();

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_are_excel_safe() {
        assert_eq!(sheet_name("FG Movement Report"), "FG Movement Report");
        assert_eq!(sheet_name("A/B: [C]?"), "AB C");
        assert_eq!(sheet_name("///"), "Sheet1");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn empty_table_still_renders() {
        let request = ExportRequest {
            title: "Empty".into(),
            columns: vec!["Item".into()],
            rows: vec![],
        };
        let bytes = render(&request).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn columns_past_u16_are_an_error_not_a_wrap() {
        assert_eq!(column_index(3).ok(), Some(3));
        assert!(column_index(usize::from(u16::MAX) + 1).is_err());
    }
}
