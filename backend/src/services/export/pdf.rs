use std::path::Path;

use common::model::export::ExportRequest;
use genpdf::error::Error;
use genpdf::elements::{Break, FrameCellDecorator, LinearLayout, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, SimplePageDecorator, Size};

/// A4 landscape, in millimetres.
const PAGE_WIDTH_MM: i32 = 297;
const PAGE_HEIGHT_MM: i32 = 210;
const MARGIN_MM: i32 = 10;
const FONT_SIZE_PT: u8 = 8;
const MAX_COLUMN_WEIGHT: usize = 30;

/// Load the font family from `font_dir`: Arial if present, else LiberationSans.
fn load_font(font_dir: &Path) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, Error> {
    if let Ok(family) = genpdf::fonts::from_files(font_dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(font_dir, "LiberationSans", None)
}

/// Configure the landscape document with a "Page N" header on every page.
fn configure_document(title: &str, font_dir: &Path) -> Result<Document, Error> {
    let font_family = load_font(font_dir)?;
    let mut doc = Document::new(font_family);
    doc.set_title(title);
    doc.set_paper_size(Size::new(PAGE_WIDTH_MM, PAGE_HEIGHT_MM));
    doc.set_font_size(FONT_SIZE_PT);
    doc.set_line_spacing(1.1);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    decorator.set_header(|page| {
        let mut layout = LinearLayout::vertical();
        layout.push(Paragraph::new(format!("Page {}", page)).aligned(Alignment::Right));
        layout.push(Break::new(1));
        layout
    });
    doc.set_page_decorator(decorator);
    Ok(doc)
}

/// Relative column widths from the longest of header and cells, capped at `MAX_COLUMN_WEIGHT`.
pub fn column_weights(request: &ExportRequest) -> Vec<usize> {
    request
        .columns
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let widest_cell = request
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            widest_cell
                .max(header.chars().count())
                .clamp(1, MAX_COLUMN_WEIGHT)
        })
        .collect()
}

/// Renders the table into PDF bytes.
pub fn render(request: &ExportRequest, font_dir: &Path) -> Result<Vec<u8>, Error> {
    let mut doc = configure_document(&request.title, font_dir)?;

    doc.push(
        Paragraph::new(request.title.as_str())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(14)),
    );
    doc.push(Break::new(1));

    if request.rows.is_empty() {
        doc.push(Paragraph::new("No records found"));
    } else {
        let mut table = TableLayout::new(column_weights(request));
        table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

        let mut header = table.row();
        for column in &request.columns {
            header.push_element(
                Paragraph::new(column.as_str())
                    .styled(Style::new().bold())
                    .padded(1),
            );
        }
        header.push()?;

        for row in &request.rows {
            let mut line = table.row();
            for cell in row {
                line.push_element(Paragraph::new(cell.as_str()).padded(1));
            }
            line.push()?;
        }
        doc.push(table);
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_follow_content_width() {
        let request = ExportRequest {
            title: "t".into(),
            columns: vec!["No".into(), "Description".into(), "Qty".into()],
            rows: vec![
                vec!["1".into(), "x".repeat(80), "12".into()],
                vec!["22".into(), "short".into(), "".into()],
            ],
        };
        assert_eq!(column_weights(&request), vec![2, MAX_COLUMN_WEIGHT, 3]);
    }

    #[test]
    fn missing_fonts_fail_cleanly() {
        let request = ExportRequest {
            title: "t".into(),
            columns: vec!["a".into()],
            rows: vec![vec!["1".into()]],
        };
        assert!(render(&request, Path::new("./definitely-missing-fonts")).is_err());
    }
}
