//! Client listing workbook rendering.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use crate::config::{EXPORT_HEADERS, EXPORT_SHEET_NAME};
use crate::domain::ClientRow;
use crate::errors::AppResult;

const HEADER_ROW_HEIGHT: f64 = 20.0;

/// Render listing rows as a single-sheet `.xlsx` workbook.
///
/// Row 0 holds the headers, each following row one client–category row.
pub fn render_client_workbook(rows: &[ClientRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, header) in (0u16..).zip(EXPORT_HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }
    worksheet.set_row_height(0, HEADER_ROW_HEIGHT)?;

    for (row_index, row) in (1u32..).zip(rows) {
        worksheet.write_number(row_index, 0, f64::from(row.client_number))?;
        worksheet.write_string(row_index, 1, row.full_name())?;
        worksheet.write_string(row_index, 2, &row.address)?;
        worksheet.write_string(row_index, 3, &row.email)?;
        worksheet.write_string(row_index, 4, &row.phone_number)?;
        if let Some(name) = &row.product_category_name {
            worksheet.write_string(row_index, 5, name)?;
        }
        if let Some(id) = row.product_category_id {
            worksheet.write_string(row_index, 6, id.to_string())?;
        }
    }

    worksheet.autofit();

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}
