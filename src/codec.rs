//! Narrow interface to the optional spreadsheet codec
//!
//! Workbook support is an injected capability behind the `workbook`
//! feature: its presence is a configuration fact checked once through
//! [`default_codec`], not a scattered runtime guess.

use crate::error::Result;
#[cfg(feature = "workbook")]
use crate::error::RowdiffError;

/// One named sheet of string cells
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// Read/write access to spreadsheet workbooks
pub trait WorkbookCodec {
    /// Read the first sheet of a workbook; absent cells are empty strings.
    fn read_first_sheet(&self, content: &[u8]) -> Result<Sheet>;

    /// Serialize the sheets into workbook bytes.
    fn write_workbook(&self, sheets: &[Sheet]) -> Result<Vec<u8>>;
}

/// The built-in codec, or `None` when workbook support is compiled out
pub fn default_codec() -> Option<Box<dyn WorkbookCodec>> {
    #[cfg(feature = "workbook")]
    {
        Some(Box::new(XlsxCodec))
    }
    #[cfg(not(feature = "workbook"))]
    {
        None
    }
}

/// Codec backed by calamine (read) and rust_xlsxwriter (write)
#[cfg(feature = "workbook")]
pub struct XlsxCodec;

#[cfg(feature = "workbook")]
impl WorkbookCodec for XlsxCodec {
    fn read_first_sheet(&self, content: &[u8]) -> Result<Sheet> {
        use calamine::{open_workbook_auto_from_rs, Reader};
        use std::io::Cursor;

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))
            .map_err(|e| RowdiffError::codec_unavailable(format!("workbook open failed: {}", e)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| RowdiffError::codec_unavailable("workbook has no sheets"))?;

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            RowdiffError::codec_unavailable(format!("failed to read sheet '{}': {}", sheet_name, e))
        })?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        Ok(Sheet {
            name: sheet_name,
            rows,
        })
    }

    fn write_workbook(&self, sheets: &[Sheet]) -> Result<Vec<u8>> {
        use rust_xlsxwriter::Workbook;

        let mut workbook = Workbook::new();
        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name.as_str()).map_err(|e| {
                RowdiffError::codec_unavailable(format!("invalid sheet name '{}': {}", sheet.name, e))
            })?;
            for (row_index, row) in sheet.rows.iter().enumerate() {
                for (col_index, cell) in row.iter().enumerate() {
                    let col = u16::try_from(col_index).map_err(|_| {
                        RowdiffError::codec_unavailable(format!(
                            "sheet '{}' has too many columns",
                            sheet.name
                        ))
                    })?;
                    worksheet
                        .write_string(row_index as u32, col, cell.as_str())
                        .map_err(|e| {
                            RowdiffError::codec_unavailable(format!("cell write failed: {}", e))
                        })?;
                }
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RowdiffError::codec_unavailable(format!("workbook save failed: {}", e)))
    }
}

#[cfg(feature = "workbook")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}
