use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};

use crate::core::{Cell, CellKind, ColumnWidth, ExportError, ExportResult, MergeRegion};
use crate::excel::styles::{CellFormat, FillPattern, StyleSheet};

/// Hoja terminada que recibe el empaquetador: nombre, grilla, anchos,
/// región combinada del título y catálogo de estilos.
#[derive(Debug)]
pub struct SheetModel {
    pub name: String,
    pub grid: Vec<Vec<Cell>>,
    pub widths: Vec<ColumnWidth>,
    pub merge: Option<MergeRegion>,
    pub styles: StyleSheet,
}

/// Colaborador que materializa una hoja en un documento persistido.
pub trait DocumentPackager {
    fn package(&self, sheet: &SheetModel, path: &Path) -> ExportResult<()>;
}

/// Empaquetador por defecto sobre rust_xlsxwriter.
pub struct XlsxPackager;

impl DocumentPackager for XlsxPackager {
    fn package(&self, sheet: &SheetModel, path: &Path) -> ExportResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name).map_err(packaging)?;

        // Un Format por entrada de la tabla de formatos de celda; el índice
        // de estilo de cada celda direcciona esta lista.
        let formats: Vec<Format> = sheet
            .styles
            .cell_formats
            .iter()
            .map(|entry| build_format(&sheet.styles, entry))
            .collect();

        for (row_index, row) in sheet.grid.iter().enumerate() {
            if row_index == 0 && sheet.merge.is_some() {
                continue; // la fila de título se escribe al combinar
            }
            for (col_index, cell) in row.iter().enumerate() {
                let format = &formats[cell.style_index as usize];
                match cell.kind {
                    CellKind::Number => {
                        let number: f64 = cell.literal.parse().map_err(|_| {
                            ExportError::Packaging(format!(
                                "Valor numérico inválido en la celda: '{}'",
                                cell.literal
                            ))
                        })?;
                        worksheet
                            .write_number_with_format(row_index as u32, col_index as u16, number, format)
                            .map_err(packaging)?;
                    }
                    CellKind::Text => {
                        worksheet
                            .write_string_with_format(
                                row_index as u32,
                                col_index as u16,
                                &cell.literal,
                                format,
                            )
                            .map_err(packaging)?;
                    }
                }
            }
        }

        if let Some(merge) = &sheet.merge {
            if let Some(title) = sheet.grid.first().and_then(|row| row.first()) {
                let format = &formats[title.style_index as usize];
                if merge.last_col > merge.first_col {
                    worksheet
                        .merge_range(0, merge.first_col, 0, merge.last_col, &title.literal, format)
                        .map_err(packaging)?;
                } else {
                    worksheet
                        .write_string_with_format(0, merge.first_col, &title.literal, format)
                        .map_err(packaging)?;
                }
            }
        }

        for (col_index, column) in sheet.widths.iter().enumerate() {
            worksheet
                .set_column_width(col_index as u16, column.width)
                .map_err(packaging)?;
        }

        workbook
            .save(path)
            .map_err(|e| ExportError::Packaging(format!("Error guardando el archivo Excel: {}", e)))?;
        Ok(())
    }
}

fn packaging<E: std::fmt::Display>(error: E) -> ExportError {
    ExportError::Packaging(error.to_string())
}

// Traduce una entrada del catálogo a un Format del contenedor. Los rellenos
// reservados (None y Gray125) no se trasladan: el contenedor escribe los
// suyos propios.
fn build_format(styles: &StyleSheet, entry: &CellFormat) -> Format {
    let mut format = Format::new();

    if let Some(id) = entry.number_format {
        let id = id.id();
        match styles.number_formats.iter().find(|custom| custom.id == id) {
            Some(custom) => format = format.set_num_format(&custom.code),
            None => format = format.set_num_format_index(id as u8),
        }
    }

    if let Some(font) = entry.font.and_then(|i| styles.fonts.get(i as usize)) {
        if let Some(size) = font.size {
            format = format.set_font_size(size);
        }
        if font.bold {
            format = format.set_bold();
        }
        if let Some(color) = font.color {
            format = format.set_font_color(Color::RGB(color));
        }
    }

    if let Some(fill) = entry.fill.and_then(|i| styles.fills.get(i as usize)) {
        if fill.pattern == FillPattern::Solid {
            if let Some(color) = fill.color {
                format = format.set_background_color(Color::RGB(color));
            }
        }
    }

    if let Some(border) = entry.border.and_then(|i| styles.borders.get(i as usize)) {
        if border.top {
            format = format.set_border_top(FormatBorder::Thin);
        }
        if border.right {
            format = format.set_border_right(FormatBorder::Thin);
        }
        if border.bottom {
            format = format.set_border_bottom(FormatBorder::Thin);
        }
        if border.left {
            format = format.set_border_left(FormatBorder::Thin);
        }
    }

    format
}
