use crate::core::{Cell, CellKind, CellValue, ColumnSpec, ExportResult, ExporterConfig, FieldType};
use crate::excel::cells;
use crate::excel::styles::{
    self, FormatKey, NumberFormatId, StyleSheet, BORDER_ALL, FILL_DETAIL, FILL_HEADER, FILL_TITLE,
    FONT_DETAIL, FONT_HEADER, FONT_TITLE,
};
use crate::reflection::{FieldCache, Record};

/// Marca que identifica las columnas con el id de moneda de la fila.
const CURRENCY_ID_MARKER: &str = "idmoneda";

/// Arma las filas de la grilla delegando la clasificación de celdas y la
/// búsqueda de estilos.
pub struct RowBuilder<'a> {
    styles: &'a StyleSheet,
    formats: &'a [(FormatKey, NumberFormatId)],
    config: &'a ExporterConfig,
    cache: &'a FieldCache,
}

impl<'a> RowBuilder<'a> {
    pub fn new(
        styles: &'a StyleSheet,
        formats: &'a [(FormatKey, NumberFormatId)],
        config: &'a ExporterConfig,
        cache: &'a FieldCache,
    ) -> Self {
        RowBuilder {
            styles,
            formats,
            config,
            cache,
        }
    }

    /// Fila de título: una sola celda con el rol de título.
    pub fn title_row(&self, title: &str) -> Vec<Cell> {
        let value = CellValue::Text(title.to_string());
        vec![self.build_cell(
            &value,
            None,
            Some(FONT_TITLE),
            Some(FILL_TITLE),
            Some(BORDER_ALL),
        )]
    }

    /// Fila de encabezado: las etiquetas se escriben tal cual, sin pasar
    /// por el clasificador.
    pub fn header_row(&self, columns: &[ColumnSpec]) -> Vec<Cell> {
        let style_index = self.styles.find_style_index(
            NumberFormatId::None,
            Some(FONT_HEADER),
            Some(FILL_HEADER),
            Some(BORDER_ALL),
        );
        columns
            .iter()
            .map(|column| Cell {
                kind: CellKind::Text,
                literal: column.label.clone(),
                style_index,
            })
            .collect()
    }

    /// Fila de detalle: una celda por columna, con la pista de moneda de
    /// la fila aplicada a todas sus celdas.
    pub fn detail_row<R: Record + ?Sized>(
        &self,
        record: &R,
        columns: &[ColumnSpec],
    ) -> ExportResult<Vec<Cell>> {
        let hint = self.currency_hint(record)?;
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            let value = record.get(&column.key)?;
            row.push(self.build_cell(
                &value,
                hint,
                Some(FONT_DETAIL),
                Some(FILL_DETAIL),
                Some(BORDER_ALL),
            ));
        }
        Ok(row)
    }

    // Busca entre todos los campos del registro los que contengan la marca
    // "idmoneda" y sean enteros; el valor más frecuente (en empate gana el
    // primero encontrado) es la pista de moneda de la fila.
    fn currency_hint<R: Record + ?Sized>(&self, record: &R) -> ExportResult<Option<i64>> {
        let fields = self.cache.fields_for(record);
        let mut found = Vec::new();
        for field in fields.iter() {
            if field.field_type != FieldType::Integer {
                continue;
            }
            if !field.name.to_lowercase().contains(CURRENCY_ID_MARKER) {
                continue;
            }
            if let CellValue::Integer(id) = record.get(&field.name)? {
                found.push(id);
            }
        }
        if found.is_empty() {
            return Ok(None);
        }

        let mut counted: Vec<(i64, usize)> = Vec::new();
        for id in found {
            match counted.iter_mut().find(|(value, _)| *value == id) {
                Some(entry) => entry.1 += 1,
                None => counted.push((id, 1)),
            }
        }
        let mut best = counted[0];
        for &(value, count) in &counted[1..] {
            if count > best.1 {
                best = (value, count);
            }
        }
        Ok(Some(best.0))
    }

    fn build_cell(
        &self,
        value: &CellValue,
        hint: Option<i64>,
        font: Option<u32>,
        fill: Option<u32>,
        border: Option<u32>,
    ) -> Cell {
        let classified = cells::classify(value, hint, self.config);
        let format = styles::format_id_for(self.formats, classified.format);
        Cell {
            kind: classified.kind,
            literal: classified.literal,
            style_index: self.styles.find_style_index(format, font, fill, border),
        }
    }
}
