use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{ColumnSpec, ExportError, ExportResult, ExporterConfig, MergeRegion};
use crate::excel::columns::{column_letter, fit_column_widths};
use crate::excel::packager::{DocumentPackager, SheetModel, XlsxPackager};
use crate::excel::rows::RowBuilder;
use crate::excel::styles::{default_cell_formats, StyleSheet};
use crate::reflection::{FieldCache, Record};

const EXTENSION: &str = ".xlsx";

/// Opciones de una exportación. Todo es opcional: sin columnas explícitas
/// se derivan del primer registro, sin título no hay fila combinada.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub file_name: Option<String>,
    pub sheet_name: Option<String>,
    pub columns: Option<Vec<ColumnSpec>>,
    pub title: Option<String>,
}

impl ExportOptions {
    pub fn builder() -> ExportOptionsBuilder {
        ExportOptionsBuilder::default()
    }
}

#[derive(Default)]
pub struct ExportOptionsBuilder {
    options: ExportOptions,
}

impl ExportOptionsBuilder {
    pub fn file_name(mut self, name: &str) -> Self {
        self.options.file_name = Some(name.to_string());
        self
    }

    pub fn sheet_name(mut self, name: &str) -> Self {
        self.options.sheet_name = Some(name.to_string());
        self
    }

    pub fn columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.options.columns = Some(columns);
        self
    }

    pub fn column(mut self, key: &str, label: &str) -> Self {
        self.options
            .columns
            .get_or_insert_with(Vec::new)
            .push(ColumnSpec::new(key, label));
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.options.title = Some(title.to_string());
        self
    }

    pub fn build(self) -> ExportOptions {
        self.options
    }
}

/// Exportador de colecciones de registros a documentos de hoja de cálculo.
pub struct ExcelExporter {
    config: ExporterConfig,
    cache: FieldCache,
    packager: Box<dyn DocumentPackager>,
}

impl Default for ExcelExporter {
    fn default() -> Self {
        ExcelExporter::new()
    }
}

impl ExcelExporter {
    pub fn new() -> Self {
        ExcelExporter::with_config(ExporterConfig::default())
    }

    pub fn with_config(config: ExporterConfig) -> Self {
        ExcelExporter {
            config,
            cache: FieldCache::new(),
            packager: Box::new(XlsxPackager),
        }
    }

    pub fn with_packager(mut self, packager: Box<dyn DocumentPackager>) -> Self {
        self.packager = packager;
        self
    }

    /// Exporta la colección completa y devuelve la ruta del documento.
    pub fn export<R: Record>(&self, records: &[R], options: &ExportOptions) -> ExportResult<PathBuf> {
        let sheet_name = self.resolve_sheet_name(options.sheet_name.as_deref());
        let columns = self.resolve_columns(records, options.columns.as_deref())?;
        let title = options
            .title
            .as_deref()
            .filter(|title| !title.trim().is_empty());
        let use_title = title.is_some();

        let formats = default_cell_formats();
        let styles = StyleSheet::build(&formats, use_title);
        let builder = RowBuilder::new(&styles, &formats, &self.config, &self.cache);

        let mut grid = Vec::with_capacity(records.len() + 2);
        if let Some(title) = title {
            grid.push(builder.title_row(title));
        }
        if !columns.is_empty() {
            grid.push(builder.header_row(&columns));
        }
        for record in records {
            grid.push(builder.detail_row(record, &columns)?);
        }

        let widths = fit_column_widths(&grid, columns.len(), use_title);
        let merge = if use_title && !columns.is_empty() {
            let last = columns.len() as u32 - 1;
            Some(MergeRegion {
                first_col: 0,
                last_col: last as u16,
                reference: format!("{}1:{}1", column_letter(0), column_letter(last)),
            })
        } else {
            None
        };

        tracing::debug!(
            "Grilla armada: {} filas, {} columnas, título: {}",
            grid.len(),
            columns.len(),
            use_title
        );

        let model = SheetModel {
            name: sheet_name,
            grid,
            widths,
            merge,
            styles,
        };

        let path = self.resolve_output_path(options.file_name.as_deref())?;
        tracing::info!("Generando documento Excel: {}", path.display());
        self.packager.package(&model, &path)?;
        Ok(path)
    }

    fn resolve_sheet_name(&self, name: Option<&str>) -> String {
        match name {
            Some(name) if !name.trim().is_empty() => {
                name.chars().take(self.config.max_sheet_name_len).collect()
            }
            _ => self.config.default_sheet_name.clone(),
        }
    }

    fn resolve_columns<R: Record>(
        &self,
        records: &[R],
        explicit: Option<&[ColumnSpec]>,
    ) -> ExportResult<Vec<ColumnSpec>> {
        let columns: Vec<ColumnSpec> = match explicit {
            Some(columns) if !columns.is_empty() => columns.to_vec(),
            _ => match records.first() {
                Some(first) => self
                    .cache
                    .fields_for(first)
                    .iter()
                    .map(|field| ColumnSpec::new(&field.name, &field.name))
                    .collect(),
                None => Vec::new(),
            },
        };

        if columns.is_empty() && !records.is_empty() {
            return Err(ExportError::MalformedColumnSpec(
                "no hay columnas que exportar".to_string(),
            ));
        }
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].iter().any(|other| other.key == column.key) {
                return Err(ExportError::MalformedColumnSpec(format!(
                    "clave de columna duplicada: '{}'",
                    column.key
                )));
            }
        }
        Ok(columns)
    }

    // El nombre físico se resuelve contra el directorio configurado (o el
    // temporal del sistema) y ante colisión se agrega "(n)" antes de la
    // extensión hasta encontrar un nombre libre.
    fn resolve_output_path(&self, file_name: Option<&str>) -> ExportResult<PathBuf> {
        let dir = match &self.config.output_dir {
            Some(dir) if dir.is_dir() => dir.clone(),
            _ => std::env::temp_dir(),
        };

        let base = match file_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.config.default_file_name.as_str(),
        };
        let stem = if base.to_lowercase().ends_with(EXTENSION) {
            &base[..base.len() - EXTENSION.len()]
        } else {
            base
        };

        let mut path = dir.join(format!("{}{}", stem, EXTENSION));
        let mut attempt = 1;
        while path.exists() {
            path = dir.join(format!("{}({}){}", stem, attempt, EXTENSION));
            attempt += 1;
        }
        Ok(path)
    }
}
