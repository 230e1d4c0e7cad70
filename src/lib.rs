pub mod core;
pub mod excel;
pub mod reflection;

// Re-export commonly used types
pub use crate::core::{
    Cell, CellKind, CellValue, ColumnSpec, ExportError, ExportResult, ExporterConfig, FieldType,
};
pub use crate::excel::{ExcelExporter, ExportOptions};
pub use crate::excel::{DocumentPackager, SheetModel, XlsxPackager};
pub use crate::reflection::{FieldCache, FieldSpec, Record, TypedRecord};
