pub mod cells;
pub mod columns;
pub mod exporter;
pub mod packager;
pub mod rows;
pub mod styles;

pub use exporter::{ExcelExporter, ExportOptions};
pub use packager::{DocumentPackager, SheetModel, XlsxPackager};
