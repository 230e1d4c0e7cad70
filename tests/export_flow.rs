use std::path::Path;
use std::sync::{Arc, Mutex};

use excel_exporter::{
    CellValue, ColumnSpec, DocumentPackager, ExcelExporter, ExportError, ExportOptions,
    ExportResult, ExporterConfig, SheetModel, TypedRecord,
};
use serde_json::json;
use tempfile::TempDir;

#[derive(Debug, Default, Clone)]
struct CapturedSheet {
    name: String,
    row_lens: Vec<usize>,
    merge: Option<String>,
    width_count: usize,
    cell_format_count: usize,
    font_count: usize,
}

struct CapturingPackager {
    captured: Arc<Mutex<Option<CapturedSheet>>>,
}

impl DocumentPackager for CapturingPackager {
    fn package(&self, sheet: &SheetModel, _path: &Path) -> ExportResult<()> {
        *self.captured.lock().unwrap() = Some(CapturedSheet {
            name: sheet.name.clone(),
            row_lens: sheet.grid.iter().map(|row| row.len()).collect(),
            merge: sheet.merge.as_ref().map(|merge| merge.reference.clone()),
            width_count: sheet.widths.len(),
            cell_format_count: sheet.styles.cell_formats.len(),
            font_count: sheet.styles.fonts.len(),
        });
        Ok(())
    }
}

fn capturing_exporter() -> (ExcelExporter, Arc<Mutex<Option<CapturedSheet>>>) {
    let captured = Arc::new(Mutex::new(None));
    let exporter = ExcelExporter::new().with_packager(Box::new(CapturingPackager {
        captured: Arc::clone(&captured),
    }));
    (exporter, captured)
}

fn sample_records() -> Vec<serde_json::Value> {
    vec![
        json!({ "Cliente": "Acme", "Cantidad": 3, "Total": 1500.50 }),
        json!({ "Cliente": "Pérez & Hijos", "Cantidad": 1, "Total": 200.0 }),
        json!({ "Cliente": "Distribuidora Norte", "Cantidad": 7, "Total": 8420.25 }),
    ]
}

#[test]
fn titled_export_builds_the_full_grid() {
    let (exporter, captured) = capturing_exporter();
    let options = ExportOptions::builder().title("Report").build();

    exporter.export(&sample_records(), &options).unwrap();

    let sheet = captured.lock().unwrap().clone().unwrap();
    // 1 título + 1 encabezado + 3 detalles
    assert_eq!(sheet.row_lens, vec![1, 3, 3, 3, 3]);
    assert_eq!(sheet.merge.as_deref(), Some("A1:C1"));
    assert_eq!(sheet.font_count, 4);
    assert_eq!(sheet.cell_format_count, 20);
}

#[test]
fn untitled_export_has_no_merge_and_no_title_block() {
    let (exporter, captured) = capturing_exporter();
    let options = ExportOptions::default();

    exporter.export(&sample_records(), &options).unwrap();

    let sheet = captured.lock().unwrap().clone().unwrap();
    assert_eq!(sheet.row_lens, vec![3, 3, 3, 3]);
    assert_eq!(sheet.merge, None);
    assert_eq!(sheet.font_count, 3);
    assert_eq!(sheet.cell_format_count, 15);
}

#[test]
fn empty_collection_without_columns_yields_an_empty_sheet() {
    let (exporter, captured) = capturing_exporter();
    let records: Vec<serde_json::Value> = Vec::new();

    exporter.export(&records, &ExportOptions::default()).unwrap();

    let sheet = captured.lock().unwrap().clone().unwrap();
    assert!(sheet.row_lens.is_empty());
    assert_eq!(sheet.merge, None);
    assert_eq!(sheet.width_count, 0);
}

#[test]
fn empty_collection_with_explicit_columns_writes_the_header() {
    let (exporter, captured) = capturing_exporter();
    let records: Vec<serde_json::Value> = Vec::new();
    let options = ExportOptions::builder()
        .column("a", "Columna A")
        .column("b", "Columna B")
        .build();

    exporter.export(&records, &options).unwrap();

    let sheet = captured.lock().unwrap().clone().unwrap();
    assert_eq!(sheet.row_lens, vec![2]);
    assert_eq!(sheet.width_count, 2);
}

#[test]
fn sheet_name_is_truncated_to_31_chars() {
    let (exporter, captured) = capturing_exporter();
    let options = ExportOptions::builder()
        .sheet_name("Un nombre de hoja larguísimo que excede el límite")
        .build();

    exporter.export(&sample_records(), &options).unwrap();

    let sheet = captured.lock().unwrap().clone().unwrap();
    assert_eq!(sheet.name.chars().count(), 31);
}

#[test]
fn blank_sheet_name_falls_back_to_the_default() {
    let (exporter, captured) = capturing_exporter();
    let options = ExportOptions::builder().sheet_name("   ").build();

    exporter.export(&sample_records(), &options).unwrap();

    let sheet = captured.lock().unwrap().clone().unwrap();
    assert_eq!(sheet.name, "Hoja");
}

#[test]
fn missing_explicit_column_aborts_with_invalid_field() {
    let (exporter, _) = capturing_exporter();
    let options = ExportOptions::builder().column("NoExiste", "X").build();

    let error = exporter.export(&sample_records(), &options).unwrap_err();
    assert!(matches!(error, ExportError::InvalidField(name) if name == "NoExiste"));
}

#[test]
fn duplicate_column_keys_are_rejected() {
    let (exporter, _) = capturing_exporter();
    let options = ExportOptions::builder()
        .column("Cliente", "Cliente")
        .column("Cliente", "Repetida")
        .build();

    let error = exporter.export(&sample_records(), &options).unwrap_err();
    assert!(matches!(error, ExportError::MalformedColumnSpec(_)));
}

#[test]
fn export_writes_a_real_workbook() {
    let dir = TempDir::new().unwrap();
    let config = ExporterConfig::builder()
        .output_dir(dir.path().to_path_buf())
        .build();
    let exporter = ExcelExporter::with_config(config);
    let options = ExportOptions::builder()
        .file_name("ventas")
        .title("Reporte de Ventas")
        .build();

    let path = exporter.export(&sample_records(), &options).unwrap();

    assert_eq!(path, dir.path().join("ventas.xlsx"));
    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn name_collisions_append_a_counter() {
    let dir = TempDir::new().unwrap();
    let config = ExporterConfig::builder()
        .output_dir(dir.path().to_path_buf())
        .build();
    let exporter = ExcelExporter::with_config(config);
    let options = ExportOptions::builder().file_name("Libro1").build();
    let records = sample_records();

    let first = exporter.export(&records, &options).unwrap();
    let second = exporter.export(&records, &options).unwrap();
    let third = exporter.export(&records, &options).unwrap();

    assert_eq!(first, dir.path().join("Libro1.xlsx"));
    assert_eq!(second, dir.path().join("Libro1(1).xlsx"));
    assert_eq!(third, dir.path().join("Libro1(2).xlsx"));
}

#[test]
fn typed_records_round_the_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let config = ExporterConfig::builder()
        .output_dir(dir.path().to_path_buf())
        .build();
    let exporter = ExcelExporter::with_config(config);

    let fecha = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let records = vec![
        TypedRecord::new("Movimiento")
            .with_field("Fecha", CellValue::DateTime(fecha))
            .with_field("Detalle", CellValue::Text("Cobro".to_string()))
            .with_field("IdMoneda", CellValue::Integer(1))
            .with_field("Monto", CellValue::Decimal(1250.75))
            .with_field("Conciliado", CellValue::Boolean(true)),
        TypedRecord::new("Movimiento")
            .with_field("Fecha", CellValue::DateTime(fecha))
            .with_field("Detalle", CellValue::Null)
            .with_field("IdMoneda", CellValue::Integer(2))
            .with_field("Monto", CellValue::Decimal(990.10))
            .with_field("Conciliado", CellValue::Boolean(false)),
    ];

    let options = ExportOptions::builder()
        .file_name("movimientos")
        .sheet_name("Movimientos")
        .title("Conciliación Bancaria")
        .build();

    let path = exporter.export(&records, &options).unwrap();
    assert!(path.exists());
}

#[test]
fn derived_columns_follow_the_first_record() {
    let (exporter, captured) = capturing_exporter();
    let records = vec![json!({ "zeta": 1, "alfa": 2 })];

    exporter.export(&records, &ExportOptions::default()).unwrap();

    let sheet = captured.lock().unwrap().clone().unwrap();
    // Encabezado + detalle, dos columnas en el orden declarado
    assert_eq!(sheet.row_lens, vec![2, 2]);
}

#[test]
fn explicit_columns_can_reorder_and_subset() {
    let dir = TempDir::new().unwrap();
    let config = ExporterConfig::builder()
        .output_dir(dir.path().to_path_buf())
        .build();
    let exporter = ExcelExporter::with_config(config);
    let options = ExportOptions::builder()
        .file_name("subset")
        .columns(vec![ColumnSpec::new("Total", "Importe")])
        .build();

    let path = exporter.export(&sample_records(), &options).unwrap();
    assert!(path.exists());
}
