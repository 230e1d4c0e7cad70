use anyhow::Result;
use chrono::NaiveDate;
use excel_exporter::{
    CellValue, ColumnSpec, ExcelExporter, ExportOptions, ExporterConfig, TypedRecord,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("📊 Demo de Exportación de Excel");
    println!("================================\n");

    std::fs::create_dir_all("output")?;

    demo_ventas_json()?;
    demo_asientos_tipados()?;

    println!("\n✅ Todos los documentos han sido generados en la carpeta 'output/'");
    Ok(())
}

fn demo_ventas_json() -> Result<()> {
    println!("📄 Generando reporte de ventas desde JSON...");

    let registros = vec![
        json!({ "Producto": "Laptop HP", "Cantidad": 5, "PrecioUnitario": 45000.50, "Pagado": true }),
        json!({ "Producto": "Mouse Inalámbrico", "Cantidad": 15, "PrecioUnitario": 1500.0, "Pagado": false }),
        json!({ "Producto": "Teclado Mecánico", "Cantidad": 8, "PrecioUnitario": 3500.75, "Pagado": true }),
    ];

    let config = ExporterConfig::builder()
        .output_dir("output".into())
        .default_file_name("reporte_ventas")
        .build();
    let exporter = ExcelExporter::with_config(config);

    let options = ExportOptions::builder()
        .sheet_name("Ventas")
        .title("Reporte de Ventas Mensuales")
        .build();

    let path = exporter.export(&registros, &options)?;
    println!("  ✓ Generado: {}", path.display());
    Ok(())
}

fn demo_asientos_tipados() -> Result<()> {
    println!("\n📑 Generando asientos contables tipados...");

    let fecha = NaiveDate::from_ymd_opt(2024, 7, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let asientos = vec![
        TypedRecord::new("Asiento")
            .with_field("Fecha", CellValue::DateTime(fecha))
            .with_field("Glosa", CellValue::Text("Venta de mercadería".to_string()))
            .with_field("IdMoneda", CellValue::Integer(1))
            .with_field("Monto", CellValue::Decimal(125000.50)),
        TypedRecord::new("Asiento")
            .with_field("Fecha", CellValue::DateTime(fecha))
            .with_field("Glosa", CellValue::Text("Pago a proveedores".to_string()))
            .with_field("IdMoneda", CellValue::Integer(2))
            .with_field("Monto", CellValue::Decimal(48000.25)),
    ];

    let config = ExporterConfig::builder()
        .output_dir("output".into())
        .default_file_name("asientos")
        .build();
    let exporter = ExcelExporter::with_config(config);

    let options = ExportOptions::builder()
        .sheet_name("Asientos Contables")
        .title("Libro Diario")
        .columns(vec![
            ColumnSpec::new("Fecha", "Fecha"),
            ColumnSpec::new("Glosa", "Descripción"),
            ColumnSpec::new("IdMoneda", "Moneda"),
            ColumnSpec::new("Monto", "Monto"),
        ])
        .build();

    let path = exporter.export(&asientos, &options)?;
    println!("  ✓ Generado: {}", path.display());
    Ok(())
}
