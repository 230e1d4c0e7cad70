use std::path::PathBuf;

/// Configuración del exportador: directorio de salida, nombres por defecto
/// y tokens de texto para valores booleanos.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub output_dir: Option<PathBuf>,
    pub default_file_name: String,
    pub default_sheet_name: String,
    pub max_sheet_name_len: usize,
    pub affirmative: String,
    pub negative: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            output_dir: None,
            default_file_name: "Libro1".to_string(),
            default_sheet_name: "Hoja".to_string(),
            max_sheet_name_len: 31,
            affirmative: "Sí".to_string(),
            negative: "No".to_string(),
        }
    }
}

impl ExporterConfig {
    pub fn builder() -> ExporterConfigBuilder {
        ExporterConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct ExporterConfigBuilder {
    output_dir: Option<PathBuf>,
    default_file_name: Option<String>,
    default_sheet_name: Option<String>,
    affirmative: Option<String>,
    negative: Option<String>,
}

impl ExporterConfigBuilder {
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn default_file_name(mut self, name: &str) -> Self {
        self.default_file_name = Some(name.to_string());
        self
    }

    pub fn default_sheet_name(mut self, name: &str) -> Self {
        self.default_sheet_name = Some(name.to_string());
        self
    }

    /// Tokens para renderizar booleanos, por ejemplo ("Sí", "No").
    pub fn boolean_tokens(mut self, affirmative: &str, negative: &str) -> Self {
        self.affirmative = Some(affirmative.to_string());
        self.negative = Some(negative.to_string());
        self
    }

    pub fn build(self) -> ExporterConfig {
        let default = ExporterConfig::default();
        ExporterConfig {
            output_dir: self.output_dir,
            default_file_name: self.default_file_name.unwrap_or(default.default_file_name),
            default_sheet_name: self.default_sheet_name.unwrap_or(default.default_sheet_name),
            max_sheet_name_len: default.max_sheet_name_len,
            affirmative: self.affirmative.unwrap_or(default.affirmative),
            negative: self.negative.unwrap_or(default.negative),
        }
    }
}
