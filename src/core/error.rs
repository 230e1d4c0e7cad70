use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("El campo '{0}' no existe en el registro")]
    InvalidField(String),
    #[error("Definición de columnas inválida: {0}")]
    MalformedColumnSpec(String),
    #[error("Error al empaquetar el documento: {0}")]
    Packaging(String),
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
