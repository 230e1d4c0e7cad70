use chrono::{NaiveDate, NaiveDateTime};

use crate::core::{CellKind, CellValue, ExporterConfig};
use crate::excel::styles::FormatKey;

/// Resultado de clasificar un valor: cómo se renderiza, con qué texto y
/// bajo qué clave de formato numérico.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub kind: CellKind,
    pub literal: String,
    pub format: FormatKey,
}

/// Decide la representación de un valor según su tipo declarado. La pista
/// de moneda solo afecta a los decimales (ver `classify_decimal`).
pub fn classify(value: &CellValue, currency_hint: Option<i64>, config: &ExporterConfig) -> Classified {
    match value {
        CellValue::DateTime(moment) => Classified {
            kind: CellKind::Number,
            literal: oadate_serial(moment).to_string(),
            format: FormatKey::Date,
        },
        CellValue::Boolean(value) => Classified {
            kind: CellKind::Text,
            literal: if *value {
                config.affirmative.clone()
            } else {
                config.negative.clone()
            },
            format: FormatKey::Text,
        },
        CellValue::Integer(value) => Classified {
            kind: CellKind::Number,
            literal: value.to_string(),
            format: FormatKey::Integer,
        },
        CellValue::Decimal(value) => classify_decimal(*value, currency_hint),
        CellValue::Text(text) => classify_text(text),
        CellValue::Null => Classified {
            kind: CellKind::Text,
            literal: String::new(),
            format: FormatKey::Text,
        },
    }
}

// Un decimal sin parte fraccionaria real, o con pista de moneda 1, se
// renderiza como monto entero. La ausencia de pista se comporta igual que
// la pista 1: es el comportamiento histórico del sistema y está fijado por
// las pruebas, no debe "corregirse" sin decisión de producto.
fn classify_decimal(value: f64, hint: Option<i64>) -> Classified {
    let canonical = value.to_string();
    let mut parts = canonical.splitn(2, '.');
    let integer_part = parts.next().unwrap_or_default();
    let fraction = parts.next();
    let fraction_is_zero = fraction
        .map(|digits| digits.parse::<i64>() == Ok(0))
        .unwrap_or(false);

    if fraction.is_none() || fraction_is_zero || hint == Some(1) {
        let format = match hint {
            None | Some(1) => FormatKey::WholeCurrency,
            Some(_) => FormatKey::Decimal,
        };
        Classified {
            kind: CellKind::Number,
            literal: integer_part.to_string(),
            format,
        }
    } else {
        Classified {
            kind: CellKind::Number,
            literal: format!("{:.2}", value),
            format: FormatKey::Decimal,
        }
    }
}

// Los textos compuestos solo por dígitos se exportan como números.
fn classify_text(text: &str) -> Classified {
    match text.parse::<i32>() {
        Ok(number) => Classified {
            kind: CellKind::Number,
            literal: number.to_string(),
            format: FormatKey::Integer,
        },
        Err(_) => Classified {
            kind: CellKind::Text,
            literal: strip_invalid_chars(text),
            format: FormatKey::Text,
        },
    }
}

/// Elimina los caracteres de control y el '&', inválidos en la hoja.
pub fn strip_invalid_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '&')
        })
        .collect()
}

// Días desde 1899-12-30; la fracción codifica la hora del día.
fn oadate_serial(moment: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let elapsed = moment.signed_duration_since(epoch);
    elapsed.num_seconds() as f64 / 86_400.0
}
