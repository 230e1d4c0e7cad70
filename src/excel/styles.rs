/// Identificadores OOXML de formato numérico que utiliza el motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormatId {
    /// Sin formato.
    None = 0,
    /// "0"
    Integer = 1,
    /// "0.00"
    IntegerDecimals = 2,
    /// "#,##0.00"
    CurrencyDecimals = 4,
    /// "0%"
    Percent = 9,
    /// "d/m/yyyy"
    DateDayMonthYear = 14,
    /// "m/d/yyyy H:mm"
    DateTimeMinutes = 22,
    /// "##,##0", formato personalizado registrado por el propio motor.
    CurrencyNoDecimals = 165,
}

impl NumberFormatId {
    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Clave de formato por tipo de dato de la celda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKey {
    Text,
    Integer,
    Decimal,
    Date,
    WholeCurrency,
}

/// Formatos numéricos por defecto, en orden de inserción. El orden define
/// la posición de cada clave dentro de los bloques de la tabla de formatos.
pub fn default_cell_formats() -> Vec<(FormatKey, NumberFormatId)> {
    vec![
        (FormatKey::Text, NumberFormatId::None),
        (FormatKey::Integer, NumberFormatId::Integer),
        (FormatKey::Decimal, NumberFormatId::CurrencyDecimals),
        (FormatKey::Date, NumberFormatId::DateDayMonthYear),
        (FormatKey::WholeCurrency, NumberFormatId::CurrencyNoDecimals),
    ]
}

// Posiciones fijas de cada rol dentro del catálogo.
pub const FONT_DETAIL: u32 = 1;
pub const FONT_HEADER: u32 = 2;
pub const FONT_TITLE: u32 = 3;
pub const FILL_DETAIL: u32 = 0;
pub const FILL_HEADER: u32 = 2;
pub const FILL_TITLE: u32 = 3;
pub const BORDER_ALL: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    pub size: Option<f64>,
    pub bold: bool,
    pub color: Option<u32>,
}

impl Font {
    fn new(size: f64, bold: bool, color: Option<u32>) -> Self {
        Font {
            size: Some(size),
            bold,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPattern {
    None,
    Gray125,
    Solid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub pattern: FillPattern,
    pub color: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Border {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Border {
    fn thin_all() -> Self {
        Border {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

/// Formato numérico personalizado registrado en el catálogo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub id: u32,
    pub code: String,
}

/// Entrada de la tabla de formatos de celda. `None` en un componente
/// significa ausencia, no valor cero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFormat {
    pub number_format: Option<NumberFormatId>,
    pub font: Option<u32>,
    pub fill: Option<u32>,
    pub border: Option<u32>,
}

/// Catálogo mínimo de estilos: fuentes, rellenos, bordes, formatos
/// numéricos personalizados y la tabla de formatos de celda deduplicada.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    pub fonts: Vec<Font>,
    pub fills: Vec<Fill>,
    pub borders: Vec<Border>,
    pub number_formats: Vec<NumberFormat>,
    pub cell_formats: Vec<CellFormat>,
}

impl StyleSheet {
    /// Construye el catálogo para los roles en uso. El bloque de título
    /// solo existe cuando la exportación lleva título.
    pub fn build(formats: &[(FormatKey, NumberFormatId)], use_title: bool) -> Self {
        let mut fonts = vec![Font::default()]; // 0 - reservado por el contenedor
        fonts.push(Font::new(11.0, false, None)); // 1 - detalle
        fonts.push(Font::new(11.0, true, Some(0xFFFFFF))); // 2 - encabezado
        if use_title {
            fonts.push(Font::new(14.0, true, Some(0x000080))); // 3 - título
        }

        let mut fills = vec![
            Fill {
                pattern: FillPattern::None,
                color: None,
            }, // 0 - reservado por el contenedor
            Fill {
                pattern: FillPattern::Gray125,
                color: None,
            }, // 1 - reservado por el contenedor
            Fill {
                pattern: FillPattern::Solid,
                color: Some(0x63A7EB),
            }, // 2 - encabezado
        ];
        if use_title {
            fills.push(Fill {
                pattern: FillPattern::Solid,
                color: Some(0xE6E6E6),
            }); // 3 - título
        }

        let borders = vec![Border::default(), Border::thin_all()];

        let number_formats = vec![NumberFormat {
            id: NumberFormatId::CurrencyNoDecimals.id(),
            code: "##,##0".to_string(),
        }];

        // Un bloque por rol, cada uno con una entrada por clave de formato.
        // El orden de los bloques es fijo: la búsqueda depende de él.
        let mut cell_formats = Vec::new();
        push_block(&mut cell_formats, formats, None, None, None);
        push_block(
            &mut cell_formats,
            formats,
            Some(FONT_DETAIL),
            Some(FILL_DETAIL),
            Some(BORDER_ALL),
        );
        push_block(
            &mut cell_formats,
            formats,
            Some(FONT_HEADER),
            Some(FILL_HEADER),
            Some(BORDER_ALL),
        );
        if use_title {
            push_block(
                &mut cell_formats,
                formats,
                Some(FONT_TITLE),
                Some(FILL_TITLE),
                Some(BORDER_ALL),
            );
        }

        StyleSheet {
            fonts,
            fills,
            borders,
            number_formats,
            cell_formats,
        }
    }

    /// Índice de la primera entrada que coincide exactamente con la
    /// combinación pedida. La coincidencia exige igualdad de presencia y de
    /// valor en los cuatro componentes; sin coincidencia se devuelve 0.
    pub fn find_style_index(
        &self,
        format: NumberFormatId,
        font: Option<u32>,
        fill: Option<u32>,
        border: Option<u32>,
    ) -> u32 {
        let want = match format {
            NumberFormatId::None => None,
            other => Some(other),
        };
        self.cell_formats
            .iter()
            .position(|cf| {
                cf.number_format == want && cf.font == font && cf.fill == fill && cf.border == border
            })
            .unwrap_or(0) as u32
    }
}

/// Identificador numérico asociado a una clave de formato.
pub fn format_id_for(formats: &[(FormatKey, NumberFormatId)], key: FormatKey) -> NumberFormatId {
    formats
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, id)| *id)
        .unwrap_or(NumberFormatId::None)
}

fn push_block(
    cell_formats: &mut Vec<CellFormat>,
    formats: &[(FormatKey, NumberFormatId)],
    font: Option<u32>,
    fill: Option<u32>,
    border: Option<u32>,
) {
    for (_, id) in formats {
        let number_format = match id {
            NumberFormatId::None => None,
            other => Some(*other),
        };
        cell_formats.push(CellFormat {
            number_format,
            font,
            fill,
            border,
        });
    }
}
