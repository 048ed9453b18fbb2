#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub value: String,
    pub cell_type: CellType,
    pub original_type: DataTypeInfo,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellType {
    Text,
    Number,
    Date,
    Boolean,
    Empty,
}

/// The kind of value calamine reported for the cell, kept so that numeric
/// reads do not have to go back through the display string.
#[derive(Clone, Debug, PartialEq)]
pub enum DataTypeInfo {
    Empty,
    String,
    Float(f64),
    Int(i64),
    Bool(bool),
    DateTime(f64),
    DateTimeIso(String),
    DurationIso(String),
    Error,
}

impl Cell {
    pub fn new_with_type(value: String, cell_type: CellType, original_type: DataTypeInfo) -> Self {
        Self {
            value,
            cell_type,
            original_type,
        }
    }

    pub fn empty() -> Self {
        Self::new_with_type(String::new(), CellType::Empty, DataTypeInfo::Empty)
    }

    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return Self::empty();
        }
        Self::new_with_type(value, CellType::Text, DataTypeInfo::String)
    }

    pub fn float(f: f64) -> Self {
        let value = if f.is_nan() {
            "nan".to_string()
        } else if f == (f as i64) as f64 && f.abs() < 1e10 {
            (f as i64).to_string()
        } else {
            f.to_string()
        };
        Self::new_with_type(value, CellType::Number, DataTypeInfo::Float(f))
    }

    pub fn int(i: i64) -> Self {
        Self::new_with_type(i.to_string(), CellType::Number, DataTypeInfo::Int(i))
    }

    pub fn boolean(b: bool) -> Self {
        let value = if b { "TRUE" } else { "FALSE" };
        Self::new_with_type(value.to_string(), CellType::Boolean, DataTypeInfo::Bool(b))
    }

    /// Empty, whitespace-only, error and NaN-like cells (`nan`, any case)
    /// are blank.
    pub fn is_blank(&self) -> bool {
        if self.cell_type == CellType::Empty {
            return true;
        }
        match self.original_type {
            DataTypeInfo::Empty | DataTypeInfo::Error => true,
            DataTypeInfo::Float(f) if f.is_nan() => true,
            _ => {
                let trimmed = self.value.trim();
                trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
            }
        }
    }

    /// Value of a genuinely numeric cell. Text is never parsed here.
    pub fn as_number(&self) -> Option<f64> {
        match self.original_type {
            DataTypeInfo::Float(f) if !f.is_nan() => Some(f),
            DataTypeInfo::Int(i) => Some(i as f64),
            DataTypeInfo::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Whole hours held by the cell, truncated toward zero.
    ///
    /// Numeric text is parsed; anything that cannot be read as a number
    /// counts as zero hours.
    pub fn coerce_hours(&self) -> i64 {
        match self.cell_type {
            CellType::Text => self
                .value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
                .unwrap_or(0),
            _ => self
                .as_number()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
                .unwrap_or(0),
        }
    }

    /// Numeric equality with one. The text `"1"` is not equal.
    pub fn equals_one(&self) -> bool {
        self.as_number() == Some(1.0)
    }
}
