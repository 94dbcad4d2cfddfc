use std::fmt;

/// Type of a primitive field or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// Fixed-point decimal
    Decimal,

    /// String type
    String,

    /// 128-bit UUID
    Uuid,

    /// Opaque byte sequence
    Binary,

    /// Date and time without time zone
    DateTime,
}

impl Type {
    /// Stable name used when printing and when hashing mappings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Boolean",
            Self::I16 => "Int16",
            Self::I32 => "Int32",
            Self::I64 => "Int64",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Uuid => "Guid",
            Self::Binary => "Binary",
            Self::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
