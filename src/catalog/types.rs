use serde::{Deserialize, Serialize};

/// Column and variable types. Each dialect decides the spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Decimal { precision: u8, scale: u8 },
    Float,
    Double,
    Char(u32),
    /// `None` means the longest the dialect allows
    VarChar(Option<u32>),
    Text,
    Binary(u32),
    VarBinary(Option<u32>),
    Date,
    Time,
    DateTime,
    DateTimeOffset,
    Interval,
    Guid,
    /// A type name passed through verbatim
    Custom(String),
}
