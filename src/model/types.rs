//! Field type discriminators and the warehouse column-type mapping.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::compile::CompileError;

/// The type of a dimension field.
///
/// Determines filterability (only `String` and `Number` dimensions accept
/// filters) and how values are presented downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DimensionType {
    String,
    Number,
    Timestamp,
    Date,
    Boolean,
}

/// The aggregate applied by a measure field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MeasureType {
    Average,
    Sum,
    Min,
    Max,
    Count,
    CountDistinct,
}

impl DimensionType {
    /// The wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionType::String => "string",
            DimensionType::Number => "number",
            DimensionType::Timestamp => "timestamp",
            DimensionType::Date => "date",
            DimensionType::Boolean => "boolean",
        }
    }

    /// Map a warehouse-native column type name to a dimension type.
    ///
    /// Lookup is case-insensitive against a fixed table of known native type
    /// names. The function is total: unrecognized names map to
    /// [`DimensionType::String`].
    pub fn from_column_type(column_type: &str) -> DimensionType {
        COLUMN_TYPE_MAP
            .get(column_type.to_lowercase().as_str())
            .copied()
            .unwrap_or(DimensionType::String)
    }
}

impl MeasureType {
    /// The wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureType::Average => "average",
            MeasureType::Sum => "sum",
            MeasureType::Min => "min",
            MeasureType::Max => "max",
            MeasureType::Count => "count",
            MeasureType::CountDistinct => "count_distinct",
        }
    }
}

impl fmt::Display for DimensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionType {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(DimensionType::String),
            "number" => Ok(DimensionType::Number),
            "timestamp" => Ok(DimensionType::Timestamp),
            "date" => Ok(DimensionType::Date),
            "boolean" => Ok(DimensionType::Boolean),
            _ => Err(CompileError::UnsupportedFieldType { tag: s.to_string() }),
        }
    }
}

impl FromStr for MeasureType {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "average" => Ok(MeasureType::Average),
            "sum" => Ok(MeasureType::Sum),
            "min" => Ok(MeasureType::Min),
            "max" => Ok(MeasureType::Max),
            "count" => Ok(MeasureType::Count),
            "count_distinct" => Ok(MeasureType::CountDistinct),
            _ => Err(CompileError::UnsupportedFieldType { tag: s.to_string() }),
        }
    }
}

impl TryFrom<String> for DimensionType {
    type Error = CompileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for MeasureType {
    type Error = CompileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DimensionType> for String {
    fn from(t: DimensionType) -> String {
        t.as_str().to_string()
    }
}

impl From<MeasureType> for String {
    fn from(t: MeasureType) -> String {
        t.as_str().to_string()
    }
}

/// Native column type names to dimension types, lowercased.
///
/// Covers the numeric, character, boolean, timestamp, and date families of
/// the common warehouses (Postgres, Redshift, MySQL, BigQuery, Snowflake,
/// DuckDB, SQL Server). Built once, never mutated.
static COLUMN_TYPE_MAP: LazyLock<HashMap<&'static str, DimensionType>> = LazyLock::new(|| {
    HashMap::from([
        // Numeric
        ("smallint", DimensionType::Number),
        ("int2", DimensionType::Number),
        ("integer", DimensionType::Number),
        ("int", DimensionType::Number),
        ("int4", DimensionType::Number),
        ("bigint", DimensionType::Number),
        ("int8", DimensionType::Number),
        ("int64", DimensionType::Number),
        ("tinyint", DimensionType::Number),
        ("mediumint", DimensionType::Number),
        ("byteint", DimensionType::Number),
        ("hugeint", DimensionType::Number),
        ("utinyint", DimensionType::Number),
        ("usmallint", DimensionType::Number),
        ("uinteger", DimensionType::Number),
        ("ubigint", DimensionType::Number),
        ("decimal", DimensionType::Number),
        ("dec", DimensionType::Number),
        ("numeric", DimensionType::Number),
        ("bignumeric", DimensionType::Number),
        ("number", DimensionType::Number),
        ("real", DimensionType::Number),
        ("float", DimensionType::Number),
        ("float4", DimensionType::Number),
        ("float8", DimensionType::Number),
        ("float64", DimensionType::Number),
        ("double", DimensionType::Number),
        ("double precision", DimensionType::Number),
        ("money", DimensionType::Number),
        ("smallmoney", DimensionType::Number),
        // Character
        ("character varying", DimensionType::String),
        ("varchar", DimensionType::String),
        ("character", DimensionType::String),
        ("char", DimensionType::String),
        ("bpchar", DimensionType::String),
        ("nchar", DimensionType::String),
        ("nvarchar", DimensionType::String),
        ("text", DimensionType::String),
        ("tinytext", DimensionType::String),
        ("mediumtext", DimensionType::String),
        ("longtext", DimensionType::String),
        ("ntext", DimensionType::String),
        ("string", DimensionType::String),
        ("name", DimensionType::String),
        ("uuid", DimensionType::String),
        ("uniqueidentifier", DimensionType::String),
        ("json", DimensionType::String),
        ("jsonb", DimensionType::String),
        ("xml", DimensionType::String),
        ("enum", DimensionType::String),
        ("set", DimensionType::String),
        ("variant", DimensionType::String),
        ("object", DimensionType::String),
        ("array", DimensionType::String),
        // Time-of-day types carry no date component; treated as plain values.
        ("time", DimensionType::String),
        ("timetz", DimensionType::String),
        ("time without time zone", DimensionType::String),
        ("time with time zone", DimensionType::String),
        // Boolean
        ("boolean", DimensionType::Boolean),
        ("bool", DimensionType::Boolean),
        ("bit", DimensionType::Boolean),
        // Timestamp
        ("timestamp", DimensionType::Timestamp),
        ("timestamptz", DimensionType::Timestamp),
        ("timestamp without time zone", DimensionType::Timestamp),
        ("timestamp with time zone", DimensionType::Timestamp),
        ("timestamp_ntz", DimensionType::Timestamp),
        ("timestamp_ltz", DimensionType::Timestamp),
        ("timestamp_tz", DimensionType::Timestamp),
        ("datetime", DimensionType::Timestamp),
        ("datetime2", DimensionType::Timestamp),
        ("datetimeoffset", DimensionType::Timestamp),
        ("smalldatetime", DimensionType::Timestamp),
        // Date
        ("date", DimensionType::Date),
    ])
});
