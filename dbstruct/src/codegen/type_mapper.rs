//! MySQL to Go type mapping

/// Represents a Go type for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoType {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Float64,
    String,
    Bool,
    Time,
}

impl GoType {
    /// Get the type string for code generation
    pub fn as_str(&self) -> &'static str {
        match self {
            GoType::Int => "int",
            GoType::Int8 => "int8",
            GoType::Int16 => "int16",
            GoType::Int32 => "int32",
            GoType::Int64 => "int64",
            GoType::Float64 => "float64",
            GoType::String => "string",
            GoType::Bool => "bool",
            GoType::Time => "time.Time",
        }
    }

    /// Check if this type needs `import "time"`
    pub fn needs_time_import(&self) -> bool {
        matches!(self, GoType::Time)
    }
}

/// Resolve MySQL `DATA_TYPE` names to Go types
pub struct TypeMapper;

impl TypeMapper {
    /// Map a raw database type name. Unknown names fall back to `string`.
    pub fn map(data_type: &str) -> GoType {
        let data_type = data_type.trim().to_ascii_lowercase();

        match data_type.as_str() {
            "int" | "integer" => GoType::Int,
            "tinyint" => GoType::Int8,
            "smallint" => GoType::Int16,
            "mediumint" => GoType::Int32,
            "bigint" => GoType::Int64,

            "int unsigned"
            | "integer unsigned"
            | "tinyint unsigned"
            | "smallint unsigned"
            | "mediumint unsigned"
            | "bigint unsigned"
            | "bit" => GoType::Int64,

            "float" | "double" | "decimal" => GoType::Float64,

            "binary" | "varbinary" | "enum" | "set" | "varchar" | "char" | "tinytext"
            | "mediumtext" | "text" | "longtext" | "blob" | "tinyblob" | "mediumblob"
            | "longblob" => GoType::String,

            "bool" => GoType::Bool,

            "date" | "datetime" | "timestamp" | "time" => GoType::Time,

            _ => GoType::String,
        }
    }
}
