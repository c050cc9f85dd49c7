//! Naming utilities for code generation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DbStructError;

/// Casing rule applied to table, column and file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasingMode {
    /// Keep the identifier exactly as the database spells it
    #[default]
    AsIs,
    /// `user_name` -> `UserName`
    SnakeToUpperCamel,
    /// `user_name` -> `userName`
    SnakeToLowerCamel,
    /// `PlayerInfo` -> `player_info`
    CamelToSnake,
}

impl CasingMode {
    pub const ALL: [CasingMode; 4] = [
        CasingMode::AsIs,
        CasingMode::SnakeToUpperCamel,
        CasingMode::SnakeToLowerCamel,
        CasingMode::CamelToSnake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CasingMode::AsIs => "as_is",
            CasingMode::SnakeToUpperCamel => "snake_to_upper_camel",
            CasingMode::SnakeToLowerCamel => "snake_to_lower_camel",
            CasingMode::CamelToSnake => "camel_to_snake",
        }
    }
}

impl fmt::Display for CasingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CasingMode {
    type Err = DbStructError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        CasingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                DbStructError::ConfigError(format!(
                    "unknown casing mode `{}` (expected one of: as_is, snake_to_upper_camel, snake_to_lower_camel, camel_to_snake)",
                    s
                ))
            })
    }
}

/// Convert `name` according to `mode`
///
/// Total over every input: empty strings, single characters and repeated
/// underscores are all handled without panicking.
pub fn format_name(name: &str, mode: CasingMode) -> String {
    match mode {
        CasingMode::AsIs => name.to_string(),
        CasingMode::SnakeToUpperCamel => name
            .split('_')
            .filter(|segment| !segment.is_empty())
            .map(upper_first)
            .collect(),
        CasingMode::SnakeToLowerCamel => name
            .split('_')
            .filter(|segment| !segment.is_empty())
            .enumerate()
            .map(|(i, segment)| {
                if i == 0 {
                    lower_first(segment)
                } else {
                    upper_first(segment)
                }
            })
            .collect(),
        CasingMode::CamelToSnake => {
            let mut out = String::with_capacity(name.len() + 4);
            for (i, c) in name.chars().enumerate() {
                if c.is_uppercase() {
                    if i != 0 {
                        out.push('_');
                    }
                    out.extend(c.to_lowercase());
                } else {
                    out.push(c);
                }
            }
            out
        }
    }
}

fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Receiver identifier for a generated Go method, e.g. `UserGroup` -> `u`
pub fn receiver_name(type_name: &str) -> String {
    type_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "t".to_string())
}
