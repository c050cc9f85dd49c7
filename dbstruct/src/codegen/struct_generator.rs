//! Struct generator - renders Go structs from table metadata

use crate::config::{DbStructConfig, Tag};
use crate::error::{DbStructError, Result};
use crate::schema::ColumnMetadata;

use super::naming::{format_name, receiver_name, CasingMode};
use super::type_mapper::TypeMapper;
use crate::config::defaults;

/// Everything a render task needs, detached from the full configuration
/// so it can be shared across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub field_name_case: CasingMode,
    pub struct_name_case: CasingMode,
    pub file_name_case: CasingMode,
    pub struct_name_suffix: String,
    pub file_name_suffix: String,
    /// Final tag list, convenience tags included
    pub tags: Vec<Tag>,
    /// Accessor method name, `None` when the accessor is disabled
    pub table_name_method: Option<String>,
    pub skip_comments: bool,
}

impl RenderContext {
    pub fn from_config(config: &DbStructConfig) -> Self {
        let table_name_method = if config.table_name_func && !config.table_name_method.is_empty()
        {
            Some(config.table_name_method.clone())
        } else {
            None
        };

        Self {
            field_name_case: config.field_name_case,
            struct_name_case: config.struct_name_case,
            file_name_case: config.file_name_case,
            struct_name_suffix: config.struct_name_suffix.clone(),
            file_name_suffix: config.file_name_suffix.clone(),
            tags: config.effective_tags(),
            table_name_method,
            skip_comments: config.skip_comments,
        }
    }

    /// Go type name for a table
    pub fn struct_name(&self, table_name: &str) -> String {
        format!(
            "{}{}",
            format_name(table_name, self.struct_name_case),
            self.struct_name_suffix
        )
    }

    /// Output file name for a table (multi-file mode)
    pub fn file_name(&self, table_name: &str) -> String {
        format!(
            "{}{}.{}",
            format_name(table_name, self.file_name_case),
            self.file_name_suffix,
            defaults::FILE_EXTENSION
        )
    }
}

/// A rendered struct for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStruct {
    /// Source table name
    pub table_name: String,
    /// Generated Go type name
    pub type_name: String,
    /// File name used in multi-file mode
    pub file_name: String,
    /// Struct declaration plus optional accessor, without package header
    pub body: String,
    /// Whether the body references `time.Time`
    pub needs_time_import: bool,
}

impl RenderedStruct {
    /// A complete Go file containing only this struct
    pub fn to_file_contents(&self, package_name: &str) -> String {
        let mut code = file_header(package_name, self.needs_time_import);
        code.push_str(&self.body);
        code
    }
}

/// Package clause plus the optional `time` import
pub fn file_header(package_name: &str, needs_time_import: bool) -> String {
    let mut code = format!("package {}\n\n", package_name);
    if needs_time_import {
        code.push_str("import \"time\"\n\n");
    }
    code
}

/// Render a single table into a Go struct
pub fn render_struct(
    table_name: &str,
    columns: &[ColumnMetadata],
    ctx: &RenderContext,
) -> Result<RenderedStruct> {
    let type_name = ctx.struct_name(table_name);
    if type_name.is_empty() {
        return Err(DbStructError::RenderError(format!(
            "table `{}` produces an empty struct name",
            table_name
        )));
    }

    let mut code = String::new();
    let mut needs_time_import = false;

    code.push_str(&format!("type {} struct {{\n", type_name));

    for col in columns {
        let field_name = format_name(&col.name, ctx.field_name_case);
        if field_name.is_empty() {
            return Err(DbStructError::RenderError(format!(
                "column `{}.{}` produces an empty field name",
                table_name, col.name
            )));
        }
        let go_type = TypeMapper::map(&col.data_type);
        needs_time_import |= go_type.needs_time_import();

        if !ctx.skip_comments && col.has_comment() {
            for line in col.comment.lines().filter(|l| !l.trim().is_empty()) {
                code.push_str(&format!("\t// {}\n", line.trim()));
            }
        }

        code.push_str(&format!("\t{} {}", field_name, go_type.as_str()));
        if let Some(tags) = render_tags(table_name, &col.name, &ctx.tags)? {
            code.push(' ');
            code.push_str(&tags);
        }
        code.push('\n');
    }

    code.push_str("}\n");

    if let Some(method) = &ctx.table_name_method {
        code.push('\n');
        code.push_str(&render_table_name_method(&type_name, method, table_name));
    }

    Ok(RenderedStruct {
        table_name: table_name.to_string(),
        type_name,
        file_name: ctx.file_name(table_name),
        body: code,
        needs_time_import,
    })
}

/// Render the tag clause for a column, `None` when no tags are configured
///
/// The clause is a Go raw string, so a backtick anywhere in it is an error.
fn render_tags(table_name: &str, column_name: &str, tags: &[Tag]) -> Result<Option<String>> {
    if tags.is_empty() {
        return Ok(None);
    }
    let mut pairs = Vec::with_capacity(tags.len());
    for tag in tags {
        let value = format_name(column_name, tag.case);
        if tag.name.contains('`') || value.contains('`') {
            return Err(DbStructError::RenderError(format!(
                "tag `{}` on column `{}.{}` cannot contain a backtick",
                tag.name, table_name, column_name
            )));
        }
        pairs.push(format!("{}:{}", tag.name, quote_go_string(&value)));
    }
    Ok(Some(format!("`{}`", pairs.join(" "))))
}

/// Quote `s` as a Go interpreted string literal
fn quote_go_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Generate the accessor returning the physical table name
fn render_table_name_method(type_name: &str, method: &str, table_name: &str) -> String {
    format!(
        "func ({} *{}) {}() string {{\n\treturn {}\n}}\n",
        receiver_name(type_name),
        type_name,
        method,
        quote_go_string(table_name)
    )
}
