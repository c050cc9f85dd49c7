//! Default configuration values - single source of truth

/// Default Go package name
pub const PACKAGE_NAME: &str = "model";

/// Default output file in single-file mode
pub const SINGLE_FILE_PATH: &str = "./model/models.go";

/// Default output directory in multi-file mode
pub const OUTPUT_DIR: &str = "./model";

/// Default name of the generated table-name accessor
pub const TABLE_NAME_METHOD: &str = "TableName";

/// Whether to generate the table-name accessor by default
pub const TABLE_NAME_FUNC: bool = false;

/// Whether to merge every struct into one file by default
pub const SINGLE_FILE: bool = false;

/// Default formatter command, run as `<cmd> -w <file>`
pub const FORMATTER: &str = "gofmt";

/// Extension of generated files
pub const FILE_EXTENSION: &str = "go";

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
