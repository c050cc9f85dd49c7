//! Schema introspection against a real MySQL server.
//!
//! Needs Docker; run with `cargo test -p dbstruct-tests -- --ignored`.

use mysql_async::prelude::*;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mysql::Mysql;

use dbstruct::schema::fetch_schema;
use dbstruct::{CasingMode, DbStructBuilder, MySqlSchemaSource, Tag};

const SCHEMA: &str = r#"
CREATE TABLE user_group (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    user_name VARCHAR(64) NOT NULL COMMENT 'login name',
    created_at DATETIME NULL
);
CREATE TABLE orders (
    id BIGINT UNSIGNED NOT NULL PRIMARY KEY,
    amount DECIMAL(10, 2) NOT NULL,
    note TEXT
)
"#;

async fn start_mysql() -> anyhow::Result<(ContainerAsync<Mysql>, String)> {
    let container = Mysql::default().start().await?;
    let port = container.get_host_port_ipv4(3306).await?;
    let url = format!("mysql://root@127.0.0.1:{}/test", port);

    let pool = mysql_async::Pool::new(url.as_str());
    let mut conn = pool.get_conn().await?;
    for stmt in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        conn.query_drop(stmt).await?;
    }
    drop(conn);
    pool.disconnect().await?;

    Ok((container, url))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_fetch_schema_from_mysql() -> anyhow::Result<()> {
    let (_container, url) = start_mysql().await?;
    let source = MySqlSchemaSource::new(url);
    assert!(!source.is_connected());

    let schema = fetch_schema(&source, &[]).await?;
    assert!(source.is_connected());
    assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["orders", "user_group"]);

    let group = &schema["user_group"];
    let names: Vec<&str> = group.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "user_name", "created_at"]);
    assert_eq!(group[1].data_type, "varchar");
    assert_eq!(group[1].comment, "login name");
    assert!(!group[0].nullable);
    assert!(group[2].nullable);

    // filtered: key set equals the allow-list
    let filtered = fetch_schema(&source, &["orders".to_string()]).await?;
    assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["orders"]);

    source.disconnect().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_generate_from_mysql() -> anyhow::Result<()> {
    let (_container, url) = start_mysql().await?;
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("models.go");

    DbStructBuilder::new()
        .dsn(url)
        .struct_name_case(CasingMode::SnakeToUpperCamel)
        .field_name_case(CasingMode::SnakeToUpperCamel)
        .tag(Tag::new("json", CasingMode::SnakeToLowerCamel))
        .table_name_func(true)
        .single_file(true)
        .output_path(&out)
        .formatter("")
        .generate()
        .await?;

    let contents = std::fs::read_to_string(&out)?;
    assert!(contents.contains("type UserGroup struct {"));
    assert!(contents.contains("\t// login name\n\tUserName string `json:\"userName\"`\n"));
    assert!(contents.contains("\tCreatedAt time.Time `json:\"createdAt\"`\n"));
    assert!(contents.contains("\tAmount float64 `json:\"amount\"`\n"));
    assert!(contents.contains("return \"user_group\""));
    assert_eq!(contents.matches("import \"time\"").count(), 1);
    Ok(())
}
