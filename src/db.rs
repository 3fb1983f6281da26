use crate::{Error, Result};
use directories::ProjectDirs;
use include_dir::{include_dir, Dir};
use rusqlite::{named_params, Connection, OptionalExtension};
use std::fmt;
use std::fs::create_dir_all;
use std::path::PathBuf;
use tracing::{info, warn};

static MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/migrations");

struct Migration(i16, String);

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            self.0,
            self.1
                .replace("\n", "")
                .replace("    ", "")
                .replace(";", "; "),
        )
    }
}

pub fn open_connection() -> Result<Connection> {
    let conn = Connection::open(get_file_path()?)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(conn)
}

pub fn get_file_path() -> Result<PathBuf> {
    let project_dirs = match ProjectDirs::from("org", "AOI Tool", "AOI Tool") {
        Some(project_dirs) => project_dirs,
        None => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Can't find home directory",
        ))?,
    };

    if !project_dirs.data_dir().exists() {
        create_dir_all(project_dirs.data_dir())?;
    }

    Ok(project_dirs.data_dir().join("aoi-tool.db"))
}

pub fn migrate(conn: &mut Connection) -> Result<()> {
    execute_migrations(&get_migrations()?, conn)
}

fn execute_migrations(migrations: &Vec<Migration>, conn: &mut Connection) -> Result<()> {
    let mut schema_ver: i16 =
        conn.query_row("SELECT user_version FROM pragma_user_version", [], |row| {
            row.get(0)
        })?;

    let new_migrations: Vec<&Migration> =
        migrations.iter().filter(|it| it.0 > schema_ver).collect();

    for migration in new_migrations {
        warn!("Found new migration: {migration}");
        let tx = conn.transaction()?;
        tx.execute_batch(&migration.1)?;
        tx.execute_batch(&format!("PRAGMA user_version={}", migration.0))?;
        tx.commit()?;
        schema_ver = migration.0;
    }

    info!("Database schema is up to date (version {schema_ver})");

    Ok(())
}

fn get_migrations() -> Result<Vec<Migration>> {
    let mut index = 1;
    let mut res = vec![];

    loop {
        let file_name = format!("{index}.sql");
        let file = MIGRATIONS_DIR.get_file(&file_name);
        match file {
            Some(file) => {
                let sql = file.contents_utf8().ok_or(Error::Generic(format!(
                    "Can't read {file_name} in UTF-8"
                )))?;

                res.push(Migration(index, sql.to_string()));

                index += 1;
            }
            None => break,
        }
    }

    Ok(res)
}

/// The durable key-value layer. The whole AOI collection is stored as one
/// JSON document under a fixed key, written through on every mutation.
pub mod kv {
    use super::*;

    pub fn get(key: &str, conn: &Connection) -> Result<Option<String>> {
        let query = r#"
            SELECT value
            FROM kv
            WHERE key = :key
        "#;
        Ok(conn
            .query_row(query, named_params! { ":key": key }, |row| row.get(0))
            .optional()?)
    }

    pub fn put(key: &str, value: &str, conn: &Connection) -> Result<()> {
        let query = r#"
            INSERT INTO kv (key, value)
            VALUES (:key, :value)
            ON CONFLICT (key) DO UPDATE SET value = :value
        "#;
        conn.execute(query, named_params! { ":key": key, ":value": value })?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::kv;
    use crate::{test::mock_conn, Result};

    #[test]
    fn kv_get_missing_key_returns_none() -> Result<()> {
        let conn = mock_conn();
        assert_eq!(None, kv::get("aois", &conn)?);
        Ok(())
    }

    #[test]
    fn kv_put_then_get_round_trips() -> Result<()> {
        let conn = mock_conn();
        kv::put("aois", "[]", &conn)?;
        assert_eq!(Some("[]".into()), kv::get("aois", &conn)?);
        Ok(())
    }

    #[test]
    fn kv_put_overwrites_in_place() -> Result<()> {
        let conn = mock_conn();
        kv::put("aois", "[]", &conn)?;
        kv::put("aois", "[1]", &conn)?;
        assert_eq!(Some("[1]".into()), kv::get("aois", &conn)?);
        Ok(())
    }
}
