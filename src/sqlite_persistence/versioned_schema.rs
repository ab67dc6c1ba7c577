use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_TIMESTAMP: &str = "(cast(strftime('%s','now') as int))";

/// Offset added to the schema version stored in `PRAGMA user_version`, so that
/// a database created by some other tool (version 0) is never mistaken for ours.
pub const BASE_DB_VERSION: usize = 4200;

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            #[allow(unused_mut)]
            let mut column = $crate::sqlite_persistence::Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
                is_unique: false,
                default_value: None,
                foreign_key: None,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
        }
    }

    fn from_sql(s: &str) -> Option<&'static SqlType> {
        match s {
            "TEXT" => Some(&SqlType::Text),
            "INTEGER" => Some(&SqlType::Integer),
            _ => None,
        }
    }
}

pub struct ForeignKey {
    pub foreign_table: &'static str,
    pub foreign_column: &'static str,
}

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
    pub is_unique: bool,
    pub default_value: Option<&'static str>,
    pub foreign_key: Option<&'static ForeignKey>,
}

pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    /// (index name, indexed column)
    pub indices: &'static [(&'static str, &'static str)],
}

fn strip_parentheses(s: &str) -> &str {
    s.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(s)
}

impl Table {
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let mut sql = format!("{} {}", column.name, column.sql_type.as_sql());
                if column.is_primary_key {
                    sql.push_str(" PRIMARY KEY");
                }
                if column.non_null {
                    sql.push_str(" NOT NULL");
                }
                if column.is_unique {
                    sql.push_str(" UNIQUE");
                }
                if let Some(default_value) = column.default_value {
                    sql.push_str(&format!(" DEFAULT {}", default_value));
                }
                if let Some(fk) = column.foreign_key {
                    sql.push_str(&format!(
                        " REFERENCES {}({})",
                        fk.foreign_table, fk.foreign_column
                    ));
                }
                sql
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({});", self.name, columns)
    }

    pub fn create(&self, conn: &Connection) -> Result<()> {
        conn.execute(&self.create_sql(), params![])
            .with_context(|| format!("Failed to create table {}", self.name))?;
        for (index_name, column_name) in self.indices {
            conn.execute(
                &format!(
                    "CREATE INDEX {} ON {}({});",
                    index_name, self.name, column_name
                ),
                params![],
            )?;
        }
        Ok(())
    }

    fn validate(&self, conn: &Connection) -> Result<()> {
        struct ActualColumn {
            name: String,
            sql_type: String,
            non_null: bool,
            default_value: Option<String>,
            is_primary_key: bool,
        }

        let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", self.name))?;
        let actual_columns = stmt
            .query_map(params![], |row| {
                Ok(ActualColumn {
                    name: row.get(1)?,
                    sql_type: row.get(2)?,
                    non_null: row.get::<_, i32>(3)? == 1,
                    default_value: row.get(4)?,
                    is_primary_key: row.get::<_, i32>(5)? > 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if actual_columns.len() != self.columns.len() {
            bail!(
                "Table {} has {} columns, expected {}. Found: [{}]",
                self.name,
                actual_columns.len(),
                self.columns.len(),
                actual_columns
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        for (actual, expected) in actual_columns.iter().zip(self.columns.iter()) {
            if actual.name != expected.name {
                bail!(
                    "Table {} column name mismatch: expected {}, got {}",
                    self.name,
                    expected.name,
                    actual.name
                );
            }
            if SqlType::from_sql(&actual.sql_type) != Some(expected.sql_type) {
                bail!(
                    "Table {} column {} type mismatch: expected {:?}, got {}",
                    self.name,
                    expected.name,
                    expected.sql_type,
                    actual.sql_type
                );
            }
            if actual.non_null != expected.non_null {
                bail!(
                    "Table {} column {} non-null mismatch: expected {}, got {}",
                    self.name,
                    expected.name,
                    expected.non_null,
                    actual.non_null
                );
            }
            if actual.is_primary_key != expected.is_primary_key {
                bail!(
                    "Table {} column {} primary key mismatch: expected {}, got {}",
                    self.name,
                    expected.name,
                    expected.is_primary_key,
                    actual.is_primary_key
                );
            }
            if actual.default_value.as_deref().map(strip_parentheses)
                != expected.default_value.map(strip_parentheses)
            {
                bail!(
                    "Table {} column {} default value mismatch: expected {:?}, got {:?}",
                    self.name,
                    expected.name,
                    expected.default_value,
                    actual.default_value
                );
            }
        }

        for (index_name, _) in self.indices {
            let index_exists = conn
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1 AND tbl_name=?2",
                    params![index_name, self.name],
                    |_| Ok(true),
                )
                .unwrap_or(false);
            if !index_exists {
                bail!("Table {} is missing index '{}'", self.name, index_name);
            }
        }

        // PRAGMA foreign_key_list: id, seq, table, from, to, ...
        let mut fk_stmt = conn.prepare(&format!("PRAGMA foreign_key_list({});", self.name))?;
        let actual_fks = fk_stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for column in self.columns {
            if let Some(fk) = column.foreign_key {
                let found = actual_fks.iter().any(|(from, table, to)| {
                    from == column.name && table == fk.foreign_table && to == fk.foreign_column
                });
                if !found {
                    bail!(
                        "Table {} column {} is missing foreign key REFERENCES {}({})",
                        self.name,
                        column.name,
                        fk.foreign_table,
                        fk.foreign_column
                    );
                }
            }
        }

        Ok(())
    }
}

pub struct VersionedSchema {
    pub version: usize,
    pub tables: &'static [Table],
    /// Brings a database at `version - 1` up to this version.
    pub migration: Option<fn(&Connection) -> Result<()>>,
}

impl VersionedSchema {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        for table in self.tables {
            table.create(conn)?;
        }
        conn.execute(
            &format!("PRAGMA user_version = {}", BASE_DB_VERSION + self.version),
            [],
        )?;
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<()> {
        for table in self.tables {
            table.validate(conn)?;
        }
        Ok(())
    }
}

fn read_schema_version(conn: &Connection, schemas: &[VersionedSchema]) -> Result<usize> {
    let raw_version = conn
        .query_row("PRAGMA user_version;", [], |row| row.get::<usize, i64>(0))
        .context("Failed to read database version")?;
    let version = raw_version - BASE_DB_VERSION as i64;
    if version < 0 {
        bail!(
            "Database version {} is too old, does not contain base db version {}",
            raw_version,
            BASE_DB_VERSION
        );
    }
    if version >= schemas.len() as i64 {
        bail!("Database version {} is too new", version);
    }
    Ok(version as usize)
}

/// Opens the database at `db_path`, creating it at the latest schema version if
/// it does not exist yet. Existing databases are validated against the schema
/// of their stored version and then migrated forward.
pub fn open_versioned_db<T: AsRef<Path>>(
    db_path: T,
    schemas: &[VersionedSchema],
) -> Result<Connection> {
    let latest = schemas.last().context("No schema versions defined")?;
    let db_path = db_path.as_ref();

    let conn = if db_path.exists() {
        debug!("Opening existing database at {:?}", db_path);
        Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?
    } else {
        info!("Creating database at {:?}", db_path);
        let conn = Connection::open(db_path)?;
        latest.create(&conn)?;
        conn
    };
    conn.execute("PRAGMA foreign_keys = ON;", params![])?;

    let version = read_schema_version(&conn, schemas)?;
    schemas
        .get(version)
        .context("Failed to get schema")?
        .validate(&conn)?;

    let mut latest_from = version;
    for schema in schemas.iter().skip(version + 1) {
        if let Some(migration_fn) = schema.migration {
            info!(
                "Migrating db from version {} to {}",
                latest_from, schema.version
            );
            migration_fn(&conn)?;
        }
        latest_from = schema.version;
    }
    if latest_from != version {
        conn.execute(
            &format!("PRAGMA user_version = {}", BASE_DB_VERSION + latest_from),
            [],
        )?;
    }

    Ok(conn)
}
