use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::migrate::Migrator;

use crate::storage::storage_error::StorageError;

static MYSQL_MIGRATOR: Migrator = sqlx::migrate!("./migrations/mysql");
static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");
static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// Relational backend used to persist health check executions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StorageProvider {
    MySql,
    Postgres,
    Sqlite,
}

impl StorageProvider {
    /// Name of the database driver backing this provider.
    pub fn provider_name(self) -> &'static str {
        match self {
            StorageProvider::MySql => "sqlx-mysql",
            StorageProvider::Postgres => "sqlx-postgres",
            StorageProvider::Sqlite => "sqlx-sqlite",
        }
    }

    /// Connection string schemes accepted for this provider.
    pub fn schemes(self) -> &'static [&'static str] {
        match self {
            StorageProvider::MySql => &["mysql", "mariadb"],
            StorageProvider::Postgres => &["postgres", "postgresql"],
            StorageProvider::Sqlite => &["sqlite"],
        }
    }

    /// Embedded schema migrations for this provider.
    pub fn migrator(self) -> &'static Migrator {
        match self {
            StorageProvider::MySql => &MYSQL_MIGRATOR,
            StorageProvider::Postgres => &POSTGRES_MIGRATOR,
            StorageProvider::Sqlite => &SQLITE_MIGRATOR,
        }
    }

    /// Rewrites `?` bind markers into the provider's syntax.
    pub(crate) fn sql(self, query: &str) -> Cow<'_, str> {
        match self {
            StorageProvider::Postgres => {
                let mut index = 0;
                let mut rewritten = String::with_capacity(query.len() + 8);
                for c in query.chars() {
                    if c == '?' {
                        index += 1;
                        rewritten.push_str(&format!("${}", index));
                    } else {
                        rewritten.push(c);
                    }
                }
                Cow::Owned(rewritten)
            }
            _ => Cow::Borrowed(query),
        }
    }
}

impl fmt::Display for StorageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageProvider::MySql => "mysql",
            StorageProvider::Postgres => "postgres",
            StorageProvider::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}

impl FromStr for StorageProvider {
    type Err = StorageError;

    fn from_str(provider: &str) -> Result<Self, Self::Err> {
        match provider.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(StorageProvider::MySql),
            "postgres" | "postgresql" | "npgsql" => Ok(StorageProvider::Postgres),
            "sqlite" => Ok(StorageProvider::Sqlite),
            _ => Err(StorageError::UnsupportedProvider(provider.to_owned())),
        }
    }
}

impl TryFrom<String> for StorageProvider {
    type Error = StorageError;

    fn try_from(provider: String) -> Result<Self, Self::Error> {
        provider.parse()
    }
}
