//! Database primitives: connection settings, the shared pool and the
//! employee data service.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;

pub mod employees;

pub use employees::{DbEmployeeService, Employee, EmployeeFields, EmployeeService, SaveEmployee};

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    #[error("employee {0} not found")]
    NotFound(i32),
    #[error("invalid {var}: {message}")]
    InvalidSetting { var: &'static str, message: String },
    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Environment-driven pool settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and
    /// `DATABASE_CONNECT_TIMEOUT_SECS`. Unset numbers take the defaults;
    /// unparsable or zero values are rejected.
    pub fn from_env() -> DbResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DbResult<Self> {
        let url = lookup("DATABASE_URL");
        let max_connections = positive_setting(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let connect_timeout_secs = positive_setting(
            "DATABASE_CONNECT_TIMEOUT_SECS",
            lookup("DATABASE_CONNECT_TIMEOUT_SECS"),
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;
        Ok(Self {
            url,
            max_connections,
            connect_timeout_secs,
        })
    }

    pub fn database_url(&self) -> DbResult<&str> {
        self.url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(DbError::MissingUrl)
    }
}

fn positive_setting<T>(var: &'static str, raw: Option<String>, default: T) -> DbResult<T>
where
    T: std::str::FromStr + PartialEq + From<u8>,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: T = raw.trim().parse().map_err(|_| DbError::InvalidSetting {
        var,
        message: format!("expected a positive integer, got {raw:?}"),
    })?;
    if value == T::from(0) {
        return Err(DbError::InvalidSetting {
            var,
            message: "must be greater than zero".into(),
        });
    }
    Ok(value)
}

/// Open the pool described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    if settings.max_connections == 0 {
        return Err(DbError::InvalidSetting {
            var: "DATABASE_MAX_CONNECTIONS",
            message: "must be greater than zero".into(),
        });
    }
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(settings.max_connections)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .sqlx_logging(false);
    let pool = Database::connect(options).await?;
    info!(
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}
