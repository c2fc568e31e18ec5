use crate::config::{Config, ConfigError};
use chrono::prelude::*;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::r2d2;
use once_cell::sync::OnceCell;
use thiserror::Error;

#[cfg(test)]
use diesel::connection::Connection;

#[cfg(test)]
use dotenv::dotenv;

pub mod issues;
pub mod newsletters;

pub type Pool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;
pub type PooledConnection = r2d2::PooledConnection<r2d2::ConnectionManager<PgConnection>>;

static POOL: OnceCell<Pool> = OnceCell::new();

#[derive(Debug, Error)]
pub enum PoolError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build connection pool: {0}")]
    Build(#[from] r2d2::PoolError),
}

#[cfg(test)]
pub fn establish_test_connection() -> PgConnection {
    dotenv().ok();

    let url = Config::database_url().unwrap();

    PgConnection::establish(&url).unwrap_or_else(|_| panic!("Error connecting to {}", url))
}

/// Now, truncated to whole seconds.
pub fn current_time() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

pub fn pool() -> Result<&'static Pool, PoolError> {
    POOL.get_or_try_init(create_connection_pool)
}

pub fn connection() -> Result<PooledConnection, PoolError> {
    Ok(pool()?.get()?)
}

pub fn create_connection_pool() -> Result<Pool, PoolError> {
    let url = Config::database_url()?;

    let manager = r2d2::ConnectionManager::<PgConnection>::new(url);

    let pool = r2d2::Pool::builder()
        .max_size(Config::database_pool_size())
        .build(manager)?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use chrono::{Timelike, Utc};

    #[test]
    fn current_time_is_whole_seconds_not_after_now() {
        let before = Utc::now();

        let time = super::current_time();

        assert_eq!(time.nanosecond(), 0);
        assert!(time.timestamp() >= before.timestamp());
        assert!(time <= Utc::now());
    }
}
