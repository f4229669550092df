//! PostgreSQL testcontainers
//!
//! Every helper here needs a running Docker daemon.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

const IMAGE: (&str, &str) = ("postgres", "16-alpine");
const READY_MESSAGE: &str = "database system is ready to accept connections";
const USER: &str = "customers";
const PASSWORD: &str = "customers";
const DATABASE: &str = "customers_test";

/// Schema applied to every fresh container
const SCHEMA: &str = include_str!("../../../migrations/20240101_000001_customers.sql");

pub type TestDbError = Box<dyn std::error::Error + Send + Sync>;

/// Builds the URL for a container's mapped port
pub fn database_url(host: &str, port: u16) -> String {
    format!("postgres://{USER}:{PASSWORD}@{host}:{port}/{DATABASE}")
}

/// A throwaway PostgreSQL with the customers table created
///
/// The container is removed when this value is dropped.
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub url: String,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a container and applies the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or the schema fails
    /// to apply.
    pub async fn start() -> Result<Self, TestDbError> {
        let (name, tag) = IMAGE;
        // Postgres restarts once during init; connect_with_retry covers the gap
        let container = GenericImage::new(name, tag)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(READY_MESSAGE))
            .with_env_var("POSTGRES_USER", USER)
            .with_env_var("POSTGRES_PASSWORD", PASSWORD)
            .with_env_var("POSTGRES_DB", DATABASE)
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(5432).await?;
        let url = database_url(&host, port);

        let pool = connect_with_retry(&url).await?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn connect_with_retry(url: &str) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        let result = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await;
        match result {
            Ok(pool) => return Ok(pool),
            Err(_) if attempt < 10 => {
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Declares a Docker-backed test that receives a `PgPool` on its own container
///
/// The generated test is `#[ignore]`d; run it with `cargo test -- --ignored`.
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$pool:ident| $body:block) => {
        #[tokio::test]
        #[ignore = "requires Docker"]
        async fn $name() {
            let db = $crate::database::TestDatabase::start()
                .await
                .expect("Failed to start test database");
            let $pool = db.pool().clone();
            $body
        }
    };
}
