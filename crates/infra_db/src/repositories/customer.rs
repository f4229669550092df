//! Customer repository implementation
//!
//! SQL access to the `customers` table. Queries are built at runtime with
//! `sqlx::query_as` so the crate compiles without a live database.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

const SELECT_COLUMNS: &str = r#"
    SELECT id, first_name, last_name, age, birth_date,
           estimated_milestone_date, created_at, updated_at
    FROM customers
"#;

/// Database row for a customer
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CustomerRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub birth_date: NaiveDate,
    pub estimated_milestone_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written on insert and update
#[derive(Debug, Clone)]
pub struct CustomerValues {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub birth_date: NaiveDate,
    pub estimated_milestone_date: Option<NaiveDate>,
}

/// Aggregates over the age column
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AgeAggregates {
    pub total: i64,
    pub average: Option<f64>,
    pub stddev: Option<f64>,
}

/// Repository for the customers table
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a row, letting the database assign id and timestamps
    pub async fn insert(&self, values: &CustomerValues) -> Result<CustomerRow, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (first_name, last_name, age, birth_date, estimated_milestone_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, age, birth_date,
                      estimated_milestone_date, created_at, updated_at
            "#,
        )
        .bind(&values.first_name)
        .bind(&values.last_name)
        .bind(values.age)
        .bind(values.birth_date)
        .bind(values.estimated_milestone_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrites a row and refreshes its update timestamp
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has this id
    pub async fn update(&self, id: i64, values: &CustomerValues) -> Result<CustomerRow, DatabaseError> {
        sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers
            SET first_name = $2,
                last_name = $3,
                age = $4,
                birth_date = $5,
                estimated_milestone_date = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING id, first_name, last_name, age, birth_date,
                      estimated_milestone_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&values.first_name)
        .bind(&values.last_name)
        .bind(values.age)
        .bind(values.birth_date)
        .bind(values.estimated_milestone_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Customer", id))
    }

    /// Retrieves a row by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<CustomerRow>, DatabaseError> {
        let query = format!("{SELECT_COLUMNS} WHERE id = $1");
        let row = sqlx::query_as::<_, CustomerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Retrieves every row, newest first
    pub async fn find_all_by_creation_desc(&self) -> Result<Vec<CustomerRow>, DatabaseError> {
        let query = format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, CustomerRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Deletes a row, returning whether it existed
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count, mean and population standard deviation of ages
    pub async fn age_aggregates(&self) -> Result<AgeAggregates, DatabaseError> {
        let aggregates = sqlx::query_as::<_, AgeAggregates>(
            r#"
            SELECT count(*)                AS total,
                   avg(age)::float8        AS average,
                   stddev_pop(age)::float8 AS stddev
            FROM customers
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(aggregates)
    }

    /// Executes a trivial query to verify connectivity
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
