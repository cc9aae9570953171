//! Customer repository implementation
//!
//! Database access for the `cliente` table. Every method is a single
//! statement; the guarded update relies on the row still carrying the tax id
//! the caller read, so no transaction is needed.

use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

const SELECT_COLUMNS: &str = "SELECT id, nome, idcognito, email, cpf FROM cliente";

/// Database row for a customer
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: i64,
    pub nome: String,
    pub idcognito: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
}

/// Column values written by inserts and updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerValues {
    pub nome: String,
    pub idcognito: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
}

/// Repository for customer records
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Finds the row holding `cpf`, compared as stored
    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{} WHERE cpf = $1", SELECT_COLUMNS))
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Finds a row with `email`; the lowest id wins when several share it
    pub async fn find_by_email(&self, email: &str) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "{} WHERE email = $1 ORDER BY id LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Finds a row linked to an identity-provider subject id
    pub async fn find_by_idcognito(
        &self,
        idcognito: &str,
    ) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "{} WHERE idcognito = $1 ORDER BY id LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(idcognito)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Inserts a row and returns it with the generated id
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` when another row already holds the cpf
    pub async fn insert(&self, values: &CustomerValues) -> Result<CustomerRow, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO cliente (nome, idcognito, email, cpf)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nome, idcognito, email, cpf
            "#,
        )
        .bind(&values.nome)
        .bind(&values.idcognito)
        .bind(&values.email)
        .bind(&values.cpf)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = row.id, "Inserted cliente row");
        Ok(row)
    }

    /// Overwrites row `id` only while it still holds `expected_cpf`
    ///
    /// Returns `None` when no row matched the guard.
    pub async fn update_where_cpf(
        &self,
        id: i64,
        expected_cpf: &str,
        values: &CustomerValues,
    ) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE cliente
            SET nome = $3, idcognito = $4, email = $5, cpf = $6
            WHERE id = $1 AND cpf = $2
            RETURNING id, nome, idcognito, email, cpf
            "#,
        )
        .bind(id)
        .bind(expected_cpf)
        .bind(&values.nome)
        .bind(&values.idcognito)
        .bind(&values.email)
        .bind(&values.cpf)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
