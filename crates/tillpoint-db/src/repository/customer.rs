//! # Customer Repository
//!
//! Database operations for customers. Customers are read-only inputs to
//! bill creation; only the CRUD endpoints mutate them.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tillpoint_core::{Customer, NewCustomer};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers.
    pub async fn find_all(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, address, phone
            FROM customers
            ORDER BY last_name, first_name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, address, phone
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by phone number. Used for the uniqueness check.
    pub async fn get_by_phone(&self, phone: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, address, phone
            FROM customers
            WHERE phone = ?1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Checks whether a customer with the given id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customers WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Inserts a new customer and returns it with its generated id.
    pub async fn insert(&self, new: &NewCustomer) -> DbResult<Customer> {
        debug!(phone = %new.phone, "Inserting customer");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO customers (first_name, last_name, address, phone)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.address)
        .bind(&new.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(Customer {
            id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            address: new.address.clone(),
            phone: new.phone.clone(),
        })
    }

    /// Updates an existing customer.
    pub async fn update(&self, id: i64, customer: &NewCustomer) -> DbResult<()> {
        debug!(id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?2, last_name = ?3, address = ?4, phone = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.address)
        .bind(&customer.phone)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Deletes a customer. Fails with a foreign key violation when the
    /// customer has bills on record.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}
