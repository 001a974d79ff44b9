//! Development seed data.
//!
//! Idempotent: looks up each record before inserting, so running it twice
//! leaves the database unchanged.
//!
//! ```bash
//! DATABASE_PATH=./tillpoint.db cargo run --bin seed
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;

use pos_api::auth::hash_password;
use pos_api::config::ApiConfig;
use tillpoint_core::{NewCustomer, NewItem, NewUser, UserRole};
use tillpoint_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::load()?;
    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    seed_users(&db).await?;
    seed_items(&db).await?;
    seed_customers(&db).await?;

    info!("Seed complete");
    Ok(())
}

async fn seed_users(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let users = [
        ("admin", "admin123", UserRole::Admin, "Avery", "Stone"),
        ("cashier", "cashier123", UserRole::Cashier, "Sam", "Till"),
    ];

    for (username, password, role, first, last) in users {
        if db.users().get_by_username(username).await?.is_some() {
            continue;
        }

        db.users()
            .insert(&NewUser {
                first_name: first.to_string(),
                last_name: last.to_string(),
                username: username.to_string(),
                password_hash: hash_password(password)?,
                role,
            })
            .await?;
        info!(username, role = role.as_str(), "Seeded user");
    }

    Ok(())
}

async fn seed_items(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    if !db.items().find_all().await?.is_empty() {
        return Ok(());
    }

    let items = [
        ("Espresso 250ml", 350, 120),
        ("Cold Brew 330ml", 550, 80),
        ("Croissant", 420, 40),
        ("Sandwich Box", 1250, 25),
    ];

    for (name, unit_price_cents, stock) in items {
        db.items()
            .insert(&NewItem {
                name: name.to_string(),
                unit_price_cents,
                stock,
            })
            .await?;
    }
    info!(count = items.len(), "Seeded items");

    Ok(())
}

async fn seed_customers(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    if db.customers().get_by_phone("+14155550123").await?.is_some() {
        return Ok(());
    }

    db.customers()
        .insert(&NewCustomer {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: "12 Harbor Rd".to_string(),
            phone: "+14155550123".to_string(),
        })
        .await?;
    info!("Seeded customer");

    Ok(())
}
