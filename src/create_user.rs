// create_user.rs
// Utility to provision a user account for the record API.
// The API ships no registration endpoint; operators seed accounts here.

mod common;

use common::id_generator::generate_user_id;
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let mut args = std::env::args().skip(1);
    let (username, password, role) = match (args.next(), args.next(), args.next()) {
        (Some(u), Some(p), r) => (u, p, r.unwrap_or_else(|| "user".to_string())),
        _ => {
            eprintln!("usage: create-user <username> <password> [role]");
            eprintln!("  role defaults to `user`; `admin` and `superadmin` get write access");
            std::process::exit(2);
        }
    };

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://record_api.db".to_string());

    let connect_options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
    let id = generate_user_id();

    sqlx::query("INSERT INTO users (id, username, password_hash, role) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&username)
        .bind(&password_hash)
        .bind(&role)
        .execute(&pool)
        .await?;

    println!("Created user {} ({}) with role {}", username, id, role);

    Ok(())
}
