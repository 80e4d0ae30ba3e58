use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// Creates a database connection from `DATABASE_URL`
pub async fn create_connection() -> Result<DatabaseConnection, DbErr> {
    dotenvy::dotenv().ok();
    let url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    Database::connect(url).await
}
