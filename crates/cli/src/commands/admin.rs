//! Admin user management commands.

use secrecy::SecretString;
use tracing::info;

use primrose_admin::db;
use primrose_admin::services::auth::AuthService;
use primrose_core::AdminRole;

/// Create a new admin user.
///
/// # Errors
///
/// Returns an error if the role is invalid, environment variables are
/// missing, or the database operation fails.
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let role: AdminRole = role.parse()?;

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "ADMIN_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;

    let admin = AuthService::new(&pool)
        .create_admin(email, name, role, password)
        .await?;

    info!(
        id = %admin.id,
        email = %admin.email,
        role = %admin.role,
        "Admin user created"
    );

    Ok(())
}
