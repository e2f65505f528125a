use anyhow::Result;
use contracts::system::users::CreateUserDto;

use crate::shared::config::AuthConfig;
use crate::system::users::{repository, service};

/// Create the configured admin account when the database has no admin yet
pub async fn ensure_admin_user_exists(auth: &AuthConfig) -> Result<()> {
    if repository::count_admins().await? > 0 {
        return Ok(());
    }

    tracing::info!("No admin users found. Creating default admin user...");

    let admin_dto = CreateUserDto {
        username: auth.default_admin_username.clone(),
        password: auth.default_admin_password.clone(),
        email: None,
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    };

    let admin = service::create(admin_dto, None)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create default admin: {}", e))?;

    tracing::warn!(
        "Default admin user '{}' created (id {}). Change its password.",
        admin.username,
        admin.id
    );
    Ok(())
}
