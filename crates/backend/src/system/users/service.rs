use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{CreateUserDto, UpdateProfileDto, User};

use super::repository;
use crate::shared::api_error::ApiError;
use crate::system::auth::password;

/// Create an account; duplicate usernames and weak input are rejected with 400
pub async fn create(dto: CreateUserDto, created_by: Option<String>) -> Result<User, ApiError> {
    dto.validate().map_err(ApiError::BadRequest)?;
    password::validate_password_strength(&dto.password).map_err(ApiError::BadRequest)?;

    let username = dto.username.trim().to_string();
    if repository::get_by_username(&username).await?.is_some() {
        return Err(ApiError::BadRequest("Username already registered".into()));
    }

    let password_hash = password::hash_password(&dto.password)?;
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username,
        email: dto.email.filter(|e| !e.trim().is_empty()),
        full_name: dto.full_name.filter(|n| !n.trim().is_empty()),
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
        created_by,
    };

    repository::create_with_password(&user, &password_hash).await?;
    tracing::info!("User '{}' created (admin: {})", user.username, user.is_admin);

    Ok(user)
}

/// Own profile update; the role and the active flag are never touched here
pub async fn update_profile(user_id: &str, dto: &UpdateProfileDto) -> Result<User, ApiError> {
    dto.validate().map_err(ApiError::BadRequest)?;

    let mut user = repository::get_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    dto.apply(&mut user);
    user.updated_at = Utc::now().to_rfc3339();

    repository::update_profile(&user).await?;
    tracing::info!("User '{}' updated their profile", user.username);

    Ok(user)
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

/// `None` for an unknown user, an inactive account or a wrong password
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username.trim()).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        tracing::warn!("Login attempt for inactive user '{}'", user.username);
        return Ok(None);
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &password_hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(&user.id).await {
        tracing::warn!("Failed to update last login of '{}': {}", user.username, e);
    }

    Ok(Some(user))
}
