use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;
use crate::shared::http;

const AUTH: &str = "/api/v1/auth";

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    http::post_json(&format!("{}/login", AUTH), &LoginRequest { username, password }).await
}

/// Exchange the refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    http::post_json(&format!("{}/refresh", AUTH), &RefreshRequest { refresh_token }).await
}

/// Revoke the refresh token; the server answers without a body
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let response = Request::post(&api_url(&format!("{}/logout", AUTH)))
        .json(&RefreshRequest { refresh_token })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Logout failed: {}", response.status()));
    }
    Ok(())
}

/// User behind the stored access token
pub async fn get_current_user() -> Result<UserInfo, String> {
    http::get_json(&format!("{}/me", AUTH)).await
}
