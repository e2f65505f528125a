use axum::{
    body::Body,
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

use crate::shared::api_error::ApiError;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

async fn claims_from_header(headers: &HeaderMap) -> Result<TokenClaims, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    super::jwt::validate_token(token)
        .await
        .map_err(|_| ApiError::Unauthorized)
}

/// Rejects requests without a valid bearer token; the claims go into request extensions
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let claims = claims_from_header(req.headers()).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Same as [`require_auth`], plus the admin flag
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let claims = claims_from_header(req.headers()).await?;
    if !claims.is_admin {
        return Err(ApiError::Forbidden);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let result = claims_from_header(&HeaderMap::new()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
