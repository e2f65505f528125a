//! Authorized JSON requests against the backend.
//!
//! Failed responses carry a `{"detail": "..."}` body; the detail text is
//! what gets shown to the user.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Attach the stored access token, if any
pub fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Detail message of a failed response, falling back to the status line
pub async fn error_detail(response: &Response) -> String {
    match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => format!("{} {}", response.status(), response.status_text()),
    }
}

async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        Ok(response)
    } else {
        Err(error_detail(&response).await)
    }
}

fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    if qs.is_empty() {
        Ok(api_url(path))
    } else {
        Ok(format!("{}?{}", api_url(path), qs))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = authorized(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

/// GET with `query` encoded as the query string
pub async fn get_json_with<Q, T>(path: &str, query: &Q) -> Result<T, String>
where
    Q: Serialize,
    T: DeserializeOwned,
{
    let response = authorized(Request::get(&with_query(path, query)?))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, String>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = authorized(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

/// POST a JSON body and return the raw response text with the file name
/// announced in `Content-Disposition`
pub async fn post_for_file<B: Serialize>(path: &str, body: &B) -> Result<(Option<String>, String), String> {
    let response = authorized(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    let response = check(response).await?;
    let filename = response
        .headers()
        .get("content-disposition")
        .and_then(|value| attachment_filename(&value));
    let content = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;
    Ok((filename, content))
}

/// DELETE; success bodies are ignored
pub async fn delete(path: &str) -> Result<(), String> {
    let response = authorized(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    check(response).await.map(|_| ())
}

/// `attachment; filename="x.csv"` -> `x.csv`
pub fn attachment_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_filename() {
        assert_eq!(
            attachment_filename("attachment; filename=\"financial_report_20250301_20250331.csv\""),
            Some("financial_report_20250301_20250331.csv".to_string())
        );
        assert_eq!(attachment_filename("attachment; filename=a.csv"), Some("a.csv".to_string()));
        assert_eq!(attachment_filename("attachment"), None);
        assert_eq!(attachment_filename("attachment; filename=\"\""), None);
    }
}
