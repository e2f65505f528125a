use crate::shared::storage;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const REFRESH_TOKEN_KEY: &str = "auth_refresh_token";

pub fn save_tokens(access_token: &str, refresh_token: &str) {
    storage::set(ACCESS_TOKEN_KEY, access_token);
    storage::set(REFRESH_TOKEN_KEY, refresh_token);
}

pub fn save_access_token(token: &str) {
    storage::set(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    storage::get(ACCESS_TOKEN_KEY)
}

pub fn get_refresh_token() -> Option<String> {
    storage::get(REFRESH_TOKEN_KEY)
}

pub fn clear_tokens() {
    storage::remove(ACCESS_TOKEN_KEY);
    storage::remove(REFRESH_TOKEN_KEY);
}
