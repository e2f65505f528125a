pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod download;
pub mod http;
pub mod icons;
pub mod locale;
pub mod storage;
