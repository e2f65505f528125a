pub mod csv_export;
pub mod rates;
pub mod service;
