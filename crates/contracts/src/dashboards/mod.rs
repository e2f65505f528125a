pub mod d401_reception_stats;
pub mod d402_period_report;
pub mod d403_financial_report;
