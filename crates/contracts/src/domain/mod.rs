pub mod a001_vehicle_reception;
pub mod common;
