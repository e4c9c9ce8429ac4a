pub mod performance_model;
mod twr_calculator;

pub use performance_model::*;
pub use twr_calculator::calculate_twr;
