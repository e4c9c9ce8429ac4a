//! Engine settings.

mod risk_settings;

pub use risk_settings::RiskSettings;
