pub mod bundle;
pub mod chart;
pub mod error;
pub mod fonts;
pub mod pdf;
