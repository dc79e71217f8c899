pub mod anomaly;
pub mod calculator;
pub mod derivatives;
