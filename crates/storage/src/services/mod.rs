pub mod aggregation;
pub mod awards;
pub mod engagement;
pub mod ranking;
pub mod scoring;
