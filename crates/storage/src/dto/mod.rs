pub mod award;
pub mod common;
pub mod competition;
pub mod engagement;
pub mod ranking;
pub mod score;
