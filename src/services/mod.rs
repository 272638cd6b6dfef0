// src/services/mod.rs
pub mod aggregate;
pub mod normalize;
pub mod series;
pub mod stats;
pub mod table;
pub mod worldbank;
