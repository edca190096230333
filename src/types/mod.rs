// src/types/mod.rs
pub mod portfolio_data;
pub mod response;

pub use portfolio_data::PortfolioData;
