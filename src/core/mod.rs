//! Pieces shared by the library and the binary

pub mod config;
pub mod currency;
pub mod log;

pub use currency::CurrencyRateProvider;
