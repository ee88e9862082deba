//! The savings engine: request validation, present-value math and the
//! report assembly. Pure and deterministic over the tariff tables.

pub mod calculator;
pub mod models;
pub mod pv;
pub mod request;

pub use calculator::compute_savings;
pub use request::parse_request;
