pub mod calculate;
pub mod health;
