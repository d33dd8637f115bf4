pub mod health;
pub mod treatment;
