pub mod ai;
pub mod decode;
pub mod health;
