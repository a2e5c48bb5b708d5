pub mod admin;
pub mod audit;
pub mod production;
