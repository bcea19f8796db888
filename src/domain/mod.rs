pub mod branch;
pub mod repository;
pub mod ticket;
