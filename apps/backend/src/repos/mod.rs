//! Repository functions for the domain layer: thin wrappers over the SeaORM
//! adapters that speak domain types and `DomainError`.

pub mod moves;
pub mod seats;
pub mod tables;
pub mod wallets;
