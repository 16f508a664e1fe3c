//! SeaORM entities (database models).

pub mod moves;
pub mod seats;
pub mod tables;
pub mod wallets;
