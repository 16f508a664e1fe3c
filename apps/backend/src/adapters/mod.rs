//! SeaORM adapters - generic over ConnectionTrait, return `DbErr`.
//! The repos layer maps `DbErr` to `DomainError`.

pub mod moves_sea;
pub mod seats_sea;
pub mod tables_sea;
pub mod wallets_sea;
