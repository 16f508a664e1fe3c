use actix_web::web;

pub mod health;
pub mod tables;

/// Configure application routes. Shared by `main.rs` and test harnesses so
/// both exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/tables").configure(tables::configure_routes));
}
