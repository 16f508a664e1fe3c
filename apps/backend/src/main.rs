use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use backend::services::watchdog;
use backend::{db_url, routes, telemetry, AppState, EngineConfig};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let engine = match EngineConfig::from_env() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid engine configuration: {e}");
            std::process::exit(1);
        }
    };

    let url = match db_url() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid database configuration: {e}");
            std::process::exit(1);
        }
    };
    let db = match sea_orm::Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(db, engine);

    // Autoplay and settlement-retry loop, for the life of the process.
    let _watchdog = watchdog::spawn(app_state.clone());

    info!(host = %host, port, "starting table engine");

    let data = web::Data::new(app_state);
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

/// CORS from `CORS_ALLOWED_ORIGINS` (comma-separated), localhost fallback.
fn cors_middleware() -> Cors {
    let allowed_raw = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    let allowed: Vec<String> = allowed_raw
        .split(',')
        .map(str::trim)
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);
    if allowed.is_empty() {
        cors = cors
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000");
    } else {
        for origin in &allowed {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}
