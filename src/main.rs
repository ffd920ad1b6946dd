use actix_web::{App, HttpServer, middleware, web};

use fuelerp::config::AppConfig;
use fuelerp::handlers;
use fuelerp::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env is optional; real environment variables win
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env file: {e}");
        }
    }
    env_logger::init();

    let config = AppConfig::from_env();

    // Load sidebar menu and report pages (embedded seeds unless overridden)
    let state = match AppState::load(&config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Startup failed: {e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    let data = web::Data::new(state);

    log::info!("Starting {} at http://{}", config.app_name, config.bind);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(data.clone())
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind)?
    .run()
    .await
}
