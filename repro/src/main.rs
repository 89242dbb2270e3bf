mod api;
mod app;
mod constants;
mod errors;
mod models;
mod resources;
mod utils;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use app::App as ReproApp;

use crate::utils::logger::{log_fatal, log_success};

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let repro = ReproApp::new().await.unwrap_or_else(|e| {
        log_fatal(format!("Could not start repro. {}", e));
        std::process::exit(1);
    });
    let address = repro.bind_address();

    log_success(format!("Serving repro on {}:{}{}", address.0, address.1, repro.config.base_path));

    let repro = web::Data::new(repro);

    HttpServer::new(move || {
        App::new()
            .wrap(repro.session_middleware())
            .wrap(Logger::new("%a %r %s %b %{Referer}i %{User-Agent}i %T"))
            .app_data(repro.clone())
            .service(api::scope(&repro.config.base_path))
    })
    .bind(address.clone())
    .unwrap_or_else(|e| panic!("Could not bind to {:?}.\n{}", address, e))
    .run()
    .await
    .unwrap_or_else(|e| panic!("Could not run server on {:?}.\n{}", address, e));
}
