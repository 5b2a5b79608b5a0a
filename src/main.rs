use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use jobboard::{
    auth::AuthConfig,
    config::Config,
    routes::{self, health},
    services::JobQueryService,
    store::{JobStore, PgJobStore},
};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    let store: Arc<dyn JobStore> = Arc::new(PgJobStore::new(pool));
    let query_service = web::Data::new(JobQueryService::new(store.clone(), config.query.clone()));
    let store_data: web::Data<dyn JobStore> = web::Data::from(store);
    let auth_config = web::Data::new(AuthConfig::new(config.jwt_secret.clone()));

    log::info!("Starting jobboard server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(query_service.clone())
            .app_data(store_data.clone())
            .app_data(auth_config.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
