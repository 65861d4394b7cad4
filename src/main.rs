use actix_web::{middleware, web, App, HttpServer};
use std::io;

use walk_count_backend::adapters::StorageImpl;
use walk_count_backend::app_config::AppConfig;
use walk_count_backend::database;
use walk_count_backend::routes::{configure, PgBackend};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let config = AppConfig::from_env().map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let pool = database::create_pool(&config.database_url, config.database_max_connections)
        .await
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    if config.run_migrations {
        database::run_migrations(&pool)
            .await
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    }

    let backend = web::Data::new(PgBackend::new(
        pool,
        StorageImpl::new(config.media_root.clone()),
    ));
    let host = config.host.clone();
    let port = config.port;
    let max_request_size = config.max_request_size;
    log::info!(
        "listening on {}:{}, media root {}",
        host,
        port,
        config.media_root.display()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(backend.clone())
            .wrap(middleware::Logger::default())
            .configure(configure::<PgBackend>(max_request_size))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
