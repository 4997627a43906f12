use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use todo_server::store::SqliteStore;
use todo_server::{routes, AppState, Config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let store = SqliteStore::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    info!("database ready at {}", config.database_url);

    let state = web::Data::new(AppState { store: store.clone() });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(config.bind_address())
    .with_context(|| format!("failed to bind port {}", config.port))?;

    info!("RPC server listening at port: {}", config.port);
    server.run().await?;

    store.close().await;
    info!("server stopped");
    Ok(())
}
