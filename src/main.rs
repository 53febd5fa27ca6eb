#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_web::{web, App, HttpServer};
    use snacktacular::api::configure;
    use snacktacular::config::Config;
    use snacktacular::db::Database;
    use snacktacular::gateway::SyncGateway;
    use std::io::{Error, ErrorKind};
    use std::sync::Arc;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::load().map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

    // Initialize the database
    let db = Database::new(&config.db_path).map_err(|e| Error::new(ErrorKind::Other, e))?;
    db.create_schema()
        .await
        .map_err(|e| Error::new(ErrorKind::Other, e))?;
    info!("Schema created successfully!");

    // One SQLite file serves as both the document and the blob store
    let db = Arc::new(db);
    let gateway = SyncGateway::new(db.clone(), db).with_jpeg_quality(config.jpeg_quality);
    let gateway = web::Data::new(gateway);

    info!("listening on http://{}", &config.addr);
    let max_upload_bytes = config.max_upload_bytes;

    HttpServer::new(move || {
        App::new()
            .app_data(gateway.clone())
            .configure(|cfg| configure(cfg, max_upload_bytes))
            .service(web::resource("/").route(web::get().to(index)))
    })
    .bind(&config.addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
async fn index() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().body("Welcome to Snacktacular!")
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no server without the `ssr` feature; the library is usable on its own
}
