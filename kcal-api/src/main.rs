mod config;
mod routes;

use std::error::Error;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, App, HttpServer};
use log::info;

use crate::config::Config;

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);

    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    let config = Config::from_env();
    match &config.allowed_origin {
        Some(origin) => info!("Accepting cross-origin requests from {}", origin),
        None => info!("Accepting cross-origin requests from any origin"),
    }

    info!("Listening on {}", config.bind_address);
    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(allowed_origin.as_deref()))
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await?;

    Ok(())
}
