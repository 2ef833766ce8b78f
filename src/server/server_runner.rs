use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::path::Path;

use crate::email::EmailDispatcher;
use crate::error::MonarkError;
use crate::server::config::{read_config, MonarkConfigCors};
use crate::server::endpoints;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(endpoints::health_endpoint)
        .service(endpoints::contact_endpoint)
        .service(endpoints::registration_endpoint);
}

/// Translate body-parse failures into the same `{error}` shape as
/// validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        MonarkError::ValidationError {
            message: format!("Invalid JSON body: {err}"),
        }
        .into()
    })
}

fn build_cors(monark_cors: MonarkConfigCors) -> Cors {
    let mut cors = Cors::default().allow_any_header().allow_any_method();

    if monark_cors.origin.trim() == "*" {
        cors = cors.allow_any_origin()
    } else {
        cors = cors.allowed_origin(monark_cors.origin.trim());
    }

    cors
}

pub async fn run_server(config_path: &Path) -> std::io::Result<()> {
    env_logger::init();

    let monark_conf = read_config(config_path)
        .unwrap_or_else(|e| panic!("unable to read monarkfx.toml configuration file: {e}"));
    // Resolve credentials and build the dispatcher once, up front, so a
    // misconfigured relay fails the boot rather than the first submission.
    let dispatcher = EmailDispatcher::from_config(&monark_conf)
        .unwrap_or_else(|e| panic!("unable to configure email dispatch: {e}"));

    println!("Starting server {}:{}...", monark_conf.host, monark_conf.port);
    let conf_for_server = monark_conf.clone();
    HttpServer::new(move || {
        let cors = build_cors(conf_for_server.cors.clone());

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(cors)
            .app_data(json_config())
            .app_data(web::Data::new(dispatcher.clone()))
            .configure(config)
    })
    .bind((monark_conf.host, monark_conf.port))?
    .run()
    .await
}
