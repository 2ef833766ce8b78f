use clap::{arg, command, value_parser, Command};
use monarkfx_api::server::config::{config_to_toml, default_server_config};
use monarkfx_api::server::server_runner::run_server;
use std::path::PathBuf;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let matches = command!()
        .subcommand(
            Command::new("server")
                .about("Run the lead-capture HTTP server")
                .long_about(
                    "Run the lead-capture HTTP server. SMTP credentials missing from the \
                     configuration file are resolved from the environment (SMTP_USER, \
                     SMTP_PASSWORD and their legacy aliases) at startup.",
                )
                .arg(
                    arg!(--config <FILE> "Path to the server's configuration file")
                        .value_parser(value_parser!(PathBuf))
                        .env("MONARK_API_CONFIG_FILE")
                        .default_value("./monarkfx.toml"),
                ),
        )
        .subcommand(
            Command::new("default_server_config")
                .about("Print a default configuration file for the server"),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("server") {
        if let Some(config) = matches.get_one::<PathBuf>("config") {
            run_server(config).await?;
        }
    } else if matches.subcommand_matches("default_server_config").is_some() {
        match config_to_toml(default_server_config()) {
            Ok(config) => println!("{config}"),
            Err(err) => println!("Error: {err}"),
        }
    } else {
        println!("No subcommand provided. Run with --help for options.");
    }

    Ok(())
}
