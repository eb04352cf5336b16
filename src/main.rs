// Data Sweeper - Main executable
// Author: Gabriel Demetrios Lafis

use std::path::Path;

use clap::{Arg, Command};
use log::info;

use data_sweeper::{
    api::{Server, ServerConfig},
    storage::{ExpiringStorage, MemoryStorage},
    utils::{init_logging, Config},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Parse command line arguments
    let matches = Command::new("Data Sweeper")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Clean, explore and convert CSV and Excel files in the browser")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the web server")
                .arg(
                    Arg::new("host")
                        .short('H')
                        .long("host")
                        .value_name("HOST")
                        .help("Sets the server host")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Sets the server port")
                        .takes_value(true),
                ),
        )
        .get_matches();

    // Load configuration
    let config = match matches.value_of("config") {
        Some(config_path) => match Config::from_file(config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config file: {}", err);
                Config::default()
            }
        },
        None => Config::default(),
    };

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter(), config.logging.file.as_deref().map(Path::new)) {
        eprintln!("Error initializing logger: {}", err);
    }

    // Create storage
    let mut storage = ExpiringStorage::new(MemoryStorage::new());
    if let Some(ttl) = config.session_ttl() {
        storage = storage.with_ttl(ttl);
    }

    match matches.subcommand_matches("serve") {
        Some(matches) => {
            // Override config with command line arguments
            let host = matches.value_of("host").unwrap_or(&config.server.host);
            let port = match matches.value_of("port") {
                Some(port) => port.parse::<u16>().map_err(|e| {
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Invalid port '{}': {}", port, e))
                })?,
                None => config.server.port,
            };

            let server_config = ServerConfig {
                host: host.to_string(),
                port,
                workers: config.workers(),
                enable_cors: config.server.enable_cors,
                max_upload_bytes: config.max_upload_bytes(),
            };

            info!("Open http://{}:{} in a browser to start sweeping", host, port);
            Server::new(storage, server_config).run().await
        }
        None => {
            println!("No subcommand specified. Use --help for usage information.");
            Ok(())
        }
    }
}
