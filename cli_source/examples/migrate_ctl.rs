//! Example CLI demonstrating hierarchical flag collection.
//!
//! Try:
//!
//! ```text
//! cargo run --example migrate_ctl -- --debug server --host example.com \
//!     database --driver mysql migrate --direction up --steps 3
//! ```

use std::io::{self, Write};

use clap::{Arg, ArgAction, Command, value_parser};
use cli_source::CliFlags;
use figment::Figment;
use figment::providers::Serialized;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct AppConfig {
    debug: bool,
    server: ServerConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct ServerConfig {
    host: String,
    port: u16,
    database: DatabaseConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct DatabaseConfig {
    driver: String,
    migrate: MigrateConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct MigrateConfig {
    direction: String,
    steps: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            server: ServerConfig {
                host: "localhost".into(),
                port: 8080,
                database: DatabaseConfig {
                    driver: "postgres".into(),
                    migrate: MigrateConfig {
                        direction: "up".into(),
                        steps: 1,
                    },
                },
            },
        }
    }
}

fn cli() -> Command {
    Command::new("migrate-ctl")
        .about("Manages a service and its database migrations")
        .arg(Arg::new("debug").long("debug").action(ArgAction::SetTrue))
        .subcommand(
            Command::new("server")
                .arg(Arg::new("host").long("host"))
                .arg(Arg::new("port").long("port").value_parser(value_parser!(u16)))
                .subcommand(
                    Command::new("database")
                        .arg(Arg::new("driver").long("driver"))
                        .subcommand(
                            Command::new("migrate")
                                .arg(Arg::new("direction").long("direction"))
                                .arg(
                                    Arg::new("steps")
                                        .long("steps")
                                        .value_parser(value_parser!(i64)),
                                ),
                        ),
                ),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let command = cli();
    let matches = command.clone().get_matches();

    let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(CliFlags::new(&command, &matches))
        .extract()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "resolved configuration: {config:#?}")?;
    Ok(())
}
