//! Merging the flag sources into a figment alongside defaults.

use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use clap::{Arg, ArgAction, Command, value_parser};
use cli_source::CliFlags;
use figment::Figment;
use figment::providers::Serialized;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct AppConfig {
    debug: bool,
    server: ServerConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct ServerConfig {
    host: String,
    port: u16,
    database: DatabaseConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct DatabaseConfig {
    driver: String,
    migrate: MigrateConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
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

fn app() -> Command {
    Command::new("app")
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
                                .arg(Arg::new("steps").long("steps").value_parser(value_parser!(i64))),
                        ),
                ),
        )
}

/// Command-line flags override struct defaults level by level; untouched
/// fields keep their defaults.
#[test]
fn flags_merge_over_defaults() -> Result<()> {
    let command = app();
    let matches = command.clone().try_get_matches_from([
        "app", "--debug", "server", "--host", "example.com", "database", "--driver", "mysql",
        "migrate", "--direction", "down", "--steps", "3",
    ])?;

    let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(CliFlags::new(&command, &matches))
        .extract()?;

    ensure!(config.debug);
    ensure!(config.server.host == "example.com");
    ensure!(config.server.port == 8080, "default should survive the merge");
    ensure!(config.server.database.driver == "mysql");
    ensure!(config.server.database.migrate.direction == "down");
    ensure!(config.server.database.migrate.steps == 3);
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct HttpConfig {
    timeout: Duration,
}

fn parse_secs(raw: &str) -> Result<Duration, String> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|err| err.to_string())
}

/// Duration flags round-trip through the provider into duration fields.
#[test]
fn duration_flags_extract_into_duration_fields() -> Result<()> {
    let command = Command::new("app")
        .arg(Arg::new("timeout").long("timeout").value_parser(parse_secs));
    let matches = command.clone().try_get_matches_from(["app", "--timeout", "30"])?;

    let config: HttpConfig = Figment::from(CliFlags::new(&command, &matches)).extract()?;
    ensure!(config.timeout == Duration::from_secs(30));
    Ok(())
}

/// A structural conflict surfaces as a figment error rather than silently
/// dropping a key.
#[test]
fn conflicts_propagate_through_the_provider() -> Result<()> {
    let command = Command::new("app")
        .arg(Arg::new("server").long("server"))
        .subcommand(Command::new("server").arg(Arg::new("host").long("host")));
    let matches = command
        .clone()
        .try_get_matches_from(["app", "--server", "primary", "server", "--host", "h"])?;

    let outcome = Figment::from(CliFlags::new(&command, &matches)).extract::<AppConfig>();
    let Err(err) = outcome else {
        return Err(anyhow!("expected the conflict to surface"));
    };
    ensure!(err.to_string().contains("conflicts"), "unexpected error: {err}");
    Ok(())
}
