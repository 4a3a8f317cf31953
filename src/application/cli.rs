#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::repl::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::LatLng;
use crate::domain::models::RendererName;
use crate::domain::services::navigation::TRAVEL_MODES;
use crate::domain::services::polyline;
use crate::domain::services::PanelSide;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Decoded points of an encoded polyline, one `lat,lng` pair per line.
pub fn decode_polyline(encoded: &str) -> Result<String> {
    let points = polyline::decode(encoded.trim())?;

    return Ok(points
        .iter()
        .map(|point| return point.to_string())
        .collect::<Vec<String>>()
        .join("\n"));
}

/// Encodes `lat,lng` pairs into a polyline.
pub fn encode_points(points: &[String]) -> Result<String> {
    let mut parsed = vec![];
    for point in points {
        match LatLng::parse(point) {
            Some(position) if position.is_valid() => parsed.push(position),
            _ => bail!(format!("Expected a lat,lng pair, got \"{point}\"")),
        }
    }

    return Ok(polyline::encode(&parsed));
}

pub fn log_dir() -> String {
    if let Ok(dir) = env::var("POLARIS_LOG_DIR") {
        return dir;
    }

    return dirs::cache_dir()
        .unwrap_or_default()
        .join("polaris")
        .to_string_lossy()
        .to_string();
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Polaris")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Polaris with environment variable RUST_LOG=polaris")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_decode() -> Command {
    return Command::new("decode")
        .about("Decodes an encoded route polyline and prints one lat,lng pair per line.")
        .arg(
            clap::Arg::new("polyline")
                .help("Encoded polyline, e.g. _p~iF~ps|U_ulLnnqC_mqNvxq`@")
                .required(true),
        );
}

fn subcommand_encode() -> Command {
    return Command::new("encode")
        .about("Encodes lat,lng pairs into a route polyline.")
        .arg(
            clap::Arg::new("points")
                .help("Points in route order, e.g. 38.5,-120.2 40.7,-120.95")
                .num_args(1..)
                .allow_hyphen_values(true)
                .required(true),
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start planning a trip. This is the default when no subcommand is given.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("polaris")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_decode())
        .subcommand(subcommand_encode())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("POLARIS_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::DirectionsURL.to_string())
                .long(ConfigKey::DirectionsURL.to_string())
                .env("POLARIS_DIRECTIONS_URL")
                .num_args(1)
                .help(format!("Directions service that turns a trip description into a route. [default: {}]", Config::default(ConfigKey::DirectionsURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeolocationTimeout.to_string())
                .long(ConfigKey::GeolocationTimeout.to_string())
                .env("POLARIS_GEOLOCATION_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds for your location before showing the globe instead. [default: {}]", Config::default(ConfigKey::GeolocationTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Location.to_string())
                .short('l')
                .long(ConfigKey::Location.to_string())
                .env("POLARIS_LOCATION")
                .num_args(1)
                .help("Your position as lat,lng, e.g. 37.77,-122.42. Leave unset to start on the globe.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PanelSide.to_string())
                .long(ConfigKey::PanelSide.to_string())
                .env("POLARIS_PANEL_SIDE")
                .num_args(1)
                .help(format!("Which side of the map the chat panel covers. [default: {}]", Config::default(ConfigKey::PanelSide)))
                .value_parser(PossibleValuesParser::new(PanelSide::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PanelWidth.to_string())
                .long(ConfigKey::PanelWidth.to_string())
                .env("POLARIS_PANEL_WIDTH")
                .num_args(1)
                .help(format!("Width of the chat panel in pixels, kept clear when fitting a route. [default: {}]", Config::default(ConfigKey::PanelWidth)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Renderer.to_string())
                .short('r')
                .long(ConfigKey::Renderer.to_string())
                .env("POLARIS_RENDERER")
                .num_args(1)
                .help(format!("The map renderer to draw routes with. [default: {}]", Config::default(ConfigKey::Renderer)))
                .value_parser(PossibleValuesParser::new(RendererName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TravelMode.to_string())
                .short('m')
                .long(ConfigKey::TravelMode.to_string())
                .env("POLARIS_TRAVEL_MODE")
                .num_args(1)
                .help(format!("Travel mode used for exported Google Maps links. [default: {}]", Config::default(ConfigKey::TravelMode)))
                .value_parser(PossibleValuesParser::new(TRAVEL_MODES))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = path::PathBuf::from(log_dir()).join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("decode", decode_matches)) => {
            if let Some(encoded) = decode_matches.get_one::<String>("polyline") {
                println!("{}", decode_polyline(encoded)?);
            }
            return Ok(false);
        }
        Some(("encode", encode_matches)) => {
            let points = encode_matches
                .get_many::<String>("points")
                .unwrap_or_default()
                .cloned()
                .collect::<Vec<String>>();
            println!("{}", encode_points(&points)?);
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
