use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use skycast_core::{
    Config, Coordinates, DisplayState, FixedLocator, Locator, OpenWeatherProvider, Unavailable,
    WeatherClient, provider_from_config,
};

use crate::{configure, terminal::TerminalSurface};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather from OpenWeatherMap")]
pub struct Cli {
    /// OpenWeatherMap API key; overrides the configured one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Don't print the loading indicator.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and an optional home location.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Rio de Janeiro" or "Paris,FR".
        city: Vec<String>,
    },

    /// Show current weather for the given or configured location.
    Here {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}

type Client = WeatherClient<OpenWeatherProvider, TerminalSurface>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let Cli {
            api_key,
            quiet,
            command,
        } = self;

        match command {
            Command::Configure => {
                configure::run()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city } => {
                let (client, _) = build_client(api_key, quiet)?;
                client.on_search_submit(&city.join(" ")).await;
                Ok(exit_code(&client.state()))
            }
            Command::Here { lat, lon } => {
                let (client, config) = build_client(api_key, quiet)?;

                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
                    _ => config.home,
                };

                let locator: Box<dyn Locator> = match position {
                    Some(coordinates) => Box::new(FixedLocator(coordinates)),
                    None => Box::new(Unavailable),
                };

                client.load_current_location(locator.as_ref()).await;

                if client.state() == DisplayState::Idle {
                    eprintln!(
                        "No weather shown for the current location.\n\
                         Hint: pass --lat/--lon, set a home location with `skycast configure`, \
                         or set RUST_LOG=warn for details."
                    );
                    return Ok(ExitCode::FAILURE);
                }
                Ok(exit_code(&client.state()))
            }
        }
    }
}

fn build_client(api_key: Option<String>, quiet: bool) -> anyhow::Result<(Client, Config)> {
    let mut config = Config::load()?;
    if let Some(key) = api_key {
        config.set_api_key(key);
    }

    let provider = provider_from_config(&config)?;
    debug!(base_url = provider.base_url(), timeout = ?config.timeout(), "provider ready");

    let client = WeatherClient::new(provider, TerminalSurface::new(quiet))
        .with_icon_base_url(&config.icon_base_url);

    Ok((client, config))
}

fn exit_code(state: &DisplayState) -> ExitCode {
    match state {
        DisplayState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_word_city() {
        let cli = Cli::try_parse_from(["skycast", "show", "Rio", "de", "Janeiro"]).expect("parses");
        match cli.command {
            Command::Show { city } => assert_eq!(city.join(" "), "Rio de Janeiro"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn here_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["skycast", "here", "--lat", "-33.87", "--lon", "151.21"])
            .expect("parses");
        match cli.command {
            Command::Here { lat, lon } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.21));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn here_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["skycast", "here", "--lat", "10"]).is_err());
    }

    #[test]
    fn error_state_exits_nonzero() {
        assert_eq!(
            exit_code(&DisplayState::Error("x".into())),
            ExitCode::FAILURE
        );
        assert_eq!(exit_code(&DisplayState::Idle), ExitCode::SUCCESS);
    }
}
