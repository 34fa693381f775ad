use anyhow::{Context, Result, anyhow, bail};
use inquire::{Password, PasswordDisplayMode, Text};
use skycast_core::{Config, Coordinates};

/// Interactively update and save the configuration.
pub fn run() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key);

    let current_home = config.home.map(|c| c.to_string());
    let mut prompt = Text::new("Home location as lat,lon (optional):")
        .with_help_message("e.g. 52.52,13.405; leave empty to skip");
    if let Some(home) = current_home.as_deref() {
        prompt = prompt.with_default(home);
    }
    let home = prompt.prompt().context("Failed to read home location")?;

    config.home = if home.trim().is_empty() {
        None
    } else {
        Some(parse_coordinates(&home)?)
    };

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

/// Parse `"lat,lon"`.
pub fn parse_coordinates(input: &str) -> Result<Coordinates> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected `lat,lon`, got '{input}'"))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude '{}'", lon.trim()))?;

    Ok(Coordinates::new(lat, lon)?)
}
