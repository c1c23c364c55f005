use clap::Parser;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast-server", version, about = "Weather forecast HTTP service")]
pub struct Cli {
    /// Port to bind; overrides the config file.
    #[arg(long)]
    pub port: Option<u16>,

    /// OpenWeather API key; overrides the config file and environment.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_overrides() {
        let cli = Cli::parse_from(["forecast-server"]);
        assert!(cli.port.is_none());
        assert!(cli.api_key.is_none());
    }

    #[test]
    fn flags_are_picked_up() {
        let cli = Cli::parse_from(["forecast-server", "--port", "9090", "--api-key", "K"]);
        assert_eq!(cli.port, Some(9090));
        assert_eq!(cli.api_key.as_deref(), Some("K"));
    }
}
