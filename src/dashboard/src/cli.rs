//! Command-line interface of the `dashboard` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Gold dashboard: candles, indicators, news sentiment and a consolidated signal"
)]
pub struct Cli {
    /// TOML config file; built-in defaults when omitted
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refresh once and print the dashboard
    Show(ShowArgs),

    /// Refresh on a timer and reprint until Ctrl-C
    Watch {
        #[command(flatten)]
        view: ViewArgs,

        /// Seconds between refreshes
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
        every_secs: u64,
    },

    /// List configured assets
    Assets,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Asset symbol; the configured default when omitted
    #[arg(long)]
    pub asset: Option<String>,

    /// Chart tab (timeframe key) to draw
    #[arg(long)]
    pub tab: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show() {
        let cli = Cli::try_parse_from([
            "dashboard", "--config", "d.toml", "show", "--asset", "GLD", "--tab", "1w", "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("d.toml")));
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.view.asset.as_deref(), Some("GLD"));
                assert_eq!(args.view.tab.as_deref(), Some("1w"));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn watch_defaults() {
        let cli = Cli::try_parse_from(["dashboard", "watch"]).unwrap();
        match cli.command {
            Command::Watch { view, every_secs } => {
                assert_eq!(every_secs, 60);
                assert!(view.asset.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_interval_and_unknown_format() {
        assert!(Cli::try_parse_from(["dashboard", "watch", "--every-secs", "0"]).is_err());
        assert!(Cli::try_parse_from(["dashboard", "show", "--format", "html"]).is_err());
    }

    #[test]
    fn config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["dashboard", "assets", "-c", "x.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Assets));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
