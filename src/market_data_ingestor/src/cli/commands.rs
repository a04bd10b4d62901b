use clap::{Parser, Subcommand};

use crate::providers::registry::DataSource;

#[derive(Parser)]
#[command(author, version, about = "Dump candles or headlines from a data provider as JSON")]
pub struct Cli {
    /// Provider to read from: synthetic or live
    #[arg(long, global = true, default_value = "synthetic")]
    pub source: DataSource,

    /// Live endpoint root (only used with --source live)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a candle series
    Candles {
        /// Symbol to request (e.g. "XAUUSD")
        #[arg(long)]
        symbol: String,

        /// Number of candles
        #[arg(long, default_value = "120")]
        points: usize,

        /// Candle width in minutes
        #[arg(long, default_value = "1")]
        interval: u32,

        /// Merge every `interval` candles into one before printing
        #[arg(long)]
        aggregate: bool,
    },

    /// Fetch scored headlines
    News {
        /// Symbol to request (e.g. "XAUUSD")
        #[arg(long)]
        symbol: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_candles_command() {
        let cli = Cli::try_parse_from([
            "market_data_ingestor",
            "candles",
            "--symbol",
            "GLD",
            "--points",
            "96",
            "--interval",
            "15",
            "--aggregate",
            "--source",
            "live",
        ])
        .unwrap();

        assert_eq!(cli.source, DataSource::Live);
        match cli.command {
            Commands::Candles { symbol, points, interval, aggregate } => {
                assert_eq!(symbol, "GLD");
                assert_eq!(points, 96);
                assert_eq!(interval, 15);
                assert!(aggregate);
            }
            Commands::News { .. } => panic!("expected candles"),
        }
    }

    #[test]
    fn rejects_unknown_source() {
        let parsed = Cli::try_parse_from([
            "market_data_ingestor",
            "--source",
            "polygon",
            "news",
            "--symbol",
            "GLD",
        ]);
        assert!(parsed.is_err());
    }
}
