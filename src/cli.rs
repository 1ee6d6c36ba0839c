//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for crictui
#[derive(Clone, Parser, Debug)]
#[command(
    name = "crictui",
    version,
    about = "IPL batting statistics in the terminal"
)]
pub struct Args {
    /// Path to the per-delivery CSV (columns: batsman, season, inning, batsman_runs, ...)
    #[arg(value_name = "DELIVERIES", default_value = "ipl.csv")]
    pub deliveries: PathBuf,

    /// Path to the precomputed top-10 run scorer CSV (columns: batsman, batsman_runs)
    #[arg(value_name = "TOP10", default_value = "top10_score.csv")]
    pub top_scorers: PathBuf,

    /// Batsman selected when the application starts (defaults to the first name in the data)
    #[arg(long)]
    pub batsman: Option<String>,

    /// Bin count for the innings run-distribution histograms (overrides config)
    #[arg(long)]
    pub bins: Option<usize>,

    /// Write a commented default config file and exit
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let args = Args::parse_from(["crictui"]);
        assert_eq!(args.deliveries, PathBuf::from("ipl.csv"));
        assert_eq!(args.top_scorers, PathBuf::from("top10_score.csv"));
        assert!(args.batsman.is_none());
        assert!(args.bins.is_none());
        assert!(!args.generate_config);
    }

    #[test]
    fn test_explicit_paths_and_flags() {
        let args = Args::parse_from([
            "crictui",
            "deliveries.csv",
            "top.csv",
            "--batsman",
            "V Kohli",
            "--bins",
            "10",
        ]);
        assert_eq!(args.deliveries, PathBuf::from("deliveries.csv"));
        assert_eq!(args.top_scorers, PathBuf::from("top.csv"));
        assert_eq!(args.batsman.as_deref(), Some("V Kohli"));
        assert_eq!(args.bins, Some(10));
    }
}
