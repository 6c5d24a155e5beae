use clap::Parser;
use std::path::PathBuf;

/// Process marketplace operation scripts against a persistent ledger
#[derive(Parser, Debug)]
#[command(name = "marketplace-ledger")]
#[command(about = "Process marketplace operation scripts against a persistent ledger", long_about = None)]
pub struct CliArgs {
    /// Operation script CSV to apply
    #[arg(value_name = "SCRIPT", help = "Path to the operation script CSV")]
    pub script: PathBuf,

    /// Snapshot directory; loaded before the script and saved after
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        help = "Directory for the CSV snapshot (loaded first, saved on exit)"
    )]
    pub data_dir: Option<PathBuf>,

    /// Seed the demo data set before running the script
    #[arg(
        long = "seed-demo",
        help = "Seed the demo marketplace (one buyer, one verified seller, two products)"
    )]
    pub seed_demo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::script_only(&["program", "ops.csv"], None, false)]
    #[case::with_data_dir(&["program", "--data-dir", "/tmp/ledger", "ops.csv"], Some("/tmp/ledger"), false)]
    #[case::with_seed(&["program", "--seed-demo", "ops.csv"], None, true)]
    #[case::all_options(
        &["program", "--data-dir", "/tmp/ledger", "--seed-demo", "ops.csv"],
        Some("/tmp/ledger"),
        true
    )]
    fn test_argument_parsing(
        #[case] args: &[&str],
        #[case] data_dir: Option<&str>,
        #[case] seed_demo: bool,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.script, PathBuf::from("ops.csv"));
        assert_eq!(parsed.data_dir, data_dir.map(PathBuf::from));
        assert_eq!(parsed.seed_demo, seed_demo);
    }

    #[rstest]
    #[case::missing_script(&["program"])]
    #[case::unknown_flag(&["program", "--verbose", "ops.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
