// CLI argument parsing.

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, ValueEnum};

#[rustfmt::skip]
#[derive(Parser, Debug, Clone)]
#[command(name = "normal-mle")]
#[command(about = "Normal MLE via Newton, bisection and golden-section search")]
#[command(group(ArgGroup::new("source").required(true).args(["data", "values", "generate"])))]
pub struct Cli {
    /// Input dataset path (.csv); one column of observations is used.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Treat input as having no header row.
    #[arg(long)]
    pub no_header: bool,

    /// Column to read (header name or 0-based index). Defaults to the first column.
    #[arg(long)]
    pub column: Option<String>,

    /// Inline observations (comma-separated).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Option<Vec<f64>>,

    /// Draw this many observations from Normal(--mu, --sigma).
    #[arg(long)]
    pub generate: Option<usize>,

    /// Mean of the generated sample.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub mu: f64,

    /// Standard deviation of the generated sample.
    #[arg(long, default_value_t = 1.0)]
    pub sigma: f64,

    /// RNG seed for --generate.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Stopping tolerance shared by all methods.
    #[arg(long, default_value_t = crate::optimization::DEFAULT_TOL)]
    pub tol: f64,

    /// Iteration cap shared by all methods (defaults are method-specific).
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Newton starting point.
    #[arg(long, allow_negative_numbers = true, conflicts_with = "newton_median")]
    pub newton_x0: Option<f64>,

    /// Start Newton at the sample median.
    #[arg(long)]
    pub newton_median: bool,

    /// Bisection bracket for mu.
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    pub mu_bracket: Option<Vec<f64>>,

    /// Golden-section bracket for sigma.
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    pub sigma_bracket: Option<Vec<f64>>,

    /// Search mu instead of sigma with golden section (uses --mu-bracket).
    #[arg(long)]
    pub golden_mu: bool,

    /// Run the three methods on separate threads.
    #[arg(long)]
    pub parallel: bool,

    /// Output path for results (optional; stdout otherwise).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to inferring from --output extension, else table).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}
