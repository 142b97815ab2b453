pub mod args;
pub mod io;
pub mod output;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{bail, Context};
use slog::{o, Drain, Level, Logger};

pub use args::{Cli, OutputFormat};

use crate::estimator::{estimate, EstimatorCfg};
use crate::objective::Sample;
use crate::optimization::golden_section::Parameter;

/// Terminal logger on stderr with asynchronous draining.
pub fn terminal_logger(verbose: u8) -> Logger {
    let level = match verbose {
        0 => Level::Info,
        1 => Level::Debug,
        _ => Level::Trace,
    };
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    Logger::root(drain, o!())
}

fn bracket(v: Option<&[f64]>) -> Option<[f64; 2]> {
    v.map(|b| [b[0], b[1]])
}

fn infer_format(cli: &Cli) -> OutputFormat {
    if let Some(f) = cli.format {
        return f;
    }
    match cli.output.as_deref().and_then(Path::extension).and_then(|e| e.to_str()) {
        Some("csv") => OutputFormat::Csv,
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    }
}

pub fn load_sample(cli: &Cli) -> anyhow::Result<Sample> {
    let values = if let Some(path) = &cli.data {
        io::load_csv_column(path, !cli.no_header, cli.column.as_deref())?
    } else if let Some(values) = &cli.values {
        values.clone()
    } else if let Some(n) = cli.generate {
        io::generate_normal(n, cli.mu, cli.sigma, cli.seed)?
    } else {
        bail!("one of --data, --values or --generate is required");
    };
    Sample::new(values).context("invalid sample")
}

pub fn build_config(cli: &Cli) -> anyhow::Result<EstimatorCfg> {
    let mut cfg = EstimatorCfg::new()
        .with_common(cli.tol, cli.max_iter)
        .context("invalid tolerance settings")?;

    if let Some(x0) = cli.newton_x0 {
        cfg.newton = cfg.newton.set_x0(x0)?;
    }
    if cli.newton_median {
        cfg.newton = cfg.newton.start_at_median();
    }
    if cli.golden_mu {
        cfg.golden_section = cfg.golden_section.set_parameter(Parameter::Mu);
    }
    cfg.mu_bracket = bracket(cli.mu_bracket.as_deref());
    cfg.sigma_bracket = bracket(cli.sigma_bracket.as_deref());
    cfg.parallel = cli.parallel;
    Ok(cfg)
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let log = terminal_logger(cli.verbose);

    let sample = load_sample(&cli)?;
    let cfg = build_config(&cli)?;
    let est = estimate(&sample, &cfg, &log);

    let format = infer_format(&cli);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            output::write_results(BufWriter::new(file), &est, format)?;
        }
        None => output::write_results(std::io::stdout().lock(), &est, format)?,
    }
    Ok(())
}
