// CLI output formatting.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::estimator::Estimation;

pub fn write_table<W: Write>(out: &mut W, est: &Estimation) -> anyhow::Result<()> {
    writeln!(out, "n: {}", est.n)?;
    writeln!(
        out,
        "closed form: mu={:.6} sigma={:.6}",
        est.closed_form.mu, est.closed_form.sigma
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<16} {:<28} {:>14} {:>16} {:>6} {:>6}",
        "method", "status", "estimate", "loglik", "iters", "evals"
    )?;
    for m in est.outcomes() {
        match m.report() {
            Some(r) => writeln!(
                out,
                "{:<16} {:<28} {:>14.8} {:>16.6} {:>6} {:>6}",
                m.algorithm_name,
                m.status().to_string(),
                r.estimate,
                r.objective,
                r.iterations,
                r.evaluations
            )?,
            None => writeln!(out, "{:<16} {:<28}", m.algorithm_name, m.status().to_string())?,
        }
    }
    for m in est.outcomes() {
        if let Err(e) = &m.result {
            writeln!(out, "{}: {}", m.algorithm_name, e.message)?;
        }
    }
    writeln!(out)?;

    for m in est.outcomes() {
        let Some(r) = m.report() else { continue };
        writeln!(out, "{} trajectory:", m.algorithm_name)?;
        for p in &r.trace {
            match p.bracket {
                Some([lo, hi]) => writeln!(
                    out,
                    "  {:>4}  {:>14.8}  {:>16.6}  [{:.8}, {:.8}]",
                    p.iteration, p.estimate, p.objective, lo, hi
                )?,
                None => writeln!(
                    out,
                    "  {:>4}  {:>14.8}  {:>16.6}",
                    p.iteration, p.estimate, p.objective
                )?,
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct TraceRow<'a> {
    algorithm: &'a str,
    iteration: usize,
    estimate: f64,
    objective: f64,
    lo: Option<f64>,
    hi: Option<f64>,
}

/// One row per trace point across all successful methods.
pub fn write_trace_csv<W: Write>(out: W, est: &Estimation) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for m in est.outcomes() {
        let Some(r) = m.report() else { continue };
        for p in &r.trace {
            wtr.serialize(TraceRow {
                algorithm: m.algorithm_name,
                iteration: p.iteration,
                estimate: p.estimate,
                objective: p.objective,
                lo: p.bracket.map(|b| b[0]),
                hi: p.bracket.map(|b| b[1]),
            })
            .context("failed to write CSV row")?;
        }
    }
    wtr.flush().context("failed to flush CSV output")?;
    Ok(())
}

pub fn write_results<W: Write>(
    mut out: W,
    est: &Estimation,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => write_table(&mut out, est),
        OutputFormat::Csv => write_trace_csv(out, est),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, est).context("failed to write JSON")?;
            writeln!(out)?;
            Ok(())
        }
    }
}
