mod cli;

use std::process::ExitCode;

use abcompute::compute::types::{EndpointType, SampleSizeResult};
use abcompute::compute::{ContinuousInput, ProportionInput, continuous_table, proportion_table};
use abcompute::config::AbcomputeConfig;
use abcompute::error::AbcomputeErr;
use abcompute::logger;
use anyhow::Context;
use clap::Parser;

use crate::cli::{Cli, Command, Report, TableCommand, percent_to_fraction, render_table};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<AbcomputeErr>() {
            Some(err) if err.is_invalid_input() => {
                tracing::warn!("rejected input: {err}");
                eprintln!("Input error: {err}");
                ExitCode::from(2)
            }
            _ => {
                tracing::error!("calculation failed: {e:#}");
                eprintln!("Internal error during calculation: {e:#}");
                ExitCode::from(1)
            }
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => AbcomputeConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AbcomputeConfig::default(),
    };
    tracing::debug!(?config, "using configuration");
    let defaults = config.defaults;

    match &cli.command {
        Command::Proportion(args) => {
            let input = ProportionInput::new(
                percent_to_fraction(args.baseline),
                percent_to_fraction(args.mde),
                args.alpha.unwrap_or(defaults.alpha),
                args.power.unwrap_or(defaults.power),
            );
            tracing::info!(?input, "computing proportion sample size");
            let result = SampleSizeResult::from(input.compute()?);
            render(cli, &Report::new(EndpointType::Proportion, result))
        }
        Command::Continuous(args) => {
            let input = ContinuousInput::new(
                args.mean,
                args.mde,
                args.std_dev,
                args.alpha.unwrap_or(defaults.alpha),
                args.power.unwrap_or(defaults.power),
            );
            tracing::info!(?input, "computing continuous sample size");
            let result = SampleSizeResult::from(input.compute_with(&config.solver)?);
            render(cli, &Report::new(EndpointType::Continuous, result))
        }
        Command::Table(TableCommand::Proportion(args)) => {
            let mdes: Vec<f64> = args.mdes.iter().copied().map(percent_to_fraction).collect();
            let powers = powers_or_default(&args.powers, defaults.power);
            let rows = proportion_table(
                percent_to_fraction(args.baseline),
                &mdes,
                args.alpha.unwrap_or(defaults.alpha),
                &powers,
            )?;
            if cli.json {
                return Ok(serde_json::to_string_pretty(&rows)?);
            }
            Ok(render_table(EndpointType::Proportion, &rows))
        }
        Command::Table(TableCommand::Continuous(args)) => {
            let powers = powers_or_default(&args.powers, defaults.power);
            let rows = continuous_table(
                &config.solver,
                args.mean,
                args.std_dev,
                &args.mdes,
                args.alpha.unwrap_or(defaults.alpha),
                &powers,
            )?;
            if cli.json {
                return Ok(serde_json::to_string_pretty(&rows)?);
            }
            Ok(render_table(EndpointType::Continuous, &rows))
        }
    }
}

fn powers_or_default(powers: &[f64], default: f64) -> Vec<f64> {
    if powers.is_empty() {
        vec![default]
    } else {
        powers.to_vec()
    }
}

fn render(cli: &Cli, report: &Report) -> anyhow::Result<String> {
    if cli.json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.render())
    }
}
