//----------------------------------------
// Command line interface
//----------------------------------------
use std::path::PathBuf;

use abcompute::compute::TableRow;
use abcompute::compute::types::{EndpointType, SampleSize, SampleSizeResult};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "abcompute")]
#[command(about = "Minimum per-group sample size for A/B tests")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "TOML file with default alpha/power and solver settings"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Conversion-type metric, two-proportion z-test
    Proportion(ProportionArgs),
    /// Average-type metric, two-sample t-test
    Continuous(ContinuousArgs),
    /// Sample sizes over several MDEs and power levels
    #[command(subcommand)]
    Table(TableCommand),
}

#[derive(Debug, Subcommand)]
pub enum TableCommand {
    Proportion(ProportionTableArgs),
    Continuous(ContinuousTableArgs),
}

#[derive(Debug, Args)]
pub struct ProportionArgs {
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Baseline rate in percent, e.g. 10 for 10%"
    )]
    pub baseline: f64,

    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Absolute lift in percentage points, e.g. 1 for 10% -> 11%"
    )]
    pub mde: f64,

    #[arg(long, allow_hyphen_values = true, help = "Significance level")]
    pub alpha: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Statistical power (1 - beta)")]
    pub power: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ContinuousArgs {
    #[arg(long, allow_hyphen_values = true, help = "Current metric mean")]
    pub mean: f64,

    #[arg(long, allow_hyphen_values = true, help = "Absolute change to detect")]
    pub mde: f64,

    #[arg(long, allow_hyphen_values = true, help = "Historical standard deviation")]
    pub std_dev: f64,

    #[arg(long, allow_hyphen_values = true, help = "Significance level")]
    pub alpha: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Statistical power (1 - beta)")]
    pub power: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ProportionTableArgs {
    #[arg(long, allow_hyphen_values = true, help = "Baseline rate in percent")]
    pub baseline: f64,

    #[arg(
        long,
        required = true,
        value_delimiter = ',',
        help = "Lifts in percentage points"
    )]
    pub mdes: Vec<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Significance level")]
    pub alpha: Option<f64>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Power levels [default: configured power]"
    )]
    pub powers: Vec<f64>,
}

#[derive(Debug, Args)]
pub struct ContinuousTableArgs {
    #[arg(long, allow_hyphen_values = true, help = "Current metric mean")]
    pub mean: f64,

    #[arg(long, allow_hyphen_values = true, help = "Historical standard deviation")]
    pub std_dev: f64,

    #[arg(
        long,
        required = true,
        value_delimiter = ',',
        help = "Absolute changes to detect"
    )]
    pub mdes: Vec<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Significance level")]
    pub alpha: Option<f64>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Power levels [default: configured power]"
    )]
    pub powers: Vec<f64>,
}

/// Percent as typed by the user to the fraction the calculator expects
pub fn percent_to_fraction(pct: f64) -> f64 {
    pct / 100.0
}

/// 14745 -> "14,745"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_size(size: SampleSize) -> String {
    match size {
        SampleSize::Finite(n) => group_thousands(n),
        SampleSize::Infinite => "inf".to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub endpoint: EndpointType,
    pub test: &'static str,
    #[serde(flatten)]
    pub result: SampleSizeResult,
}

impl Report {
    pub fn new(endpoint: EndpointType, result: SampleSizeResult) -> Self {
        Self {
            endpoint,
            test: endpoint.test_name(),
            result,
        }
    }

    pub fn render(&self) -> String {
        if !self.result.per_group_n.is_finite() {
            return "No detectable effect: the MDE cannot be told apart from no change. \
                    Check the inputs."
                .to_string();
        }
        format!(
            "Per-group sample size: {}\nTotal sample size (A + B): {}\nBased on a {}",
            format_size(self.result.per_group_n),
            format_size(self.result.total_n),
            self.test
        )
    }
}

pub fn render_table(endpoint: EndpointType, rows: &[TableRow]) -> String {
    let mut out = format!("{:>12}  {:>6}  {:>14}\n", "mde", "power", "per group");
    for row in rows {
        out.push_str(&format!(
            "{:>12}  {:>6}  {:>14}\n",
            row.mde,
            row.power,
            format_size(row.per_group_n)
        ));
    }
    out.push_str(&format!("Based on a {}", endpoint.test_name()));
    out
}
