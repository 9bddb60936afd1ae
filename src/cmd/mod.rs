mod generate;

use clap::Parser;
use retail_data_gen::Locale;
use std::path::PathBuf;

use crate::export::DEFAULT_OUTPUT;

#[derive(Parser)]
#[command(name = "retail-fixtures")]
#[command(version)]
#[command(
    about = "Generate a retail demo dataset (customers, products, orders, sales targets) as an xlsx workbook",
    long_about = None
)]
pub struct Cli {
    /// Output workbook path (overwritten if it exists)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Random seed for reproducible output (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Locale for customer names and cities: pt_br, en
    #[arg(long, default_value = "pt_br")]
    pub locale: String,

    /// Show progress while generating and exporting
    #[arg(short, long)]
    pub progress: bool,

    /// Print a JSON summary instead of the text report
    #[arg(long)]
    pub json: bool,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let locale: Locale = cli
        .locale
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    generate::run(cli.output, cli.seed, locale, cli.progress, cli.json)
}
