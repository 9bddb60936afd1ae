//! Generate command: build the dataset, write the workbook, report.

use crate::export;
use crate::report;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use retail_data_gen::{Generator, GeneratorConfig, Locale};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

pub fn run(
    output: PathBuf,
    seed: Option<u64>,
    locale: Locale,
    progress: bool,
    json: bool,
) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    let config = GeneratorConfig {
        locale,
        ..Default::default()
    };
    let generated_on = config.today.to_string();

    let progress_bar = if progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Generating data...");
        Some(pb)
    } else {
        if !json {
            println!("Generating data...");
        }
        None
    };

    let start_time = Instant::now();

    let mut generator = Generator::new(seed, config);
    let dataset = generator.generate()?;

    if let Some(ref pb) = progress_bar {
        pb.set_message(format!("Writing {}...", output.display()));
    }

    export::write_workbook(&dataset, &output)
        .with_context(|| format!("exporting dataset to {}", output.display()))?;

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
        eprintln!("Done in {:.3?}", start_time.elapsed());
    }

    if json {
        let summary = report::json_summary(&output, seed, &generated_on, &dataset)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        report::write_text_report(&mut out, &output, seed, &dataset)?;
        out.flush()?;
    }

    Ok(())
}
