use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use sleep_stress::{aggregate, export, format_series, ingest, GroupBy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Aligned plain-text tables, one block per group
    Text,
    /// Series with colours, for chart front-ends
    Json,
}

#[derive(Parser)]
#[command(name = "sleep-stress")]
#[command(about = "Average stress per sleep-hour bin, grouped by a survey attribute", long_about = None)]
struct Cli {
    /// Survey CSV with Sleep_Hours_per_Night, Stress_Level (1-10), Grade, Gender and Department
    #[arg(value_name = "CSV")]
    input: PathBuf,

    /// Attribute to group by: grade, gender or department
    #[arg(short, long, default_value = "grade")]
    group_by: GroupBy,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the export here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export every grouping attribute in turn (text only)
    #[arg(long, conflicts_with = "group_by")]
    all_groupings: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let dataset = ingest(&text).with_context(|| format!("loading {}", cli.input.display()))?;
    for warning in &dataset.skipped {
        log::warn!("{}: {warning}", cli.input.display());
    }

    let rendered = if cli.all_groupings {
        let mut out = String::new();
        for by in GroupBy::ALL {
            let series = aggregate(&dataset.records, by);
            out.push_str(&format!("## Grouped by {by}\n\n"));
            out.push_str(&format_series(&series).context("exporting series")?);
        }
        out
    } else {
        log::info!(
            "Groups by {}: {:?}",
            cli.group_by,
            dataset.group_keys(cli.group_by)
        );
        let series = aggregate(&dataset.records, cli.group_by);
        match cli.format {
            Format::Text => format_series(&series),
            Format::Json => export::to_json(&series, cli.group_by),
        }
        .context("exporting series")?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!(
                "Exported {} record(s) ({} skipped) to {}",
                dataset.len(),
                dataset.skipped.len(),
                path.display()
            );
        }
        None => std::io::stdout()
            .write_all(rendered.as_bytes())
            .context("writing to stdout")?,
    }
    Ok(())
}
