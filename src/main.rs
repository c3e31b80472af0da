use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use chartfmt::{csv_reader, format_chart_def, ChartDefinition};

#[derive(Parser, Debug)]
#[command(name = "chartfmt")]
#[command(about = "Convert a chart definition JSON into renderer configuration JSON", long_about = None)]
struct Args {
    /// Chart definition JSON file (reads stdin when omitted)
    def_file: Option<PathBuf>,

    /// Replace the definition's data block with a table loaded from this CSV file
    #[arg(long)]
    data: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Read the definition document
    let raw = match &args.def_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read definition file '{}'", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read definition from stdin")?;
            buffer
        }
    };

    let mut document: serde_json::Value =
        serde_json::from_str(&raw).context("Definition input is not valid JSON")?;

    // Optionally swap in a data block loaded from CSV
    if let Some(csv_path) = &args.data {
        let table = csv_reader::read_csv_file(csv_path)
            .with_context(|| format!("Failed to load data from '{}'", csv_path.display()))?;
        match document.as_object_mut() {
            Some(object) => {
                object.insert(
                    "data".to_string(),
                    serde_json::to_value(&table).context("Failed to encode CSV data block")?,
                );
            }
            None => anyhow::bail!("Definition input must be a JSON object"),
        }
    }

    let definition = ChartDefinition::from_value(document)?;
    let configuration =
        format_chart_def(&definition).context("Failed to format chart definition")?;

    let mut rendered = if args.pretty {
        serde_json::to_string_pretty(&configuration)
    } else {
        serde_json::to_string(&configuration)
    }
    .context("Failed to encode renderer configuration")?;
    rendered.push('\n');

    // Write the configuration
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write output file '{}'", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.as_bytes())
                .context("Failed to write configuration to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
