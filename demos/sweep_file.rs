// Sweep a file from disk
// Author: Gabriel Demetrios Lafis
//
// Usage: cargo run --example sweep_file -- <input.csv|input.xlsx> [output-dir]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};

use data_sweeper::{
    data::{export, FileFormat},
    processing::{CleaningOperation, CorrelationMatrix, DatasetInfo, Description, Histogram},
    render::render_heatmap,
    Session,
};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(input) => PathBuf::from(input),
        None => bail!("usage: sweep_file <input.csv|input.xlsx> [output-dir]"),
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let name = input
        .file_name()
        .and_then(|name| name.to_str())
        .context("input path has no file name")?
        .to_string();
    let bytes = fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;

    let mut session = Session::from_upload(&name, &bytes)?;
    println!("File Name: {}", session.file().name);
    println!("File Size: {}", session.file().size_label());

    for operation in [CleaningOperation::RemoveDuplicates, CleaningOperation::FillMissingMean] {
        let changed = session.apply(operation)?;
        println!("{} ({} changed)", operation.success_message(), changed);
    }

    let table = session.table();
    println!("\n{}", DatasetInfo::compute(table).render());

    if let Some(description) = Description::compute(table) {
        println!("{}", serde_json::to_string_pretty(&description)?);
    }

    match CorrelationMatrix::compute(table) {
        Some(matrix) => {
            let path = output_dir.join("correlation.svg");
            fs::write(&path, render_heatmap(&matrix)?)?;
            println!("Wrote {}", path.display());
        }
        None => println!("No numeric columns available for correlation heatmap."),
    }

    for histogram in Histogram::for_dataset(table) {
        println!("{}: {} values in {} bins", histogram.column, histogram.total(), histogram.counts.len());
    }

    for format in [FileFormat::Csv, FileFormat::Xlsx] {
        let buffer = export(table, format)?;
        let path = output_dir.join(buffer.file_name());
        fs::write(&path, buffer.into_bytes())?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
