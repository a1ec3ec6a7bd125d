use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use midi2pianoroll::config::PipelineConfig;
use midi2pianoroll::driver::{self, SourceItem};
use midi2pianoroll::equalizer::DEFAULT_THRESHOLD;
use midi2pianoroll::extractor::DEFAULT_TEMPO_MICROS_PER_BEAT;
use midi2pianoroll::formatter::{BatchFormatter, CsvFormatter, SummaryFormatter};
use midi2pianoroll::loader;
use midi2pianoroll::piano_roll::DEFAULT_FS;
use midi2pianoroll::trace;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(
        short,
        long = "input",
        value_name = "COMPOSER=PATH",
        value_parser = parse_input,
        help = "A MIDI file and the composer it is labelled with (repeatable)"
    )]
    inputs: Vec<(String, PathBuf)>,

    #[arg(long, default_value_t = DEFAULT_TEMPO_MICROS_PER_BEAT, help = "Microseconds per beat before the first tempo event")]
    default_tempo: u32,

    #[arg(long, default_value_t = DEFAULT_FS, help = "Piano roll steps per second")]
    fs: u32,

    #[arg(long, default_value_t = DEFAULT_THRESHOLD, help = "Steps every piano roll is equalized to")]
    threshold: usize,

    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    #[arg(short, long, help = "Write to this file instead of stdout")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Summary,
    Csv,
}

fn parse_input(value: &str) -> Result<(String, PathBuf)> {
    let (composer, path) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("expected COMPOSER=PATH, got {value:?}"))?;
    Ok((composer.to_owned(), PathBuf::from(path)))
}

fn main() -> Result<()> {
    trace::setup();
    let args = Args::parse();

    let config = PipelineConfig {
        default_tempo: args.default_tempo,
        fs: args.fs,
        threshold: args.threshold,
    };

    let items = load_items(&args.inputs);
    let output = driver::run(items, &config);
    info!(items = output.len(), "batch ready");

    let formatter: Box<dyn BatchFormatter> = match args.format {
        Format::Summary => Box::new(SummaryFormatter::new()),
        Format::Csv => Box::new(CsvFormatter::new()),
    };
    let text = formatter.format(&output);

    match args.output {
        Some(path) => fs::write(&path, text)
            .with_context(|| format!("write output {}", path.display()))?,
        None => print!("{}", text),
    }

    Ok(())
}

/// Songs are named `<composer>_<n>`, counting the readable files of each
/// composer. Unreadable files keep their path as identifier.
fn load_items(inputs: &[(String, PathBuf)]) -> Vec<SourceItem> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    inputs
        .iter()
        .map(|(composer, path)| {
            let stream = loader::load(path);
            let identifier = if stream.is_ok() {
                let count = counts.entry(composer.as_str()).or_insert(0);
                let identifier = format!("{composer}_{count}");
                *count += 1;
                identifier
            } else {
                path.display().to_string()
            };
            SourceItem::new(identifier, composer.as_str(), stream)
        })
        .collect()
}
