use tracing::{info, warn};

use crate::composer::Composer;
use crate::config::PipelineConfig;
use crate::equalizer::{equalize, Batch};
use crate::error::{Error, Result};
use crate::extractor::{Extractor, Timeline};
use crate::midi_event::ParsedEventStream;
use crate::piano_roll::{rasterize, PianoRoll};

/// One input file as handed over by the loader. `stream` holds the parser's
/// failure when the file could not be read.
#[derive(Debug)]
pub struct SourceItem {
    pub identifier: String,
    pub composer: String,
    pub stream: anyhow::Result<ParsedEventStream>,
}

impl SourceItem {
    pub fn new(
        identifier: impl Into<String>,
        composer: impl Into<String>,
        stream: anyhow::Result<ParsedEventStream>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            composer: composer.into(),
            stream,
        }
    }
}

/// The equalized batch plus the class index and identifier of each item,
/// position for position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub batch: Batch,
    pub composer_classes: Vec<u8>,
    pub identifiers: Vec<String>,
}

impl BatchOutput {
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Extracts and rasterizes a single stream.
pub fn piano_roll(stream: &ParsedEventStream, config: &PipelineConfig) -> Result<PianoRoll> {
    let extraction = Extractor::for_stream(stream, config.default_tempo).run()?;
    match extraction.timeline {
        Timeline::Completed(intervals) => rasterize(&intervals, config.fs),
        Timeline::Empty => Err(Error::EmptyTimeline),
    }
}

/// Runs every item through extraction and rasterization, skipping the ones
/// that fail, and equalizes the survivors into one batch.
pub fn run(items: Vec<SourceItem>, config: &PipelineConfig) -> BatchOutput {
    let total = items.len();
    let mut rolls = Vec::with_capacity(total);
    let mut composer_classes = Vec::with_capacity(total);
    let mut identifiers = Vec::with_capacity(total);

    for item in items {
        match process_item(&item.identifier, item.stream, config) {
            Ok(roll) => {
                let composer = Composer::from_label(&item.composer);
                info!(
                    identifier = %item.identifier,
                    %composer,
                    steps = roll.steps(),
                    "created piano roll"
                );
                rolls.push(roll);
                composer_classes.push(composer.class_index());
                identifiers.push(item.identifier);
            }
            Err(err) => warn!(identifier = %item.identifier, "{err}, skipped"),
        }
    }

    info!(
        kept = rolls.len(),
        skipped = total - rolls.len(),
        threshold = config.threshold,
        "equalizing piano rolls"
    );
    let batch = equalize(&rolls, config.threshold);

    BatchOutput {
        batch,
        composer_classes,
        identifiers,
    }
}

fn process_item(
    identifier: &str,
    stream: anyhow::Result<ParsedEventStream>,
    config: &PipelineConfig,
) -> Result<PianoRoll> {
    let stream = stream.map_err(|source| Error::UnreadableStream {
        identifier: identifier.to_owned(),
        source,
    })?;
    piano_roll(&stream, config)
}
