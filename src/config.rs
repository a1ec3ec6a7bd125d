use crate::equalizer::DEFAULT_THRESHOLD;
use crate::extractor::DEFAULT_TEMPO_MICROS_PER_BEAT;
use crate::piano_roll::DEFAULT_FS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Microseconds per beat until the first tempo event.
    pub default_tempo: u32,
    /// Piano roll steps per second.
    pub fs: u32,
    /// Steps every piano roll is equalized to.
    pub threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_tempo: DEFAULT_TEMPO_MICROS_PER_BEAT,
            fs: DEFAULT_FS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
