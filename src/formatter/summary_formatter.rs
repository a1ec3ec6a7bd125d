use std::fmt::Write;

use crate::driver::BatchOutput;
use crate::formatter::BatchFormatter;
use crate::piano_roll::PITCH_COUNT;

pub struct SummaryFormatter {}

impl SummaryFormatter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchFormatter for SummaryFormatter {
    fn format(&self, output: &BatchOutput) -> String {
        // batch (2, 128, 2515)
        //   [0] Bach_0 class=1 active=5213
        let (len, pitches, steps) = output.batch.shape();
        let mut text = format!("batch ({len}, {pitches}, {steps})\n");
        for (index, (identifier, class)) in output
            .identifiers
            .iter()
            .zip(&output.composer_classes)
            .enumerate()
        {
            let active = output.batch.item(index).iter().filter(|&&v| v != 0).count();
            let _ = writeln!(
                text,
                "  [{index}] {identifier} class={class} active={active}/{cells}",
                cells = PITCH_COUNT * steps
            );
        }
        text
    }
}
