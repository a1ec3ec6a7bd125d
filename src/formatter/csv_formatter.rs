use std::fmt::Write;

use crate::driver::BatchOutput;
use crate::formatter::BatchFormatter;

/// One line per item: identifier, class index, then the item's cells pitch
/// by pitch.
pub struct CsvFormatter {}

impl CsvFormatter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchFormatter for CsvFormatter {
    fn format(&self, output: &BatchOutput) -> String {
        let mut text = String::new();
        for (index, (identifier, class)) in output
            .identifiers
            .iter()
            .zip(&output.composer_classes)
            .enumerate()
        {
            let _ = write!(text, "{identifier},{class}");
            for cell in output.batch.item(index) {
                let _ = write!(text, ",{cell}");
            }
            text.push('\n');
        }
        text
    }
}
