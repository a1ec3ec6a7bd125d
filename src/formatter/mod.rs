use crate::driver::BatchOutput;

mod csv_formatter;
mod summary_formatter;

pub use csv_formatter::CsvFormatter;
pub use summary_formatter::SummaryFormatter;

pub trait BatchFormatter {
    fn format(&self, output: &BatchOutput) -> String;
}
