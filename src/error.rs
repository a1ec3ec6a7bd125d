use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{identifier} cannot be read: {source:#}")]
    UnreadableStream {
        identifier: String,
        source: anyhow::Error,
    },

    #[error("no completed notes to build a timeline from")]
    EmptyTimeline,

    #[error("timeline of {seconds} s at {fs} steps per second is too long")]
    TimelineTooLong { seconds: f64, fs: u32 },

    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
