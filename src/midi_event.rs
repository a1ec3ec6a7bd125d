/// A single event kept from a track, timed relative to the previous kept event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEvent {
    pub delta_ticks: u32,
    pub message: Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    SetTempo(u32), // microseconds per beat
    NoteOn(u8, u8),
    NoteOff(u8),
}

impl TrackEvent {
    pub fn new(delta_ticks: u32, message: Message) -> Self {
        Self {
            delta_ticks,
            message,
        }
    }
}

/// The tracks of one file, in file order, with the file's time division.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEventStream {
    pub ticks_per_beat: u16,
    pub tracks: Vec<Vec<TrackEvent>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteInterval {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub pitch: u8,
    pub velocity: u8,
}
