use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::midi_event::{Message, NoteInterval, ParsedEventStream, TrackEvent};

// microseconds per second
const MICROS_PER_SEC: f64 = 1_000_000.0;
const MAX_DATA_BYTE: u8 = 127;

pub const DEFAULT_TEMPO_MICROS_PER_BEAT: u32 = 500_000;

/// The tempo in effect on a file's single timeline. Tracks hand it to one
/// another in file order, so a tempo change on one track applies to every
/// conversion made after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoState {
    micros_per_beat: u32,
}

impl TempoState {
    pub fn new(micros_per_beat: u32) -> Self {
        Self { micros_per_beat }
    }

    pub fn micros_per_beat(&self) -> u32 {
        self.micros_per_beat
    }

    pub fn bpm(&self) -> f64 {
        MICROS_PER_SEC / self.micros_per_beat as f64 * 60.0
    }
}

impl Default for TempoState {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPO_MICROS_PER_BEAT)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Timeline {
    Completed(Vec<NoteInterval>),
    Empty,
}

impl Timeline {
    fn from_intervals(intervals: Vec<NoteInterval>) -> Self {
        if intervals.is_empty() {
            Timeline::Empty
        } else {
            Timeline::Completed(intervals)
        }
    }

    pub fn intervals(&self) -> &[NoteInterval] {
        match self {
            Timeline::Completed(intervals) => intervals,
            Timeline::Empty => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub timeline: Timeline,
    pub tempo: TempoState,
}

pub struct Extractor<'a> {
    stream: &'a ParsedEventStream,
    default_tempo: TempoState,
}

impl<'a> Extractor<'a> {
    pub fn for_stream(stream: &'a ParsedEventStream, default_tempo_micros_per_beat: u32) -> Self {
        Self {
            stream,
            default_tempo: TempoState::new(default_tempo_micros_per_beat),
        }
    }

    /// Pairs note-ons with their note-offs across every track of the stream.
    ///
    /// Intervals come back in discovery order, track after track. Notes still
    /// sounding when their track ends are dropped.
    pub fn run(&self) -> Result<Extraction> {
        let ticks_per_beat = self.stream.ticks_per_beat;
        if ticks_per_beat == 0 {
            return Err(Error::MalformedEvent("ticks per beat is zero".to_owned()));
        }

        let mut tempo = self.default_tempo;
        let mut intervals = Vec::new();
        for (index, events) in self.stream.tracks.iter().enumerate() {
            let track = TrackExtractor::new(index, ticks_per_beat, tempo);
            let (track_intervals, track_tempo) = track.run(events)?;
            debug!(
                track = index,
                notes = track_intervals.len(),
                "extracted track intervals"
            );
            intervals.extend(track_intervals);
            tempo = track_tempo;
        }

        Ok(Extraction {
            timeline: Timeline::from_intervals(intervals),
            tempo,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveNote {
    start_ticks: u64,
    velocity: u8,
}

/// Per-track state: a running tick clock and the notes waiting for their
/// note-off. Consumed by `run`, so nothing leaks into the next track.
struct TrackExtractor {
    index: usize,
    ticks_per_beat: u16,
    ticks: u64,
    tempo: TempoState,
    active_notes: HashMap<u8, ActiveNote>,
    intervals: Vec<NoteInterval>,
}

impl TrackExtractor {
    fn new(index: usize, ticks_per_beat: u16, tempo: TempoState) -> Self {
        Self {
            index,
            ticks_per_beat,
            ticks: 0,
            tempo,
            active_notes: HashMap::new(),
            intervals: Vec::new(),
        }
    }

    fn run(mut self, events: &[TrackEvent]) -> Result<(Vec<NoteInterval>, TempoState)> {
        for event in events {
            self.process_event(event)?;
        }

        if !self.active_notes.is_empty() {
            debug!(
                track = self.index,
                dropped = self.active_notes.len(),
                "dropping unterminated notes"
            );
        }

        Ok((self.intervals, self.tempo))
    }

    fn process_event(&mut self, event: &TrackEvent) -> Result<()> {
        self.ticks += u64::from(event.delta_ticks);
        match event.message {
            Message::SetTempo(micros_per_beat) => {
                self.handle_tempo_change(micros_per_beat);
                Ok(())
            }
            Message::NoteOn(pitch, 0) => self.handle_note_off(pitch),
            Message::NoteOn(pitch, velocity) => self.handle_note_on(pitch, velocity),
            Message::NoteOff(pitch) => self.handle_note_off(pitch),
        }
    }

    fn handle_tempo_change(&mut self, micros_per_beat: u32) {
        self.tempo = TempoState::new(micros_per_beat);
        trace!(track = self.index, bpm = self.tempo.bpm(), "tempo change");
    }

    fn handle_note_on(&mut self, pitch: u8, velocity: u8) -> Result<()> {
        self.check_data_byte("pitch", pitch)?;
        self.check_data_byte("velocity", velocity)?;

        // a retriggered pitch forgets its earlier start
        self.active_notes.insert(
            pitch,
            ActiveNote {
                start_ticks: self.ticks,
                velocity,
            },
        );
        Ok(())
    }

    fn handle_note_off(&mut self, pitch: u8) -> Result<()> {
        self.check_data_byte("pitch", pitch)?;

        if let Some(note) = self.active_notes.remove(&pitch) {
            let tempo = self.tempo.micros_per_beat();
            self.intervals.push(NoteInterval {
                start_seconds: ticks_to_seconds(note.start_ticks, self.ticks_per_beat, tempo),
                end_seconds: ticks_to_seconds(self.ticks, self.ticks_per_beat, tempo),
                pitch,
                velocity: note.velocity,
            });
        }
        Ok(())
    }

    fn check_data_byte(&self, name: &str, value: u8) -> Result<()> {
        if value > MAX_DATA_BYTE {
            return Err(Error::MalformedEvent(format!(
                "{name} {value} out of range on track {}",
                self.index
            )));
        }
        Ok(())
    }
}

/// Converts an absolute tick position to seconds using a single tempo.
pub fn ticks_to_seconds(ticks: u64, ticks_per_beat: u16, tempo: u32) -> f64 {
    // MIDI tempo is in microseconds per quarter note
    let tempo_in_secs = tempo as f64 / MICROS_PER_SEC;
    let beats = ticks as f64 / ticks_per_beat as f64;
    beats * tempo_in_secs
}
