use std::path::Path;

use anyhow::{bail, Context, Result};
use midi_file::core::Message as MidiMessage;
use midi_file::file::{Division, Event, MetaEvent, TrackEvent as MidiTrackEvent};
use midi_file::MidiFile;
use tracing::trace;

use crate::midi_event::{Message, ParsedEventStream, TrackEvent};

/// Reads a Standard MIDI File, keeping only the events the extractor uses.
pub fn load(path: impl AsRef<Path>) -> Result<ParsedEventStream> {
    let path = path.as_ref();
    let midi_file = MidiFile::load(path)
        .with_context(|| format!("load midi file {}", path.display()))?;
    from_midi_file(&midi_file)
}

pub fn from_midi_file(midi_file: &MidiFile) -> Result<ParsedEventStream> {
    // read division to get pulses per quarter note
    let ticks_per_beat = match midi_file.header().division() {
        Division::QuarterNote(qtr) => qtr.get(),
        Division::Smpte(smpte) => bail!("unsupported SMPTE division {:?}", smpte),
    };

    let tracks = midi_file
        .tracks()
        .map(|track| convert_track(track.events()))
        .collect();

    Ok(ParsedEventStream {
        ticks_per_beat,
        tracks,
    })
}

fn convert_track<'a>(track_events: impl Iterator<Item = &'a MidiTrackEvent>) -> Vec<TrackEvent> {
    let mut events = Vec::new();
    // ticks of skipped events still move the clock
    let mut pending_ticks: u32 = 0;

    for track_event in track_events {
        pending_ticks = pending_ticks.saturating_add(track_event.delta_time());
        if let Some(message) = convert_event(track_event.event()) {
            events.push(TrackEvent::new(pending_ticks, message));
            pending_ticks = 0;
        }
    }

    events
}

fn convert_event(event: &Event) -> Option<Message> {
    match event {
        Event::Midi(MidiMessage::NoteOn(note)) => Some(Message::NoteOn(
            note.note_number().get(),
            note.velocity().get(),
        )),
        Event::Midi(MidiMessage::NoteOff(note)) => {
            Some(Message::NoteOff(note.note_number().get()))
        }
        Event::Meta(MetaEvent::SetTempo(tempo)) => Some(Message::SetTempo(tempo.get())),
        _ => {
            trace!("skipping event {:?}", event);
            None
        }
    }
}
