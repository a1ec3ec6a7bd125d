use anyhow::anyhow;

use midi2pianoroll::config::PipelineConfig;
use midi2pianoroll::driver::{self, SourceItem};
use midi2pianoroll::midi_event::{Message, ParsedEventStream, TrackEvent};

// Two tracks sharing one timeline: the tempo track doubles the beat length
// before the melody track's notes are converted.
fn two_track_song() -> ParsedEventStream {
    ParsedEventStream {
        ticks_per_beat: 480,
        tracks: vec![
            vec![TrackEvent::new(0, Message::SetTempo(1_000_000))],
            vec![
                TrackEvent::new(0, Message::NoteOn(60, 90)),
                TrackEvent::new(480, Message::NoteOff(60)),
                TrackEvent::new(0, Message::NoteOn(64, 70)),
                TrackEvent::new(960, Message::NoteOn(64, 0)),
            ],
        ],
    }
}

#[test]
fn test_batch_from_labelled_streams() {
    let config = PipelineConfig {
        threshold: 50,
        ..PipelineConfig::default()
    };
    let items = vec![
        SourceItem::new("Beethoven_0", "Beethoven", Ok(two_track_song())),
        SourceItem::new("missing.mid", "Bach", Err(anyhow!("no such file"))),
        SourceItem::new("Chopin_0", "Chopin", Ok(two_track_song())),
    ];

    let output = driver::run(items, &config);
    assert_eq!(output.batch.shape(), (2, 128, 50));
    assert_eq!(output.composer_classes, vec![2, 3]);
    assert_eq!(output.identifiers, vec!["Beethoven_0", "Chopin_0"]);

    // 3 s at 10 steps per second, tiled to 50: C4 for 1 s then E4 for 2 s
    let item = 0;
    assert_eq!(output.batch.get(item, 60, 0), 90);
    assert_eq!(output.batch.get(item, 60, 9), 90);
    assert_eq!(output.batch.get(item, 60, 10), 0);
    assert_eq!(output.batch.get(item, 64, 10), 70);
    assert_eq!(output.batch.get(item, 64, 29), 70);
    assert_eq!(output.batch.get(item, 60, 30), 90);
    assert_eq!(output.batch.get(item, 64, 49), 70);
    assert_eq!(output.batch.item(0), output.batch.item(1));
}

#[test]
fn test_default_config() {
    let config = PipelineConfig::default();
    assert_eq!(config.default_tempo, 500_000);
    assert_eq!(config.fs, 10);
    assert_eq!(config.threshold, 2515);

    let output = driver::run(vec![SourceItem::new("Bach_0", "Bach", Ok(two_track_song()))], &config);
    assert_eq!(output.batch.shape(), (1, 128, 2515));
}
