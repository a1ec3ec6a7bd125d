use crate::error::{Error, Result};
use crate::midi_event::NoteInterval;

pub const PITCH_COUNT: usize = 128;
pub const DEFAULT_FS: u32 = 10;
/// Widest roll `rasterize` builds: a little over 116 hours at 10 steps per
/// second, 512 MiB of cells.
pub const MAX_STEPS: usize = 1 << 22;

/// A (pitch × step) velocity matrix, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PianoRoll {
    steps: usize,
    cells: Vec<u8>,
}

impl PianoRoll {
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            cells: vec![0; PITCH_COUNT * steps],
        }
    }

    #[cfg(test)]
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        assert_eq!(rows.len(), PITCH_COUNT, "a piano roll has one row per pitch");
        let steps = rows[0].len();
        let mut cells = Vec::with_capacity(PITCH_COUNT * steps);
        for row in rows {
            assert_eq!(row.len(), steps, "piano roll rows must have equal length");
            cells.extend_from_slice(row);
        }
        Self { steps, cells }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn shape(&self) -> (usize, usize) {
        (PITCH_COUNT, self.steps)
    }

    pub fn row(&self, pitch: usize) -> &[u8] {
        &self.cells[pitch * self.steps..(pitch + 1) * self.steps]
    }

    pub fn get(&self, pitch: usize, step: usize) -> u8 {
        self.row(pitch)[step]
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    fn fill(&mut self, pitch: usize, start: usize, end: usize, velocity: u8) {
        let offset = pitch * self.steps;
        self.cells[offset + start..offset + end].fill(velocity);
    }
}

/// Rasterizes `intervals` at `fs` steps per second.
///
/// The width comes from the last interval in list order, truncated to whole
/// seconds. Later intervals overwrite earlier ones where they overlap, and
/// anything reaching past the width is cut off. Widths above `MAX_STEPS`
/// fail with `TimelineTooLong`.
pub fn rasterize(intervals: &[NoteInterval], fs: u32) -> Result<PianoRoll> {
    let last = intervals.last().ok_or(Error::EmptyTimeline)?;
    let seconds = last.end_seconds.floor();
    let steps = (seconds as usize)
        .checked_mul(fs as usize)
        .filter(|&steps| steps <= MAX_STEPS)
        .ok_or(Error::TimelineTooLong { seconds, fs })?;
    let mut roll = PianoRoll::new(steps);

    for interval in intervals {
        let start = to_step(interval.start_seconds, fs).min(steps);
        let end = to_step(interval.end_seconds, fs).min(steps);
        if start < end {
            roll.fill(interval.pitch as usize, start, end, interval.velocity);
        }
    }

    Ok(roll)
}

// negative and NaN times saturate to step 0
fn to_step(seconds: f64, fs: u32) -> usize {
    (seconds * fs as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(start: f64, end: f64, pitch: u8, velocity: u8) -> NoteInterval {
        NoteInterval {
            start_seconds: start,
            end_seconds: end,
            pitch,
            velocity,
        }
    }

    #[test]
    fn test_single_second_note() {
        let roll = rasterize(&[note(0.0, 1.0, 60, 100)], 10).unwrap();
        assert_eq!(roll.shape(), (128, 10));
        assert!(roll.row(60).iter().all(|&v| v == 100));
        assert_eq!(roll.active_cells(), 10);
    }

    #[test]
    fn test_empty_timeline_fails() {
        assert!(matches!(rasterize(&[], 10), Err(Error::EmptyTimeline)));
    }

    #[test]
    fn test_width_floors_last_end() {
        let roll = rasterize(&[note(0.0, 2.7, 60, 100)], 10).unwrap();
        assert_eq!(roll.steps(), 20);
        assert_eq!(roll.active_cells(), 20);
    }

    #[test]
    fn test_width_uses_last_listed_interval() {
        let roll = rasterize(&[note(0.0, 3.0, 50, 90), note(0.5, 1.0, 52, 80)], 10).unwrap();
        assert_eq!(roll.steps(), 10);
        assert_eq!(roll.get(50, 9), 90);
        assert_eq!(roll.get(52, 4), 0);
        assert_eq!(roll.get(52, 5), 80);
    }

    #[test]
    fn test_later_intervals_overwrite() {
        let roll = rasterize(&[note(0.0, 1.0, 60, 100), note(0.5, 1.0, 60, 40)], 10).unwrap();
        assert_eq!(roll.get(60, 4), 100);
        assert_eq!(roll.get(60, 5), 40);
        assert_eq!(roll.get(60, 9), 40);
    }

    #[test]
    fn test_huge_timeline_is_rejected() {
        // one tick per beat at the slowest tempo, note-off 0x0FFF_FFFF ticks in
        let end = 0x0FFF_FFFF as f64 * 16_777_215.0 / 1_000_000.0;
        let result = rasterize(&[note(0.0, end, 60, 100)], DEFAULT_FS);
        assert!(matches!(result, Err(Error::TimelineTooLong { .. })));
    }

    #[test]
    fn test_step_count_overflow_is_rejected() {
        let result = rasterize(&[note(0.0, 1e15, 60, 100)], u32::MAX);
        assert!(matches!(result, Err(Error::TimelineTooLong { .. })));
        let result = rasterize(&[note(0.0, f64::INFINITY, 60, 100)], 1);
        assert!(matches!(result, Err(Error::TimelineTooLong { .. })));
    }

    #[test]
    fn test_one_step_past_limit_is_rejected() {
        let end = (MAX_STEPS + 1) as f64;
        let result = rasterize(&[note(0.0, end, 60, 100)], 1);
        assert!(matches!(result, Err(Error::TimelineTooLong { .. })));
    }

    #[test]
    fn test_sub_second_timeline_has_no_steps() {
        let roll = rasterize(&[note(0.0, 0.9, 60, 100)], 10).unwrap();
        assert_eq!(roll.steps(), 0);
        assert!(roll.cells().is_empty());
    }

    #[test]
    fn test_steps_are_rounded() {
        let roll = rasterize(&[note(0.04, 0.16, 10, 7), note(0.0, 1.0, 0, 1)], 10).unwrap();
        assert_eq!(roll.get(10, 0), 7);
        assert_eq!(roll.get(10, 1), 7);
        assert_eq!(roll.get(10, 2), 0);
        assert_eq!(roll.active_cells(), 12);

        let roll = rasterize(&[note(0.06, 0.26, 10, 7), note(0.0, 1.0, 0, 1)], 10).unwrap();
        assert_eq!(roll.get(10, 0), 0);
        assert_eq!(roll.get(10, 1), 7);
        assert_eq!(roll.get(10, 2), 7);
        assert_eq!(roll.get(10, 3), 0);
    }
}
