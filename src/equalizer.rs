use tracing::debug;

use crate::piano_roll::{PianoRoll, PITCH_COUNT};

pub const DEFAULT_THRESHOLD: usize = 2515;

/// `len` piano rolls of identical width, stored item by item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    len: usize,
    threshold: usize,
    cells: Vec<u8>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.len, PITCH_COUNT, self.threshold)
    }

    /// The `PITCH_COUNT × threshold` cells of one item.
    pub fn item(&self, index: usize) -> &[u8] {
        let size = PITCH_COUNT * self.threshold;
        &self.cells[index * size..(index + 1) * size]
    }

    pub fn get(&self, index: usize, pitch: usize, step: usize) -> u8 {
        self.item(index)[pitch * self.threshold + step]
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

/// Brings every roll to exactly `threshold` steps.
///
/// Long rolls keep their first `threshold` steps. Short rolls are repeated
/// end to end until they reach `threshold`. A roll with no steps at all
/// has nothing to repeat and comes out silent.
pub fn equalize(rolls: &[PianoRoll], threshold: usize) -> Batch {
    let mut cells = Vec::with_capacity(rolls.len() * PITCH_COUNT * threshold);
    for roll in rolls {
        let steps = roll.steps();
        if steps >= threshold {
            for pitch in 0..PITCH_COUNT {
                cells.extend_from_slice(&roll.row(pitch)[..threshold]);
            }
        } else if steps == 0 {
            debug!(threshold, "silent piano roll");
            cells.resize(cells.len() + PITCH_COUNT * threshold, 0);
        } else {
            debug!(steps, threshold, "tiling short piano roll");
            for pitch in 0..PITCH_COUNT {
                cells.extend(roll.row(pitch).iter().cycle().take(threshold));
            }
        }
    }

    Batch {
        len: rolls.len(),
        threshold,
        cells,
    }
}
