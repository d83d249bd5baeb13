//! Minimal-movement voice reassignment.
//!
//! Each previous voice, in order, takes the nearest octave placement of a
//! target pitch class that no earlier voice has claimed. Once every pitch
//! class is claimed, later voices may double any of them. The matching is
//! greedy, so it is not guaranteed to minimise the total movement.

use arrayvec::ArrayVec;

use crate::stacker::{ChordTones, Voicing};

/// MIDI note that 0 V stands for (C4)
pub const REFERENCE_NOTE: f32 = 60.0;

#[derive(Debug, Clone, Copy)]
pub struct VoiceLeadingEngine {
    reference: f32,
}

impl Default for VoiceLeadingEngine {
    fn default() -> Self {
        Self::new(REFERENCE_NOTE)
    }
}

impl VoiceLeadingEngine {
    pub fn new(reference: f32) -> Self {
        Self { reference }
    }

    /// Move each voice of `previous` onto the chord `target_root + target_intervals`.
    ///
    /// Repeated pitch classes in the target collapse to one. Ties go to the
    /// pitch class listed first. An empty target leaves the voicing unchanged.
    pub fn reassign(
        &self,
        previous: &Voicing,
        target_root: i32,
        target_intervals: &[i32],
    ) -> Voicing {
        let mut targets: ArrayVec<i32, 12> = ArrayVec::new();
        for interval in target_intervals {
            let pc = (target_root + interval).rem_euclid(12);
            if !targets.contains(&pc) {
                targets.push(pc);
            }
        }
        if targets.is_empty() {
            return *previous;
        }

        let mut used = [false; 12];
        let mut claimed = 0;
        let mut next = *previous;

        for voltage in next.0.iter_mut() {
            let note = *voltage * 12.0 + self.reference;
            let exhausted = claimed == targets.len();

            let mut best: Option<(usize, f32, f32)> = None;
            for (slot, &pc) in targets.iter().enumerate() {
                if !exhausted && used[slot] {
                    continue;
                }
                let pc = pc as f32;
                let candidate = ((note - pc) / 12.0).round() * 12.0 + pc;
                let distance = (candidate - note).abs();
                if best.is_none_or(|(_, _, d)| distance < d) {
                    best = Some((slot, candidate, distance));
                }
            }

            if let Some((slot, candidate, _)) = best {
                if !used[slot] {
                    used[slot] = true;
                    claimed += 1;
                }
                *voltage = (candidate - self.reference) / 12.0;
            }
        }

        next
    }

    /// [`Self::reassign`] towards a stacked chord
    pub fn lead_to(&self, previous: &Voicing, tones: &ChordTones) -> Voicing {
        self.reassign(previous, tones.root, &tones.intervals)
    }
}
