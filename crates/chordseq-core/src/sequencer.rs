//! 16-step sequencer: step slots, playhead, advance/reset/randomize

use serde::{Deserialize, Serialize};

/// Number of step slots, fixed for the module's lifetime
pub const MAX_STEPS: usize = 16;
/// Highest scale degree a step can hold
pub const MAX_DEGREE: u8 = 6;

/// Fourth-voice flavour of a step.
///
/// Each variant picks the scale-step offset of the fourth voice stacked on
/// top of the root/third/fifth triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    /// Six scale steps up (the seventh)
    #[default]
    Seventh,
    /// Doubled root
    Root,
    /// Five scale steps up (the sixth)
    Sixth,
    /// Eight scale steps up (the ninth)
    Ninth,
    /// Ten scale steps up (the eleventh)
    Eleventh,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Self::Seventh,
        Self::Root,
        Self::Sixth,
        Self::Ninth,
        Self::Eleventh,
    ];

    /// Quality by table position; anything unknown falls back to the first entry
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(self) -> usize {
        match self {
            Self::Seventh => 0,
            Self::Root => 1,
            Self::Sixth => 2,
            Self::Ninth => 3,
            Self::Eleventh => 4,
        }
    }

    /// Weighted pick from a uniform draw in `[0, 1)`: 40/10/20/20/10 percent
    pub fn from_draw(r: f32) -> Self {
        if r < 0.4 {
            Self::Seventh
        } else if r < 0.5 {
            Self::Root
        } else if r < 0.7 {
            Self::Sixth
        } else if r < 0.9 {
            Self::Ninth
        } else {
            Self::Eleventh
        }
    }

    /// Scale-step offset of the fourth voice
    pub fn fourth_voice_offset(self) -> usize {
        match self {
            Self::Seventh => 6,
            Self::Root => 0,
            Self::Sixth => 5,
            Self::Ninth => 8,
            Self::Eleventh => 10,
        }
    }

    /// Suffix appended to the chord symbol on the display
    pub fn extension(self) -> &'static str {
        match self {
            Self::Sixth => "6",
            Self::Ninth => "9",
            Self::Eleventh => "11",
            Self::Seventh | Self::Root => "",
        }
    }
}

/// Source of uniform random numbers in `[0, 1)`
pub trait RandomSource {
    fn uniform(&mut self) -> f32;
}

impl RandomSource for fastrand::Rng {
    fn uniform(&mut self) -> f32 {
        self.f32()
    }
}

/// One step slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Step {
    pub degree: u8,
    pub quality: Quality,
}

impl Step {
    pub fn new(degree: u8, quality: Quality) -> Self {
        Self {
            degree: degree.min(MAX_DEGREE),
            quality,
        }
    }
}

/// Step slots plus the playhead
#[derive(Debug, Clone)]
pub struct StepSequencer {
    steps: [Step; MAX_STEPS],
    current_step: usize,
    step_count: usize,
    forced_edge: bool,
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self {
            steps: std::array::from_fn(|i| Step::new((i % 7) as u8, Quality::default())),
            current_step: 0,
            step_count: 8,
            forced_edge: false,
        }
    }
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step; MAX_STEPS] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The step under the playhead
    pub fn current(&self) -> &Step {
        &self.steps[self.current_step % MAX_STEPS]
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Active sequence length, clamped to `[1, 16]`
    pub fn set_step_count(&mut self, count: usize) {
        self.step_count = count.clamp(1, MAX_STEPS);
    }

    pub fn set_degree(&mut self, index: usize, degree: u8) {
        if let Some(step) = self.steps.get_mut(index) {
            step.degree = degree.min(MAX_DEGREE);
        }
    }

    pub fn set_quality(&mut self, index: usize, quality: Quality) {
        if let Some(step) = self.steps.get_mut(index) {
            step.quality = quality;
        }
    }

    pub fn set_steps(&mut self, steps: [Step; MAX_STEPS]) {
        self.steps = steps.map(|s| Step::new(s.degree, s.quality));
    }

    /// Move the playhead one step on a trigger
    pub fn advance(&mut self, did_trigger: bool) {
        if did_trigger {
            self.current_step = (self.current_step + 1) % self.step_count;
        }
    }

    /// Back to step 0, arming an immediate recompute
    pub fn reset(&mut self) {
        self.current_step = 0;
        self.forced_edge = true;
        tracing::trace!("Sequencer reset");
    }

    /// Consume the edge armed by [`Self::reset`]
    pub fn take_forced_edge(&mut self) -> bool {
        std::mem::take(&mut self.forced_edge)
    }

    /// Overwrite all 16 steps with random degrees and weighted qualities
    pub fn randomize(&mut self, rng: &mut impl RandomSource) {
        for step in self.steps.iter_mut() {
            step.degree = (rng.uniform() * MAX_DEGREE as f32).round() as u8;
            step.quality = Quality::from_draw(rng.uniform());
        }
        tracing::trace!("Sequencer randomized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_never_moves() {
        let mut seq = StepSequencer::new();
        seq.set_step_count(1);
        for _ in 0..50 {
            seq.advance(true);
            assert_eq!(seq.current_step(), 0);
        }
    }

    #[test]
    fn test_advance_cycles_through_step_count() {
        for count in 1..=MAX_STEPS {
            let mut seq = StepSequencer::new();
            seq.set_step_count(count);
            let mut visited = Vec::new();
            for _ in 0..count {
                seq.advance(true);
                visited.push(seq.current_step());
            }
            let mut distinct = visited.clone();
            distinct.sort();
            distinct.dedup();
            assert_eq!(distinct.len(), count);
            assert!(visited.iter().all(|&s| s < count));
            // Period is exactly `count`
            seq.advance(true);
            assert_eq!(seq.current_step(), visited[0]);
        }
    }

    #[test]
    fn test_advance_without_trigger_is_noop() {
        let mut seq = StepSequencer::new();
        seq.advance(false);
        assert_eq!(seq.current_step(), 0);
    }

    #[test]
    fn test_shrinking_step_count_wraps_on_next_advance() {
        let mut seq = StepSequencer::new();
        seq.set_step_count(16);
        for _ in 0..10 {
            seq.advance(true);
        }
        seq.set_step_count(4);
        seq.advance(true);
        assert_eq!(seq.current_step(), 11 % 4);
    }

    #[test]
    fn test_step_count_is_clamped() {
        let mut seq = StepSequencer::new();
        seq.set_step_count(0);
        assert_eq!(seq.step_count(), 1);
        seq.set_step_count(99);
        assert_eq!(seq.step_count(), 16);
    }

    #[test]
    fn test_reset_arms_forced_edge_once() {
        let mut seq = StepSequencer::new();
        seq.advance(true);
        seq.advance(true);
        seq.reset();
        assert_eq!(seq.current_step(), 0);
        assert!(seq.take_forced_edge());
        assert!(!seq.take_forced_edge());
    }

    #[test]
    fn test_randomize_quality_distribution() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut seq = StepSequencer::new();
        let mut counts = [0usize; 5];
        let rounds = 1000;
        for _ in 0..rounds {
            seq.randomize(&mut rng);
            for step in seq.steps() {
                counts[step.quality.index()] += 1;
                assert!(step.degree <= MAX_DEGREE);
            }
        }
        let total = (rounds * MAX_STEPS) as f64;
        let expected = [0.40, 0.10, 0.20, 0.20, 0.10];
        for (count, want) in counts.iter().zip(expected) {
            let freq = *count as f64 / total;
            assert!((freq - want).abs() < 0.02, "got {freq}, want {want}");
        }
    }

    #[test]
    fn test_randomize_is_reproducible() {
        let mut a = StepSequencer::new();
        let mut b = StepSequencer::new();
        a.randomize(&mut fastrand::Rng::with_seed(42));
        b.randomize(&mut fastrand::Rng::with_seed(42));
        assert_eq!(a.steps(), b.steps());
    }

    #[test]
    fn test_randomize_overwrites_beyond_step_count() {
        struct Fixed(f32);
        impl RandomSource for Fixed {
            fn uniform(&mut self) -> f32 {
                self.0
            }
        }
        let mut seq = StepSequencer::new();
        seq.set_step_count(2);
        seq.randomize(&mut Fixed(0.95));
        assert!(seq.steps().iter().all(|s| *s == Step::new(6, Quality::Eleventh)));
    }

    #[test]
    fn test_quality_table() {
        assert_eq!(Quality::from_index(3), Quality::Ninth);
        assert_eq!(Quality::from_index(17), Quality::Seventh);
        assert_eq!(Quality::from_draw(0.0), Quality::Seventh);
        assert_eq!(Quality::from_draw(0.45), Quality::Root);
        assert_eq!(Quality::from_draw(0.5), Quality::Sixth);
        assert_eq!(Quality::from_draw(0.89), Quality::Ninth);
        assert_eq!(Quality::from_draw(0.9), Quality::Eleventh);
        let offsets: Vec<usize> = Quality::ALL.iter().map(|q| q.fourth_voice_offset()).collect();
        assert_eq!(offsets, vec![6, 0, 5, 8, 10]);
    }
}
