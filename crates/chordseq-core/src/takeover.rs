//! Absolute CV takeover: a patched CV input replaces its knob's value

use crate::params::PanelParams;
use crate::sequencer::MAX_STEPS;

/// CV for the takeover-capable knobs; `None` means the jack is unpatched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TakeoverInputs {
    pub steps: Option<f32>,
    pub spread: Option<f32>,
    pub root: Option<f32>,
    pub scale: Option<f32>,
}

/// Maps CV voltages onto knob values, overwriting rather than summing
#[derive(Debug, Clone, Copy)]
pub struct CvTakeover {
    max_scale: f32,
}

impl CvTakeover {
    pub fn new(scale_count: usize) -> Self {
        Self {
            max_scale: scale_count.saturating_sub(1) as f32,
        }
    }

    /// 1 V per step
    pub fn steps(volts: f32) -> f32 {
        volts.clamp(1.0, MAX_STEPS as f32)
    }

    /// 0-10 V covers 0-100 %
    pub fn spread(volts: f32) -> f32 {
        (volts / 10.0).clamp(0.0, 1.0)
    }

    /// 1 V/oct, 0-5 V covers semitones 0-60
    pub fn root(volts: f32) -> f32 {
        (volts * 12.0).clamp(0.0, 60.0)
    }

    /// 0-10 V spans the whole catalog
    pub fn scale(&self, volts: f32) -> f32 {
        (volts / 10.0 * self.max_scale).clamp(0.0, self.max_scale)
    }

    /// Run once per tick, before edges are evaluated
    pub fn apply(&self, inputs: &TakeoverInputs, params: &mut PanelParams) {
        if let Some(v) = inputs.steps {
            params.step_count.set(Self::steps(v));
        }
        if let Some(v) = inputs.spread {
            params.spread.set(Self::spread(v));
        }
        if let Some(v) = inputs.root {
            params.root.set(Self::root(v));
        }
        if let Some(v) = inputs.scale {
            params.scale.set(self.scale(v));
        }
    }
}
