//! Panel controls: knob values the takeover layer and the user both write

use serde::{Deserialize, Serialize};

use crate::sequencer::MAX_STEPS;

/// A clamped knob value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlParam {
    pub name: &'static str,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ControlParam {
    pub fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            value: default.clamp(min, max),
            min,
            max,
            default,
        }
    }

    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    /// Truncated integer reading, as the trigger path sees it
    pub fn as_int(&self) -> i64 {
        self.value as i64
    }
}

/// Identifies a single knob value held by [`PanelParams`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    StepCount,
    Root,
    Scale,
    Spread,
    Randomize,
}

/// Starting knob positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelDefaults {
    pub step_count: f32,
    pub root: f32,
    /// None starts on the catalog's default scale
    pub scale: Option<f32>,
    pub spread: f32,
}

impl Default for PanelDefaults {
    fn default() -> Self {
        Self {
            step_count: 8.0,
            root: 24.0,
            scale: None,
            spread: 0.0,
        }
    }
}

/// The global knobs; per-step degrees live on the sequencer's steps
#[derive(Debug, Clone)]
pub struct PanelParams {
    pub step_count: ControlParam,
    pub root: ControlParam,
    pub scale: ControlParam,
    pub spread: ControlParam,
    pub randomize: ControlParam,
}

impl PanelParams {
    pub fn new(scale_count: usize, default_scale: usize, defaults: &PanelDefaults) -> Self {
        let max_scale = scale_count.saturating_sub(1) as f32;
        let scale_default = defaults.scale.unwrap_or(default_scale as f32);
        Self {
            step_count: ControlParam::new("Seq Length", 1.0, MAX_STEPS as f32, defaults.step_count),
            root: ControlParam::new("Root Note", 0.0, 60.0, defaults.root),
            scale: ControlParam::new("Scale Type", 0.0, max_scale, scale_default),
            spread: ControlParam::new("Voice Spread", 0.0, 1.0, defaults.spread),
            randomize: ControlParam::new("Randomize Seq", 0.0, 1.0, 0.0),
        }
    }

    pub fn get(&self, id: ParamId) -> &ControlParam {
        match id {
            ParamId::StepCount => &self.step_count,
            ParamId::Root => &self.root,
            ParamId::Scale => &self.scale,
            ParamId::Spread => &self.spread,
            ParamId::Randomize => &self.randomize,
        }
    }

    pub fn get_mut(&mut self, id: ParamId) -> &mut ControlParam {
        match id {
            ParamId::StepCount => &mut self.step_count,
            ParamId::Root => &mut self.root,
            ParamId::Scale => &mut self.scale,
            ParamId::Spread => &mut self.spread,
            ParamId::Randomize => &mut self.randomize,
        }
    }

    /// Manual write, clamped to the knob's range
    pub fn set(&mut self, id: ParamId, value: f32) {
        self.get_mut(id).set(value);
    }

    pub fn step_count(&self) -> usize {
        self.step_count.as_int().clamp(1, MAX_STEPS as i64) as usize
    }

    pub fn root_semitone(&self) -> i64 {
        self.root.as_int()
    }

    pub fn scale_index(&self) -> i64 {
        self.scale.as_int()
    }

    pub fn spread(&self) -> f32 {
        self.spread.get().clamp(0.0, 1.0)
    }
}
