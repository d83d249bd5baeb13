//! Rising-edge detection with hysteresis

use serde::{Deserialize, Serialize};

use crate::error::{ChordSeqError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchmittState {
    Low,
    High,
    Uninitialized,
}

/// Edge detector thresholds in volts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub low: f32,
    pub high: f32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self { low: 0.1, high: 1.0 }
    }
}

impl TriggerConfig {
    /// Both thresholds finite with `low < high`, otherwise the detector chatters
    pub fn validate(&self) -> Result<()> {
        if self.low.is_finite() && self.high.is_finite() && self.low < self.high {
            Ok(())
        } else {
            Err(ChordSeqError::InvalidThresholds {
                low: self.low,
                high: self.high,
            })
        }
    }
}

/// Schmitt trigger that reports low-to-high transitions
#[derive(Debug, Clone, Copy)]
pub struct SchmittTrigger {
    state: SchmittState,
    low_threshold: f32,
    high_threshold: f32,
}

impl SchmittTrigger {
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            state: SchmittState::Uninitialized,
            low_threshold,
            high_threshold,
        }
    }

    pub fn from_config(config: TriggerConfig) -> Self {
        Self::new(config.low, config.high)
    }

    /// Process one sample; true on a rising edge.
    /// The first sample only sets the state, it never fires.
    pub fn process(&mut self, input: f32) -> bool {
        match self.state {
            SchmittState::Uninitialized => {
                self.state = if input >= self.high_threshold {
                    SchmittState::High
                } else {
                    SchmittState::Low
                };
            }
            SchmittState::High => {
                if input <= self.low_threshold {
                    self.state = SchmittState::Low;
                }
            }
            SchmittState::Low => {
                if input >= self.high_threshold {
                    self.state = SchmittState::High;
                    return true;
                }
            }
        }
        false
    }

    pub fn state(&self) -> SchmittState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = SchmittState::Uninitialized;
    }
}

impl Default for SchmittTrigger {
    fn default() -> Self {
        Self::from_config(TriggerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_edge_fires_once() {
        let mut trig = SchmittTrigger::default();
        assert!(!trig.process(0.0));
        assert!(trig.process(10.0));
        assert!(!trig.process(10.0));
        assert!(!trig.process(5.0));
        assert!(!trig.process(0.0));
        assert!(trig.process(10.0));
    }

    #[test]
    fn test_first_sample_high_does_not_fire() {
        let mut trig = SchmittTrigger::default();
        assert!(!trig.process(10.0));
        assert_eq!(trig.state(), SchmittState::High);
        assert!(!trig.process(10.0));
    }

    #[test]
    fn test_hysteresis_band() {
        let mut trig = SchmittTrigger::new(0.1, 1.0);
        trig.process(0.0);
        assert!(trig.process(1.0));
        // Dipping into the band does not re-arm
        assert!(!trig.process(0.5));
        assert!(!trig.process(1.0));
        assert!(!trig.process(0.1));
        assert!(trig.process(1.2));
    }

    #[test]
    fn test_reset_returns_to_uninitialized() {
        let mut trig = SchmittTrigger::default();
        trig.process(0.0);
        trig.reset();
        assert_eq!(trig.state(), SchmittState::Uninitialized);
        assert!(!trig.process(10.0));
    }

    #[test]
    fn test_config_validation() {
        assert!(TriggerConfig::default().validate().is_ok());
        let inverted = TriggerConfig { low: 2.0, high: 0.5 };
        assert!(matches!(
            inverted.validate(),
            Err(ChordSeqError::InvalidThresholds { .. })
        ));
        assert!(TriggerConfig { low: 1.0, high: 1.0 }.validate().is_err());
        assert!(TriggerConfig { low: f32::NAN, high: 1.0 }.validate().is_err());
        assert!(TriggerConfig { low: 0.1, high: f32::INFINITY }.validate().is_err());
    }
}
