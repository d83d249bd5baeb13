//! Scale catalog: the immutable registry of named pitch-class sets

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::{ChordSeqError, Result};

/// Fewest notes a scale may hold
pub const MIN_SCALE_LEN: usize = 5;
/// Most notes a scale may hold
pub const MAX_SCALE_LEN: usize = 8;

/// Built-in scales, in panel order
const BUILTIN_SCALES: &[(&str, &[u8])] = &[
    ("Tritone", &[0, 1, 4, 6, 7, 10]),
    ("Two-Semi Tritone", &[0, 1, 2, 6, 7, 8]),
    ("Major (Ionian)", &[0, 2, 4, 5, 7, 9, 11]),
    ("Major Pentatonic", &[0, 2, 4, 7, 9]),
    ("Major Bebop", &[0, 2, 4, 5, 7, 8, 9, 11]),
    ("Major Locrian", &[0, 2, 4, 5, 6, 8, 10]),
    ("Natural Minor", &[0, 2, 3, 5, 7, 8, 10]),
    ("Minor Pentatonic", &[0, 3, 5, 7, 10]),
    ("Harmonic Minor", &[0, 2, 3, 5, 7, 8, 11]),
    ("Melodic Minor", &[0, 2, 3, 5, 7, 9, 11]),
    ("Dorian", &[0, 2, 3, 5, 7, 9, 10]),
    ("Phrygian", &[0, 1, 3, 5, 7, 8, 10]),
    ("Lydian", &[0, 2, 4, 6, 7, 9, 11]),
    ("Mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
    ("Locrian", &[0, 1, 3, 5, 6, 8, 10]),
    ("Lydian Dominant", &[0, 2, 4, 6, 7, 9, 10]),
    ("Lydian Augmented", &[0, 2, 4, 6, 8, 9, 11]),
    ("Lydian Diminished", &[0, 2, 3, 6, 7, 9, 11]),
    ("Phrygian Dominant", &[0, 1, 4, 5, 7, 8, 10]),
    ("Locrian Nat6", &[0, 1, 3, 5, 6, 9, 10]),
    ("Super Locrian", &[0, 1, 3, 4, 6, 8, 10]),
    ("Blues", &[0, 3, 5, 6, 7, 10]),
    ("Double Harmonic", &[0, 1, 4, 5, 7, 8, 11]),
    ("Hungarian Minor", &[0, 2, 3, 6, 7, 8, 11]),
    ("Hungarian Major", &[0, 3, 4, 6, 7, 9, 10]),
    ("Persian", &[0, 1, 4, 5, 6, 8, 11]),
    ("Hirajoshi", &[0, 2, 3, 7, 8]),
    ("Iwato", &[0, 1, 5, 6, 10]),
    ("In Sen", &[0, 1, 5, 7, 10]),
    ("Yo", &[0, 2, 5, 7, 9]),
    ("Whole Tone", &[0, 2, 4, 6, 8, 10]),
    ("Augmented", &[0, 3, 4, 7, 8, 11]),
    ("Octatonic (H-W)", &[0, 1, 3, 4, 6, 7, 9, 10]),
    ("Enigmatic", &[0, 1, 4, 6, 8, 10, 11]),
    ("Prometheus", &[0, 2, 4, 6, 9, 10]),
    ("Harmonic Major", &[0, 2, 4, 5, 7, 8, 11]),
    ("Neapolitan Maj", &[0, 1, 3, 5, 7, 9, 11]),
    ("Neapolitan Min", &[0, 1, 3, 5, 7, 8, 11]),
    ("Bebop Dominant", &[0, 2, 4, 5, 7, 9, 10, 11]),
    ("Algerian", &[0, 2, 3, 5, 6, 7, 8, 11]),
    ("Ukrainian Dorian", &[0, 2, 3, 6, 7, 9, 10]),
    ("Istrian", &[0, 1, 3, 4, 6, 7]),
];

/// Name of the scale the panel starts on
pub const DEFAULT_SCALE_NAME: &str = "Major (Ionian)";

/// An ordered, strictly ascending set of pitch classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    name: String,
    pitch_classes: ArrayVec<u8, MAX_SCALE_LEN>,
}

impl Scale {
    /// Build a scale, checking length, range and ordering
    pub fn new(name: impl Into<String>, pitch_classes: &[u8]) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| ChordSeqError::InvalidScale {
            name: name.clone(),
            reason,
        };

        if !(MIN_SCALE_LEN..=MAX_SCALE_LEN).contains(&pitch_classes.len()) {
            return Err(invalid(format!(
                "expected {MIN_SCALE_LEN}-{MAX_SCALE_LEN} notes, got {}",
                pitch_classes.len()
            )));
        }
        if let Some(&pc) = pitch_classes.iter().find(|&&pc| pc > 11) {
            return Err(invalid(format!("pitch class {pc} is outside 0-11")));
        }
        if pitch_classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("pitch classes must be strictly ascending".to_string()));
        }

        Ok(Self::from_table(name, pitch_classes))
    }

    /// Built-in table entries are checked by the catalog tests.
    fn from_table(name: String, pitch_classes: &[u8]) -> Self {
        Self {
            name,
            pitch_classes: pitch_classes.iter().copied().take(MAX_SCALE_LEN).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pitch_classes(&self) -> &[u8] {
        &self.pitch_classes
    }

    pub fn len(&self) -> usize {
        self.pitch_classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitch_classes.is_empty()
    }

    /// Pitch class at a scale degree, wrapping modulo the scale length
    pub fn pitch_class(&self, degree: usize) -> u8 {
        self.pitch_classes[degree % self.len()]
    }

    /// Fold a raw scale-step index into (pitch class, octave shift)
    pub fn fold(&self, raw_index: usize) -> (u8, usize) {
        let len = self.len();
        (self.pitch_classes[raw_index % len], raw_index / len)
    }
}

/// Serializable description of a user scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDefinition {
    pub name: String,
    pub pitch_classes: Vec<u8>,
}

impl TryFrom<&ScaleDefinition> for Scale {
    type Error = ChordSeqError;

    fn try_from(def: &ScaleDefinition) -> Result<Self> {
        Scale::new(def.name.clone(), &def.pitch_classes)
    }
}

/// Registry of scales, never empty, read-only once built
#[derive(Debug, Clone)]
pub struct ScaleCatalog {
    scales: Vec<Scale>,
}

impl Default for ScaleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScaleCatalog {
    /// The built-in catalog
    pub fn builtin() -> Self {
        let scales = BUILTIN_SCALES
            .iter()
            .map(|(name, pcs)| Scale::from_table((*name).to_string(), pcs))
            .collect();
        Self { scales }
    }

    /// A catalog holding exactly the given scales
    pub fn with_scales(scales: Vec<Scale>) -> Result<Self> {
        if scales.is_empty() {
            return Err(ChordSeqError::EmptyCatalog);
        }
        Ok(Self { scales })
    }

    /// Built-in catalog followed by user definitions
    pub fn builtin_with(extra: &[ScaleDefinition]) -> Result<Self> {
        let mut catalog = Self::builtin();
        for def in extra {
            catalog.scales.push(Scale::try_from(def)?);
        }
        tracing::debug!(
            "Scale catalog built: {} scales ({} user)",
            catalog.scales.len(),
            extra.len()
        );
        Ok(catalog)
    }

    pub fn scale_count(&self) -> usize {
        self.scales.len()
    }

    /// Checked lookup. Processing code clamps first and uses [`Self::clamped`].
    pub fn scale(&self, index: usize) -> Result<&Scale> {
        self.scales.get(index).ok_or(ChordSeqError::OutOfRange {
            index,
            count: self.scales.len(),
        })
    }

    /// Clamp any integer into `[0, scale_count - 1]`
    pub fn clamp_index(&self, index: i64) -> usize {
        index.clamp(0, self.scales.len() as i64 - 1) as usize
    }

    /// Lookup that never fails
    pub fn clamped(&self, index: i64) -> &Scale {
        &self.scales[self.clamp_index(index)]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.scales.iter().position(|s| s.name == name)
    }

    /// Index the panel starts on
    pub fn default_index(&self) -> usize {
        self.index_of(DEFAULT_SCALE_NAME).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scale> {
        self.scales.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scales_satisfy_invariants() {
        for (name, pcs) in BUILTIN_SCALES {
            assert!(Scale::new(*name, pcs).is_ok(), "{name} is invalid");
        }
        assert_eq!(ScaleCatalog::builtin().scale_count(), BUILTIN_SCALES.len());
    }

    #[test]
    fn test_scale_validation() {
        assert!(Scale::new("short", &[0, 2, 4, 7]).is_err());
        assert!(Scale::new("chromatic", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]).is_err());
        assert!(Scale::new("range", &[0, 2, 4, 7, 12]).is_err());
        assert!(Scale::new("order", &[0, 4, 2, 7, 9]).is_err());
        assert!(Scale::new("dupes", &[0, 2, 2, 7, 9]).is_err());
        assert!(Scale::new("ok", &[0, 2, 4, 7, 9]).is_ok());
    }

    #[test]
    fn test_lookup_out_of_range() {
        let catalog = ScaleCatalog::builtin();
        let count = catalog.scale_count();
        assert!(catalog.scale(count - 1).is_ok());
        match catalog.scale(count) {
            Err(ChordSeqError::OutOfRange { index, count: c }) => {
                assert_eq!(index, count);
                assert_eq!(c, count);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_clamped_lookup() {
        let catalog = ScaleCatalog::builtin();
        assert_eq!(catalog.clamp_index(-5), 0);
        assert_eq!(catalog.clamp_index(1000), catalog.scale_count() - 1);
        assert_eq!(catalog.clamped(-1).name(), "Tritone");
        assert_eq!(catalog.clamped(i64::MAX).name(), "Istrian");
    }

    #[test]
    fn test_default_index_is_major() {
        let catalog = ScaleCatalog::builtin();
        let major = catalog.scale(catalog.default_index()).unwrap();
        assert_eq!(major.pitch_classes(), &[0, 2, 4, 5, 7, 9, 11]);
    }

    #[test]
    fn test_fold_wraps_octaves() {
        let major = Scale::new("major", &[0, 2, 4, 5, 7, 9, 11]).unwrap();
        assert_eq!(major.fold(0), (0, 0));
        assert_eq!(major.fold(6), (11, 0));
        assert_eq!(major.fold(7), (0, 1));
        assert_eq!(major.fold(16), (4, 2));
        assert_eq!(major.pitch_class(9), 4);
    }

    #[test]
    fn test_user_scales_extend_catalog() {
        let defs = vec![ScaleDefinition {
            name: "Mine".to_string(),
            pitch_classes: vec![0, 3, 6, 9, 11],
        }];
        let catalog = ScaleCatalog::builtin_with(&defs).unwrap();
        assert_eq!(catalog.scale_count(), BUILTIN_SCALES.len() + 1);
        assert_eq!(catalog.index_of("Mine"), Some(BUILTIN_SCALES.len()));

        let bad = vec![ScaleDefinition {
            name: "Bad".to_string(),
            pitch_classes: vec![0, 1],
        }];
        assert!(matches!(
            ScaleCatalog::builtin_with(&bad),
            Err(ChordSeqError::InvalidScale { .. })
        ));
        assert!(matches!(
            ScaleCatalog::with_scales(Vec::new()),
            Err(ChordSeqError::EmptyCatalog)
        ));
    }
}
