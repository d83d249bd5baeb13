//! Chord naming for the display: symbols derived from (root, scale, degree)

use serde::{Deserialize, Serialize};

use crate::scale::{Scale, ScaleCatalog};
use crate::sequencer::Quality;

pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Returned whenever a chord cannot be named
pub const UNKNOWN: &str = "?";

/// Note name of any semitone value
pub fn note_name(semitone: i64) -> &'static str {
    NOTE_NAMES[semitone.rem_euclid(12) as usize]
}

/// Chord symbol for the triad stacked on `degree` of the given scale.
///
/// The third and fifth are the scale notes two and four steps above the
/// chord root, measured modulo the octave. Invalid scale indices yield `"?"`.
pub fn chord_name(catalog: &ScaleCatalog, root: i64, scale_index: i64, degree: usize) -> String {
    let Ok(index) = usize::try_from(scale_index) else {
        return UNKNOWN.to_string();
    };
    match catalog.scale(index) {
        Ok(scale) => name_in_scale(scale, root, degree),
        Err(_) => UNKNOWN.to_string(),
    }
}

/// [`chord_name`] against an already resolved scale
pub fn name_in_scale(scale: &Scale, root: i64, degree: usize) -> String {
    if scale.is_empty() {
        return UNKNOWN.to_string();
    }

    let len = scale.len();
    let degree_index = degree % len;
    let chord_root = scale.pitch_class(degree_index) as i64;
    let third = scale.pitch_class((degree_index + 2) % len) as i64;
    let fifth = scale.pitch_class((degree_index + 4) % len) as i64;

    let i3 = (third - chord_root + 12) % 12;
    let i5 = (fifth - chord_root + 12) % 12;

    let mut name = String::from(note_name(root + chord_root));
    name.push_str(match i3 {
        4 => "",
        3 => "m",
        2 => "sus2",
        5 => "sus4",
        _ => UNKNOWN,
    });
    match i5 {
        6 => name.push_str("b5"),
        8 => name.push_str("#5"),
        _ => {}
    }
    name
}

/// Chord symbol plus the extension implied by the step's fourth voice
pub fn step_label(
    catalog: &ScaleCatalog,
    root: i64,
    scale_index: i64,
    degree: usize,
    quality: Quality,
) -> String {
    let mut label = chord_name(catalog, root, scale_index, degree);
    label.push_str(quality.extension());
    label
}

/// Root knob display, e.g. semitone 24 is "C3"
pub fn root_label(root_semitone: i64) -> String {
    let value = root_semitone.rem_euclid(120);
    format!("{}{}", note_name(value), value / 12 + 1)
}

/// Triad classification with the fifth and third unwrapped above the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Unknown,
}

impl TriadQuality {
    /// Classify the triad stacked on `degree`.
    ///
    /// Unlike [`name_in_scale`], a third or fifth that wraps past the end of
    /// the scale is lifted an octave rather than reduced modulo 12.
    pub fn classify(scale: &Scale, degree: usize) -> Self {
        if scale.is_empty() {
            return Self::Unknown;
        }
        let len = scale.len();
        let degree_index = degree % len;
        let third_index = (degree_index + 2) % len;
        let fifth_index = (degree_index + 4) % len;

        let root = scale.pitch_class(degree_index) as i32;
        let mut third = scale.pitch_class(third_index) as i32;
        let mut fifth = scale.pitch_class(fifth_index) as i32;
        if third_index < degree_index {
            third += 12;
        }
        if fifth_index < degree_index {
            fifth += 12;
        }

        Self::from_intervals(third - root, fifth - root)
    }

    pub fn from_intervals(third: i32, fifth: i32) -> Self {
        match (third, fifth) {
            (4, 7) => Self::Major,
            (3, 7) => Self::Minor,
            (3, 6) => Self::Diminished,
            (4, 8) => Self::Augmented,
            _ => Self::Unknown,
        }
    }

    /// Semitone intervals from the chord root
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            Self::Major => &[0, 4, 7],
            Self::Minor => &[0, 3, 7],
            Self::Diminished => &[0, 3, 6],
            Self::Augmented => &[0, 4, 8],
            Self::Unknown => &[0],
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Major => "",
            Self::Minor => "m",
            Self::Diminished => "dim",
            Self::Augmented => "aug",
            Self::Unknown => UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn major_index(catalog: &ScaleCatalog) -> i64 {
        catalog.index_of("Major (Ionian)").unwrap() as i64
    }

    #[test]
    fn test_major_scale_names() {
        let catalog = ScaleCatalog::builtin();
        let major = major_index(&catalog);
        let names: Vec<String> = (0..7).map(|d| chord_name(&catalog, 0, major, d)).collect();
        assert_eq!(names, vec!["C", "Dm", "Em", "F", "G", "Am", "Bmb5"]);
    }

    #[test]
    fn test_root_transposes_name() {
        let catalog = ScaleCatalog::builtin();
        let major = major_index(&catalog);
        assert_eq!(chord_name(&catalog, 7, major, 0), "G");
        assert_eq!(chord_name(&catalog, 24 + 2, major, 1), "Em");
    }

    #[test]
    fn test_invalid_scale_index() {
        let catalog = ScaleCatalog::builtin();
        assert_eq!(chord_name(&catalog, 0, -1, 0), "?");
        assert_eq!(chord_name(&catalog, 0, catalog.scale_count() as i64, 0), "?");
    }

    #[test]
    fn test_sus_and_altered_fifths() {
        let catalog = ScaleCatalog::builtin();
        // Whole tone: every third is major, every fifth augmented
        let whole = catalog.index_of("Whole Tone").unwrap() as i64;
        assert_eq!(chord_name(&catalog, 0, whole, 0), "C#5");
        // Yo {0,2,5,7,9}: third step is a fourth above the root
        let yo = catalog.index_of("Yo").unwrap() as i64;
        assert_eq!(chord_name(&catalog, 0, yo, 0), "Csus4");
        // Two-Semi Tritone {0,1,2,6,7,8}: root to third step is a whole tone
        let two_semi = catalog.index_of("Two-Semi Tritone").unwrap() as i64;
        assert_eq!(chord_name(&catalog, 0, two_semi, 0), "Csus2");
    }

    #[test]
    fn test_large_degrees_stay_in_bounds() {
        let catalog = ScaleCatalog::builtin();
        for (index, scale) in catalog.iter().enumerate() {
            for degree in 0..=10 * scale.len() {
                let direct = chord_name(&catalog, 0, index as i64, degree);
                let wrapped = chord_name(&catalog, 0, index as i64, degree % scale.len());
                assert_eq!(direct, wrapped);
            }
        }
    }

    #[test]
    fn test_step_label_extensions() {
        let catalog = ScaleCatalog::builtin();
        let major = major_index(&catalog);
        assert_eq!(step_label(&catalog, 0, major, 0, Quality::Seventh), "C");
        assert_eq!(step_label(&catalog, 0, major, 1, Quality::Sixth), "Dm6");
        assert_eq!(step_label(&catalog, 0, major, 4, Quality::Ninth), "G9");
        assert_eq!(step_label(&catalog, 0, major, 5, Quality::Eleventh), "Am11");
    }

    #[test]
    fn test_root_label() {
        assert_eq!(root_label(0), "C1");
        assert_eq!(root_label(24), "C3");
        assert_eq!(root_label(37), "C#4");
        assert_eq!(root_label(-1), "B10");
    }

    #[test]
    fn test_triad_classifier() {
        let major = Scale::new("major", &[0, 2, 4, 5, 7, 9, 11]).unwrap();
        let found: Vec<TriadQuality> = (0..7).map(|d| TriadQuality::classify(&major, d)).collect();
        assert_eq!(
            found,
            vec![
                TriadQuality::Major,
                TriadQuality::Minor,
                TriadQuality::Minor,
                TriadQuality::Major,
                TriadQuality::Major,
                TriadQuality::Minor,
                TriadQuality::Diminished,
            ]
        );
        let whole = Scale::new("whole", &[0, 2, 4, 6, 8, 10]).unwrap();
        assert_eq!(TriadQuality::classify(&whole, 3), TriadQuality::Augmented);
        assert_eq!(TriadQuality::Augmented.intervals(), &[0, 4, 8]);
        assert_eq!(TriadQuality::Diminished.suffix(), "dim");
    }
}
