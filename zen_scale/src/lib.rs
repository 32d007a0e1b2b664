//! # zen_scale
//!
//! Read-only scale definitions consumed by the trigger-zone layout, plus
//! MIDI note naming for the zone labels.
//!
//! A [`Scale`] is an ordered list of semitone offsets from the root
//! ("degrees").  A [`ScaleTable`] is the indexed collection the device
//! exposes to its modes; the selector wraps around the table length so any
//! integer picks a scale.
//!
//! ```rust
//! use zen_scale::{ScaleTable, note_name};
//!
//! let table = ScaleTable::builtin();
//! let major = table.get(0);
//! assert_eq!(major.name, "Major");
//! assert_eq!(major.degree(2), 4);
//! assert_eq!(note_name(72).to_string(), "C5");
//! ```

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Scale
// ════════════════════════════════════════════════════════════════════════════

/// Named, ordered semitone offsets from the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scale {
    pub intervals: Vec<u8>,
    pub name: &'static str,
}

/// Shipped scales, in selector order.
const BUILTIN: &[(&str, &[u8])] = &[
    ("Major",            &[0, 2, 4, 5, 7, 9, 11]),
    ("Minor",            &[0, 2, 3, 5, 7, 8, 10]),
    ("Pentatonic Major", &[0, 2, 4, 7, 9]),
    ("Pentatonic Minor", &[0, 3, 5, 7, 10]),
    ("Blues",            &[0, 3, 5, 6, 7, 10]),
    ("Dorian",           &[0, 2, 3, 5, 7, 9, 10]),
    ("Chromatic",        &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
];

impl Scale {
    fn from_row(&(name, intervals): &(&'static str, &[u8])) -> Self {
        Scale { intervals: intervals.to_vec(), name }
    }

    /// Shipped scale by exact name.
    pub fn named(name: &str) -> Option<Self> {
        BUILTIN.iter().find(|(n, _)| *n == name).map(Scale::from_row)
    }

    pub fn major() -> Self { Scale::from_row(&BUILTIN[0]) }
    pub fn minor() -> Self { Scale::from_row(&BUILTIN[1]) }
    pub fn pentatonic_major() -> Self { Scale::from_row(&BUILTIN[2]) }
    pub fn chromatic() -> Self { Scale::from_row(&BUILTIN[6]) }

    /// Ad-hoc scale; offsets are used as given.
    pub fn custom(intervals: Vec<u8>) -> Self {
        Scale { intervals, name: "Custom" }
    }

    /// Number of degrees in the scale.
    pub fn len(&self) -> usize { self.intervals.len() }
    pub fn is_empty(&self) -> bool { self.intervals.is_empty() }

    /// Semitone offset of degree `index`, wrapping around the scale length.
    ///
    /// An empty scale behaves like the single degree `[0]`.
    pub fn degree(&self, index: usize) -> u8 {
        if self.intervals.is_empty() { return 0; }
        self.intervals[index % self.intervals.len()]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScaleTable — the indexed collection shared across modes
// ════════════════════════════════════════════════════════════════════════════

/// Named scales indexed by an integer selector.
#[derive(Clone, Debug)]
pub struct ScaleTable {
    scales: Vec<Scale>,
}

impl ScaleTable {
    /// The scales the device ships with, major first.
    pub fn builtin() -> Self {
        ScaleTable {
            scales: BUILTIN.iter().map(Scale::from_row).collect(),
        }
    }

    /// Build a table from an explicit list.  An empty list falls back to
    /// a single major scale so [`ScaleTable::get`] is always total.
    pub fn from_scales(scales: Vec<Scale>) -> Self {
        if scales.is_empty() {
            return ScaleTable { scales: vec![Scale::major()] };
        }
        ScaleTable { scales }
    }

    /// Number of available scales (never zero).
    pub fn len(&self) -> usize { self.scales.len() }
    pub fn is_empty(&self) -> bool { self.scales.is_empty() }

    /// Scale for `selector`, wrapping modulo [`ScaleTable::len`].
    pub fn get(&self, selector: usize) -> &Scale {
        &self.scales[selector % self.scales.len()]
    }

    /// Selector of the first scale whose name matches case-insensitively.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.scales.iter().position(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scale> {
        self.scales.iter()
    }
}

impl Default for ScaleTable {
    fn default() -> Self { ScaleTable::builtin() }
}

// ════════════════════════════════════════════════════════════════════════════
// NoteName — display label for a MIDI note number
// ════════════════════════════════════════════════════════════════════════════

const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class plus octave, with MIDI 60 = `C4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NoteName {
    pub note: u8,
}

impl NoteName {
    pub fn pitch_class(self) -> &'static str {
        PITCH_CLASSES[(self.note % 12) as usize]
    }

    pub fn octave(self) -> i8 {
        (self.note / 12) as i8 - 1
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class(), self.octave())
    }
}

/// Name a MIDI note number; values above 127 are clamped.
pub fn note_name(note: u8) -> NoteName {
    NoteName { note: note.min(127) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_degrees() {
        let s = Scale::major();
        assert_eq!(s.len(), 7);
        assert_eq!(s.degree(0), 0);
        assert_eq!(s.degree(4), 7);
        assert_eq!(s.degree(6), 11);
    }

    #[test]
    fn degree_wraps() {
        let s = Scale::pentatonic_major();
        assert_eq!(s.degree(5), 0);
        assert_eq!(s.degree(6), 2);
    }

    #[test]
    fn empty_scale_is_root_only() {
        let s = Scale::custom(vec![]);
        assert!(s.is_empty());
        assert_eq!(s.degree(3), 0);
    }

    #[test]
    fn table_selector_wraps() {
        let t = ScaleTable::builtin();
        assert_eq!(t.get(0).name, "Major");
        assert_eq!(t.get(t.len()).name, "Major");
        assert_eq!(t.get(t.len() + 1).name, "Minor");
    }

    #[test]
    fn empty_table_falls_back_to_major() {
        let t = ScaleTable::from_scales(Vec::new());
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(7), &Scale::major());
    }

    #[test]
    fn table_lookup_by_name() {
        let t = ScaleTable::builtin();
        assert_eq!(t.position("dorian"), Some(5));
        assert_eq!(t.position("nope"), None);
    }

    #[test]
    fn named_lookup_matches_table() {
        let t = ScaleTable::builtin();
        assert_eq!(Scale::named("Blues").as_ref(), Some(t.get(4)));
        assert_eq!(Scale::named("Chromatic").map(|s| s.len()), Some(12));
        assert_eq!(Scale::named("blues"), None);
    }

    #[test]
    fn note_names() {
        assert_eq!(note_name(60).to_string(), "C4");
        assert_eq!(note_name(61).to_string(), "C#4");
        assert_eq!(note_name(72).to_string(), "C5");
        assert_eq!(note_name(0).to_string(), "C-1");
        assert_eq!(note_name(127).to_string(), "G9");
        assert_eq!(note_name(200).note, 127);
    }
}
