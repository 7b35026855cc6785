//! Unicode script ranges used for classification.
//!
//! A [`ScriptRange`] is a closed code-point interval tied to a script
//! identity. Ranges are process-lifetime constants; membership testing is the
//! only operation.

/// A closed Unicode code-point interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRange {
    pub start: u32,
    pub end: u32,
}

impl ScriptRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether `c` falls inside this range.
    pub fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        cp >= self.start && cp <= self.end
    }

    /// Whether any character of `text` falls inside this range.
    pub fn matches(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains(c))
    }
}

/// Armenian Unicode block (U+0530–U+058F).
pub const ARMENIAN: ScriptRange = ScriptRange::new(0x0530, 0x058F);

/// Cyrillic Unicode block (U+0400–U+04FF).
pub const CYRILLIC: ScriptRange = ScriptRange::new(0x0400, 0x04FF);
