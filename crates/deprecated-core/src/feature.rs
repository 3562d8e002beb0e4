//! The deprecated entries this crate knows how to find and strip

use std::fmt;

/// A dictionary entry marked deprecated by PDF 2.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// `/ProcSet` in a resource dictionary
    ProcSet,
    /// `/CIDSet` in a font descriptor
    CidSet,
    /// `/CharSet` in a font descriptor
    CharSet,
    /// `/Name` on fonts, images and form XObjects
    Name,
}

impl Feature {
    /// Detection, reporting and removal all run in this order.
    pub const ALL: [Feature; 4] = [
        Feature::ProcSet,
        Feature::CidSet,
        Feature::CharSet,
        Feature::Name,
    ];

    /// The dictionary key carrying the feature
    pub fn key(self) -> &'static [u8] {
        self.label().as_bytes()
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::ProcSet => "ProcSet",
            Feature::CidSet => "CIDSet",
            Feature::CharSet => "CharSet",
            Feature::Name => "Name",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
