//! Layout attributes.

use std::fmt;

/// The closed set of layout attributes a term can refer to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    Left,
    Right,
    Top,
    Bottom,
    Leading,
    Trailing,
    Width,
    Height,
    CenterX,
    CenterY,
    Baseline,
    FirstBaseline,
    LastBaseline,
    /// No attribute; used for the second item of a constant-only constraint.
    NotAnAttribute,
}

impl Attribute {
    pub const ALL: [Self; 14] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::Leading,
        Self::Trailing,
        Self::Width,
        Self::Height,
        Self::CenterX,
        Self::CenterY,
        Self::Baseline,
        Self::FirstBaseline,
        Self::LastBaseline,
        Self::NotAnAttribute,
    ];

    /// Look up an attribute by the name used in format strings.
    ///
    /// Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Leading => "leading",
            Self::Trailing => "trailing",
            Self::Width => "width",
            Self::Height => "height",
            Self::CenterX => "centerX",
            Self::CenterY => "centerY",
            Self::Baseline => "baseline",
            Self::FirstBaseline => "firstBaseline",
            Self::LastBaseline => "lastBaseline",
            Self::NotAnAttribute => "notAnAttribute",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
