//! Core data models for lyriclass
//!
//! These models are shared by the loader, the text pipeline and the
//! classifier.

use serde::{Deserialize, Serialize};

/// Classification target for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    NotExplicit,
    Explicit,
}

impl Label {
    /// Canonical class order. Every per-class array uses this order.
    pub const ALL: [Label; 2] = [Label::NotExplicit, Label::Explicit];

    /// Position of this label in [`Label::ALL`]
    pub fn index(self) -> usize {
        match self {
            Label::NotExplicit => 0,
            Label::Explicit => 1,
        }
    }

    pub fn is_explicit(self) -> bool {
        self == Label::Explicit
    }
}

impl From<bool> for Label {
    fn from(explicit: bool) -> Self {
        if explicit {
            Label::Explicit
        } else {
            Label::NotExplicit
        }
    }
}

impl From<Label> for bool {
    fn from(label: Label) -> Self {
        label.is_explicit()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::NotExplicit => write!(f, "Not Explicit"),
            Label::Explicit => write!(f, "Explicit"),
        }
    }
}

/// One row of the input table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub lyrics: String,
    pub explicit: bool,
}

impl Track {
    pub fn new(id: impl Into<String>, lyrics: impl Into<String>, explicit: bool) -> Self {
        Self {
            id: id.into(),
            lyrics: lyrics.into(),
            explicit,
        }
    }

    pub fn label(&self) -> Label {
        Label::from(self.explicit)
    }
}
