//! Hole and language catalogue.
//!
//! Experimental holes may be played but are never ranked. The bypass
//! language is accepted without being catalogued and is never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Language id accepted without a catalogue entry.
pub const BYPASS_LANG: &str = "assembly";

const HOLES: &[&str] = &[
    "12-days-of-christmas",
    "brainfuck",
    "emirp-numbers",
    "fibonacci",
    "fizz-buzz",
    "quine",
    "star-wars-opening-crawl",
    "united-states",
    "vampire-numbers",
    "π",
];

const EXPERIMENTAL_HOLES: &[&str] = &["morse-decoder", "rock-paper-scissors-spock-lizard"];

const LANGS: &[&str] = &[
    "brainfuck",
    "c",
    "haskell",
    "java",
    "javascript",
    "lua",
    "perl",
    "php",
    "python",
    "raku",
    "ruby",
    "rust",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleKind {
    Standard,
    Experimental,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub holes: BTreeSet<String>,
    pub experimental_holes: BTreeSet<String>,
    pub langs: BTreeSet<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        let owned = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect();
        Self {
            holes: owned(HOLES),
            experimental_holes: owned(EXPERIMENTAL_HOLES),
            langs: owned(LANGS),
        }
    }

    /// Standard holes win over experimental ones with the same id.
    pub fn hole_kind(&self, hole: &str) -> Option<HoleKind> {
        if self.holes.contains(hole) {
            Some(HoleKind::Standard)
        } else if self.experimental_holes.contains(hole) {
            Some(HoleKind::Experimental)
        } else {
            None
        }
    }

    pub fn accepts_lang(&self, lang: &str) -> bool {
        lang == BYPASS_LANG || self.langs.contains(lang)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.langs.is_empty() {
            return Err("catalog has no languages".to_string());
        }
        if self.langs.contains(BYPASS_LANG) {
            return Err(format!("'{}' must not be catalogued", BYPASS_LANG));
        }
        Ok(())
    }
}
