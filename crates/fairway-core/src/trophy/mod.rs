//! Trophy catalogue and the achievement engine.
//!
//! Grants are keyed by (golfer, trophy) and are idempotent at the storage
//! layer, so rule evaluation order never changes the outcome.

mod engine;
mod rules;

pub use engine::{AchievementEngine, RuleContext, SubmissionFacts};
pub use rules::{Condition, DateWindow, Rule, Stage, RULES};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trophy {
    #[serde(rename = "bullseye")]
    Bullseye,
    #[serde(rename = "caffeinated")]
    Caffeinated,
    #[serde(rename = "elephpant-in-the-room")]
    ElephpantInTheRoom,
    #[serde(rename = "happy-birthday-code-golf")]
    HappyBirthdayCodeGolf,
    #[serde(rename = "hello-world")]
    HelloWorld,
    #[serde(rename = "independence-day")]
    IndependenceDay,
    #[serde(rename = "inception")]
    Inception,
    #[serde(rename = "interview-ready")]
    InterviewReady,
    #[serde(rename = "its-over-9000")]
    ItsOver9000,
    #[serde(rename = "may-the-4ᵗʰ-be-with-you")]
    MayThe4thBeWithYou,
    #[serde(rename = "ouroboros")]
    Ouroboros,
    #[serde(rename = "pi-day")]
    PiDay,
    #[serde(rename = "polyglot")]
    Polyglot,
    #[serde(rename = "slowcoach")]
    Slowcoach,
    #[serde(rename = "tim-toady")]
    TimToady,
    #[serde(rename = "tl-dr")]
    TlDr,
    #[serde(rename = "twelvetide")]
    Twelvetide,
    #[serde(rename = "vampire-byte")]
    VampireByte,
}

impl Trophy {
    pub const ALL: [Trophy; 18] = [
        Trophy::Bullseye,
        Trophy::Caffeinated,
        Trophy::ElephpantInTheRoom,
        Trophy::HappyBirthdayCodeGolf,
        Trophy::HelloWorld,
        Trophy::IndependenceDay,
        Trophy::Inception,
        Trophy::InterviewReady,
        Trophy::ItsOver9000,
        Trophy::MayThe4thBeWithYou,
        Trophy::Ouroboros,
        Trophy::PiDay,
        Trophy::Polyglot,
        Trophy::Slowcoach,
        Trophy::TimToady,
        Trophy::TlDr,
        Trophy::Twelvetide,
        Trophy::VampireByte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullseye => "bullseye",
            Self::Caffeinated => "caffeinated",
            Self::ElephpantInTheRoom => "elephpant-in-the-room",
            Self::HappyBirthdayCodeGolf => "happy-birthday-code-golf",
            Self::HelloWorld => "hello-world",
            Self::IndependenceDay => "independence-day",
            Self::Inception => "inception",
            Self::InterviewReady => "interview-ready",
            Self::ItsOver9000 => "its-over-9000",
            Self::MayThe4thBeWithYou => "may-the-4ᵗʰ-be-with-you",
            Self::Ouroboros => "ouroboros",
            Self::PiDay => "pi-day",
            Self::Polyglot => "polyglot",
            Self::Slowcoach => "slowcoach",
            Self::TimToady => "tim-toady",
            Self::TlDr => "tl-dr",
            Self::Twelvetide => "twelvetide",
            Self::VampireByte => "vampire-byte",
        }
    }
}

impl std::fmt::Display for Trophy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trophy: {0}")]
pub struct UnknownTrophy(pub String);

impl FromStr for Trophy {
    type Err = UnknownTrophy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trophy::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTrophy(s.to_string()))
    }
}
