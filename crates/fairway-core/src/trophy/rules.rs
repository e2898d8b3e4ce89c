use super::Trophy;
use chrono::{Datelike, NaiveDate};

/// Point in the submission flow at which a rule is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The code was refused for size before judging.
    Rejected,
    /// The judge has returned, whether or not the run passed.
    Judged,
    /// A ranked pass has been stored.
    Persisted,
}

/// Inclusive month/day range; `start > end` wraps over the new year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: (u32, u32),
    end: (u32, u32),
}

impl DateWindow {
    pub const fn day(month: u32, day: u32) -> Self {
        Self {
            start: (month, day),
            end: (month, day),
        }
    }

    pub const fn span(start: (u32, u32), end: (u32, u32)) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let d = (date.month(), date.day());
        if self.start <= self.end {
            self.start <= d && d <= self.end
        } else {
            d >= self.start || d <= self.end
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Code size reached the cap.
    Oversized,
    /// The judge reported a timeout.
    TimedOut,
    /// Today (UTC) falls in `window`, and the hole matches if one is given.
    Calendar {
        hole: Option<&'static str>,
        window: DateWindow,
    },
    /// Non-failing solutions in every catalogued language.
    EveryLanguage,
    /// Bytes or chars points strictly above the threshold.
    PointsAbove(i64),
    /// Both languages of the pair, both scorings, on the submitted hole.
    /// Only considered when the submission is in one of the pair.
    LanguagePair([&'static str; 2]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub trophy: Trophy,
    pub stage: Stage,
    pub condition: Condition,
}

const fn rule(trophy: Trophy, stage: Stage, condition: Condition) -> Rule {
    Rule {
        trophy,
        stage,
        condition,
    }
}

const fn on_hole(hole: &'static str, window: DateWindow) -> Condition {
    Condition::Calendar {
        hole: Some(hole),
        window,
    }
}

pub const RULES: &[Rule] = &[
    rule(Trophy::TlDr, Stage::Rejected, Condition::Oversized),
    rule(Trophy::Slowcoach, Stage::Judged, Condition::TimedOut),
    rule(
        Trophy::HappyBirthdayCodeGolf,
        Stage::Persisted,
        Condition::Calendar {
            hole: None,
            window: DateWindow::day(10, 2),
        },
    ),
    rule(
        Trophy::Twelvetide,
        Stage::Persisted,
        on_hole("12-days-of-christmas", DateWindow::span((12, 25), (1, 5))),
    ),
    rule(
        Trophy::MayThe4thBeWithYou,
        Stage::Persisted,
        on_hole("star-wars-opening-crawl", DateWindow::day(5, 4)),
    ),
    rule(
        Trophy::IndependenceDay,
        Stage::Persisted,
        on_hole("united-states", DateWindow::day(7, 4)),
    ),
    rule(
        Trophy::VampireByte,
        Stage::Persisted,
        on_hole("vampire-numbers", DateWindow::day(10, 31)),
    ),
    rule(
        Trophy::PiDay,
        Stage::Persisted,
        on_hole("π", DateWindow::day(3, 14)),
    ),
    rule(Trophy::Polyglot, Stage::Persisted, Condition::EveryLanguage),
    rule(
        Trophy::ItsOver9000,
        Stage::Persisted,
        Condition::PointsAbove(9000),
    ),
    rule(
        Trophy::Caffeinated,
        Stage::Persisted,
        Condition::LanguagePair(["java", "javascript"]),
    ),
    rule(
        Trophy::TimToady,
        Stage::Persisted,
        Condition::LanguagePair(["perl", "raku"]),
    ),
];
