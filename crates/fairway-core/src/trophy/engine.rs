use super::rules::{Condition, Rule, Stage, RULES};
use super::Trophy;
use crate::catalog::Catalog;
use crate::errors::StoreError;
use crate::storage::{AggregateQuery, Grant, LeaderboardStore};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Outcome-derived facts about the submission being evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionFacts {
    pub oversized: bool,
    pub timed_out: bool,
}

/// Everything a rule may look at besides aggregate store state.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub golfer_id: i64,
    pub today: NaiveDate,
    pub hole: &'a str,
    pub lang: &'a str,
    pub catalog: &'a Catalog,
    pub facts: SubmissionFacts,
}

enum Check<'a> {
    Met,
    Unmet,
    Query(AggregateQuery<'a>),
}

fn check<'a>(condition: &Condition, ctx: &RuleContext<'a>) -> Check<'a> {
    let met = |b: bool| if b { Check::Met } else { Check::Unmet };
    match *condition {
        Condition::Oversized => met(ctx.facts.oversized),
        Condition::TimedOut => met(ctx.facts.timed_out),
        Condition::Calendar { hole, window } => {
            met((hole.is_none() || hole == Some(ctx.hole)) && window.contains(ctx.today))
        }
        Condition::EveryLanguage => Check::Query(AggregateQuery::EveryLanguage {
            langs: &ctx.catalog.langs,
        }),
        Condition::PointsAbove(threshold) => {
            Check::Query(AggregateQuery::PointsAbove { threshold })
        }
        Condition::LanguagePair(langs) => {
            if langs.contains(&ctx.lang) {
                Check::Query(AggregateQuery::LanguagePair {
                    hole: ctx.hole,
                    langs,
                })
            } else {
                Check::Unmet
            }
        }
    }
}

/// Evaluates the rule table and issues idempotent grants.
#[derive(Debug, Clone, Copy)]
pub struct AchievementEngine {
    rules: &'static [Rule],
}

impl Default for AchievementEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementEngine {
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Trophies whose conditions hold at `stage`, without granting anything.
    pub fn qualifying(
        &self,
        store: &dyn LeaderboardStore,
        stage: Stage,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Trophy>, StoreError> {
        let mut out = Vec::new();
        for rule in self.rules.iter().filter(|r| r.stage == stage) {
            let met = match check(&rule.condition, ctx) {
                Check::Met => true,
                Check::Unmet => false,
                Check::Query(q) => store.query_aggregate(ctx.golfer_id, &q)?,
            };
            if met {
                out.push(rule.trophy);
            }
        }
        Ok(out)
    }

    /// Grant every qualifying trophy; returns those the golfer did not hold yet.
    pub fn evaluate(
        &self,
        store: &dyn LeaderboardStore,
        stage: Stage,
        ctx: &RuleContext<'_>,
    ) -> Result<BTreeSet<Trophy>, StoreError> {
        let mut granted = BTreeSet::new();
        for trophy in self.qualifying(store, stage, ctx)? {
            if store.grant_trophy(ctx.golfer_id, trophy)? == Grant::Granted {
                tracing::debug!(golfer_id = ctx.golfer_id, trophy = %trophy, "trophy granted");
                granted.insert(trophy);
            }
        }
        Ok(granted)
    }
}
