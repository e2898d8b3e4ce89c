//! Rank reconciliation and aggregate trophy rules against the SQLite store.

use chrono::NaiveDate;
use fairway_core::storage::LeaderboardStore;
use fairway_core::trophy::{RuleContext, Stage, SubmissionFacts};
use fairway_core::{AchievementEngine, Catalog, Scoring, SqliteLeaderboard, Trophy};

fn ctx<'a>(catalog: &'a Catalog, golfer_id: i64, hole: &'a str, lang: &'a str) -> RuleContext<'a> {
    RuleContext {
        golfer_id,
        today: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        hole,
        lang,
        catalog,
        facts: SubmissionFacts::default(),
    }
}

#[test]
fn equal_strokes_share_a_rank_and_the_next_value_skips() {
    let store = SqliteLeaderboard::memory().unwrap();

    store.record_pass("aaaa", "fizz-buzz", "ruby", 1).unwrap();
    let second = store.record_pass("bbbb", "fizz-buzz", "ruby", 2).unwrap();
    let third = store.record_pass("ccccc", "fizz-buzz", "ruby", 3).unwrap();

    assert_eq!(second.bytes.to.rank, Some(1));
    assert!(second.bytes.to.joint);

    // Two golfers are strictly ahead, so rank 3 (not 2).
    assert_eq!(third.bytes.to.rank, Some(3));
    assert!(!third.bytes.to.joint);

    let first = store
        .rank_snapshot(1, "fizz-buzz", "ruby", Scoring::Bytes)
        .unwrap();
    assert_eq!(first.rank, Some(1));
    assert!(first.joint);
}

#[test]
fn improving_reports_overtaken_golfers() {
    let store = SqliteLeaderboard::memory().unwrap();

    store.record_pass("12345", "quine", "lua", 1).unwrap();
    store.record_pass("1234567", "quine", "lua", 2).unwrap();
    let entry = store.record_pass("123456789", "quine", "lua", 3).unwrap();
    assert_eq!(entry.bytes.to.rank, Some(3));
    assert_eq!(entry.bytes.beat, 0);

    let jump = store.record_pass("1234", "quine", "lua", 3).unwrap();
    assert_eq!(jump.bytes.from.strokes, Some(9));
    assert_eq!(jump.bytes.to.strokes, Some(4));
    assert_eq!(jump.bytes.to.rank, Some(1));
    assert_eq!(jump.bytes.beat, 2);
    assert!(jump.bytes.is_record());
}

#[test]
fn longer_resubmission_changes_nothing() {
    let store = SqliteLeaderboard::memory().unwrap();

    store.record_pass("abc", "π", "c", 1).unwrap();
    let worse = store.record_pass("abcdef", "π", "c", 1).unwrap();

    for u in [worse.bytes, worse.chars] {
        assert_eq!(u.from, u.to);
        assert_eq!(u.to.strokes, Some(3));
        assert!(!u.changed());
    }
    assert!(worse.trophies.is_empty());
}

#[test]
fn polyglot_needs_every_language_without_failures() {
    let store = SqliteLeaderboard::memory().unwrap();
    let catalog = Catalog::builtin();
    let engine = AchievementEngine::new();
    let golfer = 11;

    let langs: Vec<_> = catalog.langs.iter().cloned().collect();
    let (last, rest) = langs.split_last().unwrap();

    for lang in rest {
        store.record_pass("x", "fibonacci", lang, golfer).unwrap();
    }
    let before = engine
        .evaluate(&store, Stage::Persisted, &ctx(&catalog, golfer, "fibonacci", rest[0].as_str()))
        .unwrap();
    assert!(!before.contains(&Trophy::Polyglot));

    // One language drops out after a re-judge: still not every language.
    store.record_pass("x", "fibonacci", last, golfer).unwrap();
    store.mark_failing("fibonacci", rest[0].as_str(), golfer).unwrap();
    let with_failing = engine
        .evaluate(&store, Stage::Persisted, &ctx(&catalog, golfer, "fibonacci", last))
        .unwrap();
    assert!(!with_failing.contains(&Trophy::Polyglot));

    // A fresh pass replaces the failing row.
    store
        .record_pass("x", "fibonacci", rest[0].as_str(), golfer)
        .unwrap();
    let granted = engine
        .evaluate(&store, Stage::Persisted, &ctx(&catalog, golfer, "fibonacci", rest[0].as_str()))
        .unwrap();
    assert!(granted.contains(&Trophy::Polyglot));
}

#[test]
fn language_pair_is_order_independent() {
    let catalog = Catalog::builtin();
    let engine = AchievementEngine::new();

    for order in [["perl", "raku"], ["raku", "perl"]] {
        let store = SqliteLeaderboard::memory().unwrap();
        let mut granted = Vec::new();
        for lang in order {
            store.record_pass("say 1", "quine", lang, 1).unwrap();
            granted.extend(
                engine
                    .evaluate(&store, Stage::Persisted, &ctx(&catalog, 1, "quine", lang))
                    .unwrap(),
            );
        }
        assert_eq!(
            granted.iter().filter(|t| **t == Trophy::TimToady).count(),
            1,
            "order {:?}",
            order
        );
    }
}

#[test]
fn points_cross_nine_thousand() {
    let store = SqliteLeaderboard::memory().unwrap();
    let catalog = Catalog::builtin();
    let engine = AchievementEngine::new();

    // Nine holes at 1000 points each is not enough.
    let holes: Vec<_> = catalog.holes.iter().cloned().collect();
    assert!(holes.len() >= 10);
    for hole in &holes[..9] {
        store.record_pass("x", hole, "c", 1).unwrap();
    }
    assert_eq!(store.points(1, Scoring::Bytes).unwrap(), 9000.0);
    let nine = engine
        .evaluate(&store, Stage::Persisted, &ctx(&catalog, 1, &holes[8], "c"))
        .unwrap();
    assert!(!nine.contains(&Trophy::ItsOver9000));

    store.record_pass("x", &holes[9], "c", 1).unwrap();
    let ten = engine
        .evaluate(&store, Stage::Persisted, &ctx(&catalog, 1, &holes[9], "c"))
        .unwrap();
    assert!(ten.contains(&Trophy::ItsOver9000));
}
