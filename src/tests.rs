//! Cross-module tests for the `vehicle_drill` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Round building | Size = min(quizLength, questions); no duplicate ids; seeds reproduce |
//! | Choices | Correct value exactly once; no duplicates; length cap |
//! | Streaks | Streak = trailing run of correct classifications; best = max run |
//! | Naming | Naming outcomes never move the streak; records carry both fields |
//! | Round end | Last advance completes exactly once; summary matches the log |
//! | Races | Double submissions and stale tokens change nothing |
//! | Report | Report built from a played round agrees with the session |

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::training_engine::{
    build_choices, build_round, AdvanceOutcome, Dataset, Phase, Question, QuizMode,
    QuizSession, SessionConfig, Stage, TeacherReport,
};

// ── helpers ──────────────────────────────────────────────────────────────────

const CLASSES: [&str; 6] = [
    "Tank",
    "Infantry Fighting Vehicle",
    "Armoured Personnel Carrier",
    "Self-Propelled Howitzer",
    "Unarmoured Vehicle",
    "Air Defence System",
];

/// `n` questions cycling through the class list.
fn dataset(n: usize, quiz_length: usize, mcq_options: usize) -> Dataset {
    Dataset {
        title: Some("Landmacht".into()),
        questions: (0..n)
            .map(|i| Question {
                id: format!("lm_{i}"),
                asset: format!("vehicle-{i}"),
                class: CLASSES[i % CLASSES.len()].to_string(),
                answer: format!("Platform {i}"),
                aliases: Vec::new(),
            })
            .collect(),
        vehicle_classes: CLASSES.iter().map(|c| c.to_string()).collect(),
        quiz_length,
        mcq_options,
        speaking_prompts: vec!["I think it is a ____.".into()],
    }
}

fn session(d: Dataset, mode: QuizMode, seed: u64) -> QuizSession {
    let mut s = QuizSession::new(d, SessionConfig::seeded(seed)).unwrap();
    s.select_mode(mode).unwrap();
    s
}

/// A wrong class for the current question.
fn wrong_class(s: &QuizSession) -> String {
    let right = &s.current_question().unwrap().class;
    CLASSES.iter().find(|c| **c != right.as_str()).unwrap().to_string()
}

fn right_class(s: &QuizSession) -> String {
    s.current_question().unwrap().class.clone()
}

const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

// ── round building ──────────────────────────────────────────────────────────

#[test]
fn round_size_is_min_of_quiz_length_and_questions() {
    for (n, len) in [(4, 10), (10, 10), (25, 10), (1, 3), (7, 1)] {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let round = build_round(&mut rng, &dataset(n, len, 4), &HashSet::new()).unwrap();
            assert_eq!(round.len(), n.min(len), "n={n} len={len} seed={seed}");
            assert_eq!(round.ids().len(), round.len(), "duplicate id n={n} seed={seed}");
        }
    }
}

#[test]
fn four_questions_with_quiz_length_ten_gives_four_items() {
    let s = session(dataset(4, 10, 3), QuizMode::ClassOnly, 1);
    assert_eq!(s.position(), (0, 4));
}

#[test]
fn same_seed_produces_identical_rounds_and_options() {
    let play = |seed: u64| {
        let s = session(dataset(30, 10, 4), QuizMode::ClassAndName, seed);
        (s.current_question().unwrap().id.clone(), s.choices().to_vec())
    };
    assert_eq!(play(12345), play(12345));
}

#[test]
fn consecutive_rounds_do_not_overlap_when_dataset_is_large() {
    let mut s = session(dataset(30, 10, 4), QuizMode::ClassOnly, 3);
    let first = s.last_round_ids().clone();
    s.start_round().unwrap();
    let second = s.last_round_ids().clone();
    assert_eq!(second.len(), 10);
    assert!(first.is_disjoint(&second));
}

// ── choices ─────────────────────────────────────────────────────────────────

#[test]
fn choices_hold_correct_once_without_duplicates() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..200 {
        let pool_len = rng.gen_range(0..8usize);
        let pool: Vec<String> = (0..pool_len).map(|_| format!("v{}", rng.gen_range(0..5))).collect();
        let correct = format!("v{}", rng.gen_range(0..5));
        let k = rng.gen_range(2..7usize);

        let distinct_others = pool
            .iter()
            .filter(|v| **v != correct)
            .collect::<HashSet<_>>()
            .len();
        let out = build_choices(&mut rng, &correct, &pool, k);

        assert_eq!(out.iter().filter(|v| **v == correct).count(), 1, "{out:?}");
        assert_eq!(out.iter().collect::<HashSet<_>>().len(), out.len(), "{out:?}");
        assert_eq!(out.len(), k.min(distinct_others + 1), "pool={pool:?} k={k}");
    }
}

#[test]
fn session_choices_are_capped_by_mcq_options() {
    let mut s = session(dataset(20, 5, 4), QuizMode::ClassAndName, 9);
    assert_eq!(s.choices().len(), 4);
    let class = right_class(&s);
    s.submit_classification(&class).unwrap();
    assert_eq!(s.stage(), Some(Stage::Naming));
    assert_eq!(s.choices().len(), 4);
}

// ── streaks ─────────────────────────────────────────────────────────────────

#[test]
fn streak_tracks_trailing_run_and_best_is_max_run() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = session(dataset(40, 40, 4), QuizMode::ClassOnly, seed);
        let (mut run, mut best) = (0u32, 0u32);
        let mut prev_best = 0u32;

        for _ in 0..40 {
            let ok = rng.gen_bool(0.6);
            let pick = if ok { right_class(&s) } else { wrong_class(&s) };
            s.submit_classification(&pick).unwrap();

            run = if ok { run + 1 } else { 0 };
            best = best.max(run);
            assert_eq!(s.score().streak, run, "seed={seed}");
            assert_eq!(s.score().best_streak, best, "seed={seed}");
            assert!(s.score().best_streak >= prev_best);
            prev_best = s.score().best_streak;
            s.advance().unwrap();
        }
    }
}

#[test]
fn streaks_survive_into_the_next_round() {
    let mut s = session(dataset(6, 3, 3), QuizMode::ClassOnly, 5);
    for _ in 0..3 {
        let class = right_class(&s);
        s.submit_classification(&class).unwrap();
        s.advance().unwrap();
    }
    assert_eq!(s.phase(), Phase::Idle);
    s.start_round().unwrap();
    assert_eq!(s.score().streak, 3);
    assert_eq!(s.score().correct, 0);
    let class = right_class(&s);
    s.submit_classification(&class).unwrap();
    assert_eq!(s.score().streak, 4);
    assert_eq!(s.score().best_streak, 4);
}

#[test]
fn class_only_wrong_answer_resets_streak_and_allows_advance() {
    let mut s = session(dataset(5, 5, 4), QuizMode::ClassOnly, 2);
    for _ in 0..2 {
        let class = right_class(&s);
        s.submit_classification(&class).unwrap();
        s.advance().unwrap();
    }
    let wrong = wrong_class(&s);
    let fb = s.submit_classification(&wrong).unwrap();

    assert!(!fb.is_correct);
    assert_eq!(fb.correct_value, right_class(&s));
    assert_eq!(s.score().streak, 0);
    assert_eq!(s.score().best_streak, 2);
    assert!(s.can_advance());
    assert!(s.submit_name("Platform 0").is_none(), "no naming stage in ClassOnly");
    assert_eq!(s.advance(), Some(AdvanceOutcome::NextQuestion));
}

// ── naming ──────────────────────────────────────────────────────────────────

#[test]
fn correct_class_then_wrong_name_keeps_streak() {
    let mut s = session(dataset(5, 5, 4), QuizMode::ClassAndName, 4);
    let qid = s.current_question().unwrap().id.clone();
    let class = right_class(&s);
    s.submit_classification(&class).unwrap();
    let fb = s.submit_name("Not a platform").unwrap();

    assert!(!fb.is_correct);
    assert_eq!(s.phase(), Phase::Revealing);
    assert_eq!(s.score().streak, 1);
    assert_eq!(s.score().best_streak, 1);

    let rec = s.attempts().iter().find(|r| r.question_id == qid).unwrap();
    assert!(rec.ok_class);
    assert_eq!(rec.ok_name, Some(false));
    assert_eq!(rec.chosen_name.as_deref(), Some("Not a platform"));
}

#[test]
fn naming_outcomes_never_move_streaks() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut s = session(dataset(20, 20, 4), QuizMode::ClassAndName, 31);
    for _ in 0..20 {
        let pick = if rng.gen_bool(0.5) { right_class(&s) } else { wrong_class(&s) };
        s.submit_classification(&pick).unwrap();
        let before = s.score().clone();

        let name = if rng.gen_bool(0.5) {
            s.current_question().unwrap().answer.clone()
        } else {
            "Wrong".to_string()
        };
        s.submit_name(&name).unwrap();
        assert_eq!(s.score(), &before);
        s.advance().unwrap();
    }
}

// ── round end ───────────────────────────────────────────────────────────────

#[test]
fn last_advance_completes_round_exactly_once() {
    for mode in [QuizMode::ClassOnly, QuizMode::ClassAndName] {
        let mut s = session(dataset(3, 3, 3), mode, 8);
        let mut completions = 0;
        for i in 0..3 {
            let class = right_class(&s);
            s.submit_classification(&class).unwrap();
            if mode.includes_naming() {
                let answer = s.current_question().unwrap().answer.clone();
                s.submit_name(&answer).unwrap();
            }
            match s.advance().unwrap() {
                AdvanceOutcome::NextQuestion => assert!(i < 2),
                AdvanceOutcome::RoundComplete(summary) => {
                    completions += 1;
                    assert_eq!(summary.correct, 3);
                    assert_eq!(summary.round_len, 3);
                    assert_eq!(summary.best_streak, 3);
                    assert_eq!(summary.attempts.len(), 3);
                    assert!(summary.attempts.iter().all(|r| r.is_closed(mode)));
                }
            }
        }
        assert_eq!(completions, 1);
        assert!(s.advance().is_none(), "advance after round end is a no-op");
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.mode(), Some(mode), "mode kept for the next round");
        assert_eq!(s.history().len(), 1);
    }
}

#[test]
fn class_only_records_have_no_name_fields() {
    let mut s = session(dataset(2, 2, 3), QuizMode::ClassOnly, 6);
    let mut summary = None;
    while summary.is_none() {
        let class = wrong_class(&s);
        s.submit_classification(&class).unwrap();
        if let Some(AdvanceOutcome::RoundComplete(sum)) = s.advance() {
            summary = Some(sum);
        }
    }
    for rec in summary.unwrap().attempts {
        assert!(!rec.ok_class);
        assert_eq!(rec.ok_name, None);
        assert_eq!(rec.chosen_name, None);
    }
}

// ── races ───────────────────────────────────────────────────────────────────

#[test]
fn double_classification_counts_once() {
    for mode in [QuizMode::ClassOnly, QuizMode::ClassAndName] {
        let mut s = session(dataset(5, 5, 4), mode, 10);
        let class = right_class(&s);
        assert!(s.submit_classification(&class).is_some());
        assert!(s.submit_classification(&class).is_none());
        assert_eq!(s.score().correct, 1);
        assert_eq!(s.score().answered, 1);
        assert_eq!(s.score().streak, 1);
        assert_eq!(s.attempts().len(), 1);
    }
}

#[test]
fn pending_advance_is_dropped_after_reset() {
    let mut s = session(dataset(5, 5, 4), QuizMode::ClassOnly, 11);
    let class = right_class(&s);
    s.submit_classification(&class).unwrap();
    let pending = s.token();

    s.reset_session();
    assert!(s.advance_if(pending).is_none());
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.score().streak, 0);
}

// ── report ──────────────────────────────────────────────────────────────────

#[test]
fn report_matches_played_round() {
    let mut s = session(dataset(4, 4, 4), QuizMode::ClassAndName, 13);
    let mut toggle = false;
    let summary = loop {
        toggle = !toggle;
        let pick = if toggle { right_class(&s) } else { wrong_class(&s) };
        s.submit_classification(&pick).unwrap();
        let answer = s.current_question().unwrap().answer.clone();
        s.submit_name(&answer).unwrap();
        if let Some(AdvanceOutcome::RoundComplete(summary)) = s.advance() {
            break summary;
        }
    };

    let report = TeacherReport::build(&summary.attempts);
    assert_eq!(report.attempts, 4);
    assert_eq!(report.class_correct, summary.correct);
    assert_eq!(report.name_correct, 4);
    assert_eq!(report.misses.len(), 2);
    assert_eq!(report.name_accuracy(), Some(1.0));
}

// ── bundled data ────────────────────────────────────────────────────────────

#[test]
fn bundled_branch_data_is_valid() {
    for text in [
        include_str!("../data/landmacht.json"),
        include_str!("../data/luchtmacht.json"),
        include_str!("../data/marine.json"),
    ] {
        let d = Dataset::from_json(text).unwrap();
        assert!(!d.questions.is_empty());
        assert!(d.mcq_options >= 2);
        for q in &d.questions {
            assert!(
                d.vehicle_classes.contains(&q.class),
                "{} has class '{}' outside the branch class list",
                q.id, q.class
            );
        }
    }
}
