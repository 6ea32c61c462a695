//! Scripted play-through of both quiz modes.
//!
//! Run with: `cargo run --example demo`
//!
//! This example shows how `vehicle_drill` works end to end:
//!
//! 1. **ClassOnly**: one Landmacht round where the "learner" always picks the
//!    first option, printing the verdict after each answer and the round
//!    summary at the end.
//!
//! 2. **ClassAndName**: one Marine round that answers the class correctly and
//!    then guesses the name, showing that naming misses leave the streak alone.
//!
//! 3. **Teacher report**: the attempt records of both rounds summarised per
//!    class.
//!
//! ## Key concepts demonstrated
//!
//! - `SessionConfig::seeded(u64)` makes the rounds and option orders
//!   fully deterministic.
//! - `advance()` is what a host's "Next" button (or feedback timer) calls;
//!   it returns `RoundComplete` exactly once per round.
//! - `to_view_state()` produces the JSON a web front-end renders from.

use vehicle_drill::{
    to_view_state, training_engine::helpers::feedback_line, AdvanceOutcome, AttemptRecord,
    Dataset, QuizMode, QuizSession, RoundSummary, SessionConfig, TeacherReport,
};

const LANDMACHT: &str = include_str!("../data/landmacht.json");
const MARINE: &str = include_str!("../data/marine.json");

fn play(session: &mut QuizSession, answer_class_right: bool) -> RoundSummary {
    loop {
        let q = session.current_question().expect("round in progress").clone();
        let pick = if answer_class_right { q.class.clone() } else { session.choices()[0].clone() };
        let fb = session.submit_classification(&pick).expect("classification stage");
        println!("  [{}] {:<28} {}", q.asset, pick, feedback_line(&fb));

        if session.mode() == Some(QuizMode::ClassAndName) {
            let guess = session.choices()[0].clone();
            let fb = session.submit_name(&guess).expect("naming stage");
            println!("  {:<33} {}", "", feedback_line(&fb));
        }
        println!(
            "  {:<33} streak {} (best {})",
            "", session.score().streak, session.score().best_streak
        );

        if let Some(AdvanceOutcome::RoundComplete(summary)) = session.advance() {
            return summary;
        }
    }
}

fn print_summary(label: &str, s: &RoundSummary) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {label}: {} / {} correct, best streak {}", s.correct, s.round_len, s.best_streak);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
}

fn main() {
    let mut records: Vec<AttemptRecord> = Vec::new();

    // ── ClassOnly ─────────────────────────────────────────────────────────
    println!();
    println!("══ Landmacht · {} ══", QuizMode::ClassOnly);
    let dataset = Dataset::from_json(LANDMACHT).expect("bundled landmacht data");
    let mut session = QuizSession::new(dataset, SessionConfig::seeded(42)).expect("valid dataset");
    session.select_mode(QuizMode::ClassOnly).expect("non-empty dataset");
    println!(
        "{}",
        serde_json::to_string_pretty(&to_view_state(&session)).expect("view state serialises")
    );
    let summary = play(&mut session, false);
    print_summary("Landmacht", &summary);
    records.extend(summary.attempts);

    // ── ClassAndName ──────────────────────────────────────────────────────
    println!("══ Marine · {} ══", QuizMode::ClassAndName);
    let dataset = Dataset::from_json(MARINE).expect("bundled marine data");
    let mut session = QuizSession::new(dataset, SessionConfig::seeded(7)).expect("valid dataset");
    session.select_mode(QuizMode::ClassAndName).expect("non-empty dataset");
    let summary = play(&mut session, true);
    print_summary("Marine", &summary);
    records.extend(summary.attempts);

    // ── Teacher report ────────────────────────────────────────────────────
    let report = TeacherReport::build(&records);
    println!("══ Teacher report ══");
    println!("  Classification: {:.0}%", report.class_accuracy() * 100.0);
    if let Some(acc) = report.name_accuracy() {
        println!("  Naming:         {:.0}%", acc * 100.0);
    }
    for tally in &report.by_class {
        println!("  {:<32} {}/{}", tally.class, tally.correct, tally.attempts);
    }
}
