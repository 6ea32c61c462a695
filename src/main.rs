//! Terminal front-end: plays rounds of one branch on stdin/stdout.
//!
//! Run with: `cargo run -- --branch landmacht --mode combo --data-dir app/data`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, warn};

use vehicle_drill::{
    to_view_state,
    training_engine::helpers::{feedback_line, step_label},
    AdvanceOutcome, AttemptRecord, Branch, Phase, QuizMode, QuizSession, RoundSummary,
    SessionConfig, Stage, TeacherGate, TeacherReport, TrainerError, TrainerSettings,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Classification only
    Class,
    /// Classification + naming
    Combo,
}

impl From<ModeArg> for QuizMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Class => QuizMode::ClassOnly,
            ModeArg::Combo => QuizMode::ClassAndName,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "vehicle-drill", version, about = "Vehicle identification quiz trainer")]
struct Cli {
    /// Branch to practise: landmacht, luchtmacht or marine
    #[arg(long, default_value = "landmacht")]
    branch: String,

    #[arg(long, value_enum, default_value_t = ModeArg::Class)]
    mode: ModeArg,

    /// Directory holding `<branch>.json`; overrides the settings file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "vehicle-drill.json")]
    settings: PathBuf,

    /// Stop after this many completed rounds
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Print the JSON view model instead of text screens
    #[arg(long)]
    json: bool,

    /// Store a teacher PIN in the settings file and exit
    #[arg(long)]
    set_pin: Option<String>,
}

enum Command {
    Pick(usize),
    Next,
    NewRound,
    ChangeMode,
    Reset,
    Report,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        ""  => Some(Command::Next),
        "n" => Some(Command::NewRound),
        "c" => Some(Command::ChangeMode),
        "r" => Some(Command::Reset),
        "t" => Some(Command::Report),
        "q" => Some(Command::Quit),
        other => other.parse().ok().filter(|&i| i > 0).map(Command::Pick),
    }
}

fn render(session: &QuizSession, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&to_view_state(session))?);
        return Ok(());
    }

    let Some(question) = session.current_question() else {
        println!();
        println!("What do you want to practise today?");
        println!("  [1] {}", QuizMode::ClassOnly);
        println!("  [2] {}", QuizMode::ClassAndName);
        println!("  Classes: {}", session.dataset().theory().join(", "));
        return Ok(());
    };

    let score = session.score();
    let (index, len) = session.position();
    let mode = session.mode().unwrap_or(QuizMode::ClassOnly);
    let stage = session.stage().unwrap_or(Stage::Classification);

    println!();
    println!(
        "Round {}/{}   correct {}/{}   streak {} (best {})",
        index + 1, len, score.correct, score.answered, score.streak, score.best_streak
    );
    println!("Image: {}", question.asset);
    for prompt in &session.dataset().speaking_prompts {
        println!("  Speak: {prompt}");
    }
    println!("{}", step_label(mode, stage));

    if session.phase() == Phase::Revealing {
        println!("  Class: {}   Name: {}", question.class, question.answer);
    } else {
        for (i, choice) in session.choices().iter().enumerate() {
            println!("  [{}] {choice}", i + 1);
        }
    }
    if session.can_advance() {
        println!("[Enter] Next");
    }
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn print_summary(summary: &RoundSummary) {
    println!();
    println!("Round finished");
    println!("  Correct {} / {}", summary.correct, summary.round_len);
    println!("  Best streak {}", summary.best_streak);
    println!("  [n] new round  [c] change practice  [q] quit");
}

fn print_report(records: &[AttemptRecord]) {
    let report = TeacherReport::build(records);
    println!();
    println!("Teacher report: {} answers", report.attempts);
    println!("  Classification accuracy: {:.0}%", report.class_accuracy() * 100.0);
    if let Some(acc) = report.name_accuracy() {
        println!("  Naming accuracy: {:.0}%", acc * 100.0);
    }
    for tally in &report.by_class {
        println!("  {:<32} {}/{}", tally.class, tally.correct, tally.attempts);
    }
    for miss in &report.misses {
        println!(
            "  missed {}: chose {} / {}",
            miss.question_id,
            miss.chosen_class,
            miss.chosen_name.as_deref().unwrap_or("-")
        );
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = TrainerSettings::load_or_default(&cli.settings)
        .with_context(|| format!("reading settings {}", cli.settings.display()))?;

    if let Some(pin) = cli.set_pin {
        settings.teacher_pin = Some(pin);
        settings.save(&cli.settings)?;
        println!("Teacher PIN saved to {}", cli.settings.display());
        return Ok(());
    }

    let branch = Branch::from_id(&cli.branch)?;
    let data_dir = cli.data_dir.unwrap_or_else(|| settings.data_dir.clone());
    let dataset = branch
        .load(&data_dir)
        .with_context(|| format!("could not load data for {branch}"))?;

    let gate = TeacherGate::new(settings.teacher_pin.clone());
    let mut session = QuizSession::new(dataset, SessionConfig { rng_seed: cli.seed })?;
    match session.select_mode(cli.mode.into()) {
        Err(TrainerError::EmptyDataset) => {
            println!("No items yet. This branch has no questions loaded.");
            return Ok(());
        }
        other => other?,
    }
    info!("practising {branch}");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut rounds_done = 0u32;

    loop {
        render(&session, cli.json)?;
        let Some(line) = lines.next() else { break };
        let line = line?;

        match parse_command(&line) {
            Some(Command::Pick(n)) if session.phase() == Phase::Idle => {
                let mode = match n {
                    1 => QuizMode::ClassOnly,
                    2 => QuizMode::ClassAndName,
                    _ => continue,
                };
                session.select_mode(mode)?;
            }
            Some(Command::Pick(n)) => {
                let Some(choice) = session.choices().get(n - 1).cloned() else {
                    println!("No option {n}.");
                    continue;
                };
                let feedback = match session.stage() {
                    Some(Stage::Naming) => session.submit_name(&choice),
                    _                   => session.submit_classification(&choice),
                };
                if let Some(fb) = feedback {
                    println!("{}", feedback_line(&fb));
                }
            }
            Some(Command::Next) => {
                if let Some(AdvanceOutcome::RoundComplete(summary)) = session.advance() {
                    print_summary(&summary);
                    rounds_done += 1;
                    if rounds_done >= cli.rounds {
                        break;
                    }
                }
            }
            Some(Command::NewRound) => {
                if session.mode().is_some() {
                    session.start_round()?;
                }
            }
            Some(Command::ChangeMode) => session.change_mode(),
            Some(Command::Reset) => session.reset_session(),
            Some(Command::Report) => {
                if gate.is_locked() {
                    print!("PIN: ");
                    io::stdout().flush()?;
                    let pin = lines.next().transpose()?.unwrap_or_default();
                    if !gate.unlock(&pin) {
                        warn!("wrong teacher PIN");
                        println!("Wrong PIN.");
                        continue;
                    }
                }
                print_report(&session.all_attempts());
            }
            Some(Command::Quit) => break,
            None => println!("Pick an option number, Enter for next, or n/c/r/t/q."),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
