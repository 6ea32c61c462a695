//! The quiz progression state machine.
//!
//! A [`QuizSession`] owns one branch's dataset and walks rounds of questions
//! through their stages:
//!
//! ```text
//! Idle ── select_mode / start_round ──▶ Classifying
//! Classifying ── submit_classification ──▶ Naming          (ClassAndName)
//!                                     └──▶ ClassAnswered   (ClassOnly)
//! Naming ── submit_name ──▶ Revealing
//! ClassAnswered | Revealing ── advance ──▶ Classifying | Idle (round over)
//! ```
//!
//! Every transition is synchronous. Display delays belong to the caller, who
//! can capture a [`StepToken`] when scheduling one and replay it through
//! [`QuizSession::with_token`] so a callback that outlived a mode change or a
//! new round is dropped instead of applied to the wrong question.
//!
//! Operations called in the wrong phase return `None` and change nothing.

use std::collections::HashSet;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::training_engine::{
    attempt_log::AttemptLog,
    choices::build_choices,
    dataset::Dataset,
    error::{Result, TrainerError},
    models::{AttemptRecord, Feedback, Question, QuizMode, RoundSummary, SessionConfig, Stage},
    round::{build_round, Round},
};

/// Where the session currently is within a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No round in progress.
    Idle,
    /// Waiting for a classification answer.
    Classifying,
    /// ClassOnly: classification answered, waiting for `advance()`.
    ClassAnswered,
    /// ClassAndName: waiting for the platform name.
    Naming,
    /// ClassAndName: both answers shown, waiting for `advance()`.
    Revealing,
}

impl Phase {
    pub fn stage(self) -> Option<Stage> {
        match self {
            Phase::Idle                              => None,
            Phase::Classifying | Phase::ClassAnswered => Some(Stage::Classification),
            Phase::Naming                            => Some(Stage::Naming),
            Phase::Revealing                         => Some(Stage::Reveal),
        }
    }
}

/// Identifies one step of one round; stale once the session moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepToken {
    round_serial: u64,
    index: usize,
    phase: Phase,
}

/// Streaks and counters shown on the score badges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Consecutive correct classifications.
    pub streak: u32,
    pub best_streak: u32,
    /// Correct classifications in the current round.
    pub correct: u32,
    /// Classifications answered in the current round.
    pub answered: u32,
    pub total_correct: u32,
    pub total_answered: u32,
}

impl ScoreBoard {
    fn record_classification(&mut self, ok: bool) {
        self.answered += 1;
        self.total_answered += 1;
        if ok {
            self.correct += 1;
            self.total_correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    fn start_round(&mut self) {
        self.correct = 0;
        self.answered = 0;
    }
}

/// What `advance()` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion,
    RoundComplete(RoundSummary),
}

pub struct QuizSession {
    dataset: Dataset,
    name_pool: Vec<String>,
    rng: StdRng,
    mode: Option<QuizMode>,
    phase: Phase,
    round: Option<Round>,
    /// Bumped whenever the round is replaced or dropped; invalidates tokens.
    round_serial: u64,
    choices: Vec<String>,
    last_feedback: Option<Feedback>,
    score: ScoreBoard,
    log: AttemptLog,
    last_round_ids: HashSet<String>,
    history: Vec<RoundSummary>,
    /// Records of finished and abandoned rounds, oldest first.
    archive: Vec<AttemptRecord>,
}

impl QuizSession {
    /// Fails with [`TrainerError::InvalidDataset`] if `dataset` does not
    /// pass [`Dataset::validate`].
    pub fn new(dataset: Dataset, config: SessionConfig) -> Result<Self> {
        dataset.validate()?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let name_pool = dataset.name_pool();
        Ok(QuizSession {
            dataset,
            name_pool,
            rng,
            mode: None,
            phase: Phase::Idle,
            round: None,
            round_serial: 0,
            choices: Vec::new(),
            last_feedback: None,
            score: ScoreBoard::default(),
            log: AttemptLog::new(),
            last_round_ids: HashSet::new(),
            history: Vec::new(),
            archive: Vec::new(),
        })
    }

    // ── accessors ───────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn mode(&self) -> Option<QuizMode> { self.mode }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn stage(&self) -> Option<Stage> { self.phase.stage() }
    pub fn score(&self) -> &ScoreBoard { &self.score }
    pub fn choices(&self) -> &[String] { &self.choices }
    pub fn last_feedback(&self) -> Option<&Feedback> { self.last_feedback.as_ref() }
    pub fn attempts(&self) -> &[AttemptRecord] { self.log.records() }
    pub fn history(&self) -> &[RoundSummary] { &self.history }
    pub fn last_summary(&self) -> Option<&RoundSummary> { self.history.last() }
    pub fn last_round_ids(&self) -> &HashSet<String> { &self.last_round_ids }

    /// Every attempt since the last reset, including rounds left early via
    /// "New round" or a mode change, followed by the current round's.
    pub fn all_attempts(&self) -> Vec<AttemptRecord> {
        let mut records = self.archive.clone();
        records.extend_from_slice(self.log.records());
        records
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Idle => None,
            _ => self.round.as_ref().and_then(Round::current),
        }
    }

    /// `(index, round length)`; `(0, 0)` when no round is in progress.
    pub fn position(&self) -> (usize, usize) {
        self.round.as_ref().map_or((0, 0), |r| (r.index, r.len()))
    }

    /// True when `advance()` would move on.
    pub fn can_advance(&self) -> bool {
        matches!(self.phase, Phase::ClassAnswered | Phase::Revealing)
    }

    pub fn token(&self) -> StepToken {
        StepToken {
            round_serial: self.round_serial,
            index: self.position().0,
            phase: self.phase,
        }
    }

    /// Run `action` only if the session is still at the step `token` was
    /// taken from.
    pub fn with_token<T>(
        &mut self,
        token: StepToken,
        action: impl FnOnce(&mut Self) -> Option<T>,
    ) -> Option<T> {
        if self.token() != token {
            debug!("dropping stale action for {:?} (now {:?})", token, self.token());
            return None;
        }
        action(self)
    }

    /// Scheduled auto-advance: applies only if nothing moved since `token`.
    pub fn advance_if(&mut self, token: StepToken) -> Option<AdvanceOutcome> {
        self.with_token(token, Self::advance)
    }

    // ── mode / round lifecycle ──────────────────────────────────────────────

    /// Choose a mode and immediately start a round in it.
    pub fn select_mode(&mut self, mode: QuizMode) -> Result<()> {
        info!("mode selected: {mode}");
        self.mode = Some(mode);
        self.start_round()
    }

    /// Start a fresh round in the current mode; also used mid-round for
    /// "New round". Streaks carry over, per-round counters do not.
    pub fn start_round(&mut self) -> Result<()> {
        let mode = self.mode.ok_or(TrainerError::NoModeSelected)?;
        self.round_serial += 1;
        self.choices.clear();
        self.last_feedback = None;
        self.archive_log();
        self.score.start_round();

        let round = match build_round(&mut self.rng, &self.dataset, &self.last_round_ids) {
            Ok(round) => round,
            Err(err) => {
                self.round = None;
                self.phase = Phase::Idle;
                return Err(err);
            }
        };
        self.last_round_ids = round.ids();
        info!("round {} started: {} questions, {mode}", self.round_serial, round.len());
        self.round = Some(round);
        self.phase = Phase::Classifying;
        self.prepare_choices(Stage::Classification);
        Ok(())
    }

    /// Back to mode selection. Scores and streaks are kept.
    pub fn change_mode(&mut self) {
        info!("mode cleared");
        self.mode = None;
        self.drop_round();
    }

    /// Back to mode selection with all scoring and history wiped.
    pub fn reset_session(&mut self) {
        info!("session reset");
        self.change_mode();
        self.score = ScoreBoard::default();
        self.history.clear();
        self.archive.clear();
        self.last_round_ids.clear();
    }

    fn drop_round(&mut self) {
        self.round_serial += 1;
        self.round = None;
        self.phase = Phase::Idle;
        self.choices.clear();
        self.last_feedback = None;
        self.archive_log();
    }

    fn archive_log(&mut self) {
        let log = std::mem::take(&mut self.log);
        if !log.is_empty() {
            debug!("archiving {} attempts of round {}", log.len(), self.round_serial);
        }
        self.archive.extend(log.into_records());
    }

    // ── answering ───────────────────────────────────────────────────────────

    pub fn submit_classification(&mut self, chosen: &str) -> Option<Feedback> {
        if self.phase != Phase::Classifying {
            debug!("classification '{chosen}' ignored in {:?}", self.phase);
            return None;
        }
        let mode = self.mode?;
        let question = self.current_question()?.clone();

        let ok = chosen == question.class;
        self.score.record_classification(ok);
        self.log.record_classification(&question, chosen);
        debug!(
            "q={} class '{}' ok={} streak={}",
            question.id, chosen, ok, self.score.streak
        );

        let feedback = Feedback {
            stage: Stage::Classification,
            is_correct: ok,
            chosen: chosen.to_string(),
            correct_value: question.class,
        };
        self.last_feedback = Some(feedback.clone());

        if mode.includes_naming() {
            self.phase = Phase::Naming;
            self.prepare_choices(Stage::Naming);
        } else {
            self.phase = Phase::ClassAnswered;
        }
        Some(feedback)
    }

    /// Naming outcomes never touch the streak.
    pub fn submit_name(&mut self, chosen: &str) -> Option<Feedback> {
        if self.phase != Phase::Naming {
            debug!("name '{chosen}' ignored in {:?}", self.phase);
            return None;
        }
        let question = self.current_question()?.clone();

        let ok = chosen == question.answer;
        self.log.record_name(&question.id, chosen);
        debug!("q={} name '{}' ok={}", question.id, chosen, ok);

        let feedback = Feedback {
            stage: Stage::Naming,
            is_correct: ok,
            chosen: chosen.to_string(),
            correct_value: question.answer,
        };
        self.last_feedback = Some(feedback.clone());
        self.phase = Phase::Revealing;
        Some(feedback)
    }

    pub fn advance(&mut self) -> Option<AdvanceOutcome> {
        if !self.can_advance() {
            debug!("advance ignored in {:?}", self.phase);
            return None;
        }
        let mode = self.mode?;
        let round = self.round.as_mut()?;
        round.index += 1;
        self.last_feedback = None;

        if !round.is_finished() {
            self.phase = Phase::Classifying;
            self.prepare_choices(Stage::Classification);
            return Some(AdvanceOutcome::NextQuestion);
        }

        let round_len = round.len();
        let attempts = self.log.records().to_vec();
        let summary = RoundSummary {
            mode,
            correct: self.score.correct,
            answered: self.score.answered,
            round_len,
            best_streak: self.score.best_streak,
            attempts,
        };
        info!(
            "round {} complete: {}/{} correct, best streak {}",
            self.round_serial, summary.correct, round_len, summary.best_streak
        );
        self.history.push(summary.clone());
        self.drop_round();
        Some(AdvanceOutcome::RoundComplete(summary))
    }

    fn prepare_choices(&mut self, stage: Stage) {
        let k = self.dataset.mcq_options;
        let Some(question) = self.round.as_ref().and_then(Round::current) else {
            self.choices.clear();
            return;
        };
        self.choices = match stage {
            Stage::Classification => {
                build_choices(&mut self.rng, &question.class, &self.dataset.vehicle_classes, k)
            }
            Stage::Naming => build_choices(&mut self.rng, &question.answer, &self.name_pool, k),
            Stage::Reveal => Vec::new(),
        };
    }
}
