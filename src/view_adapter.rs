use serde_json::{json, Value};
use crate::training_engine::{
    helpers::{feedback_line, progress_percent, step_label},
    models::{QuizMode, Stage},
    session::{Phase, QuizSession},
};

/// Badge row: round score plus streaks.
fn stats(session: &QuizSession) -> Value {
    let score = session.score();
    json!({
        "correct": score.correct,
        "answered": score.answered,
        "streak": score.streak,
        "bestStreak": score.best_streak,
        "totalCorrect": score.total_correct,
        "totalAnswered": score.total_answered
    })
}

/// Top bar: title and "Round: x/y".
fn top_bar(session: &QuizSession) -> Value {
    let dataset = session.dataset();
    let (index, len) = session.position();
    let total = if len > 0 { len } else { dataset.round_len() };
    json!({
        "title": dataset.title.clone().unwrap_or_else(|| "Vehicle Identification Trainer".to_string()),
        "subtitle": format!("{total} questions"),
        "round": format!("{index}/{total}")
    })
}

fn mode_buttons() -> Value {
    json!([
        { "mode": "ClassOnly",    "label": QuizMode::ClassOnly.to_string() },
        { "mode": "ClassAndName", "label": QuizMode::ClassAndName.to_string() }
    ])
}

/// Which option buttons to mark once a stage is answered.
fn option_marks(options: &[String], correct: Option<&str>, chosen: Option<&str>) -> Value {
    let marks: Vec<Value> = options
        .iter()
        .map(|opt| {
            let state = match (correct, chosen) {
                (Some(c), _) if c == opt.as_str()         => "correct",
                (Some(_), Some(ch)) if ch == opt.as_str() => "wrong",
                _                                         => "",
            };
            json!({ "value": opt, "mark": state })
        })
        .collect();
    Value::Array(marks)
}

/// Map the session to the JSON view model a host UI renders from.
///
/// Idle sessions produce the start screen (or the end-of-round screen when a
/// round has just finished); otherwise the question screen.
pub fn to_view_state(session: &QuizSession) -> Value {
    let dataset = session.dataset();

    let Some(question) = session.current_question() else {
        let finished = session.mode().and(session.last_summary()).map(|s| {
            json!({
                "correct": s.correct,
                "roundLen": s.round_len,
                "bestStreak": s.best_streak
            })
        });
        return json!({
            "screen": if finished.is_some() { "roundFinished" } else { "start" },
            "topBar": top_bar(session),
            "modes": mode_buttons(),
            "theory": dataset.theory(),
            "summary": finished,
            "stats": stats(session)
        });
    };

    let mode = session.mode().unwrap_or(QuizMode::ClassOnly);
    let stage = session.stage().unwrap_or(Stage::Classification);
    let (index, len) = session.position();

    // After an answer the buttons stay on screen with the verdict marked.
    let answered = matches!(session.phase(), Phase::ClassAnswered | Phase::Revealing);
    let feedback = session.last_feedback();
    let options = if answered {
        option_marks(
            session.choices(),
            feedback.map(|f| f.correct_value.as_str()),
            feedback.map(|f| f.chosen.as_str()),
        )
    } else {
        option_marks(session.choices(), None, None)
    };

    let reveal = (session.phase() == Phase::Revealing).then(|| {
        json!({ "class": question.class, "name": question.answer })
    });

    json!({
        "screen": "question",
        "topBar": top_bar(session),
        "progress": progress_percent(index, len),
        "asset": question.asset,
        "stats": stats(session),
        "speakingPrompts": dataset.speaking_prompts,
        "step": step_label(mode, stage),
        "stage": stage.to_string(),
        "options": options,
        "locked": answered,
        "feedback": feedback.map(feedback_line),
        "reveal": reveal,
        "showNext": session.can_advance()
    })
}
