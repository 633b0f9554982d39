use quiz_core::model::OptionLetter;

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness};
use crate::vm::QuizIntent;

fn correct_letter(harness: &ViewHarness) -> OptionLetter {
    let screen = harness.screen();
    harness
        .bank
        .iter()
        .find(|(_, question)| question.text() == screen.question)
        .map(|(_, question)| question.correct_letter())
        .expect("current question in bank")
}

fn wrong_letter(harness: &ViewHarness) -> OptionLetter {
    match correct_letter(harness) {
        OptionLetter::A => OptionLetter::B,
        _ => OptionLetter::A,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_title_and_bank_size() {
    let mut harness = setup_view_harness(ViewKind::Home, "KCNA Exam Prep");
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("KCNA Exam Prep"), "missing title in {html}");
    assert!(html.contains("Questions in bank: 3"), "missing bank size in {html}");
    assert!(html.contains("Start Quiz"), "missing start link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz, "KCNA Exam Prep");
    harness.rebuild();
    let html = harness.render();
    let screen = harness.screen();

    assert!(html.contains("Question 1 of 3"), "missing heading in {html}");
    assert!(html.contains(&screen.question), "missing question in {html}");
    for option in &screen.options {
        assert!(html.contains(&option.label), "missing {} in {html}", option.label);
    }
    assert_eq!(screen.options.len(), 3);
    assert!(html.contains("Submit"), "missing submit in {html}");
    assert!(html.contains("Next Question"), "missing next in {html}");
    assert!(html.contains("Session Score: 0"), "missing score in {html}");
    assert!(
        html.contains("Total Unique Questions Answered: 0"),
        "missing lifetime in {html}"
    );
    assert!(html.contains("<progress"), "missing progress bar in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_correct_answer_flow() {
    let mut harness = setup_view_harness(ViewKind::Quiz, "Quiz");
    harness.rebuild();

    let correct = correct_letter(&harness);
    harness.dispatch(QuizIntent::Select(correct));
    assert!(harness.screen().can_submit);
    harness.dispatch(QuizIntent::Submit);

    let html = harness.render();
    assert!(html.contains("Correct!"), "missing feedback in {html}");
    assert!(!html.contains("Explanation:"), "unexpected explanation in {html}");
    assert_eq!(harness.screen().score_label, "Session Score: 1 / 1");
    assert!(harness.screen().can_advance);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_incorrect_answer_flow() {
    let mut harness = setup_view_harness(ViewKind::Quiz, "Quiz");
    harness.rebuild();

    let wrong = wrong_letter(&harness);
    harness.dispatch(QuizIntent::Select(wrong));
    harness.dispatch(QuizIntent::Submit);

    let html = harness.render();
    assert!(
        html.contains("Incorrect. Correct answer: "),
        "missing feedback in {html}"
    );
    assert!(html.contains("Explanation: "), "missing explanation in {html}");
    assert_eq!(harness.screen().score_label, "Session Score: 0 / 1");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_next_without_submit_shows_error() {
    let mut harness = setup_view_harness(ViewKind::Quiz, "Quiz");
    harness.rebuild();

    harness.dispatch(QuizIntent::Next);

    let html = harness.render();
    assert!(
        html.contains("Submit an answer before moving on."),
        "missing error in {html}"
    );
    assert_eq!(harness.screen().heading, "Question 1 of 3");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_full_pass_shows_completion() {
    let mut harness = setup_view_harness(ViewKind::Quiz, "Quiz");
    harness.rebuild();

    for _ in 0..3 {
        let correct = correct_letter(&harness);
        harness.dispatch(QuizIntent::Select(correct));
        harness.dispatch(QuizIntent::Submit);
        harness.dispatch(QuizIntent::Next);
    }

    let html = harness.render();
    assert!(
        html.contains("completed all questions in this session!"),
        "missing completion notice in {html}"
    );
    assert!(html.contains("Question 1 of 3"), "missing wraparound in {html}");
    let screen = harness.screen();
    assert_eq!(screen.score_label, "Session Score: 3 / 3");
    assert_eq!(screen.lifetime_label, "Total Unique Questions Answered: 3 / 3");
}
