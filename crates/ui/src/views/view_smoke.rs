use dioxus::prelude::*;
use quiz_core::{RawQuestion, SessionPhase};

use super::test_harness::{Reply, setup_gated_quiz_harness, setup_quiz_harness};
use crate::vm::{QuizIntent, QuizScreen};

fn batch() -> Reply {
    Reply::Batch(vec![
        RawQuestion::new("Capital of Caf&eacute; land?", "Paris", ["London", "Rome", "Oslo"]),
        RawQuestion::new("2 + 2?", "4", ["5"]),
    ])
}

#[tokio::test(flavor = "current_thread")]
async fn intro_renders_title_and_start_button() {
    let harness = setup_quiz_harness(batch(), false);

    let html = harness.render();

    assert!(html.contains("Quizzical"), "missing title in {html}");
    assert!(html.contains("Start quiz"), "missing start button in {html}");
    assert!(!html.contains("Check answers"), "questions shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn start_loads_and_renders_decoded_questions() {
    let mut harness = setup_gated_quiz_harness(batch());

    harness.dispatch(QuizIntent::Start);
    harness.settle().await;
    assert_eq!(harness.vm().peek().screen(), QuizScreen::Loading);
    let html = harness.render();
    assert!(html.contains("Loading questions..."), "missing loading text in {html}");
    assert!(!html.contains("Start quiz"), "start button shown while loading in {html}");

    harness.release_fetch();
    harness.settle().await;
    let html = harness.render();

    assert_eq!(harness.vm().peek().screen(), QuizScreen::Questions);
    assert!(html.contains("Capital of Café land?"), "missing decoded text in {html}");
    assert!(!html.contains("&amp;eacute;"), "entity leaked into {html}");
    assert!(html.contains("Check answers"), "missing check button in {html}");
    assert_eq!(html.matches("answers-button").count(), 6);
}

#[tokio::test(flavor = "current_thread")]
async fn check_then_play_again_cycles_the_round() {
    let mut harness = setup_quiz_harness(batch(), false);
    harness.dispatch(QuizIntent::Start);
    harness.settle().await;

    let correct = {
        let vm = harness.vm();
        let vm = vm.peek();
        vm.session().quiz().get(1).map(|q| q.correct_answer_index())
    };
    let correct = correct.expect("second question present");

    harness.dispatch(QuizIntent::Select {
        question: 1,
        answer: correct,
    });
    assert!(harness.render().contains("answers-button selected"));

    harness.dispatch(QuizIntent::Check);
    let html = harness.render();
    assert!(html.contains("You scored 1 / 2"), "missing score in {html}");
    assert!(html.contains("Play again"), "missing play again in {html}");
    assert!(html.contains("checked-answers"), "missing checked class in {html}");
    assert!(html.contains("correct-answer"), "missing reveal in {html}");

    harness.dispatch(QuizIntent::PlayAgain);
    harness.settle().await;

    let vm = harness.vm();
    assert_eq!(vm.peek().session().phase(), SessionPhase::Answering);
    assert!(vm.peek().session().selections().is_empty());
    assert!(harness.render().contains("Check answers"));
}

#[tokio::test(flavor = "current_thread")]
async fn failed_fetch_shows_message_and_allows_retry() {
    let mut harness = setup_gated_quiz_harness(Reply::RateLimited);

    harness.dispatch(QuizIntent::Start);
    harness.release_fetch();
    harness.settle().await;
    let html = harness.render();

    assert_eq!(harness.vm().peek().screen(), QuizScreen::Intro);
    assert!(html.contains("Could not load questions"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry button in {html}");

    harness.dispatch(QuizIntent::Start);
    harness.settle().await;
    assert_eq!(harness.vm().peek().screen(), QuizScreen::Loading);
    let html = harness.render();
    assert!(html.contains("Loading questions..."), "missing loading text in {html}");
    assert!(!html.contains("Could not load questions"), "stale error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn empty_batch_reports_no_questions() {
    let mut harness = setup_quiz_harness(Reply::Batch(Vec::new()), false);

    harness.dispatch(QuizIntent::Start);
    harness.settle().await;

    assert!(harness.render().contains("No questions are available"));
}

#[tokio::test(flavor = "current_thread")]
async fn launch_prefetch_lets_start_skip_loading() {
    let mut harness = setup_quiz_harness(batch(), true);
    harness.settle().await;

    assert!(harness.vm().peek().session().has_resident_batch());
    assert_eq!(harness.vm().peek().screen(), QuizScreen::Intro);

    harness.dispatch(QuizIntent::Start);

    assert_eq!(harness.vm().peek().screen(), QuizScreen::Questions);
}
