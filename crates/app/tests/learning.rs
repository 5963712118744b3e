// Path: crates/app/tests/learning.rs

mod common;

use common::*;
use learnchain_api::mock::MockBackend;
use learnchain_app::screens::bundle::{
    BundleScreen, CERTIFICATE_ISSUED, LABEL_COMPLETE_ALL, LABEL_GET_CERTIFICATE,
    LABEL_HAS_CERTIFICATE, CERTIFICATE_FAILED,
};
use learnchain_app::screens::document::DocumentScreen;
use learnchain_app::screens::learn::{LearnScreen, LESSON_COMPLETED, NOT_ENROLLED};
use learnchain_app::screens::quiz::FinalTestScreen;
use learnchain_app::{Notice, Route, ViewState};
use learnchain_types::QuizResult;

fn learn_screen(course: learnchain_types::Course) -> LearnScreen {
    let mut screen = LearnScreen::new(course.id.clone(), false);
    screen.state = ViewState::Loaded(course);
    screen
}

#[tokio::test]
async fn completing_a_lesson_updates_progress_with_the_token() {
    let backend = MockBackend::new().with_enrollment(enrollment("e1", "c1", false));
    let mut user = student(Some(STUDENT_WALLET));
    user.enrollments.push(enrollment("e1", "c1", false));
    let mut h = logged_in(backend, user);
    let mut screen = learn_screen(course("c1", 0.0, &["d1", "d2", "d3", "d4"]));

    let effect = screen.complete_lesson(&mut h.ctx, "d2").await;

    assert_eq!(effect.notice, Some(Notice::alert("Success", LESSON_COMPLETED)));
    let updates = h.backend.calls_to("update_enrollment");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].token.as_deref(), Some(TOKEN));
    assert_eq!(updates[0].detail, "e1");
    let local = h.ctx.session.enrollment_for_course("c1").unwrap();
    assert_eq!(local.completed_items, vec!["d2".to_string()]);
    assert_eq!(local.progress, 25.0);
    assert!(screen.is_lesson_complete(&h.ctx.session, "d2"));

    // Completing it again is a no-op.
    screen.complete_lesson(&mut h.ctx, "d2").await;
    assert_eq!(h.backend.calls_to("update_enrollment").len(), 1);

    screen.complete_lesson(&mut h.ctx, "d4").await;
    let stored = h.backend.stored_enrollment("e1").unwrap();
    assert_eq!(stored.completed_items, vec!["d2".to_string(), "d4".to_string()]);
    assert_eq!(stored.progress, 50.0);
}

#[tokio::test]
async fn lesson_without_enrollment_is_refused_locally() {
    let mut h = logged_in(MockBackend::new(), student(None));
    let mut screen = learn_screen(course("c1", 0.0, &["d1"]));

    let effect = screen.complete_lesson(&mut h.ctx, "d1").await;

    assert_eq!(effect.notice, Some(Notice::alert("Error", NOT_ENROLLED)));
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn document_screen_returns_to_the_course() {
    let backend = MockBackend::new().with_enrollment(enrollment("e1", "c1", false));
    let mut user = student(None);
    user.enrollments.push(enrollment("e1", "c1", false));
    let mut h = logged_in(backend, user);
    let mut screen = DocumentScreen::new("c1", "d1").with_course(course("c1", 0.0, &["d1", "d2"]));

    assert_eq!(screen.document().map(|d| d.title.as_str()), Some("Lesson d1"));
    let effect = screen.complete(&mut h.ctx).await;

    assert_eq!(
        effect.navigate,
        Some(Route::LearnCourse {
            id: "c1".into(),
            reload: false
        })
    );
    assert_eq!(h.ctx.session.enrollment_for_course("c1").unwrap().progress, 50.0);
}

#[tokio::test]
async fn quiz_unlocks_after_every_lesson() {
    let mut user = student(None);
    let mut e = enrollment("e1", "c1", false);
    e.completed_items = vec!["d1".into()];
    user.enrollments.push(e);
    let h = logged_in(MockBackend::new(), user);

    let screen = learn_screen(course("c1", 0.0, &["d1", "d2"]));
    assert!(!screen.can_start_quiz(&h.ctx.session));
    assert_eq!(screen.start_quiz(&h.ctx.session).navigate, None);

    let screen = learn_screen(course("c1", 0.0, &["d1"]));
    assert!(screen.can_start_quiz(&h.ctx.session));
    assert_eq!(
        screen.start_quiz(&h.ctx.session).navigate,
        Some(Route::FinalTest {
            course_id: "c1".into()
        })
    );
}

#[tokio::test]
async fn learn_screen_keeps_the_three_best_attempts() {
    let attempt = |score| QuizResult {
        id: None,
        score,
        user: Some("u1".into()),
        course: Some("c1".into()),
    };
    let backend = MockBackend::new()
        .with_course(course("c1", 0.0, &["d1"]))
        .with_quiz_results(vec![attempt(40.0), attempt(90.0), attempt(55.0), attempt(70.0)]);
    let h = logged_in(backend, student(None));
    let mut screen = LearnScreen::new("c1", true);
    assert!(screen.needs_reload());

    screen.load(&h.ctx).await;

    let scores: Vec<f64> = screen.quiz_results.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![90.0, 70.0, 55.0]);
    assert!(!screen.needs_reload());
}

fn answered(screen: &mut FinalTestScreen, questions: usize) {
    for i in 1..=questions {
        screen.select(&format!("q{}", i), &format!("q{}-right", i));
    }
}

#[tokio::test]
async fn passing_quiz_requests_certificate_and_completes_enrollment() {
    let backend = MockBackend::new().with_quiz_score(75.0);
    let mut user = student(None);
    user.enrollments.push(enrollment("e1", "c1", false));
    let mut h = logged_in(backend, user);
    let mut screen = FinalTestScreen::new("c1").with_course(course_with_quiz("c1", 4));
    answered(&mut screen, 4);

    let effect = screen.submit(&mut h.ctx).await;

    assert_eq!(effect.navigate, Some(Route::Home));
    let submitted = h.backend.submissions();
    assert_eq!(submitted.len(), 1);
    let texts: Vec<&str> = submitted[0].answers.iter().map(|a| a.answer_text.as_str()).collect();
    assert_eq!(texts, vec!["right 1", "right 2", "right 3", "right 4"]);

    let certs = h.backend.calls_to("create_certificate");
    assert_eq!(certs.len(), 1);
    assert_eq!(certs[0].token.as_deref(), Some(TOKEN));
    assert!(h.ctx.session.enrollment_for_course("c1").unwrap().completed);
    assert_eq!(h.ctx.session.user().unwrap().certificates.len(), 1);
    assert_eq!(screen.last_result.as_ref().map(|r| r.score), Some(75.0));
}

#[tokio::test]
async fn failing_quiz_returns_to_course_with_reload() {
    let backend = MockBackend::new().with_quiz_score(50.0);
    let mut user = student(None);
    user.enrollments.push(enrollment("e1", "c1", false));
    let mut h = logged_in(backend, user);
    let mut screen = FinalTestScreen::new("c1").with_course(course_with_quiz("c1", 2));
    answered(&mut screen, 2);

    let effect = screen.submit(&mut h.ctx).await;

    assert_eq!(
        effect.navigate,
        Some(Route::LearnCourse {
            id: "c1".into(),
            reload: true
        })
    );
    assert!(h.backend.calls_to("create_certificate").is_empty());
    assert!(!h.ctx.session.enrollment_for_course("c1").unwrap().completed);
}

#[tokio::test]
async fn unanswered_quiz_is_not_submitted() {
    let mut h = logged_in(MockBackend::new(), student(None));
    let mut screen = FinalTestScreen::new("c1").with_course(course_with_quiz("c1", 3));
    screen.select("q1", "q1-right");

    let effect = screen.submit(&mut h.ctx).await;

    assert_eq!(effect.navigate, None);
    assert_eq!(
        effect.notice.map(|n| n.text().to_string()),
        Some("Unanswered questions: q2, q3".to_string())
    );
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn quiz_submission_failure_is_an_alert() {
    let backend = MockBackend::new();
    backend.fail("submit_quiz");
    let mut h = logged_in(backend, student(None));
    let mut screen = FinalTestScreen::new("c1").with_course(course_with_quiz("c1", 1));
    answered(&mut screen, 1);

    let effect = screen.submit(&mut h.ctx).await;

    assert!(matches!(effect.notice, Some(Notice::Alert { .. })));
    assert_eq!(effect.navigate, None);
    assert!(!screen.is_submitting());
}

fn bundle_screen(courses: &[&str]) -> BundleScreen {
    let mut screen = BundleScreen::new("b1");
    screen.state = ViewState::Loaded(bundle(
        "b1",
        courses.iter().map(|c| course(c, 0.0, &[])).collect(),
    ));
    screen
}

#[tokio::test]
async fn bundle_certificate_waits_for_every_course() {
    let mut user = student(None);
    user.enrollments.push(enrollment("e1", "c1", true));
    user.enrollments.push(enrollment("e2", "c2", false));
    let mut h = logged_in(MockBackend::new(), user);
    let mut screen = bundle_screen(&["c1", "c2"]);

    assert!(!screen.can_request_certificate(&h.ctx.session));
    assert_eq!(screen.certificate_label(&h.ctx.session), LABEL_COMPLETE_ALL);
    let effect = screen.request_certificate(&mut h.ctx).await;
    assert_eq!(effect.notice, Some(Notice::inline(CERTIFICATE_FAILED)));
    assert!(h.backend.calls().is_empty());

    h.ctx.session.complete_enrollment("e2");
    assert!(screen.can_request_certificate(&h.ctx.session));
    assert_eq!(screen.certificate_label(&h.ctx.session), LABEL_GET_CERTIFICATE);

    let effect = screen.request_certificate(&mut h.ctx).await;
    assert_eq!(effect.notice, Some(Notice::inline(CERTIFICATE_ISSUED)));
    assert_eq!(h.backend.calls_to("create_bundle_enrollment").len(), 1);
    assert_eq!(h.backend.calls_to("create_bundle_certificate").len(), 1);
    assert!(h.ctx.session.enrollment_for_bundle("b1").is_some());
    assert_eq!(screen.certificate_label(&h.ctx.session), LABEL_HAS_CERTIFICATE);
    assert!(!screen.can_request_certificate(&h.ctx.session));
}

#[tokio::test]
async fn empty_bundle_never_qualifies() {
    let h = logged_in(MockBackend::new(), student(None));
    let screen = bundle_screen(&[]);
    assert!(!screen.all_courses_completed(&h.ctx.session));
    assert_eq!(screen.certificate_label(&h.ctx.session), LABEL_COMPLETE_ALL);
}
