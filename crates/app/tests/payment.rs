// Path: crates/app/tests/payment.rs

mod common;

use common::*;
use learnchain_api::mock::{MemoryStorage, MockBackend};
use learnchain_api::{PaymentReceipt, StorageKey, TxStatus};
use learnchain_app::payment::{
    ENROLLMENT_PENDING, ENROLLMENT_UNRECORDED, LOGIN_REQUIRED, PAYMENT_UNCONFIRMED,
    WALLET_REQUIRED,
};
use learnchain_app::reconcile_pending;
use learnchain_app::screens::auth;
use learnchain_app::screens::course::{CourseScreen, LABEL_GO_TO_COURSE, LABEL_JOIN};
use learnchain_app::{join_course, Notice, PendingEnrollment, Route, ViewState};
use learnchain_types::chain::{Address, Wei};
use learnchain_types::error::ContractError;
use learnchain_types::OrganizationRef;

fn learn(id: &str) -> Route {
    Route::LearnCourse {
        id: id.into(),
        reload: false,
    }
}

#[tokio::test]
async fn join_label_follows_the_enrollment_list() {
    let mut h = logged_in(MockBackend::new(), student(Some(STUDENT_WALLET)));
    let mut screen = CourseScreen::new("c1");
    screen.state = ViewState::Loaded(course("c1", 0.0, &[]));

    assert_eq!(screen.join_label(&h.ctx.session), LABEL_JOIN);
    h.ctx.session.add_enrollment(enrollment("e9", "c2", false));
    assert_eq!(screen.join_label(&h.ctx.session), LABEL_JOIN);
    h.ctx.session.add_enrollment(enrollment("e1", "c1", false));
    assert_eq!(screen.join_label(&h.ctx.session), LABEL_GO_TO_COURSE);
}

#[tokio::test]
async fn join_without_wallet_makes_no_calls() {
    let mut h = logged_in(MockBackend::new(), student(None));
    let mut screen = CourseScreen::new("c1");
    screen.state = ViewState::Loaded(course("c1", 0.0, &[]));

    let effect = screen.join(&mut h.ctx).await;

    assert_eq!(effect.navigate, None);
    assert_eq!(effect.notice, Some(Notice::inline(WALLET_REQUIRED)));
    assert_eq!(screen.message.as_deref(), Some(WALLET_REQUIRED));
    assert!(h.backend.calls().is_empty());
    assert!(h.contract.payments().is_empty());
}

#[tokio::test]
async fn join_requires_login() {
    let mut h = anonymous(MockBackend::new());
    let effect = join_course(&mut h.ctx, &course("c1", 0.0, &[])).await;
    assert_eq!(effect.navigate, Some(Route::Login));
    assert_eq!(effect.notice, Some(Notice::inline(LOGIN_REQUIRED)));
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn enrolled_users_go_straight_to_the_course() {
    let mut user = student(Some(STUDENT_WALLET));
    user.enrollments.push(enrollment("e1", "c1", false));
    let mut h = logged_in(MockBackend::new(), user);

    let effect = join_course(&mut h.ctx, &course("c1", 10.0, &[])).await;

    assert_eq!(effect.navigate, Some(learn("c1")));
    assert!(h.contract.payments().is_empty());
}

#[tokio::test]
async fn paid_join_creates_the_enrollment() {
    let mut h = logged_in(MockBackend::new(), student(Some(STUDENT_WALLET)));

    let effect = join_course(&mut h.ctx, &course("c1", 49.99, &[])).await;

    assert_eq!(effect.navigate, Some(learn("c1")));
    let payments = h.contract.payments();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].value, Wei(49_990_000_000_000_000));
    assert_eq!(payments[0].organization, ORG_WALLET.parse::<Address>().unwrap());
    assert_eq!(payments[0].student_id, "u1");
    assert_eq!(payments[0].student_name, "Ana");
    assert_eq!(payments[0].organization_name, "Org o1");

    let writes = h.backend.calls_to("create_enrollment");
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].token.as_deref(), Some(TOKEN));
    assert!(h.ctx.session.is_enrolled("c1"));
    assert_eq!(h.storage.snapshot(StorageKey::PendingEnrollments), None);
}

#[tokio::test]
async fn free_course_without_org_wallet_pays_default_recipient_the_minimum() {
    let mut h = logged_in(MockBackend::new(), student(Some(STUDENT_WALLET)));
    let mut c = course("c1", 0.0, &[]);
    c.organization = OrganizationRef::Id("o1".into());

    join_course(&mut h.ctx, &c).await;

    let payments = h.contract.payments();
    assert_eq!(payments[0].value, Wei(1_000_000_000));
    assert_eq!(
        payments[0].organization,
        h.ctx.config.default_recipient().unwrap()
    );
}

#[tokio::test]
async fn failed_payment_sends_user_to_connect_without_enrolling() {
    let mut h = logged_in(MockBackend::new(), student(Some(STUDENT_WALLET)));
    h.contract.set_receipt(PaymentReceipt::failed(
        &ContractError::Reverted("0xbad".into()),
        Some("0xbad".into()),
    ));

    let effect = join_course(&mut h.ctx, &course("c1", 5.0, &[])).await;

    assert_eq!(effect.navigate, Some(Route::Connect));
    assert_eq!(
        effect.notice.map(|n| n.text().to_string()),
        Some("Transaction 0xbad reverted".to_string())
    );
    assert!(h.backend.calls_to("create_enrollment").is_empty());
    assert!(!h.ctx.session.is_enrolled("c1"));
}

#[tokio::test]
async fn failed_enrollment_write_is_retried_without_paying_twice() {
    let mut h = logged_in(MockBackend::new(), student(Some(STUDENT_WALLET)));
    let c = course("c1", 20.0, &[]);
    h.backend.fail("create_enrollment");

    let effect = join_course(&mut h.ctx, &c).await;
    assert_eq!(effect.notice, Some(Notice::inline(ENROLLMENT_PENDING)));
    assert!(!h.ctx.session.is_enrolled("c1"));
    let stored = h
        .storage
        .snapshot(StorageKey::PendingEnrollments)
        .expect("pending enrollment persisted");
    let pending: Vec<PendingEnrollment> = serde_json::from_str(&stored).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].course_id, "c1");
    assert_eq!(pending[0].tx_hash.as_deref(), Some("0xfeed"));
    assert_eq!(pending[0].amount_wei, "20000000000000000");

    h.backend.heal("create_enrollment");
    let effect = join_course(&mut h.ctx, &c).await;

    assert_eq!(effect.navigate, Some(learn("c1")));
    assert_eq!(h.contract.payments().len(), 1);
    assert_eq!(h.backend.calls_to("create_enrollment").len(), 2);
    assert!(h.ctx.session.is_enrolled("c1"));
    assert_eq!(h.storage.snapshot(StorageKey::PendingEnrollments), None);
}

#[tokio::test]
async fn login_completes_pending_enrollments() {
    let backend = MockBackend::new().with_account("secret", student(Some(STUDENT_WALLET)));
    let mut h = anonymous(backend);
    h.ctx
        .ledger()
        .record(PendingEnrollment::new("u1", "c1", Some("0xfeed".into()), Wei(1)))
        .await
        .unwrap();
    h.ctx
        .ledger()
        .record(PendingEnrollment::new("someone-else", "c2", None, Wei(1)))
        .await
        .unwrap();

    let effect = auth::login(&mut h.ctx, "ana@example.com", "secret").await;

    assert_eq!(effect.navigate, Some(Route::Main(learnchain_app::MainTab::Home)));
    assert_eq!(
        effect.notice,
        Some(Notice::inline("Completed 1 pending enrollment(s)."))
    );
    assert!(h.ctx.session.is_enrolled("c1"));
    let left = h.ctx.ledger().pending().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].user_id, "someone-else");
    assert!(h.contract.payments().is_empty());
}

fn timed_out(tx_hash: &str) -> PaymentReceipt {
    PaymentReceipt::failed(
        &ContractError::ConfirmationTimeout(tx_hash.into()),
        Some(tx_hash.into()),
    )
}

fn notice_text(effect: &learnchain_app::Effect) -> String {
    effect
        .notice
        .as_ref()
        .map(|n| n.text().to_string())
        .unwrap_or_default()
}

#[tokio::test]
async fn timed_out_payment_is_never_paid_twice() {
    let mut h = logged_in(MockBackend::new(), student(Some(STUDENT_WALLET)));
    let c = course("c1", 20.0, &[]);
    h.contract.set_receipt(timed_out("0xslow"));

    let effect = join_course(&mut h.ctx, &c).await;

    assert_eq!(effect.navigate, None);
    let text = notice_text(&effect);
    assert!(text.starts_with(PAYMENT_UNCONFIRMED), "{}", text);
    assert!(text.contains("0xslow"));
    let pending = h.ctx.ledger().find("u1", "c1").await.unwrap().unwrap();
    assert!(pending.unconfirmed);
    assert_eq!(pending.tx_hash.as_deref(), Some("0xslow"));
    assert!(h.backend.calls_to("create_enrollment").is_empty());

    // Still no receipt: the retry checks it instead of paying.
    h.contract.set_receipt(PaymentReceipt::confirmed("0xsecond".into()));
    let effect = join_course(&mut h.ctx, &c).await;
    assert!(notice_text(&effect).starts_with(PAYMENT_UNCONFIRMED));
    assert_eq!(h.contract.payments().len(), 1);
    assert_eq!(h.contract.status_checks(), vec!["0xslow".to_string()]);

    // Mined later: the next join only writes the enrollment.
    h.contract.set_status("0xslow", TxStatus::Confirmed);
    let effect = join_course(&mut h.ctx, &c).await;
    assert_eq!(effect.navigate, Some(learn("c1")));
    assert_eq!(h.contract.payments().len(), 1);
    assert_eq!(h.backend.calls_to("create_enrollment").len(), 1);
    assert!(h.ctx.session.is_enrolled("c1"));
    assert_eq!(h.storage.snapshot(StorageKey::PendingEnrollments), None);
}

#[tokio::test]
async fn reverted_unconfirmed_payment_allows_paying_again() {
    let mut h = logged_in(MockBackend::new(), student(Some(STUDENT_WALLET)));
    let c = course("c1", 20.0, &[]);
    h.contract.set_receipt(timed_out("0xslow"));
    join_course(&mut h.ctx, &c).await;

    h.contract.set_status("0xslow", TxStatus::Reverted);
    h.contract.set_receipt(PaymentReceipt::confirmed("0xsecond".into()));
    let effect = join_course(&mut h.ctx, &c).await;

    assert_eq!(effect.navigate, Some(learn("c1")));
    assert_eq!(h.contract.payments().len(), 2);
    assert!(h.ctx.session.is_enrolled("c1"));
    assert_eq!(h.storage.snapshot(StorageKey::PendingEnrollments), None);
}

#[tokio::test]
async fn reconcile_settles_unconfirmed_payments() {
    let mut h = logged_in(MockBackend::new(), student(Some(STUDENT_WALLET)));
    let ledger = h.ctx.ledger();
    ledger
        .record(PendingEnrollment::unconfirmed("u1", "c1", "0xmined".into(), Wei(1)))
        .await
        .unwrap();
    ledger
        .record(PendingEnrollment::unconfirmed("u1", "c2", "0xwaiting".into(), Wei(1)))
        .await
        .unwrap();
    ledger
        .record(PendingEnrollment::unconfirmed("u1", "c3", "0xfailed".into(), Wei(1)))
        .await
        .unwrap();
    h.contract.set_status("0xmined", TxStatus::Confirmed);
    h.contract.set_status("0xfailed", TxStatus::Reverted);

    let report = reconcile_pending(&mut h.ctx).await.unwrap();

    assert_eq!(report.enrolled, vec!["c1".to_string()]);
    assert_eq!(report.still_pending, vec!["c2".to_string()]);
    assert_eq!(report.reverted, vec!["c3".to_string()]);
    assert!(h.ctx.session.is_enrolled("c1"));
    let left = ledger.pending().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].course_id, "c2");
    assert!(left[0].unconfirmed);
    assert!(h.contract.payments().is_empty());
}

#[tokio::test]
async fn unrecorded_payment_asks_to_contact_support() {
    let storage = MemoryStorage::with_token(TOKEN).refuse_writes();
    let mut h = logged_in_with_storage(MockBackend::new(), student(Some(STUDENT_WALLET)), storage);
    h.backend.fail("create_enrollment");

    let effect = join_course(&mut h.ctx, &course("c1", 20.0, &[])).await;

    let text = notice_text(&effect);
    assert!(text.starts_with(ENROLLMENT_UNRECORDED), "{}", text);
    assert!(text.contains("0xfeed"));
    assert_ne!(effect.notice, Some(Notice::inline(ENROLLMENT_PENDING)));
    assert_eq!(h.storage.snapshot(StorageKey::PendingEnrollments), None);
    assert!(!h.ctx.session.is_enrolled("c1"));
}

#[tokio::test]
async fn unrecorded_payment_still_enrolls_when_the_backend_accepts() {
    let storage = MemoryStorage::with_token(TOKEN).refuse_writes();
    let mut h = logged_in_with_storage(MockBackend::new(), student(Some(STUDENT_WALLET)), storage);

    let effect = join_course(&mut h.ctx, &course("c1", 20.0, &[])).await;

    assert_eq!(effect.navigate, Some(learn("c1")));
    assert!(h.ctx.session.is_enrolled("c1"));
}
