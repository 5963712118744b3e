// Path: crates/app/src/payment/mod.rs

//! Course enrollment through an on-chain payment.
//!
//! A confirmed payment is written to the [`PaymentLedger`] before the backend is asked
//! to create the enrollment, and removed once it has. If the backend write fails the
//! record stays, and the next attempt for the same course (or [`reconcile_pending`])
//! retries only the write.
//!
//! A payment whose confirmation timed out is recorded as unconfirmed. Until its receipt
//! shows up, joining the course again checks the receipt instead of paying.

mod ledger;

pub use ledger::{PaymentLedger, PendingEnrollment};

use crate::context::AppContext;
use crate::pricing::{payment_amount, payment_recipient};
use crate::view::{Effect, Notice, Route};
use learnchain_api::{CoursePayment, PaymentReceipt, TxStatus};
use learnchain_types::chain::{Address, TxHash};
use learnchain_types::error::{
    ContractError, FlowError, StorageError, ValidationError, WalletError,
};
use learnchain_types::{Course, EntityId, Enrollment};

pub const LOGIN_REQUIRED: &str = "You must be logged in to enroll in a course.";
pub const WALLET_REQUIRED: &str = "Please create a wallet to enroll in the course.";
pub const PAYMENT_FAILED: &str =
    "Failed to process payment or create enrollment. Please try again.";
pub const ENROLLMENT_PENDING: &str =
    "Payment received, but the enrollment could not be saved. It will be retried.";
pub const PAYMENT_UNCONFIRMED: &str =
    "Payment submitted but not confirmed yet. You will not be charged again; enrollment completes once it confirms.";
pub const ENROLLMENT_UNRECORDED: &str =
    "Payment received, but the enrollment could not be saved. Please contact support with your transaction hash.";

fn with_tx_hash(message: &str, tx_hash: Option<&str>) -> String {
    match tx_hash {
        Some(hash) => format!("{} Transaction: {}", message, hash),
        None => message.to_string(),
    }
}

enum JoinError {
    /// The bridge reported a failed payment.
    Payment(PaymentReceipt),
    /// Paid, but the enrollment write failed; the ledger still holds the payment.
    EnrollmentPending(FlowError),
    /// Submitted, no receipt yet; the ledger holds it as unconfirmed.
    Unconfirmed(Option<TxHash>),
    /// Paid, and neither the ledger nor the backend kept a record of it.
    Unrecorded {
        tx_hash: Option<TxHash>,
        error: FlowError,
    },
    Flow(FlowError),
}

impl From<FlowError> for JoinError {
    fn from(err: FlowError) -> Self {
        JoinError::Flow(err)
    }
}

impl From<ValidationError> for JoinError {
    fn from(err: ValidationError) -> Self {
        JoinError::Flow(err.into())
    }
}

impl From<ContractError> for JoinError {
    fn from(err: ContractError) -> Self {
        JoinError::Flow(err.into())
    }
}

impl From<WalletError> for JoinError {
    fn from(err: WalletError) -> Self {
        JoinError::Flow(err.into())
    }
}

impl From<StorageError> for JoinError {
    fn from(err: StorageError) -> Self {
        JoinError::Flow(err.into())
    }
}

/// Runs the join action of a course: precondition checks, payment, enrollment write.
pub async fn join_course(ctx: &mut AppContext, course: &Course) -> Effect {
    if !ctx.session.is_authenticated() {
        return Effect::navigate(Route::Login).with_notice(Notice::inline(LOGIN_REQUIRED));
    }
    let learn = Route::LearnCourse {
        id: course.id.clone(),
        reload: false,
    };
    if ctx.session.is_enrolled(&course.id) {
        return Effect::navigate(learn);
    }
    if ctx.session.wallet_address().is_none() {
        return Effect::notice(Notice::inline(WALLET_REQUIRED));
    }

    match pay_and_enroll(ctx, course).await {
        Ok(enrollment) => {
            tracing::info!(target: "payment", course = %course.id, enrollment = %enrollment.id, "enrolled");
            ctx.session.add_enrollment(enrollment);
            Effect::navigate(learn)
        }
        Err(JoinError::Payment(receipt)) => {
            tracing::warn!(target: "payment", course = %course.id, message = %receipt.message, "payment failed");
            Effect::navigate(Route::Connect).with_notice(Notice::inline(receipt.message))
        }
        Err(JoinError::EnrollmentPending(e)) => {
            tracing::error!(target: "payment", course = %course.id, error = %e, "paid but enrollment write failed");
            Effect::notice(Notice::inline(ENROLLMENT_PENDING))
        }
        Err(JoinError::Unconfirmed(tx_hash)) => {
            tracing::warn!(target: "payment", course = %course.id, tx = ?tx_hash, "payment not confirmed yet");
            Effect::notice(Notice::inline(with_tx_hash(
                PAYMENT_UNCONFIRMED,
                tx_hash.as_deref(),
            )))
        }
        Err(JoinError::Unrecorded { tx_hash, error }) => {
            tracing::error!(target: "payment", course = %course.id, tx = ?tx_hash, error = %error, "paid but no record of the payment was kept");
            Effect::notice(Notice::inline(with_tx_hash(
                ENROLLMENT_UNRECORDED,
                tx_hash.as_deref(),
            )))
        }
        Err(JoinError::Flow(e)) if e.is_wallet() => {
            tracing::warn!(target: "payment", course = %course.id, error = %e, "wallet unavailable");
            Effect::navigate(Route::Connect).with_notice(Notice::inline(e.to_string()))
        }
        Err(JoinError::Flow(e)) => {
            tracing::error!(target: "payment", course = %course.id, error = %e, "join failed");
            Effect::notice(Notice::inline(PAYMENT_FAILED))
        }
    }
}

async fn pay_and_enroll(ctx: &AppContext, course: &Course) -> Result<Enrollment, JoinError> {
    let user = ctx.user()?;
    let ledger = ctx.ledger();

    if let Some(pending) = ledger.find(&user.id, &course.id).await? {
        match settle(ctx, &ledger, &pending).await? {
            TxStatus::Confirmed => {
                tracing::info!(
                    target: "payment",
                    reference = %pending.reference,
                    course = %course.id,
                    "payment already confirmed, retrying enrollment only"
                );
                return complete_pending(ctx, &ledger, &pending)
                    .await
                    .map_err(JoinError::EnrollmentPending);
            }
            TxStatus::Pending => return Err(JoinError::Unconfirmed(pending.tx_hash)),
            TxStatus::Reverted => {}
        }
    }

    let value = payment_amount(course.price)?;
    let fallback: Address = ctx.config.payment.default_recipient.parse()?;
    let organization = payment_recipient(course.organization.populated(), fallback)?;
    let wallet = ctx.wallet.session().ok_or(WalletError::NotConnected)?;
    // Fail before paying if the enrollment could not be written afterwards.
    ctx.token().await?;

    let payment = CoursePayment {
        course_id: course.id.clone(),
        student_id: user.id.clone(),
        student_name: user.name.clone(),
        organization,
        organization_name: course.organization.name().to_string(),
        value,
    };
    let receipt = ctx
        .contract
        .pay_for_course(wallet.provider.as_ref(), &payment)
        .await;
    if !receipt.success {
        return match receipt.tx_hash.clone().filter(|_| receipt.unconfirmed) {
            Some(hash) => {
                let pending = PendingEnrollment::unconfirmed(&user.id, &course.id, hash, value);
                match ledger.record(pending).await {
                    Ok(()) => Err(JoinError::Unconfirmed(receipt.tx_hash)),
                    Err(e) => Err(JoinError::Unrecorded {
                        tx_hash: receipt.tx_hash,
                        error: e.into(),
                    }),
                }
            }
            None => Err(JoinError::Payment(receipt)),
        };
    }

    let pending = PendingEnrollment::new(&user.id, &course.id, receipt.tx_hash, value);
    let recorded = ledger.record(pending.clone()).await;
    if let Err(e) = &recorded {
        tracing::error!(target: "payment", tx = ?pending.tx_hash, error = %e, "could not persist pending enrollment");
    }
    match complete_pending(ctx, &ledger, &pending).await {
        Ok(enrollment) => Ok(enrollment),
        Err(error) if recorded.is_err() => Err(JoinError::Unrecorded {
            tx_hash: pending.tx_hash,
            error,
        }),
        Err(error) => Err(JoinError::EnrollmentPending(error)),
    }
}

/// Brings an unconfirmed ledger entry up to date with its receipt.
///
/// Confirmed entries are marked so and reverted ones dropped. Entries that were never
/// unconfirmed report [`TxStatus::Confirmed`] without a lookup. A failed lookup counts
/// as still pending, so it never leads to a second payment.
async fn settle(
    ctx: &AppContext,
    ledger: &PaymentLedger,
    pending: &PendingEnrollment,
) -> Result<TxStatus, FlowError> {
    if !pending.unconfirmed {
        return Ok(TxStatus::Confirmed);
    }
    let Some(tx_hash) = pending.tx_hash.as_deref() else {
        return Ok(TxStatus::Pending);
    };
    let wallet = ctx.wallet.session().ok_or(WalletError::NotConnected)?;
    let status = match ctx
        .contract
        .transaction_status(wallet.provider.as_ref(), tx_hash)
        .await
    {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(target: "payment", tx = %tx_hash, error = %e, "receipt lookup failed");
            return Ok(TxStatus::Pending);
        }
    };
    match status {
        TxStatus::Confirmed => {
            if let Err(e) = ledger.confirm(pending.reference).await {
                tracing::warn!(target: "payment", reference = %pending.reference, error = %e, "could not mark payment confirmed");
            }
        }
        TxStatus::Reverted => {
            tracing::info!(target: "payment", tx = %tx_hash, course = %pending.course_id, "unconfirmed payment reverted");
            ledger.resolve(pending.reference).await?;
        }
        TxStatus::Pending => {}
    }
    Ok(status)
}

async fn complete_pending(
    ctx: &AppContext,
    ledger: &PaymentLedger,
    pending: &PendingEnrollment,
) -> Result<Enrollment, FlowError> {
    let token = ctx.token().await?;
    let enrollment = ctx
        .backend
        .create_enrollment(&token, &pending.user_id, &pending.course_id)
        .await?;
    if let Err(e) = ledger.resolve(pending.reference).await {
        tracing::warn!(target: "payment", reference = %pending.reference, error = %e, "could not clear pending enrollment");
    }
    Ok(enrollment)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub enrolled: Vec<EntityId>,
    pub still_pending: Vec<EntityId>,
    /// Courses whose unconfirmed payment reverted; joining them pays again.
    pub reverted: Vec<EntityId>,
}

/// Retries the enrollment write of every pending payment of the logged-in user.
pub async fn reconcile_pending(ctx: &mut AppContext) -> Result<ReconcileReport, FlowError> {
    let user_id = ctx.user()?.id.clone();
    let ledger = ctx.ledger();
    let mut report = ReconcileReport::default();

    for pending in ledger.pending_for_user(&user_id).await? {
        if ctx.session.is_enrolled(&pending.course_id) {
            ledger.resolve(pending.reference).await?;
            continue;
        }
        match settle(ctx, &ledger, &pending).await {
            Ok(TxStatus::Confirmed) => {}
            Ok(TxStatus::Reverted) => {
                report.reverted.push(pending.course_id);
                continue;
            }
            Ok(TxStatus::Pending) => {
                report.still_pending.push(pending.course_id);
                continue;
            }
            Err(e) => {
                tracing::warn!(target: "payment", course = %pending.course_id, error = %e, "cannot check unconfirmed payment");
                report.still_pending.push(pending.course_id);
                continue;
            }
        }
        match complete_pending(ctx, &ledger, &pending).await {
            Ok(enrollment) => {
                ctx.session.add_enrollment(enrollment);
                report.enrolled.push(pending.course_id);
            }
            Err(e) => {
                tracing::warn!(target: "payment", course = %pending.course_id, error = %e, "enrollment still pending");
                report.still_pending.push(pending.course_id);
            }
        }
    }

    if !report.enrolled.is_empty()
        || !report.still_pending.is_empty()
        || !report.reverted.is_empty()
    {
        tracing::info!(
            target: "payment",
            enrolled = report.enrolled.len(),
            still_pending = report.still_pending.len(),
            reverted = report.reverted.len(),
            "reconciled pending enrollments"
        );
    }
    Ok(report)
}
