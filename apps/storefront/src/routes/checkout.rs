//! # Checkout Routes
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   PUT details ──►┌──────────┐  proceed (details valid)  ┌──────────┐    │
//! │                  │ DETAILS  │ ─────────────────────────► │ PAYMENT  │    │
//! │                  │          │ ◄───────────────────────── │          │    │
//! │                  └──────────┘           back             └────┬─────┘    │
//! │                                                               │          │
//! │                                         PUT payment-method ───┤          │
//! │                                                               │ place    │
//! │                                                               ▼          │
//! │                                       { message, url } ──► Messenger    │
//! │                                       draft reset, cart kept            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use pares_core::checkout::{Checkout, CheckoutStep, OrderDraft};
use pares_core::handoff::OrderHandoff;
use pares_core::money::Money;
use pares_core::types::PaymentMethod;
use pares_core::validation::{validate_max_length, MAX_TEXT_LENGTH};
use pares_core::CoreError;

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, Session};

/// Everything the checkout screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub draft: OrderDraft,
    /// Whether "Proceed to Payment" is enabled.
    pub details_valid: bool,
    /// First failing detail, for the hint under the button.
    pub validation_error: Option<String>,
    /// Selected method, defaulting to the first one.
    pub payment_method_id: Option<String>,
    /// Account name, number and QR for the selected method.
    pub payment_method: Option<PaymentMethod>,
    pub total_items: i64,
    pub total_price: Money,
}

impl CheckoutView {
    fn new(session: &Session, methods: &[PaymentMethod]) -> Self {
        let checkout = &session.checkout;
        let validation = checkout.draft().validate_details();

        CheckoutView {
            step: checkout.step(),
            draft: checkout.draft().clone(),
            details_valid: validation.is_ok(),
            validation_error: validation.err().map(|e| e.to_string()),
            payment_method_id: checkout.payment_method_id(methods).map(str::to_string),
            payment_method: checkout.payment_method(methods).cloned(),
            total_items: session.cart.total_items(),
            total_price: session.cart.total_price(),
        }
    }
}

pub async fn get_checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CheckoutView>> {
    let methods = state.catalog.payment_methods();
    state
        .sessions
        .with_session(id, |s| Ok(Json(CheckoutView::new(s, &methods))))
}

/// Rejects free-text fields over [`MAX_TEXT_LENGTH`] characters.
fn check_lengths(draft: &OrderDraft) -> ApiResult<()> {
    let fields = [
        ("customer name", &draft.customer_name),
        ("contact number", &draft.contact_number),
        ("address", &draft.address),
        ("landmark", &draft.landmark),
        ("custom pickup time", &draft.custom_time),
        ("preferred time", &draft.dine_in_time),
        ("notes", &draft.notes),
    ];
    for (field, value) in fields {
        validate_max_length(field, value, MAX_TEXT_LENGTH).map_err(CoreError::from)?;
    }
    Ok(())
}

/// Replaces the entered details. Incomplete details are accepted; only
/// `proceed` enforces them. A missing payment method keeps the current one.
pub async fn update_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut draft): Json<OrderDraft>,
) -> ApiResult<Json<CheckoutView>> {
    check_lengths(&draft)?;
    let methods = state.catalog.payment_methods();

    state.sessions.with_session(id, |session| {
        if draft.payment_method.is_none() {
            draft.payment_method = session.checkout.draft().payment_method.clone();
        }
        session.checkout.update_details(draft);
        Ok(Json(CheckoutView::new(session, &methods)))
    })
}

/// details → payment.
///
/// ## Errors
/// `VALIDATION_ERROR` naming the first missing detail.
pub async fn proceed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CheckoutView>> {
    let methods = state.catalog.payment_methods();
    state.sessions.with_session(id, |session| {
        session.checkout.proceed_to_payment()?;
        debug!(session = %id, "Checkout moved to payment");
        Ok(Json(CheckoutView::new(session, &methods)))
    })
}

pub async fn back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CheckoutView>> {
    let methods = state.catalog.payment_methods();
    state.sessions.with_session(id, |session| {
        session.checkout.back_to_details();
        Ok(Json(CheckoutView::new(session, &methods)))
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPaymentMethodRequest {
    pub payment_method_id: String,
}

/// ## Errors
/// `NOT_FOUND` unless the id is one of the active payment methods.
pub async fn select_payment_method(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectPaymentMethodRequest>,
) -> ApiResult<Json<CheckoutView>> {
    state.catalog.with_snapshot(|snapshot| {
        let methods = &snapshot.payment_methods;
        if !methods.iter().any(|m| m.id == request.payment_method_id) {
            return Err(ApiError::not_found("Payment method", &request.payment_method_id));
        }

        state.sessions.with_session(id, |session| {
            session.checkout.select_payment_method(request.payment_method_id.clone());
            Ok(Json(CheckoutView::new(session, methods)))
        })
    })
}

/// Composes the order summary and the Messenger link.
///
/// On success the entered details are discarded and the checkout returns to
/// the details step. The cart is left as it was.
///
/// ## Errors
/// - `STORE_CLOSED` when ordering is switched off
/// - `WRONG_STEP` unless on the payment step
/// - `EMPTY_CART`, `VALIDATION_ERROR`
pub async fn place_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderHandoff>> {
    let handoff_config = state.handoff();

    state.catalog.with_snapshot(|snapshot| {
        snapshot.ensure_open()?;
        let store_name = state.store_name(snapshot);

        state.sessions.with_session(id, |session| {
            let handoff = session.checkout.place_order(
                &session.cart,
                &snapshot.payment_methods,
                &store_name,
                &handoff_config,
            )?;
            session.checkout = Checkout::new();

            info!(
                session = %id,
                items = session.cart.total_items(),
                total = %session.cart.total_price(),
                "Order handed off to Messenger"
            );
            Ok(Json(handoff))
        })
    })
}
