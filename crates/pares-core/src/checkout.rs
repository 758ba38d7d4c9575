//! # Checkout
//!
//! Order draft plus the two-step checkout state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │              proceed_to_payment()                                       │
//! │              [details valid]                                            │
//! │   ┌─────────┐ ─────────────────────► ┌─────────┐                        │
//! │   │ Details │                        │ Payment │ ── place_order() ──►   │
//! │   └─────────┘ ◄───────────────────── └─────────┘    message + link      │
//! │              back_to_details()                                          │
//! │              [always, keeps fields]                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Required Fields
//! | Service  | Required besides name and contact            |
//! |----------|----------------------------------------------|
//! | delivery | address                                      |
//! | pickup   | a window, or custom text when "custom"       |
//! | dine-in  | party size ≥ 1 and a preferred date/time     |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::handoff::{HandoffConfig, OrderHandoff};
use crate::message::compose_order_message;
use crate::types::{PaymentMethod, PickupWindow, ServiceType};
use crate::validation::{clamp_party_size, validate_party_size, validate_required, ValidationResult};
use crate::MIN_PARTY_SIZE;

// =============================================================================
// Order Draft
// =============================================================================

/// Customer-entered checkout fields. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
    pub customer_name: String,
    pub contact_number: String,
    pub service_type: ServiceType,

    // delivery
    pub address: String,
    pub landmark: String,

    // pickup
    pub pickup_time: PickupWindow,
    pub custom_time: String,

    // dine-in
    pub party_size: u32,
    /// `YYYY-MM-DDTHH:MM` from the datetime picker.
    pub dine_in_time: String,

    /// Payment method id; `None` means "first available".
    pub payment_method: Option<String>,
    pub notes: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        OrderDraft {
            customer_name: String::new(),
            contact_number: String::new(),
            service_type: ServiceType::default(),
            address: String::new(),
            landmark: String::new(),
            pickup_time: PickupWindow::default(),
            custom_time: String::new(),
            party_size: MIN_PARTY_SIZE,
            dine_in_time: String::new(),
            payment_method: None,
            notes: String::new(),
        }
    }
}

impl OrderDraft {
    /// Returns the first missing or invalid detail, if any.
    pub fn validate_details(&self) -> ValidationResult<()> {
        validate_required("customer name", &self.customer_name)?;
        validate_required("contact number", &self.contact_number)?;

        match self.service_type {
            ServiceType::Delivery => validate_required("address", &self.address)?,
            ServiceType::Pickup => {
                if self.pickup_time.is_custom() {
                    validate_required("custom pickup time", &self.custom_time)?;
                }
            }
            ServiceType::DineIn => {
                validate_party_size(self.party_size)?;
                validate_required("preferred time", &self.dine_in_time)?;
            }
        }

        Ok(())
    }

    /// Whether "Proceed to Payment" is enabled.
    #[inline]
    pub fn is_details_valid(&self) -> bool {
        self.validate_details().is_ok()
    }
}

// =============================================================================
// Checkout State Machine
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    #[default]
    Details,
    Payment,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Details => "details",
            CheckoutStep::Payment => "payment",
        }
    }
}

/// One customer's checkout in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    step: CheckoutStep,
    draft: OrderDraft,
}

impl Checkout {
    pub fn new() -> Self {
        Checkout::default()
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Replaces the entered fields, keeping the current step.
    ///
    /// Party size is clamped into the stepper range.
    pub fn update_details(&mut self, mut draft: OrderDraft) {
        draft.party_size = clamp_party_size(draft.party_size as i64);
        self.draft = draft;
    }

    /// The +/- party size stepper.
    pub fn adjust_party_size(&mut self, delta: i64) -> u32 {
        self.draft.party_size = clamp_party_size(self.draft.party_size as i64 + delta);
        self.draft.party_size
    }

    /// details → payment, only when the details predicate holds.
    pub fn proceed_to_payment(&mut self) -> CoreResult<()> {
        self.draft.validate_details()?;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// payment → details. Always allowed; nothing entered is lost.
    pub fn back_to_details(&mut self) {
        self.step = CheckoutStep::Details;
    }

    pub fn select_payment_method(&mut self, method_id: impl Into<String>) {
        self.draft.payment_method = Some(method_id.into());
    }

    /// The selected method's id, defaulting to the first available method.
    pub fn payment_method_id<'a>(&'a self, methods: &'a [PaymentMethod]) -> Option<&'a str> {
        self.draft
            .payment_method
            .as_deref()
            .or_else(|| methods.first().map(|m| m.id.as_str()))
    }

    /// The selected method's details, for the account name/number/QR panel.
    pub fn payment_method<'a>(&self, methods: &'a [PaymentMethod]) -> Option<&'a PaymentMethod> {
        let id = self.payment_method_id(methods)?;
        methods.iter().find(|m| m.id == id)
    }

    /// What the summary prints after `💳 Payment:`: the method's name, or its
    /// raw id when the method is not in the list.
    pub fn payment_label(&self, methods: &[PaymentMethod]) -> String {
        match self.payment_method(methods) {
            Some(method) => method.name.clone(),
            None => self.payment_method_id(methods).unwrap_or_default().to_string(),
        }
    }

    /// Composes the summary and the Messenger link.
    ///
    /// ## Errors
    /// - `WrongCheckoutStep` unless on the payment step
    /// - `EmptyCart` when there is nothing to order
    /// - `Validation` if the details were edited into an invalid state
    /// - `InvalidHandoffUrl` for a bad messenger configuration
    pub fn place_order(
        &self,
        cart: &Cart,
        methods: &[PaymentMethod],
        store_name: &str,
        handoff: &HandoffConfig,
    ) -> CoreResult<OrderHandoff> {
        if self.step != CheckoutStep::Payment {
            return Err(CoreError::WrongCheckoutStep {
                current: self.step.as_str().to_string(),
                expected: CheckoutStep::Payment.as_str().to_string(),
            });
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        self.draft.validate_details()?;

        let message =
            compose_order_message(store_name, &self.draft, cart, &self.payment_label(methods));
        let url = handoff.link_for(&message)?;
        Ok(OrderHandoff { message, url })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
