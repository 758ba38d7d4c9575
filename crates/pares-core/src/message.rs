//! # Order Message
//!
//! Composes the plain-text order summary staff receive in Messenger.
//!
//! ## Layout
//! ```text
//! 🛒 Primos' Pares ORDER
//!
//! 👤 Customer: Juan Dela Cruz
//! 📞 Contact: 09171234567
//! 📍 Service: Pickup
//!                                  ◄── delivery address slot (blank)
//! ⏰ Pickup Time: 5-10 minutes      ◄── pickup slot
//!                                  ◄── dine-in slot (blank)
//!
//!
//! 📋 ORDER DETAILS:
//! • Beef Pares x2 - ₱240
//!
//! 💰 TOTAL: ₱240
//!                                  ◄── delivery fee slot (blank)
//!
//! 💳 Payment: GCash
//! 📸 Payment Screenshot: Please attach your payment receipt screenshot
//!
//!                                  ◄── notes slot (blank)
//!
//! Please confirm this order to proceed. Thank you for choosing Primos' Pares ! 🥟
//! ```
//!
//! Slots that do not apply stay as blank lines; staff are used to the fixed
//! shape. The whole text is trimmed at the ends.

use chrono::NaiveDateTime;

use crate::cart::{Cart, CartItem};
use crate::checkout::OrderDraft;
use crate::money::PESO_SIGN;
use crate::types::{PickupWindow, ServiceType};

/// Input formats accepted for the dine-in preferred time.
const DINE_IN_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// `Monday, October 19, 2026 at 06:30 PM`
const DINE_IN_DISPLAY_FORMAT: &str = "%A, %B %-d, %Y at %I:%M %p";

/// Builds the order summary text.
///
/// `payment_label` is what follows `💳 Payment:`; see
/// [`crate::checkout::Checkout::payment_label`].
pub fn compose_order_message(
    store_name: &str,
    draft: &OrderDraft,
    cart: &Cart,
    payment_label: &str,
) -> String {
    let is = |service: ServiceType| draft.service_type == service;

    let delivery_slot = if is(ServiceType::Delivery) {
        let mut slot = format!("🏠 Address: {}", draft.address);
        if !draft.landmark.is_empty() {
            slot.push_str(&format!("\n🗺️ Landmark: {}", draft.landmark));
        }
        slot
    } else {
        String::new()
    };

    let pickup_slot = if is(ServiceType::Pickup) {
        format!("⏰ Pickup Time: {}", pickup_time_text(draft))
    } else {
        String::new()
    };

    let dine_in_slot = if is(ServiceType::DineIn) {
        format!(
            "👥 Party Size: {} {}\n🕐 Preferred Time: {}",
            draft.party_size,
            if draft.party_size == 1 { "person" } else { "persons" },
            format_dine_in_time(&draft.dine_in_time)
        )
    } else {
        String::new()
    };

    let items = cart
        .items()
        .iter()
        .map(item_line)
        .collect::<Vec<_>>()
        .join("\n");

    let delivery_fee_slot = if is(ServiceType::Delivery) {
        "🛵 DELIVERY FEE:".to_string()
    } else {
        String::new()
    };

    let notes_slot = if draft.notes.is_empty() {
        String::new()
    } else {
        format!("📝 Notes: {}", draft.notes)
    };

    let lines = [
        format!("🛒 {} ORDER", store_name),
        String::new(),
        format!("👤 Customer: {}", draft.customer_name),
        format!("📞 Contact: {}", draft.contact_number),
        format!("📍 Service: {}", draft.service_type.label()),
        delivery_slot,
        pickup_slot,
        dine_in_slot,
        String::new(),
        String::new(),
        "📋 ORDER DETAILS:".to_string(),
        items,
        String::new(),
        format!(
            "💰 TOTAL: {}{}",
            PESO_SIGN,
            cart.total_price().message_amount()
        ),
        delivery_fee_slot,
        String::new(),
        format!("💳 Payment: {}", payment_label),
        "📸 Payment Screenshot: Please attach your payment receipt screenshot".to_string(),
        String::new(),
        notes_slot,
        String::new(),
        format!(
            "Please confirm this order to proceed. Thank you for choosing {} ! 🥟",
            store_name
        ),
    ];

    lines.join("\n").trim().to_string()
}

/// One `• ...` line of the order details.
///
/// ```rust
/// use pares_core::cart::Cart;
/// use pares_core::message::item_line;
/// use pares_core::{MenuItem, Money};
///
/// let mut cart = Cart::new();
/// cart.add_to_cart(&MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains"), 2, None, &[]);
///
/// assert_eq!(item_line(&cart.items()[0]), "• Beef Pares x2 - ₱240");
/// ```
pub fn item_line(item: &CartItem) -> String {
    let mut line = format!("• {}", item.name);

    if let Some(variation) = &item.selected_variation {
        line.push_str(&format!(" ({})", variation.name));
    }

    if !item.selected_add_ons.is_empty() {
        let tokens = item
            .selected_add_ons
            .iter()
            .map(|a| a.display_token())
            .collect::<Vec<_>>()
            .join(", ");
        line.push_str(&format!(" + {}", tokens));
    }

    line.push_str(&format!(
        " x{} - {}{}",
        item.quantity,
        PESO_SIGN,
        item.line_total().message_amount()
    ));
    line
}

fn pickup_time_text(draft: &OrderDraft) -> String {
    match draft.pickup_time {
        PickupWindow::Custom => draft.custom_time.clone(),
        window => format!("{} minutes", window.as_str()),
    }
}

/// Renders a `YYYY-MM-DDTHH:MM` value for humans; other input is echoed.
pub fn format_dine_in_time(raw: &str) -> String {
    DINE_IN_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .map(|dt| dt.format(DINE_IN_DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
