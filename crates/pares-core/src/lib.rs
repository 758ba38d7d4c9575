//! # pares-core: Pure Business Logic for the Pares Storefront
//!
//! This crate holds the storefront's business rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pares Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │    Menu UI ──► Customize ──► Cart UI ──► Checkout ──► Messenger │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront (axum)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pares-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │ pricing │ │  cart   │ │ checkout │ │message │  │   │
//! │  │   │MenuItem │ │unit     │ │CartKey  │ │OrderDraft│ │handoff │  │   │
//! │  │   │AddOn    │ │ price   │ │CartItem │ │ steps    │ │ link   │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │        CatalogProvider implementations (pares-db, in-memory)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (MenuItem, Variation, AddOn, PaymentMethod, ...)
//! - [`money`] - Money type with integer centavo arithmetic
//! - [`pricing`] - Unit price of a customized item
//! - [`customization`] - The "customize item" dialog state
//! - [`cart`] - Cart store keyed by canonical customization identity
//! - [`checkout`] - Order draft and the details → payment state machine
//! - [`message`] - Order summary text sent to staff
//! - [`handoff`] - Messenger deep link
//! - [`catalog`] - Catalog provider interface and snapshot loading
//! - [`menu`] - Menu sections grouped by category
//! - [`validation`] - Field validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pares_core::cart::Cart;
//! use pares_core::money::Money;
//! use pares_core::types::MenuItem;
//!
//! let pares = MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains");
//!
//! let mut cart = Cart::new();
//! cart.add_to_cart(&pares, 2, None, &[]);
//!
//! assert_eq!(cart.total_price(), Money::from_pesos(240));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customization;
pub mod error;
pub mod handoff;
pub mod menu;
pub mod message;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest dine-in party the stepper allows.
pub const MIN_PARTY_SIZE: u32 = 1;

/// Largest dine-in party the stepper allows.
pub const MAX_PARTY_SIZE: u32 = 20;

/// Maximum quantity accepted in a single add/update request.
///
/// Guards against typos like 1000 instead of 10. The cart itself keeps
/// summing duplicate adds without a ceiling.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Store name used when site settings have not loaded yet.
pub const DEFAULT_STORE_NAME: &str = "Primos' Pares";
