//! # Repository Module
//!
//! One repository per catalog table group.
//!
//! ```text
//! Database ──► categories()       ──► CategoryRepository       categories
//!          ──► menu_items()       ──► MenuItemRepository       menu_items, variations, add_ons
//!          ──► payment_methods()  ──► PaymentMethodRepository  payment_methods
//!          ──► site_settings()    ──► SiteSettingsRepository   site_settings
//! ```
//!
//! Repositories return pares-core types; row structs stay private to each
//! repository.

pub mod category;
pub mod menu;
pub mod payment;
pub mod settings;
