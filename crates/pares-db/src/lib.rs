//! # pares-db: Catalog Database for the Pares Storefront
//!
//! SQLite storage for the menu, categories, payment methods and site
//! settings, exposed to the storefront through [`SqliteCatalog`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pares Storefront Data Flow                          │
//! │                                                                         │
//! │  Storefront startup / POST /api/catalog/refresh                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_snapshot(&SqliteCatalog)        (pares-core)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     pares-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories   │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                 │   │  (embedded)  │  │   │
//! │  │   │               │    │ CategoryRepo    │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ MenuItemRepo    │   │ 001_catalog_ │  │   │
//! │  │   │               │    │ PaymentRepo     │   │   schema.sql │  │   │
//! │  │   │               │    │ SiteSettingsRepo│   │              │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (storefront config: database_path)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pares_db::{Database, DbConfig, SqliteCatalog};
//!
//! let db = Database::new(DbConfig::new("./pares.db")).await?;
//! let menu = db.menu_items().list_all().await?;
//! let provider = SqliteCatalog::new(db);
//! ```

pub mod catalog;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use catalog::SqliteCatalog;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::menu::MenuItemRepository;
pub use repository::payment::PaymentMethodRepository;
pub use repository::settings::SiteSettingsRepository;
