//! # Pares Storefront Entry Point
//!
//! The actual setup lives in `lib.rs` so routes and state stay testable.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    pares_storefront::run().await
}
