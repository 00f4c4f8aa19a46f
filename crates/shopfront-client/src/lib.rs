//! HTTP client and sync orchestration for the storefront cart.
//!
//! [`CartApiClient`] is the typed REST surface; [`SyncedCart`] layers the
//! optimistic-mutate-then-reconcile contract on top of a shared
//! [`shopfront_core::cart::CartStore`].

pub mod client;
pub mod error;
pub mod settings;
pub mod sync;
pub mod types;

pub use client::CartApiClient;
pub use error::ClientError;
pub use settings::{load_settings, load_settings_from_env, ClientSettings, SettingsError};
pub use sync::SyncedCart;
pub use types::{CartEnvelope, CheckoutCreated, WireCartItem};
