//! Domain logic for a multi-tenant storefront client: catalog types,
//! variant resolution, cart and quote state, and tenant runtime
//! configuration. Pure state and computation — network synchronization
//! lives in `shopfront-client`.

pub mod cart;
pub mod config;
pub mod error;
pub mod product;
pub mod quote;
pub mod resolver;

pub use cart::{CartLine, CartStore, LineKey};
pub use config::{deep_merge, StorefrontConfig};
pub use error::ConfigError;
pub use product::{Product, ProductAttribute, Variant, VariantAttribute};
pub use quote::{QuoteLine, QuoteStep, QuoteStore};
pub use resolver::{default_selection, resolve, size_option_disabled, Resolved, Selection};
