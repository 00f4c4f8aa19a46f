//! Cart and checkout API wire types.
//!
//! ## Observed shape from the commerce backend
//!
//! ### `GET /cart`
//! Returns `{"items": [...], "subtotal": "123.45"}`. Item fields are
//! camelCase. Prices and weights are decimal strings. `maxQty` is absent
//! when the backend does not cap the line; `weightKg` is absent for
//! non-shippable items; `attributes` is a flat string map used for display
//! only. Numeric fields may be omitted entirely on legacy tenants —
//! mapping into the local cart defaults them to zero.
//!
//! ### Mutations
//! `POST /cart` creates or increments a line from `{slug, variantId,
//! quantity}`. `PATCH /cart` and `DELETE /cart` address a line by
//! `productOrVariantId` — the variant id when the line has one, else the
//! product slug. Mutation responses carry no body the client relies on;
//! the authoritative state is always re-fetched afterwards.
//!
//! ### Errors
//! Non-2xx responses carry `{"message": "..."}` (some tenants use
//! `{"error": "..."}` instead); both are surfaced verbatim.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level response from `GET /cart`.
#[derive(Debug, Deserialize)]
pub struct CartEnvelope {
    #[serde(default)]
    pub items: Vec<WireCartItem>,
    /// Server-computed subtotal as a decimal string. Informational — the
    /// local store recomputes its own.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub subtotal: Option<Decimal>,
}

/// One cart line as the backend reports it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCartItem {
    pub slug: String,
    #[serde(default)]
    pub variant_id: Option<String>,
    /// Absent on legacy tenants; defaults to zero and is normalized when
    /// mapped into the local store.
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub max_qty: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub price_html: Option<String>,
}

/// Body for `POST /cart`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineBody<'a> {
    pub slug: &'a str,
    pub variant_id: Option<&'a str>,
    pub quantity: u32,
}

/// Body for `PATCH /cart`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityBody<'a> {
    pub product_or_variant_id: &'a str,
    pub quantity: u32,
}

/// Body for `DELETE /cart`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLineBody<'a> {
    pub product_or_variant_id: &'a str,
}

/// Body for `POST /checkout`.
#[derive(Debug, Serialize)]
pub struct CreateCheckoutBody<'a> {
    pub channel: &'a str,
}

/// Response from `POST /checkout`. Only the id is consumed client-side
/// (for navigation); the rest of the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct CheckoutCreated {
    pub id: String,
}

/// Error body shape on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// The server's reported message, whichever field it used.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
