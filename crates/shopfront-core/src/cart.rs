//! In-memory cart state: an ordered list of lines keyed by
//! `(slug, variant_id)`, with merge-on-duplicate add semantics and computed
//! totals.
//!
//! The store is pure state — no I/O originates here. Synchronization with
//! the remote cart API is layered on top by `shopfront-client`, which
//! treats [`CartStore::hydrate`] as the authoritative overwrite path.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Uniqueness key for cart and quote lines.
///
/// Identity deliberately excludes the display `attributes` map: two adds
/// with the same slug/variant but different display attributes merge into
/// one line, silently keeping the first line's attributes. This mirrors the
/// storefront's historical behavior and is documented rather than fixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub slug: String,
    pub variant_id: Option<String>,
}

impl LineKey {
    #[must_use]
    pub fn new(slug: impl Into<String>, variant_id: Option<String>) -> Self {
        Self {
            slug: slug.into(),
            variant_id,
        }
    }

    /// The identifier the cart API expects for quantity updates and
    /// removals: the variant id when present, otherwise the product slug.
    #[must_use]
    pub fn product_or_variant_id(&self) -> &str {
        self.variant_id.as_deref().unwrap_or(&self.slug)
    }
}

/// One line in the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartLine {
    pub slug: String,
    pub variant_id: Option<String>,
    pub name: String,
    pub image: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    /// Always >= 1 while the line exists; a zero here on input means
    /// "unspecified" and is defaulted to 1 on add.
    pub quantity: u32,
    /// Upper bound from server-side availability, when known.
    pub max_qty: Option<u32>,
    /// Shipping weight per unit, in kilograms.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub weight_kg: Option<Decimal>,
    /// Display-only metadata; not part of line identity.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Pre-rendered price markup from the backend, when provided.
    #[serde(default)]
    pub price_html: Option<String>,
}

impl CartLine {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            slug: self.slug.clone(),
            variant_id: self.variant_id.clone(),
        }
    }
}

/// The cart: an ordered line list plus the drawer-open UI flag.
///
/// Lines keep stable insertion order; merging quantities never reorders.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    open: bool,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key() == key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the cart drawer is showing. UI affordance, not business
    /// state; set by [`add`](Self::add), cleared by checkout preparation.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Adds a line, merging on duplicate identity.
    ///
    /// On merge only the quantity is summed; name, image, price and
    /// attributes of the existing line are never overwritten. A zero
    /// incoming quantity is treated as unspecified and defaults to 1.
    /// Always opens the cart drawer.
    pub fn add(&mut self, mut line: CartLine) {
        if line.quantity == 0 {
            line.quantity = 1;
        }
        let key = line.key();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.key() == key) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.lines.push(line);
        }
        self.open = true;
    }

    /// Sets a line's quantity. Zero removes the line entirely; the store
    /// never holds a line with quantity zero. Unknown keys are a no-op.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.key() == key) {
            line.quantity = quantity;
        }
    }

    /// Removes a line. Absent keys are a no-op, not an error.
    pub fn remove(&mut self, key: &LineKey) {
        self.lines.retain(|l| &l.key() != key);
    }

    /// Wholesale replacement of the line list with the server's snapshot.
    /// Never merged with local state; the server is the authority.
    pub fn hydrate(&mut self, lines: Vec<CartLine>) {
        self.lines = lines;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total item count: the sum of line quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of quantity × unit price across lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum()
    }

    /// Sum of quantity × weight across lines; lines without a weight count
    /// as zero.
    #[must_use]
    pub fn total_weight_kg(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.weight_kg.unwrap_or_default() * Decimal::from(l.quantity))
            .sum()
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
