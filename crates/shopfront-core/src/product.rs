//! Catalog API types for products, variants, and their option axes.
//!
//! ## Observed shape from the catalog API
//!
//! ### Prices
//! All price fields arrive as decimal strings (e.g., `"49.00"`), never as
//! JSON numbers. `sale_price` is `null` (or absent) when no sale is active,
//! and `on_sale` is an explicit boolean rather than something derived from
//! the two price fields — some tenants keep a stale `sale_price` on record
//! with `on_sale: false`.
//!
//! ### `stock_status`
//! A plain string, `"instock"` or `"outofstock"`. May be absent entirely on
//! products that don't track inventory; absence is treated as in stock
//! (optimistic, matching the storefront's "always show something" policy).
//!
//! ### Attributes
//! A product declares its selectable axes as `attributes`: a list of
//! `{name, options}` entries, e.g. `{"name": "Color", "options": ["White",
//! "Blue"]}`. Each variant then carries concrete `{name, option}` pairs.
//! Axis names and option values are not normalized server-side — casing and
//! surrounding whitespace vary between tenants, so all comparisons happen on
//! trimmed, lowercased forms (see [`crate::resolver`]).
//!
//! ### Variants
//! May be an empty list for simple products. Every variant field other than
//! `id` is optional and falls back to the product-level value when absent.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// URL slug identifying the product within a tenant (e.g., `"towel-set"`).
    pub slug: String,

    /// Display name.
    pub name: String,

    /// Raw HTML description. May be absent.
    #[serde(default)]
    pub description: Option<String>,

    /// Hero image URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Full image gallery, hero included, in display order.
    #[serde(default)]
    pub images: Vec<String>,

    /// Current price as a decimal string. Fallback when variants carry no
    /// price of their own.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,

    /// Pre-sale price as a decimal string.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub regular_price: Option<Decimal>,

    /// Sale price as a decimal string, or `null` when no sale is active.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub sale_price: Option<Decimal>,

    /// Whether the sale price is currently in effect.
    #[serde(default)]
    pub on_sale: bool,

    /// `"instock"` / `"outofstock"`. Absent means in stock.
    #[serde(default)]
    pub stock_status: Option<String>,

    /// Selectable option axes declared by this product.
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,

    /// Concrete SKU combinations. Empty for simple products.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Returns `true` if the product-level stock status reads as in stock.
    /// Absent status is optimistic.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_status
            .as_deref()
            .is_none_or(|s| s == "instock")
    }

    /// Returns the declared options for a given axis, matched on the
    /// normalized (trimmed, lowercased) axis name.
    #[must_use]
    pub fn axis_options(&self, axis: &str) -> Option<&[String]> {
        let wanted = crate::resolver::normalize(axis);
        self.attributes
            .iter()
            .find(|a| crate::resolver::normalize(&a.name) == wanted)
            .map(|a| a.options.as_slice())
    }
}

/// A selectable option axis on a product, e.g. `Color` with options
/// `["White", "Blue"]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// One concrete SKU combination of a product's option axes.
///
/// Every field other than `id` and `attributes` is an optional override of
/// the corresponding product-level field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Backend variant identifier, stored as a string to avoid precision
    /// loss on numeric ids.
    pub id: String,

    /// Concrete option values, one per axis this variant participates in.
    #[serde(default)]
    pub attributes: Vec<VariantAttribute>,

    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub regular_price: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub sale_price: Option<Decimal>,

    #[serde(default)]
    pub on_sale: bool,

    /// `"instock"` / `"outofstock"`. Absent falls back to the product.
    #[serde(default)]
    pub stock_status: Option<String>,

    /// Variant-specific image URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Variant-specific gallery.
    #[serde(default)]
    pub gallery: Vec<String>,

    /// Shipping weight in kilograms, as a decimal string.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub weight_kg: Option<Decimal>,
}

impl Variant {
    /// Returns this variant's value for the given axis, matched on the
    /// normalized axis name.
    #[must_use]
    pub fn axis_value(&self, axis: &str) -> Option<&str> {
        let wanted = crate::resolver::normalize(axis);
        self.attributes
            .iter()
            .find(|a| crate::resolver::normalize(&a.name) == wanted)
            .map(|a| a.option.as_str())
    }

    /// Display label summarizing the selected options, e.g.
    /// `"Color: Blue / Size: Queen"`. Used for quote lines.
    #[must_use]
    pub fn label(&self) -> String {
        self.attributes
            .iter()
            .map(|a| format!("{}: {}", a.name, a.option))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// The variant's attributes as a display map (axis name → option value),
    /// in axis-name order.
    #[must_use]
    pub fn attribute_map(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .map(|a| (a.name.clone(), a.option.clone()))
            .collect()
    }
}

/// A concrete axis value on a variant, e.g. `{name: "Color", option: "Blue"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    pub option: String,
}
