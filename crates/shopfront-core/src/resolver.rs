//! Variant resolution: matching a user's option selections against a
//! product's variant list and deriving effective price, stock, and image.
//!
//! Matching is done through a composite key built over a fixed preset order
//! of recognized axes ([`PRESET_AXES`]). Building the key from the preset
//! list rather than from each variant's own attribute order guarantees that
//! two variants declaring the same combination in different orders index to
//! the same key.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::product::{Product, Variant};

/// Recognized selection axes, in the fixed order used to build composite
/// keys. Axes a product does not declare are skipped; unrecognized axes a
/// product declares never participate in matching.
pub const PRESET_AXES: [&str; 5] = ["color", "size", "material", "style", "type"];

/// Separator between axis values inside a composite key. Option values are
/// free-form tenant data, so a multi-character separator keeps accidental
/// collisions out of practical reach.
const KEY_SEPARATOR: &str = "\u{1f}";

/// Normalizes an axis name or option value for comparison: trim, lowercase.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// The user's current option selections, keyed by normalized axis name.
///
/// Only axes from [`PRESET_AXES`] are retained; selecting an unrecognized
/// axis is a silent no-op since it could never participate in matching.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    choices: HashMap<String, String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a choice for an axis. Axis name and value are normalized.
    pub fn choose(&mut self, axis: &str, value: &str) {
        let axis = normalize(axis);
        if PRESET_AXES.contains(&axis.as_str()) {
            self.choices.insert(axis, normalize(value));
        }
    }

    /// Clears the choice for an axis.
    pub fn clear(&mut self, axis: &str) {
        self.choices.remove(&normalize(axis));
    }

    /// Returns the normalized chosen value for an axis, if any.
    #[must_use]
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.choices.get(&normalize(axis)).map(String::as_str)
    }

    /// `true` when no axis has an explicit choice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// The outcome of resolving a selection against a product.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    /// The matched variant, or `None` when the product's own fields apply
    /// (no variants, or the pseudo-variant fallback collapsed to product
    /// level data only because the product has no variants at all).
    pub variant: Option<&'a Variant>,

    /// Price currently in effect: sale price when on sale and present,
    /// otherwise regular/base price, variant fields taking precedence.
    pub effective_price: Option<Decimal>,

    /// `stock_status == "instock"` with variant overriding product;
    /// defaults to `true` when neither carries a status.
    pub in_stock: bool,

    /// Variant image, else first of the variant gallery, else product hero.
    pub image_url: Option<String>,
}

/// Returns the preset axes this product actually declares, in preset order
/// and normalized form.
fn declared_axes(product: &Product) -> Vec<String> {
    let declared: Vec<String> = product
        .attributes
        .iter()
        .map(|a| normalize(&a.name))
        .collect();
    PRESET_AXES
        .iter()
        .filter(|axis| declared.iter().any(|d| d == *axis))
        .map(|axis| (*axis).to_string())
        .collect()
}

/// Builds a composite key from per-axis values over the product's declared
/// preset axes. Unset axes contribute the empty string.
fn composite_key<'v>(axes: &[String], value_for: impl Fn(&str) -> Option<&'v str>) -> String {
    axes.iter()
        .map(|axis| value_for(axis).map(normalize).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Builds the default selection for a product: every declared preset axis
/// set to its first option. This is what the storefront shows before any
/// interaction.
#[must_use]
pub fn default_selection(product: &Product) -> Selection {
    let mut selection = Selection::new();
    for axis in declared_axes(product) {
        if let Some(first) = product
            .axis_options(&axis)
            .and_then(|options| options.first())
        {
            selection.choose(&axis, first);
        }
    }
    selection
}

/// Resolves the active variant for a selection and derives its effective
/// price, stock status, and image.
///
/// Resolution never fails: a selection that matches no variant falls back
/// to the first variant in the product's list, and a product with no
/// variants at all resolves to its own base fields. Duplicate composite
/// keys in the source data are not validated; the later variant wins.
#[must_use]
pub fn resolve<'a>(product: &'a Product, selection: &Selection) -> Resolved<'a> {
    let axes = declared_axes(product);

    let mut index: HashMap<String, &Variant> = HashMap::new();
    for variant in &product.variants {
        let key = composite_key(&axes, |axis| variant.axis_value(axis));
        index.insert(key, variant);
    }

    let selection_key = composite_key(&axes, |axis| selection.get(axis));
    let variant = index
        .get(&selection_key)
        .copied()
        .or_else(|| product.variants.first());

    Resolved {
        variant,
        effective_price: effective_price(product, variant),
        in_stock: in_stock(product, variant),
        image_url: image_url(product, variant),
    }
}

/// Sale price when on sale and present, else regular/base price. Each field
/// falls back from variant to product level independently.
fn effective_price(product: &Product, variant: Option<&Variant>) -> Option<Decimal> {
    let on_sale = variant.map_or(product.on_sale, |v| v.on_sale);
    let sale = variant
        .and_then(|v| v.sale_price)
        .or(product.sale_price);
    let regular = variant
        .and_then(|v| v.regular_price)
        .or(product.regular_price);
    let base = variant.and_then(|v| v.price).or(product.price);

    if on_sale {
        if let Some(price) = sale {
            return Some(price);
        }
    }
    regular.or(base)
}

/// Absent status reads as in stock; anything other than `"instock"` does not.
fn status_in_stock(status: Option<&str>) -> bool {
    status.is_none_or(|s| s == "instock")
}

fn in_stock(product: &Product, variant: Option<&Variant>) -> bool {
    let status = variant
        .and_then(|v| v.stock_status.as_deref())
        .or(product.stock_status.as_deref());
    status_in_stock(status)
}

fn image_url(product: &Product, variant: Option<&Variant>) -> Option<String> {
    variant
        .and_then(|v| {
            v.image
                .clone()
                .or_else(|| v.gallery.first().cloned())
        })
        .or_else(|| product.image.clone())
}

/// Whether a given Size option should be presented as disabled.
///
/// Disabled only when every variant matching that size — and the currently
/// selected color, when the product carries a color axis and a color is
/// chosen — is out of stock. No matching variants at all is ambiguous and
/// treated as available.
#[must_use]
pub fn size_option_disabled(product: &Product, size: &str, selection: &Selection) -> bool {
    let size = normalize(size);
    let has_color_axis = declared_axes(product).iter().any(|a| a == "color");
    let selected_color = if has_color_axis {
        selection.get("color")
    } else {
        None
    };

    let matching: Vec<&Variant> = product
        .variants
        .iter()
        .filter(|v| v.axis_value("size").map(normalize).as_deref() == Some(size.as_str()))
        .filter(|v| {
            selected_color.is_none_or(|color| {
                v.axis_value("color").map(normalize).as_deref() == Some(color)
            })
        })
        .collect();

    if matching.is_empty() {
        return false;
    }
    matching.iter().all(|v| {
        !status_in_stock(
            v.stock_status
                .as_deref()
                .or(product.stock_status.as_deref()),
        )
    })
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
