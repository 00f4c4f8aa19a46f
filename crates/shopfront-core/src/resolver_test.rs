use rust_decimal::Decimal;

use super::*;
use crate::product::{Product, ProductAttribute, Variant, VariantAttribute};

fn attr(name: &str, options: &[&str]) -> ProductAttribute {
    ProductAttribute {
        name: name.to_string(),
        options: options.iter().map(ToString::to_string).collect(),
    }
}

fn variant(id: &str, pairs: &[(&str, &str)]) -> Variant {
    Variant {
        id: id.to_string(),
        attributes: pairs
            .iter()
            .map(|(name, option)| VariantAttribute {
                name: (*name).to_string(),
                option: (*option).to_string(),
            })
            .collect(),
        price: None,
        regular_price: None,
        sale_price: None,
        on_sale: false,
        stock_status: None,
        image: None,
        gallery: vec![],
        weight_kg: None,
    }
}

fn product(attributes: Vec<ProductAttribute>, variants: Vec<Variant>) -> Product {
    Product {
        slug: "mattress".to_string(),
        name: "Mattress".to_string(),
        description: None,
        image: Some("https://cdn.example/hero.jpg".to_string()),
        images: vec![],
        price: Some(Decimal::new(500_00, 2)),
        regular_price: None,
        sale_price: None,
        on_sale: false,
        stock_status: None,
        attributes,
        variants,
    }
}

// ---------------------------------------------------------------------------
// normalize / Selection
// ---------------------------------------------------------------------------

#[test]
fn normalize_trims_and_lowercases() {
    assert_eq!(normalize("  Queen Firm "), "queen firm");
}

#[test]
fn selection_ignores_unrecognized_axes() {
    let mut selection = Selection::new();
    selection.choose("Flavor", "Mint");
    assert!(selection.is_empty());
}

#[test]
fn selection_normalizes_axis_and_value() {
    let mut selection = Selection::new();
    selection.choose(" Color ", " Navy Blue ");
    assert_eq!(selection.get("color"), Some("navy blue"));
}

#[test]
fn selection_clear_removes_choice() {
    let mut selection = Selection::new();
    selection.choose("size", "queen");
    selection.clear("Size");
    assert!(selection.get("size").is_none());
}

// ---------------------------------------------------------------------------
// resolve — matching
// ---------------------------------------------------------------------------

#[test]
fn resolve_matches_exact_combination() {
    let p = product(
        vec![attr("Color", &["White", "Blue"]), attr("Size", &["Queen", "King"])],
        vec![
            variant("v-wq", &[("Color", "White"), ("Size", "Queen")]),
            variant("v-bk", &[("Color", "Blue"), ("Size", "King")]),
        ],
    );
    let mut selection = Selection::new();
    selection.choose("color", "Blue");
    selection.choose("size", "King");

    let resolved = resolve(&p, &selection);
    assert_eq!(resolved.variant.map(|v| v.id.as_str()), Some("v-bk"));
}

#[test]
fn resolve_is_insensitive_to_variant_attribute_order() {
    // Same combination declared in opposite attribute order must match the
    // same selection because keys are built over the preset axis order.
    let p = product(
        vec![attr("Color", &["Blue"]), attr("Size", &["King"])],
        vec![variant("v1", &[("Size", "King"), ("Color", "Blue")])],
    );
    let mut selection = Selection::new();
    selection.choose("color", "blue");
    selection.choose("size", "king");

    let resolved = resolve(&p, &selection);
    assert_eq!(resolved.variant.map(|v| v.id.as_str()), Some("v1"));
}

#[test]
fn resolve_falls_back_to_first_variant_on_miss() {
    let p = product(
        vec![attr("Color", &["White", "Blue"])],
        vec![
            variant("v-white", &[("Color", "White")]),
            variant("v-blue", &[("Color", "Blue")]),
        ],
    );
    let mut selection = Selection::new();
    selection.choose("color", "Green");

    let resolved = resolve(&p, &selection);
    assert_eq!(resolved.variant.map(|v| v.id.as_str()), Some("v-white"));
}

#[test]
fn resolve_without_variants_uses_product_fields() {
    let p = product(vec![attr("Color", &["White", "Blue"])], vec![]);
    let mut selection = Selection::new();
    selection.choose("color", "Blue");

    let resolved = resolve(&p, &selection);
    assert!(resolved.variant.is_none());
    assert_eq!(resolved.effective_price, Some(Decimal::new(500_00, 2)));
    assert!(resolved.in_stock);
}

#[test]
fn resolve_duplicate_composite_key_later_variant_wins() {
    let p = product(
        vec![attr("Color", &["Blue"])],
        vec![
            variant("first", &[("Color", "Blue")]),
            variant("second", &[("Color", "blue ")]),
        ],
    );
    let mut selection = Selection::new();
    selection.choose("color", "Blue");

    let resolved = resolve(&p, &selection);
    assert_eq!(resolved.variant.map(|v| v.id.as_str()), Some("second"));
}

#[test]
fn resolve_is_deterministic() {
    let p = product(
        vec![attr("Color", &["White", "Blue"]), attr("Size", &["Queen"])],
        vec![
            variant("a", &[("Color", "White"), ("Size", "Queen")]),
            variant("b", &[("Color", "Blue"), ("Size", "Queen")]),
        ],
    );
    let mut selection = Selection::new();
    selection.choose("color", "Blue");
    selection.choose("size", "Queen");

    let first = resolve(&p, &selection).variant.map(|v| v.id.clone());
    let second = resolve(&p, &selection).variant.map(|v| v.id.clone());
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("b"));
}

// ---------------------------------------------------------------------------
// default selection
// ---------------------------------------------------------------------------

#[test]
fn default_selection_picks_first_option_per_axis() {
    let p = product(
        vec![attr("Color", &["White", "Blue"]), attr("Size", &["Queen", "King"])],
        vec![],
    );
    let selection = default_selection(&p);
    assert_eq!(selection.get("color"), Some("white"));
    assert_eq!(selection.get("size"), Some("queen"));
}

#[test]
fn default_selection_empty_for_axisless_product() {
    let p = product(vec![], vec![]);
    assert!(default_selection(&p).is_empty());
}

// ---------------------------------------------------------------------------
// derived price / stock / image
// ---------------------------------------------------------------------------

#[test]
fn effective_price_prefers_sale_price_when_on_sale() {
    let mut p = product(
        vec![attr("Size", &["Queen"])],
        vec![variant("v1", &[("Size", "Queen")])],
    );
    p.variants[0].regular_price = Some(Decimal::new(600_00, 2));
    p.variants[0].sale_price = Some(Decimal::new(450_00, 2));
    p.variants[0].on_sale = true;

    let resolved = resolve(&p, &default_selection(&p));
    assert_eq!(resolved.effective_price, Some(Decimal::new(450_00, 2)));
}

#[test]
fn effective_price_ignores_sale_price_when_not_on_sale() {
    let mut p = product(
        vec![attr("Size", &["Queen"])],
        vec![variant("v1", &[("Size", "Queen")])],
    );
    p.variants[0].regular_price = Some(Decimal::new(600_00, 2));
    p.variants[0].sale_price = Some(Decimal::new(450_00, 2));

    let resolved = resolve(&p, &default_selection(&p));
    assert_eq!(resolved.effective_price, Some(Decimal::new(600_00, 2)));
}

#[test]
fn effective_price_falls_back_to_product_regular_price() {
    let mut p = product(vec![attr("Color", &["White", "Blue"])], vec![]);
    p.price = None;
    p.regular_price = Some(Decimal::new(89_00, 2));

    let mut selection = Selection::new();
    selection.choose("color", "Blue");
    let resolved = resolve(&p, &selection);
    assert_eq!(resolved.effective_price, Some(Decimal::new(89_00, 2)));
}

#[test]
fn in_stock_variant_status_overrides_product() {
    let mut p = product(
        vec![attr("Size", &["Queen"])],
        vec![variant("v1", &[("Size", "Queen")])],
    );
    p.stock_status = Some("instock".to_string());
    p.variants[0].stock_status = Some("outofstock".to_string());

    let resolved = resolve(&p, &default_selection(&p));
    assert!(!resolved.in_stock);
}

#[test]
fn in_stock_defaults_true_when_no_status_anywhere() {
    let p = product(
        vec![attr("Size", &["Queen"])],
        vec![variant("v1", &[("Size", "Queen")])],
    );
    let resolved = resolve(&p, &default_selection(&p));
    assert!(resolved.in_stock);
}

#[test]
fn image_prefers_variant_image_then_gallery_then_hero() {
    let mut p = product(
        vec![attr("Size", &["Queen"])],
        vec![variant("v1", &[("Size", "Queen")])],
    );

    let resolved = resolve(&p, &default_selection(&p));
    assert_eq!(resolved.image_url.as_deref(), Some("https://cdn.example/hero.jpg"));

    p.variants[0].gallery = vec!["https://cdn.example/gallery0.jpg".to_string()];
    let resolved = resolve(&p, &default_selection(&p));
    assert_eq!(
        resolved.image_url.as_deref(),
        Some("https://cdn.example/gallery0.jpg")
    );

    p.variants[0].image = Some("https://cdn.example/variant.jpg".to_string());
    let resolved = resolve(&p, &default_selection(&p));
    assert_eq!(
        resolved.image_url.as_deref(),
        Some("https://cdn.example/variant.jpg")
    );
}

// ---------------------------------------------------------------------------
// size availability policy
// ---------------------------------------------------------------------------

fn size_color_product() -> Product {
    let mut p = product(
        vec![attr("Color", &["White", "Blue"]), attr("Size", &["Queen", "King"])],
        vec![
            variant("wq", &[("Color", "White"), ("Size", "Queen")]),
            variant("bq", &[("Color", "Blue"), ("Size", "Queen")]),
            variant("wk", &[("Color", "White"), ("Size", "King")]),
            variant("bk", &[("Color", "Blue"), ("Size", "King")]),
        ],
    );
    for v in &mut p.variants {
        v.stock_status = Some("instock".to_string());
    }
    p
}

#[test]
fn size_not_disabled_when_any_matching_variant_in_stock() {
    let mut p = size_color_product();
    p.variants[0].stock_status = Some("outofstock".to_string()); // white/queen

    let selection = Selection::new();
    assert!(!size_option_disabled(&p, "Queen", &selection));
}

#[test]
fn size_disabled_when_all_matching_variants_out_of_stock() {
    let mut p = size_color_product();
    p.variants[0].stock_status = Some("outofstock".to_string()); // white/queen
    p.variants[1].stock_status = Some("outofstock".to_string()); // blue/queen

    let selection = Selection::new();
    assert!(size_option_disabled(&p, "Queen", &selection));
}

#[test]
fn size_availability_respects_selected_color() {
    let mut p = size_color_product();
    p.variants[0].stock_status = Some("outofstock".to_string()); // white/queen

    let mut selection = Selection::new();
    selection.choose("color", "White");
    assert!(size_option_disabled(&p, "Queen", &selection));

    selection.choose("color", "Blue");
    assert!(!size_option_disabled(&p, "Queen", &selection));
}

#[test]
fn size_with_no_matching_variants_is_not_disabled() {
    let p = size_color_product();
    let selection = Selection::new();
    assert!(!size_option_disabled(&p, "California King", &selection));
}
