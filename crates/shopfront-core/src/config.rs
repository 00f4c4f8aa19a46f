//! Tenant runtime configuration: a JSON-shaped store hydrated once per
//! page load from a partial server payload, deep-merged onto documented
//! defaults so downstream readers never null-check below the top level.

use serde_json::{json, Value};

use crate::error::ConfigError;

/// Recursively merges `patch` onto `base`.
///
/// Object-valued keys merge key by key; everything else — scalars, arrays,
/// nulls — overwrites the base value outright. This is the single merge
/// rule underlying all tenant configuration defaults.
pub fn deep_merge(base: &mut Value, patch: &Value) {
    if let (Value::Object(base_map), Value::Object(patch_map)) = (&mut *base, patch) {
        for (key, patch_value) in patch_map {
            match base_map.get_mut(key) {
                Some(base_value) if base_value.is_object() && patch_value.is_object() => {
                    deep_merge(base_value, patch_value);
                }
                _ => {
                    base_map.insert(key.clone(), patch_value.clone());
                }
            }
        }
    } else {
        *base = patch.clone();
    }
}

/// Baseline configuration every tenant starts from. Hydration merges the
/// tenant's payload onto this, so any field the tenant omits keeps its
/// documented default.
fn default_state() -> Value {
    json!({
        "locale": "en-US",
        "currency": {
            "code": "USD",
            "symbol": "$",
            "locale": "en-US"
        },
        "features": {
            "show_price_in_details": "always",
            "quotes_enabled": true,
            "cart_enabled": true
        }
    })
}

/// Process-wide tenant configuration, read-only from the UI's perspective:
/// mutated only by [`hydrate`](Self::hydrate) and the few setters below.
/// Lives for the page/tab lifetime; re-hydrated fresh on the next load.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    state: Value,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            state: default_state(),
        }
    }
}

impl StorefrontConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a (partial) tenant payload over the current state via
    /// [`deep_merge`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotAnObject`] when the payload is not a JSON
    /// object — merging a scalar at the top level would discard the entire
    /// config.
    pub fn hydrate(&mut self, payload: &Value) -> Result<(), ConfigError> {
        if !payload.is_object() {
            return Err(ConfigError::NotAnObject {
                kind: json_kind(payload),
            });
        }
        deep_merge(&mut self.state, payload);
        Ok(())
    }

    /// Sets the locale, and — since the two are commonly coupled — the
    /// currency's locale field alongside it.
    pub fn set_locale(&mut self, locale: &str) {
        deep_merge(
            &mut self.state,
            &json!({ "locale": locale, "currency": { "locale": locale } }),
        );
    }

    /// Sets the display currency.
    pub fn set_currency(&mut self, code: &str, symbol: &str) {
        deep_merge(
            &mut self.state,
            &json!({ "currency": { "code": code, "symbol": symbol } }),
        );
    }

    /// Sets a named feature flag.
    pub fn set_feature(&mut self, name: &str, enabled: bool) {
        deep_merge(&mut self.state, &json!({ "features": { name: enabled } }));
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        self.state
            .get("locale")
            .and_then(Value::as_str)
            .unwrap_or("en-US")
    }

    #[must_use]
    pub fn currency_code(&self) -> &str {
        self.state
            .pointer("/currency/code")
            .and_then(Value::as_str)
            .unwrap_or("USD")
    }

    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        self.state
            .pointer("/currency/symbol")
            .and_then(Value::as_str)
            .unwrap_or("$")
    }

    #[must_use]
    pub fn currency_locale(&self) -> &str {
        self.state
            .pointer("/currency/locale")
            .and_then(Value::as_str)
            .unwrap_or("en-US")
    }

    /// Price-visibility policy on product detail pages. Defaults to
    /// `"always"`; tenants may set `"logged_in"` or `"never"`.
    #[must_use]
    pub fn show_price_in_details(&self) -> &str {
        self.state
            .pointer("/features/show_price_in_details")
            .and_then(Value::as_str)
            .unwrap_or("always")
    }

    /// Reads a boolean feature flag; unknown flags are off.
    #[must_use]
    pub fn feature(&self, name: &str) -> bool {
        self.state
            .pointer(&format!("/features/{name}"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Reads an arbitrary config value by JSON pointer, for UI variant
    /// selections the typed getters don't cover.
    #[must_use]
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.state.pointer(pointer)
    }

    /// The full underlying state, mainly for diagnostics.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.state
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
