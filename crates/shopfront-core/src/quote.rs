//! Quote request state: a client-side line collection plus a two-step
//! wizard (item review, then customer details).
//!
//! The quote differs from the cart in three deliberate ways: duplicate adds
//! fully overwrite the existing line and move it to the front
//! (most-recently-touched-first), a step machine gates the flow to the
//! customer-details screen, and contact fields ride alongside the lines.
//! There is no server synchronization — the quote is submitted as a whole
//! at inquiry time, outside this crate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::LineKey;

/// The two screens of the quote wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStep {
    /// Item review; the wizard's initial and fallback state.
    #[default]
    Review,
    /// Contact capture; only reachable while the line list is non-empty.
    CustomerDetails,
}

/// One line in the quote.
///
/// Identity is `(slug, variant_id)`, same as the cart; the display
/// `attributes` map does not participate and is overwritten wholesale on a
/// duplicate add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteLine {
    pub slug: String,
    pub variant_id: Option<String>,
    pub product_id: String,
    pub name: String,
    /// Human summary of the selected options, e.g. `"Color: Blue / Size: Queen"`.
    pub variant_label: String,
    pub image: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// The quote flow tolerates unknown pricing.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
}

impl QuoteLine {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            slug: self.slug.clone(),
            variant_id: self.variant_id.clone(),
        }
    }
}

/// Quote state: most-recent-first lines, wizard step, contact scalars.
#[derive(Debug, Clone, Default)]
pub struct QuoteStore {
    lines: Vec<QuoteLine>,
    step: QuoteStep,
    email: Option<String>,
    note: Option<String>,
}

impl QuoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[QuoteLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn step(&self) -> QuoteStep {
        self.step
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Adds a line. On duplicate identity the existing line is fully
    /// replaced — name, image, attributes, price, label — and relocated to
    /// the front of the list. New lines also enter at the front. A zero
    /// quantity defaults to 1.
    pub fn add(&mut self, mut line: QuoteLine) {
        if line.quantity == 0 {
            line.quantity = 1;
        }
        let key = line.key();
        self.lines.retain(|l| l.key() != key);
        self.lines.insert(0, line);
    }

    /// Sets a line's quantity; zero removes it. Emptying the list forces
    /// the wizard back to [`QuoteStep::Review`].
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.key() == key) {
            line.quantity = quantity;
        }
    }

    /// Removes a line; absent keys are a no-op. Emptying the list forces
    /// the wizard back to [`QuoteStep::Review`].
    pub fn remove(&mut self, key: &LineKey) {
        self.lines.retain(|l| &l.key() != key);
        if self.lines.is_empty() {
            self.step = QuoteStep::Review;
        }
    }

    /// Wholesale replacement of the line list. An empty replacement forces
    /// the wizard back to [`QuoteStep::Review`].
    pub fn hydrate(&mut self, lines: Vec<QuoteLine>) {
        self.lines = lines;
        if self.lines.is_empty() {
            self.step = QuoteStep::Review;
        }
    }

    /// Moves to the given step. Advancing to customer details is a no-op
    /// while the line list is empty.
    pub fn go_to_step(&mut self, step: QuoteStep) {
        if step == QuoteStep::CustomerDetails && self.lines.is_empty() {
            return;
        }
        self.step = step;
    }

    /// Advances from review to customer details, gated on a non-empty list.
    pub fn next_step(&mut self) {
        self.go_to_step(QuoteStep::CustomerDetails);
    }

    /// Returns to review. Always permitted; there is no step before it.
    pub fn prev_step(&mut self) {
        self.step = QuoteStep::Review;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = Some(note.into());
    }

    /// Resets everything: lines, wizard step, and contact fields.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.step = QuoteStep::Review;
        self.email = None;
        self.note = None;
    }
}
