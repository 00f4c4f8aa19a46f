//! Optimistic-mutate-then-reconcile orchestration over a shared
//! [`CartStore`].
//!
//! Every user-facing mutation follows the same two-phase contract:
//!
//! 1. The local store is mutated synchronously, before any await point, so
//!    the UI reflects the action with zero latency.
//! 2. The corresponding request is sent, and then — regardless of its
//!    outcome — the cart is re-fetched and the store hydrated wholesale
//!    from the server's snapshot. Phase 2 always wins over phase 1; the
//!    optimistic state is never merged with the server's.
//!
//! Failed mutations are not retried and not rolled back: the optimistic
//! state stays visible until the next successful refresh re-synchronizes.
//!
//! Overlapping refreshes are sequence-guarded: each refresh takes a ticket
//! from a monotonic counter before its `GET`, and a response whose ticket
//! is no longer the newest is discarded instead of hydrating, so a slow
//! stale snapshot can never clobber a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_core::cart::{CartLine, CartStore, LineKey};

use crate::client::CartApiClient;
use crate::error::ClientError;
use crate::types::WireCartItem;

/// Orchestrates a [`CartStore`] against the remote cart API.
///
/// Cheap to share: the store is behind an `Arc<Mutex<_>>` so UI readers
/// and overlapping async tasks see the same state.
pub struct SyncedCart {
    store: Arc<Mutex<CartStore>>,
    client: CartApiClient,
    refresh_seq: AtomicU64,
}

impl SyncedCart {
    #[must_use]
    pub fn new(client: CartApiClient) -> Self {
        Self::with_store(client, Arc::new(Mutex::new(CartStore::new())))
    }

    /// Wraps an existing shared store, e.g. one the UI already holds.
    #[must_use]
    pub fn with_store(client: CartApiClient, store: Arc<Mutex<CartStore>>) -> Self {
        Self {
            store,
            client,
            refresh_seq: AtomicU64::new(0),
        }
    }

    /// The shared store handle, for readers that render cart state.
    #[must_use]
    pub fn store(&self) -> Arc<Mutex<CartStore>> {
        Arc::clone(&self.store)
    }

    /// A point-in-time copy of the cart state.
    #[must_use]
    pub fn snapshot(&self) -> CartStore {
        self.lock().clone()
    }

    // Poisoning is deliberately ignored: the store carries no invariant a
    // panicked writer could leave half-applied that the next hydrate
    // wouldn't overwrite.
    fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a line optimistically, posts it to the backend, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns the first error among the POST and the refresh. Local state
    /// is not rolled back on failure.
    pub async fn add_and_sync(&self, line: CartLine) -> Result<(), ClientError> {
        let slug = line.slug.clone();
        let variant_id = line.variant_id.clone();
        let quantity = line.quantity.max(1);

        self.lock().add(line);
        tracing::debug!(%slug, ?variant_id, quantity, "optimistic add applied");

        let request_outcome = self
            .client
            .add_line(&slug, variant_id.as_deref(), quantity)
            .await;
        if let Err(error) = &request_outcome {
            tracing::warn!(%slug, %error, "add-to-cart request failed; local state left optimistic");
        }

        let refresh_outcome = self.refresh().await;
        request_outcome.and(refresh_outcome)
    }

    /// Sets a line's quantity optimistically (zero removes), sends the
    /// matching PATCH or DELETE, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns the first error among the mutation request and the refresh.
    pub async fn set_quantity_and_sync(
        &self,
        key: &LineKey,
        quantity: u32,
    ) -> Result<(), ClientError> {
        let id = key.product_or_variant_id().to_owned();

        let request_outcome = if quantity == 0 {
            self.lock().remove(key);
            tracing::debug!(%id, "optimistic remove applied (quantity zero)");
            self.client.remove_line(&id).await
        } else {
            self.lock().set_quantity(key, quantity);
            tracing::debug!(%id, quantity, "optimistic quantity update applied");
            self.client.set_line_quantity(&id, quantity).await
        };
        if let Err(error) = &request_outcome {
            tracing::warn!(%id, %error, "quantity update request failed; local state left optimistic");
        }

        let refresh_outcome = self.refresh().await;
        request_outcome.and(refresh_outcome)
    }

    /// Removes a line optimistically, sends the DELETE, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns the first error among the DELETE and the refresh.
    pub async fn remove_and_sync(&self, key: &LineKey) -> Result<(), ClientError> {
        let id = key.product_or_variant_id().to_owned();

        self.lock().remove(key);
        tracing::debug!(%id, "optimistic remove applied");

        let request_outcome = self.client.remove_line(&id).await;
        if let Err(error) = &request_outcome {
            tracing::warn!(%id, %error, "remove request failed; local state left optimistic");
        }

        let refresh_outcome = self.refresh().await;
        request_outcome.and(refresh_outcome)
    }

    /// Fetches the authoritative cart and hydrates the store wholesale,
    /// unless a newer refresh was issued while this one was in flight.
    ///
    /// # Errors
    ///
    /// Propagates the `GET`'s [`ClientError`]; the local store is left
    /// untouched on failure.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let ticket = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let envelope = self.client.fetch_cart().await?;
        let lines: Vec<CartLine> = envelope.items.into_iter().map(map_wire_item).collect();

        let newest = self.refresh_seq.load(Ordering::SeqCst);
        if ticket != newest {
            tracing::debug!(ticket, newest, "discarding stale cart refresh");
            return Ok(());
        }

        let count = lines.len();
        self.lock().hydrate(lines);
        tracing::debug!(lines = count, "cart hydrated from server snapshot");
        Ok(())
    }

    /// Refreshes the cart, closes the drawer, and creates a checkout,
    /// returning its identifier for navigation.
    ///
    /// # Errors
    ///
    /// Propagates the refresh's error, or [`ClientError::Api`] carrying
    /// the checkout endpoint's error payload.
    pub async fn prepare_for_checkout(&self, channel: &str) -> Result<String, ClientError> {
        self.refresh().await?;
        self.lock().set_open(false);

        let created = self.client.create_checkout(channel).await?;
        tracing::debug!(checkout_id = %created.id, channel, "checkout created");
        Ok(created.id)
    }
}

/// Maps a server cart item into the local line shape. Absent numeric
/// fields default to zero; an absent cap stays `None`.
fn map_wire_item(item: WireCartItem) -> CartLine {
    CartLine {
        slug: item.slug,
        variant_id: item.variant_id,
        name: item.name,
        image: item.image,
        unit_price: item.unit_price.unwrap_or_default(),
        quantity: item.quantity,
        max_qty: item.max_qty,
        weight_kg: item.weight_kg,
        attributes: item.attributes,
        price_html: item.price_html,
    }
}
