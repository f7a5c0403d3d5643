use std::sync::Arc;

use tokio::sync::RwLock;

use crate::errors::ServiceError;
use models::Keyed;

/// Policy applied when a text filter matches nothing.
///
/// The category-style endpoints answer an empty listing; the branch-style
/// endpoint answers `NotFound`. Every filter call site states its policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyMatch {
    AsEmptyList,
    AsNotFound,
}

/// Ordered in-memory collection of uniquely keyed records of one shape.
///
/// Insertion order is list order. The collection owns its records for the
/// process lifetime; state is never persisted and resets on restart. All
/// access goes through one RwLock, so each operation is a single atomic
/// step over the sequence.
pub struct Collection<T> {
    entity: &'static str,
    inner: RwLock<Vec<T>>,
}

impl<T> Collection<T>
where
    T: Keyed + Clone + Send + Sync,
{
    /// Build a collection seeded with its startup data set. `entity` is
    /// the label used in not-found messages ("Product", "Student").
    pub fn new(entity: &'static str, seed: Vec<T>) -> Arc<Self> {
        Arc::new(Self { entity, inner: RwLock::new(seed) })
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Full ordered sequence of records.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// Current number of records.
    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    /// First record whose id matches.
    pub async fn get(&self, id: u64) -> Result<T, ServiceError> {
        let items = self.inner.read().await;
        items
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(self.entity))
    }

    /// Ordered subsequence whose selected text field equals `value`,
    /// compared case-insensitively. Records where the field is absent
    /// never match.
    pub async fn filter_text<F>(
        &self,
        value: &str,
        on_empty: EmptyMatch,
        field: F,
    ) -> Result<Vec<T>, ServiceError>
    where
        F: Fn(&T) -> Option<&str>,
    {
        let wanted = value.to_lowercase();
        let items = self.inner.read().await;
        let matched: Vec<T> = items
            .iter()
            .filter(|r| field(r).map(|v| v.to_lowercase() == wanted).unwrap_or(false))
            .cloned()
            .collect();
        if matched.is_empty() && on_empty == EmptyMatch::AsNotFound {
            return Err(ServiceError::not_found(self.entity));
        }
        Ok(matched)
    }

    /// Record with the greatest value of the selected field. Only a
    /// strictly greater value displaces the current maximum, so the
    /// earliest-inserted record wins ties. `NotFound` when empty.
    pub async fn max_by<F>(&self, field: F) -> Result<T, ServiceError>
    where
        F: Fn(&T) -> f64,
    {
        let items = self.inner.read().await;
        let mut best: Option<&T> = None;
        for r in items.iter() {
            match best {
                Some(b) if field(r) > field(b) => best = Some(r),
                None => best = Some(r),
                _ => {}
            }
        }
        best.cloned().ok_or_else(|| ServiceError::not_found(self.entity))
    }

    /// Arithmetic mean of the selected field rounded to two decimal
    /// places; `0` over an empty collection.
    pub async fn average<F>(&self, field: F) -> f64
    where
        F: Fn(&T) -> f64,
    {
        let items = self.inner.read().await;
        if items.is_empty() {
            return 0.0;
        }
        let sum: f64 = items.iter().map(&field).sum();
        let avg = sum / items.len() as f64;
        (avg * 100.0).round() / 100.0
    }

    /// Append a record built under the next auto-assigned id
    /// (max existing id + 1, or 1 when empty) and return it.
    pub async fn create<F>(&self, build: F) -> T
    where
        F: FnOnce(u64) -> T,
    {
        let mut items = self.inner.write().await;
        let next_id = items.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        let rec = build(next_id);
        items.push(rec.clone());
        rec
    }

    /// Append a record carrying a caller-supplied id verbatim. Duplicate
    /// ids are not checked; id lookups keep answering the earlier record.
    pub async fn push(&self, record: T) -> T {
        let mut items = self.inner.write().await;
        items.push(record.clone());
        record
    }

    /// Replace every field except the id with a freshly built record.
    /// Fields the builder leaves absent become absent on the stored
    /// record (full replacement, not merge).
    pub async fn replace<F>(&self, id: u64, build: F) -> Result<T, ServiceError>
    where
        F: FnOnce(u64) -> T,
    {
        let mut items = self.inner.write().await;
        let slot = items
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(self.entity))?;
        *slot = build(id);
        Ok(slot.clone())
    }

    /// Apply an in-place mutation to the record with the given id and
    /// return the result. A mutation that touches nothing is a valid
    /// no-op: the unchanged record still comes back as success.
    pub async fn update<F>(&self, id: u64, mutate: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.inner.write().await;
        let slot = items
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(self.entity))?;
        mutate(slot);
        Ok(slot.clone())
    }
}
