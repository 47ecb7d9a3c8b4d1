//! Per-entity service seam and the in-memory reference implementation.

mod memory;
mod validation;

pub use memory::InMemoryService;
pub use validation::{RequestValidator, ValidationRule};

use crate::error::AppError;
use crate::identity::RequestIdentity;
use crate::listing::ListQuery;
use crate::patch::PatchDocument;
use crate::record::EmrRecord;
use async_trait::async_trait;
use uuid::Uuid;

/// Caller identity threaded through every service call.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    pub tenant_id: Uuid,
    pub user_id: Option<Uuid>,
}

impl From<RequestIdentity> for RequestContext {
    fn from(identity: RequestIdentity) -> Self {
        RequestContext {
            tenant_id: identity.tenant_id,
            user_id: identity.user_id,
        }
    }
}

/// One page of records plus paging metadata, as produced by a service.
#[derive(Clone, Debug)]
pub struct RecordPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: i64,
    pub page_size: i64,
}

/// The injected per-entity interface. All storage and query semantics
/// (filter operators, search, sorting, projection) live behind it; the
/// HTTP layer binds, stamps and delegates.
#[async_trait]
pub trait EntityService<T: EmrRecord>: Send + Sync {
    /// Store a new record and return its id.
    async fn create(&self, ctx: &RequestContext, record: T) -> Result<Uuid, AppError>;

    /// Return one page matching the query, scoped to the caller's tenant.
    async fn list(&self, ctx: &RequestContext, query: ListQuery) -> Result<RecordPage<T>, AppError>;

    /// Fetch one record by id. `fields` is an optional projection the
    /// implementation may honor or ignore.
    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        fields: Option<Vec<String>>,
    ) -> Result<Option<T>, AppError>;

    /// Replace the record with `id`. Returns the stored record, or None
    /// when the id does not exist in the caller's tenant.
    async fn update(&self, ctx: &RequestContext, id: Uuid, record: T) -> Result<Option<T>, AppError>;

    /// Apply a patch document to the record with `id`.
    async fn patch(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: PatchDocument,
    ) -> Result<Option<T>, AppError>;

    /// Remove the record with `id`. Returns whether anything was removed.
    async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError>;
}
