//! Entity registry: URL path segment -> erased per-entity service.
//!
//! Typed [`EntityService`] implementations are registered per entity; the
//! registry erases them behind a JSON-level trait so one handler set can
//! serve the whole catalog. The erased adapter owns binding, rule
//! validation and tenant/audit stamping; the typed service never sees an
//! unstamped record.

use crate::error::{AppError, RegistryError};
use crate::listing::ListQuery;
use crate::patch::PatchDocument;
use crate::record::EmrRecord;
use crate::response::Page;
use crate::service::{EntityService, RequestContext, RequestValidator};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Static description of one registered entity.
#[derive(Clone, Copy, Debug)]
pub struct EntityMeta {
    pub name: &'static str,
    pub path: &'static str,
}

/// JSON-level view of an [`EntityService`], as used by the handlers.
#[async_trait]
pub trait ErasedEntityService: Send + Sync {
    async fn create(&self, ctx: &RequestContext, body: Value) -> Result<Uuid, AppError>;
    async fn list(&self, ctx: &RequestContext, query: ListQuery) -> Result<Page<Value>, AppError>;
    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        fields: Option<Vec<String>>,
    ) -> Result<Option<Value>, AppError>;
    async fn update(&self, ctx: &RequestContext, id: Uuid, body: Value) -> Result<Option<Value>, AppError>;
    async fn patch(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: PatchDocument,
    ) -> Result<Option<Value>, AppError>;
    async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError>;
}

struct Typed<T: EmrRecord> {
    service: Arc<dyn EntityService<T>>,
    _record: PhantomData<fn() -> T>,
}

fn body_to_map(body: Value) -> Result<Map<String, Value>, AppError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn encode<T: EmrRecord>(record: &T) -> Result<Value, AppError> {
    serde_json::to_value(record).map_err(|e| AppError::Service(format!("encode {}: {}", T::NAME, e)))
}

impl<T: EmrRecord> Typed<T> {
    fn bind(body: Value) -> Result<T, AppError> {
        let map = body_to_map(body)?;
        RequestValidator::validate(&map, &T::validation())?;
        serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::BadRequest(format!("invalid {} body: {}", T::NAME, e)))
    }
}

#[async_trait]
impl<T: EmrRecord> ErasedEntityService for Typed<T> {
    async fn create(&self, ctx: &RequestContext, body: Value) -> Result<Uuid, AppError> {
        let mut record = Self::bind(body)?;
        record.set_tenant_id(ctx.tenant_id);
        record.stamp_created(ctx.user_id, Utc::now());
        self.service.create(ctx, record).await
    }

    async fn list(&self, ctx: &RequestContext, query: ListQuery) -> Result<Page<Value>, AppError> {
        let page = self.service.list(ctx, query).await?;
        let mut data = Vec::with_capacity(page.items.len());
        for item in &page.items {
            data.push(encode(item)?);
        }
        Ok(Page::new(data, page.total_count, page.page_number, page.page_size))
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        fields: Option<Vec<String>>,
    ) -> Result<Option<Value>, AppError> {
        match self.service.get_by_id(ctx, id, fields).await? {
            Some(record) => Ok(Some(encode(&record)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, ctx: &RequestContext, id: Uuid, body: Value) -> Result<Option<Value>, AppError> {
        let mut record = Self::bind(body)?;
        record.set_id(id);
        record.set_tenant_id(ctx.tenant_id);
        record.stamp_updated(ctx.user_id, Utc::now());
        match self.service.update(ctx, id, record).await? {
            Some(updated) => Ok(Some(encode(&updated)?)),
            None => Ok(None),
        }
    }

    async fn patch(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: PatchDocument,
    ) -> Result<Option<Value>, AppError> {
        match self.service.patch(ctx, id, patch).await? {
            Some(patched) => Ok(Some(encode(&patched)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError> {
        self.service.delete(ctx, id).await
    }
}

/// One registered entity: metadata plus its erased service.
pub struct RegisteredEntity {
    meta: EntityMeta,
    service: Arc<dyn ErasedEntityService>,
}

impl RegisteredEntity {
    pub fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    pub fn service(&self) -> &dyn ErasedEntityService {
        self.service.as_ref()
    }
}

/// Immutable map from path segment to registered entity.
pub struct ServiceRegistry {
    by_path: HashMap<&'static str, RegisteredEntity>,
}

impl ServiceRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            entries: Vec::new(),
        }
    }

    pub fn resolve(&self, path_segment: &str) -> Option<&RegisteredEntity> {
        self.by_path.get(path_segment)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Registered entities, ordered by path segment.
    pub fn entities(&self) -> Vec<EntityMeta> {
        let mut metas: Vec<EntityMeta> = self.by_path.values().map(|e| e.meta).collect();
        metas.sort_by_key(|m| m.path);
        metas
    }
}

pub struct RegistryBuilder {
    entries: Vec<RegisteredEntity>,
}

impl RegistryBuilder {
    /// Register a service for entity `T` under `T::PATH`.
    pub fn register<T: EmrRecord>(mut self, service: Arc<dyn EntityService<T>>) -> Self {
        self.entries.push(RegisteredEntity {
            meta: EntityMeta {
                name: T::NAME,
                path: T::PATH,
            },
            service: Arc::new(Typed::<T> {
                service,
                _record: PhantomData,
            }),
        });
        self
    }

    pub fn build(self) -> Result<ServiceRegistry, RegistryError> {
        if self.entries.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut by_path = HashMap::new();
        for entry in self.entries {
            let path = entry.meta.path;
            if by_path.insert(path, entry).is_some() {
                return Err(RegistryError::DuplicatePathSegment(path.to_string()));
            }
        }
        Ok(ServiceRegistry { by_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emr_record;
    use crate::service::InMemoryService;

    emr_record! {
        pub struct Probe("probe") {
            probe_name: Option<String>,
        }
    }

    fn ctx() -> RequestContext {
        RequestContext {
            tenant_id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn duplicate_path_segments_are_rejected() {
        let result = ServiceRegistry::builder()
            .register::<Probe>(Arc::new(InMemoryService::<Probe>::new()))
            .register::<Probe>(Arc::new(InMemoryService::<Probe>::new()))
            .build();
        assert!(matches!(result, Err(RegistryError::DuplicatePathSegment(_))));
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert!(matches!(ServiceRegistry::builder().build(), Err(RegistryError::Empty)));
    }

    #[tokio::test]
    async fn create_stamps_tenant_and_audit_from_context_not_body() {
        let registry = ServiceRegistry::builder()
            .register::<Probe>(Arc::new(InMemoryService::<Probe>::new()))
            .build()
            .unwrap();
        let entity = registry.resolve("probe").unwrap();
        let ctx = ctx();

        let foreign_tenant = Uuid::new_v4();
        let body = serde_json::json!({
            "probeName": "thermometer",
            "tenantId": foreign_tenant.to_string(),
        });
        let id = entity.service().create(&ctx, body).await.unwrap();
        let stored = entity.service().get_by_id(&ctx, id, None).await.unwrap().unwrap();
        assert_eq!(stored["tenantId"], serde_json::json!(ctx.tenant_id.to_string()));
        assert_eq!(
            stored["createdBy"],
            serde_json::json!(ctx.user_id.unwrap().to_string())
        );
        assert!(stored["createdOn"].is_string());
    }

    #[tokio::test]
    async fn non_object_bodies_are_rejected() {
        let registry = ServiceRegistry::builder()
            .register::<Probe>(Arc::new(InMemoryService::<Probe>::new()))
            .build()
            .unwrap();
        let entity = registry.resolve("probe").unwrap();
        let err = entity
            .service()
            .create(&ctx(), serde_json::json!(["not", "an", "object"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
