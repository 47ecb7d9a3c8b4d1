//! In-memory reference service: a tenant-scoped store behind the
//! [`EntityService`] seam, used by the demo server and the test suite.
//!
//! Deliberately naive: criteria support only the `eq` operator, search is
//! a substring scan over string fields, and field projection is left to
//! real implementations.

use crate::error::AppError;
use crate::listing::{FilterCriteria, ListQuery, SortOrder};
use crate::patch::{PatchDocument, PatchOp};
use crate::record::EmrRecord;
use crate::service::{EntityService, RecordPage, RequestContext};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

pub struct InMemoryService<T> {
    records: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryService<T> {
    pub fn new() -> Self {
        InMemoryService {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryService<T> {
    fn default() -> Self {
        InMemoryService::new()
    }
}

fn record_json<T: EmrRecord>(record: &T) -> Result<Value, AppError> {
    serde_json::to_value(record).map_err(|e| AppError::Service(format!("encode {}: {}", T::NAME, e)))
}

fn matches_criteria(json: &Value, criteria: &[FilterCriteria]) -> bool {
    criteria.iter().all(|c| {
        if !c.operator.eq_ignore_ascii_case("eq") {
            // Other operators belong to real query engines; ignore here.
            return true;
        }
        json.get(&c.field) == Some(&c.value)
    })
}

fn matches_search(json: &Value, term: &str) -> bool {
    let needle = term.to_lowercase();
    match json {
        Value::Object(map) => map
            .values()
            .filter_map(Value::as_str)
            .any(|s| s.to_lowercase().contains(&needle)),
        _ => false,
    }
}

fn cmp_json(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Resolve a patch pointer to a top-level field key. Records are flat, so
/// nested pointers are rejected.
fn field_key(path: &str) -> Result<String, AppError> {
    let rest = path
        .strip_prefix('/')
        .ok_or_else(|| AppError::Validation(format!("patch path must start with '/': {}", path)))?;
    if rest.is_empty() || rest.contains('/') {
        return Err(AppError::Validation(format!(
            "nested patch paths are not supported: {}",
            path
        )));
    }
    Ok(rest.replace("~1", "/").replace("~0", "~"))
}

fn apply_patch(target: &mut Map<String, Value>, doc: &PatchDocument) -> Result<(), AppError> {
    for op in doc.ops() {
        match op {
            PatchOp::Add { path, value } | PatchOp::Replace { path, value } => {
                target.insert(field_key(path)?, value.clone());
            }
            PatchOp::Remove { path } => {
                target.remove(&field_key(path)?);
            }
            PatchOp::Test { path, value } => {
                let current = target.get(&field_key(path)?).unwrap_or(&Value::Null);
                if current != value {
                    return Err(AppError::Validation(format!("test failed at {}", path)));
                }
            }
            PatchOp::Move { .. } | PatchOp::Copy { .. } => {
                return Err(AppError::Validation(format!(
                    "unsupported patch op at {}",
                    op.path()
                )));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl<T: EmrRecord> EntityService<T> for InMemoryService<T> {
    async fn create(&self, _ctx: &RequestContext, mut record: T) -> Result<Uuid, AppError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let id = record.id().unwrap_or_else(Uuid::new_v4);
        if records.contains_key(&id) {
            return Err(AppError::Conflict(format!("{} {} already exists", T::NAME, id)));
        }
        record.set_id(id);
        records.insert(id, record);
        Ok(id)
    }

    async fn list(&self, ctx: &RequestContext, query: ListQuery) -> Result<RecordPage<T>, AppError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut matched: Vec<(Value, T)> = Vec::new();
        for record in records.values() {
            if record.tenant_id() != Some(ctx.tenant_id) {
                continue;
            }
            let json = record_json(record)?;
            if !matches_criteria(&json, &query.criteria) {
                continue;
            }
            if let Some(term) = &query.search_term {
                if !matches_search(&json, term) {
                    continue;
                }
            }
            matched.push((json, record.clone()));
        }
        drop(records);

        let sort_key = query.sort_field.as_deref().unwrap_or("createdOn");
        matched.sort_by(|(a, _), (b, _)| {
            let ord = cmp_json(
                a.get(sort_key).unwrap_or(&Value::Null),
                b.get(sort_key).unwrap_or(&Value::Null),
            );
            // stable tie-break so pages never overlap
            ord.then_with(|| {
                cmp_json(
                    a.get("id").unwrap_or(&Value::Null),
                    b.get("id").unwrap_or(&Value::Null),
                )
            })
        });
        if query.sort_order == SortOrder::Desc {
            matched.reverse();
        }

        let total_count = matched.len() as u64;
        let items: Vec<T> = matched
            .into_iter()
            .skip(query.page.offset())
            .take(query.page.size as usize)
            .map(|(_, r)| r)
            .collect();
        Ok(RecordPage {
            items,
            total_count,
            page_number: query.page.number,
            page_size: query.page.size,
        })
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        fields: Option<Vec<String>>,
    ) -> Result<Option<T>, AppError> {
        if fields.is_some() {
            tracing::debug!(entity = T::NAME, "field projection ignored by reference store");
        }
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records
            .get(&id)
            .filter(|r| r.tenant_id() == Some(ctx.tenant_id))
            .cloned())
    }

    async fn update(&self, ctx: &RequestContext, id: Uuid, mut record: T) -> Result<Option<T>, AppError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let owned = records
            .get(&id)
            .map(|r| r.tenant_id() == Some(ctx.tenant_id))
            .unwrap_or(false);
        if !owned {
            return Ok(None);
        }
        record.set_id(id);
        records.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn patch(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: PatchDocument,
    ) -> Result<Option<T>, AppError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let Some(existing) = records
            .get(&id)
            .filter(|r| r.tenant_id() == Some(ctx.tenant_id))
            .cloned()
        else {
            return Ok(None);
        };
        let mut json = match record_json(&existing)? {
            Value::Object(map) => map,
            _ => return Err(AppError::Service(format!("{} did not encode as an object", T::NAME))),
        };
        apply_patch(&mut json, &patch)?;
        let mut patched: T = serde_json::from_value(Value::Object(json))
            .map_err(|e| AppError::Validation(format!("patch produced an invalid {}: {}", T::NAME, e)))?;
        // a patch can never move a record to another id or tenant
        patched.set_id(id);
        patched.set_tenant_id(ctx.tenant_id);
        records.insert(id, patched.clone());
        Ok(Some(patched))
    }

    async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let owned = records
            .get(&id)
            .map(|r| r.tenant_id() == Some(ctx.tenant_id))
            .unwrap_or(false);
        if !owned {
            return Ok(false);
        }
        records.remove(&id);
        Ok(true)
    }
}
