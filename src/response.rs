//! Standard response envelope types.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of a successful create: the id assigned by the service.
#[derive(Serialize, ToSchema)]
pub struct CreatedBody {
    pub id: Uuid,
}

/// Body of a successful delete.
#[derive(Serialize, ToSchema)]
pub struct DeleteBody {
    pub status: bool,
}

/// Single-record envelope for read, update and patch responses.
#[derive(Serialize)]
pub struct RecordBody<T> {
    pub data: T,
}

/// List envelope: one page of records plus paging metadata.
#[derive(Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_count: u64,
    pub page_number: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total_count: u64, page_number: i64, page_size: i64) -> Self {
        Page {
            data,
            meta: PageMeta {
                total_count,
                page_number,
                page_size,
            },
        }
    }
}
