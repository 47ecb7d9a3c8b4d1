//! Entity CRUD routes. Paths are parameterized so the Path extractor
//! receives the segment and id; handlers resolve the entity from the
//! registry by path segment.

use crate::handlers::entity::{create, delete_record, list, patch_record, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/:entity", get(list).post(create))
        .route(
            "/:entity/:id",
            get(read).put(update).patch(patch_record).delete(delete_record),
        )
        .with_state(state)
}
