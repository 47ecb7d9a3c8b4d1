//! OpenAPI description of the uniform entity surface.

use crate::error::{ErrorBody, ErrorDetail};
use crate::response::{CreatedBody, DeleteBody, PageMeta};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::entity::create,
        crate::handlers::entity::list,
        crate::handlers::entity::read,
        crate::handlers::entity::update,
        crate::handlers::entity::patch_record,
        crate::handlers::entity::delete_record,
    ),
    components(schemas(CreatedBody, DeleteBody, PageMeta, ErrorBody, ErrorDetail)),
    tags((name = "entities", description = "Uniform CRUD over the EMR entity catalog"))
)]
pub struct ApiDoc;
