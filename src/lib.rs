//! EMR REST SDK: a uniform CRUD HTTP layer over injected per-entity
//! services. Handlers bind the request, stamp tenant and audit fields,
//! delegate to the registered service and wrap the result in a standard
//! envelope; everything else is the service's business.

pub mod entities;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod listing;
pub mod openapi;
pub mod patch;
pub mod record;
pub mod registry;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{AppError, RegistryError};
pub use identity::RequestIdentity;
pub use listing::{FilterCriteria, ListParams, ListQuery, PageRequest, SortOrder};
pub use openapi::ApiDoc;
pub use patch::{PatchDocument, PatchOp};
pub use record::EmrRecord;
pub use registry::{EntityMeta, RegistryBuilder, ServiceRegistry};
pub use response::{CreatedBody, DeleteBody, Page, PageMeta, RecordBody};
pub use routes::{common_routes, entity_routes};
pub use service::{EntityService, InMemoryService, RecordPage, RequestContext};
pub use state::AppState;
