//! Common shape of every EMR record: identity, tenancy and audit stamps.
//!
//! Entities are declared with [`crate::emr_record!`], which injects the
//! shared columns and wires the [`EmrRecord`] impl so one set of handlers
//! can serve the whole catalog.

use crate::service::ValidationRule;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub trait EmrRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Entity name as exposed in messages and docs, e.g. `Invoice`.
    const NAME: &'static str;
    /// URL path segment under `/api`, e.g. `invoice`.
    const PATH: &'static str;

    fn id(&self) -> Option<Uuid>;
    fn set_id(&mut self, id: Uuid);
    fn tenant_id(&self) -> Option<Uuid>;
    fn set_tenant_id(&mut self, tenant_id: Uuid);
    fn stamp_created(&mut self, by: Option<Uuid>, at: DateTime<Utc>);
    fn stamp_updated(&mut self, by: Option<Uuid>, at: DateTime<Utc>);

    /// Declared field rules, keyed by the JSON (camelCase) field name.
    /// Checked on create and full update.
    fn validation() -> HashMap<String, ValidationRule> {
        HashMap::new()
    }
}

/// Declares one EMR entity: a flat record with the shared id/tenant/audit
/// columns plus the listed entity-specific fields, serialized camelCase.
#[macro_export]
macro_rules! emr_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($path:literal) {
            $( $fname:ident : $ftype:ty ),* $(,)?
        }
        $(rules { $($rfield:literal => $rule:expr),+ $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        $vis struct $name {
            pub id: Option<uuid::Uuid>,
            pub tenant_id: Option<uuid::Uuid>,
            pub created_by: Option<uuid::Uuid>,
            pub created_on: Option<chrono::DateTime<chrono::Utc>>,
            pub updated_by: Option<uuid::Uuid>,
            pub updated_on: Option<chrono::DateTime<chrono::Utc>>,
            $( pub $fname: $ftype, )*
        }

        impl $crate::record::EmrRecord for $name {
            const NAME: &'static str = stringify!($name);
            const PATH: &'static str = $path;

            fn id(&self) -> Option<uuid::Uuid> {
                self.id
            }

            fn set_id(&mut self, id: uuid::Uuid) {
                self.id = Some(id);
            }

            fn tenant_id(&self) -> Option<uuid::Uuid> {
                self.tenant_id
            }

            fn set_tenant_id(&mut self, tenant_id: uuid::Uuid) {
                self.tenant_id = Some(tenant_id);
            }

            fn stamp_created(&mut self, by: Option<uuid::Uuid>, at: chrono::DateTime<chrono::Utc>) {
                self.created_by = by;
                self.created_on = Some(at);
            }

            fn stamp_updated(&mut self, by: Option<uuid::Uuid>, at: chrono::DateTime<chrono::Utc>) {
                self.updated_by = by;
                self.updated_on = Some(at);
            }

            $(
                fn validation() -> std::collections::HashMap<String, $crate::service::ValidationRule> {
                    let mut rules = std::collections::HashMap::new();
                    $( rules.insert($rfield.to_string(), $rule); )+
                    rules
                }
            )?
        }
    };
}
