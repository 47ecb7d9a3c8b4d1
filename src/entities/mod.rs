//! EMR entity catalog. Every entity is a flat record with the shared
//! id/tenant/audit columns; storage semantics live behind
//! [`crate::service::EntityService`].

pub mod administration;
pub mod billing;
pub mod clinical;
pub mod generic;
pub mod inventory;
pub mod scheduling;

pub use administration::{Department, Location, Membership};
pub use billing::{AccountSettlement, Invoice, InvoiceLine, Payment, PaymentReceipt, PriceListItem};
pub use clinical::{ClinicalNote, Diagnosis, LabOrder, LabResult, Patient, Prescription, Visit};
pub use generic::Generic;
pub use inventory::{GoodsReceipt, PurchaseOrder, StockAdjustment, StockItem, StockTransfer};
pub use scheduling::{Appointment, AppointmentReminderLog, DoctorSchedule};

use crate::error::RegistryError;
use crate::registry::ServiceRegistry;
use crate::service::InMemoryService;
use std::sync::Arc;

/// Register the full catalog backed by the in-memory reference service.
/// Used by the demo server and the test suite; real deployments register
/// their own service per entity.
pub fn in_memory_registry() -> Result<ServiceRegistry, RegistryError> {
    ServiceRegistry::builder()
        .register::<Patient>(Arc::new(InMemoryService::<Patient>::new()))
        .register::<Visit>(Arc::new(InMemoryService::<Visit>::new()))
        .register::<ClinicalNote>(Arc::new(InMemoryService::<ClinicalNote>::new()))
        .register::<Diagnosis>(Arc::new(InMemoryService::<Diagnosis>::new()))
        .register::<Prescription>(Arc::new(InMemoryService::<Prescription>::new()))
        .register::<LabOrder>(Arc::new(InMemoryService::<LabOrder>::new()))
        .register::<LabResult>(Arc::new(InMemoryService::<LabResult>::new()))
        .register::<Appointment>(Arc::new(InMemoryService::<Appointment>::new()))
        .register::<AppointmentReminderLog>(Arc::new(InMemoryService::<AppointmentReminderLog>::new()))
        .register::<DoctorSchedule>(Arc::new(InMemoryService::<DoctorSchedule>::new()))
        .register::<Invoice>(Arc::new(InMemoryService::<Invoice>::new()))
        .register::<InvoiceLine>(Arc::new(InMemoryService::<InvoiceLine>::new()))
        .register::<Payment>(Arc::new(InMemoryService::<Payment>::new()))
        .register::<PaymentReceipt>(Arc::new(InMemoryService::<PaymentReceipt>::new()))
        .register::<AccountSettlement>(Arc::new(InMemoryService::<AccountSettlement>::new()))
        .register::<PriceListItem>(Arc::new(InMemoryService::<PriceListItem>::new()))
        .register::<StockItem>(Arc::new(InMemoryService::<StockItem>::new()))
        .register::<StockAdjustment>(Arc::new(InMemoryService::<StockAdjustment>::new()))
        .register::<StockTransfer>(Arc::new(InMemoryService::<StockTransfer>::new()))
        .register::<GoodsReceipt>(Arc::new(InMemoryService::<GoodsReceipt>::new()))
        .register::<PurchaseOrder>(Arc::new(InMemoryService::<PurchaseOrder>::new()))
        .register::<Location>(Arc::new(InMemoryService::<Location>::new()))
        .register::<Department>(Arc::new(InMemoryService::<Department>::new()))
        .register::<Membership>(Arc::new(InMemoryService::<Membership>::new()))
        .register::<Generic>(Arc::new(InMemoryService::<Generic>::new()))
        .build()
}
