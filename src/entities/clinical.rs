//! Clinical records: patients, visits and the documentation that hangs
//! off a visit.

use crate::emr_record;
use crate::service::ValidationRule;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

emr_record! {
    /// Demographic master record.
    pub struct Patient("patient") {
        medical_record_number: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        date_of_birth: Option<NaiveDate>,
        gender: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    }
    rules {
        "lastName" => ValidationRule::new().required().max_length(100),
        "medicalRecordNumber" => ValidationRule::new().required().max_length(32),
    }
}

emr_record! {
    /// One encounter at a location.
    pub struct Visit("visit") {
        patient_id: Option<Uuid>,
        location_id: Option<Uuid>,
        visit_type: Option<String>,
        visit_date: Option<DateTime<Utc>>,
        chief_complaint: Option<String>,
        status: Option<String>,
    }
}

emr_record! {
    pub struct ClinicalNote("clinicalnote") {
        visit_id: Option<Uuid>,
        patient_id: Option<Uuid>,
        note_type: Option<String>,
        note_text: Option<String>,
        recorded_on: Option<DateTime<Utc>>,
    }
}

emr_record! {
    /// Coded diagnosis attached to a visit.
    pub struct Diagnosis("diagnosis") {
        visit_id: Option<Uuid>,
        patient_id: Option<Uuid>,
        code: Option<String>,
        description: Option<String>,
        onset_date: Option<NaiveDate>,
        is_chronic: Option<bool>,
    }
}

emr_record! {
    pub struct Prescription("prescription") {
        visit_id: Option<Uuid>,
        patient_id: Option<Uuid>,
        drug_name: Option<String>,
        dosage: Option<String>,
        frequency: Option<String>,
        duration_days: Option<i32>,
        notes: Option<String>,
    }
    rules {
        "drugName" => ValidationRule::new().required(),
    }
}

emr_record! {
    pub struct LabOrder("laborder") {
        visit_id: Option<Uuid>,
        patient_id: Option<Uuid>,
        test_code: Option<String>,
        test_name: Option<String>,
        priority: Option<String>,
        ordered_on: Option<DateTime<Utc>>,
        status: Option<String>,
    }
}

emr_record! {
    /// One reported parameter of a lab order.
    pub struct LabResult("labresult") {
        lab_order_id: Option<Uuid>,
        patient_id: Option<Uuid>,
        parameter: Option<String>,
        value: Option<String>,
        unit: Option<String>,
        reference_range: Option<String>,
        reported_on: Option<DateTime<Utc>>,
    }
}
