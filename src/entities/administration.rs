//! Administration: facilities and membership plans.

use crate::emr_record;
use crate::service::ValidationRule;
use chrono::NaiveDate;
use uuid::Uuid;

emr_record! {
    /// Physical facility (clinic, branch, ward).
    pub struct Location("location") {
        name: Option<String>,
        code: Option<String>,
        address: Option<String>,
        city: Option<String>,
        phone: Option<String>,
        active: Option<bool>,
    }
    rules {
        "name" => ValidationRule::new().required().max_length(200),
    }
}

emr_record! {
    pub struct Department("department") {
        location_id: Option<Uuid>,
        name: Option<String>,
        code: Option<String>,
        speciality: Option<String>,
        active: Option<bool>,
    }
}

emr_record! {
    /// Patient enrolment in a benefit plan.
    pub struct Membership("membership") {
        patient_id: Option<Uuid>,
        plan_name: Option<String>,
        member_number: Option<String>,
        valid_from: Option<NaiveDate>,
        valid_to: Option<NaiveDate>,
        active: Option<bool>,
    }
}
