//! Scheduling: appointments, reminder delivery log, provider rosters.

use crate::emr_record;
use chrono::{DateTime, Utc};
use uuid::Uuid;

emr_record! {
    pub struct Appointment("appointment") {
        patient_id: Option<Uuid>,
        provider_id: Option<Uuid>,
        location_id: Option<Uuid>,
        scheduled_start: Option<DateTime<Utc>>,
        scheduled_end: Option<DateTime<Utc>>,
        reason: Option<String>,
        status: Option<String>,
    }
}

emr_record! {
    /// Delivery log of one reminder sent for an appointment.
    pub struct AppointmentReminderLog("appointmentreminderlog") {
        appointment_id: Option<Uuid>,
        patient_id: Option<Uuid>,
        channel: Option<String>,
        sent_on: Option<DateTime<Utc>>,
        delivery_status: Option<String>,
        message: Option<String>,
    }
}

emr_record! {
    /// Recurring weekly availability of a provider at a location.
    pub struct DoctorSchedule("doctorschedule") {
        provider_id: Option<Uuid>,
        location_id: Option<Uuid>,
        day_of_week: Option<i32>,
        start_time: Option<String>,
        end_time: Option<String>,
        slot_minutes: Option<i32>,
    }
}
