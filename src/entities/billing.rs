//! Billing: invoices, payments and settlement of patient accounts.

use crate::emr_record;
use crate::service::ValidationRule;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

emr_record! {
    pub struct Invoice("invoice") {
        patient_id: Option<Uuid>,
        visit_id: Option<Uuid>,
        invoice_number: Option<String>,
        invoice_date: Option<NaiveDate>,
        total_amount: Option<f64>,
        amount_paid: Option<f64>,
        status: Option<String>,
    }
    rules {
        "invoiceNumber" => ValidationRule::new().required().max_length(32),
    }
}

emr_record! {
    pub struct InvoiceLine("invoiceline") {
        invoice_id: Option<Uuid>,
        item_code: Option<String>,
        description: Option<String>,
        quantity: Option<f64>,
        unit_price: Option<f64>,
        line_total: Option<f64>,
    }
}

emr_record! {
    pub struct Payment("payment") {
        invoice_id: Option<Uuid>,
        patient_id: Option<Uuid>,
        payment_date: Option<DateTime<Utc>>,
        amount: Option<f64>,
        method: Option<String>,
        reference_number: Option<String>,
    }
}

emr_record! {
    pub struct PaymentReceipt("paymentreceipt") {
        payment_id: Option<Uuid>,
        receipt_number: Option<String>,
        issued_on: Option<DateTime<Utc>>,
        issued_to: Option<String>,
    }
}

emr_record! {
    /// Final reconciliation of a patient account, including write-offs.
    pub struct AccountSettlement("accountsettlement") {
        patient_id: Option<Uuid>,
        invoice_id: Option<Uuid>,
        settlement_date: Option<NaiveDate>,
        settled_amount: Option<f64>,
        write_off_amount: Option<f64>,
        notes: Option<String>,
    }
}

emr_record! {
    pub struct PriceListItem("pricelistitem") {
        item_code: Option<String>,
        item_name: Option<String>,
        category: Option<String>,
        unit_price: Option<f64>,
        currency: Option<String>,
        active: Option<bool>,
    }
    rules {
        "itemCode" => ValidationRule::new().required().pattern(r"^[A-Za-z0-9._-]+$"),
    }
}
