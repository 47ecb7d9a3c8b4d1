//! Inventory: stock catalog and the movements against it.

use crate::emr_record;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

emr_record! {
    pub struct StockItem("stockitem") {
        item_code: Option<String>,
        item_name: Option<String>,
        category: Option<String>,
        unit: Option<String>,
        reorder_level: Option<f64>,
        on_hand: Option<f64>,
    }
}

emr_record! {
    /// Manual correction of on-hand quantity, signed.
    pub struct StockAdjustment("stockadjustment") {
        stock_item_id: Option<Uuid>,
        location_id: Option<Uuid>,
        adjustment_date: Option<DateTime<Utc>>,
        quantity_delta: Option<f64>,
        reason: Option<String>,
        reference: Option<String>,
    }
}

emr_record! {
    pub struct StockTransfer("stocktransfer") {
        stock_item_id: Option<Uuid>,
        from_location_id: Option<Uuid>,
        to_location_id: Option<Uuid>,
        transfer_date: Option<DateTime<Utc>>,
        quantity: Option<f64>,
        status: Option<String>,
    }
}

emr_record! {
    pub struct GoodsReceipt("goodsreceipt") {
        purchase_order_id: Option<Uuid>,
        supplier_name: Option<String>,
        received_on: Option<DateTime<Utc>>,
        total_value: Option<f64>,
    }
}

emr_record! {
    pub struct PurchaseOrder("purchaseorder") {
        supplier_name: Option<String>,
        order_date: Option<NaiveDate>,
        expected_date: Option<NaiveDate>,
        status: Option<String>,
        total_value: Option<f64>,
    }
}
