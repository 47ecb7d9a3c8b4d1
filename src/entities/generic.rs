//! Catch-all record for ad-hoc named items.

use crate::emr_record;

emr_record! {
    pub struct Generic("generic") {
        item_name: Option<String>,
    }
}
