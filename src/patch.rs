//! JSON Patch (RFC 6902) document model. The HTTP layer only rejects
//! missing or empty documents; application semantics belong to the
//! backing service.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Add { path: String, value: serde_json::Value },
    Remove { path: String },
    Replace { path: String, value: serde_json::Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: serde_json::Value },
}

impl PatchOp {
    /// Target pointer of the operation.
    pub fn path(&self) -> &str {
        match self {
            PatchOp::Add { path, .. }
            | PatchOp::Remove { path }
            | PatchOp::Replace { path, .. }
            | PatchOp::Move { path, .. }
            | PatchOp::Copy { path, .. }
            | PatchOp::Test { path, .. } => path,
        }
    }
}

/// An ordered list of patch operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOp>);

impl PatchDocument {
    pub fn ops(&self) -> &[PatchOp] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_operation_list() {
        let doc: PatchDocument = serde_json::from_value(json!([
            {"op": "replace", "path": "/itemName", "value": "Gauze"},
            {"op": "remove", "path": "/notes"},
            {"op": "test", "path": "/status", "value": "open"}
        ]))
        .unwrap();
        assert_eq!(doc.ops().len(), 3);
        assert_eq!(doc.ops()[0].path(), "/itemName");
        assert!(matches!(doc.ops()[1], PatchOp::Remove { .. }));
    }

    #[test]
    fn unknown_op_is_rejected() {
        let res: Result<PatchDocument, _> =
            serde_json::from_value(json!([{"op": "merge", "path": "/x", "value": 1}]));
        assert!(res.is_err());
    }

    #[test]
    fn null_document_deserializes_to_none() {
        let res: Option<PatchDocument> = serde_json::from_str("null").unwrap();
        assert!(res.is_none());
    }
}
