//! Projection of fetched JSON documents.
#![cfg(feature = "json")]

use formtree::{
    FormatError, LabeledValue, Normalizer, ShapeError, ToLabeledValue, TreeProjector, ValueKind,
};
use serde_json::json;

fn document() -> serde_json::Value {
    json!({
        "id": "sub_01",
        "userEmail": "owner@example.com",
        "createdAt": {"_seconds": 1_704_164_645, "_nanoseconds": 0},
        "businessName": "Taco Shack",
        "submittedAt": {"seconds": 1_710_005_400, "nanoseconds": 500_000_000},
        "delivery": false,
        "seats": 40,
        "hours": {"weekday": "9-17", "weekend": null},
        "specials": [
            {"name": "Birria", "days": ["Fri", "Sat"]},
            {"name": "Menudo", "days": []}
        ]
    })
}

mod normalize {
    use super::*;

    #[test]
    fn record_keeps_document_order() {
        let entries = Normalizer::new().record(&document()).unwrap();
        let keys: Vec<_> = entries.keys().collect();
        assert_eq!(
            keys,
            [
                "id",
                "userEmail",
                "createdAt",
                "businessName",
                "submittedAt",
                "delivery",
                "seats",
                "hours",
                "specials",
            ]
        );
        assert_eq!(
            entries.get("submittedAt").map(LabeledValue::kind),
            Some(ValueKind::Temporal)
        );
    }

    #[test]
    fn non_object_documents_are_rejected() {
        let err = Normalizer::new().record(&json!("text")).unwrap_err();
        assert_eq!(err, ShapeError::NotKeyed { found: ValueKind::Scalar });
        assert_eq!(
            err.to_string(),
            "expected a keyed record at the root, found scalar"
        );
    }

    #[test]
    fn json_values_convert_through_the_trait() {
        let value = json!({"a": [1, "two", null]}).to_labeled_value();
        assert_eq!(
            value.get("a"),
            Some(&LabeledValue::sequence([
                LabeledValue::int(1),
                LabeledValue::text("two"),
                LabeledValue::Null,
            ]))
        );
    }
}

mod export {
    use super::*;

    #[test]
    fn document_flattens_to_rows() {
        let entries = Normalizer::new().record(&document()).unwrap();
        let table = TreeProjector::default().export_table(&entries);
        let pairs: Vec<_> = table.rows().iter().map(|row| row.as_pair()).collect();
        assert_eq!(
            pairs,
            [
                ("businessName", "Taco Shack"),
                ("submittedAt", "3/9/2024, 5:30:00 PM"),
                ("delivery", "false"),
                ("seats", "40"),
                ("hours > weekday", "9-17"),
                ("specials [1] > name", "Birria"),
                ("specials [1] > days", "Fri, Sat"),
                ("specials [2] > name", "Menudo"),
                ("specials [2] > days", "No items"),
            ]
        );
        assert_eq!(table.invalid_rows().count(), 0);
    }

    #[test]
    fn out_of_range_nanoseconds_mark_the_cell() {
        let entries = Normalizer::new()
            .record(&json!({"openedOn": {"seconds": 0, "nanoseconds": 2_000_000_000_i64}}))
            .unwrap();
        let rows = TreeProjector::default().flatten_entries(&entries, "");
        assert_eq!(rows[0].value(), "[invalid]");
        assert_eq!(
            rows[0].error(),
            Some(&FormatError::TimestampOutOfRange {
                seconds: 0,
                nanos: 2_000_000_000,
            })
        );
    }

    #[test]
    fn rows_serialize_with_errors_only_when_present() {
        let entries = Normalizer::new()
            .record(&json!({"city": "Austin"}))
            .unwrap();
        let table = TreeProjector::default().export_table(&entries);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({"rows": [{"path": "city", "value": "Austin"}]})
        );
    }

    #[test]
    fn display_nodes_serialize_with_tagged_content() {
        let nodes = TreeProjector::default().project(&LabeledValue::bool(false), "delivery", 2);
        assert_eq!(
            serde_json::to_value(&nodes[0]).unwrap(),
            json!({
                "label": "Delivery",
                "depth": 2,
                "content": {"type": "scalar", "value": "No"}
            })
        );
    }
}
