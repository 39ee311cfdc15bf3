use formtree::{Labeled, ToLabeledValue, TreeProjector};

struct Opaque;

#[derive(Labeled)]
struct Location {
    street_address: String,
    #[labeled(rename = "zip")]
    postal_code: Option<String>,
}

#[derive(Labeled)]
struct Submission {
    business_name: String,
    location: Location,
    #[labeled(skip)]
    opaque: Opaque,
}

fn main() {
    let submission = Submission {
        business_name: "Casa Luna".into(),
        location: Location {
            street_address: "12 Elm St".into(),
            postal_code: Some("78701".into()),
        },
        opaque: Opaque,
    };
    let _ = &submission.opaque;
    let rows = TreeProjector::default()
        .flatten(&submission.to_labeled_value(), "")
        .unwrap();
    assert_eq!(rows.len(), 3);
}
