use formtree::{Labeled, LabeledValue, ToLabeledValue};

#[derive(Labeled)]
enum Cuisine {
    Mexican,
    #[labeled(rename = "Tex-Mex")]
    TexMex,
}

#[derive(Labeled)]
enum Never {}

fn main() {
    assert_eq!(Cuisine::Mexican.to_labeled_value(), LabeledValue::text("Mexican"));
    assert_eq!(Cuisine::TexMex.to_labeled_value(), LabeledValue::text("Tex-Mex"));
    let _ = std::mem::size_of::<Never>();
}
