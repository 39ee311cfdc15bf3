use std::marker::PhantomData;

use formtree::{Labeled, ToLabeledValue};

struct Marker;

#[derive(Labeled)]
struct Page<T, M> {
    items: Vec<T>,
    total: usize,
    _marker: PhantomData<M>,
}

fn main() {
    let page: Page<String, Marker> = Page {
        items: vec!["a".into()],
        total: 1,
        _marker: PhantomData,
    };
    assert!(page.to_labeled_value().get("items").is_some());
}
