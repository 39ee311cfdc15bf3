//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for type parameters that appear in converted
//! fields. Skipped fields and `PhantomData<T>` markers never require
//! `T: ToLabeledValue`:
//!
//! ```ignore
//! #[derive(Labeled)]
//! struct Tagged<T> {
//!     name: String,
//!     _marker: PhantomData<T>,  // T needs no bound
//! }
//! ```

use syn::{Ident, parse_quote};

use crate::crate_path;

fn push_if_generic(ident: &Ident, generics: &syn::Generics, result: &mut Vec<Ident>) {
    if generics.type_params().any(|param| param.ident == *ident)
        && !result.iter().any(|g| g == ident)
    {
        result.push(ident.clone());
    }
}

fn visit_path_arguments(
    args: &syn::PathArguments,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    if let syn::PathArguments::AngleBracketed(args) = args {
        for arg in &args.args {
            match arg {
                syn::GenericArgument::Type(inner_ty) => visit_type(inner_ty, generics, result),
                syn::GenericArgument::AssocType(assoc) => visit_type(&assoc.ty, generics, result),
                _ => {}
            }
        }
    }
}

fn is_phantom_path(path: &syn::Path) -> bool {
    path.segments
        .last()
        .is_some_and(|segment| segment.ident == "PhantomData")
}

/// Whether `ty` is a `PhantomData<..>` marker, by its last path segment.
pub(crate) fn is_phantom_data(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(type_path) => type_path.qself.is_none() && is_phantom_path(&type_path.path),
        syn::Type::Paren(paren) => is_phantom_data(&paren.elem),
        syn::Type::Group(group) => is_phantom_data(&group.elem),
        _ => false,
    }
}

fn visit_path(path: &syn::Path, generics: &syn::Generics, result: &mut Vec<Ident>) {
    if is_phantom_path(path) {
        return;
    }
    for segment in &path.segments {
        push_if_generic(&segment.ident, generics, result);
        visit_path_arguments(&segment.arguments, generics, result);
    }
}

fn visit_type(ty: &syn::Type, generics: &syn::Generics, result: &mut Vec<Ident>) {
    match ty {
        syn::Type::Path(type_path) => {
            if let Some(qself) = &type_path.qself {
                visit_type(&qself.ty, generics, result);
            }
            visit_path(&type_path.path, generics, result);
        }
        syn::Type::Reference(reference) => visit_type(&reference.elem, generics, result),
        syn::Type::Slice(slice) => visit_type(&slice.elem, generics, result),
        syn::Type::Array(array) => visit_type(&array.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                visit_type(elem, generics, result);
            }
        }
        syn::Type::Paren(paren) => visit_type(&paren.elem, generics, result),
        syn::Type::Group(group) => visit_type(&group.elem, generics, result),
        _ => {}
    }
}

/// Records every type parameter of `generics` mentioned by `ty`.
pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    visit_type(ty, generics, result);
}

/// Adds `ToLabeledValue` bounds to the type parameters used by converted fields.
pub(crate) fn add_labeled_bounds(mut generics: syn::Generics, used_generics: &[Ident]) -> syn::Generics {
    let bound = crate_path("ToLabeledValue");
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#bound));
        }
    }
    generics
}
