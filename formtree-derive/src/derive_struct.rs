//! Struct-specific `ToLabeledValue` derivation.
//!
//! - named fields become a keyed mapping in declaration order
//! - a single unnamed field converts as its inner value
//! - several unnamed fields become a sequence
//! - a unit struct converts to `Null`
//! - `PhantomData` fields are left out like `#[labeled(skip)]` ones

use quote::{quote, quote_spanned};
use syn::{DataStruct, Fields, LitStr, Result, spanned::Spanned};

use crate::{
    DeriveOutput,
    attrs::{Position, parse_options},
    case::camel_case,
    crate_path,
    generics::{collect_generics_from_type, is_phantom_data},
};

pub(crate) fn derive_struct(data: DataStruct, generics: &syn::Generics) -> Result<DeriveOutput> {
    match data.fields {
        Fields::Named(fields) => derive_named_struct(fields, generics),
        Fields::Unnamed(fields) => derive_unnamed_struct(fields, generics),
        Fields::Unit => {
            let value = crate_path("LabeledValue");
            Ok(DeriveOutput {
                body: quote! { #value::Null },
                used_generics: Vec::new(),
            })
        }
    }
}

fn derive_named_struct(fields: syn::FieldsNamed, generics: &syn::Generics) -> Result<DeriveOutput> {
    let convert = crate_path("ToLabeledValue");
    let entries_path = crate_path("Entries");
    let value = crate_path("LabeledValue");
    let mut inserts = Vec::new();
    let mut used_generics = Vec::new();

    for field in fields.named {
        let span = field.span();
        let options = parse_options(&field.attrs, Position::Field)?;
        if options.skip || is_phantom_data(&field.ty) {
            continue;
        }
        let Some(ident) = field.ident else {
            return Err(syn::Error::new(span, "named field without an identifier"));
        };
        let key = options
            .rename
            .unwrap_or_else(|| LitStr::new(&camel_case(&ident.to_string()), ident.span()));
        collect_generics_from_type(&field.ty, generics, &mut used_generics);
        inserts.push(quote_spanned! { span =>
            entries.insert(#key, #convert::to_labeled_value(&self.#ident));
        });
    }

    let capacity = inserts.len();
    let body = if inserts.is_empty() {
        quote! { #value::Keyed(#entries_path::new()) }
    } else {
        quote! {
            let mut entries = #entries_path::with_capacity(#capacity);
            #(#inserts)*
            #value::Keyed(entries)
        }
    };
    Ok(DeriveOutput {
        body,
        used_generics,
    })
}

fn derive_unnamed_struct(
    fields: syn::FieldsUnnamed,
    generics: &syn::Generics,
) -> Result<DeriveOutput> {
    let convert = crate_path("ToLabeledValue");
    let value = crate_path("LabeledValue");
    let mut elements = Vec::new();
    let mut used_generics = Vec::new();
    let total = fields.unnamed.len();

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let span = field.span();
        let options = parse_options(&field.attrs, Position::Field)?;
        if let Some(rename) = options.rename {
            return Err(syn::Error::new(
                rename.span(),
                "`rename` is only supported on named fields",
            ));
        }
        if options.skip || is_phantom_data(&field.ty) {
            continue;
        }
        let member = syn::Index::from(index);
        collect_generics_from_type(&field.ty, generics, &mut used_generics);
        elements.push(quote_spanned! { span =>
            #convert::to_labeled_value(&self.#member)
        });
    }

    let body = if total == 1 {
        match elements.pop() {
            Some(inner) => inner,
            None => quote! { #value::Null },
        }
    } else {
        quote! { #value::Sequence(::std::vec![#(#elements),*]) }
    };
    Ok(DeriveOutput {
        body,
        used_generics,
    })
}
