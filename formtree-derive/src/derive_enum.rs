//! Enum-specific `ToLabeledValue` derivation.
//!
//! Only field-less enums are supported: each variant converts to its name as
//! text, or to its `#[labeled(rename = "...")]` value. Form selections such as
//! cuisine type or service style are stored this way.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DataEnum, Fields, Ident, LitStr, Result, spanned::Spanned};

use crate::{
    DeriveOutput,
    attrs::{Position, parse_options},
    crate_path,
};

pub(crate) fn derive_enum(data: DataEnum) -> Result<DeriveOutput> {
    let value = crate_path("LabeledValue");
    let mut arms = Vec::new();

    for variant in data.variants {
        let span = variant.span();
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.fields.span(),
                "`Labeled` can only be derived for enums whose variants have no fields",
            ));
        }
        let options = parse_options(&variant.attrs, Position::Variant)?;
        let ident = &variant.ident;
        let key = key_literal(ident, options.rename);
        arms.push(quote_spanned! { span =>
            Self::#ident => #value::text(#key),
        });
    }

    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms)*
            }
        }
    };
    Ok(DeriveOutput {
        body,
        used_generics: Vec::new(),
    })
}

/// Variant name as a string literal, or its `rename` value.
fn key_literal(ident: &Ident, rename: Option<LitStr>) -> TokenStream {
    let key = rename.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    quote! { #key }
}
