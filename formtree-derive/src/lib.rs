//! Derive macro for `formtree`.
//!
//! `#[derive(Labeled)]` generates a `formtree::ToLabeledValue` implementation
//! so a typed form record can be projected and flattened like a fetched JSON
//! document. It:
//! - reads `#[labeled(...)]` field and variant attributes
//! - emits camelCase keys matching the stored document field names
//!
//! It does **not** decide what is displayed. Exclusion, locale formatting and
//! null suppression happen at runtime in `formtree::TreeProjector`.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Result, parse_macro_input};

mod attrs;
mod case;
mod derive_enum;
mod derive_struct;
mod generics;
use attrs::reject_container_options;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_labeled_bounds;

/// Derives `formtree::ToLabeledValue` for structs and field-less enums.
///
/// # Structs
///
/// - Named fields become a keyed record in declaration order. Keys are the
///   field names in camelCase (`business_name` becomes `businessName`), the
///   way onboarding documents are stored.
/// - A newtype converts as its inner value.
/// - Other tuple structs become a sequence; unit structs become `Null`.
///
/// Every converted field type must implement `ToLabeledValue`.
///
/// # Enums
///
/// Only variants without fields are accepted. Each converts to its name as
/// text.
///
/// # Field and Variant Attributes
///
/// - `#[labeled(rename = "key")]`: use `key` instead of the derived name.
/// - `#[labeled(skip)]` (fields only): leave the field out entirely. Use this
///   for fields whose type has no `ToLabeledValue` implementation.
///
/// Unions and container-level `#[labeled(...)]` attributes are rejected at
/// compile time.
#[proc_macro_derive(Labeled, attributes(labeled))]
pub fn derive_labeled(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    reject_container_options(&attrs)?;

    let output = match data {
        Data::Struct(data) => derive_struct(data, &generics)?,
        Data::Enum(data) => derive_enum(data)?,
        Data::Union(union) => {
            return Err(syn::Error::new(
                union.union_token.span,
                "`Labeled` cannot be derived for unions",
            ));
        }
    };

    let generics = add_labeled_bounds(generics, &output.used_generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let trait_path = crate_path("ToLabeledValue");
    let value_path = crate_path("LabeledValue");
    let body = output.body;

    Ok(quote! {
        impl #impl_generics #trait_path for #ident #ty_generics #where_clause {
            fn to_labeled_value(&self) -> #value_path {
                #body
            }
        }
    })
}

/// Root path of the `formtree` crate as seen from the derive site.
///
/// `formtree` declares `extern crate self as formtree`, so `::formtree` also
/// resolves inside the crate itself and its tests.
fn crate_root() -> TokenStream {
    match crate_name("formtree") {
        Ok(FoundCrate::Name(name)) if name != "formtree" => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(_) | Err(_) => quote! { ::formtree },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

struct DeriveOutput {
    body: TokenStream,
    used_generics: Vec<Ident>,
}
