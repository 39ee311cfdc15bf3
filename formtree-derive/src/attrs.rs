//! Parsing of `#[labeled(...)]` attributes.
//!
//! This module maps attribute syntax to conversion decisions and produces
//! structured errors for invalid forms.

use syn::{Attribute, LitStr, Result, spanned::Spanned};

/// How a field or variant is written into the tree.
///
/// | Attribute                     | Effect                                  |
/// |-------------------------------|-----------------------------------------|
/// | None                          | Key is the camel-cased identifier       |
/// | `#[labeled(rename = "key")]`  | Key is `"key"`                          |
/// | `#[labeled(skip)]`            | Field is left out (fields only)         |
#[derive(Clone, Debug, Default)]
pub(crate) struct LabeledOptions {
    pub(crate) rename: Option<LitStr>,
    pub(crate) skip: bool,
}

/// Where an attribute was found; variants accept fewer options than fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Position {
    Field,
    Variant,
}

pub(crate) fn parse_options(attrs: &[Attribute], position: Position) -> Result<LabeledOptions> {
    let mut options = LabeledOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("labeled") {
            continue;
        }
        if !matches!(attr.meta, syn::Meta::List(_)) {
            return Err(syn::Error::new(
                attr.span(),
                "expected #[labeled(rename = \"...\")] or #[labeled(skip)]",
            ));
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if options.rename.is_some() {
                    return Err(meta.error("duplicate `rename` option"));
                }
                options.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("skip") {
                if position == Position::Variant {
                    return Err(meta.error("`skip` is not supported on enum variants"));
                }
                if options.skip {
                    return Err(meta.error("duplicate `skip` option"));
                }
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown option: expected `rename` or `skip`"))
            }
        })?;
    }
    if options.skip {
        if let Some(rename) = &options.rename {
            return Err(syn::Error::new(
                rename.span(),
                "`rename` has no effect on a skipped field",
            ));
        }
    }
    Ok(options)
}

/// Rejects `#[labeled]` on the type itself; there are no container options.
pub(crate) fn reject_container_options(attrs: &[Attribute]) -> Result<()> {
    match attrs.iter().find(|attr| attr.path().is_ident("labeled")) {
        Some(attr) => Err(syn::Error::new(
            attr.span(),
            "#[labeled] is only supported on fields and enum variants",
        )),
        None => Ok(()),
    }
}
