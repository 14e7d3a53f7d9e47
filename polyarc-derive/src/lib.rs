//! # Polyarc Derive Macros
//!
//! This crate provides the procedural macros for `polyarc`. It automates the
//! implementation of the `Save` and `Load` traits for user-defined types.
//!
//! ## What gets generated
//!
//! * **Structs** (named, tuple, or unit): fields are dispatched in
//!   declaration order, which is the type's wire contract. Because the
//!   expansion happens inside the defining crate, private fields are
//!   reachable without any `friend`-style escape hatch.
//! * **C-like enums**: routed through the `#[repr(..)]` underlying integer
//!   (`i32` when no explicit repr is given). Loading an unknown
//!   discriminant fails instead of fabricating an invalid enum value.
//!
//! Compatible with `syn 2.0`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Ident};

/// Derives `polyarc::Save`: fields (or the enum discriminant) are encoded in
/// declaration order.
#[proc_macro_derive(Save)]
pub fn derive_save(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input, Direction::Save)
}

/// Derives `polyarc::Load`: the mirror of `Save`, decoding in place in the
/// same order.
#[proc_macro_derive(Load)]
pub fn derive_load(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input, Direction::Load)
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Save,
    Load,
}

fn expand(input: DeriveInput, direction: Direction) -> TokenStream {
    let name = input.ident.clone();

    let body = match &input.data {
        Data::Struct(data) => struct_body(&data.fields, direction),
        Data::Enum(data) => enum_body(&name, &input.attrs, data, direction),
        Data::Union(_) => Err(syn::Error::new(
            name.span(),
            "Save/Load cannot be derived for unions",
        )),
    };

    let body = match body {
        Ok(body) => body,
        Err(e) => return e.to_compile_error().into(),
    };

    // Every type parameter picks up the trait bound of the direction being
    // derived, so generic structs work as long as their parameters do.
    let mut generics = input.generics;
    for param in generics.type_params_mut() {
        match direction {
            Direction::Save => param.bounds.push(parse_quote!(polyarc::Save)),
            Direction::Load => param.bounds.push(parse_quote!(polyarc::Load)),
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = match direction {
        Direction::Save => quote! {
            impl #impl_generics polyarc::Save for #name #ty_generics #where_clause {
                fn save(&self, _archive: &mut polyarc::OutputArchive<'_>) -> polyarc::Result<()> {
                    #body
                    Ok(())
                }
            }
        },
        Direction::Load => quote! {
            impl #impl_generics polyarc::Load for #name #ty_generics #where_clause {
                fn load(&mut self, _archive: &mut polyarc::InputArchive<'_>) -> polyarc::Result<()> {
                    #body
                    Ok(())
                }
            }
        },
    };

    TokenStream::from(expanded)
}

// --- Structs ---

fn struct_body(fields: &Fields, direction: Direction) -> syn::Result<proc_macro2::TokenStream> {
    let accessors: Vec<proc_macro2::TokenStream> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|f| {
                let ident = &f.ident;
                quote! { self.#ident }
            })
            .collect(),
        Fields::Unnamed(unnamed) => (0..unnamed.unnamed.len())
            .map(|i| {
                let index = syn::Index::from(i);
                quote! { self.#index }
            })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let statements = accessors.iter().map(|accessor| match direction {
        Direction::Save => quote! { polyarc::Save::save(&#accessor, _archive)?; },
        Direction::Load => quote! { polyarc::Load::load(&mut #accessor, _archive)?; },
    });

    Ok(quote! { #(#statements)* })
}

// --- C-like enums ---

fn enum_body(
    name: &Ident,
    attrs: &[syn::Attribute],
    data: &syn::DataEnum,
    direction: Direction,
) -> syn::Result<proc_macro2::TokenStream> {
    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.ident.span(),
                "Save/Load can only be derived for enums with unit variants; \
                 implement the traits by hand for data-carrying enums",
            ));
        }
        variants.push(&variant.ident);
    }

    if variants.is_empty() {
        return Err(syn::Error::new(
            name.span(),
            "Save/Load cannot be derived for an empty enum",
        ));
    }

    let repr = underlying_repr(attrs)?;

    match direction {
        Direction::Save => Ok(quote! {
            let raw: #repr = match self {
                #( Self::#variants => Self::#variants as #repr, )*
            };
            polyarc::Save::save(&raw, _archive)?;
        }),
        Direction::Load => Ok(quote! {
            let mut raw: #repr = 0;
            polyarc::Load::load(&mut raw, _archive)?;
            *self = match raw {
                #( v if v == Self::#variants as #repr => Self::#variants, )*
                _ => {
                    return Err(polyarc::PolyarcError::InvalidValue(format!(
                        "value {} is not a discriminant of `{}`",
                        raw,
                        stringify!(#name),
                    )))
                }
            };
        }),
    }
}

/// Finds the enum's `#[repr(..)]` integer type; defaults to `i32`, the
/// conventional underlying type, only when no `#[repr(..)]` is declared.
///
/// An explicit repr outside the supported set (`isize`, `u128`, `repr(C)`,
/// ...) is a hard error: encoding such a discriminant through a narrower
/// integer would silently change the wire shape the user declared.
fn underlying_repr(attrs: &[syn::Attribute]) -> syn::Result<proc_macro2::TokenStream> {
    const INT_REPRS: &[&str] = &["u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64"];

    let mut found = None;
    let mut repr_attr = None;
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        repr_attr = Some(attr);
        let _ = attr.parse_nested_meta(|meta| {
            for repr in INT_REPRS {
                if meta.path.is_ident(repr) {
                    let ident = Ident::new(repr, proc_macro2::Span::call_site());
                    found = Some(quote! { #ident });
                }
            }
            Ok(())
        });
    }

    match (found, repr_attr) {
        (Some(repr), _) => Ok(repr),
        (None, Some(attr)) => Err(syn::Error::new_spanned(
            attr,
            "unsupported repr; polyarc supports u8/u16/u32/u64/i8/i16/i32/i64",
        )),
        (None, None) => Ok(quote! { i32 }),
    }
}
