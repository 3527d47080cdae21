//! Procedural macros for the enrollment project.
//!
//! This crate provides `#[derive(Resource)]`, the per-resource-type declaration that
//! plugs a serde model into the generic handler set. The generated code refers to
//! `::enrollment_core`, so the deriving crate must depend on `enrollment-core`.
//!
//! ```ignore
//! #[derive(Debug, Clone, Serialize, Deserialize, Resource)]
//! #[resource(name = "EnrollmentResponse", collection = "enrollmentresponses")]
//! pub struct EnrollmentResponse {
//!     pub id: Option<String>,
//!     #[serde(flatten)]
//!     pub fields: serde_json::Map<String, serde_json::Value>,
//! }
//! ```
//!
//! `name` defaults to the struct name and `collection` to its lowercase plural. The
//! identity field is the one marked `#[resource(id)]`, or the field named `id`; it
//! must be an `Option<String>`.

#[allow(unused_extern_crates)]
extern crate self as enrollment_macros;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Field, Fields, LitStr, parse_macro_input};

#[proc_macro_derive(Resource, attributes(resource))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_resource(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_resource(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut name: Option<LitStr> = None;
    let mut collection: Option<LitStr> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("resource")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("collection") {
                collection = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `name` or `collection`"))
            }
        })?;
    }

    let name = name.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let collection = collection.unwrap_or_else(|| {
        LitStr::new(&format!("{}s", ident.to_string().to_lowercase()), ident.span())
    });

    let fields = match &input.data {
        Data::Struct(DataStruct { fields: Fields::Named(named), .. }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Resource can only be derived for structs with named fields",
            ));
        }
    };

    let id_field = find_id_field(fields.iter())?
        .ok_or_else(|| {
            syn::Error::new_spanned(
                ident,
                "Resource requires a field named `id` or a field marked `#[resource(id)]`",
            )
        })?;
    let id_ident = &id_field.ident;

    Ok(quote! {
        impl #impl_generics ::enrollment_core::resource::Resource for #ident #ty_generics #where_clause {
            const RESOURCE_TYPE: &'static str = #name;

            fn collection_name() -> &'static str {
                #collection
            }

            fn id(&self) -> ::core::option::Option<&str> {
                self.#id_ident.as_deref()
            }

            fn set_id(&mut self, id: &::enrollment_core::id::ResourceId) {
                self.#id_ident = ::core::option::Option::Some(id.to_hex());
            }
        }
    })
}

fn find_id_field<'a>(fields: impl Iterator<Item = &'a Field> + Clone) -> syn::Result<Option<&'a Field>> {
    let mut marked = None;

    for field in fields.clone() {
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("resource")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    marked = Some(field);
                    Ok(())
                } else {
                    Err(meta.error("expected `id`"))
                }
            })?;
        }
    }

    if marked.is_some() {
        return Ok(marked);
    }

    Ok(fields
        .into_iter()
        .find(|f| f.ident.as_ref().is_some_and(|i| i == "id")))
}
