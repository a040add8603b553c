//! Rep derive macro implementation
//!
//! Parses the `#[rep(...)]` attributes with darling and emits the builder
//! chain describing the type.

use darling::util::Flag;
use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::utils::field_value_type;

/// Receiver for the struct that derives Rep
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(rep), supports(struct_named))]
pub struct RepReceiver {
    /// The struct identifier
    ident: syn::Ident,
    /// Generics of the struct
    generics: syn::Generics,
    /// The struct data with parsed fields
    data: ast::Data<(), RepFieldReceiver>,
    /// Type name used in logs and errors
    #[darling(default)]
    name: Option<String>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(rep))]
pub struct RepFieldReceiver {
    /// The field identifier
    ident: Option<syn::Ident>,
    /// The field type
    ty: syn::Type,
    /// Declares an initialization field
    #[darling(default)]
    init: Flag,
    /// Exposes the field as an accessor
    #[darling(default)]
    read: Flag,
    /// Default value expression
    #[darling(default)]
    default: Option<syn::Expr>,
    /// Option and accessor name, defaults to the field name
    #[darling(default)]
    rename: Option<String>,
}

/// Process the Rep derive macro
pub fn process_derive_rep(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}

/// Expand a derive input into the `rep_builder` impl
pub fn expand(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let receiver = RepReceiver::from_derive_input(input)?;

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let mut errors = darling::Error::accumulator();
    let calls = fields
        .iter()
        .filter_map(|field| errors.handle(builder_call(field)).flatten())
        .collect::<Vec<_>>();
    errors.finish()?;

    let struct_name = &receiver.ident;
    let type_name = receiver
        .name
        .clone()
        .unwrap_or_else(|| struct_name.to_string());
    let (impl_generics, ty_generics, where_clause) = receiver.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Builder pre-populated with the derived fields and accessors
            pub fn rep_builder() -> ::rep::DescriptorBuilder<Self> {
                ::rep::TypeDescriptor::<Self>::builder(#type_name)
                    #(#calls)*
            }
        }
    })
}

/// The builder call one field contributes, `None` for unannotated fields
fn builder_call(field: &RepFieldReceiver) -> darling::Result<Option<TokenStream2>> {
    let Some(ident) = field.ident.as_ref() else {
        return Ok(None);
    };
    let key = field.rename.clone().unwrap_or_else(|| ident.to_string());

    if field.init.is_present() && field.read.is_present() {
        return Err(
            darling::Error::custom("a field is either `init` or `read`, not both").with_span(ident),
        );
    }

    if field.read.is_present() {
        if field.default.is_some() || field.rename.is_some() {
            return Err(darling::Error::custom("`default` and `rename` need `init`").with_span(ident));
        }
        return Ok(Some(quote! {
            .accessor(#key, |this: &Self| ::core::clone::Clone::clone(&this.#ident))
        }));
    }

    if !field.init.is_present() {
        if field.default.is_some() || field.rename.is_some() {
            return Err(darling::Error::custom("`default` and `rename` need `init`").with_span(ident));
        }
        return Ok(None);
    }

    if field_value_type(&field.ty).is_none() {
        return Err(
            darling::Error::custom("`init` fields must have type `Field<V>`").with_span(&field.ty),
        );
    }

    let default = match &field.default {
        Some(expr) => quote! { ::core::option::Option::Some(::rep::serde_json::json!(#expr)) },
        None => quote! { ::core::option::Option::None },
    };

    Ok(Some(quote! {
        .init_field(
            #key,
            #default,
            |this: &Self| &this.#ident,
            |this: &mut Self| &mut this.#ident,
        )
    }))
}
