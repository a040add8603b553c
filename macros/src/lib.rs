//! Procedural macros for the rep crate
//!
//! This crate provides the `Rep` derive, which turns field attributes into
//! the builder calls describing a projected type.

use proc_macro::TokenStream;

mod rep_impl;
mod utils;

#[cfg(test)]
mod tests;

/// Derive macro generating a `rep_builder()` constructor
///
/// The generated function returns a `rep::DescriptorBuilder<Self>` with one
/// initialization field per `#[rep(init)]` field and one accessor per
/// `#[rep(read)]` field, in declaration order. Field sets, extra accessors
/// and hooks are added to the returned builder before calling `build()`.
///
/// * `#[rep(name = "...")]` on the struct sets the type name (defaults to the
///   struct name)
/// * `#[rep(init)]` declares an initialization field; the field must be a
///   `rep::Field<V>`
/// * `#[rep(init, default = "<expr>")]` gives the field a default, the
///   expression is converted with `serde_json::json!`
/// * `#[rep(init, rename = "...")]` uses a different option and accessor name
/// * `#[rep(read)]` exposes a plain `Clone + Serialize` field as an accessor
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default, Rep)]
/// #[rep(name = "Point")]
/// struct Point {
///     #[rep(init)]
///     x: Field<i64>,
///
///     #[rep(init, default = "0")]
///     y: Field<i64>,
/// }
///
/// let descriptor = Point::rep_builder()
///     .field_set("default", field_set!["x", "y"])
///     .build();
/// ```
#[proc_macro_derive(Rep, attributes(rep))]
pub fn derive_rep(input: TokenStream) -> TokenStream {
    rep_impl::process_derive_rep(input)
}
