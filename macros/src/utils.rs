//! Utility functions for procedural macros

use syn::{GenericArgument, PathArguments, Type};

/// The `V` of a `Field<V>` type, also matching qualified paths like `rep::Field<V>`
pub fn field_value_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Field" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
