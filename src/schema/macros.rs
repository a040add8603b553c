//! Macros for field-set declarations
//!
//! This module provides a macro to reduce boilerplate when declaring field sets.

/// Build the spec list of a field set
///
/// Plain entries use the same name for the output key and the accessor;
/// `key => accessor` entries alias an output key to another accessor.
///
/// # Example
///
/// ```rust
/// use rep::field_set;
/// use rep::schema::FieldSpec;
///
/// let specs = field_set!["one" => "real_one", "two", "three"];
/// assert_eq!(specs[0], FieldSpec::aliased("one", "real_one"));
/// assert_eq!(specs[2], FieldSpec::new("three"));
/// ```
#[macro_export]
macro_rules! field_set {
    (@spec $key:literal => $accessor:literal) => {
        $crate::schema::FieldSpec::aliased($key, $accessor)
    };
    (@spec $key:literal) => {
        $crate::schema::FieldSpec::new($key)
    };
    () => {
        ::std::vec::Vec::<$crate::schema::FieldSpec>::new()
    };
    ($($key:literal $(=> $accessor:literal)?),+ $(,)?) => {
        ::std::vec![
            $(
                $crate::field_set!(@spec $key $(=> $accessor)?)
            ),+
        ]
    };
}
