//! Newtype codes for type-safe entity references.
//!
//! The backend identifies every catalog entity with a string code (a table
//! row key, a SKU, an image id). Use the `define_code!` macro to create
//! wrappers that prevent accidentally mixing codes from different entity types.

/// Macro to define a type-safe string code wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use bluepenguin_core::define_code;
/// define_code!(ShelfCode);
/// define_code!(BinCode);
///
/// let shelf = ShelfCode::new("S1");
/// let bin = BinCode::new("S1");
///
/// assert_eq!(shelf.as_str(), bin.as_str());
/// // These are different types, so this won't compile:
/// // let _: ShelfCode = bin;
/// ```
#[macro_export]
macro_rules! define_code {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new code from any string-like value.
            #[must_use]
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Get the code as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> Self {
                code.0
            }
        }
    };
}

// Define standard entity codes
define_code!(CategoryId);
define_code!(CollectionId);
define_code!(MaterialId);
define_code!(FeatureId);
define_code!(Sku);
define_code!(ImageId);
define_code!(UserId);
