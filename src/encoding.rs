// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! The `UaNullable` trait: every type's notion of its own "default/nil" value,
//! which drives field elision in reversible JSON encoding.

/// A type that has a well defined null/default value distinct from an ordinary value,
/// used to decide whether a named field is elided in reversible JSON form.
pub trait UaNullable {
    /// True if `self` is the null/default value for this type.
    fn is_ua_null(&self) -> bool;
}

macro_rules! is_null_zero {
    ($t:ty) => {
        impl UaNullable for $t {
            fn is_ua_null(&self) -> bool {
                *self == <$t>::default()
            }
        }
    };
}

is_null_zero!(bool);
is_null_zero!(u8);
is_null_zero!(u16);
is_null_zero!(u32);
is_null_zero!(u64);
is_null_zero!(i8);
is_null_zero!(i16);
is_null_zero!(i32);
is_null_zero!(i64);
is_null_zero!(f32);
is_null_zero!(f64);

impl UaNullable for String {
    fn is_ua_null(&self) -> bool {
        self.is_empty()
    }
}

impl<T> UaNullable for Option<T> {
    fn is_ua_null(&self) -> bool {
        self.is_none()
    }
}

impl<T> UaNullable for Vec<T> {
    fn is_ua_null(&self) -> bool {
        self.is_empty()
    }
}

impl<T: UaNullable> UaNullable for Box<T> {
    fn is_ua_null(&self) -> bool {
        self.as_ref().is_ua_null()
    }
}
