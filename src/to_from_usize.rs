use std::fmt::Display;
use std::hash::Hash;

/// Unsigned integer that can be converted to and from usize.
/// Lets the vocabularies index with types smaller than u64; the
/// conversions are optimized away during compilation.
pub trait ToFromUsize: Clone + Copy + Ord + Display + Hash {
    /// Create the type from a usize.
    fn from_usize(v: usize) -> Self;
    /// Create an usize from the type.
    fn to_usize(v: Self) -> usize;
    /// Return the maximum encodable value.
    fn get_max() -> Self;
}

macro_rules! impl_to_from_usize {
    ($($ty:ty)*) => {
        $(
            impl ToFromUsize for $ty {
                #[inline(always)]
                fn from_usize(v: usize) -> $ty {
                    v as $ty
                }
                #[inline(always)]
                fn to_usize(v: $ty) -> usize {
                    v as usize
                }
                #[inline(always)]
                fn get_max() -> $ty {
                    <$ty>::MAX
                }
            }
        )*
    };
}

impl_to_from_usize!(u8 u16 u32 u64 usize);
