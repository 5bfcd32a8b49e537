//! Type-level encoding of HOTP token length restrictions.

mod private {
    /// Marks a trait as being for crate-internal use only.
    pub trait Sealed {}

    impl<const N: u8> Sealed for super::Length<N> {}
}

/// Uninhabited type parameterized by a `const u8` for selective trait implementations.
///
/// [`Token`](crate::Token) and [`Digest::truncate`](crate::digest::Digest::truncate) are bounded
/// on `Length<DIGITS>: TokenLength`, which moves the digit-count check to compile time.
pub enum Length<const N: u8> {}

/// Marker trait for allowable HOTP token lengths.
///
/// Per [RFC 4226][4226] section 5.3, HOTP values are at least 6 digits long and possibly 7 or 8;
/// section E.2 of appendix E extends this to 9. Each implementation carries the decimal modulus
/// used for the final reduction step, so the modulus and the digit count cannot disagree.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
pub trait TokenLength: private::Sealed {
    /// `10^N`: every token of this length is strictly below it.
    const MODULUS: u32;
}

macro_rules! impl_token_length {
    ($($n:literal => $modulus:literal),+ $(,)?) => {
        $(impl TokenLength for Length<$n> {
            const MODULUS: u32 = $modulus;
        })+
    };
}

impl_token_length! {
    6 => 1_000_000,
    7 => 10_000_000,
    8 => 100_000_000,
    9 => 1_000_000_000,
}
