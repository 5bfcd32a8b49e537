//! HMAC-based one-time passwords ([IETF RFC 4226][4226]) for constrained devices.
//!
//! The crate is three layers, each built only on the one below it:
//!
//! * [`sha1`]: the SHA-1 digest engine,
//! * [`hmac`]: HMAC-SHA1 on top of it,
//! * the HOTP functions at the crate root, which truncate an HMAC-SHA1 tag to a decimal code.
//!
//! Nothing allocates and nothing is shared between calls, so every function is safe to call from
//! any thread or interrupt context with a few hundred bytes of stack.
//!
//! ```rust
//! let token = pico_otp::calculate_hotp(b"12345678901234567890", 0);
//! assert_eq!(token.value(), 755224);
//! assert_eq!(token.digits(), [7, 5, 5, 2, 2, 4]);
//! ```
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226

#![cfg_attr(not(test), no_std)]

use core::{convert::TryFrom, fmt};

pub mod digest;
pub mod hmac;
pub mod length;
pub mod sha1;

pub use crate::digest::{Digest, DigestLengthError, HmacSha1};
pub use crate::hmac::{hmac_sha1, Hmac};
pub use crate::sha1::{sha1_digest, Sha1, Sha1Digest};

use crate::length::{Length, TokenLength};

/// Synchronized moving counter.
///
/// [RFC 4226][4226] describes an "8-byte synchronized moving counter." To allow for more
/// sophisticated forms of counters (including in custom structs, etc.), the `Counter` and
/// [`CounterBytes`] traits are exposed.
///
/// ## `Counter` vs. [`CounterBytes`]
///
/// The `Counter` trait has a method with a return type of `u64`. However, a counter read back
/// from flash or EEPROM is frequently more convenient as an array of bytes; such types implement
/// [`CounterBytes`] instead, whose eight bytes are read as a big-endian `u64`.
///
/// Incrementing and persisting the counter is the caller's job.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
pub trait Counter {
    /// The counter value as an eight-byte unsigned integer.
    fn value(&self) -> u64;
}

/// Raw synchronized moving counter.
///
/// See the documentation for [`Counter`] for more information.
pub trait CounterBytes {
    /// The counter value as big-endian bytes.
    fn value(&self) -> [u8; 8];
}

impl CounterBytes for [u8; 8] {
    fn value(&self) -> [u8; 8] {
        *self
    }
}

impl<T: CounterBytes> Counter for T {
    fn value(&self) -> u64 {
        u64::from_be_bytes(CounterBytes::value(self))
    }
}

impl Counter for u64 {
    fn value(&self) -> u64 {
        *self
    }
}

/// A HOTP value of `DIGITS` decimal digits.
///
/// The numeric value is the primitive form. Leading zeros are significant, so a token should be
/// shown through its [`Display`](fmt::Display) implementation (which zero-pads) or split with
/// `digits()`, never by printing [`value`](Token::value) directly.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Token<const DIGITS: u8>(pub(crate) u32);

impl<const DIGITS: u8> Token<DIGITS> {
    /// The packed numeric value, in `0..10^DIGITS`.
    pub fn value(&self) -> u32 {
        self.0
    }
}

macro_rules! impl_token_digits {
    ($($n:literal),+) => {
        $(impl Token<$n> {
            /// Splits the token into one decimal digit per slot, most significant first.
            pub fn digits(&self) -> [u8; $n] {
                let mut digits = [0u8; $n];
                let mut rest = self.0;
                for digit in digits.iter_mut().rev() {
                    *digit = (rest % 10) as u8;
                    rest /= 10;
                }
                digits
            }
        })+
    };
}
impl_token_digits!(6, 7, 8, 9);

impl<const DIGITS: u8> fmt::Display for Token<DIGITS> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = DIGITS as usize)
    }
}

/// Error returned when a number has more decimal digits than the token it is converted into.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, thiserror::Error)]
#[error("{value} does not fit in a {digits}-digit token")]
pub struct TokenRangeError {
    /// The rejected value.
    pub value: u32,
    /// The token length it was checked against.
    pub digits: u8,
}

impl<const DIGITS: u8> TryFrom<u32> for Token<DIGITS>
where
    Length<DIGITS>: TokenLength,
{
    type Error = TokenRangeError;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value < <Length<DIGITS> as TokenLength>::MODULUS {
            Ok(Self(value))
        } else {
            Err(TokenRangeError {
                value,
                digits: DIGITS,
            })
        }
    }
}

/// Computes the "raw" HOTP value for the given secret and counter.
///
/// This is the 31-bit result of dynamic truncation; no decimal reduction is performed. For a
/// reducing version, see [`hotp`].
pub fn raw_hotp(secret: impl AsRef<[u8]>, counter: impl Counter) -> u32 {
    hmac_sha1(secret.as_ref(), &counter.value().to_be_bytes()).truncated()
}

/// Computes a HOTP token of `DIGITS` digits for the given secret and counter.
///
/// Secrets of any length are accepted. [RFC 4226][4226] asks for at least 128 bits, but
/// enforcing that is left to whoever provisions the secret.
///
/// ```rust
/// use pico_otp::hotp;
///
/// let secret = b"12345678901234567890";
/// assert_eq!(hotp::<6>(secret, 1u64).value(), 287082);
/// assert_eq!(hotp::<8>(secret, 1u64).value(), 94287082);
/// ```
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
pub fn hotp<const DIGITS: u8>(secret: impl AsRef<[u8]>, counter: impl Counter) -> Token<DIGITS>
where
    Length<DIGITS>: TokenLength,
{
    let counter = counter.value();
    tracing::trace!(counter, digits = DIGITS, "generating hotp token");
    hmac_sha1(secret.as_ref(), &counter.to_be_bytes()).truncate()
}

/// Computes the 6-digit HOTP token for `shared_secret` at `counter`.
///
/// Use [`Token::value`] for the packed code or `Token::<6>::digits` for one digit per slot.
pub fn calculate_hotp(shared_secret: &[u8], counter: u64) -> Token<6> {
    hotp(shared_secret, counter)
}
