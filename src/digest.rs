//! HMAC digest types and dynamic truncation.

use core::convert::TryFrom;

use crate::length::{Length, TokenLength};
use crate::sha1::DIGEST_SIZE;
use crate::Token;

/// HMAC-SHA1 digest type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HmacSha1(pub [u8; DIGEST_SIZE]);

impl HmacSha1 {
    /// The tag as five big-endian 32-bit words, matching the SHA-1 register layout.
    pub fn words(&self) -> [u32; 5] {
        let mut words = [0u32; 5];
        for (word, bytes) in words.iter_mut().zip(self.0.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        words
    }
}

impl AsRef<[u8]> for HmacSha1 {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Digest for HmacSha1 {}

/// Trait enabling use of alternative MAC outputs.
///
/// [RFC 4226][4226] prescribes HMAC-SHA1, which is what [`HmacSha1`] carries. Dynamic truncation
/// itself only needs a byte string, so other MACs (for instance an HMAC computed by a hardware
/// peripheral and copied out of its registers) can implement `Digest` and reuse the truncation
/// steps.
///
/// # Notes
///
/// Implementors must be at least 19 bytes long, or the truncation methods
/// [will panic](#panics).
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
pub trait Digest: AsRef<[u8]> {
    /// The dynamic truncation offset: the low nibble of the last byte, in `0..=15`.
    ///
    /// # Panics
    ///
    /// Panics if the digest is empty.
    fn offset(&self) -> usize {
        let digest = self.as_ref();
        (digest[digest.len() - 1] & 0xf) as usize
    }

    /// The 31-bit value selected by dynamic truncation, before decimal reduction.
    ///
    /// # Panics
    ///
    /// Panics for digests shorter than 19 bytes, since offset 15 reads bytes 15 through 18.
    fn truncated(&self) -> u32 {
        let digest = self.as_ref();
        assert!(digest.len() >= 19);
        let index = self.offset();
        // Strip leading bit to remove signed/unsigned ambiguity
        u32::from_be_bytes([
            digest[index] & 0x7f,
            digest[index + 1],
            digest[index + 2],
            digest[index + 3],
        ])
    }

    /// Truncate an HMAC digest to a HOTP token of `DIGITS` decimal digits.
    ///
    /// The [`TokenLength`] bound restricts `DIGITS` to 6, 7, 8 or 9.
    ///
    /// # Examples
    ///
    /// Attempts to truncate a digest to too short a code will fail at compile time:
    ///
    /// ```rust,compile_fail
    ///# use pico_otp::digest::{Digest, HmacSha1};
    /// let digest = HmacSha1([0; 20]);
    /// digest.truncate::<5>();
    /// ```
    ///
    /// Codes of length 6, 7, 8, and 9 are allowed:
    ///
    /// ```rust
    ///# use pico_otp::digest::{Digest, HmacSha1};
    /// let digest = HmacSha1([0; 20]);
    /// digest.truncate::<6>();
    /// digest.truncate::<7>();
    /// digest.truncate::<8>();
    /// digest.truncate::<9>();
    /// ```
    ///
    /// Lengths of 10 or greater are not:
    ///
    /// ```rust,compile_fail
    ///# use pico_otp::digest::{Digest, HmacSha1};
    /// let digest = HmacSha1([0; 20]);
    /// digest.truncate::<10>();
    /// ```
    ///
    /// # Panics
    ///
    /// Same conditions as [`Digest::truncated`].
    fn truncate<const DIGITS: u8>(&self) -> Token<DIGITS>
    where
        Length<DIGITS>: TokenLength,
    {
        Token(self.truncated() % <Length<DIGITS> as TokenLength>::MODULUS)
    }
}

impl From<[u8; DIGEST_SIZE]> for HmacSha1 {
    fn from(raw: [u8; DIGEST_SIZE]) -> Self {
        Self(raw)
    }
}

/// HMAC-SHA1 digest conversion error type.
///
/// Returned when a byte slice of any length other than 20 is converted into an [`HmacSha1`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, thiserror::Error)]
#[error("invalid HMAC-SHA1 digest: expected 20 bytes, got {0}")]
pub struct DigestLengthError(pub usize);

impl TryFrom<&[u8]> for HmacSha1 {
    type Error = DigestLengthError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; DIGEST_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| DigestLengthError(bytes.len()))
    }
}
