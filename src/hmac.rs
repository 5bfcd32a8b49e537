//! HMAC-SHA1 keyed-MAC engine (IETF RFC 2104).

use zeroize::Zeroizing;

use crate::digest::HmacSha1;
use crate::sha1::{Sha1, BLOCK_SIZE, DIGEST_SIZE};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Incremental HMAC-SHA1.
///
/// The inner hash is primed with the inner key pad on construction, so only the outer key pad has
/// to be kept around until [`finalize`](Hmac::finalize). The outer pad and the keyed inner hash
/// state are both wiped when the `Hmac` is dropped.
#[derive(Clone)]
pub struct Hmac {
    inner: Sha1,
    outer_pad: Zeroizing<[u8; BLOCK_SIZE]>,
}

impl Hmac {
    /// Creates a MAC state for `key`. Keys of any length are accepted.
    pub fn new(key: &[u8]) -> Self {
        let key = normalize_key(key);

        let mut inner_pad = Zeroizing::new([IPAD; BLOCK_SIZE]);
        let mut outer_pad = Zeroizing::new([OPAD; BLOCK_SIZE]);
        for ((i, o), k) in inner_pad.iter_mut().zip(outer_pad.iter_mut()).zip(key.iter()) {
            *i ^= k;
            *o ^= k;
        }

        let mut inner = Sha1::new();
        inner.update(&*inner_pad);
        Self { inner, outer_pad }
    }

    /// Absorbs message text.
    pub fn update(&mut self, text: &[u8]) -> &mut Self {
        self.inner.update(text);
        self
    }

    /// Computes `SHA1(outer_pad || SHA1(inner_pad || text))`.
    pub fn finalize(&self) -> HmacSha1 {
        let inner = self.inner.finalize().to_bytes();
        let mut outer = Sha1::new();
        outer.update(&*self.outer_pad).update(&inner);
        HmacSha1(outer.finalize().to_bytes())
    }
}

// Keys longer than a block are hashed first; the result is zero-padded to one block.
fn normalize_key(key: &[u8]) -> Zeroizing<[u8; BLOCK_SIZE]> {
    let mut block = Zeroizing::new([0u8; BLOCK_SIZE]);
    if key.len() > BLOCK_SIZE {
        let mut hashed = Zeroizing::new([0u8; DIGEST_SIZE]);
        Sha1::new().update(key).finalize_into(&mut *hashed);
        block[..DIGEST_SIZE].copy_from_slice(&*hashed);
    } else {
        block[..key.len()].copy_from_slice(key);
    }
    block
}

/// Computes the HMAC-SHA1 tag of `text` under `key`.
///
/// Both inputs may have any length, including zero.
pub fn hmac_sha1(key: &[u8], text: &[u8]) -> HmacSha1 {
    Hmac::new(key).update(text).finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sha1::sha1_digest;
    use hex_literal::hex;
    use ring::hmac::{sign, Key, HMAC_SHA1_FOR_LEGACY_USE_ONLY};
    use test_case::test_case;

    // IETF RFC 2202, section 3.
    #[test_case(&[0x0b; 20], b"Hi There", hex!("b617318655057264e28bc0b6fb378c8ef146be00"); "case 1")]
    #[test_case(b"Jefe", b"what do ya want for nothing?", hex!("effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"); "case 2")]
    #[test_case(&[0xaa; 20], &[0xdd; 50], hex!("125d7342b9ac11cd91a39af48aa17b4f63f175d3"); "case 3")]
    #[test_case(
        &hex!("0102030405060708090a0b0c0d0e0f10111213141516171819"),
        &[0xcd; 50],
        hex!("4c9007f4026250c6bc8414f9bf50c86c2d7235da");
        "case 4"
    )]
    #[test_case(&[0x0c; 20], b"Test With Truncation", hex!("4c1a03424b55e07fe7f27be1d58bb9324a9a5a04"); "case 5")]
    #[test_case(
        &[0xaa; 80],
        b"Test Using Larger Than Block-Size Key - Hash Key First",
        hex!("aa4ae5e15272d00e95705637ce8a3b55ed402112");
        "case 6"
    )]
    #[test_case(
        &[0xaa; 80],
        b"Test Using Larger Than Block-Size Key and Larger Than One Block-Size Data",
        hex!("e8e99d0f45237d786d6bbaa7965c7808bbff1a91");
        "case 7"
    )]
    fn rfc_2202(key: &[u8], text: &[u8], expected: [u8; 20]) {
        assert_eq!(hmac_sha1(key, text).0, expected);
    }

    // IETF RFC 4226, appendix D: HMAC of the 8-byte counter under the test secret.
    #[test_case(0, hex!("cc93cf18508d94934c64b65d8ba7667fb7cde4b0"))]
    #[test_case(1, hex!("75a48a19d4cbe100644e8ac1397eea747a2d33ab"))]
    #[test_case(2, hex!("0bacb7fa082fef30782211938bc1c5e70416ff44"))]
    #[test_case(3, hex!("66c28227d03a2d5529262ff016a1e6ef76557ece"))]
    #[test_case(4, hex!("a904c900a64b35909874b33e61c5938a8e15ed1c"))]
    #[test_case(5, hex!("a37e783d7b7233c083d4f62926c7a25f238d0316"))]
    #[test_case(6, hex!("bc9cd28561042c83f219324d3c607256c03272ae"))]
    #[test_case(7, hex!("a4fb960c0bc06e1eabb804e5b397cdc4b45596fa"))]
    #[test_case(8, hex!("1b3c89f65e6c9e883012052823443f048b4332db"))]
    #[test_case(9, hex!("1637409809a679dc698207310c8c7fc07290d9e5"))]
    fn rfc_4226_intermediate(counter: u64, expected: [u8; 20]) {
        let mac = hmac_sha1(b"12345678901234567890", &counter.to_be_bytes());
        assert_eq!(mac.0, expected);
    }

    #[test]
    fn with_a_key_of_less_than_64_bytes() {
        let mac = hmac_sha1(b"nosecret", b"\x00\x11\x22\x33\x44\x55\x66\x77\x88");
        assert_eq!(mac.0, hex!("7514b95d55691d53b6c159e7f0502a8f7fa1406e"));
    }

    #[test]
    fn with_a_key_of_64_bytes() {
        let mac = hmac_sha1(
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/",
            b"\x00\x11\x22\x33\x44\x55\x66\x77\x88",
        );
        assert_eq!(mac.0, hex!("fc530013604055510bbc9d3577539f370fd95e8c"));
    }

    #[test]
    fn with_a_key_of_more_than_64_bytes() {
        let mac = hmac_sha1(
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=[]",
            b"\x00\x11\x22\x33\x44\x55\x66\x77\x88",
        );
        assert_eq!(mac.0, hex!("a3a354003a633c3d85eb8009f49f5b79a8865ae2"));
    }

    #[test]
    fn long_key_is_replaced_by_its_digest() {
        let key: std::vec::Vec<u8> = (0..150u8).collect();
        for len in BLOCK_SIZE + 1..key.len() {
            let key = &key[..len];
            let hashed = sha1_digest(key).to_bytes();
            assert_eq!(
                hmac_sha1(key, b"message"),
                hmac_sha1(&hashed, b"message"),
                "key length {}",
                len
            );
        }
    }

    #[test]
    fn long_key_is_normalized_to_its_padded_digest() {
        let key = [0xaa; 80];
        let block = normalize_key(&key);
        assert_eq!(block[..DIGEST_SIZE], sha1_digest(&key).to_bytes());
        assert_eq!(block[DIGEST_SIZE..], [0; BLOCK_SIZE - DIGEST_SIZE][..]);
    }

    #[test]
    fn short_key_is_zero_padded() {
        let block = normalize_key(b"Jefe");
        assert_eq!(&block[..4], b"Jefe");
        assert_eq!(block[4..], [0; BLOCK_SIZE - 4][..]);
    }

    #[test]
    fn deterministic() {
        let key = b"a shared secret";
        let text = b"some text to authenticate";
        assert_eq!(hmac_sha1(key, text), hmac_sha1(key, text));
    }

    #[test]
    fn empty_key_and_text() {
        assert_eq!(
            hmac_sha1(b"", b"").0,
            hex!("fbdb1d1b18aa6c08324b7d64b71fb76370690e1d")
        );
    }

    #[test]
    fn matches_reference_across_lengths() {
        let bytes: std::vec::Vec<u8> = (0..=255u8).rev().cycle().take(2 * BLOCK_SIZE + 3).collect();
        for key_len in (0..bytes.len()).step_by(7) {
            for text_len in (0..bytes.len()).step_by(5) {
                let key = &bytes[..key_len];
                let text = &bytes[bytes.len() - text_len..];
                let expected = sign(&Key::new(HMAC_SHA1_FOR_LEGACY_USE_ONLY, key), text);
                assert_eq!(
                    &hmac_sha1(key, text).0[..],
                    expected.as_ref(),
                    "key length {}, text length {}",
                    key_len,
                    text_len
                );
            }
        }
    }

    #[test]
    fn incremental_matches_one_shot() {
        let text = b"incremental text fed in several pieces to the mac";
        let mut mac = Hmac::new(b"key");
        for piece in text.chunks(9) {
            mac.update(piece);
        }
        assert_eq!(mac.finalize(), hmac_sha1(b"key", text));
    }
}
