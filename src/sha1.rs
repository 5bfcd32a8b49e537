//! SHA-1 digest engine (FIPS 180-4).
//!
//! Everything here runs on the stack: the hasher carries one 64-byte block buffer and the
//! compression function builds its 80-word schedule locally. Nothing allocates, so the engine is
//! usable on targets without a heap.

use core::fmt;

use zeroize::Zeroize;

/// Size in bytes of one SHA-1 input block.
pub const BLOCK_SIZE: usize = 64;

/// Size in bytes of a SHA-1 digest.
pub const DIGEST_SIZE: usize = 20;

// Offset of the 64-bit length field within the final padded block.
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

const INITIAL_STATE: [u32; 5] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476, 0xc3d2_e1f0];

const ROUND_CONSTANTS: [u32; 4] = [0x5a82_7999, 0x6ed9_eba1, 0x8f1b_bcdc, 0xca62_c1d6];

/// A 160-bit SHA-1 digest.
///
/// The five words are stored in register order (A, B, C, D, E). The byte form is each word in
/// big-endian order, which is the conventional rendering of a SHA-1 hash.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sha1Digest(pub [u32; 5]);

impl Sha1Digest {
    /// The digest as five 32-bit words.
    pub fn words(&self) -> [u32; 5] {
        self.0
    }

    /// The digest as twenty bytes, big-endian within each word.
    pub fn to_bytes(&self) -> [u8; DIGEST_SIZE] {
        let mut bytes = [0u8; DIGEST_SIZE];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }
}

impl From<Sha1Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Sha1Digest) -> Self {
        digest.to_bytes()
    }
}

impl fmt::LowerHex for Sha1Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for word in self.0.iter() {
            write!(f, "{:08x}", word)?;
        }
        Ok(())
    }
}

impl fmt::Display for Sha1Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

/// Incremental SHA-1 hasher.
///
/// Data may be fed in any number of pieces; the digest only depends on the concatenation of
/// everything passed to [`update`](Sha1::update).
///
/// The chaining state and the partial block are wiped when the hasher is dropped, since under
/// HMAC both are derived from the key.
///
/// ```rust
/// use pico_otp::sha1::{sha1_digest, Sha1};
///
/// let mut hasher = Sha1::new();
/// hasher.update(b"ab");
/// hasher.update(b"c");
/// assert_eq!(hasher.finalize(), sha1_digest(b"abc"));
/// ```
#[derive(Clone)]
pub struct Sha1 {
    state: [u32; 5],
    buffer: [u8; BLOCK_SIZE],
    // Always less than BLOCK_SIZE between calls; full blocks are compressed immediately.
    buffered: usize,
    // Message length in bytes, modulo 2^64.
    length: u64,
}

impl Zeroize for Sha1 {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
        self.buffered.zeroize();
        self.length.zeroize();
    }
}

impl Drop for Sha1 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha1 {
    /// Creates a hasher with the standard initial state.
    pub const fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
            length: 0,
        }
    }

    /// Absorbs `data` into the hash state.
    pub fn update(&mut self, mut data: &[u8]) -> &mut Self {
        self.length = self.length.wrapping_add(data.len() as u64);

        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < BLOCK_SIZE {
                return self;
            }
            compress(&mut self.state, &self.buffer);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
        self
    }

    /// Pads the message and returns the digest.
    pub fn finalize(&self) -> Sha1Digest {
        Sha1Digest(self.finalize_state())
    }

    /// Pads the message and writes the digest bytes to `out`.
    ///
    /// Unlike [`finalize`](Sha1::finalize), no copy of the digest is left behind on the stack,
    /// which matters when the digest is itself key material.
    pub fn finalize_into(&self, out: &mut [u8; DIGEST_SIZE]) {
        let mut state = self.finalize_state();
        for (chunk, word) in out.chunks_exact_mut(4).zip(state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        state.zeroize();
    }

    fn finalize_state(&self) -> [u32; 5] {
        let mut state = self.state;
        let mut block = self.buffer;
        let bit_length = self.length.wrapping_mul(8);

        block[self.buffered] = 0x80;
        let used = self.buffered + 1;
        for byte in block[used..].iter_mut() {
            *byte = 0;
        }
        // No room for the length field: it spills into an extra, otherwise empty, block.
        if used > LENGTH_OFFSET {
            compress(&mut state, &block);
            block = [0; BLOCK_SIZE];
        }
        block[LENGTH_OFFSET..].copy_from_slice(&bit_length.to_be_bytes());
        compress(&mut state, &block);
        block.zeroize();

        state
    }
}

/// Computes the SHA-1 digest of `data` in one call.
///
/// Any length is accepted, including zero.
pub fn sha1_digest(data: &[u8]) -> Sha1Digest {
    Sha1::new().update(data).finalize()
}

// `block` must be exactly BLOCK_SIZE bytes.
fn compress(state: &mut [u32; 5], block: &[u8]) {
    let mut schedule = [0u32; 80];
    for (word, bytes) in schedule.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    for t in 16..80 {
        schedule[t] =
            (schedule[t - 3] ^ schedule[t - 8] ^ schedule[t - 14] ^ schedule[t - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *state;
    for (t, &word) in schedule.iter().enumerate() {
        let (f, k) = match t {
            0..=19 => ((b & c) | (!b & d), ROUND_CONSTANTS[0]),
            20..=39 => (b ^ c ^ d, ROUND_CONSTANTS[1]),
            40..=59 => ((b & c) | (b & d) | (c & d), ROUND_CONSTANTS[2]),
            _ => (b ^ c ^ d, ROUND_CONSTANTS[3]),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(word);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
    schedule.zeroize();
}
