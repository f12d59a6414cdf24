use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x6d1c_3b8f_a4e2_9057;

const BASE62: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Whole base62 digits covered by a 128-bit digest (62^21 < 2^128).
const DIGITS_PER_ROUND: usize = 21;

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> u128 {
        self.inner.digest128()
    }
}

/// Filename-safe digest of `input` that is exactly `len` characters long.
///
/// Characters come from `[0-9A-Za-z]`. Each round contributes 21 characters from a seeded
/// XXH3-128 over `(round, input)`; the output depends only on `input` and `len`, and a longer
/// digest always starts with the shorter one.
pub(crate) fn base62_digest(input: &str, len: usize) -> String {
    let mut out = String::with_capacity(len);
    let mut round = 0u32;
    while out.len() < len {
        let mut h = StableHasher::new();
        h.write_u32(round);
        h.write_str(input);
        let remaining = len - out.len();
        push_base62(&mut out, h.finish(), remaining);
        round = round.wrapping_add(1);
    }
    out
}

fn push_base62(out: &mut String, mut v: u128, max: usize) {
    for _ in 0..DIGITS_PER_ROUND.min(max) {
        out.push(char::from(BASE62[(v % 62) as usize]));
        v /= 62;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/key/digest.rs"]
mod tests;
