//! Hashing and seeded pseudo-random numbers.

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Order-sensitive 32-bit string hash used to seed per-record generators.
///
/// Every step (xor, odd multiply, rotate, final xorshift/multiply rounds) is a bijection on the
/// accumulator, so two keys of equal length that differ in one character never share a seed.
pub fn seed_from_key(key: &str) -> u32 {
    let len = u32::try_from(key.chars().count()).unwrap_or(u32::MAX);
    let mut h: u32 = 1_779_033_703 ^ len;
    for c in key.chars() {
        h = (h ^ u32::from(c)).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// Small deterministic generator (mulberry32) producing values in `[0, 1)`.
#[derive(Clone, Copy, Debug)]
pub struct Rng32 {
    state: u32,
}

impl Rng32 {
    /// Generator seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Generator seeded with [`seed_from_key`] of `key`.
    pub fn from_key(key: &str) -> Self {
        Self::new(seed_from_key(key))
    }

    /// Next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform value in `[-amount, amount)`.
    pub fn jitter(&mut self, amount: f64) -> f64 {
        self.range(-amount, amount)
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
