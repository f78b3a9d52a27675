use glam::Vec2;

const INV_2_POW_32: f64 = 1.0 / 4294967296.0;
// Largest f32 below 1.0; high indices would otherwise round up to it.
const ONE_MINUS_EPSILON: f32 = 1.0 - f32::EPSILON / 2.0;

/// Base-2 radical inverse.
pub struct VanDerCorput;

impl VanDerCorput {
    pub fn at(i: u32) -> f32 {
        ((i.reverse_bits() as f64 * INV_2_POW_32) as f32).min(ONE_MINUS_EPSILON)
    }
}

const HALTON_PRIMES: [u32; 24] = [
    2, 3, 5, 7, 11, 13, 17, 19,
    23, 29, 31, 37, 41, 43, 47, 53,
    59, 61, 67, 71, 73, 79, 83, 89,
];

/// Radical inverse in the base of the `dimension`-th prime.
pub struct Halton;

impl Halton {
    pub fn at(dimension: u32, mut i: u32) -> f32 {
        let base = HALTON_PRIMES[dimension as usize % HALTON_PRIMES.len()];
        let inv_base = 1.0 / base as f32;

        let mut f = 1.0;
        let mut r = 0.0;
        while i > 0 {
            f *= inv_base;
            r += f * (i % base) as f32;
            i /= base;
        }
        r
    }
}

pub struct Hammersley;

impl Hammersley {
    /// The `i`-th of `n` points: stratified x, radical-inverse y.
    pub fn distribute(n: u32, i: u32) -> Vec2 {
        Vec2::new(i as f32 / n as f32, VanDerCorput::at(i))
    }
}
