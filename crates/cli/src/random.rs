//! Random distributions prescribed by the benchmark.
//!
//! Uniform integers, the non-uniform `NURand` distribution, bounded
//! alphanumeric strings, the ten-syllable last-name formula, and customer
//! permutations. Everything runs over a seedable [`StdRng`], so the whole
//! load and workload are reproducible from one seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Syllables composing every customer last name (TPC-C §4.3.2.3). The
/// three digits of the name number index this table.
pub const LAST_NAME_SYLLABLES: [&str; 10] = [
    "BAR", "OUGHT", "ABLE", "PRI", "PRES", "ESE", "ANTI", "CALLY", "ATION", "EING",
];

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Constant triple for the three `NURand` windows: last names (A = 255),
/// customer ids (A = 1023), item ids (A = 8191).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NuRandC {
    pub c_last: i32,
    pub c_id: i32,
    pub order_line: i32,
}

impl NuRandC {
    /// Fresh constants, uniformly random in each window.
    pub fn from_rng(rng: &mut impl Rng) -> Self {
        NuRandC {
            c_last: rng.gen_range(0..=255),
            c_id: rng.gen_range(0..=1023),
            order_line: rng.gen_range(0..=8191),
        }
    }

    /// Constants for the measurement run. The run-phase `c_last` constant
    /// must sit 65..119 away from the load-phase one, excluding 96 and
    /// 112 (TPC-C §2.1.6.1); the other two windows are unconstrained.
    pub fn for_run(rng: &mut impl Rng, load: &NuRandC) -> Self {
        let mut c = NuRandC::from_rng(rng);
        while !valid_c_last_delta(load.c_last, c.c_last) {
            c.c_last = rng.gen_range(0..=255);
        }
        c
    }
}

fn valid_c_last_delta(load: i32, run: i32) -> bool {
    let delta = (load - run).abs();
    (65..=119).contains(&delta) && delta != 96 && delta != 112
}

/// Sampler bundling the RNG with its `NURand` constants.
pub struct TpccRandom {
    rng: StdRng,
    c: NuRandC,
}

impl TpccRandom {
    /// Deterministic sampler for tests and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let c = NuRandC::from_rng(&mut rng);
        TpccRandom { rng, c }
    }

    /// Entropy-seeded sampler for real runs.
    pub fn from_entropy() -> Self {
        let mut rng = StdRng::from_entropy();
        let c = NuRandC::from_rng(&mut rng);
        TpccRandom { rng, c }
    }

    /// The constants currently in effect.
    pub fn c(&self) -> NuRandC {
        self.c
    }

    /// Replace the constants (used to pin the load-phase set).
    pub fn set_c(&mut self, c: NuRandC) {
        self.c = c;
    }

    /// Switch to run-phase constants valid against `load`.
    pub fn renew_c_for_run(&mut self, load: &NuRandC) {
        self.c = NuRandC::for_run(&mut self.rng, load);
    }

    /// Uniform integer in `[lo, hi]`, both inclusive.
    pub fn number(&mut self, lo: i32, hi: i32) -> i32 {
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform integer in `[lo, hi]` excluding one value; `hi` must
    /// exceed `lo` for the range to stay non-empty.
    pub fn number_excluding(&mut self, lo: i32, hi: i32, excluded: i32) -> i32 {
        debug_assert!(lo < hi);
        let n = self.number(lo, hi - 1);
        if n >= excluded {
            n + 1
        } else {
            n
        }
    }

    /// Non-uniform integer in `[x, y]` (TPC-C §2.1.6).
    pub fn nu_rand(&mut self, a: i32, x: i32, y: i32) -> i32 {
        let c = match a {
            255 => self.c.c_last,
            1023 => self.c.c_id,
            8191 => self.c.order_line,
            _ => {
                debug_assert!(false, "unsupported NURand window {a}");
                0
            }
        };
        (((self.number(0, a) | self.number(x, y)) + c) % (y - x + 1)) + x
    }

    /// Alphanumeric string with a uniform length in `[lo, hi]`.
    pub fn astring(&mut self, lo: usize, hi: usize) -> String {
        let len = self.rng.gen_range(lo..=hi);
        (0..len)
            .map(|_| ALPHANUMERIC[self.rng.gen_range(0..ALPHANUMERIC.len())] as char)
            .collect()
    }

    /// Digit string with a uniform length in `[lo, hi]`.
    pub fn nstring(&mut self, lo: usize, hi: usize) -> String {
        let len = self.rng.gen_range(lo..=hi);
        (0..len)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect()
    }

    /// Last name for number `n` in `[0, 999]`: one syllable per digit.
    pub fn last_name(n: i32) -> String {
        debug_assert!((0..=999).contains(&n));
        let mut name = String::with_capacity(15);
        name.push_str(LAST_NAME_SYLLABLES[(n / 100) as usize]);
        name.push_str(LAST_NAME_SYLLABLES[(n / 10 % 10) as usize]);
        name.push_str(LAST_NAME_SYLLABLES[(n % 10) as usize]);
        name
    }

    /// Non-uniformly selected last name, as the workload queries them.
    pub fn run_last_name(&mut self) -> String {
        let n = self.nu_rand(255, 0, 999);
        Self::last_name(n)
    }

    /// Shuffled `lo..=hi`, used to assign customers to loaded orders.
    pub fn permutation(&mut self, lo: i32, hi: i32) -> Vec<i32> {
        let mut values: Vec<i32> = (lo..=hi).collect();
        values.shuffle(&mut self.rng);
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_stays_in_bounds() {
        let mut random = TpccRandom::seeded(7);
        for _ in 0..1_000 {
            let n = random.number(3, 9);
            assert!((3..=9).contains(&n));
        }
    }

    #[test]
    fn test_number_excluding_never_returns_excluded() {
        let mut random = TpccRandom::seeded(7);
        for _ in 0..1_000 {
            let n = random.number_excluding(1, 10, 4);
            assert!((1..=10).contains(&n));
            assert_ne!(n, 4);
        }
    }

    #[test]
    fn test_nu_rand_stays_in_bounds() {
        let mut random = TpccRandom::seeded(11);
        for _ in 0..1_000 {
            let n = random.nu_rand(1023, 1, 3_000);
            assert!((1..=3_000).contains(&n));
            let n = random.nu_rand(8191, 1, 100_000);
            assert!((1..=100_000).contains(&n));
        }
    }

    #[test]
    fn test_last_name_formula() {
        assert_eq!(TpccRandom::last_name(0), "BARBARBAR");
        assert_eq!(TpccRandom::last_name(371), "PRICALLYOUGHT");
        assert_eq!(TpccRandom::last_name(999), "EINGEINGEING");
    }

    #[test]
    fn test_last_name_fits_field_capacity() {
        for n in 0..=999 {
            assert!(TpccRandom::last_name(n).len() <= tpcc_core::scale::MAX_LAST_LEN);
        }
    }

    #[test]
    fn test_run_constants_respect_c_last_delta() {
        let mut random = TpccRandom::seeded(3);
        let load = random.c();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let run = NuRandC::for_run(&mut rng, &load);
            let delta = (load.c_last - run.c_last).abs();
            assert!((65..=119).contains(&delta));
            assert_ne!(delta, 96);
            assert_ne!(delta, 112);
        }
    }

    #[test]
    fn test_astring_length_and_charset() {
        let mut random = TpccRandom::seeded(5);
        for _ in 0..100 {
            let s = random.astring(26, 50);
            assert!((26..=50).contains(&s.len()));
            assert!(s.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_permutation_is_a_bijection() {
        let mut random = TpccRandom::seeded(13);
        let mut p = random.permutation(1, 3_000);
        p.sort_unstable();
        assert_eq!(p, (1..=3_000).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let mut a = TpccRandom::seeded(42);
        let mut b = TpccRandom::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.number(1, 1_000_000), b.number(1, 1_000_000));
        }
        assert_eq!(a.c(), b.c());
    }
}
