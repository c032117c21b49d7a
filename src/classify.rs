// src/classify.rs

//! Number-theoretic classification of primes into independent tags.
//!
//! Each prime carries a *set* of tags rather than a single label: the
//! predicates below are evaluated independently and a prime may satisfy
//! several at once (5 is twin, safe, sexy, Fibonacci, ...). Picking the one
//! visible color per cell is the renderer's job, via the fixed
//! [`Tag::PRIORITY`] order; classification itself never tie-breaks.
//!
//! Every prime additionally carries the baseline [`TagSet::REGULAR`] tag, so
//! a prime with no special property still has a color and a statistics
//! bucket.

use crate::primes::PrimalityTester;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// The set of prime-type tags carried by one number.
    ///
    /// Empty for composites. Tags are independent predicates, not mutually
    /// exclusive states.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TagSet: u16 {
        const REGULAR        = 1 << 0;
        const TWIN           = 1 << 1;
        const MERSENNE       = 1 << 2;
        const SAFE           = 1 << 3;
        const PALINDROMIC    = 1 << 4;
        const CIRCULAR       = 1 << 5;
        const SOPHIE_GERMAIN = 1 << 6;
        const FACTORIAL      = 1 << 7;
        const FIBONACCI      = 1 << 8;
        const SEXY           = 1 << 9;
        const CUBAN          = 1 << 10;
        const HAPPY          = 1 << 11;
        const CHEN           = 1 << 12;
        const WIEFERICH      = 1 << 13;
        const ISOLATED       = 1 << 14;
    }
}

/// A single prime-type tag, used wherever one tag must be named on its own:
/// palette lookup, statistics buckets, priority ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Regular,
    Twin,
    Mersenne,
    Safe,
    Palindromic,
    Circular,
    SophieGermain,
    Factorial,
    Fibonacci,
    Sexy,
    Cuban,
    Happy,
    Chen,
    Wieferich,
    Isolated,
}

impl Tag {
    /// All tags, in declaration order.
    pub const ALL: [Tag; 15] = [
        Tag::Regular,
        Tag::Twin,
        Tag::Mersenne,
        Tag::Safe,
        Tag::Palindromic,
        Tag::Circular,
        Tag::SophieGermain,
        Tag::Factorial,
        Tag::Fibonacci,
        Tag::Sexy,
        Tag::Cuban,
        Tag::Happy,
        Tag::Chen,
        Tag::Wieferich,
        Tag::Isolated,
    ];

    /// Fixed tie-break order for rendering and statistics, rarest tag first.
    ///
    /// A cell shows exactly one color, so when a prime carries several tags
    /// the first match in this list wins. `Regular` is last: as the baseline
    /// tag it only shows when nothing else applies.
    pub const PRIORITY: [Tag; 15] = [
        Tag::Mersenne,
        Tag::Factorial,
        Tag::Wieferich,
        Tag::Fibonacci,
        Tag::Twin,
        Tag::Sexy,
        Tag::Isolated,
        Tag::Safe,
        Tag::SophieGermain,
        Tag::Chen,
        Tag::Palindromic,
        Tag::Circular,
        Tag::Cuban,
        Tag::Happy,
        Tag::Regular,
    ];

    /// The `TagSet` bit for this tag.
    pub const fn bit(self) -> TagSet {
        match self {
            Tag::Regular => TagSet::REGULAR,
            Tag::Twin => TagSet::TWIN,
            Tag::Mersenne => TagSet::MERSENNE,
            Tag::Safe => TagSet::SAFE,
            Tag::Palindromic => TagSet::PALINDROMIC,
            Tag::Circular => TagSet::CIRCULAR,
            Tag::SophieGermain => TagSet::SOPHIE_GERMAIN,
            Tag::Factorial => TagSet::FACTORIAL,
            Tag::Fibonacci => TagSet::FIBONACCI,
            Tag::Sexy => TagSet::SEXY,
            Tag::Cuban => TagSet::CUBAN,
            Tag::Happy => TagSet::HAPPY,
            Tag::Chen => TagSet::CHEN,
            Tag::Wieferich => TagSet::WIEFERICH,
            Tag::Isolated => TagSet::ISOLATED,
        }
    }

    /// The snake_case name used in config files and statistics output.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Regular => "regular",
            Tag::Twin => "twin",
            Tag::Mersenne => "mersenne",
            Tag::Safe => "safe",
            Tag::Palindromic => "palindromic",
            Tag::Circular => "circular",
            Tag::SophieGermain => "sophie_germain",
            Tag::Factorial => "factorial",
            Tag::Fibonacci => "fibonacci",
            Tag::Sexy => "sexy",
            Tag::Cuban => "cuban",
            Tag::Happy => "happy",
            Tag::Chen => "chen",
            Tag::Wieferich => "wieferich",
            Tag::Isolated => "isolated",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TagSet {
    /// Resolves this set to its single display tag by [`Tag::PRIORITY`].
    ///
    /// Returns `None` for the empty set (composite cells).
    pub fn dominant(self) -> Option<Tag> {
        Tag::PRIORITY
            .iter()
            .copied()
            .find(|tag| self.contains(tag.bit()))
    }
}

/// Wieferich primes above this bound are resolved by lookup instead of
/// modular exponentiation.
const WIEFERICH_DIRECT_LIMIT: u64 = 1 << 20;

/// The only Wieferich primes known; the next one, if any, exceeds 2^64.
const KNOWN_WIEFERICH: [u64; 2] = [1093, 3511];

/// The cycle every unhappy trajectory falls into.
const HAPPY_CYCLE: [u64; 8] = [4, 16, 37, 58, 89, 145, 42, 20];

/// Computes the tag set of a prime, delegating primality probes to a shared
/// [`PrimalityTester`].
#[derive(Debug, Default)]
pub struct PrimeClassifier {
    tester: PrimalityTester,
}

impl PrimeClassifier {
    /// Creates a classifier with a fresh primality cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `n` is prime. Exposed so callers share the memoized
    /// tester instead of running their own.
    pub fn is_prime(&self, n: u64) -> bool {
        self.tester.is_prime(n)
    }

    /// Returns the set of tags `n` belongs to.
    ///
    /// Empty for composites ("not applicable", never an error). For primes
    /// the set always contains at least `REGULAR`.
    pub fn classify(&self, n: u64) -> TagSet {
        if !self.is_prime(n) {
            return TagSet::empty();
        }

        let mut tags = TagSet::REGULAR;
        let prev_twin = self.is_prime(n - 2);
        let next_twin = self.is_prime(n + 2);
        if prev_twin || next_twin {
            tags |= TagSet::TWIN;
        }
        if !prev_twin && !next_twin {
            tags |= TagSet::ISOLATED;
        }
        if n.checked_sub(6).is_some_and(|m| self.is_prime(m)) || self.is_prime(n + 6) {
            tags |= TagSet::SEXY;
        }
        if is_mersenne(n) {
            tags |= TagSet::MERSENNE;
        }
        if (n - 1) % 2 == 0 && self.is_prime((n - 1) / 2) {
            tags |= TagSet::SAFE;
        }
        if n
            .checked_mul(2)
            .and_then(|m| m.checked_add(1))
            .is_some_and(|m| self.is_prime(m))
        {
            tags |= TagSet::SOPHIE_GERMAIN;
        }
        if is_factorial_neighbor(n) {
            tags |= TagSet::FACTORIAL;
        }
        if is_fibonacci(n) {
            tags |= TagSet::FIBONACCI;
        }
        if is_palindromic(n) {
            tags |= TagSet::PALINDROMIC;
        }
        if self.is_circular(n) {
            tags |= TagSet::CIRCULAR;
        }
        if is_cuban(n) {
            tags |= TagSet::CUBAN;
        }
        if is_happy(n) {
            tags |= TagSet::HAPPY;
        }
        if self.is_chen(n) {
            tags |= TagSet::CHEN;
        }
        if is_wieferich(n) {
            tags |= TagSet::WIEFERICH;
        }
        tags
    }

    /// Every cyclic rotation of n's decimal digits is itself prime.
    fn is_circular(&self, n: u64) -> bool {
        let digits = decimal_digit_count(n);
        if digits == 1 {
            return true;
        }
        let high = 10u128.pow(digits - 1);
        let mut rotated = n as u128;
        for _ in 1..digits {
            rotated = (rotated % 10) * high + rotated / 10;
            // A rotation outside u64 cannot be verified prime in-domain.
            let Ok(value) = u64::try_from(rotated) else {
                return false;
            };
            if !self.is_prime(value) {
                return false;
            }
        }
        true
    }

    /// n+2 is prime or a semiprime.
    fn is_chen(&self, n: u64) -> bool {
        let Some(m) = n.checked_add(2) else {
            return false;
        };
        self.is_prime(m) || self.is_semiprime(m)
    }

    /// m is the product of exactly two primes, counted with multiplicity.
    ///
    /// The smallest divisor found by trial division is necessarily prime, so
    /// m is semiprime iff the cofactor is also prime.
    fn is_semiprime(&self, m: u64) -> bool {
        if m < 4 {
            return false;
        }
        let mut d: u64 = 2;
        while d <= m / d {
            if m % d == 0 {
                return self.is_prime(m / d);
            }
            d += 1;
        }
        false
    }
}

/// n = 2^k - 1 for some k >= 2, i.e. n+1 is a power of two and at least 4.
fn is_mersenne(n: u64) -> bool {
    match n.checked_add(1) {
        Some(m) => m >= 4 && m.is_power_of_two(),
        None => false,
    }
}

/// n = k! - 1 or n = k! + 1 for some k >= 1.
///
/// Searches k upward; the factorial overflowing u64 bounds the search, since
/// any larger factorial's neighbors exceed the domain.
fn is_factorial_neighbor(n: u64) -> bool {
    let mut factorial: u64 = 1;
    let mut k: u64 = 1;
    loop {
        factorial = match factorial.checked_mul(k) {
            Some(f) => f,
            None => return false,
        };
        if factorial - 1 == n || factorial.checked_add(1) == Some(n) {
            return true;
        }
        if factorial - 1 > n {
            return false;
        }
        k += 1;
    }
}

/// n is a Fibonacci number iff 5n²+4 or 5n²-4 is a perfect square.
///
/// Widened to u128; every Fibonacci prime representable in u64 stays in
/// range, so a checked-arithmetic miss can only reject non-Fibonacci values.
fn is_fibonacci(n: u64) -> bool {
    let squared = (n as u128) * (n as u128);
    let Some(scaled) = squared.checked_mul(5) else {
        return false;
    };
    match scaled.checked_add(4) {
        Some(upper) if is_perfect_square(upper) => return true,
        _ => {}
    }
    scaled >= 4 && is_perfect_square(scaled - 4)
}

/// The decimal digit sequence of n reads the same in both directions.
fn is_palindromic(n: u64) -> bool {
    let mut remaining = n;
    let mut reversed: u128 = 0;
    while remaining > 0 {
        reversed = reversed * 10 + (remaining % 10) as u128;
        remaining /= 10;
    }
    reversed == n as u128
}

/// n = 3k² + 3k + 1 for some k >= 1 (difference of consecutive cubes).
fn is_cuban(n: u64) -> bool {
    let mut k: u64 = 1;
    loop {
        let value = match k
            .checked_mul(k + 1)
            .and_then(|m| m.checked_mul(3))
            .and_then(|m| m.checked_add(1))
        {
            Some(v) => v,
            None => return false,
        };
        if value == n {
            return true;
        }
        if value > n {
            return false;
        }
        k += 1;
    }
}

/// Iterating the digit-square-sum map from n reaches 1 rather than the
/// fixed cycle.
fn is_happy(mut n: u64) -> bool {
    while n != 1 {
        if HAPPY_CYCLE.contains(&n) {
            return false;
        }
        n = digit_square_sum(n);
    }
    true
}

/// 2^(n-1) ≡ 1 (mod n²), checked directly for small n and by lookup above
/// the bound.
fn is_wieferich(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n > WIEFERICH_DIRECT_LIMIT {
        return KNOWN_WIEFERICH.contains(&n);
    }
    let modulus = (n as u128) * (n as u128);
    mod_pow(2, n - 1, modulus) == 1
}

fn digit_square_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        let d = n % 10;
        sum += d * d;
        n /= 10;
    }
    sum
}

fn decimal_digit_count(mut n: u64) -> u32 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

fn is_perfect_square(x: u128) -> bool {
    let mut root = (x as f64).sqrt() as u128;
    // Settle the float approximation onto the exact integer square root.
    // Checked multiplication guards the top of the u128 range, where the
    // approximation may overshoot far enough for root² to overflow.
    while root.checked_mul(root).map_or(true, |s| s > x) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |s| s <= x) {
        root += 1;
    }
    root * root == x
}

/// Square-and-multiply modular exponentiation. The modulus fits well inside
/// u128 (n² for n up to 2^20), so intermediate products cannot overflow.
fn mod_pow(mut base: u128, mut exponent: u64, modulus: u128) -> u128 {
    let mut acc: u128 = 1;
    base %= modulus;
    while exponent > 0 {
        if exponent & 1 == 1 {
            acc = acc * base % modulus;
        }
        base = base * base % modulus;
        exponent >>= 1;
    }
    acc
}
