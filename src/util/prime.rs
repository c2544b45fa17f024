//! Primality helpers for sizing hash tables.
//!
//! Double hashing only visits every slot when the table capacity is prime, so
//! requested sizes are rounded up with [`next_prime`].

/// Check whether `n` is prime by trial division.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }

    let mut i = 2usize;
    while i.saturating_mul(i) <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }

    true
}

/// Return the smallest prime greater than or equal to `n`.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}
