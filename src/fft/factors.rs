//! Factorisation of a transform length into butterfly radices.

use {
    crate::{
        constants::{FIRST_RADIX, MAX_FACTORS},
        error::FftError,
    },
    log::error,
    serde::{Deserialize, Serialize},
};

/// One stage of the recursive transform: combine `radix` sub-transforms,
/// each of length `remaining`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Factor {
    pub radix: usize,
    pub remaining: usize,
}

/// Factorises `n` outermost stage first, preferring radix 4, then 2, then 3,
/// then odd trial radices. Once the trial radix passes the square root of what
/// is left, the remainder is prime and becomes the final radix.
pub fn factorise(n: usize) -> Result<Vec<Factor>, FftError> {
    factorise_bounded(n, MAX_FACTORS)
}

pub(crate) fn factorise_bounded(n: usize, capacity: usize) -> Result<Vec<Factor>, FftError> {
    if n == 0 {
        error!("Cannot factorize an fft of length zero");
        return Err(FftError::ZeroLength);
    }

    // A single sample is copied by the base case and passed through a radix 1 butterfly
    if n == 1 {
        return Ok(vec![Factor {
            radix: 1,
            remaining: 1,
        }]);
    }

    let mut factors = Vec::with_capacity(capacity.min(MAX_FACTORS));
    let mut rem = n;
    let mut p = FIRST_RADIX;

    while rem > 1 {
        if factors.len() >= capacity {
            error!("Unable to factorize fft size {}", n);
            return Err(FftError::FactorizationOverflow(n));
        }

        while rem % p != 0 {
            p = match p {
                4 => 2,
                2 => 3,
                _ => p + 2,
            };
            if p * p > rem {
                p = rem;
            }
        }

        rem /= p;
        factors.push(Factor {
            radix: p,
            remaining: rem,
        });
    }

    Ok(factors)
}
