/// Maximum number of butterfly stages a transform length may factorize into.
pub const MAX_FACTORS: usize = 32;

/// First trial radix of the factorizer; radix 4 has the cheapest butterfly per sample.
pub const FIRST_RADIX: usize = 4;
