use {
    crate::fft::Direction,
    std::{error::Error, fmt},
};

/// Failures reported while building a configuration or running a real transform.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FftError {
    /// A table or scratch buffer of the given number of elements could not be allocated
    AllocationFailure(usize),
    /// The length needs more butterfly stages than `MAX_FACTORS`
    FactorizationOverflow(usize),
    /// Real transforms only support even lengths
    OddLengthNotSupported(usize),
    /// The configuration was built for the other direction
    DirectionMismatch { expected: Direction, found: Direction },
    /// Transforms of length zero are meaningless
    ZeroLength,
    /// The row stride of a 2D grid is shorter than a row
    InvalidRowStride { nx: usize, stride: usize },
}

impl Error for FftError {}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::AllocationFailure(len) => {
                write!(f, "Unable to allocate {} elements of temporary memory for fft", len)
            }
            FftError::FactorizationOverflow(n) => write!(f, "Unable to factorize fft size {}", n),
            FftError::OddLengthNotSupported(n) => write!(
                f,
                "Real ffts are implemented for even sized arrays only, got {}",
                n
            ),
            FftError::DirectionMismatch { expected, found } => write!(
                f,
                "Configuration must have direction {:?}, but it has {:?}",
                expected, found
            ),
            FftError::ZeroLength => f.write_str("Cannot create an fft of length zero"),
            FftError::InvalidRowStride { nx, stride } => write!(
                f,
                "Row stride {} is smaller than the row length {}",
                stride, nx
            ),
        }
    }
}

/// `vec![elem; n]` that reports allocation failure as `FftError::AllocationFailure`
/// instead of aborting. Must be used inside a function returning `Result<_, FftError>`.
macro_rules! try_vec {
    ($elem:expr; $n:expr) => {{
        let n = $n;
        let mut v = Vec::new();
        if v.try_reserve_exact(n).is_err() {
            log::error!("Unable to allocate temporary memory for fft ({} elements)", n);
            return Err($crate::error::FftError::AllocationFailure(n));
        }
        v.resize(n, $elem);
        v
    }};
}

pub(crate) use try_vec;
