//! Complex to complex Fourier transform module.
//!
//! Transforms of any length n >= 1 are supported. The length is factorised
//! into radices 4, 2, 3 and 5 wherever possible, anything left over is handled
//! by a direct DFT butterfly, which is slow for large prime factors.
//!
//! A `ComplexConfig` is built once per length and direction. It holds the
//! factorisation and a table of n roots of unity and is read-only afterwards,
//! so a single configuration can be shared between threads transforming
//! different buffers.
//!
//! The transforms are unnormalised: a forward transform followed by a backward
//! transform multiplies the data by n.

use {
    crate::error::{try_vec, FftError},
    core::f64::consts::PI,
    log::{debug, error},
    num_complex::Complex32,
    serde::{Deserialize, Serialize},
};

mod butterflies;
mod factors;

pub use butterflies::*;
pub use factors::*;

/// Sign of the exponent of the transform: `Forward` uses exp(-2 pi i jk/n).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Sign of the twiddle angle for this direction.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Backward => 1.0,
        }
    }

    /// Fails with `DirectionMismatch` unless `self` is the direction `routine` requires.
    pub(crate) fn expect(self, expected: Direction, routine: &str) -> Result<(), FftError> {
        if self != expected {
            error!(
                "Configuration for {} must have direction = {:?}",
                routine, expected
            );
            return Err(FftError::DirectionMismatch {
                expected,
                found: self,
            });
        }
        Ok(())
    }
}

/// Table of `n` roots of unity, `table[k] = exp(i k theta)` with
/// `theta = 2 pi / n` for backward and `-2 pi / n` for forward transforms.
pub fn twiddles(n: usize, direction: Direction) -> Result<Vec<Complex32>, FftError> {
    let mut table = try_vec![Complex32::new(0.0, 0.0); n];
    let phase_mult = direction.sign() * 2.0 * PI / (n as f64);

    for (k, t) in table.iter_mut().enumerate() {
        let (sin, cos) = (k as f64 * phase_mult).sin_cos();
        *t = Complex32::new(cos as f32, sin as f32);
    }

    Ok(table)
}

/// Angular wavenumber step `2 pi / (n dx)` of a periodic grid of `n` cells of size `dx`.
pub fn angular_step(n: usize, dx: f32) -> f32 {
    (2.0 * core::f32::consts::PI) / (n as f32 * dx)
}

/// Factorisation and twiddle table for complex transforms of one length and direction.
#[derive(Debug, PartialEq, Clone)]
pub struct ComplexConfig {
    n: usize,
    direction: Direction,
    twiddles: Vec<Complex32>,
    factors: Vec<Factor>,
}

impl ComplexConfig {
    pub fn new(n: usize, direction: Direction) -> Result<Self, FftError> {
        let factors = factorise(n)?;
        let twiddles = twiddles(n, direction)?;

        debug!(
            "Initialised {:?} fft of length {} with radices {:?}",
            direction,
            n,
            factors.iter().map(|f| f.radix).collect::<Vec<_>>()
        );

        Ok(Self {
            n,
            direction,
            twiddles,
            factors,
        })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn twiddles(&self) -> &[Complex32] {
        &self.twiddles
    }

    /// Number of scratch values needed by `process_with_scratch`: the largest radix
    /// without a specialised butterfly, which is n itself when n is prime.
    pub fn scratch_len(&self) -> usize {
        self.factors
            .iter()
            .map(|f| f.radix)
            .filter(|p| !(2..=5).contains(p))
            .max()
            .unwrap_or(0)
    }

    /// Transforms `input` into the disjoint buffer `output`, both of length n.
    /// Fails with `AllocationFailure` if the generic butterfly scratch cannot be allocated.
    pub fn process(
        &self,
        input: &[Complex32],
        output: &mut [Complex32],
    ) -> Result<(), FftError> {
        let mut scratch = try_vec![Complex32::new(0.0, 0.0); self.scratch_len()];
        self.process_with_scratch(input, output, &mut scratch);

        Ok(())
    }

    /// As `process`, with caller supplied scratch of at least `scratch_len()` values.
    pub fn process_with_scratch(
        &self,
        input: &[Complex32],
        output: &mut [Complex32],
        scratch: &mut [Complex32],
    ) {
        assert_eq!(self.n, input.len());
        self.process_strided(input, 1, output, scratch);
    }

    /// Transforms the n values `input[0], input[in_stride], input[2 in_stride], ...`
    /// into `output`, e.g. a column of a row-major grid.
    pub fn process_strided(
        &self,
        input: &[Complex32],
        in_stride: usize,
        output: &mut [Complex32],
        scratch: &mut [Complex32],
    ) {
        assert!(in_stride >= 1);
        assert!(input.len() > (self.n - 1) * in_stride);
        assert_eq!(self.n, output.len());
        assert!(scratch.len() >= self.scratch_len());

        self.transform(input, in_stride, output, 1, &self.factors, scratch);
    }

    /// Transforms `buffer` in place, copying the input aside first.
    pub fn process_inplace(&self, buffer: &mut [Complex32]) -> Result<(), FftError> {
        assert_eq!(self.n, buffer.len());

        let mut scratch = try_vec![Complex32::new(0.0, 0.0); self.n + self.scratch_len()];
        let (input, scratch) = scratch.split_at_mut(self.n);
        input.copy_from_slice(buffer);
        self.transform(input, 1, buffer, 1, &self.factors, scratch);

        Ok(())
    }

    /// Recursive mixed-radix decimation in time over the remaining `factors`.
    /// All sub-transforms are completed before their butterfly is applied, as the
    /// twiddle `stride` compounds with the recursion depth.
    fn transform(
        &self,
        input: &[Complex32],
        in_stride: usize,
        output: &mut [Complex32],
        stride: usize,
        factors: &[Factor],
        scratch: &mut [Complex32],
    ) {
        let Factor {
            radix: p,
            remaining: m,
        } = factors[0];
        let step = in_stride * stride;

        if m == 1 {
            for (i, out) in output[..p].iter_mut().enumerate() {
                *out = input[i * step];
            }
        } else {
            for (i, sub) in output[..p * m].chunks_exact_mut(m).enumerate() {
                self.transform(
                    &input[i * step..],
                    in_stride,
                    sub,
                    stride * p,
                    &factors[1..],
                    scratch,
                );
            }
        }

        match p {
            2 => butterfly2(output, stride, &self.twiddles, m),
            3 => butterfly3(output, stride, &self.twiddles, m),
            4 => butterfly4(output, stride, &self.twiddles, m, self.direction),
            5 => butterfly5(output, stride, &self.twiddles, m),
            _ => butterfly_generic(output, stride, &self.twiddles, m, p, scratch),
        }
    }
}

#[cfg(test)]
mod test {
    use {
        super::*,
        crate::utils::{
            assert_approx_eq_complex_slice, complex_signal, init_test_logger, reference_dft,
        },
        approx::assert_abs_diff_eq,
        lazy_static::lazy_static,
    };

    lazy_static! {
        static ref FORWARD_360: ComplexConfig = ComplexConfig::new(360, Direction::Forward).unwrap();
        static ref BACKWARD_360: ComplexConfig =
            ComplexConfig::new(360, Direction::Backward).unwrap();
    }

    fn zeros(n: usize) -> Vec<Complex32> {
        vec![Complex32::new(0.0, 0.0); n]
    }

    #[test]
    fn twiddles_4() {
        let forward = twiddles(4, Direction::Forward).unwrap();
        let backward = twiddles(4, Direction::Backward).unwrap();

        let expected = [(1.0, 0.0), (0.0, -1.0), (-1.0, 0.0), (0.0, 1.0)];
        for (k, (re, im)) in expected.iter().enumerate() {
            assert_abs_diff_eq!(*re, forward[k].re, epsilon = 1.0E-7);
            assert_abs_diff_eq!(*im, forward[k].im, epsilon = 1.0E-7);
            assert_abs_diff_eq!(*re, backward[k].re, epsilon = 1.0E-7);
            assert_abs_diff_eq!(-*im, backward[k].im, epsilon = 1.0E-7);
        }
    }

    #[test]
    fn twiddles_unit_magnitude() {
        for t in twiddles(97, Direction::Backward).unwrap() {
            assert_abs_diff_eq!(1.0, t.norm(), epsilon = 1.0E-6);
        }
    }

    #[test]
    fn angular_step_8() {
        assert_abs_diff_eq!(
            core::f32::consts::PI / 2.0,
            angular_step(8, 0.5),
            epsilon = 1.0E-7
        );
    }

    #[test]
    fn impulse() {
        let config = ComplexConfig::new(4, Direction::Forward).unwrap();
        let input = [
            Complex32::new(1.0, 0.0),
            Complex32::new(0.0, 0.0),
            Complex32::new(0.0, 0.0),
            Complex32::new(0.0, 0.0),
        ];
        let mut output = zeros(4);

        config.process(&input, &mut output).unwrap();

        assert_approx_eq_complex_slice(&[Complex32::new(1.0, 0.0); 4], &output, 1.0E-7);
    }

    #[test]
    fn matches_reference_dft() {
        init_test_logger();

        for &n in &[
            1, 2, 3, 4, 5, 6, 7, 8, 9, 12, 15, 16, 25, 30, 32, 49, 60, 64, 77, 91, 100, 128, 143,
        ] {
            for &direction in &[Direction::Forward, Direction::Backward] {
                let config = ComplexConfig::new(n, direction).unwrap();
                let input = complex_signal(n, n);
                let mut output = zeros(n);

                config.process(&input, &mut output).unwrap();

                let expected = reference_dft(&input, direction.sign());
                assert_approx_eq_complex_slice(&expected, &output, 2.0E-5 * n as f32);
            }
        }
    }

    #[test]
    fn large_prime() {
        let n = 101;
        let config = ComplexConfig::new(n, Direction::Forward).unwrap();
        assert_eq!(n, config.scratch_len());

        let input = complex_signal(n, 7);
        let mut output = zeros(n);
        config.process(&input, &mut output).unwrap();

        assert_approx_eq_complex_slice(
            &reference_dft(&input, -1.0),
            &output,
            2.0E-5 * n as f32,
        );
    }

    #[test]
    fn round_trip_360() {
        let input = complex_signal(360, 1);
        let mut spectrum = zeros(360);
        let mut output = zeros(360);

        FORWARD_360.process(&input, &mut spectrum).unwrap();
        BACKWARD_360.process(&spectrum, &mut output).unwrap();

        let scaled = output.iter().map(|c| *c / 360.0).collect::<Vec<_>>();
        assert_approx_eq_complex_slice(&input, &scaled, 1.0E-5);
    }

    #[test]
    fn round_trip_many_lengths() {
        for n in 1..=64 {
            let forward = ComplexConfig::new(n, Direction::Forward).unwrap();
            let backward = ComplexConfig::new(n, Direction::Backward).unwrap();
            let input = complex_signal(n, 2);
            let mut buffer = input.clone();

            forward.process_inplace(&mut buffer).unwrap();
            backward.process_inplace(&mut buffer).unwrap();

            let scaled = buffer.iter().map(|c| *c / n as f32).collect::<Vec<_>>();
            assert_approx_eq_complex_slice(&input, &scaled, 1.0E-5);
        }
    }

    #[test]
    fn inplace_matches_out_of_place() {
        let input = complex_signal(360, 5);
        let mut output = zeros(360);
        let mut buffer = input.clone();

        FORWARD_360.process(&input, &mut output).unwrap();
        FORWARD_360.process_inplace(&mut buffer).unwrap();

        assert_eq!(output, buffer);
    }

    #[test]
    fn strided_column() {
        // 4 columns of 12 rows, row-major, transform column 1
        let grid = complex_signal(48, 9);
        let column = grid.iter().skip(1).step_by(4).copied().collect::<Vec<_>>();
        let config = ComplexConfig::new(12, Direction::Forward).unwrap();
        let mut expected = zeros(12);
        let mut output = zeros(12);

        config.process(&column, &mut expected).unwrap();
        config.process_strided(&grid[1..], 4, &mut output, &mut []);

        assert_eq!(expected, output);
    }

    #[test]
    fn shared_between_threads() {
        let handles = (0..4)
            .map(|seed| {
                std::thread::spawn(move || {
                    let input = complex_signal(360, seed);
                    let mut output = zeros(360);
                    FORWARD_360.process(&input, &mut output).unwrap();
                    (input, output)
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            let (input, output) = handle.join().unwrap();
            assert_approx_eq_complex_slice(&reference_dft(&input, -1.0), &output, 1.0E-2);
        }
    }

    #[test]
    fn zero_length() {
        assert_eq!(
            Err(FftError::ZeroLength),
            ComplexConfig::new(0, Direction::Forward)
        );
    }

    #[test]
    fn direction_expect() {
        init_test_logger();

        assert_eq!(Ok(()), Direction::Forward.expect(Direction::Forward, "fft"));
        assert_eq!(
            Err(FftError::DirectionMismatch {
                expected: Direction::Backward,
                found: Direction::Forward
            }),
            Direction::Forward.expect(Direction::Backward, "inverse fft")
        );
    }

    #[test]
    fn process_prime_allocates_scratch() {
        let config = ComplexConfig::new(13, Direction::Forward).unwrap();
        assert_eq!(13, config.scratch_len());

        let input = complex_signal(13, 2);
        let mut output = zeros(13);
        assert_eq!(Ok(()), config.process(&input, &mut output));
        assert_approx_eq_complex_slice(&reference_dft(&input, -1.0), &output, 1.0E-4);
    }
}
