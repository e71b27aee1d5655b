//! Fourier transforms of real data.
//!
//! A real sequence of even length nr is transformed by packing it into nr/2
//! complex values, performing a complex transform of half length, and then
//! separating the spectra of the even and odd samples using conjugate symmetry.
//! Only the nr/2 + 1 non-redundant bins are stored: bin 0 (DC) and bin nr/2
//! (Nyquist) have zero imaginary part.
//!
//! The forward transform is unnormalised, the inverse transform divides by nr
//! so that `inverse(forward(x)) == x`.

use {
    crate::{
        error::{try_vec, FftError},
        fft::{ComplexConfig, Direction},
    },
    core::f64::consts::PI,
    log::error,
    num_complex::Complex32,
};

/// Configuration for real transforms of one even length and direction.
#[derive(Debug, PartialEq, Clone)]
pub struct RealConfig {
    /// Complex transform of half the real length
    half: ComplexConfig,
    /// Rotations exp(+-i pi ((k + 1) / (nr / 2) + 1/2)) used to unpack the half length spectrum
    twiddles: Vec<Complex32>,
}

impl RealConfig {
    pub fn new(nr: usize, direction: Direction) -> Result<Self, FftError> {
        if nr % 2 != 0 {
            error!("Real ffts are implemented for even sized arrays only (n = {})", nr);
            return Err(FftError::OddLengthNotSupported(nr));
        }

        let n = nr / 2;
        let half = ComplexConfig::new(n, direction)?;

        let mut twiddles = try_vec![Complex32::new(0.0, 0.0); n / 2];
        let p = direction.sign() * PI;
        for (i, t) in twiddles.iter_mut().enumerate() {
            let phase = p * ((i + 1) as f64 / n as f64 + 0.5);
            *t = Complex32::new(phase.cos() as f32, phase.sin() as f32);
        }

        Ok(Self { half, twiddles })
    }

    /// Length of the real sequence.
    pub fn len(&self) -> usize {
        2 * self.half.len()
    }

    pub fn is_empty(&self) -> bool {
        self.half.is_empty()
    }

    /// Number of complex values in the half spectrum, nr/2 + 1.
    pub fn spectrum_len(&self) -> usize {
        self.half.len() + 1
    }

    pub fn direction(&self) -> Direction {
        self.half.direction()
    }

    /// Scratch needed by the `_with_scratch` transforms.
    pub fn scratch_len(&self) -> usize {
        2 * self.half.len() + self.half.scratch_len()
    }

    /// Real to complex transform of `input` (nr values) into `output` (nr/2 + 1 values).
    /// On a direction mismatch `output` is left untouched.
    pub fn forward(&self, input: &[f32], output: &mut [Complex32]) -> Result<(), FftError> {
        self.direction().expect(Direction::Forward, "forward real fft")?;

        let mut scratch = try_vec![Complex32::new(0.0, 0.0); self.scratch_len()];
        self.forward_with_scratch(input, output, &mut scratch)
    }

    /// As `forward`, with caller supplied scratch of at least `scratch_len()` values.
    pub fn forward_with_scratch(
        &self,
        input: &[f32],
        output: &mut [Complex32],
        scratch: &mut [Complex32],
    ) -> Result<(), FftError> {
        self.direction().expect(Direction::Forward, "forward real fft")?;

        let n = self.half.len();
        assert_eq!(2 * n, input.len());
        assert_eq!(n + 1, output.len());

        let (packed, rest) = scratch.split_at_mut(n);
        let (buffer, rest) = rest.split_at_mut(n);

        for (z, pair) in packed.iter_mut().zip(input.chunks_exact(2)) {
            *z = Complex32::new(pair[0], pair[1]);
        }

        self.half.process_with_scratch(packed, buffer, rest);

        // The DC and Nyquist bins are purely real and both come from bin 0 of the
        // complex transform
        output[0] = Complex32::new(buffer[0].re + buffer[0].im, 0.0);
        output[n] = Complex32::new(buffer[0].re - buffer[0].im, 0.0);

        for i in 1..=n / 2 {
            let z0 = buffer[i];
            let z1 = buffer[n - i].conj();

            let s0 = z0 + z1;
            let s1 = (z0 - z1) * self.twiddles[i - 1];

            output[i] = (s0 + s1) * 0.5;
            output[n - i] = (s0 - s1).conj() * 0.5;
        }

        Ok(())
    }

    /// Complex to real transform of `input` (nr/2 + 1 values) into `output` (nr values).
    /// On a direction mismatch `output` is left untouched.
    pub fn inverse(&self, input: &[Complex32], output: &mut [f32]) -> Result<(), FftError> {
        self.direction().expect(Direction::Backward, "inverse real fft")?;

        let mut scratch = try_vec![Complex32::new(0.0, 0.0); self.scratch_len()];
        self.inverse_with_scratch(input, output, &mut scratch)
    }

    /// As `inverse`, with caller supplied scratch of at least `scratch_len()` values.
    pub fn inverse_with_scratch(
        &self,
        input: &[Complex32],
        output: &mut [f32],
        scratch: &mut [Complex32],
    ) -> Result<(), FftError> {
        self.direction().expect(Direction::Backward, "inverse real fft")?;

        let n = self.half.len();
        assert_eq!(n + 1, input.len());
        assert_eq!(2 * n, output.len());

        let (buffer, rest) = scratch.split_at_mut(n);
        let (unpacked, rest) = rest.split_at_mut(n);

        buffer[0] = Complex32::new(input[0].re + input[n].re, input[0].re - input[n].re);

        for i in 1..=n / 2 {
            let z0 = input[i];
            let z1 = input[n - i].conj();

            let s0 = z0 + z1;
            let s1 = (z0 - z1) * self.twiddles[i - 1];

            buffer[i] = s0 + s1;
            buffer[n - i] = (s0 - s1).conj();
        }

        let norm = 1.0 / (2 * n) as f32;
        for z in buffer.iter_mut() {
            *z *= norm;
        }

        self.half.process_with_scratch(buffer, unpacked, rest);

        for (pair, z) in output.chunks_exact_mut(2).zip(unpacked.iter()) {
            pair[0] = z.re;
            pair[1] = z.im;
        }

        Ok(())
    }
}
