//! This module performs FFTs in two directions on two dimensional real arrays
//! using the real transform of the fftr module along x and the complex
//! transform of the fft module along y.
//!
//! The input grid holds ny rows of nx values, one row every `stride` values, so
//! grids with guard cells along x can be transformed without copying them out.
//! The spectrum of an {nx, ny} grid is stored transposed, as nx/2 + 1 columns
//! of ny complex values: mode (kx, ky) lives at `spectrum[ky + kx * ny]`.

use {
    crate::{
        error::{try_vec, FftError},
        fft::{ComplexConfig, Direction},
        fftr::RealConfig,
        utils::viewmut2d,
    },
    log::error,
    num_complex::Complex32,
};

#[derive(Debug, PartialEq, Clone)]
pub struct Real2DConfig {
    nx: usize,
    ny: usize,
    /// Distance between the starts of consecutive rows
    stride: usize,
    /// Real transform along x
    cfgx: RealConfig,
    /// Complex transform along y
    cfgy: ComplexConfig,
}

impl Real2DConfig {
    /// Initialises the transforms in both directions. A `stride` of `None` or zero
    /// means rows are packed without guard cells, i.e. a stride of nx.
    pub fn new(
        nx: usize,
        ny: usize,
        stride: Option<usize>,
        direction: Direction,
    ) -> Result<Self, FftError> {
        let stride = match stride {
            Some(s) if s > 0 => s,
            _ => nx,
        };

        if stride < nx {
            error!("Row stride {} is smaller than the row length {}", stride, nx);
            return Err(FftError::InvalidRowStride { nx, stride });
        }

        let cfgx = RealConfig::new(nx, direction)?;
        let cfgy = ComplexConfig::new(ny, direction)?;

        Ok(Self {
            nx,
            ny,
            stride,
            cfgx,
            cfgy,
        })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Distance between the starts of consecutive rows of the real grid.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn direction(&self) -> Direction {
        self.cfgy.direction()
    }

    /// Number of complex modes along x, nx/2 + 1.
    pub fn r2c_len(&self) -> usize {
        self.nx / 2 + 1
    }

    /// Number of values in the real grid, including the guard cells of all but the last row.
    pub fn grid_len(&self) -> usize {
        (self.ny - 1) * self.stride + self.nx
    }

    /// Number of complex values in the transposed spectrum.
    pub fn spectrum_len(&self) -> usize {
        self.r2c_len() * self.ny
    }

    /// Performs a physical -> spectral transform of the real grid `input` and
    /// returns the result (transposed) in `output`.
    pub fn forward(&self, input: &[f32], output: &mut [Complex32]) -> Result<(), FftError> {
        self.direction().expect(Direction::Forward, "forward 2d real fft")?;

        let nx = self.nx;
        let ny = self.ny;
        let r2c = self.r2c_len();

        assert!(input.len() >= self.grid_len());
        assert_eq!(self.spectrum_len(), output.len());

        let mut scratch = try_vec![
            Complex32::new(0.0, 0.0);
            r2c.max(ny) + self.cfgx.scratch_len().max(self.cfgy.scratch_len())
        ];
        let (line, rest) = scratch.split_at_mut(r2c.max(ny));

        // Real to complex transform of all the rows, transposing the result
        {
            let mut spectrum = viewmut2d(output, ny, r2c);
            for j in 0..ny {
                let row = &input[j * self.stride..j * self.stride + nx];
                self.cfgx.forward_with_scratch(row, &mut line[..r2c], rest)?;
                for (s, z) in spectrum.row_mut(j).iter_mut().zip(line.iter()) {
                    *s = *z;
                }
            }
        }

        // Complex to complex transform of all the columns
        for column in output.chunks_exact_mut(ny) {
            line[..ny].copy_from_slice(column);
            self.cfgy.process_with_scratch(&line[..ny], column, rest);
        }

        Ok(())
    }

    /// Performs a spectral -> physical transform of the transposed spectrum `input`
    /// into the real grid `output`. Guard cells of `output` are not written.
    pub fn inverse(&self, input: &[Complex32], output: &mut [f32]) -> Result<(), FftError> {
        self.direction().expect(Direction::Backward, "inverse 2d real fft")?;

        let nx = self.nx;
        let ny = self.ny;
        let r2c = self.r2c_len();

        assert_eq!(self.spectrum_len(), input.len());
        assert!(output.len() >= self.grid_len());

        // The output grid is smaller than the spectrum, so the intermediate
        // rows need their own storage
        let mut scratch = try_vec![
            Complex32::new(0.0, 0.0);
            r2c * ny + ny + self.cfgx.scratch_len().max(self.cfgy.scratch_len())
        ];
        let (rows, rest) = scratch.split_at_mut(r2c * ny);
        let (line, rest) = rest.split_at_mut(ny);

        // The x transform normalises itself, y needs a factor 1/ny
        let norm = 1.0 / ny as f32;

        // Complex to complex transform of all the columns, transposing the result
        {
            let mut rows = viewmut2d(rows, r2c, ny);
            for (i, column) in input.chunks_exact(ny).enumerate() {
                self.cfgy.process_with_scratch(column, line, rest);
                for (r, z) in rows.row_mut(i).iter_mut().zip(line.iter()) {
                    *r = *z * norm;
                }
            }
        }

        // Complex to real transform of all the rows
        for (j, row) in rows.chunks_exact(r2c).enumerate() {
            let out = &mut output[j * self.stride..j * self.stride + nx];
            self.cfgx.inverse_with_scratch(row, out, rest)?;
        }

        Ok(())
    }
}
