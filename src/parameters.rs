use {
    crate::{
        error::FftError,
        fft::{angular_step, Direction},
        fftr2d::Real2DConfig,
    },
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::{fs::File, io::Read, path::Path},
};

/// Transform parameters
#[derive(Debug, PartialEq, Default, Clone, Serialize, Deserialize)]
pub struct Parameters {
    pub grid: Grid,
}

impl Parameters {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        Self::from_reader(file).with_context(|| format!("Failed to parse parameters from {:?}", path))
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// Number of cells along x, must be even
    pub nx: usize,
    /// Number of cells along y
    pub ny: usize,
    /// Padding cells at the end of every row
    pub guard_cells: usize,
    /// Cell size along x
    pub dx: f32,
    /// Cell size along y
    pub dy: f32,
}

impl Default for Grid {
    fn default() -> Self {
        Grid {
            nx: 64,
            ny: 64,
            guard_cells: 0,
            dx: 1.0,
            dy: 1.0,
        }
    }
}

impl Grid {
    pub fn row_stride(&self) -> usize {
        self.nx + self.guard_cells
    }

    pub fn real2d_config(&self, direction: Direction) -> Result<Real2DConfig, FftError> {
        Real2DConfig::new(self.nx, self.ny, Some(self.row_stride()), direction)
    }

    /// Wavenumbers of the nx/2 + 1 stored modes along x.
    pub fn wavenumbers_x(&self) -> Vec<f32> {
        let dk = angular_step(self.nx, self.dx);
        (0..=self.nx / 2).map(|k| k as f32 * dk).collect()
    }

    /// Wavenumbers of the ny modes along y in transform order, negative above ny/2.
    pub fn wavenumbers_y(&self) -> Vec<f32> {
        let dk = angular_step(self.ny, self.dy);
        (0..self.ny)
            .map(|k| {
                if k <= self.ny / 2 {
                    k as f32 * dk
                } else {
                    (k as f32 - self.ny as f32) * dk
                }
            })
            .collect()
    }

}
