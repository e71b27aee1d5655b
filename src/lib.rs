
pub mod error;
pub mod fft;
pub mod fftr;
pub mod fftr2d;

pub mod constants;
pub mod parameters;
pub mod utils;

pub use {
    error::FftError,
    fft::{angular_step, ComplexConfig, Direction, Factor},
    fftr::RealConfig,
    fftr2d::Real2DConfig,
    num_complex::Complex32,
};
