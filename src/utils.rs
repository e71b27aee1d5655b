use ndarray::{ArrayViewMut2, ShapeBuilder};

#[cfg(test)]
use num_complex::Complex32;

/// Column-major view of `xs` as an `x` by `y` array; `x` is the fastest varying index.
pub fn viewmut2d<T>(xs: &mut [T], x: usize, y: usize) -> ArrayViewMut2<T> {
    ArrayViewMut2::from_shape((x, y).strides((1, x)), &mut xs[..x * y]).unwrap()
}

#[cfg(test)]
pub(crate) fn assert_approx_eq_slice(a: &[f32], b: &[f32], epsilon: f32) {
    assert_eq!(a.len(), b.len());
    for (i, e) in a.iter().enumerate() {
        approx::assert_abs_diff_eq!(*e, b[i], epsilon = epsilon);
    }
}

#[cfg(test)]
pub(crate) fn assert_approx_eq_complex_slice(a: &[Complex32], b: &[Complex32], epsilon: f32) {
    assert_eq!(a.len(), b.len());
    for (i, e) in a.iter().enumerate() {
        approx::assert_abs_diff_eq!(e.re, b[i].re, epsilon = epsilon);
        approx::assert_abs_diff_eq!(e.im, b[i].im, epsilon = epsilon);
    }
}

/// Deterministic, non-periodic test signal in roughly [-2, 2].
#[cfg(test)]
pub(crate) fn signal(n: usize, seed: usize) -> Vec<f32> {
    (0..n)
        .map(|k| {
            let k = (k + seed) as f64;
            ((0.37 * k).sin() + (1.3 * k * k).cos()) as f32
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn complex_signal(n: usize, seed: usize) -> Vec<Complex32> {
    signal(2 * n, seed)
        .chunks_exact(2)
        .map(|c| Complex32::new(c[0], c[1]))
        .collect()
}

/// Direct O(n^2) DFT evaluated in double precision, used as a reference.
#[cfg(test)]
pub(crate) fn reference_dft(input: &[Complex32], sign: f64) -> Vec<Complex32> {
    let n = input.len();
    (0..n)
        .map(|k| {
            let (mut re, mut im) = (0.0_f64, 0.0_f64);
            for (j, x) in input.iter().enumerate() {
                let phase = sign * 2.0 * std::f64::consts::PI * ((j * k) % n) as f64 / n as f64;
                let (s, c) = phase.sin_cos();
                re += f64::from(x.re) * c - f64::from(x.im) * s;
                im += f64::from(x.re) * s + f64::from(x.im) * c;
            }
            Complex32::new(re as f32, im as f32)
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = simplelog::TestLogger::init(log::LevelFilter::Debug, simplelog::Config::default());
}
