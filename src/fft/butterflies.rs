//! Butterfly kernels with 'decimation in time'.
//!
//! Each kernel combines `radix` sub-transforms of length `m` stored one after
//! the other in `out`, lane `i` reading `out[i], out[i + m], out[i + 2m], ...`
//! and writing the results back to the same locations.
//! Twiddles are taken from the full table of the configuration at multiples of `stride`.

use {crate::fft::Direction, num_complex::Complex32};

/// Radix two butterfly.
pub fn butterfly2(out: &mut [Complex32], stride: usize, twiddles: &[Complex32], m: usize) {
    for i in 0..m {
        let t0 = out[i];
        let t1 = out[i + m] * twiddles[i * stride];

        out[i] = t0 + t1;
        out[i + m] = t0 - t1;
    }
}

/// Radix three butterfly.
pub fn butterfly3(out: &mut [Complex32], stride: usize, twiddles: &[Complex32], m: usize) {
    // cos(2pi/3) = -1/2 is folded into the 0.5 below
    let ima = Complex32::new(0.0, twiddles[stride * m].im);

    for i in 0..m {
        let t0 = out[i];
        let t1 = out[i + m] * twiddles[i * stride];
        let t2 = out[i + 2 * m] * twiddles[2 * i * stride];

        let s0 = t1 + t2;
        let s1 = t1 - t2;

        let u = t0 - s0 * 0.5;
        let v = ima * s1;

        out[i] = t0 + s0;
        out[i + m] = u + v;
        out[i + 2 * m] = u - v;
    }
}

/// Radix four butterfly, the rotation by i follows the sign of the twiddle table.
pub fn butterfly4(
    out: &mut [Complex32],
    stride: usize,
    twiddles: &[Complex32],
    m: usize,
    direction: Direction,
) {
    let p = match direction {
        Direction::Backward => Complex32::i(),
        Direction::Forward => -Complex32::i(),
    };

    for i in 0..m {
        let t0 = out[i];
        let t1 = out[i + m] * twiddles[i * stride];
        let t2 = out[i + 2 * m] * twiddles[2 * i * stride];
        let t3 = out[i + 3 * m] * twiddles[3 * i * stride];

        let s0 = t1 + t3;
        let s1 = t1 - t3;
        let s2 = t0 + t2;
        let s3 = t0 - t2;

        out[i] = s2 + s0;
        out[i + m] = s3 + p * s1;
        out[i + 2 * m] = s2 - s0;
        out[i + 3 * m] = s3 - p * s1;
    }
}

/// Radix five butterfly.
pub fn butterfly5(out: &mut [Complex32], stride: usize, twiddles: &[Complex32], m: usize) {
    let ya = twiddles[stride * m];
    let yb = twiddles[2 * stride * m];
    let j = Complex32::i();

    for i in 0..m {
        let t0 = out[i];
        let t1 = out[i + m] * twiddles[i * stride];
        let t2 = out[i + 2 * m] * twiddles[2 * i * stride];
        let t3 = out[i + 3 * m] * twiddles[3 * i * stride];
        let t4 = out[i + 4 * m] * twiddles[4 * i * stride];

        let s0 = t1 + t4;
        let s1 = t1 - t4;
        let s2 = t2 + t3;
        let s3 = t2 - t3;

        let s4 = t0 + s0 * ya.re + s2 * yb.re;
        let s5 = t0 + s0 * yb.re + s2 * ya.re;

        let s6 = -j * (s1 * ya.im + s3 * yb.im);
        let s7 = j * (s1 * yb.im - s3 * ya.im);

        out[i] = t0 + s0 + s2;
        out[i + m] = s4 - s6;
        out[i + 2 * m] = s5 + s7;
        out[i + 3 * m] = s5 - s7;
        out[i + 4 * m] = s4 + s6;
    }
}

/// Direct DFT butterfly for any other radix `p`, at a cost of O(p^2) per lane.
/// `scratch` must hold at least `p` values.
pub fn butterfly_generic(
    out: &mut [Complex32],
    stride: usize,
    twiddles: &[Complex32],
    m: usize,
    p: usize,
    scratch: &mut [Complex32],
) {
    let n = twiddles.len();
    let taps = &mut scratch[..p];

    for i in 0..m {
        for (j, tap) in taps.iter_mut().enumerate() {
            *tap = out[i + j * m];
        }

        for j in 0..p {
            let tstride = (i + j * m) * stride;
            let mut s = taps[0];
            for (k, tap) in taps.iter().enumerate().skip(1) {
                s += *tap * twiddles[(k * tstride) % n];
            }
            out[i + j * m] = s;
        }
    }
}
