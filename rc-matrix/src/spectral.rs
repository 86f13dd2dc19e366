use nalgebra::{DMatrix, DVector, Schur};

/// Upper bound of QR sweeps before giving up on the Schur decomposition
const MAX_SCHUR_ITER: usize = 10_000;

/// Iterations of the power method fallback
const POWER_ITER: usize = 512;

/// Estimate the spectral radius (largest absolute eigenvalue) of a square matrix.
///
/// The eigenvalues are read off a real Schur decomposition, which handles the
/// complex conjugate pairs a random non-symmetric matrix will have.
/// Should the decomposition not converge, the growth rate of a power
/// iteration is used instead. Either way the result is an approximation.
pub fn spectral_radius(m: &DMatrix<f64>) -> f64 {
    if m.nrows() == 0 {
        return 0.0;
    }

    match Schur::try_new(m.clone(), f64::EPSILON, MAX_SCHUR_ITER) {
        Some(schur) => schur
            .complex_eigenvalues()
            .iter()
            .map(|c| c.re.hypot(c.im))
            .fold(0.0, f64::max),
        None => {
            warn!(
                "schur decomposition of {}x{} matrix did not converge, falling back to power iteration",
                m.nrows(),
                m.ncols()
            );
            power_iteration(m, POWER_ITER)
        }
    }
}

/// Geometric mean growth of `||M^k v||` over the second half of the iterations.
/// Converges to the spectral radius even when the dominant eigenvalues are complex.
pub(crate) fn power_iteration(m: &DMatrix<f64>, iters: usize) -> f64 {
    let n = m.nrows();
    if n == 0 || iters == 0 {
        return 0.0;
    }
    let burn_in = iters / 2;

    let mut v: DVector<f64> = DVector::from_element(n, 1.0 / (n as f64).sqrt());
    let mut log_growth = 0.0;
    for k in 0..iters {
        let w = m * &v;
        let norm = w.norm();
        if norm == 0.0 {
            return 0.0;
        }
        if k >= burn_in {
            log_growth += norm.ln();
        }
        v = w / norm;
    }

    (log_growth / (iters - burn_in) as f64).exp()
}

#[cfg(test)]
mod tests {
    use nanorand::WyRand;
    use round::round;

    use super::*;
    use crate::Matrix;

    #[test]
    fn rotation_has_complex_eigenvalues() {
        // eigenvalues are +-0.5i
        let m = DMatrix::from_row_slice(2, 2, &[0.0, -0.5, 0.5, 0.0]);
        assert_eq!(round(spectral_radius(&m), 6), 0.5);
        assert_eq!(round(power_iteration(&m, 64), 6), 0.5);
    }

    #[test]
    fn power_iteration_diagonal() {
        let m = DMatrix::from_row_slice(3, 3, &[3.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.5]);
        assert_eq!(round(power_iteration(&m, 256), 3), 3.0);
    }

    #[test]
    fn nilpotent_is_zero() {
        let m = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(power_iteration(&m, 16), 0.0);
        assert_eq!(round(spectral_radius(&m), 6), 0.0);
    }

    #[test]
    fn power_iteration_agrees_with_schur() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let mut rng = WyRand::new_seed(3);
        let m = Matrix::random(30, 30, -1.0, 1.0, &mut rng);
        let exact = spectral_radius(m.as_dmatrix());
        let approx = power_iteration(m.as_dmatrix(), 4096);
        info!("schur: {}, power: {}", exact, approx);

        assert!((exact - approx).abs() / exact < 0.1);
    }

    #[test]
    fn empty() {
        assert_eq!(spectral_radius(&DMatrix::zeros(0, 0)), 0.0);
    }
}
