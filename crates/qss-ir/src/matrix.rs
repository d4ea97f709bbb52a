//! Dense matrices of elementary gates.
//!
//! All matrices use little-endian qubit ordering: qubit `k` of an
//! operation is bit `k` of the basis-state index. A two-qubit operator
//! `A ⊗ B` with `A` on qubit 1 and `B` on qubit 0 is `kron(A, B)`.

use ndarray::{Array2, array, linalg::kron};
use num_complex::Complex64;

/// A dense complex matrix.
pub type Matrix = Array2<Complex64>;

#[inline]
fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Identity on `num_qubits` qubits.
pub fn identity(num_qubits: u32) -> Matrix {
    Array2::eye(1 << num_qubits)
}

/// Pauli-X.
pub fn x() -> Matrix {
    array![[ZERO, ONE], [ONE, ZERO]]
}

/// Pauli-Y.
pub fn y() -> Matrix {
    array![[ZERO, -I], [I, ZERO]]
}

/// Pauli-Z.
pub fn z() -> Matrix {
    array![[ONE, ZERO], [ZERO, -ONE]]
}

/// Hadamard.
pub fn h() -> Matrix {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    array![[c(s, 0.0), c(s, 0.0)], [c(s, 0.0), c(-s, 0.0)]]
}

/// sqrt(X).
pub fn sx() -> Matrix {
    array![[c(0.5, 0.5), c(0.5, -0.5)], [c(0.5, -0.5), c(0.5, 0.5)]]
}

/// Rotation about X.
pub fn rx(theta: f64) -> Matrix {
    let (s, co) = (theta / 2.0).sin_cos();
    array![[c(co, 0.0), c(0.0, -s)], [c(0.0, -s), c(co, 0.0)]]
}

/// Rotation about Y.
pub fn ry(theta: f64) -> Matrix {
    let (s, co) = (theta / 2.0).sin_cos();
    array![[c(co, 0.0), c(-s, 0.0)], [c(s, 0.0), c(co, 0.0)]]
}

/// Rotation about Z.
pub fn rz(theta: f64) -> Matrix {
    array![
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)]
    ]
}

/// Phase gate `diag(1, e^{iλ})`.
pub fn p(lambda: f64) -> Matrix {
    array![[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, lambda)]]
}

/// Universal single-qubit gate `U(θ, φ, λ)`.
pub fn u(theta: f64, phi: f64, lambda: f64) -> Matrix {
    let (s, co) = (theta / 2.0).sin_cos();
    array![
        [c(co, 0.0), -Complex64::from_polar(s, lambda)],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(co, phi + lambda)
        ]
    ]
}

/// SWAP.
pub fn swap() -> Matrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE]
    ]
}

/// `exp(-i θ/2 · P)` for a Hermitian involution `P`.
fn pauli_rotation(theta: f64, pauli: &Matrix) -> Matrix {
    let (s, co) = (theta / 2.0).sin_cos();
    let dim = pauli.nrows();
    Array2::<Complex64>::eye(dim) * c(co, 0.0) - pauli * c(0.0, s)
}

/// `exp(-i θ/2 · X⊗X)`.
pub fn rxx(theta: f64) -> Matrix {
    pauli_rotation(theta, &kron(&x(), &x()))
}

/// `exp(-i θ/2 · Z⊗Z)`.
pub fn rzz(theta: f64) -> Matrix {
    pauli_rotation(theta, &kron(&z(), &z()))
}

/// `exp(-i θ/2 · Z₀X₁)`: Z on the first qubit, X on the second.
pub fn rzx(theta: f64) -> Matrix {
    pauli_rotation(theta, &kron(&x(), &z()))
}

/// Embed `base` behind `num_ctrl` control qubits.
///
/// Controls occupy the low qubits; bit `j` of `ctrl_state` is the value
/// control `j` must hold for `base` to act on the remaining qubits.
pub fn controlled(base: &Matrix, num_ctrl: u32, ctrl_state: u32) -> Matrix {
    let ctrl_dim = 1usize << num_ctrl;
    let ctrl_mask = ctrl_dim - 1;
    let state = ctrl_state as usize & ctrl_mask;
    let dim = ctrl_dim * base.nrows();

    let mut out = Array2::zeros((dim, dim));
    for row in 0..dim {
        if (row & ctrl_mask) != state {
            out[[row, row]] = ONE;
            continue;
        }
        for col in (0..dim).filter(|col| (col & ctrl_mask) == state) {
            out[[row, col]] = base[[row >> num_ctrl, col >> num_ctrl]];
        }
    }
    out
}

/// `true` if every entry of `a - b` is within `atol`.
pub fn allclose(a: &Matrix, b: &Matrix, atol: f64) -> bool {
    a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= atol)
}
