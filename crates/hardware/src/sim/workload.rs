//! Synthetic matrix-multiply address stream.
//!
//! Reproduces the memory references of a naive `C = A * B` over row-major
//! `n x n` matrices, with the accumulator re-read and re-written on every
//! inner iteration:
//!
//! ```text
//! for i in 0..n:
//!   for j in 0..n:
//!     C[i][j]
//!     for x in 0..n:
//!       A[i][x], B[x][j], C[i][j], C[i][j]
//! ```
//!
//! Only addresses are produced; no memory is touched.

use crate::config::WorkloadConfig;

/// Matrix-multiply workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatMul {
    n: u64,
    element_bytes: u64,
    a_base: u64,
    b_base: u64,
    c_base: u64,
}

impl MatMul {
    /// Creates a workload from its configuration.
    pub const fn new(config: &WorkloadConfig) -> Self {
        Self {
            n: config.matrix_size as u64,
            element_bytes: config.element_bytes,
            a_base: config.a_base,
            b_base: config.b_base,
            c_base: config.c_base,
        }
    }

    /// Number of addresses the stream yields, `n^2 * (1 + 4n)`.
    pub const fn len(&self) -> u64 {
        self.n * self.n * (1 + 4 * self.n)
    }

    /// Returns `true` for a zero-sized matrix.
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Address of element `(row, col)` of the matrix at `base`.
    #[inline(always)]
    const fn element(&self, base: u64, row: u64, col: u64) -> u64 {
        base.wrapping_add((row * self.n + col).wrapping_mul(self.element_bytes))
    }

    /// Yields the access stream in program order.
    pub fn addresses(self) -> impl Iterator<Item = u64> {
        let n = self.n;
        (0..n).flat_map(move |i| {
            (0..n).flat_map(move |j| {
                let c = self.element(self.c_base, i, j);
                std::iter::once(c).chain((0..n).flat_map(move |x| {
                    [
                        self.element(self.a_base, i, x),
                        self.element(self.b_base, x, j),
                        c,
                        c,
                    ]
                }))
            })
        })
    }
}
