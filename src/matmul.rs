//! Dense single-precision matrix product C = A * B with the output rows split
//! across worker threads. Matrices are flat row-major buffers; each worker
//! owns a disjoint block of C's rows, so no locking is involved and only the
//! per-block checksums meet after the join.

use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

/// Allocates a `size` x `size` row-major matrix with every entry set to
/// `value`.
pub fn filled(size: usize, value: f32) -> Vec<f32> {
    vec![value; size * size]
}

/// Multiplies the rows `[first_row, first_row + block.len() / size)` of A
/// against B, writing into `block`, and returns the checksum of the entries
/// it produced. Accumulates the checksum in f64 so block order only perturbs
/// the low bits.
fn multiply_row_block(a: &[f32], b: &[f32], block: &mut [f32], size: usize, first_row: usize) -> f64 {
    let rows = block.len() / size;
    let mut checksum = 0.0f64;
    for i in 0..rows {
        let a_row = &a[(first_row + i) * size..][..size];
        let c_row = &mut block[i * size..][..size];
        for (j, cell) in c_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &a_ik) in a_row.iter().enumerate() {
                acc += a_ik * b[k * size + j];
            }
            *cell = acc;
            checksum += f64::from(acc);
        }
    }
    checksum
}

/// Single-threaded triple loop over the whole product. Returns the checksum
/// of C.
pub fn multiply_sequential(a: &[f32], b: &[f32], c: &mut [f32], size: usize) -> f64 {
    multiply_row_block(a, b, c, size, 0)
}

/// Splits C's rows into near-equal blocks, one per worker, and sums the
/// per-block checksums after the join. Every cell of C is bit-identical to
/// the sequential product; the checksum differs only by summation order.
pub fn multiply_parallel(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    size: usize,
    workers: usize,
) -> Result<f64, ThreadPoolBuildError> {
    assert!(workers > 0, "worker count must be at least 1");
    if size == 0 {
        return Ok(0.0);
    }

    let rows_per_block = size.div_ceil(workers);
    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    let checksum = pool.install(|| {
        c.par_chunks_mut(rows_per_block * size)
            .enumerate()
            .map(|(i, block)| multiply_row_block(a, b, block, size, i * rows_per_block))
            .sum()
    });
    Ok(checksum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_product_has_a_closed_form() {
        // A = 1, B = 2, n = 4: every cell of C is 4 * 1 * 2 = 8.
        let size = 4;
        let a = filled(size, 1.0);
        let b = filled(size, 2.0);
        let mut c = vec![0.0; size * size];
        let checksum = multiply_sequential(&a, &b, &mut c, size);
        assert!(c.iter().all(|&cell| cell == 8.0));
        assert_eq!(checksum, 128.0);
    }

    #[test]
    fn parallel_cells_match_sequential_exactly() {
        let size = 33;
        let a = filled(size, 0.1);
        let b = filled(size, 0.2);
        let mut c_seq = vec![0.0; size * size];
        let mut c_par = vec![0.0; size * size];
        multiply_sequential(&a, &b, &mut c_seq, size);
        for workers in [1, 2, 8, 33] {
            c_par.fill(0.0);
            multiply_parallel(&a, &b, &mut c_par, size, workers).unwrap();
            assert_eq!(c_seq, c_par, "{workers} workers");
        }
    }

    #[test]
    fn checksums_agree_within_reassociation_noise() {
        let size = 64;
        let a = filled(size, 0.1);
        let b = filled(size, 0.2);
        let mut c = vec![0.0; size * size];
        let seq = multiply_sequential(&a, &b, &mut c, size);
        let par = multiply_parallel(&a, &b, &mut c, size, 8).unwrap();
        assert!((seq - par).abs() / seq.abs() < 1e-9);
    }

    #[test]
    fn more_workers_than_rows() {
        let size = 3;
        let a = filled(size, 1.0);
        let b = filled(size, 1.0);
        let mut c = vec![0.0; size * size];
        let checksum = multiply_parallel(&a, &b, &mut c, size, 16).unwrap();
        assert_eq!(checksum, (size * size * size) as f64);
    }
}
