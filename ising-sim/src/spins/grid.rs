use std::ops::Index;
use std::slice::ChunksExact;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::error::SimError;

/// Square grid of ±1 spins, stored row-major in a flat `Vec<i8>`.
///
/// The side length is fixed at construction. Values other than −1 and +1 are
/// never observable: constructors validate them and the only mutation is a
/// sign flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinGrid {
    size: usize,
    spins: Vec<i8>,
}

impl SpinGrid {
    /// Reproducible random grid: seeds a fresh [`Xoshiro256StarStar`] with
    /// `seed` and fills it via [`SpinGrid::random`].
    ///
    /// The same `(seed, size)` always yields the same grid.
    pub fn from_seed(seed: u64, size: usize) -> Result<Self, SimError> {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        Self::random(size, &mut rng)
    }

    /// Fill a `size x size` grid in row-major order with independent, uniform
    /// draws from {−1, +1}, consuming one `f32` per site from `rng`.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Result<Self, SimError> {
        let n_spins = checked_sites(size)?;
        let spins = (0..n_spins)
            .map(|_| if rng.gen::<f32>() < 0.5 { -1 } else { 1 })
            .collect();
        Ok(Self { size, spins })
    }

    /// Build a grid from explicit rows. Rejects empty, ragged or non-square
    /// input and any value other than ±1.
    pub fn from_rows<T: AsRef<[i8]>>(rows: &[T]) -> Result<Self, SimError> {
        let size = rows.len();
        let n_spins = checked_sites(size)?;
        let mut spins = Vec::with_capacity(n_spins);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(SimError::invalid(format!(
                    "row {r} has {} entries, expected {size}",
                    row.len()
                )));
            }
            if let Some(&bad) = row.iter().find(|&&s| s != 1 && s != -1) {
                return Err(SimError::invalid(format!(
                    "row {r} contains spin value {bad}, expected -1 or +1"
                )));
            }
            spins.extend_from_slice(row);
        }
        Ok(Self { size, spins })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn n_spins(&self) -> usize {
        self.spins.len()
    }

    /// Flat row-major view of the spins.
    pub fn as_slice(&self) -> &[i8] {
        &self.spins
    }

    /// Row slices in row-major order, for renderers and exporters.
    pub fn rows(&self) -> ChunksExact<'_, i8> {
        self.spins.chunks_exact(self.size)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i8> {
        if row < self.size && col < self.size {
            Some(self.spins[row * self.size + col])
        } else {
            None
        }
    }

    /// Number of sites whose spin differs between `self` and `other`.
    ///
    /// Grids of different size are compared over the shorter flat length.
    pub fn count_differences(&self, other: &SpinGrid) -> usize {
        self.spins
            .iter()
            .zip(other.spins.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    #[inline]
    pub(crate) fn flip(&mut self, site: usize) {
        self.spins[site] = -self.spins[site];
    }
}

impl Index<(usize, usize)> for SpinGrid {
    type Output = i8;

    fn index(&self, (row, col): (usize, usize)) -> &i8 {
        assert!(
            row < self.size && col < self.size,
            "index ({row}, {col}) out of bounds for {n}x{n} grid",
            n = self.size
        );
        &self.spins[row * self.size + col]
    }
}

fn checked_sites(size: usize) -> Result<usize, SimError> {
    if size == 0 {
        return Err(SimError::invalid("grid size must be >= 1"));
    }
    size.checked_mul(size)
        .ok_or_else(|| SimError::invalid(format!("grid size {size} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_grid() {
        let a = SpinGrid::from_seed(93, 32).unwrap();
        let b = SpinGrid::from_seed(93, 32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_grid() {
        let a = SpinGrid::from_seed(1, 32).unwrap();
        let b = SpinGrid::from_seed(2, 32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_values_and_shape() {
        let grid = SpinGrid::from_seed(7, 17).unwrap();
        assert_eq!(grid.size(), 17);
        assert_eq!(grid.n_spins(), 289);
        assert!(grid.as_slice().iter().all(|&s| s == 1 || s == -1));
        assert_eq!(grid.rows().count(), 17);
        assert!(grid.rows().all(|row| row.len() == 17));
    }

    #[test]
    fn test_random_is_roughly_balanced() {
        let grid = SpinGrid::from_seed(11, 100).unwrap();
        let up = grid.as_slice().iter().filter(|&&s| s == 1).count();
        // 10_000 fair draws: 5 sigma is 250.
        assert!((4750..=5250).contains(&up), "up = {up}");
    }

    #[test]
    fn test_random_matches_caller_owned_stream() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let from_stream = SpinGrid::random(8, &mut rng).unwrap();
        assert_eq!(from_stream, SpinGrid::from_seed(5, 8).unwrap());
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            SpinGrid::from_seed(1, 0),
            Err(SimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_rows_and_indexing() {
        let grid = SpinGrid::from_rows(&[[1i8, -1], [-1, -1]]).unwrap();
        assert_eq!(grid.size(), 2);
        assert_eq!(grid[(0, 0)], 1);
        assert_eq!(grid[(0, 1)], -1);
        assert_eq!(grid.get(1, 0), Some(-1));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.as_slice(), &[1, -1, -1, -1]);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        let ragged: Vec<Vec<i8>> = vec![vec![1, 1], vec![1]];
        assert!(SpinGrid::from_rows(&ragged).is_err());

        let zero = [[1i8, 0], [1, 1]];
        assert!(SpinGrid::from_rows(&zero).is_err());

        let empty: [[i8; 0]; 0] = [];
        assert!(SpinGrid::from_rows(&empty).is_err());
    }

    #[test]
    fn test_flip_and_count_differences() {
        let mut grid = SpinGrid::from_rows(&[[1i8, 1], [1, 1]]).unwrap();
        let before = grid.clone();
        grid.flip(3);
        assert_eq!(grid[(1, 1)], -1);
        assert_eq!(grid.count_differences(&before), 1);
        grid.flip(3);
        assert_eq!(grid, before);
    }
}
