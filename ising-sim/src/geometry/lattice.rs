use crate::error::SimError;

/// Forward unit offsets of the square lattice: `[1, 0]` (down a row) and
/// `[0, 1]` (right a column). The backward neighbour is the negation.
const SQUARE_OFFSETS: [[isize; 2]; 2] = [[1, 0], [0, 1]];

/// Periodic `size x size` square lattice with precomputed neighbor table.
///
/// Sites are indexed in row-major (C) order: `(row, col)` is
/// `row * size + col`. All neighbor lookups wrap around both edges, so
/// site `(0, j)` has `(size - 1, j)` as its upward neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    /// Extent along each of the two dimensions.
    pub size: usize,
    /// Total number of sites (`size * size`).
    pub n_spins: usize,
    /// Number of forward neighbor directions per site.
    pub n_neighbors: usize,
    /// Layout: `neighbors[(i * n_neighbors + d) * 2 + dir]` where `dir = 0`
    /// is forward and `dir = 1` is backward.
    neighbors: Vec<u32>,
}

impl Lattice {
    /// Build the periodic square lattice of side `size`.
    ///
    /// Fails for `size == 0` and for lattices whose site count does not fit
    /// the `u32` neighbor table.
    pub fn square(size: usize) -> Result<Self, SimError> {
        if size == 0 {
            return Err(SimError::invalid("lattice size must be >= 1"));
        }
        let n_spins = size
            .checked_mul(size)
            .filter(|&n| n <= u32::MAX as usize)
            .ok_or_else(|| SimError::invalid(format!("lattice size {size} is too large")))?;

        let n_neighbors = SQUARE_OFFSETS.len();
        let strides = [size, 1];
        let mut neighbors = vec![0u32; n_spins * n_neighbors * 2];

        for i in 0..n_spins {
            let coords = [i / size, i % size];

            for (d, off) in SQUARE_OFFSETS.iter().enumerate() {
                for (dir, sign) in [(0, 1isize), (1, -1isize)] {
                    let mut flat = 0usize;
                    for dim in 0..2 {
                        let c = (coords[dim] as isize + sign * off[dim]).rem_euclid(size as isize)
                            as usize;
                        flat += c * strides[dim];
                    }
                    neighbors[(i * n_neighbors + d) * 2 + dir] = flat as u32;
                }
            }
        }

        Ok(Self {
            size,
            n_spins,
            n_neighbors,
            neighbors,
        })
    }

    #[inline]
    pub fn site(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[inline]
    pub fn coords(&self, site: usize) -> (usize, usize) {
        (site / self.size, site % self.size)
    }

    /// Forward neighbor of `site` along direction `d` (0 = down, 1 = right).
    #[inline]
    pub fn neighbor_fwd(&self, site: usize, d: usize) -> usize {
        self.neighbors[(site * self.n_neighbors + d) * 2] as usize
    }

    /// Backward neighbor of `site` along direction `d` (0 = up, 1 = left).
    #[inline]
    pub fn neighbor_bwd(&self, site: usize, d: usize) -> usize {
        self.neighbors[(site * self.n_neighbors + d) * 2 + 1] as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_neighbors() {
        // 4x4 lattice
        let lat = Lattice::square(4).unwrap();
        assert_eq!(lat.n_spins, 16);
        assert_eq!(lat.n_neighbors, 2);

        // Site 5 = (1,1): down (2,1)=9, right (1,2)=6, up (0,1)=1, left (1,0)=4
        assert_eq!(lat.neighbor_fwd(5, 0), 9);
        assert_eq!(lat.neighbor_fwd(5, 1), 6);
        assert_eq!(lat.neighbor_bwd(5, 0), 1);
        assert_eq!(lat.neighbor_bwd(5, 1), 4);
    }

    #[test]
    fn test_periodic_wrap() {
        let lat = Lattice::square(4).unwrap();

        // Site 0 = (0,0): up wraps to (3,0)=12, left wraps to (0,3)=3
        assert_eq!(lat.neighbor_bwd(0, 0), 12);
        assert_eq!(lat.neighbor_bwd(0, 1), 3);

        // Site 15 = (3,3): down wraps to (0,3)=3, right wraps to (3,0)=12
        assert_eq!(lat.neighbor_fwd(15, 0), 3);
        assert_eq!(lat.neighbor_fwd(15, 1), 12);
    }

    #[test]
    fn test_single_site_is_its_own_neighbor() {
        let lat = Lattice::square(1).unwrap();
        for d in 0..2 {
            assert_eq!(lat.neighbor_fwd(0, d), 0);
            assert_eq!(lat.neighbor_bwd(0, d), 0);
        }
    }

    #[test]
    fn test_two_by_two_neighbors_coincide() {
        // On a 2x2 torus the up and down neighbors are the same site.
        let lat = Lattice::square(2).unwrap();
        assert_eq!(lat.neighbor_fwd(0, 0), 2);
        assert_eq!(lat.neighbor_bwd(0, 0), 2);
        assert_eq!(lat.neighbor_fwd(0, 1), 1);
        assert_eq!(lat.neighbor_bwd(0, 1), 1);
    }

    #[test]
    fn test_site_coords_roundtrip() {
        let lat = Lattice::square(5).unwrap();
        assert_eq!(lat.site(3, 2), 17);
        assert_eq!(lat.coords(17), (3, 2));
    }

    #[test]
    fn test_rejects_zero_size() {
        assert!(matches!(
            Lattice::square(0),
            Err(SimError::InvalidArgument(_))
        ));
    }
}
