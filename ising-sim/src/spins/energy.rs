use crate::geometry::Lattice;

/// Sum of the four nearest-neighbor spins of `site`, with periodic wrap.
#[inline]
pub fn neighbor_sum(lattice: &Lattice, spins: &[i8], site: usize) -> i32 {
    let mut h = 0i32;
    for d in 0..lattice.n_neighbors {
        h += spins[lattice.neighbor_fwd(site, d)] as i32;
        h += spins[lattice.neighbor_bwd(site, d)] as i32;
    }
    h
}

/// Energy change from flipping `site` with unit ferromagnetic coupling:
/// `2 * s_i * sum(s_neighbors)`, always one of {−8, −4, 0, 4, 8}.
#[inline]
pub fn delta_energy(lattice: &Lattice, spins: &[i8], site: usize) -> i32 {
    2 * spins[site] as i32 * neighbor_sum(lattice, spins, site)
}
