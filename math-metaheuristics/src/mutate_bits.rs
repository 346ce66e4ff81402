use rand::Rng;

/// Flips each of the 32 bits of every word independently with probability
/// `p_mut`.
pub(crate) fn flip_bits<R: Rng + ?Sized>(genome: &mut [u32], p_mut: f64, rng: &mut R) {
    for word in genome.iter_mut() {
        let mut mask = 0u32;
        for bit in 0..32 {
            if rng.random::<f64>() < p_mut {
                mask |= 1u32 << bit;
            }
        }
        *word ^= mask;
    }
}
