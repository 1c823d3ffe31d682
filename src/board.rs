use rand::Rng;

/// Tile identifier, numbered from 1 up to `grid_size²`
pub type Tile = u32;

pub const MIN_GRID_SIZE: u32 = 3;
pub const MAX_GRID_SIZE: u32 = 7;
/// Rounds between grid size increases
const ROUNDS_PER_GRID_STEP: u32 = 3;

/// Grid dimension for a given round: starts at 3x3, grows every 3 rounds, caps at 7x7
pub fn grid_size(round: u32) -> u32 {
    (MIN_GRID_SIZE + round / ROUNDS_PER_GRID_STEP).min(MAX_GRID_SIZE)
}

pub fn total_tiles(grid_size: u32) -> u32 {
    grid_size * grid_size
}

/// Number of tiles the player has to remember on a grid of the given size
pub fn sequence_length(grid_size: u32) -> usize {
    let base = (grid_size as f64 * 1.5).floor() as usize;
    base.min(total_tiles(grid_size) as usize)
}

/// Unbiased in-place Fisher-Yates shuffle driven by the caller's rng
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

fn tile_universe(grid_size: u32) -> Vec<Tile> {
    (1..=total_tiles(grid_size)).collect()
}

/// Random target sequence of distinct tiles for the given grid
pub fn generate_sequence<R: Rng + ?Sized>(grid_size: u32, rng: &mut R) -> Vec<Tile> {
    let mut tiles = tile_universe(grid_size);
    shuffle(&mut tiles, rng);
    tiles.truncate(sequence_length(grid_size));
    tiles
}

/// Random display order covering every tile of the grid exactly once
pub fn tile_order<R: Rng + ?Sized>(grid_size: u32, rng: &mut R) -> Vec<Tile> {
    let mut tiles = tile_universe(grid_size);
    shuffle(&mut tiles, rng);
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_grid_size_progression() {
        assert_eq!(grid_size(0), 3);
        assert_eq!(grid_size(1), 3);
        assert_eq!(grid_size(2), 3);
        assert_eq!(grid_size(3), 4);
        assert_eq!(grid_size(6), 5);
        assert_eq!(grid_size(12), 7);
        assert_eq!(grid_size(1_000), 7);
    }

    #[test]
    fn test_grid_size_monotonic_and_bounded() {
        let sizes: Vec<u32> = (0..100).map(grid_size).collect();
        assert!(sizes.iter().tuple_windows().all(|(a, b)| a <= b));
        assert!(sizes
            .iter()
            .all(|&n| (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&n)));
    }

    #[test]
    fn test_sequence_length_per_grid() {
        assert_eq!(sequence_length(3), 4);
        assert_eq!(sequence_length(4), 6);
        assert_eq!(sequence_length(5), 7);
        assert_eq!(sequence_length(6), 9);
        assert_eq!(sequence_length(7), 10);
    }

    #[test]
    fn test_sequence_length_never_exceeds_grid() {
        for round in 0..50 {
            let n = grid_size(round);
            let len = sequence_length(n);
            assert!(len >= 1);
            assert!(len <= total_tiles(n) as usize);
        }
    }

    #[test]
    fn test_generate_sequence_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in MIN_GRID_SIZE..=MAX_GRID_SIZE {
            let seq = generate_sequence(n, &mut rng);
            assert_eq!(seq.len(), sequence_length(n));
            assert!(seq.iter().all_unique());
            assert!(seq.iter().all(|&t| t >= 1 && t <= total_tiles(n)));
        }
    }

    #[test]
    fn test_tile_order_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let order = tile_order(5, &mut rng);
        assert_eq!(order.len(), 25);
        let sorted: Vec<Tile> = order.iter().copied().sorted().collect();
        assert_eq!(sorted, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = generate_sequence(4, &mut StdRng::seed_from_u64(99));
        let b = generate_sequence(4, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u32> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![5];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![5]);
    }

    #[test]
    fn test_shuffle_roughly_uniform_first_position() {
        // Every element should land in slot 0 a fair share of the time
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0u32; 4];
        for _ in 0..4000 {
            let mut items = [0usize, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            counts[items[0]] += 1;
        }
        assert!(counts.iter().all(|&c| (800..1200).contains(&c)), "{counts:?}");
    }
}
