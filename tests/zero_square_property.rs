use grid_dp::verify::{find_square_of_size, verify_square};
use grid_dp::{find_largest_zero_square, Grid, Storage, ZeroSquareFinder};
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (0usize..9, 0usize..9).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop_oneof![3 => Just(0u8), 1 => 1u8..=255u8], rows * cols)
            .prop_map(move |cells| Grid::new(rows, cols, cells).unwrap())
    })
}

proptest! {
    #[test]
    fn reported_square_is_sound_and_maximal(grid in grid_strategy()) {
        let result = find_largest_zero_square(&grid);
        prop_assert_eq!(verify_square(&grid, &result), Ok(()));
    }

    #[test]
    fn size_matches_first_square_of_that_size(grid in grid_strategy()) {
        let result = find_largest_zero_square(&grid);
        if result.size > 0 {
            prop_assert!(find_square_of_size(&grid, result.size).is_some());
        } else {
            prop_assert_eq!(grid.count_empty(), 0);
        }
    }

    #[test]
    fn storage_modes_agree(grid in grid_strategy()) {
        let full = ZeroSquareFinder::with_storage(Storage::Full).find(&grid);
        let rolling = ZeroSquareFinder::with_storage(Storage::Rolling).find(&grid);
        prop_assert_eq!(full, rolling);
    }
}
