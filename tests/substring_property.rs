use grid_dp::verify::{run_score, verify_substring};
use grid_dp::{Scoring, Storage, WeightTable, WeightedSubstringMatcher};
use proptest::prelude::*;

fn scoring_strategy() -> impl Strategy<Value = Scoring> {
    (
        prop::collection::vec(prop_oneof![Just(1.0f64), Just(2.0), Just(0.5), 0.1f64..10.0], 4),
        prop_oneof![Just(0.0f64), Just(1.0), Just(5.0), 0.0f64..6.0],
    )
        .prop_map(|(ws, penalty)| {
            let table = WeightTable::from_pairs("ABCD".chars().zip(ws)).unwrap();
            Scoring::new(table, penalty).unwrap()
        })
}

proptest! {
    #[test]
    fn result_is_sound_and_maximal(
        a in "[ABCDabcd]{0,12}",
        b in "[ABCDabcd]{0,12}",
        scoring in scoring_strategy(),
    ) {
        let result = WeightedSubstringMatcher::new(scoring.clone()).find(&a, &b).unwrap();
        prop_assert_eq!(verify_substring(&a, &b, &scoring, &result), Ok(()));
        if !result.is_empty() {
            let recomputed = run_score(&result.text1, &result.text2, &scoring).unwrap().unwrap();
            prop_assert!((recomputed - result.score).abs() < 1e-9);
        }
    }

    #[test]
    fn higher_penalty_never_raises_score(
        a in "[ABC]{0,12}",
        b in "[ABC]{0,12}",
        low in 0.0f64..4.0,
        extra in 0.0f64..4.0,
    ) {
        let find = |penalty: f64| {
            let scoring = Scoring::new(WeightTable::latin_uniform(), penalty).unwrap();
            WeightedSubstringMatcher::new(scoring).find(&a, &b).unwrap()
        };
        let loose = find(low);
        let strict = find(low + extra);
        prop_assert!(strict.score <= loose.score);
    }

    #[test]
    fn storage_modes_agree(a in "[ABC]{0,10}", b in "[ABC]{0,10}", penalty in 0.0f64..3.0) {
        let scoring = Scoring::new(WeightTable::latin_uniform(), penalty).unwrap();
        let full = WeightedSubstringMatcher::new(scoring.clone()).find(&a, &b).unwrap();
        let rolling = WeightedSubstringMatcher::new(scoring)
            .with_storage(Storage::Rolling)
            .find(&a, &b)
            .unwrap();
        prop_assert_eq!(full, rolling);
    }
}
