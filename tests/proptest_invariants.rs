use miniboss::{Bag, BreakpointTable, SfaWord};
use miniboss::distance::{boss_distance, nearest_neighbor};
use miniboss::transform::{disjoint_windows, Dft, Mft};

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

const ABS_TOL: f64 = 1e-6;


fn words(symbols: &[Vec<usize>], alphabet_size: usize) -> Vec<SfaWord> {
    symbols.iter()
        .map(|s| SfaWord::from_symbols(s, alphabet_size))
        .collect()
}


fn symbol_sequences() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0usize..4, 3), 1..40)
}


proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn disjoint_window_layout(len in 1usize..200, w in 1usize..50) {
        prop_assume!(w <= len);
        let series = (0..len).map(|t| t as f64).collect::<Vec<_>>();
        let windows = disjoint_windows(&series, w);

        prop_assert_eq!(windows.len(), len.div_ceil(w));
        prop_assert!(windows.iter().all(|win| win.len() == w));
        let last = windows.last().unwrap();
        prop_assert_eq!(last[0] as usize, len - w);
    }

    #[test]
    fn breakpoint_rows_are_monotone(
        values in prop::collection::vec(
            prop::collection::vec(-100.0f64..100.0, 6), 1..60
        ),
        alphabet_size in 2usize..9,
    ) {
        let table = BreakpointTable::from_coefficients(&values, 6, alphabet_size);
        prop_assert_eq!(table.word_length(), 6);
        for position in 0..6 {
            let row = table.row(position);
            prop_assert_eq!(row.len(), alphabet_size);
            prop_assert!(row.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(row[alphabet_size - 1], f64::INFINITY);

            for dft in &values {
                prop_assert!(table.symbol(position, dft[position]) < alphabet_size);
            }
        }
    }

    #[test]
    fn distance_to_itself_is_zero(symbols in symbol_sequences()) {
        let bag = Bag::from_words(words(&symbols, 4), true);
        prop_assert_eq!(boss_distance(&bag, &bag), 0.0);
    }

    #[test]
    fn distance_is_a_sum_of_squares(
        a in symbol_sequences(),
        b in symbol_sequences(),
    ) {
        let a = Bag::from_words(words(&a, 4), false);
        let b = Bag::from_words(words(&b, 4), false);

        let expected = a.iter()
            .map(|(w, &n)| {
                let diff = n as f64 - b.count(w) as f64;
                diff * diff
            })
            .sum::<f64>();
        prop_assert_eq!(boss_distance(&a, &b), expected);
        prop_assert!(boss_distance(&a, &b) >= 0.0);
    }

    #[test]
    fn numerosity_reduction_never_adds(symbols in symbol_sequences()) {
        let words = words(&symbols, 4);
        let reduced = Bag::from_words(words.clone(), true);
        let full = Bag::from_words(words.clone(), false);

        prop_assert_eq!(full.total() as usize, words.len());
        prop_assert!(reduced.total() <= full.total());
        for (word, &count) in &reduced {
            prop_assert!(count <= full.count(word));
        }

        let runs = 1 + words.windows(2).filter(|w| w[0] != w[1]).count();
        prop_assert_eq!(reduced.total() as usize, runs);
    }

    #[test]
    fn leave_one_out_never_returns_itself(
        sequences in prop::collection::vec(symbol_sequences(), 2..8),
    ) {
        let bags = sequences.iter()
            .enumerate()
            .map(|(i, s)| Bag::from_words(words(s, 4), true).with_label(Some(i)))
            .collect::<Vec<_>>();

        for (i, bag) in bags.iter().enumerate() {
            let nn = nearest_neighbor(bag, &bags, Some(i)).unwrap();
            prop_assert_ne!(nn.index, i);
            prop_assert_eq!(nn.label, Some(nn.index));
        }
    }

    #[test]
    fn bounded_search_matches_exhaustive_search(
        query in symbol_sequences(),
        references in prop::collection::vec(symbol_sequences(), 1..12),
        skip in prop::option::of(0usize..12),
    ) {
        let query = Bag::from_words(words(&query, 4), true);
        let bags = references.iter()
            .enumerate()
            .map(|(i, s)| Bag::from_words(words(s, 4), true).with_label(Some(i)))
            .collect::<Vec<_>>();

        // First index wins on ties.
        let mut expected: Option<(usize, f64)> = None;
        for (i, bag) in bags.iter().enumerate() {
            if Some(i) == skip { continue; }
            let d = boss_distance(&query, bag);
            if expected.map_or(true, |(_, best)| d < best) {
                expected = Some((i, d));
            }
        }

        let found = nearest_neighbor(&query, &bags, skip);
        match (found, expected) {
            (None, None) => {},
            (Some(nn), Some((index, distance))) => {
                prop_assert_eq!(nn.index, index);
                prop_assert_eq!(nn.distance, distance);
                prop_assert_eq!(nn.label, Some(index));
            },
            (found, expected) => {
                prop_assert!(false, "found {:?}, expected {:?}", found, expected);
            },
        }
    }

    #[test]
    fn sliding_transform_matches_direct_transform(
        series in prop::collection::vec(-10.0f64..10.0, 16..64),
        window_size in 4usize..16,
        word_length in 2usize..9,
        normalize in any::<bool>(),
    ) {
        let mft = Mft::new(window_size, word_length, normalize);
        let dft = Dft::new(window_size, word_length, normalize);

        let sliding = mft.transform(&series);
        prop_assert_eq!(sliding.len(), series.len() - window_size + 1);

        for (t, coefficients) in sliding.iter().enumerate() {
            let window = &series[t..t + window_size];
            let direct = dft.transform(window);
            prop_assert_eq!(coefficients.len(), word_length);
            for (a, b) in coefficients.iter().zip(&direct) {
                prop_assert!((a - b).abs() <= ABS_TOL * (1.0 + b.abs()));
            }
        }
    }
}
