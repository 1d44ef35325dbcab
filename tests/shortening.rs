use miniboss::prelude::*;

use rand::prelude::*;
use rand_distr::Normal;


fn random_walks(seed: u64, n_series: usize, length: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let step = Normal::new(0.0, 1.0).unwrap();

    let series = (0..n_series)
        .map(|_| {
            let mut x = 0.0;
            (0..length)
                .map(|_| { x += step.sample(&mut rng); x })
                .collect::<Vec<f64>>()
        })
        .collect::<Vec<_>>();
    let labels = (0..n_series).map(|i| i % 2).collect();
    Dataset::new(series, labels).unwrap()
}


/// Tests for `IndividualBoss::shorten`.
#[cfg(test)]
pub mod shortening_tests {
    use super::*;

    #[test]
    fn shorten_twice_equals_shorten_once() {
        let dataset = random_walks(1, 10, 64);
        for normalize in [true, false] {
            let boss = BossBuilder::new(&dataset)
                .window_size(20)
                .word_length(16)
                .normalize(normalize)
                .build()
                .unwrap();

            let direct = boss.shorten(8).unwrap();
            let stepwise = boss.shorten(12).unwrap().shorten(8).unwrap();
            assert_eq!(direct.bags(), stepwise.bags());
            assert_eq!(direct.word_length(), 8);
        }
    }

    #[test]
    fn shorten_to_current_length_is_identity() {
        let dataset = random_walks(2, 6, 40);
        let boss = BossBuilder::new(&dataset)
            .window_size(12)
            .word_length(10)
            .build()
            .unwrap();
        let same = boss.shorten(10).unwrap();
        assert_eq!(same.bags(), boss.bags());
        assert_eq!(same.params(), boss.params());
    }

    #[test]
    fn shortened_words_are_prefixes() {
        let dataset = random_walks(3, 4, 48);
        let boss = BossBuilder::new(&dataset)
            .window_size(16)
            .word_length(8)
            .numerosity_reduction(false)
            .build()
            .unwrap();
        let short = boss.shorten(4).unwrap();

        for (long_bag, short_bag) in boss.bags().iter().zip(short.bags()) {
            assert_eq!(long_bag.total(), short_bag.total());
            assert_eq!(long_bag.label(), short_bag.label());
            for (word, _) in short_bag {
                assert_eq!(word.len(), 4);
            }
            // Each short word count is the sum over its extensions.
            for (short_word, &count) in short_bag {
                let sum = long_bag.iter()
                    .filter(|(w, _)| w.truncate(4) == *short_word)
                    .map(|(_, &c)| c)
                    .sum::<u32>();
                assert_eq!(sum, count);
            }
        }
    }

    #[test]
    fn shortened_model_matches_a_fresh_transform() {
        let dataset = random_walks(4, 6, 50);
        let boss = BossBuilder::new(&dataset)
            .window_size(15)
            .word_length(12)
            .build()
            .unwrap()
            .shorten(6)
            .unwrap();

        for (i, bag) in boss.bags().iter().enumerate() {
            let fresh = boss.transform(&dataset[i]).unwrap();
            let fresh = fresh.with_label(bag.label());
            assert_eq!(&fresh, bag);
        }
    }

    #[test]
    fn invalid_lengths_are_rejected() {
        let dataset = random_walks(5, 4, 32);
        let boss = BossBuilder::new(&dataset)
            .window_size(10)
            .word_length(8)
            .build()
            .unwrap();

        match boss.shorten(10) {
            Err(BossError::InvalidWordLength { current, requested }) => {
                assert_eq!(current, 8);
                assert_eq!(requested, 10);
            },
            _ => panic!("Expected InvalidWordLength"),
        }
        assert!(boss.shorten(1).is_err());
        assert!(boss.shorten(0).is_err());
    }
}
