use miniboss::prelude::*;

use std::fs;
use std::path::PathBuf;


fn wave(a: f64, b: f64, length: usize) -> Vec<f64> {
    (0..length).map(|t| if t % 2 == 0 { a } else { b })
        .collect()
}


/// Two channels of alternating waves.
/// Both channels separate the classes by their level,
/// and the second channel is shorter.
fn two_channels() -> MultivariateDataset {
    let instance = |low: f64, flip: bool| {
        let (a, b) = if flip { (low + 1.0, low) } else { (low, low + 1.0) };
        vec![wave(a, b, 16), wave(2.0 * a, 2.0 * b, 12)]
    };
    let series = vec![
        instance(1.0, false), instance(1.0, true),
        instance(10.0, false), instance(10.0, true),
    ];
    MultivariateDataset::new(series, vec![0, 0, 1, 1]).unwrap()
}


fn search(dataset: &MultivariateDataset) -> MultivariateSearch<'_> {
    MultivariateSearch::init(dataset)
        .configure(|search| {
            search.window_range(8, 8)
                .word_lengths(&[4, 2])
                .normalize_options(&[false])
        })
}


fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("miniboss_multivariate_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}


/// Tests for `MultivariateBoss`.
#[cfg(test)]
pub mod multivariate_tests {
    use super::*;

    #[test]
    fn one_ensemble_per_channel() {
        let dataset = two_channels();
        let boss = search(&dataset).run().unwrap();

        assert_eq!(boss.n_channels(), 2);
        assert_eq!(boss.n_classes(), 2);
        for (channel, ensemble) in boss.channels().iter().enumerate() {
            assert!(!ensemble.is_empty(), "channel {channel} is empty");
            assert_eq!(ensemble.train_accuracy_estimate(), 1.0);
        }
        assert_eq!(boss.train_accuracy_estimate(), 1.0);

        assert_eq!(boss.classify_all(&dataset).unwrap(), vec![0, 0, 1, 1]);
        assert_eq!(boss.accuracy(&dataset).unwrap(), 1.0);

        let query = dataset.instance(3);
        let dist = boss.distribution(&query).unwrap();
        assert!((dist.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(dist, vec![0.0, 1.0]);
    }

    #[test]
    fn queries_need_every_channel() {
        let dataset = two_channels();
        let boss = search(&dataset).run().unwrap();

        let query = vec![wave(1.0, 2.0, 16)];
        assert!(boss.classify(&query).is_err());
    }

    #[test]
    fn invalid_channel_settings_are_rejected() {
        let dataset = two_channels();
        // The second channel is shorter than the window range.
        let mut search = MultivariateSearch::init(&dataset)
            .configure(|search| search.window_range(14, 16));
        assert!(search.run().is_err());
    }

    #[test]
    fn channels_are_stored_apart() {
        let dir = scratch_dir("store");
        let dataset = two_channels();
        let mut search = search(&dataset)
            .configure(|search| {
                search.serialise(SerialiseOption::StoreLoad)
                    .storage_dir(&dir)
            });
        let boss = search.run().unwrap();

        for (channel, ensemble) in boss.channels().iter().enumerate() {
            let expected = dir.join(format!("channel_{channel}"));
            assert_eq!(ensemble.store().dir(), expected.as_path());
            for member in ensemble.members() {
                assert!(!member.is_resident());
                assert!(ensemble.store().path_of(member.id()).exists());
            }
        }
        assert_eq!(boss.classify_all(&dataset).unwrap(), vec![0, 0, 1, 1]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn fit_with_defaults() {
        let dataset = two_channels();
        let boss = MultivariateBoss::fit(&dataset).unwrap();
        assert_eq!(boss.n_channels(), 2);
        assert_eq!(boss.train_predictions().len(), 4);
    }
}
