use crate::{BossError, Dataset, Result};


/// Struct `MultivariateDataset` holds a batch of labeled series
/// with several channels each.
/// Every channel is stored as its own [`Dataset`]
/// sharing the labels of the batch.
#[derive(Debug, Clone)]
pub struct MultivariateDataset {
    channels: Vec<Dataset>,
}


impl MultivariateDataset {
    /// Construct a new `MultivariateDataset`.
    /// `series[i][c]` is channel `c` of the `i`-th instance.
    /// Every instance must have the same number of channels,
    /// and a channel must have the same length over all instances.
    pub fn new(series: Vec<Vec<Vec<f64>>>, labels: Vec<usize>) -> Result<Self> {
        let n_channels = series.first()
            .map_or(0, |instance| instance.len());
        if n_channels == 0 {
            return Err(BossError::invalid_dataset(
                "the dataset has no series or no channel"
            ));
        }
        if let Some(i) = series.iter().position(|s| s.len() != n_channels) {
            return Err(BossError::invalid_dataset(format!(
                "instance {i} has {} channels, expected {n_channels}",
                series[i].len(),
            )));
        }

        let mut per_channel = vec![Vec::with_capacity(series.len()); n_channels];
        for instance in series {
            for (c, channel) in instance.into_iter().enumerate() {
                per_channel[c].push(channel);
            }
        }

        let channels = per_channel.into_iter()
            .map(|channel| Dataset::new(channel, labels.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { channels })
    }


    /// Construct a `MultivariateDataset` from one dataset per channel.
    /// Every channel must carry the same labels.
    pub fn from_channels(channels: Vec<Dataset>) -> Result<Self> {
        let Some(first) = channels.first() else {
            return Err(BossError::invalid_dataset("the dataset has no channel"));
        };
        if let Some(c) = channels.iter().position(|ch| ch.labels() != first.labels()) {
            return Err(BossError::invalid_dataset(format!(
                "channel {c} does not have the labels of channel 0"
            )));
        }
        Ok(Self { channels })
    }


    /// Returns the pair of the number of instances and of channels.
    pub fn shape(&self) -> (usize, usize) {
        (self.channels[0].shape().0, self.channels.len())
    }


    /// Returns the number of channels.
    pub fn n_channels(&self) -> usize {
        self.channels.len()
    }


    /// Returns the number of classes, `max(label) + 1`.
    pub fn n_classes(&self) -> usize {
        self.channels[0].n_classes()
    }


    /// Returns the labels of all instances.
    pub fn labels(&self) -> &[usize] {
        self.channels[0].labels()
    }


    /// Returns the `c`-th channel.
    pub fn channel(&self, c: usize) -> &Dataset {
        &self.channels[c]
    }


    /// Returns all channels.
    pub fn channels(&self) -> &[Dataset] {
        &self.channels[..]
    }


    /// Returns the channels of the `idx`-th instance.
    pub fn instance(&self, idx: usize) -> Vec<&[f64]> {
        self.channels.iter()
            .map(|channel| channel.series(idx))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_split() {
        let series = vec![
            vec![vec![1.0, 2.0, 3.0], vec![10.0, 20.0]],
            vec![vec![4.0, 5.0, 6.0], vec![40.0, 50.0]],
        ];
        let dataset = MultivariateDataset::new(series, vec![1, 0]).unwrap();
        assert_eq!(dataset.shape(), (2, 2));
        assert_eq!(dataset.n_classes(), 2);
        assert_eq!(dataset.channel(0).shape(), (2, 3));
        assert_eq!(dataset.channel(1).series(1), &[40.0, 50.0]);
        assert_eq!(dataset.instance(0), vec![&[1.0, 2.0, 3.0][..], &[10.0, 20.0][..]]);
        assert_eq!(dataset.labels(), &[1, 0]);
    }

    #[test]
    fn ragged_channels_are_rejected() {
        let series = vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![1.0, 2.0]],
        ];
        let result = MultivariateDataset::new(series, vec![0, 1]);
        assert!(matches!(result, Err(BossError::InvalidDataset(_))));

        let result = MultivariateDataset::new(Vec::new(), Vec::new());
        assert!(matches!(result, Err(BossError::InvalidDataset(_))));
    }

    #[test]
    fn channel_labels_must_agree() {
        let a = Dataset::new(vec![vec![1.0], vec![2.0]], vec![0, 1]).unwrap();
        let b = Dataset::new(vec![vec![1.0], vec![2.0]], vec![1, 0]).unwrap();
        assert!(MultivariateDataset::from_channels(vec![a.clone(), a.clone()]).is_ok());
        assert!(MultivariateDataset::from_channels(vec![a, b]).is_err());
        assert!(MultivariateDataset::from_channels(Vec::new()).is_err());
    }
}
