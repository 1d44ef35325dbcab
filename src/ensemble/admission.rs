//! The admission and eviction policy of the ensemble.


/// Anything that carries a training accuracy.
pub(crate) trait Scored {
    fn accuracy(&self) -> f64;
}


impl Scored for f64 {
    fn accuracy(&self) -> f64 {
        *self
    }
}


/// State of the anytime admission policy.
///
/// A candidate is admitted only if its accuracy is at least
/// `max_acc * correct_threshold`,
/// and, once the ensemble is full, only if it beats the worst member.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AdmissionState {
    // Best accuracy admitted so far, `-1` before the first admission.
    max_acc: f64,
    // Accuracy of the worst member, `-1` while the ensemble is empty.
    min_max_acc: f64,
    correct_threshold: f64,
    max_ensemble_size: usize,
}


impl AdmissionState {
    pub(crate) fn new(correct_threshold: f64, max_ensemble_size: usize)
        -> Self
    {
        Self {
            max_acc: -1.0,
            min_max_acc: -1.0,
            correct_threshold,
            max_ensemble_size,
        }
    }


    /// Returns `true` if a candidate with `accuracy`
    /// makes it into an ensemble of `size` members.
    pub(crate) fn admits(&self, accuracy: f64, size: usize) -> bool {
        accuracy >= self.max_acc * self.correct_threshold
            && (size < self.max_ensemble_size || accuracy > self.min_max_acc)
    }


    /// Append `candidate` to `members` and evict the members
    /// that no longer satisfy the policy.
    /// Returns the evicted members in eviction order.
    ///
    /// The caller must have checked [`AdmissionState::admits`].
    pub(crate) fn admit<T: Scored>(&mut self, members: &mut Vec<T>, candidate: T)
        -> Vec<T>
    {
        let accuracy = candidate.accuracy();
        members.push(candidate);

        let mut evicted = Vec::new();
        if accuracy > self.max_acc {
            self.max_acc = accuracy;
            let bound = self.max_acc * self.correct_threshold;

            let mut i = 0;
            while i < members.len() {
                if members[i].accuracy() < bound {
                    evicted.push(members.remove(i));
                } else {
                    i += 1;
                }
            }
        }

        while members.len() > self.max_ensemble_size {
            let worst = worst_index(members);
            evicted.push(members.remove(worst));
        }

        self.min_max_acc = if members.is_empty() {
            -1.0
        } else {
            members[worst_index(members)].accuracy()
        };
        evicted
    }
}


/// Index of the least accurate member, the first one on ties.
fn worst_index<T: Scored>(members: &[T]) -> usize {
    let mut worst = 0;
    for (i, member) in members.iter().enumerate().skip(1) {
        if member.accuracy() < members[worst].accuracy() {
            worst = i;
        }
    }
    worst
}
