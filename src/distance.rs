//! BOSS distance between bags and the 1-nearest-neighbor search over bags.
//!
//! The distance is **not** symmetric:
//! only the words of the query bag are visited,
//! so words that appear only in the reference bag contribute nothing.
use crate::Bag;


/// Computes the BOSS distance `d(a, b)`:
/// the sum over the words `w` of `a` of `(a[w] - b[w])^2`.
#[inline]
pub fn boss_distance(a: &Bag, b: &Bag) -> f64 {
    boss_distance_bounded(a, b, f64::INFINITY)
}


/// Same as [`boss_distance`], but returns `f64::INFINITY`
/// as soon as the partial sum exceeds `best_so_far`.
#[inline]
pub fn boss_distance_bounded(a: &Bag, b: &Bag, best_so_far: f64) -> f64 {
    let mut dist = 0_i64;
    for (word, &count_a) in a {
        let diff = count_a as i64 - b.count(word) as i64;
        dist += diff * diff;

        if dist as f64 > best_so_far {
            return f64::INFINITY;
        }
    }
    dist as f64
}


/// The result of a nearest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index of the nearest reference bag.
    pub index: usize,
    /// Distance from the query to that bag.
    pub distance: f64,
    /// Label of that bag.
    pub label: Option<usize>,
}


/// Finds the bag in `references` nearest to `query`.
/// References are scanned in order and
/// the first bag wins on ties.
/// The reference at index `skip` (if any) is ignored,
/// which gives the leave-one-out search.
/// Returns `None` if there is no candidate reference.
pub fn nearest_neighbor(
    query: &Bag,
    references: &[Bag],
    skip: Option<usize>,
) -> Option<Neighbor>
{
    let mut best: Option<Neighbor> = None;
    let mut best_dist = f64::INFINITY;

    for (index, reference) in references.iter().enumerate() {
        if skip == Some(index) { continue; }

        let distance = boss_distance_bounded(query, reference, best_dist);
        if distance < best_dist || best.is_none() {
            best_dist = distance;
            best = Some(Neighbor { index, distance, label: reference.label() });
        }
    }
    best
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::SfaWord;

    fn word(symbols: &[usize]) -> SfaWord {
        SfaWord::from_symbols(symbols, 4)
    }

    fn bag(items: &[(SfaWord, usize)], label: usize) -> Bag {
        let words = items.iter()
            .flat_map(|(w, n)| std::iter::repeat(*w).take(*n));
        Bag::from_words(words, false).with_label(Some(label))
    }

    #[test]
    fn distance_to_itself_is_zero() {
        let a = bag(&[(word(&[0, 1]), 3), (word(&[2, 2]), 1)], 0);
        assert_eq!(boss_distance(&a, &a), 0.0);
    }

    #[test]
    fn distance_is_not_symmetric() {
        let (w1, w2) = (word(&[0, 1]), word(&[3, 3]));
        let a = bag(&[(w1, 2)], 0);
        let b = bag(&[(w1, 1), (w2, 3)], 1);
        assert_eq!(boss_distance(&a, &b), 1.0);
        assert_eq!(boss_distance(&b, &a), 10.0);
    }

    #[test]
    fn early_abandon() {
        let (w1, w2) = (word(&[0, 1]), word(&[3, 3]));
        let b = bag(&[(w1, 1), (w2, 3)], 1);
        let empty = Bag::new();
        assert_eq!(boss_distance_bounded(&b, &empty, 5.0), f64::INFINITY);
        assert_eq!(boss_distance_bounded(&b, &empty, 10.0), 10.0);
    }

    #[test]
    fn first_neighbor_wins_ties() {
        let w = word(&[1, 1]);
        let query = bag(&[(w, 2)], 0);
        let references = vec![
            bag(&[(w, 5)], 0),
            bag(&[(w, 1)], 1),
            bag(&[(w, 3)], 2),
        ];
        let nn = nearest_neighbor(&query, &references, None).unwrap();
        assert_eq!(nn.index, 1);
        assert_eq!(nn.label, Some(1));
        assert_eq!(nn.distance, 1.0);
    }

    #[test]
    fn leave_one_out_skips_itself() {
        let w = word(&[1, 1]);
        let references = vec![
            bag(&[(w, 2)], 0),
            bag(&[(w, 4)], 1),
            bag(&[(w, 2)], 0),
        ];
        let nn = nearest_neighbor(&references[0], &references, Some(0))
            .unwrap();
        assert_eq!(nn.index, 2);

        let single = vec![bag(&[(w, 1)], 0)];
        assert!(nearest_neighbor(&single[0], &single, Some(0)).is_none());
    }
}
