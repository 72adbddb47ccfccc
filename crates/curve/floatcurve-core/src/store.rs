//! Time-ordered keyframe storage.
//!
//! Model:
//! - Keyframes are kept sorted by time.
//! - Two keyframes never sit within `TIME_EPSILON` of each other: adding a key
//!   near an existing one replaces it in place (last writer wins).
//! - There is no single-key removal; callers rebuild the store instead.

use serde::{Deserialize, Serialize};

use crate::constants::TIME_EPSILON;
use crate::error::CurveError;
use crate::keyframe::Keyframe;
use crate::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeStore {
    keys: Vec<Keyframe>,
}

impl KeyframeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store by adding each keyframe in turn. Input order does not matter;
    /// near-duplicate times collapse to the later entry.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Keyframe>,
    {
        let mut store = Self::new();
        for key in keys {
            store.add_key(key);
        }
        store
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keys.get(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&Keyframe> {
        self.keys.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Keyframe> {
        self.keys.last()
    }

    /// `(first.time, last.time)`, or `None` for an empty store.
    pub fn time_bounds(&self) -> Option<(f32, f32)> {
        match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => Some((first.time(), last.time())),
            _ => None,
        }
    }

    pub fn into_keys(self) -> Vec<Keyframe> {
        self.keys
    }

    /// Insert `key` in time order, or overwrite the entry within `TIME_EPSILON` of it.
    /// Returns the index the key now occupies.
    ///
    /// Up to two existing keys can sit within `TIME_EPSILON` of the new time (one
    /// on each side). The first takes the new key and the rest of the run is
    /// dropped, so the store never holds two keys that close.
    pub fn add_key(&mut self, key: Keyframe) -> usize {
        let near = |k: &Keyframe| (k.time() - key.time()).abs() < TIME_EPSILON;

        // Times are sorted, so the keys close to `key` form one contiguous run.
        let first_candidate = self
            .keys
            .partition_point(|k| k.time() < key.time() && !near(k));
        if self.keys.get(first_candidate).is_some_and(near) {
            let run_end = first_candidate
                + 1
                + self.keys[first_candidate + 1..]
                    .iter()
                    .take_while(|&k| near(k))
                    .count();
            self.keys[first_candidate] = key;
            self.keys.drain(first_candidate + 1..run_end);
            return first_candidate;
        }

        // Upper bound: first index whose time is strictly greater.
        let insert_at = self.keys.partition_point(|k| k.time() <= key.time());
        self.keys.insert(insert_at, key);
        insert_at
    }

    /// Smallest `i` with `time <= keys[i + 1].time`.
    ///
    /// Precondition (upheld by the evaluator): at least two keys and
    /// `keys[0].time <= time <= keys[last].time`. Outside it the result is
    /// clamped to a valid segment index.
    pub fn find_segment_index(&self, time: f32) -> usize {
        let segments = self.keys.len().saturating_sub(1);
        if segments == 0 {
            return 0;
        }
        self.keys[1..]
            .partition_point(|k| k.time() < time)
            .min(segments - 1)
    }

    /// Overwrite the keyframe at `index` without disturbing the ordering.
    ///
    /// The replacement must stay strictly between its neighbours (more than
    /// `TIME_EPSILON` from each); anything else is rejected untouched.
    pub fn replace(&mut self, index: usize, key: Keyframe) -> Result<()> {
        let len = self.keys.len();
        if index >= len {
            return Err(CurveError::IndexOutOfRange { index, len });
        }
        let fits_left = index == 0 || key.time() - self.keys[index - 1].time() >= TIME_EPSILON;
        let fits_right =
            index + 1 == len || self.keys[index + 1].time() - key.time() >= TIME_EPSILON;
        if !(fits_left && fits_right) {
            return Err(CurveError::invalid_state(format!(
                "replacement time {} would leave slot {index}",
                key.time()
            )));
        }
        self.keys[index] = key;
        Ok(())
    }
}

impl From<Vec<Keyframe>> for KeyframeStore {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<KeyframeStore> for Vec<Keyframe> {
    fn from(store: KeyframeStore) -> Self {
        store.keys
    }
}

impl FromIterator<Keyframe> for KeyframeStore {
    fn from_iter<I: IntoIterator<Item = Keyframe>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(t: f32, v: f32) -> Keyframe {
        Keyframe::flat(t, v).unwrap()
    }

    fn times(store: &KeyframeStore) -> Vec<f32> {
        store.keys().iter().map(|k| k.time()).collect()
    }

    #[test]
    fn inserts_keys_sorted() {
        let mut store = KeyframeStore::new();
        assert_eq!(store.add_key(k(5.0, 0.0)), 0);
        assert_eq!(store.add_key(k(1.0, 0.0)), 0);
        assert_eq!(store.add_key(k(9.0, 0.0)), 2);
        assert_eq!(store.add_key(k(3.0, 0.0)), 1);
        assert_eq!(times(&store), vec![1.0, 3.0, 5.0, 9.0]);
    }

    #[test]
    fn near_duplicate_replaces_in_place() {
        let mut store = KeyframeStore::new();
        store.add_key(k(0.0, 0.0));
        store.add_key(k(5.0, 1.0));
        store.add_key(k(10.0, 2.0));
        let idx = store.add_key(k(5.00005, 7.0));
        assert_eq!(idx, 1);
        assert_eq!(store.len(), 3);
        assert_eq!(store.keys()[1].value(), 7.0);
        assert_eq!(store.keys()[1].time(), 5.00005);

        let idx = store.add_key(k(4.99996, 8.0));
        assert_eq!(idx, 1);
        assert_eq!(store.len(), 3);
        assert_eq!(store.keys()[1].value(), 8.0);
    }

    #[test]
    fn replacement_collapses_both_near_neighbours() {
        let mut store = KeyframeStore::new();
        store.add_key(k(0.0, 0.0));
        store.add_key(k(1.0, 1.0));
        store.add_key(k(1.00011, 2.0));
        store.add_key(k(5.0, 0.0));
        assert_eq!(store.len(), 4);

        // Within epsilon of both 1.0 and 1.00011.
        let idx = store.add_key(k(1.00009, 3.0));
        assert_eq!(idx, 1);
        assert_eq!(times(&store), vec![0.0, 1.00009, 5.0]);
        assert_eq!(store.keys()[1].value(), 3.0);

        let idx = store.add_key(k(1.00012, 4.0));
        assert_eq!(idx, 1);
        assert_eq!(times(&store), vec![0.0, 1.00012, 5.0]);
        assert_eq!(store.time_bounds(), Some((0.0, 5.0)));
    }

    #[test]
    fn keys_just_outside_epsilon_are_kept() {
        let mut store = KeyframeStore::new();
        store.add_key(k(1.0, 0.0));
        store.add_key(k(1.001, 0.0));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn find_segment_index_binary_search() {
        let store: KeyframeStore = [k(0.0, 0.0), k(1.0, 0.0), k(2.0, 0.0), k(4.0, 0.0)]
            .into_iter()
            .collect();
        assert_eq!(store.find_segment_index(0.0), 0);
        assert_eq!(store.find_segment_index(0.5), 0);
        assert_eq!(store.find_segment_index(1.0), 0);
        assert_eq!(store.find_segment_index(1.5), 1);
        assert_eq!(store.find_segment_index(2.0), 1);
        assert_eq!(store.find_segment_index(3.9), 2);
        assert_eq!(store.find_segment_index(4.0), 2);
    }

    #[test]
    fn replace_keeps_order() {
        let mut store: KeyframeStore = [k(0.0, 0.0), k(1.0, 0.0), k(2.0, 0.0)]
            .into_iter()
            .collect();
        store.replace(1, k(1.5, 3.0)).unwrap();
        assert_eq!(store.keys()[1].value(), 3.0);
        assert!(matches!(
            store.replace(1, k(2.5, 0.0)),
            Err(CurveError::InvalidState { .. })
        ));
        assert_eq!(
            store.replace(3, k(5.0, 0.0)),
            Err(CurveError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(times(&store), vec![0.0, 1.5, 2.0]);
    }

    #[test]
    fn serde_round_trip_resorts() {
        let json = r#"[{"time":2.0,"value":1.0},{"time":0.0,"value":0.0}]"#;
        let store: KeyframeStore = serde_json::from_str(json).unwrap();
        assert_eq!(times(&store), vec![0.0, 2.0]);
    }
}
