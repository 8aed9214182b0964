//! Sorted, de-duplicated coordinate axis used for rank compression.
//!
//! Keys are quantized coordinates (see `PolygonCfg::key_of`). The rank of a key
//! is its position in the sorted vector, which is the "indexed" coordinate.
//!
//! Index shift: inserting a key moves every key sorted after it up by one
//! rank. Keys sorted before it keep their rank. Anything holding ranks across
//! an insertion must recompute them (`Polygon` rebuilds its edges).

/// Sorted vector of distinct keys. Insertion is O(n).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Axis {
    keys: Vec<i64>,
}

impl Axis {
    /// Build from arbitrary keys (sorted and de-duplicated here).
    pub fn from_keys<I: IntoIterator<Item = i64>>(keys: I) -> Self {
        let mut keys: Vec<i64> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self { keys }
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
    pub fn keys(&self) -> &[i64] {
        &self.keys
    }
    #[inline]
    pub fn key(&self, rank: usize) -> Option<i64> {
        self.keys.get(rank).copied()
    }

    /// Rank of `key` if present.
    #[inline]
    pub fn rank(&self, key: i64) -> Option<usize> {
        self.keys.binary_search(&key).ok()
    }

    /// Rank of `key` if present, else the rank it would get on insertion.
    #[inline]
    pub fn lower_bound(&self, key: i64) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    /// Rank of `key`, inserting it at its sorted position if absent.
    /// The flag reports whether the axis grew.
    pub fn find_or_insert(&mut self, key: i64) -> (usize, bool) {
        match self.keys.binary_search(&key) {
            Ok(i) => (i, false),
            Err(i) => {
                self.keys.insert(i, key);
                (i, true)
            }
        }
    }

    /// Bulk insert. Merges once instead of repeated single insertions;
    /// returns whether the axis grew.
    pub fn merge<I: IntoIterator<Item = i64>>(&mut self, keys: I) -> bool {
        let mut fresh: Vec<i64> = keys
            .into_iter()
            .filter(|k| self.keys.binary_search(k).is_err())
            .collect();
        if fresh.is_empty() {
            return false;
        }
        fresh.sort_unstable();
        fresh.dedup();
        let mut out = Vec::with_capacity(self.keys.len() + fresh.len());
        let (mut i, mut j) = (0usize, 0usize);
        while i < self.keys.len() && j < fresh.len() {
            if self.keys[i] < fresh[j] {
                out.push(self.keys[i]);
                i += 1;
            } else {
                out.push(fresh[j]);
                j += 1;
            }
        }
        out.extend_from_slice(&self.keys[i..]);
        out.extend_from_slice(&fresh[j..]);
        debug_assert!(out.windows(2).all(|w| w[0] < w[1]), "axis not strictly sorted");
        self.keys = out;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_keys_sorts_and_dedups() {
        let a = Axis::from_keys([5, 1, 3, 1, 5]);
        assert_eq!(a.keys(), &[1, 3, 5]);
        assert_eq!(a.rank(3), Some(1));
        assert_eq!(a.rank(4), None);
    }

    #[test]
    fn find_or_insert_reports_growth() {
        let mut a = Axis::from_keys([0, 10]);
        assert_eq!(a.find_or_insert(10), (1, false));
        assert_eq!(a.find_or_insert(5), (1, true));
        assert_eq!(a.keys(), &[0, 5, 10]);
        assert_eq!(a.rank(10), Some(2));
    }

    #[test]
    fn merge_noop_when_nothing_new() {
        let mut a = Axis::from_keys([0, 10]);
        assert!(!a.merge([0, 10, 0]));
        assert!(a.merge([7, 3, 7, 20]));
        assert_eq!(a.keys(), &[0, 3, 7, 10, 20]);
    }

    proptest! {
        #[test]
        fn insertion_keeps_lower_ranks(
            base in proptest::collection::vec(-1000i64..1000, 1..40),
            extra in proptest::collection::vec(-1000i64..1000, 0..20),
            probe in -1000i64..1000,
        ) {
            let mut a = Axis::from_keys(base);
            a.merge(extra);
            let before: Vec<(i64, usize)> =
                a.keys().iter().enumerate().map(|(r, &k)| (k, r)).collect();
            let (r, _) = a.find_or_insert(probe);
            prop_assert_eq!(a.key(r), Some(probe));
            for (k, old) in before {
                let now = a.rank(k).unwrap();
                if k < probe {
                    prop_assert_eq!(now, old);
                } else {
                    prop_assert!(now == old || now == old + 1);
                }
            }
        }
    }
}
