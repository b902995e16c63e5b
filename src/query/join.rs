//! Equi-join and range-join primitives over materialized row sequences.
//!
//! Both joins are inner: a left row with no partner contributes nothing to
//! the output, never a null-padded pair. Empty inputs yield empty outputs.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Hash equi-join.
///
/// The right side is indexed by extracted key, then the left side is walked
/// in input order; for each left row the matching pairs are emitted in
/// right-input order. Key equality is value equality.
pub fn equi_join<L, R, K, KL, KR>(left: &[L], right: &[R], left_key: KL, right_key: KR) -> Vec<(L, R)>
where
    L: Clone,
    R: Clone,
    K: Eq + Hash,
    KL: Fn(&L) -> K,
    KR: Fn(&R) -> K,
{
    let mut build: FxHashMap<K, Vec<usize>> = FxHashMap::default();
    for (idx, row) in right.iter().enumerate() {
        build.entry(right_key(row)).or_default().push(idx);
    }

    let mut out = Vec::new();
    for l in left {
        if let Some(matches) = build.get(&left_key(l)) {
            for &idx in matches {
                out.push((l.clone(), right[idx].clone()));
            }
        }
    }
    out
}

/// Pairwise range join.
///
/// Every (left, right) pair is tested against the predicate; cost is
/// |left| × |right| with no index, consistent with small static datasets.
/// A value falling inside several ranges emits all of its pairs.
pub fn range_join<L, R, P>(left: &[L], right: &[R], pred: P) -> Vec<(L, R)>
where
    L: Clone,
    R: Clone,
    P: Fn(&L, &R) -> bool,
{
    let mut out = Vec::new();
    for l in left {
        for r in right {
            if pred(l, r) {
                out.push((l.clone(), r.clone()));
            }
        }
    }
    out
}
