// crates/iblt-core/src/proptests.rs
//
// Property tests for the table, peeling and difference decoding.

use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn bytes_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> + Clone {
    // Zero bytes are deliberately included, also in trailing position.
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Few distinct keys against thousands of cells per slice, so a decode
/// failure is vanishingly unlikely.
fn light_load() -> impl Strategy<Value = BTreeMap<Vec<u8>, Vec<u8>>> {
    prop::collection::btree_map(bytes_strategy(24), bytes_strategy(24), 0..8)
}

fn strip_trailing_zeros(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>, Vec<u8>),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let pair = (bytes_strategy(6), bytes_strategy(6));
    let op = prop_oneof![
        3 => pair.clone().prop_map(|(k, v)| Op::Insert(k, v)),
        1 => pair.prop_map(|(k, v)| Op::Delete(k, v)),
    ];
    prop::collection::vec(op, 0..=64)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_insert_delete_is_inverse(
        resident in light_load(),
        key in bytes_strategy(32),
        value in bytes_strategy(32),
        seed in any::<u32>(),
    ) {
        let mut iblt = Iblt::new(60, 3, seed).unwrap();
        for (k, v) in &resident {
            iblt.insert(k, v);
        }
        let before: Vec<Cell> = iblt.cells().cloned().collect();

        iblt.insert(&key, &value);
        iblt.delete(&key, &value);

        for (old, new) in before.iter().zip(iblt.cells()) {
            prop_assert_eq!(old.count(), new.count());
            prop_assert_eq!(strip_trailing_zeros(old.key_sum()), strip_trailing_zeros(new.key_sum()));
            prop_assert_eq!(strip_trailing_zeros(old.value_sum()), strip_trailing_zeros(new.value_sum()));
        }
    }

    #[test]
    fn prop_single_pair_lookup(
        key in bytes_strategy(32),
        value in bytes_strategy(32),
        hashes in 1usize..=6,
        extra in 0usize..200,
        seed in any::<u32>(),
    ) {
        let mut iblt = Iblt::new(hashes + extra, hashes, seed).unwrap();
        iblt.insert(&key, &value);
        prop_assert_eq!(iblt.get(&key), Some(value));
    }

    #[test]
    fn prop_empty_table_finds_nothing(key in bytes_strategy(32), seed in any::<u32>()) {
        let iblt = Iblt::new(64, 4, seed).unwrap();
        prop_assert_eq!(iblt.get(&key), None);
    }

    #[test]
    fn prop_full_recovery_under_light_load(pairs in light_load(), seed in any::<u32>()) {
        let mut iblt = Iblt::new(6000, 3, seed).unwrap();
        for (k, v) in &pairs {
            iblt.insert(k, v);
        }
        for (k, v) in &pairs {
            let got = iblt.get(k);
            prop_assert_eq!(got.as_ref(), Some(v));
        }

        let peeled = iblt.peel();
        prop_assert!(peeled.is_complete());
        prop_assert_eq!(peeled.pairs, pairs);
        prop_assert!(iblt.cells().all(|c| c.count() == 0));
    }

    #[test]
    fn prop_peel_order_independent(
        pairs in prop::collection::btree_map(bytes_strategy(8), bytes_strategy(8), 0..40),
        seed in any::<u32>(),
    ) {
        // Small table: decodes are often partial, which must not depend on
        // scan order either.
        let mut forward = Iblt::new(36, 3, seed).unwrap();
        for (k, v) in &pairs {
            forward.insert(k, v);
        }
        let mut backward = forward.clone();
        let grid = forward.hashes() * forward.slice_len();

        let a: BTreeMap<_, _> = forward
            .peel_cells(peel::PeelMode::Positive, 0..grid)
            .into_iter()
            .map(|r| (r.key, r.value))
            .collect();
        let b: BTreeMap<_, _> = backward
            .peel_cells(peel::PeelMode::Positive, (0..grid).rev())
            .into_iter()
            .map(|r| (r.key, r.value))
            .collect();

        prop_assert_eq!(a, b);
        prop_assert_eq!(forward.residual_cells(), backward.residual_cells());
    }

    #[test]
    fn prop_peel_removes_exactly_what_it_reports_under_misuse(
        ops in ops_strategy(),
        seed in any::<u32>(),
    ) {
        let mut iblt = Iblt::new(12, 3, seed).unwrap();
        for op in ops {
            match op {
                Op::Insert(k, v) => iblt.insert(&k, &v),
                Op::Delete(k, v) => iblt.delete(&k, &v),
            }
        }
        let original: Vec<Cell> = iblt.cells().cloned().collect();
        let grid = iblt.hashes() * iblt.slice_len();

        for mode in [peel::PeelMode::Positive, peel::PeelMode::Signed] {
            let mut peeled = iblt.clone();
            let recovered = peeled.peel_cells(mode, 0..grid);
            let budget: u64 = original.iter().map(|c| c.count().unsigned_abs()).sum();
            prop_assert!(recovered.len() as u64 <= budget);

            // Putting every reported pair back restores the table.
            for item in &recovered {
                prop_assert!(mode == peel::PeelMode::Signed || item.sign == 1);
                peeled.apply(item.sign, &item.key, &item.value);
            }
            for (old, new) in original.iter().zip(peeled.cells()) {
                prop_assert_eq!(old.count(), new.count());
                prop_assert_eq!(old.key_len(), new.key_len());
                prop_assert_eq!(strip_trailing_zeros(old.key_sum()), strip_trailing_zeros(new.key_sum()));
                prop_assert_eq!(strip_trailing_zeros(old.value_sum()), strip_trailing_zeros(new.value_sum()));
            }
        }
    }

    #[test]
    fn prop_peel_reports_only_resident_pairs(
        inserts in prop::collection::vec((bytes_strategy(6), bytes_strategy(6)), 0..48),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..24),
        seed in any::<u32>(),
    ) {
        // Small table, so partial decodes are common.
        let mut iblt = Iblt::new(30, 3, seed).unwrap();
        let mut resident = inserts;
        for (k, v) in &resident {
            iblt.insert(k, v);
        }
        for idx in removals {
            if resident.is_empty() {
                break;
            }
            let (k, v) = resident.remove(idx.index(resident.len()));
            iblt.delete(&k, &v);
        }

        let peeled = iblt.peel();
        for (k, v) in &peeled.pairs {
            prop_assert!(
                resident.iter().any(|(rk, rv)| rk == k && rv == v),
                "recovered a pair that is not in the table"
            );
        }
        if peeled.is_complete() {
            resident.sort();
            let recovered: Vec<(Vec<u8>, Vec<u8>)> = peeled.pairs.into_iter().collect();
            prop_assert_eq!(recovered, resident);
        }
    }

    #[test]
    fn prop_fixed_length_keys_recover_with_power_of_two_slices(
        keys in prop::collection::btree_set(prop::array::uniform8(any::<u8>()), 20),
        seed in any::<u32>(),
    ) {
        let mut iblt = Iblt::new(3 * 1024, 3, seed).unwrap();
        for key in &keys {
            iblt.insert(key, key);
        }
        let peeled = iblt.peel();
        prop_assert!(peeled.is_complete());
        prop_assert_eq!(peeled.pairs.len(), keys.len());
    }

    #[test]
    fn prop_difference_recovers_both_sides(
        shared in prop::collection::btree_map(bytes_strategy(16), bytes_strategy(16), 0..50),
        local_only in light_load(),
        remote_only in light_load(),
        seed in any::<u32>(),
    ) {
        let local_only: BTreeMap<_, _> = local_only
            .into_iter()
            .filter(|(k, _)| !shared.contains_key(k))
            .collect();
        let remote_only: BTreeMap<_, _> = remote_only
            .into_iter()
            .filter(|(k, _)| !shared.contains_key(k) && !local_only.contains_key(k))
            .collect();

        let mut local = Iblt::new(6000, 3, seed).unwrap();
        let mut remote = Iblt::new(6000, 3, seed).unwrap();
        for (k, v) in &shared {
            local.insert(k, v);
            remote.insert(k, v);
        }
        for (k, v) in &local_only {
            local.insert(k, v);
        }
        for (k, v) in &remote_only {
            remote.insert(k, v);
        }

        let diff = local.subtract(&remote).unwrap().decode_difference();
        prop_assert!(diff.is_complete());
        prop_assert_eq!(diff.local_only, local_only);
        prop_assert_eq!(diff.remote_only, remote_only);
    }
}
