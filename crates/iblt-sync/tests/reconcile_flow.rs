// crates/iblt-sync/tests/reconcile_flow.rs
//
// End-to-end reconciliation between two peers.
//
// Each peer holds a large shared set plus a few pairs of its own. They swap
// IBLT sketches, compute the difference, and merge what they are missing;
// afterwards both hold the union.

use std::collections::BTreeMap;

use iblt_core::IbltParams;
use iblt_sync::{SetReconciler, SyncError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn shared_records() -> BTreeMap<Vec<u8>, Vec<u8>> {
    (0..1000)
        .map(|i| {
            (
                format!("record-{:04}", i).into_bytes(),
                format!("payload {}", i).into_bytes(),
            )
        })
        .collect()
}

fn peers(params: IbltParams) -> (SetReconciler, SetReconciler) {
    let mut alice = SetReconciler::with_local_pairs(params, shared_records());
    let mut bob = SetReconciler::with_local_pairs(params, shared_records());
    for i in 0..8 {
        alice.insert(format!("alice-{}", i).into_bytes(), b"from alice".to_vec());
    }
    for i in 0..5u8 {
        // Values with embedded and trailing zero bytes.
        bob.insert(format!("bob-{}", i).into_bytes(), vec![0, i, 0]);
    }
    (alice, bob)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn two_peers_converge_to_the_union() {
    let params = IbltParams::new(200, 4, 42);
    let (mut alice, mut bob) = peers(params);

    let alice_sketch = alice.sketch().expect("alice sketch");
    let bob_sketch = bob.sketch().expect("bob sketch");

    let at_alice = alice.compute_diff(&bob_sketch).expect("alice decodes");
    assert_eq!(at_alice.local_only.len(), 8);
    assert_eq!(at_alice.remote_only.len(), 5);

    let at_bob = bob.compute_diff(&alice_sketch).expect("bob decodes");
    assert_eq!(at_bob.local_only, at_alice.remote_only);
    assert_eq!(at_bob.remote_only, at_alice.local_only);

    assert_eq!(alice.merge_remote_only(&at_alice), 5);
    assert_eq!(bob.merge_remote_only(&at_bob), 8);
    assert_eq!(alice.local_pairs(), bob.local_pairs());
    assert_eq!(alice.local_pairs().len(), 1013);

    let settled = alice
        .compute_diff(&bob.sketch().expect("bob sketch"))
        .expect("identical sets decode");
    assert!(settled.is_empty());
}

#[test]
fn undersized_table_is_detected_and_larger_one_succeeds() {
    let shared = shared_records();
    let mut extra = shared.clone();
    for i in 0..300 {
        extra.insert(format!("x{}", i).into_bytes(), b"1".to_vec());
    }

    let small = IbltParams::new(200, 4, 42);
    let local = SetReconciler::with_local_pairs(small, extra.clone());
    let remote = SetReconciler::with_local_pairs(small, shared.clone())
        .sketch()
        .expect("sketch");
    match local.compute_diff(&remote) {
        Err(SyncError::DecodeIncomplete {
            recovered,
            residual_cells,
        }) => {
            assert!(recovered < 300);
            assert!(residual_cells > 0);
        }
        other => panic!("Expected DecodeIncomplete, got: {:?}", other),
    }

    let large = IbltParams::new(1200, 4, 42);
    let local = SetReconciler::with_local_pairs(large, extra);
    let remote = SetReconciler::with_local_pairs(large, shared)
        .sketch()
        .expect("sketch");
    let diff = local.compute_diff(&remote).expect("large table decodes");
    assert_eq!(diff.local_only.len(), 300);
    assert!(diff.remote_only.is_empty());
}
