#![cfg(test)]

// Property tests for Entry kept inside the crate so they can drive the
// crate-private mutable-key view directly.

use crate::entry::Entry;
use proptest::prelude::*;
use std::ptr;

// Assignment paths exercised against a plain (K, V) model.
#[derive(Clone, Debug)]
enum Assign {
    Copy(String, Vec<u8>),
    Move(String, Vec<u8>),
    PairOwned(String, Vec<u8>),
    PairBorrowed(String, Vec<u8>),
    ViewRef(String, Vec<u8>),
    ViewMoved(String, Vec<u8>),
    ValueOnly(Vec<u8>),
}

fn arb_part() -> impl Strategy<Value = (String, Vec<u8>)> {
    ("[a-z]{0,12}", proptest::collection::vec(any::<u8>(), 0..8))
}

fn arb_assign() -> impl Strategy<Value = Assign> {
    prop_oneof![
        arb_part().prop_map(|(k, v)| Assign::Copy(k, v)),
        arb_part().prop_map(|(k, v)| Assign::Move(k, v)),
        arb_part().prop_map(|(k, v)| Assign::PairOwned(k, v)),
        arb_part().prop_map(|(k, v)| Assign::PairBorrowed(k, v)),
        arb_part().prop_map(|(k, v)| Assign::ViewRef(k, v)),
        arb_part().prop_map(|(k, v)| Assign::ViewMoved(k, v)),
        proptest::collection::vec(any::<u8>(), 0..8).prop_map(Assign::ValueOnly),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    // Property: constructing from (k, v) by any path reads back as (k, v).
    #[test]
    fn prop_construct_reads_back(k in any::<i64>(), v in "[a-z]{0,16}") {
        let pair = (k, v.clone());
        let by_parts = Entry::from_parts(k, v.clone());
        let by_new: Entry<i64, String> = Entry::new(k, v.as_str());
        let by_ref = Entry::from(&pair);
        let by_move = Entry::from(pair.clone());
        let by_with = Entry::new_with(|| k, || v.clone());
        for e in [&by_parts, &by_new, &by_ref, &by_move, &by_with] {
            prop_assert_eq!(e.get_value(), (&k, &v));
        }
        prop_assert_eq!(by_move.into_parts(), pair);
    }

    // Property: copy assignment makes the target equal the source and
    // leaves the source unchanged; clone equals its origin.
    #[test]
    fn prop_copy_assignment((ak, av) in arb_part(), (bk, bv) in arb_part()) {
        let mut a = Entry::from_parts(ak, av);
        let b = Entry::from_parts(bk.clone(), bv.clone());
        a.assign_from(&b);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(b.get_value(), (&bk, &bv));

        let c = a.clone();
        prop_assert_eq!(c, a);
    }

    // Property: every assignment path, applied in sequence, tracks the
    // model and never moves the key's storage.
    #[test]
    fn prop_assignment_sequence((k0, v0) in arb_part(), ops in proptest::collection::vec(arb_assign(), 1..40)) {
        let mut e = Entry::from_parts(k0.clone(), v0.clone());
        let mut model = (k0, v0);
        let key_addr = e.key() as *const String;

        for op in ops {
            match op {
                Assign::Copy(k, v) => {
                    let src = Entry::from_parts(k.clone(), v.clone());
                    e.clone_from(&src);
                    prop_assert_eq!(src.get_value(), (&k, &v));
                    model = (k, v);
                }
                Assign::Move(k, v) => {
                    e.assign(Entry::from_parts(k.clone(), v.clone()));
                    model = (k, v);
                }
                Assign::PairOwned(k, v) => {
                    e.assign_pair((k.clone(), v.clone()));
                    model = (k, v);
                }
                Assign::PairBorrowed(k, v) => {
                    let p = (k, v);
                    e.assign_pair(&p);
                    model = p;
                }
                Assign::ViewRef(k, v) => {
                    e.ref_mut().assign_ref(&k, &v);
                    model = (k, v);
                }
                Assign::ViewMoved(k, v) => {
                    e.ref_mut().assign_moved((k.clone(), v.clone()));
                    model = (k, v);
                }
                Assign::ValueOnly(v) => {
                    *e.value_mut() = v.clone();
                    model.1 = v;
                }
            }
            prop_assert_eq!(&e, &model);
            prop_assert!(ptr::eq(key_addr, e.key()));
        }
    }

    // Property: a default entry equals the defaults of its parts.
    #[test]
    fn prop_default_then_assign(k in any::<u32>(), v in any::<bool>()) {
        let mut e: Entry<u32, bool> = Entry::default();
        prop_assert_eq!(e.get_value(), (&0, &false));
        e.assign_pair((k, v));
        prop_assert_eq!(e.into_parts(), (k, v));
    }
}
