//! Property tests for the interning tables

use gedcom_parser::gedcom::interning::KeyTable;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::rc::Rc;

fn tag_strategy() -> impl Strategy<Value = String> {
    "[A-Z_][A-Z0-9_]{0,7}"
}

proptest! {
    #[test]
    fn interning_twice_returns_the_same_instance(tags in prop::collection::vec(tag_strategy(), 1..40)) {
        let mut table = KeyTable::new();
        let first: Vec<_> = tags.iter().map(|tag| table.intern_str(tag)).collect();
        let second: Vec<_> = tags.iter().map(|tag| table.intern_str(tag)).collect();

        for (a, b) in first.iter().zip(&second) {
            prop_assert!(Rc::ptr_eq(a, b));
        }
    }

    #[test]
    fn table_holds_each_distinct_key_once_in_order(tags in prop::collection::vec(tag_strategy(), 0..40)) {
        let mut table = KeyTable::new();
        for tag in &tags {
            table.intern_str(tag);
        }

        let expected: Vec<&str> = tags
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let stored: Vec<&str> = table.iter().collect();
        prop_assert_eq!(stored, expected);
    }

    #[test]
    fn trailing_padding_does_not_split_keys(tag in tag_strategy(), padding in " {0,4}") {
        let mut table = KeyTable::new();
        let padded = format!("{tag}{padding}");
        let plain = table.intern_str(&tag);
        let spaced = table.intern(&padded, 0, padded.len());

        prop_assert!(Rc::ptr_eq(&plain, &spaced));
        prop_assert_eq!(table.len(), 1);
    }

    #[test]
    fn arbitrary_spans_never_panic(text in "\\PC{0,20}", start in 0usize..30, length in 0usize..30) {
        let mut table = KeyTable::new();
        let key = table.intern(&text, start, length);
        prop_assert_eq!(&*key, key.trim());
    }
}
