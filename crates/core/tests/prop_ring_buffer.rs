use proptest::prelude::*;
use ringtrail_core::{RingBuffer, RingBufferError};

fn saved(capacity: usize, values: &[i32]) -> RingBuffer<i32> {
    let mut rb = RingBuffer::new(capacity).expect("nonzero capacity");
    for &v in values {
        rb.save(v);
    }
    rb
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_retains_last_capacity_values(
        capacity in 1usize..16,
        values in prop::collection::vec(any::<i32>(), 0..64),
    ) {
        let rb = saved(capacity, &values);
        let keep = values.len().min(capacity);
        let expected = &values[values.len() - keep..];

        prop_assert_eq!(rb.len(), keep);
        for (i, want) in expected.iter().enumerate() {
            prop_assert_eq!(rb.get(i), Ok(want));
        }
        prop_assert_eq!(
            rb.get(keep),
            Err(RingBufferError::IndexOutOfRange { index: keep, len: keep })
        );
    }

    #[test]
    fn prop_cursor_matches_indexing_and_restarts(
        capacity in 1usize..16,
        values in prop::collection::vec(any::<i32>(), 0..64),
    ) {
        let rb = saved(capacity, &values);
        let by_index: Vec<i32> = (0..rb.len()).map(|i| rb[i]).collect();
        let mut cursor = rb.cursor();

        for _pass in 0..2 {
            let mut walked = Vec::new();
            while cursor.advance(&rb) {
                walked.push(*cursor.current(&rb).expect("positioned"));
            }
            prop_assert_eq!(&walked, &by_index);
        }
        prop_assert_eq!(rb.iter().copied().collect::<Vec<_>>(), by_index);
    }

    #[test]
    fn prop_save_evicts_only_when_full(
        capacity in 1usize..16,
        values in prop::collection::vec(any::<i32>(), 1..64),
    ) {
        let mut rb = RingBuffer::new(capacity).expect("nonzero capacity");
        for (n, &v) in values.iter().enumerate() {
            let evicted = rb.save(v);
            if n < capacity {
                prop_assert_eq!(evicted, None);
            } else {
                prop_assert_eq!(evicted, Some(values[n - capacity]));
            }
        }
    }

    #[test]
    fn prop_clear_then_get_is_out_of_range(
        capacity in 1usize..16,
        values in prop::collection::vec(any::<i32>(), 0..64),
        index in 0usize..32,
    ) {
        let mut rb = saved(capacity, &values);
        rb.clear();
        prop_assert_eq!(rb.len(), 0);
        prop_assert_eq!(
            rb.get(index),
            Err(RingBufferError::IndexOutOfRange { index, len: 0 })
        );
        let mut cursor = rb.cursor();
        prop_assert!(!cursor.advance(&rb));
    }
}

#[test]
fn capacity_three_after_four_saves() {
    let rb = saved(3, &[1, 2, 3, 4]);
    assert_eq!(rb.len(), 3);
    assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
}
