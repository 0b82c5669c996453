use crate::buffer::RingBuffer;
use serde::{Deserialize, Serialize};

/// Point-in-time copy of a buffer's retained values, oldest first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot<T> {
    pub capacity: usize,
    pub len: usize,
    pub values: Vec<T>,
}

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl<T: Serialize> Snapshot<T> {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<T: Clone> RingBuffer<T> {
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            capacity: self.capacity(),
            len: self.len(),
            values: self.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_lists_values_oldest_first() {
        let mut rb = RingBuffer::new(3).expect("nonzero capacity");
        for v in [1, 2, 3, 4, 5] {
            rb.save(v);
        }
        let snap = rb.snapshot();
        assert_eq!(snap.capacity, 3);
        assert_eq!(snap.len, 3);
        assert_eq!(snap.values, vec![3, 4, 5]);
    }

    #[test]
    fn snapshot_json_shape() {
        let mut rb = RingBuffer::new(4).expect("nonzero capacity");
        rb.save("a".to_owned());
        rb.save("b".to_owned());

        let json = rb.snapshot().to_json().expect("encodes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["capacity"], 4);
        assert_eq!(value["len"], 2);
        assert_eq!(value["values"], serde_json::json!(["a", "b"]));
    }
}
