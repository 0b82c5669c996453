//! Fixed-capacity ring buffer
//!
//! Retains the most recently saved elements up to a fixed capacity. Once the
//! buffer is full every save evicts the oldest element. Indexing is relative
//! to the oldest retained element, so `get(0)` is the oldest and
//! `get(len - 1)` the newest.

mod cursor;

use std::iter::FusedIterator;
use std::ops::Index;
use tracing::{debug, trace};

pub use cursor::Cursor;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("capacity must be > 0")]
    ZeroCapacity,
    #[error("index {index} out of range for ring buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cursor has no current element")]
    NoCurrentElement,
    #[error("cursor invalidated by a mutation of the buffer")]
    StaleCursor,
}

impl RingBufferError {
    /// True for errors caused by reading a cursor in the wrong state.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::NoCurrentElement | Self::StaleCursor)
    }
}

#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    buf: Vec<Option<T>>,
    newest: Option<usize>,
    oldest: Option<usize>,
    len: usize,
    generation: u64,
}

impl<T> RingBuffer<T> {
    /// Allocate a buffer with `capacity` empty slots.
    ///
    /// The storage is never resized afterwards.
    pub fn new(capacity: usize) -> Result<Self, RingBufferError> {
        if capacity == 0 {
            return Err(RingBufferError::ZeroCapacity);
        }
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        debug!(capacity, "ring buffer allocated");
        Ok(Self {
            buf,
            newest: None,
            oldest: None,
            len: 0,
            generation: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Write `value` after the newest element.
    ///
    /// When the buffer is full the oldest element is evicted and handed back
    /// to the caller; otherwise returns `None`.
    pub fn save(&mut self, value: T) -> Option<T> {
        let cap = self.capacity();
        let slot = self.newest.map_or(0, |newest| (newest + 1) % cap);
        let previous = self.buf[slot].replace(value);

        let evicted = match self.oldest {
            None => {
                self.oldest = Some(slot);
                None
            }
            Some(oldest) if oldest == slot => {
                self.oldest = Some((oldest + 1) % cap);
                trace!(slot, "evicted oldest element");
                previous
            }
            Some(_) => None,
        };

        self.newest = Some(slot);
        self.len = (self.len + 1).min(cap);
        self.bump_generation();
        evicted
    }

    /// Drop every element and return to the empty state.
    pub fn clear(&mut self) {
        for slot in &mut self.buf {
            *slot = None;
        }
        self.newest = None;
        self.oldest = None;
        self.len = 0;
        self.bump_generation();
        trace!(capacity = self.capacity(), "ring buffer cleared");
    }

    /// Element `index` positions after the oldest one.
    pub fn get(&self, index: usize) -> Result<&T, RingBufferError> {
        self.physical_index(index)
            .and_then(|slot| self.buf[slot].as_ref())
            .ok_or(RingBufferError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn last(&self) -> Option<&T> {
        self.newest.and_then(|slot| self.buf[slot].as_ref())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            front: 0,
        }
    }

    /// A fresh cursor positioned before the oldest element.
    pub fn cursor(&self) -> Cursor {
        Cursor::new()
    }

    fn physical_index(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        self.oldest.map(|oldest| (oldest + index) % self.capacity())
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn oldest_slot(&self) -> Option<usize> {
        self.oldest
    }

    pub(crate) fn newest_slot(&self) -> Option<usize> {
        self.newest
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn slot(&self, slot: usize) -> Option<&T> {
        self.buf.get(slot).and_then(Option::as_ref)
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Borrowing iterator over the retained elements, oldest first.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    front: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.buffer.get(self.front).ok()?;
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
