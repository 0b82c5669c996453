use super::{RingBuffer, RingBufferError};
use tracing::trace;

/// Forward iteration position over a [`RingBuffer`].
///
/// A cursor only holds a slot index, so any number of cursors can walk the
/// same buffer independently. It starts before the oldest element. Once
/// `advance` steps past the newest element it returns `false` and rewinds,
/// so the next `advance` starts the sequence over without a `reset`.
///
/// The cursor remembers the buffer generation it was positioned under. If
/// the buffer is saved to or cleared mid-walk, `current` fails with
/// [`RingBufferError::StaleCursor`] and `advance` ends the walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    position: Option<usize>,
    generation: u64,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.position = None;
    }

    pub fn is_positioned(&self) -> bool {
        self.position.is_some()
    }

    pub fn advance<T>(&mut self, buffer: &RingBuffer<T>) -> bool {
        match self.position {
            None => match buffer.oldest_slot() {
                Some(oldest) => {
                    self.position = Some(oldest);
                    self.generation = buffer.generation();
                    true
                }
                None => false,
            },
            Some(_) if self.generation != buffer.generation() => {
                trace!("cursor rewound after buffer mutation");
                self.position = None;
                false
            }
            Some(pos) if Some(pos) == buffer.newest_slot() => {
                self.position = None;
                false
            }
            Some(pos) => {
                self.position = Some((pos + 1) % buffer.capacity());
                true
            }
        }
    }

    pub fn current<'a, T>(&self, buffer: &'a RingBuffer<T>) -> Result<&'a T, RingBufferError> {
        let pos = self.position.ok_or(RingBufferError::NoCurrentElement)?;
        if self.generation != buffer.generation() {
            return Err(RingBufferError::StaleCursor);
        }
        buffer.slot(pos).ok_or(RingBufferError::NoCurrentElement)
    }
}
