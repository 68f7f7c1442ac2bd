//! Handoff between the radio receive context and the polling loop.
//!
//! The receive side can run at any point relative to the loop (a radio
//! callback, an interrupt or another task). Both sides touch the shared state
//! only inside one critical section, and everything else stays owned by the
//! polling loop.
//!
//! The queue never blocks the producer. When it is full the oldest pending
//! item is dropped, so with `N == 1` it behaves as a single slot where the
//! last write wins.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::Deque;

struct Shared<T, const N: usize> {
    pending: Deque<T, N>,
    last_received_ms: Option<u64>,
    overwritten: u32,
}

/// Bounded overwrite-on-full queue with a "last received" timestamp.
pub struct Handoff<T, const N: usize> {
    shared: Mutex<CriticalSectionRawMutex, RefCell<Shared<T, N>>>,
}

impl<T, const N: usize> Handoff<T, N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "handoff needs at least one slot") };
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                pending: Deque::new(),
                last_received_ms: None,
                overwritten: 0,
            })),
        }
    }

    /// Queue `item` and stamp `now_ms` as the last receive time.
    ///
    /// Returns `true` if an unconsumed item had to be dropped.
    pub fn publish(
        &self,
        item: T,
        now_ms: u64,
    ) -> bool {
        self.shared.lock(|cell| {
            let mut shared = cell.borrow_mut();
            shared.last_received_ms = Some(now_ms);
            let overwrote = if shared.pending.is_full() {
                shared.pending.pop_front();
                shared.overwritten = shared.overwritten.wrapping_add(1);
                true
            } else {
                false
            };
            // Cannot fail: a slot was freed above.
            shared.pending.push_back(item).ok();
            overwrote
        })
    }

    /// Take the oldest pending item. Each published item is returned once.
    pub fn consume(&self) -> Option<T> {
        self.shared.lock(|cell| cell.borrow_mut().pending.pop_front())
    }

    /// Time of the most recent publish, if any.
    pub fn last_received_ms(&self) -> Option<u64> {
        self.shared.lock(|cell| cell.borrow().last_received_ms)
    }

    pub fn is_pending(&self) -> bool {
        self.shared.lock(|cell| !cell.borrow().pending.is_empty())
    }

    /// Items dropped unconsumed since boot.
    pub fn overwritten(&self) -> u32 {
        self.shared.lock(|cell| cell.borrow().overwritten)
    }
}

impl<T, const N: usize> Default for Handoff<T, N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use super::*;

    #[test]
    fn test_publish_then_consume_once() {
        let handoff: Handoff<u32, 1> = Handoff::new();
        assert!(!handoff.publish(7, 100));
        assert!(handoff.is_pending());
        assert_eq!(handoff.consume(), Some(7));
        assert_eq!(handoff.consume(), None);
        assert_eq!(handoff.last_received_ms(), Some(100));
    }

    #[test]
    fn test_single_slot_last_write_wins() {
        let handoff: Handoff<u32, 1> = Handoff::new();
        handoff.publish(1, 10);
        assert!(handoff.publish(2, 20));
        assert_eq!(handoff.consume(), Some(2));
        assert_eq!(handoff.consume(), None);
        assert_eq!(handoff.overwritten(), 1);
    }

    #[test]
    fn test_full_queue_drops_oldest() {
        let handoff: Handoff<u32, 3> = Handoff::new();
        for value in 1..=5 {
            handoff.publish(value, u64::from(value));
        }
        assert_eq!(handoff.consume(), Some(3));
        assert_eq!(handoff.consume(), Some(4));
        assert_eq!(handoff.consume(), Some(5));
        assert_eq!(handoff.consume(), None);
        assert_eq!(handoff.overwritten(), 2);
    }

    #[test]
    fn test_last_received_survives_consume() {
        let handoff: Handoff<u32, 1> = Handoff::new();
        assert_eq!(handoff.last_received_ms(), None);
        handoff.publish(1, 500);
        handoff.consume();
        assert_eq!(handoff.last_received_ms(), Some(500));
    }

    #[test]
    fn test_concurrent_producer_never_duplicates() {
        static HANDOFF: Handoff<u32, 1> = Handoff::new();
        static DONE: AtomicBool = AtomicBool::new(false);

        let producer = thread::spawn(|| {
            for value in 1..=10_000u32 {
                HANDOFF.publish(value, u64::from(value));
            }
            DONE.store(true, Ordering::Release);
        });

        let mut last = 0;
        loop {
            let finished = DONE.load(Ordering::Acquire);
            while let Some(value) = HANDOFF.consume() {
                assert!(value > last, "value {value} seen after {last}");
                last = value;
            }
            if finished {
                break;
            }
        }
        producer.join().unwrap();
        assert_eq!(last, 10_000);
    }
}
