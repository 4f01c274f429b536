use std::sync::{Arc, Mutex, PoisonError};

/// A single-value mailbox shared between a producer and a consumer thread.
/// Each [`put()`][LatestSlot::put] overwrites whatever the consumer has not
/// yet taken, so the consumer only ever sees the freshest value.
#[derive(Debug)]
pub(super) struct LatestSlot<T>(Arc<Mutex<Option<T>>>);

impl<T> LatestSlot<T> {
    pub(super) fn new() -> LatestSlot<T> {
        LatestSlot(Arc::new(Mutex::new(None)))
    }

    pub(super) fn put(&self, value: T) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    pub(super) fn take(&self) -> Option<T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

impl<T> Clone for LatestSlot<T> {
    fn clone(&self) -> LatestSlot<T> {
        LatestSlot(Arc::clone(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn latest_value_wins() {
        let slot = LatestSlot::new();
        assert_eq!(slot.take(), None);
        slot.put(1);
        slot.put(2);
        slot.put(3);
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn shared_across_threads() {
        let slot = LatestSlot::new();
        let producer = slot.clone();
        thread::spawn(move || {
            for i in 0..100 {
                producer.put(i);
            }
        })
        .join()
        .unwrap();
        assert_eq!(slot.take(), Some(99));
    }
}
