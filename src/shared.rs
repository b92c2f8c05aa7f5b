//! Thread-safe handle to one order book.
//!
//! Matching reads and writes both ledgers and the tape together, so the whole book sits
//! behind a single mutex; there is no finer-grained locking.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::BookError;
use crate::order_book::OrderBook;
use crate::snapshot::Snapshot;
use crate::tape::TradeRecord;
use crate::types::Order;

/// Cloneable handle; clones share the same book.
#[derive(Clone, Debug)]
pub struct SharedOrderBook {
    inner: Arc<Mutex<OrderBook>>,
}

impl SharedOrderBook {
    pub fn new(book: OrderBook) -> Self {
        Self {
            inner: Arc::new(Mutex::new(book)),
        }
    }

    // Poison is ignored: submit rejects out-of-range prices before mutating, and
    // snapshot arithmetic on accepted prices cannot overflow.
    fn lock(&self) -> MutexGuard<'_, OrderBook> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(&self, order: Order) -> Result<Vec<TradeRecord>, BookError> {
        self.lock().submit(order)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Copies of the trades at or after `index`, plus the tape length to resume from.
    pub fn trades_since(&self, index: usize) -> (Vec<TradeRecord>, usize) {
        let book = self.lock();
        (book.tape().since(index).to_vec(), book.tape().len())
    }

    /// Runs `f` with shared access to the book while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&OrderBook) -> R) -> R {
        f(&self.lock())
    }
}
