//! Read-only views of the book: top-of-book [`Snapshot`] and aggregated [`Depth`].

use std::fmt;

use crate::order_book::{Ledger, OrderBook};
use crate::types::{Price, Quantity};

/// Point-in-time best bid/ask view. `None` means the side (or the spread) is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    /// Always defined: midpoint, else the one present side, else the last trade price,
    /// else the book's configured reference price.
    pub mid_price: Price,
    pub spread: Option<Price>,
}

/// Derives the snapshot from ledger state. Does not mutate the book.
pub fn snapshot(book: &OrderBook) -> Snapshot {
    let best_bid = book.best_bid();
    let best_ask = book.best_ask();
    let mid_price = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => (bid + ask) / Price::from(2),
        (Some(bid), None) => bid,
        (None, Some(ask)) => ask,
        (None, None) => book
            .tape()
            .last_price()
            .unwrap_or(book.config().reference_price),
    };
    let spread = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => Some(ask - bid),
        _ => None,
    };
    Snapshot {
        best_bid,
        best_ask,
        mid_price,
        spread,
    }
}

/// Aggregated price level.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepthLevel {
    pub price: Price,
    pub quantity: Quantity,
    pub orders: usize,
}

/// Top price levels per side, best first.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Depth {
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
}

impl Depth {
    pub fn from_book(book: &OrderBook, levels: usize) -> Self {
        Self {
            bids: aggregate(book.bids(), levels),
            asks: aggregate(book.asks(), levels),
        }
    }
}

fn aggregate(ledger: &Ledger, levels: usize) -> Vec<DepthLevel> {
    ledger
        .levels()
        .take(levels)
        .map(|(price, queue)| DepthLevel {
            price: *price,
            quantity: queue.iter().map(|o| o.quantity).sum(),
            orders: queue.len(),
        })
        .collect()
}

/// Renders the ladder as a four-column table.
impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "--- ORDER BOOK SNAPSHOT ---")?;
        writeln!(f, "BID QTY    |  BID PRC   |  ASK PRC   |   ASK QTY")?;
        writeln!(f, "{}", "-".repeat(50))?;
        let rows = self.bids.len().max(self.asks.len());
        for i in 0..rows {
            let (bq, bp) = match self.bids.get(i) {
                Some(l) => (l.quantity.to_string(), l.price.to_string()),
                None => (String::new(), String::new()),
            };
            let (ap, aq) = match self.asks.get(i) {
                Some(l) => (l.price.to_string(), l.quantity.to_string()),
                None => (String::new(), String::new()),
            };
            writeln!(f, "{:<10} | {:^10} | {:^10} | {:>10}", bq, bp, ap, aq)?;
        }
        write!(f, "{}", rule)
    }
}
