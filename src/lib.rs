//! # Double Auction Book
//!
//! Deterministic continuous double-auction limit order book: price-time priority
//! matching, an append-only trade tape, and a best-bid/ask snapshot.
//!
//! ## Entry point
//!
//! Use [`OrderBook`] as the single entry point: create with [`OrderBook::new`] (or
//! [`OrderBook::with_clock`] for deterministic timestamps), then [`OrderBook::submit`],
//! [`OrderBook::snapshot`], and [`OrderBook::tape`].
//!
//! ## Example
//!
//! ```rust
//! use double_auction_book::{Order, OrderBook, Side, StepClock};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::with_clock(StepClock::default());
//! book.submit(Order::limit("bid-1", Side::Buy, Decimal::from(99), 10)).unwrap();
//! book.submit(Order::limit("ask-1", Side::Sell, Decimal::from(101), 10)).unwrap();
//!
//! let snap = book.snapshot();
//! assert_eq!(snap.mid_price, Decimal::from(100));
//!
//! let trades = book.submit(Order::market("taker", Side::Buy, 5)).unwrap();
//! assert_eq!(trades[0].price, Decimal::from(101));
//! assert_eq!(trades[0].maker_id.as_str(), "ask-1");
//! ```
//!
//! ## Lower-level API
//!
//! [`Ledger`] can be filled directly; [`Ledger::insert`] enforces the same side, quantity,
//! and time-priority rules that [`OrderBook::submit`] relies on.

pub mod clock;
pub mod error;
pub mod market_data_gen;
pub mod matching;
pub mod order_book;
pub mod settlement;
pub mod shared;
pub mod snapshot;
pub mod tape;
pub mod types;

pub use clock::{Clock, StepClock, WallClock};
pub use error::BookError;
pub use matching::crosses;
pub use order_book::{BookConfig, Ledger, OrderBook};
pub use settlement::{Position, Settlement};
pub use shared::SharedOrderBook;
pub use snapshot::{snapshot, Depth, DepthLevel, Snapshot};
pub use tape::{Tape, TradeRecord};
pub use types::{
    check_limit_price, max_price_magnitude, price_from_f64, Order, OrderId, OrderKind, Price,
    Quantity, RestingOrder, Side,
};
