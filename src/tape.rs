//! Trade tape: append-only log of executed trades.
//!
//! Consumers read incrementally by remembering the last length they saw and calling
//! [`Tape::since`]. Once appended, a record's contents and index never change.

use crate::types::{OrderId, Price, Quantity, Side};

/// One execution between an incoming (taker) order and a resting (maker) order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TradeRecord {
    /// Clock reading in nanoseconds. Non-decreasing along the tape.
    pub timestamp: u64,
    /// The maker's resting price.
    pub price: Price,
    pub quantity: Quantity,
    pub taker_id: OrderId,
    pub maker_id: OrderId,
    /// Side of the taker; the maker is on the opposite side.
    pub taker_side: Side,
}

impl TradeRecord {
    pub fn buyer_id(&self) -> &OrderId {
        match self.taker_side {
            Side::Buy => &self.taker_id,
            Side::Sell => &self.maker_id,
        }
    }

    pub fn seller_id(&self) -> &OrderId {
        match self.taker_side {
            Side::Buy => &self.maker_id,
            Side::Sell => &self.taker_id,
        }
    }

    /// Notional value: `price * quantity`, saturating at the [`Price`] range.
    pub fn notional(&self) -> Price {
        self.price.saturating_mul(Price::from(self.quantity))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Tape {
    trades: Vec<TradeRecord>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trade. A timestamp earlier than the previous record's is raised to it,
    /// keeping the tape ordered even under a misbehaving clock.
    pub fn record(&mut self, mut trade: TradeRecord) {
        if let Some(last) = self.trades.last() {
            trade.timestamp = trade.timestamp.max(last.timestamp);
        }
        self.trades.push(trade);
    }

    /// All trades in execution order.
    pub fn all(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Trades appended at or after `index`. Empty if `index >= len()`.
    pub fn since(&self, index: usize) -> &[TradeRecord] {
        self.trades.get(index..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn last(&self) -> Option<&TradeRecord> {
        self.trades.last()
    }

    pub fn last_price(&self) -> Option<Price> {
        self.trades.last().map(|t| t.price)
    }

    /// Sum of traded quantity across the whole tape.
    pub fn traded_quantity(&self) -> Quantity {
        self.trades.iter().map(|t| t.quantity).sum()
    }
}
