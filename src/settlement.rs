//! Position bookkeeping driven by the trade tape.
//!
//! A [`Settlement`] follows one participant identity. Each call to [`Settlement::settle`]
//! applies only the trades appended since the previous call, so fills are never counted
//! twice and never missed.

use log::debug;

use crate::tape::Tape;
use crate::types::{OrderId, Price, Quantity};

/// Inventory and cash of one participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub inventory: Quantity,
    pub cash: Price,
}

#[derive(Clone, Debug)]
pub struct Settlement {
    agent_id: OrderId,
    cursor: usize,
    position: Position,
}

impl Settlement {
    pub fn new(agent_id: impl Into<OrderId>, starting_cash: Price) -> Self {
        Self {
            agent_id: agent_id.into(),
            cursor: 0,
            position: Position {
                inventory: 0,
                cash: starting_cash,
            },
        }
    }

    /// Starts reading at the tape's current end, ignoring trades already on it.
    pub fn skip_to_end(&mut self, tape: &Tape) {
        self.cursor = tape.len();
    }

    /// Applies trades appended since the last call. Returns how many of them involved
    /// this participant.
    ///
    /// As buyer: inventory up, cash down by notional. As seller: the reverse. A trade
    /// where the participant is on both sides applies both legs.
    pub fn settle(&mut self, tape: &Tape) -> usize {
        let mut applied = 0;
        for trade in tape.since(self.cursor) {
            let mut involved = false;
            if *trade.buyer_id() == self.agent_id {
                self.position.inventory = self.position.inventory.saturating_add(trade.quantity);
                self.position.cash = self.position.cash.saturating_sub(trade.notional());
                involved = true;
            }
            if *trade.seller_id() == self.agent_id {
                self.position.inventory = self.position.inventory.saturating_sub(trade.quantity);
                self.position.cash = self.position.cash.saturating_add(trade.notional());
                involved = true;
            }
            if involved {
                applied += 1;
            }
        }
        self.cursor = self.cursor.max(tape.len());
        if applied > 0 {
            debug!(
                "settled agent={} trades={} inventory={} cash={}",
                self.agent_id, applied, self.position.inventory, self.position.cash
            );
        }
        applied
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn agent_id(&self) -> &OrderId {
        &self.agent_id
    }

    /// Index of the next unread tape entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cash plus inventory valued at `mid_price`, saturating at the [`Price`] range.
    pub fn mark_to_market(&self, mid_price: Price) -> Price {
        let holdings = Price::from(self.position.inventory).saturating_mul(mid_price);
        self.position.cash.saturating_add(holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::TradeRecord;
    use crate::types::Side;

    fn trade(taker: &str, maker: &str, side: Side, price: i64, qty: Quantity) -> TradeRecord {
        TradeRecord {
            timestamp: 0,
            price: Price::from(price),
            quantity: qty,
            taker_id: taker.into(),
            maker_id: maker.into(),
            taker_side: side,
        }
    }

    #[test]
    fn buy_as_taker_and_sell_as_maker() {
        let mut tape = Tape::new();
        tape.record(trade("me", "mm", Side::Buy, 100, 5));
        tape.record(trade("nt", "me", Side::Buy, 102, 2));
        let mut s = Settlement::new("me", Price::from(1000));
        assert_eq!(s.settle(&tape), 2);
        assert_eq!(s.position().inventory, 3);
        assert_eq!(s.position().cash, Price::from(1000 - 500 + 204));
        assert_eq!(s.mark_to_market(Price::from(101)), Price::from(704 + 303));
    }

    #[test]
    fn settle_reads_only_new_trades() {
        let mut tape = Tape::new();
        tape.record(trade("me", "mm", Side::Sell, 100, 1));
        let mut s = Settlement::new("me", Price::ZERO);
        s.settle(&tape);
        assert_eq!(s.settle(&tape), 0);
        tape.record(trade("me", "mm", Side::Sell, 100, 1));
        assert_eq!(s.settle(&tape), 1);
        assert_eq!(s.position().inventory, -2);
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn skip_to_end_ignores_history() {
        let mut tape = Tape::new();
        tape.record(trade("me", "mm", Side::Buy, 100, 4));
        let mut s = Settlement::new("me", Price::ZERO);
        s.skip_to_end(&tape);
        assert_eq!(s.settle(&tape), 0);
        assert_eq!(s.position().inventory, 0);
    }

    #[test]
    fn self_trade_nets_to_zero() {
        let mut tape = Tape::new();
        tape.record(trade("me", "me", Side::Buy, 100, 3));
        let mut s = Settlement::new("me", Price::from(50));
        assert_eq!(s.settle(&tape), 1);
        assert_eq!(s.position().inventory, 0);
        assert_eq!(s.position().cash, Price::from(50));
    }

    #[test]
    fn extreme_values_saturate_instead_of_overflowing() {
        let mut tape = Tape::new();
        tape.record(TradeRecord {
            price: crate::types::max_price_magnitude(),
            ..trade("me", "mm", Side::Buy, 0, Quantity::MAX)
        });
        let mut s = Settlement::new("me", Price::MIN);
        assert_eq!(s.settle(&tape), 1);
        assert_eq!(s.position().cash, Price::MIN);
        assert_eq!(s.mark_to_market(Price::MAX), Price::ZERO);
        assert_eq!(tape.all()[0].notional(), Price::MAX);
    }

    #[test]
    fn unrelated_trades_are_ignored() {
        let mut tape = Tape::new();
        tape.record(trade("a", "b", Side::Buy, 100, 3));
        let mut s = Settlement::new("me", Price::from(50));
        assert_eq!(s.settle(&tape), 0);
        assert_eq!(s.cursor(), 1);
    }
}
