//! Price-time priority matching.
//!
//! `match_order` crosses one incoming order against the opposite ledger, head first,
//! until the taker is filled or the head no longer crosses. Every execution is at the
//! maker's price.

use crate::clock::Clock;
use crate::order_book::Ledger;
use crate::tape::{Tape, TradeRecord};
use crate::types::{Order, Price, Side};

/// Whether a taker on `side` with `limit` (None for market) may trade against a maker
/// resting at `maker_price`.
pub fn crosses(side: Side, limit: Option<Price>, maker_price: Price) -> bool {
    match (side, limit) {
        (_, None) => true,
        (Side::Buy, Some(p)) => p >= maker_price,
        (Side::Sell, Some(p)) => p <= maker_price,
    }
}

/// Runs the crossing loop for `taker` against `ledger` (the opposite side).
///
/// Decrements both the taker's and each maker's quantity, pops makers that reach zero,
/// and appends every trade to `tape`. Returns the trades produced, in execution order.
/// The taker's residual is left in `taker.quantity` for the caller to rest or discard.
pub(crate) fn match_order(
    ledger: &mut Ledger,
    taker: &mut Order,
    limit: Option<Price>,
    tape: &mut Tape,
    clock: &mut dyn Clock,
) -> Vec<TradeRecord> {
    debug_assert_eq!(ledger.side(), taker.side.opposite());
    let mut trades = Vec::new();
    while taker.quantity > 0 {
        let Some(maker) = ledger.head_mut() else {
            break;
        };
        // Later orders in the ledger are never better priced than the head.
        if !crosses(taker.side, limit, maker.price) {
            break;
        }
        let quantity = taker.quantity.min(maker.quantity);
        let trade = TradeRecord {
            timestamp: clock.now(),
            price: maker.price,
            quantity,
            taker_id: taker.id.clone(),
            maker_id: maker.id.clone(),
            taker_side: taker.side,
        };
        taker.quantity -= quantity;
        maker.quantity -= quantity;
        if maker.quantity == 0 {
            ledger.pop_head();
        }
        tape.record(trade.clone());
        trades.push(trade);
    }
    trades
}
