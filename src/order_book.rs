//! Single-instrument order book: bid and ask ledgers, the trade tape, and submission.
//!
//! Each ledger is a map of price level -> FIFO queue. Best bid is the highest price,
//! best ask the lowest. Within a level, orders are kept in sequence order, so the head
//! of a ledger is always its best-priority order.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, info, warn};

use crate::clock::{Clock, WallClock};
use crate::error::BookError;
use crate::matching::match_order;
use crate::snapshot::{self, Depth, Snapshot};
use crate::tape::{Tape, TradeRecord};
use crate::types::{check_limit_price, Order, OrderKind, Price, Quantity, RestingOrder, Side};

/// Book settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Mid-price reported when both ledgers and the tape are empty.
    pub reference_price: Price,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            reference_price: Price::ZERO,
        }
    }
}

/// Resting orders for one side, in price-time priority.
#[derive(Clone, Debug)]
pub struct Ledger {
    side: Side,
    levels: BTreeMap<Price, VecDeque<RestingOrder>>,
}

impl Ledger {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Inserts a resting order behind every order with equal or better priority.
    ///
    /// The order must belong to this side, carry a positive quantity, and have a
    /// sequence above every order already at its price level; otherwise it is rejected
    /// and the ledger is left unchanged.
    pub fn insert(&mut self, order: RestingOrder) -> Result<(), BookError> {
        if order.side != self.side {
            return Err(BookError::invalid(format!(
                "{} order {} cannot rest on the {} ledger",
                order.side, order.id, self.side
            )));
        }
        if order.quantity <= 0 {
            return Err(BookError::invalid(format!(
                "resting order {} has non-positive quantity {}",
                order.id, order.quantity
            )));
        }
        let level = self.levels.entry(order.price).or_default();
        if let Some(back) = level.back() {
            if back.sequence >= order.sequence {
                return Err(BookError::invalid(format!(
                    "resting order {} sequence {} is not after {}",
                    order.id, order.sequence, back.sequence
                )));
            }
        }
        level.push_back(order);
        Ok(())
    }

    fn best_level(&self) -> Option<(&Price, &VecDeque<RestingOrder>)> {
        match self.side {
            Side::Buy => self.levels.iter().next_back(),
            Side::Sell => self.levels.iter().next(),
        }
    }

    fn best_level_mut(&mut self) -> Option<&mut VecDeque<RestingOrder>> {
        match self.side {
            Side::Buy => self.levels.values_mut().next_back(),
            Side::Sell => self.levels.values_mut().next(),
        }
    }

    /// Best-priority order, if any.
    pub fn head(&self) -> Option<&RestingOrder> {
        self.best_level().and_then(|(_, queue)| queue.front())
    }

    pub(crate) fn head_mut(&mut self) -> Option<&mut RestingOrder> {
        self.best_level_mut().and_then(|queue| queue.front_mut())
    }

    /// Removes and returns the head order. Drops its price level if that empties it.
    pub(crate) fn pop_head(&mut self) -> Option<RestingOrder> {
        let price = *self.best_level()?.0;
        let queue = self.levels.get_mut(&price)?;
        let order = queue.pop_front();
        if queue.is_empty() {
            self.levels.remove(&price);
        }
        order
    }

    pub fn best_price(&self) -> Option<Price> {
        self.best_level().map(|(price, _)| *price)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of resting orders.
    pub fn len(&self) -> usize {
        self.levels.values().map(VecDeque::len).sum()
    }

    pub fn total_quantity(&self) -> Quantity {
        self.iter().map(|o| o.quantity).sum()
    }

    /// Price levels, best first: (price, FIFO queue).
    pub fn levels(&self) -> Box<dyn Iterator<Item = (&Price, &VecDeque<RestingOrder>)> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.iter().rev()),
            Side::Sell => Box::new(self.levels.iter()),
        }
    }

    /// Resting orders in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> + '_ {
        self.levels().flat_map(|(_, queue)| queue.iter())
    }
}

/// Limit order book with its own trade tape, sequence counter, and clock.
///
/// Not internally synchronized; see [`crate::shared::SharedOrderBook`] for use across
/// threads.
#[derive(Debug)]
pub struct OrderBook {
    config: BookConfig,
    bids: Ledger,
    asks: Ledger,
    tape: Tape,
    clock: Box<dyn Clock>,
    next_sequence: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Book with default config and a wall clock.
    pub fn new() -> Self {
        Self::with_config(BookConfig::default(), WallClock::new())
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::with_config(BookConfig::default(), clock)
    }

    pub fn with_config(config: BookConfig, clock: impl Clock + 'static) -> Self {
        Self {
            config,
            bids: Ledger::new(Side::Buy),
            asks: Ledger::new(Side::Sell),
            tape: Tape::new(),
            clock: Box::new(clock),
            next_sequence: 1,
        }
    }

    /// Submits an order: matches it against the opposite ledger, then rests any limit
    /// residual and discards any market residual.
    ///
    /// Returns the trades produced by this call. An order with `quantity <= 0` is
    /// dropped and yields no trades. A limit order without a price, or with a price
    /// beyond [`crate::types::max_price_magnitude`], is rejected before anything is mutated.
    pub fn submit(&mut self, mut order: Order) -> Result<Vec<TradeRecord>, BookError> {
        if order.quantity <= 0 {
            debug!(
                "degenerate order dropped order_id={} quantity={}",
                order.id, order.quantity
            );
            return Ok(Vec::new());
        }
        let limit_price = match order.kind {
            OrderKind::Limit => match order.price.map(check_limit_price) {
                Some(Ok(price)) => Some(price),
                Some(Err(e)) => {
                    warn!("order rejected order_id={} reason={}", order.id, e);
                    return Err(e);
                }
                None => {
                    warn!("order rejected order_id={} reason=limit order without price", order.id);
                    return Err(BookError::invalid("limit order must have a price"));
                }
            },
            OrderKind::Market => None,
        };

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let submitted_at = self.clock.now();
        info!(
            "order submitted order_id={} side={} kind={:?} quantity={} price={:?} sequence={}",
            order.id, order.side, order.kind, order.quantity, limit_price, sequence
        );

        let opposite = match order.side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };
        let trades = match_order(
            opposite,
            &mut order,
            limit_price,
            &mut self.tape,
            self.clock.as_mut(),
        );
        for trade in &trades {
            info!(
                "trade taker={} maker={} price={} quantity={}",
                trade.taker_id, trade.maker_id, trade.price, trade.quantity
            );
        }

        if order.quantity > 0 {
            match limit_price {
                None => info!(
                    "market order residual discarded order_id={} quantity={}",
                    order.id, order.quantity
                ),
                Some(price) => {
                    debug!(
                        "order resting order_id={} side={} price={} quantity={}",
                        order.id, order.side, price, order.quantity
                    );
                    let own = match order.side {
                        Side::Buy => &mut self.bids,
                        Side::Sell => &mut self.asks,
                    };
                    own.insert(RestingOrder {
                        id: order.id,
                        side: order.side,
                        price,
                        quantity: order.quantity,
                        sequence,
                        submitted_at,
                    })?;
                }
            }
        }
        Ok(trades)
    }

    /// Best bid/ask, mid-price, and spread.
    pub fn snapshot(&self) -> Snapshot {
        snapshot::snapshot(self)
    }

    /// Aggregated view of the top `levels` price levels per side.
    pub fn depth(&self, levels: usize) -> Depth {
        Depth::from_book(self, levels)
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn bids(&self) -> &Ledger {
        &self.bids
    }

    pub fn asks(&self) -> &Ledger {
        &self.asks
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Best bid price (None if empty).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Best ask price (None if empty).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Total quantity resting on both sides.
    pub fn resting_quantity(&self) -> Quantity {
        self.bids.total_quantity() + self.asks.total_quantity()
    }
}
