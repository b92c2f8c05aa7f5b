//! Synthetic order stream.
//!
//! Deterministic, configurable orders for replay tests, benchmarks, and the demo binary.
//! Same seed ⇒ same sequence of orders.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::BookError;
use crate::order_book::OrderBook;
use crate::types::{Order, OrderKind, Price, Quantity, Side};

/// Configuration for the synthetic order generator.
/// All ranges are inclusive. Same config + seed produces the same stream.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed ⇒ same order stream.
    pub seed: u64,
    /// Number of orders returned by [`Generator::all_orders`].
    pub num_orders: usize,
    /// Probability of Buy (0.0..=1.0). Sell otherwise.
    pub buy_ratio: f64,
    /// Probability of Limit order (0.0..=1.0). Market otherwise.
    pub limit_ratio: f64,
    /// Price range in ticks for limit orders. Ignored for market.
    pub price_min: i64,
    pub price_max: i64,
    /// Decimal places of a tick: 0 gives whole prices, 2 gives cents.
    pub price_scale: u32,
    /// Quantity range, whole units. A minimum `<= 0` also yields degenerate orders.
    pub quantity_min: Quantity,
    pub quantity_max: Quantity,
    /// Number of distinct participants; order ids are `T{trader}-{n}`.
    pub num_traders: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_orders: 1000,
            buy_ratio: 0.5,
            limit_ratio: 0.9,
            price_min: 95,
            price_max: 105,
            price_scale: 0,
            quantity_min: 1,
            quantity_max: 100,
            num_traders: 5,
        }
    }
}

/// Deterministic order stream. Create with [`Generator::new`]; pull with [`Generator::next_order`].
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    next_order: u64,
}

/// Largest tick scale a [`Price`] can carry.
const MAX_PRICE_SCALE: u32 = 28;

impl Generator {
    /// Rejects inverted quantity or price ranges and a `price_scale` above 28.
    pub fn new(config: GeneratorConfig) -> Result<Self, BookError> {
        if config.quantity_min > config.quantity_max {
            return Err(BookError::InvalidConfig(format!(
                "quantity_min {} is above quantity_max {}",
                config.quantity_min, config.quantity_max
            )));
        }
        if config.price_min > config.price_max {
            return Err(BookError::InvalidConfig(format!(
                "price_min {} is above price_max {}",
                config.price_min, config.price_max
            )));
        }
        if config.price_scale > MAX_PRICE_SCALE {
            return Err(BookError::InvalidConfig(format!(
                "price_scale {} exceeds {}",
                config.price_scale, MAX_PRICE_SCALE
            )));
        }
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            rng,
            config,
            next_order: 1,
        })
    }

    /// Generates the next order. Advances the counter and the RNG.
    pub fn next_order(&mut self) -> Order {
        let n = self.next_order;
        self.next_order += 1;
        let trader = self.rng.gen_range(1..=self.config.num_traders.max(1));
        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let kind = if self.rng.gen::<f64>() < self.config.limit_ratio {
            OrderKind::Limit
        } else {
            OrderKind::Market
        };
        let quantity = self
            .rng
            .gen_range(self.config.quantity_min..=self.config.quantity_max);
        let price = match kind {
            OrderKind::Limit => {
                let ticks = self
                    .rng
                    .gen_range(self.config.price_min..=self.config.price_max);
                Some(Price::new(ticks, self.config.price_scale))
            }
            OrderKind::Market => None,
        };
        Order {
            id: format!("T{}-{}", trader, n).into(),
            side,
            kind,
            price,
            quantity,
        }
    }

    pub fn take_orders(&mut self, n: usize) -> Vec<Order> {
        (0..n).map(|_| self.next_order()).collect()
    }

    /// The full stream as defined by `config.num_orders`.
    pub fn all_orders(&mut self) -> Vec<Order> {
        self.take_orders(self.config.num_orders)
    }
}

/// Submits every order in turn. Returns the total number of trades, or the first error.
pub fn replay_into_book(
    book: &mut OrderBook,
    orders: impl IntoIterator<Item = Order>,
) -> Result<usize, BookError> {
    let mut total_trades = 0usize;
    for order in orders {
        total_trades += book.submit(order)?.len();
    }
    Ok(total_trades)
}
