//! Property-based and deterministic invariant tests.
//!
//! Uses proptest to generate (seed, num_orders); replays synthetic orders into the book
//! and asserts after every submit: no crossed book, maker-price execution, positive
//! trade quantities. At the end: quantity conservation. Same seed ⇒ same outcome.

use double_auction_book::market_data_gen::{Generator, GeneratorConfig};
use double_auction_book::{Order, OrderBook, OrderKind, Price, Quantity, Side, StepClock, TradeRecord};
use proptest::prelude::*;

/// Invariant: best_bid < best_ask when both exist (no crossed book).
fn assert_no_crossed_book(book: &OrderBook) {
    if let (Some(b), Some(a)) = (book.best_bid(), book.best_ask()) {
        assert!(b < a, "invariant: best_bid {:?} < best_ask {:?}", b, a);
    }
}

/// Replays `orders`, checking per-call invariants. Returns (all trades, discarded market residual).
fn replay_checked(book: &mut OrderBook, orders: Vec<Order>) -> (Vec<TradeRecord>, Quantity) {
    let mut all_trades = Vec::new();
    let mut discarded = 0;
    for order in orders {
        let submitted = order.quantity;
        let kind = order.kind;
        let limit = order.price;
        let side = order.side;
        let trades = book.submit(order).unwrap();
        let filled: Quantity = trades.iter().map(|t| t.quantity).sum();
        assert!(filled <= submitted.max(0));
        for t in &trades {
            assert!(t.quantity > 0, "trade quantity must be positive");
            assert_eq!(t.taker_side, side);
            if let (OrderKind::Limit, Some(p)) = (kind, limit) {
                // Maker price never worse than the taker's limit.
                match side {
                    Side::Buy => assert!(t.price <= p),
                    Side::Sell => assert!(t.price >= p),
                }
            }
        }
        if kind == OrderKind::Market && submitted > 0 {
            discarded += submitted - filled;
        }
        assert_no_crossed_book(book);
        all_trades.extend(trades);
    }
    (all_trades, discarded)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any (seed, num_orders): the book is never crossed, and every submitted unit is
    /// either resting, traded (once on each side), or a discarded market residual.
    #[test]
    fn prop_invariants_hold_after_replay(seed in 0u64..100_000u64, num_orders in 10usize..200usize) {
        let config = GeneratorConfig {
            seed,
            num_orders,
            quantity_min: -2,
            quantity_max: 50,
            ..Default::default()
        };
        let orders = Generator::new(config).unwrap().all_orders();
        let submitted: Quantity = orders.iter().map(|o| o.quantity.max(0)).sum();
        let mut book = OrderBook::with_clock(StepClock::default());
        let (trades, discarded) = replay_checked(&mut book, orders);

        let traded: Quantity = trades.iter().map(|t| t.quantity).sum();
        prop_assert_eq!(submitted, book.resting_quantity() + 2 * traded + discarded);
        prop_assert_eq!(trades.as_slice(), book.tape().all());
        prop_assert!(book.bids().iter().chain(book.asks().iter()).all(|o| o.quantity > 0));
    }

    /// Resting orders at one price are consumed strictly in sequence order.
    #[test]
    fn prop_same_price_fills_in_arrival_order(count in 2usize..10, take in 1i64..60) {
        let mut book = OrderBook::with_clock(StepClock::default());
        for i in 0..count {
            book.submit(Order::limit(format!("A{}", i), Side::Sell, Price::from(100), 5)).unwrap();
        }
        let trades = book.submit(Order::market("T", Side::Buy, take)).unwrap();
        for (i, t) in trades.iter().enumerate() {
            let expected = format!("A{}", i);
            prop_assert_eq!(t.maker_id.as_str(), expected.as_str());
        }
    }
}

/// Deterministic replay: same config ⇒ same tape.
#[test]
fn deterministic_replay_same_seed_same_outcome() {
    let config = GeneratorConfig {
        seed: 999,
        num_orders: 300,
        ..Default::default()
    };

    let mut book1 = OrderBook::with_clock(StepClock::default());
    replay_checked(&mut book1, Generator::new(config.clone()).unwrap().all_orders());

    let mut book2 = OrderBook::with_clock(StepClock::default());
    replay_checked(&mut book2, Generator::new(config).unwrap().all_orders());

    assert!(!book1.tape().is_empty());
    assert_eq!(book1.tape().all(), book2.tape().all(), "same trades");
    assert_eq!(book1.snapshot(), book2.snapshot(), "same top of book");
}

/// Fractional prices keep the same guarantees.
#[test]
fn cent_priced_stream_never_crosses() {
    let config = GeneratorConfig {
        seed: 5,
        num_orders: 500,
        price_min: 9_950,
        price_max: 10_050,
        price_scale: 2,
        ..Default::default()
    };
    let mut book = OrderBook::with_clock(StepClock::default());
    let (trades, _) = replay_checked(&mut book, Generator::new(config).unwrap().all_orders());
    assert!(!trades.is_empty());
}
