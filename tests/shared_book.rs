//! Several threads submitting through one shared book.

use std::thread;

use double_auction_book::market_data_gen::{Generator, GeneratorConfig};
use double_auction_book::{OrderBook, Quantity, Settlement, SharedOrderBook, StepClock};

#[test]
fn concurrent_submitters_keep_book_consistent() {
    let _ = env_logger::try_init();
    let shared = SharedOrderBook::new(OrderBook::with_clock(StepClock::default()));
    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let book = shared.clone();
            thread::spawn(move || {
                let orders = Generator::new(GeneratorConfig {
                    seed: 100 + worker,
                    num_orders: 250,
                    limit_ratio: 1.0,
                    ..Default::default()
                })
                .unwrap()
                .all_orders();
                let mut submitted: Quantity = 0;
                for order in orders {
                    submitted += order.quantity;
                    book.submit(order).unwrap();
                    let snap = book.snapshot();
                    if let (Some(bid), Some(ask)) = (snap.best_bid, snap.best_ask) {
                        assert!(bid < ask);
                    }
                }
                submitted
            })
        })
        .collect();
    let submitted: Quantity = handles.into_iter().map(|h| h.join().unwrap()).sum();

    let (trades, next) = shared.trades_since(0);
    let traded: Quantity = trades.iter().map(|t| t.quantity).sum();
    let resting = shared.read(|b| b.resting_quantity());
    assert_eq!(submitted, resting + 2 * traded);
    assert_eq!(next, trades.len());
    assert!(trades.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn settlement_reads_shared_tape_incrementally() {
    let shared = SharedOrderBook::new(OrderBook::with_clock(StepClock::default()));
    let orders = Generator::new(GeneratorConfig {
        seed: 11,
        num_orders: 200,
        num_traders: 2,
        ..Default::default()
    })
    .unwrap()
    .all_orders();
    let mut settlement = Settlement::new("T1-1", Default::default());
    for order in orders {
        shared.submit(order).unwrap();
        shared.read(|b| settlement.settle(b.tape()));
    }
    assert_eq!(settlement.cursor(), shared.trades_since(0).1);
}
