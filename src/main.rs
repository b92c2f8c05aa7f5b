//! Demo: builds a small book, takes liquidity with market orders, and prints the ladder.
//!
//! Environment: `DEPTH_LEVELS` (default 5), `REFERENCE_PRICE` (default 100),
//! `REPLAY_ORDERS` / `REPLAY_SEED` to also replay a synthetic stream, `RUST_LOG`.

use double_auction_book::market_data_gen::{replay_into_book, Generator, GeneratorConfig};
use double_auction_book::{BookConfig, BookError, Order, OrderBook, Price, Side, WallClock};
use log::info;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), BookError> {
    let _ = env_logger::try_init();
    let levels: usize = env_or("DEPTH_LEVELS", 5);
    let reference_price: Price = env_or("REFERENCE_PRICE", Price::from(100));
    let mut book = OrderBook::with_config(BookConfig { reference_price }, WallClock::new());

    println!("1. Submitting 15 passive limit orders...");
    for i in 0..15i64 {
        let step = i / 2;
        let (side, price) = if i % 2 == 0 {
            (Side::Buy, 99 - step)
        } else {
            (Side::Sell, 101 + step)
        };
        book.submit(Order::limit(format!("ORD_{}", i), side, Price::from(price), 10 + i))?;
    }
    println!("{}\n", book.depth(levels));

    println!("2. Submitting 10 aggressive market orders...");
    for j in 0..10 {
        let side = if j % 2 != 0 { Side::Buy } else { Side::Sell };
        println!("[Incoming {} market order {} for 5 units]", side, j);
        for t in book.submit(Order::market(format!("MKT_{}", j), side, 5))? {
            println!(">>> TRADE: {} @ {} (Taker: {}, Maker: {})", t.quantity, t.price, t.taker_id, t.maker_id);
        }
    }
    println!("{}\n", book.depth(levels));

    let replay_orders: usize = env_or("REPLAY_ORDERS", 0);
    if replay_orders > 0 {
        let config = GeneratorConfig {
            seed: env_or("REPLAY_SEED", 42),
            num_orders: replay_orders,
            ..Default::default()
        };
        let trades = replay_into_book(&mut book, Generator::new(config)?.all_orders())?;
        info!("replayed orders={} trades={}", replay_orders, trades);
        println!("{}\n", book.depth(levels));
    }

    match serde_json::to_string_pretty(&book.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("snapshot encode failed: {}", e),
    }
    Ok(())
}
