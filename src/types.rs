//! Core order types.
//!
//! [`Order`] is what a caller submits; [`RestingOrder`] is what a ledger holds once the
//! book has stamped it with a sequence number. Prices are [`Decimal`] so they are exact,
//! finite, and totally ordered.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::BookError;

/// Limit price, or execution price of a trade.
pub type Price = Decimal;

/// Order and trade size in whole units. Signed so a degenerate (`<= 0`) submission is
/// representable; the book drops those without matching.
pub type Quantity = i64;

/// Caller-supplied order identifier. Opaque to the book; uniqueness is not checked.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId(s.to_owned())
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        OrderId(s)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl FromStr for Side {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(BookError::invalid(format!("unrecognized side {:?}", other))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        })
    }
}

/// Order kind: limit (rests if not fully filled) or market (never rests).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Limit,
    Market,
}

impl FromStr for OrderKind {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "limit" => Ok(OrderKind::Limit),
            "market" => Ok(OrderKind::Market),
            other => Err(BookError::invalid(format!("unrecognized order kind {:?}", other))),
        }
    }
}

/// Converts a float price (e.g. `mid + offset` computed by a strategy) into a [`Price`].
///
/// NaN and infinities are rejected as [`BookError::InvalidOrder`].
pub fn price_from_f64(value: f64) -> Result<Price, BookError> {
    if !value.is_finite() {
        return Err(BookError::invalid(format!("price {} is not finite", value)));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| BookError::invalid(format!("price {} is out of range", value)))
}

/// Largest accepted limit price magnitude, `(Decimal::MAX - 1) / 2`. The sum or
/// difference of any two accepted prices stays within the [`Decimal`] range.
pub fn max_price_magnitude() -> Price {
    (Decimal::MAX - Decimal::ONE) / Decimal::TWO
}

/// Rejects a limit price whose magnitude exceeds [`max_price_magnitude`].
pub fn check_limit_price(price: Price) -> Result<Price, BookError> {
    if price.abs() > max_price_magnitude() {
        return Err(BookError::invalid(format!(
            "limit price {} exceeds the supported magnitude",
            price
        )));
    }
    Ok(price)
}

/// Incoming order.
///
/// `price` must be `Some(..)` for limit orders. For market orders it is ignored.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub kind: OrderKind,
    pub price: Option<Price>,
    pub quantity: Quantity,
}

impl Order {
    pub fn limit(id: impl Into<OrderId>, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            id: id.into(),
            side,
            kind: OrderKind::Limit,
            price: Some(price),
            quantity,
        }
    }

    pub fn market(id: impl Into<OrderId>, side: Side, quantity: Quantity) -> Self {
        Self {
            id: id.into(),
            side,
            kind: OrderKind::Market,
            price: None,
            quantity,
        }
    }

    /// Builds an order from loosely typed fields, as a caller decoding external input would.
    pub fn parse(
        id: impl Into<OrderId>,
        side: &str,
        kind: &str,
        price: Option<Price>,
        quantity: Quantity,
    ) -> Result<Self, BookError> {
        Ok(Self {
            id: id.into(),
            side: side.parse()?,
            kind: kind.parse()?,
            price,
            quantity,
        })
    }

    pub fn is_limit(&self) -> bool {
        matches!(self.kind, OrderKind::Limit)
    }

    pub fn is_market(&self) -> bool {
        matches!(self.kind, OrderKind::Market)
    }
}

/// Limit order held in a ledger. Only the book creates these.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RestingOrder {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    /// Remaining quantity; always `> 0` while in a ledger.
    pub quantity: Quantity,
    /// Arrival order, the time component of priority.
    pub sequence: u64,
    /// Clock reading when the order was submitted.
    pub submitted_at: u64,
}
