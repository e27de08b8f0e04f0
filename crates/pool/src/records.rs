//! Pooled record shapes for the trading pipeline.
//!
//! Every record's `Default` impl is its canonical empty shape: numbers zero,
//! strings empty, enums and timestamps unset. [`Poolable::reset`] restores
//! exactly that shape in place, clearing strings without giving back their
//! storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::poolable::Poolable;

/// Side of an order or trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
}

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Open,
    PartiallyFilled,
    Filled,
    Cancelled,
    Rejected,
}

/// Order record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub client_order_id: String,
    pub symbol: String,
    pub side: Option<Side>,
    pub order_type: Option<OrderType>,
    pub status: Option<OrderStatus>,
    pub quantity: f64,
    pub price: f64,
    pub stop_price: f64,
    pub filled_quantity: f64,
    pub average_fill_price: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Order {
    /// Quantity still open
    #[must_use]
    pub fn remaining_quantity(&self) -> f64 {
        (self.quantity - self.filled_quantity).max(0.0)
    }
}

impl Poolable for Order {
    fn reset(&mut self) {
        self.order_id.clear();
        self.client_order_id.clear();
        self.symbol.clear();
        self.side = None;
        self.order_type = None;
        self.status = None;
        self.quantity = 0.0;
        self.price = 0.0;
        self.stop_price = 0.0;
        self.filled_quantity = 0.0;
        self.average_fill_price = 0.0;
        self.timestamp = None;
    }
}

/// Executed trade record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: String,
    pub order_id: String,
    pub symbol: String,
    pub side: Option<Side>,
    pub quantity: f64,
    pub price: f64,
    pub fee: f64,
    pub fee_currency: String,
    pub executed_at: Option<DateTime<Utc>>,
}

impl Trade {
    /// Traded value before fees
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}

impl Poolable for Trade {
    fn reset(&mut self) {
        self.trade_id.clear();
        self.order_id.clear();
        self.symbol.clear();
        self.side = None;
        self.quantity = 0.0;
        self.price = 0.0;
        self.fee = 0.0;
        self.fee_currency.clear();
        self.executed_at = None;
    }
}

/// Top-of-book market tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketTick {
    pub symbol: String,
    pub bid: f64,
    pub ask: f64,
    pub bid_size: f64,
    pub ask_size: f64,
    pub last: f64,
    pub volume: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MarketTick {
    /// Mid price, or zero when either side is missing
    #[must_use]
    pub fn mid(&self) -> f64 {
        if self.bid > 0.0 && self.ask > 0.0 {
            (self.bid + self.ask) / 2.0
        } else {
            0.0
        }
    }

    /// Ask minus bid
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

impl Poolable for MarketTick {
    fn reset(&mut self) {
        self.symbol.clear();
        self.bid = 0.0;
        self.ask = 0.0;
        self.bid_size = 0.0;
        self.ask_size = 0.0;
        self.last = 0.0;
        self.volume = 0.0;
        self.timestamp = None;
    }
}

/// Position record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
    pub market_price: f64,
    pub unrealized_pnl: f64,
    pub realized_pnl: f64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Position {
    /// Mark the position to `price` and recompute unrealized PnL
    pub fn mark(&mut self, price: f64) {
        self.market_price = price;
        self.unrealized_pnl = (price - self.average_price) * self.quantity;
    }

    /// Current market value
    #[must_use]
    pub fn market_value(&self) -> f64 {
        self.quantity * self.market_price
    }
}

impl Poolable for Position {
    fn reset(&mut self) {
        self.symbol.clear();
        self.quantity = 0.0;
        self.average_price = 0.0;
        self.market_price = 0.0;
        self.unrealized_pnl = 0.0;
        self.realized_pnl = 0.0;
        self.updated_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled_order() -> Order {
        Order {
            order_id: "ord-1".into(),
            client_order_id: "cl-1".into(),
            symbol: "BTC-USD".into(),
            side: Some(Side::Buy),
            order_type: Some(OrderType::Limit),
            status: Some(OrderStatus::PartiallyFilled),
            quantity: 2.0,
            price: 64_000.0,
            stop_price: 63_000.0,
            filled_quantity: 0.5,
            average_fill_price: 63_990.0,
            timestamp: Some(Utc::now()),
        }
    }

    #[test]
    fn order_reset_matches_default() {
        let mut order = filled_order();
        let cap = order.symbol.capacity();

        order.reset();
        assert_eq!(order, Order::default());
        assert_eq!(order.symbol.capacity(), cap);
    }

    #[test]
    fn trade_reset_matches_default() {
        let mut trade = Trade {
            trade_id: "t-9".into(),
            order_id: "ord-1".into(),
            symbol: "ETH-USD".into(),
            side: Some(Side::Sell),
            quantity: 3.0,
            price: 3_100.0,
            fee: 1.2,
            fee_currency: "USD".into(),
            executed_at: Some(Utc::now()),
        };
        assert_eq!(trade.notional(), 9_300.0);

        trade.reset();
        assert_eq!(trade, Trade::default());
    }

    #[test]
    fn tick_reset_matches_default() {
        let mut tick = MarketTick {
            symbol: "SOL-USD".into(),
            bid: 99.0,
            ask: 101.0,
            bid_size: 10.0,
            ask_size: 12.0,
            last: 100.5,
            volume: 1_000.0,
            timestamp: Some(Utc::now()),
        };
        assert_eq!(tick.mid(), 100.0);
        assert_eq!(tick.spread(), 2.0);

        tick.reset();
        assert_eq!(tick, MarketTick::default());
        assert_eq!(tick.mid(), 0.0);
    }

    #[test]
    fn position_reset_matches_default() {
        let mut position = Position {
            symbol: "BTC-USD".into(),
            quantity: 2.0,
            average_price: 60_000.0,
            realized_pnl: 150.0,
            updated_at: Some(Utc::now()),
            ..Position::default()
        };
        position.mark(61_000.0);
        assert_eq!(position.unrealized_pnl, 2_000.0);
        assert_eq!(position.market_value(), 122_000.0);

        position.reset();
        assert_eq!(position, Position::default());
    }

    #[test]
    fn remaining_quantity_never_negative() {
        let mut order = filled_order();
        assert_eq!(order.remaining_quantity(), 1.5);
        order.filled_quantity = 3.0;
        assert_eq!(order.remaining_quantity(), 0.0);
    }
}
