//! Order-domain data model: restaurants, pizzas, orders and the outcome
//! codes attached to them.
//!
//! Wire field names match the data service's camelCase JSON
//! (`orderNo`, `priceTotalInPence`, ...).

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use super::coordinate::LngLat;

/// Most pizzas a single order may carry.
pub const MAX_PIZZAS_PER_ORDER: usize = 4;

/// Fixed delivery charge added to every order total, in pence.
pub const ORDER_CHARGE_IN_PENCE: u32 = 100;

/// A menu item. Orders reference pizzas structurally, so two pizzas are
/// the same iff name and price both match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    pub name: String,
    pub price_in_pence: u32,
}

/// A restaurant the drone can collect from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub location: LngLat,
    #[serde(deserialize_with = "weekday_list")]
    pub opening_days: Vec<Weekday>,
    pub menu: Vec<Pizza>,
}

/// Opening days arrive as day names ("MONDAY", ...); chrono's `FromStr`
/// accepts them case-insensitively.
fn weekday_list<'de, D>(deserializer: D) -> Result<Vec<Weekday>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    names
        .iter()
        .map(|name| {
            name.parse::<Weekday>()
                .map_err(|_| serde::de::Error::custom(format!("invalid weekday {name:?}")))
        })
        .collect()
}

/// Card details supplied with an order. Held as raw strings; the
/// validation rules decide whether they are well-formed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardInformation {
    pub credit_card_number: String,
    pub credit_card_expiry: String,
    pub cvv: String,
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Undefined,
    Invalid,
    ValidButNotDelivered,
    Delivered,
}

/// Outcome of the order validation rules. `NoError` marks a deliverable
/// order; every other code names the first check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderValidationCode {
    #[default]
    Undefined,
    NoError,
    PizzaNotDefined,
    MaxPizzaCountExceeded,
    CardNumberInvalid,
    ExpiryDateInvalid,
    CvvInvalid,
    TotalIncorrect,
    PizzaFromMultipleRestaurants,
    RestaurantClosed,
}

/// One incoming pizza order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_no: String,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub order_validation_code: OrderValidationCode,
    pub price_total_in_pence: u32,
    pub pizzas_in_order: Vec<Pizza>,
    pub credit_card_information: CreditCardInformation,
}
