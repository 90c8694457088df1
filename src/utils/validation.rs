//! Field-level validation rules for incoming orders.
//!
//! Checks run in a fixed sequence and the first failure wins, so an
//! order with several problems reports the earliest one. The rules are
//! pure: the order itself is never mutated, callers record the returned
//! code and derive the status from it.

use chrono::{Datelike, NaiveDate};

use crate::types::order::{
    Order, OrderValidationCode, Restaurant, MAX_PIZZAS_PER_ORDER, ORDER_CHARGE_IN_PENCE,
};

/// Validates one order against the defined restaurants.
pub fn validate_order(order: &Order, restaurants: &[Restaurant]) -> OrderValidationCode {
    if order.pizzas_in_order.is_empty() {
        return OrderValidationCode::PizzaNotDefined;
    }

    // Every ordered pizza must appear on some restaurant's menu.
    for pizza in &order.pizzas_in_order {
        if !restaurants.iter().any(|r| r.menu.contains(pizza)) {
            return OrderValidationCode::PizzaNotDefined;
        }
    }

    if order.pizzas_in_order.len() > MAX_PIZZAS_PER_ORDER {
        return OrderValidationCode::MaxPizzaCountExceeded;
    }

    let card = &order.credit_card_information;
    if !is_digit_string(&card.credit_card_number, 16) {
        return OrderValidationCode::CardNumberInvalid;
    }
    if !expiry_covers(&card.credit_card_expiry, order.order_date) {
        return OrderValidationCode::ExpiryDateInvalid;
    }
    if !is_digit_string(&card.cvv, 3) {
        return OrderValidationCode::CvvInvalid;
    }

    let Some(restaurant) = restaurant_for_order(order, restaurants) else {
        return OrderValidationCode::PizzaFromMultipleRestaurants;
    };

    if !restaurant.opening_days.contains(&order.order_date.weekday()) {
        return OrderValidationCode::RestaurantClosed;
    }

    let pizza_total: u32 = order.pizzas_in_order.iter().map(|p| p.price_in_pence).sum();
    if order.price_total_in_pence != pizza_total + ORDER_CHARGE_IN_PENCE {
        return OrderValidationCode::TotalIncorrect;
    }

    OrderValidationCode::NoError
}

/// The restaurant able to serve every pizza in the order, if one exists.
/// Each pizza may well be defined on some menu while no single
/// restaurant carries them all; that is the multiple-restaurants case.
pub fn restaurant_for_order<'a>(
    order: &Order,
    restaurants: &'a [Restaurant],
) -> Option<&'a Restaurant> {
    restaurants
        .iter()
        .find(|r| order.pizzas_in_order.iter().all(|p| r.menu.contains(p)))
}

fn is_digit_string(value: &str, expected_len: usize) -> bool {
    value.len() == expected_len && value.chars().all(|c| c.is_ascii_digit())
}

/// Whether an `MM/yy` expiry string is well-formed and not past at
/// `date`. Validation is anchored to the order date, not the wall
/// clock, so the same order always validates the same way.
fn expiry_covers(expiry: &str, date: NaiveDate) -> bool {
    if expiry.len() != 5 || !expiry.is_ascii() || expiry.as_bytes()[2] != b'/' {
        return false;
    }
    let (Ok(month), Ok(year)) = (expiry[..2].parse::<i32>(), expiry[3..].parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }
    let order_year = date.year() - 2000;
    if year < order_year {
        return false;
    }
    if year == order_year && month < date.month() as i32 {
        return false;
    }
    true
}
