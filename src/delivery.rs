//! Delivery-day planning: validate orders, route to each restaurant
//! once, and assemble the output records consumers serialize.
//!
//! Sourcing the input data and writing the artifacts to wherever they
//! belong stays with the caller; this module's contract ends at
//! serializable values.

use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use serde::Serialize;
use serde_json::{json, Value};

use crate::algorithms::route::{round_trip, RouteFinder};
use crate::types::coordinate::LngLat;
use crate::types::node::PathNode;
use crate::types::order::{Order, OrderStatus, OrderValidationCode, Restaurant};
use crate::utils::airspace::Airspace;
use crate::utils::validation::{restaurant_for_order, validate_order};

/// Default launch pad all delivery routes start from (Appleton Tower).
pub const LAUNCH_PAD: LngLat = LngLat {
    lng: OrderedFloat(-3.186874),
    lat: OrderedFloat(55.944494),
};

/// Per-order outcome, serialized into the deliveries artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub order_no: String,
    pub order_status: OrderStatus,
    pub order_validation_code: OrderValidationCode,
    pub cost_in_pence: u32,
}

/// One drone move of one order's route, serialized into the flightpath
/// artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightpathRecord {
    pub order_no: String,
    pub from_longitude: f64,
    pub from_latitude: f64,
    /// Heading flown in degrees; `None` for a hover.
    pub angle: Option<f64>,
    pub to_longitude: f64,
    pub to_latitude: f64,
}

/// Everything one delivery day produces.
#[derive(Debug, Clone)]
pub struct DeliveryPlan {
    pub deliveries: Vec<DeliveryRecord>,
    pub flightpaths: Vec<FlightpathRecord>,
    /// GeoJSON FeatureCollection with one LineString per delivered
    /// order's round trip.
    pub routes: Value,
}

/// Plans one delivery day.
///
/// Orders are validated in place (status and code recorded on each),
/// then the drone routes from the launch pad to every distinct
/// restaurant serving a valid order. Routing once per restaurant is
/// enough: every order for it reuses the same round trip. A route
/// failure for one restaurant is logged and skipped so the remaining
/// restaurants still get served.
pub fn plan_deliveries(
    airspace: &Airspace,
    launch_pad: LngLat,
    restaurants: &[Restaurant],
    orders: &mut [Order],
) -> DeliveryPlan {
    info!("[1/4] validating {} orders", orders.len());
    for order in orders.iter_mut() {
        let code = validate_order(order, restaurants);
        order.order_validation_code = code;
        order.order_status = if code == OrderValidationCode::NoError {
            OrderStatus::ValidButNotDelivered
        } else {
            OrderStatus::Invalid
        };
        debug!("order {}: {:?}", order.order_no, code);
    }

    info!("[2/4] routing to restaurants with valid orders");
    let finder = RouteFinder::new(airspace);
    let mut trips: Vec<(String, Vec<PathNode>)> = Vec::new();
    for order in orders.iter() {
        if order.order_validation_code != OrderValidationCode::NoError {
            continue;
        }
        let Some(restaurant) = restaurant_for_order(order, restaurants) else {
            continue;
        };
        if trips.iter().any(|(name, _)| *name == restaurant.name) {
            continue;
        }
        match finder.find_route(launch_pad, restaurant.location) {
            Ok(forward) => trips.push((restaurant.name.clone(), round_trip(&forward))),
            Err(err) => warn!("cannot serve restaurant {:?}: {}", restaurant.name, err),
        }
    }

    info!("[3/4] marking delivered orders");
    for order in orders.iter_mut() {
        if order.order_status != OrderStatus::ValidButNotDelivered {
            continue;
        }
        let routed = restaurant_for_order(order, restaurants)
            .map(|restaurant| trips.iter().any(|(name, _)| *name == restaurant.name))
            .unwrap_or(false);
        if routed {
            order.order_status = OrderStatus::Delivered;
        }
    }

    info!("[4/4] assembling output records");
    let deliveries = orders.iter().map(delivery_record).collect();
    let mut flightpaths = Vec::new();
    let mut route_features = Vec::new();
    for order in orders.iter() {
        if order.order_status != OrderStatus::Delivered {
            continue;
        }
        let Some(restaurant) = restaurant_for_order(order, restaurants) else {
            continue;
        };
        let Some((_, trip)) = trips.iter().find(|(name, _)| *name == restaurant.name) else {
            continue;
        };
        flightpaths.extend(trip.iter().map(|node| flightpath_record(order, node)));
        route_features.push(route_feature(trip));
    }

    DeliveryPlan {
        deliveries,
        flightpaths,
        routes: json!({
            "type": "FeatureCollection",
            "features": route_features,
        }),
    }
}

fn delivery_record(order: &Order) -> DeliveryRecord {
    DeliveryRecord {
        order_no: order.order_no.clone(),
        order_status: order.order_status,
        order_validation_code: order.order_validation_code,
        cost_in_pence: order.price_total_in_pence,
    }
}

fn flightpath_record(order: &Order, node: &PathNode) -> FlightpathRecord {
    FlightpathRecord {
        order_no: order.order_no.clone(),
        from_longitude: node.parent.lng(),
        from_latitude: node.parent.lat(),
        angle: node.step.angle(),
        to_longitude: node.position.lng(),
        to_latitude: node.position.lat(),
    }
}

/// GeoJSON Feature holding the route's waypoints as a LineString.
fn route_feature(route: &[PathNode]) -> Value {
    let coordinates: Vec<Value> = route
        .iter()
        .map(|node| json!([node.position.lng(), node.position.lat()]))
        .collect();
    json!({
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
    })
}

#[cfg(test)]
mod delivery_tests {
    use super::*;
    use crate::types::node::Move;
    use crate::types::order::{CreditCardInformation, Pizza};
    use crate::types::region::NamedRegion;
    use crate::utils::geometry::MOVE_DISTANCE;
    use chrono::{NaiveDate, Weekday};

    fn airspace() -> Airspace {
        let central = NamedRegion::new(
            "central",
            vec![
                LngLat::new(-3.192473, 55.946233),
                LngLat::new(-3.184319, 55.946233),
                LngLat::new(-3.184319, 55.942617),
                LngLat::new(-3.192473, 55.942617),
            ],
        );
        Airspace::new(&central, &[]).unwrap()
    }

    fn restaurant() -> Restaurant {
        Restaurant {
            name: "Civerinos Slice".to_string(),
            // A handful of moves north-east of the launch pad.
            location: LngLat::new(
                LAUNCH_PAD.lng() + 5.0 * MOVE_DISTANCE,
                LAUNCH_PAD.lat() + 3.0 * MOVE_DISTANCE,
            ),
            opening_days: vec![Weekday::Mon],
            menu: vec![Pizza {
                name: "R1: Margarita".to_string(),
                price_in_pence: 1000,
            }],
        }
    }

    fn order(order_no: &str, pizzas: Vec<Pizza>, total: u32) -> Order {
        Order {
            order_no: order_no.to_string(),
            order_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            order_status: Default::default(),
            order_validation_code: Default::default(),
            price_total_in_pence: total,
            pizzas_in_order: pizzas,
            credit_card_information: CreditCardInformation {
                credit_card_number: "4001919257537193".to_string(),
                credit_card_expiry: "12/28".to_string(),
                cvv: "123".to_string(),
            },
        }
    }

    #[test]
    fn test_plan_marks_orders_and_emits_records() {
        let margarita = Pizza {
            name: "R1: Margarita".to_string(),
            price_in_pence: 1000,
        };
        let restaurants = vec![restaurant()];
        let mut orders = vec![
            order("0001", vec![margarita.clone()], 1100),
            order("0002", vec![margarita], 999), // wrong total
        ];

        let plan = plan_deliveries(&airspace(), LAUNCH_PAD, &restaurants, &mut orders);

        assert_eq!(orders[0].order_status, OrderStatus::Delivered);
        assert_eq!(orders[1].order_status, OrderStatus::Invalid);
        assert_eq!(
            orders[1].order_validation_code,
            OrderValidationCode::TotalIncorrect
        );

        assert_eq!(plan.deliveries.len(), 2);
        assert_eq!(plan.deliveries[0].order_status, OrderStatus::Delivered);
        assert_eq!(plan.deliveries[1].cost_in_pence, 999);

        // Only the delivered order contributes moves, all tagged with
        // its order number.
        assert!(!plan.flightpaths.is_empty());
        assert!(plan.flightpaths.iter().all(|m| m.order_no == "0001"));
        // Hovers: the starting node, the turnaround at the restaurant,
        // and the closing copy of the starting node.
        assert_eq!(
            plan.flightpaths.iter().filter(|m| m.angle.is_none()).count(),
            3
        );

        let features = plan.routes["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["geometry"]["type"], "LineString");
    }

    #[test]
    fn test_two_orders_for_one_restaurant_route_once() {
        let margarita = Pizza {
            name: "R1: Margarita".to_string(),
            price_in_pence: 1000,
        };
        let restaurants = vec![restaurant()];
        let mut orders = vec![
            order("0001", vec![margarita.clone()], 1100),
            order("0002", vec![margarita], 1100),
        ];

        let plan = plan_deliveries(&airspace(), LAUNCH_PAD, &restaurants, &mut orders);

        assert_eq!(orders[0].order_status, OrderStatus::Delivered);
        assert_eq!(orders[1].order_status, OrderStatus::Delivered);
        // Both orders replay the same trip.
        let first: Vec<_> = plan
            .flightpaths
            .iter()
            .filter(|m| m.order_no == "0001")
            .collect();
        let second: Vec<_> = plan
            .flightpaths
            .iter()
            .filter(|m| m.order_no == "0002")
            .collect();
        assert_eq!(first.len(), second.len());
        assert!(!first.is_empty());
    }

    #[test]
    fn test_flightpath_record_reports_hover_as_absent_angle() {
        let spot = LngLat::new(0.0, 0.0);
        let node = PathNode {
            parent: spot,
            step: Move::Hover,
            position: spot,
            cost: crate::types::node::MoveCost::finite(0.0),
        };
        let record = flightpath_record(&order("0003", vec![], 100), &node);
        assert_eq!(record.angle, None);
        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(encoded["angle"], Value::Null);
        assert_eq!(encoded["orderNo"], "0003");
    }
}
