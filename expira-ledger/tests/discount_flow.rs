use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use expira_catalog::{
    sellability, CategoryAttributes, EventAttributes, PerishableAttributes, Product,
    Sellability, SubscriptionAttributes,
};
use expira_ledger::{CalculationLog, DiscountHistory};
use expira_pricing::PricingEngine;

fn storefront() -> Vec<Product> {
    let listed = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    vec![
        Product {
            id: Uuid::new_v4(),
            name: "Strawberry punnet".to_string(),
            description: Some("Fresh from the farm".to_string()),
            base_price: 10.0,
            current_stock: 60,
            min_stock_threshold: Some(15),
            max_profit_margin: 0.5,
            current_profit_margin: 0.4,
            listed_at: listed,
            attributes: CategoryAttributes::Perishable(PerishableAttributes {
                manufacturing_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                expiry_date: NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
                max_shelf_life_days: 10,
                current_daily_selling_rate: 8.0,
                max_expected_selling_rate: 12.0,
                quality_score: 0.9,
                current_demand_level: 0.5,
            }),
            metadata: serde_json::json!({"origin": "local"}),
        },
        Product {
            id: Uuid::new_v4(),
            name: "Open-air cinema".to_string(),
            description: None,
            base_price: 40.0,
            current_stock: 0,
            min_stock_threshold: None,
            max_profit_margin: 0.6,
            current_profit_margin: 0.3,
            listed_at: listed,
            attributes: CategoryAttributes::Event(EventAttributes {
                event_date: listed + chrono::Duration::days(60),
                venue: Some("Riverside park".to_string()),
                total_capacity: 300,
                seats_booked: 90,
                min_ticket_price: 15.0,
                max_ticket_price: 40.0,
            }),
            metadata: serde_json::json!({}),
        },
        Product {
            id: Uuid::new_v4(),
            name: "Cheese of the month".to_string(),
            description: None,
            base_price: 120.0,
            current_stock: 0,
            min_stock_threshold: None,
            max_profit_margin: 0.5,
            current_profit_margin: 0.35,
            listed_at: listed,
            attributes: CategoryAttributes::Subscription(SubscriptionAttributes {
                standard_duration_days: 30,
                grace_period_days: 7,
                total_subscribers: 240,
                active_subscribers: 200,
                renewal_rate: 0.85,
                average_subscription_length_days: 150,
            }),
            metadata: serde_json::json!({}),
        },
    ]
}

#[test]
fn storefront_pricing_flow() {
    let products = storefront();
    let engine = PricingEngine::default();
    let mut history = DiscountHistory::new();
    let mut log = CalculationLog::new();

    let first_pass = Utc.with_ymd_and_hms(2025, 3, 6, 0, 0, 0).unwrap();
    let second_pass = Utc.with_ymd_and_hms(2025, 3, 9, 0, 0, 0).unwrap();

    for now in [first_pass, second_pass] {
        for product in &products {
            let quote = engine.quote(product, now).expect("valid product");

            // The shared floor contract holds for every category
            assert!(quote.discounted_price >= quote.floor_price);

            history.record(&quote, "scheduler");
            log.log(&quote);
        }
    }

    // Perishable: 5 of 10 days remaining -> 8.00, then 2 of 10 -> 6.80
    let perishable = &products[0];
    let timeline = history.records(&perishable.id);
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].discounted_price, 8.00);
    assert_eq!(timeline[0].discount_percent, 20);
    assert_eq!(timeline[1].discounted_price, 6.80);
    assert_eq!(timeline[1].discount_percent, 32);

    // Subscription: renewal-driven price does not move between passes, so
    // the deduped history holds a single record
    let subscription = &products[2];
    assert_eq!(history.records(&subscription.id).len(), 1);
    assert_eq!(history.latest(&subscription.id).unwrap().discounted_price, 84.30);

    // The audit log keeps every evaluation regardless
    assert_eq!(log.entries(&subscription.id).len(), 2);
    assert!(log.entries(&perishable.id)[0]
        .trace
        .remaining_life_fraction
        .is_some());

    // Everything is still sellable mid-window
    for product in &products {
        assert_eq!(sellability(product, second_pass), Sellability::Sellable);
    }
}

#[test]
fn broken_record_still_renders_listing() {
    let mut products = storefront();
    products[1].max_profit_margin = 1.5; // corrupt record from the backend

    let engine = PricingEngine::default();
    let now = Utc.with_ymd_and_hms(2025, 3, 6, 0, 0, 0).unwrap();

    let quote = engine.quote_or_base(&products[1], now);
    assert_eq!(quote.discounted_price, products[1].base_price);
    assert_eq!(quote.discount_percent, 0);
}
