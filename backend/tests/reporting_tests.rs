//! Reporting tests
//!
//! Tests for the aggregation contracts behind the dashboard and the summary
//! report: period windows, top-seller ordering, and dashboard counts.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{Product, Sale};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

fn sale(product_id: Uuid, quantity: i32, unit_price: &str, at: DateTime<Utc>) -> Sale {
    let unit_price = dec(unit_price);
    Sale {
        id: Uuid::new_v4(),
        product_id,
        quantity,
        unit_price,
        total_price: Decimal::from(quantity) * unit_price,
        customer_name: None,
        notes: None,
        created_at: at,
    }
}

fn catalog_product(name: &str, stock: i32, min_stock: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sku: "PRD0A1B2C3D".to_string(),
        category: "Grains".to_string(),
        price: dec("25.90"),
        stock_quantity: stock,
        min_stock,
        qr_code_path: None,
        created_at: utc(2025, 8, 1, 8),
        updated_at: utc(2025, 8, 1, 8),
    }
}

// ============================================================================
// Aggregation Simulation
// ============================================================================
//
// Mirrors of the SQL aggregations, applied to in-memory rows: half-open
// [start, end) windows, group-by-product top sellers with ties broken by the
// earliest sale, and the dashboard counters.

/// Sum and count of sales inside a half-open window
fn period_sales(sales: &[Sale], start: DateTime<Utc>, end: DateTime<Utc>) -> (Decimal, i64) {
    sales
        .iter()
        .filter(|s| s.created_at >= start && s.created_at < end)
        .fold((Decimal::ZERO, 0), |(total, count), s| {
            (total + s.total_price, count + 1)
        })
}

/// Top sellers in a window: quantity desc, ties broken by earliest sale
fn top_products(
    sales: &[Sale],
    names: &HashMap<Uuid, String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    limit: usize,
) -> Vec<(String, i64, Decimal)> {
    let mut grouped: HashMap<Uuid, (i64, Decimal, DateTime<Utc>)> = HashMap::new();

    for s in sales
        .iter()
        .filter(|s| s.created_at >= start && s.created_at < end)
    {
        let entry = grouped
            .entry(s.product_id)
            .or_insert((0, Decimal::ZERO, s.created_at));
        entry.0 += s.quantity as i64;
        entry.1 += s.total_price;
        entry.2 = entry.2.min(s.created_at);
    }

    let mut rows: Vec<_> = grouped.into_iter().collect();
    rows.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .2.cmp(&b.1 .2)));

    rows.into_iter()
        .take(limit)
        .map(|(id, (qty, revenue, _))| (names[&id].clone(), qty, revenue))
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Fresh catalog with one well-stocked product: one product counted,
    /// nothing low on stock
    #[test]
    fn test_dashboard_counts_single_product() {
        let products = vec![catalog_product("Rice 5kg", 50, 10)];

        let total_products = products.len() as i64;
        let low_stock: Vec<_> = products.iter().filter(|p| p.is_low_stock()).collect();

        assert_eq!(total_products, 1);
        assert!(low_stock.is_empty());
    }

    #[test]
    fn test_dashboard_flags_product_at_threshold() {
        let products = vec![
            catalog_product("Rice 5kg", 10, 10),
            catalog_product("Milk 1L", 35, 10),
        ];

        let low_stock: Vec<_> = products.iter().filter(|p| p.is_low_stock()).collect();

        assert_eq!(low_stock.len(), 1);
        assert_eq!(low_stock[0].name, "Rice 5kg");
    }

    #[test]
    fn test_period_sales_respects_half_open_window() {
        let pid = Uuid::new_v4();
        let sales = vec![
            sale(pid, 1, "3.00", utc(2025, 8, 5, 0)),  // window start, included
            sale(pid, 2, "3.00", utc(2025, 8, 5, 12)), // inside
            sale(pid, 4, "3.00", utc(2025, 8, 6, 0)),  // window end, excluded
            sale(pid, 8, "3.00", utc(2025, 8, 4, 23)), // before
        ];

        let (total, count) = period_sales(&sales, utc(2025, 8, 5, 0), utc(2025, 8, 6, 0));

        assert_eq!(total, dec("9.00"));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_period_sales_empty_window_is_zero() {
        let (total, count) = period_sales(&[], utc(2025, 8, 5, 0), utc(2025, 8, 6, 0));

        assert_eq!(total, Decimal::ZERO);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_monthly_window_excludes_previous_month() {
        let pid = Uuid::new_v4();
        let sales = vec![
            sale(pid, 3, "5.00", utc(2025, 7, 31, 23)),
            sale(pid, 5, "5.00", utc(2025, 8, 1, 0)),
        ];

        let (total, count) = period_sales(&sales, utc(2025, 8, 1, 0), utc(2025, 9, 1, 0));

        assert_eq!(total, dec("25.00"));
        assert_eq!(count, 1);
    }

    #[test]
    fn test_top_products_ordered_by_quantity_sold() {
        let rice = Uuid::new_v4();
        let milk = Uuid::new_v4();
        let names = HashMap::from([
            (rice, "Rice 5kg".to_string()),
            (milk, "Milk 1L".to_string()),
        ]);

        let sales = vec![
            sale(rice, 2, "25.90", utc(2025, 8, 2, 9)),
            sale(milk, 6, "4.50", utc(2025, 8, 3, 9)),
            sale(rice, 1, "25.90", utc(2025, 8, 4, 9)),
        ];

        let top = top_products(&sales, &names, utc(2025, 8, 1, 0), utc(2025, 9, 1, 0), 10);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ("Milk 1L".to_string(), 6, dec("27.00")));
        assert_eq!(top[1], ("Rice 5kg".to_string(), 3, dec("77.70")));
    }

    #[test]
    fn test_top_products_tie_broken_by_earliest_sale() {
        let rice = Uuid::new_v4();
        let milk = Uuid::new_v4();
        let names = HashMap::from([
            (rice, "Rice 5kg".to_string()),
            (milk, "Milk 1L".to_string()),
        ]);

        // Same quantity sold; milk sold first
        let sales = vec![
            sale(milk, 4, "4.50", utc(2025, 8, 2, 9)),
            sale(rice, 4, "25.90", utc(2025, 8, 3, 9)),
        ];

        let top = top_products(&sales, &names, utc(2025, 8, 1, 0), utc(2025, 9, 1, 0), 10);

        assert_eq!(top[0].0, "Milk 1L");
        assert_eq!(top[1].0, "Rice 5kg");
    }

    #[test]
    fn test_top_products_limited_to_ten() {
        let mut names = HashMap::new();
        let mut sales = Vec::new();

        for i in 0..15 {
            let id = Uuid::new_v4();
            names.insert(id, format!("Product {}", i));
            // Distinct quantities so the cut is deterministic
            sales.push(sale(id, i + 1, "1.00", utc(2025, 8, 2, 9)));
        }

        let top = top_products(&sales, &names, utc(2025, 8, 1, 0), utc(2025, 9, 1, 0), 10);

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].1, 15);
        assert_eq!(top[9].1, 6);
    }

    #[test]
    fn test_recent_sales_newest_first() {
        let pid = Uuid::new_v4();
        let mut sales = vec![
            sale(pid, 1, "3.00", utc(2025, 8, 1, 9)),
            sale(pid, 2, "3.00", utc(2025, 8, 3, 9)),
            sale(pid, 3, "3.00", utc(2025, 8, 2, 9)),
        ];

        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let recent: Vec<i32> = sales.iter().take(5).map(|s| s.quantity).collect();

        assert_eq!(recent, vec![2, 3, 1]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn hour_strategy() -> impl Strategy<Value = u32> {
        0u32..24
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The daily window total never exceeds the monthly window total
        #[test]
        fn prop_daily_total_within_monthly_total(
            quantities in prop::collection::vec((1i32..=50, 1u32..=28, hour_strategy()), 0..30)
        ) {
            let pid = Uuid::new_v4();
            let sales: Vec<Sale> = quantities
                .iter()
                .map(|(qty, day, hour)| sale(pid, *qty, "2.00", utc(2025, 8, *day, *hour)))
                .collect();

            let (daily, _) = period_sales(&sales, utc(2025, 8, 5, 0), utc(2025, 8, 6, 0));
            let (monthly, _) = period_sales(&sales, utc(2025, 8, 1, 0), utc(2025, 9, 1, 0));

            prop_assert!(daily <= monthly);
        }

        /// Period totals equal the sum of each matching sale's total
        #[test]
        fn prop_period_total_is_sum_of_totals(
            quantities in prop::collection::vec(1i32..=50, 0..30)
        ) {
            let pid = Uuid::new_v4();
            let sales: Vec<Sale> = quantities
                .iter()
                .map(|qty| sale(pid, *qty, "2.00", utc(2025, 8, 5, 12)))
                .collect();

            let (total, count) = period_sales(&sales, utc(2025, 8, 5, 0), utc(2025, 8, 6, 0));
            let expected: Decimal = sales.iter().map(|s| s.total_price).sum();

            prop_assert_eq!(total, expected);
            prop_assert_eq!(count, sales.len() as i64);
        }

        /// Top-product quantities account for every in-window sale
        #[test]
        fn prop_top_products_conserve_quantity(
            quantities in prop::collection::vec((0usize..5, 1i32..=50), 1..30)
        ) {
            let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
            let names: HashMap<Uuid, String> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| (*id, format!("Product {}", i)))
                .collect();

            let sales: Vec<Sale> = quantities
                .iter()
                .map(|(idx, qty)| sale(ids[*idx], *qty, "2.00", utc(2025, 8, 5, 12)))
                .collect();

            let top = top_products(&sales, &names, utc(2025, 8, 1, 0), utc(2025, 9, 1, 0), 10);

            let grouped_total: i64 = top.iter().map(|(_, qty, _)| qty).sum();
            let sold_total: i64 = sales.iter().map(|s| s.quantity as i64).sum();

            // At most five distinct products, so the limit never truncates
            prop_assert_eq!(grouped_total, sold_total);
        }
    }
}
