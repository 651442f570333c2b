//! Reporting service: read-only aggregations over the ledger
//!
//! All "today" / "this month" windows are computed in UTC, as half-open
//! `[start, end)` bounds, so the dashboard and the summary report always
//! agree on period boundaries.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::{Product, Purchase, Sale};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Key metrics for the dashboard
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub total_sales_today: Decimal,
    pub total_sales_this_month: Decimal,
    pub low_stock_products: Vec<Product>,
    pub recent_sales: Vec<Sale>,
}

/// Revenue and transaction count over one period
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PeriodSales {
    pub total: Decimal,
    pub count: i64,
}

/// A top-selling product for the current month
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TopProduct {
    pub name: String,
    pub total_quantity_sold: i64,
    pub total_revenue: Decimal,
}

/// Full summary report
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub daily: PeriodSales,
    pub monthly: PeriodSales,
    pub top_products: Vec<TopProduct>,
    pub recent_purchases: Vec<Purchase>,
    pub recent_sales: Vec<Sale>,
}

/// UTC calendar-day window containing `now`
pub fn day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();
    (start, start + Duration::days(1))
}

/// UTC calendar-month window containing `now`
pub fn month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.date_naive();
    let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();

    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();

    (start, end)
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the dashboard metrics as of `now`
    pub async fn dashboard_summary(&self, now: DateTime<Utc>) -> AppResult<DashboardSummary> {
        let (day_start, day_end) = day_bounds(now);
        let (month_start, month_end) = month_bounds(now);

        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.db)
            .await?;

        let total_sales_today: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_price), 0)
            FROM sales
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(day_start)
        .bind(day_end)
        .fetch_one(&self.db)
        .await?;

        let total_sales_this_month: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_price), 0)
            FROM sales
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(month_start)
        .bind(month_end)
        .fetch_one(&self.db)
        .await?;

        let low_stock_products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, sku, category, price, stock_quantity, min_stock, qr_code_path,
                   created_at, updated_at
            FROM products
            WHERE stock_quantity <= min_stock
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let recent_sales = self.recent_sales(5).await?;

        Ok(DashboardSummary {
            total_products,
            total_sales_today,
            total_sales_this_month,
            low_stock_products,
            recent_sales,
        })
    }

    /// Get the full summary report as of `now`
    pub async fn report_summary(&self, now: DateTime<Utc>) -> AppResult<ReportSummary> {
        let (day_start, day_end) = day_bounds(now);
        let (month_start, month_end) = month_bounds(now);

        let daily = self.period_sales(day_start, day_end).await?;
        let monthly = self.period_sales(month_start, month_end).await?;

        // Top sellers this month, grouped by product. Ties on quantity fall
        // back to the product's earliest sale in the period.
        let top_products = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT p.name,
                   SUM(s.quantity)::BIGINT AS total_quantity_sold,
                   SUM(s.total_price) AS total_revenue
            FROM sales s
            JOIN products p ON p.id = s.product_id
            WHERE s.created_at >= $1 AND s.created_at < $2
            GROUP BY p.id, p.name
            ORDER BY total_quantity_sold DESC, MIN(s.created_at) ASC
            LIMIT 10
            "#,
        )
        .bind(month_start)
        .bind(month_end)
        .fetch_all(&self.db)
        .await?;

        let recent_purchases = sqlx::query_as::<_, Purchase>(
            r#"
            SELECT id, product_id, quantity, unit_cost, total_cost, supplier, notes, created_at
            FROM purchases
            ORDER BY created_at DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let recent_sales = self.recent_sales(10).await?;

        Ok(ReportSummary {
            daily,
            monthly,
            top_products,
            recent_purchases,
            recent_sales,
        })
    }

    /// Export the full sales log as CSV, newest first
    pub async fn export_sales_csv(&self) -> AppResult<String> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, unit_price, total_price, customer_name, notes, created_at
            FROM sales
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Self::export_to_csv(&sales)
    }

    /// Sales sum and count over a half-open window
    async fn period_sales(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<PeriodSales> {
        let period = sqlx::query_as::<_, PeriodSales>(
            r#"
            SELECT COALESCE(SUM(total_price), 0) AS total, COUNT(*) AS count
            FROM sales
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.db)
        .await?;

        Ok(period)
    }

    async fn recent_sales(&self, limit: i64) -> AppResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, unit_price, total_price, customer_name, notes, created_at
            FROM sales
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// Serialize report rows as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                crate::error::AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(wtr.into_inner().map_err(|e| {
            crate::error::AppError::Internal(format!("CSV writer error: {}", e))
        })?)
        .map_err(|e| crate::error::AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_day_bounds_cover_the_calendar_day() {
        let (start, end) = day_bounds(utc(2024, 6, 15, 13, 45, 12));

        assert_eq!(start, utc(2024, 6, 15, 0, 0, 0));
        assert_eq!(end, utc(2024, 6, 16, 0, 0, 0));
    }

    #[test]
    fn test_day_bounds_at_midnight() {
        let (start, end) = day_bounds(utc(2024, 6, 15, 0, 0, 0));

        assert_eq!(start, utc(2024, 6, 15, 0, 0, 0));
        assert_eq!(end, utc(2024, 6, 16, 0, 0, 0));
    }

    #[test]
    fn test_month_bounds_mid_year() {
        let (start, end) = month_bounds(utc(2024, 6, 15, 13, 45, 12));

        assert_eq!(start, utc(2024, 6, 1, 0, 0, 0));
        assert_eq!(end, utc(2024, 7, 1, 0, 0, 0));
    }

    #[test]
    fn test_month_bounds_december_rolls_into_next_year() {
        let (start, end) = month_bounds(utc(2024, 12, 31, 23, 59, 59));

        assert_eq!(start, utc(2024, 12, 1, 0, 0, 0));
        assert_eq!(end, utc(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let (start, end) = month_bounds(utc(2024, 2, 29, 12, 0, 0));

        assert_eq!(start, utc(2024, 2, 1, 0, 0, 0));
        assert_eq!(end, utc(2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_day_window_is_inside_month_window() {
        let now = utc(2025, 8, 5, 9, 30, 0);
        let (day_start, day_end) = day_bounds(now);
        let (month_start, month_end) = month_bounds(now);

        assert!(month_start <= day_start);
        assert!(day_end <= month_end);
    }
}
