//! Aggregate figures on the admin dashboard.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Performance figures of one approved driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriverMetrics {
    pub rating: Option<f64>,
    pub earnings: Option<f64>,
}

/// Dashboard summary of the driver fleet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Approved applications.
    #[schema(example = 42)]
    pub total_drivers: u64,
    #[schema(example = 7)]
    pub pending_applications: u64,
    /// Mean rating of approved drivers to one decimal, zero without drivers.
    #[schema(example = 4.6)]
    pub average_rating: f64,
    /// Sum of approved drivers' earnings.
    #[schema(example = 15230.75)]
    pub total_revenue: f64,
}

impl DashboardStats {
    /// Summarise approved drivers and the pending queue length.
    ///
    /// Missing ratings and earnings count as zero.
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::{DashboardStats, DriverMetrics};
    ///
    /// let approved = [
    ///     DriverMetrics { rating: Some(4.0), earnings: Some(100.0) },
    ///     DriverMetrics { rating: Some(4.5), earnings: None },
    ///     DriverMetrics { rating: None, earnings: Some(20.5) },
    /// ];
    /// let stats = DashboardStats::summarise(&approved, 2);
    /// assert_eq!(stats.total_drivers, 3);
    /// assert_eq!(stats.average_rating, 2.8);
    /// assert_eq!(stats.total_revenue, 120.5);
    /// ```
    pub fn summarise(approved: &[DriverMetrics], pending_applications: u64) -> Self {
        let total_drivers = approved.len() as u64;
        let average_rating = if approved.is_empty() {
            0.0
        } else {
            let sum: f64 = approved.iter().map(|d| d.rating.unwrap_or(0.0)).sum();
            round_to_tenth(sum / approved.len() as f64)
        };
        let total_revenue = approved.iter().map(|d| d.earnings.unwrap_or(0.0)).sum();
        Self {
            total_drivers,
            pending_applications,
            average_rating,
            total_revenue,
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
