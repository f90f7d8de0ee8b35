//! Driving port for dashboard statistics.

use async_trait::async_trait;

use crate::domain::{DashboardStats, Error};

/// Domain use-case port computing the dashboard snapshot on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Scan the current loans and summarise them.
    async fn dashboard_stats(&self) -> Result<DashboardStats, Error>;
}

/// Fixture query summarising an empty collection with no cash offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDashboardQuery;

#[async_trait]
impl DashboardQuery for FixtureDashboardQuery {
    async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        Ok(DashboardStats::compute(&[], 0.0))
    }
}
