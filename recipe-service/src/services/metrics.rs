//! Domain metrics for recipe-service.
//!
//! Recorded through the `metrics` facade; exported by the Prometheus recorder
//! installed in `service_core::observability`.

use metrics::{counter, histogram};
use std::time::Instant;

pub const INGREDIENTS_CREATED_TOTAL: &str = "recipe_ingredients_created_total";
pub const INGREDIENT_REJECTIONS_TOTAL: &str = "recipe_ingredient_rejections_total";
pub const DB_QUERY_DURATION: &str = "recipe_db_query_duration_seconds";

pub fn record_ingredient_created() {
    counter!(INGREDIENTS_CREATED_TOTAL).increment(1);
}

/// Count a refused request by reason (`unauthorized`, `validation`).
pub fn record_rejection(reason: &'static str) {
    counter!(INGREDIENT_REJECTIONS_TOTAL, "reason" => reason).increment(1);
}

/// Times one storage operation; the duration is recorded on drop.
pub struct QueryTimer {
    operation: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for QueryTimer {
    fn drop(&mut self) {
        histogram!(DB_QUERY_DURATION, "operation" => self.operation)
            .record(self.start.elapsed().as_secs_f64());
    }
}
