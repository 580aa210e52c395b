//! Database entities

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Interaction {
    pub interaction_id: String,
    pub user_query: String,
    pub bot_response: String,
    pub feedback: i64,
    pub timestamp: DateTime<Utc>,
    pub processed_for_training: bool,
}

/// Exact-match column filters. `None` leaves the column unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionFilter {
    pub feedback: Option<i64>,
    pub processed_for_training: Option<bool>,
}
