//! Activity log records.
//!
//! Written after successful ledger and payment changes. Logging is
//! fire-and-forget: callers never fail an operation because a log record
//! could not be stored.

use chrono::{DateTime, Utc};
use factoryflow_shared::types::{ActivityLogId, OwnerId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ledger::{LedgerEntry, Payment};

/// Action recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// A ledger entry was created.
    LedgerEntryCreated,
    /// A payment was recorded against an AR/AP entry.
    PaymentRecorded,
    /// A payment was deleted.
    PaymentDeleted,
}

/// Kind of document an activity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A ledger entry.
    LedgerEntry,
    /// A payment.
    Payment,
}

/// One activity log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    /// Record ID.
    pub id: ActivityLogId,
    /// Owner whose books changed.
    pub owner_id: OwnerId,
    /// User who performed the action.
    pub user_id: UserId,
    /// Action performed.
    pub action: ActivityAction,
    /// Entity type.
    pub entity_type: EntityType,
    /// Entity ID.
    pub entity_id: String,
    /// Description.
    pub description: String,
    /// Additional metadata.
    pub metadata: serde_json::Value,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
}

impl ActivityLog {
    fn record(
        user_id: UserId,
        owner_id: OwnerId,
        action: ActivityAction,
        entity_type: EntityType,
        entity_id: String,
        description: String,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: ActivityLogId::new(),
            owner_id,
            user_id,
            action,
            entity_type,
            entity_id,
            description,
            metadata,
            timestamp: Utc::now(),
        }
    }

    /// Record for a newly created ledger entry.
    #[must_use]
    pub fn entry_created(user_id: UserId, entry: &LedgerEntry) -> Self {
        Self::record(
            user_id,
            entry.owner_id,
            ActivityAction::LedgerEntryCreated,
            EntityType::LedgerEntry,
            entry.transaction_id.to_string(),
            format!("Created {} entry: {}", entry.entry_type, entry.description),
            json!({
                "amount": entry.amount,
                "category": entry.category,
                "isARAPEntry": entry.is_arap_entry,
            }),
        )
    }

    /// Record for a payment recorded against `entry`.
    #[must_use]
    pub fn payment_recorded(user_id: UserId, entry: &LedgerEntry, payment: &Payment) -> Self {
        Self::record(
            user_id,
            payment.owner_id,
            ActivityAction::PaymentRecorded,
            EntityType::Payment,
            payment.payment_id.to_string(),
            format!("Recorded payment of {} for {}", payment.amount, entry.description),
            json!({
                "transactionId": payment.transaction_id,
                "amount": payment.amount,
                "paymentStatus": entry.payment_status,
            }),
        )
    }

    /// Record for a deleted payment.
    #[must_use]
    pub fn payment_deleted(user_id: UserId, payment: &Payment) -> Self {
        Self::record(
            user_id,
            payment.owner_id,
            ActivityAction::PaymentDeleted,
            EntityType::Payment,
            payment.payment_id.to_string(),
            format!("Deleted payment of {}", payment.amount),
            json!({
                "transactionId": payment.transaction_id,
                "amount": payment.amount,
            }),
        )
    }
}
