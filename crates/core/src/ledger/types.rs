//! Ledger domain types.

use chrono::{DateTime, NaiveDate, Utc};
use factoryflow_shared::types::{OwnerId, PaymentId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Capital-movement category for money the owner puts into the business.
pub const OWNER_CAPITAL_CATEGORY: &str = "Owner Capital";

/// Capital-movement category for money the owner takes out of the business.
pub const OWNER_DRAWINGS_CATEGORY: &str = "Owner Drawings";

/// Kind of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryType {
    /// Money earned (sales, other income).
    Income,
    /// Money spent.
    Expense,
    /// Owner capital contributed or withdrawn.
    CapitalMovement,
}

impl LedgerEntryType {
    /// Returns the AR/AP side this entry type produces when tracked.
    ///
    /// Capital movements are never tracked as receivables or payables.
    #[must_use]
    pub const fn arap_direction(self) -> Option<ArapDirection> {
        match self {
            Self::Income => Some(ArapDirection::Receivable),
            Self::Expense => Some(ArapDirection::Payable),
            Self::CapitalMovement => None,
        }
    }
}

impl std::fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::CapitalMovement => write!(f, "capital_movement"),
        }
    }
}

/// Direction of a capital movement, resolved from its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalMovementKind {
    /// Owner puts money in.
    Contribution,
    /// Owner takes money out.
    Drawing,
}

impl CapitalMovementKind {
    /// Resolves the movement kind from a category name (case-insensitive).
    #[must_use]
    pub fn from_category(category: &str) -> Option<Self> {
        let category = category.trim();
        if category.eq_ignore_ascii_case(OWNER_CAPITAL_CATEGORY) {
            Some(Self::Contribution)
        } else if category.eq_ignore_ascii_case(OWNER_DRAWINGS_CATEGORY) {
            Some(Self::Drawing)
        } else {
            None
        }
    }
}

/// Whether an AR/AP entry is money owed to us or by us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArapDirection {
    /// A client owes the business.
    Receivable,
    /// The business owes a supplier.
    Payable,
}

/// Settlement state of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Fully settled.
    Paid,
    /// Nothing settled yet.
    Unpaid,
    /// Partially settled.
    Partial,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
            Self::Unpaid => write!(f, "unpaid"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

/// A persisted ledger entry.
///
/// Ledger entries are never structurally deleted. Payments mutate the AR/AP
/// fields and bump `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Transaction identifier; also the key shared with journal entries.
    pub transaction_id: TransactionId,
    /// Owner of the books this entry belongs to.
    pub owner_id: OwnerId,
    /// Kind of transaction.
    #[serde(rename = "type")]
    pub entry_type: LedgerEntryType,
    /// Original amount (always positive).
    pub amount: Decimal,
    /// Category (e.g. "Sales", "Rent", "Owner Capital").
    pub category: String,
    /// Optional subcategory.
    pub subcategory: Option<String>,
    /// Free-text description.
    pub description: String,
    /// Transaction date.
    pub date: NaiveDate,
    /// Client or supplier the entry is with.
    pub associated_party: Option<String>,
    /// Whether this entry is tracked as a receivable/payable.
    #[serde(rename = "isARAPEntry")]
    pub is_arap_entry: bool,
    /// Amount settled so far.
    pub total_paid: Decimal,
    /// Amount still outstanding.
    pub remaining_balance: Decimal,
    /// Derived from `total_paid` and `amount`.
    pub payment_status: PaymentStatus,
    /// Optimistic concurrency counter, incremented on every write.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Returns the AR/AP direction if this entry is tracked.
    #[must_use]
    pub const fn arap_direction(&self) -> Option<ArapDirection> {
        if self.is_arap_entry {
            self.entry_type.arap_direction()
        } else {
            None
        }
    }
}

/// Input for a new ledger entry, as submitted from the entry form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    /// Owner of the books, taken from the request path rather than the body.
    #[serde(skip_deserializing)]
    pub owner_id: OwnerId,
    /// Kind of transaction.
    #[serde(rename = "type")]
    pub entry_type: LedgerEntryType,
    /// Amount (must be positive).
    pub amount: Decimal,
    /// Category.
    pub category: String,
    /// Optional subcategory.
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Free-text description.
    pub description: String,
    /// Transaction date.
    pub date: NaiveDate,
    /// Client or supplier.
    #[serde(default)]
    pub associated_party: Option<String>,
    /// Track as a receivable/payable.
    #[serde(default, rename = "isARAPEntry")]
    pub is_arap_entry: bool,
    /// Record a full payment right away.
    #[serde(default)]
    pub immediate_settlement: bool,
}

/// A payment recorded against an AR/AP entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment identifier.
    pub payment_id: PaymentId,
    /// Owner of the books.
    pub owner_id: OwnerId,
    /// Ledger entry this payment settles.
    pub transaction_id: TransactionId,
    /// Amount paid (positive).
    pub amount: Decimal,
    /// Payment date.
    pub date: NaiveDate,
    /// Optional notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a payment for a ledger entry.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        transaction_id: TransactionId,
        amount: Decimal,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Self {
        Self {
            payment_id: PaymentId::new(),
            owner_id,
            transaction_id,
            amount,
            date,
            notes,
            created_at: Utc::now(),
        }
    }
}

/// Input for a new payment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    /// Amount paid.
    pub amount: Decimal,
    /// Payment date.
    pub date: NaiveDate,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
}
