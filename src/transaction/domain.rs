//! Core transaction domain types.

use time::OffsetDateTime;

use crate::{
    category::CategoryKind,
    database_id::{CategoryId, TransactionId},
};

/// A single recorded monetary event tied to a category.
///
/// The kind is copied from the owning category when the transaction is
/// created and never changes afterwards, so renaming a category does not
/// rewrite history.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Chat-platform identifier of the user that recorded the transaction.
    pub user_id: String,
    /// The category the transaction was recorded under.
    pub category_id: CategoryId,
    /// Income or expense, frozen at creation.
    pub kind: CategoryKind,
    /// The amount of money in whole currency units.
    pub amount: i64,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}
