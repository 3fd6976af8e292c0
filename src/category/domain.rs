//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use crate::{Error, database_id::CategoryId};

/// Whether a category records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// Money earned, e.g. wages or a bonus.
    Income,
    /// Money spent, e.g. rent or groceries.
    Expense,
}

impl CategoryKind {
    /// The canonical label stored in the database and typed by users.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }
}

impl FromStr for CategoryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(Error::UnknownCategoryKind(other.to_string())),
        }
    }
}

impl Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined bucket for transactions, e.g. 'Groceries', 'Rent', 'Wages'.
///
/// The kind is fixed when the category is created; renaming a category keeps
/// both its ID and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// Chat-platform identifier of the user that owns the category.
    pub user_id: String,
    /// The name the user records transactions under. Unique per user.
    pub name: String,
    /// Whether transactions under this category count as income or expense.
    pub kind: CategoryKind,
}
