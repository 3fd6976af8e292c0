//! Executes parsed commands against the store and formats the replies.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::Connection;
use time::{Date, Month, OffsetDateTime};

use crate::{
    Error,
    category::{self, CategoryKind},
    command::{Command, parse},
    summary::{MonthlySummary, monthly_aggregate},
    transaction,
};

/// Interprets chat messages as bookkeeping commands.
///
/// The interpreter holds no state of its own beyond the store handle; every
/// call is independent, and every message is answered with a reply string.
/// Failures are translated into user-facing messages rather than returned to
/// the caller.
#[derive(Debug, Clone)]
pub struct Interpreter {
    connection: Arc<Mutex<Connection>>,
}

impl Interpreter {
    /// Create an interpreter over the shared database connection.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Interpret `text` as a command from `user_id` and return the reply.
    pub fn handle_message(&self, user_id: &str, text: &str) -> String {
        tracing::info!(user_id, message = text, "processing message");

        let connection = match self.lock_connection() {
            Ok(connection) => connection,
            Err(_) => return "❌ Something went wrong, please try again later.".to_string(),
        };

        match parse(text) {
            Command::Empty => "Please enter a valid command.".to_string(),
            Command::AddCategory { kind, name } => {
                add_category(user_id, &kind, &name, &connection)
            }
            Command::UpdateCategory { old_name, new_name } => {
                update_category(user_id, &old_name, &new_name, &connection)
            }
            Command::DeleteCategory { name } => delete_category(user_id, &name, &connection),
            Command::ListCategories => list_categories(user_id, &connection),
            Command::QuickTransaction { category, amount } => {
                quick_transaction(user_id, &category, &amount, &connection)
            }
            Command::UpdateTransaction {
                category,
                old_amount,
                new_amount,
            } => update_transaction(user_id, &category, &old_amount, &new_amount, &connection),
            Command::DeleteTransaction { category, amount } => {
                delete_transaction(user_id, &category, &amount, &connection)
            }
            Command::MonthlySummary { args } => monthly_summary(user_id, &args, &connection),
            Command::Help => help_text(),
            Command::Unrecognized => {
                tracing::info!("unrecognized command");
                "❓ Unrecognized command, please try again.".to_string()
            }
        }
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

fn add_category(user_id: &str, kind_label: &str, name: &str, connection: &Connection) -> String {
    tracing::info!(kind = kind_label, name, "add category");

    let kind: CategoryKind = match kind_label.parse() {
        Ok(kind) => kind,
        Err(_) => {
            tracing::warn!(kind = kind_label, "unknown category type");
            return "❌ Category type must be income or expense.".to_string();
        }
    };

    match category::create_category(user_id, name, kind, connection) {
        Ok(_) => {
            tracing::info!(name, kind = kind_label, "category added");
            format!("✅ Category {name} added!")
        }
        Err(Error::DuplicateCategory) => {
            tracing::warn!(name, "category already exists");
            format!("❌ Category {name} already exists, please choose another name.")
        }
        Err(error) => {
            tracing::error!("failed to add category: {error}");
            "❌ Could not add the category, please try again later.".to_string()
        }
    }
}

fn update_category(
    user_id: &str,
    old_name: &str,
    new_name: &str,
    connection: &Connection,
) -> String {
    tracing::info!(old_name, new_name, "update category");

    match category::rename_category(user_id, old_name, new_name, connection) {
        Ok(()) => {
            tracing::info!(old_name, new_name, "category renamed");
            format!("✏️ Category renamed to {new_name}")
        }
        Err(Error::UpdateMissingCategory) => {
            tracing::warn!(name = old_name, "category to rename not found");
            "❌ Category not found.".to_string()
        }
        Err(Error::DuplicateCategory) => {
            tracing::warn!(name = new_name, "new category name already taken");
            format!("❌ Category {new_name} already exists, please choose another name.")
        }
        Err(error) => {
            tracing::error!("failed to rename category: {error}");
            "❌ Could not update the category, please try again later.".to_string()
        }
    }
}

fn delete_category(user_id: &str, name: &str, connection: &Connection) -> String {
    tracing::info!(name, "delete category");

    match category::delete_category(user_id, name, connection) {
        Ok(()) => {
            tracing::info!(name, "category deleted");
            format!("🗑️ Category {name} deleted")
        }
        Err(Error::DeleteMissingCategory) => {
            tracing::warn!(name, "category to delete not found");
            "❌ Category not found.".to_string()
        }
        Err(error) => {
            tracing::error!("failed to delete category: {error}");
            "❌ Could not delete the category, please try again later.".to_string()
        }
    }
}

fn list_categories(user_id: &str, connection: &Connection) -> String {
    tracing::info!("list categories");

    let categories = match category::categories_by_kind(user_id, connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("failed to query categories: {error}");
            return "❌ Could not look up categories, please try again later.".to_string();
        }
    };

    if categories.is_empty() {
        tracing::warn!("no categories yet");
        return "⚠️ You have not added any categories yet.".to_string();
    }

    let mut reply = String::from("📂 Your categories:\n");
    if !categories.income.is_empty() {
        reply.push_str("💰 Income categories:\n");
        for name in &categories.income {
            reply.push_str(&format!("・{name}\n"));
        }
    }
    if !categories.expense.is_empty() {
        reply.push_str("💸 Expense categories:\n");
        for name in &categories.expense {
            reply.push_str(&format!("・{name}\n"));
        }
    }

    tracing::info!(
        income_count = categories.income.len(),
        expense_count = categories.expense.len(),
        "got category list"
    );
    reply
}

fn quick_transaction(
    user_id: &str,
    category_name: &str,
    amount_text: &str,
    connection: &Connection,
) -> String {
    tracing::info!(category = category_name, amount = amount_text, "quick record");

    let amount: i64 = match amount_text.parse() {
        Ok(amount) => amount,
        Err(_) => {
            tracing::warn!(amount = amount_text, "amount format error");
            return "Invalid amount format".to_string();
        }
    };

    let (category_id, kind) = match category::get_category(user_id, category_name, connection) {
        Ok(found) => found,
        Err(_) => {
            tracing::warn!(category = category_name, "category does not exist");
            return "❌ Category does not exist, please add it first.".to_string();
        }
    };

    match transaction::create_transaction(user_id, category_id, kind, amount, connection) {
        Ok(recorded) => {
            tracing::info!(
                transaction_id = recorded.id,
                kind = %kind,
                amount,
                category = category_name,
                "transaction recorded"
            );
            format!("✅ {kind} ${amount} category: {category_name} recorded!")
        }
        Err(error) => {
            tracing::error!("failed to record transaction: {error}");
            "Could not record the transaction, please try again later.".to_string()
        }
    }
}

fn update_transaction(
    user_id: &str,
    category_name: &str,
    old_amount_text: &str,
    new_amount_text: &str,
    connection: &Connection,
) -> String {
    tracing::info!(
        category = category_name,
        old_amount = old_amount_text,
        new_amount = new_amount_text,
        "update transaction"
    );

    let (old_amount, new_amount) =
        match (old_amount_text.parse::<i64>(), new_amount_text.parse::<i64>()) {
            (Ok(old_amount), Ok(new_amount)) => (old_amount, new_amount),
            _ => {
                tracing::warn!(
                    old_amount = old_amount_text,
                    new_amount = new_amount_text,
                    "amount format error"
                );
                return "Invalid amount format, please enter a number.".to_string();
            }
        };

    let transaction_id =
        match transaction::find_transaction_id(user_id, category_name, old_amount, connection) {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(
                    category = category_name,
                    amount = old_amount,
                    "no matching record"
                );
                return "❌ No matching record found.".to_string();
            }
        };

    match transaction::update_transaction_amount(transaction_id, new_amount, connection) {
        Ok(()) => {
            tracing::info!(
                transaction_id,
                category = category_name,
                old_amount,
                new_amount,
                "transaction updated"
            );
            format!("✅ Updated {category_name} amount from ${old_amount} to ${new_amount}.")
        }
        Err(error) => {
            tracing::error!("failed to update transaction: {error}");
            "❌ Could not update the record, please try again later.".to_string()
        }
    }
}

fn delete_transaction(
    user_id: &str,
    category_name: &str,
    amount_text: &str,
    connection: &Connection,
) -> String {
    tracing::info!(category = category_name, amount = amount_text, "delete transaction");

    let amount: i64 = match amount_text.parse() {
        Ok(amount) => amount,
        Err(_) => {
            tracing::warn!(amount = amount_text, "amount format error");
            return "Invalid amount format, please enter a number.".to_string();
        }
    };

    let transaction_id =
        match transaction::find_transaction_id(user_id, category_name, amount, connection) {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(category = category_name, amount, "no matching record");
                return "❌ No matching record found.".to_string();
            }
        };

    match transaction::delete_transaction(transaction_id, connection) {
        Ok(()) => {
            tracing::info!(
                transaction_id,
                category = category_name,
                amount,
                "transaction deleted"
            );
            format!("🗑️ Deleted the {category_name} ${amount} record.")
        }
        Err(error) => {
            tracing::error!("failed to delete transaction: {error}");
            "❌ Could not delete the record, please try again later.".to_string()
        }
    }
}

fn monthly_summary(user_id: &str, args: &[String], connection: &Connection) -> String {
    let reference = if args.len() == 2 {
        tracing::info!(year = %args[0], month = %args[1], "summary for specified month");

        let parsed = match (args[0].parse::<i32>(), args[1].parse::<u8>()) {
            (Ok(year), Ok(month)) if (1..=12).contains(&month) => Month::try_from(month)
                .ok()
                .and_then(|month| Date::from_calendar_date(year, month, 1).ok()),
            _ => None,
        };

        match parsed {
            Some(date) => date,
            None => {
                tracing::warn!(year = %args[0], month = %args[1], "summary format error");
                return "⚠️ Invalid settlement format, use: settle or settle 2025 5".to_string();
            }
        }
    } else {
        tracing::info!("summary for current month");
        OffsetDateTime::now_utc().date()
    };

    let summary = match monthly_aggregate(user_id, reference, connection) {
        Ok(summary) => summary,
        Err(error) => {
            tracing::error!("failed to aggregate month: {error}");
            return "Could not fetch the report, please try again later.".to_string();
        }
    };

    // Amount data alone still renders through the sign heuristic below, so a
    // failed kind lookup degrades rather than aborts.
    let info = category::categories_info(user_id, connection).unwrap_or_else(|error| {
        tracing::warn!("failed to get category info: {error}");
        HashMap::new()
    });

    let reply = render_summary(reference, &summary, &info);

    tracing::info!(
        income = summary.income_total,
        expense = summary.expense_total,
        "summary completed"
    );

    reply
}

/// Render the monthly report.
///
/// Categories whose kind cannot be resolved are classified by the sign of
/// their total: a positive sum reads as income, everything else as expense.
/// A zero or negative income total is therefore misclassified; this is a
/// known limitation kept for compatibility with the summaries users are used
/// to.
fn render_summary(
    reference: Date,
    summary: &MonthlySummary,
    info: &HashMap<String, CategoryKind>,
) -> String {
    let mut income_lines = Vec::new();
    let mut expense_lines = Vec::new();

    for (name, total) in &summary.category_totals {
        let is_income = match info.get(name) {
            Some(kind) => *kind == CategoryKind::Income,
            None => *total > 0,
        };

        if is_income {
            income_lines.push(format!("・{name}: ${total}\n"));
        } else {
            expense_lines.push(format!("・{name}: ${total}\n"));
        }
    }

    let mut reply = format!(
        "📊 {}-{}\nIncome: ${}\nExpense: ${}\n\n",
        reference.year(),
        reference.month() as u8,
        summary.income_total,
        summary.expense_total
    );

    if !income_lines.is_empty() {
        reply.push_str("💰 Income breakdown:\n");
        for line in &income_lines {
            reply.push_str(line);
        }
        reply.push('\n');
    }

    if !expense_lines.is_empty() {
        reply.push_str("💸 Expense breakdown:\n");
        for line in &expense_lines {
            reply.push_str(line);
        }
        reply.push('\n');
    }

    reply.push_str(&format!(
        "💰 Net: ${}",
        summary.income_total - summary.expense_total
    ));

    reply
}

fn help_text() -> String {
    tracing::info!("show help text");

    "📖 Commands:

📂 Category management
- add-category income/expense NAME
- update-category OLD_NAME NEW_NAME
- delete-category NAME
- list-categories (show all available categories)

📝 Recording and editing
- NAME AMOUNT (quick record)
- update NAME OLD_AMOUNT NEW_AMOUNT
- delete NAME AMOUNT

📊 Monthly report
- settle (current month)
- settle 2025 5 (specific year and month)"
        .to_string()
}
