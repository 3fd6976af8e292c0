//! Database operations for transactions.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    category::CategoryKind,
    database_id::{CategoryId, TransactionId},
    transaction::Transaction,
};

/// Record a transaction and return it with its generated ID.
///
/// The kind is the owning category's kind at this instant; it stays with the
/// transaction even if the category is later renamed or deleted.
pub fn create_transaction(
    user_id: &str,
    category_id: CategoryId,
    kind: CategoryKind,
    amount: i64,
    connection: &Connection,
) -> Result<Transaction, Error> {
    create_transaction_at(
        user_id,
        category_id,
        kind,
        amount,
        OffsetDateTime::now_utc(),
        connection,
    )
}

pub(crate) fn create_transaction_at(
    user_id: &str,
    category_id: CategoryId,
    kind: CategoryKind,
    amount: i64,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (user_id, category_id, kind, amount, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        (user_id, category_id, kind.as_str(), amount, created_at),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        user_id: user_id.to_string(),
        category_id,
        kind,
        amount,
        created_at,
    })
}

/// Retrieve a single transaction by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a transaction.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let (id, user_id, category_id, kind, amount, created_at): (
        TransactionId,
        String,
        CategoryId,
        String,
        i64,
        OffsetDateTime,
    ) = connection
        .prepare(
            "SELECT id, user_id, category_id, kind, amount, created_at
             FROM \"transaction\" WHERE id = :id;",
        )?
        .query_row(&[(":id", &id)], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?;

    Ok(Transaction {
        id,
        user_id,
        category_id,
        kind: kind.parse()?,
        amount,
        created_at,
    })
}

/// Find the transaction a user means by naming a category and an exact
/// amount.
///
/// This is the only way users can address a transaction through the chat
/// interface. When several transactions match, the most recently recorded one
/// is returned.
///
/// # Errors
/// Returns [Error::NotFound] if no transaction matches.
pub fn find_transaction_id(
    user_id: &str,
    category_name: &str,
    amount: i64,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    connection
        .prepare(
            "SELECT t.id FROM \"transaction\" t
             JOIN category c ON t.category_id = c.id
             WHERE t.user_id = ?1 AND c.name = ?2 AND t.amount = ?3
             ORDER BY t.created_at DESC, t.id DESC
             LIMIT 1;",
        )?
        .query_row((user_id, category_name, amount), |row| row.get(0))
        .map_err(|error| error.into())
}

/// Set a transaction's amount. The only field that can be edited.
///
/// # Errors
/// Returns [Error::UpdateMissingTransaction] if `id` does not refer to a
/// transaction.
pub fn update_transaction_amount(
    id: TransactionId,
    new_amount: i64,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\" SET amount = ?1 WHERE id = ?2",
        (new_amount, id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete a transaction by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if `id` does not refer to a
/// transaction.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Initialize the transaction table and indexes.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            kind TEXT NOT NULL,
            amount INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_created
            ON \"transaction\"(user_id, created_at);",
    )?;

    Ok(())
}
