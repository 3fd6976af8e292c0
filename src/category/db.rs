//! Database operations for categories.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::{
    Error,
    category::{Category, CategoryKind},
    database_id::CategoryId,
};

/// Ordered category names for each kind.
#[derive(Debug, Default, PartialEq)]
pub struct CategoriesByKind {
    /// Names of income categories, ordered by name.
    pub income: Vec<String>,
    /// Names of expense categories, ordered by name.
    pub expense: Vec<String>,
}

impl CategoriesByKind {
    /// Whether the user has no categories of either kind.
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }
}

/// Create a category and return it with its generated ID.
///
/// Creation is a single conditional insert: the UNIQUE constraint on
/// (user_id, name) rejects a duplicate name atomically, regardless of kind,
/// even under concurrent identical requests.
///
/// # Errors
/// Returns [Error::DuplicateCategory] if the user already has a category with
/// this name.
pub fn create_category(
    user_id: &str,
    name: &str,
    kind: CategoryKind,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (user_id, name, kind) VALUES (?1, ?2, ?3);",
        (user_id, name, kind.as_str()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        user_id: user_id.to_string(),
        name: name.to_string(),
        kind,
    })
}

/// Rename a category in place, keeping its ID and kind.
///
/// # Errors
/// Returns [Error::UpdateMissingCategory] if the user has no category named
/// `old_name`, or [Error::DuplicateCategory] if `new_name` is already taken.
pub fn rename_category(
    user_id: &str,
    old_name: &str,
    new_name: &str,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1 WHERE user_id = ?2 AND name = ?3",
        (new_name, user_id, old_name),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by name.
///
/// Transactions recorded under the category are left in place; they become
/// unreachable through the category-name joins used by lookups and summaries.
///
/// # Errors
/// Returns [Error::DeleteMissingCategory] if the user has no category named
/// `name`.
pub fn delete_category(user_id: &str, name: &str, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE user_id = ?1 AND name = ?2",
        (user_id, name),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Retrieve a user's category names grouped by kind, each group ordered by
/// name.
pub fn categories_by_kind(
    user_id: &str,
    connection: &Connection,
) -> Result<CategoriesByKind, Error> {
    let mut statement = connection
        .prepare("SELECT kind, name FROM category WHERE user_id = :user_id ORDER BY kind, name;")?;
    let mut rows = statement.query(&[(":user_id", &user_id)])?;

    let mut categories = CategoriesByKind::default();

    while let Some(row) = rows.next()? {
        let kind: String = row.get(0)?;
        let name: String = row.get(1)?;

        if kind == CategoryKind::Income.as_str() {
            categories.income.push(name);
        } else {
            categories.expense.push(name);
        }
    }

    Ok(categories)
}

/// Look up the ID and kind of the category a user records transactions under.
///
/// # Errors
/// Returns [Error::NotFound] if the user has no category named `name`.
pub fn get_category(
    user_id: &str,
    name: &str,
    connection: &Connection,
) -> Result<(CategoryId, CategoryKind), Error> {
    let (id, kind): (CategoryId, String) = connection
        .prepare("SELECT id, kind FROM category WHERE user_id = ?1 AND name = ?2;")?
        .query_row((user_id, name), |row| Ok((row.get(0)?, row.get(1)?)))?;

    Ok((id, kind.parse()?))
}

/// Retrieve the name to kind mapping for all of a user's categories.
pub fn categories_info(
    user_id: &str,
    connection: &Connection,
) -> Result<HashMap<String, CategoryKind>, Error> {
    let mut statement =
        connection.prepare("SELECT name, kind FROM category WHERE user_id = :user_id;")?;
    let mut rows = statement.query(&[(":user_id", &user_id)])?;

    let mut info = HashMap::new();

    while let Some(row) = rows.next()? {
        let name: String = row.get(0)?;
        let kind: String = row.get(1)?;

        info.insert(name, kind.parse()?);
    }

    Ok(info)
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            UNIQUE (user_id, name)
        );",
    )?;

    Ok(())
}

#[cfg(test)]
mod category_query_tests {
    use std::collections::HashMap;

    use rusqlite::Connection;

    use crate::{
        Error,
        category::{
            CategoriesByKind, CategoryKind, categories_by_kind, categories_info, create_category,
            delete_category, get_category, rename_category,
        },
        db::initialize,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize test database");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();

        let category = create_category("alice", "groceries", CategoryKind::Expense, &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.user_id, "alice");
        assert_eq!(category.name, "groceries");
        assert_eq!(category.kind, CategoryKind::Expense);
    }

    #[test]
    fn create_category_with_duplicate_name_fails() {
        let connection = get_test_db_connection();
        create_category("alice", "bonus", CategoryKind::Income, &connection)
            .expect("Could not create test category");

        let result = create_category("alice", "bonus", CategoryKind::Income, &connection);

        assert_eq!(result, Err(Error::DuplicateCategory));
    }

    #[test]
    fn create_category_with_duplicate_name_fails_across_kinds() {
        let connection = get_test_db_connection();
        create_category("alice", "bonus", CategoryKind::Income, &connection)
            .expect("Could not create test category");

        let result = create_category("alice", "bonus", CategoryKind::Expense, &connection);

        assert_eq!(result, Err(Error::DuplicateCategory));
    }

    #[test]
    fn create_category_with_same_name_for_other_user_succeeds() {
        let connection = get_test_db_connection();
        create_category("alice", "bonus", CategoryKind::Income, &connection)
            .expect("Could not create test category");

        let result = create_category("bob", "bonus", CategoryKind::Income, &connection);

        assert!(result.is_ok());
    }

    #[test]
    fn rename_category_keeps_id_and_kind() {
        let connection = get_test_db_connection();
        let category = create_category("alice", "meals", CategoryKind::Expense, &connection)
            .expect("Could not create test category");

        rename_category("alice", "meals", "food", &connection).expect("Could not rename category");

        let (id, kind) =
            get_category("alice", "food", &connection).expect("Could not get renamed category");
        assert_eq!(id, category.id);
        assert_eq!(kind, category.kind);

        let old_name = get_category("alice", "meals", &connection);
        assert_eq!(old_name, Err(Error::NotFound));
    }

    #[test]
    fn rename_missing_category_returns_not_found() {
        let connection = get_test_db_connection();

        let result = rename_category("alice", "missing", "whatever", &connection);

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn rename_category_to_taken_name_fails() {
        let connection = get_test_db_connection();
        create_category("alice", "meals", CategoryKind::Expense, &connection)
            .expect("Could not create test category");
        create_category("alice", "food", CategoryKind::Expense, &connection)
            .expect("Could not create test category");

        let result = rename_category("alice", "meals", "food", &connection);

        assert_eq!(result, Err(Error::DuplicateCategory));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_db_connection();
        create_category("alice", "meals", CategoryKind::Expense, &connection)
            .expect("Could not create test category");

        let result = delete_category("alice", "meals", &connection);

        assert!(result.is_ok());
        assert_eq!(
            get_category("alice", "meals", &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_missing_category_returns_not_found() {
        let connection = get_test_db_connection();

        let result = delete_category("alice", "missing", &connection);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }

    #[test]
    fn categories_by_kind_groups_and_orders_names() {
        let connection = get_test_db_connection();
        create_category("alice", "wages", CategoryKind::Income, &connection).unwrap();
        create_category("alice", "bonus", CategoryKind::Income, &connection).unwrap();
        create_category("alice", "rent", CategoryKind::Expense, &connection).unwrap();

        let categories =
            categories_by_kind("alice", &connection).expect("Could not list categories");

        assert_eq!(
            categories,
            CategoriesByKind {
                income: vec!["bonus".to_string(), "wages".to_string()],
                expense: vec!["rent".to_string()],
            }
        );
    }

    #[test]
    fn categories_by_kind_is_empty_for_new_user() {
        let connection = get_test_db_connection();

        let categories =
            categories_by_kind("alice", &connection).expect("Could not list categories");

        assert!(categories.is_empty());
    }

    #[test]
    fn categories_info_maps_names_to_kinds() {
        let connection = get_test_db_connection();
        create_category("alice", "wages", CategoryKind::Income, &connection).unwrap();
        create_category("alice", "rent", CategoryKind::Expense, &connection).unwrap();

        let info = categories_info("alice", &connection).expect("Could not get category info");

        assert_eq!(
            info,
            HashMap::from([
                ("wages".to_string(), CategoryKind::Income),
                ("rent".to_string(), CategoryKind::Expense),
            ])
        );
    }
}
