//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName, NewCategory},
    user::UserID,
};

/// Create a category and return it with its generated ID.
///
/// # Errors
///
/// Returns an [Error::InvalidUser] if the owner does not exist, or an
/// [Error::SqlError] for any other SQL error.
pub fn create_category(new_category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO category (name, type, user_id) VALUES (?1, ?2, ?3);",
            (
                new_category.name.as_ref(),
                new_category.category_type.as_str(),
                new_category.user_id.as_i64(),
            ),
        )
        .map_err(map_foreign_key_error)?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: new_category.name,
        category_type: new_category.category_type,
        user_id: new_category.user_id,
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, type, user_id FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all of a user's categories ordered alphabetically by name.
pub fn get_categories_for_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, type, user_id FROM category WHERE user_id = :user_id ORDER BY name ASC, id ASC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Replace the name and type of a category. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    let rows_affected = connection
        .execute(
            "UPDATE category SET name = ?1, type = ?2, user_id = ?3 WHERE id = ?4",
            (
                category.name.as_ref(),
                category.category_type.as_str(),
                category.user_id.as_i64(),
                category_id,
            ),
        )
        .map_err(map_foreign_key_error)?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(Category {
        id: category_id,
        name: category.name,
        category_type: category.category_type,
        user_id: category.user_id,
    })
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Get the number of categories in the database.
pub fn count_categories(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM category;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('INCOME', 'EXPENSE')),
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}

fn map_foreign_key_error(error: rusqlite::Error) -> Error {
    match error {
        // Code 787 occurs when a FOREIGN KEY constraint failed.
        rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 787 => {
            Error::InvalidUser
        }
        error => error.into(),
    }
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_type: String = row.get(2)?;
    let raw_user_id = row.get(3)?;

    let category_type = raw_type.parse().map_err(|error: Error| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(error))
    })?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        category_type,
        user_id: UserID::new(raw_user_id),
    })
}

#[cfg(test)]
mod category_query_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{
        Error, PasswordHash,
        category::{
            CategoryName, CategoryType, NewCategory, count_categories, create_category,
            get_categories_for_user, get_category, update_category,
        },
        db::initialize,
        user::{Email, NewUser, User, UserID, UserStatus, create_user},
    };

    use super::delete_category;

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn insert_user(username: &str, connection: &Connection) -> User {
        create_user(
            NewUser {
                username: username.to_owned(),
                email: Email::new_unchecked(&format!("{username}@wp.pl")),
                password_hash: PasswordHash::new_unchecked("hunter2"),
                status: UserStatus::Verified,
            },
            connection,
        )
        .expect("Could not create test user")
    }

    fn new_category(name: &str, user: &User) -> NewCategory {
        NewCategory {
            name: CategoryName::new_unchecked(name),
            category_type: CategoryType::Expense,
            user_id: user.id,
        }
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let user = insert_user("userone", &connection);

        let category = create_category(new_category("Groceries", &user), &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, CategoryName::new_unchecked("Groceries"));
        assert_eq!(category.category_type, CategoryType::Expense);
        assert_eq!(category.user_id, user.id);
    }

    #[test]
    fn create_category_fails_on_missing_user() {
        let connection = get_test_db_connection();
        let mut user = insert_user("userone", &connection);
        user.id = UserID::new(user.id.as_i64() + 42);

        let result = create_category(new_category("Groceries", &user), &connection);

        assert_eq!(result, Err(Error::InvalidUser));
        assert_eq!(count_categories(&connection), Ok(0));
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let user = insert_user("userone", &connection);
        let inserted = create_category(new_category("Foo", &user), &connection).unwrap();

        let selected = get_category(inserted.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let user = insert_user("userone", &connection);
        let inserted = create_category(new_category("Foo", &user), &connection).unwrap();

        let selected = get_category(inserted.id + 123, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_categories_for_user_only_returns_their_categories() {
        let connection = get_test_db_connection();
        let user = insert_user("userone", &connection);
        let other_user = insert_user("usertwo", &connection);
        let want = HashSet::from([
            create_category(new_category("Foo", &user), &connection).unwrap(),
            create_category(new_category("Bar", &user), &connection).unwrap(),
        ]);
        create_category(new_category("Baz", &other_user), &connection).unwrap();

        let got = get_categories_for_user(user.id, &connection).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, CategoryName::new_unchecked("Bar"));
        assert_eq!(HashSet::from_iter(got), want);
    }

    #[test]
    fn update_category_succeeds() {
        let connection = get_test_db_connection();
        let user = insert_user("userone", &connection);
        let inserted = create_category(new_category("Foo", &user), &connection).unwrap();
        let replacement = NewCategory {
            name: CategoryName::new_unchecked("Wages"),
            category_type: CategoryType::Income,
            user_id: user.id,
        };

        let updated = update_category(inserted.id, replacement, &connection).unwrap();

        assert_eq!(get_category(inserted.id, &connection), Ok(updated));
    }

    #[test]
    fn update_missing_category_fails() {
        let connection = get_test_db_connection();
        let user = insert_user("userone", &connection);

        let result = update_category(42, new_category("Foo", &user), &connection);

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_db_connection();
        let user = insert_user("userone", &connection);
        let inserted = create_category(new_category("Foo", &user), &connection).unwrap();

        delete_category(inserted.id, &connection).unwrap();

        assert_eq!(get_category(inserted.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_category_fails() {
        let connection = get_test_db_connection();

        assert_eq!(delete_category(1, &connection), Err(Error::DeleteMissingCategory));
    }

    #[test]
    fn count_categories_counts_every_user() {
        let connection = get_test_db_connection();
        let user = insert_user("userone", &connection);
        let other_user = insert_user("usertwo", &connection);
        create_category(new_category("Foo", &user), &connection).unwrap();
        create_category(new_category("Foo", &other_user), &connection).unwrap();

        assert_eq!(count_categories(&connection), Ok(2));
    }
}
