//! Transaction recording: the monetary events a user books under their
//! categories.

mod db;
mod domain;

pub use db::{
    create_transaction, create_transaction_table, delete_transaction, find_transaction_id,
    get_transaction, update_transaction_amount,
};
pub(crate) use db::create_transaction_at;
pub use domain::Transaction;
