//! Category management: the named income/expense buckets that transactions
//! are recorded under.

mod db;
mod domain;

pub use db::{
    CategoriesByKind, categories_by_kind, categories_info, create_category, create_category_table,
    delete_category, get_category, rename_category,
};
pub use domain::{Category, CategoryKind};
