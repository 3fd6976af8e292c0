//! Tokenizes raw message text and classifies it into a command.

/// A parsed chat command carrying its raw argument strings.
///
/// Argument validation (amount and type parsing) is left to the
/// [Interpreter](crate::Interpreter) so that every failure can be answered
/// with a specific reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The message contained no tokens at all.
    Empty,
    /// Create a category: `add-category income bonus`.
    AddCategory {
        /// The raw type label, `income` or `expense`.
        kind: String,
        /// The name of the new category.
        name: String,
    },
    /// Rename a category: `update-category old new`.
    UpdateCategory {
        /// The current category name.
        old_name: String,
        /// The name to rename it to.
        new_name: String,
    },
    /// Delete a category: `delete-category name`.
    DeleteCategory {
        /// The name of the category to delete.
        name: String,
    },
    /// List all categories: `list-categories`.
    ListCategories,
    /// Record a transaction with the two-token shorthand: `lunch 150`.
    QuickTransaction {
        /// The category to record under.
        category: String,
        /// The raw amount text.
        amount: String,
    },
    /// Change a recorded amount: `update lunch 150 200`.
    UpdateTransaction {
        /// The category the transaction was recorded under.
        category: String,
        /// The raw amount text identifying the transaction.
        old_amount: String,
        /// The raw replacement amount text.
        new_amount: String,
    },
    /// Delete a recorded transaction: `delete lunch 150`.
    DeleteTransaction {
        /// The category the transaction was recorded under.
        category: String,
        /// The raw amount text identifying the transaction.
        amount: String,
    },
    /// Produce the monthly report: `settle` or `settle 2025 5`.
    MonthlySummary {
        /// The tokens after the keyword, an optional year/month pair.
        args: Vec<String>,
    },
    /// Show the command reference: `help`.
    Help,
    /// The message matched no known command shape.
    Unrecognized,
}

/// Classify `text` by first match against the known command shapes.
///
/// Patterns are tested in a fixed priority order because some overlap in
/// arity: `delete-category foo` also has the two-token shape of a quick
/// record, so the category-management keywords are tested first. The
/// two-token shape in turn shadows `update`, `delete`, `settle` and `help`
/// messages with a single argument.
pub fn parse(text: &str) -> Command {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    match tokens.as_slice() {
        [] => Command::Empty,
        ["add-category", kind, name, ..] => Command::AddCategory {
            kind: kind.to_string(),
            name: name.to_string(),
        },
        ["update-category", old_name, new_name] => Command::UpdateCategory {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
        },
        ["delete-category", name] => Command::DeleteCategory {
            name: name.to_string(),
        },
        ["list-categories", ..] => Command::ListCategories,
        [category, amount] => Command::QuickTransaction {
            category: category.to_string(),
            amount: amount.to_string(),
        },
        ["update", category, old_amount, new_amount] => Command::UpdateTransaction {
            category: category.to_string(),
            old_amount: old_amount.to_string(),
            new_amount: new_amount.to_string(),
        },
        ["delete", category, amount] => Command::DeleteTransaction {
            category: category.to_string(),
            amount: amount.to_string(),
        },
        ["settle", args @ ..] => Command::MonthlySummary {
            args: args.iter().map(|token| token.to_string()).collect(),
        },
        ["help", ..] => Command::Help,
        _ => Command::Unrecognized,
    }
}

#[cfg(test)]
mod parser_tests {
    use super::{Command, parse};

    #[test]
    fn empty_input_is_distinct_from_unrecognized() {
        assert_eq!(parse(""), Command::Empty);
        assert_eq!(parse("   \t \n"), Command::Empty);
    }

    #[test]
    fn add_category_requires_at_least_three_tokens() {
        assert_eq!(
            parse("add-category income bonus"),
            Command::AddCategory {
                kind: "income".to_string(),
                name: "bonus".to_string(),
            }
        );
    }

    #[test]
    fn add_category_ignores_extra_tokens() {
        assert_eq!(
            parse("add-category income bonus extra tokens"),
            Command::AddCategory {
                kind: "income".to_string(),
                name: "bonus".to_string(),
            }
        );
    }

    #[test]
    fn two_token_add_category_is_a_quick_record() {
        assert_eq!(
            parse("add-category income"),
            Command::QuickTransaction {
                category: "add-category".to_string(),
                amount: "income".to_string(),
            }
        );
    }

    #[test]
    fn update_category_requires_exactly_three_tokens() {
        assert_eq!(
            parse("update-category meals food"),
            Command::UpdateCategory {
                old_name: "meals".to_string(),
                new_name: "food".to_string(),
            }
        );
        assert_eq!(parse("update-category meals food extra"), Command::Unrecognized);
    }

    #[test]
    fn delete_category_wins_the_two_token_tie() {
        assert_eq!(
            parse("delete-category meals"),
            Command::DeleteCategory {
                name: "meals".to_string(),
            }
        );
    }

    #[test]
    fn list_categories_accepts_any_arity() {
        assert_eq!(parse("list-categories"), Command::ListCategories);
        assert_eq!(parse("list-categories please"), Command::ListCategories);
    }

    #[test]
    fn two_tokens_are_a_quick_record() {
        assert_eq!(
            parse("lunch 150"),
            Command::QuickTransaction {
                category: "lunch".to_string(),
                amount: "150".to_string(),
            }
        );
    }

    #[test]
    fn two_token_update_is_a_quick_record() {
        // The two-token shape is tested before the update keyword, so a
        // category literally named "update" stays recordable.
        assert_eq!(
            parse("update 150"),
            Command::QuickTransaction {
                category: "update".to_string(),
                amount: "150".to_string(),
            }
        );
    }

    #[test]
    fn update_transaction_requires_exactly_four_tokens() {
        assert_eq!(
            parse("update lunch 150 200"),
            Command::UpdateTransaction {
                category: "lunch".to_string(),
                old_amount: "150".to_string(),
                new_amount: "200".to_string(),
            }
        );
        assert_eq!(parse("update lunch 150 200 250"), Command::Unrecognized);
    }

    #[test]
    fn delete_transaction_requires_exactly_three_tokens() {
        assert_eq!(
            parse("delete lunch 150"),
            Command::DeleteTransaction {
                category: "lunch".to_string(),
                amount: "150".to_string(),
            }
        );
        assert_eq!(parse("delete lunch 150 200"), Command::Unrecognized);
    }

    #[test]
    fn two_token_settle_is_a_quick_record() {
        assert_eq!(
            parse("settle 2025"),
            Command::QuickTransaction {
                category: "settle".to_string(),
                amount: "2025".to_string(),
            }
        );
    }

    #[test]
    fn settle_collects_trailing_tokens() {
        assert_eq!(
            parse("settle"),
            Command::MonthlySummary { args: Vec::new() }
        );
        assert_eq!(
            parse("settle 2025 5"),
            Command::MonthlySummary {
                args: vec!["2025".to_string(), "5".to_string()],
            }
        );
    }

    #[test]
    fn help_returns_the_reference() {
        assert_eq!(parse("help"), Command::Help);
    }

    #[test]
    fn unknown_input_is_unrecognized() {
        assert_eq!(parse("what is this"), Command::Unrecognized);
        assert_eq!(parse("hello"), Command::Unrecognized);
    }
}
