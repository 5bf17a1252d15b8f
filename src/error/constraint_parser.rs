use std::sync::OnceLock;

use regex::Regex;

/// Parses PostgreSQL constraint violation messages into structured pieces.
///
/// PostgreSQL reports constraint failures as free text plus a constraint
/// name; the regexes below pull out the table, column, and offending value
/// so the error taxonomy can name what actually went wrong.
pub struct ConstraintParser;

struct RegexPatterns {
    /// "Key (email)=(maria@example.com)" in DETAIL lines
    key_value: Regex,
    /// column names quoted in the message
    column_name: Regex,
    /// table names quoted in the message
    table_name: Regex,
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(|| RegexPatterns {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        })
    }

    /// Parses a unique violation into (entity, field, value).
    ///
    /// Prefers the constraint name (`users_email_key` -> users.email) and
    /// pulls the duplicate value from the DETAIL line; falls back to the
    /// message text when the constraint name is absent or unconventional.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some((entity, field)) =
            constraint_name.and_then(|name| Self::parse_constraint_name(name))
        {
            let value = Self::extract_key_value_from_message(message)
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a foreign key violation into (entity, field, referenced value).
    ///
    /// Handles constraint names like `product_categories_category_id_fkey`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some((entity, field)) =
            constraint_name.and_then(|name| Self::parse_foreign_key_constraint_name(name))
        {
            let value = Self::extract_key_value_from_message(message)
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not-null violation into (entity, field).
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| constraint_name.and_then(|n| Self::parse_constraint_name(n).map(|(e, _)| e)))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits `{table}_{column}_{suffix}` constraint names, e.g.
    /// `users_email_key` -> ("users", "email").
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = constraint_name.split('_').collect();
        if parts.len() >= 3 {
            return Some((parts[0].to_string(), parts[1].to_string()));
        }
        None
    }

    /// Splits `{table}_{column}_fkey` names, keeping multi-part column names
    /// intact: `user_roles_role_id_fkey` is ambiguous for plain splitting, so
    /// the known join-table prefixes are tried first.
    pub fn parse_foreign_key_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let without_suffix = constraint_name.strip_suffix("_fkey")?;

        // Join tables in this schema have compound names; match them before
        // falling back to first-token-is-the-table splitting.
        for table in ["product_categories", "user_roles"] {
            if let Some(rest) = without_suffix.strip_prefix(table) {
                let field = rest.strip_prefix('_')?;
                return Some((table.to_string(), field.to_string()));
            }
        }

        let parts: Vec<&str> = without_suffix.split('_').collect();
        if parts.len() >= 2 {
            return Some((parts[0].to_string(), parts[1..].join("_")));
        }
        None
    }

    /// Extracts the quoted column name from a message, if present.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts the quoted table name from a message, if present.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts the `Key (field)=(value)` pair from a DETAIL line.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unique_violation_from_constraint_name() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(maria@example.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, Some("users_email_key"));
        assert_eq!(
            result,
            Some((
                "users".to_string(),
                "email".to_string(),
                "maria@example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_falls_back_to_message() {
        let message = "duplicate key value violates unique constraint \"weird\"\nDETAIL: Key (email)=(alex@example.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "email".to_string(),
                "alex@example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_foreign_key_violation_join_table() {
        let message = "insert or update on table \"product_categories\" violates foreign key constraint \"product_categories_category_id_fkey\"\nDETAIL: Key (category_id)=(99) is not present in table \"categories\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some("product_categories_category_id_fkey"),
        );
        assert_eq!(
            result,
            Some((
                "product_categories".to_string(),
                "category_id".to_string(),
                "99".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_not_null_violation() {
        let message = "null value in column \"name\" of relation \"categories\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result, Some(("resource".to_string(), "name".to_string())));
    }

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_key"),
            Some(("users".to_string(), "email".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("nope"), None);
    }

    #[test]
    fn test_parse_foreign_key_constraint_name_simple() {
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("orders_product_id_fkey"),
            Some(("orders".to_string(), "product_id".to_string()))
        );
    }

    #[test]
    fn test_extract_key_value_from_message() {
        let message = "DETAIL: Key (email)=(test@example.com) already exists.";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(message),
            Some(("email".to_string(), "test@example.com".to_string()))
        );
    }
}
