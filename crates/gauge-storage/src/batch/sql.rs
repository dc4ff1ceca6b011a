//! Bulk-insert statement builder. Pure string construction; no
//! connection involved, safe to test as `(table, N, K) -> String`.

use gauge_core::errors::StorageError;
use gauge_core::measurement::COLUMNS;

/// Validate a configured table identifier before it is interpolated into
/// SQL. Grammar: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_table_name(name: &str) -> Result<(), StorageError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidTableName {
            name: name.to_string(),
        })
    }
}

/// Build one parameterized bulk insert sized to `records x columns`
/// placeholders, numbered `?1..?N`, row-major and gap-free:
///
/// `INSERT INTO t (device_id, recorded_at, value) VALUES (?1, ?2, ?3), (?4, ?5, ?6);`
pub fn build_insert(table: &str, records: usize, columns: usize) -> String {
    let head = format!("INSERT INTO {} ({}) VALUES ", table, COLUMNS.join(", "));
    // Per value: '?' + digits + ", "; per row: parens + separator.
    let mut sql = String::with_capacity(head.len() + records * (4 + 8 * columns));
    sql.push_str(&head);
    let mut arg = 0usize;
    for row in 0..records {
        if row > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for col in 0..columns {
            arg += 1;
            sql.push('?');
            sql.push_str(&arg.to_string());
            if col + 1 != columns {
                sql.push_str(", ");
            }
        }
        sql.push(')');
    }
    sql.push(';');
    sql
}
