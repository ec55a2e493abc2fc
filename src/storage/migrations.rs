// Database migrations for the local key-value store

pub const MIGRATION_001: &str = r#"
-- =============================================================================
-- Settings (key-value)
-- =============================================================================
CREATE TABLE IF NOT EXISTS settings (
    key             TEXT PRIMARY KEY,
    value           TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);
"#;

/// Split a migration script into executable statements, dropping comment lines
pub fn statements(migration: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for statement in migration.split(';') {
        let mut stmt = statement.trim();
        while stmt.starts_with("--") {
            match stmt.find('\n') {
                Some(idx) => stmt = stmt[idx + 1..].trim(),
                None => {
                    stmt = "";
                    break;
                }
            }
        }
        if !stmt.is_empty() {
            out.push(stmt);
        }
    }
    out
}
