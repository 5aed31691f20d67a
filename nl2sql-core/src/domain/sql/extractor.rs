// nl2sql-core/src/domain/sql/extractor.rs

// Language models like to wrap SQL in markdown fences even when told not to.
// This is the only text transform applied between the raw model output and the
// safety validator: it never fails, it only unwraps.

use regex::Regex;
use std::sync::OnceLock;

fn re_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // ``` + optional SQL language tag (```sql\n, ```tsql\n, ```sql ), then the shortest
        // body up to the next ```. Any other first word is part of the statement.
        Regex::new(
            r"```(?:(?i:t-?sql|sql|mssql|duckdb|postgres(?:ql)?|mysql|sqlite|plsql)[ \t]*\r?\n|(?i:sql)\s+)?([\s\S]*?)```",
        )
        .unwrap_or_else(|_| {
            // Hardcoded pattern: the fallback never matches, so extraction degrades to pass-through.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Recovers a single candidate statement from raw model text.
///
/// If the text contains a complete fenced block, the interior of the FIRST one
/// is returned (trimmed). Otherwise the trimmed input is returned unchanged.
pub fn extract_sql(raw: &str) -> String {
    match re_fence().captures(raw).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => raw.trim().to_string(),
    }
}
