use serde::{Deserialize, Serialize};

/// How a dialect delimits identifiers.
///
/// A closer occurring inside a name is written as `escape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierQuoting {
    pub opener: String,
    pub closer: String,
    pub escape: String,
}

impl IdentifierQuoting {
    pub fn new(opener: &str, closer: &str, escape: &str) -> Self {
        Self {
            opener: opener.to_string(),
            closer: closer.to_string(),
            escape: escape.to_string(),
        }
    }

    /// `"name"` (ANSI, PostgreSQL, Oracle, SQLite)
    pub fn double_quotes() -> Self {
        Self::new("\"", "\"", "\"\"")
    }

    /// `` `name` `` (MySQL)
    pub fn backticks() -> Self {
        Self::new("`", "`", "``")
    }

    /// `[name]` (SQL Server)
    pub fn brackets() -> Self {
        Self::new("[", "]", "]]")
    }

    pub fn quote(&self, name: &str) -> String {
        let mut quoted = String::with_capacity(name.len() + self.opener.len() + self.closer.len());
        quoted.push_str(&self.opener);
        quoted.push_str(&name.replace(&self.closer, &self.escape));
        quoted.push_str(&self.closer);
        quoted
    }

    /// Quote each part and join with dots.
    pub fn quote_path(&self, parts: &[&str]) -> String {
        parts
            .iter()
            .map(|p| self.quote(p))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Inverse of [`quote`](Self::quote). `None` if `text` is not delimited.
    pub fn unquote(&self, text: &str) -> Option<String> {
        let inner = text
            .strip_prefix(self.opener.as_str())?
            .strip_suffix(self.closer.as_str())?;
        Some(inner.replace(&self.escape, &self.closer))
    }
}

impl Default for IdentifierQuoting {
    fn default() -> Self {
        Self::double_quotes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closer_is_escaped() {
        let q = IdentifierQuoting::double_quotes();
        assert_eq!(q.quote(r#"my"table"#), r#""my""table""#);

        let q = IdentifierQuoting::brackets();
        assert_eq!(q.quote("odd]name"), "[odd]]name]");
        assert_eq!(q.quote("[open"), "[[open]");
    }

    #[test]
    fn test_unquote_recovers_identifier() {
        for quoting in [
            IdentifierQuoting::double_quotes(),
            IdentifierQuoting::backticks(),
            IdentifierQuoting::brackets(),
        ] {
            for name in ["plain", "with space", "a\"b", "x`y`", "]]", "a]b\"c`d"] {
                let quoted = quoting.quote(name);
                assert_eq!(quoting.unquote(&quoted).as_deref(), Some(name), "{quoted}");
            }
        }
    }

    #[test]
    fn test_quote_path() {
        let q = IdentifierQuoting::backticks();
        assert_eq!(q.quote_path(&["db", "users"]), "`db`.`users`");
    }
}
