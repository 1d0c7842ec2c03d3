use itertools::Itertools;

use super::SqlDialect;

pub fn get_identifier(dialect: SqlDialect, name: &str, escape: bool) -> String {
    match dialect {
        SqlDialect::Postgres => {
            if escape {
                name.split('.')
                    .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
                    .join(".")
            } else {
                name.into()
            }
        }
    }
}

/// Escapes `LIKE` wildcards so the input only ever matches literally.
///
/// The escape character is `\`, Postgres' default for `LIKE`.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert_eq!(
            get_identifier(SqlDialect::Postgres, "b.title", true),
            r#""b"."title""#
        );
        assert_eq!(get_identifier(SqlDialect::Postgres, "b.title", false), "b.title");
    }

    #[test]
    fn like_escaping() {
        assert_eq!(escape_like("100%_sure\\"), r"100\%\_sure\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
