use crate::{
    filter::{Filter, Predicate},
    sql::{
        SqlDialect, SqlRenameMap,
        utility::{escape_like, get_identifier},
    },
    value::Value,
};

pub struct SqlFilterBuilder<'a> {
    dialect: SqlDialect,
    rename_map: Option<&'a SqlRenameMap>,
    argument_offset: usize,
    arguments: Vec<Value>,
    result: String,
}

impl<'a> SqlFilterBuilder<'a> {
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            rename_map: None,
            argument_offset: 0,
            arguments: Vec::new(),
            result: String::new(),
        }
    }

    pub fn set_rename_map(&mut self, rename_map: &'a SqlRenameMap) -> &mut Self {
        self.rename_map = Some(rename_map);
        self
    }

    /// Number of arguments already bound before the generated clause.
    pub fn set_argument_offset(&mut self, offset: usize) -> &mut Self {
        self.argument_offset = offset;
        self
    }

    /// Builds a boolean SQL expression and its positional arguments.
    ///
    /// An empty filter yields `TRUE`.
    pub fn build(&mut self, filter: &Filter) -> (String, Vec<Value>) {
        if filter.is_empty() {
            self.result.push_str("TRUE");
        }

        for (i, term) in filter.terms().iter().enumerate() {
            if i > 0 {
                self.result.push_str(" AND ");
            }
            let column = self.build_member(&term.field);
            match &term.predicate {
                Predicate::Contains(substring) => {
                    self.result.push_str(&column);
                    if filter.is_case_insensitive() {
                        self.result.push_str(" ILIKE ");
                    } else {
                        self.result.push_str(" LIKE ");
                    }
                    self.build_argument(format!("%{}%", escape_like(substring)).into());
                }
                Predicate::AtLeast(value) => {
                    self.result.push_str(&column);
                    self.result.push_str(" >= ");
                    self.build_argument(value.clone());
                }
                Predicate::Equals(value) => {
                    self.result.push_str(&column);
                    self.result.push_str(" = ");
                    self.build_argument(value.clone());
                }
            }
        }

        let result = std::mem::take(&mut self.result);
        let arguments = std::mem::take(&mut self.arguments);
        (result, arguments)
    }

    fn build_member(&self, name: &str) -> String {
        self.rename_map
            .and_then(|rename_map| rename_map.rename_member(name))
            .map_or_else(
                || get_identifier(self.dialect, name, true),
                ToString::to_string,
            )
    }

    fn build_argument(&mut self, value: Value) {
        self.result.push_str(&format!(
            "${}",
            self.arguments.len() + 1 + self.argument_offset
        ));
        self.arguments.push(value);
    }
}

#[cfg(test)]
mod tests {
    use blog_common::date_time::UtcDateTime;

    use super::*;

    #[test]
    fn it_works() {
        let rename_map: SqlRenameMap = [
            ("author.first_name", "u.first_name"),
            ("tags", "array_to_string(b.tags, ',')"),
        ]
        .into_iter()
        .collect();
        let created = UtcDateTime::parse_date_or_rfc3339("2024-01-01").unwrap();

        let (sql, args) = SqlFilterBuilder::new(SqlDialect::Postgres)
            .set_rename_map(&rename_map)
            .build(
                &Filter::new()
                    .contains("author.first_name", "Jan")
                    .contains("tags", "50%")
                    .at_least("b.created_at", created),
            );

        assert_eq!(
            sql,
            r#"u.first_name LIKE $1 AND array_to_string(b.tags, ',') LIKE $2 AND "b"."created_at" >= $3"#
        );
        assert_eq!(args[0], "%Jan%".into());
        assert_eq!(args[1], r"%50\%%".into());
        assert_eq!(args[2], created.into());
    }

    #[test]
    fn case_insensitive_with_offset() {
        let (sql, args) = SqlFilterBuilder::new(SqlDialect::Postgres)
            .set_argument_offset(2)
            .build(&Filter::new().case_insensitive(true).contains("title", "rust"));
        assert_eq!(sql, r#""title" ILIKE $3"#);
        assert_eq!(args, vec![Value::from("%rust%")]);
    }

    #[test]
    fn empty() {
        let (sql, args) = SqlFilterBuilder::new(SqlDialect::Postgres).build(&Filter::new());
        assert_eq!(sql, "TRUE");
        assert!(args.is_empty());
    }
}
