use crate::{
    ast::{
        common::{JoinKind, TableRef},
        query::{FromClause, JoinClause, ReportQuery},
    },
    render::{Render, Renderer},
};

impl Render for ReportQuery {
    fn render(&self, r: &mut Renderer) {
        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        r.sql.push_str(&self.select.join(", "));

        // 2. FROM
        if let Some(from) = &self.from {
            r.sql.push(' ');
            from.render(r);
        }

        // 3. JOIN
        for join in &self.joins {
            r.sql.push(' ');
            join.render(r);
        }

        // 4. WHERE
        if let Some(where_clause) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            where_clause.render(r);
        }

        // 5. GROUP BY
        if !self.group_by.is_empty() {
            r.sql.push_str(" GROUP BY ");
            r.sql.push_str(&self.group_by.join(", "));
        }

        // 6. ORDER BY
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            r.sql.push_str(&self.order_by.join(", "));
        }

        // 7. LIMIT / OFFSET
        if let Some(limit) = self.limit {
            r.sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            r.sql.push_str(&format!(" OFFSET {offset}"));
        }
    }
}

impl Render for TableRef {
    fn render(&self, r: &mut Renderer) {
        if let Some(schema) = &self.schema {
            r.sql.push_str(&r.dialect.quote_identifier(schema));
            r.sql.push('.');
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("FROM ");
        self.table.render(r);
        if let Some(alias) = &self.alias {
            r.sql.push(' ');
            r.sql.push_str(alias);
        }
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        let join_str = match self.kind {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        };
        r.sql.push_str(join_str);
        r.sql.push(' ');
        self.table.render(r);
        if let Some(alias) = &self.alias {
            r.sql.push(' ');
            r.sql.push_str(alias);
        }
        r.sql.push_str(" ON ");
        self.on.render(r);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{
            common::{JoinKind, OrderDir},
            expr::{BinaryOperator, Expr},
        },
        build::query::ReportQueryBuilder,
        dialect::{MySql, Postgres},
        ident, literal,
        render::to_sql,
        table_ref, value,
    };
    use model::core::value::Value;

    #[test]
    fn test_simple_query_mysql() {
        let query = ReportQueryBuilder::new()
            .select(&["l.id AS id", "l.email AS email"])
            .from(table_ref!("leads"), Some("l"))
            .where_clause(Expr::binary(
                ident!("l", "id"),
                BinaryOperator::Eq,
                value!(Value::Int(123)),
            ))
            .build();

        let (sql, params) = to_sql(&query, &MySql);
        assert_eq!(
            sql,
            "SELECT l.id AS id, l.email AS email FROM `leads` l WHERE (`l`.`id` = ?)"
        );
        assert_eq!(params, vec![Value::Int(123)]);
    }

    #[test]
    fn test_full_query_postgres() {
        let query = ReportQueryBuilder::new()
            .select(&["t1.value AS favorite_color", "COUNT(l.id) AS total"])
            .from(table_ref!("mautic_leads"), Some("l"))
            .join(
                JoinKind::Left,
                "l",
                table_ref!("mautic_lead_fields_leads_string_xref"),
                Some("t1"),
                Expr::binary(ident!("l", "id"), BinaryOperator::Eq, ident!("t1", "lead_id"))
                    .and(Expr::binary(
                        ident!("t1", "lead_field_id"),
                        BinaryOperator::Eq,
                        literal!("4"),
                    )),
            )
            .where_clause(Expr::binary(
                ident!("t1", "value"),
                BinaryOperator::NotEq,
                value!(Value::String("red".into())),
            ))
            .group_by(&["t1.value"])
            .order_by("favorite_color", Some(OrderDir::Asc))
            .limit(10)
            .offset(20)
            .build();

        let (sql, params) = to_sql(&query, &Postgres);
        let expected_sql = concat!(
            r#"SELECT t1.value AS favorite_color, COUNT(l.id) AS total FROM "mautic_leads" l "#,
            r#"LEFT JOIN "mautic_lead_fields_leads_string_xref" t1 ON (("l"."id" = "t1"."lead_id") AND ("t1"."lead_field_id" = 4)) "#,
            r#"WHERE ("t1"."value" <> $1) GROUP BY t1.value ORDER BY favorite_color ASC LIMIT 10 OFFSET 20"#
        );
        assert_eq!(sql, expected_sql);
        assert_eq!(params, vec![Value::String("red".into())]);
    }
}
