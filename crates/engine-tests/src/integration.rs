#[cfg(test)]
mod tests {
    use crate::{
        rewriter, rewriter_with, run_graph_event, run_query_event, test_catalog,
        utils::{QUERY_EVENT_JSON, filter, graph_event, lead_query, mysql, query_event},
        write_temp,
    };
    use engine_config::settings::{RewriterSettings, WhereMatching};
    use engine_core::{event::ReportEvent, rewriter::ExtendedFieldRewriter};
    use model::{core::value::Value, report::filter::FilterOperator};
    use query_builder::{
        ast::{common::OrderDir, query::QueryPart},
        build::query::ReportQueryBuilder,
        dialect::Postgres,
        literal,
        render::to_sql,
        table_ref,
    };
    use std::sync::Arc;
    use tracing_test::traced_test;

    // Scenario: One extended field referenced in select, order-by, group-by and where.
    // Expected Outcome: Exactly one join is added and every clause points at it.
    #[traced_test]
    #[test]
    fn tc01_same_field_joins_once() {
        let query = lead_query(
            &["l.favorite_color AS favorite_color"],
            &[("l.favorite_color", OrderDir::Asc)],
            &["l.favorite_color"],
            Some(literal!("l.favorite_color = 'red'")),
        );
        let mut event = query_event(
            query,
            &["favorite_color"],
            vec![filter(
                "l.favorite_color",
                FilterOperator::Eq,
                Value::String("red".into()),
            )],
        );

        let outcome = run_query_event(&rewriter(), &mut event).expect("rewrite");

        let query = event.query();
        assert_eq!(query.joins().len(), 1);
        assert_eq!(outcome.joins.len(), 1);
        assert_eq!(query.select, vec!["t1.value AS favorite_color"]);
        assert_eq!(query.order_by, vec!["favorite_color ASC"]);
        assert_eq!(query.group_by, vec!["t1.value"]);
        assert_eq!(query.where_clause, Some(literal!("t1.value = 'red'")));
        assert!(logs_contain("Reusing join t1 for extended field 'favorite_color'"));
    }

    // Scenario: Only physical lead columns are referenced.
    // Expected Outcome: Every clause is byte-identical and no join is added.
    #[test]
    fn tc02_lead_columns_untouched() {
        let query = lead_query(
            &["l.id AS id", "l.email AS email", "COUNT(l.id) AS total"],
            &[("l.email", OrderDir::Desc)],
            &["l.email"],
            Some(literal!("l.email LIKE '%@example.com' AND l.points > 3")),
        );
        let mut event = query_event(
            query.clone(),
            &["id", "email"],
            vec![filter("l.points", FilterOperator::Gt, Value::Int(3))],
        );

        let outcome = run_query_event(&rewriter(), &mut event).expect("rewrite");

        assert!(outcome.is_identity());
        assert_eq!(event.query().select, query.select);
        assert_eq!(event.query().order_by, query.order_by);
        assert_eq!(event.query().group_by, query.group_by);
        assert_eq!(event.query().where_clause, query.where_clause);
        assert!(event.query().joins().is_empty());
    }

    // Scenario: Distinct fields first seen in select, order-by, group-by, then where.
    // Expected Outcome: Aliases follow the clause order and a re-run assigns the same ones.
    #[test]
    fn tc03_aliases_follow_clause_order() {
        let build = || {
            let query = lead_query(
                &["l.favorite_color AS favorite_color"],
                &[("l.signup_date", OrderDir::Desc)],
                &["l.ssn"],
                Some(literal!("l.score >= 5")),
            );
            query_event(
                query,
                &["favorite_color"],
                vec![filter("l.score", FilterOperator::Gte, Value::Int(5))],
            )
        };

        let rewriter = rewriter();
        let mut first = build();
        let mut second = build();
        let outcome = run_query_event(&rewriter, &mut first).expect("rewrite");
        run_query_event(&rewriter, &mut second).expect("rewrite");

        let assigned = outcome
            .joins
            .iter()
            .map(|j| (j.field_alias.as_str(), j.join_alias.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            assigned,
            vec![
                ("favorite_color", "t1"),
                ("signup_date", "t2"),
                ("ssn", "t3"),
                ("score", "t4"),
            ]
        );
        assert_eq!(first, second);
        assert_eq!(first.query().order_by, vec!["t2.value DESC"]);
        assert_eq!(first.query().group_by, vec!["t3.value"]);
    }

    // Scenario: A secure text field under a prefixed install.
    // Expected Outcome: The join table is `<prefix>lead_fields_leads_text_secure_xref`.
    #[test]
    fn tc04_secure_table_name() {
        let settings = RewriterSettings {
            table_prefix: "mt_".into(),
            ..Default::default()
        };
        let query = lead_query(&["l.id AS id"], &[], &["l.ssn"], None);
        let mut event = query_event(query, &["id"], vec![]);

        let outcome = run_query_event(&rewriter_with(settings), &mut event).expect("rewrite");

        assert_eq!(outcome.joins[0].table_name, "mt_lead_fields_leads_text_secure_xref");
        assert_eq!(
            event.query().joins()[0].table,
            table_ref!("mt_lead_fields_leads_text_secure_xref")
        );
    }

    // Scenario: Full report query with a where filter on a field not selected.
    // Expected Outcome: The rendered SQL carries both joins in allocation order.
    #[test]
    fn tc05_rendered_report_query() {
        let query = lead_query(
            &["l.id AS id", "l.favorite_color AS favorite_color"],
            &[("l.favorite_color", OrderDir::Asc)],
            &["l.favorite_color"],
            Some(literal!("l.score > 10 AND l.email IS NOT NULL")),
        );
        let mut event = query_event(
            query,
            &["id", "favorite_color"],
            vec![filter("l.score", FilterOperator::Gt, Value::Int(10))],
        );

        let outcome = run_query_event(&rewriter(), &mut event).expect("rewrite");
        let (sql, params) = mysql(event.query());

        let expected_sql = concat!(
            "SELECT l.id AS id, t1.value AS favorite_color FROM `leads` l",
            " LEFT JOIN `lead_fields_leads_string_xref` t1",
            " ON ((`l`.`id` = `t1`.`lead_id`) AND (`t1`.`lead_field_id` = 4))",
            " LEFT JOIN `lead_fields_leads_float_xref` t2",
            " ON ((`l`.`id` = `t2`.`lead_id`) AND (`t2`.`lead_field_id` = 7))",
            " WHERE t2.value > 10 AND l.email IS NOT NULL",
            " GROUP BY t1.value ORDER BY favorite_color ASC"
        );
        assert_eq!(sql, expected_sql);
        assert!(params.is_empty());
        assert_eq!(outcome.rewritten.get(&QueryPart::Select), Some(&1));
        assert_eq!(outcome.rewritten.get(&QueryPart::OrderBy), Some(&1));
        assert_eq!(outcome.rewritten.get(&QueryPart::GroupBy), Some(&1));
        assert_eq!(outcome.rewritten.get(&QueryPart::Where), Some(&1));
    }

    // Scenario: Where clause built from the filters as an expression tree.
    // Expected Outcome: Identifiers are replaced at node level and values stay bound.
    #[test]
    fn tc06_structured_where_postgres() {
        let filters = vec![
            filter("l.score", FilterOperator::Gt, Value::Int(10)),
            filter("l.scoreboard", FilterOperator::Lt, Value::Int(3)),
        ];
        let query = ReportQueryBuilder::new()
            .select(&["l.id AS id"])
            .from(table_ref!("leads"), Some("l"))
            .filters(&filters)
            .build();
        let mut event = query_event(query, &["id"], filters);

        run_query_event(&rewriter(), &mut event).expect("rewrite");
        let (sql, params) = to_sql(event.query(), &Postgres);

        let expected_sql = concat!(
            r#"SELECT l.id AS id FROM "leads" l"#,
            r#" LEFT JOIN "lead_fields_leads_float_xref" t1"#,
            r#" ON (("l"."id" = "t1"."lead_id") AND ("t1"."lead_field_id" = 7))"#,
            r#" WHERE (("t1"."value" > $1) AND ("l"."scoreboard" < $2))"#
        );
        assert_eq!(sql, expected_sql);
        assert_eq!(params, vec![Value::Int(10), Value::Int(3)]);
    }

    // Scenario: Raw where text holds a lead column the filter column is a prefix of.
    // Expected Outcome: Boundary matching leaves `l.scoreboard` alone.
    #[test]
    fn tc07_boundary_matching_skips_longer_identifier() {
        let query = lead_query(
            &["l.id AS id"],
            &[],
            &[],
            Some(literal!("l.score > 10 AND l.scoreboard < 3")),
        );
        let mut event = query_event(
            query,
            &["id"],
            vec![filter("l.score", FilterOperator::Gt, Value::Int(10))],
        );

        run_query_event(&rewriter(), &mut event).expect("rewrite");

        assert_eq!(
            event.query().where_clause,
            Some(literal!("t1.value > 10 AND l.scoreboard < 3"))
        );
    }

    // Scenario: Same clause as tc07 under legacy literal matching.
    // Expected Outcome: Every substring occurrence is replaced, corrupting `l.scoreboard`.
    #[test]
    fn tc08_literal_matching_corrupts_prefix_collision() {
        let settings = RewriterSettings {
            where_matching: WhereMatching::Literal,
            ..Default::default()
        };
        let query = lead_query(
            &["l.id AS id"],
            &[],
            &[],
            Some(literal!("l.score > 10 AND l.scoreboard < 3")),
        );
        let mut event = query_event(
            query,
            &["id"],
            vec![filter("l.score", FilterOperator::Gt, Value::Int(10))],
        );

        run_query_event(&rewriter_with(settings), &mut event).expect("rewrite");

        assert_eq!(
            event.query().where_clause,
            Some(literal!("t1.value > 10 AND t1.valueboard < 3"))
        );
    }

    // Scenario: Graph aggregate query with an order-by on an extended field.
    // Expected Outcome: Select and group-by are rewritten, order-by is left as is.
    #[test]
    fn tc09_graph_query_keeps_order_by() {
        let query = lead_query(
            &["COUNT(l.id) AS total", "l.favorite_color AS favorite_color"],
            &[("l.score", OrderDir::Desc)],
            &["l.favorite_color"],
            None,
        );
        let mut event = graph_event(query, vec![]);

        let outcome = run_graph_event(&rewriter(), &mut event).expect("rewrite");

        let query = event.query_builder();
        assert_eq!(
            query.select,
            vec!["COUNT(l.id) AS total", "t1.value AS favorite_color"]
        );
        assert_eq!(query.group_by, vec!["t1.value"]);
        assert_eq!(query.order_by, vec!["l.score DESC"]);
        assert_eq!(outcome.joins.len(), 1);
        assert!(!outcome.rewritten.contains_key(&QueryPart::OrderBy));
    }

    // Scenario: Catalog and event are read from disk, as the CLI does.
    // Expected Outcome: The dispatched event is rewritten in place.
    #[test]
    fn tc10_event_and_catalog_from_files() {
        let catalog_file = write_temp(crate::utils::FIELDS_JSON);
        let settings_file = write_temp(r#"{"table_prefix": "acme_"}"#);

        let catalog =
            model::field::catalog::InMemoryCatalog::from_path(catalog_file.path()).expect("catalog");
        let settings = RewriterSettings::from_path(settings_file.path()).expect("settings");
        settings.validate().expect("valid settings");
        assert_eq!(catalog.len(), test_catalog().len());

        let mut event: ReportEvent = serde_json::from_str(QUERY_EVENT_JSON).expect("event");
        let rewriter = ExtendedFieldRewriter::new(Arc::new(catalog), settings);
        let outcome = rewriter.dispatch(&mut event).expect("rewrite");

        let query = event.query();
        assert_eq!(query.select, vec!["l.id AS id", "t1.value AS favorite_color"]);
        assert_eq!(query.order_by, vec!["favorite_color DESC"]);
        assert_eq!(query.where_clause, Some(literal!("t2.value > 10")));
        assert_eq!(outcome.joins[0].table_name, "acme_lead_fields_leads_string_xref");
        assert_eq!(outcome.joins[1].table_name, "acme_lead_fields_leads_float_xref");
    }

    // Scenario: A pass finishes.
    // Expected Outcome: The commit is logged with the number of joins.
    #[traced_test]
    #[test]
    fn tc11_commit_logged() {
        let query = lead_query(&["l.score AS score"], &[], &[], None);
        let mut event = query_event(query, &["score"], vec![]);

        run_query_event(&rewriter(), &mut event).expect("rewrite");

        assert!(logs_contain("Extended field rewrite committed with 1 join(s)"));
    }
}
