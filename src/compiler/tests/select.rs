use super::*;
use crate::ast::*;
use crate::catalog::{Schema, Table};
use crate::compiler::NamingOptions;
use pretty_assertions::assert_eq;

fn catalog(name: &str) -> TableRef {
    TableRef::table(Table::new(name).build())
}

#[test]
fn test_catalog_tables_get_generated_aliases() {
    let users = catalog("users");
    let id = Parameter::new();
    let select = Select::from(users.clone())
        .column(col(&users, "id"))
        .filter(eq(col(&users, "id"), id.clone()));

    let result = SqlCompiler::new(Dialect::Ansi)
        .compile(&select.into(), &CompilerConfig::default())
        .unwrap();
    assert_eq!(
        result.command_text(None).unwrap(),
        r#"SELECT "a"."id" FROM "users" AS "a" WHERE ("a"."id" = @p0)"#
    );
    assert_eq!(result.parameter_name(&id).unwrap(), "p0");
    assert!(result.is_static());
}

#[test]
fn test_named_table_keeps_its_name() {
    assert_eq!(sql(Dialect::Ansi, Select::from(TableRef::named("t"))), r#"SELECT * FROM "t""#);
}

#[test]
fn test_explicit_alias() {
    let users = catalog("users").with_alias("u");
    let select = Select::from(users.clone()).column(col(&users, "id"));
    assert_eq!(sql(Dialect::Ansi, select), r#"SELECT "u"."id" FROM "users" AS "u""#);
}

#[test]
fn test_self_join_aliases_are_unique() {
    let staff = TableRef::named("employees");
    let boss = TableRef::named("employees");
    let from = FromItem::from(staff.clone()).join(
        JoinKind::Inner,
        boss.clone(),
        Some(eq(col(&staff, "boss_id"), col(&boss, "id"))),
    );
    let select = Select::from(from).column(col(&boss, "name"));
    assert_eq!(
        sql(Dialect::Ansi, select),
        r#"SELECT "a"."name" FROM "employees" INNER JOIN "employees" AS "a" ON ("employees"."boss_id" = "a"."id")"#
    );
}

#[test]
fn test_distinct_alias_and_paging() {
    let orders = TableRef::named("orders");
    let select = Select::from(orders.clone())
        .column_as(col(&orders, "total"), "amount")
        .distinct()
        .order_by(OrderItem::desc(col(&orders, "total")))
        .limit(lit(10))
        .offset(lit(20));

    assert_eq!(
        sql(Dialect::Ansi, select.clone()),
        r#"SELECT DISTINCT "orders"."total" AS "amount" FROM "orders" ORDER BY "orders"."total" DESC OFFSET 20 ROWS FETCH FIRST 10 ROWS ONLY"#
    );
    assert_eq!(
        sql(Dialect::Postgres, select),
        r#"SELECT DISTINCT "orders"."total" AS "amount" FROM "orders" ORDER BY "orders"."total" DESC LIMIT 10 OFFSET 20"#
    );
}

#[test]
fn test_ascending_order_is_explicit() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone()).order_by(OrderItem::asc(col(&t, "a")));
    assert_eq!(sql(Dialect::Ansi, select), r#"SELECT * FROM "t" ORDER BY "t"."a" ASC"#);
}

#[test]
fn test_sqlserver_paging_adds_order_and_offset() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone()).column(col(&t, "x")).limit(lit(5));
    assert_eq!(
        sql(Dialect::SqlServer, select),
        "SELECT [t].[x] FROM [t] ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY"
    );
}

#[test]
fn test_offset_without_limit() {
    let select = Select::from(TableRef::named("t")).offset(lit(5));
    assert_eq!(
        sql(Dialect::MySql, select.clone()),
        "SELECT * FROM `t` LIMIT 18446744073709551615 OFFSET 5"
    );
    assert_eq!(sql(Dialect::Sqlite, select.clone()), r#"SELECT * FROM "t" LIMIT -1 OFFSET 5"#);
    assert_eq!(sql(Dialect::Ansi, select), r#"SELECT * FROM "t" OFFSET 5 ROWS"#);
}

#[test]
fn test_group_by_and_having() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone())
        .column(col(&t, "k"))
        .column(count_all())
        .group_by(col(&t, "k"))
        .having(gt(count_all(), lit(1)));
    assert_eq!(
        sql(Dialect::Ansi, select),
        r#"SELECT "t"."k", COUNT(*) FROM "t" GROUP BY "t"."k" HAVING (COUNT(*) > 1)"#
    );
}

#[test]
fn test_inner_join() {
    let users = TableRef::named("users");
    let orders = TableRef::named("orders");
    let from = FromItem::from(users.clone()).join(
        JoinKind::Inner,
        orders.clone(),
        Some(eq(col(&orders, "user_id"), col(&users, "id"))),
    );
    let select = Select::from(from).column(col(&users, "name"));
    assert_eq!(
        sql(Dialect::Ansi, select),
        r#"SELECT "users"."name" FROM "users" INNER JOIN "orders" ON ("orders"."user_id" = "users"."id")"#
    );
}

#[test]
fn test_join_without_condition() {
    let users = TableRef::named("users");
    let orders = TableRef::named("orders");

    let inner = FromItem::from(users.clone()).join(JoinKind::Inner, orders.clone(), None);
    assert_eq!(
        sql(Dialect::Ansi, Select::from(inner)),
        r#"SELECT * FROM "users" INNER JOIN "orders" ON 1 = 1"#
    );

    let cross = FromItem::from(users).join(JoinKind::Cross, orders, None);
    assert_eq!(
        sql(Dialect::Ansi, Select::from(cross)),
        r#"SELECT * FROM "users" CROSS JOIN "orders""#
    );
}

fn right_nested_join() -> Select {
    let users = TableRef::named("users");
    let orders = TableRef::named("orders");
    let items = TableRef::named("items");
    let nested = FromItem::from(orders.clone()).join(
        JoinKind::Inner,
        items.clone(),
        Some(eq(col(&items, "order_id"), col(&orders, "id"))),
    );
    let from = FromItem::from(users.clone()).join(
        JoinKind::Inner,
        nested,
        Some(eq(col(&orders, "user_id"), col(&users, "id"))),
    );
    Select::from(from)
}

#[test]
fn test_right_nested_join_is_parenthesized() {
    assert_eq!(
        sql(Dialect::Ansi, right_nested_join()),
        r#"SELECT * FROM "users" INNER JOIN ("orders" INNER JOIN "items" ON ("items"."order_id" = "orders"."id")) ON ("orders"."user_id" = "users"."id")"#
    );
}

#[test]
fn test_right_nested_join_is_linearized() {
    assert_eq!(
        sql(Dialect::Sqlite, right_nested_join()),
        r#"SELECT * FROM "users" INNER JOIN "orders" ON 1 = 1 INNER JOIN "items" ON ("items"."order_id" = "orders"."id") AND ("orders"."user_id" = "users"."id")"#
    );
}

#[test]
fn test_cross_apply_needs_capability() {
    let users = TableRef::named("users");
    let orders = TableRef::named("orders");
    let recent = Select::from(orders.clone()).filter(eq(col(&orders, "user_id"), col(&users, "id")));
    let from = FromItem::from(users.clone()).join(JoinKind::CrossApply, TableRef::query(recent), None);
    let select = Select::from(from);

    assert_eq!(
        sql(Dialect::SqlServer, select.clone()),
        "SELECT * FROM [users] CROSS APPLY (SELECT * FROM [orders] WHERE ([orders].[user_id] = [users].[id])) AS [a]"
    );
    assert!(compile_err(Dialect::Ansi, select).is_not_supported());
}

#[test]
fn test_set_operations() {
    let query = Query::from(Select::new().column(lit(1))).union(Select::new().column(lit(2)), true);
    assert_eq!(sql(Dialect::Ansi, query.clone()), "(SELECT 1) UNION ALL (SELECT 2)");
    assert_eq!(sql(Dialect::Sqlite, query), "SELECT 1 UNION ALL SELECT 2");
}

#[test]
fn test_exists_subquery_shares_alias_namespace() {
    let users = catalog("users");
    let orders = catalog("orders");
    let placed = Select::from(orders.clone()).filter(eq(col(&orders, "user_id"), col(&users, "id")));
    let select = Select::from(users.clone()).filter(exists(placed));
    assert_eq!(
        sql(Dialect::Ansi, select),
        r#"SELECT * FROM "users" AS "a" WHERE EXISTS (SELECT * FROM "orders" AS "b" WHERE ("b"."user_id" = "a"."id"))"#
    );
}

#[test]
fn test_and_chains_are_flattened() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone())
        .filter(eq(col(&t, "a"), lit(1)))
        .filter(eq(col(&t, "b"), lit(2)))
        .filter(eq(col(&t, "c"), lit(3)));
    assert_eq!(
        sql(Dialect::Ansi, select),
        r#"SELECT * FROM "t" WHERE (("t"."a" = 1) AND ("t"."b" = 2) AND ("t"."c" = 3))"#
    );
}

#[test]
fn test_mixed_operators_keep_nesting() {
    let t = TableRef::named("t");
    let predicate = or(and(eq(col(&t, "a"), lit(1)), eq(col(&t, "b"), lit(2))), is_null(col(&t, "c")));
    assert_eq!(
        sql(Dialect::Ansi, Select::from(t.clone()).filter(predicate)),
        r#"SELECT * FROM "t" WHERE ((("t"."a" = 1) AND ("t"."b" = 2)) OR ("t"."c" IS NULL))"#
    );
}

#[test]
fn test_parameters_named_in_order_of_appearance() {
    let t = TableRef::named("t");
    let first = Parameter::new();
    let second = Parameter::new();
    let select = Select::from(t.clone())
        .filter(eq(col(&t, "a"), first.clone()))
        .filter(eq(col(&t, "b"), second))
        .filter(eq(col(&t, "c"), first));

    assert_eq!(
        sql(Dialect::Ansi, select.clone()),
        r#"SELECT * FROM "t" WHERE (("t"."a" = @p0) AND ("t"."b" = @p1) AND ("t"."c" = @p0))"#
    );
    assert_eq!(
        sql(Dialect::Oracle, select.clone()),
        r#"SELECT * FROM "t" WHERE (("t"."a" = :p0) AND ("t"."b" = :p1) AND ("t"."c" = :p0))"#
    );
    let config = CompilerConfig::builder().parameter_prefix("arg").build();
    assert_eq!(
        sql_with(Dialect::Ansi, select, &config),
        r#"SELECT * FROM "t" WHERE (("t"."a" = @arg0) AND ("t"."b" = @arg1) AND ("t"."c" = @arg0))"#
    );
}

#[test]
fn test_named_parameters_bypass_the_provider() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone())
        .filter(eq(col(&t, "a"), Parameter::named("id")))
        .filter(eq(col(&t, "b"), Parameter::named("@code")));
    assert_eq!(
        sql(Dialect::Ansi, select),
        r#"SELECT * FROM "t" WHERE (("t"."a" = @id) AND ("t"."b" = @code))"#
    );
}

#[test]
fn test_lock_clauses() {
    let select = Select::from(TableRef::named("t")).lock(LockMode::Update);
    assert_eq!(sql(Dialect::Postgres, select), r#"SELECT * FROM "t" FOR UPDATE"#);

    let select = Select::from(catalog("users")).lock(LockMode::Update);
    assert_eq!(
        sql(Dialect::SqlServer, select),
        "SELECT * FROM [users] AS [a] WITH (UPDLOCK, ROWLOCK)"
    );

    let shared = Select::from(TableRef::named("t")).lock(LockMode::Shared);
    assert!(compile_err(Dialect::Ansi, shared).is_not_supported());
}

#[test]
fn test_hints() {
    let select = Select::from(TableRef::named("t"))
        .hint(Hint::ForceJoinOrder)
        .hint(Hint::FastFirstRows(10));
    assert_eq!(
        sql(Dialect::SqlServer, select.clone()),
        "SELECT * FROM [t] OPTION (FORCE ORDER, FAST 10)"
    );
    // Dialects without hints drop them
    assert_eq!(sql(Dialect::Ansi, select), r#"SELECT * FROM "t""#);
}

#[test]
fn test_inline_comment() {
    let select = Select::new().column(lit(1)).comment("report");
    assert_eq!(sql(Dialect::Ansi, select), "SELECT /* report */ 1");

    let bad = Select::new().column(lit(1)).comment("a */ b");
    assert!(matches!(compile_err(Dialect::Ansi, bad), SqlDomError::InvalidComment(_)));
}

#[test]
fn test_without_aliasing() {
    let users = catalog("users");
    let select = Select::from(users.clone()).column(col(&users, "id"));
    let config = CompilerConfig::builder().without_aliasing().build();
    assert_eq!(sql_with(Dialect::Ansi, select, &config), r#"SELECT "users"."id" FROM "users""#);
}

#[test]
fn test_without_qualified_columns() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone()).column(col(&t, "a"));
    let config = CompilerConfig::builder()
        .naming(NamingOptions::TABLE_ALIASING)
        .build();
    assert_eq!(sql_with(Dialect::Ansi, select, &config), r#"SELECT "a" FROM "t""#);
}

#[test]
fn test_database_qualified_names() {
    let orders = TableRef::table(Table::in_schema(Schema::in_catalog("dbo", "main"), "orders").build());
    let select = Select::from(orders);
    assert_eq!(
        sql(Dialect::Ansi, select.clone()),
        r#"SELECT * FROM "main"."dbo"."orders" AS "a""#
    );

    let config = CompilerConfig::builder()
        .naming(NamingOptions::TABLE_ALIASING | NamingOptions::TABLE_QUALIFIED_COLUMNS)
        .build();
    assert_eq!(
        sql_with(Dialect::Ansi, select.clone(), &config),
        r#"SELECT * FROM "dbo"."orders" AS "a""#
    );
    // No schemas at all
    assert_eq!(sql(Dialect::Sqlite, select), r#"SELECT * FROM "orders" AS "a""#);
}

#[test]
fn test_select_cycle_is_detected() {
    let inner = Select::from(TableRef::named("t"));
    let mut outer = inner.clone();
    outer.where_clause = Some(exists(inner));
    assert!(matches!(
        compile_err(Dialect::Ansi, outer.clone()),
        SqlDomError::CircularReference(id) if id == outer.id
    ));
}

#[test]
fn test_reused_select_is_not_a_cycle() {
    let select = Select::new().column(lit(1));
    let query = Query::from(select.clone()).union(select, false);
    assert_eq!(sql(Dialect::Ansi, query), "(SELECT 1) UNION (SELECT 1)");
}
