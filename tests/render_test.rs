use pretty_assertions::assert_eq;
use sqldom::prelude::*;
use sqldom::result::CompiledPlan;

fn compile(statement: impl Into<Statement>, dialect: Dialect) -> CompilationResult {
    sqldom::compile(&statement.into(), dialect).expect("statement should compile")
}

fn users_with_ids() -> Select {
    let users = TableRef::named("users");
    Select::from(users.clone())
        .column(col(&users, "name"))
        .filter(dynamic_filter("ids", vec![col(&users, "id")]))
}

#[test]
fn test_compilation_is_deterministic() {
    let users = TableRef::table(Table::new("users").build());
    let orders = TableRef::table(Table::new("orders").build());
    let from = FromItem::from(users.clone()).join(
        JoinKind::LeftOuter,
        orders.clone(),
        Some(eq(col(&orders, "user_id"), col(&users, "id"))),
    );
    let statement: Statement = Select::from(from)
        .column(col(&users, "name"))
        .filter(gt(col(&orders, "total"), Parameter::new()))
        .into();

    let first = sqldom::compile(&statement, Dialect::Postgres).unwrap();
    let second = sqldom::compile(&statement, Dialect::Postgres).unwrap();
    assert_eq!(first.command_text(None).unwrap(), second.command_text(None).unwrap());
    assert_eq!(
        first.command_text(None).unwrap(),
        r#"SELECT "a"."name" FROM "users" AS "a" LEFT OUTER JOIN "orders" AS "b" ON ("b"."user_id" = "a"."id") WHERE ("b"."total" > @p0)"#
    );
}

#[test]
fn test_sqlserver_filter_expands_to_disjunction() {
    let result = compile(users_with_ids(), Dialect::SqlServer);
    let values = PostCompilerConfig::new().with_filter_values("ids", ["1", "2", "3"]);
    assert_eq!(
        result.command_text(Some(&values)).unwrap(),
        "SELECT [users].[name] FROM [users] WHERE (([users].[id] = 1) OR ([users].[id] = 2) OR ([users].[id] = 3))"
    );
}

#[test]
fn test_one_result_renders_many_times() {
    let result = compile(users_with_ids(), Dialect::Ansi);

    let one = PostCompilerConfig::new().with_filter_values("ids", ["7"]);
    let many = PostCompilerConfig::new().with_filter_values("ids", (1..=4).map(|i| i.to_string()));
    let none = PostCompilerConfig::new().with_filter_values("ids", Vec::<String>::new());

    assert_eq!(
        result.command_text(Some(&one)).unwrap(),
        r#"SELECT "users"."name" FROM "users" WHERE ("users"."id" IN (7))"#
    );
    assert_eq!(
        result.command_text(Some(&many)).unwrap(),
        r#"SELECT "users"."name" FROM "users" WHERE ("users"."id" IN (1, 2, 3, 4))"#
    );
    // An empty list matches nothing but stays valid SQL
    assert_eq!(
        result.command_text(Some(&none)).unwrap(),
        r#"SELECT "users"."name" FROM "users" WHERE ("users"."id" IN (NULL) AND (1 = 0))"#
    );
    // Earlier renders leave no trace
    assert_eq!(
        result.command_text(Some(&one)).unwrap(),
        r#"SELECT "users"."name" FROM "users" WHERE ("users"."id" IN (7))"#
    );
}

#[test]
fn test_variants_are_exclusive() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone()).filter(variant(
        "archived",
        eq(col(&t, "archived"), lit(false)),
        is_not_null(col(&t, "archived_at")),
    ));
    let result = compile(select, Dialect::Ansi);

    let main = result.command_text(None).unwrap().into_owned();
    let alternative = result
        .command_text(Some(&PostCompilerConfig::new().with_alternative("archived")))
        .unwrap()
        .into_owned();

    assert_eq!(main, r#"SELECT * FROM "t" WHERE ("t"."archived" = FALSE)"#);
    assert_eq!(alternative, r#"SELECT * FROM "t" WHERE ("t"."archived_at" IS NOT NULL)"#);
}

#[test]
fn test_aliases_are_unique_per_statement() {
    let tables: Vec<TableRef> = ["users", "orders", "items"]
        .iter()
        .map(|name| TableRef::table(Table::new(*name).build()))
        .collect();
    let mut from = FromItem::from(tables[0].clone());
    for table in &tables[1..] {
        from = from.join(JoinKind::Cross, table.clone(), None);
    }
    let result = compile(Select::from(from), Dialect::Ansi);
    assert_eq!(
        result.command_text(None).unwrap(),
        r#"SELECT * FROM "users" AS "a" CROSS JOIN "orders" AS "b" CROSS JOIN "items" AS "c""#
    );
}

#[test]
fn test_aliasing_can_be_disabled() {
    let users = TableRef::table(Table::new("users").build());
    let select: Statement = Select::from(users.clone()).column(col(&users, "id")).into();
    let config = CompilerConfig::builder().without_aliasing().build();
    let result = SqlCompiler::new(Dialect::SqlServer).compile(&select, &config).unwrap();
    assert_eq!(result.command_text(None).unwrap(), "SELECT [users].[id] FROM [users]");
}

#[test]
fn test_long_and_chain_is_flat() {
    let t = TableRef::named("t");
    let select = (0..5).fold(Select::from(t.clone()), |select, i| {
        select.filter(eq(col(&t, &format!("c{i}")), lit(i)))
    });
    let text = compile(select, Dialect::Ansi).command_text(None).unwrap().into_owned();
    assert_eq!(
        text,
        r#"SELECT * FROM "t" WHERE (("t"."c0" = 0) AND ("t"."c1" = 1) AND ("t"."c2" = 2) AND ("t"."c3" = 3) AND ("t"."c4" = 4))"#
    );
}

#[test]
fn test_cycle_is_rejected() {
    let inner = Select::from(TableRef::named("t"));
    let mut outer = inner.clone();
    outer.where_clause = Some(exists(inner));

    let err = sqldom::compile(&outer.into(), Dialect::Ansi).unwrap_err();
    assert!(matches!(err, SqlDomError::CircularReference(_)));
    assert!(err.is_compiler_error());
}

#[test]
fn test_quote_round_trip() {
    for dialect in Dialect::ALL {
        let t = dialect.translator();
        for name in ["plain", "odd]name", "we\"ird", "back`tick"] {
            assert_eq!(t.unquote_identifier(&t.quote_identifier(name)), name, "{}", dialect.name());
        }
    }
    assert_eq!(Dialect::SqlServer.translator().quote_identifier("odd]name"), "[odd]]name]");
}

#[test]
fn test_static_result_ignores_render_config() {
    let result = compile(Select::new().column(lit(1)), Dialect::Ansi);
    assert!(result.is_static());
    let values = PostCompilerConfig::new().with_alternative("unused");
    assert_eq!(result.command_text(Some(&values)).unwrap(), "SELECT 1");
    assert!(result.output().is_text());
}

#[test]
fn test_plan_survives_json() {
    let id = Parameter::new();
    let users = TableRef::named("users");
    let select = Select::from(users.clone())
        .filter(eq(col(&users, "tenant"), id.clone()))
        .filter(dynamic_filter("ids", vec![col(&users, "id")]));
    let result = compile(select, Dialect::Postgres);

    let json = serde_json::to_string(&result.to_plan()).unwrap();
    let plan: CompiledPlan = serde_json::from_str(&json).unwrap();
    let restored = CompilationResult::from_plan(plan);

    let values = PostCompilerConfig::new().with_filter_values("ids", ["1", "2"]);
    assert_eq!(
        restored.command_text(Some(&values)).unwrap(),
        result.command_text(Some(&values)).unwrap()
    );
    assert_eq!(restored.parameter_name(&id).unwrap(), "p0");
}

#[test]
fn test_statement_survives_json() {
    let users = TableRef::table(Table::new("users").build());
    let statement: Statement = Select::from(users.clone())
        .column(col(&users, "email"))
        .filter(eq(col(&users, "active"), lit(true)))
        .into();

    let json = serde_json::to_string(&statement).unwrap();
    let restored: Statement = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, statement);
    assert_eq!(
        sqldom::compile(&restored, Dialect::Sqlite).unwrap().command_text(None).unwrap(),
        r#"SELECT "a"."email" FROM "users" AS "a" WHERE ("a"."active" = 1)"#
    );
}

#[test]
fn test_ids_read_from_json_are_reserved() {
    // The select pins id 1 while its table takes a fresh one
    let json = r#"{"Select":{"id":1,"from":{"Table":{"source":{"Named":"t"}}}}}"#;
    let statement: Statement = serde_json::from_str(json).unwrap();
    assert_eq!(
        sqldom::compile(&statement, Dialect::Ansi).unwrap().command_text(None).unwrap(),
        r#"SELECT * FROM "t""#
    );

    let json = r#"{"output":{"Text":"SELECT @p0"},"parameters":[{"id":4000000000,"name":"p0"}]}"#;
    let plan: CompiledPlan = serde_json::from_str(json).unwrap();
    let restored = CompilationResult::from_plan(plan);
    let fresh = Parameter::new();
    assert!(fresh.id.get() > 4_000_000_000);
    assert!(matches!(
        restored.parameter_name(&fresh),
        Err(SqlDomError::ParameterNotFound(_))
    ));
}
