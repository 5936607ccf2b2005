use std::sync::Arc;

use super::*;
use crate::ast::*;
use crate::catalog::{ObjectName, Schema, Sequence, SequenceDescriptor, Table};
use crate::config::Settings;
use pretty_assertions::assert_eq;

#[test]
fn test_default_capabilities() {
    let ansi = Dialect::Ansi.capabilities();
    assert_eq!(ansi.parameter_prefix, "@");
    assert!(ansi.multicolumn_in);
    assert!(!ansi.cross_apply);

    assert_eq!(Dialect::Oracle.capabilities().parameter_prefix, ":");
    assert!(!Dialect::SqlServer.capabilities().multicolumn_in);
    assert!(Dialect::Sqlite.capabilities().explicit_join_order);
    assert!(!Dialect::MySql.capabilities().sequences);
}

#[test]
fn test_identifier_quoting() {
    let users = TableRef::named("users");
    let select = Select::from(users.clone()).column(col(&users, "id"));
    assert_eq!(sql(Dialect::MySql, select.clone()), "SELECT `users`.`id` FROM `users`");
    assert_eq!(sql(Dialect::SqlServer, select.clone()), "SELECT [users].[id] FROM [users]");
    assert_eq!(sql(Dialect::Postgres, select), r#"SELECT "users"."id" FROM "users""#);
}

#[test]
fn test_quote_round_trip() {
    let t = Dialect::SqlServer.translator();
    assert_eq!(t.quote_identifier("odd]name"), "[odd]]name]");
    assert_eq!(t.unquote_identifier("[odd]]name]"), "odd]name");

    let t = Dialect::Ansi.translator();
    assert_eq!(t.quote_identifier("say \"hi\""), r#""say ""hi""""#);
    assert_eq!(t.unquote_identifier(r#""say ""hi""""#), "say \"hi\"");
}

#[test]
fn test_oracle_aliases_and_parameters() {
    let users = TableRef::table(Table::new("users").build());
    let select = Select::from(users.clone()).column(col(&users, "id"));
    assert_eq!(sql(Dialect::Oracle, select), r#"SELECT "a"."id" FROM "users" "a""#);

    let t = TableRef::named("t");
    let select = Select::from(t.clone()).filter(eq(col(&t, "a"), Parameter::new()));
    assert_eq!(sql(Dialect::Oracle, select), r#"SELECT * FROM "t" WHERE ("t"."a" = :p0)"#);
}

#[test]
fn test_unsupported_join() {
    let users = TableRef::named("users");
    let orders = TableRef::named("orders");
    let from = FromItem::from(users.clone()).join(
        JoinKind::FullOuter,
        orders.clone(),
        Some(eq(col(&orders, "user_id"), col(&users, "id"))),
    );
    let select = Select::from(from);
    assert!(compile_err(Dialect::MySql, select.clone()).is_not_supported());
    assert_eq!(
        sql(Dialect::Postgres, select),
        r#"SELECT * FROM "users" FULL OUTER JOIN "orders" ON ("orders"."user_id" = "users"."id")"#
    );
}

#[test]
fn test_full_text_needs_capability() {
    let docs = TableRef::named("docs");
    let select = Select::from(docs.clone()).filter(Expr::FullText {
        kind: FullTextKind::Contains,
        columns: vec![docs.column("body")],
        search: Box::new(lit("rust")),
    });
    assert!(compile_err(Dialect::Ansi, select).is_not_supported());
}

#[test]
fn test_settings_override_switches_filter_form() {
    let settings = Settings::from_toml(
        r#"
        dialect = "sqlserver"

        [capabilities]
        multicolumn_in = true
        "#,
    )
    .unwrap();
    let compiler = SqlCompiler::from_settings(&settings).unwrap();

    let t = TableRef::named("t");
    let select = Select::from(t.clone())
        .column(col(&t, "x"))
        .filter(dynamic_filter("ids", vec![col(&t, "x")]));
    let result = compiler.compile(&select.into(), &settings.compiler).unwrap();

    let values = PostCompilerConfig::new().with_filter_values("ids", ["1", "2"]);
    assert_eq!(
        result.command_text(Some(&values)).unwrap(),
        "SELECT [t].[x] FROM [t] WHERE ([t].[x] IN (1, 2))"
    );
}

#[test]
fn test_next_value() {
    let sequence = Arc::new(Sequence {
        name: ObjectName::qualified(Schema::new("app"), "order_no"),
        data_type: None,
        descriptor: SequenceDescriptor::default(),
    });
    let select = Select::new().column(Expr::NextValue(sequence));

    assert_eq!(sql(Dialect::Ansi, select.clone()), r#"SELECT NEXT VALUE FOR "app"."order_no""#);
    assert_eq!(sql(Dialect::Postgres, select.clone()), r#"SELECT NEXTVAL('"app"."order_no"')"#);
    assert!(compile_err(Dialect::MySql, select).is_not_supported());
}

#[test]
fn test_sqlserver_create_or_alter_view() {
    use crate::catalog::View;

    let users = TableRef::named("users");
    let view = View {
        name: ObjectName::new("all_users"),
        columns: Vec::new(),
        definition: Some(Select::from(users).into()),
        check_option: false,
    };
    let statement = DdlStatement::CreateView(CreateView {
        view: Arc::new(view),
        or_replace: true,
    });
    assert_eq!(
        sql(Dialect::SqlServer, statement),
        "CREATE OR ALTER VIEW [all_users] AS SELECT * FROM [users]"
    );
}
