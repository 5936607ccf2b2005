use super::*;
use crate::ast::*;
use std::sync::Arc;

use crate::catalog::{ObjectName, Schema, Sequence, SequenceDescriptor, Table, Translation};
use pretty_assertions::assert_eq;

fn filtered(expressions: Vec<Expr>, negated: bool) -> Select {
    Select::from(TableRef::named("t")).filter(DynamicFilter {
        key: Key::new("ids"),
        expressions,
        negated,
    })
}

fn rows(values: &[&[&str]]) -> Vec<Vec<String>> {
    values
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect()
}

#[test]
fn test_variant_renders_one_branch() {
    let select = Select::new().column(variant("v", lit(1), lit(2)));
    let result = SqlCompiler::new(Dialect::Ansi)
        .compile(&select.into(), &CompilerConfig::default())
        .unwrap();
    assert!(!result.is_static());

    assert_eq!(result.command_text(None).unwrap(), "SELECT 1");
    let values = PostCompilerConfig::new().with_alternative("v");
    assert_eq!(result.command_text(Some(&values)).unwrap(), "SELECT 2");
}

#[test]
fn test_placeholder() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone()).filter(eq(col(&t, "tenant"), placeholder("tenant")));

    let values = PostCompilerConfig::new().with_placeholder("tenant", "42");
    assert_eq!(
        render(Dialect::Ansi, select.clone(), &values),
        r#"SELECT * FROM "t" WHERE ("t"."tenant" = 42)"#
    );

    let result = SqlCompiler::new(Dialect::Ansi)
        .compile(&select.into(), &CompilerConfig::default())
        .unwrap();
    assert!(matches!(
        result.command_text(None),
        Err(SqlDomError::UnresolvedPlaceholder(key)) if key == "tenant"
    ));
}

#[test]
fn test_type_id() {
    let values = PostCompilerConfig::new().with_type_id("Order", 7);
    assert_eq!(
        render(Dialect::Ansi, Select::new().column(type_id("Order")), &values),
        "SELECT 7"
    );
}

#[test]
fn test_dynamic_filter_in_list() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone())
        .column(col(&t, "x"))
        .filter(dynamic_filter("ids", vec![col(&t, "x")]));

    let values = PostCompilerConfig::new().with_filter_values("ids", ["1", "2", "3"]);
    assert_eq!(
        render(Dialect::Ansi, select.clone(), &values),
        r#"SELECT "t"."x" FROM "t" WHERE ("t"."x" IN (1, 2, 3))"#
    );

    let empty = PostCompilerConfig::new().with_filter_rows("ids", Vec::new());
    assert_eq!(
        render(Dialect::Ansi, select, &empty),
        r#"SELECT "t"."x" FROM "t" WHERE ("t"."x" IN (NULL) AND (1 = 0))"#
    );
}

#[test]
fn test_dynamic_filter_disjunction() {
    let t = TableRef::named("t");
    let select = Select::from(t.clone())
        .column(col(&t, "x"))
        .filter(dynamic_filter("ids", vec![col(&t, "x")]));

    let values = PostCompilerConfig::new().with_filter_values("ids", ["1", "2", "3"]);
    assert_eq!(
        render(Dialect::SqlServer, select.clone(), &values),
        "SELECT [t].[x] FROM [t] WHERE (([t].[x] = 1) OR ([t].[x] = 2) OR ([t].[x] = 3))"
    );

    let empty = PostCompilerConfig::new().with_filter_rows("ids", Vec::new());
    assert_eq!(
        render(Dialect::SqlServer, select, &empty),
        "SELECT [t].[x] FROM [t] WHERE (1 = 0)"
    );
}

#[test]
fn test_multi_column_dynamic_filter() {
    let t = TableRef::named("t");
    let select = filtered(vec![col(&t, "a"), col(&t, "b")], false);
    let values = PostCompilerConfig::new().with_filter_rows("ids", rows(&[&["1", "2"], &["3", "4"]]));

    assert_eq!(
        render(Dialect::Ansi, select.clone(), &values),
        r#"SELECT * FROM "t" WHERE (("t"."a", "t"."b") IN ((1, 2), (3, 4)))"#
    );
    assert_eq!(
        render(Dialect::SqlServer, select.clone(), &values),
        "SELECT * FROM [t] WHERE ((([t].[a] = 1) AND ([t].[b] = 2)) OR (([t].[a] = 3) AND ([t].[b] = 4)))"
    );

    let empty = PostCompilerConfig::new().with_filter_rows("ids", Vec::new());
    assert_eq!(
        render(Dialect::Ansi, select, &empty),
        r#"SELECT * FROM "t" WHERE (("t"."a", "t"."b") IN ((NULL, NULL)) AND (1 = 0))"#
    );
}

#[test]
fn test_negated_dynamic_filter() {
    let t = TableRef::named("t");
    let values = PostCompilerConfig::new().with_filter_values("ids", ["1", "2"]);
    assert_eq!(
        render(Dialect::Ansi, filtered(vec![col(&t, "x")], true), &values),
        r#"SELECT * FROM "t" WHERE NOT ("t"."x" IN (1, 2))"#
    );
}

#[test]
fn test_dynamic_filter_without_expressions_is_constant() {
    let result = SqlCompiler::new(Dialect::Ansi)
        .compile(&filtered(Vec::new(), false).into(), &CompilerConfig::default())
        .unwrap();
    assert!(result.is_static());
    assert_eq!(result.command_text(None).unwrap(), r#"SELECT * FROM "t" WHERE 1 = 0"#);
}

#[test]
fn test_dynamic_filter_value_errors() {
    let t = TableRef::named("t");
    let result = SqlCompiler::new(Dialect::Ansi)
        .compile(&filtered(vec![col(&t, "a"), col(&t, "b")], false).into(), &CompilerConfig::default())
        .unwrap();

    assert!(matches!(
        result.command_text(Some(&PostCompilerConfig::new())),
        Err(SqlDomError::MissingFilterValues(key)) if key.as_str() == "ids"
    ));

    let narrow = PostCompilerConfig::new().with_filter_rows("ids", rows(&[&["1"]]));
    assert!(matches!(
        result.command_text(Some(&narrow)),
        Err(SqlDomError::FilterRowMismatch { width: 1, index: 1, .. })
    ));
}

#[test]
fn test_schema_placeholder() {
    let orders = TableRef::table(Table::in_schema(Schema::new("dbo"), "orders").build());
    let config = CompilerConfig::builder().schema_placeholders(true).build();
    let result = SqlCompiler::new(Dialect::SqlServer)
        .compile(&Select::from(orders).into(), &config)
        .unwrap();

    let values = PostCompilerConfig::new().with_schema_mapping("dbo", "tenant");
    assert_eq!(
        result.command_text(Some(&values)).unwrap(),
        "SELECT * FROM [tenant].[orders] AS [a]"
    );
    assert_eq!(result.command_text(None).unwrap(), "SELECT * FROM [dbo].[orders] AS [a]");
}

#[test]
fn test_schema_placeholder_covers_sequences() {
    let dbo = Schema::new("dbo");
    let orders = TableRef::table(Table::in_schema(dbo.clone(), "orders").build());
    let order_no = Arc::new(Sequence {
        name: ObjectName::qualified(dbo, "order_no"),
        data_type: None,
        descriptor: SequenceDescriptor::default(),
    });
    let select = Select::from(orders).column(Expr::NextValue(order_no));
    let config = CompilerConfig::builder().schema_placeholders(true).build();
    let values = PostCompilerConfig::new().with_schema_mapping("dbo", "tenant");

    let result = SqlCompiler::new(Dialect::SqlServer).compile(&select.clone().into(), &config).unwrap();
    assert_eq!(
        result.command_text(Some(&values)).unwrap(),
        "SELECT NEXT VALUE FOR [tenant].[order_no] FROM [tenant].[orders] AS [a]"
    );

    let result = SqlCompiler::new(Dialect::Postgres).compile(&select.clone().into(), &config).unwrap();
    assert_eq!(
        result.command_text(Some(&values)).unwrap(),
        r#"SELECT NEXTVAL('"tenant"."order_no"') FROM "tenant"."orders" AS "a""#
    );

    let result = SqlCompiler::new(Dialect::Oracle).compile(&select.into(), &config).unwrap();
    assert_eq!(
        result.command_text(Some(&values)).unwrap(),
        r#"SELECT "tenant"."order_no".NEXTVAL FROM "tenant"."orders" "a""#
    );
}

#[test]
fn test_schema_placeholder_covers_translations() {
    let translation = Translation {
        name: ObjectName::qualified(Schema::new("dbo"), "upper_latin"),
        source_charset: "latin1".into(),
        target_charset: "utf8".into(),
        source: "upper_src".into(),
    };
    let config = CompilerConfig::builder().schema_placeholders(true).build();
    let result = SqlCompiler::new(Dialect::Ansi)
        .compile(&DdlStatement::CreateTranslation(Arc::new(translation)).into(), &config)
        .unwrap();

    let values = PostCompilerConfig::new().with_schema_mapping("dbo", "tenant");
    assert_eq!(
        result.command_text(Some(&values)).unwrap(),
        r#"CREATE TRANSLATION "tenant"."upper_latin" FOR "latin1" TO "utf8" FROM "upper_src""#
    );
}
