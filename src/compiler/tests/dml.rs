use super::*;
use crate::ast::*;
use crate::catalog::{DataType, Table};
use pretty_assertions::assert_eq;

fn var(name: &str) -> Expr {
    Expr::Variable(name.to_string())
}

fn assign(variable: &str, value: impl Into<Expr>) -> Statement {
    Statement::Assign(Assign {
        variable: variable.to_string(),
        value: value.into(),
    })
}

// =============================================================================
// INSERT
// =============================================================================

#[test]
fn test_insert_values() {
    let users = TableRef::named("users");
    let insert = Insert::into(users).value("name", lit("ann")).value("age", Parameter::new());
    assert_eq!(
        sql(Dialect::Ansi, insert),
        r#"INSERT INTO "users" ("name", "age") VALUES ('ann', @p0)"#
    );
}

#[test]
fn test_insert_multiple_rows() {
    let t = TableRef::named("t");
    let insert = Insert {
        id: NodeId::next(),
        into: Some(t.clone()),
        columns: vec![t.column("a")],
        source: InsertSource::Values(vec![vec![lit(1)], vec![lit(2)]]),
    };
    assert_eq!(sql(Dialect::Ansi, insert), r#"INSERT INTO "t" ("a") VALUES (1), (2)"#);
}

#[test]
fn test_insert_default_values() {
    assert_eq!(
        sql(Dialect::Ansi, Insert::into(TableRef::named("t"))),
        r#"INSERT INTO "t" DEFAULT VALUES"#
    );
}

#[test]
fn test_insert_without_target() {
    let mut insert = Insert::into(TableRef::named("t"));
    insert.into = None;
    assert!(matches!(
        compile_err(Dialect::Ansi, insert),
        SqlDomError::MissingTarget { statement: "INSERT" }
    ));
}

#[test]
fn test_insert_from_query() {
    let t = TableRef::named("t");
    let s = TableRef::named("s");
    let insert = Insert {
        id: NodeId::next(),
        into: Some(t.clone()),
        columns: vec![t.column("a")],
        source: InsertSource::Query(Select::from(s.clone()).column(col(&s, "a")).into()),
    };
    assert_eq!(
        sql(Dialect::Ansi, insert),
        r#"INSERT INTO "t" ("a") SELECT "s"."a" FROM "s""#
    );
}

// =============================================================================
// UPDATE
// =============================================================================

#[test]
fn test_update() {
    let users = TableRef::named("users");
    let update = Update::table(users.clone())
        .set(users.column("name"), lit("x"))
        .filter(eq(col(&users, "id"), lit(1)));
    assert_eq!(
        sql(Dialect::Ansi, update),
        r#"UPDATE "users" SET "name" = 'x' WHERE ("users"."id" = 1)"#
    );
}

#[test]
fn test_update_target_is_never_aliased() {
    let users = TableRef::table(Table::new("users").build());
    let update = Update::table(users.clone())
        .set(users.column("name"), lit("x"))
        .filter(eq(col(&users, "id"), lit(1)));
    assert_eq!(
        sql(Dialect::Ansi, update),
        r#"UPDATE "users" SET "name" = 'x' WHERE ("users"."id" = 1)"#
    );
}

#[test]
fn test_update_column_of_other_table() {
    let users = TableRef::named("users");
    let orders = TableRef::named("orders");
    let update = Update::table(users).set(orders.column("total"), lit(0));
    assert!(matches!(
        compile_err(Dialect::Ansi, update),
        SqlDomError::UnboundUpdateColumn { column } if column == "total"
    ));
}

#[test]
fn test_update_without_target() {
    let mut update = Update::table(TableRef::named("t")).set(ColumnRef::unbound("a"), lit(1));
    update.table = None;
    assert!(matches!(
        compile_err(Dialect::Ansi, update),
        SqlDomError::MissingTarget { statement: "UPDATE" }
    ));
}

#[test]
fn test_update_limit() {
    let t = TableRef::named("t");
    let mut update = Update::table(t.clone()).set(t.column("a"), lit(1));
    update.limit = Some(lit(5));

    assert!(compile_err(Dialect::Ansi, update.clone()).is_not_supported());
    assert_eq!(sql(Dialect::MySql, update.clone()), "UPDATE `t` SET `a` = 1 LIMIT 5");
    assert_eq!(sql(Dialect::SqlServer, update), "UPDATE TOP (5) [t] SET [a] = 1");
}

#[test]
fn test_update_from() {
    let users = TableRef::named("users");
    let totals = TableRef::named("totals");
    let mut update = Update::table(users.clone())
        .set(users.column("total"), col(&totals, "sum"))
        .filter(eq(col(&totals, "user_id"), col(&users, "id")));
    update.from = Some(totals.into());

    assert_eq!(
        sql(Dialect::Postgres, update.clone()),
        r#"UPDATE "users" SET "total" = "totals"."sum" FROM "totals" WHERE ("totals"."user_id" = "users"."id")"#
    );
    assert!(compile_err(Dialect::Ansi, update).is_not_supported());
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn test_delete() {
    let users = TableRef::named("users");
    let delete = Delete::from(users.clone()).filter(eq(col(&users, "id"), Parameter::new()));
    assert_eq!(
        sql(Dialect::Ansi, delete),
        r#"DELETE FROM "users" WHERE ("users"."id" = @p0)"#
    );
}

#[test]
fn test_delete_top() {
    let mut delete = Delete::from(TableRef::named("logs"));
    delete.limit = Some(lit(10));
    assert_eq!(sql(Dialect::SqlServer, delete), "DELETE TOP (10) FROM [logs]");
}

#[test]
fn test_delete_using() {
    let orders = TableRef::named("orders");
    let users = TableRef::named("users");
    let mut delete = Delete::from(orders.clone()).filter(eq(col(&users, "id"), col(&orders, "user_id")));
    delete.from = Some(users.into());

    assert_eq!(
        sql(Dialect::Postgres, delete.clone()),
        r#"DELETE FROM "orders" USING "users" WHERE ("users"."id" = "orders"."user_id")"#
    );
    assert!(compile_err(Dialect::MySql, delete).is_not_supported());
}

// =============================================================================
// Batches and procedural statements
// =============================================================================

#[test]
fn test_batch() {
    let batch = Batch::new(vec![
        Select::new().column(lit(1)).into(),
        Select::new().column(lit(2)).into(),
    ]);
    assert_eq!(sql(Dialect::Ansi, batch.clone()), "SELECT 1;\nSELECT 2");
    assert_eq!(sql(Dialect::Oracle, batch), "BEGIN\nSELECT 1;\nSELECT 2;\nEND;");
}

#[test]
fn test_batch_statements_have_own_alias_namespace() {
    let users = TableRef::table(Table::new("users").build());
    let orders = TableRef::table(Table::new("orders").build());
    let batch = Batch::new(vec![Select::from(users).into(), Select::from(orders).into()]);
    assert_eq!(
        sql(Dialect::Ansi, batch),
        "SELECT * FROM \"users\" AS \"a\";\nSELECT * FROM \"orders\" AS \"a\""
    );
}

#[test]
fn test_block() {
    let block = Statement::Block(StatementBlock {
        id: NodeId::next(),
        statements: vec![assign("x", lit(1))],
    });
    assert_eq!(sql(Dialect::Ansi, block), "BEGIN\n  SET x = 1;\nEND");
}

#[test]
fn test_if() {
    let statement = |otherwise: Option<Statement>| {
        Statement::If(Box::new(If {
            condition: eq(var("x"), lit(1)),
            then: assign("y", lit(2)),
            otherwise,
        }))
    };

    assert_eq!(
        sql(Dialect::Ansi, statement(None)),
        "IF (x = 1) THEN\n  SET y = 2;\nEND IF"
    );
    assert_eq!(
        sql(Dialect::Ansi, statement(Some(assign("y", lit(3))))),
        "IF (x = 1) THEN\n  SET y = 2;\nELSE\n  SET y = 3;\nEND IF"
    );
    assert_eq!(sql(Dialect::SqlServer, statement(None)), "IF (@x = 1)\n  SET @y = 2");
    assert!(compile_err(Dialect::Sqlite, statement(None)).is_not_supported());
}

#[test]
fn test_while() {
    let statement = Statement::While(Box::new(While {
        condition: lt(var("x"), lit(3)),
        body: assign("x", binary(BinaryOp::Add, var("x"), lit(1))),
    }));
    assert_eq!(
        sql(Dialect::Ansi, statement),
        "WHILE (x < 3) DO\n  SET x = (x + 1);\nEND WHILE"
    );
}

#[test]
fn test_declare_variable() {
    let statement = Statement::DeclareVariable(DeclareVariable {
        name: "n".to_string(),
        data_type: DataType::Int,
    });
    assert_eq!(sql(Dialect::SqlServer, statement), "DECLARE @n INT");
}

#[test]
fn test_cursor() {
    let declare = Statement::DeclareCursor(DeclareCursor {
        name: "c".to_string(),
        query: Select::from(TableRef::named("t")).into(),
        insensitive: false,
        scroll: true,
        read_only: true,
    });
    assert_eq!(
        sql(Dialect::Ansi, declare.clone()),
        r#"DECLARE "c" SCROLL CURSOR FOR SELECT * FROM "t" FOR READ ONLY"#
    );
    assert!(compile_err(Dialect::Sqlite, declare).is_not_supported());

    let fetch = Statement::Fetch(Fetch {
        cursor: "c".to_string(),
        direction: FetchDirection::Next,
        into: vec!["a".to_string()],
    });
    assert_eq!(sql(Dialect::Ansi, fetch), r#"FETCH NEXT FROM "c" INTO a"#);
}

#[test]
fn test_comment_statement() {
    let statement = Statement::Comment(Comment {
        text: "note".to_string(),
    });
    assert_eq!(sql(Dialect::Ansi, statement), "/* note */");
}
