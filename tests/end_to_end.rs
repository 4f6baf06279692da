//! End-to-end scenarios exercising the full `lex → parse → execute`
//! pipeline, matching the concrete scenarios and boundary cases.

use minisql::{lex, parse, ExecResult, Interpreter, Row, Value};

fn run(interp: &mut Interpreter, sql: &str) -> Vec<ExecResult> {
    let tokens = lex(sql).expect("lex error");
    let statements = parse(tokens).expect("parse error");
    interp.execute(&statements)
}

fn rows_of(result: &ExecResult) -> &[Row] {
    match result {
        ExecResult::Rows(rows) => rows,
        other => panic!("expected Rows, got {:?}", other),
    }
}

fn cell<'a>(row: &'a Row, column: &str) -> &'a Value {
    row.iter()
        .find(|(name, _)| name == column)
        .map(|(_, v)| v)
        .unwrap_or_else(|| panic!("no column '{}' in row {:?}", column, row))
}

#[test]
fn scenario_1_primary_key_violation_keeps_first_row() {
    let mut interp = Interpreter::new();
    let results = run(
        &mut interp,
        "CREATE TABLE t(id INT PRIMARY KEY, name VARCHAR(10) NOT NULL);
         INSERT INTO t VALUES(1,'a');
         INSERT INTO t VALUES(1,'b');",
    );
    assert!(matches!(results[0], ExecResult::Message(_)));
    assert!(matches!(results[1], ExecResult::Message(_)));
    assert!(matches!(results[2], ExecResult::Error(_)));

    let table = interp.schema("t").unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(
        minisql::catalog::Table::row_value(&table.rows[0], "name"),
        Some(&Value::Str("a".into()))
    );
}

#[test]
fn scenario_2_group_by_count_ordered_by_age() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE u(id INT PRIMARY KEY, age INT);
         INSERT INTO u VALUES(1,20);
         INSERT INTO u VALUES(2,30);
         INSERT INTO u VALUES(3,30);",
    );
    let results = run(
        &mut interp,
        "SELECT age, COUNT(*) FROM u GROUP BY age ORDER BY age ASC;",
    );
    let rows = rows_of(&results[0]);
    assert_eq!(rows.len(), 2);
    assert_eq!(cell(&rows[0], "age"), &Value::Int(20));
    assert_eq!(cell(&rows[0], "COUNT(*)"), &Value::Int(1));
    assert_eq!(cell(&rows[1], "age"), &Value::Int(30));
    assert_eq!(cell(&rows[1], "COUNT(*)"), &Value::Int(2));
}

#[test]
fn scenario_3_count_star_over_whole_table() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE u(id INT PRIMARY KEY, age INT);
         INSERT INTO u VALUES(1,20);
         INSERT INTO u VALUES(2,30);
         INSERT INTO u VALUES(3,30);",
    );
    let results = run(&mut interp, "SELECT COUNT(*) FROM u;");
    let rows = rows_of(&results[0]);
    assert_eq!(rows.len(), 1);
    assert_eq!(cell(&rows[0], "COUNT(*)"), &Value::Int(3));
}

#[test]
fn scenario_4_qualified_star_with_and_or_predicate() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE u(id INT PRIMARY KEY, age INT);
         INSERT INTO u VALUES(1,20);
         INSERT INTO u VALUES(2,30);
         INSERT INTO u VALUES(3,30);",
    );
    let results = run(
        &mut interp,
        "SELECT * FROM u WHERE age >= 25 AND (id = 2 OR id = 99);",
    );
    let rows = rows_of(&results[0]);
    assert_eq!(rows.len(), 1);
    assert_eq!(cell(&rows[0], "u.id"), &Value::Int(2));
    assert_eq!(cell(&rows[0], "u.age"), &Value::Int(30));
}

#[test]
fn scenario_5_update_with_arithmetic_expression() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE u(id INT PRIMARY KEY, age INT);
         INSERT INTO u VALUES(1,20);",
    );
    run(&mut interp, "UPDATE u SET age = age + 1 WHERE id = 1;");
    let results = run(&mut interp, "SELECT age FROM u WHERE id = 1;");
    let rows = rows_of(&results[0]);
    assert_eq!(cell(&rows[0], "age"), &Value::Int(21));
}

#[test]
fn scenario_6_distinct_with_order_by_desc_and_limit() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE u(id INT PRIMARY KEY, age INT);
         INSERT INTO u VALUES(1,20);
         INSERT INTO u VALUES(2,30);
         INSERT INTO u VALUES(3,30);",
    );
    let results = run(&mut interp, "SELECT DISTINCT age FROM u ORDER BY age DESC LIMIT 1;");
    let rows = rows_of(&results[0]);
    assert_eq!(rows.len(), 1);
    assert_eq!(cell(&rows[0], "age"), &Value::Int(30));
}

#[test]
fn boundary_empty_table_select_star_yields_no_rows() {
    let mut interp = Interpreter::new();
    run(&mut interp, "CREATE TABLE e(id INT);");
    let results = run(&mut interp, "SELECT * FROM e;");
    assert_eq!(rows_of(&results[0]).len(), 0);
}

#[test]
fn boundary_empty_table_count_star_yields_one_zero_row() {
    let mut interp = Interpreter::new();
    run(&mut interp, "CREATE TABLE e(id INT);");
    let results = run(&mut interp, "SELECT COUNT(*) FROM e;");
    let rows = rows_of(&results[0]);
    assert_eq!(rows.len(), 1);
    assert_eq!(cell(&rows[0], "COUNT(*)"), &Value::Int(0));
}

#[test]
fn boundary_limit_zero_yields_no_rows() {
    let mut interp = Interpreter::new();
    run(&mut interp, "CREATE TABLE t(id INT); INSERT INTO t VALUES(1);");
    let results = run(&mut interp, "SELECT * FROM t LIMIT 0;");
    assert_eq!(rows_of(&results[0]).len(), 0);
}

#[test]
fn boundary_distinct_collapses_nulls_to_one_row() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE t(id INT PRIMARY KEY, note VARCHAR(10));
         INSERT INTO t VALUES(1, NULL);
         INSERT INTO t VALUES(2, NULL);",
    );
    let results = run(&mut interp, "SELECT DISTINCT note FROM t;");
    let rows = rows_of(&results[0]);
    assert_eq!(rows.len(), 1);
    assert!(cell(&rows[0], "note").is_null());
}

#[test]
fn boundary_update_that_changes_nothing_still_reports_rows_updated() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE t(id INT PRIMARY KEY, age INT);
         INSERT INTO t VALUES(1, 20);",
    );
    let results = run(&mut interp, "UPDATE t SET age = age WHERE id = 1;");
    assert!(matches!(results[0], ExecResult::Message(ref m) if m.contains('1')));
    let table = interp.schema("t").unwrap();
    assert_eq!(
        minisql::catalog::Table::row_value(&table.rows[0], "age"),
        Some(&Value::Int(20))
    );
}

#[test]
fn boundary_delete_matching_zero_rows_is_an_error() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE t(id INT);
         INSERT INTO t VALUES(1);",
    );
    let results = run(&mut interp, "DELETE FROM t WHERE id = 999;");
    assert!(matches!(results[0], ExecResult::Error(_)));
    assert_eq!(interp.schema("t").unwrap().rows.len(), 1);
}

#[test]
fn catalog_conservation_across_insert_delete_drop() {
    let mut interp = Interpreter::new();
    run(&mut interp, "CREATE TABLE t(id INT);");
    run(&mut interp, "INSERT INTO t VALUES(1);");
    run(&mut interp, "INSERT INTO t VALUES(2);");
    assert_eq!(interp.schema("t").unwrap().rows.len(), 2);

    run(&mut interp, "DELETE FROM t WHERE id = 1;");
    assert_eq!(interp.schema("t").unwrap().rows.len(), 1);

    run(&mut interp, "DROP TABLE t;");
    assert!(interp.schema("t").is_none());
}

#[test]
fn aggregation_laws_sum_avg_count_min_max() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE n(v INT);
         INSERT INTO n VALUES(2);
         INSERT INTO n VALUES(4);
         INSERT INTO n VALUES(6);",
    );
    let results = run(
        &mut interp,
        "SELECT COUNT(*), SUM(v), AVG(v), MIN(v), MAX(v) FROM n;",
    );
    let rows = rows_of(&results[0]);
    let count = cell(&rows[0], "COUNT(*)").as_f64().unwrap();
    let sum = cell(&rows[0], "SUM(v)").as_f64().unwrap();
    let avg = cell(&rows[0], "AVG(v)").as_f64().unwrap();
    let min = cell(&rows[0], "MIN(v)").as_f64().unwrap();
    let max = cell(&rows[0], "MAX(v)").as_f64().unwrap();
    assert_eq!(count, 3.0);
    assert_eq!(sum, avg * count);
    assert!(min <= avg && avg <= max);
}

#[test]
fn like_percent_matches_anything_and_plain_is_case_insensitive_eq() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "CREATE TABLE t(name VARCHAR(10));
         INSERT INTO t VALUES('Ada');
         INSERT INTO t VALUES('Bob');",
    );
    let all = run(&mut interp, "SELECT name FROM t WHERE name LIKE '%';");
    assert_eq!(rows_of(&all[0]).len(), 2);

    let exact = run(&mut interp, "SELECT name FROM t WHERE name LIKE 'ada';");
    assert_eq!(rows_of(&exact[0]).len(), 1);
}

#[test]
fn multi_statement_batch_does_not_abort_on_error() {
    let mut interp = Interpreter::new();
    let results = run(
        &mut interp,
        "CREATE TABLE t(id INT PRIMARY KEY);
         DROP TABLE missing;
         INSERT INTO t VALUES(1);",
    );
    assert!(matches!(results[0], ExecResult::Message(_)));
    assert!(matches!(results[1], ExecResult::Error(_)));
    assert!(matches!(results[2], ExecResult::Message(_)));
}
