//! The `SELECT` pipeline: `FROM` (Cartesian product) → `WHERE` → `GROUP BY`
//! (or the implicit aggregate/singleton grouping) → projection → `DISTINCT`
//! → `ORDER BY` → `LIMIT`.

use super::predicate::{eval_predicate, values_equal};
use super::Interpreter;
use crate::ast::{
    AggregateArg, AggregateFunc, ColumnRef, OrderDir, ProjectionItem, SelectStatement,
};
use crate::catalog::{Row, Table};
use crate::error::{Error, ErrorKind, Result};
use crate::types::Value;
use std::cmp::Ordering;

/// A single row of the `FROM` clause's Cartesian product: one `(alias,
/// Row)` pair per joined table, all sharing a row's worth of lifetime.
type JoinedRow<'a> = Vec<(&'a str, &'a Row)>;

impl Interpreter {
    pub(super) fn select(&self, stmt: &SelectStatement) -> Result<Vec<Row>> {
        let tables: Vec<&Table> = stmt
            .from
            .iter()
            .map(|r| {
                self.catalog()
                    .table(&r.name)
                    .ok_or_else(|| Error::new(ErrorKind::UnknownTable(r.name.clone())))
            })
            .collect::<Result<_>>()?;
        let aliases: Vec<&str> = stmt.from.iter().map(|r| r.alias.as_str()).collect();

        let joined = build_source(&tables, &aliases);

        let mut filtered = Vec::with_capacity(joined.len());
        for joined_row in joined {
            let keep = match &stmt.predicate {
                Some(pred) => eval_predicate(pred, &mut |c: &ColumnRef| {
                    resolve_joined(&joined_row, c)
                })?,
                None => true,
            };
            if keep {
                filtered.push(joined_row);
            }
        }

        let groups = group_rows(&filtered, &stmt.group_by, has_aggregate(&stmt.projection))?;

        let mut output: Vec<(Row, Option<usize>)> = Vec::new();
        for (group_index, group) in groups.iter().enumerate() {
            let row = project_group(group, &stmt.projection, &stmt.group_by)?;
            let source = group.first().cloned();
            output.push((row, source.map(|_| group_index)));
        }

        let mut output = if stmt.distinct {
            dedup_rows(output)
        } else {
            output
        };

        if !stmt.order_by.is_empty() {
            sort_rows(&mut output, &groups, &stmt.order_by)?;
        }

        if let Some(limit) = stmt.limit {
            let n = limit.max(0) as usize;
            output.truncate(n);
        }

        Ok(output.into_iter().map(|(row, _)| row).collect())
    }
}

/// The `FROM` clause's Cartesian product, one `JoinedRow` per combination.
fn build_source<'a>(tables: &[&'a Table], aliases: &[&'a str]) -> Vec<JoinedRow<'a>> {
    let mut acc: Vec<JoinedRow<'a>> = vec![Vec::new()];
    for (table, alias) in tables.iter().zip(aliases.iter()) {
        let mut next = Vec::with_capacity(acc.len() * table.rows.len());
        for partial in &acc {
            for row in &table.rows {
                let mut combined = partial.clone();
                combined.push((*alias, row));
                next.push(combined);
            }
        }
        acc = next;
    }
    acc
}

/// Resolve a (possibly qualified) column reference against a joined row.
/// An unqualified reference resolves to the first table in `FROM` that
/// declares the column (first-alias-wins; ambiguity is not detected, per
/// design).
fn resolve_joined(joined: &JoinedRow<'_>, col: &ColumnRef) -> Result<Value> {
    match &col.table {
        Some(alias) => {
            let (_, row) = joined
                .iter()
                .find(|(a, _)| a == alias)
                .ok_or_else(|| Error::new(ErrorKind::UnresolvedColumn(format!("{}.{}", alias, col.column))))?;
            Table::row_value(row, &col.column)
                .cloned()
                .ok_or_else(|| Error::new(ErrorKind::UnknownColumn(col.column.clone())))
        }
        None => {
            for (_, row) in joined {
                if let Some(v) = Table::row_value(row, &col.column) {
                    return Ok(v.clone());
                }
            }
            Err(Error::new(ErrorKind::UnknownColumn(col.column.clone())))
        }
    }
}

fn has_aggregate(projection: &[ProjectionItem]) -> bool {
    projection
        .iter()
        .any(|p| matches!(p, ProjectionItem::Aggregate { .. }))
}

/// Group filtered rows per `GROUP BY`. With no `GROUP BY`: one implicit
/// group holding every row when the projection aggregates (even if empty,
/// so `COUNT(*)` over zero rows still yields one row), otherwise one
/// singleton group per row.
fn group_rows<'a>(
    rows: &[JoinedRow<'a>],
    group_by: &[ColumnRef],
    aggregates: bool,
) -> Result<Vec<Vec<JoinedRow<'a>>>> {
    if !group_by.is_empty() {
        let mut keys: Vec<Vec<Value>> = Vec::new();
        let mut groups: Vec<Vec<JoinedRow<'a>>> = Vec::new();
        for row in rows {
            let key: Vec<Value> = group_by
                .iter()
                .map(|c| resolve_joined(row, c))
                .collect::<Result<_>>()?;
            if let Some(idx) = keys.iter().position(|k| key_eq(k, &key)) {
                groups[idx].push(row.clone());
            } else {
                keys.push(key);
                groups.push(vec![row.clone()]);
            }
        }
        Ok(groups)
    } else if aggregates {
        Ok(vec![rows.to_vec()])
    } else {
        Ok(rows.iter().map(|r| vec![r.clone()]).collect())
    }
}

fn key_eq(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
}

/// Project one output row from one group, evaluating `*`, bare columns and
/// aggregates against the group's member rows. Every `GROUP BY` column is
/// exposed under its bare name regardless of whether it was also explicitly
/// selected.
fn project_group(
    group: &[JoinedRow<'_>],
    projection: &[ProjectionItem],
    group_by: &[ColumnRef],
) -> Result<Row> {
    let mut out: Row = Vec::new();
    let representative = group.first();

    if let Some(rep) = representative {
        for col in group_by {
            let value = resolve_joined(rep, col)?;
            out.push((col.column.clone(), value));
        }
    }

    for item in projection {
        match item {
            ProjectionItem::Star => {
                // An aggregate-without-GROUP-BY group over an empty table has no
                // representative row; `*` then contributes no columns.
                if let Some(rep) = representative {
                    for (alias, row) in rep {
                        for (name, value) in row.iter() {
                            out.push((format!("{}.{}", alias, name), value.clone()));
                        }
                    }
                }
            }
            ProjectionItem::Column { column, alias } => {
                let rep = representative
                    .ok_or_else(|| Error::new(ErrorKind::UnknownColumn(column.column.clone())))?;
                let value = resolve_joined(rep, column)?;
                let name = alias.clone().unwrap_or_else(|| column.column.clone());
                out.push((name, value));
            }
            ProjectionItem::Aggregate {
                func,
                arg,
                distinct,
                alias,
            } => {
                let value = compute_aggregate(group, *func, arg, *distinct)?;
                let name = alias.clone().unwrap_or_else(|| {
                    format!(
                        "{}({})",
                        func.as_str(),
                        match arg {
                            AggregateArg::Star => "*".to_string(),
                            AggregateArg::Column(c) => c.column.clone(),
                        }
                    )
                });
                out.push((name, value));
            }
        }
    }
    Ok(out)
}

fn aggregate_values(group: &[JoinedRow<'_>], arg: &AggregateArg, distinct: bool) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(group.len());
    for row in group {
        let v = match arg {
            AggregateArg::Star => Value::Int(1),
            AggregateArg::Column(c) => resolve_joined(row, c)?,
        };
        values.push(v);
    }
    if distinct {
        values = dedup_values(values);
    }
    Ok(values)
}

fn compute_aggregate(
    group: &[JoinedRow<'_>],
    func: AggregateFunc,
    arg: &AggregateArg,
    distinct: bool,
) -> Result<Value> {
    match func {
        AggregateFunc::Count => {
            let values = aggregate_values(group, arg, distinct)?;
            let count = match arg {
                AggregateArg::Star => values.len(),
                AggregateArg::Column(_) => values.iter().filter(|v| !v.is_null()).count(),
            };
            Ok(Value::Int(count as i64))
        }
        AggregateFunc::Sum => {
            let values = aggregate_values(group, arg, distinct)?;
            sum_values(&values)
        }
        AggregateFunc::Avg => {
            let values = aggregate_values(group, arg, distinct)?;
            avg_values(&values)
        }
        AggregateFunc::Min => {
            let values = aggregate_values(group, arg, distinct)?;
            extremum_values(&values, Ordering::Less)
        }
        AggregateFunc::Max => {
            let values = aggregate_values(group, arg, distinct)?;
            extremum_values(&values, Ordering::Greater)
        }
    }
}

fn sum_values(values: &[Value]) -> Result<Value> {
    let mut int_sum: i64 = 0;
    let mut float_sum: f64 = 0.0;
    let mut is_float = false;
    let mut any = false;
    for v in values {
        if v.is_null() {
            continue;
        }
        any = true;
        match v {
            Value::Int(n) => int_sum += n,
            _ => {
                is_float = true;
                float_sum += v.as_f64().ok_or_else(|| {
                    Error::new(ErrorKind::TypeCoercion {
                        value: v.to_string(),
                        target: "a number".to_string(),
                    })
                })?;
            }
        }
    }
    if !any {
        return Ok(Value::Null);
    }
    if is_float {
        Ok(Value::Float(float_sum + int_sum as f64))
    } else {
        Ok(Value::Int(int_sum))
    }
}

fn avg_values(values: &[Value]) -> Result<Value> {
    let non_null: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();
    if non_null.is_empty() {
        return Ok(Value::Null);
    }
    let total: f64 = non_null
        .iter()
        .map(|v| v.as_f64())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::new(ErrorKind::TypeCoercion {
            value: "non-numeric value".to_string(),
            target: "a number".to_string(),
        }))?
        .into_iter()
        .sum();
    Ok(Value::Float(total / non_null.len() as f64))
}

fn extremum_values(values: &[Value], want: Ordering) -> Result<Value> {
    let mut best: Option<&Value> = None;
    for v in values {
        if v.is_null() {
            continue;
        }
        best = match best {
            None => Some(v),
            Some(current) => {
                let ord = compare_values(v, current)?;
                if ord == want {
                    Some(v)
                } else {
                    Some(current)
                }
            }
        };
    }
    Ok(best.cloned().unwrap_or(Value::Null))
}

fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).ok_or_else(|| {
            Error::new(ErrorKind::TypeCoercion {
                value: a.to_string(),
                target: "a comparable number".to_string(),
            })
        }),
        _ => Ok(a.as_str_lossy().cmp(&b.as_str_lossy())),
    }
}

fn dedup_values(values: Vec<Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(values.len());
    for v in values {
        if !out.iter().any(|existing| values_equal(existing, &v)) {
            out.push(v);
        }
    }
    out
}

fn dedup_rows(rows: Vec<(Row, Option<usize>)>) -> Vec<(Row, Option<usize>)> {
    let mut out: Vec<(Row, Option<usize>)> = Vec::with_capacity(rows.len());
    for (row, source) in rows {
        let seen = out.iter().any(|(existing, _)| {
            existing.len() == row.len()
                && existing
                    .iter()
                    .zip(row.iter())
                    .all(|((_, a), (_, b))| values_equal(a, b))
        });
        if !seen {
            out.push((row, source));
        }
    }
    out
}

/// Sort output rows per `ORDER BY`, each term independently ascending or
/// descending (spec.md §9's per-column direction resolution). The sort key
/// for a term first checks the projected output row (so an aliased
/// aggregate/column can be ordered by its output name) and falls back to
/// the row's originating group when the `ORDER BY` column was not
/// projected.
fn sort_rows(
    output: &mut [(Row, Option<usize>)],
    groups: &[Vec<JoinedRow<'_>>],
    order_by: &[crate::ast::OrderItem],
) -> Result<()> {
    let mut keyed: Vec<(Vec<Value>, usize)> = Vec::with_capacity(output.len());
    for (i, (row, group_index)) in output.iter().enumerate() {
        let mut parts = Vec::with_capacity(order_by.len());
        for item in order_by {
            let value = if let Some(v) = row
                .iter()
                .find(|(name, _)| name == &item.column.column)
                .map(|(_, v)| v.clone())
            {
                v
            } else if let Some(gi) = group_index {
                let rep = groups[*gi]
                    .first()
                    .ok_or_else(|| Error::new(ErrorKind::UnknownColumn(item.column.column.clone())))?;
                resolve_joined(rep, &item.column)?
            } else {
                return Err(Error::new(ErrorKind::UnknownColumn(item.column.column.clone())));
            };
            parts.push(value);
        }
        keyed.push((parts, i));
    }

    let mut indices: Vec<usize> = (0..output.len()).collect();
    let mut sort_err: Option<Error> = None;
    indices.sort_by(|&a, &b| {
        if sort_err.is_some() {
            return Ordering::Equal;
        }
        match compare_parts(&keyed[a].0, &keyed[b].0, order_by) {
            Ok(ord) => ord,
            Err(e) => {
                sort_err = Some(e);
                Ordering::Equal
            }
        }
    });
    if let Some(e) = sort_err {
        return Err(e);
    }

    let reordered: Vec<(Row, Option<usize>)> = indices
        .into_iter()
        .map(|i| output[i].clone())
        .collect();
    output.clone_from_slice(&reordered);
    Ok(())
}

fn compare_parts(a: &[Value], b: &[Value], order_by: &[crate::ast::OrderItem]) -> Result<Ordering> {
    for (i, item) in order_by.iter().enumerate() {
        let ord = match (a[i].is_null(), b[i].is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => compare_values(&a[i], &b[i])?,
        };
        let ord = if item.dir == OrderDir::Desc { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return Ok(ord);
        }
    }
    Ok(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::ExecResult;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn run(interp: &mut Interpreter, sql: &str) -> Vec<ExecResult> {
        interp.execute(&parse(lex(sql).unwrap()).unwrap())
    }

    fn rows(results: Vec<ExecResult>) -> Vec<Row> {
        match results.into_iter().next().unwrap() {
            ExecResult::Rows(rows) => rows,
            other => panic!("expected rows, got {:?}", other),
        }
    }

    fn setup() -> Interpreter {
        let mut interp = Interpreter::new();
        run(&mut interp, "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(20), age INT);");
        run(&mut interp, "INSERT INTO t VALUES (1, 'Alice', 30);");
        run(&mut interp, "INSERT INTO t VALUES (2, 'Bob', 25);");
        run(&mut interp, "INSERT INTO t VALUES (3, 'Carol', 25);");
        interp
    }

    #[test]
    fn select_star_returns_all_rows() {
        let mut interp = setup();
        let out = rows(run(&mut interp, "SELECT * FROM t;"));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn where_filters_rows() {
        let mut interp = setup();
        let out = rows(run(&mut interp, "SELECT name FROM t WHERE age = 25;"));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn group_by_with_count_aggregates_per_group() {
        let mut interp = setup();
        let out = rows(run(&mut interp, "SELECT age, COUNT(*) FROM t GROUP BY age;"));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn group_by_column_is_exposed_even_when_not_projected() {
        let mut interp = setup();
        let out = rows(run(&mut interp, "SELECT COUNT(*) FROM t GROUP BY age;"));
        assert_eq!(out.len(), 2);
        let mut ages: Vec<_> = out
            .iter()
            .map(|r| Table::row_value(r, "age").cloned().unwrap())
            .collect();
        ages.sort_by_key(|v| match v {
            Value::Int(n) => *n,
            _ => panic!("expected Int"),
        });
        assert_eq!(ages, vec![Value::Int(25), Value::Int(30)]);
    }

    #[test]
    fn count_star_on_empty_table_yields_one_row() {
        let mut interp = Interpreter::new();
        run(&mut interp, "CREATE TABLE e (id INT);");
        let out = rows(run(&mut interp, "SELECT COUNT(*) FROM e;"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0][0].1, Value::Int(0));
    }

    #[test]
    fn order_by_desc_then_asc_independently() {
        let mut interp = setup();
        let out = rows(run(
            &mut interp,
            "SELECT name, age FROM t ORDER BY age DESC, name ASC;",
        ));
        let ages: Vec<_> = out.iter().map(|r| r[1].1.clone()).collect();
        assert_eq!(ages, vec![Value::Int(30), Value::Int(25), Value::Int(25)]);
    }

    #[test]
    fn limit_truncates_result() {
        let mut interp = setup();
        let out = rows(run(&mut interp, "SELECT * FROM t LIMIT 1;"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn limit_zero_yields_no_rows() {
        let mut interp = setup();
        let out = rows(run(&mut interp, "SELECT * FROM t LIMIT 0;"));
        assert_eq!(out.len(), 0);
    }

    #[test]
    fn distinct_collapses_duplicate_projections() {
        let mut interp = setup();
        let out = rows(run(&mut interp, "SELECT DISTINCT age FROM t;"));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn cartesian_product_joins_two_tables() {
        let mut interp = setup();
        run(&mut interp, "CREATE TABLE s (tid INT);");
        run(&mut interp, "INSERT INTO s VALUES (1);");
        run(&mut interp, "INSERT INTO s VALUES (2);");
        let out = rows(run(&mut interp, "SELECT * FROM t, s;"));
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn bare_column_resolves_first_alias_wins() {
        let mut interp = setup();
        run(&mut interp, "CREATE TABLE t2 (id INT);");
        run(&mut interp, "INSERT INTO t2 VALUES (100);");
        let out = rows(run(&mut interp, "SELECT id FROM t, t2;"));
        // `id` is ambiguous; first table in FROM wins.
        assert!(out.iter().all(|r| r[0].1 != Value::Int(100)));
    }
}
