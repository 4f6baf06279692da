//! minisql CLI - a REPL and one-shot runner for the SQL subset.
//!
//! This binary provides a command-line interface for running SQL against
//! an in-memory, process-lifetime catalog.

use minisql::{lex, parse, Error, ExecResult, Interpreter};
use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut interp = Interpreter::new();

    if args.len() > 1 {
        let sql = args[1..].join(" ");
        run_and_print(&mut interp, &sql);
    } else {
        run_repl(&mut interp);
    }
}

fn run_repl(interp: &mut Interpreter) {
    println!("minisql v{}", env!("CARGO_PKG_VERSION"));
    println!("Enter SQL statements (Ctrl+D to exit):\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("sql> ");
        stdout.flush().unwrap();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {
                let sql = input.trim();
                if sql.is_empty() {
                    continue;
                }
                if sql.eq_ignore_ascii_case("quit") || sql.eq_ignore_ascii_case("exit") {
                    break;
                }
                run_and_print(interp, sql);
                println!();
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}

fn run_and_print(interp: &mut Interpreter, sql: &str) {
    let tokens = match lex(sql) {
        Ok(tokens) => tokens,
        Err(e) => return print_error(sql, &e),
    };
    let statements = match parse(tokens) {
        Ok(statements) => statements,
        Err(e) => return print_error(sql, &e),
    };

    for result in interp.execute(&statements) {
        match result {
            ExecResult::Message(msg) => println!("{}", msg),
            ExecResult::Error(msg) => eprintln!("Error: {}", msg),
            ExecResult::Rows(rows) => print_rows(&rows),
        }
    }
}

fn print_rows(rows: &[minisql::Row]) {
    if rows.is_empty() {
        println!("(0 rows)");
        return;
    }
    let headers: Vec<&str> = rows[0].iter().map(|(name, _)| name.as_str()).collect();
    println!("{}", headers.join(" | "));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|(_, v)| v.to_string()).collect();
        println!("{}", cells.join(" | "));
    }
    println!("({} row(s))", rows.len());
}

fn print_error(sql: &str, error: &Error) {
    eprintln!("Error: {}", error);
    if let Some(span) = error.span() {
        let line_start = sql[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = sql[span.start..]
            .find('\n')
            .map(|i| span.start + i)
            .unwrap_or(sql.len());
        let line = &sql[line_start..line_end];
        let col = span.start - line_start;

        eprintln!("  |");
        eprintln!("  | {}", line);
        eprintln!("  | {}^", " ".repeat(col));
    }
}
