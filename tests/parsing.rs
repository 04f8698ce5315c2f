//! Integration tests for the text-to-instructions pipeline.
//!
//! These cover the query shapes the language is expected to accept, the
//! all-or-nothing behaviour on malformed input, and the lexer's treatment of
//! whitespace.

use tinyql::{
    AttributeRef, DataType, Error, Instruction, InstructionKind, LexError, Literal, Number,
    ParseError, Predicate, Stage, TokenKind, lex, parse, parse_sql,
};

/// Parse `sql` and check the number of instructions produced.
fn parse_count(sql: &str, expected: usize) -> Vec<Instruction> {
    let tokens = lex(sql).unwrap_or_else(|err| panic!("Cannot lex <{sql}>: {err}"));
    let instructions =
        parse(&tokens).unwrap_or_else(|err| panic!("Cannot parse tokens from '{sql}': {err}"));
    assert_eq!(
        instructions.len(),
        expected,
        "Should have parsed {expected} instructions from '{sql}'"
    );
    instructions
}

// =============================================================================
// Lexer
// =============================================================================

#[test]
fn test_lexer_simple() {
    let tokens = lex("CREATE TABLE account").unwrap();
    assert_eq!(tokens.len(), 5);
    assert!(tokens[1].is_whitespace());
    assert!(tokens[3].is_whitespace());
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
}

#[test]
fn test_lexer_covers_the_whole_input() {
    let sql = "SELECT \"account\".* FROM account WHERE email = 'foo@bar.com'";
    let tokens = lex(sql).unwrap();
    assert_eq!(tokens.first().unwrap().pos, 0);
    assert_eq!(tokens.last().unwrap().end(), sql.len());
    for pair in tokens.windows(2) {
        assert_eq!(pair[0].end(), pair[1].pos);
    }
}

// =============================================================================
// CREATE TABLE
// =============================================================================

#[test]
fn test_create_table_simple() {
    parse_count("CREATE TABLE account (id INT, email TEXT)", 1);
}

#[test]
fn test_create_table_with_primary_key() {
    let instructions = parse_count("CREATE TABLE account (id INT PRIMARY KEY, email TEXT)", 1);
    let Instruction::CreateTable(create) = &instructions[0] else {
        panic!("Expected CreateTable");
    };
    assert!(create.columns[0].primary_key);
    assert_eq!(create.columns[0].data_type, DataType::Int);
}

#[test]
fn test_multiple_instructions() {
    let instructions = parse_count(
        "CREATE TABLE account (id INT, email TEXT);CREATE TABLE user (id INT, email TEXT)",
        2,
    );
    assert_eq!(instructions[0].table_name(), "account");
    assert_eq!(instructions[1].table_name(), "user");
}

#[test]
fn test_create_table_complete() {
    let sql = "CREATE TABLE user
	(
    	id INT PRIMARY KEY,
	    last_name TEXT,
	    first_name TEXT,
	    email TEXT,
	    birth_date DATE,
	    country TEXT,
	    town TEXT,
	    zip_code TEXT
	)";
    parse_count(sql, 1);
}

#[test]
fn test_varchar_is_not_a_type() {
    let sql = "CREATE TABLE user (id INT PRIMARY KEY, last_name VARCHAR(100))";
    assert!(matches!(
        parse_sql(sql),
        Err(Error::Parse(ParseError::UnexpectedToken { .. }))
    ));
}

// =============================================================================
// SELECT
// =============================================================================

#[test]
fn test_select_shapes() {
    for sql in [
        "SELECT * FROM account WHERE email = 'foo@bar.com'",
        "SELECT id, email FROM account WHERE email = 'foo@bar.com'",
        "SELECT id FROM account WHERE email = 'foo@bar.com'",
        "SELECT account.id FROM account WHERE email = 'foo@bar.com'",
        "SELECT \"account\".id FROM account WHERE email = 'foo@bar.com'",
        "SELECT \"account\".* FROM account WHERE email = 'foo@bar.com'",
    ] {
        let instructions = parse_count(sql, 1);
        assert_eq!(instructions[0].kind(), InstructionKind::Select);
    }
}

#[test]
fn test_select_one_predicate() {
    let instructions = parse_count("SELECT * FROM account WHERE 1", 1);
    let Instruction::Select(select) = &instructions[0] else {
        panic!("Expected Select");
    };
    assert_eq!(
        select.predicate,
        Some(Predicate::Literal(Literal::Number(Number::Integer(1))))
    );
}

#[test]
fn test_select_join() {
    let instructions = parse_count(
        "SELECT address.* FROM address
	JOIN user_addresses ON address.id=user_addresses.address_id
	WHERE user_addresses.user_id=1",
        1,
    );
    let Instruction::Select(select) = &instructions[0] else {
        panic!("Expected Select");
    };
    assert_eq!(select.joins.len(), 1);
    let joined = &select.joins[0].joined_table;
    let Some(Predicate::Comparison { left, .. }) = &select.predicate else {
        panic!("Expected a comparison");
    };
    assert_eq!(left, &AttributeRef::qualified(joined.as_str(), "user_id"));
}

// =============================================================================
// INSERT
// =============================================================================

#[test]
fn test_insert_minimal() {
    let instructions = parse_count(
        "INSERT INTO account ('email', 'password', 'age') VALUES ('foo@bar.com', 'tititoto', '4')",
        1,
    );
    let Instruction::Insert(insert) = &instructions[0] else {
        panic!("Expected Insert");
    };
    assert_eq!(insert.columns.len(), 3);
    assert_eq!(insert.values.len(), 3);
    assert_eq!(insert.values[2], Literal::Text("4".into()));
}

#[test]
fn test_insert_number() {
    let instructions = parse_count(
        "INSERT INTO account ('email', 'password', 'age') VALUES ('foo@bar.com', 'tititoto', 4)",
        1,
    );
    let Instruction::Insert(insert) = &instructions[0] else {
        panic!("Expected Insert");
    };
    let pairs: Vec<_> = insert.assignments().collect();
    assert_eq!(pairs[2], ("age", &Literal::Number(Number::Integer(4))));
}

#[test]
fn test_insert_implicit_attributes_are_rejected() {
    assert!(parse_sql("INSERT INTO account VALUES ('foo@bar.com', 'tititoto', 4)").is_err());
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn test_delete() {
    let instructions = parse_count("delete from \"posts\"", 1);
    assert_eq!(instructions[0].kind(), InstructionKind::Delete);
    assert_eq!(instructions[0].table_name(), "posts");
}

// =============================================================================
// Mixed scripts and failures
// =============================================================================

#[test]
fn test_script_with_every_statement() {
    let sql = "
        CREATE TABLE account (id INT PRIMARY KEY, email TEXT, created DATE);
        INSERT INTO account (id, email) VALUES (1, 'foo@bar.com');
        SELECT account.* FROM account WHERE id = 1;
        DELETE FROM account WHERE email = 'foo@bar.com';
    ";
    let kinds: Vec<_> = parse_count(sql, 4).iter().map(Instruction::kind).collect();
    assert_eq!(
        kinds,
        [
            InstructionKind::CreateTable,
            InstructionKind::Insert,
            InstructionKind::Select,
            InstructionKind::Delete,
        ]
    );
}

#[test]
fn test_unterminated_quote() {
    let err = parse_sql("SELECT * FROM account WHERE email = 'foo@bar.com").unwrap_err();
    assert_eq!(err.stage(), Stage::Lex);
    assert_eq!(
        err,
        Error::Lex(LexError::UnterminatedQuote {
            quote: '\'',
            pos: 36
        })
    );
}

#[test]
fn test_mismatched_parenthesis() {
    let err = parse_sql("CREATE TABLE account (id INT, email TEXT;DELETE FROM account").unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert!(matches!(
        err,
        Error::Parse(ParseError::UnbalancedDelimiter {
            open_pos: Some(21),
            ..
        })
    ));

    for sql in [
        "CREATE TABLE account (id INT,",
        "CREATE TABLE account (id INT, email",
        "INSERT INTO t (a) VALUES (",
        "INSERT INTO t (a) VALUES ('x',;DELETE FROM t",
    ] {
        let err = parse_sql(sql).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Parse(ParseError::UnbalancedDelimiter {
                    open_pos: Some(_),
                    ..
                })
            ),
            "{sql}: {err}"
        );
    }
}

#[test]
fn test_fresh_instances_agree() {
    let sql = "SELECT address.* FROM address JOIN user_addresses ON address.id=user_addresses.address_id WHERE 1";
    let first = parse(&lex(sql).unwrap()).unwrap();
    let second = parse(&lex(sql).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_pipelines() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let sql = format!("DELETE FROM t{i}; INSERT INTO t{i} (a) VALUES ({i})");
                parse_sql(&sql).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let instructions = handle.join().unwrap();
        assert_eq!(instructions[1].table_name(), format!("t{i}"));
    }
}

#[test]
fn test_arity_mismatch() {
    let err = parse_sql("INSERT INTO account ('email', 'age') VALUES ('foo@bar.com')").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::ColumnValueArityMismatch {
            columns: 2,
            values: 1,
            ..
        })
    ));
}

#[test]
fn test_no_partial_results() {
    // The first statement is fine, the second is not.
    let result = parse_sql("DELETE FROM account; SELECT FROM account");
    assert!(result.is_err());
}
