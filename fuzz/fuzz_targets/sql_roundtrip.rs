//! SQL round-trip fuzzer.
//!
//! Feeds arbitrary text through the lexer and parser. Whatever is accepted
//! must render back to SQL that parses to the very same instructions, and
//! whatever is rejected must be rejected with an error, never a panic.

use honggfuzz::fuzz;
use tinyql::{FormatSql, parse_bytes, parse_sql};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Ok(instructions) = parse_bytes(data) else {
                return;
            };
            let rendered = instructions
                .iter()
                .map(FormatSql::format_sql)
                .collect::<Vec<_>>()
                .join(";");
            let reparsed = parse_sql(&rendered).unwrap_or_else(|err| {
                panic!("Rendered SQL does not parse: {err}\n{rendered}")
            });
            assert_eq!(reparsed, instructions, "Round trip changed:\n{rendered}");
        });
    }
}
