use orfail::{OrFail, Result};
use pegmatch::{
    combinators::{choice, optional, repeat0, repeat1, separated, sequence},
    components::{digit, element, literal, one_of, range, satisfy, whitespace, Digit},
    match_complete,
    trace::{label, record_failures, Furthest},
    Grammar, TextCursor,
};
use std::io::Read;

fn main() -> Result<()> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).or_fail()?;

    let furthest = Furthest::new();
    let token = |c: char| record_failures(element(c), &furthest);
    let ws = repeat0(whitespace());
    let hex = Digit::<16>::new();

    let grammar = Grammar::new();
    let value = grammar.rule("value");
    let string = grammar.rule("string");

    let escape = sequence((
        element('\\'),
        choice((one_of("\"\\/bfnrt"), sequence((element('u'), hex, hex, hex, hex)))),
    ));
    let unescaped = satisfy(|c: char| c != '"' && c != '\\' && !c.is_control());
    grammar
        .define(
            "string",
            sequence((token('"'), repeat0(choice((escape, unescaped))), token('"'))),
        )
        .or_fail()?;

    let number = sequence((
        optional(element('-')),
        choice((element('0'), sequence((range('1', '9'), repeat0(digit()))))),
        optional(sequence((element('.'), repeat1(digit())))),
        optional(sequence((one_of("eE"), optional(one_of("+-")), repeat1(digit())))),
    ));
    let member = sequence((ws, string.clone(), ws, token(':'), value.clone()));
    let object = sequence((
        token('{'),
        choice((separated(member, token(',')), ws)),
        token('}'),
    ));
    let array = sequence((
        token('['),
        choice((separated(value.clone(), token(',')), ws)),
        token(']'),
    ));
    grammar
        .define(
            "value",
            sequence((
                ws,
                label(
                    "value",
                    choice((
                        object,
                        array,
                        string,
                        number,
                        literal("true"),
                        literal("false"),
                        literal("null"),
                    )),
                ),
                ws,
            )),
        )
        .or_fail()?;
    grammar.validate().or_fail()?;

    let mut cursor = TextCursor::new(&text);
    match match_complete(&value, &mut cursor) {
        Ok(_) => println!("[OK] Input is a JSON text."),
        Err(e) => {
            let position = furthest
                .position()
                .map_or(e.position(), |p| std::cmp::max(p, e.position()));
            let (line, column) = position.line_and_column(&text);
            println!("[NG] Input is not a JSON text: {e}");
            println!("  --> <stdin>:{line}:{column}");
        }
    }
    Ok(())
}
