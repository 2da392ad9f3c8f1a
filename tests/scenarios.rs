use pegmatch::{
    combinators::{choice, repeat0, repeat1, sequence, test_and, test_not},
    components::{any, element, eos, literal, one_of, range},
    match_complete, recursive, Cursor, Grammar, IterCursor, Parse, ParseError, Position,
    SliceCursor, TextCursor,
};

// Runs `parser` and checks that a failure left the cursor untouched.
fn attempt<'a, P: Parse<TextCursor<'a>>>(parser: &P, cursor: &mut TextCursor<'a>) -> bool {
    let before = cursor.offset();
    let matched = parser.parse(cursor);
    if !matched {
        assert_eq!(cursor.offset(), before, "failed parser moved the cursor");
    }
    matched
}

#[test]
fn single_element() {
    let mut cursor = TextCursor::new("a");
    assert!(attempt(&element('a'), &mut cursor));
    assert!(cursor.is_eos());

    let mut cursor = TextCursor::new("b");
    assert!(!attempt(&element('a'), &mut cursor));
    assert_eq!(cursor.remaining_text(), "b");
}

#[test]
fn literal_sequence() {
    let mut cursor = TextCursor::new("abcd");
    assert!(attempt(&literal("ab"), &mut cursor));
    assert_eq!(cursor.remaining_text(), "cd");
    assert!(!attempt(&literal("ab"), &mut cursor));
    assert_eq!(cursor.remaining_text(), "cd");
}

#[test]
fn ordinal_range() {
    let mut cursor = TextCursor::new("az");
    assert!(attempt(&range('a', 'z'), &mut cursor));
    assert!(attempt(&range('a', 'z'), &mut cursor));
    assert!(!attempt(&range('a', 'z'), &mut cursor));
}

#[test]
fn sequence_rolls_back() {
    let mut cursor = TextCursor::new("te");
    assert!(!attempt(&sequence((element('t'), element('s'))), &mut cursor));
    assert_eq!(cursor.remaining_text(), "te");
}

#[test]
fn choice_takes_first_alternative() {
    let mut cursor = TextCursor::new("test");
    assert!(attempt(&choice((element('t'), element('e'))), &mut cursor));
    assert_eq!(cursor.remaining_text(), "est");
}

#[test]
fn self_referential_grammar() -> anyhow::Result<()> {
    // G := 't' G / eos
    let grammar = Grammar::new();
    let g = grammar.rule("G");
    grammar.define("G", choice((sequence((element('t'), g.clone())), eos())))?;
    grammar.validate()?;

    let mut cursor = TextCursor::new("tttt");
    assert!(attempt(&g, &mut cursor));
    assert!(cursor.is_eos());

    let mut cursor = TextCursor::new("ttte");
    assert!(!attempt(&g, &mut cursor));
    assert_eq!(cursor.offset(), 0);

    let same = recursive(|g| choice((sequence((element('t'), g)), eos())));
    assert!(same.parse(&mut TextCursor::new("tttt")));
    assert!(!same.parse(&mut TextCursor::new("ttte")));
    Ok(())
}

#[test]
fn lookahead_never_moves() {
    let inputs = ["", "a", "ab", "ba"];
    for input in inputs {
        let mut cursor = TextCursor::new(input);
        let expected = literal("a").parse(&mut TextCursor::new(input));
        assert_eq!(test_and(literal("a")).parse(&mut cursor), expected);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(test_not(literal("a")).parse(&mut cursor), !expected);
        assert_eq!(cursor.offset(), 0);
    }
}

#[test]
fn failures_never_consume() {
    let parsers: Vec<Box<dyn Parse<TextCursor>>> = vec![
        Box::new(any()),
        Box::new(element('x')),
        Box::new(literal("abz")),
        Box::new(eos()),
        Box::new(range('0', '9')),
        Box::new(one_of("+-")),
        Box::new(sequence((literal("ab"), element('!')))),
        Box::new(choice((literal("abd"), literal("x")))),
        Box::new(repeat1(element('b'))),
        Box::new(sequence((repeat1(range('a', 'z')), element('!')))),
    ];
    for parser in &parsers {
        for input in ["abc", "ab", ""] {
            let mut cursor = TextCursor::new(input);
            attempt(parser, &mut cursor);
        }
    }
}

#[test]
fn repetition_counts() {
    let mut cursor = TextCursor::new("");
    assert!(attempt(&repeat0(element('a')), &mut cursor));
    assert!(!attempt(&repeat1(element('a')), &mut cursor));

    let mut cursor = TextCursor::new("aab");
    assert!(attempt(&repeat1(element('a')), &mut cursor));
    assert_eq!(cursor.remaining_text(), "b");
}

#[test]
fn arithmetic_expressions() -> anyhow::Result<()> {
    // expr := term (('+' / '-') term)*
    // term := factor (('*' / '/') factor)*
    // factor := number / '(' expr ')'
    let grammar = Grammar::new();
    let expr = grammar.rule("expr");
    let term = grammar.rule("term");
    let factor = grammar.rule("factor");
    let number = repeat1(range('0', '9'));

    grammar.define(
        "expr",
        sequence((term.clone(), repeat0(sequence((one_of("+-"), term.clone()))))),
    )?;
    grammar.define(
        "term",
        sequence((factor.clone(), repeat0(sequence((one_of("*/"), factor.clone()))))),
    )?;
    grammar.define(
        "factor",
        choice((number, sequence((element('('), expr.clone(), element(')'))))),
    )?;
    grammar.validate()?;

    assert_eq!(
        match_complete(&expr, &mut TextCursor::new("1+2*(3-40)/5"))?,
        Position::new(12)
    );
    assert_eq!(
        match_complete(&expr, &mut TextCursor::new("1+(2")),
        Err(ParseError::TrailingInput {
            position: Position::new(1)
        })
    );
    assert_eq!(
        match_complete(&expr, &mut TextCursor::new("*1")),
        Err(ParseError::NoMatch {
            position: Position::new(0)
        })
    );
    Ok(())
}

#[test]
fn non_text_inputs() {
    let tokens = [1u16, 2, 3, 9];
    let mut cursor = SliceCursor::new(&tokens);
    assert!(sequence((literal([1u16, 2]), range(3, 5))).parse(&mut cursor));
    assert!(!element(10u16).parse(&mut cursor));
    assert_eq!(cursor.remaining(), &[9]);

    let mut cursor = IterCursor::new("abab!".chars());
    assert!(repeat1(literal("ab")).parse(&mut cursor));
    assert!(!literal("ab").parse(&mut cursor));
    assert_eq!(cursor.offset(), 4);
    assert!(sequence((element('!'), eos())).parse(&mut cursor));
}
