use std::path::Path;

use pascal_lexer::{
    base::{source_file::Position, FsProvider, SilentHandler, VoidHandler},
    lexical::{
        token::{TokenKind, UNCLOSED_BLOCK_COMMENT_TEXT},
        Error,
    },
};

mod properties;

#[test]
fn lexing_program() {
    let tokens = pascal_lexer::tokenize_str(include_str!("./program.pas"));

    let mut written = Vec::new();
    tokens.write_to(&mut written).expect("Failed to write tokens");

    assert_eq!(
        String::from_utf8(written).unwrap(),
        include_str!("./program.tokens")
    );
}

#[test]
fn lexing_program_from_file() {
    let handler = SilentHandler::new();
    let provider = FsProvider::from(env!("CARGO_MANIFEST_DIR"));

    let tokens = pascal_lexer::tokenize(
        &handler,
        &provider,
        Path::new("tests/lexing/program.pas"),
    )
    .expect("Failed to tokenize");

    assert_eq!(tokens.len(), 127);

    let bad = tokens
        .iter()
        .filter(|token| token.is_bad())
        .map(|token| token.text().to_string())
        .collect::<Vec<_>>();
    assert_eq!(bad, ["'no end", "1.2.3;", "7.", "12e", "#"]);

    let errors = handler
        .into_received()
        .into_iter()
        .map(|err| match err {
            pascal_lexer::base::Error::LexicalError(err) => err,
            other => panic!("unexpected error {other:?}"),
        })
        .collect::<Vec<_>>();
    assert!(matches!(
        errors.as_slice(),
        [
            Error::UnterminatedString(_),
            Error::MalformedNumeric(_),
            Error::MalformedNumeric(_),
            Error::MalformedNumeric(_),
            Error::UnexpectedCharacter(_),
        ]
    ));
}

#[test]
fn lexing_missing_file() {
    let provider = FsProvider::from(env!("CARGO_MANIFEST_DIR"));

    pascal_lexer::tokenize(
        &VoidHandler,
        &provider,
        Path::new("tests/lexing/missing.pas"),
    )
    .expect_err("Expecting a read failure");
}

#[test]
fn lexing_unclosed_block_comment() {
    let tokens = pascal_lexer::tokenize_str(include_str!("./unclosed.pas"));

    assert_eq!(format!("{tokens}\n"), include_str!("./unclosed.tokens"));

    let last = tokens.last().unwrap();
    assert_eq!(last.kind(), TokenKind::Bad);
    assert_eq!(last.text(), UNCLOSED_BLOCK_COMMENT_TEXT);
    assert_eq!(last.position(), Position { line: 2, column: 1 });
}

#[test]
fn lexing_block_comment_closed_at_end() {
    let tokens = pascal_lexer::tokenize_str("PROGRAM p; { closes at the very end }");

    assert_eq!(
        tokens.to_string(),
        "PROGRAM (1, 1) \"PROGRAM\"\nIDENTIFIER (1, 9) \"p\"\nSEMICOLON (1, 10) \";\""
    );
}

#[test]
fn lexing_comments_only() {
    assert!(pascal_lexer::tokenize_str("{ comment }").is_empty());
    assert!(pascal_lexer::tokenize_str("// just a comment").is_empty());
    assert!(pascal_lexer::tokenize_str(" \t\r\n").is_empty());
}

#[test]
fn lexing_long_identifier() {
    let word = "a".repeat(256);

    let tokens = pascal_lexer::tokenize_str(&word);

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), TokenKind::Bad);
    assert_eq!(tokens[0].text(), word);
}
