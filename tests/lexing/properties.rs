use proptest::prelude::*;

use pascal_lexer::{
    base::{source_file::SourceFile, VoidHandler},
    lexical::{
        cursor::Cursor,
        token::{Token, TokenKind, UNCLOSED_BLOCK_COMMENT_TEXT},
    },
};

/// Lexes the source and returns the tokens together with whether the cursor reached the end.
fn lex(source: &str) -> (Vec<Token>, bool) {
    let file = SourceFile::in_memory("property.pas", source);
    let mut cursor = Cursor::new(&file);

    let mut tokens = Vec::new();
    while let Ok(token) = Token::tokenize(&mut cursor, &VoidHandler) {
        tokens.push(token);
    }

    (tokens, cursor.is_at_end())
}

fn is_unclosed_block_comment(token: &Token) -> bool {
    token.is_bad() && token.text() == UNCLOSED_BLOCK_COMMENT_TEXT
}

const SOURCE_PATTERN: &str = "[ -~\n\t]{0,200}";

#[test]
fn property_every_character_is_consumed() {
    proptest!(|(source in SOURCE_PATTERN)| {
        let (_, at_end) = lex(&source);
        prop_assert!(at_end);
    });

    proptest!(|(source in ".{0,64}")| {
        let (_, at_end) = lex(&source);
        prop_assert!(at_end);
    });
}

#[test]
fn property_positions_match_spans() {
    proptest!(|(source in SOURCE_PATTERN)| {
        let file = SourceFile::in_memory("property.pas", source.clone());
        let (tokens, _) = lex(&source);

        let mut previous_line = 1;
        for token in &tokens {
            let position = file.get_position(token.span().start);
            prop_assert_eq!(position, Some(token.position()));
            prop_assert!(token.position().line <= file.line_amount());
            prop_assert!(token.position().line >= previous_line);
            previous_line = token.position().line;
        }
    });
}

#[test]
fn property_tokens_and_gaps_rebuild_source() {
    proptest!(|(source in SOURCE_PATTERN)| {
        let (tokens, _) = lex(&source);

        let mut rebuilt = String::new();
        let mut last_end = 0;
        for token in &tokens {
            let span = token.span();
            prop_assert!(span.start >= last_end);

            let gap = &source[last_end..span.start];
            prop_assert!(
                gap.trim().is_empty() || gap.contains("//") || gap.contains('{'),
                "gap {:?} is neither whitespace nor a comment",
                gap
            );
            rebuilt.push_str(gap);

            if is_unclosed_block_comment(token) {
                rebuilt.push_str(&source[span.clone()]);
            } else {
                prop_assert_eq!(&source[span.clone()], token.text());
                rebuilt.push_str(token.text());
            }
            last_end = span.end;
        }
        rebuilt.push_str(&source[last_end..]);

        prop_assert_eq!(rebuilt, source);
    });
}

#[test]
fn property_words_are_identifiers_or_keywords() {
    proptest!(|(input in "[a-zA-Z_][a-zA-Z0-9_]{0,40}")| {
        let (tokens, _) = lex(&input);

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].text(), input.as_str());
        prop_assert!(
            tokens[0].kind() == TokenKind::Identifier || tokens[0].kind().is_keyword()
        );
    });
}

#[test]
fn property_digits_are_integers() {
    proptest!(|(input in "[0-9]{1,30}")| {
        let (tokens, _) = lex(&input);

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind(), TokenKind::Integer);
        prop_assert_eq!(tokens[0].text(), input.as_str());
    });
}

#[test]
fn property_fractions_are_floats() {
    proptest!(|(input in "[0-9]{1,10}\\.[0-9]{1,10}([eE][+-]?[0-9]{1,3})?")| {
        let (tokens, _) = lex(&input);

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind(), TokenKind::Float);
        prop_assert_eq!(tokens[0].text(), input.as_str());
    });
}

#[test]
fn property_quoted_text_is_a_string() {
    proptest!(|(body in "[^'\n]{0,50}")| {
        let input = format!("'{body}'");
        let (tokens, _) = lex(&input);

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind(), TokenKind::String);
        prop_assert_eq!(tokens[0].text(), input.as_str());
    });
}
