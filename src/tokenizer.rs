use spdlog::prelude::*;
use thiserror::Error;

use crate::source::SourceCode;
use crate::tokens::{Mnemonic, Token, TokenKind, REGISTER_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// Register payload is not numeric or is out of range. The two cases
    /// are told apart only in the logged message.
    #[error("invalid register number")]
    InvalidRegisterNumber,
    #[error("invalid number")]
    InvalidNumericLiteral,
    #[error("instruction name used as label")]
    ReservedWordAsLabel,
}

/// One recorded lexical diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: `{symbol}`")]
pub struct LexError {
    pub line: usize,
    pub symbol: String,
    pub kind: LexErrorKind,
}

/// Everything that was wrong with one program. The individual
/// diagnostics have already been logged by the time this is returned.
#[derive(Debug, Error)]
#[error("{} lexical error(s) detected", .errors.len())]
pub struct LexErrors {
    errors: Vec<LexError>,
}

impl LexErrors {
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }
}

/// Scans the whole program and classifies every word. A malformed word
/// records a diagnostic but never stops the scan, so one pass reports
/// every error in the input. Any recorded error fails the call; the
/// tokens accumulated up to that point are not surfaced.
pub fn tokenize(source: &SourceCode) -> Result<Vec<Token>, LexErrors> {
    let mut lexer = source.iter();
    let mut tokens = Vec::new();
    let mut errors: Vec<LexError> = Vec::new();

    while let Some(word) = lexer.next_word() {
        if word.starts_with(';') {
            debug!("comment {} on line {}, skipping rest of line", word, lexer.line());
            lexer.skip_line();
            continue;
        }

        let (kind, error) = classify(word);
        if let Some(error) = error {
            errors.push(LexError {
                line: lexer.line(),
                symbol: word.to_string(),
                kind: error,
            });
        }
        tokens.push(Token::new(word, kind));
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(LexErrors { errors })
    }
}

/// Decides the lexical category of one word. The order of the checks is
/// the classification priority; a word never matches more than one arm.
fn classify(word: &str) -> (TokenKind, Option<LexErrorKind>) {
    if let Some(mnemonic) = Mnemonic::from_word(word) {
        debug!("instruction {word}");
        return (TokenKind::Instruction(mnemonic), None);
    }

    if let Some(number) = word.strip_prefix('$') {
        debug!("register {word}");
        // A malformed register still yields a Register token; only the
        // diagnostic records that something was wrong with it.
        let error = match number.parse::<u32>() {
            Ok(n) if n < REGISTER_COUNT => None,
            Ok(_) => {
                error!("register number out of range: {word}");
                Some(LexErrorKind::InvalidRegisterNumber)
            }
            Err(_) => {
                error!("register number is not numeric: {word}");
                Some(LexErrorKind::InvalidRegisterNumber)
            }
        };
        return (TokenKind::Register, error);
    }

    if word.starts_with('-') {
        // The payload after the sign is not digit-checked.
        debug!("negative constant {word}");
        return (TokenKind::NegativeInt, None);
    }

    if word.len() > 2 && word.starts_with("0x") {
        debug!("hex constant {word}");
        let error = if word[2..].chars().all(|c| c.is_ascii_hexdigit()) {
            None
        } else {
            error!("invalid number: {word}");
            Some(LexErrorKind::InvalidNumericLiteral)
        };
        return (TokenKind::HexConst, error);
    }

    if word.starts_with(|c: char| c.is_ascii_digit()) {
        debug!("decimal constant {word}");
        let error = if word.chars().all(|c| c.is_ascii_digit()) {
            None
        } else {
            error!("invalid number: {word}");
            Some(LexErrorKind::InvalidNumericLiteral)
        };
        return (TokenKind::PositiveInt, error);
    }

    if let Some(name) = word.strip_suffix(':') {
        debug!("label declaration {word}");
        let error = if Mnemonic::from_word(name).is_some() {
            warn!("instruction name used as label: {word}");
            Some(LexErrorKind::ReservedWordAsLabel)
        } else {
            None
        };
        return (TokenKind::LabelDecl, error);
    }

    debug!("label use {word}");
    (TokenKind::LabelUse, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize_str(program: &str) -> Result<Vec<Token>, LexErrors> {
        tokenize(&SourceCode::new(program.to_string()))
    }

    fn symbols(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.symbol.as_str()).collect()
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn labelled_word_with_comment() {
        let tokens = tokenize_str("ALABEL: .word 0x34a2 ;first line\n").unwrap();
        assert_eq!(symbols(&tokens), ["ALABEL:", ".word", "0x34a2"]);
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::LabelDecl,
                TokenKind::Instruction(Mnemonic::Word),
                TokenKind::HexConst,
            ]
        );
    }

    #[test]
    fn empty_program_tokenizes_to_nothing() {
        assert!(tokenize_str("").unwrap().is_empty());
    }

    #[test]
    fn comment_skips_its_own_line_only() {
        let tokens = tokenize_str("add ;sub $99 0xzz\nsub\n").unwrap();
        assert_eq!(symbols(&tokens), ["add", "sub"]);
    }

    #[test]
    fn well_formed_program_keeps_source_order_and_spelling() {
        let program = "main: lis $2\n\
                       .word 13\n\
                       loop: add $3 $3 $2 ; accumulate\n\
                       bne $3 $0 loop\n\
                       jr $31\n";
        let tokens = tokenize_str(program).unwrap();
        assert_eq!(
            symbols(&tokens),
            [
                "main:", "lis", "$2", ".word", "13", "loop:", "add", "$3", "$3", "$2", "bne",
                "$3", "$0", "loop", "jr", "$31",
            ]
        );
        assert_eq!(tokens[13].kind, TokenKind::LabelUse);
    }

    #[test]
    fn invalid_hex_digit_fails_the_call() {
        let errors = tokenize_str(".word 0xadg\n").unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].kind, LexErrorKind::InvalidNumericLiteral);
        assert_eq!(errors.errors()[0].symbol, "0xadg");
    }

    #[test]
    fn trailing_garbage_in_decimal_fails_the_call() {
        let errors = tokenize_str(".word 567a\n").unwrap_err();
        assert_eq!(errors.errors()[0].kind, LexErrorKind::InvalidNumericLiteral);
    }

    #[test]
    fn register_out_of_range_fails_the_call() {
        let errors = tokenize_str("$40\n").unwrap_err();
        assert_eq!(errors.errors()[0].kind, LexErrorKind::InvalidRegisterNumber);
    }

    #[test]
    fn register_with_non_numeric_payload_fails_the_call() {
        let errors = tokenize_str("jr $ra\n").unwrap_err();
        assert_eq!(errors.errors()[0].kind, LexErrorKind::InvalidRegisterNumber);
        assert_eq!(errors.errors()[0].symbol, "$ra");
    }

    #[test]
    fn registers_zero_through_31_are_valid() {
        let tokens = tokenize_str("add $0 $31 $15\n").unwrap();
        assert_eq!(&kinds(&tokens)[1..], &[TokenKind::Register; 3]);
    }

    #[test]
    fn instruction_name_as_label_is_reported_once() {
        let errors = tokenize_str("add: add $1 $2\n").unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].kind, LexErrorKind::ReservedWordAsLabel);
        assert_eq!(errors.errors()[0].symbol, "add:");
    }

    #[test]
    fn negative_words_are_never_digit_checked() {
        let tokens = tokenize_str(".word -34 -abc\n").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::NegativeInt);
        assert_eq!(tokens[2].kind, TokenKind::NegativeInt);
    }

    #[test]
    fn instruction_matching_ignores_case_but_keeps_spelling() {
        let tokens = tokenize_str("ADD $1 $2 $3\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Instruction(Mnemonic::Add));
        assert_eq!(tokens[0].symbol, "ADD");
    }

    #[test]
    fn classification_priority_is_fixed() {
        // The sign check runs before the label declaration check.
        assert_eq!(classify("-5:"), (TokenKind::NegativeInt, None));
        // Too short for a hex constant, so it is a malformed decimal.
        assert_eq!(
            classify("0x"),
            (
                TokenKind::PositiveInt,
                Some(LexErrorKind::InvalidNumericLiteral)
            )
        );
        assert_eq!(classify("0x1F"), (TokenKind::HexConst, None));
        assert_eq!(classify("x123"), (TokenKind::LabelUse, None));
    }

    #[test]
    fn every_error_in_one_pass_is_reported() {
        let program = ".word 0xadg\n\
                       $99\n\
                       foo: .word 10\n\
                       beq $1 $2 bar\n\
                       567a\n";
        let errors = tokenize_str(program).unwrap_err();
        let recorded: Vec<_> = errors.errors().iter().map(|e| (e.line, e.kind)).collect();
        assert_eq!(
            recorded,
            [
                (1, LexErrorKind::InvalidNumericLiteral),
                (2, LexErrorKind::InvalidRegisterNumber),
                (5, LexErrorKind::InvalidNumericLiteral),
            ]
        );
    }
}
