use std::fmt::Display;

use strum::{AsRefStr, IntoStaticStr};

/// There are 32 general purpose registers, so valid register numbers
/// are 0 through 31.
pub const REGISTER_COUNT: u32 = 32;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, IntoStaticStr, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mnemonic {
    Add,
    Sub,
    Mult,
    Multu,
    Div,
    Divu,
    Mfhi,
    Mflo,
    Lis,
    Lw,
    Sw,
    Slt,
    Sltu,
    Beq,
    Bne,
    Jr,
    Jalr,
    /// The `.word` directive is classified like any other instruction.
    #[strum(serialize = ".word")]
    Word,
}

impl Mnemonic {
    /// Returns the mnemonic if the word is an instruction. Matching is
    /// case-insensitive; canonical forms are lower-case.
    pub fn from_word(word: &str) -> Option<Mnemonic> {
        match word.to_lowercase().as_str() {
            "add" => Some(Mnemonic::Add),
            "sub" => Some(Mnemonic::Sub),
            "mult" => Some(Mnemonic::Mult),
            "multu" => Some(Mnemonic::Multu),
            "div" => Some(Mnemonic::Div),
            "divu" => Some(Mnemonic::Divu),
            "mfhi" => Some(Mnemonic::Mfhi),
            "mflo" => Some(Mnemonic::Mflo),
            "lis" => Some(Mnemonic::Lis),
            "lw" => Some(Mnemonic::Lw),
            "sw" => Some(Mnemonic::Sw),
            "slt" => Some(Mnemonic::Slt),
            "sltu" => Some(Mnemonic::Sltu),
            "beq" => Some(Mnemonic::Beq),
            "bne" => Some(Mnemonic::Bne),
            "jr" => Some(Mnemonic::Jr),
            "jalr" => Some(Mnemonic::Jalr),
            ".word" => Some(Mnemonic::Word),
            _ => None,
        }
    }
}

/// The lexical category of a word. A word belongs to exactly one
/// category; which one is decided by the priority order in
/// [`crate::tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum TokenKind {
    Instruction(Mnemonic),
    Register,
    PositiveInt,
    NegativeInt,
    HexConst,
    LabelDecl,
    LabelUse,
}

/// A classified word of the source program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Original spelling, even where matching was case-insensitive.
    pub symbol: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(symbol: &str, kind: TokenKind) -> Self {
        Self {
            symbol: symbol.to_string(),
            kind,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.symbol, self.kind.as_ref())
    }
}
