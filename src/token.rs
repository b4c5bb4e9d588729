use serde::Serialize;
use std::fmt;

/// A 1-based source location. Tokens and diagnostics carry the position of
/// the first character of whatever they describe.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: Kind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: Kind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn is_eof(&self) -> bool {
        self.kind == Kind::Eof
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Kind {
    // Keywords
    Bool,        // bool
    Int,         // int
    Void,        // void
    True,        // true
    False,       // false
    Struct,      // struct
    Cin,         // cin
    Cout,        // cout
    If,          // if
    Else,        // else
    While,       // while
    Return,      // return

    // Identifiers and literals
    Id(String),
    IntLiteral(i32),
    /// Holds the decoded value, escapes already resolved.
    StringLiteral(String),

    // Brackets and delimiters
    LCurly,      // {
    RCurly,      // }
    LParen,      // (
    RParen,      // )
    Semicolon,   // ;
    Comma,       // ,
    Dot,         // .

    // Operators
    Write,       // <<
    Read,        // >>
    PlusPlus,    // ++
    MinusMinus,  // --
    Plus,        // +
    Minus,       // -
    Times,       // *
    Divide,      // /
    Not,         // !
    And,         // &&
    Or,          // ||
    Equals,      // ==
    NotEquals,   // !=
    Less,        // <
    Greater,     // >
    LessEq,      // <=
    GreaterEq,   // >=
    Assign,      // =

    Eof          // End of file marker
}

impl Kind {
    /// Looks up a reserved word. Anything not in the table is an identifier.
    pub fn keyword(ident: &str) -> Option<Kind> {
        let kind = match ident {
            "bool" => Kind::Bool,
            "int" => Kind::Int,
            "void" => Kind::Void,
            "true" => Kind::True,
            "false" => Kind::False,
            "struct" => Kind::Struct,
            "cin" => Kind::Cin,
            "cout" => Kind::Cout,
            "if" => Kind::If,
            "else" => Kind::Else,
            "while" => Kind::While,
            "return" => Kind::Return,
            _ => return None,
        };
        Some(kind)
    }

    /// The symbolic name of the kind, independent of any payload.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "BOOL",
            Kind::Int => "INT",
            Kind::Void => "VOID",
            Kind::True => "TRUE",
            Kind::False => "FALSE",
            Kind::Struct => "STRUCT",
            Kind::Cin => "CIN",
            Kind::Cout => "COUT",
            Kind::If => "IF",
            Kind::Else => "ELSE",
            Kind::While => "WHILE",
            Kind::Return => "RETURN",
            Kind::Id(_) => "ID",
            Kind::IntLiteral(_) => "INTLITERAL",
            Kind::StringLiteral(_) => "STRINGLITERAL",
            Kind::LCurly => "LCURLY",
            Kind::RCurly => "RCURLY",
            Kind::LParen => "LPAREN",
            Kind::RParen => "RPAREN",
            Kind::Semicolon => "SEMICOLON",
            Kind::Comma => "COMMA",
            Kind::Dot => "DOT",
            Kind::Write => "WRITE",
            Kind::Read => "READ",
            Kind::PlusPlus => "PLUSPLUS",
            Kind::MinusMinus => "MINUSMINUS",
            Kind::Plus => "PLUS",
            Kind::Minus => "MINUS",
            Kind::Times => "TIMES",
            Kind::Divide => "DIVIDE",
            Kind::Not => "NOT",
            Kind::And => "AND",
            Kind::Or => "OR",
            Kind::Equals => "EQUALS",
            Kind::NotEquals => "NOTEQUALS",
            Kind::Less => "LESS",
            Kind::Greater => "GREATER",
            Kind::LessEq => "LESSEQ",
            Kind::GreaterEq => "GREATEREQ",
            Kind::Assign => "ASSIGN",
            Kind::Eof => "EOF",
        }
    }

    /// Spelling for kinds whose text never varies.
    fn fixed_spelling(&self) -> Option<&'static str> {
        let text = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Void => "void",
            Kind::True => "true",
            Kind::False => "false",
            Kind::Struct => "struct",
            Kind::Cin => "cin",
            Kind::Cout => "cout",
            Kind::If => "if",
            Kind::Else => "else",
            Kind::While => "while",
            Kind::Return => "return",
            Kind::LCurly => "{",
            Kind::RCurly => "}",
            Kind::LParen => "(",
            Kind::RParen => ")",
            Kind::Semicolon => ";",
            Kind::Comma => ",",
            Kind::Dot => ".",
            Kind::Write => "<<",
            Kind::Read => ">>",
            Kind::PlusPlus => "++",
            Kind::MinusMinus => "--",
            Kind::Plus => "+",
            Kind::Minus => "-",
            Kind::Times => "*",
            Kind::Divide => "/",
            Kind::Not => "!",
            Kind::And => "&&",
            Kind::Or => "||",
            Kind::Equals => "==",
            Kind::NotEquals => "!=",
            Kind::Less => "<",
            Kind::Greater => ">",
            Kind::LessEq => "<=",
            Kind::GreaterEq => ">=",
            Kind::Assign => "=",
            Kind::Eof => "EOF",
            Kind::Id(_) | Kind::IntLiteral(_) | Kind::StringLiteral(_) => return None,
        };
        Some(text)
    }
}

/// Canonical spelling. String literals are re-escaped and quoted so the
/// output scans back to the same token.
impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Id(name) => f.write_str(name),
            Kind::IntLiteral(value) => write!(f, "{}", value),
            Kind::StringLiteral(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\\' => f.write_str("\\\\")?,
                        '"' => f.write_str("\\\"")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            fixed => f.write_str(fixed.fixed_spelling().unwrap_or_default()),
        }
    }
}
