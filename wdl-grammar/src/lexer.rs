//! Lexing of WDL source.
//!
//! The main [`Token`] set covers the document grammar. String literals and
//! command sections are lexed by dedicated token sets ([`SQStringToken`],
//! [`DQStringToken`], [`BraceCommandToken`], [`HeredocCommandToken`]); the
//! parser switches between sets with [`logos::Lexer::morph`] when it
//! encounters an opening quote or command delimiter and switches back when a
//! placeholder expression is embedded.

use logos::Logos;

/// Tokens of the main document grammar.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Contiguous whitespace.
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// A `#` comment extending to the end of the line.
    #[regex(r"#[^\r\n]*")]
    Comment,

    /// A literal float.
    #[regex(r"([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+")]
    Float,

    /// A literal integer (decimal, octal, or hexadecimal).
    #[regex(r"0|[1-9][0-9]*|0[0-7]+|0[xX][0-9a-fA-F]+")]
    Integer,

    /// An identifier.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,

    /// The `version` keyword.
    #[token("version")]
    VersionKeyword,
    /// The `import` keyword.
    #[token("import")]
    ImportKeyword,
    /// The `as` keyword.
    #[token("as")]
    AsKeyword,
    /// The `alias` keyword.
    #[token("alias")]
    AliasKeyword,
    /// The `struct` keyword.
    #[token("struct")]
    StructKeyword,
    /// The `task` keyword.
    #[token("task")]
    TaskKeyword,
    /// The `workflow` keyword.
    #[token("workflow")]
    WorkflowKeyword,
    /// The `input` keyword.
    #[token("input")]
    InputKeyword,
    /// The `output` keyword.
    #[token("output")]
    OutputKeyword,
    /// The `command` keyword.
    #[token("command")]
    CommandKeyword,
    /// The `runtime` keyword.
    #[token("runtime")]
    RuntimeKeyword,
    /// The `hints` keyword.
    #[token("hints")]
    HintsKeyword,
    /// The `meta` keyword.
    #[token("meta")]
    MetaKeyword,
    /// The `parameter_meta` keyword.
    #[token("parameter_meta")]
    ParameterMetaKeyword,
    /// The `call` keyword.
    #[token("call")]
    CallKeyword,
    /// The `scatter` keyword.
    #[token("scatter")]
    ScatterKeyword,
    /// The `in` keyword.
    #[token("in")]
    InKeyword,
    /// The `if` keyword.
    #[token("if")]
    IfKeyword,
    /// The `then` keyword.
    #[token("then")]
    ThenKeyword,
    /// The `else` keyword.
    #[token("else")]
    ElseKeyword,
    /// The `object` keyword.
    #[token("object")]
    ObjectKeyword,
    /// The `true` keyword.
    #[token("true")]
    TrueKeyword,
    /// The `false` keyword.
    #[token("false")]
    FalseKeyword,
    /// The `null` keyword.
    #[token("null")]
    NullKeyword,
    /// The `None` keyword.
    #[token("None")]
    NoneKeyword,

    /// The `Boolean` type keyword.
    #[token("Boolean")]
    BooleanTypeKeyword,
    /// The `Int` type keyword.
    #[token("Int")]
    IntTypeKeyword,
    /// The `Float` type keyword.
    #[token("Float")]
    FloatTypeKeyword,
    /// The `String` type keyword.
    #[token("String")]
    StringTypeKeyword,
    /// The `File` type keyword.
    #[token("File")]
    FileTypeKeyword,
    /// The `Directory` type keyword.
    #[token("Directory")]
    DirectoryTypeKeyword,
    /// The `Array` type keyword.
    #[token("Array")]
    ArrayTypeKeyword,
    /// The `Map` type keyword.
    #[token("Map")]
    MapTypeKeyword,
    /// The `Pair` type keyword.
    #[token("Pair")]
    PairTypeKeyword,
    /// The `Object` type keyword.
    #[token("Object")]
    ObjectTypeKeyword,

    /// The `{` symbol.
    #[token("{")]
    OpenBrace,
    /// The `}` symbol.
    #[token("}")]
    CloseBrace,
    /// The `[` symbol.
    #[token("[")]
    OpenBracket,
    /// The `]` symbol.
    #[token("]")]
    CloseBracket,
    /// The `(` symbol.
    #[token("(")]
    OpenParen,
    /// The `)` symbol.
    #[token(")")]
    CloseParen,
    /// The `<<<` symbol.
    #[token("<<<")]
    OpenHeredoc,
    /// The `>>>` symbol.
    #[token(">>>")]
    CloseHeredoc,
    /// The `=` symbol.
    #[token("=")]
    Assignment,
    /// The `==` symbol.
    #[token("==")]
    Equal,
    /// The `!=` symbol.
    #[token("!=")]
    NotEqual,
    /// The `<` symbol.
    #[token("<")]
    Less,
    /// The `<=` symbol.
    #[token("<=")]
    LessEqual,
    /// The `>` symbol.
    #[token(">")]
    Greater,
    /// The `>=` symbol.
    #[token(">=")]
    GreaterEqual,
    /// The `+` symbol.
    #[token("+")]
    Plus,
    /// The `-` symbol.
    #[token("-")]
    Minus,
    /// The `*` symbol.
    #[token("*")]
    Asterisk,
    /// The `/` symbol.
    #[token("/")]
    Slash,
    /// The `%` symbol.
    #[token("%")]
    Percent,
    /// The `!` symbol.
    #[token("!")]
    Exclamation,
    /// The `&&` symbol.
    #[token("&&")]
    LogicalAnd,
    /// The `||` symbol.
    #[token("||")]
    LogicalOr,
    /// The `?` symbol.
    #[token("?")]
    QuestionMark,
    /// The `,` symbol.
    #[token(",")]
    Comma,
    /// The `.` symbol.
    #[token(".")]
    Dot,
    /// The `:` symbol.
    #[token(":")]
    Colon,
    /// The `'` symbol, which opens a single-quoted string.
    #[token("'")]
    SingleQuote,
    /// The `"` symbol, which opens a double-quoted string.
    #[token("\"")]
    DoubleQuote,
}

impl Token {
    /// Determines if the token is trivia (whitespace or a comment).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    /// Determines if the token is a keyword.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::VersionKeyword
                | Self::ImportKeyword
                | Self::AsKeyword
                | Self::AliasKeyword
                | Self::StructKeyword
                | Self::TaskKeyword
                | Self::WorkflowKeyword
                | Self::InputKeyword
                | Self::OutputKeyword
                | Self::CommandKeyword
                | Self::RuntimeKeyword
                | Self::HintsKeyword
                | Self::MetaKeyword
                | Self::ParameterMetaKeyword
                | Self::CallKeyword
                | Self::ScatterKeyword
                | Self::InKeyword
                | Self::IfKeyword
                | Self::ThenKeyword
                | Self::ElseKeyword
                | Self::ObjectKeyword
                | Self::TrueKeyword
                | Self::FalseKeyword
                | Self::NullKeyword
                | Self::NoneKeyword
                | Self::BooleanTypeKeyword
                | Self::IntTypeKeyword
                | Self::FloatTypeKeyword
                | Self::StringTypeKeyword
                | Self::FileTypeKeyword
                | Self::DirectoryTypeKeyword
                | Self::ArrayTypeKeyword
                | Self::MapTypeKeyword
                | Self::PairTypeKeyword
                | Self::ObjectTypeKeyword
        )
    }

    /// Gets a description of the token for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Ident => "identifier",
            Self::VersionKeyword => "`version` keyword",
            Self::ImportKeyword => "`import` keyword",
            Self::AsKeyword => "`as` keyword",
            Self::AliasKeyword => "`alias` keyword",
            Self::StructKeyword => "`struct` keyword",
            Self::TaskKeyword => "`task` keyword",
            Self::WorkflowKeyword => "`workflow` keyword",
            Self::InputKeyword => "`input` keyword",
            Self::OutputKeyword => "`output` keyword",
            Self::CommandKeyword => "`command` keyword",
            Self::RuntimeKeyword => "`runtime` keyword",
            Self::HintsKeyword => "`hints` keyword",
            Self::MetaKeyword => "`meta` keyword",
            Self::ParameterMetaKeyword => "`parameter_meta` keyword",
            Self::CallKeyword => "`call` keyword",
            Self::ScatterKeyword => "`scatter` keyword",
            Self::InKeyword => "`in` keyword",
            Self::IfKeyword => "`if` keyword",
            Self::ThenKeyword => "`then` keyword",
            Self::ElseKeyword => "`else` keyword",
            Self::ObjectKeyword => "`object` keyword",
            Self::TrueKeyword => "`true` keyword",
            Self::FalseKeyword => "`false` keyword",
            Self::NullKeyword => "`null` keyword",
            Self::NoneKeyword => "`None` keyword",
            Self::BooleanTypeKeyword => "`Boolean` type keyword",
            Self::IntTypeKeyword => "`Int` type keyword",
            Self::FloatTypeKeyword => "`Float` type keyword",
            Self::StringTypeKeyword => "`String` type keyword",
            Self::FileTypeKeyword => "`File` type keyword",
            Self::DirectoryTypeKeyword => "`Directory` type keyword",
            Self::ArrayTypeKeyword => "`Array` type keyword",
            Self::MapTypeKeyword => "`Map` type keyword",
            Self::PairTypeKeyword => "`Pair` type keyword",
            Self::ObjectTypeKeyword => "`Object` type keyword",
            Self::OpenBrace => "`{` symbol",
            Self::CloseBrace => "`}` symbol",
            Self::OpenBracket => "`[` symbol",
            Self::CloseBracket => "`]` symbol",
            Self::OpenParen => "`(` symbol",
            Self::CloseParen => "`)` symbol",
            Self::OpenHeredoc => "`<<<` symbol",
            Self::CloseHeredoc => "`>>>` symbol",
            Self::Assignment => "`=` symbol",
            Self::Equal => "`==` symbol",
            Self::NotEqual => "`!=` symbol",
            Self::Less => "`<` symbol",
            Self::LessEqual => "`<=` symbol",
            Self::Greater => "`>` symbol",
            Self::GreaterEqual => "`>=` symbol",
            Self::Plus => "`+` symbol",
            Self::Minus => "`-` symbol",
            Self::Asterisk => "`*` symbol",
            Self::Slash => "`/` symbol",
            Self::Percent => "`%` symbol",
            Self::Exclamation => "`!` symbol",
            Self::LogicalAnd => "`&&` symbol",
            Self::LogicalOr => "`||` symbol",
            Self::QuestionMark => "`?` symbol",
            Self::Comma => "`,` symbol",
            Self::Dot => "`.` symbol",
            Self::Colon => "`:` symbol",
            Self::SingleQuote => "`'` symbol",
            Self::DoubleQuote => "`\"` symbol",
        }
    }
}

/// Tokens of a single-quoted string literal.
///
/// Raw line breaks are not valid in quoted strings and surface as lexer
/// errors.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SQStringToken {
    /// An escape sequence.
    #[regex(r"\\.")]
    Escape,

    /// A run of literal text.
    #[regex(r"[^\\$~'\n\r]+")]
    Text,

    /// The start of a `~{` placeholder.
    #[token("~{")]
    PlaceholderStart,

    /// The start of a `${` placeholder.
    #[token("${")]
    DollarPlaceholderStart,

    /// A lone `$` that does not start a placeholder.
    #[token("$")]
    DollarSign,

    /// A lone `~` that does not start a placeholder.
    #[token("~")]
    Tilde,

    /// The closing quote.
    #[token("'")]
    End,
}

/// Tokens of a double-quoted string literal.
///
/// Raw line breaks are not valid in quoted strings and surface as lexer
/// errors.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DQStringToken {
    /// An escape sequence.
    #[regex(r"\\.")]
    Escape,

    /// A run of literal text.
    #[regex(r#"[^\\$~"\n\r]+"#)]
    Text,

    /// The start of a `~{` placeholder.
    #[token("~{")]
    PlaceholderStart,

    /// The start of a `${` placeholder.
    #[token("${")]
    DollarPlaceholderStart,

    /// A lone `$` that does not start a placeholder.
    #[token("$")]
    DollarSign,

    /// A lone `~` that does not start a placeholder.
    #[token("~")]
    Tilde,

    /// The closing quote.
    #[token("\"")]
    End,
}

/// Tokens of a brace-delimited (`command { … }`) command section.
///
/// Braces inside the command body are tracked by the parser so that balanced
/// `{ … }` pairs remain part of the text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceCommandToken {
    /// An escape sequence, passed through verbatim.
    #[regex(r"\\.")]
    Escape,

    /// A run of literal text.
    #[regex(r"[^\\$~{}]+")]
    Text,

    /// The start of a `~{` placeholder.
    #[token("~{")]
    PlaceholderStart,

    /// The start of a `${` placeholder.
    #[token("${")]
    DollarPlaceholderStart,

    /// A lone `$` that does not start a placeholder.
    #[token("$")]
    DollarSign,

    /// A lone `~` that does not start a placeholder.
    #[token("~")]
    Tilde,

    /// A nested opening brace.
    #[token("{")]
    OpenBrace,

    /// A closing brace; ends the section when not nested.
    #[token("}")]
    CloseBrace,
}

/// Tokens of a heredoc (`command <<< … >>>`) command section.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeredocCommandToken {
    /// An escape sequence, passed through verbatim.
    #[regex(r"\\.")]
    Escape,

    /// A run of literal text.
    #[regex(r"[^\\$~>]+")]
    Text,

    /// The start of a `~{` placeholder.
    #[token("~{")]
    PlaceholderStart,

    /// The start of a `${` placeholder.
    #[token("${")]
    DollarPlaceholderStart,

    /// A lone `$` that does not start a placeholder.
    #[token("$")]
    DollarSign,

    /// A lone `~` that does not start a placeholder.
    #[token("~")]
    Tilde,

    /// A `>` that does not close the section.
    #[token(">")]
    Angle,

    /// The closing `>>>`.
    #[token(">>>")]
    End,
}

#[cfg(test)]
mod test {
    use logos::Logos;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Lexes the entire input with the main token set.
    fn lex(source: &str) -> Vec<(Result<Token, ()>, &str)> {
        let mut lexer = Token::lexer(source);
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            tokens.push((result, lexer.slice()));
        }
        tokens
    }

    #[test]
    fn keywords_take_precedence_over_identifiers() {
        let tokens = lex("task in input");
        assert_eq!(
            tokens,
            vec![
                (Ok(Token::TaskKeyword), "task"),
                (Ok(Token::Whitespace), " "),
                (Ok(Token::InKeyword), "in"),
                (Ok(Token::Whitespace), " "),
                (Ok(Token::InputKeyword), "input"),
            ]
        );
    }

    #[test]
    fn numbers() {
        let tokens = lex("0 42 0xA7 0777 1. .5 1e6 2.5e-2");
        let numeric: Vec<_> = tokens
            .into_iter()
            .filter(|(t, _)| *t != Ok(Token::Whitespace))
            .collect();
        assert_eq!(
            numeric,
            vec![
                (Ok(Token::Integer), "0"),
                (Ok(Token::Integer), "42"),
                (Ok(Token::Integer), "0xA7"),
                (Ok(Token::Integer), "0777"),
                (Ok(Token::Float), "1."),
                (Ok(Token::Float), ".5"),
                (Ok(Token::Float), "1e6"),
                (Ok(Token::Float), "2.5e-2"),
            ]
        );
    }

    #[test]
    fn heredoc_close_wins_over_angles() {
        let mut lexer = HeredocCommandToken::lexer("echo >2 >>>");
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            tokens.push((result, lexer.slice().to_string()));
        }
        assert_eq!(
            tokens,
            vec![
                (Ok(HeredocCommandToken::Text), "echo ".to_string()),
                (Ok(HeredocCommandToken::Angle), ">".to_string()),
                (Ok(HeredocCommandToken::Text), "2 ".to_string()),
                (Ok(HeredocCommandToken::End), ">>>".to_string()),
            ]
        );
    }

    #[test]
    fn string_placeholders() {
        let mut lexer = SQStringToken::lexer("hello ~{name}!'");
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            tokens.push((result, lexer.slice().to_string()));
            if result == Ok(SQStringToken::PlaceholderStart) {
                // The parser would morph here; skip the expression for the
                // purposes of this test.
                let mut main = lexer.morph::<Token>();
                assert_eq!(main.next(), Some(Ok(Token::Ident)));
                assert_eq!(main.next(), Some(Ok(Token::CloseBrace)));
                lexer = main.morph();
            }
        }
        assert_eq!(
            tokens,
            vec![
                (Ok(SQStringToken::Text), "hello ".to_string()),
                (Ok(SQStringToken::PlaceholderStart), "~{".to_string()),
                (Ok(SQStringToken::Text), "!".to_string()),
                (Ok(SQStringToken::End), "'".to_string()),
            ]
        );
    }
}
