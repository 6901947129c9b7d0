//! The parser over the lexed token stream.
//!
//! [`Parser`] owns the main lexer and a small lookahead buffer; grammar
//! productions live in the [`grammar`](crate::grammar) module. String
//! literals, placeholders, and command sections are lexed here because they
//! require morphing between token sets.

use std::collections::VecDeque;

use logos::Logos;

use crate::Diagnostic;
use crate::Span;
use crate::SupportedVersion;
use crate::comments::Comment;
use crate::comments::CommentMap;
use crate::comments::CommentPlacement;
use crate::concrete::CommandSection;
use crate::concrete::Expr;
use crate::concrete::Placeholder;
use crate::concrete::PlaceholderOption;
use crate::concrete::StringLiteral;
use crate::concrete::StringPart;
use crate::lexer::BraceCommandToken;
use crate::lexer::DQStringToken;
use crate::lexer::HeredocCommandToken;
use crate::lexer::SQStringToken;
use crate::lexer::Token;
use crate::source::Source;

/// Creates an "unexpected character" diagnostic.
fn unexpected_character(span: Span) -> Diagnostic {
    Diagnostic::error(span, "unexpected character")
}

/// Creates an "unterminated string" diagnostic.
///
/// The span points at the unmatched opening quote.
fn unterminated_string(span: Span) -> Diagnostic {
    Diagnostic::error(span, "unterminated string")
}

/// Creates an "unterminated command" diagnostic.
///
/// The span points at the unmatched opening delimiter.
fn unterminated_command(span: Span) -> Diagnostic {
    Diagnostic::error(span, "unterminated command section")
}

/// Creates an "invalid escape sequence" diagnostic.
fn invalid_escape(sequence: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("invalid escape sequence `{sequence}`"))
}

/// Lexes the body of a quoted string, morphing back to the main token set
/// for embedded placeholder expressions.
macro_rules! lex_string {
    ($self:ident, $token:ty, $open:ident) => {{
        /// The string token set being lexed.
        type Tok = $token;

        let mut parts: Vec<StringPart> = Vec::new();
        let mut text = String::new();
        let mut text_start = usize::MAX;
        let mut lexer = $self
            .lexer
            .take()
            .expect("lexer should be present")
            .morph::<Tok>();

        loop {
            let token = lexer.next();
            let span = Span::from(lexer.span());
            match token {
                Some(Ok(Tok::Text)) => {
                    text_start = text_start.min(span.offset());
                    text.push_str(lexer.slice());
                }
                Some(Ok(Tok::Escape)) => {
                    text_start = text_start.min(span.offset());
                    match Self::resolve_escape(lexer.slice()) {
                        Some(c) => text.push(c),
                        None => {
                            let sequence = lexer.slice().to_string();
                            $self.lexer = Some(lexer.morph());
                            return Err(invalid_escape(&sequence, span));
                        }
                    }
                }
                Some(Ok(Tok::DollarSign)) | Some(Ok(Tok::Tilde)) => {
                    text_start = text_start.min(span.offset());
                    text.push_str(lexer.slice());
                }
                Some(Ok(Tok::PlaceholderStart)) => {
                    if $self.version.has_tilde_placeholders() {
                        Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                        $self.lexer = Some(lexer.morph());
                        let placeholder = $self.placeholder(span)?;
                        parts.push(StringPart::Placeholder(placeholder));
                        lexer = $self
                            .lexer
                            .take()
                            .expect("lexer should be present")
                            .morph();
                    } else {
                        text_start = text_start.min(span.offset());
                        text.push_str(lexer.slice());
                    }
                }
                Some(Ok(Tok::DollarPlaceholderStart)) => {
                    if $self.version.has_dollar_placeholders() {
                        Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                        $self.lexer = Some(lexer.morph());
                        let placeholder = $self.placeholder(span)?;
                        parts.push(StringPart::Placeholder(placeholder));
                        lexer = $self
                            .lexer
                            .take()
                            .expect("lexer should be present")
                            .morph();
                    } else {
                        text_start = text_start.min(span.offset());
                        text.push_str(lexer.slice());
                    }
                }
                Some(Ok(Tok::End)) => {
                    Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                    let span = $open.merge(span);
                    $self.lexer = Some(lexer.morph());
                    return Ok(StringLiteral { parts, span });
                }
                Some(Err(_)) | None => {
                    $self.lexer = Some(lexer.morph());
                    return Err(unterminated_string($open));
                }
            }
        }
    }};
}

/// The parser of WDL source.
pub struct Parser<'a> {
    /// The source being parsed.
    source: &'a Source,
    /// The main lexer.
    ///
    /// Temporarily taken while lexing strings and commands.
    lexer: Option<logos::Lexer<'a, Token>>,
    /// The lookahead buffer of non-trivia tokens.
    peeked: VecDeque<(Token, Span)>,
    /// The language version being parsed.
    version: SupportedVersion,
    /// The spans of the comments encountered so far.
    comments: Vec<Span>,
    /// The span of the most recently consumed token.
    last_span: Span,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given source.
    ///
    /// The parser starts out assuming `draft-2`; the version is updated once
    /// the `version` statement has been read.
    pub fn new(source: &'a Source) -> Self {
        Self {
            source,
            lexer: Some(Token::lexer(source.text())),
            peeked: VecDeque::new(),
            version: SupportedVersion::Draft2,
            comments: Vec::new(),
            last_span: Span::new(0, 0),
        }
    }

    /// Gets the source being parsed.
    pub fn source(&self) -> &'a Source {
        self.source
    }

    /// Gets the language version being parsed.
    pub fn version(&self) -> SupportedVersion {
        self.version
    }

    /// Sets the language version being parsed.
    pub(crate) fn set_version(&mut self, version: SupportedVersion) {
        self.version = version;
    }

    /// Gets the span of the most recently consumed token.
    pub(crate) fn last_span(&self) -> Span {
        self.last_span
    }

    /// Gets the source text of the given span.
    pub(crate) fn text(&self, span: Span) -> &'a str {
        &self.source.text()[span.offset()..span.end()]
    }

    /// Pulls the next non-trivia token from the lexer.
    ///
    /// Comments are recorded as they are encountered.
    fn advance(&mut self) -> Result<Option<(Token, Span)>, Diagnostic> {
        let Self {
            lexer, comments, ..
        } = self;
        let lexer = lexer.as_mut().expect("lexer should be present");
        loop {
            match lexer.next() {
                Some(Ok(Token::Whitespace)) => continue,
                Some(Ok(Token::Comment)) => {
                    comments.push(lexer.span().into());
                    continue;
                }
                Some(Ok(token)) => return Ok(Some((token, lexer.span().into()))),
                Some(Err(_)) => return Err(unexpected_character(lexer.span().into())),
                None => return Ok(None),
            }
        }
    }

    /// Consumes and returns the next token.
    pub(crate) fn next(&mut self) -> Result<Option<(Token, Span)>, Diagnostic> {
        let next = match self.peeked.pop_front() {
            Some(next) => Some(next),
            None => self.advance()?,
        };

        if let Some((_, span)) = next {
            self.last_span = span;
        }

        Ok(next)
    }

    /// Peeks at the next token without consuming it.
    pub(crate) fn peek(&mut self) -> Result<Option<(Token, Span)>, Diagnostic> {
        if self.peeked.is_empty() {
            if let Some(next) = self.advance()? {
                self.peeked.push_back(next);
            }
        }

        Ok(self.peeked.front().copied())
    }

    /// Peeks at the token following the next token without consuming it.
    pub(crate) fn peek2(&mut self) -> Result<Option<(Token, Span)>, Diagnostic> {
        self.peek()?;
        if self.peeked.len() < 2 {
            if let Some(next) = self.advance()? {
                self.peeked.push_back(next);
            }
        }

        Ok(self.peeked.get(1).copied())
    }

    /// Consumes the next token if it is the given token.
    pub(crate) fn consume_if(&mut self, token: Token) -> Result<Option<Span>, Diagnostic> {
        match self.peek()? {
            Some((t, _)) if t == token => {
                let (_, span) = self.next()?.expect("token was peeked");
                Ok(Some(span))
            }
            _ => Ok(None),
        }
    }

    /// Consumes the next token, requiring it to be the given token.
    pub(crate) fn expect(&mut self, token: Token) -> Result<Span, Diagnostic> {
        match self.next()? {
            Some((t, span)) if t == token => Ok(span),
            Some((t, span)) => Err(Diagnostic::error(
                span,
                format!(
                    "expected {expected}, but found {found}",
                    expected = token.describe(),
                    found = t.describe()
                ),
            )),
            None => Err(self.unexpected_eof(token.describe())),
        }
    }

    /// Creates an "expected X" diagnostic for the next token.
    pub(crate) fn expected(&mut self, expected: &str) -> Diagnostic {
        match self.peek() {
            Ok(Some((t, span))) => Diagnostic::error(
                span,
                format!(
                    "expected {expected}, but found {found}",
                    found = t.describe()
                ),
            ),
            Ok(None) => self.unexpected_eof(expected),
            Err(e) => e,
        }
    }

    /// Creates an "unexpected end of document" diagnostic.
    pub(crate) fn unexpected_eof(&self, expected: &str) -> Diagnostic {
        Diagnostic::error(
            Span::new(self.source.text().len(), 0),
            format!("expected {expected}, but reached the end of the document"),
        )
    }

    /// Consumes the remainder of the current line, returning its text.
    ///
    /// Used for the `version` statement, whose value is not otherwise a
    /// single token. Stops before a `#` comment.
    pub(crate) fn take_rest_of_line(&mut self) -> (String, Span) {
        debug_assert!(self.peeked.is_empty(), "lookahead should be empty");
        let lexer = self.lexer.as_mut().expect("lexer should be present");
        let remainder = lexer.remainder();
        let len = remainder
            .find(['\n', '#'])
            .unwrap_or(remainder.len());
        let start = lexer.span().end;
        lexer.bump(len);
        let text = remainder[..len].trim();
        let offset = remainder[..len]
            .find(text)
            .unwrap_or(0);
        (text.to_string(), Span::new(start + offset, text.len()))
    }

    /// Resolves an escape sequence to its character.
    ///
    /// Returns `None` for unsupported sequences.
    fn resolve_escape(sequence: &str) -> Option<char> {
        match sequence {
            r"\\" => Some('\\'),
            r"\n" => Some('\n'),
            r"\t" => Some('\t'),
            r"\'" => Some('\''),
            "\\\"" => Some('"'),
            r"\~" => Some('~'),
            r"\$" => Some('$'),
            _ => None,
        }
    }

    /// Flushes accumulated text into a parts vector.
    fn flush_text(parts: &mut Vec<StringPart>, text: &mut String, start: &mut usize, end: usize) {
        if !text.is_empty() {
            parts.push(StringPart::Text {
                value: std::mem::take(text),
                span: Span::new(*start, end - *start),
            });
        }
        *start = usize::MAX;
    }

    /// Parses a string literal.
    ///
    /// The opening quote token must have just been consumed; its kind and
    /// span are passed in.
    pub(crate) fn string_literal(
        &mut self,
        quote: Token,
        open: Span,
    ) -> Result<StringLiteral, Diagnostic> {
        debug_assert!(self.peeked.is_empty(), "lookahead should be empty");
        match quote {
            Token::SingleQuote => lex_string!(self, SQStringToken, open),
            Token::DoubleQuote => lex_string!(self, DQStringToken, open),
            _ => unreachable!("token is not a quote"),
        }
    }

    /// Parses a string literal after requiring an opening quote.
    pub(crate) fn expect_string_literal(&mut self) -> Result<StringLiteral, Diagnostic> {
        match self.next()? {
            Some((t @ (Token::SingleQuote | Token::DoubleQuote), span)) => {
                self.string_literal(t, span)
            }
            _ => Err(Diagnostic::error(self.last_span, "expected string literal")),
        }
    }

    /// Parses the interior of a placeholder.
    ///
    /// The lexer is in the main token set; the opening `~{` or `${` has been
    /// consumed. Consumes through the closing `}`.
    fn placeholder(&mut self, open: Span) -> Result<Placeholder, Diagnostic> {
        let mut options = Vec::new();
        loop {
            // Only look past an option-like name: peeking further would pull
            // string content into the main token set when the placeholder
            // body starts with a quote.
            let first = match self.peek()? {
                Some(first @ (Token::Ident, span))
                    if matches!(self.text(span), "sep" | "default") =>
                {
                    first
                }
                Some(first @ (Token::TrueKeyword | Token::FalseKeyword, _)) => first,
                _ => break,
            };

            if !matches!(self.peek2()?, Some((Token::Assignment, _))) {
                break;
            }

            let (token, span) = first;
            self.next()?;
            self.next()?;
            let option = match token {
                Token::Ident if self.text(span) == "sep" => {
                    let value = self.expect_string_literal()?;
                    let span = span.merge(value.span);
                    PlaceholderOption::Sep { value, span }
                }
                Token::Ident => {
                    let value = self.expr()?;
                    let span = span.merge(value.span);
                    PlaceholderOption::Default { value, span }
                }
                Token::TrueKeyword => {
                    let value = self.expect_string_literal()?;
                    let span = span.merge(value.span);
                    PlaceholderOption::True { value, span }
                }
                Token::FalseKeyword => {
                    let value = self.expect_string_literal()?;
                    let span = span.merge(value.span);
                    PlaceholderOption::False { value, span }
                }
                _ => unreachable!("token is an option name"),
            };

            options.push(option);
        }

        let expr = self.expr()?;
        let close = self.expect(Token::CloseBrace)?;
        Ok(Placeholder {
            options,
            expr,
            span: open.merge(close),
        })
    }

    /// Parses a command section.
    ///
    /// The `command` keyword must have just been consumed; its span is
    /// passed in.
    pub(crate) fn command_section(&mut self, start: Span) -> Result<CommandSection, Diagnostic> {
        match self.next()? {
            Some((Token::OpenBrace, open)) => self.brace_command(start, open),
            Some((Token::OpenHeredoc, open)) => self.heredoc_command(start, open),
            _ => Err(Diagnostic::error(
                self.last_span,
                "expected `{` or `<<<` to open the command section",
            )),
        }
    }

    /// Parses the body of a brace-delimited command section.
    fn brace_command(&mut self, start: Span, open: Span) -> Result<CommandSection, Diagnostic> {
        debug_assert!(self.peeked.is_empty(), "lookahead should be empty");
        let mut parts: Vec<StringPart> = Vec::new();
        let mut text = String::new();
        let mut text_start = usize::MAX;
        let mut depth = 0usize;
        let mut lexer = self
            .lexer
            .take()
            .expect("lexer should be present")
            .morph::<BraceCommandToken>();

        loop {
            let token = lexer.next();
            let span = Span::from(lexer.span());
            match token {
                Some(Ok(BraceCommandToken::Text))
                | Some(Ok(BraceCommandToken::Escape))
                | Some(Ok(BraceCommandToken::DollarSign))
                | Some(Ok(BraceCommandToken::Tilde)) => {
                    text_start = text_start.min(span.offset());
                    text.push_str(lexer.slice());
                }
                Some(Ok(BraceCommandToken::OpenBrace)) => {
                    depth += 1;
                    text_start = text_start.min(span.offset());
                    text.push_str(lexer.slice());
                }
                Some(Ok(BraceCommandToken::CloseBrace)) => {
                    if depth == 0 {
                        Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                        self.lexer = Some(lexer.morph());
                        self.last_span = span;
                        return Ok(CommandSection {
                            parts,
                            heredoc: false,
                            span: start.merge(span),
                        });
                    }

                    depth -= 1;
                    text_start = text_start.min(span.offset());
                    text.push_str(lexer.slice());
                }
                Some(Ok(BraceCommandToken::PlaceholderStart)) => {
                    if self.version.has_tilde_placeholders() {
                        Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                        self.lexer = Some(lexer.morph());
                        let placeholder = self.placeholder(span)?;
                        parts.push(StringPart::Placeholder(placeholder));
                        lexer = self
                            .lexer
                            .take()
                            .expect("lexer should be present")
                            .morph();
                    } else {
                        // The `{` is part of the text and must still nest.
                        depth += 1;
                        text_start = text_start.min(span.offset());
                        text.push_str(lexer.slice());
                    }
                }
                Some(Ok(BraceCommandToken::DollarPlaceholderStart)) => {
                    if self.version.has_dollar_placeholders() {
                        Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                        self.lexer = Some(lexer.morph());
                        let placeholder = self.placeholder(span)?;
                        parts.push(StringPart::Placeholder(placeholder));
                        lexer = self
                            .lexer
                            .take()
                            .expect("lexer should be present")
                            .morph();
                    } else {
                        // The `{` is part of the text and must still nest.
                        depth += 1;
                        text_start = text_start.min(span.offset());
                        text.push_str(lexer.slice());
                    }
                }
                Some(Err(_)) | None => {
                    self.lexer = Some(lexer.morph());
                    return Err(unterminated_command(open));
                }
            }
        }
    }

    /// Parses the body of a heredoc command section.
    fn heredoc_command(&mut self, start: Span, open: Span) -> Result<CommandSection, Diagnostic> {
        debug_assert!(self.peeked.is_empty(), "lookahead should be empty");
        let mut parts: Vec<StringPart> = Vec::new();
        let mut text = String::new();
        let mut text_start = usize::MAX;
        let mut lexer = self
            .lexer
            .take()
            .expect("lexer should be present")
            .morph::<HeredocCommandToken>();

        loop {
            let token = lexer.next();
            let span = Span::from(lexer.span());
            match token {
                Some(Ok(HeredocCommandToken::Text))
                | Some(Ok(HeredocCommandToken::Escape))
                | Some(Ok(HeredocCommandToken::DollarSign))
                | Some(Ok(HeredocCommandToken::Tilde))
                | Some(Ok(HeredocCommandToken::Angle)) => {
                    text_start = text_start.min(span.offset());
                    text.push_str(lexer.slice());
                }
                Some(Ok(HeredocCommandToken::PlaceholderStart)) => {
                    if self.version.has_tilde_placeholders() {
                        Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                        self.lexer = Some(lexer.morph());
                        let placeholder = self.placeholder(span)?;
                        parts.push(StringPart::Placeholder(placeholder));
                        lexer = self
                            .lexer
                            .take()
                            .expect("lexer should be present")
                            .morph();
                    } else {
                        text_start = text_start.min(span.offset());
                        text.push_str(lexer.slice());
                    }
                }
                Some(Ok(HeredocCommandToken::DollarPlaceholderStart)) => {
                    // Heredoc commands only interpolate `${}` in draft-2.
                    if self.version == SupportedVersion::Draft2 {
                        Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                        self.lexer = Some(lexer.morph());
                        let placeholder = self.placeholder(span)?;
                        parts.push(StringPart::Placeholder(placeholder));
                        lexer = self
                            .lexer
                            .take()
                            .expect("lexer should be present")
                            .morph();
                    } else {
                        text_start = text_start.min(span.offset());
                        text.push_str(lexer.slice());
                    }
                }
                Some(Ok(HeredocCommandToken::End)) => {
                    Self::flush_text(&mut parts, &mut text, &mut text_start, span.offset());
                    self.lexer = Some(lexer.morph());
                    self.last_span = span;
                    return Ok(CommandSection {
                        parts,
                        heredoc: true,
                        span: start.merge(span),
                    });
                }
                Some(Err(_)) | None => {
                    self.lexer = Some(lexer.morph());
                    return Err(unterminated_command(open));
                }
            }
        }
    }

    /// Finishes parsing, producing the comment map.
    pub(crate) fn finish(self) -> CommentMap {
        let mut map = CommentMap::new();
        let text = self.source.text();
        for span in self.comments {
            let preceding = &text[..span.offset()];
            let line_start = preceding.rfind('\n').map(|i| i + 1).unwrap_or(0);
            let placement = if preceding[line_start..]
                .chars()
                .all(|c| c == ' ' || c == '\t')
            {
                CommentPlacement::OwnLine
            } else {
                CommentPlacement::EndOfLine
            };
            map.insert(
                self.source.line_of(span.offset()),
                Comment::new(&text[span.offset()..span.end()], placement, span),
            );
        }
        map
    }
}
