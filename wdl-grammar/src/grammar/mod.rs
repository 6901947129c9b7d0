//! The version-dispatched document grammar.
//!
//! [`Document::parse`] reads the `version` directive (its absence selects
//! `draft-2`) and dispatches to the matching version module. Productions
//! shared between versions live here; version-specific productions live in
//! [`draft2`], [`v1`], and [`v2`].

use std::str::FromStr;

use crate::Diagnostic;
use crate::Span;
use crate::SupportedVersion;
use crate::comments::CommentMap;
use crate::concrete::BoundDecl;
use crate::concrete::CallInput;
use crate::concrete::CallStatement;
use crate::concrete::ConditionalStatement;
use crate::concrete::Declaration;
use crate::concrete::HintsSection;
use crate::concrete::Ident;
use crate::concrete::ImportAlias;
use crate::concrete::ImportStatement;
use crate::concrete::InputSection;
use crate::concrete::MetadataItem;
use crate::concrete::MetadataSection;
use crate::concrete::OutputSection;
use crate::concrete::RuntimeItem;
use crate::concrete::RuntimeSection;
use crate::concrete::ScatterStatement;
use crate::concrete::StructDefinition;
use crate::concrete::Task;
use crate::concrete::UnboundDecl;
use crate::concrete::VersionStatement;
use crate::concrete::Workflow;
use crate::concrete::WorkflowElement;
use crate::lexer::Token;
use crate::parser::Parser;
use crate::source::Source;

pub mod draft2;
mod expr;
pub mod v1;
pub mod v2;

/// Creates a "duplicate section" diagnostic.
fn duplicate_section(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("duplicate `{name}` section"))
}

/// A parsed document of any supported version.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// The document is a `draft-2` document.
    Draft2(draft2::Document),
    /// The document is a 1.0 document.
    V1(v1::Document),
    /// The document is a 2.0 (`development`) document.
    V2(v2::Document),
}

impl Document {
    /// Parses a document from the given source.
    ///
    /// The version directive determines which version's grammar parses the
    /// document; a document without a directive is parsed as `draft-2`.
    pub fn parse(source: &Source) -> Result<Self, Diagnostic> {
        let mut parser = Parser::new(source);
        match parser.peek()? {
            Some((Token::VersionKeyword, _)) => {
                let statement = parser.version_statement()?;
                match SupportedVersion::from_str(&statement.version) {
                    Ok(SupportedVersion::Draft2) => {
                        draft2::document(parser, Some(statement)).map(Self::Draft2)
                    }
                    Ok(SupportedVersion::V1) => {
                        parser.set_version(SupportedVersion::V1);
                        v1::document(parser, statement).map(Self::V1)
                    }
                    Ok(SupportedVersion::V2) => {
                        parser.set_version(SupportedVersion::V2);
                        v2::document(parser, statement).map(Self::V2)
                    }
                    Err(_) => Err(Diagnostic::error(
                        statement.span,
                        format!(
                            "unsupported WDL version `{version}`",
                            version = statement.version
                        ),
                    )),
                }
            }
            _ => draft2::document(parser, None).map(Self::Draft2),
        }
    }

    /// Gets the version of the document.
    pub fn version(&self) -> SupportedVersion {
        match self {
            Self::Draft2(_) => SupportedVersion::Draft2,
            Self::V1(_) => SupportedVersion::V1,
            Self::V2(_) => SupportedVersion::V2,
        }
    }

    /// Gets the comment map of the document.
    pub fn comments(&self) -> &CommentMap {
        match self {
            Self::Draft2(d) => &d.comments,
            Self::V1(d) => &d.comments,
            Self::V2(d) => &d.comments,
        }
    }
}

/// Parses a standalone expression from the given source.
///
/// Useful for tools that evaluate user-supplied expressions outside of a
/// document.
pub fn parse_expr(
    source: &Source,
    version: SupportedVersion,
) -> Result<crate::concrete::Expr, Diagnostic> {
    let mut parser = Parser::new(source);
    parser.set_version(version);
    let expr = parser.expr()?;
    if parser.peek()?.is_some() {
        return Err(parser.expected("end of expression"));
    }
    Ok(expr)
}

impl<'a> Parser<'a> {
    /// Parses the `version` statement.
    pub(crate) fn version_statement(&mut self) -> Result<VersionStatement, Diagnostic> {
        let keyword = self.expect(Token::VersionKeyword)?;
        let (version, span) = self.take_rest_of_line();
        if version.is_empty() {
            return Err(Diagnostic::error(
                keyword,
                "expected a version after the `version` keyword",
            ));
        }

        Ok(VersionStatement {
            version,
            span: keyword.merge(span),
        })
    }

    /// Parses a name, allowing keywords to be used as names.
    ///
    /// Metadata keys, runtime keys, and call inputs commonly collide with
    /// keywords (e.g. `meta { version: "1.1" }`), so those productions accept
    /// any word-like token.
    fn name_like(&mut self) -> Result<Ident, Diagnostic> {
        match self.peek()? {
            Some((t, span)) if t == Token::Ident || t.is_keyword() => {
                self.next()?;
                Ok(Ident::new(self.text(span), span))
            }
            _ => Err(self.expected("name")),
        }
    }

    /// Parses an import statement.
    ///
    /// Struct aliases (`alias A as B`) are only recognized when
    /// `allow_aliases` is true.
    pub(crate) fn import_statement(
        &mut self,
        start: Span,
        allow_aliases: bool,
    ) -> Result<ImportStatement, Diagnostic> {
        let uri = self.expect_string_literal()?;
        if uri.as_text().is_none() {
            return Err(Diagnostic::error(
                uri.span,
                "import URIs cannot contain placeholders",
            ));
        }

        let namespace = match self.consume_if(Token::AsKeyword)? {
            Some(_) => Some(self.ident()?),
            None => None,
        };

        let mut aliases = Vec::new();
        if allow_aliases {
            while self.consume_if(Token::AliasKeyword)?.is_some() {
                let source = self.ident()?;
                self.expect(Token::AsKeyword)?;
                let target = self.ident()?;
                aliases.push(ImportAlias { source, target });
            }
        }

        Ok(ImportStatement {
            uri,
            namespace,
            aliases,
            span: start.merge(self.last_span()),
        })
    }

    /// Parses a struct definition.
    pub(crate) fn struct_definition(&mut self, start: Span) -> Result<StructDefinition, Diagnostic> {
        let name = self.ident()?;
        self.expect(Token::OpenBrace)?;
        let mut members = Vec::new();
        while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
            let ty = self.type_()?;
            let member = self.ident()?;
            let span = ty.span().merge(member.span);
            members.push(UnboundDecl {
                ty,
                name: member,
                span,
            });
        }
        let close = self.expect(Token::CloseBrace)?;
        Ok(StructDefinition {
            name,
            members,
            span: start.merge(close),
        })
    }

    /// Parses a declaration.
    ///
    /// Unbound declarations are only permitted where `allow_unbound` is true
    /// (input sections and `draft-2` section-less inputs).
    pub(crate) fn declaration(&mut self, allow_unbound: bool) -> Result<Declaration, Diagnostic> {
        let ty = self.type_()?;
        let name = self.ident()?;
        if self.consume_if(Token::Assignment)?.is_some() {
            let expr = self.expr()?;
            let span = ty.span().merge(expr.span);
            return Ok(Declaration::Bound(BoundDecl {
                ty,
                name,
                expr,
                span,
            }));
        }

        if !allow_unbound {
            return Err(Diagnostic::error(
                name.span,
                format!(
                    "declaration of `{name}` must be given a value",
                    name = name.as_str()
                ),
            ));
        }

        let span = ty.span().merge(name.span);
        Ok(Declaration::Unbound(UnboundDecl { ty, name, span }))
    }

    /// Parses an `input` section.
    pub(crate) fn input_section(&mut self, start: Span) -> Result<InputSection, Diagnostic> {
        self.expect(Token::OpenBrace)?;
        let mut declarations = Vec::new();
        while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
            declarations.push(self.declaration(true)?);
        }
        let close = self.expect(Token::CloseBrace)?;
        Ok(InputSection {
            declarations,
            span: start.merge(close),
        })
    }

    /// Parses an `output` section.
    pub(crate) fn output_section(&mut self, start: Span) -> Result<OutputSection, Diagnostic> {
        self.expect(Token::OpenBrace)?;
        let mut declarations = Vec::new();
        while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
            match self.declaration(false)? {
                Declaration::Bound(decl) => declarations.push(decl),
                Declaration::Unbound(_) => unreachable!("declaration must be bound"),
            }
        }
        let close = self.expect(Token::CloseBrace)?;
        Ok(OutputSection {
            declarations,
            span: start.merge(close),
        })
    }

    /// Parses a `runtime` section.
    pub(crate) fn runtime_section(&mut self, start: Span) -> Result<RuntimeSection, Diagnostic> {
        let items = self.runtime_items()?;
        Ok(RuntimeSection {
            items,
            span: start.merge(self.last_span()),
        })
    }

    /// Parses a `hints` section.
    pub(crate) fn hints_section(&mut self, start: Span) -> Result<HintsSection, Diagnostic> {
        let items = self.runtime_items()?;
        Ok(HintsSection {
            items,
            span: start.merge(self.last_span()),
        })
    }

    /// Parses the brace-delimited `name: expr` items of a `runtime` or
    /// `hints` section.
    fn runtime_items(&mut self) -> Result<Vec<RuntimeItem>, Diagnostic> {
        self.expect(Token::OpenBrace)?;
        let mut items = Vec::new();
        while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
            let name = self.name_like()?;
            self.expect(Token::Colon)?;
            let expr = self.expr()?;
            items.push(RuntimeItem { name, expr });
        }
        self.expect(Token::CloseBrace)?;
        Ok(items)
    }

    /// Parses a `meta` or `parameter_meta` section.
    pub(crate) fn metadata_section(&mut self, start: Span) -> Result<MetadataSection, Diagnostic> {
        self.expect(Token::OpenBrace)?;
        let mut items = Vec::new();
        while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
            let name = self.name_like()?;
            self.expect(Token::Colon)?;
            let value = self.expr()?;
            items.push(MetadataItem { name, value });
        }
        let close = self.expect(Token::CloseBrace)?;
        Ok(MetadataSection {
            items,
            span: start.merge(close),
        })
    }

    /// Parses a task definition.
    pub(crate) fn task(&mut self, start: Span) -> Result<Task, Diagnostic> {
        let name = self.ident()?;
        self.expect(Token::OpenBrace)?;

        let mut input = None;
        let mut declarations = Vec::new();
        let mut command = None;
        let mut output = None;
        let mut runtime = None;
        let mut hints = None;
        let mut meta = None;
        let mut parameter_meta = None;

        let close = loop {
            match self.peek()? {
                Some((Token::CloseBrace, _)) => {
                    let (_, span) = self.next()?.expect("token was peeked");
                    break span;
                }
                Some((Token::InputKeyword, span)) if self.version().has_input_section() => {
                    self.next()?;
                    if input.is_some() {
                        return Err(duplicate_section("input", span));
                    }
                    input = Some(self.input_section(span)?);
                }
                Some((Token::CommandKeyword, span)) => {
                    self.next()?;
                    if command.is_some() {
                        return Err(duplicate_section("command", span));
                    }
                    command = Some(self.command_section(span)?);
                }
                Some((Token::OutputKeyword, span)) => {
                    self.next()?;
                    if output.is_some() {
                        return Err(duplicate_section("output", span));
                    }
                    output = Some(self.output_section(span)?);
                }
                Some((Token::RuntimeKeyword, span)) => {
                    self.next()?;
                    if runtime.is_some() {
                        return Err(duplicate_section("runtime", span));
                    }
                    runtime = Some(self.runtime_section(span)?);
                }
                Some((Token::HintsKeyword, span))
                    if self.version() >= SupportedVersion::V2 =>
                {
                    self.next()?;
                    if hints.is_some() {
                        return Err(duplicate_section("hints", span));
                    }
                    hints = Some(self.hints_section(span)?);
                }
                Some((Token::MetaKeyword, span)) => {
                    self.next()?;
                    if meta.is_some() {
                        return Err(duplicate_section("meta", span));
                    }
                    meta = Some(self.metadata_section(span)?);
                }
                Some((Token::ParameterMetaKeyword, span)) => {
                    self.next()?;
                    if parameter_meta.is_some() {
                        return Err(duplicate_section("parameter_meta", span));
                    }
                    parameter_meta = Some(self.metadata_section(span)?);
                }
                Some(_) => {
                    // Declarations; unbound declarations are the section-less
                    // inputs of draft-2 tasks.
                    declarations.push(self.declaration(!self.version().has_input_section())?);
                }
                None => return Err(self.unexpected_eof("`}` to close the task")),
            }
        };

        let command = command.ok_or_else(|| {
            Diagnostic::error(
                name.span,
                format!(
                    "task `{name}` is missing a command section",
                    name = name.as_str()
                ),
            )
        })?;

        Ok(Task {
            name,
            input,
            declarations,
            command,
            output,
            runtime,
            hints,
            meta,
            parameter_meta,
            span: start.merge(close),
        })
    }

    /// Parses a call statement.
    pub(crate) fn call_statement(&mut self, start: Span) -> Result<CallStatement, Diagnostic> {
        let mut target = vec![self.ident()?];
        while self.consume_if(Token::Dot)?.is_some() {
            target.push(self.ident()?);
        }

        let alias = match self.consume_if(Token::AsKeyword)? {
            Some(_) => Some(self.ident()?),
            None => None,
        };

        let mut inputs = Vec::new();
        if self.consume_if(Token::OpenBrace)?.is_some() {
            if self.consume_if(Token::InputKeyword)?.is_some() {
                self.expect(Token::Colon)?;
            }

            while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
                let name = self.name_like()?;
                let expr = match self.consume_if(Token::Assignment)? {
                    Some(_) => Some(self.expr()?),
                    None => None,
                };
                inputs.push(CallInput { name, expr });
                if self.consume_if(Token::Comma)?.is_none() {
                    break;
                }
            }
            self.expect(Token::CloseBrace)?;
        }

        Ok(CallStatement {
            target,
            alias,
            inputs,
            span: start.merge(self.last_span()),
        })
    }

    /// Parses a scatter statement.
    pub(crate) fn scatter_statement(&mut self, start: Span) -> Result<ScatterStatement, Diagnostic> {
        self.expect(Token::OpenParen)?;
        let variable = self.ident()?;
        self.expect(Token::InKeyword)?;
        let expr = self.expr()?;
        self.expect(Token::CloseParen)?;
        let body = self.workflow_body()?;
        Ok(ScatterStatement {
            variable,
            expr,
            body,
            span: start.merge(self.last_span()),
        })
    }

    /// Parses a conditional statement.
    pub(crate) fn conditional_statement(
        &mut self,
        start: Span,
    ) -> Result<ConditionalStatement, Diagnostic> {
        self.expect(Token::OpenParen)?;
        let expr = self.expr()?;
        self.expect(Token::CloseParen)?;
        let body = self.workflow_body()?;
        Ok(ConditionalStatement {
            expr,
            body,
            span: start.merge(self.last_span()),
        })
    }

    /// Parses a brace-delimited workflow statement body.
    fn workflow_body(&mut self) -> Result<Vec<WorkflowElement>, Diagnostic> {
        self.expect(Token::OpenBrace)?;
        let mut body = Vec::new();
        while !matches!(self.peek()?, Some((Token::CloseBrace, _))) {
            body.push(self.workflow_element(false)?);
        }
        self.expect(Token::CloseBrace)?;
        Ok(body)
    }

    /// Parses a single workflow body element.
    ///
    /// Unbound declarations are only permitted at the top level of `draft-2`
    /// workflows, where they are the section-less workflow inputs.
    fn workflow_element(&mut self, allow_unbound: bool) -> Result<WorkflowElement, Diagnostic> {
        match self.peek()? {
            Some((Token::CallKeyword, span)) => {
                self.next()?;
                Ok(WorkflowElement::Call(self.call_statement(span)?))
            }
            Some((Token::ScatterKeyword, span)) => {
                self.next()?;
                Ok(WorkflowElement::Scatter(self.scatter_statement(span)?))
            }
            Some((Token::IfKeyword, span)) => {
                self.next()?;
                Ok(WorkflowElement::Conditional(
                    self.conditional_statement(span)?,
                ))
            }
            Some(_) => Ok(WorkflowElement::Decl(self.declaration(allow_unbound)?)),
            None => Err(self.unexpected_eof("workflow statement")),
        }
    }

    /// Parses a workflow definition.
    pub(crate) fn workflow(&mut self, start: Span) -> Result<Workflow, Diagnostic> {
        let name = self.ident()?;
        self.expect(Token::OpenBrace)?;

        let mut input = None;
        let mut body = Vec::new();
        let mut output = None;
        let mut meta = None;
        let mut parameter_meta = None;

        let close = loop {
            match self.peek()? {
                Some((Token::CloseBrace, _)) => {
                    let (_, span) = self.next()?.expect("token was peeked");
                    break span;
                }
                Some((Token::InputKeyword, span)) if self.version().has_input_section() => {
                    self.next()?;
                    if input.is_some() {
                        return Err(duplicate_section("input", span));
                    }
                    input = Some(self.input_section(span)?);
                }
                Some((Token::OutputKeyword, span)) => {
                    self.next()?;
                    if output.is_some() {
                        return Err(duplicate_section("output", span));
                    }
                    output = Some(self.output_section(span)?);
                }
                Some((Token::MetaKeyword, span)) => {
                    self.next()?;
                    if meta.is_some() {
                        return Err(duplicate_section("meta", span));
                    }
                    meta = Some(self.metadata_section(span)?);
                }
                Some((Token::ParameterMetaKeyword, span)) => {
                    self.next()?;
                    if parameter_meta.is_some() {
                        return Err(duplicate_section("parameter_meta", span));
                    }
                    parameter_meta = Some(self.metadata_section(span)?);
                }
                Some(_) => {
                    body.push(
                        self.workflow_element(!self.version().has_input_section())?,
                    );
                }
                None => return Err(self.unexpected_eof("`}` to close the workflow")),
            }
        };

        Ok(Workflow {
            name,
            input,
            body,
            output,
            meta,
            parameter_meta,
            span: start.merge(close),
        })
    }
}
