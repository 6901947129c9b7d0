//! Type inference over the AST.
//!
//! Inference walks the AST and produces the typed AST along with the
//! input/output symbol tables used to check calls. Type errors accumulate
//! into a diagnostic vector; the offending node is annotated as `Any` so
//! that inference can continue and surface further diagnostics in the same
//! pass. Only structural errors (unresolvable structs) abort.

use std::sync::Arc;

use indexmap::IndexMap;
use wdl_ast as ast;
use wdl_ast::BinaryOp;
use wdl_ast::Diagnostic;
use wdl_ast::Span;
use wdl_ast::SupportedVersion;
use wdl_ast::UnaryOp;

use crate::CheckOptions;
use crate::diagnostics::*;
use crate::document::Callable;
use crate::document::Document;
use crate::document::Input;
use crate::scope::Name;
use crate::scope::NameContext;
use crate::scope::ScopeStack;
use crate::stdlib::FunctionBindError;
use crate::stdlib::STDLIB;
use crate::typed::TypedCall;
use crate::typed::TypedCommandPart;
use crate::typed::TypedConditional;
use crate::typed::TypedDeclaration;
use crate::typed::TypedDocument;
use crate::typed::TypedExpr;
use crate::typed::TypedExprKind;
use crate::typed::TypedScatter;
use crate::typed::TypedTask;
use crate::typed::TypedWorkflow;
use crate::typed::TypedWorkflowElement;
use crate::types::CallType;
use crate::types::Coercible;
use crate::types::PrimitiveType;
use crate::types::StructType;
use crate::types::Type;
use crate::types::common_type;

/// The output of checking a document.
pub(crate) struct Checked {
    /// The typed document.
    pub typed: TypedDocument,
    /// The input/output symbols of the document's tasks.
    pub tasks: IndexMap<String, Arc<Callable>>,
    /// The input/output symbol of the document's workflow.
    pub workflow: Option<Arc<Callable>>,
    /// The resolved struct types of the document.
    pub structs: IndexMap<String, Arc<StructType>>,
}

/// Checks a document, producing the typed AST and symbol tables.
///
/// Returns `Err` only for fatal structural errors; accumulated type errors
/// are appended to `diagnostics` either way.
pub(crate) fn check(
    document: &ast::Document,
    namespaces: &IndexMap<String, Arc<Document>>,
    imported_structs: IndexMap<String, (Arc<StructType>, Span)>,
    options: CheckOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Checked, ()> {
    let structs = resolve_structs(document, imported_structs, diagnostics)?;

    let mut checker = Checker {
        version: document.version,
        structs: &structs,
        tasks: IndexMap::new(),
        namespaces,
        options,
        in_output: false,
        diagnostics,
    };

    let mut tasks = Vec::new();
    for task in &document.tasks {
        let (typed, callable) = checker.check_task(task);
        if checker.tasks.contains_key(&typed.name) {
            checker.diagnostics.push(name_already_defined(
                &typed.name,
                task.name.span,
                task.name.span,
            ));
        } else {
            checker.tasks.insert(typed.name.clone(), callable);
        }
        tasks.push(typed);
    }

    let mut workflow_callable = None;
    let workflow = document.workflow.as_ref().map(|w| {
        let (typed, callable) = checker.check_workflow(w);
        workflow_callable = Some(callable);
        typed
    });

    let tasks_table = std::mem::take(&mut checker.tasks);
    Ok(Checked {
        typed: TypedDocument {
            version: document.version,
            structs: structs.clone(),
            tasks,
            workflow,
        },
        tasks: tasks_table,
        workflow: workflow_callable,
        structs,
    })
}

/// Checks a standalone expression against an environment of bound names.
pub(crate) fn check_standalone_expr(
    expr: &ast::Expr,
    version: SupportedVersion,
    structs: &IndexMap<String, Arc<StructType>>,
    env: &[(String, Type)],
    diagnostics: &mut Vec<Diagnostic>,
) -> TypedExpr {
    let namespaces = IndexMap::new();
    let mut checker = Checker {
        version,
        structs,
        tasks: IndexMap::new(),
        namespaces: &namespaces,
        options: CheckOptions::default(),
        in_output: false,
        diagnostics,
    };

    let mut scopes = ScopeStack::new();
    for (name, ty) in env {
        scopes.current_mut().insert(
            name,
            Name::new(ty.clone(), Span::new(0, 0), NameContext::Input),
        );
    }

    checker.evaluate_expr(&scopes, expr)
}

/// The resolution state of a struct during environment construction.
enum StructState<'a> {
    /// The struct has not been resolved yet.
    Pending(&'a ast::StructDefinition),
    /// The struct is currently being resolved; reaching this state again is
    /// a recursion error.
    InProgress,
    /// The struct has been resolved.
    Resolved(Arc<StructType>),
}

/// Resolves the struct environment of a document.
///
/// Local definitions may reference each other (and imported structs) in any
/// order; recursion is a fatal error, as is a conflicting redefinition of an
/// imported struct.
fn resolve_structs(
    document: &ast::Document,
    imported: IndexMap<String, (Arc<StructType>, Span)>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<IndexMap<String, Arc<StructType>>, ()> {
    let mut states: IndexMap<&str, StructState<'_>> = IndexMap::new();
    for s in &document.structs {
        if states.contains_key(s.name.as_str()) {
            let first = document
                .structs
                .iter()
                .find(|other| other.name.as_str() == s.name.as_str())
                .expect("struct should exist")
                .name
                .span;
            diagnostics.push(name_already_defined(s.name.as_str(), s.name.span, first));
            return Err(());
        }
        states.insert(s.name.as_str(), StructState::Pending(s));
    }

    /// Resolves a single struct by name.
    fn resolve(
        name: &str,
        span: Span,
        states: &mut IndexMap<&str, StructState<'_>>,
        imported: &IndexMap<String, (Arc<StructType>, Span)>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Option<Arc<StructType>>, ()> {
        let definition = match states.get_mut(name) {
            Some(StructState::Resolved(ty)) => return Ok(Some(ty.clone())),
            Some(state @ StructState::Pending(_)) => {
                let StructState::Pending(definition) =
                    std::mem::replace(state, StructState::InProgress)
                else {
                    unreachable!("state was pending");
                };
                definition
            }
            Some(StructState::InProgress) => {
                diagnostics.push(recursive_struct(name, span));
                return Err(());
            }
            None => return Ok(imported.get(name).map(|(ty, _)| ty.clone())),
        };

        let mut members = Vec::new();
        for member in &definition.members {
            let ty = convert_type_with(
                &member.ty,
                &mut |n, s, diagnostics| resolve(n, s, states, imported, diagnostics),
                diagnostics,
            )?;
            members.push((member.name.text.clone(), ty));
        }

        let ty = Arc::new(StructType::new(name, members));
        *states.get_mut(name).expect("struct should exist") = StructState::Resolved(ty.clone());
        Ok(Some(ty))
    }

    let names: Vec<(String, Span)> = document
        .structs
        .iter()
        .map(|s| (s.name.text.clone(), s.name.span))
        .collect();
    let mut resolved = IndexMap::new();
    for (name, span) in &names {
        let ty = resolve(name, *span, &mut states, &imported, diagnostics)?
            .expect("local struct should resolve");
        if let Some((imported_ty, _)) = imported.get(name) {
            if !ty.is_identical(imported_ty) {
                diagnostics.push(struct_conflict(name, *span, *span));
                return Err(());
            }
        }
        resolved.insert(name.clone(), ty);
    }

    for (name, (ty, _)) in imported {
        resolved.entry(name).or_insert(ty);
    }

    Ok(resolved)
}

/// Converts a type annotation with a custom struct lookup.
///
/// The lookup returns `Err` for fatal resolution failures and `Ok(None)`
/// for unknown names, which produce a diagnostic and convert as `Any`.
fn convert_type_with(
    ty: &ast::Type,
    lookup: &mut impl FnMut(&str, Span, &mut Vec<Diagnostic>) -> Result<Option<Arc<StructType>>, ()>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Type, ()> {
    Ok(match &ty.kind {
        ast::TypeKind::Boolean => PrimitiveType::Boolean.into(),
        ast::TypeKind::Int => PrimitiveType::Integer.into(),
        ast::TypeKind::Float => PrimitiveType::Float.into(),
        ast::TypeKind::String => PrimitiveType::String.into(),
        ast::TypeKind::File => PrimitiveType::File.into(),
        ast::TypeKind::Directory => PrimitiveType::Directory.into(),
        ast::TypeKind::Object => Type::Object,
        ast::TypeKind::Named(name) => match lookup(name, ty.span, diagnostics)? {
            Some(s) => Type::Struct(s),
            None => {
                diagnostics.push(unknown_type(name, ty.span));
                Type::Any
            }
        },
        ast::TypeKind::Array { element, non_empty } => Type::Array {
            element: Box::new(convert_type_with(element, lookup, diagnostics)?),
            non_empty: *non_empty,
        },
        ast::TypeKind::Map { key, value } => Type::map(
            convert_type_with(key, lookup, diagnostics)?,
            convert_type_with(value, lookup, diagnostics)?,
        ),
        ast::TypeKind::Pair { left, right } => Type::pair(
            convert_type_with(left, lookup, diagnostics)?,
            convert_type_with(right, lookup, diagnostics)?,
        ),
        ast::TypeKind::Optional(inner) => {
            convert_type_with(inner, lookup, diagnostics)?.optional()
        }
    })
}

/// The document checker.
struct Checker<'a> {
    /// The language version being checked.
    version: SupportedVersion,
    /// The resolved struct environment.
    structs: &'a IndexMap<String, Arc<StructType>>,
    /// The callable symbols of the tasks checked so far.
    tasks: IndexMap<String, Arc<Callable>>,
    /// The imported namespaces.
    namespaces: &'a IndexMap<String, Arc<Document>>,
    /// The checking options.
    options: CheckOptions,
    /// Whether an output section is being checked.
    ///
    /// `String` to `File`/`Directory` coercions are questionable outside of
    /// output sections and carry a warning there.
    in_output: bool,
    /// The accumulated diagnostics.
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl Checker<'_> {
    /// Converts a type annotation using the document's struct environment.
    fn convert_type(&mut self, ty: &ast::Type) -> Type {
        let structs = self.structs;
        convert_type_with(
            ty,
            &mut |name, _, _| Ok(structs.get(name).cloned()),
            self.diagnostics,
        )
        .expect("lookup is infallible")
    }

    /// Binds a name in the innermost scope, enforcing the redeclaration and
    /// shadowing policies.
    fn bind_name(
        &mut self,
        scopes: &mut ScopeStack,
        name: &str,
        span: Span,
        ty: Type,
        context: NameContext,
    ) {
        if let Some(prev) = scopes.current().get(name) {
            self.diagnostics
                .push(name_already_defined(name, span, prev.span()));
            return;
        }

        if let Some(prev) = scopes.lookup(name) {
            self.diagnostics.push(name_shadows(name, span, prev.span()));
        }

        scopes
            .current_mut()
            .insert(name, Name::new(ty, span, context));
    }

    /// Coerces a typed expression to the target type, elaborating a
    /// [`TypedExprKind::Coerce`] node when the types differ.
    ///
    /// A failed coercion produces a diagnostic and returns the expression
    /// unchanged.
    fn coerce(&mut self, expr: TypedExpr, target: &Type) -> TypedExpr {
        if expr.ty == *target {
            return expr;
        }

        if expr.ty.is_coercible_to(target) {
            if !self.in_output && is_questionable_path_coercion(&expr.ty, target) {
                self.diagnostics
                    .push(questionable_path_coercion(target, expr.span));
            }
            let span = expr.span;
            return TypedExpr {
                kind: TypedExprKind::Coerce {
                    expr: Box::new(expr),
                },
                ty: target.clone(),
                span,
            };
        }

        self.diagnostics
            .push(type_mismatch(target, &expr.ty, expr.span));
        expr
    }

    /// Checks a declaration and binds its name.
    fn check_declaration(
        &mut self,
        scopes: &mut ScopeStack,
        decl: &ast::Declaration,
        context: NameContext,
    ) -> TypedDeclaration {
        let ty = self.convert_type(&decl.ty);
        let expr = decl.expr.as_ref().map(|e| {
            let typed = self.evaluate_expr(scopes, e);
            self.coerce(typed, &ty)
        });
        self.bind_name(scopes, decl.name.as_str(), decl.name.span, ty.clone(), context);
        TypedDeclaration {
            name: decl.name.text.clone(),
            ty,
            expr,
            span: decl.span,
        }
    }

    /// Checks a task, producing its typed form and callable symbol.
    fn check_task(&mut self, task: &ast::Task) -> (TypedTask, Arc<Callable>) {
        let mut scopes = ScopeStack::new();

        let inputs: Vec<_> = task
            .inputs
            .iter()
            .map(|d| self.check_declaration(&mut scopes, d, NameContext::Input))
            .collect();

        let declarations: Vec<_> = task
            .declarations
            .iter()
            .map(|d| self.check_declaration(&mut scopes, d, NameContext::Declaration))
            .collect();

        let command = task
            .command
            .iter()
            .map(|part| match part {
                ast::CommandPart::Text { value, .. } => TypedCommandPart::Text(value.clone()),
                ast::CommandPart::Expr(e) => {
                    let typed = self.evaluate_expr(&scopes, e);
                    self.check_stringifiable(&typed);
                    TypedCommandPart::Expr(typed)
                }
            })
            .collect();

        let runtime = task
            .runtime
            .iter()
            .map(|item| {
                (
                    item.name.text.clone(),
                    self.evaluate_expr(&scopes, &item.expr),
                )
            })
            .collect();

        let hints = task
            .hints
            .iter()
            .map(|item| {
                (
                    item.name.text.clone(),
                    self.evaluate_expr(&scopes, &item.expr),
                )
            })
            .collect();

        self.in_output = true;
        let outputs: Vec<_> = task
            .outputs
            .iter()
            .map(|d| self.check_declaration(&mut scopes, d, NameContext::Output))
            .collect();
        self.in_output = false;

        let callable = Arc::new(Callable {
            name: task.name.text.clone(),
            inputs: inputs
                .iter()
                .map(|d| {
                    (
                        d.name.clone(),
                        Input {
                            ty: d.ty.clone(),
                            required: d.expr.is_none() && !d.ty.is_optional(),
                        },
                    )
                })
                .collect(),
            outputs: outputs.iter().map(|d| (d.name.clone(), d.ty.clone())).collect(),
        });

        (
            TypedTask {
                name: task.name.text.clone(),
                inputs,
                declarations,
                command,
                outputs,
                runtime,
                hints,
                meta: meta_items(&task.meta),
                parameter_meta: meta_items(&task.parameter_meta),
                span: task.span,
            },
            callable,
        )
    }

    /// Checks a workflow, producing its typed form and callable symbol.
    fn check_workflow(&mut self, workflow: &ast::Workflow) -> (TypedWorkflow, Arc<Callable>) {
        let mut scopes = ScopeStack::new();

        let inputs: Vec<_> = workflow
            .inputs
            .iter()
            .map(|d| self.check_declaration(&mut scopes, d, NameContext::Input))
            .collect();

        let body = self.check_workflow_elements(&mut scopes, &workflow.body);

        self.in_output = true;
        let outputs: Vec<_> = workflow
            .outputs
            .iter()
            .map(|d| self.check_declaration(&mut scopes, d, NameContext::Output))
            .collect();
        self.in_output = false;

        let callable = Arc::new(Callable {
            name: workflow.name.text.clone(),
            inputs: inputs
                .iter()
                .map(|d| {
                    (
                        d.name.clone(),
                        Input {
                            ty: d.ty.clone(),
                            required: d.expr.is_none() && !d.ty.is_optional(),
                        },
                    )
                })
                .collect(),
            outputs: outputs.iter().map(|d| (d.name.clone(), d.ty.clone())).collect(),
        });

        (
            TypedWorkflow {
                name: workflow.name.text.clone(),
                inputs,
                body,
                outputs,
                meta: meta_items(&workflow.meta),
                parameter_meta: meta_items(&workflow.parameter_meta),
                span: workflow.span,
            },
            callable,
        )
    }

    /// Checks the elements of a workflow body in source order.
    fn check_workflow_elements(
        &mut self,
        scopes: &mut ScopeStack,
        elements: &[ast::WorkflowElement],
    ) -> Vec<TypedWorkflowElement> {
        elements
            .iter()
            .map(|element| match element {
                ast::WorkflowElement::Decl(d) => TypedWorkflowElement::Decl(
                    self.check_declaration(scopes, d, NameContext::Declaration),
                ),
                ast::WorkflowElement::Call(c) => {
                    TypedWorkflowElement::Call(self.check_call(scopes, c))
                }
                ast::WorkflowElement::Scatter(s) => {
                    TypedWorkflowElement::Scatter(self.check_scatter(scopes, s))
                }
                ast::WorkflowElement::Conditional(c) => {
                    TypedWorkflowElement::Conditional(self.check_conditional(scopes, c))
                }
            })
            .collect()
    }

    /// Checks a scatter statement.
    ///
    /// Bindings produced by the body are exported into the enclosing scope
    /// wrapped in `Array`; the iteration variable is not exported.
    fn check_scatter(&mut self, scopes: &mut ScopeStack, scatter: &ast::Scatter) -> TypedScatter {
        let collection = self.evaluate_expr(scopes, &scatter.expr);
        let (element_ty, non_empty) = match &collection.ty {
            Type::Array { element, non_empty } => ((**element).clone(), *non_empty),
            ty if ty.is_indeterminate() => (Type::Any, false),
            ty => {
                self.diagnostics.push(not_an_array(ty, collection.span));
                (Type::Any, false)
            }
        };

        scopes.push();
        self.bind_name(
            scopes,
            scatter.variable.as_str(),
            scatter.variable.span,
            element_ty.clone(),
            NameContext::ScatterVariable,
        );
        let body = self.check_workflow_elements(scopes, &scatter.body);
        let scope = scopes.pop();

        for (name, value) in scope.names() {
            if value.context() == NameContext::ScatterVariable {
                continue;
            }
            let promoted = promote_scatter(value.ty(), non_empty);
            scopes
                .current_mut()
                .insert(name, Name::new(promoted, value.span(), value.context()));
        }

        TypedScatter {
            variable: scatter.variable.text.clone(),
            variable_ty: element_ty,
            expr: collection,
            body,
            span: scatter.span,
        }
    }

    /// Checks a conditional statement.
    ///
    /// Bindings produced by the body are exported into the enclosing scope
    /// wrapped in `Optional`.
    fn check_conditional(
        &mut self,
        scopes: &mut ScopeStack,
        conditional: &ast::Conditional,
    ) -> TypedConditional {
        let condition = self.evaluate_expr(scopes, &conditional.expr);
        let condition = if condition.ty.is_indeterminate()
            || condition
                .ty
                .is_coercible_to(&PrimitiveType::Boolean.into())
        {
            self.coerce(condition, &PrimitiveType::Boolean.into())
        } else {
            self.diagnostics
                .push(if_conditional_mismatch(&condition.ty, condition.span));
            condition
        };

        scopes.push();
        let body = self.check_workflow_elements(scopes, &conditional.body);
        let scope = scopes.pop();

        for (name, value) in scope.names() {
            let promoted = self.promote_conditional(name, value.ty(), value.span());
            scopes
                .current_mut()
                .insert(name, Name::new(promoted, value.span(), value.context()));
        }

        TypedConditional {
            expr: condition,
            body,
            span: conditional.span,
        }
    }

    /// Wraps a binding type exported from a conditional body in `Optional`.
    ///
    /// Call bindings wrap their output types instead. Double optionals
    /// flatten unless the checking options reject them.
    fn promote_conditional(&mut self, name: &str, ty: &Type, span: Span) -> Type {
        match ty {
            Type::Call(call) => Type::Call(Arc::new(CallType::new(
                call.name(),
                call.outputs().iter().map(|(n, t)| {
                    (n.clone(), self.promote_optional(name, t, span))
                }).collect::<Vec<_>>(),
            ))),
            _ => self.promote_optional(name, ty, span),
        }
    }

    /// Wraps a single type in `Optional`, applying the double-optional
    /// policy.
    fn promote_optional(&mut self, name: &str, ty: &Type, span: Span) -> Type {
        if ty.is_optional() && self.options.reject_double_optional {
            self.diagnostics.push(double_optional(name, span));
        }
        ty.clone().optional()
    }

    /// Checks a call statement.
    fn check_call(&mut self, scopes: &mut ScopeStack, call: &ast::Call) -> TypedCall {
        let callable = self.resolve_call_target(call);

        let mut supplied = Vec::new();
        let mut inputs = Vec::new();
        for input in &call.inputs {
            let input_ty = callable
                .as_ref()
                .and_then(|c| c.inputs.get(input.name.as_str()))
                .map(|i| i.ty.clone());

            if callable.is_some() && input_ty.is_none() {
                self.diagnostics.push(unknown_call_io(
                    &target_string(call),
                    input.name.as_str(),
                    input.name.span,
                ));
            }

            let typed = match &input.expr {
                Some(e) => {
                    let typed = self.evaluate_expr(scopes, e);
                    Some(match &input_ty {
                        Some(ty) => self.coerce(typed, ty),
                        None => typed,
                    })
                }
                None => {
                    // Shorthand: the input is supplied by the identically
                    // named binding in scope.
                    match scopes.lookup(input.name.as_str()) {
                        Some(binding) => {
                            let typed = TypedExpr {
                                kind: TypedExprKind::Ident(input.name.text.clone()),
                                ty: binding.ty().clone(),
                                span: input.name.span,
                            };
                            Some(match &input_ty {
                                Some(ty) => self.coerce(typed, ty),
                                None => typed,
                            })
                        }
                        None => {
                            self.diagnostics
                                .push(unknown_name(input.name.as_str(), input.name.span));
                            None
                        }
                    }
                }
            };

            supplied.push(input.name.text.clone());
            inputs.push((input.name.text.clone(), typed));
        }

        if let Some(callable) = &callable {
            for (name, input) in &callable.inputs {
                if input.required && !supplied.iter().any(|s| s == name) {
                    self.diagnostics.push(missing_call_input(
                        &target_string(call),
                        name,
                        call.span,
                    ));
                }
            }
        }

        let name = call.name();
        let ty = Arc::new(CallType::new(
            name.text.clone(),
            callable
                .as_ref()
                .map(|c| {
                    c.outputs
                        .iter()
                        .map(|(n, t)| (n.clone(), t.clone()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
        ));

        self.bind_name(
            scopes,
            name.as_str(),
            name.span,
            Type::Call(ty.clone()),
            NameContext::Call,
        );

        TypedCall {
            name: name.text.clone(),
            target: target_string(call),
            inputs,
            ty,
            span: call.span,
        }
    }

    /// Resolves the target of a call to a task or workflow symbol.
    fn resolve_call_target(&mut self, call: &ast::Call) -> Option<Arc<Callable>> {
        match call.target.as_slice() {
            [single] => match self.tasks.get(single.as_str()) {
                Some(callable) => Some(callable.clone()),
                None => {
                    self.diagnostics
                        .push(unknown_call_target(single.as_str(), single.span));
                    None
                }
            },
            [namespace, name] => match self.namespaces.get(namespace.as_str()) {
                Some(document) => {
                    if let Some(callable) = document.tasks.get(name.as_str()) {
                        return Some(callable.clone());
                    }
                    if let Some(workflow) = &document.workflow {
                        if workflow.name == name.as_str() {
                            return Some(workflow.clone());
                        }
                    }
                    self.diagnostics
                        .push(unknown_call_target(name.as_str(), name.span));
                    None
                }
                None => {
                    self.diagnostics
                        .push(unknown_namespace(namespace.as_str(), namespace.span));
                    None
                }
            },
            _ => {
                self.diagnostics.push(unknown_call_target(
                    &target_string(call),
                    call.span,
                ));
                None
            }
        }
    }

    /// Checks that a placeholder expression can be rendered as a string.
    ///
    /// Optional values render as the empty string, so the check applies to
    /// the required form of the type.
    fn check_stringifiable(&mut self, expr: &TypedExpr) {
        let ty = expr.ty.require();
        if !ty.is_indeterminate()
            && !ty.is_coercible_to(&PrimitiveType::String.into())
        {
            self.diagnostics
                .push(cannot_coerce_to_string(&expr.ty, expr.span));
        }
    }

    /// Infers the type of an expression, producing its typed form.
    fn evaluate_expr(&mut self, scopes: &ScopeStack, expr: &ast::Expr) -> TypedExpr {
        let span = expr.span;
        match &expr.kind {
            ast::ExprKind::Boolean(v) => TypedExpr {
                kind: TypedExprKind::Boolean(*v),
                ty: PrimitiveType::Boolean.into(),
                span,
            },
            ast::ExprKind::Integer(v) => TypedExpr {
                kind: TypedExprKind::Integer(*v),
                ty: PrimitiveType::Integer.into(),
                span,
            },
            ast::ExprKind::Float(v) => TypedExpr {
                kind: TypedExprKind::Float(*v),
                ty: PrimitiveType::Float.into(),
                span,
            },
            ast::ExprKind::None => TypedExpr {
                kind: TypedExprKind::None,
                ty: Type::Any.optional(),
                span,
            },
            ast::ExprKind::String(s) => TypedExpr {
                kind: TypedExprKind::String(s.clone()),
                ty: PrimitiveType::String.into(),
                span,
            },
            ast::ExprKind::CompoundString(parts) => {
                let parts: Vec<_> = parts
                    .iter()
                    .map(|p| {
                        let typed = self.evaluate_expr(scopes, p);
                        self.check_stringifiable(&typed);
                        typed
                    })
                    .collect();
                TypedExpr {
                    kind: TypedExprKind::CompoundString(parts),
                    ty: PrimitiveType::String.into(),
                    span,
                }
            }
            ast::ExprKind::Ident(name) => {
                let ty = match scopes.lookup(name) {
                    Some(binding) => binding.ty().clone(),
                    None => {
                        self.diagnostics.push(unknown_name(name, span));
                        Type::Any
                    }
                };
                TypedExpr {
                    kind: TypedExprKind::Ident(name.clone()),
                    ty,
                    span,
                }
            }
            ast::ExprKind::Array(elements) => self.evaluate_array(scopes, elements, span),
            ast::ExprKind::Map(items) => self.evaluate_map(scopes, items, span),
            ast::ExprKind::Object(members) => {
                let members = members
                    .iter()
                    .map(|(n, e)| (n.text.clone(), self.evaluate_expr(scopes, e)))
                    .collect();
                TypedExpr {
                    kind: TypedExprKind::Object(members),
                    ty: Type::Object,
                    span,
                }
            }
            ast::ExprKind::Struct { name, members } => {
                self.evaluate_struct_literal(scopes, name, members, span)
            }
            ast::ExprKind::Pair(left, right) => {
                let left = self.evaluate_expr(scopes, left);
                let right = self.evaluate_expr(scopes, right);
                let ty = Type::pair(left.ty.clone(), right.ty.clone());
                TypedExpr {
                    kind: TypedExprKind::Pair(Box::new(left), Box::new(right)),
                    ty,
                    span,
                }
            }
            ast::ExprKind::Unary { op, operand } => self.evaluate_unary(scopes, *op, operand, span),
            ast::ExprKind::Binary { op, lhs, rhs } => {
                self.evaluate_binary(scopes, *op, lhs, rhs, span)
            }
            ast::ExprKind::IfThenElse {
                condition,
                true_expr,
                false_expr,
            } => self.evaluate_if(scopes, condition, true_expr, false_expr, span),
            ast::ExprKind::Apply { target, arguments } => {
                self.evaluate_apply(scopes, target, arguments, span)
            }
            ast::ExprKind::At { target, index } => self.evaluate_at(scopes, target, index, span),
            ast::ExprKind::GetName { target, member } => {
                self.evaluate_get_name(scopes, target, member, span)
            }
            ast::ExprKind::PlaceholderEqual {
                true_expr,
                false_expr,
                condition,
            } => {
                let condition = self.evaluate_expr(scopes, condition);
                let condition = self.coerce(condition, &PrimitiveType::Boolean.into());
                let true_expr = self.evaluate_expr(scopes, true_expr);
                let true_expr = self.coerce(true_expr, &PrimitiveType::String.into());
                let false_expr = self.evaluate_expr(scopes, false_expr);
                let false_expr = self.coerce(false_expr, &PrimitiveType::String.into());
                TypedExpr {
                    kind: TypedExprKind::PlaceholderEqual {
                        true_expr: Box::new(true_expr),
                        false_expr: Box::new(false_expr),
                        condition: Box::new(condition),
                    },
                    ty: PrimitiveType::String.into(),
                    span,
                }
            }
            ast::ExprKind::PlaceholderDefault { default, value } => {
                let value = self.evaluate_expr(scopes, value);
                let inner = if value.ty.is_optional() || value.ty.is_indeterminate() {
                    value.ty.require()
                } else {
                    self.diagnostics
                        .push(default_option_mismatch(&value.ty, value.span));
                    value.ty.clone()
                };
                let default = self.evaluate_expr(scopes, default);
                let default = self.coerce(default, &inner);
                TypedExpr {
                    kind: TypedExprKind::PlaceholderDefault {
                        default: Box::new(default),
                        value: Box::new(value),
                    },
                    ty: inner,
                    span,
                }
            }
            ast::ExprKind::PlaceholderSep { separator, array } => {
                let separator = self.evaluate_expr(scopes, separator);
                let separator = self.coerce(separator, &PrimitiveType::String.into());
                let array = self.evaluate_expr(scopes, array);
                match &array.ty.require() {
                    Type::Array { element, .. } => {
                        let element = element.require();
                        if !element.is_indeterminate()
                            && !element.is_coercible_to(&PrimitiveType::String.into())
                        {
                            self.diagnostics
                                .push(cannot_coerce_to_string(&element, array.span));
                        }
                    }
                    ty if ty.is_indeterminate() => {}
                    ty => {
                        self.diagnostics.push(sep_option_mismatch(ty, array.span));
                    }
                }
                // An optional array propagates its absence so that a
                // `default=` option can still apply.
                let ty = if array.ty.is_optional() {
                    Type::from(PrimitiveType::String).optional()
                } else {
                    PrimitiveType::String.into()
                };
                TypedExpr {
                    kind: TypedExprKind::PlaceholderSep {
                        separator: Box::new(separator),
                        array: Box::new(array),
                    },
                    ty,
                    span,
                }
            }
        }
    }

    /// Infers the type of an array literal.
    ///
    /// A non-empty literal has a non-empty array type; an empty literal has
    /// the `Union` element placeholder, which matches any target.
    fn evaluate_array(
        &mut self,
        scopes: &ScopeStack,
        elements: &[ast::Expr],
        span: Span,
    ) -> TypedExpr {
        let typed: Vec<_> = elements
            .iter()
            .map(|e| self.evaluate_expr(scopes, e))
            .collect();

        let mut element_ty = Type::Unknown;
        for e in &typed {
            match common_type(&element_ty, &e.ty) {
                Some(ty) => element_ty = ty,
                None => {
                    self.diagnostics
                        .push(no_common_type(&element_ty, &e.ty, e.span));
                    element_ty = Type::Any;
                    break;
                }
            }
        }

        let non_empty = !typed.is_empty();
        let typed = typed
            .into_iter()
            .map(|e| {
                if e.ty == element_ty || element_ty.is_indeterminate() {
                    e
                } else {
                    self.coerce(e, &element_ty)
                }
            })
            .collect();

        TypedExpr {
            kind: TypedExprKind::Array(typed),
            ty: Type::Array {
                element: Box::new(element_ty),
                non_empty,
            },
            span,
        }
    }

    /// Infers the type of a map literal.
    fn evaluate_map(
        &mut self,
        scopes: &ScopeStack,
        items: &[(ast::Expr, ast::Expr)],
        span: Span,
    ) -> TypedExpr {
        let typed: Vec<_> = items
            .iter()
            .map(|(k, v)| (self.evaluate_expr(scopes, k), self.evaluate_expr(scopes, v)))
            .collect();

        let mut key_ty = Type::Unknown;
        let mut value_ty = Type::Unknown;
        for (k, v) in &typed {
            match common_type(&key_ty, &k.ty) {
                Some(ty) => key_ty = ty,
                None => {
                    self.diagnostics.push(no_common_type(&key_ty, &k.ty, k.span));
                    key_ty = Type::Any;
                }
            }
            match common_type(&value_ty, &v.ty) {
                Some(ty) => value_ty = ty,
                None => {
                    self.diagnostics
                        .push(no_common_type(&value_ty, &v.ty, v.span));
                    value_ty = Type::Any;
                }
            }
        }

        let typed = typed
            .into_iter()
            .map(|(k, v)| {
                let k = if k.ty == key_ty || key_ty.is_indeterminate() {
                    k
                } else {
                    self.coerce(k, &key_ty)
                };
                let v = if v.ty == value_ty || value_ty.is_indeterminate() {
                    v
                } else {
                    self.coerce(v, &value_ty)
                };
                (k, v)
            })
            .collect();

        TypedExpr {
            kind: TypedExprKind::Map(typed),
            ty: Type::map(key_ty, value_ty),
            span,
        }
    }

    /// Infers the type of a struct literal.
    fn evaluate_struct_literal(
        &mut self,
        scopes: &ScopeStack,
        name: &ast::Ident,
        members: &[(ast::Ident, ast::Expr)],
        span: Span,
    ) -> TypedExpr {
        let struct_ty = match self.structs.get(name.as_str()) {
            Some(ty) => ty.clone(),
            None => {
                self.diagnostics.push(unknown_type(name.as_str(), name.span));
                // Evaluate the members for their diagnostics.
                let members = members
                    .iter()
                    .map(|(n, e)| (n.text.clone(), self.evaluate_expr(scopes, e)))
                    .collect();
                return TypedExpr {
                    kind: TypedExprKind::Struct {
                        name: name.text.clone(),
                        members,
                    },
                    ty: Type::Any,
                    span,
                };
            }
        };

        let mut typed = Vec::new();
        for (member_name, e) in members {
            let value = self.evaluate_expr(scopes, e);
            let value = match struct_ty.members().get(member_name.as_str()) {
                Some(member_ty) => self.coerce(value, member_ty),
                None => {
                    self.diagnostics.push(not_a_struct_member(
                        struct_ty.name(),
                        member_name.as_str(),
                        member_name.span,
                    ));
                    value
                }
            };
            typed.push((member_name.text.clone(), value));
        }

        let missing: Vec<_> = struct_ty
            .members()
            .iter()
            .filter(|(n, t)| {
                !t.is_optional() && !typed.iter().any(|(supplied, _)| supplied == *n)
            })
            .map(|(n, _)| n.as_str())
            .collect();
        if !missing.is_empty() {
            self.diagnostics
                .push(missing_struct_members(struct_ty.name(), &missing, span));
        }

        TypedExpr {
            kind: TypedExprKind::Struct {
                name: name.text.clone(),
                members: typed,
            },
            ty: Type::Struct(struct_ty),
            span,
        }
    }

    /// Infers the type of a unary expression.
    fn evaluate_unary(
        &mut self,
        scopes: &ScopeStack,
        op: UnaryOp,
        operand: &ast::Expr,
        span: Span,
    ) -> TypedExpr {
        let operand = self.evaluate_expr(scopes, operand);
        let ty = match op {
            UnaryOp::Negation => match operand.ty.as_primitive() {
                Some(PrimitiveType::Integer) => PrimitiveType::Integer.into(),
                Some(PrimitiveType::Float) => PrimitiveType::Float.into(),
                _ if operand.ty.is_indeterminate() => Type::Any,
                _ => {
                    self.diagnostics
                        .push(negation_mismatch(&operand.ty, operand.span));
                    Type::Any
                }
            },
            UnaryOp::LogicalNot => {
                if !operand.ty.is_indeterminate()
                    && operand.ty != PrimitiveType::Boolean.into()
                {
                    self.diagnostics
                        .push(logical_not_mismatch(&operand.ty, operand.span));
                }
                PrimitiveType::Boolean.into()
            }
        };
        TypedExpr {
            kind: TypedExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            ty,
            span,
        }
    }

    /// Infers the type of a binary expression.
    fn evaluate_binary(
        &mut self,
        scopes: &ScopeStack,
        op: BinaryOp,
        lhs: &ast::Expr,
        rhs: &ast::Expr,
        span: Span,
    ) -> TypedExpr {
        let lhs = self.evaluate_expr(scopes, lhs);
        let rhs = self.evaluate_expr(scopes, rhs);

        /// Builds the typed binary node.
        fn node(op: BinaryOp, lhs: TypedExpr, rhs: TypedExpr, ty: Type, span: Span) -> TypedExpr {
            TypedExpr {
                kind: TypedExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                ty,
                span,
            }
        }

        match op {
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
                for operand in [&lhs, &rhs] {
                    if !operand.ty.is_indeterminate()
                        && operand.ty != PrimitiveType::Boolean.into()
                    {
                        self.diagnostics.push(logical_operand_mismatch(
                            op,
                            &operand.ty,
                            operand.span,
                        ));
                    }
                }
                node(op, lhs, rhs, PrimitiveType::Boolean.into(), span)
            }
            BinaryOp::Equality | BinaryOp::Inequality => {
                if lhs.ty.is_indeterminate() || rhs.ty.is_indeterminate() {
                    return node(op, lhs, rhs, PrimitiveType::Boolean.into(), span);
                }
                match common_type(&lhs.ty, &rhs.ty) {
                    Some(common) => {
                        let lhs = self.coerce(lhs, &common);
                        let rhs = self.coerce(rhs, &common);
                        node(op, lhs, rhs, PrimitiveType::Boolean.into(), span)
                    }
                    None => {
                        self.diagnostics
                            .push(comparison_mismatch(op, &lhs.ty, &rhs.ty, span));
                        node(op, lhs, rhs, PrimitiveType::Boolean.into(), span)
                    }
                }
            }
            BinaryOp::Less
            | BinaryOp::LessEqual
            | BinaryOp::Greater
            | BinaryOp::GreaterEqual => {
                if lhs.ty.is_indeterminate() || rhs.ty.is_indeterminate() {
                    return node(op, lhs, rhs, PrimitiveType::Boolean.into(), span);
                }
                match common_type(&lhs.ty, &rhs.ty) {
                    Some(common @ Type::Primitive(_)) => {
                        let lhs = self.coerce(lhs, &common);
                        let rhs = self.coerce(rhs, &common);
                        node(op, lhs, rhs, PrimitiveType::Boolean.into(), span)
                    }
                    _ => {
                        self.diagnostics
                            .push(comparison_mismatch(op, &lhs.ty, &rhs.ty, span));
                        node(op, lhs, rhs, PrimitiveType::Boolean.into(), span)
                    }
                }
            }
            BinaryOp::Addition => {
                let is = |e: &TypedExpr, p: PrimitiveType| e.ty.as_primitive() == Some(p);
                if is(&lhs, PrimitiveType::File) || is(&rhs, PrimitiveType::File) {
                    // Concatenating onto a path produces a path.
                    let file: Type = PrimitiveType::File.into();
                    let lhs = self.coerce(lhs, &file);
                    let rhs = self.coerce(rhs, &file);
                    node(op, lhs, rhs, file, span)
                } else if is(&lhs, PrimitiveType::String) || is(&rhs, PrimitiveType::String) {
                    let string: Type = PrimitiveType::String.into();
                    let lhs = self.coerce(lhs, &string);
                    let rhs = self.coerce(rhs, &string);
                    node(op, lhs, rhs, string, span)
                } else {
                    self.evaluate_numeric_op(op, lhs, rhs, span)
                }
            }
            BinaryOp::Subtraction
            | BinaryOp::Multiplication
            | BinaryOp::Division
            | BinaryOp::Modulo => self.evaluate_numeric_op(op, lhs, rhs, span),
        }
    }

    /// Infers the type of a numeric binary operation, applying the numeric
    /// promotion rules.
    fn evaluate_numeric_op(
        &mut self,
        op: BinaryOp,
        lhs: TypedExpr,
        rhs: TypedExpr,
        span: Span,
    ) -> TypedExpr {
        let ty = match (lhs.ty.as_primitive(), rhs.ty.as_primitive()) {
            (Some(PrimitiveType::Integer), Some(PrimitiveType::Integer)) => {
                PrimitiveType::Integer.into()
            }
            (
                Some(PrimitiveType::Integer | PrimitiveType::Float),
                Some(PrimitiveType::Integer | PrimitiveType::Float),
            ) => PrimitiveType::Float.into(),
            _ if lhs.ty.is_indeterminate() || rhs.ty.is_indeterminate() => Type::Any,
            _ => {
                self.diagnostics
                    .push(numeric_mismatch(op, &lhs.ty, &rhs.ty, span));
                Type::Any
            }
        };
        TypedExpr {
            kind: TypedExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            ty,
            span,
        }
    }

    /// Infers the type of an `if … then … else …` expression.
    fn evaluate_if(
        &mut self,
        scopes: &ScopeStack,
        condition: &ast::Expr,
        true_expr: &ast::Expr,
        false_expr: &ast::Expr,
        span: Span,
    ) -> TypedExpr {
        let condition = self.evaluate_expr(scopes, condition);
        let condition = if condition.ty.is_indeterminate()
            || condition
                .ty
                .is_coercible_to(&PrimitiveType::Boolean.into())
        {
            self.coerce(condition, &PrimitiveType::Boolean.into())
        } else {
            self.diagnostics
                .push(if_conditional_mismatch(&condition.ty, condition.span));
            condition
        };

        let true_expr = self.evaluate_expr(scopes, true_expr);
        let false_expr = self.evaluate_expr(scopes, false_expr);
        let ty = match common_type(&true_expr.ty, &false_expr.ty) {
            Some(ty) => ty,
            None => {
                self.diagnostics
                    .push(no_common_type(&true_expr.ty, &false_expr.ty, span));
                Type::Any
            }
        };
        let true_expr = if ty.is_indeterminate() {
            true_expr
        } else {
            self.coerce(true_expr, &ty)
        };
        let false_expr = if ty.is_indeterminate() {
            false_expr
        } else {
            self.coerce(false_expr, &ty)
        };

        TypedExpr {
            kind: TypedExprKind::IfThenElse {
                condition: Box::new(condition),
                true_expr: Box::new(true_expr),
                false_expr: Box::new(false_expr),
            },
            ty,
            span,
        }
    }

    /// Infers the type of a standard library function call, resolving the
    /// overload and annotating the node with the chosen prototype.
    fn evaluate_apply(
        &mut self,
        scopes: &ScopeStack,
        target: &ast::Ident,
        arguments: &[ast::Expr],
        span: Span,
    ) -> TypedExpr {
        let typed: Vec<_> = arguments
            .iter()
            .map(|a| self.evaluate_expr(scopes, a))
            .collect();

        let function = match STDLIB.function(target.as_str()) {
            Some(f) => f,
            None => {
                self.diagnostics
                    .push(unknown_function(target.as_str(), target.span));
                return TypedExpr {
                    kind: TypedExprKind::Ident(target.text.clone()),
                    ty: Type::Any,
                    span,
                };
            }
        };

        let arg_types: Vec<_> = typed.iter().map(|t| t.ty.clone()).collect();
        match function.bind(&arg_types) {
            Ok(binding) => {
                let arguments: Vec<_> = typed
                    .into_iter()
                    .zip(&binding.parameters)
                    .map(|(arg, param)| self.coerce(arg, param))
                    .collect();
                TypedExpr {
                    kind: TypedExprKind::Apply {
                        target: target.text.clone(),
                        signature: function.signatures()[binding.signature].clone(),
                        arguments,
                    },
                    ty: binding.return_type,
                    span,
                }
            }
            Err(e) => {
                match e {
                    FunctionBindError::TooFewArguments(minimum) => {
                        self.diagnostics.push(too_few_arguments(
                            target.as_str(),
                            target.span,
                            minimum,
                            arguments.len(),
                        ));
                    }
                    FunctionBindError::TooManyArguments(maximum) => {
                        self.diagnostics.push(too_many_arguments(
                            target.as_str(),
                            target.span,
                            maximum,
                            arguments.len(),
                        ));
                    }
                    FunctionBindError::ArgumentTypeMismatch { index, expected } => {
                        let (actual, arg_span) = typed
                            .get(index)
                            .map(|t| (t.ty.clone(), t.span))
                            .unwrap_or((Type::Any, span));
                        self.diagnostics.push(argument_type_mismatch(
                            target.as_str(),
                            &expected,
                            &actual,
                            arg_span,
                        ));
                    }
                    FunctionBindError::Ambiguous { first, second } => {
                        self.diagnostics.push(ambiguous_argument(
                            target.as_str(),
                            target.span,
                            &first,
                            &second,
                        ));
                    }
                }
                TypedExpr {
                    kind: TypedExprKind::Apply {
                        target: target.text.clone(),
                        signature: function.signatures()[0].clone(),
                        arguments: typed,
                    },
                    ty: Type::Any,
                    span,
                }
            }
        }
    }

    /// Infers the type of an index expression.
    fn evaluate_at(
        &mut self,
        scopes: &ScopeStack,
        target: &ast::Expr,
        index: &ast::Expr,
        span: Span,
    ) -> TypedExpr {
        let target = self.evaluate_expr(scopes, target);
        let index = self.evaluate_expr(scopes, index);

        let (index, ty) = match &target.ty {
            Type::Array { element, .. } => {
                let element = (**element).clone();
                let index = if index.ty.is_indeterminate()
                    || index
                        .ty
                        .is_coercible_to(&PrimitiveType::Integer.into())
                {
                    self.coerce(index, &PrimitiveType::Integer.into())
                } else {
                    self.diagnostics.push(index_type_mismatch(
                        &PrimitiveType::Integer.into(),
                        &index.ty,
                        index.span,
                    ));
                    index
                };
                (index, element)
            }
            Type::Map { key, value } => {
                let key = (**key).clone();
                let value = (**value).clone();
                let index = if index.ty.is_indeterminate() || index.ty.is_coercible_to(&key) {
                    self.coerce(index, &key)
                } else {
                    self.diagnostics
                        .push(index_type_mismatch(&key, &index.ty, index.span));
                    index
                };
                (index, value)
            }
            ty if ty.is_indeterminate() => (index, Type::Any),
            ty => {
                self.diagnostics.push(cannot_index(ty, target.span));
                (index, Type::Any)
            }
        };

        TypedExpr {
            kind: TypedExprKind::At {
                target: Box::new(target),
                index: Box::new(index),
            },
            ty,
            span,
        }
    }

    /// Infers the type of a member access expression.
    fn evaluate_get_name(
        &mut self,
        scopes: &ScopeStack,
        target: &ast::Expr,
        member: &ast::Ident,
        span: Span,
    ) -> TypedExpr {
        let target = self.evaluate_expr(scopes, target);
        let ty = match &target.ty {
            Type::Struct(s) => match s.members().get(member.as_str()) {
                Some(ty) => ty.clone(),
                None => {
                    self.diagnostics.push(not_a_struct_member(
                        s.name(),
                        member.as_str(),
                        member.span,
                    ));
                    Type::Any
                }
            },
            // Object members are unconstrained; access of a missing member
            // is a runtime error.
            Type::Object => Type::Any,
            Type::Call(c) => match c.outputs().get(member.as_str()) {
                Some(ty) => ty.clone(),
                None => {
                    self.diagnostics.push(unknown_call_io(
                        c.name(),
                        member.as_str(),
                        member.span,
                    ));
                    Type::Any
                }
            },
            Type::Pair { left, right } => match member.as_str().to_ascii_lowercase().as_str() {
                "left" => (**left).clone(),
                "right" => (**right).clone(),
                _ => {
                    self.diagnostics
                        .push(not_a_pair_accessor(member.as_str(), member.span));
                    Type::Any
                }
            },
            ty if ty.is_indeterminate() => Type::Any,
            ty => {
                self.diagnostics.push(cannot_access(ty, target.span));
                Type::Any
            }
        };

        TypedExpr {
            kind: TypedExprKind::GetName {
                target: Box::new(target),
                member: member.text.clone(),
            },
            ty,
            span,
        }
    }
}

/// Wraps a binding type exported from a scatter body in `Array`.
///
/// Call bindings wrap their output types instead. The array is non-empty
/// when the scatter collection's type is non-empty.
fn promote_scatter(ty: &Type, non_empty: bool) -> Type {
    match ty {
        Type::Call(call) => Type::Call(Arc::new(CallType::new(
            call.name(),
            call.outputs()
                .iter()
                .map(|(n, t)| {
                    (n.clone(), Type::Array {
                        element: Box::new(t.clone()),
                        non_empty,
                    })
                })
                .collect::<Vec<_>>(),
        ))),
        _ => Type::Array {
            element: Box::new(ty.clone()),
            non_empty,
        },
    }
}

/// Determines if a coercion is a questionable `String` to path coercion.
fn is_questionable_path_coercion(source: &Type, target: &Type) -> bool {
    source.require().as_primitive() == Some(PrimitiveType::String)
        && matches!(
            target.require().as_primitive(),
            Some(PrimitiveType::File | PrimitiveType::Directory)
        )
}

/// Lowers metadata items to name/value pairs.
fn meta_items(items: &[ast::MetaItem]) -> Vec<(String, ast::MetaValue)> {
    items
        .iter()
        .map(|i| (i.name.text.clone(), i.value.clone()))
        .collect()
}

/// Formats the dotted target of a call as written.
fn target_string(call: &ast::Call) -> String {
    call.target
        .iter()
        .map(|i| i.as_str())
        .collect::<Vec<_>>()
        .join(".")
}
