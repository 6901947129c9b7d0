//! Evaluation of typed expressions, declarations, and commands.

use indexmap::IndexMap;
use tracing::debug;
use wdl_analysis::typed::TypedCommandPart;
use wdl_analysis::typed::TypedDeclaration;
use wdl_analysis::typed::TypedExpr;
use wdl_analysis::typed::TypedExprKind;
use wdl_analysis::typed::TypedTask;
use wdl_analysis::typed::TypedWorkflowElement;
use wdl_analysis::types::PrimitiveType;
use wdl_ast::BinaryOp;
use wdl_ast::Diagnostic;
use wdl_ast::Span;
use wdl_ast::UnaryOp;

use crate::Coercible;
use crate::CompoundValue;
use crate::PrimitiveValue;
use crate::Value;
use crate::command::strip_leading_whitespace;
use crate::diagnostics::cannot_evaluate_call;
use crate::diagnostics::cannot_render;
use crate::diagnostics::division_by_zero;
use crate::diagnostics::index_out_of_bounds;
use crate::diagnostics::integer_negation_not_in_range;
use crate::diagnostics::internal_error;
use crate::diagnostics::map_key_not_found;
use crate::diagnostics::missing_binding;
use crate::diagnostics::missing_member;
use crate::diagnostics::not_a_pair_accessor;
use crate::diagnostics::numeric_overflow;
use crate::diagnostics::rebinding_forbidden;
use crate::diagnostics::runtime_type_mismatch;
use crate::io::FileSource;
use crate::stdlib;
use crate::stdlib::CallArgument;
use crate::stdlib::CallContext;

/// Provides evaluation context to the expression evaluator.
pub trait EvaluationContext {
    /// Resolves a name to its bound value.
    fn resolve_name(&self, name: &str) -> Option<Value>;

    /// Gets the file source for I/O-bearing standard library functions.
    fn file_source(&self) -> &dyn FileSource;
}

/// An immutable mapping of names to values.
///
/// Declaration evaluation threads a new set of bindings left to right;
/// rebinding a name is forbidden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    /// The bound values, in binding order.
    values: IndexMap<String, Value>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the value bound to a name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Determines if a name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Binds a name to a value.
    ///
    /// Returns an error if the name is already bound.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> anyhow::Result<()> {
        let name = name.into();
        if self.values.contains_key(&name) {
            anyhow::bail!("a value is already bound to the name `{name}`");
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Binds a name to a value, replacing any existing binding.
    fn rebind(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Iterates the bindings in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// An evaluation context over a set of bindings and a file source.
pub struct BindingsContext<'a> {
    /// The bindings names resolve against.
    bindings: &'a Bindings,
    /// The injected file source.
    file_source: &'a dyn FileSource,
}

impl<'a> BindingsContext<'a> {
    /// Creates a new context over the given bindings and file source.
    pub fn new(bindings: &'a Bindings, file_source: &'a dyn FileSource) -> Self {
        Self {
            bindings,
            file_source,
        }
    }
}

impl EvaluationContext for BindingsContext<'_> {
    fn resolve_name(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    fn file_source(&self) -> &dyn FileSource {
        self.file_source
    }
}

/// Evaluates typed expressions within an evaluation context.
pub struct ExprEvaluator<'a> {
    /// The evaluation context.
    context: &'a dyn EvaluationContext,
}

impl<'a> ExprEvaluator<'a> {
    /// Creates a new expression evaluator.
    pub fn new(context: &'a dyn EvaluationContext) -> Self {
        Self { context }
    }

    /// Evaluates an expression to a value.
    ///
    /// Pure expressions are deterministic; repeated evaluation yields equal
    /// values. Runtime failures abort the evaluation with a diagnostic.
    pub fn evaluate(&self, expr: &TypedExpr) -> Result<Value, Diagnostic> {
        match &expr.kind {
            TypedExprKind::Boolean(v) => Ok((*v).into()),
            TypedExprKind::Integer(v) => Ok((*v).into()),
            TypedExprKind::Float(v) => Ok((*v).into()),
            TypedExprKind::None => Ok(Value::None),
            TypedExprKind::String(s) => Ok(PrimitiveValue::new_string(s.as_str()).into()),
            TypedExprKind::CompoundString(parts) => {
                let mut result = String::new();
                for part in parts {
                    let value = self.evaluate(part)?;
                    result.push_str(&self.canonical_string(&value, part.span)?);
                }
                Ok(PrimitiveValue::new_string(result).into())
            }
            TypedExprKind::Ident(name) => self
                .context
                .resolve_name(name)
                .ok_or_else(|| missing_binding(name, expr.span)),
            TypedExprKind::Array(elements) => Ok(Value::new_array(
                elements
                    .iter()
                    .map(|e| self.evaluate(e))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            TypedExprKind::Map(items) => {
                let mut entries = IndexMap::new();
                for (k, v) in items {
                    let key = match self.evaluate(k)? {
                        Value::Primitive(key) => key,
                        _ => return Err(internal_error("non-primitive map key", k.span)),
                    };
                    entries.insert(key, self.evaluate(v)?);
                }
                Ok(Value::new_map(entries))
            }
            TypedExprKind::Object(members) => Ok(Value::new_object(
                members
                    .iter()
                    .map(|(n, e)| Ok((n.clone(), self.evaluate(e)?)))
                    .collect::<Result<Vec<_>, Diagnostic>>()?,
            )),
            TypedExprKind::Struct { name, members } => Ok(Value::new_struct(
                name.clone(),
                members
                    .iter()
                    .map(|(n, e)| Ok((n.clone(), self.evaluate(e)?)))
                    .collect::<Result<Vec<_>, Diagnostic>>()?,
            )),
            TypedExprKind::Pair(left, right) => {
                Ok(Value::new_pair(self.evaluate(left)?, self.evaluate(right)?))
            }
            TypedExprKind::Unary { op, operand } => self.evaluate_unary(*op, operand, expr.span),
            TypedExprKind::Binary { op, lhs, rhs } => {
                self.evaluate_binary(*op, lhs, rhs, expr)
            }
            TypedExprKind::IfThenElse {
                condition,
                true_expr,
                false_expr,
            } => {
                let condition = self.boolean_operand(condition)?;
                if condition {
                    self.evaluate(true_expr)
                } else {
                    self.evaluate(false_expr)
                }
            }
            TypedExprKind::Apply {
                target, arguments, ..
            } => {
                let callback = stdlib::function(target)
                    .ok_or_else(|| internal_error("unresolved function", expr.span))?;
                let arguments = arguments
                    .iter()
                    .map(|a| Ok(CallArgument::new(self.evaluate(a)?, a.span)))
                    .collect::<Result<Vec<_>, Diagnostic>>()?;
                callback(CallContext::new(
                    self.context,
                    expr.span,
                    &arguments,
                    expr.ty.clone(),
                ))
            }
            TypedExprKind::At { target, index } => self.evaluate_at(target, index),
            TypedExprKind::GetName { target, member } => {
                self.evaluate_get_name(target, member, expr.span)
            }
            TypedExprKind::PlaceholderEqual {
                true_expr,
                false_expr,
                condition,
            } => {
                let condition = self.boolean_operand(condition)?;
                if condition {
                    self.evaluate(true_expr)
                } else {
                    self.evaluate(false_expr)
                }
            }
            TypedExprKind::PlaceholderDefault { default, value } => {
                let value = self.evaluate(value)?;
                if value.is_none() {
                    self.evaluate(default)
                } else {
                    Ok(value)
                }
            }
            TypedExprKind::PlaceholderSep { separator, array } => {
                let separator = self.evaluate(separator)?;
                let separator = self.canonical_string(&separator, expr.span)?;
                let array = self.evaluate(array)?;
                if array.is_none() {
                    // Propagate absence for an enclosing `default=` option.
                    return Ok(Value::None);
                }
                let elements = array
                    .as_array()
                    .ok_or_else(|| internal_error("non-array `sep` operand", expr.span))?;
                let mut result = String::new();
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        result.push_str(&separator);
                    }
                    result.push_str(&self.canonical_string(element, expr.span)?);
                }
                Ok(PrimitiveValue::new_string(result).into())
            }
            TypedExprKind::Coerce { expr: inner } => {
                let value = self.evaluate(inner)?;
                value
                    .coerce(&expr.ty)
                    .map_err(|e| runtime_type_mismatch(e, &expr.ty, inner.span))
            }
        }
    }

    /// Gets the canonical string form of a value.
    ///
    /// `None` renders as the empty string; compound values cannot be
    /// rendered.
    fn canonical_string(&self, value: &Value, span: Span) -> Result<String, Diagnostic> {
        match value {
            Value::None => Ok(String::new()),
            Value::Primitive(v) => Ok(v.canonical_string()),
            Value::Compound(_) => Err(cannot_render(&value.ty(), span)),
        }
    }

    /// Evaluates an operand that must be a boolean.
    fn boolean_operand(&self, expr: &TypedExpr) -> Result<bool, Diagnostic> {
        self.evaluate(expr)?
            .as_boolean()
            .ok_or_else(|| internal_error("non-boolean condition", expr.span))
    }

    /// Evaluates a unary expression.
    fn evaluate_unary(
        &self,
        op: UnaryOp,
        operand: &TypedExpr,
        span: Span,
    ) -> Result<Value, Diagnostic> {
        let value = self.evaluate(operand)?;
        match op {
            UnaryOp::Negation => match value {
                Value::Primitive(PrimitiveValue::Integer(v)) => Ok(v
                    .checked_neg()
                    .ok_or_else(|| integer_negation_not_in_range(v, span))?
                    .into()),
                Value::Primitive(PrimitiveValue::Float(v)) => Ok((-v.0).into()),
                _ => Err(internal_error("non-numeric negation operand", operand.span)),
            },
            UnaryOp::LogicalNot => match value.as_boolean() {
                Some(v) => Ok((!v).into()),
                None => Err(internal_error("non-boolean `!` operand", operand.span)),
            },
        }
    }

    /// Evaluates a binary expression.
    fn evaluate_binary(
        &self,
        op: BinaryOp,
        lhs: &TypedExpr,
        rhs: &TypedExpr,
        expr: &TypedExpr,
    ) -> Result<Value, Diagnostic> {
        match op {
            // Logical operators short-circuit.
            BinaryOp::LogicalAnd => {
                if !self.boolean_operand(lhs)? {
                    return Ok(false.into());
                }
                Ok(self.boolean_operand(rhs)?.into())
            }
            BinaryOp::LogicalOr => {
                if self.boolean_operand(lhs)? {
                    return Ok(true.into());
                }
                Ok(self.boolean_operand(rhs)?.into())
            }
            BinaryOp::Equality => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                Ok((lhs == rhs).into())
            }
            BinaryOp::Inequality => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                Ok((lhs != rhs).into())
            }
            BinaryOp::Less
            | BinaryOp::LessEqual
            | BinaryOp::Greater
            | BinaryOp::GreaterEqual => {
                let l = self.evaluate(lhs)?;
                let r = self.evaluate(rhs)?;
                let ordering = compare(&l, &r)
                    .ok_or_else(|| internal_error("incomparable operands", expr.span))?;
                Ok(match op {
                    BinaryOp::Less => ordering.is_lt(),
                    BinaryOp::LessEqual => ordering.is_le(),
                    BinaryOp::Greater => ordering.is_gt(),
                    BinaryOp::GreaterEqual => ordering.is_ge(),
                    _ => unreachable!("operator is an ordering"),
                }
                .into())
            }
            BinaryOp::Addition
                if matches!(
                    expr.ty.as_primitive(),
                    Some(PrimitiveType::String | PrimitiveType::File | PrimitiveType::Directory)
                ) =>
            {
                let l = self.evaluate(lhs)?;
                let r = self.evaluate(rhs)?;
                let concatenated = format!(
                    "{l}{r}",
                    l = self.canonical_string(&l, lhs.span)?,
                    r = self.canonical_string(&r, rhs.span)?
                );
                Ok(match expr.ty.as_primitive() {
                    Some(PrimitiveType::File) => PrimitiveValue::new_file(concatenated),
                    Some(PrimitiveType::Directory) => {
                        PrimitiveValue::new_directory(concatenated)
                    }
                    _ => PrimitiveValue::new_string(concatenated),
                }
                .into())
            }
            BinaryOp::Addition
            | BinaryOp::Subtraction
            | BinaryOp::Multiplication
            | BinaryOp::Division
            | BinaryOp::Modulo => {
                let l = self.evaluate(lhs)?;
                let r = self.evaluate(rhs)?;
                numeric_op(op, &l, &r, expr.span, rhs.span)
            }
        }
    }

    /// Evaluates an index expression.
    fn evaluate_at(&self, target: &TypedExpr, index: &TypedExpr) -> Result<Value, Diagnostic> {
        let value = self.evaluate(target)?;
        let index_value = self.evaluate(index)?;
        match &value {
            Value::Compound(CompoundValue::Array(elements)) => {
                let i = index_value
                    .as_integer()
                    .ok_or_else(|| internal_error("non-integer array index", index.span))?;
                usize::try_from(i)
                    .ok()
                    .and_then(|i| elements.get(i))
                    .cloned()
                    .ok_or_else(|| index_out_of_bounds(i, elements.len(), index.span))
            }
            Value::Compound(CompoundValue::Map(map)) => {
                let key = match index_value {
                    Value::Primitive(key) => key,
                    _ => return Err(internal_error("non-primitive map key", index.span)),
                };
                map.entries
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| map_key_not_found(index.span))
            }
            _ => Err(internal_error("non-indexable value", target.span)),
        }
    }

    /// Evaluates a member access expression.
    fn evaluate_get_name(
        &self,
        target: &TypedExpr,
        member: &str,
        span: Span,
    ) -> Result<Value, Diagnostic> {
        let value = self.evaluate(target)?;
        match &value {
            Value::Compound(CompoundValue::Pair(pair)) => {
                // Pair accessors are case-insensitive.
                match member.to_ascii_lowercase().as_str() {
                    "left" => Ok(pair.left.clone()),
                    "right" => Ok(pair.right.clone()),
                    _ => Err(not_a_pair_accessor(member, span)),
                }
            }
            Value::Compound(CompoundValue::Struct(s)) => s
                .members
                .get(member)
                .cloned()
                .ok_or_else(|| missing_member(member, span)),
            Value::Compound(CompoundValue::Object(o)) => o
                .members
                .get(member)
                .cloned()
                .ok_or_else(|| missing_member(member, span)),
            Value::Compound(CompoundValue::Call(c)) => c
                .members
                .get(member)
                .cloned()
                .ok_or_else(|| missing_member(member, span)),
            _ => Err(internal_error("member access on a non-compound value", target.span)),
        }
    }
}

/// Compares two primitive values.
///
/// Strings compare lexicographically; files and directories compare as
/// strings. Numerics compare across `Int` and `Float`.
fn compare(l: &Value, r: &Value) -> Option<std::cmp::Ordering> {
    use PrimitiveValue::*;

    let (l, r) = match (l, r) {
        (Value::Primitive(l), Value::Primitive(r)) => (l, r),
        _ => return None,
    };

    match (l, r) {
        (Boolean(l), Boolean(r)) => Some(l.cmp(r)),
        (Integer(l), Integer(r)) => Some(l.cmp(r)),
        (Float(l), Float(r)) => Some(l.cmp(r)),
        (Integer(l), Float(r)) => ordered_float::OrderedFloat(*l as f64).partial_cmp(r),
        (Float(l), Integer(r)) => l.partial_cmp(&ordered_float::OrderedFloat(*r as f64)),
        (String(l) | File(l) | Directory(l), String(r) | File(r) | Directory(r)) => {
            Some(l.cmp(r))
        }
        _ => None,
    }
}

/// Applies a numeric binary operator to two values.
///
/// Integer operands use checked arithmetic; mixed operands promote to
/// floats. Division and modulo by zero are evaluation errors.
fn numeric_op(
    op: BinaryOp,
    l: &Value,
    r: &Value,
    span: Span,
    divisor_span: Span,
) -> Result<Value, Diagnostic> {
    if let (Some(l), Some(r)) = (l.as_integer(), r.as_integer()) {
        let result = match op {
            BinaryOp::Addition => l.checked_add(r),
            BinaryOp::Subtraction => l.checked_sub(r),
            BinaryOp::Multiplication => l.checked_mul(r),
            BinaryOp::Division => {
                if r == 0 {
                    return Err(division_by_zero(span, divisor_span));
                }
                l.checked_div(r)
            }
            BinaryOp::Modulo => {
                if r == 0 {
                    return Err(division_by_zero(span, divisor_span));
                }
                l.checked_rem(r)
            }
            _ => unreachable!("operator is numeric"),
        };
        return result
            .map(Into::into)
            .ok_or_else(|| numeric_overflow(span));
    }

    let as_float = |v: &Value| v.as_float().or_else(|| v.as_integer().map(|i| i as f64));
    match (as_float(l), as_float(r)) {
        (Some(l), Some(r)) => {
            if r == 0.0 && matches!(op, BinaryOp::Division | BinaryOp::Modulo) {
                return Err(division_by_zero(span, divisor_span));
            }
            Ok(match op {
                BinaryOp::Addition => l + r,
                BinaryOp::Subtraction => l - r,
                BinaryOp::Multiplication => l * r,
                BinaryOp::Division => l / r,
                BinaryOp::Modulo => l % r,
                _ => unreachable!("operator is numeric"),
            }
            .into())
        }
        _ => Err(internal_error("non-numeric arithmetic operand", span)),
    }
}

/// Applies declarations to a set of bindings, threading a new set of
/// bindings left to right.
///
/// Already-bound names (externally supplied inputs) are not re-evaluated.
/// An unbound declaration without an external value is an evaluation error.
pub fn apply_declarations(
    declarations: &[TypedDeclaration],
    bindings: Bindings,
    file_source: &dyn FileSource,
) -> Result<Bindings, Diagnostic> {
    let mut bindings = bindings;
    for decl in declarations {
        if let Some(existing) = bindings.get(&decl.name) {
            // Coerce an externally supplied value to the declared type.
            let coerced = existing
                .coerce(&decl.ty)
                .map_err(|e| runtime_type_mismatch(e, &decl.ty, decl.span))?;
            bindings.rebind(decl.name.clone(), coerced);
            continue;
        }

        let value = match &decl.expr {
            Some(expr) => {
                let context = BindingsContext::new(&bindings, file_source);
                let value = ExprEvaluator::new(&context).evaluate(expr)?;
                value
                    .coerce(&decl.ty)
                    .map_err(|e| runtime_type_mismatch(e, &decl.ty, expr.span))?
            }
            None if decl.ty.is_optional() => Value::None,
            None => return Err(missing_binding(&decl.name, decl.span)),
        };

        debug!(name = %decl.name, "binding declaration");
        bindings
            .bind(decl.name.clone(), value)
            .map_err(|_| rebinding_forbidden(&decl.name, decl.span))?;
    }
    Ok(bindings)
}

/// Materializes a command section to its final string.
///
/// Fragments are evaluated, serialized to their canonical string form,
/// concatenated, and dedented.
pub fn apply_command(
    parts: &[TypedCommandPart],
    bindings: &Bindings,
    file_source: &dyn FileSource,
) -> Result<String, Diagnostic> {
    let context = BindingsContext::new(bindings, file_source);
    let evaluator = ExprEvaluator::new(&context);
    let mut command = String::new();
    for part in parts {
        match part {
            TypedCommandPart::Text(text) => command.push_str(text),
            TypedCommandPart::Expr(expr) => {
                let value = evaluator.evaluate(expr)?;
                command.push_str(&evaluator.canonical_string(&value, expr.span)?);
            }
        }
    }
    Ok(strip_leading_whitespace(&command))
}

/// Applies the declarations, scatters, and conditionals of a workflow body
/// to a set of bindings.
///
/// Scatter bodies evaluate once per collection element, with produced
/// bindings collected into arrays; conditional bodies bind their produced
/// names to `None` when the condition does not hold. Call statements cannot
/// be evaluated by the expression engine and are an error unless their
/// outputs are already bound.
pub fn apply_workflow_body(
    elements: &[TypedWorkflowElement],
    bindings: Bindings,
    file_source: &dyn FileSource,
) -> Result<Bindings, Diagnostic> {
    let mut bindings = bindings;
    for element in elements {
        match element {
            TypedWorkflowElement::Decl(decl) => {
                bindings =
                    apply_declarations(std::slice::from_ref(decl), bindings, file_source)?;
            }
            TypedWorkflowElement::Call(call) => {
                if !bindings.contains(&call.name) {
                    return Err(cannot_evaluate_call(&call.name, call.span));
                }
            }
            TypedWorkflowElement::Scatter(scatter) => {
                let collection = {
                    let context = BindingsContext::new(&bindings, file_source);
                    ExprEvaluator::new(&context).evaluate(&scatter.expr)?
                };
                let elements = collection
                    .as_array()
                    .ok_or_else(|| {
                        internal_error("non-array scatter collection", scatter.expr.span)
                    })?
                    .clone();

                let produced = produced_names(&scatter.body);
                let mut columns: IndexMap<String, Vec<Value>> = produced
                    .iter()
                    .map(|name| (name.clone(), Vec::with_capacity(elements.len())))
                    .collect();

                for element in elements {
                    let mut child = bindings.clone();
                    child.rebind(scatter.variable.clone(), element);
                    let child = apply_workflow_body(&scatter.body, child, file_source)?;
                    for (name, column) in &mut columns {
                        column.push(child.get(name).cloned().unwrap_or(Value::None));
                    }
                }

                for (name, column) in columns {
                    bindings.rebind(name, Value::new_array(column));
                }
            }
            TypedWorkflowElement::Conditional(conditional) => {
                let condition = {
                    let context = BindingsContext::new(&bindings, file_source);
                    ExprEvaluator::new(&context)
                        .evaluate(&conditional.expr)?
                        .as_boolean()
                        .ok_or_else(|| {
                            internal_error("non-boolean condition", conditional.expr.span)
                        })?
                };

                let produced = produced_names(&conditional.body);
                if condition {
                    let child =
                        apply_workflow_body(&conditional.body, bindings.clone(), file_source)?;
                    for name in produced {
                        let value = child.get(&name).cloned().unwrap_or(Value::None);
                        bindings.rebind(name, value);
                    }
                } else {
                    for name in produced {
                        bindings.rebind(name, Value::None);
                    }
                }
            }
        }
    }
    Ok(bindings)
}

/// Collects the names a workflow body produces in its enclosing scope.
///
/// Scatter iteration variables are not produced.
fn produced_names(elements: &[TypedWorkflowElement]) -> Vec<String> {
    let mut names = Vec::new();
    for element in elements {
        match element {
            TypedWorkflowElement::Decl(decl) => names.push(decl.name.clone()),
            TypedWorkflowElement::Call(call) => names.push(call.name.clone()),
            TypedWorkflowElement::Scatter(scatter) => {
                names.extend(produced_names(&scatter.body));
            }
            TypedWorkflowElement::Conditional(conditional) => {
                names.extend(produced_names(&conditional.body));
            }
        }
    }
    names
}

/// The result of evaluating a task's declarations and command.
#[derive(Debug)]
pub struct EvaluatedTask {
    /// The bindings of the task's inputs and declarations.
    pub bindings: Bindings,
    /// The materialized command string.
    pub command: String,
}

/// Evaluates the declaration and command sections of tasks.
pub struct TaskEvaluator<'a> {
    /// The injected file source.
    file_source: &'a dyn FileSource,
}

impl<'a> TaskEvaluator<'a> {
    /// Creates a new task evaluator.
    pub fn new(file_source: &'a dyn FileSource) -> Self {
        Self { file_source }
    }

    /// Evaluates a task's inputs, declarations, and command given the
    /// externally supplied input bindings.
    pub fn evaluate(
        &self,
        task: &TypedTask,
        inputs: Bindings,
    ) -> Result<EvaluatedTask, Diagnostic> {
        debug!(task = %task.name, "evaluating task");
        let bindings = apply_declarations(&task.inputs, inputs, self.file_source)?;
        let bindings = apply_declarations(&task.declarations, bindings, self.file_source)?;
        let command = apply_command(&task.command, &bindings, self.file_source)?;
        Ok(EvaluatedTask { bindings, command })
    }

    /// Evaluates a task's outputs given the bindings of an evaluated task.
    ///
    /// Returns the output values in declaration order.
    pub fn evaluate_outputs(
        &self,
        task: &TypedTask,
        bindings: Bindings,
    ) -> Result<IndexMap<String, Value>, Diagnostic> {
        let bindings = apply_declarations(&task.outputs, bindings, self.file_source)?;
        Ok(task
            .outputs
            .iter()
            .map(|o| {
                (
                    o.name.clone(),
                    bindings
                        .get(&o.name)
                        .cloned()
                        .expect("output should be bound"),
                )
            })
            .collect())
    }
}
