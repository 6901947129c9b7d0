//! Standard library function signatures and overload resolution.
//!
//! The table is a fixed set of polymorphic prototypes; signatures may
//! contain type parameters that bind by unification against argument types
//! under coercion. The table is constructed once and never mutated.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::types::Coercible;
use crate::types::PrimitiveType;
use crate::types::Type;
use crate::types::common_type;

/// The global standard library table.
pub static STDLIB: LazyLock<StandardLibrary> = LazyLock::new(StandardLibrary::new);

/// A constraint on a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The bound type must be a required primitive type.
    Primitive,
}

impl Constraint {
    /// Determines if the given type satisfies the constraint.
    fn is_satisfied_by(&self, ty: &Type) -> bool {
        match self {
            Self::Primitive => {
                matches!(ty, Type::Primitive(_)) || ty.is_indeterminate()
            }
        }
    }
}

/// A type parameter of a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeParameter {
    /// The name of the type parameter.
    name: &'static str,
    /// The constraint on the type parameter, if any.
    constraint: Option<Constraint>,
}

impl TypeParameter {
    /// Creates an unconstrained type parameter.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            constraint: None,
        }
    }

    /// Creates a constrained type parameter.
    pub const fn constrained(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            constraint: Some(constraint),
        }
    }
}

/// A type in a function signature.
///
/// Unlike [`Type`], a functional type may reference the signature's type
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionalType {
    /// A concrete type.
    Concrete(Type),
    /// A reference to a type parameter.
    Parameter(&'static str),
    /// An array of a functional type.
    Array(Box<FunctionalType>),
    /// A map between functional types.
    Map(Box<FunctionalType>, Box<FunctionalType>),
    /// A pair of functional types.
    Pair(Box<FunctionalType>, Box<FunctionalType>),
    /// An optional functional type.
    Optional(Box<FunctionalType>),
}

impl FunctionalType {
    /// Determines if the given argument type matches this parameter type,
    /// accumulating type parameter bindings.
    fn matches(&self, arg: &Type, bindings: &mut IndexMap<&'static str, Type>) -> bool {
        match self {
            Self::Concrete(ty) => arg.is_coercible_to(ty),
            Self::Parameter(name) => {
                let bound = match bindings.get(*name) {
                    Some(prev) => match common_type(prev, arg) {
                        Some(ty) => ty,
                        None => return false,
                    },
                    None => arg.clone(),
                };
                bindings.insert(name, bound);
                true
            }
            Self::Array(element) => match arg {
                Type::Array {
                    element: arg_element,
                    ..
                } => element.matches(arg_element, bindings),
                _ if arg.is_indeterminate() => element.matches(&Type::Any, bindings),
                _ => false,
            },
            Self::Map(key, value) => match arg {
                Type::Map {
                    key: arg_key,
                    value: arg_value,
                } => key.matches(arg_key, bindings) && value.matches(arg_value, bindings),
                _ if arg.is_indeterminate() => {
                    key.matches(&Type::Any, bindings) && value.matches(&Type::Any, bindings)
                }
                _ => false,
            },
            Self::Pair(left, right) => match arg {
                Type::Pair {
                    left: arg_left,
                    right: arg_right,
                } => left.matches(arg_left, bindings) && right.matches(arg_right, bindings),
                _ if arg.is_indeterminate() => {
                    left.matches(&Type::Any, bindings) && right.matches(&Type::Any, bindings)
                }
                _ => false,
            },
            Self::Optional(inner) => match arg {
                Type::Optional(arg_inner) => inner.matches(arg_inner, bindings),
                // T matches T? by coercion.
                _ => inner.matches(arg, bindings),
            },
        }
    }

    /// Realizes the functional type into a concrete type given the bound
    /// type parameters.
    ///
    /// Unbound type parameters realize as `Any`.
    fn realize(&self, bindings: &IndexMap<&'static str, Type>) -> Type {
        match self {
            Self::Concrete(ty) => ty.clone(),
            Self::Parameter(name) => bindings.get(*name).cloned().unwrap_or(Type::Any),
            Self::Array(element) => Type::array(element.realize(bindings)),
            Self::Map(key, value) => Type::map(key.realize(bindings), value.realize(bindings)),
            Self::Pair(left, right) => {
                Type::pair(left.realize(bindings), right.realize(bindings))
            }
            Self::Optional(inner) => inner.realize(bindings).optional(),
        }
    }
}

impl fmt::Display for FunctionalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(ty) => ty.fmt(f),
            Self::Parameter(name) => write!(f, "{name}"),
            Self::Array(element) => write!(f, "Array[{element}]"),
            Self::Map(key, value) => write!(f, "Map[{key}, {value}]"),
            Self::Pair(left, right) => write!(f, "Pair[{left}, {right}]"),
            Self::Optional(inner) => write!(f, "{inner}?"),
        }
    }
}

impl From<Type> for FunctionalType {
    fn from(value: Type) -> Self {
        Self::Concrete(value)
    }
}

impl From<PrimitiveType> for FunctionalType {
    fn from(value: PrimitiveType) -> Self {
        Self::Concrete(value.into())
    }
}

/// A single signature of a standard library function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// The type parameters of the signature.
    type_parameters: &'static [TypeParameter],
    /// The parameter types of the signature.
    parameters: Vec<FunctionalType>,
    /// The number of required parameters.
    ///
    /// Parameters beyond this count may be omitted at the call site.
    required: usize,
    /// The return type of the signature.
    ret: FunctionalType,
}

impl FunctionSignature {
    /// Creates a new signature where every parameter is required.
    fn new(
        type_parameters: &'static [TypeParameter],
        parameters: impl IntoIterator<Item = FunctionalType>,
        ret: FunctionalType,
    ) -> Self {
        let parameters: Vec<_> = parameters.into_iter().collect();
        let required = parameters.len();
        Self {
            type_parameters,
            parameters,
            required,
            ret,
        }
    }

    /// Creates a new signature with trailing optional parameters.
    fn with_optional(
        type_parameters: &'static [TypeParameter],
        parameters: impl IntoIterator<Item = FunctionalType>,
        required: usize,
        ret: FunctionalType,
    ) -> Self {
        Self {
            type_parameters,
            parameters: parameters.into_iter().collect(),
            required,
            ret,
        }
    }

    /// Gets the number of required parameters of the signature.
    pub fn required(&self) -> usize {
        self.required
    }

    /// Gets the parameter types of the signature.
    pub fn parameters(&self) -> &[FunctionalType] {
        &self.parameters
    }

    /// Attempts to bind the signature against the given argument types.
    ///
    /// On success, returns the realized parameter and return types.
    fn bind(&self, args: &[Type]) -> Option<(Vec<Type>, Type)> {
        if args.len() < self.required || args.len() > self.parameters.len() {
            return None;
        }

        let mut bindings = IndexMap::new();
        for (param, arg) in self.parameters.iter().zip(args) {
            if !param.matches(arg, &mut bindings) {
                return None;
            }
        }

        for parameter in self.type_parameters {
            if let (Some(constraint), Some(bound)) =
                (parameter.constraint, bindings.get(parameter.name))
            {
                if !constraint.is_satisfied_by(bound) {
                    return None;
                }
            }
        }

        let parameters = self
            .parameters
            .iter()
            .map(|p| p.realize(&bindings))
            .collect();
        Some((parameters, self.ret.realize(&bindings)))
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if i >= self.required {
                write!(f, "<{parameter}>")?;
            } else {
                write!(f, "{parameter}")?;
            }
        }
        write!(f, ") -> {ret}", ret = self.ret)
    }
}

/// An error binding a function call to a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionBindError {
    /// The call supplies too few arguments.
    ///
    /// The value is the minimum number of arguments.
    TooFewArguments(usize),
    /// The call supplies too many arguments.
    ///
    /// The value is the maximum number of arguments.
    TooManyArguments(usize),
    /// An argument has a mismatched type.
    ArgumentTypeMismatch {
        /// The index of the mismatched argument.
        index: usize,
        /// A description of the expected type.
        expected: String,
    },
    /// The call is ambiguous between two signatures.
    Ambiguous {
        /// A description of the first matching signature.
        first: String,
        /// A description of the second matching signature.
        second: String,
    },
}

/// The result of successfully binding a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The index of the bound signature.
    pub signature: usize,
    /// The realized parameter types of the call.
    pub parameters: Vec<Type>,
    /// The realized return type of the call.
    pub return_type: Type,
}

/// A standard library function.
#[derive(Debug, Clone)]
pub struct Function {
    /// The name of the function.
    name: &'static str,
    /// The signatures of the function, most specific first.
    signatures: Vec<FunctionSignature>,
}

impl Function {
    /// Creates a new function.
    fn new(name: &'static str, signatures: impl IntoIterator<Item = FunctionSignature>) -> Self {
        Self {
            name,
            signatures: signatures.into_iter().collect(),
        }
    }

    /// Gets the name of the function.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Gets the signatures of the function.
    pub fn signatures(&self) -> &[FunctionSignature] {
        &self.signatures
    }

    /// Binds the function against the given argument types, resolving the
    /// overload.
    ///
    /// Resolution selects the signature whose parameters all unify with the
    /// argument types, preferring the more specific signature when more than
    /// one matches; a tie is ambiguous.
    pub fn bind(&self, args: &[Type]) -> Result<Binding, FunctionBindError> {
        let min_required = self
            .signatures
            .iter()
            .map(|s| s.required)
            .min()
            .expect("function should have signatures");
        if args.len() < min_required {
            return Err(FunctionBindError::TooFewArguments(min_required));
        }

        let max_parameters = self
            .signatures
            .iter()
            .map(|s| s.parameters.len())
            .max()
            .expect("function should have signatures");
        if args.len() > max_parameters {
            return Err(FunctionBindError::TooManyArguments(max_parameters));
        }

        let mut matches: Vec<(usize, Vec<Type>, Type)> = Vec::new();
        for (index, signature) in self.signatures.iter().enumerate() {
            if let Some((parameters, ret)) = signature.bind(args) {
                matches.push((index, parameters, ret));
            }
        }

        match matches.len() {
            0 => {
                // Report the first failing argument of the first signature
                // with a compatible arity.
                let signature = self
                    .signatures
                    .iter()
                    .find(|s| args.len() >= s.required && args.len() <= s.parameters.len())
                    .unwrap_or(&self.signatures[0]);
                let mut bindings = IndexMap::new();
                for (index, (param, arg)) in
                    signature.parameters.iter().zip(args).enumerate()
                {
                    if !param.matches(arg, &mut bindings) {
                        return Err(FunctionBindError::ArgumentTypeMismatch {
                            index,
                            expected: param.to_string(),
                        });
                    }
                }
                // Arity matched and every argument matched individually; the
                // failure came from a constraint.
                Err(FunctionBindError::ArgumentTypeMismatch {
                    index: 0,
                    expected: signature.parameters[0].to_string(),
                })
            }
            1 => {
                let (signature, parameters, return_type) = matches.swap_remove(0);
                Ok(Binding {
                    signature,
                    parameters,
                    return_type,
                })
            }
            _ => {
                // Indeterminate arguments match everything; fall back to the
                // first (most specific) signature rather than erroring.
                if args.iter().any(Type::is_indeterminate) {
                    let (signature, parameters, return_type) = matches.remove(0);
                    return Ok(Binding {
                        signature,
                        parameters,
                        return_type,
                    });
                }

                let (first_index, first_params, first_ret) = &matches[0];
                let (second_index, second_params, _) = &matches[1];
                let first_more_specific = more_specific(first_params, second_params);
                let second_more_specific = more_specific(second_params, first_params);
                match (first_more_specific, second_more_specific) {
                    (true, false) => Ok(Binding {
                        signature: *first_index,
                        parameters: first_params.clone(),
                        return_type: first_ret.clone(),
                    }),
                    (false, true) => {
                        let (signature, parameters, return_type) = matches.swap_remove(1);
                        Ok(Binding {
                            signature,
                            parameters,
                            return_type,
                        })
                    }
                    _ => Err(FunctionBindError::Ambiguous {
                        first: self.signatures[*first_index].to_string(),
                        second: self.signatures[*second_index].to_string(),
                    }),
                }
            }
        }
    }
}

/// Determines if one realized parameter list is strictly more specific than
/// another.
fn more_specific(a: &[Type], b: &[Type]) -> bool {
    a.iter().zip(b).all(|(a, b)| a.is_coercible_to(b))
        && !b.iter().zip(a).all(|(b, a)| b.is_coercible_to(a))
}

/// The table of standard library functions.
#[derive(Debug)]
pub struct StandardLibrary {
    /// The functions of the standard library, keyed by name.
    functions: IndexMap<&'static str, Function>,
}

impl StandardLibrary {
    /// Gets a function by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Iterates the functions of the standard library.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// Constructs the standard library table.
    fn new() -> Self {
        use PrimitiveType::*;

        /// An unconstrained `X` type parameter list.
        const X: &[TypeParameter] = &[TypeParameter::new("X")];
        /// Unconstrained `X` and `Y` type parameter lists.
        const XY: &[TypeParameter] = &[TypeParameter::new("X"), TypeParameter::new("Y")];
        /// A primitive-constrained `P` type parameter list.
        const P: &[TypeParameter] =
            &[TypeParameter::constrained("P", Constraint::Primitive)];

        /// Shorthand for a type parameter reference.
        fn p(name: &'static str) -> FunctionalType {
            FunctionalType::Parameter(name)
        }

        /// Shorthand for an array of a functional type.
        fn array(element: FunctionalType) -> FunctionalType {
            FunctionalType::Array(Box::new(element))
        }

        /// Shorthand for an optional functional type.
        fn optional(inner: FunctionalType) -> FunctionalType {
            FunctionalType::Optional(Box::new(inner))
        }

        /// Shorthand for a pair of functional types.
        fn pair(left: FunctionalType, right: FunctionalType) -> FunctionalType {
            FunctionalType::Pair(Box::new(left), Box::new(right))
        }

        /// Shorthand for a map of functional types.
        fn map(key: FunctionalType, value: FunctionalType) -> FunctionalType {
            FunctionalType::Map(Box::new(key), Box::new(value))
        }

        let mut functions = IndexMap::new();
        let mut define = |name: &'static str, signatures: Vec<FunctionSignature>| {
            let previous = functions.insert(name, Function::new(name, signatures));
            assert!(previous.is_none(), "function defined twice");
        };

        define(
            "floor",
            vec![FunctionSignature::new(&[], [Float.into()], Integer.into())],
        );
        define(
            "ceil",
            vec![FunctionSignature::new(&[], [Float.into()], Integer.into())],
        );
        define(
            "round",
            vec![FunctionSignature::new(&[], [Float.into()], Integer.into())],
        );
        define(
            "length",
            vec![FunctionSignature::new(X, [array(p("X"))], Integer.into())],
        );
        define(
            "range",
            vec![FunctionSignature::new(
                &[],
                [Integer.into()],
                FunctionalType::Concrete(Type::array(Integer.into())),
            )],
        );
        define(
            "prefix",
            vec![FunctionSignature::new(
                P,
                [String.into(), array(p("P"))],
                FunctionalType::Concrete(Type::array(String.into())),
            )],
        );
        define(
            "sep",
            vec![FunctionSignature::new(
                P,
                [String.into(), array(p("P"))],
                String.into(),
            )],
        );
        define(
            "basename",
            vec![FunctionSignature::with_optional(
                &[],
                [String.into(), String.into()],
                1,
                String.into(),
            )],
        );
        define(
            "defined",
            vec![FunctionSignature::new(
                X,
                [optional(p("X"))],
                Boolean.into(),
            )],
        );
        define(
            "select_first",
            vec![FunctionSignature::new(X, [array(optional(p("X")))], p("X"))],
        );
        define(
            "select_all",
            vec![FunctionSignature::new(
                X,
                [array(optional(p("X")))],
                array(p("X")),
            )],
        );
        define(
            "flatten",
            vec![FunctionSignature::new(
                X,
                [array(array(p("X")))],
                array(p("X")),
            )],
        );
        define(
            "transpose",
            vec![FunctionSignature::new(
                X,
                [array(array(p("X")))],
                array(array(p("X"))),
            )],
        );
        define(
            "zip",
            vec![FunctionSignature::new(
                XY,
                [array(p("X")), array(p("Y"))],
                array(pair(p("X"), p("Y"))),
            )],
        );
        define(
            "cross",
            vec![FunctionSignature::new(
                XY,
                [array(p("X")), array(p("Y"))],
                array(pair(p("X"), p("Y"))),
            )],
        );
        define(
            "sub",
            vec![FunctionSignature::new(
                &[],
                [String.into(), String.into(), String.into()],
                String.into(),
            )],
        );
        define(
            "glob",
            vec![FunctionSignature::new(
                &[],
                [String.into()],
                FunctionalType::Concrete(Type::array(File.into())),
            )],
        );
        define(
            "size",
            vec![
                FunctionSignature::with_optional(
                    &[],
                    [optional(File.into()), String.into()],
                    1,
                    Float.into(),
                ),
                FunctionSignature::with_optional(
                    &[],
                    [array(optional(File.into())), String.into()],
                    1,
                    Float.into(),
                ),
            ],
        );
        define(
            "stdout",
            vec![FunctionSignature::new(&[], Vec::new(), File.into())],
        );
        define(
            "stderr",
            vec![FunctionSignature::new(&[], Vec::new(), File.into())],
        );
        define(
            "read_lines",
            vec![FunctionSignature::new(
                &[],
                [File.into()],
                FunctionalType::Concrete(Type::array(String.into())),
            )],
        );
        define(
            "read_tsv",
            vec![FunctionSignature::new(
                &[],
                [File.into()],
                FunctionalType::Concrete(Type::array(Type::array(String.into()))),
            )],
        );
        define(
            "read_map",
            vec![FunctionSignature::new(
                &[],
                [File.into()],
                FunctionalType::Concrete(Type::map(String.into(), String.into())),
            )],
        );
        define(
            "read_json",
            vec![FunctionSignature::new(
                &[],
                [File.into()],
                FunctionalType::Concrete(Type::Any),
            )],
        );
        define(
            "read_string",
            vec![FunctionSignature::new(&[], [File.into()], String.into())],
        );
        define(
            "read_boolean",
            vec![FunctionSignature::new(&[], [File.into()], Boolean.into())],
        );
        define(
            "read_float",
            vec![FunctionSignature::new(&[], [File.into()], Float.into())],
        );
        define(
            "read_int",
            vec![FunctionSignature::new(&[], [File.into()], Integer.into())],
        );
        define(
            "write_lines",
            vec![FunctionSignature::new(
                &[],
                [FunctionalType::Concrete(Type::array(String.into()))],
                File.into(),
            )],
        );
        define(
            "write_tsv",
            vec![FunctionSignature::new(
                &[],
                [FunctionalType::Concrete(Type::array(Type::array(
                    String.into(),
                )))],
                File.into(),
            )],
        );
        define(
            "write_map",
            vec![FunctionSignature::new(
                &[],
                [FunctionalType::Concrete(Type::map(
                    String.into(),
                    String.into(),
                ))],
                File.into(),
            )],
        );
        define(
            "write_json",
            vec![FunctionSignature::new(X, [p("X")], File.into())],
        );

        Self { functions }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::PrimitiveType::*;

    /// Binds a function by name against the given argument types.
    fn bind(name: &str, args: &[Type]) -> Result<Binding, FunctionBindError> {
        STDLIB
            .function(name)
            .expect("function should exist")
            .bind(args)
    }

    #[test]
    fn type_parameters_bind_by_unification() {
        let binding = bind("select_first", &[Type::array(Type::from(Integer).optional())])
            .expect("binding should succeed");
        assert_eq!(binding.return_type, Type::from(Integer));

        let binding = bind("zip", &[
            Type::array(Integer.into()),
            Type::array(String.into()),
        ])
        .expect("binding should succeed");
        assert_eq!(
            binding.return_type,
            Type::array(Type::pair(Integer.into(), String.into()))
        );
    }

    #[test]
    fn arguments_coerce_to_parameter_types() {
        // Int coerces to Float.
        let binding = bind("floor", &[Integer.into()]).expect("binding should succeed");
        assert_eq!(binding.return_type, Type::from(Integer));

        // String coerces to File.
        bind("read_lines", &[String.into()]).expect("binding should succeed");
    }

    #[test]
    fn overloads_resolve_by_argument_shape() {
        let scalar = bind("size", &[Type::from(File).optional()])
            .expect("binding should succeed");
        assert_eq!(scalar.signature, 0);

        let array = bind("size", &[Type::array(File.into())])
            .expect("binding should succeed");
        assert_eq!(array.signature, 1);

        // The optional unit argument may be supplied.
        bind("size", &[Type::from(File), Type::from(String)])
            .expect("binding should succeed");
    }

    #[test]
    fn arity_errors() {
        assert_eq!(
            bind("floor", &[]),
            Err(FunctionBindError::TooFewArguments(1))
        );
        assert_eq!(
            bind("floor", &[Float.into(), Float.into()]),
            Err(FunctionBindError::TooManyArguments(1))
        );
    }

    #[test]
    fn mismatched_arguments_name_the_expected_type() {
        match bind("length", &[Type::from(Integer)]) {
            Err(FunctionBindError::ArgumentTypeMismatch { index, expected }) => {
                assert_eq!(index, 0);
                assert_eq!(expected, "Array[X]");
            }
            r => panic!("unexpected binding result: {r:?}"),
        }
    }

    #[test]
    fn constrained_parameters_reject_compound_elements() {
        bind("sep", &[
            Type::from(String),
            Type::array(Integer.into()),
        ])
        .expect("binding should succeed");

        match bind("sep", &[
            Type::from(String),
            Type::array(Type::array(Integer.into())),
        ]) {
            Err(FunctionBindError::ArgumentTypeMismatch { .. }) => {}
            r => panic!("unexpected binding result: {r:?}"),
        }
    }
}
