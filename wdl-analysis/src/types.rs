//! Representation of the WDL type system.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// A trait implemented on types that are coercible to other types.
pub trait Coercible {
    /// Determines if the type is coercible to the target type.
    fn is_coercible_to(&self, target: &Self) -> bool;
}

/// Represents a primitive WDL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// The type is a `Boolean`.
    Boolean,
    /// The type is an `Int`.
    Integer,
    /// The type is a `Float`.
    Float,
    /// The type is a `String`.
    String,
    /// The type is a `File`.
    File,
    /// The type is a `Directory`.
    Directory,
}

impl Coercible for PrimitiveType {
    fn is_coercible_to(&self, target: &Self) -> bool {
        if self == target {
            return true;
        }

        // The relation is the transitive closure of the base lattice
        // (Int -> Float, numerics/Boolean -> String, String <-> File,
        // String -> Directory), keeping it reflexive and transitive.
        matches!(
            (self, target),
            // Int -> Float, Int -> String
            (Self::Integer, Self::Float)
            | (Self::Integer, Self::String)
            // Float -> String
            | (Self::Float, Self::String)
            // Boolean -> String
            | (Self::Boolean, Self::String)
            // String -> File, String -> Directory
            | (Self::String, Self::File)
            | (Self::String, Self::Directory)
            // File -> String, Directory -> String
            | (Self::File, Self::String)
            | (Self::Directory, Self::String)
            // File and Directory reach each other via String
            | (Self::File, Self::Directory)
            | (Self::Directory, Self::File)
            // Numerics and Boolean reach File and Directory via String
            | (Self::Integer, Self::File)
            | (Self::Integer, Self::Directory)
            | (Self::Float, Self::File)
            | (Self::Float, Self::Directory)
            | (Self::Boolean, Self::File)
            | (Self::Boolean, Self::Directory)
        )
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "Boolean"),
            Self::Integer => write!(f, "Int"),
            Self::Float => write!(f, "Float"),
            Self::String => write!(f, "String"),
            Self::File => write!(f, "File"),
            Self::Directory => write!(f, "Directory"),
        }
    }
}

/// Represents the type of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    /// The name of the struct.
    name: String,
    /// The members of the struct, in definition order.
    members: IndexMap<String, Type>,
}

impl StructType {
    /// Constructs a new struct type.
    pub fn new(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (String, Type)>,
    ) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }

    /// Gets the name of the struct.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the members of the struct.
    pub fn members(&self) -> &IndexMap<String, Type> {
        &self.members
    }

    /// Determines if two struct definitions are structurally identical.
    ///
    /// Identity ignores the struct name; members must agree in name, type,
    /// and order.
    pub fn is_identical(&self, other: &Self) -> bool {
        self.members.len() == other.members.len()
            && self
                .members
                .iter()
                .zip(other.members.iter())
                .all(|((an, at), (bn, bt))| an == bn && at == bt)
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name}", name = self.name)
    }
}

/// Represents the type of a call's outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallType {
    /// The name of the call within its scope.
    name: String,
    /// The output types of the call, in definition order.
    outputs: IndexMap<String, Type>,
}

impl CallType {
    /// Constructs a new call type.
    pub fn new(
        name: impl Into<String>,
        outputs: impl IntoIterator<Item = (String, Type)>,
    ) -> Self {
        Self {
            name: name.into(),
            outputs: outputs.into_iter().collect(),
        }
    }

    /// Gets the name of the call.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the output types of the call.
    pub fn outputs(&self) -> &IndexMap<String, Type> {
        &self.outputs
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call to `{name}`", name = self.name)
    }
}

/// Represents a WDL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// The type is a primitive type.
    Primitive(PrimitiveType),
    /// The type is an `Array`.
    Array {
        /// The element type of the array.
        element: Box<Type>,
        /// Whether or not the array type is non-empty.
        non_empty: bool,
    },
    /// The type is a `Map`.
    Map {
        /// The key type of the map.
        key: Box<Type>,
        /// The value type of the map.
        value: Box<Type>,
    },
    /// The type is a `Pair`.
    Pair {
        /// The left type of the pair.
        left: Box<Type>,
        /// The right type of the pair.
        right: Box<Type>,
    },
    /// The type is an optional type.
    ///
    /// The inner type is never itself optional; construction through
    /// [`Type::optional`] flattens.
    Optional(Box<Type>),
    /// The type is an `Object`.
    Object,
    /// The type is a struct.
    Struct(Arc<StructType>),
    /// The type is the outputs of a call.
    Call(Arc<CallType>),
    /// The top type, to which every type coerces.
    ///
    /// Also used as an "indeterminate" type after a type error, so that
    /// inference can continue producing diagnostics.
    Any,
    /// The placeholder type of an empty literal, which matches any target.
    Unknown,
}

impl Type {
    /// Constructs an array type.
    pub fn array(element: Type) -> Self {
        Self::Array {
            element: Box::new(element),
            non_empty: false,
        }
    }

    /// Constructs a non-empty array type.
    pub fn non_empty_array(element: Type) -> Self {
        Self::Array {
            element: Box::new(element),
            non_empty: true,
        }
    }

    /// Constructs a map type.
    pub fn map(key: Type, value: Type) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Constructs a pair type.
    pub fn pair(left: Type, right: Type) -> Self {
        Self::Pair {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Makes the type optional.
    ///
    /// An already-optional type is returned unchanged; optionals do not
    /// nest.
    pub fn optional(self) -> Self {
        match self {
            Self::Optional(_) => self,
            _ => Self::Optional(Box::new(self)),
        }
    }

    /// Determines if the type is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Makes the type required if it is optional.
    ///
    /// If the type is already required, this is a no-op.
    pub fn require(&self) -> Self {
        match self {
            Self::Optional(inner) => (**inner).clone(),
            _ => self.clone(),
        }
    }

    /// Gets the primitive type if the type is primitive.
    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(ty) => Some(*ty),
            _ => None,
        }
    }

    /// Determines if the type is `Any` or `Unknown`.
    ///
    /// Indeterminate types match anything; diagnostics avoid piling onto
    /// expressions that already failed to infer.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Any | Self::Unknown)
    }
}

impl From<PrimitiveType> for Type {
    fn from(value: PrimitiveType) -> Self {
        Self::Primitive(value)
    }
}

impl Coercible for Type {
    fn is_coercible_to(&self, target: &Self) -> bool {
        if self == target {
            return true;
        }

        match (self, target) {
            // Any is coercible to and from everything
            (Self::Any, _) | (_, Self::Any) => true,

            // Unknown (an empty literal) matches any target
            (Self::Unknown, _) | (_, Self::Unknown) => true,

            // X? -> Y? (if X is coercible to Y)
            (Self::Optional(src), Self::Optional(target)) => src.is_coercible_to(target),

            // X -> Y? (if X is coercible to Y)
            (_, Self::Optional(target)) => self.is_coercible_to(target),

            // An optional type is not coercible to a required type
            (Self::Optional(_), _) => false,

            (Self::Primitive(src), Self::Primitive(target)) => src.is_coercible_to(target),

            // Array[X] -> Array[Y], Array[X]+ -> Array[Y] (if X is coercible
            // to Y); Array[X] is not coercible to Array[Y]+
            (
                Self::Array {
                    element: src,
                    non_empty: src_non_empty,
                },
                Self::Array {
                    element: target,
                    non_empty: target_non_empty,
                },
            ) => (*src_non_empty || !target_non_empty) && src.is_coercible_to(target),

            // Map[W, X] -> Map[Y, Z] (if W is coercible to Y and X is
            // coercible to Z)
            (
                Self::Map {
                    key: src_key,
                    value: src_value,
                },
                Self::Map {
                    key: target_key,
                    value: target_value,
                },
            ) => src_key.is_coercible_to(target_key) && src_value.is_coercible_to(target_value),

            // Pair[W, X] -> Pair[Y, Z] (if W is coercible to Y and X is
            // coercible to Z)
            (
                Self::Pair {
                    left: src_left,
                    right: src_right,
                },
                Self::Pair {
                    left: target_left,
                    right: target_right,
                },
            ) => src_left.is_coercible_to(target_left)
                && src_right.is_coercible_to(target_right),

            // Struct -> Struct (if the members are pairwise coercible by
            // name)
            (Self::Struct(src), Self::Struct(target)) => {
                src.members.len() == target.members.len()
                    && target.members.iter().all(|(name, target_ty)| {
                        src.members
                            .get(name)
                            .map(|src_ty| src_ty.is_coercible_to(target_ty))
                            .unwrap_or(false)
                    })
            }

            // Object -> Struct; member names and types are a runtime value
            // constraint
            (Self::Object, Self::Struct(_)) => true,

            // Struct -> Object
            (Self::Struct(_), Self::Object) => true,

            // Map[String, X] -> Object
            (Self::Map { key, .. }, Self::Object) => {
                **key == Self::Primitive(PrimitiveType::String)
            }

            // Object -> Map[String, X]; member value types are a runtime
            // value constraint
            (Self::Object, Self::Map { key, .. }) => {
                **key == Self::Primitive(PrimitiveType::String)
            }

            // Map[String, X] -> Struct (if X is coercible to every member
            // type; keys are a runtime value constraint)
            (Self::Map { key, value }, Self::Struct(target)) => {
                **key == Self::Primitive(PrimitiveType::String)
                    && target
                        .members
                        .values()
                        .all(|ty| value.is_coercible_to(ty))
            }

            // Struct -> Map[String, X] (if every member type is coercible to
            // X)
            (Self::Struct(src), Self::Map { key, value }) => {
                **key == Self::Primitive(PrimitiveType::String)
                    && src.members.values().all(|ty| ty.is_coercible_to(value))
            }

            // Not coercible
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => ty.fmt(f),
            Self::Array { element, non_empty } => {
                write!(f, "Array[{element}]")?;
                if *non_empty {
                    write!(f, "+")?;
                }
                Ok(())
            }
            Self::Map { key, value } => write!(f, "Map[{key}, {value}]"),
            Self::Pair { left, right } => write!(f, "Pair[{left}, {right}]"),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::Object => write!(f, "Object"),
            Self::Struct(ty) => ty.fmt(f),
            Self::Call(ty) => ty.fmt(f),
            Self::Any => write!(f, "Any"),
            Self::Unknown => write!(f, "Union"),
        }
    }
}

/// Calculates the common type (least upper bound under coercion) of two
/// types.
///
/// Returns `None` if the types have no common type. The relation is
/// symmetric: `common_type(a, b) == common_type(b, a)`.
pub fn common_type(a: &Type, b: &Type) -> Option<Type> {
    if a == b {
        return Some(a.clone());
    }

    match (a, b) {
        (Type::Any, other) | (other, Type::Any) => Some(other.clone()),
        (Type::Unknown, other) | (other, Type::Unknown) => Some(other.clone()),

        (Type::Optional(x), Type::Optional(y)) => common_type(x, y).map(Type::optional),
        (Type::Optional(x), y) | (y, Type::Optional(x)) => {
            common_type(x, y).map(Type::optional)
        }

        (
            Type::Array {
                element: x,
                non_empty: xn,
            },
            Type::Array {
                element: y,
                non_empty: yn,
            },
        ) => common_type(x, y).map(|element| Type::Array {
            element: Box::new(element),
            non_empty: *xn && *yn,
        }),

        (
            Type::Map {
                key: xk,
                value: xv,
            },
            Type::Map {
                key: yk,
                value: yv,
            },
        ) => match (common_type(xk, yk), common_type(xv, yv)) {
            (Some(key), Some(value)) => Some(Type::map(key, value)),
            _ => None,
        },

        (
            Type::Pair {
                left: xl,
                right: xr,
            },
            Type::Pair {
                left: yl,
                right: yr,
            },
        ) => match (common_type(xl, yl), common_type(xr, yr)) {
            (Some(left), Some(right)) => Some(Type::pair(left, right)),
            _ => None,
        },

        (Type::Primitive(x), Type::Primitive(y)) => common_primitive_type(*x, *y),

        // A struct is more specific than an object or a string-keyed map.
        (Type::Object, s @ Type::Struct(_)) | (s @ Type::Struct(_), Type::Object) => {
            Some(s.clone())
        }
        (m @ Type::Map { .. }, s @ Type::Struct(_))
        | (s @ Type::Struct(_), m @ Type::Map { .. }) => {
            if m.is_coercible_to(s) {
                Some(s.clone())
            } else {
                None
            }
        }
        (Type::Object, m @ Type::Map { .. }) | (m @ Type::Map { .. }, Type::Object) => {
            if m.is_coercible_to(&Type::Object) {
                Some(m.clone())
            } else {
                None
            }
        }

        (x @ Type::Struct(xs), y @ Type::Struct(ys)) => {
            match (x.is_coercible_to(y), y.is_coercible_to(x)) {
                (true, true) => Some(if xs.name() <= ys.name() {
                    x.clone()
                } else {
                    y.clone()
                }),
                (true, false) => Some(y.clone()),
                (false, true) => Some(x.clone()),
                (false, false) => None,
            }
        }

        _ => {
            if a.is_coercible_to(b) {
                Some(b.clone())
            } else if b.is_coercible_to(a) {
                Some(a.clone())
            } else {
                None
            }
        }
    }
}

/// Calculates the common type of two primitive types.
fn common_primitive_type(a: PrimitiveType, b: PrimitiveType) -> Option<Type> {
    use PrimitiveType::*;

    if a == b {
        return Some(a.into());
    }

    match (a, b) {
        (Integer, Float) | (Float, Integer) => Some(Float.into()),
        // String and File are mutually coercible; File is the more specific
        // common type.
        (String, File) | (File, String) => Some(File.into()),
        (String, Directory) | (Directory, String) => Some(Directory.into()),
        (File, Directory) | (Directory, File) => Some(Directory.into()),
        (Integer, String)
        | (String, Integer)
        | (Float, String)
        | (String, Float)
        | (Boolean, String)
        | (String, Boolean) => Some(String.into()),
        (Integer, File) | (File, Integer) | (Float, File) | (File, Float) | (Boolean, File)
        | (File, Boolean) => Some(File.into()),
        (Integer, Directory)
        | (Directory, Integer)
        | (Float, Directory)
        | (Directory, Float)
        | (Boolean, Directory)
        | (Directory, Boolean) => Some(Directory.into()),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::PrimitiveType::*;
    use super::*;

    #[test]
    fn primitive_coercions() {
        assert!(Type::from(Integer).is_coercible_to(&Float.into()));
        assert!(Type::from(Integer).is_coercible_to(&String.into()));
        assert!(Type::from(Float).is_coercible_to(&String.into()));
        assert!(Type::from(Boolean).is_coercible_to(&String.into()));
        assert!(Type::from(String).is_coercible_to(&File.into()));
        assert!(Type::from(String).is_coercible_to(&Directory.into()));
        assert!(Type::from(File).is_coercible_to(&String.into()));
        assert!(!Type::from(Float).is_coercible_to(&Integer.into()));
        assert!(!Type::from(String).is_coercible_to(&Boolean.into()));
    }

    #[test]
    fn optionals_flatten_on_construction() {
        let ty = Type::from(Integer).optional().optional();
        assert_eq!(ty, Type::from(Integer).optional());
        assert_eq!(ty.require(), Type::from(Integer));
    }

    #[test]
    fn optional_coercions_are_directional() {
        let int = Type::from(Integer);
        let optional_int = int.clone().optional();
        assert!(int.is_coercible_to(&optional_int));
        assert!(!optional_int.is_coercible_to(&int));
        // X -> Y? if X -> Y
        assert!(int.is_coercible_to(&Type::from(Float).optional()));
    }

    #[test]
    fn non_empty_arrays_are_subtypes() {
        let non_empty = Type::non_empty_array(Integer.into());
        let array = Type::array(Integer.into());
        assert!(non_empty.is_coercible_to(&array));
        assert!(!array.is_coercible_to(&non_empty));
        // Element coercion composes.
        assert!(non_empty.is_coercible_to(&Type::array(Float.into())));
    }

    #[test]
    fn coercion_is_reflexive_and_transitive_over_the_lattice() {
        // `Any` and `Unknown` are excluded: they are coercion hubs by
        // definition, not members of the lattice.
        let types = [
            Type::from(Integer),
            Type::from(Float),
            Type::from(String),
            Type::from(File),
            Type::from(Directory),
            Type::from(Boolean),
            Type::array(Integer.into()),
            Type::array(String.into()),
            Type::array(File.into()),
            Type::non_empty_array(Integer.into()),
            Type::map(String.into(), Integer.into()),
            Type::pair(Integer.into(), Float.into()),
            Type::from(Integer).optional(),
            Type::from(String).optional(),
            Type::from(File).optional(),
            Type::Object,
        ];

        for a in &types {
            assert!(a.is_coercible_to(a), "`{a}` should coerce to itself");
            for b in &types {
                for c in &types {
                    if a.is_coercible_to(b) && b.is_coercible_to(c) {
                        assert!(
                            a.is_coercible_to(c),
                            "`{a}` -> `{b}` -> `{c}` should compose"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn common_type_is_symmetric() {
        let types = [
            Type::from(Integer),
            Type::from(Float),
            Type::from(String),
            Type::from(File),
            Type::from(Boolean),
            Type::array(Integer.into()),
            Type::array(Float.into()),
            Type::from(Integer).optional(),
            Type::Object,
            Type::Any,
            Type::Unknown,
        ];

        for a in &types {
            for b in &types {
                assert_eq!(
                    common_type(a, b),
                    common_type(b, a),
                    "common type of `{a}` and `{b}` should be symmetric"
                );
            }
        }

        assert_eq!(
            common_type(&Integer.into(), &Float.into()),
            Some(Float.into())
        );
        assert_eq!(
            common_type(&Type::array(Integer.into()), &Type::array(Float.into())),
            Some(Type::array(Float.into()))
        );
        assert_eq!(common_type(&Boolean.into(), &Type::array(Boolean.into())), None);
    }

    #[test]
    fn structs_coerce_by_member() {
        let a = Type::Struct(Arc::new(StructType::new(
            "A",
            [
                ("x".to_string(), Type::from(Integer)),
                ("y".to_string(), Type::from(String)),
            ],
        )));
        let b = Type::Struct(Arc::new(StructType::new(
            "B",
            [
                ("x".to_string(), Type::from(Float)),
                ("y".to_string(), Type::from(String)),
            ],
        )));
        assert!(a.is_coercible_to(&b));
        assert!(!b.is_coercible_to(&a));
        assert!(Type::Object.is_coercible_to(&a));
        assert!(a.is_coercible_to(&Type::Object));
    }
}
