//! Implementation of WDL runtime values.

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use anyhow::anyhow;
use anyhow::bail;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use wdl_analysis::types::PrimitiveType;
use wdl_analysis::types::Type;

/// Implemented on values coercible to other types.
pub trait Coercible: Sized {
    /// Coerces the value into the given type.
    ///
    /// Returns an error if the coercion is not supported or if a runtime
    /// constraint (such as a struct member check) is violated.
    fn coerce(&self, target: &Type) -> anyhow::Result<Self>;
}

/// Represents a WDL primitive value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveValue {
    /// The value is a `Boolean`.
    Boolean(bool),
    /// The value is an `Int`.
    Integer(i64),
    /// The value is a `Float`.
    Float(OrderedFloat<f64>),
    /// The value is a `String`.
    String(Arc<str>),
    /// The value is a `File`.
    File(Arc<str>),
    /// The value is a `Directory`.
    Directory(Arc<str>),
}

impl PrimitiveValue {
    /// Creates a new `String` value.
    pub fn new_string(value: impl Into<Arc<str>>) -> Self {
        Self::String(value.into())
    }

    /// Creates a new `File` value.
    pub fn new_file(value: impl Into<Arc<str>>) -> Self {
        Self::File(value.into())
    }

    /// Creates a new `Directory` value.
    pub fn new_directory(value: impl Into<Arc<str>>) -> Self {
        Self::Directory(value.into())
    }

    /// Gets the type of the value.
    pub fn ty(&self) -> Type {
        match self {
            Self::Boolean(_) => PrimitiveType::Boolean.into(),
            Self::Integer(_) => PrimitiveType::Integer.into(),
            Self::Float(_) => PrimitiveType::Float.into(),
            Self::String(_) => PrimitiveType::String.into(),
            Self::File(_) => PrimitiveType::File.into(),
            Self::Directory(_) => PrimitiveType::Directory.into(),
        }
    }

    /// Gets the text of the value if it is a `String`, `File`, or
    /// `Directory`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::File(s) | Self::Directory(s) => Some(s),
            _ => None,
        }
    }

    /// Gets the canonical string form of the value.
    ///
    /// Integers and floats render base-10, booleans render as `true` and
    /// `false`, and string-like values render as their raw text.
    pub fn canonical_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}", v = v.0),
            Self::String(s) | Self::File(s) | Self::Directory(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for PrimitiveValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PrimitiveValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PrimitiveValue {
    fn from(value: f64) -> Self {
        Self::Float(OrderedFloat(value))
    }
}

/// Represents a `Pair` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// The left value of the pair.
    pub left: Value,
    /// The right value of the pair.
    pub right: Value,
}

/// Represents a `Map` value.
///
/// Map keys are primitive values; equality is order-independent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Map {
    /// The entries of the map, in insertion order.
    pub entries: IndexMap<PrimitiveValue, Value>,
}

/// Represents an `Object` value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Object {
    /// The members of the object, in insertion order.
    pub members: IndexMap<String, Value>,
}

/// Represents a struct value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    /// The name of the struct type.
    pub name: String,
    /// The members of the struct, in definition order.
    pub members: IndexMap<String, Value>,
}

/// Represents the outputs of an evaluated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallValue {
    /// The name of the call.
    pub name: String,
    /// The output values of the call.
    pub members: IndexMap<String, Value>,
}

/// Represents a WDL compound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompoundValue {
    /// The value is a `Pair`.
    Pair(Arc<Pair>),
    /// The value is an `Array`.
    Array(Arc<Vec<Value>>),
    /// The value is a `Map`.
    Map(Arc<Map>),
    /// The value is an `Object`.
    Object(Arc<Object>),
    /// The value is a struct.
    Struct(Arc<Struct>),
    /// The value is the outputs of a call.
    Call(Arc<CallValue>),
}

/// Represents a WDL runtime value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The value is the absent optional value.
    None,
    /// The value is a primitive value.
    Primitive(PrimitiveValue),
    /// The value is a compound value.
    Compound(CompoundValue),
}

impl Value {
    /// Creates a new array value.
    pub fn new_array(elements: impl Into<Vec<Value>>) -> Self {
        Self::Compound(CompoundValue::Array(Arc::new(elements.into())))
    }

    /// Creates a new pair value.
    pub fn new_pair(left: Value, right: Value) -> Self {
        Self::Compound(CompoundValue::Pair(Arc::new(Pair { left, right })))
    }

    /// Creates a new map value.
    pub fn new_map(entries: impl IntoIterator<Item = (PrimitiveValue, Value)>) -> Self {
        Self::Compound(CompoundValue::Map(Arc::new(Map {
            entries: entries.into_iter().collect(),
        })))
    }

    /// Creates a new object value.
    pub fn new_object(members: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self::Compound(CompoundValue::Object(Arc::new(Object {
            members: members.into_iter().collect(),
        })))
    }

    /// Creates a new struct value.
    pub fn new_struct(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self::Compound(CompoundValue::Struct(Arc::new(Struct {
            name: name.into(),
            members: members.into_iter().collect(),
        })))
    }

    /// Creates a new call value.
    pub fn new_call(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self::Compound(CompoundValue::Call(Arc::new(CallValue {
            name: name.into(),
            members: members.into_iter().collect(),
        })))
    }

    /// Determines if the value is `None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Gets the value as a `Boolean`.
    ///
    /// Returns `None` if the value is not a `Boolean`.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Primitive(PrimitiveValue::Boolean(v)) => Some(*v),
            _ => None,
        }
    }

    /// Unwraps the value into a `Boolean`.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a `Boolean`.
    pub fn unwrap_boolean(&self) -> bool {
        self.as_boolean().expect("value is not a boolean")
    }

    /// Gets the value as an `Int`.
    ///
    /// Returns `None` if the value is not an `Int`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Primitive(PrimitiveValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Unwraps the value into an `Int`.
    ///
    /// # Panics
    ///
    /// Panics if the value is not an `Int`.
    pub fn unwrap_integer(&self) -> i64 {
        self.as_integer().expect("value is not an integer")
    }

    /// Gets the value as a `Float`.
    ///
    /// Returns `None` if the value is not a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Primitive(PrimitiveValue::Float(v)) => Some(v.0),
            _ => None,
        }
    }

    /// Unwraps the value into a `Float`.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a `Float`.
    pub fn unwrap_float(&self) -> f64 {
        self.as_float().expect("value is not a float")
    }

    /// Gets the value as a `String`.
    ///
    /// Returns `None` if the value is not a `String`.
    pub fn as_string(&self) -> Option<&Arc<str>> {
        match self {
            Self::Primitive(PrimitiveValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Unwraps the value into a `String`.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a `String`.
    pub fn unwrap_string(&self) -> &Arc<str> {
        self.as_string().expect("value is not a string")
    }

    /// Gets the value as a `File`.
    ///
    /// Returns `None` if the value is not a `File`.
    pub fn as_file(&self) -> Option<&Arc<str>> {
        match self {
            Self::Primitive(PrimitiveValue::File(s)) => Some(s),
            _ => None,
        }
    }

    /// Unwraps the value into a `File`.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a `File`.
    pub fn unwrap_file(&self) -> &Arc<str> {
        self.as_file().expect("value is not a file")
    }

    /// Gets the value as a `Pair`.
    ///
    /// Returns `None` if the value is not a `Pair`.
    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Self::Compound(CompoundValue::Pair(v)) => Some(v),
            _ => None,
        }
    }

    /// Gets the value as an `Array`.
    ///
    /// Returns `None` if the value is not an `Array`.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Compound(CompoundValue::Array(v)) => Some(v),
            _ => None,
        }
    }

    /// Unwraps the value into an `Array`.
    ///
    /// # Panics
    ///
    /// Panics if the value is not an `Array`.
    pub fn unwrap_array(&self) -> &Vec<Value> {
        self.as_array().expect("value is not an array")
    }

    /// Gets the value as a `Map`.
    ///
    /// Returns `None` if the value is not a `Map`.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Compound(CompoundValue::Map(v)) => Some(v),
            _ => None,
        }
    }

    /// Gets the value as an `Object`.
    ///
    /// Returns `None` if the value is not an `Object`.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Compound(CompoundValue::Object(v)) => Some(v),
            _ => None,
        }
    }

    /// Gets the value as a struct.
    ///
    /// Returns `None` if the value is not a struct.
    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Compound(CompoundValue::Struct(v)) => Some(v),
            _ => None,
        }
    }

    /// Gets the type of the value.
    ///
    /// Array element types are derived from the first element; an empty
    /// array has the `Union` element placeholder.
    pub fn ty(&self) -> Type {
        match self {
            Self::None => Type::Any.optional(),
            Self::Primitive(v) => v.ty(),
            Self::Compound(v) => match v {
                CompoundValue::Pair(p) => Type::pair(p.left.ty(), p.right.ty()),
                CompoundValue::Array(elements) => Type::Array {
                    element: Box::new(
                        elements.first().map(Value::ty).unwrap_or(Type::Unknown),
                    ),
                    non_empty: !elements.is_empty(),
                },
                CompoundValue::Map(m) => Type::map(
                    m.entries
                        .keys()
                        .next()
                        .map(|k| k.ty())
                        .unwrap_or(Type::Unknown),
                    m.entries
                        .values()
                        .next()
                        .map(Value::ty)
                        .unwrap_or(Type::Unknown),
                ),
                CompoundValue::Object(_) => Type::Object,
                // The full struct/call type is not reconstructible from the
                // value alone; `Object` is the closest described shape.
                CompoundValue::Struct(_) | CompoundValue::Call(_) => Type::Object,
            },
        }
    }

    /// Serializes the value to its JSON form.
    ///
    /// The mapping stringifies map keys and flattens pairs into
    /// `{left, right}` objects.
    pub fn to_json(&self) -> anyhow::Result<serde_json::Value> {
        Ok(match self {
            Self::None => serde_json::Value::Null,
            Self::Primitive(v) => match v {
                PrimitiveValue::Boolean(v) => (*v).into(),
                PrimitiveValue::Integer(v) => (*v).into(),
                PrimitiveValue::Float(v) => serde_json::Number::from_f64(v.0)
                    .context("float value is not representable in JSON")?
                    .into(),
                PrimitiveValue::String(s)
                | PrimitiveValue::File(s)
                | PrimitiveValue::Directory(s) => s.to_string().into(),
            },
            Self::Compound(v) => match v {
                CompoundValue::Pair(p) => serde_json::json!({
                    "left": p.left.to_json()?,
                    "right": p.right.to_json()?,
                }),
                CompoundValue::Array(elements) => serde_json::Value::Array(
                    elements
                        .iter()
                        .map(Value::to_json)
                        .collect::<anyhow::Result<_>>()?,
                ),
                CompoundValue::Map(m) => {
                    let mut map = serde_json::Map::new();
                    for (k, v) in &m.entries {
                        map.insert(k.canonical_string(), v.to_json()?);
                    }
                    serde_json::Value::Object(map)
                }
                CompoundValue::Object(o) => {
                    let mut map = serde_json::Map::new();
                    for (k, v) in &o.members {
                        map.insert(k.clone(), v.to_json()?);
                    }
                    serde_json::Value::Object(map)
                }
                CompoundValue::Struct(s) => {
                    let mut map = serde_json::Map::new();
                    for (k, v) in &s.members {
                        map.insert(k.clone(), v.to_json()?);
                    }
                    serde_json::Value::Object(map)
                }
                CompoundValue::Call(c) => {
                    let mut map = serde_json::Map::new();
                    for (k, v) in &c.members {
                        map.insert(k.clone(), v.to_json()?);
                    }
                    serde_json::Value::Object(map)
                }
            },
        })
    }

    /// Deserializes a value from its JSON form.
    ///
    /// JSON objects become `Object` values; coercion to a struct or map
    /// type happens separately.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(v) => (*v).into(),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    v.into()
                } else {
                    n.as_f64().unwrap_or(f64::NAN).into()
                }
            }
            serde_json::Value::String(s) => PrimitiveValue::new_string(s.as_str()).into(),
            serde_json::Value::Array(elements) => {
                Self::new_array(elements.iter().map(Self::from_json).collect::<Vec<_>>())
            }
            serde_json::Value::Object(members) => Self::new_object(
                members
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Primitive(v) => v.fmt(f),
            Self::Compound(v) => match v {
                CompoundValue::Pair(p) => {
                    write!(f, "({left}, {right})", left = p.left, right = p.right)
                }
                CompoundValue::Array(elements) => {
                    write!(f, "[")?;
                    for (i, e) in elements.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        e.fmt(f)?;
                    }
                    write!(f, "]")
                }
                CompoundValue::Map(m) => {
                    write!(f, "{{")?;
                    for (i, (k, v)) in m.entries.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{k}: {v}")?;
                    }
                    write!(f, "}}")
                }
                CompoundValue::Object(o) => {
                    write!(f, "object {{")?;
                    for (i, (k, v)) in o.members.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{k}: {v}")?;
                    }
                    write!(f, "}}")
                }
                CompoundValue::Struct(s) => {
                    write!(f, "{name} {{", name = s.name)?;
                    for (i, (k, v)) in s.members.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{k}: {v}")?;
                    }
                    write!(f, "}}")
                }
                CompoundValue::Call(c) => {
                    write!(f, "call {name} {{", name = c.name)?;
                    for (i, (k, v)) in c.members.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{k}: {v}")?;
                    }
                    write!(f, "}}")
                }
            },
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Primitive(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Primitive(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Primitive(value.into())
    }
}

impl From<PrimitiveValue> for Value {
    fn from(value: PrimitiveValue) -> Self {
        Self::Primitive(value)
    }
}

impl Coercible for PrimitiveValue {
    fn coerce(&self, target: &Type) -> anyhow::Result<Self> {
        if self.ty() == *target {
            return Ok(self.clone());
        }

        let target_primitive = match target {
            Type::Primitive(p) => *p,
            _ => bail!(
                "cannot coerce type `{actual}` to type `{target}`",
                actual = self.ty()
            ),
        };

        match (self, target_primitive) {
            (Self::Integer(v), PrimitiveType::Float) => Ok(Self::Float(OrderedFloat(*v as f64))),
            (_, PrimitiveType::String) => Ok(Self::new_string(self.canonical_string())),
            (_, PrimitiveType::File) => Ok(Self::new_file(self.canonical_string())),
            (_, PrimitiveType::Directory) => Ok(Self::new_directory(self.canonical_string())),
            _ => bail!(
                "cannot coerce type `{actual}` to type `{target}`",
                actual = self.ty()
            ),
        }
    }
}

impl Coercible for Value {
    fn coerce(&self, target: &Type) -> anyhow::Result<Self> {
        match (self, target) {
            (value, Type::Any | Type::Unknown) => Ok(value.clone()),
            (Self::None, target) if target.is_optional() => Ok(Self::None),
            (Self::None, target) => {
                bail!("cannot coerce `None` to the required type `{target}`")
            }
            // An optional value is represented by the inner value or `None`.
            (value, Type::Optional(inner)) => value.coerce(inner),
            (Self::Primitive(v), target) => Ok(Self::Primitive(v.coerce(target)?)),
            (Self::Compound(v), target) => v.coerce(target).map(Self::Compound),
        }
    }
}

impl Coercible for CompoundValue {
    fn coerce(&self, target: &Type) -> anyhow::Result<Self> {
        match (self, target) {
            (
                Self::Array(elements),
                Type::Array {
                    element: target_element,
                    non_empty,
                },
            ) => {
                if *non_empty && elements.is_empty() {
                    bail!("cannot coerce an empty array to a non-empty array type");
                }
                Ok(Self::Array(Arc::new(
                    elements
                        .iter()
                        .map(|e| e.coerce(target_element))
                        .collect::<anyhow::Result<_>>()?,
                )))
            }
            (Self::Pair(p), Type::Pair { left, right }) => Ok(Self::Pair(Arc::new(Pair {
                left: p.left.coerce(left)?,
                right: p.right.coerce(right)?,
            }))),
            (Self::Map(m), Type::Map { key, value }) => {
                let mut entries = IndexMap::with_capacity(m.entries.len());
                for (k, v) in &m.entries {
                    entries.insert(k.coerce(key)?, v.coerce(value)?);
                }
                Ok(Self::Map(Arc::new(Map { entries })))
            }
            (Self::Map(m), Type::Struct(s)) => {
                let mut members = IndexMap::new();
                for (k, v) in &m.entries {
                    let name = k
                        .as_str()
                        .ok_or_else(|| anyhow!("map keys must be strings to coerce to a struct"))?;
                    let member_ty = s.members().get(name).ok_or_else(|| {
                        anyhow!(
                            "map key `{name}` is not a member of struct `{struct_name}`",
                            struct_name = s.name()
                        )
                    })?;
                    members.insert(name.to_string(), v.coerce(member_ty)?);
                }
                check_missing_members(s, &mut members)?;
                Ok(Self::Struct(Arc::new(Struct {
                    name: s.name().to_string(),
                    members,
                })))
            }
            (Self::Object(o), Type::Struct(s)) => {
                let mut members = IndexMap::new();
                for (k, v) in &o.members {
                    let member_ty = s.members().get(k).ok_or_else(|| {
                        anyhow!(
                            "object member `{k}` is not a member of struct `{struct_name}`",
                            struct_name = s.name()
                        )
                    })?;
                    members.insert(k.clone(), v.coerce(member_ty)?);
                }
                check_missing_members(s, &mut members)?;
                Ok(Self::Struct(Arc::new(Struct {
                    name: s.name().to_string(),
                    members,
                })))
            }
            (Self::Struct(v), Type::Struct(s)) => {
                let mut members = IndexMap::new();
                for (k, member_ty) in s.members() {
                    match v.members.get(k) {
                        Some(value) => {
                            members.insert(k.clone(), value.coerce(member_ty)?);
                        }
                        None if member_ty.is_optional() => {
                            members.insert(k.clone(), Value::None);
                        }
                        None => bail!(
                            "struct `{name}` is missing a value for member `{k}`",
                            name = v.name
                        ),
                    }
                }
                Ok(Self::Struct(Arc::new(Struct {
                    name: s.name().to_string(),
                    members,
                })))
            }
            (Self::Struct(v), Type::Map { key, value }) => {
                let mut entries = IndexMap::new();
                for (k, member) in &v.members {
                    entries.insert(
                        PrimitiveValue::new_string(k.as_str()).coerce(key)?,
                        member.coerce(value)?,
                    );
                }
                Ok(Self::Map(Arc::new(Map { entries })))
            }
            (Self::Object(o), Type::Map { key, value }) => {
                let mut entries = IndexMap::new();
                for (k, member) in &o.members {
                    entries.insert(
                        PrimitiveValue::new_string(k.as_str()).coerce(key)?,
                        member.coerce(value)?,
                    );
                }
                Ok(Self::Map(Arc::new(Map { entries })))
            }
            (Self::Struct(v), Type::Object) => Ok(Self::Object(Arc::new(Object {
                members: v.members.clone(),
            }))),
            (Self::Call(v), Type::Object) => Ok(Self::Object(Arc::new(Object {
                members: v.members.clone(),
            }))),
            (Self::Map(m), Type::Object) => {
                let mut members = IndexMap::new();
                for (k, v) in &m.entries {
                    let name = k
                        .as_str()
                        .ok_or_else(|| anyhow!("map keys must be strings to coerce to an object"))?;
                    members.insert(name.to_string(), v.clone());
                }
                Ok(Self::Object(Arc::new(Object { members })))
            }
            (Self::Object(_), Type::Object) => Ok(self.clone()),
            _ => bail!("cannot coerce the value to type `{target}`"),
        }
    }
}

/// Checks that every non-optional struct member has a value, filling in
/// `None` for missing optional members.
fn check_missing_members(
    s: &wdl_analysis::types::StructType,
    members: &mut IndexMap<String, Value>,
) -> anyhow::Result<()> {
    for (name, ty) in s.members() {
        if !members.contains_key(name) {
            if !ty.is_optional() {
                bail!(
                    "missing a value for required member `{name}` of struct `{struct_name}`",
                    struct_name = s.name()
                );
            }
            members.insert(name.clone(), Value::None);
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use wdl_analysis::types::StructType;

    use super::*;

    #[test]
    fn map_equality_is_order_independent() {
        let a = Value::new_map([
            (PrimitiveValue::new_string("x"), Value::from(1)),
            (PrimitiveValue::new_string("y"), Value::from(2)),
        ]);
        let b = Value::new_map([
            (PrimitiveValue::new_string("y"), Value::from(2)),
            (PrimitiveValue::new_string("x"), Value::from(1)),
        ]);
        assert_eq!(a, b);

        let c = Value::new_map([(PrimitiveValue::new_string("x"), Value::from(1))]);
        assert_ne!(a, c);
    }

    #[test]
    fn object_equality_is_structural_by_field_name() {
        let a = Value::new_object([
            ("x".to_string(), Value::from(1)),
            ("y".to_string(), Value::from(2)),
        ]);
        let b = Value::new_object([
            ("y".to_string(), Value::from(2)),
            ("x".to_string(), Value::from(1)),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn objects_coerce_to_structs_with_member_checks() {
        let ty = Type::Struct(Arc::new(StructType::new(
            "P",
            [
                ("a".to_string(), Type::from(PrimitiveType::Integer)),
                (
                    "b".to_string(),
                    Type::from(PrimitiveType::String).optional(),
                ),
            ],
        )));

        let value = Value::new_object([("a".to_string(), Value::from(7))]);
        let coerced = value.coerce(&ty).expect("coercion should succeed");
        let s = coerced.as_struct().expect("value should be a struct");
        assert_eq!(s.members["a"], Value::from(7));
        assert_eq!(s.members["b"], Value::None);

        let missing = Value::new_object([("b".to_string(), Value::from(1))]);
        assert!(missing.coerce(&ty).is_err());
    }

    #[test]
    fn json_round_trip() {
        let value = Value::new_object([
            ("n".to_string(), Value::from(42)),
            ("f".to_string(), Value::from(1.5)),
            (
                "s".to_string(),
                Value::from(PrimitiveValue::new_string("hi")),
            ),
            (
                "a".to_string(),
                Value::new_array(vec![Value::from(true), Value::None]),
            ),
        ]);
        let json = value.to_json().expect("value should serialize");
        assert_eq!(Value::from_json(&json), value);
    }
}
