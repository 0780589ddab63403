//! Command descriptors: declarative metadata for a single command.
//!
//! A descriptor names a command, declares its typed positional parameters and
//! carries the data used for help output and autocompletion:
//! - Parameter names and documentation for help rendering
//! - Visibility (hidden commands)
//! - Option groups feeding parameter autocompletion

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Declared type of a positional command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Raw string, passed through unchanged.
    String,
    /// Boolean; any token other than `true` (ignoring case) is `false`.
    Bool,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl ParamType {
    /// Returns the type name used in signatures.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Coerces a raw token into a value of this type.
    ///
    /// Numeric types parse strictly and return `None` on failure. Booleans
    /// never fail.
    pub fn coerce(&self, token: &str) -> Option<Value> {
        let value = match self {
            Self::String => Value::String(token.to_string()),
            Self::Bool => Value::Bool(token.eq_ignore_ascii_case("true")),
            Self::I8 => Value::I8(token.parse().ok()?),
            Self::I16 => Value::I16(token.parse().ok()?),
            Self::I32 => Value::I32(token.parse().ok()?),
            Self::I64 => Value::I64(token.parse().ok()?),
            Self::F32 => Value::F32(token.parse().ok()?),
            Self::F64 => Value::F64(token.parse().ok()?),
        };
        Some(value)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A coerced argument value handed to a command operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Value {
    /// Returns the string if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns any integer value widened to `i64`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::I8(v) => Some(i64::from(*v)),
            Self::I16(v) => Some(i64::from(*v)),
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns any floating point value widened to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Documentation attached to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDoc {
    /// Short description shown in help.
    pub description: String,
    /// One description per parameter; may be shorter than the parameter list.
    pub param_descriptions: Vec<String>,
}

/// Metadata describing one command (one overload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    name: String,
    parameter_types: Vec<ParamType>,
    parameter_names: Vec<String>,
    hidden: bool,
    doc: Option<CommandDoc>,
    parameter_options: BTreeMap<usize, BTreeSet<u32>>,
}

impl CommandDescriptor {
    /// Creates a descriptor for a command taking no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_types: Vec::new(),
            parameter_names: Vec::new(),
            hidden: false,
            doc: None,
            parameter_options: BTreeMap::new(),
        }
    }

    /// Sets the positional parameter types.
    pub fn params(self, types: impl IntoIterator<Item = ParamType>) -> Self {
        Self {
            parameter_types: types.into_iter().collect(),
            ..self
        }
    }

    /// Sets the parameter names used in signatures.
    pub fn param_names<S: Into<String>>(self, names: impl IntoIterator<Item = S>) -> Self {
        Self {
            parameter_names: names.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Marks the command as hidden.
    pub fn hidden(self) -> Self {
        Self {
            hidden: true,
            ..self
        }
    }

    /// Attaches documentation.
    pub fn doc<S: Into<String>>(
        self,
        description: impl Into<String>,
        param_descriptions: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            doc: Some(CommandDoc {
                description: description.into(),
                param_descriptions: param_descriptions.into_iter().map(Into::into).collect(),
            }),
            ..self
        }
    }

    /// Binds an autocomplete option group to the parameter at `index`.
    ///
    /// Binding the same group twice is harmless.
    pub fn option(mut self, index: usize, group: u32) -> Self {
        self.parameter_options.entry(index).or_default().insert(group);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[ParamType] {
        &self.parameter_types
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn documentation(&self) -> Option<&CommandDoc> {
        self.doc.as_ref()
    }

    /// Returns the option groups bound to the parameter at `index`.
    pub fn option_groups(&self, index: usize) -> impl Iterator<Item = u32> + '_ {
        self.parameter_options
            .get(&index)
            .into_iter()
            .flat_map(|groups| groups.iter().copied())
    }

    /// Returns true if `name` refers to this command, ignoring case.
    ///
    /// Folds case with `to_lowercase`, the same rule used for prefixes and
    /// dispatched command tokens.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Renders the parameter label at `index`: `name:Type`, or `Type` when the
    /// name is missing.
    pub fn param_label(&self, index: usize) -> Option<String> {
        let ty = self.parameter_types.get(index)?;
        Some(match self.parameter_names.get(index) {
            Some(name) => format!("{name}:{ty}"),
            None => ty.to_string(),
        })
    }

    /// Renders the parameter list, e.g. `(x:i32, y:i32)`.
    pub fn signature(&self) -> String {
        let params = (0..self.parameter_types.len())
            .filter_map(|i| self.param_label(i))
            .collect::<Vec<_>>()
            .join(", ");
        format!("({params})")
    }

    /// Coerces raw string arguments to this command's parameter types.
    ///
    /// Returns `None` when the arity differs or any token fails to coerce.
    pub fn resolve_arguments(&self, args: &[&str]) -> Option<Vec<Value>> {
        if args.len() != self.parameter_types.len() {
            return None;
        }
        self.parameter_types
            .iter()
            .zip(args)
            .map(|(ty, token)| ty.coerce(token))
            .collect()
    }
}
