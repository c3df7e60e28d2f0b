use serde::{Deserialize, Serialize};

/// Span information for source location tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Structured result of parsing an interface's method declarations.
/// Built once per generation request; immutable after parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceSpec {
    pub name: String,
    pub methods: Vec<MethodSignature>,
    pub imports: Vec<Import>,
}

/// External type reference, in encounter order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    pub path: String,
    pub alias: Option<String>,
    pub span: Span,
}

/// One method declaration of an interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub return_type: TypeSpec,
    pub span: Span,
}

/// One parameter of a method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub type_spec: TypeSpec,
    pub default: Option<Literal>,
}

/// A resolved type reference. Nullability is the explicit `?` marker,
/// never inferred from defaults. An empty type name means untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub type_name: String,
    pub nullable: bool,
}

impl TypeSpec {
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            nullable: false,
        }
    }

    pub fn nullable(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            nullable: true,
        }
    }

    pub fn untyped() -> Self {
        Self {
            type_name: String::new(),
            nullable: false,
        }
    }

    pub fn is_untyped(&self) -> bool {
        self.type_name.is_empty()
    }

    pub fn is_self(&self) -> bool {
        self.type_name == "self"
    }
}

/// Literal default values on parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Literal {
    String { value: String },
    Number { value: f64 },
    Boolean { value: bool },
    Null,
}
