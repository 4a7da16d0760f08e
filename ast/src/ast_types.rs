use crate::*;

/// Region a declaration was made in
///
/// All top level declarations live in [GLOBAL_SCOPE]. There is no block scoping of types.
#[derive(PartialEq, Eq, Debug)]
pub struct Scope {
    pub name: &'static str,
    pub parent: Option<&'static Scope>,
}

impl Scope {
    /// Check if `scope` encloses this scope
    pub fn is_nested_in(&self, scope: &Scope) -> bool {
        let mut current = self.parent;
        while let Some(parent) = current {
            if std::ptr::eq(parent, scope) {
                return true;
            }
            current = parent.parent;
        }
        false
    }
}

/// The scope for every global declaration and every builtin
pub static GLOBAL_SCOPE: Scope = Scope {
    name: "global",
    parent: None,
};

/// A reference to a type by name
///
/// Generic arguments are only used by `buffer<T>`.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct TypeExpr {
    pub name: String,
    pub pointer: bool,
    pub args: Vec<TypeExpr>,
}

impl TypeExpr {
    pub fn new(name: impl Into<String>) -> Self {
        TypeExpr {
            name: name.into(),
            pointer: false,
            args: Vec::new(),
        }
    }

    /// Reference a builtin type
    pub fn builtin(ty: TypeKeyword) -> Self {
        TypeExpr::new(ty.name())
    }

    /// Turn the reference into a pointer to the same type
    pub fn into_pointer(mut self) -> Self {
        self.pointer = true;
        self
    }

    pub fn with_args(mut self, args: Vec<TypeExpr>) -> Self {
        self.args = args;
        self
    }

    /// Type equality used by semantic checks: same pointer-ness and same name
    ///
    /// Generic arguments do not take part in the comparison.
    pub fn compare(&self, other: &TypeExpr) -> bool {
        self.pointer == other.pointer && self.name == other.name
    }

    /// Check if this refers to the given builtin type without indirection
    pub fn is(&self, ty: TypeKeyword) -> bool {
        !self.pointer && self.name == ty.name()
    }

    /// Get the type pointed to by a pointer type
    pub fn pointee(&self) -> Option<TypeExpr> {
        if self.pointer {
            Some(TypeExpr {
                name: self.name.clone(),
                pointer: false,
                args: self.args.clone(),
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i != 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        if self.pointer {
            write!(f, " *")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "TypeExpr({})", self)
    }
}

/// A resolved type: either a builtin or a user struct
#[derive(PartialEq, Debug, Clone)]
pub struct Type {
    pub name: String,
    pub scope: &'static Scope,

    /// Set for types from the builtin catalogue
    pub builtin: Option<TypeKeyword>,

    /// Names of generic parameters
    pub type_args: Vec<String>,

    /// Struct fields in declaration order
    pub fields: Vec<(String, TypeExpr)>,
}

impl Type {
    /// Create a user struct type in the global scope
    pub fn new_struct(name: impl Into<String>, fields: Vec<(String, TypeExpr)>) -> Self {
        Type {
            name: name.into(),
            scope: &GLOBAL_SCOPE,
            builtin: None,
            type_args: Vec::new(),
            fields,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin.is_some()
    }

    /// Find the type of a struct field
    pub fn field(&self, name: &str) -> Option<&TypeExpr> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, ty)| ty)
    }
}

/// A resolved function signature
#[derive(PartialEq, Debug, Clone)]
pub struct FuncType {
    pub name: String,
    pub scope: &'static Scope,

    /// Set for functions from the builtin catalogue
    pub builtin: Option<BuiltinFunction>,

    /// Documented parameter names and types
    ///
    /// Builtins are generic over vector widths so the real argument rules live with each builtin.
    pub params: Vec<(String, TypeExpr)>,

    pub return_type: TypeExpr,
}

#[test]
fn test_type_expr_compare() {
    let a = TypeExpr::builtin(TypeKeyword::Buffer)
        .with_args(vec![TypeExpr::builtin(TypeKeyword::Float4)]);
    let b = TypeExpr::builtin(TypeKeyword::Buffer)
        .with_args(vec![TypeExpr::builtin(TypeKeyword::Float)]);
    assert!(a.compare(&b));
    assert!(!a.compare(&b.clone().into_pointer()));
    assert_eq!(a.to_string(), "buffer<float4>");
    assert_eq!(
        TypeExpr::new("P").into_pointer().pointee(),
        Some(TypeExpr::new("P"))
    );
    assert!(TypeExpr::builtin(TypeKeyword::Uint).is(TypeKeyword::Uint));
}

#[test]
fn test_scope_nesting() {
    static INNER: Scope = Scope {
        name: "inner",
        parent: Some(&GLOBAL_SCOPE),
    };
    assert!(INNER.is_nested_in(&GLOBAL_SCOPE));
    assert!(!GLOBAL_SCOPE.is_nested_in(&INNER));
}
