//! Descriptive type shapes and the declaration model for shared state.
//!
//! [`TypeExpr`] is a closed set of shape descriptors (scalar, map, set,
//! tuple) used to describe the globals an API scenario manipulates. Shapes
//! are purely descriptive: nothing in this crate checks expressions against
//! them. That validation is an extension point for downstream tooling, not
//! a responsibility of the core model.

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// Shape descriptor for a declared global or function parameter.
///
/// Immutable and acyclic. Carries no behavior beyond description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// Named scalar shape, e.g. `"String"` or `"Int"`.
    Scalar(String),

    /// Map from `key` shape to `val` shape.
    MapOf { key: Box<TypeExpr>, val: Box<TypeExpr> },

    /// Set of `elem` shapes.
    SetOf(Box<TypeExpr>),

    /// Fixed-arity tuple of component shapes.
    TupleOf(Vec<TypeExpr>),
}

impl TypeExpr {
    /// Shorthand for a named scalar shape.
    pub fn scalar(name: impl Into<String>) -> Self {
        TypeExpr::Scalar(name.into())
    }

    /// Shorthand for a map shape.
    pub fn map_of(key: TypeExpr, val: TypeExpr) -> Self {
        TypeExpr::MapOf {
            key: Box::new(key),
            val: Box::new(val),
        }
    }

    /// Shorthand for a set shape.
    pub fn set_of(elem: TypeExpr) -> Self {
        TypeExpr::SetOf(Box::new(elem))
    }

    /// Shorthand for a tuple shape.
    pub fn tuple_of(elems: Vec<TypeExpr>) -> Self {
        TypeExpr::TupleOf(elems)
    }
}

/// Declaration of a shared-state global: a name and its shape.
///
/// Names are unique within a specification's globals; the assembler builds
/// one `Decl` per configured global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decl {
    pub name: String,
    pub shape: TypeExpr,
}

impl Decl {
    pub fn new(name: impl Into<String>, shape: TypeExpr) -> Self {
        Decl {
            name: name.into(),
            shape,
        }
    }
}

/// Initializer for a declared global.
///
/// The name must match a [`Decl`]. The assembler currently emits an
/// empty-map literal for every global regardless of its declared shape;
/// see the pipeline docs in `opspec-assemble`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Init {
    pub name: String,
    pub value: Expr,
}

impl Init {
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        Init {
            name: name.into(),
            value,
        }
    }
}

/// Descriptive function signature carried alongside a specification.
///
/// Not consumed by contract blocks; downstream consumers use these to know
/// the call vocabulary of the application under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    /// Named, shaped parameters in declaration order.
    pub params: Vec<(String, TypeExpr)>,
    /// `None` for operations with no meaningful return shape.
    pub return_type: Option<TypeExpr>,
}

impl FuncDecl {
    pub fn new(
        name: impl Into<String>,
        params: Vec<(String, TypeExpr)>,
        return_type: Option<TypeExpr>,
    ) -> Self {
        FuncDecl {
            name: name.into(),
            params,
            return_type,
        }
    }

    /// Returns the number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_all_shape_variants() {
        let shapes = vec![
            TypeExpr::scalar("String"),
            TypeExpr::map_of(TypeExpr::scalar("String"), TypeExpr::scalar("String")),
            TypeExpr::set_of(TypeExpr::scalar("Int")),
            TypeExpr::tuple_of(vec![
                TypeExpr::scalar("String"),
                TypeExpr::set_of(TypeExpr::scalar("Int")),
            ]),
        ];
        assert_eq!(shapes.len(), 4);
    }

    #[test]
    fn nested_map_shape() {
        // sessions: token -> (user, expiry)
        let shape = TypeExpr::map_of(
            TypeExpr::scalar("String"),
            TypeExpr::tuple_of(vec![TypeExpr::scalar("String"), TypeExpr::scalar("Int")]),
        );

        match &shape {
            TypeExpr::MapOf { key, val } => {
                assert_eq!(**key, TypeExpr::scalar("String"));
                assert!(matches!(**val, TypeExpr::TupleOf(_)));
            }
            _ => panic!("expected MapOf"),
        }
    }

    #[test]
    fn serde_roundtrip_shapes() {
        let shape = TypeExpr::map_of(
            TypeExpr::scalar("String"),
            TypeExpr::set_of(TypeExpr::scalar("String")),
        );

        let json = serde_json::to_string(&shape).unwrap();
        let back: TypeExpr = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, back);
    }

    #[test]
    fn decl_and_init_pair() {
        let decl = Decl::new(
            "users",
            TypeExpr::map_of(TypeExpr::scalar("String"), TypeExpr::scalar("String")),
        );
        let init = Init::new("users", Expr::map_lit(vec![]));

        assert_eq!(decl.name, init.name);
        assert_eq!(init.value, Expr::MapLit(vec![]));
    }

    #[test]
    fn func_decl_arity() {
        let f = FuncDecl::new(
            "register",
            vec![
                ("email".into(), TypeExpr::scalar("String")),
                ("password".into(), TypeExpr::scalar("String")),
            ],
            None,
        );
        assert_eq!(f.arity(), 2);
        assert!(f.return_type.is_none());
    }

    #[test]
    fn serde_roundtrip_func_decl() {
        let f = FuncDecl::new(
            "lookup",
            vec![("key".into(), TypeExpr::scalar("String"))],
            Some(TypeExpr::scalar("String")),
        );

        let json = serde_json::to_string(&f).unwrap();
        let back: FuncDecl = serde_json::from_str(&json).unwrap();
        assert_eq!(f, back);
    }
}
