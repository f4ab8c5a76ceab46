pub mod contract;
pub mod error;
pub mod expr;
pub mod scope;
pub mod spec;
pub mod types;

// Re-export commonly used types
pub use contract::{ApiContract, Call, Response};
pub use error::ContractError;
pub use expr::{CmpOp, Expr, SetOp, StateVersion};
pub use scope::ScopeNode;
pub use spec::Specification;
pub use types::{Decl, FuncDecl, Init, TypeExpr};
