//! Contract blocks: one API step's precondition, call, and expected response.
//!
//! An [`ApiContract`] models a single step of a scenario. The precondition
//! constrains state before the call, the [`Call`] names the operation and its
//! argument expressions, and the [`Response`] carries the expected status
//! code plus an optional postcondition. A contract block carries exactly one
//! response; the call itself has none.

use serde::{Deserialize, Serialize};

use crate::error::ContractError;
use crate::expr::Expr;

/// The operation a contract block exercises: a name and ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Call {
            name: name.into(),
            args,
        }
    }

    /// Returns the number of arguments.
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// Expected HTTP status and optional postcondition for a call.
///
/// `postcondition: None` means "no additional constraint" -- the status code
/// alone is the expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub postcondition: Option<Expr>,
}

impl Response {
    /// Response with a status expectation only.
    pub fn status(status: u16) -> Self {
        Response {
            status,
            postcondition: None,
        }
    }

    /// Response with a status expectation and a postcondition.
    pub fn with_postcondition(status: u16, postcondition: Expr) -> Self {
        Response {
            status,
            postcondition: Some(postcondition),
        }
    }
}

/// One contract block: precondition, call, expected response, optional label.
///
/// The precondition may reference baseline, current and in-scope local
/// names; the postcondition may additionally reference post-state
/// projections and `_result`. [`ApiContract::validate`] lints those
/// placement rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiContract {
    pub precondition: Expr,
    pub call: Call,
    pub response: Response,
    pub label: Option<String>,
}

impl ApiContract {
    pub fn new(precondition: Expr, call: Call, response: Response) -> Self {
        ApiContract {
            precondition,
            call,
            response,
            label: None,
        }
    }

    /// Attaches a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Checks the placement rules: no post-state projection and no
    /// `_result` reference inside the precondition or call arguments.
    ///
    /// Baseline references outside a first step remain an author
    /// convention and are not checked.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.precondition.uses_post_state() {
            return Err(ContractError::PostStateInPrecondition {
                call: self.call.name.clone(),
            });
        }
        if self.precondition.uses_result() {
            return Err(ContractError::ResultInPrecondition {
                call: self.call.name.clone(),
            });
        }
        for arg in &self.call.args {
            if arg.uses_post_state() || arg.uses_result() {
                return Err(ContractError::PostStateInCallArgs {
                    call: self.call.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_block() -> ApiContract {
        ApiContract::new(
            Expr::not_in(Expr::var("email"), Expr::dom(Expr::baseline("U"))),
            Call::new("register", vec![Expr::var("email"), Expr::var("password")]),
            Response::with_postcondition(
                201,
                Expr::eq(
                    Expr::index(Expr::post("U"), Expr::var("email")),
                    Expr::var("password"),
                ),
            ),
        )
    }

    #[test]
    fn block_holds_status_and_postcondition() {
        let block = register_block();
        assert_eq!(block.response.status, 201);
        assert!(block.response.postcondition.is_some());
        assert_eq!(block.call.arity(), 2);
        assert!(block.label.is_none());
    }

    #[test]
    fn label_is_optional() {
        let block = register_block().with_label("fresh registration");
        assert_eq!(block.label.as_deref(), Some("fresh registration"));
    }

    #[test]
    fn valid_block_passes_placement_lint() {
        assert!(register_block().validate().is_ok());
    }

    #[test]
    fn post_state_in_precondition_is_rejected() {
        let block = ApiContract::new(
            Expr::is_in(Expr::var("email"), Expr::dom(Expr::post("U"))),
            Call::new("login", vec![Expr::var("email")]),
            Response::status(200),
        );

        match block.validate() {
            Err(ContractError::PostStateInPrecondition { call }) => {
                assert_eq!(call, "login");
            }
            other => panic!("expected PostStateInPrecondition, got {other:?}"),
        }
    }

    #[test]
    fn result_in_precondition_is_rejected() {
        let block = ApiContract::new(
            Expr::eq(Expr::result(), Expr::num(0)),
            Call::new("status", vec![]),
            Response::status(200),
        );

        assert!(matches!(
            block.validate(),
            Err(ContractError::ResultInPrecondition { .. })
        ));
    }

    #[test]
    fn post_state_in_call_args_is_rejected() {
        let block = ApiContract::new(
            Expr::truth(),
            Call::new("echo", vec![Expr::index(Expr::post("U"), Expr::var("k"))]),
            Response::status(200),
        );

        assert!(matches!(
            block.validate(),
            Err(ContractError::PostStateInCallArgs { .. })
        ));
    }

    #[test]
    fn status_only_response() {
        let r = Response::status(404);
        assert_eq!(r.status, 404);
        assert!(r.postcondition.is_none());
    }

    #[test]
    fn serde_roundtrip_contract_block() {
        let block = register_block().with_label("step 1");
        let json = serde_json::to_string(&block).unwrap();
        let back: ApiContract = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
