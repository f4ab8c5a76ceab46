//! The assembled specification value.
//!
//! A [`Specification`] is the complete output of one generation call:
//! global declarations, their initializers, the descriptive function
//! signatures, and the ordered contract blocks of the chosen scenario(s).
//! It is produced fresh per call, immutable once built, and consumed
//! exactly once downstream (lowering, solving, emission).

use serde::{Deserialize, Serialize};

use crate::contract::ApiContract;
use crate::error::ContractError;
use crate::types::{Decl, FuncDecl, Init};

/// One scenario's worth of declarations and contract blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub globals: Vec<Decl>,
    pub inits: Vec<Init>,
    pub functions: Vec<FuncDecl>,
    pub apis: Vec<ApiContract>,
}

impl Specification {
    pub fn new(
        globals: Vec<Decl>,
        inits: Vec<Init>,
        functions: Vec<FuncDecl>,
        apis: Vec<ApiContract>,
    ) -> Self {
        Specification {
            globals,
            inits,
            functions,
            apis,
        }
    }

    /// Number of contract blocks (scenario steps).
    pub fn step_count(&self) -> usize {
        self.apis.len()
    }

    /// `true` if `name` is a declared global.
    pub fn is_global(&self, name: &str) -> bool {
        self.globals.iter().any(|d| d.name == name)
    }

    /// Runs the placement lint over every contract block, returning the
    /// first violation.
    pub fn validate(&self) -> Result<(), ContractError> {
        for api in &self.apis {
            api.validate()?;
        }
        Ok(())
    }
}
