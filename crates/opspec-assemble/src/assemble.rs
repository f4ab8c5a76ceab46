//! The assembly pipeline: configuration + scenario -> specification.
//!
//! [`generate`] turns an [`AppConfig`] plus an optional scenario id into one
//! `(Specification, ScopeNode)` pair:
//!
//! 1. one [`Decl`] per configured global;
//! 2. one [`Init`] per global -- always an empty-map literal, regardless of
//!    the declared shape (set and tuple globals included; a known
//!    simplification kept intact, not a type-correctness guarantee);
//! 3. one [`FuncDecl`] per configured signature (descriptive only);
//! 4. a scope root listing every global name;
//! 5. the chosen scenario's builder, or -- when no id is given -- every
//!    configured scenario's builder in declared order, concatenated into a
//!    single sequential specification.
//!
//! Failure is atomic: scenario and builder resolution happen before any
//! builder runs, so an `Err` never leaves partial output behind. The
//! assembler keeps no reference to what it returns; the caller owns both
//! values.

use tracing::debug;

use opspec_core::{Decl, Expr, FuncDecl, Init, ScopeNode, Specification};

use crate::config::AppConfig;
use crate::error::AssembleError;
use crate::registry::{BuilderFn, BuilderRegistry};

/// Assembles one specification from `config`.
///
/// With `Some(id)`, resolves exactly that scenario; returns
/// [`AssembleError::ScenarioNotFound`] for an unknown id and
/// [`AssembleError::BuilderNotRegistered`] when the scenario names an
/// unregistered builder. With `None`, every configured scenario contributes
/// its blocks, in configuration-declared order.
pub fn generate(
    config: &AppConfig,
    registry: &BuilderRegistry,
    scenario_id: Option<&str>,
) -> Result<(Specification, ScopeNode), AssembleError> {
    let mut builders: Vec<std::sync::Arc<BuilderFn>> = Vec::new();

    match scenario_id {
        Some(id) => {
            let scenario = config
                .scenario(id)
                .ok_or_else(|| AssembleError::ScenarioNotFound { id: id.to_string() })?;
            let builder = registry.get(&scenario.builder_function).ok_or_else(|| {
                AssembleError::BuilderNotRegistered {
                    name: scenario.builder_function.clone(),
                }
            })?;
            debug!(scenario = %scenario.id, builder = %scenario.builder_function, "resolved scenario");
            builders.push(builder);
        }
        None => {
            // Resolve everything up front so a missing builder aborts
            // before any blocks are appended.
            for scenario in &config.scenarios {
                let builder = registry.get(&scenario.builder_function).ok_or_else(|| {
                    AssembleError::BuilderNotRegistered {
                        name: scenario.builder_function.clone(),
                    }
                })?;
                debug!(scenario = %scenario.id, builder = %scenario.builder_function, "resolved scenario");
                builders.push(builder);
            }
        }
    }

    Ok(run_builders(config, &builders))
}

/// Assembles a specification from an explicit, ordered builder list,
/// bypassing the registry and the configured scenario list entirely.
///
/// Used for ad hoc or programmatic composition; infallible because there is
/// nothing to resolve.
pub fn generate_with(
    config: &AppConfig,
    builders: &[std::sync::Arc<BuilderFn>],
) -> (Specification, ScopeNode) {
    run_builders(config, builders)
}

fn run_builders(
    config: &AppConfig,
    builders: &[std::sync::Arc<BuilderFn>],
) -> (Specification, ScopeNode) {
    let globals: Vec<Decl> = config
        .globals
        .iter()
        .map(|g| Decl::new(&g.name, g.shape.clone()))
        .collect();

    // Empty-map initializer for every global, whatever its shape.
    let inits: Vec<Init> = config
        .globals
        .iter()
        .map(|g| Init::new(&g.name, Expr::map_lit(vec![])))
        .collect();

    let functions: Vec<FuncDecl> = config
        .functions
        .iter()
        .map(|f| FuncDecl::new(&f.name, f.params.clone(), f.return_type.clone()))
        .collect();

    let mut root = ScopeNode::new();
    for g in &config.globals {
        root.insert_local(&g.name);
    }

    let mut apis = Vec::new();
    for builder in builders {
        let build: &BuilderFn = builder.as_ref();
        build(&mut apis, &mut root);
    }
    debug!(blocks = apis.len(), scope_children = root.children().len(), "assembly complete");

    (Specification::new(globals, inits, functions, apis), root)
}
