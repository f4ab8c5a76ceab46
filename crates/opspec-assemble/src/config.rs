//! Declarative application configuration.
//!
//! An [`AppConfig`] describes the application under test: its globals and
//! their shapes, the call vocabulary, and the scenarios that can be
//! assembled. It is read-only input to the assembler, typically loaded from
//! JSON. `name`, `description`, `port` and `debug_accessors` are carried
//! through for external consumers; the assembler itself does not read them.

use serde::{Deserialize, Serialize};

use opspec_core::TypeExpr;

/// A declared shared-state global: name plus shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalDecl {
    pub name: String,
    pub shape: TypeExpr,
}

/// Placeholder for an initial value of a global.
///
/// The assembler currently ignores these and emits an empty-map initializer
/// for every global; see [`crate::assemble::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialValue {
    pub name: String,
}

/// A declared operation signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSig {
    pub name: String,
    #[serde(default)]
    pub params: Vec<(String, TypeExpr)>,
    #[serde(default)]
    pub return_type: Option<TypeExpr>,
}

/// A named test scenario.
///
/// `calls` is a display-only summary of the call sequence; the authoritative
/// sequence is produced by the builder registered under
/// `builder_function`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub calls: Vec<String>,
    pub builder_function: String,
}

/// The full application configuration handed to the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub globals: Vec<GlobalDecl>,
    #[serde(default)]
    pub initial_values: Vec<InitialValue>,
    #[serde(default)]
    pub functions: Vec<FunctionSig>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub debug_accessors: Vec<String>,
}

impl AppConfig {
    /// Looks up a scenario by id, exact match.
    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_from_json() {
        let json = r#"{
            "name": "userdb",
            "description": "toy account service",
            "port": 8080,
            "globals": [
                {
                    "name": "U",
                    "shape": {"MapOf": {"key": {"Scalar": "String"}, "val": {"Scalar": "String"}}}
                }
            ],
            "initial_values": [{"name": "U"}],
            "functions": [
                {
                    "name": "register",
                    "params": [["email", {"Scalar": "String"}], ["password", {"Scalar": "String"}]]
                }
            ],
            "scenarios": [
                {
                    "id": "login_flow",
                    "description": "register then log in",
                    "calls": ["register", "login"],
                    "builder_function": "build_login_flow"
                }
            ],
            "debug_accessors": ["dump_users"]
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "userdb");
        assert_eq!(config.port, 8080);
        assert_eq!(config.globals.len(), 1);
        assert_eq!(config.globals[0].name, "U");
        assert_eq!(config.functions[0].params.len(), 2);
        assert_eq!(config.scenarios[0].builder_function, "build_login_flow");
        assert_eq!(config.debug_accessors, vec!["dump_users"]);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"name": "bare"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.name, "bare");
        assert!(config.description.is_empty());
        assert_eq!(config.port, 0);
        assert!(config.globals.is_empty());
        assert!(config.scenarios.is_empty());
    }

    #[test]
    fn scenario_lookup_is_exact() {
        let config = AppConfig {
            name: "t".into(),
            description: String::new(),
            port: 0,
            globals: vec![],
            initial_values: vec![],
            functions: vec![],
            scenarios: vec![Scenario {
                id: "login_flow".into(),
                description: String::new(),
                calls: vec![],
                builder_function: "build_login_flow".into(),
            }],
            debug_accessors: vec![],
        };

        assert!(config.scenario("login_flow").is_some());
        assert!(config.scenario("login").is_none());
        assert!(config.scenario("LOGIN_FLOW").is_none());
    }

    #[test]
    fn serde_roundtrip_config() {
        let config = AppConfig {
            name: "svc".into(),
            description: "d".into(),
            port: 9000,
            globals: vec![GlobalDecl {
                name: "S".into(),
                shape: TypeExpr::set_of(TypeExpr::scalar("String")),
            }],
            initial_values: vec![],
            functions: vec![],
            scenarios: vec![],
            debug_accessors: vec![],
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
