//! The contract expression language.
//!
//! Expressions describe preconditions and postconditions over shared state.
//! Each operator family is its own variant ([`Expr::And`], [`Expr::Cmp`],
//! [`Expr::SetPred`], [`Expr::Dom`], [`Expr::Index`], [`Expr::State`],
//! [`Expr::Result`]) rather than a single stringly-dispatched application
//! node, so illegal placements -- a post-state reference inside a
//! precondition, say -- are distinguishable by matching on the tree.
//!
//! # State versioning
//!
//! State is threaded sequentially through a scenario. For a global `G`:
//! - [`StateVersion::Baseline`] (`G_old`) is the value before any step ran
//!   (version 0). By author convention it appears only in the first step's
//!   precondition; this is not enforced.
//! - [`StateVersion::Current`] (`G`) in step *i*'s precondition is the value
//!   after step *i-1* executed (version *i-1*).
//! - [`StateVersion::Post`] (`G'`) is the value immediately after the current
//!   call (version *i*), legal only in that step's postcondition.
//!
//! Every downstream consumer interprets the same tree under this convention
//! without re-deriving it, so lowering stages must implement it exactly.
//!
//! There is no dedicated boolean type: the literal `1` stands for true, and
//! an empty [`Expr::And`] is also true.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Equality comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Ne,
}

/// Set membership predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOp {
    In,
    NotIn,
}

/// Which version of a global a state reference denotes.
///
/// See the module docs for the sequential-versioning convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateVersion {
    /// Value after the previous step of the scenario (surface form `G`).
    Current,
    /// Value before any step of the scenario ran (surface form `G_old`).
    Baseline,
    /// Value immediately after the current call (surface form `G'`).
    /// Legal only inside a postcondition.
    Post,
}

/// A contract expression.
///
/// Preconditions may reference baseline, current and in-scope local names;
/// postconditions may additionally reference post-state projections and
/// [`Expr::Result`]. [`crate::contract::ApiContract::validate`] lints the
/// placement rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Reference to a local (free) input variable.
    Var(String),

    /// Numeric literal. `Num(1)` doubles as boolean true.
    Num(i64),

    /// Ordered map literal.
    MapLit(Vec<(Expr, Expr)>),

    /// N-ary conjunction, n >= 0. Empty conjunction is true.
    And(Vec<Expr>),

    /// Value equality / inequality.
    Cmp {
        op: CmpOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Set membership / non-membership.
    SetPred {
        op: SetOp,
        item: Box<Expr>,
        set: Box<Expr>,
    },

    /// Key-set of a map-valued expression.
    Dom(Box<Expr>),

    /// Map lookup. Consumers must treat `key` outside `dom(map)` as
    /// "precondition not satisfiable", never as a crash.
    Index { map: Box<Expr>, key: Box<Expr> },

    /// Reference to a global at a particular state version.
    State {
        global: String,
        version: StateVersion,
    },

    /// Return value of the immediately preceding call. Legal only in that
    /// step's own postcondition.
    Result,
}

impl Expr {
    /// Local variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// Numeric literal.
    pub fn num(n: i64) -> Self {
        Expr::Num(n)
    }

    /// The boolean-true literal (`1` by convention).
    pub fn truth() -> Self {
        Expr::Num(1)
    }

    /// Ordered map literal.
    pub fn map_lit(entries: Vec<(Expr, Expr)>) -> Self {
        Expr::MapLit(entries)
    }

    /// N-ary conjunction. `and(vec![])` is true.
    pub fn and(args: Vec<Expr>) -> Self {
        Expr::And(args)
    }

    /// `lhs = rhs`.
    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Expr::Cmp {
            op: CmpOp::Eq,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `lhs != rhs`.
    pub fn ne(lhs: Expr, rhs: Expr) -> Self {
        Expr::Cmp {
            op: CmpOp::Ne,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `in(item, set)`.
    pub fn is_in(item: Expr, set: Expr) -> Self {
        Expr::SetPred {
            op: SetOp::In,
            item: Box::new(item),
            set: Box::new(set),
        }
    }

    /// `not_in(item, set)`.
    pub fn not_in(item: Expr, set: Expr) -> Self {
        Expr::SetPred {
            op: SetOp::NotIn,
            item: Box::new(item),
            set: Box::new(set),
        }
    }

    /// `dom(map)` -- the key-set of a map-valued expression.
    pub fn dom(map: Expr) -> Self {
        Expr::Dom(Box::new(map))
    }

    /// `map[key]`.
    pub fn index(map: Expr, key: Expr) -> Self {
        Expr::Index {
            map: Box::new(map),
            key: Box::new(key),
        }
    }

    /// Global `name` at its current (previous-step) version.
    pub fn current(name: impl Into<String>) -> Self {
        Expr::State {
            global: name.into(),
            version: StateVersion::Current,
        }
    }

    /// Global `name` at its baseline version (`name_old`).
    pub fn baseline(name: impl Into<String>) -> Self {
        Expr::State {
            global: name.into(),
            version: StateVersion::Baseline,
        }
    }

    /// Global `name` at its post-call version (`name'`).
    pub fn post(name: impl Into<String>) -> Self {
        Expr::State {
            global: name.into(),
            version: StateVersion::Post,
        }
    }

    /// The `_result` reference.
    pub fn result() -> Self {
        Expr::Result
    }

    /// Collects every [`Expr::Var`] name in the tree, deduplicated, in
    /// first-occurrence order.
    ///
    /// State references denote globals and are deliberately excluded: free
    /// variables are exactly the names a scenario step needs concrete
    /// values for.
    pub fn free_vars(&self) -> IndexSet<String> {
        let mut out = IndexSet::new();
        self.collect_free_vars(&mut out);
        out
    }

    fn collect_free_vars(&self, out: &mut IndexSet<String>) {
        match self {
            Expr::Var(name) => {
                out.insert(name.clone());
            }
            Expr::Num(_) | Expr::State { .. } | Expr::Result => {}
            Expr::MapLit(entries) => {
                for (k, v) in entries {
                    k.collect_free_vars(out);
                    v.collect_free_vars(out);
                }
            }
            Expr::And(args) => {
                for a in args {
                    a.collect_free_vars(out);
                }
            }
            Expr::Cmp { lhs, rhs, .. } => {
                lhs.collect_free_vars(out);
                rhs.collect_free_vars(out);
            }
            Expr::SetPred { item, set, .. } => {
                item.collect_free_vars(out);
                set.collect_free_vars(out);
            }
            Expr::Dom(map) => map.collect_free_vars(out),
            Expr::Index { map, key } => {
                map.collect_free_vars(out);
                key.collect_free_vars(out);
            }
        }
    }

    /// `true` if the tree contains a [`StateVersion::Post`] reference.
    pub fn uses_post_state(&self) -> bool {
        self.any(&|e| {
            matches!(
                e,
                Expr::State {
                    version: StateVersion::Post,
                    ..
                }
            )
        })
    }

    /// `true` if the tree contains an [`Expr::Result`] reference.
    pub fn uses_result(&self) -> bool {
        self.any(&|e| matches!(e, Expr::Result))
    }

    /// `true` if `pred` holds for any node in the tree (including self).
    fn any(&self, pred: &dyn Fn(&Expr) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        match self {
            Expr::Var(_) | Expr::Num(_) | Expr::State { .. } | Expr::Result => false,
            Expr::MapLit(entries) => entries
                .iter()
                .any(|(k, v)| k.any(pred) || v.any(pred)),
            Expr::And(args) => args.iter().any(|a| a.any(pred)),
            Expr::Cmp { lhs, rhs, .. } => lhs.any(pred) || rhs.any(pred),
            Expr::SetPred { item, set, .. } => item.any(pred) || set.any(pred),
            Expr::Dom(map) => map.any(pred),
            Expr::Index { map, key } => map.any(pred) || key.any(pred),
        }
    }
}

impl fmt::Display for Expr {
    /// Renders the surface notation: `not_in(email, dom(U_old))`,
    /// `U'[email] = password`, `_result`, `AND(..)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Num(n) => write!(f, "{n}"),
            Expr::MapLit(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Expr::And(args) => {
                write!(f, "AND(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
            Expr::Cmp { op, lhs, rhs } => {
                let sym = match op {
                    CmpOp::Eq => "=",
                    CmpOp::Ne => "!=",
                };
                write!(f, "{lhs} {sym} {rhs}")
            }
            Expr::SetPred { op, item, set } => {
                let name = match op {
                    SetOp::In => "in",
                    SetOp::NotIn => "not_in",
                };
                write!(f, "{name}({item}, {set})")
            }
            Expr::Dom(map) => write!(f, "dom({map})"),
            Expr::Index { map, key } => write!(f, "{map}[{key}]"),
            Expr::State { global, version } => match version {
                StateVersion::Current => write!(f, "{global}"),
                StateVersion::Baseline => write!(f, "{global}_old"),
                StateVersion::Post => write!(f, "{global}'"),
            },
            Expr::Result => write!(f, "_result"),
        }
    }
}
