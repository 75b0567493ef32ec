//! Constraint evaluation over the resolved tree.
//!
//! Every leaf's constraints are evaluated against its final value; every
//! violation on every leaf is collected into one report. Evaluation never
//! mutates values.

use std::sync::OnceLock;

use serde_json::{Map, Value};
use url::Url;

use super::merge;
use crate::error::{ValidationReport, Violation};
use crate::schema::{Constraint, LeafBinding, LeafKind};

/// The process-wide constraint evaluator.
///
/// Immutable after construction, so concurrent `load` calls share it without
/// locking.
pub(super) struct ConstraintEvaluator;

/// Shared evaluator instance, constructed once per process.
pub(super) fn evaluator() -> &'static ConstraintEvaluator {
    static EVALUATOR: OnceLock<ConstraintEvaluator> = OnceLock::new();
    EVALUATOR.get_or_init(|| ConstraintEvaluator)
}

impl ConstraintEvaluator {
    /// Evaluate every binding's constraints; collect all violations.
    pub(super) fn check_all(
        &self,
        tree: &Map<String, Value>,
        bindings: &[LeafBinding],
    ) -> ValidationReport {
        let mut report = ValidationReport::default();
        for binding in bindings {
            let value = merge::value_at_path(tree, &binding.key_path);
            for constraint in &binding.constraints {
                if let Err(message) = self.check(constraint, value, binding.kind) {
                    report.violations.push(Violation {
                        key_path: binding.key_path.clone(),
                        constraint: constraint.to_string(),
                        message,
                    });
                }
            }
        }
        report
    }

    fn check(
        &self,
        constraint: &Constraint,
        value: Option<&Value>,
        kind: LeafKind,
    ) -> Result<(), String> {
        match constraint {
            Constraint::Required => {
                if is_zero(value) {
                    Err("value is required".to_string())
                } else {
                    Ok(())
                }
            }
            Constraint::Url => {
                let s = as_str(value);
                if Url::parse(&s).is_ok() {
                    Ok(())
                } else {
                    Err("not a well-formed url".to_string())
                }
            }
            Constraint::Email => {
                if is_plausible_email(&as_str(value)) {
                    Ok(())
                } else {
                    Err("not a valid email address".to_string())
                }
            }
            Constraint::Numeric => {
                let s = as_str(value);
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                    Ok(())
                } else {
                    Err("not a numeric string".to_string())
                }
            }
            Constraint::Len(n) => {
                let len = as_str(value).chars().count();
                if len == *n {
                    Ok(())
                } else {
                    Err(format!("length must be exactly {n}, got {len}"))
                }
            }
            Constraint::Min(n) => match kind {
                LeafKind::Str => {
                    let len = as_str(value).chars().count() as i64;
                    if len >= *n {
                        Ok(())
                    } else {
                        Err(format!("length must be at least {n}, got {len}"))
                    }
                }
                _ => check_bound(value, |v| v >= *n, || format!("must be at least {n}")),
            },
            Constraint::Gte(n) => check_bound(value, |v| v >= *n, || format!("must be at least {n}")),
            Constraint::Lte(n) => check_bound(value, |v| v <= *n, || format!("must be at most {n}")),
            Constraint::OneOf(literals) => {
                let s = as_str(value);
                if literals.iter().any(|literal| literal == &s) {
                    Ok(())
                } else {
                    Err(format!("must be one of {{{}}}", literals.join(",")))
                }
            }
        }
    }
}

/// Render the leaf value as the string the constraint inspects.
fn as_str(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Numeric bound check; an unset leaf compares as zero, and a non-numeric
/// value is itself a violation.
fn check_bound(
    value: Option<&Value>,
    ok: impl Fn(i64) -> bool,
    describe: impl Fn() -> String,
) -> Result<(), String> {
    let numeric = match value {
        None | Some(Value::Null) => Some(0),
        Some(v) => v.as_i64(),
    };
    match numeric {
        Some(v) if ok(v) => Ok(()),
        Some(v) => Err(format!("{}, got {v}", describe())),
        None => Err(format!("{}, got no numeric value", describe())),
    }
}

/// Zero-value test shared with the `required` rule: absence, empty string,
/// zero, and false all count as unset.
fn is_zero(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => matches!(n.as_f64(), Some(f) if f == 0.0),
        _ => false,
    }
}

/// Cheap structural email check: one `@`, non-empty local part, and a domain
/// with at least one interior dot.
fn is_plausible_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((head, tail)) = domain.rsplit_once('.') else {
        return false;
    };
    !head.is_empty() && !tail.is_empty() && !s.contains(char::is_whitespace)
}
