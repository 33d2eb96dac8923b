mod loader;
mod model;
mod validation;

pub use loader::{
    FileRuleLoader, FileSystem, LOCAL_RULE_NAME, RealFileSystem, RuleLoader, RuleSyntax,
    parse_rules,
};
pub use model::{
    AlignmentRule, ArcSpec, DEFAULT_ACCEPTABLE, DEFAULT_ARC_END, DEFAULT_ARC_START,
    DEFAULT_ERROR_THRESHOLD, GridSpec, GroupRule, RuleFile, ShapeKind, SizeSpec, Tolerance,
};
pub use validation::{build_rule, validate_rule_semantics};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
