//! Helper registry: the fixed set of named text transforms available to
//! every template compile.
//!
//! Built once at process start and passed by reference into each render
//! call; never mutated afterwards. There is deliberately no implicit
//! global lookup.

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use minijinja::Environment;

type HelperFn = fn(&str) -> String;

/// A named set of string-transform filters for templates.
#[derive(Debug, Clone)]
pub struct HelperRegistry {
    helpers: Vec<(&'static str, HelperFn)>,
}

impl HelperRegistry {
    /// The standard transform set the bundled templates rely on.
    pub fn standard() -> Self {
        Self {
            helpers: vec![
                ("kebab_case", |v| v.to_kebab_case()),
                ("camel_case", |v| v.to_lower_camel_case()),
                ("pascal_case", |v| v.to_pascal_case()),
                ("snake_case", |v| v.to_snake_case()),
                ("upper_case", |v| v.to_uppercase()),
            ],
        }
    }

    /// An empty registry; templates using any custom filter will fail
    /// with a missing-helper error.
    pub fn empty() -> Self {
        Self { helpers: Vec::new() }
    }

    /// Registered helper names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.helpers.iter().map(|(name, _)| *name)
    }

    /// Register every helper as a filter on a fresh environment.
    pub fn apply(&self, env: &mut Environment<'_>) {
        for (name, helper) in &self.helpers {
            let helper = *helper;
            env.add_filter(*name, move |value: &str| -> String { helper(value) });
        }
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
