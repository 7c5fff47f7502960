//! Stateless template rendering.
//!
//! Every call compiles the template text fresh against a one-shot
//! environment; templates are small and run once each, so there is no
//! cross-call caching to invalidate.

use minijinja::{Environment, ErrorKind, UndefinedBehavior, Value};

use crate::error::Error;
use crate::helpers::HelperRegistry;

/// Render template text against a context.
///
/// `name` identifies the template in error messages only. Absent context
/// keys render as empty rather than failing; unknown filters or functions
/// surface as [`Error::MissingHelper`].
pub fn render(
    name: &str,
    template_text: &str,
    ctx: &Value,
    helpers: &HelperRegistry,
) -> Result<String, Error> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Lenient);
    env.set_keep_trailing_newline(true);
    helpers.apply(&mut env);

    let template = env
        .template_from_str(template_text)
        .map_err(|e| template_error(name, e))?;
    template.render(ctx).map_err(|e| template_error(name, e))
}

fn template_error(name: &str, err: minijinja::Error) -> Error {
    match err.kind() {
        ErrorKind::UnknownFilter | ErrorKind::UnknownFunction | ErrorKind::UnknownTest => {
            Error::MissingHelper { name: name.to_string(), reason: err.to_string() }
        }
        _ => Error::TemplateSyntax { name: name.to_string(), reason: err.to_string() },
    }
}
