//! Output-filename resolution: placeholder tokens and casing transforms.

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase};

use crate::error::Error;

/// Placeholder token in domain template file names.
pub const DOMAIN_TOKEN: &str = "___";
/// Placeholder token in DTO template file names.
pub const DTO_TOKEN: &str = "---";
/// Placeholder token in data-object template file names.
pub const DATA_TOKEN: &str = "===";
/// Literal placeholder word in database-feature file names.
pub const DATABASE_TOKEN: &str = "database";

/// Case transform applied to a replacement name before substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    /// `user-profile` — domain and database-feature file names.
    Kebab,
    /// `userProfile` — DTO/data file names.
    LowerCamel,
    /// `UserProfile` — canonical type names inside templates.
    Pascal,
}

/// Apply a case transform to a name.
pub fn apply_case(name: &str, case: CaseStyle) -> String {
    match case {
        CaseStyle::Kebab => name.to_kebab_case(),
        CaseStyle::LowerCamel => name.to_lower_camel_case(),
        CaseStyle::Pascal => name.to_pascal_case(),
    }
}

/// Resolve a template file name into its concrete output file name.
///
/// The first occurrence of `token` is replaced by the cased form of
/// `replacement`; all other characters, including the extension, are kept
/// verbatim. A file name without the token is rejected.
pub fn resolve(
    template_file_name: &str,
    token: &'static str,
    replacement: &str,
    case: CaseStyle,
) -> Result<String, Error> {
    if !template_file_name.contains(token) {
        return Err(Error::MalformedTemplateName {
            file_name: template_file_name.to_string(),
            token,
        });
    }
    Ok(template_file_name.replacen(token, &apply_case(replacement, case), 1))
}
