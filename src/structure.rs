//! Project-structure description: the input data model for one generation run.
//!
//! The upstream collaborator (CLI prompt flow, editor plugin, ...) produces
//! this as JSON with camelCase keys; everything here is read-only once
//! constructed. Descriptors are consumed once per matching template.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Error;

/// Root description of a generation run.
///
/// Holds one file group per template category plus the run-global
/// [`ModuleOptions`] and [`SwaggerInfo`]. File groups are independent of
/// each other; `modules` keeps the declaration order used by the
/// composition template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    /// Generated domain modules, in registration order.
    #[serde(default)]
    pub modules: Vec<ModuleRegistration>,
    /// Domain entities (controller/service/module templates).
    #[serde(default)]
    pub domains: Vec<DomainDescriptor>,
    /// Request/response DTO classes.
    #[serde(default)]
    pub dto_objects: Vec<ClassDescriptor>,
    /// Plain data-object classes.
    #[serde(default)]
    pub data_objects: Vec<ClassDescriptor>,
    /// Feature toggles shared by the infra pipelines.
    #[serde(default)]
    pub module_options: ModuleOptions,
    /// API-documentation metadata.
    #[serde(default)]
    pub swagger: SwaggerInfo,
}

impl ProjectStructure {
    /// Parse a project structure from its JSON description.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::Structure(e.to_string()))
    }
}

/// One module registration line in the composition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRegistration {
    /// Canonical module name; casing transforms derive from this.
    pub name: String,
}

/// One domain entity to generate.
///
/// All string fields default to empty so a template referencing an absent
/// key still renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDescriptor {
    /// Canonical domain name.
    pub domain_name: String,
    /// HTTP-verb decorator metadata (e.g. "Get", "Post").
    #[serde(default)]
    pub decorator_method: String,
    /// Free-form description block emitted into doc comments.
    #[serde(default)]
    pub domain_info: String,
    /// DTO imports for the controller layer.
    #[serde(default)]
    pub import_request_dto: Vec<ImportRef>,
    /// DTO imports for the service layer.
    #[serde(default)]
    pub service_import_request_dto: Vec<ImportRef>,
    /// Root path prefix for the generated routes.
    #[serde(default)]
    pub root_path: String,
    /// Routing path for the controller decorator.
    #[serde(default)]
    pub router: String,
}

/// Import reference to another generated class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRef {
    pub class_name: String,
    #[serde(default)]
    pub file_name: String,
}

/// DTO and data-object classes share one shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDescriptor {
    /// Canonical class name.
    pub class_name: String,
    /// Ordered field list.
    #[serde(default)]
    pub variable_list: Vec<FieldSpec>,
    /// Validator decorators the class imports.
    #[serde(default)]
    pub class_validator_list: Vec<String>,
    /// Imports of other DTO classes.
    #[serde(default)]
    pub import_request_dto: Vec<ImportRef>,
}

/// One field of a DTO/data class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub variable_name: String,
    #[serde(default)]
    pub variable_type: String,
    /// Validation-rule annotations applied to the field, in order.
    #[serde(default)]
    pub validators: Vec<String>,
}

/// Run-level feature toggles.
///
/// Never mutated during a run; the orchestrator tracks per-feature
/// handling in its own state instead of writing sentinels back here.
/// Unknown toggles are carried through `extra` for future features.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleOptions {
    #[serde(default)]
    pub database: DatabaseOption,
    #[serde(default)]
    pub kafka: KafkaOption,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Database toggle: a selected variant, or one of two sentinels.
///
/// `"not"` means the feature is disabled for this run; `"clear"` means a
/// previous pass over the same template set already handled it and the
/// database templates must be skipped without re-rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseOption {
    #[default]
    Disabled,
    Cleared,
    Variant(String),
}

impl DatabaseOption {
    /// Wire form of the toggle, as the upstream JSON spells it.
    pub fn as_str(&self) -> &str {
        match self {
            DatabaseOption::Disabled => "not",
            DatabaseOption::Cleared => "clear",
            DatabaseOption::Variant(name) => name,
        }
    }
}

impl Serialize for DatabaseOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DatabaseOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "" | "not" => DatabaseOption::Disabled,
            "clear" => DatabaseOption::Cleared,
            _ => DatabaseOption::Variant(raw),
        })
    }
}

/// Messaging toggle: disabled, already handled, or enabled with role flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KafkaOption {
    #[default]
    Disabled,
    Cleared,
    Roles(KafkaRoles),
}

impl Serialize for KafkaOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            KafkaOption::Disabled => serializer.serialize_bool(false),
            KafkaOption::Cleared => serializer.serialize_str("clear"),
            KafkaOption::Roles(roles) => roles.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for KafkaOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Falsy wire values mean "disabled"; an object carries role flags.
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null | Value::Bool(false) => KafkaOption::Disabled,
            Value::Bool(true) => {
                KafkaOption::Roles(KafkaRoles { producer: true, consumer: true })
            }
            Value::String(s) if s == "clear" => KafkaOption::Cleared,
            other => {
                KafkaOption::Roles(KafkaRoles::deserialize(other).map_err(D::Error::custom)?)
            }
        })
    }
}

/// Which messaging roles are selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KafkaRoles {
    #[serde(default)]
    pub producer: bool,
    #[serde(default)]
    pub consumer: bool,
}

/// API-documentation metadata passed opaquely to the doc templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
