//! servgen: render backend-service project trees from parameterized templates.
//!
//! Given a declarative [`ProjectStructure`] (domain entities, DTOs, data
//! objects, feature toggles) and a template tree, servgen resolves each
//! template's output name, builds its render context, renders it, and
//! materializes the result under a target root. Feature subtrees are
//! emitted or removed based on the run's toggles.

pub mod context;
pub mod error;
pub mod helpers;
pub mod materialize;
pub mod naming;
pub mod orchestrator;
pub mod render;
pub mod store;
pub mod structure;

pub use error::Error;
pub use helpers::HelperRegistry;
pub use orchestrator::{FeatureOutcome, GenerateConfig, ItemFailure, RunReport, TemplateCategory};
pub use store::{TemplateRef, TemplateStore, export_bundled};
pub use structure::{
    ClassDescriptor, DatabaseOption, DomainDescriptor, FieldSpec, ImportRef, KafkaOption,
    KafkaRoles, ModuleOptions, ModuleRegistration, ProjectStructure, SwaggerInfo,
};

/// Run a full generation with the standard helper registry.
pub async fn generate(
    structure: &ProjectStructure,
    config: &GenerateConfig,
) -> Result<RunReport, Error> {
    let helpers = HelperRegistry::standard();
    orchestrator::generate(structure, config, &helpers).await
}

/// Parse a project structure from JSON and run a full generation.
pub async fn generate_from_json(
    structure_json: &str,
    config: &GenerateConfig,
) -> Result<RunReport, Error> {
    let structure = ProjectStructure::from_json(structure_json)?;
    generate(&structure, config).await
}
