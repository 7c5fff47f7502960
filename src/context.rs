//! Per-category render-context builders.
//!
//! Pure functions from descriptors to `minijinja::Value`; no I/O and no
//! descriptor mutation. Every context carries the two brace-escape fields
//! because the generated source language itself uses curly braces and must
//! not collide with the templating syntax.

use minijinja::{Value, context};

use crate::naming::{CaseStyle, apply_case};
use crate::structure::{
    ClassDescriptor, DomainDescriptor, ModuleOptions, ModuleRegistration, ProjectStructure,
    SwaggerInfo,
};

/// Literal opening brace exposed to templates as `openbrace`.
pub const OPEN_BRACE: &str = "{";
/// Literal closing brace exposed to templates as `closebrace`.
pub const CLOSE_BRACE: &str = "}";

/// Context for one domain entity template.
pub fn domain(descriptor: &DomainDescriptor) -> Value {
    context! {
        openbrace => OPEN_BRACE,
        closebrace => CLOSE_BRACE,
        domainName => descriptor.domain_name,
        decoratorMethod => descriptor.decorator_method,
        domainInfo => descriptor.domain_info,
        importRequestDto => descriptor.import_request_dto,
        serviceImportRequestDto => descriptor.service_import_request_dto,
        rootPath => descriptor.root_path,
        router => descriptor.router,
    }
}

/// Context for one DTO or data-object template.
pub fn class_object(descriptor: &ClassDescriptor) -> Value {
    context! {
        openbrace => OPEN_BRACE,
        closebrace => CLOSE_BRACE,
        className => descriptor.class_name,
        variableList => descriptor.variable_list,
        classValidatorList => descriptor.class_validator_list,
        importRequestDto => descriptor.import_request_dto,
    }
}

/// Context for the root composition file.
///
/// Exposes the full module list in declaration order; the template emits
/// one registration line per module. Each entry carries the derived class
/// and file names alongside the canonical one.
pub fn composition(modules: &[ModuleRegistration]) -> Value {
    let modules: Vec<Value> = modules
        .iter()
        .map(|module| {
            context! {
                name => module.name,
                className => apply_case(&module.name, CaseStyle::Pascal),
                fileName => apply_case(&module.name, CaseStyle::Kebab),
            }
        })
        .collect();

    context! {
        openbrace => OPEN_BRACE,
        closebrace => CLOSE_BRACE,
        modules => modules,
    }
}

/// Context for the API documentation / readme templates.
pub fn api_doc(swagger: &SwaggerInfo) -> Value {
    context! {
        openbrace => OPEN_BRACE,
        closebrace => CLOSE_BRACE,
        swagger => swagger,
    }
}

/// Context for package-manifest templates.
pub fn manifest(options: &ModuleOptions) -> Value {
    context! {
        openbrace => OPEN_BRACE,
        closebrace => CLOSE_BRACE,
        moduleOptions => options,
    }
}

/// Context for infra-feature templates (database, messaging).
///
/// `variable_type` is the canonical type name (PascalCase of the selected
/// variant), nested into the options mapping so templates declaring a
/// typed class can reference `moduleOptions.variableType`. It is present
/// and empty for features with no variant name.
pub fn infra(options: &ModuleOptions, variant: &str) -> Value {
    let module_options = context! {
        variableType => apply_case(variant, CaseStyle::Pascal),
        ..Value::from_serialize(options)
    };

    context! {
        openbrace => OPEN_BRACE,
        closebrace => CLOSE_BRACE,
        moduleOptions => module_options,
    }
}

/// Context for uncategorized templates: the raw project structure.
pub fn passthrough(structure: &ProjectStructure) -> Value {
    context! {
        openbrace => OPEN_BRACE,
        closebrace => CLOSE_BRACE,
        ..Value::from_serialize(structure)
    }
}
