//! Generation orchestration: template classification, per-item pipeline
//! dispatch, and the joined run report.
//!
//! Every template is classified once into an explicit category tag, then
//! dispatched as an independent read → render → write pipeline. Pipelines
//! run concurrently; the run completes only after every pipeline outcome
//! has been joined, and per-item failures are collected instead of lost.

use std::path::{Path, PathBuf};

use minijinja::Value;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::context;
use crate::error::Error;
use crate::helpers::HelperRegistry;
use crate::materialize;
use crate::naming::{self, CaseStyle, DATA_TOKEN, DATABASE_TOKEN, DOMAIN_TOKEN, DTO_TOKEN};
use crate::store::{TemplateRef, TemplateStore};
use crate::structure::{DatabaseOption, KafkaOption, KafkaRoles, ProjectStructure};

/// Target subtree removed when the database feature is disabled.
const DATABASES_SUBTREE: &str = "src/databases";
/// Target subtree removed when the messaging feature is disabled.
const KAFKA_SUBTREE: &str = "src/kafka";
/// Shared-template role files subject to write-then-prune.
const PRODUCER_TEMPLATE: &str = "src/kafka/producer.service.ts";
const CONSUMER_TEMPLATE: &str = "src/kafka/consumer.service.ts";

/// Where templates come from and where output goes.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Root of the template tree.
    pub templates_dir: PathBuf,
    /// Root of the generated output tree.
    pub target_dir: PathBuf,
}

/// Template category, decided once per file from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCategory {
    /// One output per domain descriptor; name carries `___`.
    Domain,
    /// One output per DTO descriptor; name carries `---`.
    Dto,
    /// One output per data descriptor; name carries `===`.
    Data,
    /// The root module-composition file.
    Composition,
    /// API documentation and readme.
    ApiDoc,
    /// Package manifests and environment file.
    Manifest,
    /// Database feature file; name carries the literal `database`.
    Database,
    /// Messaging feature files, recognized by their directory.
    Kafka,
    /// Everything else: rendered once with the raw structure.
    Other,
}

impl TemplateCategory {
    pub fn classify(template: &TemplateRef) -> Self {
        if template.subdir.starts_with(KAFKA_SUBTREE) {
            return TemplateCategory::Kafka;
        }
        match template.file_name.as_str() {
            "app.module.ts" => TemplateCategory::Composition,
            "swagger.ts" | "README.md" => TemplateCategory::ApiDoc,
            "package.json" | "package-lock.json" | ".env.local" => TemplateCategory::Manifest,
            name if name.contains(DOMAIN_TOKEN) => TemplateCategory::Domain,
            name if name.contains(DTO_TOKEN) => TemplateCategory::Dto,
            name if name.contains(DATA_TOKEN) => TemplateCategory::Data,
            name if name.contains(DATABASE_TOKEN) => TemplateCategory::Database,
            _ => TemplateCategory::Other,
        }
    }
}

/// How a feature toggle was handled during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureOutcome {
    /// Feature templates were rendered.
    Rendered,
    /// Feature subtree was removed from the target tree.
    Suppressed,
    /// Feature was marked handled on input; nothing was re-rendered.
    AlreadyCleared,
    /// Feature was enabled but selected nothing to emit.
    NothingSelected,
}

/// One failed dispatch item.
#[derive(Debug)]
pub struct ItemFailure {
    /// Template path relative to the templates root.
    pub template: PathBuf,
    pub error: Error,
}

/// Aggregate outcome of one generation run.
///
/// Collected from every pipeline after all of them have finished; the
/// feature fields replace the original sentinel-mutation signal on the
/// shared options object.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files written, including any later pruned.
    pub written: Vec<PathBuf>,
    /// Files deleted by the write-then-prune rule.
    pub pruned: Vec<PathBuf>,
    /// Subtrees removed by feature suppression.
    pub suppressed: Vec<PathBuf>,
    /// Templates skipped because their feature was disabled or cleared.
    pub skipped: Vec<PathBuf>,
    /// Per-item failures, each with its template path and error.
    pub failures: Vec<ItemFailure>,
    /// How the database toggle was handled.
    pub database: Option<FeatureOutcome>,
    /// How the messaging toggle was handled.
    pub kafka: Option<FeatureOutcome>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn finish(&mut self) {
        self.written.sort();
        self.pruned.sort();
        self.suppressed.sort();
        self.skipped.sort();
        self.failures.sort_by(|a, b| a.template.cmp(&b.template));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DatabaseDecision {
    Render(String),
    Suppress,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KafkaDecision {
    Render(KafkaRoles),
    Suppress,
    Skip,
    /// Enabled, but neither role selected: emit no kafka files at all.
    NoRoles,
}

/// One planned pipeline: everything a task needs, owned.
struct RenderJob {
    template_rel: PathBuf,
    source: PathBuf,
    target: PathBuf,
    ctx: Value,
    prune_after: Option<PathBuf>,
}

struct TaskReport {
    written: PathBuf,
    pruned: Option<PathBuf>,
}

/// Run a full generation: walk the template tree, dispatch every item, and
/// join all pipelines into one report.
///
/// Returns `Err` only for run-level failures (unreadable template root);
/// per-item failures are reported in the [`RunReport`].
pub async fn generate(
    structure: &ProjectStructure,
    config: &GenerateConfig,
    helpers: &HelperRegistry,
) -> Result<RunReport, Error> {
    let store = TemplateStore::new(&config.templates_dir);
    let templates = store.list()?;
    let mut report = RunReport::default();

    let database_decision = match &structure.module_options.database {
        DatabaseOption::Disabled => DatabaseDecision::Suppress,
        DatabaseOption::Cleared => DatabaseDecision::Skip,
        DatabaseOption::Variant(variant) => DatabaseDecision::Render(variant.clone()),
    };
    let kafka_decision = match &structure.module_options.kafka {
        KafkaOption::Disabled => KafkaDecision::Suppress,
        KafkaOption::Cleared => KafkaDecision::Skip,
        KafkaOption::Roles(roles) if !roles.producer && !roles.consumer => {
            KafkaDecision::NoRoles
        }
        KafkaOption::Roles(roles) => KafkaDecision::Render(*roles),
    };

    // Feature suppression is destructive and must run to completion before
    // any pipeline that could write into the same subtree is spawned.
    match &database_decision {
        DatabaseDecision::Suppress => {
            let subtree = config.target_dir.join(DATABASES_SUBTREE);
            materialize::suppress(&subtree).await?;
            report.suppressed.push(subtree);
            report.database = Some(FeatureOutcome::Suppressed);
        }
        DatabaseDecision::Skip => report.database = Some(FeatureOutcome::AlreadyCleared),
        DatabaseDecision::Render(_) => report.database = Some(FeatureOutcome::Rendered),
    }
    match &kafka_decision {
        KafkaDecision::Suppress => {
            let subtree = config.target_dir.join(KAFKA_SUBTREE);
            materialize::suppress(&subtree).await?;
            report.suppressed.push(subtree);
            report.kafka = Some(FeatureOutcome::Suppressed);
        }
        KafkaDecision::Skip => report.kafka = Some(FeatureOutcome::AlreadyCleared),
        KafkaDecision::NoRoles => report.kafka = Some(FeatureOutcome::NothingSelected),
        KafkaDecision::Render(_) => report.kafka = Some(FeatureOutcome::Rendered),
    }

    let mut jobs: Vec<RenderJob> = Vec::new();
    for template in &templates {
        match TemplateCategory::classify(template) {
            TemplateCategory::Domain => {
                for descriptor in &structure.domains {
                    match naming::resolve(
                        &template.file_name,
                        DOMAIN_TOKEN,
                        &descriptor.domain_name,
                        CaseStyle::Kebab,
                    ) {
                        Ok(output_name) => jobs.push(plan_job(
                            &store,
                            config,
                            template,
                            output_name,
                            context::domain(descriptor),
                            None,
                        )),
                        Err(error) => report
                            .failures
                            .push(ItemFailure { template: template.relative_path(), error }),
                    }
                }
            }
            TemplateCategory::Dto => {
                for descriptor in &structure.dto_objects {
                    match naming::resolve(
                        &template.file_name,
                        DTO_TOKEN,
                        &descriptor.class_name,
                        CaseStyle::LowerCamel,
                    ) {
                        Ok(output_name) => jobs.push(plan_job(
                            &store,
                            config,
                            template,
                            output_name,
                            context::class_object(descriptor),
                            None,
                        )),
                        Err(error) => report
                            .failures
                            .push(ItemFailure { template: template.relative_path(), error }),
                    }
                }
            }
            TemplateCategory::Data => {
                for descriptor in &structure.data_objects {
                    match naming::resolve(
                        &template.file_name,
                        DATA_TOKEN,
                        &descriptor.class_name,
                        CaseStyle::LowerCamel,
                    ) {
                        Ok(output_name) => jobs.push(plan_job(
                            &store,
                            config,
                            template,
                            output_name,
                            context::class_object(descriptor),
                            None,
                        )),
                        Err(error) => report
                            .failures
                            .push(ItemFailure { template: template.relative_path(), error }),
                    }
                }
            }
            TemplateCategory::Composition => jobs.push(plan_job(
                &store,
                config,
                template,
                template.file_name.clone(),
                context::composition(&structure.modules),
                None,
            )),
            TemplateCategory::ApiDoc => jobs.push(plan_job(
                &store,
                config,
                template,
                template.file_name.clone(),
                context::api_doc(&structure.swagger),
                None,
            )),
            TemplateCategory::Manifest => jobs.push(plan_job(
                &store,
                config,
                template,
                template.file_name.clone(),
                context::manifest(&structure.module_options),
                None,
            )),
            TemplateCategory::Database => match &database_decision {
                DatabaseDecision::Render(variant) => {
                    match naming::resolve(
                        &template.file_name,
                        DATABASE_TOKEN,
                        variant,
                        CaseStyle::Kebab,
                    ) {
                        Ok(output_name) => jobs.push(plan_job(
                            &store,
                            config,
                            template,
                            output_name,
                            context::infra(&structure.module_options, variant),
                            None,
                        )),
                        Err(error) => report
                            .failures
                            .push(ItemFailure { template: template.relative_path(), error }),
                    }
                }
                _ => report.skipped.push(template.relative_path()),
            },
            TemplateCategory::Kafka => match &kafka_decision {
                KafkaDecision::Render(roles) => {
                    let relative = template.relative_path();
                    let target = config.target_dir.join(&relative);
                    // The shared template pass emits both role files when
                    // either role is selected; the unwanted one is deleted
                    // right after being written, never before.
                    let prune_after = if roles.producer
                        && !roles.consumer
                        && relative == Path::new(CONSUMER_TEMPLATE)
                    {
                        Some(target.clone())
                    } else if roles.consumer
                        && !roles.producer
                        && relative == Path::new(PRODUCER_TEMPLATE)
                    {
                        Some(target.clone())
                    } else {
                        None
                    };
                    jobs.push(RenderJob {
                        template_rel: relative,
                        source: store.source_path(template),
                        target,
                        ctx: context::infra(&structure.module_options, ""),
                        prune_after,
                    });
                }
                _ => report.skipped.push(template.relative_path()),
            },
            TemplateCategory::Other => jobs.push(plan_job(
                &store,
                config,
                template,
                template.file_name.clone(),
                context::passthrough(structure),
                None,
            )),
        }
    }

    debug!(jobs = jobs.len(), "dispatching pipelines");
    let mut pipelines = JoinSet::new();
    for job in jobs {
        let helpers = helpers.clone();
        let template_rel = job.template_rel.clone();
        pipelines.spawn(async move { (template_rel, run_pipeline(job, helpers).await) });
    }

    // The run is complete only once every in-flight pipeline has finished.
    while let Some(joined) = pipelines.join_next().await {
        match joined {
            Ok((_, Ok(task))) => {
                report.written.push(task.written);
                if let Some(pruned) = task.pruned {
                    report.pruned.push(pruned);
                }
            }
            Ok((template, Err(error))) => {
                warn!(template = %template.display(), %error, "pipeline failed");
                report.failures.push(ItemFailure { template, error });
            }
            Err(join_error) => report.failures.push(ItemFailure {
                template: PathBuf::from("<task>"),
                error: Error::Join(join_error.to_string()),
            }),
        }
    }

    report.finish();
    info!(
        written = report.written.len(),
        pruned = report.pruned.len(),
        skipped = report.skipped.len(),
        failed = report.failures.len(),
        "generation run complete"
    );
    Ok(report)
}

fn plan_job(
    store: &TemplateStore,
    config: &GenerateConfig,
    template: &TemplateRef,
    output_name: String,
    ctx: Value,
    prune_after: Option<PathBuf>,
) -> RenderJob {
    RenderJob {
        template_rel: template.relative_path(),
        source: store.source_path(template),
        target: config.target_dir.join(&template.subdir).join(output_name),
        ctx,
        prune_after,
    }
}

/// One per-item pipeline: read template → render → write, plus the
/// optional prune step. Suspends at each filesystem boundary.
async fn run_pipeline(job: RenderJob, helpers: HelperRegistry) -> Result<TaskReport, Error> {
    let text = tokio::fs::read_to_string(&job.source)
        .await
        .map_err(|e| Error::read(&job.source, e))?;
    let name = job.template_rel.display().to_string();
    let rendered = crate::render::render(&name, &text, &job.ctx, &helpers)?;
    materialize::write(&job.target, &rendered).await?;

    let mut pruned = None;
    if let Some(path) = job.prune_after {
        materialize::prune(&path).await?;
        pruned = Some(path);
    }
    Ok(TaskReport { written: job.target, pruned })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(subdir: &str, file_name: &str) -> TemplateRef {
        TemplateRef { subdir: PathBuf::from(subdir), file_name: file_name.to_string() }
    }

    #[test]
    fn classifies_special_names_before_tokens() {
        assert_eq!(
            TemplateCategory::classify(&template("src", "app.module.ts")),
            TemplateCategory::Composition
        );
        assert_eq!(
            TemplateCategory::classify(&template("src", "swagger.ts")),
            TemplateCategory::ApiDoc
        );
        assert_eq!(
            TemplateCategory::classify(&template("", "README.md")),
            TemplateCategory::ApiDoc
        );
        assert_eq!(
            TemplateCategory::classify(&template("", "package.json")),
            TemplateCategory::Manifest
        );
        assert_eq!(
            TemplateCategory::classify(&template("", ".env.local")),
            TemplateCategory::Manifest
        );
    }

    #[test]
    fn classifies_token_carrying_names() {
        assert_eq!(
            TemplateCategory::classify(&template("src/domains", "___.controller.ts")),
            TemplateCategory::Domain
        );
        assert_eq!(
            TemplateCategory::classify(&template("src/dto", "---.dto.ts")),
            TemplateCategory::Dto
        );
        assert_eq!(
            TemplateCategory::classify(&template("src/data", "===.data.ts")),
            TemplateCategory::Data
        );
        assert_eq!(
            TemplateCategory::classify(&template("src/databases", "database.module.ts")),
            TemplateCategory::Database
        );
    }

    #[test]
    fn kafka_is_recognized_by_directory() {
        assert_eq!(
            TemplateCategory::classify(&template("src/kafka", "producer.service.ts")),
            TemplateCategory::Kafka
        );
        assert_eq!(
            TemplateCategory::classify(&template("src/kafka", "kafka.module.ts")),
            TemplateCategory::Kafka
        );
    }

    #[test]
    fn unmatched_names_fall_through_to_other() {
        assert_eq!(
            TemplateCategory::classify(&template("src", "main.ts")),
            TemplateCategory::Other
        );
        assert_eq!(
            TemplateCategory::classify(&template("", ".gitignore")),
            TemplateCategory::Other
        );
    }
}
