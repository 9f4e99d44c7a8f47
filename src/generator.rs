//! The generation run: discover, specialize, reconcile.
//!
//! Templates are processed in parallel, each parsed once into its own arena
//! and specialized for every instantiation over the shared tree. Nothing is
//! written while that happens; each instantiation returns a [`Claim`] and the
//! claims are folded by [`output::reduce`] before any file is written or
//! deleted.

use bumpalo::Bump;
use rayon::prelude::*;
use specgen_compiler::{Arity, Template, specialize};
use specgen_core::Instantiation;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};
use tracing::{debug, info, info_span, warn};
use walkdir::WalkDir;

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, Result};
use crate::expansion::expand;
use crate::output::{self, Action, Claim, OutputState, output_path};
use crate::summary::RunSummary;

/// Run a generation pass with `config`.
pub fn generate(config: GeneratorConfig) -> Result<RunSummary> {
    Generator::new(config).run()
}

pub struct Generator {
    config: GeneratorConfig,
}

/// Claims and errors of one template.
#[derive(Debug, Default)]
struct TemplateOutcome {
    claims: Vec<Claim>,
    errors: Vec<GenerateError>,
}

impl TemplateOutcome {
    fn into_result(mut self) -> Result<Self> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(self.errors.swap_remove(0))
        }
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every output and remove orphans.
    ///
    /// Unless fail-fast is set, errors are collected: all other outputs are
    /// still written and orphans still removed, then
    /// [`GenerateError::Failed`] lists everything that went wrong.
    pub fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        pool.install(|| self.run_in_pool(started))
    }

    fn run_in_pool(&self, started: Instant) -> Result<RunSummary> {
        let config = &self.config;
        info!(
            templates = %config.template_root.display(),
            output = %config.output_root.display(),
            incremental = config.incremental,
            "generating"
        );

        let templates = self.discover()?;
        let existing = self.scan_outputs()?;
        debug!(
            templates = templates.len(),
            existing = existing.len(),
            "discovered templates and existing outputs"
        );

        let outcomes: Vec<TemplateOutcome> = if config.fail_fast {
            templates
                .par_iter()
                .map(|template| self.process(template).into_result())
                .collect::<Result<_>>()?
        } else {
            templates.par_iter().map(|template| self.process(template)).collect()
        };

        let mut errors = Vec::new();
        let mut claims = Vec::new();
        for outcome in outcomes {
            claims.extend(outcome.claims);
            errors.extend(outcome.errors);
        }

        let mut reduction = output::reduce(&existing, claims);
        errors.append(&mut reduction.duplicates);
        if config.fail_fast && !errors.is_empty() {
            return Err(errors.swap_remove(0));
        }

        let writes = std::mem::take(&mut reduction.writes);
        let failed_writes: Vec<(PathBuf, GenerateError)> = writes
            .into_par_iter()
            .filter_map(|(path, text)| match write_output(&path, &text) {
                Ok(()) => {
                    if config.verbose {
                        info!(path = %path.display(), "wrote");
                    } else {
                        debug!(path = %path.display(), "wrote");
                    }
                    None
                }
                Err(err) => Some((path, err)),
            })
            .collect();
        for (path, err) in failed_writes {
            warn!("{err}");
            if let Some(record) = reduction.record_mut(&path) {
                record.state = OutputState::Claimed;
            }
            if config.fail_fast {
                return Err(err);
            }
            errors.push(err);
        }

        for path in std::mem::take(&mut reduction.orphans) {
            match fs::remove_file(&path) {
                Ok(()) => {
                    info!(path = %path.display(), "deleted orphan");
                    if let Some(record) = reduction.record_mut(&path) {
                        record.state = OutputState::Deleted;
                    }
                }
                Err(source) => {
                    let err = GenerateError::Delete { path, source };
                    warn!("{err}");
                    if config.fail_fast {
                        return Err(err);
                    }
                    errors.push(err);
                }
            }
        }

        let count = |state: OutputState| reduction.records.iter().filter(|r| r.state == state).count();
        let summary = RunSummary {
            templates: templates.len(),
            generated: reduction.generated(),
            updated: count(OutputState::Written),
            deleted: count(OutputState::Deleted),
            elapsed: started.elapsed(),
        };
        info!("{summary}");

        if errors.is_empty() {
            Ok(summary)
        } else {
            warn!(errors = errors.len(), "generation finished with errors");
            Err(GenerateError::Failed {
                errors,
                summary: Box::new(summary),
            })
        }
    }

    /// Template paths relative to the template root, sorted.
    fn discover(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.template_root;
        let mut templates = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|source| GenerateError::Scan {
                path: root.clone(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.config.is_template(path) {
                continue;
            }
            // An output tree nested in the template tree holds no templates.
            if path.starts_with(&self.config.output_root) && !root.starts_with(&self.config.output_root) {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            templates.push(relative.to_path_buf());
        }
        Ok(templates)
    }

    /// Existing outputs that may be deleted as orphans.
    ///
    /// Files in the template tree are hand-written and never candidates,
    /// unless the output tree is nested inside it: then everything under the
    /// output root except a template is generated.
    fn scan_outputs(&self) -> Result<Vec<PathBuf>> {
        let config = &self.config;
        let mut existing = output::scan(&config.output_root, &config.extension)?;
        let nested = config.output_root != config.template_root
            && config.output_root.starts_with(&config.template_root);
        existing.retain(|path| {
            if !path.starts_with(&config.template_root) {
                return true;
            }
            nested && !config.is_template(path)
        });
        Ok(existing)
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn process(&self, relative: &Path) -> TemplateOutcome {
        let span = info_span!("template", path = %relative.display());
        let _enter = span.enter();

        let path = self.config.template_root.join(relative);
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(source) => return self.preserve(relative, GenerateError::Read { path, source }),
        };

        let arena = Bump::new();
        let template = match Template::parse(relative, &source, &arena, &self.config.syntax) {
            Ok(template) => template,
            Err(err) => return self.preserve(relative, err.into()),
        };
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
        let instantiations = expand(relative, template.arity());
        debug!(
            arity = ?template.arity(),
            instantiations = instantiations.len(),
            "parsed"
        );

        let results: Vec<(Claim, Option<GenerateError>)> = instantiations
            .par_iter()
            .map(|inst| self.instantiate(&template, inst, modified))
            .collect();

        let mut outcome = TemplateOutcome::default();
        for (claim, error) in results {
            outcome.claims.push(claim);
            outcome.errors.extend(error);
        }
        outcome
    }

    /// Specialize one instantiation unless its output is up to date.
    fn instantiate(
        &self,
        template: &Template<'_>,
        inst: &Instantiation,
        template_modified: Option<SystemTime>,
    ) -> (Claim, Option<GenerateError>) {
        let path = self
            .config
            .output_root
            .join(output_path(template.path(), inst, &self.config.syntax));

        if self.config.incremental && is_up_to_date(&path, template_modified) {
            if self.config.verbose {
                info!(path = %path.display(), "up to date");
            }
            return (Claim::new(path, inst, Action::Keep), None);
        }

        match specialize(template, inst) {
            Ok(text) => {
                let text = if self.config.header {
                    format!("{}{text}", header(inst))
                } else {
                    text
                };
                (Claim::new(path, inst, Action::Write(text)), None)
            }
            Err(source) => {
                let err = GenerateError::Specialize {
                    template: inst.template.clone(),
                    instantiation: inst.label(),
                    source,
                };
                warn!("{err}");
                (Claim::new(path, inst, Action::Preserve), Some(err))
            }
        }
    }

    /// Claim the outputs of a template that could not be used so none of
    /// them is deleted as an orphan.
    fn preserve(&self, relative: &Path, err: GenerateError) -> TemplateOutcome {
        warn!("{err}");
        let file_name = relative.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let claims = Arity::from_file_name(file_name, &self.config.syntax)
            .map(|arity| expand(relative, arity))
            .unwrap_or_default()
            .iter()
            .map(|inst| {
                let path = self
                    .config
                    .output_root
                    .join(output_path(relative, inst, &self.config.syntax));
                Claim::new(path, inst, Action::Preserve)
            })
            .collect();
        TemplateOutcome {
            claims,
            errors: vec![err],
        }
    }
}

/// Whether an output exists and is no older than its template.
fn is_up_to_date(output: &Path, template_modified: Option<SystemTime>) -> bool {
    let Some(template_modified) = template_modified else {
        return false;
    };
    fs::metadata(output)
        .and_then(|m| m.modified())
        .is_ok_and(|output_modified| output_modified >= template_modified)
}

fn header(inst: &Instantiation) -> String {
    format!(
        "// Generated by specgen from {} [{}]. Do not edit.\n",
        inst.template.display(),
        inst.label()
    )
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)
    };
    write().map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
