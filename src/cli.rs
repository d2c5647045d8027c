//! Minimal CLI: job JSON → (python | fields)
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::assemble::Assembler;
use crate::classify::{partition, Classification};
use crate::config::GeneratorOptions;
use crate::geometry::BoundingBox;
use crate::model::FieldModel;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate VEGL parameter scripts (Python) from job-object JSON
#[derive(Parser, Debug)]
#[command(name = "vegl-scriptgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate the parameter script for every job document
    Python(PythonOut),
    /// print how each job's fields are classified, as JSON
    Fields(FieldsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON), one job per line
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select the job object in each document (e.g. /data/job)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is one job
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct PythonOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// JSON generator config (class names, layout, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// reject field and class names that are not Python identifiers
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// name jobs without a `uniqueName` as `shell<N>` by input position
    #[arg(long, default_value_t = false)]
    unique_names: bool,

    /// prepend a generation timestamp comment (output is no longer reproducible)
    #[arg(long, default_value_t = false)]
    timestamp: bool,

    /// output .py file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct FieldsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// SRS code assumed for the selected bounds
    #[arg(long, default_value = "EPSG:4326")]
    selection_srs: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// `fields` output for one job document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReport<'a> {
    source: &'a str,
    #[serde(flatten)]
    classification: Classification<'a>,
    padded_bounds: Option<BoundingBox>,
    selected_bounds: Option<BoundingBox>,
}

/// One job document and where it came from (`path`, `path:line`, `path#2`).
#[derive(Debug, Clone)]
struct JobDocument {
    source: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<JobDocument>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut out = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {source_path_str}"))?;

            let mut raw = Vec::new();
            if self.ndjson {
                for (line_no, line) in source.lines().enumerate() {
                    if line.trim().is_empty() { continue; }
                    let value = serde_json::from_str::<Value>(line).with_context(|| {
                        format!("failed to parse NDJSON line ({source_path_str}:{})", line_no + 1)
                    })?;
                    raw.push((format!("{source_path_str}:{}", line_no + 1), value));
                }
            } else {
                let value = serde_json::from_str::<Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
                raw.push((source_path_str.clone(), value));
            }

            for (source, value) in raw {
                self.select(source, value, &mut out)?;
            }
        }
        debug!(documents = out.len(), "loaded job documents");
        Ok(out)
    }

    fn select(&self, source: String, value: Value, out: &mut Vec<JobDocument>) -> Result<()> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(ptr) => match value.pointer(ptr) {
                Some(v) => v.clone(),
                None => bail!("JSON pointer `{ptr}` selects nothing in {source}"),
            },
        };
        match self.jq_expr.as_deref() {
            None => out.push(JobDocument { source, value }),
            Some(jq_expr) => {
                let docs = crate::jq_exec::select_documents(jq_expr, &value)
                    .with_context(|| format!("failed to apply jq expression to {source}"))?;
                if docs.is_empty() {
                    warn!(%source, "jq expression produced no documents");
                }
                let many = docs.len() > 1;
                for (i, value) in docs.into_iter().enumerate() {
                    let source = if many { format!("{source}#{i}") } else { source.clone() };
                    out.push(JobDocument { source, value });
                }
            }
        }
        Ok(())
    }
}

impl<'a> FieldReport<'a> {
    fn new(source: &'a str, model: &'a FieldModel, selection_srs: &str) -> Self {
        Self {
            source,
            classification: partition(model),
            padded_bounds: BoundingBox::padded(model),
            selected_bounds: BoundingBox::selected(model, selection_srs),
        }
    }
}

impl JobDocument {
    fn model(&self) -> Result<FieldModel> {
        FieldModel::from_json(&self.value).with_context(|| format!("invalid job document {}", self.source))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Python(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                target.run()
            }
            Command::Fields(target) => target.run(),
        }
    }
}

impl PythonOut {
    /// Config file (or defaults); `--strict` can only switch validation on.
    fn options(&self) -> Result<GeneratorOptions> {
        let options = match self.config.as_ref() {
            Some(path) => GeneratorOptions::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GeneratorOptions::default(),
        };
        Ok(if self.strict { options.strict(true) } else { options })
    }

    fn run(&self) -> Result<()> {
        let assembler = Assembler::new(self.options()?);

        // 1) load + tag
        let docs = self.input_settings.load_documents()?;
        let mut models = docs.iter().map(JobDocument::model).collect::<Result<Vec<_>>>()?;
        if self.unique_names {
            for (index, model) in models.iter_mut().enumerate() {
                model.ensure_unique_name(index);
            }
        }

        // 2) generate; jobs share nothing, so fan out and keep input order
        let scripts = models
            .par_iter()
            .zip(docs.par_iter())
            .map(|(model, doc)| {
                assembler
                    .assemble(model, model)
                    .with_context(|| format!("failed to generate script for {}", doc.source))
            })
            .collect::<Result<Vec<String>>>()?;

        // 3) write
        let mut src = String::new();
        if self.timestamp {
            let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
            src.push_str(&format!("# Generated by vegl-scriptgen at {stamp}"));
            src.push_str(&assembler.options().layout.newline);
        }
        for script in &scripts {
            src.push_str(script);
        }
        write_output(self.out.as_ref(), &src)?;

        eprintln!(
            "{} {} parameter script(s)",
            "generated".green().bold(),
            scripts.len()
        );
        Ok(())
    }
}

impl FieldsOut {
    fn run(&self) -> Result<()> {
        let docs = self.input_settings.load_documents()?;
        let models = docs.iter().map(JobDocument::model).collect::<Result<Vec<_>>>()?;
        let reports: Vec<FieldReport<'_>> = docs
            .iter()
            .zip(&models)
            .map(|(doc, model)| FieldReport::new(&doc.source, model, &self.selection_srs))
            .collect();
        let report_src = serde_json::to_string_pretty(&reports)?;
        write_output(self.out.as_ref(), &report_src)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&PathBuf>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            print!("{src}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
