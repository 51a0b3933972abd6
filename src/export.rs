// src/export.rs
//! Export bridge: turn the rendered resume into a downloadable file

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tracing::info;

use crate::core::FsOps;
use crate::template::render_document;
use crate::types::ResumeDocument;

/// Callback installed by the active template; receives the current document.
pub type ExportHandler = Arc<dyn Fn(&ResumeDocument) -> Result<()> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub paper_size: String,
    /// Page margin in millimetres
    pub margins: f32,
    pub scale: f32,
    pub file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            paper_size: "A4".to_string(),
            margins: 0.0,
            scale: 0.75,
            file_name: "resume.pdf".to_string(),
        }
    }
}

impl ExportOptions {
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Typst paper name for the configured size
    fn typst_paper(&self) -> String {
        match self.paper_size.to_lowercase().as_str() {
            "a4" => "a4".to_string(),
            "a3" => "a3".to_string(),
            "a5" => "a5".to_string(),
            "letter" => "us-letter".to_string(),
            "legal" => "us-legal".to_string(),
            other => other.to_string(),
        }
    }

    fn pdf_file_name(&self) -> String {
        let name = FsOps::sanitize_file_name(&self.file_name);
        if name.to_lowercase().ends_with(".pdf") {
            name
        } else {
            format!("{}.pdf", name)
        }
    }
}

/// Writes the Typst source for the resume and compiles it with the `typst` CLI.
#[derive(Debug, Clone)]
pub struct TypstExporter {
    output_dir: PathBuf,
    options: ExportOptions,
    compile: bool,
}

impl TypstExporter {
    pub fn new(output_dir: PathBuf, options: ExportOptions) -> Self {
        Self {
            output_dir,
            options,
            compile: true,
        }
    }

    /// Skip the `typst compile` step and only write the source
    pub fn source_only(mut self) -> Self {
        self.compile = false;
        self
    }

    pub fn source_path(&self) -> PathBuf {
        let pdf = self.options.pdf_file_name();
        let stem = Path::new(&pdf)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("resume")
            .to_string();
        self.output_dir.join(format!("{}.typ", stem))
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.output_dir.join(self.options.pdf_file_name())
    }

    /// File `export` produces: the PDF, or the source when not compiling
    pub fn target_path(&self) -> PathBuf {
        if self.compile {
            self.pdf_path()
        } else {
            self.source_path()
        }
    }

    /// Full Typst document: page setup followed by the projected resume
    pub fn typst_source(&self, doc: &ResumeDocument) -> String {
        let tree = render_document(doc);
        let base_size = 11.0 * self.options.scale;

        let mut source = String::new();
        source.push_str(&format!(
            "#set page(paper: \"{}\", margin: {}mm)\n",
            self.options.typst_paper(),
            self.options.margins
        ));
        source.push_str(&format!("#set text(size: {:.2}pt)\n", base_size));
        source.push_str("#set par(justify: true)\n\n");
        source.push_str(&tree.to_typst());
        source
    }

    /// Produce the export file; returns the PDF path, or the source path when not compiling
    pub fn export(&self, doc: &ResumeDocument) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory: {}", self.output_dir.display())
        })?;

        let source_path = self.source_path();
        std::fs::write(&source_path, self.typst_source(doc))
            .with_context(|| format!("Failed to write {}", source_path.display()))?;

        if !self.compile {
            info!("Wrote resume source to {}", source_path.display());
            return Ok(source_path);
        }

        let pdf_path = self.pdf_path();
        let status = Command::new("typst")
            .arg("compile")
            .arg(&source_path)
            .arg(&pdf_path)
            .status()
            .context("Failed to execute typst command")?;

        if !status.success() {
            anyhow::bail!("Typst compilation failed");
        }

        info!("Exported resume to {}", pdf_path.display());
        Ok(pdf_path)
    }

    /// Wrap the exporter as a store export callback
    pub fn handler(self) -> impl Fn(&ResumeDocument) -> Result<()> + Send + Sync + 'static {
        move |doc: &ResumeDocument| self.export(doc).map(|_| ())
    }
}
