//! `mdpdf render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mdpdf_config::Config;
use mdpdf_renderer::MarkdownRenderer;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    input: PathBuf,

    /// Output PDF path (default: input path with `.pdf` extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document title (default: input file name without extension).
    #[arg(short, long)]
    title: Option<String>,

    /// Path to configuration file (default: auto-discover mdpdf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input is empty or
    /// unreadable, or the PDF cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;

        let markdown = std::fs::read_to_string(&self.input)?;
        if markdown.is_empty() {
            return Err(CliError::Validation(format!(
                "{} is empty",
                self.input.display()
            )));
        }

        let title = self
            .title
            .filter(|t| !t.is_empty())
            .or_else(|| file_stem(&self.input))
            .unwrap_or_else(|| config.render.default_title.clone());
        let output_path = self
            .output
            .unwrap_or_else(|| self.input.with_extension("pdf"));

        let renderer = MarkdownRenderer::new().with_layout(config.render.page_layout());
        let bytes = renderer.render_pdf(&markdown, &title)?;
        std::fs::write(&output_path, &bytes)?;

        tracing::info!(path = %output_path.display(), bytes = bytes.len(), "Wrote PDF");
        output.success(&format!("Wrote {}", output_path.display()));

        Ok(())
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}
