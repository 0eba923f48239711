//! Render backends
//!
//! External-tool capability interface. Each backend declares whether
//! its tool is installed; callers pick the first available entry from a
//! ranked list instead of chaining fallbacks at the call site. Backends
//! receive final text and write a file; they never partially write the
//! final output on failure.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::utils::error::{ConversionError, ConversionResult};

/// A capability that turns final LaTeX/Markdown text into an output file
pub trait RenderBackend {
    fn name(&self) -> &'static str;

    /// Whether the backing tool is installed and runnable
    fn available(&self) -> bool;

    fn render(&self, content: &str, output: &Path) -> ConversionResult<()>;
}

/// First available backend from a ranked list
pub fn select_backend(
    backends: Vec<Box<dyn RenderBackend>>,
) -> Option<Box<dyn RenderBackend>> {
    backends.into_iter().find(|b| b.available())
}

/// Ranked HTML backends: pandoc first, the built-in wrapper as the
/// always-available fallback
pub fn html_backends() -> Vec<Box<dyn RenderBackend>> {
    vec![Box::new(PandocHtmlBackend), Box::new(BasicHtmlBackend)]
}

fn binary_available(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// PDF rendering through pdflatex, run in a scratch directory
pub struct PdfLatexBackend {
    /// Directories whose files are copied next to the .tex source
    /// before compilation (figures, style files)
    resource_dirs: Vec<PathBuf>,
    /// BibTeX file copied in as references.bib
    bibliography: Option<PathBuf>,
}

impl PdfLatexBackend {
    pub fn new() -> Self {
        Self {
            resource_dirs: Vec::new(),
            bibliography: None,
        }
    }

    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dirs.push(dir.into());
        self
    }

    pub fn with_bibliography(mut self, path: impl Into<PathBuf>) -> Self {
        self.bibliography = Some(path.into());
        self
    }
}

impl Default for PdfLatexBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for PdfLatexBackend {
    fn name(&self) -> &'static str {
        "pdflatex"
    }

    fn available(&self) -> bool {
        binary_available("pdflatex")
    }

    fn render(&self, content: &str, output: &Path) -> ConversionResult<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("document.tex"), content)?;

        for resource_dir in &self.resource_dirs {
            copy_dir_files(resource_dir, dir.path())?;
        }
        if let Some(bib) = &self.bibliography {
            fs::copy(bib, dir.path().join("references.bib"))
                .map_err(|_| ConversionError::missing_resource(bib.display().to_string()))?;
        }

        // Multiple passes so cross-references settle
        for _ in 0..3 {
            run_pdflatex(dir.path())?;
        }

        if has_bibliography_command(content) {
            run_tool(dir.path(), "bibtex", &["document"])?;
            for _ in 0..2 {
                run_pdflatex(dir.path())?;
            }
        }

        let pdf = dir.path().join("document.pdf");
        if pdf.exists() {
            fs::copy(&pdf, output)?;
            Ok(())
        } else {
            Err(ConversionError::render(
                "pdflatex",
                format!("no PDF produced{}", log_tail(dir.path())),
            ))
        }
    }
}

/// HTML rendering through pandoc
pub struct PandocHtmlBackend;

impl RenderBackend for PandocHtmlBackend {
    fn name(&self) -> &'static str {
        "pandoc"
    }

    fn available(&self) -> bool {
        binary_available("pandoc")
    }

    fn render(&self, content: &str, output: &Path) -> ConversionResult<()> {
        let html = run_pandoc(
            content,
            &["-f", "markdown", "-t", "html5", "--standalone", "--mathjax"],
        )?;
        fs::write(output, html)?;
        Ok(())
    }
}

/// Minimal built-in HTML wrapper, last-ranked fallback when pandoc is
/// not installed
pub struct BasicHtmlBackend;

impl RenderBackend for BasicHtmlBackend {
    fn name(&self) -> &'static str {
        "builtin-html"
    }

    fn available(&self) -> bool {
        true
    }

    fn render(&self, content: &str, output: &Path) -> ConversionResult<()> {
        fs::write(output, basic_html(content))?;
        Ok(())
    }
}

/// DOCX rendering through pandoc
pub struct PandocDocxBackend;

impl RenderBackend for PandocDocxBackend {
    fn name(&self) -> &'static str {
        "pandoc"
    }

    fn available(&self) -> bool {
        binary_available("pandoc")
    }

    fn render(&self, content: &str, output: &Path) -> ConversionResult<()> {
        let output_arg = output.display().to_string();
        run_pandoc(
            content,
            &["-f", "markdown", "-t", "docx", "-o", output_arg.as_str()],
        )?;
        Ok(())
    }
}

fn run_pandoc(input: &str, args: &[&str]) -> ConversionResult<Vec<u8>> {
    let mut child = Command::new("pandoc")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                ConversionError::render("pandoc", "pandoc not found; please install pandoc")
            }
            _ => ConversionError::from(e),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }

    let out = child.wait_with_output()?;
    if !out.status.success() {
        return Err(ConversionError::render(
            "pandoc",
            String::from_utf8_lossy(&out.stderr).into_owned(),
        ));
    }
    Ok(out.stdout)
}

pub(crate) fn run_pdflatex(dir: &Path) -> ConversionResult<std::process::Output> {
    run_tool(dir, "pdflatex", &["-interaction=nonstopmode", "document.tex"])
}

pub(crate) fn run_tool(
    dir: &Path,
    tool: &str,
    args: &[&str],
) -> ConversionResult<std::process::Output> {
    Command::new(tool)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConversionError::render(
                tool,
                format!("{} not found; please install a LaTeX distribution", tool),
            ),
            _ => ConversionError::from(e),
        })
}

pub(crate) fn has_bibliography_command(tex: &str) -> bool {
    tex.contains("\\bibliography") || tex.contains("\\addbibresource")
}

pub(crate) fn copy_dir_files(from: &Path, to: &Path) -> ConversionResult<()> {
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            if let Some(name) = path.file_name() {
                fs::copy(&path, to.join(name))?;
            }
        }
    }
    Ok(())
}

fn log_tail(dir: &Path) -> String {
    let log = dir.join("document.log");
    match fs::read_to_string(&log) {
        Ok(content) => {
            let tail_start = content.len().saturating_sub(2000);
            // Stay on a char boundary for the slice
            let start = (tail_start..content.len())
                .find(|&i| content.is_char_boundary(i))
                .unwrap_or(content.len());
            format!("; log tail:\n{}", &content[start..])
        }
        Err(_) => String::new(),
    }
}

fn basic_html(content: &str) -> String {
    let escaped = content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    let generated = chrono::Local::now().format("%Y-%m-%d");
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n    <meta name=\"date\" content=\"{generated}\">\n    <title>Document</title>\n    <style>\n        body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }}\n        pre {{ background: #f4f4f4; padding: 10px; overflow-x: auto; }}\n        code {{ background: #f4f4f4; padding: 2px 4px; }}\n    </style>\n</head>\n<body>\n{escaped}\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_html_escapes_markup() {
        let html = basic_html("a < b & c > d");
        assert!(html.contains("a &lt; b &amp; c &gt; d"));
        assert!(html.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_basic_backend_always_available() {
        assert!(BasicHtmlBackend.available());
    }

    #[test]
    fn test_html_ranking_never_empty() {
        let selected = select_backend(html_backends());
        assert!(selected.is_some());
    }

    #[test]
    fn test_bibliography_command_detection() {
        assert!(has_bibliography_command("\\bibliography{references}"));
        assert!(has_bibliography_command("\\addbibresource{x.bib}"));
        assert!(!has_bibliography_command("plain text"));
    }

    #[test]
    fn test_basic_backend_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc.html");
        BasicHtmlBackend.render("# hello", &out).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("# hello"));
    }
}
