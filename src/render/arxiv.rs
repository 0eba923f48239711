//! ArXiv submission packaging
//!
//! Assembles a submission directory (main.tex, figures, generated
//! .bbl) and wraps it into a .tar.gz archive. ArXiv consumes the
//! compiled .bbl rather than the .bib source, so the .bib is removed
//! from the package after the best-effort compile.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::options::ConvertOptions;
use crate::render::backends::{copy_dir_files, has_bibliography_command, run_tool};
use crate::utils::error::{ConversionError, ConversionResult};

const FIGURE_EXTENSIONS: [&str; 4] = ["png", "jpg", "pdf", "eps"];

/// Build the submission directory and archive. Returns the path of the
/// created .tar.gz.
pub fn package(tex: &str, options: &ConvertOptions, out_dir: &Path) -> ConversionResult<PathBuf> {
    fs::create_dir_all(out_dir)?;
    fs::write(out_dir.join("main.tex"), tex)?;

    if let Some(bib) = &options.bibliography_path {
        fs::copy(bib, out_dir.join("references.bib"))
            .map_err(|_| ConversionError::missing_resource(bib.display().to_string()))?;
    }

    if let Some(figures) = &options.figures_path {
        copy_figures(figures, out_dir)?;
    }

    // Best-effort .bbl generation; a missing LaTeX toolchain is not
    // fatal for packaging.
    let _ = generate_bbl(tex, out_dir);

    let bib_copy = out_dir.join("references.bib");
    if bib_copy.exists() {
        fs::remove_file(&bib_copy)?;
    }

    archive(out_dir)
}

fn copy_figures(from: &Path, to: &Path) -> ConversionResult<()> {
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let path = entry.path();
        let is_figure = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| FIGURE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_figure {
            if let Some(name) = path.file_name() {
                fs::copy(&path, to.join(name))?;
            }
        }
    }
    Ok(())
}

fn generate_bbl(tex: &str, out_dir: &Path) -> ConversionResult<()> {
    let scratch = tempfile::tempdir()?;
    copy_dir_files(out_dir, scratch.path())?;

    // pdflatex expects document.tex in the helpers; compile main.tex
    // here explicitly
    run_tool(scratch.path(), "pdflatex", &["-interaction=nonstopmode", "main.tex"])?;

    if has_bibliography_command(tex) && scratch.path().join("references.bib").exists() {
        run_tool(scratch.path(), "bibtex", &["main"])?;
        run_tool(
            scratch.path(),
            "pdflatex",
            &["-interaction=nonstopmode", "main.tex"],
        )?;
    }

    let bbl = scratch.path().join("main.bbl");
    if bbl.exists() {
        fs::copy(&bbl, out_dir.join("main.bbl"))?;
    }
    Ok(())
}

fn archive(out_dir: &Path) -> ConversionResult<PathBuf> {
    let tar_path = PathBuf::from(format!("{}.tar.gz", out_dir.display()));
    let parent = match out_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let base = out_dir
        .file_name()
        .ok_or_else(|| ConversionError::io("invalid output directory name"))?;

    let status = Command::new("tar")
        .arg("-czf")
        .arg(&tar_path)
        .arg("-C")
        .arg(&parent)
        .arg(base)
        .status()
        .map_err(|e| ConversionError::render("tar", e.to_string()))?;

    if status.success() {
        Ok(tar_path)
    } else {
        Err(ConversionError::render(
            "tar",
            format!("exited with {}", status),
        ))
    }
}
