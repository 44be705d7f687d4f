//! Font loading utilities for the `sales_report` crate.
//!
//! Reports are typeset in DejaVu Sans, which covers the accented glyphs used by
//! Portuguese labels and customer names.  The family is looked up in the
//! following order:
//!
//! 1. the directory named by `SALES_REPORT_FONTS_DIR`,
//! 2. `assets/fonts` next to the running executable,
//! 3. `assets/fonts` inside this crate,
//! 4. the system DejaVu directory (`SALES_REPORT_SYSTEM_FONTS_DIR` or
//!    `/usr/share/fonts/truetype/dejavu`), with a warning.
//!
//! A directory is usable once it holds `DejaVuSans.ttf` and
//! `DejaVuSans-Bold.ttf`.  The oblique faces are loaded when present and
//! replaced by their upright counterparts otherwise.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};

/// Name of the font family used by reports.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "DejaVuSans";

/// Environment variable overriding the bundled font directory.
pub const FONTS_DIR_ENV: &str = "SALES_REPORT_FONTS_DIR";

const SYSTEM_FONTS_DIR_ENV: &str = "SALES_REPORT_SYSTEM_FONTS_DIR";
const SYSTEM_FONTS_DIR: &str = "/usr/share/fonts/truetype/dejavu";

struct FontFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

impl FontFiles {
    fn required(&self) -> [&'static str; 2] {
        [self.regular, self.bold]
    }
}

const FONT_FILES: FontFiles = FontFiles {
    regular: "DejaVuSans.ttf",
    bold: "DejaVuSans-Bold.ttf",
    italic: "DejaVuSans-Oblique.ttf",
    bold_italic: "DejaVuSans-BoldOblique.ttf",
};

/// Where the renderer takes its fonts from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    /// Search the default locations described in the module documentation.
    #[default]
    Default,
    /// Load the family from exactly this directory.
    Directory(PathBuf),
}

impl FontSource {
    /// Loads the DejaVu Sans family from this source.
    pub fn load(&self) -> Result<FontFamily<FontData>, Error> {
        match self {
            Self::Default => default_font_family(),
            Self::Directory(path) => {
                let missing = missing_font_files(path);
                if !path.is_dir() || !missing.is_empty() {
                    return Err(not_found(format!(
                        "Configured font directory {} is unusable ({})",
                        path.display(),
                        describe_missing(path, &missing)
                    )));
                }
                load_font_family(path)
            }
        }
    }

    /// Indicates whether [`FontSource::load`] can find the required font files.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Default => default_fonts_available(),
            Self::Directory(path) => path.is_dir() && missing_font_files(path).is_empty(),
        }
    }
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates
        .iter()
        .any(|existing| existing == &manifest_candidate)
    {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .required()
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn describe_missing(path: &Path, missing: &[PathBuf]) -> String {
    if !path.is_dir() {
        return format!("directory missing at {}", path.display());
    }
    let missing_list = missing
        .iter()
        .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
        .collect::<Vec<_>>()
        .join(", ");
    format!("missing files [{}]", missing_list)
}

fn not_found(message: String) -> Error {
    Error::new(
        message,
        io::Error::new(io::ErrorKind::NotFound, "report fonts not found"),
    )
}

fn resolve_font_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        let missing = missing_font_files(&candidate);
        if candidate.is_dir() && missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} ({})",
            candidate.display(),
            describe_missing(&candidate, &missing)
        ));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(not_found(format!(
        "Unable to locate the {} font directory. Checked: {}. Set {}.",
        DEFAULT_FONT_FAMILY_NAME, summary, FONTS_DIR_ENV
    )))
}

fn load_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load {} {} font at {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn load_optional_font(
    directory: &Path,
    file: &str,
    style: &str,
    fallback: &FontData,
) -> Result<FontData, Error> {
    if directory.join(file).is_file() {
        return load_font(directory, file, style);
    }
    debug!(
        "No {} {} font in {}; reusing the upright face.",
        DEFAULT_FONT_FAMILY_NAME,
        style,
        directory.display()
    );
    Ok(fallback.clone())
}

fn load_font_family(directory: &Path) -> Result<FontFamily<FontData>, Error> {
    let regular = load_font(directory, FONT_FILES.regular, "regular")?;
    let bold = load_font(directory, FONT_FILES.bold, "bold")?;
    let italic = load_optional_font(directory, FONT_FILES.italic, "italic", &regular)?;
    let bold_italic = load_optional_font(directory, FONT_FILES.bold_italic, "bold italic", &bold)?;
    Ok(FontFamily {
        regular,
        bold,
        italic,
        bold_italic,
    })
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn system_font_directory() -> PathBuf {
    env_path(SYSTEM_FONTS_DIR_ENV).unwrap_or_else(|| PathBuf::from(SYSTEM_FONTS_DIR))
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the DejaVu Sans family from the search path, falling back to the
/// system font directory when no configured location is complete.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    let err = match resolve_font_directory() {
        Ok(directory) => return load_font_family(&directory),
        Err(err) => err,
    };

    if !fonts_missing(&err) {
        return Err(err);
    }

    let system = system_font_directory();
    let missing = missing_font_files(&system);
    if system.is_dir() && missing.is_empty() {
        warn!(
            "Report fonts unavailable ({}); falling back to system fonts in {}.",
            err,
            system.display()
        );
        return load_font_family(&system);
    }

    warn!(
        "Report fonts unavailable ({}); system fallback failed: {}",
        err,
        describe_missing(&system, &missing)
    );
    Err(not_found(format!(
        "{}. System fallback {} is unusable ({})",
        err,
        system.display(),
        describe_missing(&system, &missing)
    )))
}

/// Indicates whether the default search order finds the required font files.
pub fn default_fonts_available() -> bool {
    if resolve_font_directory().is_ok() {
        return true;
    }
    let system = system_font_directory();
    system.is_dir() && missing_font_files(&system).is_empty()
}
