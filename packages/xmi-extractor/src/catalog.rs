//! Verification-option catalog.
//!
//! Maps each verification option to the prompt template it uses and the
//! report files it needs as context. Files are declared once in named groups
//! and options list the groups they draw from:
//!
//! ```yaml
//! groups:
//!   usecase: [usecase/usecase_elements.md]
//!   requirement: [requirement/requirement_elements.md]
//! options:
//!   - name: Requirement coverage
//!     prompt: prompts/requirement_coverage.txt
//!     groups: [requirement, usecase]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{ExtractorError, Result};

/// One verification option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerificationOption {
    /// Name shown to the user and used for lookup.
    pub name: String,

    /// Prompt template path.
    pub prompt: PathBuf,

    /// File groups concatenated, in order, to form the context.
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Loaded catalog of file groups and verification options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    /// Named file groups in declaration order.
    #[serde(default)]
    pub groups: IndexMap<String, Vec<PathBuf>>,

    /// Options in declaration order.
    #[serde(default)]
    pub options: Vec<VerificationOption>,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Catalog {
    /// Load a catalog from a YAML file.
    ///
    /// Relative paths in the catalog resolve against the file's directory.
    ///
    /// # Errors
    /// [`ExtractorError::InputNotFound`] or [`ExtractorError::Io`] if the
    /// file cannot be read, [`ExtractorError::Catalog`] if it is not valid,
    /// [`ExtractorError::UnknownGroup`] if an option names a missing group.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading verification catalog");

        let content = fs::read_to_string(path).map_err(|e| ExtractorError::io(path, e))?;
        let mut catalog = Self::parse(&content, path)?;
        catalog.base_dir = path.parent().map(Path::to_path_buf);
        Ok(catalog)
    }

    /// Parse a catalog from YAML text. Paths stay as written.
    ///
    /// # Errors
    /// [`ExtractorError::Catalog`] if the YAML is invalid,
    /// [`ExtractorError::UnknownGroup`] if an option names a missing group.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let catalog: Self = serde_yaml_ng::from_str(content).map_err(|source| {
            ExtractorError::Catalog {
                path: path.to_path_buf(),
                source,
            }
        })?;
        catalog.validate()?;

        tracing::debug!(
            groups = catalog.groups.len(),
            options = catalog.options.len(),
            "Parsed catalog successfully"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for option in &self.options {
            if let Some(group) = option.groups.iter().find(|g| !self.groups.contains_key(*g)) {
                return Err(ExtractorError::UnknownGroup {
                    option: option.name.clone(),
                    group: group.clone(),
                });
            }
        }
        Ok(())
    }

    /// Option names in declaration order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.name.as_str())
    }

    /// Look up an option by name.
    ///
    /// # Errors
    /// [`ExtractorError::UnknownOption`] if no option has this name.
    pub fn option(&self, name: &str) -> Result<&VerificationOption> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| ExtractorError::UnknownOption(name.to_string()))
    }

    /// Context files for an option: its groups' files concatenated in the
    /// order the option lists the groups.
    ///
    /// # Errors
    /// [`ExtractorError::UnknownOption`] if no option has this name.
    pub fn files_for(&self, name: &str) -> Result<Vec<PathBuf>> {
        let option = self.option(name)?;
        Ok(option
            .groups
            .iter()
            .filter_map(|g| self.groups.get(g))
            .flatten()
            .map(|p| self.resolve(p))
            .collect())
    }

    /// Prompt template path for an option.
    ///
    /// # Errors
    /// [`ExtractorError::UnknownOption`] if no option has this name.
    pub fn prompt_path(&self, name: &str) -> Result<PathBuf> {
        self.option(name).map(|o| self.resolve(&o.prompt))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
