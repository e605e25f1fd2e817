//! Subcommand implementations.

use std::borrow::Cow;
use std::path::Path;

use anyhow::Result;

use typequiz_core::{builtin, parser, Catalog};

use crate::config::{load_config_from, TypequizConfig};

pub mod categories;
pub mod init;
pub mod play;
pub mod show;
pub mod validate;

/// The catalog at `path`, or the built-in one.
fn resolve_catalog(path: Option<&Path>) -> Result<Cow<'static, Catalog>> {
    match path {
        Some(path) => {
            let catalog = parser::load_catalog(path)?;
            for w in parser::validate_catalog(&catalog) {
                tracing::warn!(
                    question = w.question_id.as_deref().unwrap_or("-"),
                    "catalog {}: {}",
                    path.display(),
                    w.message
                );
            }
            Ok(Cow::Owned(catalog))
        }
        None => Ok(Cow::Borrowed(builtin::catalog())),
    }
}

/// Load the config, then the catalog named by `--catalog`, by the config, or
/// the built-in one, in that order.
pub fn open_catalog(
    catalog: Option<&Path>,
    config: Option<&Path>,
) -> Result<(TypequizConfig, Cow<'static, Catalog>)> {
    let config = load_config_from(config)?;
    let catalog = resolve_catalog(catalog.or(config.catalog.as_deref()))?;
    Ok((config, catalog))
}
