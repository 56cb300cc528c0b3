mod schema;

pub use schema::{Config, ModuleConfig, SubjectConfig, DEFAULT_GRADE_MAX};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::catalog::{validate_catalog, Branch};
use crate::grading::types::{Grades, Module, Subject};

/// Get the config directory path (~/.config/moyenne/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("moyenne")
}

/// Get the default config file path (~/.config/moyenne/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file.
///
/// With an explicit `path`, a missing file is an error. The default path
/// is optional: a missing file yields the default configuration, since
/// the tool is fully usable with the built-in catalogs.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path(), false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Resolve the catalog for a branch: the validated config override if one
/// exists, the built-in catalog otherwise. Override validation failures
/// are reported with every violation, like the rest of config handling.
pub fn resolve_catalog(config: &Config, branch: Branch) -> Result<Vec<Module>> {
    let override_modules = config
        .catalogs
        .as_ref()
        .and_then(|catalogs| catalogs.get(branch.id()));

    let Some(module_configs) = override_modules else {
        return Ok(branch.modules());
    };

    let modules: Vec<Module> = module_configs.iter().map(module_from_config).collect();

    if let Err(errors) = validate_catalog(branch, &modules) {
        anyhow::bail!(
            "Invalid catalog override for branch {}:\n  - {}",
            branch.id(),
            errors.join("\n  - ")
        );
    }

    Ok(modules)
}

fn module_from_config(module: &ModuleConfig) -> Module {
    Module {
        id: module.id.clone(),
        title: module.title.clone(),
        subjects: module
            .subjects
            .iter()
            .map(|s| Subject {
                id: s.id.clone(),
                title: s.title.clone(),
                coefficient: s.coefficient,
                credits: s.credits,
                has_td: s.td,
                has_tp: s.tp,
                grades: Grades::default(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_override(yaml: &str) -> Config {
        serde_saphyr::from_str(yaml).unwrap()
    }

    #[test]
    fn test_resolve_without_override_uses_builtin() {
        let config = Config::default();
        let modules = resolve_catalog(&config, Branch::Iad).unwrap();
        assert_eq!(modules, Branch::Iad.modules());
    }

    #[test]
    fn test_resolve_with_valid_override() {
        let config = config_with_override(
            r#"
catalogs:
  rt:
    - id: only
      title: Only Module
      subjects:
        - { id: a, title: A, coefficient: 2, credits: 30, td: true }
"#,
        );
        let modules = resolve_catalog(&config, Branch::Rt).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].subjects[0].id, "a");
        assert!(modules[0].subjects[0].has_td);
        // Other branches keep their built-in catalogs
        assert_eq!(
            resolve_catalog(&config, Branch::Gi).unwrap(),
            Branch::Gi.modules()
        );
    }

    #[test]
    fn test_resolve_rejects_invalid_override() {
        let config = config_with_override(
            r#"
catalogs:
  rt:
    - id: only
      title: Only Module
      subjects:
        - { id: a, title: A, coefficient: 0, credits: 0 }
"#,
        );
        let err = resolve_catalog(&config, Branch::Rt).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("coefficient"));
        assert!(message.contains("total credits"));
    }

    #[test]
    fn test_explicitly_named_missing_config_errors() {
        // The default path may be absent, but a path the user asked for
        // must exist.
        let err = load_config(Some(PathBuf::from("/nonexistent/moyenne.yaml"))).unwrap_err();
        assert!(format!("{}", err).contains("not found"));
    }
}
