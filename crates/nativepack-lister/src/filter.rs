use crate::backend::DependencyLister;
use crate::ListerError;
use nativepack_schema::{DependencyList, DependencyPath, DEFAULT_FILTER};
use regex::Regex;
use tracing::{debug, info};

/// Selects dependency paths from raw lister output.
#[derive(Debug, Clone)]
pub struct DependencyFilter {
    pattern: Regex,
}

impl Default for DependencyFilter {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_FILTER).expect("default filter is a valid regex"),
        }
    }
}

impl DependencyFilter {
    pub fn new(pattern: &str) -> Result<Self, ListerError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Every non-overlapping match on every line, in output order.
    pub fn extract(&self, raw: &str) -> DependencyList {
        raw.lines()
            .flat_map(|line| self.pattern.find_iter(line))
            .map(|m| DependencyPath::new(m.as_str()))
            .collect()
    }
}

/// Run `lister` against `target`, keep the paths `filter` selects, and
/// append `target` itself as the final entry.
///
/// The result is in discovery order and is not deduplicated.
pub fn list_dependencies(
    lister: &dyn DependencyLister,
    target: &str,
    filter: &DependencyFilter,
) -> Result<DependencyList, ListerError> {
    info!("listing dependencies of {target} with {}", lister.name());
    let raw = lister.run(target)?;
    let mut deps = filter.extract(&raw);
    debug!("{} paths matched '{}'", deps.len(), filter.as_str());
    deps.push(DependencyPath::new(target));
    Ok(deps)
}
