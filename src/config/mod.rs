use std::collections::HashMap;
use std::path::Path;

use crate::error::{CasementError, CasementResult};
use crate::geometry::{Size, DEFAULT_MIN_SIZE};
use crate::window::ZOrderAllocator;

pub mod parser;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Variables defined with 'set'
    pub variables: HashMap<String, String>,
    /// Floor of the normal z pool; the first window gets `z_base + 1`
    pub z_base: u32,
    /// Ceiling of the normal z pool; reaching it triggers renormalization
    pub z_max: u32,
    /// Z-index reserved for the taskbar/overlay; maximized windows go above it
    pub overlay_z: u32,
    /// Default minimum window size
    pub min_size: Size,
    /// Container size used when the host does not supply one
    pub container: Option<Size>,
    /// Focus windows as soon as they are registered
    pub focus_new_windows: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variables: HashMap::new(),
            z_base: ZOrderAllocator::DEFAULT_BASE_Z,
            z_max: ZOrderAllocator::DEFAULT_MAX_Z,
            overlay_z: ZOrderAllocator::DEFAULT_OVERLAY_Z,
            min_size: DEFAULT_MIN_SIZE,
            container: None,
            focus_new_windows: true,
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load_from_file(path: &Path) -> CasementResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = parser::parse_config(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the parser cannot see line by line
    pub fn validate(&self) -> CasementResult<()> {
        if self.min_size.width <= 0 || self.min_size.height <= 0 {
            return Err(CasementError::Config(format!(
                "min_size must be positive, got {}",
                self.min_size
            )));
        }
        if let Some(container) = self.container {
            if container.width <= 0 || container.height <= 0 {
                return Err(CasementError::Config(format!(
                    "container must be positive, got {container}"
                )));
            }
        }
        self.z_order().map(|_| ())
    }

    /// Allocator for the configured z bounds
    pub fn z_order(&self) -> CasementResult<ZOrderAllocator> {
        ZOrderAllocator::new(self.z_base, self.z_max, self.overlay_z)
    }

    /// Get a variable value
    pub fn get_variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }

    /// Expand variables in a string
    pub fn expand_variables(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (name, value) in &self.variables {
            result = result.replace(&format!("${name}"), value);
        }
        result
    }
}
