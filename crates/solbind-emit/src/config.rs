use serde::{Deserialize, Serialize};

pub const DEFAULT_RUNTIME_CRATE: &str = "solbind_runtime";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub indent_style: IndentStyle,
    /// Path of the runtime crate the generated code imports, e.g. `solbind_runtime`.
    pub runtime_crate: String,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::Spaces(4),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
        }
    }
}

impl EmitterConfig {
    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl IndentStyle {
    /// One level of indentation.
    pub fn unit(&self) -> String {
        match self {
            IndentStyle::Spaces(n) => " ".repeat(*n),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }
}
