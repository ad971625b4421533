use crate::binding::{DeployHelper, ErrorBinding, EventBinding, FunctionBinding};
use crate::keywords::is_keyword;
use crate::structs::StructDefinition;
use crate::types::{RepresentationMode, StructId};
use crate::{BindgenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Destination module of a generated unit, parsed from a `a.b.c` or `a::b::c` package string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    pub fn parse(package: &str) -> Result<Self> {
        let package = package.trim();
        if package.is_empty() {
            return Err(BindgenError::InvalidPackage {
                package: package.to_string(),
                reason: "package must not be empty".to_string(),
            });
        }

        let segments: Vec<String> = package
            .split("::")
            .flat_map(|part| part.split('.'))
            .map(str::to_string)
            .collect();

        for segment in &segments {
            if !is_identifier(segment) {
                return Err(BindgenError::InvalidPackage {
                    package: package.to_string(),
                    reason: format!("`{}` is not a valid module name", segment),
                });
            }
            if is_keyword(segment) {
                return Err(BindgenError::InvalidPackage {
                    package: package.to_string(),
                    reason: format!("`{}` is a keyword and cannot name a module", segment),
                });
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn to_dir(&self, root: &Path) -> PathBuf {
        self.segments
            .iter()
            .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    segment != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Everything needed to render the bindings of one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Contract name as given by the caller.
    pub contract_name: String,
    /// Identifier of the generated contract handle type.
    pub type_name: String,
    /// File stem of the generated source file.
    pub file_stem: String,
    pub module: ModulePath,
    pub representation: RepresentationMode,
    pub structs: Vec<StructDefinition>,
    pub functions: Vec<FunctionBinding>,
    pub events: Vec<EventBinding>,
    pub errors: Vec<ErrorBinding>,
    pub deploy: Option<DeployHelper>,
    pub has_fallback: bool,
    pub has_receive: bool,
    pub public_encoders: bool,
}

impl CompilationUnit {
    pub fn struct_def(&self, id: StructId) -> Option<&StructDefinition> {
        self.structs.get(id.index()).filter(|def| def.id == id)
    }

    pub fn struct_by_name(&self, name: &str) -> Option<&StructDefinition> {
        self.structs.iter().find(|def| def.name == name)
    }

    pub fn function(&self, method: &str) -> Option<&FunctionBinding> {
        self.functions
            .iter()
            .find(|f| f.method_names().any(|m| m == method))
    }

    pub fn event(&self, abi_name: &str) -> Option<&EventBinding> {
        self.events.iter().find(|e| e.abi_name == abi_name)
    }

    pub fn output_path(&self, out_dir: &Path) -> PathBuf {
        self.module
            .to_dir(out_dir)
            .join(format!("{}.rs", self.file_stem))
    }
}
