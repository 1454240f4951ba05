use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Function visibility as declared in Solidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    External,
    Internal,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::External => "external",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }

    /// Parse the keyword as written in source. Unknown keywords yield `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim() {
            "public" => Some(Visibility::Public),
            "external" => Some(Visibility::External),
            "internal" => Some(Visibility::Internal),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    /// Callable from outside the contract (a transaction entry point).
    pub fn is_entry_point(&self) -> bool {
        matches!(self, Visibility::Public | Visibility::External)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a contract-level declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Contract,
    Abstract,
    Interface,
    Library,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Contract => "contract",
            ContractKind::Abstract => "abstract",
            ContractKind::Interface => "interface",
            ContractKind::Library => "library",
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a member of a contract body is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    Function,
    Modifier,
    Constructor,
    Fallback,
    Receive,
}

/// Where a declaration lives and its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMapping {
    pub file: String,
    pub line_start: u32,
    pub line_end: u32,
    pub content: String,
}

/// A function, modifier, constructor, fallback or receive declared on a contract.
///
/// Optional fields are `None` when the model provider could not supply them;
/// rules treat that as "feature unavailable", never as an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub kind: FunctionKind,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMapping>,
    /// Names of functions invoked directly from the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calls: Option<Vec<String>>,
}

impl FunctionDescriptor {
    /// A bare function with known-empty modifiers and calls and no source.
    pub fn new(name: impl Into<String>, kind: FunctionKind, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility,
            modifiers: Some(vec![]),
            source: None,
            calls: Some(vec![]),
        }
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = Some(modifiers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_calls<I, S>(mut self, calls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calls = Some(calls.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_source(mut self, file: impl Into<String>, line_start: u32, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_end = line_start + content.lines().count().saturating_sub(1) as u32;
        self.source = Some(SourceMapping {
            file: file.into(),
            line_start,
            line_end,
            content,
        });
        self
    }

    pub fn is_modifier(&self) -> bool {
        self.kind == FunctionKind::Modifier
    }
}

/// A contract, abstract contract, interface or library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDescriptor {
    pub name: String,
    pub kind: ContractKind,
    pub file: String,
    /// Linearized ancestors, most-derived first, excluding the contract itself.
    #[serde(default)]
    pub inheritance: Vec<String>,
    #[serde(default)]
    pub functions: Vec<FunctionDescriptor>,
}

impl ContractDescriptor {
    pub fn new(name: impl Into<String>, kind: ContractKind, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            file: file.into(),
            inheritance: vec![],
            functions: vec![],
        }
    }

    pub fn with_inheritance<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inheritance = bases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_function(mut self, function: FunctionDescriptor) -> Self {
        self.functions.push(function);
        self
    }

    /// Declared members that are not modifiers.
    pub fn functions_declared(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.iter().filter(|f| !f.is_modifier())
    }

    /// Every declared member, modifiers included.
    pub fn functions_and_modifiers_declared(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.iter()
    }

    /// Lowercased ancestor names joined by spaces.
    pub fn inheritance_text_lower(&self) -> String {
        self.inheritance
            .iter()
            .map(|b| b.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Errors that abort model loading.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no Solidity sources found under {0}")]
    NoSources(PathBuf),

    #[error("invalid model snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parse error: {0}")]
    Parse(String),
}
