//! Tree-sitter extraction of Solidity contract structure.
//!
//! Produces one [`ParsedFile`] per source file: contract-level declarations
//! with their direct bases, declared members, attached modifiers, raw source
//! text and call sites, plus the file's import paths. Syntax errors do not
//! abort extraction; declarations inside error-recovery nodes are still
//! collected.

pub mod imports;

use tree_sitter::{Language, Node, Parser};

use trex_core::types::{ContractKind, FunctionDescriptor, FunctionKind, SourceMapping, Visibility};

/// A contract as declared in one file, before inheritance linearization.
#[derive(Debug, Clone)]
pub struct ParsedContract {
    pub name: String,
    pub kind: ContractKind,
    pub file: String,
    pub line_start: u32,
    /// Direct bases in declaration order.
    pub bases: Vec<String>,
    pub functions: Vec<FunctionDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub contracts: Vec<ParsedContract>,
    /// Import paths exactly as written, without quotes.
    pub imports: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
}

pub struct SolidityParser {
    parser: Parser,
}

impl SolidityParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Fails when the linked grammar was generated for an ABI this tree-sitter
    /// runtime cannot load.
    pub fn check_grammar() -> Result<(), ParseError> {
        Parser::new()
            .set_language(&language())
            .map_err(|e| ParseError::Language(format!("{e}")))
    }

    pub fn parse_file(&mut self, file_path: &str, source: &str) -> Result<ParsedFile, ParseError> {
        self.parser
            .set_language(&language())
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        let tree = self
            .parser
            .parse(source.as_bytes(), None)
            .ok_or(ParseError::ParseFailed)?;

        let root = tree.root_node();
        let mut out = ParsedFile {
            has_errors: root.has_error(),
            ..Default::default()
        };
        collect_top_level(root, source.as_bytes(), file_path, &mut out);
        Ok(out)
    }
}

impl Default for SolidityParser {
    fn default() -> Self {
        Self::new()
    }
}

fn language() -> Language {
    tree_sitter_solidity::LANGUAGE.into()
}

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn collect_top_level(node: Node<'_>, source: &[u8], file_path: &str, out: &mut ParsedFile) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_directive" => {
                if let Some(path) = quoted_literal(node_text(child, source)) {
                    out.imports.push(path);
                }
            }
            "contract_declaration" | "interface_declaration" | "library_declaration" => {
                if let Some(contract) = extract_contract(child, source, file_path) {
                    out.contracts.push(contract);
                }
            }
            "ERROR" => collect_top_level(child, source, file_path, out),
            _ => {}
        }
    }
}

/// First `"..."` or `'...'` literal in `text`.
fn quoted_literal(text: &str) -> Option<String> {
    let start = text.find(['"', '\''])?;
    let quote = text[start..].chars().next()?;
    let rest = &text[start + 1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

fn extract_contract(node: Node<'_>, source: &[u8], file_path: &str) -> Option<ParsedContract> {
    let kind = match node.kind() {
        "interface_declaration" => ContractKind::Interface,
        "library_declaration" => ContractKind::Library,
        _ if node_text(node, source).trim_start().starts_with("abstract") => ContractKind::Abstract,
        _ => ContractKind::Contract,
    };

    let name = node
        .child_by_field_name("name")
        .or_else(|| first_named_child_of_kind(node, "identifier"))
        .map(|n| node_text(n, source).to_string())?;

    let mut bases = Vec::new();
    let mut body = node.child_by_field_name("body");
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "inheritance_specifier" => {
                let text = child
                    .child_by_field_name("ancestor")
                    .map(|a| node_text(a, source))
                    .unwrap_or_else(|| node_text(child, source));
                if let Some(base) = simple_name(text) {
                    bases.push(base);
                }
            }
            "contract_body" if body.is_none() => body = Some(child),
            _ => {}
        }
    }

    let mut functions = Vec::new();
    if let Some(body) = body {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            if let Some(f) = extract_member(member, source, file_path, kind) {
                functions.push(f);
            }
        }
    }

    Some(ParsedContract {
        name,
        kind,
        file: file_path.to_string(),
        line_start: node.start_position().row as u32 + 1,
        bases,
        functions,
    })
}

fn extract_member(
    node: Node<'_>,
    source: &[u8],
    file_path: &str,
    contract_kind: ContractKind,
) -> Option<FunctionDescriptor> {
    let text = node_text(node, source);
    let (kind, name) = match node.kind() {
        "function_definition" => (FunctionKind::Function, member_name(node, source)?),
        "modifier_definition" => (FunctionKind::Modifier, member_name(node, source)?),
        "constructor_definition" => (FunctionKind::Constructor, "constructor".to_string()),
        "fallback_receive_definition" => {
            let head = text.split('(').next().unwrap_or("");
            if head.contains("receive") {
                (FunctionKind::Receive, "receive".to_string())
            } else {
                (FunctionKind::Fallback, "fallback".to_string())
            }
        }
        _ => return None,
    };

    let mut visibility = None;
    let mut modifiers = Vec::new();
    let mut body = node.child_by_field_name("body");
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "visibility" | "public" | "external" | "internal" | "private" => {
                if visibility.is_none() {
                    visibility = Visibility::from_keyword(node_text(child, source));
                }
            }
            "modifier_invocation" => {
                if let Some(m) = simple_name(node_text(child, source)) {
                    modifiers.push(m);
                }
            }
            "function_body" if body.is_none() => body = Some(child),
            _ => {}
        }
    }

    let visibility = visibility.unwrap_or(match (kind, contract_kind) {
        (_, ContractKind::Interface) => Visibility::External,
        (FunctionKind::Modifier, _) => Visibility::Internal,
        (FunctionKind::Fallback | FunctionKind::Receive, _) => Visibility::External,
        _ => Visibility::Public,
    });

    let mut calls = Vec::new();
    if let Some(body) = body {
        collect_calls(body, source, &mut calls);
    }

    Some(FunctionDescriptor {
        name,
        kind,
        visibility,
        modifiers: Some(modifiers),
        source: Some(SourceMapping {
            file: file_path.to_string(),
            line_start: node.start_position().row as u32 + 1,
            line_end: node.end_position().row as u32 + 1,
            content: text.to_string(),
        }),
        calls: Some(calls),
    })
}

fn member_name(node: Node<'_>, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .or_else(|| first_named_child_of_kind(node, "identifier"))
        .map(|n| node_text(n, source).to_string())
}

fn collect_calls(node: Node<'_>, source: &[u8], calls: &mut Vec<String>) {
    if node.kind() == "call_expression" {
        let callee = node
            .child_by_field_name("function")
            .or_else(|| node.named_child(0))
            .and_then(|f| simple_name(node_text(f, source)));
        if let Some(name) = callee {
            if !calls.contains(&name) {
                calls.push(name);
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_calls(child, source, calls);
    }
}

fn first_named_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Last path segment of a reference such as `a.b.Name(args)` or `x.call{value: 1}`.
/// Returns `None` unless the result is a plain identifier.
fn simple_name(text: &str) -> Option<String> {
    let head = text.split(['(', '{']).next().unwrap_or("").trim();
    let last = head.rsplit('.').next().unwrap_or("").trim();
    let is_ident = !last.is_empty()
        && last.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !last.starts_with(|c: char| c.is_ascii_digit());
    is_ident.then(|| last.to_string())
}
