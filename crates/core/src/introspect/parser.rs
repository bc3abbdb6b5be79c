//! Extraction of construct declarations from PHP source with tree-sitter.
//!
//! The query in `queries/php_declarations.scm` yields namespaces, `use`
//! imports and `class` / `interface` / `trait` / `enum` headers in document
//! order. Parent names are resolved against the namespace and imports in
//! effect at the declaration.

use crate::error::{FqcnError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, StreamingIterator};

static PHP_QUERY: Lazy<Query> = Lazy::new(|| {
    Query::new(
        &php_language(),
        include_str!("queries/php_declarations.scm"),
    )
    .expect("Failed to load PHP declaration query - this is a fatal error")
});

fn php_language() -> Language {
    tree_sitter_php::LANGUAGE_PHP.into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    Class,
    Interface,
    Trait,
    Enum,
}

/// A declared construct with its parent names resolved to fully-qualified form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructDecl {
    pub name: String,
    pub kind: ConstructKind,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
}

impl ConstructDecl {
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.extends
            .iter()
            .chain(self.implements.iter())
            .map(String::as_str)
    }
}

/// Capture indices of the declaration query.
struct PhpIndices {
    namespace: u32,
    import: u32,
    name: u32,
    class: u32,
    interface: u32,
    trait_: u32,
    enum_: u32,
}

impl PhpIndices {
    fn new(query: &Query) -> Result<Self> {
        let index = |name: &str| {
            query.capture_index_for_name(name).ok_or_else(|| {
                FqcnError::Parsing(format!("Capture name '{}' not found in SCM", name))
            })
        };
        Ok(Self {
            namespace: index("namespace")?,
            import: index("import")?,
            name: index("name")?,
            class: index("class")?,
            interface: index("interface")?,
            trait_: index("trait")?,
            enum_: index("enum")?,
        })
    }

    fn kind(&self, index: u32) -> Option<ConstructKind> {
        match index {
            i if i == self.class => Some(ConstructKind::Class),
            i if i == self.interface => Some(ConstructKind::Interface),
            i if i == self.trait_ => Some(ConstructKind::Trait),
            i if i == self.enum_ => Some(ConstructKind::Enum),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct FileScope {
    /// Current namespace without trailing separator, empty for global code.
    namespace: String,
    /// Lowercased alias → fully-qualified name.
    imports: HashMap<String, String>,
}

impl FileScope {
    fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.trim_matches('\\').to_string(),
            ..Default::default()
        }
    }

    fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}\\{}", self.namespace, name)
        }
    }

    /// Resolve a class reference the way PHP does for `extends`/`implements`.
    fn resolve(&self, name: &str) -> String {
        if let Some(absolute) = name.strip_prefix('\\') {
            return absolute.to_string();
        }
        let (first, rest) = match name.split_once('\\') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };
        if first.eq_ignore_ascii_case("namespace") {
            return self.qualify(rest.unwrap_or_default());
        }
        match (self.imports.get(&first.to_ascii_lowercase()), rest) {
            (Some(full), Some(rest)) => format!("{}\\{}", full, rest),
            (Some(full), None) => full.clone(),
            (None, _) => self.qualify(name),
        }
    }

    fn import(&mut self, name: &str, alias: Option<&str>) {
        let name = name.trim_start_matches('\\');
        let alias = alias.unwrap_or_else(|| name.rsplit('\\').next().unwrap_or(name));
        self.imports
            .insert(alias.to_ascii_lowercase(), name.to_string());
    }
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// `use function ...` and `use const ...` import no class names.
fn is_symbol_import(node: Node) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|child| {
        !child.is_named() && matches!(child.kind(), "function" | "const")
    })
}

fn collect_use_clauses<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "namespace_use_clause" | "namespace_use_group_clause" => out.push(child),
            "namespace_use_group" => collect_use_clauses(child, out),
            _ => {}
        }
    }
}

/// Register the class imports of a `namespace_use_declaration`.
fn register_imports(node: Node, source: &str, scope: &mut FileScope) {
    if is_symbol_import(node) {
        return;
    }

    // Group imports share the text between `use` and `{` as prefix
    let mut cursor = node.walk();
    let prefix = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "namespace_use_group")
        .map(|group| {
            let head = source[node.start_byte()..group.start_byte()].trim();
            let head = head.get(3..).unwrap_or_default();
            head.trim().trim_matches('\\').to_string()
        });

    let mut clauses = Vec::new();
    collect_use_clauses(node, &mut clauses);

    for clause in clauses {
        let words: Vec<&str> = text(clause, source).split_whitespace().collect();
        let Some(first) = words.first() else {
            continue;
        };
        if first.eq_ignore_ascii_case("function") || first.eq_ignore_ascii_case("const") {
            continue;
        }
        let alias = words
            .iter()
            .position(|w| w.eq_ignore_ascii_case("as"))
            .and_then(|i| words.get(i + 1))
            .copied();
        match &prefix {
            Some(prefix) => scope.import(&format!("{}\\{}", prefix, first), alias),
            None => scope.import(first, alias),
        }
    }
}

/// Names listed in a `base_clause` or `class_interface_clause`.
fn clause_names(node: Node, source: &str, scope: &FileScope) -> Vec<String> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| matches!(child.kind(), "name" | "qualified_name"))
        .map(|child| scope.resolve(text(child, source)))
        .collect()
}

fn build_decl(
    node: Node,
    name: &str,
    kind: ConstructKind,
    source: &str,
    scope: &FileScope,
) -> ConstructDecl {
    let mut decl = ConstructDecl {
        name: scope.qualify(name),
        kind,
        extends: Vec::new(),
        implements: Vec::new(),
    };

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "base_clause" => decl.extends.extend(clause_names(child, source, scope)),
            "class_interface_clause" => {
                decl.implements.extend(clause_names(child, source, scope))
            }
            _ => {}
        }
    }
    decl
}

/// Extract every construct declared in `source`.
pub fn parse_declarations(source: &str) -> Result<Vec<ConstructDecl>> {
    let mut parser = Parser::new();
    parser
        .set_language(&php_language())
        .map_err(|e| FqcnError::Parsing(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| FqcnError::Parsing("Failed to parse PHP source".to_string()))?;

    let query: &Query = &PHP_QUERY;
    let indices = PhpIndices::new(query)?;

    let mut scope = FileScope::default();
    let mut decls = Vec::new();

    let mut query_cursor = QueryCursor::new();
    let mut matches = query_cursor.matches(query, tree.root_node(), source.as_bytes());

    while let Some(mat) = matches.next() {
        for cap in mat.captures {
            if cap.index == indices.namespace {
                let name = cap
                    .node
                    .child_by_field_name("name")
                    .map(|n| text(n, source))
                    .unwrap_or_default();
                scope = FileScope::new(name);
            } else if cap.index == indices.import {
                register_imports(cap.node, source, &mut scope);
            } else if let Some(kind) = indices.kind(cap.index) {
                let Some(name) = mat.captures.iter().find(|c| c.index == indices.name) else {
                    continue;
                };
                decls.push(build_decl(
                    cap.node,
                    text(name.node, source),
                    kind,
                    source,
                    &scope,
                ));
            }
        }
    }

    Ok(decls)
}
