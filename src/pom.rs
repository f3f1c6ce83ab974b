#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Adds the javadoc plugin to the maven project BuildTools generates.
//!
//! Elements are located with a real XML parser, then the new declaration is
//! spliced into the original text at the matching byte offset. Everything
//! outside the insertion point is left untouched, so namespace declarations,
//! comments and formatting survive. Inserted tags reuse the prefix, indent
//! and line ending the document already uses, so no new prefixes appear.

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node, ParsingOptions};

use crate::constants::{
    JAVADOC_PLUGIN_ARTIFACT, JAVADOC_PLUGIN_GROUP, JAVADOC_PLUGIN_OPTIONS, JAVADOC_PLUGIN_VERSION,
    POM_NAMESPACE,
};

/// Errors raised while patching a build descriptor.
#[derive(thiserror::Error, Debug)]
pub enum PomError {
    /// The descriptor does not exist.
    #[error("pom.xml not found at {}", .0.display())]
    Missing(PathBuf),
    /// The descriptor could not be read or written.
    #[error("Could not access {}", .path.display())]
    Io {
        /// Descriptor path.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The descriptor is not well-formed XML.
    #[error("pom.xml is not well-formed XML")]
    Parse(#[from] roxmltree::Error),
    /// The root element is not `<project>`.
    #[error("Root element is <{0}>, expected <project>")]
    NotAProject(String),
}

/// What [`patch_pom`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The plugin declaration was added.
    Inserted,
    /// The plugin was already declared; the file was not touched.
    AlreadyPresent,
}

/// Ensures the javadoc plugin is declared in the descriptor at `path`,
/// rewriting the file only when something was added.
pub fn patch_pom(path: &Path) -> Result<PatchOutcome, PomError> {
    if !path.is_file() {
        return Err(PomError::Missing(path.to_path_buf()));
    }

    let io_err = |source| PomError::Io {
        path: path.to_path_buf(),
        source,
    };

    let source = std::fs::read_to_string(path).map_err(io_err)?;
    match patch_source(&source)? {
        Some(patched) => {
            std::fs::write(path, patched).map_err(io_err)?;
            tracing::info!("Added {JAVADOC_PLUGIN_ARTIFACT} to {}", path.display());
            Ok(PatchOutcome::Inserted)
        }
        None => {
            tracing::debug!("{} already declares {JAVADOC_PLUGIN_ARTIFACT}", path.display());
            Ok(PatchOutcome::AlreadyPresent)
        }
    }
}

/// Returns `source` with the javadoc plugin declared under
/// `project/build/plugins`, or `None` if it already is.
///
/// Missing `<build>` and `<plugins>` elements are created. A `<!DOCTYPE>` is
/// accepted.
pub fn patch_source(source: &str) -> Result<Option<String>, PomError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(source, options)?;
    let project = doc.root_element();
    if !is_pom_element(project, "project") {
        return Err(PomError::NotAProject(project.tag_name().name().to_string()));
    }

    let build = child_element(project, "build");
    let plugins = build.and_then(|b| child_element(b, "plugins"));

    if plugins.is_some_and(declares_javadoc_plugin) {
        return Ok(None);
    }

    let target = plugins.or(build).unwrap_or(project);
    let markup = Markup::detect(source, target);
    let block = match (build, plugins) {
        (_, Some(_)) => plugin_block(&markup),
        (Some(_), None) => markup.wrap("plugins", plugin_block(&markup)),
        (None, None) => markup.wrap("build", markup.wrap("plugins", plugin_block(&markup))),
    };

    Ok(Some(append_child(source, target, &block, &markup)))
}

/// How inserted lines are written so they blend into the document.
struct Markup {
    /// One level of indentation.
    unit:    String,
    /// Namespace prefix of the element being extended, colon included.
    prefix:  String,
    /// Line terminator used by the document.
    newline: &'static str,
}

impl Markup {
    /// Reads the conventions of `source` around `target`.
    fn detect(source: &str, target: Node<'_, '_>) -> Self {
        let prefix = qualified_name(&source[target.range()])
            .split_once(':')
            .map(|(prefix, _)| format!("{prefix}:"))
            .unwrap_or_default();

        Self {
            unit: indent_unit(source),
            prefix,
            newline: if source.contains("\r\n") { "\r\n" } else { "\n" },
        }
    }

    /// `<tag>text</tag>` with the document's prefix.
    fn leaf(&self, tag: &str, text: &str) -> String {
        let p = &self.prefix;
        format!("<{p}{tag}>{text}</{p}{tag}>")
    }

    /// Wraps `inner` in `<tag>`..`</tag>`, indenting it one level.
    fn wrap(&self, tag: &str, inner: Vec<String>) -> Vec<String> {
        let Self { unit, prefix, .. } = self;
        let mut lines = Vec::with_capacity(inner.len() + 2);
        lines.push(format!("<{prefix}{tag}>"));
        lines.extend(inner.into_iter().map(|line| format!("{unit}{line}")));
        lines.push(format!("</{prefix}{tag}>"));
        lines
    }
}

/// True if `node` is the POM element `name`, with or without the POM
/// namespace.
fn is_pom_element(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && matches!(node.tag_name().namespace(), None | Some(POM_NAMESPACE))
}

/// First child element of `parent` called `name`.
fn child_element<'a, 'input>(parent: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    parent.children().find(|c| is_pom_element(*c, name))
}

/// Whether any `<plugin>` below `plugins` has the javadoc artifact id.
fn declares_javadoc_plugin(plugins: Node<'_, '_>) -> bool {
    plugins
        .descendants()
        .filter(|n| is_pom_element(*n, "plugin"))
        .filter_map(|plugin| child_element(plugin, "artifactId"))
        .any(|id| id.text().map(str::trim) == Some(JAVADOC_PLUGIN_ARTIFACT))
}

/// The `<plugin>` declaration, one line per entry, indented relative to the
/// `<plugin>` tag.
fn plugin_block(markup: &Markup) -> Vec<String> {
    let options = JAVADOC_PLUGIN_OPTIONS
        .iter()
        .map(|(key, value)| markup.leaf(key, value))
        .collect();

    markup.wrap(
        "plugin",
        [
            markup.leaf("groupId", JAVADOC_PLUGIN_GROUP),
            markup.leaf("artifactId", JAVADOC_PLUGIN_ARTIFACT),
            markup.leaf("version", JAVADOC_PLUGIN_VERSION),
        ]
        .into_iter()
        .chain(markup.wrap("configuration", options))
        .collect(),
    )
}

/// Inserts `block` as the last child of `target`.
fn append_child(source: &str, target: Node<'_, '_>, block: &[String], markup: &Markup) -> String {
    let Markup { unit, newline, .. } = markup;
    let range = target.range();
    let element = &source[range.clone()];
    let indent = line_indent(source, range.start);
    let lines_at = |child_indent: &str| -> String {
        block
            .iter()
            .map(|line| format!("{child_indent}{line}{newline}"))
            .collect()
    };

    let mut out = String::with_capacity(source.len() + block.len() * 64);

    // `<plugins/>` becomes `<plugins>...</plugins>`.
    if let Some(open) = element.strip_suffix("/>") {
        let open = open.trim_end();
        let name = qualified_name(element);
        let children = lines_at(&format!("{indent}{unit}"));
        out.push_str(&source[..range.start]);
        out.push_str(&format!("{open}>{newline}{children}{indent}</{name}>"));
        out.push_str(&source[range.end..]);
        return out;
    }

    let close = element
        .rfind("</")
        .map_or(range.end, |offset| range.start + offset);
    let line_start = source[..close].rfind('\n').map_or(0, |i| i + 1);
    let before_close = &source[line_start..close];

    if line_start > range.start && before_close.chars().all(|c| c == ' ' || c == '\t') {
        // Closing tag sits on its own line: add whole lines above it.
        out.push_str(&source[..line_start]);
        out.push_str(&lines_at(&format!("{before_close}{unit}")));
        out.push_str(&source[line_start..]);
    } else {
        out.push_str(&source[..close]);
        out.push_str(newline);
        out.push_str(&lines_at(&format!("{indent}{unit}")));
        out.push_str(indent);
        out.push_str(&source[close..]);
    }
    out
}

/// Leading whitespace of the line containing byte `pos`.
fn line_indent(source: &str, pos: usize) -> &str {
    let start = source[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line = &source[start..pos];
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Tag name as written in the source, prefix included.
fn qualified_name(element: &str) -> &str {
    let after_lt = element.strip_prefix('<').unwrap_or(element);
    let end = after_lt
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(after_lt.len());
    &after_lt[..end]
}

/// One level of indentation as used by the document; four spaces when the
/// document has no indented lines.
fn indent_unit(source: &str) -> String {
    source
        .lines()
        .filter(|line| line.trim_start().starts_with('<'))
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .find(|ws| !ws.is_empty())
        .map(|ws| {
            if ws.starts_with('\t') {
                String::from("\t")
            } else {
                ws.to_string()
            }
        })
        .unwrap_or_else(|| String::from("    "))
}
