//! sprig - render, convert and inspect markup trees
//!
//! Usage:
//!   sprig render page.html --pretty      Parse markup and render it back
//!   sprig json page.html --indent 2      Encode parsed markup as JSON
//!   sprig load tree.json                 Render a tree from its JSON encoding
//!   sprig tree --html '<ul><li>a</ul>'   Print the element outline
//!
//! `SPRIG_GENERATE_IDS` and `SPRIG_MAX_DEPTH` are read once at start-up.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use sprig_common::Config;
use sprig_common::diagnostic::{Diagnostic, capture};
use sprig_dom::attributes::render_key;
use sprig_dom::{AttributeValue, Node, RenderOptions};
use sprig_html::HtmlParser;
use sprig_json::{Serializer, TagRegistry};

/// sprig - build, render and convert HTML element trees
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Normalize a page
    sprig render ./index.html

    # Indented output from inline markup
    sprig render --pretty --html '<ul><li>one<li>two</ul>'

    # Encode a page as JSON, then render it back
    sprig json ./index.html --indent 2 > tree.json
    sprig load tree.json

    # Fail on the first parse problem
    sprig render --strict ./index.html

    # Inspect the element tree
    cat ./index.html | sprig tree
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse markup and render it back as normalized HTML
    Render {
        #[command(flatten)]
        input: Input,

        /// Indent nested elements two spaces per level
        #[arg(short, long)]
        pretty: bool,
    },

    /// Parse markup and print its JSON encoding
    Json {
        #[command(flatten)]
        input: Input,

        /// Spaces per indentation level (compact when omitted)
        #[arg(long, value_name = "N")]
        indent: Option<usize>,
    },

    /// Render a tree from its JSON encoding
    Load {
        /// JSON file to read (stdin when omitted or "-")
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Indent nested elements two spaces per level
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the element outline of parsed markup
    Tree {
        #[command(flatten)]
        input: Input,
    },
}

/// Where markup comes from.
#[derive(Args, Debug)]
struct Input {
    /// HTML file to read (stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Stop at the first parse problem instead of recovering
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Render { input, pretty } => {
            let node = parse_input(&input, config)?;
            print_rendered(&node, pretty, config)?;
        }
        Command::Json { input, indent } => {
            let node = parse_input(&input, config)?;
            let json = Serializer::new()
                .with_max_depth(config.max_depth)
                .to_json(&node, indent)?;
            println!("{json}");
        }
        Command::Load { path, pretty } => {
            let json = read_source(path.as_deref())?;
            let registry = TagRegistry::with_builtin_tags();
            let node = registry
                .serializer()
                .with_max_depth(config.max_depth)
                .from_json(&json)
                .context("could not decode the element tree")?;
            print_rendered(&node, pretty, config)?;
        }
        Command::Tree { input } => {
            let node = parse_input(&input, config)?;
            let mut out = String::new();
            write_outline(&mut out, &node, 0, config.max_depth)?;
            print!("{out}");
        }
    }
    Ok(())
}

/// Read a file, or stdin for `None` and `-`.
fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display())),
        _ => {
            let mut source = String::new();
            let _ = io::stdin()
                .read_to_string(&mut source)
                .context("could not read stdin")?;
            Ok(source)
        }
    }
}

/// Parse the markup named by `input`. Several top-level elements are
/// grouped in a fragment.
fn parse_input(input: &Input, config: Config) -> Result<Node> {
    let html = match &input.html {
        Some(html) => html.clone(),
        None => read_source(input.path.as_deref())?,
    };

    let mut parser = HtmlParser::new().with_config(config);
    if input.strict {
        parser = parser.with_strict_mode();
    }
    let (result, diagnostics) = capture(|| parser.parse_fragment(&html));
    report(&diagnostics);

    let mut roots = result?;
    Ok(if roots.len() == 1 {
        roots.remove(0)
    } else {
        Node::fragment(roots)
    })
}

fn print_rendered(node: &Node, pretty: bool, config: Config) -> Result<()> {
    let options = if pretty {
        RenderOptions::pretty()
    } else {
        RenderOptions::compact()
    };
    let options = options.with_max_depth(config.max_depth);

    let (html, diagnostics) = capture(|| node.render_with(&options));
    report(&diagnostics);
    let html = html?;

    if pretty {
        print!("{html}");
    } else {
        println!("{html}");
    }
    Ok(())
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let location = diagnostic
            .tag
            .as_deref()
            .map(|tag| format!(" <{tag}>"))
            .unwrap_or_default();
        eprintln!(
            "{}{} {}",
            "warning".yellow().bold(),
            location.dimmed(),
            diagnostic
        );
    }
}

/// Append the outline of `node` to `out`, one line per element and text run.
fn write_outline(out: &mut String, node: &Node, depth: usize, max_depth: usize) -> Result<()> {
    if depth > max_depth {
        bail!("maximum depth ({max_depth}) exceeded while printing the tree");
    }
    let prefix = "  ".repeat(depth);

    if let Some(node_prefix) = node.prefix() {
        let _ = writeln!(out, "{prefix}{}", node_prefix.dimmed());
    }

    if node.is_fragment() {
        let _ = writeln!(out, "{prefix}{}", "#fragment".magenta());
    } else {
        let mut line = format!("{prefix}<{}", node.tag().cyan());
        for (key, value) in node.attributes() {
            match value {
                AttributeValue::Null | AttributeValue::Bool(false) => {}
                AttributeValue::Bool(true) => {
                    let _ = write!(line, " {}", render_key(key).yellow());
                }
                AttributeValue::Text(text) => {
                    let _ = write!(line, " {}=\"{}\"", render_key(key).yellow(), text.green());
                }
            }
        }
        line.push_str(if node.is_self_closing() { " />" } else { ">" });
        let _ = writeln!(out, "{line}");
    }

    if !node.text().is_empty() {
        let display = node.text().replace('\n', "\\n").replace(' ', "\u{00B7}");
        let _ = writeln!(out, "{prefix}  \"{display}\"");
    }
    for child in node.children() {
        write_outline(out, child, depth + 1, max_depth)?;
    }
    Ok(())
}
