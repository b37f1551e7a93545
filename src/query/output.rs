use std::fmt::Write as _;
use std::io::IsTerminal;

use crate::cli::OutputFormat;
use crate::graph::node::DependencyNode;
use crate::query::analyze::AnalysisResult;

/// Render an analysis result in the selected output format.
pub fn render_result(result: &AnalysisResult, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Table => render_table(result, std::io::stdout().is_terminal()),
        OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_default(),
    }
}

/// Print an analysis result to stdout.
pub fn print_result(result: &AnalysisResult, format: &OutputFormat) {
    println!("{}", render_result(result, format));
}

/// One line per related file, token-lean:
///
/// ```text
/// file src/lib/github.ts utility typescript 43 exports=4
/// dep src/types/bridge.ts type 12
/// rdep src/app/page.tsx page 0
/// 3 nodes 2 edges
/// ```
fn render_compact(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let src = &result.source_file;
    let _ = writeln!(
        out,
        "file {} {} {} {} exports={}",
        src.path,
        src.role.as_str(),
        src.language.as_str(),
        src.importance,
        src.exports.len()
    );
    for link in &src.dependencies {
        let ext = if link.is_external { " external" } else { "" };
        let _ = writeln!(
            out,
            "import {}:{} {}{}",
            link.target_path,
            link.line_number,
            names(&link.import_names),
            ext
        );
    }
    for dep in &result.dependencies {
        let _ = writeln!(out, "dep {} {} {}", dep.path(), dep.role().as_str(), dep.importance());
    }
    for node in &result.dependents {
        let _ = writeln!(out, "rdep {} {} {}", node.path, node.role.as_str(), node.importance);
    }
    let _ = write!(out, "{} nodes {} edges", result.total_nodes, result.total_edges);
    out
}

fn names(list: &[String]) -> String {
    if list.is_empty() {
        "-".to_owned()
    } else {
        list.join(",")
    }
}

fn render_table(result: &AnalysisResult, use_color: bool) -> String {
    let header = |s: &str| {
        if use_color {
            format!("\x1b[1m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    };

    let mut out = String::new();
    let src = &result.source_file;
    let _ = writeln!(out, "{}", header(&format!("=== {} ===", src.path)));
    let _ = writeln!(out, "Type:       {}", src.role.as_str());
    let _ = writeln!(out, "Language:   {}", src.language.as_str());
    let _ = writeln!(out, "Importance: {}", src.importance);
    if !src.exports.is_empty() {
        let _ = writeln!(out, "Exports:    {}", src.exports.join(", "));
    }

    let rows: Vec<(String, &str, u32)> = result
        .dependencies
        .iter()
        .map(|d| (d.path().to_owned(), d.role().as_str(), d.importance()))
        .collect();
    section(&mut out, &header("--- Dependencies ---"), &rows);

    let rows: Vec<(String, &str, u32)> = result.dependents.iter().map(row).collect();
    section(&mut out, &header("--- Dependents ---"), &rows);

    let _ = write!(out, "{} nodes, {} edges", result.total_nodes, result.total_edges);
    out
}

fn row(node: &DependencyNode) -> (String, &'static str, u32) {
    (node.path.clone(), node.role.as_str(), node.importance)
}

fn section(out: &mut String, title: &str, rows: &[(String, &str, u32)]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    if rows.is_empty() {
        let _ = writeln!(out, "  (none)");
        return;
    }
    let path_w = rows.iter().map(|r| r.0.len()).max().unwrap_or(4).max(4);
    let _ = writeln!(out, "  {:<path_w$}  {:<9}  {:>5}", "PATH", "TYPE", "SCORE");
    for (path, role, importance) in rows {
        let _ = writeln!(out, "  {path:<path_w$}  {role:<9}  {importance:>5}");
    }
}
