/// Integration test suite: drives the compiled `bridge-analyzer` binary against
/// small repositories written to temporary directories.
///
/// The `CARGO_BIN_EXE_bridge-analyzer` environment variable is set by Cargo during
/// `cargo test` to point to the compiled binary for the current profile.
///
/// The HTTP endpoint shares `query::analyze` with the CLI; its handler-level
/// behaviour (400 on malformed bodies, health payload) is unit-tested in
/// `src/web/mod.rs`, while these tests pin down the JSON document both surfaces emit.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bridge-analyzer"))
}

/// Run a bridge-analyzer command and assert it exits successfully.
/// Returns stdout as a String.
fn run_success(args: &[&str]) -> String {
    let out = Command::new(binary())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke bridge-analyzer binary");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        out.status.success(),
        "command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
        args,
        out.status,
        stdout,
        stderr
    );
    stdout
}

/// Run a bridge-analyzer command and assert it exits with a non-zero status.
/// Returns stderr as a String.
fn run_failure(args: &[&str]) -> String {
    let out = Command::new(binary())
        .args(args)
        .output()
        .expect("failed to invoke bridge-analyzer binary");
    assert!(
        !out.status.success(),
        "command {:?} expected to fail but exited successfully",
        args
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A small Next.js-style repository:
///
/// - `src/lib/github.ts` is imported by three files and exports four names
/// - `src/app/page.tsx` imports it via the `@/` alias
/// - `src/components/repo-list.tsx` imports it relatively
/// - `src/app/api/repos/route.ts` imports it relatively, twice
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(
        root,
        "src/lib/github.ts",
        "import { Octokit } from '@octokit/rest'\nimport type { Repo } from '../types/repo'\n\nexport async function fetchRepos() {}\nexport function fetchFile() {}\nexport const client = new Octokit()\nexport { Repo }\n",
    );
    write(root, "src/types/repo.ts", "export interface Repo { name: string }\n");
    write(
        root,
        "src/app/page.tsx",
        "import RepoList from '@/components/repo-list'\nimport { fetchRepos } from '@/lib/github'\n\nexport default function Page() {}\n",
    );
    write(
        root,
        "src/components/repo-list.tsx",
        "import { fetchRepos } from '../lib/github'\n\nexport default function RepoList() {}\n",
    );
    write(
        root,
        "src/app/api/repos/route.ts",
        "import { fetchRepos } from '../../../lib/github'\nimport { fetchFile } from '../../../lib/github'\n\nexport async function GET() {}\n",
    );
    write(root, "README.md", "# fixture\n");
    dir
}

fn analyze_json(root: &Path, file: &str, extra: &[&str]) -> serde_json::Value {
    let root_str = root.to_str().unwrap();
    let mut args = vec!["analyze", file, "--root", root_str, "--format", "json"];
    args.extend_from_slice(extra);
    let stdout = run_success(&args);
    serde_json::from_str(&stdout).expect("analyze --format json output is not valid JSON")
}

fn paths(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|n| n["path"].as_str().unwrap().to_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// CLI analysis
// ---------------------------------------------------------------------------

/// test_hub_file_importance: a file imported by three others with four exports
/// under /lib/ scores 3*10 + 4*2 + 5.
#[test]
fn test_hub_file_importance() {
    let dir = fixture();
    let v = analyze_json(dir.path(), "src/lib/github.ts", &[]);

    let source = &v["sourceFile"];
    assert_eq!(source["path"], "src/lib/github.ts");
    assert_eq!(source["name"], "github.ts");
    assert_eq!(source["type"], "utility");
    assert_eq!(source["language"], "typescript");
    assert_eq!(
        source["exports"],
        serde_json::json!(["fetchRepos", "fetchFile", "client", "Repo"])
    );
    assert_eq!(source["importance"], 43);

    assert_eq!(
        paths(&v["dependents"]),
        vec![
            "src/components/repo-list.tsx",
            "src/app/api/repos/route.ts",
            "src/app/page.tsx",
        ]
    );
    assert_eq!(v["totalEdges"], 5);
    assert_eq!(v["totalNodes"], 6);
}

/// test_dependencies_resolved_and_external: relative type import resolves to a
/// snapshot node; the package import becomes an external node.
#[test]
fn test_dependencies_resolved_and_external() {
    let dir = fixture();
    let v = analyze_json(dir.path(), "src/lib/github.ts", &[]);

    let deps = v["dependencies"].as_array().unwrap();
    assert_eq!(deps.len(), 2);
    assert_eq!(deps[0]["path"], "src/types/repo.ts");
    assert_eq!(deps[0]["type"], "type");
    assert_eq!(deps[0]["exports"], serde_json::json!(["Repo"]));
    assert_eq!(deps[1]["path"], "@octokit/rest");
    assert_eq!(deps[1]["type"], "external");
    assert_eq!(deps[1]["importance"], 0);

    let links = v["sourceFile"]["dependencies"].as_array().unwrap();
    assert_eq!(links[0]["targetPath"], "@octokit/rest");
    assert_eq!(links[0]["isExternal"], true);
    assert_eq!(links[1]["targetPath"], "src/types/repo.ts");
    assert_eq!(links[1]["importType"], "named");
    assert_eq!(links[1]["lineNumber"], 2);
    assert_eq!(links[1]["isExternal"], false);
}

/// test_duplicate_imports_listed_once: two imports of the same module appear once.
#[test]
fn test_duplicate_imports_listed_once() {
    let dir = fixture();
    let v = analyze_json(dir.path(), "src/app/api/repos/route.ts", &[]);
    assert_eq!(paths(&v["dependencies"]), vec!["src/lib/github.ts"]);
    assert_eq!(v["sourceFile"]["dependencies"].as_array().unwrap().len(), 1);
    assert_eq!(v["sourceFile"]["type"], "api");
    assert!(v["dependents"].as_array().unwrap().is_empty());
}

/// test_no_snapshot: without the walk, nothing resolves and there are no dependents.
#[test]
fn test_no_snapshot() {
    let dir = fixture();
    let v = analyze_json(dir.path(), "src/app/page.tsx", &["--no-snapshot"]);
    assert_eq!(
        paths(&v["dependencies"]),
        vec!["src/components/repo-list", "src/lib/github"]
    );
    assert!(v["dependents"].as_array().unwrap().is_empty());
    for dep in v["dependencies"].as_array().unwrap() {
        assert_eq!(dep["type"], "external");
    }
    assert_eq!(v["sourceFile"]["type"], "page");
}

/// test_config_exclude: bridge.toml exclusions remove files from the snapshot.
#[test]
fn test_config_exclude() {
    let dir = fixture();
    write(dir.path(), "bridge.toml", "exclude = [\"api\"]\n");
    let v = analyze_json(dir.path(), "src/lib/github.ts", &[]);
    assert_eq!(
        paths(&v["dependents"]),
        vec!["src/components/repo-list.tsx", "src/app/page.tsx"]
    );
    assert_eq!(v["sourceFile"]["importance"], 33);
}

/// test_compact_output: default format ends with the node/edge summary line.
#[test]
fn test_compact_output() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();
    let stdout = run_success(&["analyze", "src/types/repo.ts", "--root", root]);
    assert!(stdout.starts_with("file src/types/repo.ts type typescript 16 exports=1"));
    assert!(stdout.contains("rdep src/lib/github.ts utility 43"));
    assert!(stdout.trim_end().ends_with("2 nodes 1 edges"));
}

/// test_multi_language: python, go and rust files are analyzed with their own rules.
#[test]
fn test_multi_language() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "app/views.py",
        "from .models import User, Post\nimport os\n\ndef index(request):\n    pass\n",
    );
    write(
        dir.path(),
        "main.go",
        "package main\n\nimport \"github.com/gorilla/mux\"\n\nfunc Serve() {}\n",
    );
    write(
        dir.path(),
        "src/lib.rs",
        "use crate::graph::RepoGraph;\nmod graph;\n\npub fn run() {}\n",
    );

    let py = analyze_json(dir.path(), "app/views.py", &[]);
    let links = py["sourceFile"]["dependencies"].as_array().unwrap();
    assert_eq!(links[0]["targetPath"], ".models");
    assert_eq!(links[0]["importNames"], serde_json::json!(["User", "Post"]));
    assert_eq!(links[0]["isExternal"], false);
    assert_eq!(links[1]["targetPath"], "os");
    assert_eq!(py["sourceFile"]["exports"], serde_json::json!(["index"]));
    assert_eq!(py["dependencies"][0]["language"], "python");

    let go = analyze_json(dir.path(), "main.go", &[]);
    assert_eq!(go["sourceFile"]["dependencies"][0]["targetPath"], "github.com/gorilla/mux");
    assert_eq!(go["sourceFile"]["dependencies"][0]["isExternal"], true);
    assert_eq!(go["sourceFile"]["exports"], serde_json::json!(["Serve"]));

    let rs = analyze_json(dir.path(), "src/lib.rs", &[]);
    let links = rs["sourceFile"]["dependencies"].as_array().unwrap();
    assert_eq!(links[0]["targetPath"], "crate::graph::RepoGraph");
    assert_eq!(links[0]["importType"], "default");
    assert_eq!(links[0]["isExternal"], false);
    assert_eq!(links[1]["targetPath"], "graph");
}

/// test_missing_file_fails: an unreadable target is a hard error with context.
#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let stderr = run_failure(&["analyze", "nope.ts", "--root", root]);
    assert!(stderr.contains("failed to read"), "stderr: {stderr}");
}
