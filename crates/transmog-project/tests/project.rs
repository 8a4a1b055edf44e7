use std::fs::{self, File};
use std::time::{Duration, SystemTime};

use camino::{Utf8Path, Utf8PathBuf};
use transmog_errors::{Diagnostic, Position, Renderer};
use transmog_project::{LoadOptions, LoadReport, Project, ProjectError};
use transmog_tree::{Builder, NodeId, SyntaxKind, SyntaxTree};

/// One identifier per non-blank line. A line holding `!` is a syntax error.
fn parse_lines(
    path: &Utf8Path,
    text: &str,
    tree: &mut SyntaxTree,
) -> Result<NodeId, Diagnostic> {
    let mut builder = Builder::new(tree, Some(path));
    builder.start_group(SyntaxKind::FILE);
    for (line, content) in (1..).zip(text.lines()) {
        let word = content.trim();
        if word.is_empty() {
            continue;
        }
        let column = content.find(word).unwrap_or(0) as u32 + 1;
        if word == "!" {
            builder.finish_node();
            builder.finish();
            return Err(Diagnostic::error("unexpected `!`", Some(Position::new(line, column))));
        }
        builder.token(SyntaxKind::IDENT, word, line, column);
    }
    builder.finish_node();
    Ok(builder.finish())
}

struct Workspace {
    _dir: tempfile::TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap().to_owned();
        let workspace = Self { _dir: dir, root };
        for (name, text) in files {
            workspace.write(name, text, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000));
        }
        workspace
    }

    fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    fn write(&self, name: &str, text: &str, modified: SystemTime) {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, text).unwrap();
        File::options().write(true).open(&path).unwrap().set_modified(modified).unwrap();
    }

    /// Rewrites a file with a modification time after the last parse.
    fn touch(&self, name: &str, text: &str) {
        self.write(name, text, SystemTime::now());
    }
}

fn load(workspace: &Workspace) -> (Project, LoadReport) {
    Project::load(&workspace.root, LoadOptions::default(), &mut parse_lines).unwrap()
}

fn words(project: &Project, path: &Utf8Path) -> Vec<String> {
    let tree = project.tree();
    let file = project.file_node(path).unwrap();
    tree.children(file).map(|node| tree.text(node).to_owned()).collect()
}

#[test]
fn load_collects_failures_and_keeps_going() {
    let workspace = Workspace::new(&[
        ("src/a/Apple.java", "apple\n  core\n"),
        ("src/Broken.java", "fine\n!\n"),
        ("src/Cherry.java", "cherry\n"),
        ("notes.txt", "ignored\n"),
    ]);

    let (project, report) = load(&workspace);

    assert_eq!(
        report.parsed,
        [workspace.path("src/Cherry.java"), workspace.path("src/a/Apple.java")]
    );
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.path(), workspace.path("src/Broken.java"));
    assert_eq!(failure.diagnostic.position(), Some(Position::new(2, 1)));
    assert!(failure.render(&Renderer::plain()).contains("unexpected `!`"));

    let tree = project.tree();
    assert_eq!(tree.child_count(tree.root()), 2);
    assert_eq!(tree.check_links(tree.root()), Ok(()));
    assert_eq!(words(&project, &workspace.path("src/a/Apple.java")), ["apple", "core"]);
    let core = tree.descendants(tree.root()).find(|&node| tree.text(node) == "core").unwrap();
    assert_eq!(tree.position(core), Some(Position::new(2, 3)));

    assert_eq!(project.stale_files(), [workspace.path("src/Broken.java")]);
    assert_eq!(project.files().count(), 3);
}

#[test]
fn refresh_reparses_only_changed_files() {
    let workspace = Workspace::new(&[("A.java", "alpha\n"), ("B.java", "beta\n")]);
    let mut calls = Vec::new();
    let mut parser = |path: &Utf8Path, text: &str, tree: &mut SyntaxTree| {
        calls.push(path.file_name().unwrap_or_default().to_owned());
        parse_lines(path, text, tree)
    };
    let (mut project, _) =
        Project::load(&workspace.root, LoadOptions::default(), &mut parser).unwrap();
    let untouched = project.file_node(&workspace.path("A.java")).unwrap();

    workspace.touch("B.java", "beta\ngamma\n");
    let report = project.refresh(&mut parser).unwrap();

    assert_eq!(report.parsed, [workspace.path("B.java")]);
    assert!(report.is_ok());
    assert_eq!(calls, ["A.java", "B.java", "B.java"]);
    assert_eq!(project.file_node(&workspace.path("A.java")), Some(untouched));
    assert_eq!(words(&project, &workspace.path("B.java")), ["beta", "gamma"]);
    assert_eq!(project.tree().child_count(project.tree().root()), 2);
    assert!(project.stale_files().is_empty());
}

#[test]
fn refresh_tracks_added_and_deleted_files() {
    let workspace = Workspace::new(&[("A.java", "alpha\n"), ("B.java", "beta\n")]);
    let (mut project, _) = load(&workspace);

    fs::remove_file(workspace.path("A.java")).unwrap();
    workspace.touch("C.java", "gamma\n");
    let report = project.refresh(&mut parse_lines).unwrap();

    assert_eq!(report.removed, [workspace.path("A.java")]);
    assert_eq!(report.parsed, [workspace.path("C.java")]);
    assert_eq!(project.file_node(&workspace.path("A.java")), None);
    let tree = project.tree();
    let files = tree
        .children(tree.root())
        .map(|file| tree.file(file).unwrap().file_name().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(files, ["C.java", "B.java"]);
    assert_eq!(tree.check_links(tree.root()), Ok(()));
}

#[test]
fn failed_file_is_retried() {
    let workspace = Workspace::new(&[("A.java", "!\n")]);
    let (mut project, report) = load(&workspace);
    assert!(!report.is_ok());
    assert_eq!(project.file_node(&workspace.path("A.java")), None);

    workspace.touch("A.java", "fixed\n");
    let report = project.refresh(&mut parse_lines).unwrap();
    assert!(report.is_ok());
    assert_eq!(words(&project, &workspace.path("A.java")), ["fixed"]);
}

#[test]
fn edits_mark_files_dirty_until_saved() {
    let workspace = Workspace::new(&[("A.java", "alpha\n"), ("B.java", "beta\n")]);
    let (mut project, _) = load(&workspace);
    assert!(project.dirty_files().is_empty());

    let b = workspace.path("B.java");
    let file = project.file_node(&b).unwrap();
    let beta = project.tree().first_child(file).unwrap();
    project.editor().rename(beta, "bravo");

    assert_eq!(project.dirty_files(), [b.as_path()]);
    assert!(project.mark_saved(&b));
    assert!(project.dirty_files().is_empty());
    assert!(!project.mark_saved(&workspace.path("Missing.java")));
    assert!(project.stale_files().is_empty());
}

#[test]
fn compact_drops_replaced_files() {
    let workspace = Workspace::new(&[("A.java", "alpha\n"), ("B.java", "beta\n")]);
    let (mut project, _) = load(&workspace);
    let a = workspace.path("A.java");
    let alpha = project.tree().first_child(project.file_node(&a).unwrap()).unwrap();
    project.editor().rename(alpha, "aleph");

    workspace.touch("B.java", "beta\ngamma\n");
    project.refresh(&mut parse_lines).unwrap();
    let reachable = |project: &Project| project.tree().descendants(project.tree().root()).count();
    assert!(project.tree().node_count() > reachable(&project));

    project.compact();

    assert_eq!(project.tree().node_count(), reachable(&project));
    assert_eq!(words(&project, &a), ["aleph"]);
    assert_eq!(words(&project, &workspace.path("B.java")), ["beta", "gamma"]);
    assert_eq!(project.dirty_files(), [a.as_path()]);
    let tree = project.tree();
    assert_eq!(tree.check_links(tree.root()), Ok(()));
    let gamma = tree.descendants(tree.root()).find(|&node| tree.text(node) == "gamma").unwrap();
    assert_eq!(tree.position(gamma), Some(Position::new(2, 1)));
}

#[test]
fn custom_extension() {
    let workspace = Workspace::new(&[("A.java", "alpha\n"), ("B.jav", "beta\n")]);
    let options = LoadOptions { extension: ".jav".to_owned() };
    let (project, report) = Project::load(&workspace.root, options, &mut parse_lines).unwrap();
    assert_eq!(report.parsed, [workspace.path("B.jav")]);
    assert_eq!(project.dir(), workspace.root);
}

#[test]
fn missing_directory() {
    let workspace = Workspace::new(&[]);
    let result = Project::load(workspace.path("nope"), LoadOptions::default(), &mut parse_lines);
    assert!(matches!(result, Err(ProjectError::Walk(_))));
}
