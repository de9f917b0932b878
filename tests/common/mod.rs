//! Common test utilities for noxcomb tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary project directory with a noxfile
pub fn create_nox_project(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let noxfile_path = dir.path().join("noxfile.py");
    std::fs::write(&noxfile_path, content).expect("Failed to write noxfile");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Writes an executable stub `nox` into the given directory
pub fn create_stub_nox(dir: &Path, content: &str) -> PathBuf {
    let script_path = dir.join("nox");
    std::fs::write(&script_path, content).expect("Failed to write stub nox");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&script_path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script_path, perms).expect("Failed to set permissions");
    }

    script_path
}

/// PATH value that resolves the stub before the real nox
pub fn path_with_stub(stub_dir: &Path) -> String {
    let current = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", stub_dir.display(), current)
}

/// Sample noxfile content modeled on a typical lint setup
pub const SAMPLE_NOXFILE: &str = r#"
import nox

@nox.session
def flake8(session):
    session.install('flake8')
    session.run(
        'flake8', 'src/mypackage',
        '--config', 'nox.ini',
        '--output-file', 'flake8_report.txt')

@nox.session
def pylint(session):
    session.install('pylint')
    session.run(
        'pylint', 'src/mypackage',
        '--rcfile', 'nox.ini',
        '--output', 'pylint_report')

@nox.session
def mypy(session):
    session.install('mypy')
    session.run(
        'mypy', 'src/mypackage',
        '--config-file', 'nox.ini',)

@nox.session
def pytest(session):
    session.install('pytest', '.')
    session.run('pytest')
"#;

/// Stub nox that emits inline pytest/mypy sections and honors the rewritten
/// file-based declarations by writing into the redirected paths
pub const SAMPLE_STUB_NOX: &str = r#"#!/bin/sh
noxfile=""
while [ $# -gt 0 ]; do
    case "$1" in
        -f) noxfile="$2"; shift 2 ;;
        *) shift ;;
    esac
done

if [ -n "$noxfile" ]; then
    for name in flake8_report pylint_report; do
        target=$(grep -o "'[^']*${name}[^']*_temp_[^']*'" "$noxfile" | head -n1 | tr -d "'")
        if [ -n "$target" ]; then
            echo "findings from ${name}" > "$target"
        fi
    done
fi

echo 'nox > Running session pytest'
echo 'collected 2 items'
echo '2 passed'
echo 'nox > Command pytest finished'
echo 'nox > Running session mypy'
echo 'src/app.py:1: error: something is wrong'
echo 'nox > Command mypy finished'
"#;
