mod common;

use common::run_tubenotes;

#[test]
fn transcript_subcommand_is_available() {
    let output = run_tubenotes(&["transcript", "--help"]);

    assert!(
        output.status.success(),
        "transcript --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn summarize_subcommand_is_available() {
    let output = run_tubenotes(&["summarize", "--help"]);

    assert!(
        output.status.success(),
        "summarize --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn transcript_reports_unreachable_backend() {
    let output = run_tubenotes(&["transcript", "abc123"]);

    assert!(
        !output.status.success(),
        "transcript should fail without a backend\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to fetch transcript"),
        "expected transcript fetch error, got:\n{}",
        stderr
    );
}

#[test]
fn summarize_reports_unreachable_backend() {
    let output = run_tubenotes(&["summarize", "abc123"]);

    assert!(
        !output.status.success(),
        "summarize should fail without a backend\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to fetch summary"),
        "expected summary fetch error, got:\n{}",
        stderr
    );
}

#[test]
fn health_reports_unreachable_backend() {
    let output = run_tubenotes(&["health"]);

    assert!(
        !output.status.success(),
        "health should fail without a backend\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error connecting to backend"),
        "expected connection error, got:\n{}",
        stderr
    );
}
