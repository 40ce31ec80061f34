//! End-to-end checks of the library pipeline against a stub entrypoint.

#![cfg(unix)]

use foam_agent_mcp::{
    ENV_ENTRYPOINT, ENV_PYTHON, ENV_ROOT, FoamAgentConfig, FoamAgentError, JobRequest,
    NativeRunner, RunnerError, build_shell_command, live_env, load_config,
    resolve_path_relative_to_root, run_foam_agent_process, run_job,
};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// A Foam-Agent checkout whose entrypoint is a shell script run by `sh`.
fn stub_checkout(script: &str) -> (TempDir, FoamAgentConfig) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = dir.path().join("foam-agent");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("foambench_main.py"), script).unwrap();

    let env: HashMap<String, String> = [
        (ENV_ROOT, root.to_string_lossy().into_owned()),
        (ENV_ENTRYPOINT, "foambench_main.py".to_string()),
        (ENV_PYTHON, "sh".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let config = load_config(&root, Some(&env));
    (dir, config)
}

#[test]
fn test_resolve_custom_mesh_relative_path() {
    let (_dir, config) = stub_checkout("exit 0\n");
    let mesh = config.root.join("meshes").join("mesh.stl");
    std::fs::create_dir_all(mesh.parent().unwrap()).unwrap();
    std::fs::write(&mesh, "stub").unwrap();

    let result = resolve_path_relative_to_root(&config, Some("meshes/mesh.stl"));

    assert!(result.value.is_some());
    let resolved = result.resolved.expect("resolved path");
    assert!(resolved.exists());
    assert!(resolved.is_absolute());
}

#[test]
fn test_build_shell_command_contains_prompt_and_output() {
    let (dir, config) = stub_checkout("exit 0\n");
    let output_dir = dir.path().join("out");
    let prompt_path = dir.path().join("prompt.txt");
    std::fs::write(&prompt_path, "hello").unwrap();

    let command = build_shell_command(&config, &output_dir, &prompt_path, None, Vec::<String>::new());

    assert_eq!(command.argv[0..2], ["bash", "-lc"]);
    assert!(command.shell_command.contains(&*output_dir.to_string_lossy()));
    assert!(command.shell_command.contains(&*prompt_path.to_string_lossy()));
    assert!(!command.shell_command.contains("--custom_mesh_path"));
}

#[test]
fn test_built_command_runs_through_bash() {
    let (dir, config) = stub_checkout("printf '%s\\n' \"$@\"\n");
    let output_dir = dir.path().join("out dir");
    let prompt_path = dir.path().join("it's a prompt.txt");

    let command = build_shell_command(
        &config,
        &output_dir,
        &prompt_path,
        Some("/meshes/$(touch pwned).msh"),
        ["--max_loop", "3"],
    );
    let output = run_foam_agent_process(
        &command.argv,
        &config.root,
        &live_env(),
        Some(Duration::from_secs(30)),
    )
    .expect("bash should launch");

    assert_eq!(output.exit_code, Some(0), "stderr: {}", output.stderr_string());
    let lines: Vec<String> = output.stdout_string().lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "--openfoam_path".to_string(),
            config.openfoam_path.clone(),
            "--output".to_string(),
            output_dir.to_string_lossy().into_owned(),
            "--prompt_path".to_string(),
            prompt_path.to_string_lossy().into_owned(),
            "--custom_mesh_path".to_string(),
            "/meshes/$(touch pwned).msh".to_string(),
            "--max_loop".to_string(),
            "3".to_string(),
        ]
    );
    assert!(!config.root.join("pwned").exists());
}

#[test]
fn test_failed_activation_skips_entrypoint() {
    let (dir, base) = stub_checkout("echo entrypoint-ran\n");
    let env: HashMap<String, String> = [
        (ENV_ROOT, base.root.to_string_lossy().into_owned()),
        (ENV_PYTHON, "sh".to_string()),
        ("FOAM_AGENT_ACTIVATE", "false".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    let config = load_config(Path::new("/unused"), Some(&env));

    let command = build_shell_command(
        &config,
        &dir.path().join("out"),
        &dir.path().join("prompt.txt"),
        None,
        Vec::<String>::new(),
    );
    assert!(command.shell_command.starts_with("false && "));

    let output = run_foam_agent_process(
        &command.argv,
        &config.root,
        &live_env(),
        Some(Duration::from_secs(30)),
    )
    .unwrap();
    assert_ne!(output.exit_code, Some(0));
    assert!(!output.stdout_string().contains("entrypoint-ran"));
}

#[test]
fn test_run_job_reports_exit_code_one() {
    let (_dir, config) = stub_checkout("echo 'FOAM FATAL ERROR' >&2\nexit 1\n");
    std::fs::write(config.root.join("prompt.txt"), "cavity").unwrap();
    let request = JobRequest {
        output_dir: "runs/cavity".to_string(),
        prompt_path: "prompt.txt".to_string(),
        timeout: Some(Duration::from_secs(30)),
        ..JobRequest::default()
    };

    let report = run_job(&config, &request, &live_env(), &NativeRunner::new()).unwrap();

    assert_eq!(report.exit_code, Some(1));
    assert!(!report.success);
    assert!(report.log.contains("FOAM FATAL ERROR"));
    assert!(config.root.join("runs/cavity").is_dir());
}

#[test]
fn test_run_job_times_out() {
    let (_dir, config) = stub_checkout("echo meshing\nsleep 30\n");
    std::fs::write(config.root.join("prompt.txt"), "cavity").unwrap();
    let request = JobRequest {
        output_dir: "out".to_string(),
        prompt_path: "prompt.txt".to_string(),
        timeout: Some(Duration::from_secs(10)),
        ..JobRequest::default()
    };
    let runner = NativeRunner::new().with_kill_grace(Duration::from_secs(1));

    // `bash -l` sources the host's login profile before the entrypoint
    // starts, so the limit leaves room for a slow profile.
    let err = run_job(&config, &request, &live_env(), &runner).unwrap_err();
    match err {
        FoamAgentError::Timeout { timeout, log } => {
            assert_eq!(timeout, Duration::from_secs(10));
            assert!(log.contains("meshing"), "partial log: {log:?}");
        }
        other => panic!("Expected Timeout, got {other:?}"),
    }
}

#[test]
fn test_missing_shell_is_launch_failure() {
    let (_dir, config) = stub_checkout("exit 0\n");
    let args = vec!["definitely-not-a-shell-4242".to_string(), "-lc".to_string(), "true".to_string()];

    let err = run_foam_agent_process(&args, &config.root, &live_env(), None).unwrap_err();
    assert!(matches!(err, RunnerError::LaunchFailed { .. }));
}
