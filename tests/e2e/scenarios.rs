use std::path::Path;

use super::harness::{TestContext, TestEnv, parse_json, read_file, start_fake_index, write_file};

pub struct Scenario {
    pub name: &'static str,
    pub run: fn(&TestContext) -> Result<(), String>,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "help_output",
            run: scenario_help,
        },
        Scenario {
            name: "no_args_error",
            run: scenario_no_args,
        },
        Scenario {
            name: "scan_project",
            run: scenario_scan_project,
        },
        Scenario {
            name: "scan_json",
            run: scenario_scan_json,
        },
        Scenario {
            name: "scan_missing_dir",
            run: scenario_scan_missing_dir,
        },
        Scenario {
            name: "scan_config_file",
            run: scenario_scan_config_file,
        },
        Scenario {
            name: "resolve_stdout",
            run: scenario_resolve_stdout,
        },
        Scenario {
            name: "resolve_output_file",
            run: scenario_resolve_output_file,
        },
        Scenario {
            name: "resolve_json",
            run: scenario_resolve_json,
        },
        Scenario {
            name: "remote_clone_failure",
            run: scenario_remote_clone_failure,
        },
    ]
}

/// A small project exercising locals, stdlib, package markers and ignored dirs
fn write_project(root: &Path) -> Result<(), String> {
    write_file(
        &root.join("app.py"),
        "import os\nimport requests\nfrom flask import Flask\nimport helpers\nfrom . import views\nimport tensorflow as tf\nimport notapkg\n",
    )?;
    write_file(&root.join("helpers.py"), "import json\n")?;
    write_file(&root.join("pkg").join("__init__.py"), "import django\n")?;
    write_file(&root.join("venv").join("lib.py"), "import boto3\n")?;
    Ok(())
}

fn fake_index() -> Result<String, String> {
    start_fake_index(&[
        ("requests", "2.31.0"),
        ("flask", "3.0.0"),
        ("tensorflow-gpu", "2.12.0"),
    ])
}

fn scenario_help(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("help")?;
    let output = ctx.run_pyreqs(&env, &["--help"], &env.root)?;
    output.assert_success()?;
    output.assert_stdout_contains("resolve")?;
    output.assert_stdout_contains("remote")?;
    Ok(())
}

fn scenario_no_args(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("no-args")?;
    let output = ctx.run_pyreqs(&env, &[], &env.root)?;
    output.assert_failure()?;
    output.assert_stderr_contains("No command specified")?;
    Ok(())
}

fn scenario_scan_project(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("scan-project")?;
    write_project(&env.root)?;

    let output = ctx.run_pyreqs(&env, &["scan"], &env.root)?;
    output.assert_success()?;
    let lines = output.stdout_lines();
    if lines != ["requests", "flask", "tensorflow-gpu", "notapkg"] {
        return Err(format!("Unexpected scan output: {:?}", lines));
    }
    output.assert_stdout_not_contains("django")?;
    output.assert_stdout_not_contains("boto3")?;
    Ok(())
}

fn scenario_scan_json(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("scan-json")?;
    write_project(&env.root)?;

    let output = ctx.run_pyreqs(&env, &["scan", ".", "--json"], &env.root)?;
    output.assert_success()?;
    let value = parse_json(&output.stdout)?;
    let packages: Vec<&str> = value
        .get("packages")
        .and_then(|v| v.as_array())
        .ok_or("Expected packages array")?
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    if packages != ["requests", "flask", "tensorflow-gpu", "notapkg"] {
        return Err(format!("Unexpected packages: {:?}", packages));
    }
    Ok(())
}

fn scenario_scan_missing_dir(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("scan-missing")?;
    let output = ctx.run_pyreqs(&env, &["scan", "does-not-exist"], &env.root)?;
    output.assert_failure()?;
    output.assert_stderr_contains("Failed to walk directory")?;
    Ok(())
}

fn scenario_scan_config_file(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("scan-config")?;
    write_project(&env.root)?;
    write_file(&env.root.join("scripts").join("tool.py"), "import click\n")?;
    write_mapping_config(&env, "notapkg:not-a-package\n")?;

    let output = ctx.run_pyreqs(&env, &["scan"], &env.root)?;
    output.assert_success()?;
    output.assert_stdout_contains("not-a-package")?;
    output.assert_stdout_not_contains("click")?;
    // Built-in overrides still apply with a custom mapping file
    output.assert_stdout_contains("tensorflow-gpu")?;
    Ok(())
}

fn write_mapping_config(env: &TestEnv, mapping: &str) -> Result<(), String> {
    let mapping_path = env.home.join("mapping");
    write_file(&mapping_path, mapping)?;
    let config = serde_json::json!({
        "ignore_dirs": ["scripts"],
        "mapping_file": mapping_path,
    });
    write_file(
        &env.xdg_config.join("pyreqs").join("config.json"),
        &config.to_string(),
    )
}

fn scenario_resolve_stdout(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("resolve-stdout")?;
    write_project(&env.root)?;
    let index = fake_index()?;

    let output = ctx.run_pyreqs(&env, &["resolve", "--index", &index], &env.root)?;
    output.assert_success()?;
    let lines = output.stdout_lines();
    if lines != ["flask==3.0.0", "requests==2.31.0", "tensorflow-gpu==2.12.0"] {
        return Err(format!("Unexpected manifest: {:?}", lines));
    }
    output.assert_stderr_contains("The package does not exist: notapkg")?;
    output.assert_stderr_contains("1 package(s) could not be resolved")?;
    Ok(())
}

fn scenario_resolve_output_file(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("resolve-file")?;
    write_project(&env.root)?;
    let index = fake_index()?;

    let output = ctx.run_pyreqs(
        &env,
        &["resolve", "-o", "out/requirements.txt", "--index", &index],
        &env.root,
    )?;
    output.assert_success()?;
    output.assert_stdout_contains("Wrote 3 requirement(s)")?;

    let manifest = read_file(&env.root.join("out").join("requirements.txt"))?;
    if manifest != "flask==3.0.0\nrequests==2.31.0\ntensorflow-gpu==2.12.0\n" {
        return Err(format!("Unexpected manifest file: {:?}", manifest));
    }
    Ok(())
}

fn scenario_resolve_json(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("resolve-json")?;
    write_project(&env.root)?;
    let index = fake_index()?;

    let output = ctx.run_pyreqs(&env, &["resolve", "--json", "--index", &index], &env.root)?;
    output.assert_success()?;
    let value = parse_json(&output.stdout)?;
    if value.get("failed").and_then(|v| v.as_u64()) != Some(1) {
        return Err(format!("Expected one failure: {}", value));
    }
    let first = value
        .get("requirements")
        .and_then(|v| v.get(0))
        .ok_or("Expected requirements array")?;
    if first.get("name").and_then(|v| v.as_str()) != Some("flask")
        || first.get("version").and_then(|v| v.as_str()) != Some("3.0.0")
    {
        return Err(format!("Unexpected first requirement: {}", first));
    }
    Ok(())
}

fn scenario_remote_clone_failure(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("remote-failure")?;
    let index = fake_index()?;

    let output = ctx.run_pyreqs(
        &env,
        &[
            "remote",
            "/nonexistent/pyreqs/repo.git",
            "--token",
            "secret-token",
            "--index",
            &index,
        ],
        &env.root,
    )?;
    output.assert_failure()?;
    output.assert_stderr_contains("Failed to clone")?;
    if output.stderr.contains("secret-token") {
        return Err("Token leaked into error output".to_string());
    }
    Ok(())
}
