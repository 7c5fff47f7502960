use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

#[test]
fn generate_without_a_template_root_uses_a_private_bundled_export() {
    let work = TempDir::new().unwrap();
    let structure = work.path().join("project.json");
    fs::write(
        &structure,
        r#"{
            "modules": [{ "name": "user" }],
            "domains": [{ "domainName": "user", "decoratorMethod": "Get", "router": "users" }],
            "moduleOptions": { "database": "not" },
            "swagger": { "title": "User API", "version": "1.0.0" }
        }"#,
    )
    .unwrap();
    let target = work.path().join("out");

    Command::cargo_bin("servgen")
        .unwrap()
        .arg("generate")
        .arg("--structure")
        .arg(&structure)
        .arg("--out")
        .arg(&target)
        .assert()
        .success();

    assert!(target.join("src/app.module.ts").exists());
    assert!(target.join("src/domains/user.controller.ts").exists());
    // The bundled set unpacks into a per-run directory, not a fixed shared
    // path that concurrent invocations would race on.
    assert!(!std::env::temp_dir().join("servgen-templates").exists());
}

#[test]
fn templates_export_writes_the_bundled_set() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("servgen")
        .unwrap()
        .arg("templates")
        .arg("export")
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("src/app.module.ts").exists());
    assert!(dir.path().join("src/domains/___.controller.ts").exists());
}
