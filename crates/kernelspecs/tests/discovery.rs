//! Integration tests for kernelspec discovery.
//!
//! These tests build fake Jupyter data directories on disk and exercise the
//! resolver end to end through a [`StaticPaths`] provider.

use std::path::{Path, PathBuf};

use kernelspecs::{
    DiscoveryConfig, JupyterPaths, KernelInfo, KernelspecError, KernelspecResolver, PlatformDirs,
    StaticPaths, SysPrefix, get_kernel_infos, get_kernel_resources,
};
use tempfile::TempDir;

/// Create `<data_dir>/kernels/<name>/kernel.json` with `descriptor`.
fn install_kernel(data_dir: &Path, name: &str, descriptor: &str) -> PathBuf {
    let dir = data_dir.join("kernels").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("kernel.json"), descriptor).unwrap();
    dir
}

fn python_descriptor(display_name: &str) -> String {
    format!(
        r#"{{"argv": ["python3", "-m", "ipykernel_launcher", "-f", "{{connection_file}}"],
            "display_name": "{display_name}", "language": "python"}}"#
    )
}

fn data_dirs(count: usize) -> (TempDir, Vec<PathBuf>) {
    let tmp = tempfile::tempdir().unwrap();
    let dirs = (0..count)
        .map(|i| {
            let dir = tmp.path().join(format!("data{i}"));
            std::fs::create_dir_all(&dir).unwrap();
            dir
        })
        .collect();
    (tmp, dirs)
}

fn resolver(dirs: &[PathBuf]) -> KernelspecResolver<StaticPaths> {
    KernelspecResolver::new(StaticPaths::new(dirs.iter().cloned()))
}

// ═══════════════════════════════════════════════════════════════════════
//  find_all
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn find_all_without_kernels_dirs_is_empty() {
    let (tmp, dirs) = data_dirs(3);
    let missing = tmp.path().join("does-not-exist");
    let mut all = dirs.clone();
    all.push(missing);

    assert!(resolver(&all).find_all().await.is_empty());
}

#[tokio::test]
async fn find_all_with_no_directories_is_empty() {
    assert!(resolver(&[]).find_all().await.is_empty());
}

#[tokio::test]
async fn find_all_drops_directories_without_descriptor() {
    let (_tmp, dirs) = data_dirs(1);
    install_kernel(&dirs[0], "a", "{}");
    std::fs::create_dir_all(dirs[0].join("kernels").join("b")).unwrap();

    let kernels = resolver(&dirs).find_all().await;
    assert_eq!(kernels.keys().collect::<Vec<_>>(), ["a"]);
}

#[tokio::test]
async fn find_all_first_directory_wins() {
    let (_tmp, dirs) = data_dirs(2);
    let first = install_kernel(&dirs[0], "python3", &python_descriptor("Python 3 (user)"));
    install_kernel(&dirs[1], "python3", &python_descriptor("Python 3 (system)"));

    let kernels = resolver(&dirs).find_all().await;
    let python = &kernels["python3"];
    assert_eq!(python.resources_dir, first);
    assert_eq!(python.display_name(), Some("Python 3 (user)"));
}

#[tokio::test]
async fn find_all_falls_through_broken_higher_priority_kernel() {
    let (_tmp, dirs) = data_dirs(2);
    install_kernel(&dirs[0], "python3", r#"{"argv": ["#);
    let second = install_kernel(&dirs[1], "python3", &python_descriptor("Python 3"));

    let kernels = resolver(&dirs).find_all().await;
    assert_eq!(kernels["python3"].resources_dir, second);
}

#[tokio::test]
async fn find_all_invalid_descriptor_does_not_abort_siblings() {
    let (_tmp, dirs) = data_dirs(2);
    install_kernel(&dirs[0], "broken", r#"{"display_name": "Trunc"#);
    install_kernel(&dirs[0], "python3", &python_descriptor("Python 3"));
    install_kernel(&dirs[1], "ir", r#"{"display_name": "R", "language": "R"}"#);

    let kernels = resolver(&dirs).find_all().await;
    assert_eq!(kernels.keys().collect::<Vec<_>>(), ["ir", "python3"]);
    assert_eq!(kernels["ir"].language(), Some("R"));
}

#[tokio::test]
async fn find_all_merges_across_directories() {
    let (_tmp, dirs) = data_dirs(3);
    install_kernel(&dirs[0], "python3", "{}");
    install_kernel(&dirs[2], "julia-1.10", "{}");
    install_kernel(&dirs[2], "python3", "{}");

    let kernels = resolver(&dirs).find_all().await;
    assert_eq!(kernels.len(), 2);
    assert!(kernels["julia-1.10"].resources_dir.starts_with(&dirs[2]));
    assert!(kernels["python3"].resources_dir.starts_with(&dirs[0]));
}

#[tokio::test]
async fn files_lists_whole_resource_directory() {
    let (_tmp, dirs) = data_dirs(1);
    let dir = install_kernel(&dirs[0], "python3", &python_descriptor("Python 3"));
    std::fs::write(dir.join("logo-64x64.png"), [0u8; 8]).unwrap();
    std::fs::create_dir(dir.join("extras")).unwrap();

    let kernels = resolver(&dirs).find_all().await;
    let files = &kernels["python3"].files;

    assert_eq!(
        files,
        &vec![
            dir.join("extras"),
            dir.join("kernel.json"),
            dir.join("logo-64x64.png"),
        ]
    );
    assert!(files.iter().all(|f| f.is_absolute()));
}

#[tokio::test]
async fn find_all_result_serializes_like_jupyter_api() {
    let (_tmp, dirs) = data_dirs(1);
    install_kernel(&dirs[0], "python3", &python_descriptor("Python 3"));

    let kernels = resolver(&dirs).find_all().await;
    let value = serde_json::to_value(&kernels).unwrap();

    assert_eq!(value["python3"]["name"], "python3");
    assert_eq!(value["python3"]["spec"]["display_name"], "Python 3");
    assert!(value["python3"]["resources_dir"].is_string());
}

// ═══════════════════════════════════════════════════════════════════════
//  find
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn find_uses_later_directory_when_earlier_lacks_kernel() {
    let (_tmp, dirs) = data_dirs(2);
    let second = install_kernel(&dirs[1], "python3", &python_descriptor("Python 3"));

    let python = resolver(&dirs).find("python3").await.unwrap();
    assert_eq!(python.name, "python3");
    assert_eq!(python.resources_dir, second);
}

#[tokio::test]
async fn find_prefers_first_directory() {
    let (_tmp, dirs) = data_dirs(2);
    let first = install_kernel(&dirs[0], "python3", "{}");
    install_kernel(&dirs[1], "python3", "{}");

    let python = resolver(&dirs).find("python3").await.unwrap();
    assert_eq!(python.resources_dir, first);
}

#[tokio::test]
async fn find_missing_is_none() {
    let (_tmp, dirs) = data_dirs(2);
    install_kernel(&dirs[0], "python3", "{}");

    assert!(resolver(&dirs).find("missing").await.is_none());
}

#[tokio::test]
async fn find_invalid_descriptor_is_none() {
    let (_tmp, dirs) = data_dirs(1);
    install_kernel(&dirs[0], "python3", "not json at all");

    assert!(resolver(&dirs).find("python3").await.is_none());
}

#[tokio::test]
async fn find_rejects_path_like_names() {
    let (_tmp, dirs) = data_dirs(1);
    install_kernel(&dirs[0], "python3", "{}");
    // `<data>/kernels/../kernels/python3` exists, but is not a kernel name.
    assert!(resolver(&dirs).find("../kernels/python3").await.is_none());
    assert!(resolver(&dirs).find("").await.is_none());
}

#[cfg(unix)]
#[tokio::test]
async fn find_reaches_every_name_find_all_lists() {
    let (_tmp, dirs) = data_dirs(1);
    install_kernel(&dirs[0], "python3", "{}");
    install_kernel(&dirs[0], "a\\b", "{}");

    let resolver = resolver(&dirs);
    let kernels = resolver.find_all().await;
    assert_eq!(kernels.keys().collect::<Vec<_>>(), ["a\\b", "python3"]);

    for name in kernels.keys() {
        let kernel = resolver.find(name).await.unwrap();
        assert_eq!(kernel.resources_dir, kernels[name].resources_dir);
    }
}

/// Known limitation: `find` looks at `kernels/<name>` directly, so the name
/// must match the directory name.  `find_all` keys by directory name too, so
/// a descriptor that declares a different name does not change either.
#[tokio::test]
async fn find_only_matches_directory_names() {
    let (_tmp, dirs) = data_dirs(1);
    install_kernel(
        &dirs[0],
        "python3-venv",
        r#"{"name": "python3", "display_name": "Python 3 (venv)"}"#,
    );

    let resolver = resolver(&dirs);
    assert!(resolver.find("python3").await.is_none());
    assert!(resolver.find("python3-venv").await.is_some());
    assert!(resolver.find_all().await.contains_key("python3-venv"));
}

// ═══════════════════════════════════════════════════════════════════════
//  Building blocks
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn scanner_and_loader_compose() {
    let (_tmp, dirs) = data_dirs(1);
    install_kernel(&dirs[0], "python3", "{}");
    std::fs::create_dir_all(dirs[0].join("kernels").join("empty")).unwrap();

    let infos = get_kernel_infos(&dirs[0].join("kernels")).await.unwrap();
    assert_eq!(infos.len(), 2);

    let empty = infos.iter().find(|i| i.name == "empty").unwrap();
    let err = get_kernel_resources(empty).await.unwrap_err();
    assert!(matches!(err, KernelspecError::DescriptorMissing { .. }));

    let python = infos.iter().find(|i| i.name == "python3").unwrap();
    assert!(get_kernel_resources(python).await.is_ok());
}

#[tokio::test]
async fn loader_reports_missing_directory() {
    let (tmp, _dirs) = data_dirs(0);
    let info = KernelInfo::new("ghost", tmp.path().join("ghost"));
    assert!(matches!(
        get_kernel_resources(&info).await,
        Err(KernelspecError::Io { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
//  Jupyter search path
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn jupyter_paths_resolve_in_priority_order() {
    let tmp = tempfile::tempdir().unwrap();
    let extra = tmp.path().join("extra");
    let user = tmp.path().join("user");
    let prefix = tmp.path().join("prefix");
    let system = tmp.path().join("system");

    install_kernel(&extra, "python3", &python_descriptor("from JUPYTER_PATH"));
    install_kernel(&user, "python3", &python_descriptor("from user dir"));
    install_kernel(&user, "ir", "{}");
    install_kernel(&prefix.join("share").join("jupyter"), "julia", "{}");
    install_kernel(&system, "julia", "{}");
    install_kernel(&system, "bash", "{}");

    let config = DiscoveryConfig {
        jupyter_path: vec![extra.clone()],
        data_dir: Some(user.clone()),
        sys_prefix: SysPrefix::Fixed(prefix.clone()),
        with_sys_prefix: true,
    };
    let platform = PlatformDirs {
        user_data_dir: None,
        system_data_dirs: vec![system.clone()],
    };
    let resolver = KernelspecResolver::new(JupyterPaths::with_platform(config, platform));

    let kernels = resolver.find_all().await;
    assert_eq!(
        kernels.keys().collect::<Vec<_>>(),
        ["bash", "ir", "julia", "python3"]
    );
    assert_eq!(kernels["python3"].display_name(), Some("from JUPYTER_PATH"));
    assert!(kernels["julia"].resources_dir.starts_with(&prefix));
    assert!(kernels["bash"].resources_dir.starts_with(&system));

    let without_prefix = resolver.with_sys_prefix(false);
    let julia = without_prefix.find("julia").await.unwrap();
    assert!(julia.resources_dir.starts_with(&system));
}
