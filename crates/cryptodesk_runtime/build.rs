use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowSize {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    app_kind: String,
    title: String,
    icon_id: String,
    #[serde(default)]
    requires_wallet: bool,
    #[serde(default)]
    admin_only: bool,
    #[serde(default = "default_true")]
    show_in_launcher: bool,
    #[serde(default)]
    window_size: Option<WindowSize>,
}

#[derive(Debug, Deserialize)]
struct AppManifest {
    schema_version: u32,
    apps: Vec<AppEntry>,
}

fn default_true() -> bool {
    true
}

fn is_kebab_case(raw: &str) -> bool {
    raw.as_bytes().first().is_some_and(u8::is_ascii_lowercase)
        && !raw.ends_with('-')
        && !raw.contains("--")
        && raw
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("apps.manifest.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: AppManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != 1 {
        panic!(
            "manifest schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for app in &manifest.apps {
        if !is_kebab_case(&app.app_kind) {
            panic!("app kind `{}` is not lowercase kebab-case", app.app_kind);
        }
        if !seen.insert(app.app_kind.clone()) {
            panic!("duplicate app kind `{}`", app.app_kind);
        }
        if app.admin_only && !app.requires_wallet {
            panic!("admin-only app `{}` must require a wallet", app.app_kind);
        }
        if let Some(size) = &app.window_size {
            if size.width <= 0 || size.height <= 0 {
                panic!("app `{}` has a degenerate window size", app.app_kind);
            }
        }
    }

    let json = serde_json::to_string_pretty(&manifest.apps).expect("serialize app catalog");
    let generated = format!(
        "/// Build-time generated application catalog JSON.\n\
pub const APP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
