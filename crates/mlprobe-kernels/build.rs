use std::env;
use std::fs;
use std::path::PathBuf;

/// Record the resolved candle-core version so the smoke checks can report it.
fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let lock_path = manifest_dir.join("..").join("..").join("Cargo.lock");
    println!("cargo:rerun-if-changed={}", lock_path.display());

    let version = fs::read_to_string(&lock_path)
        .ok()
        .and_then(|lock| locked_version(&lock, "candle-core"))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=MLPROBE_CANDLE_VERSION={version}");
}

/// Version of `package` from the lockfile's `[[package]]` entries.
fn locked_version(lock: &str, package: &str) -> Option<String> {
    let lock: toml::Table = lock.parse().ok()?;
    lock.get("package")?
        .as_array()?
        .iter()
        .filter_map(toml::Value::as_table)
        .find(|entry| entry.get("name").and_then(toml::Value::as_str) == Some(package))?
        .get("version")?
        .as_str()
        .map(str::to_string)
}
