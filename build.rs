use std::env;
use std::path::PathBuf;

const CATALOG: &str = "catalog/parts.json";
const SCHEMA: &str = "schema/catalog.schema.json";

fn main() {
    println!("cargo:rerun-if-env-changed=RIGCHECK_ROOT_HINT");
    println!("cargo:rerun-if-changed={SCHEMA}");

    let Some(root) = env::var_os("RIGCHECK_ROOT_HINT")
        .or_else(|| env::var_os("CARGO_MANIFEST_DIR"))
        .map(PathBuf::from)
    else {
        return;
    };

    // Only bake a hint that actually holds the catalog layout.
    if !root.join(CATALOG).is_file() || !root.join(SCHEMA).is_file() {
        println!(
            "cargo:warning=RIGCHECK_ROOT_HINT {} lacks {CATALOG}; binaries will rely on RIGCHECK_ROOT",
            root.display()
        );
        return;
    }

    let root = root.canonicalize().unwrap_or(root);
    println!("cargo:rustc-env=RIGCHECK_ROOT_HINT={}", root.display());
}
