use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out_dir = env::var("OUT_DIR").unwrap_or_else(|_| "target".to_string());
    let out = PathBuf::from(out_dir).join("api_client.h");

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    // Header generation is best-effort: a cbindgen failure must not break
    // the Rust build itself.
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("API_CLIENT_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(out);
        }
        Err(e) => println!("cargo:warning=cbindgen: {e}"),
    }
}
