fn main() {
    // Release builds stamp VERSION from CI; it ends up in --version and the User-Agent header
    let version = std::env::var("VERSION")
        .unwrap_or_else(|_| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());
    println!("cargo:rustc-env=MKR_PLUGIN_VERSION={version}");
    println!("cargo:rerun-if-env-changed=VERSION");
}
