/// Extract the archive filename from a download URL (last path segment, query stripped)
pub fn get_filename_from_url(url: &str) -> String {
    url.split('?')
        .next()
        .unwrap_or(url)
        .split('/')
        .next_back()
        .filter(|name| !name.is_empty())
        .unwrap_or("download")
        .to_string()
}

/// OS and architecture as they appear in plugin release asset names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Platform of the running binary.
    ///
    /// Plugin releases follow Go's `GOOS`/`GOARCH` naming, so the Rust
    /// target names are translated (e.g. `x86_64` becomes `amd64`).
    pub fn current() -> Self {
        Self::from_rust(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn from_rust(os: &str, arch: &str) -> Self {
        Self::from_rust_with_endian(os, arch, cfg!(target_endian = "little"))
    }

    /// Go names little-endian 64-bit POWER and MIPS separately; Rust does not
    pub fn from_rust_with_endian(os: &str, arch: &str, little_endian: bool) -> Self {
        let os = match os {
            "macos" => "darwin",
            other => other,
        };

        let arch = match arch {
            "x86_64" => "amd64",
            "x86" => "386",
            "aarch64" => "arm64",
            "powerpc64" if little_endian => "ppc64le",
            "powerpc64" => "ppc64",
            "mips64" if little_endian => "mips64le",
            "mips" if little_endian => "mipsle",
            "loongarch64" => "loong64",
            other => other,
        };

        Self::new(os, arch)
    }
}
