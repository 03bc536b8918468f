//! Registry of supported Windows targets.
//!
//! The set is closed: each [`Target`] maps to one constant
//! [`TargetDescriptor`], and [`all`] walks them in a fixed order so multi-target
//! output is stable between runs.

use crate::error::UnknownTarget;
use clap::ValueEnum;

/// Static description of one cross-compilation target.
#[derive(Debug, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Short name (e.g. "x64"); also the suffix of the staged executable.
    pub name: &'static str,
    /// Rust target triple passed to `cargo --target`.
    pub triple: &'static str,
    pub compiler: &'static str,
    pub archiver: &'static str,
    pub linker: &'static str,
    /// Prepend the llvm-mingw `bin/` directory to PATH for this target.
    pub requires_alt_toolchain_root: bool,
    /// Link the C runtime statically (gnullvm otherwise pulls in libunwind.dll).
    pub requires_static_runtime: bool,
    /// Remediation shown when the compiler cannot be found.
    pub install_hint: &'static str,
}

pub static TARGETS: &[TargetDescriptor] = &[
    TargetDescriptor {
        name: "x64",
        triple: "x86_64-pc-windows-gnu",
        compiler: "x86_64-w64-mingw32-gcc",
        archiver: "x86_64-w64-mingw32-ar",
        linker: "x86_64-w64-mingw32-gcc",
        requires_alt_toolchain_root: false,
        requires_static_runtime: false,
        install_hint: "apt install gcc-mingw-w64-x86-64",
    },
    TargetDescriptor {
        name: "arm64",
        triple: "aarch64-pc-windows-gnullvm",
        compiler: "aarch64-w64-mingw32-clang",
        archiver: "llvm-ar",
        linker: "aarch64-w64-mingw32-clang",
        requires_alt_toolchain_root: true,
        requires_static_runtime: true,
        install_hint: "unpack a release from https://github.com/mstorsjo/llvm-mingw/releases into the --llvm-mingw directory",
    },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Target {
    #[default]
    #[value(name = "x64")]
    X64,
    #[value(name = "arm64")]
    Arm64,
}

impl Target {
    pub fn descriptor(self) -> &'static TargetDescriptor {
        let idx = match self {
            Self::X64 => 0,
            Self::Arm64 => 1,
        };
        &TARGETS[idx]
    }
}

/// Every registered target, in registry order.
pub fn all() -> impl Iterator<Item = &'static TargetDescriptor> {
    TARGETS.iter()
}

pub fn lookup(name: &str) -> Result<&'static TargetDescriptor, UnknownTarget> {
    TARGETS
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| UnknownTarget {
            name: name.to_string(),
            known: TARGETS
                .iter()
                .map(|t| t.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
