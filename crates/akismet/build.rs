// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Records the version of the compiler building this crate for the User-Agent

use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    // `rustc 1.89.0 (29483883e 2025-08-04)`
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .and_then(|line| line.split_whitespace().nth(1).map(str::to_string))
        .unwrap_or_else(|| env::var("CARGO_PKG_RUST_VERSION").unwrap_or_default());

    println!("cargo:rustc-env=AKISMET_RUSTC_VERSION={version}");
}
