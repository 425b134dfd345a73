use std::env;
use std::fs;
use std::path::Path;

/// 构建期读取 `.env`，把其中的变量注入为编译期环境变量（供 `option_env!` 读取）
fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // 已在外部环境中设置的变量优先
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!(
            "cargo:warning=No .env file found, using defaults. Copy .env.example to .env to configure TMDB_API_KEY."
        );
    }

    for key in ["TMDB_BASE_URL", "TMDB_API_KEY", "AUTH_BASE_URL"] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
