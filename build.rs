use serde::Deserialize;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, Deserialize)]
struct Config {
    product_name: String,
    window_title: String,
    mutex_name: String,
    main_class: String,
    #[serde(default = "default_min_java_version")]
    min_java_version: u32,
}

fn default_min_java_version() -> u32 {
    8
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest_dir = PathBuf::from(manifest_dir);
    let config = load_config(&manifest_dir).unwrap_or_else(|err| {
        panic!("failed to load config.toml: {err}");
    });

    if let Err(err) = write_config_rs(&PathBuf::from(std::env::var("OUT_DIR").unwrap()), &config) {
        panic!("failed to write config: {err}");
    }
}

fn load_config(manifest_dir: &Path) -> io::Result<Config> {
    let config_path = manifest_dir.join("config.toml");
    println!("cargo:rerun-if-changed={}", config_path.display());
    let contents = fs::read_to_string(&config_path)?;
    let cfg: Config = toml::from_str(&contents)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(cfg)
}

fn write_config_rs(out_dir: &Path, config: &Config) -> io::Result<()> {
    let out_path = out_dir.join("launcher_config.rs");
    let mut file = fs::File::create(&out_path)?;
    writeln!(
        file,
        "pub const PRODUCT_NAME: &str = {:?};",
        config.product_name
    )?;
    writeln!(
        file,
        "pub const WINDOW_TITLE: &str = {:?};",
        config.window_title
    )?;
    writeln!(file, "pub const MUTEX_NAME: &str = {:?};", config.mutex_name)?;
    writeln!(file, "pub const MAIN_CLASS: &str = {:?};", config.main_class)?;
    writeln!(
        file,
        "pub const MIN_JAVA_VERSION: u32 = {};",
        config.min_java_version
    )?;
    Ok(())
}
