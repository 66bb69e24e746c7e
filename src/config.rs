#![allow(dead_code)]

// Constants generated by build.rs from config.toml.
include!(concat!(env!("OUT_DIR"), "/launcher_config.rs"));
