//! Locates a Java Runtime Environment that can host the application.
//!
//! A command-line override wins outright and is taken verbatim, with no
//! existence or version check: the caller opted out of auto-detection.
//! Otherwise the Windows registry entries JavaSoft publishes are consulted
//! and the advertised version gated at the minimum the application supports.

use std::{ffi::OsStr, path::PathBuf};

use crate::config;

pub const JAVA_REGISTRY_PATH: &str = r"SOFTWARE\JavaSoft\Java Runtime Environment";
const CURRENT_VERSION_VALUE: &str = "CurrentVersion";
const JAVA_HOME_VALUE: &str = "JavaHome";
const JAVA_EXE_NAME: &str = "java.exe";

// JRE version strings carry a fixed "1." prefix, e.g. "1.8.0_144".
const VERSION_PREFIX_LEN: usize = 2;

pub fn locate(override_path: Option<&OsStr>) -> Option<PathBuf> {
    locate_with_registry(override_path, registry::read_value)
}

pub fn locate_with_registry(
    override_path: Option<&OsStr>,
    read_value: impl Fn(&str, &str) -> Option<String>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let version = read_value(JAVA_REGISTRY_PATH, CURRENT_VERSION_VALUE)?;
    if major_version(&version) < config::MIN_JAVA_VERSION {
        return None;
    }

    let version_key = format!(r"{JAVA_REGISTRY_PATH}\{version}");
    let home = read_value(&version_key, JAVA_HOME_VALUE)?;
    Some(PathBuf::from(home).join("bin").join(JAVA_EXE_NAME))
}

fn major_version(version: &str) -> u32 {
    let tail = version.get(VERSION_PREFIX_LEN..).unwrap_or("");
    let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(windows)]
pub mod registry {
    use std::ffi::OsStr;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::ERROR_SUCCESS;
    use windows_sys::Win32::System::Registry::{
        RegCloseKey, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_LOCAL_MACHINE, KEY_READ,
        KEY_WOW64_64KEY, REG_VALUE_TYPE,
    };

    const VALUE_CAPACITY: usize = 256;

    fn wide(s: &str) -> Vec<u16> {
        OsStr::new(s).encode_wide().chain(once(0)).collect()
    }

    /// Reads a string value under HKEY_LOCAL_MACHINE, forcing the 64-bit
    /// registry view so a 32-bit launcher still sees the real JRE entries.
    pub fn read_value(key_path: &str, value_name: &str) -> Option<String> {
        let key_path = wide(key_path);
        let value_name = wide(value_name);

        let mut key: HKEY = 0;
        let opened = unsafe {
            RegOpenKeyExW(
                HKEY_LOCAL_MACHINE,
                key_path.as_ptr(),
                0,
                KEY_READ | KEY_WOW64_64KEY,
                &mut key,
            )
        };
        if opened != ERROR_SUCCESS {
            return None;
        }

        // zero-filled before every query; populated only on success
        let mut data = [0u16; VALUE_CAPACITY];
        let mut data_size = (VALUE_CAPACITY * std::mem::size_of::<u16>()) as u32;
        let mut value_type: REG_VALUE_TYPE = 0;
        let queried = unsafe {
            RegQueryValueExW(
                key,
                value_name.as_ptr(),
                std::ptr::null(),
                &mut value_type,
                data.as_mut_ptr() as *mut u8,
                &mut data_size,
            )
        };
        unsafe { RegCloseKey(key) };
        if queried != ERROR_SUCCESS {
            return None;
        }

        let len = data.iter().position(|&c| c == 0).unwrap_or(VALUE_CAPACITY);
        Some(String::from_utf16_lossy(&data[..len]))
    }
}

#[cfg(not(windows))]
pub mod registry {
    pub fn read_value(_key_path: &str, _value_name: &str) -> Option<String> {
        None
    }
}
