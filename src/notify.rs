use crate::config;

const ERROR_TITLE: &str = "Error";

pub const JAVA_NOT_INSTALLED_MSG: &str = "Java is not installed on your system or is not the \
     right version. Please install Java Runtime Environment 8 or later";

pub fn cannot_start_message() -> String {
    format!("Could not start {}", config::PRODUCT_NAME)
}

/// Blocking modal error dialog; returns once the user dismisses it.
#[cfg(windows)]
pub fn report_error(message: &str) {
    use std::ffi::OsStr;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    let text: Vec<u16> = OsStr::new(message).encode_wide().chain(once(0)).collect();
    let caption: Vec<u16> = OsStr::new(ERROR_TITLE)
        .encode_wide()
        .chain(once(0))
        .collect();
    unsafe { MessageBoxW(0, text.as_ptr(), caption.as_ptr(), MB_ICONERROR | MB_OK) };
}

#[cfg(not(windows))]
pub fn report_error(message: &str) {
    eprintln!("{message}");
}
