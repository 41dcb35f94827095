//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): Uses defmt
//! - Host (`std` feature) and host tests: Uses println!/eprintln!
//! - Anything else: No-op (arguments are still type-checked)
//!
//! The scheduler logs registration, thread spawn outcomes, enable/disable
//! transitions and shutdown. The per-tick paths (`Scheduler::update()` and
//! the worker loop) never log.
//!
//! With `defmt`, format strings must follow defmt syntax, so scheduler log
//! sites only format integers and `&str`.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        println!("[INFO] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        println!("[WARN] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        eprintln!("[ERROR] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        println!("[DEBUG] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        println!("[TRACE] {}", format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_accept_format_arguments() {
        let count = 3usize;
        let name = "blink";
        crate::log_info!("registered {} ({} tasks)", name, count);
        crate::log_warn!("task {} fell back", name);
        crate::log_error!("spawn failed for {}", name);
        crate::log_debug!("interval {} ms", 500u32);
        crate::log_trace!("tick");
    }
}
