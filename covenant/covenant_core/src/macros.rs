//! Convenience macros for the Covenant system.

/// Log an event with the given level and module.
///
/// This macro provides a convenient way to log events with structured
/// metadata attached as `key=value` pairs after the message.
///
/// # Examples
///
/// ```
/// use covenant_core::log_event;
/// use covenant_core::utils::LogLevel;
///
/// // Log an info message
/// log_event!(LogLevel::Info, "Policy saved");
///
/// // Log a debug message with additional context
/// log_event!(LogLevel::Debug, "Policy saved",
///     key => "urn:uuid:0",
///     entries => 3,
/// );
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:expr, $message:expr) => {
        {
            use $crate::utils::LogLevel;
            match $level {
                LogLevel::Error => $crate::__log::error!("[{}] {}", module_path!(), $message),
                LogLevel::Warning => $crate::__log::warn!("[{}] {}", module_path!(), $message),
                LogLevel::Info => $crate::__log::info!("[{}] {}", module_path!(), $message),
                LogLevel::Debug => $crate::__log::debug!("[{}] {}", module_path!(), $message),
                LogLevel::Trace => $crate::__log::trace!("[{}] {}", module_path!(), $message),
            }
        }
    };

    ($level:expr, $message:expr, $($key:ident => $value:expr),+ $(,)?) => {
        {
            use $crate::utils::LogLevel;
            let metadata = vec![$(format!("{}={}", stringify!($key), $value)),+].join(" ");
            match $level {
                LogLevel::Error => $crate::__log::error!("[{}] {}: {}", module_path!(), $message, metadata),
                LogLevel::Warning => $crate::__log::warn!("[{}] {}: {}", module_path!(), $message, metadata),
                LogLevel::Info => $crate::__log::info!("[{}] {}: {}", module_path!(), $message, metadata),
                LogLevel::Debug => $crate::__log::debug!("[{}] {}: {}", module_path!(), $message, metadata),
                LogLevel::Trace => $crate::__log::trace!("[{}] {}: {}", module_path!(), $message, metadata),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::utils::LogLevel;

    #[test]
    fn test_log_event_expands_for_every_level() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
        ] {
            log_event!(level, "plain message");
            log_event!(level, "with metadata", rule => 3, partition => "permission");
        }
    }
}
