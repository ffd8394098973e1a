//! Tests for verbosity mapping and subscriber setup

#[cfg(test)]
mod tests {
    use socketwfc::io::logging::{LogLevel, init_tracing};

    // Tests each -v step raises the level and quiet wins
    // Verified by letting verbosity override quiet
    #[test]
    fn test_from_verbosity() {
        assert_eq!(LogLevel::from_verbosity(0, false), LogLevel::Warn);
        assert_eq!(LogLevel::from_verbosity(1, false), LogLevel::Info);
        assert_eq!(LogLevel::from_verbosity(2, false), LogLevel::Debug);
        assert_eq!(LogLevel::from_verbosity(9, false), LogLevel::Trace);
        assert_eq!(LogLevel::from_verbosity(3, true), LogLevel::Error);
        assert!(LogLevel::Trace > LogLevel::Warn);
    }

    // Tests levels map onto filter directives
    // Verified by capitalising the directive names
    #[test]
    fn test_as_str() {
        assert_eq!(LogLevel::Error.as_str(), "error");
        assert_eq!(LogLevel::Info.as_str(), "info");
        assert_eq!(LogLevel::Trace.as_str(), "trace");
    }

    // Tests repeated initialisation is harmless
    // Verified by installing the subscriber with init instead of try_init
    #[test]
    fn test_init_tracing_twice() {
        init_tracing(LogLevel::Warn);
        init_tracing(LogLevel::Debug);
        tracing::warn!("logging initialised");
    }
}
