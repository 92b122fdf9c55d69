pub mod aggregator_consts {
    //! Aggregator Configuration Constants
    //!
    //! Timing and buffering constants for the polling aggregator,
    //! organized by functional area.

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Polling configuration for the periodic fetch cycle
    pub mod polling {
        use std::time::Duration;

        /// Interval between periodic fetch cycles (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 30_000;

        /// Capacity of the manual-refresh queue. One slot is enough:
        /// a refresh that arrives while another is already queued is redundant.
        pub const REFRESH_QUEUE_SIZE: usize = 1;

        pub fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client timeouts
    pub mod http {
        use std::time::Duration;

        /// Timeout for establishing a connection (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Timeout for a complete request/response exchange (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }
}
