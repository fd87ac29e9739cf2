//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `couture_core::defaults`.

use couture_core::defaults;

/// Generate default value functions that forward to couture_core::defaults constants.
macro_rules! default_fns {
    // For Copy types (integers, bool, etc.)
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_request_body_limit_bytes => DEFAULT_REQUEST_BODY_LIMIT_BYTES: usize,
    default_cors_enabled             => DEFAULT_CORS_ENABLED: bool,
    default_shutdown_timeout_secs    => DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64,
    default_seed_on_start            => DEFAULT_SEED_ON_START: bool,
    default_http_timeout_secs        => DEFAULT_HTTP_TIMEOUT_SECS: u64,
}

default_string_fns! {
    default_listen         => DEFAULT_LISTEN,
    default_store_location => DEFAULT_STORE_LOCATION,
}
