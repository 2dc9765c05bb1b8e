// src/fmt.rs

// Logging shims. Expand to `log` or `defmt` depending on the enabled feature,
// and to nothing otherwise. Arguments are still type-checked in the no-op case.

#![allow(unused_macros)]

#[cfg(all(feature = "log", feature = "defmt"))]
compile_error!("feature \"log\" and feature \"defmt\" cannot be enabled at the same time");

macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)+);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($($arg)+);
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)+);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($($arg)+);
    }};
}

macro_rules! warn {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($arg)+);
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)+);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($($arg)+);
    }};
}
