//! Logging shim
//!
//! Forwards to `defmt` or `log` depending on enabled features. With
//! neither, the macros only borrow their arguments so call sites compile
//! the same way in every configuration.

#![allow(unused_imports, unused_macros)]

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        pub(crate) use defmt::{debug, error, info, trace, warn};
    } else if #[cfg(feature = "log")] {
        pub(crate) use log::{debug, error, info, trace, warn};
    } else {
        // Named apart from the built-in `warn` attribute, re-exported below
        macro_rules! __trace {
            ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
        }
        macro_rules! __debug {
            ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
        }
        macro_rules! __info {
            ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
        }
        macro_rules! __warn {
            ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
        }
        macro_rules! __error {
            ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
        }
        pub(crate) use {
            __debug as debug, __error as error, __info as info, __trace as trace, __warn as warn,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_accept_arguments() {
        let slot = 3u8;
        let name = "hour";
        trace!("trace {}", slot);
        debug!("debug {} {}", slot, name);
        info!("info");
        warn!("warn {}", name);
        error!("error {}", slot);
    }
}
