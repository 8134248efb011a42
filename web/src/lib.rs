use clap::Parser;
use clap_verbosity_flag::Verbosity;
use lightsout_core::PAINT_DEFER_MS;
use wasm_bindgen::prelude::*;

mod board;
pub mod host;
pub mod transport;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity,

    /// Milliseconds to wait after the winning board is drawn before asking for a name
    #[arg(long, default_value_t = PAINT_DEFER_MS)]
    paint_defer_ms: u32,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
            paint_defer_ms: PAINT_DEFER_MS,
        }
    }
}

impl Args {
    /// Options come from the location hash, e.g. `#-vv&--paint-defer-ms=50`.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

/// Logger level, raised to at least `Warn` when the options could not be parsed so the failure is reported.
fn startup_log_level(args: &Args, args_failed: bool) -> Option<log::Level> {
    let level = args.verbose.log_level();
    if args_failed {
        Some(level.map_or(log::Level::Warn, |level| level.max(log::Level::Warn)))
    } else {
        level
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::window;

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let (args, args_error) = match Args::from_location_hash(&location_hash) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = startup_log_level(&args, args_error.is_some()) {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = args_error {
        log::warn!("ignoring options in {:?}: {}", location_hash, err);
    }
    log::debug!("{:?}", args);

    let host = match host::HostPage::bind() {
        Ok(host) => host,
        Err(err) => {
            log::error!("{}", err);
            return;
        }
    };

    log::debug!("App started");
    let root = host.board().clone();
    let props = board::BoardProps {
        host,
        paint_defer_ms: args.paint_defer_ms,
    };
    yew::Renderer::<board::BoardView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_location_hash("").unwrap();
        assert_eq!(args.paint_defer_ms, PAINT_DEFER_MS);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn hash_sets_verbosity_and_delay() {
        let args = Args::from_location_hash("#-vv&--paint-defer-ms=50").unwrap();
        assert_eq!(args.paint_defer_ms, 50);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn bad_hash_is_an_error() {
        assert!(Args::from_location_hash("#--paint-defer-ms=soon").is_err());
    }

    #[test]
    fn failed_options_still_report_warnings() {
        let args = Args::default();
        assert_eq!(startup_log_level(&args, true), Some(log::Level::Warn));
        assert_eq!(startup_log_level(&args, false), Some(log::Level::Error));

        let args = Args::from_location_hash("#-vvv").unwrap();
        assert_eq!(startup_log_level(&args, true), Some(log::Level::Debug));
    }

    #[test]
    fn default_matches_empty_hash() {
        let args = Args::default();
        assert_eq!(args.paint_defer_ms, PAINT_DEFER_MS);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }
}
