//! Log backend setup for the CLI.

use log::LevelFilter;

/// Level for a count of `-v` flags; warnings only by default.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Build the stderr logger. With no `-v`, `RUST_LOG` is honoured and falls
/// back to warnings; any `-v` sets the level explicitly.
pub fn builder(verbosity: u8) -> env_logger::Builder {
    let mut builder = if verbosity == 0 {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    } else {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level_for(verbosity));
        builder
    };
    builder.format_timestamp(None).format_target(false);
    builder
}

pub fn init(verbosity: u8) {
    builder(verbosity).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn explicit_verbosity_sets_the_filter() {
        let logger = builder(2).build();
        assert_eq!(logger.filter(), LevelFilter::Debug);
    }
}
