use clap::ValueEnum;
use packwright_config::Mode;

/// Build mode as accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ModeArg {
    /// Stable file names, live-reload plugin
    #[value(name = "development", alias = "dev")]
    Development,

    /// Fingerprinted file names, extraction plugin
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Development => Mode::Development,
            ModeArg::Production => Mode::Production,
        }
    }
}
