//! CLI enum types for the augment command.

use clap::ValueEnum;
use squall_core::{EffectKind, ReportFormat};

/// Effects selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EffectArg {
    /// Rain streaks (`rain_` prefix)
    Rain,
    /// White haze plus blur (`fog_` prefix)
    Fog,
    /// Multiplicative darkening (`dark_` prefix)
    #[value(aliases = ["dark", "lowlight", "low_light"])]
    LowLight,
}

impl From<EffectArg> for EffectKind {
    fn from(arg: EffectArg) -> Self {
        match arg {
            EffectArg::Rain => EffectKind::Rain,
            EffectArg::Fog => EffectKind::Fog,
            EffectArg::LowLight => EffectKind::LowLight,
        }
    }
}

/// Report file formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    /// Pretty JSON, file replaced on each run
    #[default]
    Json,
    /// One line per run, file appended
    Jsonl,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Json => ReportFormat::Json,
            ReportFormatArg::Jsonl => ReportFormat::JsonLines,
        }
    }
}

impl std::fmt::Display for ReportFormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormatArg::Json => write!(f, "json"),
            ReportFormatArg::Jsonl => write!(f, "jsonl"),
        }
    }
}
