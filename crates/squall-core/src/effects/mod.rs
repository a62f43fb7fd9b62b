//! Procedural degradation effects.
//!
//! Each generator is a pure transform from one RGB image to a new image of the
//! same size. Randomness is never drawn from a global source: callers pass the
//! generator to use, so a seeded run reproduces streak layouts, fog intensities
//! and brightness scales exactly.
//!
//! - **rain**: random downward streaks on a blank overlay, alpha-blended in
//! - **fog**: blend toward white, then a Gaussian blur
//! - **low_light**: multiplicative darkening
//! - **blend** / **blur**: shared pixel primitives

pub mod blend;
pub mod blur;
pub mod fog;
pub mod low_light;
pub mod rain;

pub use blur::GaussianBlur;
pub use fog::FogGenerator;
pub use low_light::LowLightGenerator;
pub use rain::{RainGenerator, Streak};

use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::EffectsConfig;

/// The kinds of degradation Squall can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Rain,
    Fog,
    #[serde(alias = "lowlight", alias = "dark")]
    LowLight,
}

impl EffectKind {
    /// Every effect, in the order they are applied to each file.
    pub const ALL: [EffectKind; 3] = [EffectKind::Rain, EffectKind::Fog, EffectKind::LowLight];

    /// Filename prefix for outputs of this effect.
    pub fn prefix(self) -> &'static str {
        match self {
            EffectKind::Rain => "rain",
            EffectKind::Fog => "fog",
            EffectKind::LowLight => "dark",
        }
    }

    /// Output filename for a source file name: `{prefix}_{name}`.
    pub fn output_name(self, file_name: &str) -> String {
        format!("{}_{}", self.prefix(), file_name)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Rain => write!(f, "rain"),
            EffectKind::Fog => write!(f, "fog"),
            EffectKind::LowLight => write!(f, "low_light"),
        }
    }
}

impl FromStr for EffectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rain" => Ok(EffectKind::Rain),
            "fog" => Ok(EffectKind::Fog),
            "low_light" | "low-light" | "lowlight" | "dark" => Ok(EffectKind::LowLight),
            other => Err(format!(
                "unknown effect '{other}' (expected rain, fog or low_light)"
            )),
        }
    }
}

/// All three generators, built once per run from configuration.
#[derive(Debug, Clone)]
pub struct EffectSet {
    rain: RainGenerator,
    fog: FogGenerator,
    low_light: LowLightGenerator,
}

impl EffectSet {
    /// Build the generators from the effect configuration.
    pub fn new(config: &EffectsConfig) -> Self {
        Self {
            rain: RainGenerator::new(config.rain.clone()),
            fog: FogGenerator::new(config.fog.clone()),
            low_light: LowLightGenerator::new(config.low_light.clone()),
        }
    }

    /// Apply one effect to an image, drawing its parameters from `rng`.
    pub fn apply<R: Rng + ?Sized>(&self, kind: EffectKind, image: &RgbImage, rng: &mut R) -> RgbImage {
        match kind {
            EffectKind::Rain => self.rain.apply(image, rng),
            EffectKind::Fog => self.fog.apply(image, rng),
            EffectKind::LowLight => self.low_light.apply(image, rng),
        }
    }
}

/// Random generator for the file at `index` in a run.
///
/// With a run seed, each file gets its own generator derived from
/// `(seed, index)`, so results do not depend on which worker picks the file up
/// or in what order files finish. Without a seed the generator is entropy-seeded.
pub fn file_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(mix_seed(seed, index as u64)),
        None => StdRng::from_entropy(),
    }
}

/// SplitMix64 finalizer over the run seed offset by the file index.
fn mix_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_prefixes_and_output_names() {
        assert_eq!(EffectKind::Rain.output_name("a.png"), "rain_a.png");
        assert_eq!(EffectKind::Fog.output_name("a.png"), "fog_a.png");
        assert_eq!(EffectKind::LowLight.output_name("IMG_01.JPG"), "dark_IMG_01.JPG");
    }

    #[test]
    fn test_effect_kind_from_str() {
        assert_eq!("rain".parse::<EffectKind>().unwrap(), EffectKind::Rain);
        assert_eq!("FOG".parse::<EffectKind>().unwrap(), EffectKind::Fog);
        assert_eq!("dark".parse::<EffectKind>().unwrap(), EffectKind::LowLight);
        assert_eq!("low-light".parse::<EffectKind>().unwrap(), EffectKind::LowLight);
        assert!("snow".parse::<EffectKind>().is_err());
    }

    #[test]
    fn test_effect_kind_serde_aliases() {
        let kinds: Vec<EffectKind> = serde_json::from_str(r#"["rain","dark","low_light"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![EffectKind::Rain, EffectKind::LowLight, EffectKind::LowLight]
        );
        assert_eq!(serde_json::to_string(&EffectKind::LowLight).unwrap(), "\"low_light\"");
    }

    #[test]
    fn test_file_rng_is_reproducible_per_index() {
        let a: u64 = file_rng(Some(7), 3).gen();
        let b: u64 = file_rng(Some(7), 3).gen();
        let c: u64 = file_rng(Some(7), 4).gen();
        let d: u64 = file_rng(Some(8), 3).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_every_effect_preserves_dimensions() {
        let set = EffectSet::new(&EffectsConfig::default());
        let image = RgbImage::from_pixel(37, 23, Rgb([90, 140, 200]));
        let mut rng = file_rng(Some(1), 0);

        for kind in EffectKind::ALL {
            let out = set.apply(kind, &image, &mut rng);
            assert_eq!(out.dimensions(), image.dimensions(), "{kind} changed size");
        }
    }

    #[test]
    fn test_seeded_effects_are_deterministic() {
        let set = EffectSet::new(&EffectsConfig::default());
        let image = RgbImage::from_fn(40, 40, |x, y| Rgb([(x * 6) as u8, (y * 6) as u8, 128]));

        for kind in EffectKind::ALL {
            let first = set.apply(kind, &image, &mut file_rng(Some(42), 0));
            let second = set.apply(kind, &image, &mut file_rng(Some(42), 0));
            assert_eq!(first, second, "{kind} is not reproducible");
        }
    }
}
