use crate::locator::LocatorKind;
use crate::Float;

use std::f64::consts::PI;

use serde::Deserialize;

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct Domain {
    pub x_min: Float,
    pub x_max: Float,
}

impl Default for Domain {
    fn default() -> Self {
        Domain {
            x_min: -PI,
            x_max: PI,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct TOMLSweepSettings {
    pub log2_n: Option<(u32, u32)>,
    pub log2_nx: Option<(u32, u32)>,
    pub runs: Option<usize>,
    pub methods: Option<Vec<LocatorKind>>,
    pub output_directory: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepSettings {
    /// inclusive range of exponents, N = 2^a
    pub log2_n: (u32, u32),
    /// inclusive range of exponents, N_x = 2^b
    pub log2_nx: (u32, u32),
    pub runs: usize,
    pub methods: Vec<LocatorKind>,
    pub output_directory: String,
}

impl From<TOMLSweepSettings> for SweepSettings {
    fn from(data: TOMLSweepSettings) -> Self {
        SweepSettings {
            log2_n: data.log2_n.unwrap_or((10, 14)),
            log2_nx: data.log2_nx.unwrap_or((10, 14)),
            runs: data.runs.unwrap_or(5),
            methods: data.methods.unwrap_or_else(|| vec![LocatorKind::Binary]),
            output_directory: data
                .output_directory
                .unwrap_or_else(|| String::from("benchmarking-cpu")),
        }
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        SweepSettings::from(TOMLSweepSettings::default())
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct TOMLConfig {
    pub domain: Option<Domain>,
    pub seed: Option<u64>, // defaults to a clock based seed
    pub locator: Option<LocatorKind>,
    pub sweep: Option<TOMLSweepSettings>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub domain: Domain,
    pub seed: Option<u64>,
    pub locator: LocatorKind,
    pub sweep: SweepSettings,
}

impl From<TOMLConfig> for Config {
    fn from(data: TOMLConfig) -> Self {
        Config {
            domain: data.domain.unwrap_or_default(),
            seed: data.seed,
            locator: data.locator.unwrap_or_default(),
            sweep: data.sweep.map(SweepSettings::from).unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from(TOMLConfig::default())
    }
}
