// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Settings of the `amdahl` front-end.
//!
//! A [Config] is resolved from several sources. From lowest to highest
//! priority these are:
//!  - the built-in defaults ([Config::default]),
//!  - [CONF_FILE] in the working directory, if there is one,
//!  - an extra TOML file given on the command line,
//!  - environment variables starting with [ENV_PREFIX],
//!  - command-line arguments.
//!
//! Every field is optional so that an unset command-line argument does not
//! hide a value from a lower priority source. Use the accessor methods to
//! read the resolved values.
//!
//! The predefined GPU components are fixed and cannot be configured.

use std::path::Path;

use amdahl_engine::analysis::DEFAULT_LAST_N;
use amdahl_engine::dataset::{ORIGINAL_RENDER_TIME_MS, TARGET_SPEEDUP};
use amdahl_engine::evaluator::{check_factor, check_fraction};
use amdahl_engine::parameter_error;
use amdahl_engine::sweep::{DEFAULT_FACTOR_SWEEP_FRACTIONS, DEFAULT_FRACTION_SWEEP_FACTORS};
use amdahl_engine::types::{AmdahlResult, InvalidParameter};
use clap::Args;
use color_eyre::eyre::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Configuration file picked up from the working directory.
pub const CONF_FILE: &str = "amdahl.toml";

/// Prefix of environment variables that override settings.
pub const ENV_PREFIX: &str = "AMDAHL_";

#[derive(Args, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Config {
    /// Frame time before any optimization, in milliseconds
    #[arg(long)]
    pub original_duration_ms: Option<f64>,

    /// Overall speedup the optimization has to reach
    #[arg(long)]
    pub target_speedup: Option<f64>,

    /// Number of most recently entered components to compare
    #[arg(long)]
    pub last_n: Option<usize>,

    /// Improvable fractions plotted against the improvement factor
    #[arg(long, value_delimiter = ',')]
    pub factor_sweep_fractions: Option<Vec<f64>>,

    /// Improvement factors plotted against the improvable fraction
    #[arg(long, value_delimiter = ',')]
    pub fraction_sweep_factors: Option<Vec<f64>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            original_duration_ms: Some(ORIGINAL_RENDER_TIME_MS),
            target_speedup: Some(TARGET_SPEEDUP),
            last_n: Some(DEFAULT_LAST_N),
            factor_sweep_fractions: Some(DEFAULT_FACTOR_SWEEP_FRACTIONS.to_vec()),
            fraction_sweep_factors: Some(DEFAULT_FRACTION_SWEEP_FACTORS.to_vec()),
        }
    }
}

impl Config {
    /// A configuration with nothing set, as parsed from an empty command line.
    #[must_use]
    pub fn unset() -> Self {
        Self {
            original_duration_ms: None,
            target_speedup: None,
            last_n: None,
            factor_sweep_fractions: None,
            fraction_sweep_factors: None,
        }
    }

    /// Resolve the configuration from every source.
    ///
    /// `conf_file` is an optional extra TOML file which must exist.
    /// `overrides` holds the command-line values.
    pub fn load(conf_file: Option<&Path>, overrides: &Config) -> Result<Self> {
        let mut figment = Self::figment_with_defaults();
        figment = figment.merge(Toml::file(CONF_FILE));
        if let Some(conf_file) = conf_file {
            check_conf_file(conf_file)?;
            figment = figment.merge(Toml::file(conf_file));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let mut config: Config = figment
            .extract()
            .wrap_err("Failed to resolve the configuration")?;
        config.merge(overrides);
        config.validate()?;
        Ok(config)
    }

    fn figment_with_defaults() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Take every value that is set in `cli`.
    fn merge(&mut self, cli: &Config) {
        if cli.original_duration_ms.is_some() {
            self.original_duration_ms = cli.original_duration_ms;
        }
        if cli.target_speedup.is_some() {
            self.target_speedup = cli.target_speedup;
        }
        if cli.last_n.is_some() {
            self.last_n = cli.last_n;
        }
        if cli.factor_sweep_fractions.is_some() {
            self.factor_sweep_fractions = cli.factor_sweep_fractions.clone();
        }
        if cli.fraction_sweep_factors.is_some() {
            self.fraction_sweep_factors = cli.fraction_sweep_factors.clone();
        }
    }

    /// Check the values are usable by the engine.
    pub fn validate(&self) -> AmdahlResult<()> {
        let duration = self.original_duration_ms();
        if duration.is_nan() || duration <= 0.0 {
            return parameter_error!(InvalidParameter::DurationNotPositive(duration));
        }
        let target = self.target_speedup();
        if target.is_nan() || target <= 1.0 {
            return parameter_error!(InvalidParameter::TargetNotAboveOne(target));
        }
        for &fraction in self.factor_sweep_fractions() {
            check_fraction(fraction)?;
        }
        for &factor in self.fraction_sweep_factors() {
            check_factor(factor)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn original_duration_ms(&self) -> f64 {
        self.original_duration_ms.unwrap_or(ORIGINAL_RENDER_TIME_MS)
    }

    #[must_use]
    pub fn target_speedup(&self) -> f64 {
        self.target_speedup.unwrap_or(TARGET_SPEEDUP)
    }

    #[must_use]
    pub fn last_n(&self) -> usize {
        self.last_n.unwrap_or(DEFAULT_LAST_N)
    }

    #[must_use]
    pub fn factor_sweep_fractions(&self) -> &[f64] {
        self.factor_sweep_fractions
            .as_deref()
            .unwrap_or(&DEFAULT_FACTOR_SWEEP_FRACTIONS)
    }

    #[must_use]
    pub fn fraction_sweep_factors(&self) -> &[f64] {
        self.fraction_sweep_factors
            .as_deref()
            .unwrap_or(&DEFAULT_FRACTION_SWEEP_FACTORS)
    }
}

fn check_conf_file(conf_file: &Path) -> Result<()> {
    if conf_file.is_dir() {
        bail!("{} is not a file path", conf_file.display());
    }
    if !conf_file.exists() {
        bail!("{} not found", conf_file.display());
    }
    Ok(())
}
