//! Sampler and scheduler name catalog
//!
//! The host's registry is the source of truth for valid sampler/scheduler
//! names; nodes treat them as opaque enumerable strings. When the host has no
//! lists to offer, the built-in fallback lists below are used.

use log::info;

use crate::config::Config;

/// Built-in sampler names used when the host supplies none
pub const FALLBACK_SAMPLERS: &[&str] = &[
    "euler", "euler_cfg_pp", "euler_ancestral", "euler_ancestral_cfg_pp",
    "heun", "heunpp2", "dpm_2", "dpm_2_ancestral", "lms", "dpm_fast",
    "dpm_adaptive", "dpmpp_2s_ancestral", "dpmpp_2s_ancestral_cfg_pp",
    "dpmpp_sde", "dpmpp_sde_gpu", "dpmpp_2m", "dpmpp_2m_cfg_pp",
    "dpmpp_2m_sde", "dpmpp_2m_sde_gpu", "dpmpp_3m_sde", "dpmpp_3m_sde_gpu",
    "ddpm", "lcm", "ipndm", "ipndm_v", "deis", "res_multistep",
    "res_multistep_cfg_pp", "res_multistep_ancestral", "res_multistep_ancestral_cfg_pp",
    "gradient_estimation", "gradient_estimation_cfg_pp", "er_sde",
    "seeds_2", "seeds_3", "sa_solver", "sa_solver_pece",
];

/// Built-in scheduler names used when the host supplies none
pub const FALLBACK_SCHEDULERS: &[&str] = &[
    "normal", "karras", "exponential", "sgm_uniform", "simple", "ddim_uniform",
];

/// Runtime-supplied sampler/scheduler name lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCatalog {
    samplers: Vec<String>,
    schedulers: Vec<String>,
}

impl Default for NameCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

impl NameCatalog {
    /// Catalog with exactly the lists the host supplied
    pub fn new(samplers: Vec<String>, schedulers: Vec<String>) -> Self {
        Self { samplers, schedulers }
    }

    /// Catalog of the built-in fallback lists
    pub fn fallback() -> Self {
        Self {
            samplers: FALLBACK_SAMPLERS.iter().map(|s| s.to_string()).collect(),
            schedulers: FALLBACK_SCHEDULERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Catalog from config overrides; empty config lists keep the built-ins
    pub fn from_config(config: &Config) -> Self {
        let mut catalog = Self::fallback();
        if !config.names.samplers.is_empty() {
            info!("Using {} sampler names from config", config.names.samplers.len());
            catalog.samplers = config.names.samplers.clone();
        }
        if !config.names.schedulers.is_empty() {
            info!("Using {} scheduler names from config", config.names.schedulers.len());
            catalog.schedulers = config.names.schedulers.clone();
        }
        catalog
    }

    pub fn samplers(&self) -> &[String] {
        &self.samplers
    }

    pub fn schedulers(&self) -> &[String] {
        &self.schedulers
    }
}
