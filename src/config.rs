// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::DEFAULT_PERIOD_DAYS;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DB_ENV: &str = "FINTRACK_DB";
pub const PERIOD_DAYS_ENV: &str = "FINTRACK_PERIOD_DAYS";
pub const AUTH_LATENCY_ENV: &str = "FINTRACK_AUTH_LATENCY_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Days over which average daily spend is computed.
    pub period_days: u32,
    pub auth_latency: Duration,
}

impl Config {
    /// `--db` wins over `FINTRACK_DB`, which wins over the platform data dir.
    pub fn resolve(db_flag: Option<&str>) -> Result<Self> {
        Self::from_lookup(db_flag, |k| std::env::var(k).ok())
    }

    pub fn from_lookup(
        db_flag: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let db_path = match db_flag.map(str::to_string).or_else(|| lookup(DB_ENV)) {
            Some(p) => PathBuf::from(p),
            None => crate::db::default_db_path()?,
        };
        let period_days = match lookup(PERIOD_DAYS_ENV) {
            Some(v) => {
                let days: u32 = v
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {} '{}'", PERIOD_DAYS_ENV, v))?;
                if days == 0 {
                    return Err(anyhow::anyhow!("{} must be at least 1", PERIOD_DAYS_ENV));
                }
                days
            }
            None => DEFAULT_PERIOD_DAYS,
        };
        let auth_latency = match lookup(AUTH_LATENCY_ENV) {
            Some(v) => Duration::from_millis(
                v.trim()
                    .parse()
                    .with_context(|| format!("Invalid {} '{}'", AUTH_LATENCY_ENV, v))?,
            ),
            None => Duration::ZERO,
        };
        Ok(Self {
            db_path,
            period_days,
            auth_latency,
        })
    }
}
