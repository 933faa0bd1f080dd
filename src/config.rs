use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory by [`Config::load_or_default`]
pub const CONFIG_FILE: &str = "bikeshare.yaml";

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_cities() -> CityMap {
    CityMap::default()
}

/// Mapping from lowercase city key to the CSV file holding its trips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityMap {
    sources: BTreeMap<String, String>,
}

impl Default for CityMap {
    fn default() -> Self {
        Self::from_pairs([
            ("chicago", "chicago.csv"),
            ("new york city", "new_york_city.csv"),
            ("washington", "washington.csv"),
        ])
    }
}

impl CityMap {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let sources = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_lowercase(), v.into()))
            .collect();
        Self { sources }
    }

    /// Source file name for a city key (case-insensitive)
    pub fn source_for(&self, city: &str) -> Option<&str> {
        self.sources
            .get(&city.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.source_for(city).is_some()
    }

    /// City keys in sorted order
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<'de> Deserialize<'de> for CityMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(Self::from_pairs(raw))
    }
}

/// Runtime configuration, optionally read from `bikeshare.yaml`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_cities")]
    pub cities: CityMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cities: default_cities(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config: {:?}", path.as_ref()))?;
        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config YAML")?;
        Ok(config)
    }

    /// Load `bikeshare.yaml` from `dir` if it exists, otherwise use defaults.
    /// A relative `data_dir` in the file is resolved against `dir`.
    pub fn load_or_default<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let mut config = Self::load(&path)?;
        if config.data_dir.is_relative() {
            config.data_dir = dir.as_ref().join(&config.data_dir);
        }
        Ok(config)
    }

    /// Full path of the source file for a named city
    pub fn source_path(&self, city: &str) -> Option<PathBuf> {
        self.cities.source_for(city).map(|f| self.data_dir.join(f))
    }
}
