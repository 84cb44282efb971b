use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use strum::{Display, EnumString};

use crate::error::Error;

/// What to do when a macro name or sequence id shows up twice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Marker in front of every sequence name
    pub prefix: String,
    /// Keyword introducing a macro
    pub keyword: String,
    pub duplicates: DuplicatePolicy,
    pub dts: Dts,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefix: "EVT_".to_string(),
            keyword: "#define".to_string(),
            duplicates: DuplicatePolicy::default(),
            dts: Dts::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        let config: Config = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| Error::Config(path.to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.prefix.trim().is_empty() {
            return Err(Error::InvalidSetting("sequence prefix is empty".to_string()));
        }
        if self.keyword.trim().is_empty() {
            return Err(Error::InvalidSetting("macro keyword is empty".to_string()));
        }
        if self.prefix.contains('=') || self.keyword.contains('=') {
            return Err(Error::InvalidSetting(
                "prefix and keyword cannot contain `=`".to_string(),
            ));
        }
        Ok(())
    }
}

/// Device tree node printed as usage hint after a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dts {
    pub node: String,
    pub compatible: String,
    pub reg: String,
    pub phy_cells: u32,
}

impl Default for Dts {
    fn default() -> Self {
        Dts {
            node: "serdes: phy@1b0003b0".to_string(),
            compatible: "realtek,rtl9302b-serdes".to_string(),
            reg: "0x1b0003b0 0x8".to_string(),
            phy_cells: 4,
        }
    }
}

impl Dts {
    pub fn snippet(&self, firmware_name: &str) -> String {
        [
            format!("  {} {{", self.node),
            format!("    compatible = \"{}\";", self.compatible),
            format!("    reg = <{}>;", self.reg),
            format!("    firmware-name = \"{}\";", firmware_name),
            format!("    #phy-cells = <{}>;", self.phy_cells),
            "  };".to_string(),
        ]
        .join("\n")
    }
}
