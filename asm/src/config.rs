use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::error::Error;

/// Bytes per instruction and per data entry.
pub const WORD: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address of the first instruction
    pub pc_start: u32,
    /// Address of the first data entry
    pub data_start: u32,
    /// Size of the static data segment in bytes
    pub data_segment_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pc_start: 0x0040_0000,
            data_start: 0x1001_0000,
            data_segment_size: 0x0010_0000,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        let config: Config = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| Error::Config(path.to_string(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.pc_start % WORD != 0 {
            return Err(Error::Misaligned("pc_start", self.pc_start));
        }
        if self.data_start % WORD != 0 {
            return Err(Error::Misaligned("data_start", self.data_start));
        }
        Ok(())
    }

    /// First address past the data segment.
    pub fn data_end(&self) -> u64 {
        self.data_start as u64 + self.data_segment_size as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.pc_start, 0x00400000);
        assert_eq!(config.data_start, 0x10010000);
        assert_eq!(config.data_end(), 0x10110000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial() {
        let config: Config = serde_yaml::from_str("pc_start: 0x1000\n").unwrap();
        assert_eq!(config.pc_start, 0x1000);
        assert_eq!(config.data_start, Config::default().data_start);
    }

    #[test]
    fn test_misaligned() {
        let config = Config {
            pc_start: 0x1002,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Misaligned("pc_start", 0x1002))
        ));
    }
}
