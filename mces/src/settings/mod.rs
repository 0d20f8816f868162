use std::fmt;
use std::fs::File;
use std::path::Path;
use serde_yaml;
use errors::*;

pub mod conf_limits;

pub use self::conf_limits::*;

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    // seed of the random restarts of hill climbing
    pub manual_seed: u64,
    pub limits: LimitsConf,
    // 0 means one worker per core
    pub n_workers: usize,
    // keep per-pair scores, correspondences and missing/surplus items
    pub trace: bool
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            manual_seed: 120,
            limits: LimitsConf::default(),
            n_workers: 0,
            trace: false
        }
    }
}

impl Settings {
    /// Read settings from a YAML file; missing keys take their default value
    pub fn from_file(path: &Path) -> Result<Settings> {
        let file = File::open(path).chain_err(|| format!("cannot open settings file {:?}", path))?;
        let settings = serde_yaml::from_reader(file)?;
        Ok(settings)
    }

    /// Validated search budgets
    pub fn limits(&self) -> Result<Limits> {
        self.limits.validate()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"
****************************** SETTINGS ******************************
manual_seed: {}
limits: {:?}
n_workers: {}
trace: {}
**********************************************************************
"#,
    self.manual_seed,
    self.limits,
    self.n_workers,
    self.trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_partial_yaml() {
        let settings: Settings = serde_yaml::from_str("limits:\n  mces: 100\ntrace: true\n").unwrap();
        assert_eq!(settings.manual_seed, 120);
        assert_eq!(settings.limits.rrhc, 20);
        assert_eq!(settings.limits.mces, 100);
        assert!(settings.trace);
        assert_eq!(settings.limits().unwrap(), Limits { rrhc: 20, mces: 100 });
    }

    #[test]
    pub fn test_negative_limit() {
        let mut settings = Settings::default();
        settings.limits.mces = -1;
        match settings.limits() {
            Err(Error(ErrorKind::InvalidConfiguration(_), _)) => (),
            x => panic!("expect invalid configuration, got {:?}", x)
        }
    }
}
