use errors::*;

/// Search budgets as written in a configuration file
#[derive(Clone, Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct LimitsConf {
    // number of hill-climbing restarts (eds & amr only), 0 disables it
    pub rrhc: i64,
    // number of search steps per pair, 0 disables the search
    pub mces: i64
}

/// Validated search budgets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub rrhc: usize,
    pub mces: usize
}

impl Default for LimitsConf {
    fn default() -> LimitsConf {
        LimitsConf {
            rrhc: 20,
            mces: 500000
        }
    }
}

impl LimitsConf {
    pub fn validate(&self) -> Result<Limits> {
        if self.rrhc < 0 {
            bail!(ErrorKind::InvalidConfiguration(format!("rrhc limit must not be negative, got {}", self.rrhc)));
        }
        if self.mces < 0 {
            bail!(ErrorKind::InvalidConfiguration(format!("mces limit must not be negative, got {}", self.mces)));
        }

        Ok(Limits {
            rrhc: self.rrhc as usize,
            mces: self.mces as usize
        })
    }
}

impl Default for Limits {
    fn default() -> Limits {
        Limits { rrhc: 20, mces: 500000 }
    }
}
