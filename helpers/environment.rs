//! Target network description and local/remote classification.

use std::fmt;

/// Chain ids of ephemeral development networks: 31337 is the in-process test
/// node, 1337 the coverage node.
pub const LOCAL_CHAIN_IDS: [u64; 2] = [31337, 1337];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Local,
    Remote,
}

impl Classification {
    pub fn from_chain_id(chain_id: u64) -> Self {
        if LOCAL_CHAIN_IDS.contains(&chain_id) {
            Self::Local
        } else {
            Self::Remote
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specific chain a deployment run targets. Derived once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub chain_id: u64,
    pub classification: Classification,
    /// Network name; also the directory name deployment records live under.
    pub name: String,
}

impl Environment {
    pub fn from_chain_id(chain_id: u64) -> Self {
        let name = chain_name(chain_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("chain-{chain_id}"));
        Self {
            chain_id,
            classification: Classification::from_chain_id(chain_id),
            name,
        }
    }

    /// Overrides the network name; classification still follows the chain id.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_local(&self) -> bool {
        self.classification == Classification::Local
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (chain {})", self.name, self.chain_id)
    }
}

/// Well-known network names by chain id.
pub fn chain_name(chain_id: u64) -> Option<&'static str> {
    let name = match chain_id {
        1 => "mainnet",
        5 => "goerli",
        10 => "optimism",
        56 => "bsc",
        100 => "gnosis",
        137 => "polygon",
        1337 => "localhost",
        8453 => "base",
        31337 => "hardhat",
        42161 => "arbitrum",
        43114 => "avalanche",
        80001 => "mumbai",
        84532 => "base-sepolia",
        11155111 => "sepolia",
        _ => return None,
    };
    Some(name)
}
