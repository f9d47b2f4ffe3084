//! Operator-facing console report of a deployment run.

use std::io::{self, Write};

use alloy::{dyn_abi::DynSolValue, primitives::Address};

use crate::{format_values, DeployError, DeploymentRecord, Environment};

const RULE: &str = "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

pub struct Report<W> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n{RULE}\n{title:^width$}\n{RULE}\n", width = RULE.len())
    }

    pub fn network(&mut self, env: &Environment) -> io::Result<()> {
        writeln!(self.out, "network: {} ({})", env.name, env.classification)
    }

    pub fn deployer(&mut self, deployer: Address) -> io::Result<()> {
        writeln!(self.out, "deployer: {deployer}")
    }

    pub fn step(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "\n{message}")
    }

    pub fn outcome(&mut self, record: &DeploymentRecord) -> io::Result<()> {
        if record.newly_deployed {
            match record.transaction_hash {
                Some(tx) => writeln!(
                    self.out,
                    "deployed \"{}\" at {} (tx {tx})",
                    record.contract_name, record.address
                ),
                None => writeln!(
                    self.out,
                    "deployed \"{}\" at {}",
                    record.contract_name, record.address
                ),
            }
        } else {
            writeln!(
                self.out,
                "reusing \"{}\" at {}",
                record.contract_name, record.address
            )
        }
    }

    pub fn value(&mut self, label: &str, values: &[DynSolValue]) -> io::Result<()> {
        writeln!(self.out, "\n{label}:\n{}", format_values(values))
    }

    /// A failed informational read, kept visibly apart from deployment errors.
    pub fn unavailable(&mut self, label: &str, err: &DeployError) -> io::Result<()> {
        writeln!(self.out, "\n{label} unavailable: {err}")
    }

    pub fn done(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nDone!")
    }
}
