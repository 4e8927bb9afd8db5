use std::{fs::File, io::Write, path::Path};

use log::info;

use crate::error::Result;
use super::problem::Problem;

/// Writes a [`Problem`] as a PDDL domain/problem file pair.
pub struct Writer<'a> {
    problem: &'a Problem,
}

impl<'a> Writer<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    pub fn write<P: AsRef<Path>, Q: AsRef<Path>>(&self, domain_file: P, problem_file: Q) -> Result<()> {
        write_file(domain_file.as_ref(), &self.problem.domain().to_string())?;
        write_file(problem_file.as_ref(), &self.problem.to_string())?;
        info!("Wrote domain {} to {} and problem {} to {}",
            self.problem.domain_name, domain_file.as_ref().display(),
            self.problem.name, problem_file.as_ref().display());
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{}", contents)?;
    Ok(())
}
