#![forbid(unsafe_code)]

use anyhow::{anyhow, Context, Result};
use planrs_core::model::Model;
use planrs_core::solution::Solution;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub fn read_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .with_context(|| format!("failed to read {:?}", path))?;

    match serde_json::from_str::<Model>(&contents) {
        Ok(model) => Ok(model),
        Err(parse_err) => {
            if serde_json::from_str::<Solution>(&contents).is_ok() {
                Err(anyhow!(
                    "JSON file contains a solver solution, but a planrs model was expected."
                ))
            } else {
                Err(parse_err).context("failed to parse JSON model")
            }
        }
    }
}

pub fn write_model<P: AsRef<Path>>(path: P, model: &Model) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("failed to create {:?}", path.as_ref()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, model).context("failed to serialise model")?;
    Ok(())
}

pub fn write_solution<P: AsRef<Path>>(path: P, solution: &Solution) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent directory {:?}", parent))?;
        }
    }

    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, solution).context("failed to serialise solution")?;
    writer
        .flush()
        .with_context(|| format!("failed to write solution into {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use planrs_core::model::{LinearExpr, Model};

    #[test]
    fn json_roundtrip() {
        let mut model = Model::new();
        let x = model.add_variable("x", 1.5).unwrap();
        model.add_constraint("cap", LinearExpr::new().term(x, 2.0), 6.0);
        model.maximize(LinearExpr::new().term(x, 1.0));

        let json = serde_json::to_string(&model).unwrap();
        let parsed: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.num_variables(), 1);
        assert_eq!(parsed.num_constraints(), 1);
        assert_eq!(parsed.variable_name(x), Some("x"));
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn rejects_non_model_json() {
        let dir = std::env::temp_dir().join("planrs-io-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not_a_model.json");
        fs::write(&path, r#"{"unexpected": true}"#).unwrap();
        assert!(read_model(&path).is_err());
    }
}
