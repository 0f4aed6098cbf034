use std::{
    io::Write,
    path::Path,
};

use anyhow::{bail, Context};

use crate::commands::common::{load_fork, parse_number, parse_type, type_label};

/// How the resource to extract is identified.
#[derive(Debug)]
pub enum Selector<'a> {
    Id(u32),
    Name(&'a str),
}

impl<'a> Selector<'a> {
    pub fn new(id: Option<&'a str>, name: Option<&'a str>) -> anyhow::Result<Self> {
        match (id, name) {
            (Some(id), None) => Ok(Selector::Id(parse_number(id)?)),
            (None, Some(name)) => Ok(Selector::Name(name)),
            _ => bail!("exactly one of --id or --name is required"),
        }
    }
}

pub fn run(
    path: &Path,
    type_text: &str,
    selector: Selector,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let fork = load_fork(path)?;
    let res_type = parse_type(type_text)?;

    let (res_id, payload) = match selector {
        Selector::Id(res_id) => {
            let payload = fork.load_resource(res_type, res_id).with_context(|| {
                format!("no resource {} ${res_id:08X}", type_label(res_type))
            })?;
            (res_id, payload)
        }
        Selector::Name(name) => {
            let res_id = fork
                .find_named_resource(res_type, name)
                .with_context(|| format!("no {} named '{name}'", type_label(res_type)))?;
            let payload = fork.load_resource(res_type, res_id).with_context(|| {
                format!("name '{name}' refers to missing resource ${res_id:08X}")
            })?;
            (res_id, payload)
        }
    };

    match output {
        Some(out) => {
            std::fs::write(out, payload)
                .with_context(|| format!("failed to write: {}", out.display()))?;
            log::info!(
                "Extracted {} ${res_id:08X} ({} bytes) to {}",
                type_label(res_type),
                payload.len(),
                out.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(payload)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
