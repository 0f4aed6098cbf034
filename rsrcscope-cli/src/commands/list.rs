use std::path::Path;

use rsrcscope::{ResAttr, ResourceRecord};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{load_fork, parse_type, resource_name, type_label},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct ResourceEntry {
    index: u32,
    res_type: String,
    type_name: String,
    res_id: String,
    attr: String,
    flags: String,
    offset: u32,
    size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListOutput {
    resources: Vec<ResourceEntry>,
    count: usize,
}

fn format_flags(attr: ResAttr) -> String {
    let mut flags: Vec<String> = attr
        .iter_names()
        .filter(|(name, _)| !name.starts_with("PURGE"))
        .map(|(name, _)| name.to_lowercase())
        .collect();
    if attr.purge_level() > 0 {
        flags.push(format!("purge{}", attr.purge_level()));
    }
    flags.join(",")
}

pub fn run(path: &Path, type_filter: Option<&str>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let fork = load_fork(path)?;

    let records: &[ResourceRecord] = match type_filter {
        Some(text) => fork.resources_of_type(parse_type(text)?),
        None => fork.records(),
    };

    let resources: Vec<ResourceEntry> = records
        .iter()
        .map(|record| ResourceEntry {
            index: record.index,
            res_type: format!("${:04X}", record.res_type),
            type_name: type_label(record.res_type),
            res_id: format!("${:08X}", record.res_id),
            attr: format!("${:04X}", record.attr),
            flags: format_flags(record.attributes()),
            offset: record.offset,
            size: record.size,
            name: resource_name(&fork, record.res_type, record.res_id),
        })
        .collect();

    let output = ListOutput {
        count: resources.len(),
        resources,
    };

    print_output(&output, opts, |out| {
        if out.resources.is_empty() {
            println!("No resources found.");
            return;
        }

        let mut tw = TabWriter::new(vec![
            ("Type", Align::Left),
            ("ID", Align::Left),
            ("Attr", Align::Left),
            ("Size", Align::Right),
            ("Name", Align::Left),
        ]);
        for e in &out.resources {
            let attr = if e.flags.is_empty() {
                e.attr.clone()
            } else {
                format!("{} ({})", e.attr, e.flags)
            };
            tw.row(vec![
                e.type_name.clone(),
                e.res_id.clone(),
                attr,
                e.size.to_string(),
                e.name.clone().unwrap_or_default(),
            ]);
        }
        tw.print();
        println!("\n{} resource(s) listed.", out.count);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert_eq!(format_flags(ResAttr::empty()), "");
        assert_eq!(
            format_flags(ResAttr::LOCKED | ResAttr::PRELOAD),
            "preload,locked"
        );
        assert_eq!(format_flags(ResAttr::PURGE3), "purge3");
        assert_eq!(format_flags(ResAttr::PURGE1 | ResAttr::FIXED), "fixed,purge1");
    }
}
