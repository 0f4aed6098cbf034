use std::path::Path;

use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{load_fork, type_label},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
pub struct ForkInfo {
    pub file_size: usize,
    pub map_offset: u32,
    pub map_size: u32,
    pub map_id: u16,
    pub index_offset: u16,
    pub index_size: u32,
    pub index_used: u32,
    pub free_list_size: u16,
    pub free_list_used: u16,
    pub type_count: usize,
    pub resource_count: usize,
    pub types: Vec<TypeSummary>,
}

#[derive(Debug, Serialize)]
pub struct TypeSummary {
    pub code: String,
    pub name: String,
    pub count: usize,
    pub bytes: u64,
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let fork = load_fork(path)?;
    let map = fork.map_header().copied().unwrap_or_default();

    let types = fork
        .types()
        .iter()
        .map(|&res_type| {
            let records = fork.resources_of_type(res_type);
            TypeSummary {
                code: format!("${res_type:04X}"),
                name: type_label(res_type),
                count: records.len(),
                bytes: records.iter().map(|r| u64::from(r.size)).sum(),
            }
        })
        .collect();

    let info = ForkInfo {
        file_size: fork.len(),
        map_offset: map.map_offset,
        map_size: map.map_size,
        map_id: map.map_id,
        index_offset: map.index_offset,
        index_size: map.index_size,
        index_used: map.index_used,
        free_list_size: map.free_list_size,
        free_list_used: map.free_list_used,
        type_count: fork.count_types(),
        resource_count: fork.count_resources(),
        types,
    };

    print_output(&info, opts, |info| {
        println!("File size:      {} bytes", info.file_size);
        println!(
            "Resource map:   offset {} size {} (id {})",
            info.map_offset, info.map_size, info.map_id
        );
        println!(
            "Index:          offset {} used {}/{}",
            info.index_offset, info.index_used, info.index_size
        );
        println!(
            "Free list:      used {}/{}",
            info.free_list_used, info.free_list_size
        );
        println!(
            "Resources:      {} in {} types",
            info.resource_count, info.type_count
        );

        if !info.types.is_empty() {
            println!();
            let mut tw = TabWriter::new(vec![
                ("Type", Align::Left),
                ("Name", Align::Left),
                ("Count", Align::Right),
                ("Bytes", Align::Right),
            ]);
            for t in &info.types {
                tw.row(vec![
                    t.code.clone(),
                    t.name.clone(),
                    t.count.to_string(),
                    t.bytes.to_string(),
                ]);
            }
            tw.print();
        }
    })
}
