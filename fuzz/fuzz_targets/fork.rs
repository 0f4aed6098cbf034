#![no_main]

use libfuzzer_sys::fuzz_target;
use rsrcscope::ResourceFork;

fuzz_target!(|data: &[u8]| {
    let Ok(fork) = ResourceFork::from_slice(data) else {
        return;
    };

    for index in 0..fork.count_resources() {
        let Ok((record, _)) = fork.indexed_resource(index) else {
            continue;
        };
        let _ = fork.load_resource(record.res_type, record.res_id);
        let _ = fork.resource_name(record.res_type, record.res_id);
    }

    for &res_type in fork.types() {
        if let Ok(table) = fork.name_table(res_type) {
            for (_, name) in &table {
                let _ = fork.load_named_resource(res_type, name);
            }
        }
    }
});
