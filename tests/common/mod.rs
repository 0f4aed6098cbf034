//! Byte-level fork construction shared by the integration tests.
#![allow(dead_code)]

/// One index entry plus the payload it points to.
pub struct Entry {
    pub res_type: u16,
    pub res_id: u32,
    pub attr: u16,
    pub payload: Vec<u8>,
}

impl Entry {
    pub fn new(res_type: u16, res_id: u32, payload: &[u8]) -> Self {
        Entry {
            res_type,
            res_id,
            attr: 0,
            payload: payload.to_vec(),
        }
    }

    pub fn with_attr(mut self, attr: u16) -> Self {
        self.attr = attr;
        self
    }
}

/// Lay out a fork: file header, 30 byte map header, index, then payloads in entry order.
pub fn fork_bytes(entries: &[Entry]) -> Vec<u8> {
    let index_len = 20 * entries.len() as u32;
    let map_size = 30 + index_len;
    let mut payload_offset = 16 + map_size;

    let mut data = Vec::new();
    push_u32(&mut data, 0); // version
    push_u32(&mut data, 16);
    push_u32(&mut data, map_size);
    push_u32(&mut data, 0);

    push_u32(&mut data, 0); // handle
    push_u16(&mut data, 0); // flag
    push_u32(&mut data, 16);
    push_u32(&mut data, map_size);
    push_u16(&mut data, 30);
    push_u16(&mut data, 0); // file number
    push_u16(&mut data, 0); // map id
    push_u32(&mut data, entries.len() as u32);
    push_u32(&mut data, entries.len() as u32);
    push_u16(&mut data, 0);

    for entry in entries {
        push_u16(&mut data, entry.res_type);
        push_u32(&mut data, entry.res_id);
        push_u32(&mut data, payload_offset);
        push_u16(&mut data, entry.attr);
        push_u32(&mut data, entry.payload.len() as u32);
        push_u32(&mut data, 0);
        payload_offset += entry.payload.len() as u32;
    }

    for entry in entries {
        data.extend_from_slice(&entry.payload);
    }

    data
}

/// Encode a version 1 name table payload.
pub fn name_table(names: &[(u32, &str)]) -> Vec<u8> {
    let mut data = Vec::new();
    push_u16(&mut data, 1);
    push_u32(&mut data, names.len() as u32);
    for (id, name) in names {
        push_u32(&mut data, *id);
        data.push(name.len() as u8);
        data.extend_from_slice(name.as_bytes());
    }
    data
}

pub fn push_u16(data: &mut Vec<u8>, value: u16) {
    data.extend_from_slice(&value.to_le_bytes());
}

pub fn push_u32(data: &mut Vec<u8>, value: u32) {
    data.extend_from_slice(&value.to_le_bytes());
}
