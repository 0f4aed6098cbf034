use std::{path::Path, str::FromStr};

use anyhow::{bail, Context};
use rsrcscope::{ResType, ResTypeCode, ResourceFork};

/// Load and validate a resource fork from disk.
pub fn load_fork(path: &Path) -> anyhow::Result<ResourceFork<'static>> {
    ResourceFork::from_file(path)
        .with_context(|| format!("failed to load resource fork: {}", path.display()))
}

/// Parse a number given as `0x1A`, `$1A` or decimal.
pub fn parse_number(text: &str) -> anyhow::Result<u32> {
    let text = text.trim();
    let parsed = if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
    {
        u32::from_str_radix(hex, 16)
    } else {
        text.parse::<u32>()
    };
    parsed.with_context(|| format!("invalid number: {text}"))
}

/// Parse a resource type given as a toolbox name (`rPString`) or a number.
pub fn parse_type(text: &str) -> anyhow::Result<ResTypeCode> {
    if let Ok(known) = ResType::from_str(text.trim()) {
        return Ok(known.code());
    }

    let value = parse_number(text)?;
    match ResTypeCode::try_from(value) {
        Ok(code) => Ok(code),
        Err(_) => bail!("resource type out of range: {text}"),
    }
}

/// Human-readable form of a type: toolbox name if known, else `$XXXX`.
pub fn type_label(res_type: ResTypeCode) -> String {
    ResType::from_repr(res_type).map_or_else(|| format!("${res_type:04X}"), |t| t.to_string())
}

/// Name of a resource if its type has a readable name table entry for it.
pub fn resource_name(fork: &ResourceFork, res_type: ResTypeCode, res_id: u32) -> Option<String> {
    fork.resource_name(res_type, res_id)
        .ok()
        .map(|name| String::from_utf8_lossy(name).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number("0x8006").unwrap(), 0x8006);
        assert_eq!(parse_number("$10").unwrap(), 16);
        assert_eq!(parse_number("42").unwrap(), 42);
        assert!(parse_number("0xZZ").is_err());
        assert!(parse_number("").is_err());
    }

    #[test]
    fn types() {
        assert_eq!(parse_type("rPString").unwrap(), 0x8006);
        assert_eq!(parse_type("0xC003").unwrap(), 0xC003);
        assert_eq!(parse_type("1").unwrap(), 1);
        assert!(parse_type("0x10000").is_err());
        assert!(parse_type("rNothing").is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(type_label(0x8014), "rResName");
        assert_eq!(type_label(0x0001), "$0001");
    }
}
