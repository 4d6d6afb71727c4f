//! JSON Schema for the configuration file.

use crate::config::BentoConfig;

/// Returns the configuration JSON Schema, pretty-printed.
#[must_use]
pub fn print_schema() -> String {
    let schema = schemars::schema_for!(BentoConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_describes_config_sections() {
        let schema: serde_json::Value = serde_json::from_str(&print_schema()).unwrap();
        let properties = &schema["properties"];
        for key in ["desktop", "tiles", "expandPriority", "shuffle", "cellGap"] {
            assert!(properties.get(key).is_some(), "missing {key}");
        }
    }
}
