//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates. Scenarios
//! describe configuration piecemeal; [`ScenarioConfig`] turns those steps into the TOML the
//! real loader reads.

use repairkit_config::{ConfigResult, ConfigSnapshot, OpenCategoryRegistry};

/// Configuration accumulated by Given steps.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub default_cost: f64,
    pub durability_multiplier: f64,
    pub hand_secs: u64,
    pub all_secs: u64,
    pub economy: bool,
    exceptions: Vec<String>,
    exclusions: Vec<(String, Vec<i32>)>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            default_cost: 10.0,
            durability_multiplier: 0.5,
            hand_secs: 30,
            all_secs: 300,
            economy: false,
            exceptions: Vec::new(),
            exclusions: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    /// Append a cost exception; `name` adds a display-name constraint.
    pub fn add_exception(&mut self, material: &str, name: Option<&str>, cost: f64) {
        let mut entry = format!("[[cost-exceptions]]\nmaterial = \"{material}\"\n");
        if let Some(name) = name {
            entry.push_str(&format!("name = \"{name}\"\n"));
        }
        entry.push_str(&format!("cost = {cost:?}\n"));
        self.exceptions.push(entry);
    }

    pub fn add_exclusion(&mut self, material: &str, variants: Vec<i32>) {
        self.exclusions.push((material.to_string(), variants));
    }

    pub fn to_toml(&self) -> String {
        let mut out = format!(
            "default-cost = {:?}\ndurability-multiplier = {:?}\ncooldown = {{ hand = {}, all = {} }}\n",
            self.default_cost, self.durability_multiplier, self.hand_secs, self.all_secs
        );
        if self.exceptions.is_empty() {
            out.push_str("cost-exceptions = []\n");
        }
        out.push_str(&format!("\n[economy]\nenabled = {}\n", self.economy));
        for entry in &self.exceptions {
            out.push('\n');
            out.push_str(entry);
        }
        for (material, variants) in &self.exclusions {
            let list: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
            out.push_str(&format!(
                "\n[exclude.{material}]\ncustomdata = [{}]\n",
                list.join(", ")
            ));
        }
        out
    }

    pub fn snapshot(&self) -> ConfigResult<ConfigSnapshot> {
        ConfigSnapshot::from_toml_str(&self.to_toml(), &OpenCategoryRegistry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let snapshot = ScenarioConfig::default().snapshot().unwrap();
        assert_eq!(snapshot.default_cost, 10.0);
        assert!(snapshot.cost_exceptions.is_empty());
        assert!(!snapshot.economy_enabled);
    }

    #[test]
    fn exceptions_and_exclusions_keep_order() {
        let mut config = ScenarioConfig::default();
        config.add_exception("DIAMOND_SWORD", None, 5.0);
        config.add_exception("DIAMOND_SWORD", Some("Excalibur"), 500.0);
        config.add_exclusion("DIAMOND_PICKAXE", vec![2001, 2002]);
        config.economy = true;

        let snapshot = config.snapshot().unwrap();
        let costs: Vec<f64> = snapshot.cost_exceptions.iter().map(|e| e.cost).collect();
        assert_eq!(costs, vec![5.0, 500.0]);
        assert_eq!(snapshot.exclusions.len(), 1);
        assert!(snapshot.economy_enabled);
    }
}
