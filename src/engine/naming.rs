//! Raceclass naming rules
//!
//! Synthesized raceclasses are named by abbreviating the ageclass label with
//! the configured rules, e.g. `Jenter 15 år` becomes `J15` and
//! `Kvinner senior` becomes `KS` under the default rules.

use crate::config::NamingRule;

/// Derive the raceclass name for an ageclass
pub fn raceclass_name(ageclass: &str, rules: &[NamingRule]) -> String {
    let compact: String = ageclass.chars().filter(|c| !c.is_whitespace()).collect();

    let name = rules
        .iter()
        .filter(|rule| !rule.from.is_empty())
        .fold(compact, |name, rule| name.replace(&rule.from, &rule.to));

    if name.is_empty() {
        ageclass.trim().to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RaceclassesConfig;

    fn name(ageclass: &str) -> String {
        raceclass_name(ageclass, &RaceclassesConfig::default().naming_rules)
    }

    #[test]
    fn test_raceclass_name() {
        assert_eq!(name("Jenter 15 år"), "J15");
        assert_eq!(name("Gutter 12/13 år"), "G12/13");
        assert_eq!(name("J 10 år"), "J10");
        assert_eq!(name("Kvinner senior"), "KS");
        assert_eq!(name("Menn junior"), "MJ");
        assert_eq!(name("Felles"), "F");
        assert_eq!(name("Para"), "P");
        assert_eq!(name("J15"), "J15");
    }

    #[test]
    fn test_name_never_empty() {
        assert_eq!(name(" år "), "år");
    }

    #[test]
    fn test_custom_rules_apply_in_order() {
        let rules = vec![
            NamingRule {
                from: "Jenter".to_string(),
                to: "Girls".to_string(),
            },
            NamingRule {
                from: "Girls".to_string(),
                to: "W".to_string(),
            },
        ];

        assert_eq!(raceclass_name("Jenter 9", &rules), "W9");
        assert_eq!(raceclass_name("Gutter 9", &rules), "Gutter9");
        assert_eq!(raceclass_name("Gutter 9", &[]), "Gutter9");
    }
}
