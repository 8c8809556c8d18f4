//! Template matching for cost exceptions.
//!
//! "Is item A based on template B?" is asymmetric: every field the template sets must be
//! equal on the candidate, while fields the template leaves empty are ignored. Extra detail on
//! the candidate never disqualifies it.

use repairkit_config::CostException;
use repairkit_types::{Item, ItemMeta};
use std::fmt;

/// The first template constraint a candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    Category,
    DisplayName,
    Lore,
    Enchants,
    Variant,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Mismatch::Category => "category differs",
            Mismatch::DisplayName => "display name differs",
            Mismatch::Lore => "lore differs",
            Mismatch::Enchants => "enchantments differ",
            Mismatch::Variant => "variant tag differs",
        };
        f.write_str(text)
    }
}

/// Check `candidate` against `template`, field by field, in a fixed order.
pub fn mismatch(candidate: &Item, template: &Item) -> Option<Mismatch> {
    if candidate.category != template.category {
        return Some(Mismatch::Category);
    }

    let Some(wanted) = template.meta.as_ref() else {
        return None;
    };
    let have = candidate.meta.as_ref();

    if let Some(name) = wanted.display_name()
        && have.and_then(ItemMeta::display_name) != Some(name)
    {
        return Some(Mismatch::DisplayName);
    }

    if wanted.has_lore() && have.map(|m| &m.lore) != Some(&wanted.lore) {
        return Some(Mismatch::Lore);
    }

    if wanted.has_enchants() && have.map(|m| &m.enchants) != Some(&wanted.enchants) {
        return Some(Mismatch::Enchants);
    }

    if let Some(variant) = wanted.variant
        && have.and_then(|m| m.variant) != Some(variant)
    {
        return Some(Mismatch::Variant);
    }

    None
}

pub fn is_based_on(candidate: &Item, template: &Item) -> bool {
    mismatch(candidate, template).is_none()
}

/// The first exception, in load order, whose template the item is based on.
///
/// The item is compared through its normalized copy; the original is never touched.
pub fn first_match<'a>(
    exceptions: &'a [CostException],
    item: &Item,
) -> Option<(usize, &'a CostException)> {
    let candidate = item.normalized();
    exceptions
        .iter()
        .enumerate()
        .find(|(_, exception)| is_based_on(&candidate, &exception.template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn sword() -> Item {
        Item::new("DIAMOND_SWORD").with_max_damage(1561)
    }

    fn named(name: &str) -> ItemMeta {
        ItemMeta {
            display_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn exception(label: &str, template: Item, cost: f64) -> CostException {
        CostException {
            label: label.to_string(),
            template,
            cost,
        }
    }

    #[test]
    fn category_must_match() {
        let bow = Item::new("BOW");
        assert_eq!(mismatch(&sword(), &bow), Some(Mismatch::Category));
    }

    #[test]
    fn metadata_less_template_matches_whole_category() {
        let candidate = sword().with_meta(ItemMeta {
            display_name: Some("Anything".to_string()),
            lore: vec!["x".to_string()],
            enchants: BTreeMap::from([("SHARPNESS".to_string(), 2)]),
            variant: Some(9),
        });
        assert!(is_based_on(&candidate, &sword()));
        assert!(is_based_on(&sword(), &sword()));
    }

    #[test]
    fn template_name_requires_equal_candidate_name() {
        let template = sword().with_meta(named("Excalibur"));
        assert!(is_based_on(&sword().with_meta(named("Excalibur")), &template));
        assert_eq!(
            mismatch(&sword().with_meta(named("Other")), &template),
            Some(Mismatch::DisplayName)
        );
        assert_eq!(mismatch(&sword(), &template), Some(Mismatch::DisplayName));
    }

    #[test]
    fn lore_is_order_sensitive() {
        let template = sword().with_meta(ItemMeta {
            lore: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        });
        let reversed = sword().with_meta(ItemMeta {
            lore: vec!["b".to_string(), "a".to_string()],
            ..Default::default()
        });
        assert_eq!(mismatch(&reversed, &template), Some(Mismatch::Lore));
    }

    #[test]
    fn enchants_must_be_exactly_equal() {
        let template = sword().with_meta(ItemMeta {
            enchants: BTreeMap::from([("SHARPNESS".to_string(), 5)]),
            ..Default::default()
        });
        let extra = sword().with_meta(ItemMeta {
            enchants: BTreeMap::from([
                ("SHARPNESS".to_string(), 5),
                ("UNBREAKING".to_string(), 3),
            ]),
            ..Default::default()
        });
        assert_eq!(mismatch(&extra, &template), Some(Mismatch::Enchants));
    }

    #[test]
    fn variant_requires_candidate_variant() {
        let template = sword().with_meta(ItemMeta {
            variant: Some(1001),
            ..Default::default()
        });
        assert_eq!(mismatch(&sword(), &template), Some(Mismatch::Variant));
        let other = sword().with_meta(ItemMeta {
            variant: Some(1002),
            ..Default::default()
        });
        assert_eq!(mismatch(&other, &template), Some(Mismatch::Variant));
        let same = sword().with_meta(ItemMeta {
            variant: Some(1001),
            ..Default::default()
        });
        assert!(is_based_on(&same, &template));
    }

    #[test]
    fn first_match_wins_over_more_specific_later_template() {
        let exceptions = vec![
            exception("generic", sword(), 5.0),
            exception("excalibur", sword().with_meta(named("Excalibur")), 500.0),
        ];
        let item = sword().with_damage(200).with_meta(named("Excalibur"));

        let (index, matched) = first_match(&exceptions, &item).unwrap();
        assert_eq!(index, 0);
        assert_eq!(matched.label, "generic");
        assert_eq!(item.damage, 200);
    }

    #[test]
    fn first_match_returns_none_without_candidates() {
        let exceptions = vec![exception("bow", Item::new("BOW"), 1.0)];
        assert!(first_match(&exceptions, &sword()).is_none());
    }
}
