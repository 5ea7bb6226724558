//! Filter fragments - `#guard-arts_fighter` style links into the operator list

use super::catalog::Catalog;
use super::operator::{Profession, SubProfessionId};
use regex::Regex;
use std::sync::LazyLock;

/// `#class` or `#class-branch_words`, leading `#` optional
static FRAGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([^-]*?)(?:-(.*?))?$").unwrap()
});

/// Capitalize the first letter of each whitespace-separated word
pub fn to_title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A filter selection decoded from a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFilter {
    pub profession: Profession,
    pub sub_profession_id: Option<SubProfessionId>,
}

/// Decode `#<class>[-<branch_words>]`. Branch words are joined by `_`.
///
/// Returns None when the class is unknown. An unknown branch resolves to
/// the class alone.
pub fn parse_filter_fragment(fragment: &str, catalog: &Catalog) -> Option<FragmentFilter> {
    let caps = FRAGMENT_REGEX.captures(fragment.trim())?;
    let class_name = to_title_case(caps.get(1).map_or("", |m| m.as_str()));
    let profession = Profession::from_class_name(&class_name)?;

    let sub_profession_id = caps
        .get(2)
        .map(|m| to_title_case(&m.as_str().replace('_', " ")))
        .filter(|name| !name.is_empty())
        .and_then(|name| catalog.branch_by_name(&name))
        .filter(|branch| branch.class == profession)
        .map(|branch| branch.sub_profession_id.clone());

    Some(FragmentFilter {
        profession,
        sub_profession_id,
    })
}

/// Encode the current selection back into a fragment
pub fn filter_fragment(
    profession: Option<Profession>,
    sub_profession_id: Option<&SubProfessionId>,
    catalog: &Catalog,
) -> Option<String> {
    let profession = profession?;
    let mut fragment = format!("#{}", profession.class_name().to_lowercase());
    if let Some(branch) = sub_profession_id.and_then(|id| catalog.branch(id)) {
        fragment.push('-');
        fragment.push_str(&branch.name.to_lowercase().replace(' ', "_"));
    }
    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::sample_catalog;

    #[test]
    fn test_to_title_case() {
        assert_eq!(to_title_case("arts fighter"), "Arts Fighter");
        assert_eq!(to_title_case("GUARD"), "Guard");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn test_parse_class_and_branch() {
        let catalog = sample_catalog();
        let parsed = parse_filter_fragment("#guard-arts_fighter", &catalog).unwrap();
        assert_eq!(parsed.profession, Profession::Warrior);
        assert_eq!(parsed.sub_profession_id, Some(SubProfessionId::new("artsfghter")));
    }

    #[test]
    fn test_parse_class_only_and_without_hash() {
        let catalog = sample_catalog();
        let parsed = parse_filter_fragment("medic", &catalog).unwrap();
        assert_eq!(parsed.profession, Profession::Medic);
        assert_eq!(parsed.sub_profession_id, None);
    }

    #[test]
    fn test_branch_of_other_class_is_ignored() {
        let catalog = sample_catalog();
        let parsed = parse_filter_fragment("#medic-centurion", &catalog).unwrap();
        assert_eq!(parsed.profession, Profession::Medic);
        assert_eq!(parsed.sub_profession_id, None);
    }

    #[test]
    fn test_unknown_class_is_rejected() {
        let catalog = sample_catalog();
        assert_eq!(parse_filter_fragment("#warlock-fire", &catalog), None);
        assert_eq!(parse_filter_fragment("", &catalog), None);
    }

    #[test]
    fn test_fragment_encodes_current_filter() {
        let catalog = sample_catalog();
        let branch = SubProfessionId::new("artsfghter");
        assert_eq!(
            filter_fragment(Some(Profession::Warrior), Some(&branch), &catalog).as_deref(),
            Some("#guard-arts_fighter")
        );
        assert_eq!(filter_fragment(None, None, &catalog), None);
    }
}
