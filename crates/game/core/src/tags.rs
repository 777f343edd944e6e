//! Descriptive tags attached to items and abilities.
//!
//! Tags are identified by their `lid`. A few of them change how an attack
//! flow behaves (limited uses, recharge, self heat); the rest are purely
//! descriptive and only shown on the final card.

/// Well-known tag identifiers.
pub mod lids {
    pub const LIMITED: &str = "tg_limited";
    pub const RECHARGE: &str = "tg_recharge";
    pub const LOADING: &str = "tg_loading";
    pub const HEAT_SELF: &str = "tg_heat_self";
    pub const ACCURATE: &str = "tg_accurate";
    pub const INACCURATE: &str = "tg_inaccurate";
    pub const SEEKING: &str = "tg_seeking";
    pub const SMART: &str = "tg_smart";
}

/// A tag instance, optionally carrying a value (e.g. `Heat 2 (Self)`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub lid: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub val: Option<String>,
}

impl Tag {
    pub fn new(lid: impl Into<String>) -> Self {
        Self {
            lid: lid.into(),
            val: None,
        }
    }

    pub fn with_val(lid: impl Into<String>, val: impl ToString) -> Self {
        Self {
            lid: lid.into(),
            val: Some(val.to_string()),
        }
    }

    #[inline]
    pub fn is(&self, lid: &str) -> bool {
        self.lid == lid
    }

    /// Numeric value of the tag, if it has one.
    pub fn value(&self) -> Option<i32> {
        self.val.as_deref()?.trim().parse().ok()
    }
}

/// Finds the first tag with the given lid.
pub fn find<'a>(tags: &'a [Tag], lid: &str) -> Option<&'a Tag> {
    tags.iter().find(|tag| tag.is(lid))
}

pub fn has(tags: &[Tag], lid: &str) -> bool {
    find(tags, lid).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_parses_numeric_payload() {
        assert_eq!(Tag::with_val(lids::HEAT_SELF, 2).value(), Some(2));
        assert_eq!(Tag::with_val(lids::HEAT_SELF, " 3 ").value(), Some(3));
        assert_eq!(Tag::with_val(lids::HEAT_SELF, "1d3").value(), None);
        assert_eq!(Tag::new(lids::LIMITED).value(), None);
    }

    #[test]
    fn lookup_by_lid() {
        let tags = vec![Tag::new(lids::SMART), Tag::with_val(lids::LIMITED, 2)];
        assert!(has(&tags, lids::SMART));
        assert!(!has(&tags, lids::RECHARGE));
        assert_eq!(find(&tags, lids::LIMITED).and_then(Tag::value), Some(2));
    }
}
