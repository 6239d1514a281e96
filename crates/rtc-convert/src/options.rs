//! Options passed explicitly into a conversion.

use std::collections::BTreeMap;

use rtc_core::tag;

/// What a `lookupTable` element becomes, chosen by its id tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupTableKind {
    HydraulicRule,
    FactorRule,
    LookupSignal,
}

/// Maps lookup-table id tags (brackets included) to the component they build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTableRegistry {
    kinds: BTreeMap<String, LookupTableKind>,
}

impl LookupTableRegistry {
    /// A registry without any tag.
    pub fn empty() -> Self {
        Self {
            kinds: BTreeMap::new(),
        }
    }

    /// Register or replace the kind for a tag.
    pub fn insert(&mut self, tag: impl Into<String>, kind: LookupTableKind) {
        self.kinds.insert(tag.into(), kind);
    }

    pub fn get(&self, tag: &str) -> Option<LookupTableKind> {
        self.kinds.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LookupTableKind)> {
        self.kinds.iter().map(|(tag, kind)| (tag.as_str(), *kind))
    }
}

impl Default for LookupTableRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.insert(tag::HYDRAULIC_RULE, LookupTableKind::HydraulicRule);
        registry.insert(tag::FACTOR_RULE, LookupTableKind::FactorRule);
        registry.insert(tag::LOOKUP_SIGNAL, LookupTableKind::LookupSignal);
        registry
    }
}

/// Which expression trees become components of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpressionEmission {
    /// Every expression element yields a tree.
    #[default]
    All,
    /// An expression used by exactly one other expression only lives on
    /// inside its parent's tree, unless a rule or condition reads it as an
    /// input.
    RootsOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverterOptions {
    pub expression_emission: ExpressionEmission,
    pub lookup_tables: LookupTableRegistry,
}
