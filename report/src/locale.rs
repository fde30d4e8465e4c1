//! Locale-aware selection of result messages.
//!
//! A SHACL result may carry its message in several languages. A
//! [`MessagePool`] holds the alternatives of one message and hands out the best
//! one for a requested [`Locale`], removing it from the pool. Selection order:
//!
//! 1. exact locale match (language, region and variant);
//! 2. same language, any region;
//! 3. the untagged default text;
//! 4. the first text with a valid language tag;
//! 5. the first text with a malformed language tag;
//! 6. further untagged texts beyond the first.
//!
//! Selecting repeatedly from one pool therefore visits every alternative
//! exactly once; an empty pool yields no text.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::ReportError;
use crate::model::LocalizedText;

/// A locale identifier: language, optional region and optional variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
    variant: Option<String>,
}

impl Locale {
    /// Parses a locale or language tag such as `en`, `en-GB` or `fr_BE`.
    ///
    /// Both `-` and `_` separate subtags and case is normalized. Returns
    /// `None` for tags that are not valid locale identifiers.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let mut parts = tag.split(['-', '_']);
        let language = parts.next()?;
        if !(2..=3).contains(&language.len()) || !is_alphabetic(language) {
            return None;
        }
        let region = match parts.next() {
            None => None,
            Some(region) if region.len() == 2 && is_alphabetic(region) => {
                Some(region.to_ascii_uppercase())
            }
            Some(region) if region.len() == 3 && region.chars().all(|c| c.is_ascii_digit()) => {
                Some(region.to_string())
            }
            Some(_) => return None,
        };
        let variant: Vec<&str> = parts.collect();
        if variant
            .iter()
            .any(|v| !(1..=8).contains(&v.len()) || !v.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return None;
        }
        Some(Self {
            language: language.to_ascii_lowercase(),
            region,
            variant: (!variant.is_empty()).then(|| variant.join("_")),
        })
    }

    /// The lowercase language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The uppercase region subtag, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

fn is_alphabetic(subtag: &str) -> bool {
    subtag.chars().all(|c| c.is_ascii_alphabetic())
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            region: None,
            variant: None,
        }
    }
}

impl FromStr for Locale {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s).ok_or_else(|| ReportError::InvalidLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(region) = &self.region {
            write!(f, "_{region}")?;
        }
        if let Some(variant) = &self.variant {
            if self.region.is_none() {
                f.write_str("_")?;
            }
            write!(f, "_{variant}")?;
        }
        Ok(())
    }
}

/// The outcome of one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// The chosen text, if the pool was not empty.
    pub selected: Option<LocalizedText>,
    /// What is left in the pool after the selection.
    pub unmatched: Vec<LocalizedText>,
}

/// The alternatives of one message, consumed by selection.
#[derive(Debug, Clone, Default)]
pub struct MessagePool {
    localized: Vec<(Locale, LocalizedText)>,
    invalid: Vec<LocalizedText>,
    default: Option<LocalizedText>,
    overflow: Vec<LocalizedText>,
}

impl MessagePool {
    /// Classifies the alternatives of a message by their language tags.
    ///
    /// The first untagged text becomes the default; any later untagged text
    /// is kept for the last selection tier.
    pub fn new(messages: impl IntoIterator<Item = LocalizedText>) -> Self {
        let mut pool = MessagePool::default();
        for message in messages {
            match message.language.as_deref().filter(|tag| !tag.is_empty()) {
                None if pool.default.is_none() => pool.default = Some(message),
                None => pool.overflow.push(message),
                Some(tag) => match Locale::parse(tag) {
                    Some(locale) => pool.localized.push((locale, message)),
                    None => pool.invalid.push(message),
                },
            }
        }
        pool
    }

    /// Number of alternatives left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.localized.len()
            + self.invalid.len()
            + usize::from(self.default.is_some())
            + self.overflow.len()
    }

    /// Returns true if every alternative has been selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selects the best remaining alternative for `locale` and removes it.
    pub fn select(&mut self, locale: &Locale) -> Translation {
        let selected = self.take_best(locale);
        trace!(
            %locale,
            selected = selected.as_ref().and_then(|s| s.language.as_deref()),
            remaining = self.len(),
            "Selected message translation"
        );
        Translation {
            selected,
            unmatched: self.remaining(),
        }
    }

    /// The alternatives left in the pool: valid tags, malformed tags, then
    /// untagged texts.
    #[must_use]
    pub fn remaining(&self) -> Vec<LocalizedText> {
        self.localized
            .iter()
            .map(|(_, text)| text)
            .chain(&self.invalid)
            .chain(&self.default)
            .chain(&self.overflow)
            .cloned()
            .collect()
    }

    fn take_best(&mut self, locale: &Locale) -> Option<LocalizedText> {
        if let Some(index) = self.localized.iter().position(|(l, _)| l == locale) {
            return Some(self.localized.remove(index).1);
        }
        if let Some(index) = self
            .localized
            .iter()
            .position(|(l, _)| l.language() == locale.language())
        {
            return Some(self.localized.remove(index).1);
        }
        if let Some(default) = self.default.take() {
            return Some(default);
        }
        if !self.localized.is_empty() {
            return Some(self.localized.remove(0).1);
        }
        if !self.invalid.is_empty() {
            return Some(self.invalid.remove(0));
        }
        if !self.overflow.is_empty() {
            return Some(self.overflow.remove(0));
        }
        None
    }
}
