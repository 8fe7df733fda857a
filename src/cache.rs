//! Memoization of compiled formats, resolved locales and normalized
//! patterns.
//!
//! All maps are additive-only and instance-owned: dropping the cache drops
//! everything it compiled, which keeps tests hermetic. Lookups take a read
//! lock; misses upgrade to a write lock and re-check, so two threads racing
//! to compile the same key insert structurally identical values and either
//! result is correct.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::format::DateTimeFormat;
use crate::locale::Locale;

/// Shared cache of compiled [`DateTimeFormat`]s and resolved [`Locale`]s.
#[derive(Debug, Default)]
pub struct FormatCache {
    formats: RwLock<HashMap<(String, String), Arc<DateTimeFormat>>>,
    locales: RwLock<HashMap<String, Arc<Locale>>>,
    normalized: RwLock<HashMap<String, String>>,
}

impl FormatCache {
    pub fn new() -> FormatCache {
        FormatCache::default()
    }

    /// Resolves a locale, memoized by the *requested* tag so equivalent
    /// spellings (`en_US`, `en-US`) each hit the map after their first
    /// resolution.
    pub fn locale_for(&self, tag: &str) -> Arc<Locale> {
        if let Some(locale) = self.locales.read().expect("locale cache poisoned").get(tag) {
            return Arc::clone(locale);
        }
        let mut locales = self.locales.write().expect("locale cache poisoned");
        if let Some(locale) = locales.get(tag) {
            return Arc::clone(locale);
        }
        let locale = Arc::new(Locale::resolve(tag));
        locales.insert(tag.to_owned(), Arc::clone(&locale));
        locale
    }

    /// Returns the compiled format for `(pattern, tag)`, compiling on the
    /// first request. The key uses the canonical locale tag, so `en_US` and
    /// `en-US` share one entry per pattern.
    pub fn format_for(&self, pattern: &str, tag: &str) -> Arc<DateTimeFormat> {
        let locale = self.locale_for(tag);
        let key = (locale.tag().to_owned(), pattern.to_owned());

        if let Some(format) = self.formats.read().expect("format cache poisoned").get(&key) {
            return Arc::clone(format);
        }
        let mut formats = self.formats.write().expect("format cache poisoned");
        if let Some(format) = formats.get(&key) {
            return Arc::clone(format);
        }
        let format = Arc::new(DateTimeFormat::new(pattern, locale));
        formats.insert(key, Arc::clone(&format));
        format
    }

    /// Canonicalizes the day and year letters of a pattern to their
    /// uppercase aliases (`ddMMyyyy` becomes `DDMMYYYY`), leaving quoted
    /// runs untouched. Results are cached by the raw input; the empty
    /// pattern passes through without touching the cache.
    pub fn normalized_format(&self, pattern: &str) -> String {
        if pattern.is_empty() {
            return String::new();
        }
        if let Some(normalized) =
            self.normalized.read().expect("normalized cache poisoned").get(pattern)
        {
            return normalized.clone();
        }
        let normalized = normalize(pattern);
        self.normalized
            .write()
            .expect("normalized cache poisoned")
            .entry(pattern.to_owned())
            .or_insert(normalized)
            .clone()
    }
}

fn normalize(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut in_quote = false;
    for c in pattern.chars() {
        match c {
            '\'' => {
                in_quote = !in_quote;
                out.push(c);
            }
            'y' if !in_quote => out.push('Y'),
            'd' if !in_quote => out.push('D'),
            _ => out.push(c),
        }
    }
    out
}

/// Rewrites a pattern for strict parsing: repeated date letters collapse to
/// one canonical letter with a four-digit year, repeated time letters
/// collapse to one, the meridiem token becomes a single `A` preceded by
/// exactly one space, and surplus whitespace disappears.
///
/// ```
/// # use datefmt::strict_mode_format;
/// assert_eq!(strict_mode_format("dd-MM-y hh:mm a"), "D-M-YYYY h:m A");
/// ```
pub fn strict_mode_format(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while chars.get(i + run) == Some(&c) {
            run += 1;
        }

        match c {
            'd' | 'D' => out.push('D'),
            'M' => out.push('M'),
            'y' | 'Y' => out.push_str("YYYY"),
            'E' => out.push('E'),
            'h' | 'H' | 'k' | 'm' | 's' | 'S' => out.push(c),
            'a' | 'A' => {
                // exactly one space between the time and the meridiem
                while out.ends_with(' ') {
                    out.pop();
                }
                out.push_str(" A");
            }
            c if c.is_whitespace() => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            other => out.push(other),
        }
        i += run;
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}
