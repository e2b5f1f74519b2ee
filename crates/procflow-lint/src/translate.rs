//! Message translation hook.

use std::borrow::Cow;

/// Translates diagnostic messages before they are stored.
///
/// Any `Fn(&str) -> String` is a translator.
pub trait Translate {
    fn translate<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Leaves every message as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Owned(self(text))
    }
}
