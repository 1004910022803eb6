//! Priority-ordered rule registry.

use crate::Error;

/// A named rule plus the interrupt chains it belongs to.
struct Entry<R: ?Sized> {
    name: String,
    alt: Vec<String>,
    enabled: bool,
    rule: Box<R>,
}

/// Ordered list of named rules.
///
/// Rules run in registration order; the first one that matches claims the
/// position. Besides the main chain, each rule can join named chains through
/// its `alt` list (e.g. `"paragraph"` for rules allowed to interrupt a
/// paragraph), which [`chain`](Self::chain) returns in the same order.
pub struct Ruler<R: ?Sized> {
    entries: Vec<Entry<R>>,
}

impl<R: ?Sized> Default for Ruler<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R: ?Sized> Ruler<R> {
    /// Create an empty ruler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the lowest priority.
    pub fn push(&mut self, name: &str, rule: Box<R>, alt: &[&str]) {
        self.entries.push(entry(name, rule, alt));
    }

    /// Insert a rule immediately before `anchor`.
    pub fn insert_before(
        &mut self,
        anchor: &str,
        name: &str,
        rule: Box<R>,
        alt: &[&str],
    ) -> Result<(), Error> {
        let index = self.position(anchor)?;
        self.entries.insert(index, entry(name, rule, alt));
        Ok(())
    }

    /// Insert a rule immediately after `anchor`.
    pub fn insert_after(
        &mut self,
        anchor: &str,
        name: &str,
        rule: Box<R>,
        alt: &[&str],
    ) -> Result<(), Error> {
        let index = self.position(anchor)?;
        self.entries.insert(index + 1, entry(name, rule, alt));
        Ok(())
    }

    /// Re-enable a previously disabled rule.
    pub fn enable(&mut self, name: &str) -> Result<(), Error> {
        self.set_enabled(name, true)
    }

    /// Keep a rule registered but skip it during dispatch.
    pub fn disable(&mut self, name: &str) -> Result<(), Error> {
        self.set_enabled(name, false)
    }

    fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), Error> {
        let index = self.position(name)?;
        self.entries[index].enabled = enabled;
        Ok(())
    }

    /// Enabled rules of the main chain, in priority order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &R)> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| (e.name.as_str(), &*e.rule))
    }

    /// Enabled rules that joined the chain `chain`, in priority order.
    pub fn chain<'r>(&'r self, chain: &'r str) -> impl Iterator<Item = (&'r str, &'r R)> {
        self.entries
            .iter()
            .filter(move |e| e.enabled && e.alt.iter().any(|a| a == chain))
            .map(|e| (e.name.as_str(), &*e.rule))
    }

    /// Names of all registered rules, enabled or not.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    fn position(&self, name: &str) -> Result<usize, Error> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| Error::UnknownRule(name.to_owned()))
    }
}

fn entry<R: ?Sized>(name: &str, rule: Box<R>, alt: &[&str]) -> Entry<R> {
    Entry {
        name: name.to_owned(),
        alt: alt.iter().map(|&a| a.to_owned()).collect(),
        enabled: true,
        rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ruler() -> Ruler<str> {
        let mut ruler: Ruler<str> = Ruler::new();
        ruler.push("code", "c".into(), &[]);
        ruler.push("fence", "f".into(), &["paragraph"]);
        ruler.push("paragraph", "p".into(), &[]);
        ruler
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut ruler = ruler();
        ruler
            .insert_before("fence", "container", "m".into(), &["paragraph"])
            .unwrap();
        ruler.insert_after("code", "slots", "s".into(), &[]).unwrap();

        let names: Vec<_> = ruler.names().collect();
        assert_eq!(names, vec!["code", "slots", "container", "fence", "paragraph"]);
    }

    #[test]
    fn test_unknown_anchor() {
        let mut ruler = ruler();
        let err = ruler
            .insert_before("table", "x", "x".into(), &[])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownRule(name) if name == "table"));
    }

    #[test]
    fn test_chain_filters_by_alt() {
        let mut ruler = ruler();
        ruler
            .insert_before("fence", "container", "m".into(), &["paragraph", "list"])
            .unwrap();

        let names: Vec<_> = ruler.chain("paragraph").map(|(name, _)| name).collect();
        assert_eq!(names, vec!["container", "fence"]);
        assert_eq!(ruler.chain("list").count(), 1);
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let mut ruler = ruler();
        ruler.disable("fence").unwrap();

        let names: Vec<_> = ruler.rules().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["code", "paragraph"]);
        assert_eq!(ruler.chain("paragraph").count(), 0);

        ruler.enable("fence").unwrap();
        assert_eq!(ruler.chain("paragraph").count(), 1);
    }
}
