//! Marker classes on a shared root element.
//!
//! Styling rules select the active palette (and device layout) by looking at
//! class names on the document root. [`ClassList`] is the seam: a host can
//! implement it over a real DOM, while [`RootElement`] keeps the classes in
//! memory.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// The set of classes on a root element.
///
/// `add` and `remove` must be idempotent.
pub trait ClassList {
    fn add(&self, class: &str);

    fn remove(&self, class: &str);

    fn contains(&self, class: &str) -> bool;

    /// Swaps `from` for `to`.
    ///
    /// Implementations that can do so should make the swap atomic; the
    /// default adds `to` before removing `from`.
    fn replace(&self, from: &str, to: &str) {
        self.add(to);
        if from != to {
            self.remove(from);
        }
    }
}

/// An in-memory root element.
///
/// ```rust
/// use themekeeper::{ClassList, RootElement};
///
/// let root = RootElement::new();
/// root.add("light");
/// root.replace("light", "dark");
/// assert_eq!(root.classes(), vec!["dark".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct RootElement {
    classes: RefCell<BTreeSet<String>>,
}

impl RootElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// All classes currently present, sorted.
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }
}

impl ClassList for RootElement {
    fn add(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn contains(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn replace(&self, from: &str, to: &str) {
        let mut classes = self.classes.borrow_mut();
        classes.remove(from);
        classes.insert(to.to_string());
    }
}

impl fmt::Display for RootElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classes = self.classes();
        write!(f, "<html class=\"{}\">", classes.join(" "))
    }
}

/// Handle for one named class on a root element.
#[derive(Clone)]
pub struct HtmlClass {
    name: String,
    root: Rc<dyn ClassList>,
}

impl HtmlClass {
    pub fn new(name: impl Into<String>, root: Rc<dyn ClassList>) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&self) {
        self.root.add(&self.name);
    }

    pub fn remove(&self) {
        self.root.remove(&self.name);
    }

    /// Flips the class, or forces it on/off when `force` is given.
    pub fn toggle(&self, force: Option<bool>) {
        match force {
            Some(true) => self.add(),
            Some(false) => self.remove(),
            None if self.is_present() => self.remove(),
            None => self.add(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.root.contains(&self.name)
    }

    /// Makes this class present and `other` absent in one step.
    ///
    /// Both handles must refer to the same root.
    pub fn take_over(&self, other: &HtmlClass) {
        self.root.replace(&other.name, &self.name);
    }
}

impl fmt::Debug for HtmlClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlClass")
            .field("name", &self.name)
            .field("present", &self.is_present())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove_idempotent() {
        let root = RootElement::new();
        root.add("dark");
        root.add("dark");
        assert_eq!(root.classes(), vec!["dark".to_string()]);

        root.remove("dark");
        root.remove("dark");
        assert!(root.classes().is_empty());
    }

    #[test]
    fn test_replace_when_from_absent() {
        let root = RootElement::new();
        root.replace("light", "dark");
        assert!(root.contains("dark"));
        assert!(!root.contains("light"));
    }

    #[test]
    fn test_replace_with_itself() {
        let root = RootElement::new();
        root.add("dark");
        root.replace("dark", "dark");
        assert!(root.contains("dark"));
    }

    #[test]
    fn test_html_class_toggle() {
        let root = Rc::new(RootElement::new());
        let mobile = HtmlClass::new("mobile", root.clone());

        mobile.toggle(None);
        assert!(mobile.is_present());
        mobile.toggle(None);
        assert!(!mobile.is_present());

        mobile.toggle(Some(true));
        mobile.toggle(Some(true));
        assert!(root.contains("mobile"));
        mobile.toggle(Some(false));
        assert!(!root.contains("mobile"));
    }

    #[test]
    fn test_take_over() {
        let root = Rc::new(RootElement::new());
        root.add("other");
        let dark = HtmlClass::new("dark", root.clone());
        let light = HtmlClass::new("light", root.clone());

        light.add();
        dark.take_over(&light);
        assert_eq!(root.classes(), vec!["dark".to_string(), "other".to_string()]);
    }

    struct LoggingList {
        ops: RefCell<Vec<String>>,
    }

    impl ClassList for LoggingList {
        fn add(&self, class: &str) {
            self.ops.borrow_mut().push(format!("+{}", class));
        }
        fn remove(&self, class: &str) {
            self.ops.borrow_mut().push(format!("-{}", class));
        }
        fn contains(&self, _class: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_default_replace_adds_before_removing() {
        let list = LoggingList {
            ops: RefCell::new(Vec::new()),
        };
        list.replace("light", "dark");
        assert_eq!(*list.ops.borrow(), vec!["+dark", "-light"]);
    }

    #[test]
    fn test_display() {
        let root = RootElement::new();
        root.add("light");
        root.add("desktop");
        assert_eq!(root.to_string(), "<html class=\"desktop light\">");
    }
}
