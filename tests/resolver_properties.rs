//! Property tests for theme resolution.
//!
//! Whatever sequence of preference changes and system changes happens, the
//! root carries exactly one marker and it matches the resolution rule for the
//! current preference and system reading.

use std::rc::Rc;

use proptest::prelude::*;
use themekeeper::{
    ClassList, ManualProbe, MemoryStore, PreferenceStore, ResolverConfig, RootElement, ThemeMode,
    ThemeResolver,
};

#[derive(Debug, Clone)]
enum Step {
    Set(Option<ThemeMode>),
    System(bool),
    External(ThemeMode),
}

fn mode() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![
        Just(ThemeMode::Dark),
        Just(ThemeMode::Light),
        Just(ThemeMode::Auto),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        proptest::option::of(mode()).prop_map(Step::Set),
        any::<bool>().prop_map(Step::System),
        mode().prop_map(Step::External),
    ]
}

fn rendered_dark(root: &RootElement) -> bool {
    let dark = root.contains("dark");
    let light = root.contains("light");
    assert!(dark != light, "expected exactly one marker, got {:?}", root.classes());
    dark
}

proptest! {
    #[test]
    fn manual_preference_ignores_system(manual in prop_oneof![Just(ThemeMode::Dark), Just(ThemeMode::Light)], system in any::<bool>()) {
        let store = Rc::new(MemoryStore::new());
        store.write("theme", manual.as_str()).unwrap();
        let root = Rc::new(RootElement::new());
        let probe = Rc::new(ManualProbe::new(system));
        let resolver = ThemeResolver::new(ResolverConfig::default(), store, probe.clone(), root.clone());
        resolver.start();

        prop_assert_eq!(rendered_dark(&root), manual == ThemeMode::Dark);
        probe.set_dark(!system);
        prop_assert_eq!(rendered_dark(&root), manual == ThemeMode::Dark);
    }

    #[test]
    fn auto_follows_system(system in any::<bool>()) {
        let root = Rc::new(RootElement::new());
        let probe = Rc::new(ManualProbe::new(system));
        let resolver = ThemeResolver::new(ResolverConfig::default(), Rc::new(MemoryStore::new()), probe, root.clone());

        prop_assert_eq!(resolver.preference(), ThemeMode::Auto);
        prop_assert_eq!(rendered_dark(&root), system);
    }

    #[test]
    fn marker_matches_rule_after_any_sequence(initial in any::<bool>(), steps in proptest::collection::vec(step(), 0..40)) {
        let store = Rc::new(MemoryStore::new());
        let other_tab = store.sibling();
        let root = Rc::new(RootElement::new());
        let probe = Rc::new(ManualProbe::new(initial));
        let resolver = ThemeResolver::new(ResolverConfig::default(), store, probe.clone(), root.clone());
        resolver.start();

        let mut system = initial;
        for step in steps {
            match step {
                Step::Set(mode) => resolver.set(mode),
                Step::System(dark) => {
                    system = dark;
                    probe.set_dark(dark);
                }
                Step::External(mode) => other_tab.write("theme", mode.as_str()).unwrap(),
            }

            let expected = resolver.preference().resolve(system).is_dark();
            prop_assert_eq!(rendered_dark(&root), expected);
        }
    }
}
