//! Property tests for the write-validation rules.

use std::sync::Arc;

use optdict_core::{
    CollectingSink, ErrorCategory, ErrorKind, OptionSpec, OptionValue, OptionsDictionary,
};
use proptest::prelude::*;

fn bounded(lower: i64, upper: i64) -> OptionsDictionary {
    let mut opts = OptionsDictionary::with_owner("Solver");
    opts.declare(
        OptionSpec::new("n")
            .of_type("int")
            .lower(lower as f64)
            .upper(upper as f64),
    )
    .unwrap();
    opts
}

proptest! {
    /// Writes inside `[lower, upper]` succeed and are read back exactly.
    #[test]
    fn prop_in_bounds_accepted(lower in -1000i64..0, span in 0i64..1000, offset in 0i64..1000) {
        let upper = lower + span;
        let value = lower + offset % (span + 1);
        let mut opts = bounded(lower, upper);

        prop_assert!(opts.set("n", value).is_ok());
        prop_assert_eq!(opts.get_value("n").unwrap(), &OptionValue::Int(value));
    }

    /// Writes outside the bounds fail with a value error and leave the slot untouched.
    #[test]
    fn prop_out_of_bounds_rejected(lower in -1000i64..0, span in 0i64..1000, delta in 1i64..1000, above in any::<bool>()) {
        let upper = lower + span;
        let value = if above { upper + delta } else { lower - delta };
        let mut opts = bounded(lower, upper);
        opts.set("n", lower).unwrap();

        let err = opts.set("n", value).unwrap_err();
        prop_assert_eq!(err.category(), ErrorCategory::Value);
        prop_assert_eq!(opts.get("n"), Some(&OptionValue::Int(lower)));
    }

    /// Members of an enumerated set are accepted; everything else is a value error.
    #[test]
    fn prop_enumerated_membership(allowed in prop::collection::btree_set("[a-z]{1,6}", 1..6), candidate in "[a-z]{1,6}") {
        let mut opts = OptionsDictionary::new();
        opts.declare(OptionSpec::new("mode").values(allowed.iter().map(String::as_str))).unwrap();

        for member in &allowed {
            prop_assert!(opts.set("mode", member.as_str()).is_ok());
        }
        let result = opts.set("mode", candidate.as_str());
        if allowed.contains(&candidate) {
            prop_assert!(result.is_ok());
        } else {
            let is_not_one_of = matches!(result.unwrap_err().kind(), ErrorKind::InvalidValue { .. });
            prop_assert!(is_not_one_of);
        }
    }

    /// A bool-typed option accepts only true and false.
    #[test]
    fn prop_bool_only(n in any::<i64>(), s in ".*") {
        let mut opts = OptionsDictionary::new();
        opts.declare(OptionSpec::new("flag").of_type("bool").default(false)).unwrap();

        prop_assert!(opts.set("flag", true).is_ok());
        prop_assert!(opts.set("flag", n).is_err());
        prop_assert!(opts.set("flag", s).is_err());
        prop_assert!(opts.set("flag", OptionValue::None).is_err());
    }

    /// Read-only dictionaries reject every write and keep stored values.
    #[test]
    fn prop_read_only_rejects(value in any::<i64>()) {
        let mut opts = OptionsDictionary::new().read_only(true);
        opts.declare(OptionSpec::new("set").default(0)).unwrap();
        opts.declare(OptionSpec::new("unset")).unwrap();

        prop_assert_eq!(opts.set("set", value).unwrap_err().category(), ErrorCategory::Key);
        prop_assert_eq!(opts.set("unset", value).unwrap_err().category(), ErrorCategory::Key);
        prop_assert_eq!(opts.get("set"), Some(&OptionValue::Int(0)));
        prop_assert_eq!(opts.get("unset"), None);
    }

    /// However many accesses follow a deprecated declaration, one notice is emitted.
    #[test]
    fn prop_deprecation_notified_once(accesses in prop::collection::vec(any::<bool>(), 1..20)) {
        let sink = CollectingSink::new();
        let mut opts = OptionsDictionary::new().with_sink(Arc::new(sink.clone()));
        opts.declare(OptionSpec::new("old").default(1).deprecation("'old' is deprecated")).unwrap();

        for write in accesses {
            if write {
                opts.set("old", 2).unwrap();
            } else {
                opts.get_value("old").unwrap();
            }
        }
        prop_assert_eq!(sink.len(), 1);
    }
}

#[test]
fn remove_then_read_is_not_declared() {
    let mut opts = OptionsDictionary::new();
    opts.undeclare("ghost");
    let err = opts.get_value("ghost").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Key);
}
