use simplefmt::{CompileError, Config, ResolutionErrorKind};
use std::{collections::HashMap, env, fs, path::PathBuf};

fn fixture(name: &str) -> Vec<String> {
    let path = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
        .join("tests")
        .join(format!("{}.sfl", name));
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

fn view_table() -> HashMap<&'static str, &'static str> {
    ["v", "superview", "label", "button", "icon"]
        .into_iter()
        .map(|name| (name, name))
        .collect()
}

fn metric_table() -> HashMap<&'static str, f64> {
    HashMap::from([
        ("pad", 20.0),
        ("gap", 8.0),
        ("ratio", 0.5),
        ("minWidth", 44.0),
        ("high", 750.0),
        ("low", 250.0),
    ])
}

macro_rules! define_tests {
    ($($name:ident),*$(,)?) => {$(
        #[test]
        fn $name() {
            let formats = fixture(stringify!($name));
            let views = view_table();
            let constraints = simplefmt::compile_all(&formats, &metric_table(), &views).unwrap();
            assert_eq!(constraints.len(), formats.len());

            // the canonical rendering compiles back to the same descriptor.
            for constraint in &constraints {
                let rendered = constraint.to_string();
                let recompiled = simplefmt::compile(&rendered, &metric_table(), &views).unwrap();
                assert_eq!(&recompiled, constraint, "{}", rendered);
            }
        }
    )*};
}

define_tests! {
    centering,
    stack,
    metrics,
    priorities,
}

#[test]
fn invalid() {
    let formats = fixture("invalid");
    let views = view_table();
    let errors = Config::new().check_all(&formats, &metric_table(), &views);
    assert_eq!(errors.len(), formats.len());
    for (i, err) in errors.iter().enumerate() {
        assert_eq!(err.index, i);
    }

    let kinds: Vec<_> = errors
        .iter()
        .map(|err| match &err.source {
            CompileError::Lex(..) => "lex",
            CompileError::Syntax(..) => "syntax",
            CompileError::Resolution(err) => match err.kind {
                ResolutionErrorKind::UnknownView => "view",
                ResolutionErrorKind::UnknownAttribute => "attribute",
                ResolutionErrorKind::UnknownMetric => "metric",
                ResolutionErrorKind::InvalidPriority => "priority",
                ResolutionErrorKind::ZeroMultiplier => "zero",
                ResolutionErrorKind::NonFiniteValue => "non-finite",
            },
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "lex",
            "syntax",
            "attribute",
            "view",
            "metric",
            "priority",
            "zero",
            "non-finite"
        ]
    );

    let err = simplefmt::compile_all(&formats, &metric_table(), &views).unwrap_err();
    assert_eq!(err.index, 0);
}

#[test]
fn metric_values_land_in_their_slots() {
    let formats = fixture("metrics");
    let views = view_table();
    let constraints = simplefmt::compile_all(&formats, &metric_table(), &views).unwrap();

    assert_eq!(constraints[0].multiplier, 0.5);
    assert_eq!(constraints[1].constant, 44.0);
    assert_eq!((constraints[2].constant, constraints[2].priority), (20.0, 750.0));
    assert_eq!((constraints[3].constant, constraints[3].priority), (-8.0, 250.0));
    assert_eq!((constraints[4].multiplier, constraints[4].constant), (0.5, -20.0));
}
