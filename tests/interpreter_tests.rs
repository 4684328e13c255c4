//! End-to-end command scenarios against a fresh registry
use geocalc::{CommandError, GeometryError, Outcome, Rational, Registry, Value, run_command};

fn run(registry: &mut Registry, input: &str) -> Outcome {
    run_command(input, registry).unwrap_or_else(|e| panic!("'{input}' failed: {e}"))
}

fn number(registry: &mut Registry, input: &str) -> f64 {
    match run(registry, input) {
        Outcome::Value(value) => value.as_number().expect("numeric result"),
        other => panic!("'{input}' gave {other:?}"),
    }
}

#[test]
fn test_distance_between_points() {
    let mut registry = Registry::new();
    run(&mut registry, "point A is (0, 0)");
    run(&mut registry, "point B is (3, 4)");
    assert_eq!(number(&mut registry, "distance between A and B"), 5.0);
    assert_eq!(number(&mut registry, "distance B and A"), 5.0);
}

#[test]
fn test_slope_of_line_through_points() {
    let mut registry = Registry::new();
    run(&mut registry, "point A is (0, 0)");
    run(&mut registry, "point B is (3, 4)");
    assert_eq!(run(&mut registry, "line L is .from_points(A, B)"), Outcome::Confirmed);

    let Outcome::Value(slope) = run(&mut registry, "slope L") else {
        panic!("Expected a value");
    };
    assert_eq!(slope, Value::Exact(Rational::new(4, 3)));
    assert_eq!(slope.to_string(), "4/3");
}

#[test]
fn test_equation_coefficients() {
    let mut registry = Registry::new();
    run(&mut registry, "line L is x + y - 1 = 0");
    run(&mut registry, "line M is 2x - 3y + 6 = 0");
    run(&mut registry, "line H is 0.5x + 0.25y - 1 = 0");

    assert_eq!(registry.line("L").unwrap().coefficients(), (1, 1, -1));
    assert_eq!(registry.line("M").unwrap().coefficients(), (2, -3, 6));
    assert_eq!(registry.line("H").unwrap().coefficients(), (2, 1, -4));
}

#[test]
fn test_unknown_command_leaves_registry_untouched() {
    let mut registry = Registry::new();
    run(&mut registry, "point A is (1, 1)");

    let err = run_command("foo bar", &mut registry).unwrap_err();
    assert_eq!(err, CommandError::UnknownCommand("foo".to_string()));
    assert_eq!(registry.point_count(), 1);
    assert_eq!(registry.line_count(), 0);
}

#[test]
fn test_clear_forgets_names() {
    let mut registry = Registry::new();
    run(&mut registry, "point A is (1, 1)");
    run(&mut registry, "line L is x - y = 0");
    run(&mut registry, "clear");

    assert!(matches!(
        run_command("whats A", &mut registry),
        Err(CommandError::UndefinedName(name)) if name == "A"
    ));
    assert!(matches!(
        run_command("slope L", &mut registry),
        Err(CommandError::UndefinedName(_))
    ));
}

#[test]
fn test_angles() {
    let mut registry = Registry::new();
    run(&mut registry, "line L is x - y = 0");
    run(&mut registry, "line M is x + y - 2 = 0");
    run(&mut registry, "line N is 2x - 2y + 5 = 0");
    run(&mut registry, "line V is x - 1 = 0");
    run(&mut registry, "line H is y + 3 = 0");

    assert_eq!(number(&mut registry, "angle between L and M"), 90.0);
    assert_eq!(number(&mut registry, "angle between L and N"), 0.0);
    assert_eq!(number(&mut registry, "angle between V and H"), 90.0);
    assert!((number(&mut registry, "angle between L and H").abs() - 45.0).abs() < 1e-9);
}

#[test]
fn test_parallel_line_distance() {
    let mut registry = Registry::new();
    run(&mut registry, "line L is y - 1 = 0");
    run(&mut registry, "line M is 2y + 4 = 0");
    run(&mut registry, "line K is x + y = 0");

    assert!((number(&mut registry, "distance L and M") - 3.0).abs() < 1e-12);
    assert_eq!(
        run_command("distance L and K", &mut registry),
        Err(CommandError::Geometry(GeometryError::NonParallelLines))
    );
}

#[test]
fn test_point_to_line_distance_and_membership() {
    let mut registry = Registry::new();
    run(&mut registry, "line L is 3x + 4y - 10 = 0");
    run(&mut registry, "point P is (2, 1)");
    run(&mut registry, "point O is (0, 0)");

    assert_eq!(number(&mut registry, "distance P and L"), 0.0);
    assert_eq!(number(&mut registry, "distance L and O"), 2.0);
    assert_eq!(
        run(&mut registry, "whats P.is_on_line(L)"),
        Outcome::Value(Value::Bool(true))
    );
}

#[test]
fn test_perpendicular_on() {
    let mut registry = Registry::new();
    run(&mut registry, "line L is x - 2y + 1 = 0");
    run(&mut registry, "point P is (1, 1)");

    let Outcome::Value(Value::Line(perpendicular)) = run(&mut registry, "perpendicular-on L through P")
    else {
        panic!("Expected a line");
    };
    assert_eq!(perpendicular.slope(), Some(Rational::from_integer(-2)));
    assert!(registry.line_count() == 1, "result is not registered");

    run(&mut registry, "line K is L.perpendicular(P)");
    assert_eq!(registry.line("K"), Some(&perpendicular));
}

#[test]
fn test_vertical_slope_is_an_error() {
    let mut registry = Registry::new();
    run(&mut registry, "line V is x - 4 = 0");
    assert_eq!(
        run_command("slope V", &mut registry),
        Err(CommandError::Geometry(GeometryError::VerticalSlope))
    );
}

#[test]
fn test_factories() {
    let mut registry = Registry::new();
    run(&mut registry, "point P is 2, 3");
    run(&mut registry, "line A is .from_slope(2, P)");
    run(&mut registry, "line B is .from_y_intercept(-1, 2)");
    run(&mut registry, "line C is .from_intercepts(2, 4)");
    run(&mut registry, "line D is .from_x_intercept(0.5, 2)");

    assert_eq!(registry.line("A").unwrap().coefficients(), (2, -1, -1));
    assert_eq!(registry.line("A"), registry.line("B"));
    assert_eq!(registry.line("C").unwrap().coefficients(), (2, 1, -4));
    assert_eq!(registry.line("D"), registry.line("A"));
}

#[test]
fn test_redefinition_switches_kind() {
    let mut registry = Registry::new();
    run(&mut registry, "point X is (0, 0)");
    run(&mut registry, "line X is x = 0");

    assert!(registry.point("X").is_none());
    assert!(registry.line("X").unwrap().is_vertical());
}

#[test]
fn test_invalid_definitions() {
    let mut registry = Registry::new();
    assert!(matches!(
        run_command("point and is (1, 1)", &mut registry),
        Err(CommandError::Arity { .. }) | Err(CommandError::InvalidName(_))
    ));
    assert!(matches!(
        run_command("point 1P is (1, 1)", &mut registry),
        Err(CommandError::InvalidName(_))
    ));
    assert!(matches!(
        run_command("line L is x + y", &mut registry),
        Err(CommandError::TypeMismatch { .. }) | Err(CommandError::UndefinedName(_))
    ));
    assert!(matches!(
        run_command("line L is 2x = 4", &mut registry),
        Err(CommandError::Parse(_))
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_whats_arithmetic() {
    let mut registry = Registry::new();
    run(&mut registry, "point B is (3, 4)");
    assert_eq!(number(&mut registry, "whats 2 ** 10"), 1024.0);
    assert_eq!(number(&mut registry, "whats sqrt(B.x * B.x + B.y * B.y)"), 5.0);
    assert_eq!(
        run_command("whats 1 / 0", &mut registry),
        Err(CommandError::Geometry(GeometryError::DivisionByZero))
    );
    assert!(matches!(
        run_command("whats __import__(1)", &mut registry),
        Err(CommandError::UnknownFunction(name)) if name == "__import__"
    ));
}

#[test]
fn test_show_lists_in_definition_order() {
    let mut registry = Registry::new();
    run(&mut registry, "point B is (1, 2)");
    run(&mut registry, "point A is (3, 4)");

    let Outcome::Tables(tables) = run(&mut registry, "points") else {
        panic!("Expected tables");
    };
    let names: Vec<&str> = tables[0].rows.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
}
