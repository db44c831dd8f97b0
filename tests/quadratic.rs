//! End-to-end exercise of the resolution engine: a quadratic solver whose
//! nodes mix explicit bindings, auto-linked parameters, and a value
//! transform, plus the graph view derived from the same registry.

use arcbound::{
    ArgSet, Binding, DotRenderer, Graph, GraphView, Host, NodeRegistry, NodeSpec, TransformCause,
};
use rstest::rstest;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
enum Val {
    Num(f64),
    Complex { re: f64, im: f64 },
    Tuple(Vec<Val>),
}

impl Val {
    fn num(&self) -> f64 {
        match self {
            Val::Num(n) => *n,
            other => panic!("expected a number, got {other:?}"),
        }
    }
}

#[derive(Debug)]
struct Quadratic {
    a: f64,
    b: f64,
    c: f64,
}

impl Host for Quadratic {
    type Value = Val;

    fn attribute(&self, name: &str) -> Option<Val> {
        match name {
            "a" => Some(Val::Num(self.a)),
            "b" => Some(Val::Num(self.b)),
            "c" => Some(Val::Num(self.c)),
            _ => None,
        }
    }
}

/// Promotes every real root in the tuple to a complex one.
fn complexify(value: Val) -> Result<Val, TransformCause> {
    match value {
        Val::Tuple(roots) => Ok(Val::Tuple(
            roots
                .into_iter()
                .map(|root| match root {
                    Val::Num(re) => Val::Complex { re, im: 0.0 },
                    other => other,
                })
                .collect(),
        )),
        other => Err(format!("expected a tuple of roots, got {other:?}").into()),
    }
}

fn solver_registry() -> Arc<NodeRegistry<Quadratic>> {
    let mut registry = NodeRegistry::new();

    registry
        .register(
            NodeSpec::<Quadratic>::property("discriminant")
                .doc("b^2 - 4ac; decides how many roots exist and whether they are real")
                .params(["a", "b", "c"])
                .bind("a", "a")
                .bind("b", "b")
                .bind("c", "c")
                .build(|_, args| {
                    let a = args.required("a")?.num();
                    let b = args.required("b")?.num();
                    let c = args.required("c")?.num();
                    Ok(Val::Num(b * b - 4.0 * a * c))
                })
                .unwrap(),
        )
        .unwrap();

    registry
        .register(
            NodeSpec::<Quadratic>::property("roots")
                .params(["a", "b", "discriminant"])
                .auto_link()
                .build(|_, args| {
                    let a = args.required("a")?.num();
                    let b = args.required("b")?.num();
                    let disc = args.required("discriminant")?.num();

                    let roots = if disc == 0.0 {
                        vec![Val::Num(-b / (2.0 * a))]
                    } else if disc > 0.0 {
                        vec![
                            Val::Num((-b + disc.sqrt()) / (2.0 * a)),
                            Val::Num((-b - disc.sqrt()) / (2.0 * a)),
                        ]
                    } else {
                        let re = -b / (2.0 * a);
                        let im = (-disc).sqrt() / (2.0 * a);
                        vec![Val::Complex { re, im }, Val::Complex { re, im: -im }]
                    };
                    Ok(Val::Tuple(roots))
                })
                .unwrap(),
        )
        .unwrap();

    registry
        .register(
            NodeSpec::<Quadratic>::property("complex_roots")
                .param("roots")
                .bind_with("roots", Binding::with_transform("roots", complexify))
                .build(|_, args| Ok(args.required("roots")?.clone()))
                .unwrap(),
        )
        .unwrap();

    Arc::new(registry)
}

fn solver(a: f64, b: f64, c: f64) -> Graph<Quadratic> {
    Graph::new(Quadratic { a, b, c }, solver_registry())
}

#[rstest]
#[case(1.0, 4.0, 3.0, 4.0)]
#[case(2.0, 4.0, -2.0, 32.0)]
#[case(1.0, 2.0, 1.0, 0.0)]
#[case(1.0, 0.0, 1.0, -4.0)]
fn test_discriminant_resolves_coefficients(
    #[case] a: f64,
    #[case] b: f64,
    #[case] c: f64,
    #[case] expected: f64,
) {
    let graph = solver(a, b, c);
    assert_eq!(graph.resolve("discriminant").unwrap(), Val::Num(expected));
}

#[test]
fn test_auto_linked_roots_chain_through_discriminant() {
    let graph = solver(1.0, 4.0, 3.0);
    assert_eq!(
        graph.resolve("roots").unwrap(),
        Val::Tuple(vec![Val::Num(-1.0), Val::Num(-3.0)])
    );
}

#[test]
fn test_double_root_yields_a_single_entry() {
    let graph = solver(1.0, 2.0, 1.0);
    assert_eq!(
        graph.resolve("roots").unwrap(),
        Val::Tuple(vec![Val::Num(-1.0)])
    );
}

#[test]
fn test_negative_discriminant_yields_conjugate_pair() {
    let graph = solver(1.0, 0.0, 1.0);
    assert_eq!(
        graph.resolve("roots").unwrap(),
        Val::Tuple(vec![
            Val::Complex { re: 0.0, im: 1.0 },
            Val::Complex { re: 0.0, im: -1.0 },
        ])
    );
}

#[test]
fn test_transform_promotes_real_roots_to_complex() {
    let graph = solver(1.0, 4.0, 3.0);
    assert_eq!(
        graph.resolve("complex_roots").unwrap(),
        Val::Tuple(vec![
            Val::Complex { re: -1.0, im: 0.0 },
            Val::Complex { re: -3.0, im: 0.0 },
        ])
    );
}

#[test]
fn test_node_handle_with_full_override() {
    let graph = solver(1.0, 4.0, 3.0);
    let handle = graph.get_node("discriminant");
    let out = handle
        .call(
            ArgSet::new()
                .with("a", Val::Num(2.0))
                .with("b", Val::Num(4.0))
                .with("c", Val::Num(-2.0)),
        )
        .unwrap();
    assert_eq!(out, Some(Val::Num(32.0)));
}

#[test]
fn test_node_handle_resolves_unsupplied_arguments() {
    let graph = solver(1.0, 4.0, 3.0);
    let handle = graph.get_node("discriminant");
    assert_eq!(handle.call(ArgSet::new()).unwrap(), Some(Val::Num(4.0)));
}

#[test]
fn test_graph_view_reflects_declared_wiring() {
    let registry = solver_registry();
    let view = GraphView::from_registry(&registry);

    let deps = view.deps_by_node();
    assert_eq!(
        deps["discriminant"],
        ["a", "b", "c"].iter().map(|s| s.to_string()).collect()
    );
    assert_eq!(
        deps["roots"],
        ["a", "b", "discriminant"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    );
    assert_eq!(
        deps["complex_roots"],
        ["roots"].iter().map(|s| s.to_string()).collect()
    );

    // Coefficients are nodes of the view even though they are plain
    // attributes, and every edge runs dependency -> dependent.
    assert!(view.nodes().contains("c"));
    assert!(view
        .edges()
        .contains(&("discriminant".to_string(), "roots".to_string())));
}

#[test]
fn test_dot_rendering_of_the_solver_graph() {
    let registry = solver_registry();
    let view = GraphView::from_registry(&registry);
    let renderer = DotRenderer::new(&view, |_| true).unwrap();

    let dot = renderer.render();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("discriminant"));
    assert!(dot.contains("complex_roots"));
}
