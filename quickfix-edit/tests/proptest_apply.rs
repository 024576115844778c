//! Every fix the resolver offers can be applied to the tree it came from.

use proptest::prelude::*;
use quickfix_domain::Resolver;
use quickfix_edit::{apply_fix, preview_patch, source_sha256};
use quickfix_syntax::{SyntaxTree, make};
use quickfix_types::{Diagnostic, DiagnosticKind};

fn sample_tree() -> SyntaxTree {
    SyntaxTree::from_green(&make::file(vec![
        make::class(
            &["abstract"],
            "class",
            "Base",
            vec![
                make::property(&["lateinit"], "val", "name", Some("String?"), Some(make::literal("null"))),
                make::property(&["open"], "var", "count", Some("Int"), None),
                make::function(&["abstract"], "run", vec![], make::block_body(vec![])),
                make::function(&["protected", "override"], "stop", vec![], vec![]),
            ],
        ),
        make::class(
            &[],
            "class",
            "Leaf",
            vec![make::property(&["open", "final"], "val", "id", Some("Long"), None)],
        ),
        make::function(
            &[],
            "main",
            vec![make::parameter(&[], "x", "String?")],
            make::block_body(vec![
                make::property(&[], "val", "y", None, Some(make::call("f", vec![
                    make::named_arg("a", make::literal("1")),
                    make::arg(make::not_null(make::name_ref("x"))),
                    make::spread_arg(make::name_ref("xs")),
                ]))),
                make::property(&[], "val", "z", Some("Int"), Some(make::literal("3"))),
                make::cast(make::name_ref("y"), "String"),
                make::safe_call(make::name_ref("x"), make::name_ref("length")),
                make::when_expr(
                    Some(make::name_ref("y")),
                    vec![
                        make::else_entry(make::literal("0")),
                        make::when_entry(make::literal("1"), make::literal("2")),
                    ],
                ),
                make::annotated(&["Suppress"], " ", Some(make::name_ref("y"))),
                make::annotated_with(
                    vec![make::annotation_with_args("A", vec![make::named_arg("names", make::literal("\"x\""))])],
                    " ",
                    Some(make::name_ref("y")),
                ),
            ]),
        ),
    ]))
    .unwrap()
}

fn diagnostic(kind: DiagnosticKind, anchor: u32) -> Diagnostic {
    serde_json::from_value(serde_json::json!({
        "kind": kind.as_str(),
        "anchor": anchor,
        "missing_cases": ["A", "B"],
        "inherited_visibility": "public",
        "parameter_name": "p",
        "element_type": "String",
        "declaration": anchor,
    }))
    .unwrap()
}

proptest! {
    #[test]
    fn offered_fixes_always_apply(
        kind in prop::sample::select(DiagnosticKind::ALL.to_vec()),
        anchor in 0u32..sample_tree().len() as u32,
    ) {
        let tree = sample_tree();
        let resolver = Resolver::new().unwrap();
        for fix in resolver.resolve_fixes(&tree, &diagnostic(kind, anchor)) {
            let applied = apply_fix(&tree, &fix);
            prop_assert!(applied.is_ok(), "{} failed: {:?}", fix.fix_id, applied);
            let applied = applied.unwrap();
            if applied.is_noop() {
                prop_assert_eq!(&applied.source, tree.source());
            } else {
                prop_assert_ne!(source_sha256(&applied.source), source_sha256(tree.source()));
                let patch = preview_patch("Main.kt", &tree, &fix).unwrap();
                prop_assert!(patch.starts_with("diff --git a/Main.kt b/Main.kt\n"));
            }
        }
    }
}
