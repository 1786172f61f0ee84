use docfill_core::templates::parser::MarkerError;
use docfill_core::templates::repository::LoadedTemplate;
use docfill_core::templates::{
    RenderContext, TemplateRenderError, UnresolvedPolicy, placeholder_names, render,
    render_string,
};
use rstest::rstest;

fn ctx(pairs: &[(&str, &str)]) -> RenderContext {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[test]
fn render_replaces_known_variables() {
    let tpl = LoadedTemplate::from_string("install.rst", "Install: ${pkg}");
    let out = render(&tpl, &ctx(&[("pkg", "libfoo-dev")]), UnresolvedPolicy::Strict)
        .expect("render ok");
    assert_eq!(out.text, "Install: libfoo-dev");
    assert!(out.is_complete());
}

#[test]
fn render_fails_on_unknown_variables_by_default() {
    let err = render_string("Value: ${x}", &RenderContext::new()).unwrap_err();
    match err {
        TemplateRenderError::UnresolvedPlaceholder { name, .. } => assert_eq!(name, "x"),
        other => panic!("expected UnresolvedPlaceholder, got {other:?}"),
    }
}

#[test]
fn render_unclosed_marker_is_malformed() {
    let err = render_string("${unclosed", &RenderContext::new()).unwrap_err();
    match err {
        TemplateRenderError::MalformedMarker(e) => {
            assert!(matches!(e, MarkerError::Unclosed { .. }));
            assert_eq!(e.name(), Some("unclosed"));
        }
        other => panic!("expected MalformedMarker, got {other:?}"),
    }
}

#[test]
fn unclosed_marker_before_code_braces_names_the_opener() {
    let template = "Install ${dep\n\nint main() { return 0; }\n";
    match render_string(template, &ctx(&[("dep", "gcc")])).unwrap_err() {
        TemplateRenderError::MalformedMarker(MarkerError::Unclosed { name, position }) => {
            assert_eq!(name, "dep");
            assert_eq!((position.line, position.column), (1, 9));
        }
        other => panic!("expected Unclosed, got {other:?}"),
    }
}

#[test]
fn closing_brace_without_opener_is_literal_text() {
    let out = render_string("a } b ${pkg} }", &ctx(&[("pkg", "gcc")])).unwrap();
    assert_eq!(out, "a } b gcc }");
}

#[rstest]
#[case("")]
#[case("plain prose\n")]
#[case("echo $HOME && make -j4")]
#[case("int main() { return 0; }")]
#[case("cost: $5 and } stray")]
fn literal_templates_render_to_themselves(#[case] template: &str) {
    let any = ctx(&[("pkg", "ignored")]);
    assert_eq!(render_string(template, &any).unwrap(), template);
    assert_eq!(render_string(template, &RenderContext::new()).unwrap(), template);
}

#[test]
fn complete_mapping_leaves_no_markers() {
    let template = ".. code-block:: bash\n\n    ${install_cmd} ${packages}\n\n${footer}";
    let mapping = ctx(&[
        ("install_cmd", "sudo apt-get install"),
        ("packages", "python-dev python-numpy"),
        ("footer", "Done."),
    ]);
    let names = placeholder_names(template).unwrap();
    assert!(names.iter().all(|n| mapping.contains_key(n)));

    let out = render_string(template, &mapping).unwrap();
    assert!(!out.contains("${"));
    assert_eq!(
        out,
        ".. code-block:: bash\n\n    sudo apt-get install python-dev python-numpy\n\nDone."
    );
}

#[test]
fn render_is_deterministic() {
    let template = "${a}-${b}-${a}";
    let mapping = ctx(&[("a", "1"), ("b", "2")]);
    let first = render_string(template, &mapping).unwrap();
    for _ in 0..10 {
        assert_eq!(render_string(template, &mapping).unwrap(), first);
    }
}

#[test]
fn values_are_not_rescanned() {
    let out = render_string("${name}", &ctx(&[("name", "${other}"), ("other", "x")])).unwrap();
    assert_eq!(out, "${other}");
}

#[test]
fn lenient_policy_reports_every_missing_name() {
    let tpl = LoadedTemplate::from_string("t", "${a}\n${b}\n${c}");
    let out = render(&tpl, &ctx(&[("b", "B")]), UnresolvedPolicy::Lenient).unwrap();
    assert_eq!(out.text, "\nB\n");
    let missing: Vec<(String, usize)> =
        out.unresolved.into_iter().map(|u| (u.name, u.position.line)).collect();
    assert_eq!(missing, vec![("a".to_string(), 1), ("c".to_string(), 3)]);
}

#[test]
fn concurrent_renders_share_nothing() {
    let template = "Install: ${pkg}";
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let value = format!("lib{i}");
                let mapping = ctx(&[("pkg", value.as_str())]);
                render_string(template, &mapping).unwrap()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), format!("Install: lib{i}"));
    }
}
