//! End-to-end tagging and selection scenarios.
//!
//! Modules go through the loader into a registry, a rendered tree is written
//! out with the markers the transformed components would render, and
//! selectors are resolved against it.

#[cfg(test)]
mod tests {
    use crate::{
        derive_marker, BuildEnv, Classification, ComponentKind, ComponentRef, IdentityRegistry,
        ModuleLoader, RegistryError, RenderedTree, SelectError, SkipReason, TransformOptions,
        DIAG_ATTRIBUTE_CONFLICT, DIAG_NO_TAGGABLE_ROOT, DIAG_PARSE_FAILED,
    };
    use crate::inject::transform_module;

    const ALL_KINDS: &str = r#"import React, { Component } from "react";
import { connect } from "react-redux";

export function Header({ title }) {
  return <h1 className="title">{title}</h1>;
}

export const Card = (props) => <div {...props} />;

class Panel extends Component {
  render() {
    return <section>{this.props.children}</section>;
  }
}

const Connected = connect(mapState)(Header);

export default function () {
  return <main />;
}

export { Panel };
"#;

    fn attr(marker: &str) -> String {
        format!("data-component-marker=\"{}\"", marker)
    }

    fn load(
        loader: &mut ModuleLoader,
        registry: &mut IdentityRegistry,
        path: &str,
        source: &str,
        binding: &str,
    ) -> ComponentRef {
        loader
            .load(registry, path, source)
            .unwrap()
            .component(binding)
            .unwrap()
    }

    fn marker(registry: &IdentityRegistry, component: &ComponentRef) -> String {
        registry.lookup(component).unwrap().to_string()
    }

    #[test]
    fn test_every_kind_tagged_exactly_once() {
        let output = transform_module(ALL_KINDS, "src/kinds.jsx", &TransformOptions::default());
        let kinds: Vec<(&str, ComponentKind)> = output
            .classification
            .components()
            .map(|c| (c.binding.as_str(), c.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("Header", ComponentKind::FunctionDeclaration),
                ("Card", ComponentKind::ArrowFunctionComponent),
                ("Panel", ComponentKind::ClassComponent),
                ("Connected", ComponentKind::ComposedComponent),
                ("__markedDefault", ComponentKind::DefaultExportAnonymous),
            ]
        );

        for binding in ["Header", "Card", "Panel", "__markedDefault"] {
            let m = derive_marker("src/kinds.jsx", binding);
            assert_eq!(output.code.matches(&attr(&m)).count(), 1, "{}", binding);
        }
        let connected = derive_marker("src/kinds.jsx", "Connected");
        assert_eq!(
            output
                .code
                .matches(&format!("connect(mapState)(__markComponent(Header, \"{}\"))", connected))
                .count(),
            1
        );

        for assignment in &output.assignments {
            let call = format!("__registerMarker({}, \"{}\");", assignment.binding, assignment.marker);
            assert_eq!(output.code.matches(&call).count(), 1);
        }
        assert!(output.code.contains("export default function __markedDefault() {"));
        assert!(output.code.contains(
            "import { registerMarker as __registerMarker, markComponent as __markComponent } from \"component-locator/runtime\";"
        ));
    }

    #[test]
    fn test_markers_are_stable_across_reloads() {
        let mut registry = IdentityRegistry::new();
        let mut loader = ModuleLoader::default();
        let header = load(&mut loader, &mut registry, "src/kinds.jsx", ALL_KINDS, "Header");
        let first = marker(&registry, &header);
        let count = registry.len();

        loader.reload(&mut registry, "src/kinds.jsx", ALL_KINDS).unwrap();
        let mut other = ModuleLoader::default();
        other.load(&mut registry, "src/kinds.jsx", ALL_KINDS).unwrap();

        assert_eq!(marker(&registry, &header), first);
        assert_eq!(registry.len(), count);
        assert_eq!(
            transform_module(ALL_KINDS, "src/kinds.jsx", &TransformOptions::default()).code,
            loader.get("src/kinds.jsx").unwrap().code()
        );
    }

    #[test]
    fn test_selector_honors_nesting_order() {
        let mut registry = IdentityRegistry::new();
        let mut loader = ModuleLoader::default();
        let a = load(&mut loader, &mut registry, "src/A.jsx", "export const A = ({ children }) => <div>{children}</div>;", "A");
        let b = load(&mut loader, &mut registry, "src/B.jsx", "export const B = ({ children }) => <div>{children}</div>;", "B");
        let c = load(&mut loader, &mut registry, "src/C.jsx", "export const C = ({ children }) => <div>{children}</div>;", "C");
        let d = load(&mut loader, &mut registry, "src/D.jsx", "export const D = () => <span>leaf</span>;", "D");

        let html = format!(
            "<div {}><div {}><div {}><span {}>leaf</span></div></div></div>",
            attr(&marker(&registry, &a)),
            attr(&marker(&registry, &b)),
            attr(&marker(&registry, &c)),
            attr(&marker(&registry, &d)),
        );
        let tree = RenderedTree::parse(&html);
        let root = tree.root();

        assert_eq!(crate::select!(registry; a, b, c, d).unwrap().count(&root), 1);
        assert_eq!(crate::select!(registry; a, d).unwrap().count(&root), 1);
        assert_eq!(crate::select!(registry; d, c, b, a).unwrap().count(&root), 0);
        assert_eq!(crate::select!(registry; b, a, c, d).unwrap().count(&root), 0);
    }

    #[test]
    fn test_sibling_instances_share_a_marker() {
        let mut registry = IdentityRegistry::new();
        let mut loader = ModuleLoader::default();
        let source = "export const Item = ({ label }) => <li>{label}</li>;\n\
                      export const List = ({ items }) => <ul>{items.map((i) => <Item label={i} />)}</ul>;\n";
        let item = load(&mut loader, &mut registry, "src/List.jsx", source, "Item");
        let list = loader.get("src/List.jsx").unwrap().component("List").unwrap();

        let item_marker = marker(&registry, &item);
        let html = format!(
            "<ul {list}><li {item}>a</li><li {item}>b</li></ul><ol><li {item}>c</li></ol>",
            list = attr(&marker(&registry, &list)),
            item = attr(&item_marker),
        );
        let tree = RenderedTree::parse(&html);
        let root = tree.root();

        assert_eq!(crate::select!(registry; list, item).unwrap().count(&root), 2);
        assert_eq!(crate::select!(registry; item).unwrap().count(&root), 3);
        let code = loader.get("src/List.jsx").unwrap().code();
        assert_eq!(code.matches(&attr(&item_marker)).count(), 1);
    }

    #[test]
    fn test_composed_marker_is_an_extra_token() {
        let mut registry = IdentityRegistry::new();
        let mut loader = ModuleLoader::default();
        let header = load(
            &mut loader,
            &mut registry,
            "src/Header.jsx",
            "export default function Header() { return <header />; }",
            "Header",
        );
        let connected = load(
            &mut loader,
            &mut registry,
            "src/Connected.jsx",
            "import { connect } from \"react-redux\";\nimport Header from \"./Header\";\nexport const Connected = connect(mapState)(Header);\n",
            "Connected",
        );

        let html = format!(
            "<main><header data-component-marker=\"{} {}\"></header></main>",
            marker(&registry, &header),
            marker(&registry, &connected),
        );
        let tree = RenderedTree::parse(&html);
        let root = tree.root();

        assert_eq!(crate::select!(registry; connected).unwrap().count(&root), 1);
        assert_eq!(crate::select!(registry; header).unwrap().count(&root), 1);
    }

    #[test]
    fn test_author_attributes_preserved() {
        let source = "export const Button = ({ onClick, ...rest }) => (\n  <button className=\"btn\" id=\"go\" {...rest} onClick={onClick}>\n    Go\n  </button>\n);\n";
        let output = transform_module(source, "src/Button.jsx", &TransformOptions::default());
        let m = derive_marker("src/Button.jsx", "Button");

        let expected = format!(
            "export const Button = ({{ onClick, ...rest }}) => (\n  <button className=\"btn\" id=\"go\" {{...rest}} onClick={{onClick}} {}>\n    Go\n  </button>\n);\n",
            attr(&m)
        );
        assert!(output.code.starts_with(&expected));
    }

    #[test]
    fn test_grouping_fragment_left_as_authored() {
        let source = "export const Pair = () => (<>\n  <dt>a</dt>\n  <dd>b</dd>\n</>);\n";
        let output = transform_module(source, "src/Pair.jsx", &TransformOptions::default());

        assert!(!output.changed);
        assert_eq!(output.code, source);
        assert!(matches!(
            output.classification.get("Pair"),
            Some(Classification::Unsupported(skip)) if skip.reason == SkipReason::NoTaggableRoot
        ));
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].code, DIAG_NO_TAGGABLE_ROOT);
        assert!(!output.diagnostics[0].is_warning());
    }

    #[test]
    fn test_single_child_fragment_tags_the_child() {
        let source = "export const Solo = () => (<React.Fragment>\n  <article />\n</React.Fragment>);\n";
        let output = transform_module(source, "src/Solo.jsx", &TransformOptions::default());
        let m = derive_marker("src/Solo.jsx", "Solo");

        assert!(output.code.contains(&format!("<React.Fragment>\n  <article {} />", attr(&m))));
        assert_eq!(output.code.matches("data-component-marker=").count(), 1);
    }

    #[test]
    fn test_disabled_tagging_registers_nothing() {
        let mut registry = IdentityRegistry::new();
        let mut loader = ModuleLoader::new(TransformOptions::for_env(BuildEnv::Production));
        let header = load(&mut loader, &mut registry, "src/kinds.jsx", ALL_KINDS, "Header");

        assert_eq!(loader.get("src/kinds.jsx").unwrap().code(), ALL_KINDS);
        assert!(registry.is_empty());
        assert_eq!(
            crate::select!(registry; header).unwrap_err(),
            SelectError::Unresolved {
                component: header,
                position: 0
            }
        );
    }

    #[test]
    fn test_export_names_resolve_to_one_reference() {
        let mut registry = IdentityRegistry::new();
        let mut loader = ModuleLoader::default();
        let source = "function Foo() { return <div />; }\nexport { Foo as Bar };\nexport default Foo;\n";
        let module = loader.load(&mut registry, "src/Foo.jsx", source).unwrap();

        let foo = ComponentRef::new("src/Foo.jsx", "Foo");
        assert_eq!(module.export("Bar"), Some(&foo));
        assert_eq!(module.default_export(), Some(&foo));
        let decl = module.output().classification.component("Foo").unwrap();
        assert_eq!(decl.kind, ComponentKind::DefaultExportNamed);
        assert_eq!(decl.exports, vec!["Bar".to_string(), "default".to_string()]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_anonymous_default_expression_gets_alias() {
        let source = "export default memo(() => <p />);\n";
        let output = transform_module(source, "src/Memo.jsx", &TransformOptions::default());
        let m = derive_marker("src/Memo.jsx", "__markedDefault");

        let expected = format!(
            "const __markedDefault = memo(() => <p {} />);\nexport default __markedDefault;\n",
            attr(&m)
        );
        assert!(output.code.starts_with(&expected), "{}", output.code);
        assert!(output
            .code
            .ends_with(&format!("__registerMarker(__markedDefault, \"{}\");\n", m)));
    }

    #[test]
    fn test_anonymous_default_class_gets_alias() {
        let source = "import { Component } from \"react\";\nexport default class extends Component { render() { return <div />; } }\n";
        let output = transform_module(source, "src/Shell.jsx", &TransformOptions::default());

        assert!(output
            .code
            .contains("export default class __markedDefault extends Component {"));
        assert!(output.code.contains("__registerMarker(__markedDefault, \""));
    }

    #[test]
    fn test_decorated_anonymous_default_class_keeps_decorator() {
        let source = "import { Component } from \"react\";\nexport default @withclassName class extends Component { render() { return <div />; } }\n";
        let output = transform_module(source, "src/Shell.jsx", &TransformOptions::default());

        assert!(output.code.contains(
            "export default @withclassName class __markedDefault extends Component {"
        ));
        assert!(!output.code.contains("@withclass __markedDefault"));
        assert!(output.code.contains("__registerMarker(__markedDefault, \""));
    }

    #[test]
    fn test_non_component_arguments_left_alone() {
        let source = "import { Schema } from \"x\";\nconst Config = { retries: 3 };\nexport const Store = createStore(Config);\nexport const User = z.object(Schema);\n";
        let output = transform_module(source, "src/store.js", &TransformOptions::default());

        assert!(!output.changed);
        assert_eq!(output.code, source);
        assert!(output.assignments.is_empty());
        assert!(!output.code.contains("__markComponent"));
    }

    #[test]
    fn test_reserved_attribute_conflict_is_a_warning() {
        let source = "export const Mine = () => <div data-component-marker=\"hand\" />;\nexport const Other = () => <span />;\n";
        let output = transform_module(source, "src/Mine.jsx", &TransformOptions::default());

        let warnings: Vec<_> = output.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, DIAG_ATTRIBUTE_CONFLICT);
        assert_eq!(warnings[0].location.line, 1);
        assert!(output.marker_for("Mine").is_none());
        assert!(output.marker_for("Other").is_some());
        assert!(output.code.contains("<div data-component-marker=\"hand\" />"));
    }

    #[test]
    fn test_unparsable_module_passes_through() {
        let source = "export const = ;";
        let output = transform_module(source, "src/broken.jsx", &TransformOptions::default());
        assert_eq!(output.code, source);
        assert!(!output.changed);
        assert_eq!(output.diagnostics[0].code, DIAG_PARSE_FAILED);
        assert!(!output.classification.parse_errors.is_empty());
    }

    #[test]
    fn test_conflicting_registration_aborts_load() {
        let mut registry = IdentityRegistry::new();
        registry
            .register(ComponentRef::new("src/kinds.jsx", "Header"), "Header-00000000")
            .unwrap();
        let mut loader = ModuleLoader::default();

        let err = loader
            .load(&mut registry, "src/kinds.jsx", ALL_KINDS)
            .unwrap_err();
        assert!(matches!(err, RegistryError::ConflictingMarker { .. }));
        assert!(loader.get("src/kinds.jsx").is_none());
    }

    #[test]
    fn test_registry_attribute_must_match_options() {
        let mut registry = IdentityRegistry::with_attribute_name("data-testid");
        let mut loader = ModuleLoader::default();
        let err = loader
            .load(&mut registry, "src/kinds.jsx", ALL_KINDS)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::AttributeMismatch {
                registry: "data-testid".to_string(),
                module: "data-component-marker".to_string(),
            }
        );
    }

    #[test]
    fn test_custom_attribute_name_flows_to_selector() {
        let options = TransformOptions {
            attribute_name: "data-qa".to_string(),
            ..TransformOptions::default()
        };
        let mut registry = IdentityRegistry::with_attribute_name("data-qa");
        let mut loader = ModuleLoader::new(options);
        let card = load(&mut loader, &mut registry, "src/Card.jsx", "export const Card = () => <div />;", "Card");

        let m = marker(&registry, &card);
        assert!(loader
            .get("src/Card.jsx")
            .unwrap()
            .code()
            .contains(&format!("<div data-qa=\"{}\" />", m)));
        assert_eq!(
            crate::select!(registry; card).unwrap().to_query(),
            format!("[data-qa~=\"{}\"]", m)
        );
    }
}
