#![allow(non_snake_case)]

use super::*;
use crate::naming::ImportTable;
use crate::registry::AbstractionRegistry;
use crate::walker::discover;
use apibridge_schema::SchemaCatalog;
use std::collections::BTreeSet;

const PKG: &str = "crate::schema::v1";

const SCHEMA: &str = r#"
    #[derive(Serialize, Deserialize)]
    pub struct RouteSpec {
        pub traffic: Vec<TrafficTarget>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct TrafficTarget {
        #[serde(flatten)]
        pub target_ref: TargetRef,
        pub tag: Option<String>,
        pub percent: i64,
        pub deprecated_name: String,
        pub validator: Option<Box<dyn crate::validator::Validator>>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct TargetRef {
        pub revision_name: String,
    }
"#;

const NESTED: &str = r#"
    #[derive(Serialize, Deserialize)]
    pub struct Route {
        pub rules: Vec<Rule>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct Rule {
        pub host: String,
        pub spec: RuleSpec,
    }

    #[derive(Serialize, Deserialize)]
    pub struct RuleSpec {
        pub path: String,
    }
"#;

struct Fixture {
    catalog: SchemaCatalog,
    registry: AbstractionRegistry,
    imports: ImportTable,
    traits: BTreeSet<String>,
}

fn fixture(source: &str, root: &str) -> Fixture {
    let mut catalog = SchemaCatalog::new();
    catalog.load_source(PKG, source).unwrap();
    let registry = discover(&catalog, "v1", &GenerationOptions::new(PKG, [root])).unwrap();
    let traits = registry.names();
    Fixture {
        catalog,
        registry,
        imports: ImportTable::new(),
        traits,
    }
}

fn methods(fixture: &mut Fixture, elem: &str, options: &GenerationOptions) -> GenResult<Vec<Function>> {
    let mut r = Renderer {
        catalog: &fixture.catalog,
        registry: &fixture.registry,
        my_package: "crate::adapters::v1",
        imports: &mut fixture.imports,
        traits: &fixture.traits,
        trait_qualifier: Some("generic".into()),
        adapter_prefix: "V1".into(),
    };
    let slice = format!("{elem}Slice");
    slice_methods(&mut r, &SchemaType::named(PKG, elem), &slice, options, &|_| true)
}

fn find<'a>(methods: &'a [Function], name: &str) -> &'a Function {
    methods.iter().find(|m| m.name == name).unwrap()
}

fn keyed_options() -> GenerationOptions {
    let mut options = GenerationOptions::new(PKG, ["RouteSpec"]);
    options.slice_keys.insert(
        "TrafficTarget".into(),
        vec!["tag".into(), "revision_name".into()],
    );
    options
}

#[test]
fn slice_methods___default_order___is_stable() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");

    let methods = methods(&mut fixture, "TrafficTarget", &keyed_options()).unwrap();

    let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "iter",
            "index",
            "get",
            "find",
            "filter",
            "upsert",
            "matches_tag",
            "matches_revision_name",
            "len",
            "is_empty",
            "into_elts",
        ]
    );
}

#[test]
fn slice_methods___explicit_keys___follow_configured_order() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");

    let methods = methods(&mut fixture, "TrafficTarget", &keyed_options()).unwrap();

    assert_eq!(
        find(&methods, "index").signature(),
        "fn index(&self, tag: Option<&str>, revision_name: &str) -> Option<usize>"
    );
    assert_eq!(
        find(&methods, "find").signature(),
        "fn find(&mut self, tag: Option<&str>, revision_name: &str) -> Option<Box<dyn generic::TrafficTarget + '_>>"
    );
}

#[test]
fn slice_methods___default_keys___skip_uncomparable_fields() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");
    let options = GenerationOptions::new(PKG, ["RouteSpec"]);

    let methods = methods(&mut fixture, "TrafficTarget", &options).unwrap();

    assert_eq!(
        find(&methods, "index").signature(),
        "fn index(&self, revision_name: &str, tag: Option<&str>, percent: i64) -> Option<usize>"
    );
}

#[test]
fn slice_methods___uncomparable_explicit_key___fails() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");
    let mut options = GenerationOptions::new(PKG, ["RouteSpec"]);
    options.slice_keys.insert("TrafficTarget".into(), vec!["validator".into()]);

    let err = methods(&mut fixture, "TrafficTarget", &options).unwrap_err();

    assert!(matches!(err, GenError::UnsupportedKeyField { field, .. } if field == "validator"));
}

#[test]
fn slice_methods___unknown_explicit_key___fails() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");
    let mut options = GenerationOptions::new(PKG, ["RouteSpec"]);
    options.slice_keys.insert("TrafficTarget".into(), vec!["weight".into()]);

    let err = methods(&mut fixture, "TrafficTarget", &options).unwrap_err();

    assert!(matches!(err, GenError::UnsupportedKeyField { element, .. } if element == "TrafficTarget"));
}

#[test]
fn slice_methods___index___compares_every_key() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");

    let methods = methods(&mut fixture, "TrafficTarget", &keyed_options()).unwrap();
    let body = find(&methods, "index").body.join("\n");

    assert!(body.starts_with("for (i, elt) in self.0.iter().enumerate() {"));
    assert!(body.contains("    if elt.target_ref.revision_name != revision_name {"));
    assert!(body.contains("    match (elt.tag.as_deref(), tag) {"));
    assert!(body.ends_with("    return Some(i);\n}\nNone"));
}

#[test]
fn slice_methods___find___calls_through_trait_path() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");

    let methods = methods(&mut fixture, "TrafficTarget", &keyed_options()).unwrap();

    assert_eq!(
        find(&methods, "find").body,
        vec![
            "let i = generic::TrafficTargetSlice::index(self, tag, revision_name)?;",
            "Some(generic::TrafficTargetSlice::get(self, i))",
        ]
    );
}

#[test]
fn slice_methods___upsert___builds_element_from_owned_fields() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");

    let methods = methods(&mut fixture, "TrafficTarget", &keyed_options()).unwrap();
    let upsert = find(&methods, "upsert");

    assert_eq!(
        upsert.signature(),
        "fn upsert(&mut self, tag: Option<String>, revision_name: String, percent: i64, \
         validator: Option<Box<dyn validator::Validator>>) -> Box<dyn generic::TrafficTarget + '_>"
    );
    let body = upsert.body.join("\n");
    assert!(body.starts_with(
        "let found = generic::TrafficTargetSlice::index(self, tag.as_deref(), &revision_name);"
    ));
    assert!(body.contains("let elt = v1::TrafficTarget {\n    target_ref: v1::TargetRef {\n        revision_name,\n    },"));
    assert!(body.contains("    ..Default::default()\n};"));
    assert!(body.ends_with("generic::TrafficTargetSlice::get(self, i)"));
}

#[test]
fn slice_methods___abstract_element_field___upserts_erased_value() {
    let mut fixture = fixture(NESTED, "Route");
    let options = GenerationOptions::new(PKG, ["Route"]);

    let methods = methods(&mut fixture, "Rule", &options).unwrap();
    let upsert = find(&methods, "upsert");

    assert_eq!(
        upsert.signature(),
        "fn upsert(&mut self, host: String, spec: apibridge_runtime::ErasedValue) -> Box<dyn generic::Rule + '_>"
    );
    assert!(upsert.body.join("\n").contains("    spec: apibridge_runtime::unwrap_value(spec),"));
}

#[test]
fn make_slice_interface___nested_struct_element___declares_upsert() {
    let mut fixture = fixture(NESTED, "Route");
    let options = GenerationOptions::new(PKG, ["Route"]);
    let mut r = Renderer {
        catalog: &fixture.catalog,
        registry: &fixture.registry,
        my_package: "crate::generic",
        imports: &mut fixture.imports,
        traits: &fixture.traits,
        trait_qualifier: None,
        adapter_prefix: String::new(),
    };

    let decl = make_slice_interface(&mut r, &SchemaType::named(PKG, "Rule"), "RuleSlice", &options).unwrap();

    assert_eq!(
        decl.method("upsert").unwrap().signature(),
        "fn upsert(&mut self, host: String, spec: apibridge_runtime::ErasedValue) -> Box<dyn Rule + '_>"
    );
}

#[test]
fn slice_methods___reordered_fields___upsert_signature_unchanged() {
    let reordered = SCHEMA.replace(
        "pub tag: Option<String>,\n        pub percent: i64,",
        "pub percent: i64,\n        pub tag: Option<String>,",
    );
    assert_ne!(reordered, SCHEMA);
    let mut original = fixture(SCHEMA, "RouteSpec");
    let mut drifted = fixture(&reordered, "RouteSpec");

    let expected = find(&methods(&mut original, "TrafficTarget", &keyed_options()).unwrap(), "upsert").signature();
    let found = find(&methods(&mut drifted, "TrafficTarget", &keyed_options()).unwrap(), "upsert").signature();

    assert_eq!(found, expected);
}

#[test]
fn slice_methods___wanted_filter___drops_methods() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");
    let mut r = Renderer {
        catalog: &fixture.catalog,
        registry: &fixture.registry,
        my_package: "crate::adapters::v1",
        imports: &mut fixture.imports,
        traits: &fixture.traits,
        trait_qualifier: Some("generic".into()),
        adapter_prefix: "V1".into(),
    };
    let elem = SchemaType::named(PKG, "TrafficTarget");

    let methods = slice_methods(&mut r, &elem, "TrafficTargetSlice", &keyed_options(), &|m| m != "upsert").unwrap();

    assert!(methods.iter().all(|m| m.name != "upsert"));
    assert_eq!(methods.len(), 10);
}

#[test]
fn slice_methods___element_without_trait___uses_adapter_types() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");
    fixture.traits.clear();

    let methods = methods(&mut fixture, "TrafficTarget", &keyed_options()).unwrap();

    assert_eq!(find(&methods, "get").ret.as_deref(), Some("V1TrafficTarget<'_>"));
    assert_eq!(find(&methods, "get").body, vec!["V1TrafficTarget(&mut self.0[i])"]);
    assert_eq!(
        find(&methods, "filter").signature(),
        "fn filter(&self, predicate: &mut dyn FnMut(&mut V1TrafficTarget<'_>) -> bool) -> V1TrafficTargetSlice<'static>"
    );
    assert_eq!(find(&methods, "iter").body, vec!["Box::new(self.0.iter_mut().map(V1TrafficTarget))"]);
}

#[test]
fn make_slice_interface___element___names_and_documents_trait() {
    let mut fixture = fixture(SCHEMA, "RouteSpec");
    let mut r = Renderer {
        catalog: &fixture.catalog,
        registry: &fixture.registry,
        my_package: "crate::generic",
        imports: &mut fixture.imports,
        traits: &fixture.traits,
        trait_qualifier: None,
        adapter_prefix: String::new(),
    };

    let decl = make_slice_interface(
        &mut r,
        &SchemaType::named(PKG, "TrafficTarget"),
        "TrafficTargetSlice",
        &keyed_options(),
    )
    .unwrap();

    assert_eq!(decl.name, "TrafficTargetSlice");
    assert_eq!(
        decl.method("into_elts").unwrap().signature(),
        "fn into_elts(self: Box<Self>) -> apibridge_runtime::ErasedElts"
    );
    assert_eq!(
        decl.method("filter").unwrap().signature(),
        "fn filter(&self, predicate: &mut dyn FnMut(&mut dyn TrafficTarget) -> bool) -> Box<dyn TrafficTargetSlice>"
    );
}
