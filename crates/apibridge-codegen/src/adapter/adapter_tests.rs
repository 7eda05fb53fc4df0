#![allow(non_snake_case)]

use super::*;
use crate::interface::make_traits;
use crate::naming::ImportTable;
use crate::registry::AbstractionRegistry;
use crate::walker::discover;
use apibridge_schema::SchemaCatalog;

const HUB: &str = "crate::schema::v1";
const SPOKE: &str = "crate::schema::v2";

const HUB_SCHEMA: &str = r#"
    #[derive(Serialize, Deserialize)]
    pub struct Route {
        pub name: String,
        pub spec: RouteSpec,
    }

    #[derive(Serialize, Deserialize)]
    pub struct RouteSpec {
        pub traffic: Vec<TrafficTarget>,
        pub timeout: Option<i64>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct TrafficTarget {
        pub tag: Option<String>,
        pub percent: i64,
    }
"#;

const SPOKE_SCHEMA: &str = r#"
    #[derive(Serialize, Deserialize)]
    pub struct Route {
        pub name: String,
        pub spec: RouteSpec,
        pub legacy: bool,
    }

    #[derive(Serialize, Deserialize)]
    pub struct RouteSpec {
        pub traffic: Vec<TrafficTarget>,
        pub timeout: Option<String>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct TrafficTarget {
        pub tag: Option<String>,
        pub percent: i64,
    }
"#;

struct Fixture {
    catalog: SchemaCatalog,
    hub: AbstractionRegistry,
    spoke: AbstractionRegistry,
    hub_options: GenerationOptions,
    imports: ImportTable,
}

fn fixture() -> Fixture {
    let mut catalog = SchemaCatalog::new();
    catalog.load_source(HUB, HUB_SCHEMA).unwrap();
    catalog.load_source(SPOKE, SPOKE_SCHEMA).unwrap();
    let hub_options = GenerationOptions::new(HUB, ["Route"]);
    let hub = discover(&catalog, "v1", &hub_options).unwrap();
    let spoke = discover(&catalog, "v2", &GenerationOptions::new(SPOKE, ["Route"])).unwrap();
    let mut imports = ImportTable::new();
    imports.alias_for("crate::adapters::v2").unwrap();
    imports.alias_for("crate::generic").unwrap();
    Fixture {
        catalog,
        hub,
        spoke,
        hub_options,
        imports,
    }
}

fn adapters(fixture: &mut Fixture, options: &GenerationOptions, overrides: &OverrideSet) -> GenResult<Vec<AdapterDecl>> {
    let traits = fixture.hub.names();
    let canonical = {
        let mut r = Renderer {
            catalog: &fixture.catalog,
            registry: &fixture.hub,
            my_package: "crate::adapters::v2",
            imports: &mut fixture.imports,
            traits: &traits,
            trait_qualifier: Some("generic".into()),
            adapter_prefix: "V2".into(),
        };
        make_traits(&mut r, &fixture.hub_options)?
    };
    let mut r = Renderer {
        catalog: &fixture.catalog,
        registry: &fixture.spoke,
        my_package: "crate::adapters::v2",
        imports: &mut fixture.imports,
        traits: &traits,
        trait_qualifier: Some("generic".into()),
        adapter_prefix: "V2".into(),
    };
    make_adapters(&mut r, options, &canonical, overrides)
}

fn timeout_override() -> OverrideSet {
    let mut overrides = OverrideSet::new();
    overrides.insert(
        "V2RouteSpec",
        "get_timeout",
        "fn get_timeout(&self) -> Option<i64> {\n    self.0.timeout.as_deref().and_then(|t| t.parse().ok())\n}",
    );
    overrides.insert(
        "V2RouteSpec",
        "set_timeout",
        "fn set_timeout(&mut self, o: Option<i64>) {\n    self.0.timeout = o.map(|t| t.to_string());\n}",
    );
    overrides
}

fn adapter<'a>(adapters: &'a [AdapterDecl], name: &str) -> &'a AdapterDecl {
    adapters.iter().find(|a| a.name == name).unwrap()
}

fn names(methods: &[MethodSource]) -> Vec<&str> {
    methods.iter().map(MethodSource::name).collect()
}

#[test]
fn make_adapters___signature_differs___fails_with_mismatch() {
    let mut fixture = fixture();
    let options = GenerationOptions::new(SPOKE, ["Route"]);

    let err = adapters(&mut fixture, &options, &OverrideSet::new()).unwrap_err();

    assert!(matches!(
        err,
        GenError::SignatureMismatch { adapter, method, .. } if adapter == "V2RouteSpec" && method == "get_timeout"
    ));
}

#[test]
fn make_adapters___override___satisfies_trait_method() {
    let mut fixture = fixture();
    let options = GenerationOptions::new(SPOKE, ["Route"]);

    let adapters = adapters(&mut fixture, &options, &timeout_override()).unwrap();

    let spec = adapter(&adapters, "V2RouteSpec");
    assert_eq!(spec.trait_path.as_deref(), Some("generic::RouteSpec"));
    assert_eq!(names(&spec.trait_methods), vec!["get_traffic", "set_traffic", "get_timeout", "set_timeout"]);
    assert!(matches!(&spec.trait_methods[2], MethodSource::Override { .. }));
    assert!(spec.inherent.is_empty());
}

#[test]
fn make_adapters___extra_field___goes_to_inherent_impl() {
    let mut fixture = fixture();
    let options = GenerationOptions::new(SPOKE, ["Route"]);

    let adapters = adapters(&mut fixture, &options, &timeout_override()).unwrap();

    let route = adapter(&adapters, "V2Route");
    assert_eq!(names(&route.trait_methods), vec!["get_name", "set_name", "get_spec"]);
    assert_eq!(names(&route.inherent), vec!["get_legacy", "set_legacy"]);
}

#[test]
fn make_adapters___omitted_trait_method___is_missing() {
    let mut fixture = fixture();
    let mut options = GenerationOptions::new(SPOKE, ["Route"]);
    options
        .omit_implementations
        .insert("TrafficTargetSlice".into(), ["upsert".to_string()].into());

    let err = adapters(&mut fixture, &options, &timeout_override()).unwrap_err();

    assert!(matches!(
        err,
        GenError::MissingImplementation { adapter, trait_name, method }
            if adapter == "V2TrafficTargetSlice" && trait_name == "TrafficTargetSlice" && method == "upsert"
    ));
}

#[test]
fn make_adapters___omitted_field___drops_both_accessors() {
    let mut fixture = fixture();
    let mut options = GenerationOptions::new(SPOKE, ["Route"]);
    options
        .omit_implementations
        .insert("Route".into(), ["legacy".to_string()].into());

    let adapters = adapters(&mut fixture, &options, &timeout_override()).unwrap();

    assert!(adapter(&adapters, "V2Route").inherent.is_empty());
}

#[test]
fn make_adapters___override_for_unknown_adapter___is_orphaned() {
    let mut fixture = fixture();
    let options = GenerationOptions::new(SPOKE, ["Route"]);
    let mut overrides = timeout_override();
    overrides.insert("V2Revision", "get_name", "fn get_name(&self) -> &str {\n    \"\"\n}");

    let err = adapters(&mut fixture, &options, &overrides).unwrap_err();

    assert!(matches!(err, GenError::OrphanOverride { adapter, .. } if adapter == "V2Revision"));
}

#[test]
fn make_adapters___extra_override___becomes_public_inherent_method() {
    let mut fixture = fixture();
    let options = GenerationOptions::new(SPOKE, ["Route"]);
    let mut overrides = timeout_override();
    overrides.insert("V2Route", "is_legacy", "fn is_legacy(&self) -> bool {\n    self.0.legacy\n}");

    let adapters = adapters(&mut fixture, &options, &overrides).unwrap();

    let mut out = String::new();
    adapter(&adapters, "V2Route").write(&mut out);
    assert!(out.contains("    pub fn is_legacy(&self) -> bool {\n        self.0.legacy\n    }\n"));
}

#[test]
fn make_adapters___collection___wraps_spoke_elements() {
    let mut fixture = fixture();
    let options = GenerationOptions::new(SPOKE, ["Route"]);

    let adapters = adapters(&mut fixture, &options, &timeout_override()).unwrap();

    let slice = adapter(&adapters, "V2TrafficTargetSlice");
    assert_eq!(slice.wrapped, Wrapped::Collection("schemav2::TrafficTarget".into()));
    assert_eq!(slice.trait_path.as_deref(), Some("generic::TrafficTargetSlice"));
    assert_eq!(slice.trait_methods.len(), 11);
}
